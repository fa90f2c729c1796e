//! Glint Renderer - CPU Path Tracing
//!
//! A Monte Carlo path tracer for scenes of spheres with diffuse, metal
//! and dielectric materials.
//!
//! One sample flows one way: the camera produces a ray, `ray_color`
//! intersects the scene, the hit material scatters, and the recursion
//! continues until the ray escapes to the background, is absorbed, or
//! runs out of bounces.

mod camera;
mod hittable;
mod material;
mod renderer;
pub mod sampling;
mod sphere;

pub use camera::Camera;
pub use hittable::{HitRecord, Hittable, Scene};
pub use material::{Color, Material, ScatterResult};
pub use renderer::{
    color_to_rgb8, linear_to_gamma, ray_color, render, render_pixel, sky_gradient, Background,
    ImageBuffer, RenderConfig,
};
pub use sphere::Sphere;

/// Re-export Vec3 and common math types from glint_math
pub use glint_math::{Interval, Point3, Ray, Vec3};
