//! Scene description types for Glint.
//!
//! This module defines the renderer-agnostic description of a scene:
//! camera configuration, render settings and the sphere list. These are
//! plain data types that deserialize from JSON and get validated before
//! the renderer turns them into its own runtime representation.

use glint_math::{Point3, Vec3};
use serde::{Deserialize, Serialize};

use crate::loader::{SceneError, SceneResult};

/// Default minimum ray parameter accepted by the integrator.
///
/// Bounced rays start on a surface; ignoring hits closer than this keeps
/// them from re-hitting their own origin ("shadow acne").
pub const DEFAULT_T_MIN: f32 = 0.001;

/// Largest accepted image width or height, in pixels.
pub const MAX_IMAGE_DIMENSION: u32 = 16384;

/// Camera placement and lens settings.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Eye position
    pub position: Point3,

    /// Point the camera looks at
    pub look_at: Point3,

    /// World "up" hint used to build the camera basis
    pub up: Vec3,

    /// Vertical field of view in degrees
    pub vertical_fov_degrees: f32,

    /// Viewport width / height
    pub aspect_ratio: f32,

    /// Lens diameter, 0 = pinhole
    pub aperture: f32,

    /// Distance to the plane of perfect focus, <= 0 = disabled
    pub focus_distance: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: Point3::ZERO,
            look_at: Point3::new(0.0, 0.0, -1.0),
            up: Vec3::Y,
            vertical_fov_degrees: 90.0,
            aspect_ratio: 16.0 / 9.0,
            aperture: 0.0,
            focus_distance: 0.0,
        }
    }
}

impl CameraConfig {
    /// Create a camera config with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set camera position.
    pub fn with_position(mut self, position: Point3, look_at: Point3, up: Vec3) -> Self {
        self.position = position;
        self.look_at = look_at;
        self.up = up;
        self
    }

    /// Set lens settings.
    pub fn with_lens(
        mut self,
        vertical_fov_degrees: f32,
        aperture: f32,
        focus_distance: f32,
    ) -> Self {
        self.vertical_fov_degrees = vertical_fov_degrees;
        self.aperture = aperture;
        self.focus_distance = focus_distance;
        self
    }

    /// Set the aspect ratio.
    pub fn with_aspect_ratio(mut self, aspect_ratio: f32) -> Self {
        self.aspect_ratio = aspect_ratio;
        self
    }

    /// Focus distance actually used for the viewport.
    ///
    /// A disabled focus distance places the viewport one unit in front of
    /// the eye.
    pub fn effective_focus_distance(&self) -> f32 {
        if self.focus_distance > 0.0 {
            self.focus_distance
        } else {
            1.0
        }
    }

    fn validate(&self) -> SceneResult<()> {
        let invalid = |reason: &str| Err(SceneError::InvalidCamera(reason.to_string()));

        if !(self.position.is_finite() && self.look_at.is_finite() && self.up.is_finite()) {
            return invalid("camera vectors must be finite");
        }
        let view = self.position - self.look_at;
        if view.length_squared() == 0.0 {
            return invalid("position and look_at must differ");
        }
        if self.up.cross(view).length_squared() == 0.0 {
            return invalid("up must not be parallel to the view direction");
        }
        if !(self.vertical_fov_degrees > 0.0 && self.vertical_fov_degrees < 180.0) {
            return invalid("vertical_fov_degrees must be in (0, 180)");
        }
        if !(self.aspect_ratio.is_finite() && self.aspect_ratio > 0.0) {
            return invalid("aspect_ratio must be positive");
        }
        if !(self.aperture.is_finite() && self.aperture >= 0.0) {
            return invalid("aperture must be non-negative");
        }
        if !self.focus_distance.is_finite() {
            return invalid("focus_distance must be finite");
        }
        Ok(())
    }
}

/// Image and sampling settings.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Output width in pixels; height follows from the aspect ratio
    pub image_width: u32,

    /// Camera rays averaged per pixel
    pub samples_per_pixel: u32,

    /// Maximum number of bounces per path
    pub max_depth: u32,

    /// Minimum accepted hit distance
    pub t_min: f32,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            image_width: 400,
            samples_per_pixel: 100,
            max_depth: 50,
            t_min: DEFAULT_T_MIN,
        }
    }
}

impl RenderSettings {
    fn validate(&self) -> SceneResult<()> {
        let invalid = |reason: &str| Err(SceneError::InvalidRender(reason.to_string()));

        if self.image_width < 2 {
            return invalid("image_width must be at least 2");
        }
        if self.image_width > MAX_IMAGE_DIMENSION {
            return invalid("image_width is too large");
        }
        if self.samples_per_pixel == 0 {
            return invalid("samples_per_pixel must be at least 1");
        }
        if !(self.t_min.is_finite() && self.t_min >= 0.0) {
            return invalid("t_min must be a non-negative number");
        }
        Ok(())
    }
}

/// Surface material description.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MaterialDesc {
    /// Ideal diffuse surface
    Lambertian { albedo: Vec3 },

    /// Reflective surface; fuzz 0 is a perfect mirror
    Metal {
        albedo: Vec3,
        #[serde(default)]
        fuzz: f32,
    },

    /// Clear refractive surface (glass, water)
    Dielectric { refractive_index: f32 },
}

impl MaterialDesc {
    fn validate(&self, index: usize) -> SceneResult<()> {
        let invalid = |reason: &str| {
            Err(SceneError::InvalidMaterial {
                index,
                reason: reason.to_string(),
            })
        };

        match *self {
            MaterialDesc::Lambertian { albedo } | MaterialDesc::Metal { albedo, .. }
                if !albedo.is_finite() || albedo.min_element() < 0.0 =>
            {
                invalid("albedo must be finite and non-negative")
            }
            MaterialDesc::Metal { fuzz, .. } if !(0.0..=1.0).contains(&fuzz) => {
                invalid("fuzz must be in [0, 1]")
            }
            MaterialDesc::Dielectric { refractive_index }
                if !(refractive_index.is_finite() && refractive_index > 0.0) =>
            {
                invalid("refractive_index must be positive")
            }
            _ => Ok(()),
        }
    }
}

/// A sphere in the scene.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SphereDesc {
    pub center: Point3,
    pub radius: f32,
    pub material: MaterialDesc,
}

impl SphereDesc {
    /// Create a new sphere description.
    pub fn new(center: Point3, radius: f32, material: MaterialDesc) -> Self {
        Self {
            center,
            radius,
            material,
        }
    }
}

/// A complete scene: camera, settings and an ordered sphere list.
///
/// Sphere order does not change which surface a ray sees, but it is kept
/// stable so that a fixed seed reproduces the same image.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneDescription {
    #[serde(default)]
    pub camera: CameraConfig,

    #[serde(default)]
    pub render: RenderSettings,

    #[serde(default)]
    pub spheres: Vec<SphereDesc>,
}

impl SceneDescription {
    /// Create an empty scene with the given camera and settings.
    pub fn new(camera: CameraConfig, render: RenderSettings) -> Self {
        Self {
            camera,
            render,
            spheres: Vec::new(),
        }
    }

    /// Append a sphere.
    pub fn add_sphere(&mut self, sphere: SphereDesc) {
        self.spheres.push(sphere);
    }

    /// Get the number of spheres.
    pub fn sphere_count(&self) -> usize {
        self.spheres.len()
    }

    /// Image height derived from width and aspect ratio (at least 2).
    pub fn image_height(&self) -> u32 {
        ((self.render.image_width as f32 / self.camera.aspect_ratio) as u32).max(2)
    }

    /// Check every precondition the renderer relies on.
    pub fn validate(&self) -> SceneResult<()> {
        self.camera.validate()?;
        self.render.validate()?;
        if self.image_height() > MAX_IMAGE_DIMENSION {
            return Err(SceneError::InvalidRender(format!(
                "image height {} is too large, raise aspect_ratio",
                self.image_height()
            )));
        }

        for (index, sphere) in self.spheres.iter().enumerate() {
            if !sphere.center.is_finite() {
                return Err(SceneError::InvalidSphere {
                    index,
                    reason: "center must be finite".to_string(),
                });
            }
            if !(sphere.radius.is_finite() && sphere.radius > 0.0) {
                return Err(SceneError::InvalidSphere {
                    index,
                    reason: format!("radius must be positive, got {}", sphere.radius),
                });
            }
            sphere.material.validate(index)?;
        }

        Ok(())
    }

    /// The built-in demo scene.
    ///
    /// A large ground sphere with three spheres on top: hollow glass on
    /// the left, diffuse blue in the middle, brushed gold metal on the
    /// right. Viewed from above and to the side with a shallow depth of
    /// field focused on the middle sphere.
    pub fn demo() -> Self {
        let position = Point3::new(3.0, 3.0, 2.0);
        let look_at = Point3::new(0.0, 0.0, -1.0);
        let camera = CameraConfig::new()
            .with_position(position, look_at, Vec3::Y)
            .with_lens(20.0, 0.5, (position - look_at).length());

        let mut scene = Self::new(camera, RenderSettings::default());

        scene.add_sphere(SphereDesc::new(
            Point3::new(0.0, -100.5, -1.0),
            100.0,
            MaterialDesc::Lambertian {
                albedo: Vec3::new(0.8, 0.8, 0.0),
            },
        ));
        scene.add_sphere(SphereDesc::new(
            Point3::new(0.0, 0.0, -1.0),
            0.5,
            MaterialDesc::Lambertian {
                albedo: Vec3::new(0.1, 0.2, 0.5),
            },
        ));
        scene.add_sphere(SphereDesc::new(
            Point3::new(-1.0, 0.0, -1.0),
            0.5,
            MaterialDesc::Dielectric {
                refractive_index: 1.5,
            },
        ));
        // Air bubble inside the glass sphere
        scene.add_sphere(SphereDesc::new(
            Point3::new(-1.0, 0.0, -1.0),
            0.4,
            MaterialDesc::Dielectric {
                refractive_index: 1.0 / 1.5,
            },
        ));
        scene.add_sphere(SphereDesc::new(
            Point3::new(1.0, 0.0, -1.0),
            0.5,
            MaterialDesc::Metal {
                albedo: Vec3::new(0.8, 0.6, 0.2),
                fuzz: 0.3,
            },
        ));

        scene
    }
}
