//! Camera for ray generation.

use crate::sampling::random_in_unit_disk;
use glint_core::CameraConfig;
use glint_math::{Point3, Ray, Vec3};
use rand::RngCore;

/// Camera for generating rays into the scene.
///
/// Maps normalized image-plane coordinates to world-space rays:
/// `(0, 0)` aims at the lower-left corner of the viewport and `(1, 1)` at
/// the upper-right.
#[derive(Debug, Clone)]
pub struct Camera {
    origin: Point3,
    lower_left_corner: Point3,
    horizontal: Vec3,
    vertical: Vec3,
    // Camera basis
    u: Vec3,
    v: Vec3,
    w: Vec3,
    lens_radius: f32,
}

impl Camera {
    /// Build a camera from its configuration.
    pub fn new(config: &CameraConfig) -> Self {
        let theta = config.vertical_fov_degrees.to_radians();
        let h = (theta / 2.0).tan();
        let viewport_height = 2.0 * h;
        let viewport_width = config.aspect_ratio * viewport_height;
        let focus_dist = config.effective_focus_distance();

        // Calculate camera basis vectors
        let w = (config.position - config.look_at).normalize();
        let u = config.up.cross(w).normalize();
        let v = w.cross(u);

        let origin = config.position;
        let horizontal = focus_dist * viewport_width * u;
        let vertical = focus_dist * viewport_height * v;
        let lower_left_corner = origin - horizontal / 2.0 - vertical / 2.0 - focus_dist * w;

        Self {
            origin,
            lower_left_corner,
            horizontal,
            vertical,
            u,
            v,
            w,
            lens_radius: config.aperture / 2.0,
        }
    }

    /// Generate the ray through image-plane coordinates `(s, t)`.
    ///
    /// With a nonzero aperture the origin is jittered across the lens; the
    /// ray still passes through the same point on the focus plane.
    pub fn get_ray(&self, s: f32, t: f32, rng: &mut dyn RngCore) -> Ray {
        let offset = if self.lens_radius > 0.0 {
            let rd = self.lens_radius * random_in_unit_disk(rng);
            self.u * rd.x + self.v * rd.y
        } else {
            Vec3::ZERO
        };

        let target = self.lower_left_corner + s * self.horizontal + t * self.vertical;
        Ray::new(self.origin + offset, target - self.origin - offset)
    }

    /// Eye position.
    pub fn origin(&self) -> Point3 {
        self.origin
    }

    /// Direction the camera looks along.
    pub fn forward(&self) -> Vec3 {
        -self.w
    }

    pub fn lens_radius(&self) -> f32 {
        self.lens_radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn pinhole() -> Camera {
        let config = CameraConfig::new()
            .with_position(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), Vec3::Y)
            .with_lens(90.0, 0.0, 0.0)
            .with_aspect_ratio(2.0);
        Camera::new(&config)
    }

    #[test]
    fn test_camera_basis() {
        let camera = pinhole();

        assert_eq!(camera.origin(), Vec3::ZERO);
        assert!((camera.forward() - Vec3::NEG_Z).length() < 1e-6);
        assert_eq!(camera.lens_radius(), 0.0);
    }

    #[test]
    fn test_viewport_corners() {
        let camera = pinhole();
        let mut rng = StdRng::seed_from_u64(42);

        // vfov 90 => viewport 2 high, 4 wide, one unit in front
        let lower_left = camera.get_ray(0.0, 0.0, &mut rng);
        assert!((lower_left.direction() - Vec3::new(-2.0, -1.0, -1.0)).length() < 1e-5);

        let upper_right = camera.get_ray(1.0, 1.0, &mut rng);
        assert!((upper_right.direction() - Vec3::new(2.0, 1.0, -1.0)).length() < 1e-5);

        let center = camera.get_ray(0.5, 0.5, &mut rng);
        assert!((center.direction() - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-5);
        assert_eq!(center.origin(), Vec3::ZERO);
    }

    #[test]
    fn test_coordinates_outside_unit_square() {
        let camera = pinhole();
        let mut rng = StdRng::seed_from_u64(42);

        let ray = camera.get_ray(1.5, -0.5, &mut rng);
        assert!((ray.direction() - Vec3::new(4.0, -2.0, -1.0)).length() < 1e-5);
    }

    #[test]
    fn test_focus_distance_scales_viewport_not_direction() {
        let config = CameraConfig::new()
            .with_position(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), Vec3::Y)
            .with_lens(90.0, 0.0, 4.0)
            .with_aspect_ratio(2.0);
        let camera = Camera::new(&config);
        let mut rng = StdRng::seed_from_u64(42);

        let ray = camera.get_ray(0.0, 0.0, &mut rng);
        assert!((ray.direction() - Vec3::new(-8.0, -4.0, -4.0)).length() < 1e-4);
    }

    #[test]
    fn test_aperture_keeps_focus_point() {
        let focus = 3.0;
        let config = CameraConfig::new()
            .with_position(Vec3::new(0.0, 1.0, 2.0), Vec3::new(0.0, 1.0, -1.0), Vec3::Y)
            .with_lens(40.0, 0.8, focus);
        let camera = Camera::new(&config);
        let mut rng = StdRng::seed_from_u64(7);

        for &(s, t) in &[(0.5, 0.5), (0.1, 0.9), (0.75, 0.2)] {
            let pinhole_target = {
                let ray = Ray::new(
                    camera.origin,
                    camera.lower_left_corner + s * camera.horizontal + t * camera.vertical
                        - camera.origin,
                );
                ray.at(1.0)
            };

            for _ in 0..20 {
                let ray = camera.get_ray(s, t, &mut rng);
                // Origin stays on the lens disk
                let offset = ray.origin() - camera.origin();
                assert!(offset.length() <= camera.lens_radius() + 1e-5);
                assert!(offset.dot(camera.forward()).abs() < 1e-5);
                // and the ray still reaches the same focus-plane point
                assert!((ray.at(1.0) - pinhole_target).length() < 1e-4);
            }
        }
    }
}
