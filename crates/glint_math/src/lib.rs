// Re-export glam for convenience
pub use glam::*;

// Glint math types
mod interval;
mod ray;
pub use interval::Interval;
pub use ray::Ray;

/// A position in world space.
pub type Point3 = Vec3;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3_creation() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(v.x, 1.0);
        assert_eq!(v.y, 2.0);
        assert_eq!(v.z, 3.0);
    }

    #[test]
    fn test_point_alias_is_vec3() {
        let p: Point3 = Vec3::new(1.0, 2.0, 3.0);
        let q = p + Vec3::ONE;
        assert_eq!(q, Point3::new(2.0, 3.0, 4.0));
        assert_eq!(p.dot(Vec3::X), 1.0);
    }
}
