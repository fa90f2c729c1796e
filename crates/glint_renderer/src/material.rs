//! Surface materials and ray scattering.

use crate::hittable::HitRecord;
use crate::sampling::{
    gen_f32, near_zero, random_in_unit_sphere, random_unit_vector, reflect, refract,
    schlick_reflectance,
};
use glint_core::MaterialDesc;
use glint_math::{Ray, Vec3};
use rand::RngCore;

/// Color type alias (linear RGB, typically 0-1)
pub type Color = Vec3;

/// Result of a successful scatter: how much light survives the bounce and
/// where the path continues.
#[derive(Debug, Clone, Copy)]
pub struct ScatterResult {
    pub attenuation: Color,
    pub scattered: Ray,
}

/// How light interacts with a surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Material {
    /// Diffuse surface
    Lambertian { albedo: Color },
    /// Reflective surface; `fuzz` in [0, 1] blurs the reflection
    Metal { albedo: Color, fuzz: f32 },
    /// Refractive surface (glass, water)
    Dielectric { refractive_index: f32 },
}

impl Material {
    /// Create a Lambertian material with the given albedo color.
    pub fn lambertian(albedo: Color) -> Self {
        Material::Lambertian { albedo }
    }

    /// Create a Metal material.
    ///
    /// - `albedo`: The color of the metal
    /// - `fuzz`: Roughness, 0.0 = perfect mirror, 1.0 = very rough
    pub fn metal(albedo: Color, fuzz: f32) -> Self {
        let clamped = fuzz.clamp(0.0, 1.0);
        if clamped != fuzz {
            log::warn!("Metal fuzz {} clamped to {}", fuzz, clamped);
        }
        Material::Metal {
            albedo,
            fuzz: clamped,
        }
    }

    /// Create a Dielectric material.
    ///
    /// - `refractive_index`: 1.0 = air, 1.5 = glass, 2.4 = diamond
    pub fn dielectric(refractive_index: f32) -> Self {
        Material::Dielectric { refractive_index }
    }

    /// Scatter an incoming ray.
    ///
    /// Returns the attenuation and the scattered ray, or `None` if the ray
    /// is absorbed.
    pub fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        match *self {
            Material::Lambertian { albedo } => {
                let direction = lambertian_direction(rec.normal, random_unit_vector(rng));
                Some(ScatterResult {
                    attenuation: albedo,
                    scattered: Ray::new(rec.point, direction),
                })
            }
            Material::Metal { albedo, fuzz } => {
                let reflected = reflect(ray_in.direction().normalize(), rec.normal);
                let direction = if fuzz > 0.0 {
                    reflected + fuzz * random_in_unit_sphere(rng)
                } else {
                    reflected
                };

                // Fuzz can push the ray below the surface; absorb it
                if direction.dot(rec.normal) > 0.0 {
                    Some(ScatterResult {
                        attenuation: albedo,
                        scattered: Ray::new(rec.point, direction),
                    })
                } else {
                    None
                }
            }
            Material::Dielectric { refractive_index } => {
                let refraction_ratio = if rec.front_face {
                    1.0 / refractive_index
                } else {
                    refractive_index
                };

                let unit_direction = ray_in.direction().normalize();
                let cos_theta = (-unit_direction).dot(rec.normal).min(1.0);
                let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();

                let cannot_refract = refraction_ratio * sin_theta > 1.0;
                let direction = if cannot_refract
                    || gen_f32(rng) < schlick_reflectance(cos_theta, refraction_ratio)
                {
                    reflect(unit_direction, rec.normal)
                } else {
                    refract(unit_direction, rec.normal, refraction_ratio)
                };

                Some(ScatterResult {
                    attenuation: Color::ONE,
                    scattered: Ray::new(rec.point, direction),
                })
            }
        }
    }
}

impl From<&MaterialDesc> for Material {
    fn from(desc: &MaterialDesc) -> Self {
        match *desc {
            MaterialDesc::Lambertian { albedo } => Material::lambertian(albedo),
            MaterialDesc::Metal { albedo, fuzz } => Material::metal(albedo, fuzz),
            MaterialDesc::Dielectric { refractive_index } => {
                Material::dielectric(refractive_index)
            }
        }
    }
}

/// Diffuse bounce direction: normal plus a unit-sphere offset.
///
/// Falls back to the normal when the offset cancels it out.
#[inline]
fn lambertian_direction(normal: Vec3, offset: Vec3) -> Vec3 {
    let direction = normal + offset;
    if near_zero(direction) {
        normal
    } else {
        direction
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampling::ConstRng;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn record(point: Vec3, normal: Vec3, front_face: bool, material: &Material) -> HitRecord<'_> {
        HitRecord {
            point,
            normal,
            t: 1.0,
            front_face,
            material,
        }
    }

    #[test]
    fn test_lambertian_degenerate_direction_falls_back_to_normal() {
        let normal = Vec3::new(0.0, 0.0, 1.0);
        assert_eq!(lambertian_direction(normal, -normal), normal);

        let offset = Vec3::new(0.0, 0.6, -0.8);
        assert_eq!(lambertian_direction(normal, offset), normal + offset);
    }

    #[test]
    fn test_lambertian_scatter() {
        let albedo = Color::new(0.8, 0.3, 0.3);
        let mat = Material::lambertian(albedo);
        let rec = record(Vec3::new(0.0, 1.0, 0.0), Vec3::Y, true, &mat);
        let ray = Ray::new(Vec3::new(0.0, 2.0, 0.0), Vec3::NEG_Y);
        let mut rng = StdRng::seed_from_u64(1);

        for _ in 0..500 {
            let result = mat.scatter(&ray, &rec, &mut rng).expect("lambertian always scatters");
            assert_eq!(result.attenuation, albedo);
            assert_eq!(result.scattered.origin(), rec.point);
            assert!(!near_zero(result.scattered.direction()));
            // normal + unit vector never points below the surface
            assert!(result.scattered.direction().dot(rec.normal) > -1e-5);
        }
    }

    #[test]
    fn test_metal_without_fuzz_is_a_mirror() {
        let mat = Material::metal(Color::new(0.8, 0.8, 0.8), 0.0);
        let normal = Vec3::Y;
        let rec = record(Vec3::ZERO, normal, true, &mat);

        let ray = Ray::new(Vec3::new(-1.0, 1.0, -0.5), Vec3::new(1.0, -1.0, 0.5));
        let d = ray.direction().normalize();
        let mut rng = StdRng::seed_from_u64(3);

        let result = mat.scatter(&ray, &rec, &mut rng).unwrap();
        assert_eq!(result.scattered.direction(), d - 2.0 * d.dot(normal) * normal);
        assert_eq!(result.attenuation, Color::new(0.8, 0.8, 0.8));
    }

    #[test]
    fn test_metal_absorbs_rays_below_surface() {
        let mat = Material::metal(Color::ONE, 0.0);
        // Normal facing away from the reflected direction
        let rec = record(Vec3::ZERO, Vec3::NEG_Y, true, &mat);
        let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::NEG_Y);
        let mut rng = StdRng::seed_from_u64(3);

        assert!(mat.scatter(&ray, &rec, &mut rng).is_none());
    }

    #[test]
    fn test_metal_fuzz_is_clamped() {
        assert_eq!(
            Material::metal(Color::ONE, 4.0),
            Material::Metal {
                albedo: Color::ONE,
                fuzz: 1.0
            }
        );
    }

    #[test]
    fn test_fuzzy_metal_stays_above_surface() {
        let mat = Material::metal(Color::ONE, 0.9);
        let rec = record(Vec3::ZERO, Vec3::Y, true, &mat);
        let ray = Ray::new(Vec3::new(-1.0, 1.0, 0.0), Vec3::new(1.0, -1.0, 0.0));
        let mut rng = StdRng::seed_from_u64(11);

        for _ in 0..500 {
            if let Some(result) = mat.scatter(&ray, &rec, &mut rng) {
                assert!(result.scattered.direction().dot(rec.normal) > 0.0);
            }
        }
    }

    #[test]
    fn test_dielectric_matched_index_at_normal_incidence_passes_straight_through() {
        let mat = Material::dielectric(1.0);
        // cos = 1 makes the Schlick reflectance exactly 0, so no draw can reflect
        let rec = record(Vec3::ZERO, Vec3::Y, true, &mat);
        let ray = Ray::new(Vec3::new(0.0, 3.0, 0.0), Vec3::new(0.0, -3.0, 0.0));
        let mut rng = StdRng::seed_from_u64(1);

        for _ in 0..1000 {
            let result = mat.scatter(&ray, &rec, &mut rng).unwrap();
            assert_eq!(result.attenuation, Color::ONE);
            assert_eq!(result.scattered.direction(), Vec3::NEG_Y);
        }
    }

    #[test]
    fn test_dielectric_matched_index_still_reflects_at_grazing_angles() {
        // r0 = 0, but the (1 - cos)^5 term keeps grazing reflections alive
        let mat = Material::dielectric(1.0);
        let rec = record(Vec3::ZERO, Vec3::Y, true, &mat);
        let ray = Ray::new(Vec3::new(-1.0, 0.1, 0.0), Vec3::new(1.0, -0.1, 0.0));
        let mut rng = StdRng::seed_from_u64(1);

        let reflected = (0..1000)
            .filter(|_| {
                let result = mat.scatter(&ray, &rec, &mut rng).unwrap();
                result.scattered.direction().y > 0.0
            })
            .count();
        assert!(reflected > 0 && reflected < 1000);
    }

    #[test]
    fn test_dielectric_matched_index_refracts_straight_when_draw_exceeds_schlick() {
        let mat = Material::dielectric(1.0);
        let normal = Vec3::Y;
        // Every draw lands just below 1.0, above any reflectance here
        let mut rng = ConstRng(u32::MAX);

        for d in [
            Vec3::NEG_Y,
            Vec3::new(0.3, -1.0, 0.0),
            Vec3::new(-0.5, -1.0, 0.2),
        ] {
            for front_face in [true, false] {
                let rec = record(Vec3::ZERO, normal, front_face, &mat);
                let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), d);
                let result = mat.scatter(&ray, &rec, &mut rng).unwrap();

                assert_eq!(result.attenuation, Color::ONE);
                assert!((result.scattered.direction() - d.normalize()).length() < 1e-5);
            }
        }
    }

    #[test]
    fn test_dielectric_total_internal_reflection() {
        let mat = Material::dielectric(1.5);
        // Leaving glass at a grazing angle: 1.5 * sin(theta) > 1
        let rec = record(Vec3::ZERO, Vec3::Y, false, &mat);
        let d = Vec3::new(1.0, -0.2, 0.0).normalize();
        let ray = Ray::new(Vec3::ZERO - d, d);
        let mut rng = ConstRng(u32::MAX);

        let result = mat.scatter(&ray, &rec, &mut rng).unwrap();
        let expected = reflect(d, Vec3::Y);
        assert!((result.scattered.direction() - expected).length() < 1e-6);
    }

    #[test]
    fn test_dielectric_always_scatters() {
        let mat = Material::dielectric(1.5);
        let rec = record(Vec3::ZERO, Vec3::Y, true, &mat);
        let ray = Ray::new(Vec3::new(-1.0, 1.0, 0.0), Vec3::new(1.0, -1.0, 0.0));
        let mut rng = StdRng::seed_from_u64(5);

        for _ in 0..200 {
            let result = mat.scatter(&ray, &rec, &mut rng).unwrap();
            assert_eq!(result.attenuation, Color::ONE);
            assert!((result.scattered.direction().length() - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_from_description() {
        let desc = MaterialDesc::Dielectric {
            refractive_index: 1.33,
        };
        assert_eq!(Material::from(&desc), Material::dielectric(1.33));

        let desc = MaterialDesc::Metal {
            albedo: Color::ONE,
            fuzz: 0.25,
        };
        assert_eq!(Material::from(&desc), Material::metal(Color::ONE, 0.25));
    }
}
