use crate::{geometry::Geometry, intersection::Hit, ray::Ray, vec3::Vec3};

use super::{accept, EPSILON};

#[derive(Copy, Clone, Debug, Deserialize, PartialEq)]
pub struct Sphere {
    pub center: Vec3<f64>,
    pub radius: f64,
}

impl Sphere {
    pub fn new(center: Vec3<f64>, radius: f64) -> Self {
        Self { center, radius }
    }

    /// Fails unless the center is finite and the radius finite and positive.
    pub fn validate(&self) -> Result<(), String> {
        if !self.center.is_finite() {
            return Err(format!("non-finite center {:?}", self.center));
        }
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(format!("radius {} is not positive", self.radius));
        }
        Ok(())
    }
}

impl Geometry for Sphere {
    fn intersection(&self, ray: &Ray<f64>, nearest: f64) -> Option<Hit> {
        let oc = ray.origin() - self.center;

        let a = ray.direction().dot(ray.direction());
        let b = 2.0 * oc.dot(ray.direction());
        let c = oc.dot(&oc) - self.radius.powi(2);

        // Tangent rays count as misses.
        let discriminant = b * b - 4.0 * a * c;
        if discriminant <= EPSILON {
            return None;
        }

        let sqrt = discriminant.sqrt();
        let denominator = 2.0 * a;

        let tp = (-b + sqrt) / denominator;
        let tn = (-b - sqrt) / denominator;

        let t = if tn > 0.0 && tn < tp { tn } else { tp };

        accept(t, nearest)
    }
}

#[cfg(test)]
fn unit() -> Sphere {
    Sphere::new(Vec3::new(0.0, 0.0, 0.0), 1.0)
}

#[test]
fn hit_from_outside_takes_entry_root() {
    let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -5.0));

    let hit = unit().intersection(&ray, f64::INFINITY).unwrap();
    assert!((hit.t - 4.0).abs() < 1e-12);
}

#[test]
fn hit_from_inside_takes_exit_root() {
    let ray = Ray::new(Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0));

    let hit = unit().intersection(&ray, f64::INFINITY).unwrap();
    assert!((hit.t - 1.0).abs() < 1e-12);
}

#[test]
fn radius_must_be_positive() {
    assert!(unit().validate().is_ok());
    for &radius in &[0.0, -1.0, f64::NAN, f64::INFINITY] {
        assert!(Sphere::new(Vec3::new(0.0, 0.0, 0.0), radius).validate().is_err());
    }
    assert!(Sphere::new(Vec3::new(f64::NAN, 0.0, 0.0), 1.0).validate().is_err());
}

#[test]
fn behind_origin_misses() {
    let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, 1.0));

    assert_eq!(None, unit().intersection(&ray, f64::INFINITY));
}

#[test]
fn tangent_misses() {
    let ray = Ray::new(Vec3::new(1.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));

    assert_eq!(None, unit().intersection(&ray, f64::INFINITY));
}

#[test]
fn closer_hit_already_known() {
    let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));

    assert_eq!(None, unit().intersection(&ray, 4.0));
    assert_eq!(None, unit().intersection(&ray, 3.5));
}
