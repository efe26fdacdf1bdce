use crate::{geometry::Geometry, intersection::Hit, ray::Ray, vec3::Vec3};

use super::{accept, EPSILON};

/// A plane is the set of points `p` with `normal · p + offset = 0`, where the
/// normal is of unit length and the offset is the signed distance from the
/// world origin.
#[derive(Copy, Clone, Debug, Deserialize, PartialEq)]
pub struct Plane {
    pub normal: Vec3<f64>,
    pub offset: f64,
}

impl Plane {
    pub fn new(normal: Vec3<f64>, offset: f64) -> Self {
        Self { normal, offset }
    }

    /// Rescales normal and offset together so the normal has unit length.
    ///
    /// Fails for a zero or non-finite normal, or a non-finite offset.
    pub fn normalized(&self) -> Result<Plane, String> {
        let len = self.normal.len();

        if !self.normal.is_finite() || !self.offset.is_finite() {
            return Err(format!("non-finite normal {:?} or offset {}", self.normal, self.offset));
        }
        if len <= EPSILON {
            return Err(format!("normal {:?} has no direction", self.normal));
        }

        Ok(Plane::new(self.normal.scale(1.0 / len), self.offset / len))
    }
}

impl Geometry for Plane {
    fn intersection(&self, ray: &Ray<f64>, nearest: f64) -> Option<Hit> {
        let denominator = self.normal.dot(ray.direction());

        if denominator.abs() <= EPSILON {
            return None;
        }

        let t = (-self.offset - self.normal.dot(&ray.origin())) / denominator;
        accept(t, nearest)
    }
}

#[cfg(test)]
fn ground() -> Plane {
    Plane::new(Vec3::new(0.0, 0.0, 1.0), 0.0)
}

#[test]
fn hit_from_above() {
    let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));

    let hit = ground().intersection(&ray, f64::INFINITY).unwrap();
    assert!((hit.t - 5.0).abs() < 1e-12);
    assert_eq!(None, hit.barycentric);
}

#[test]
fn parallel_ray_misses() {
    let plane = ground();

    for &dz in &[0.0, 0.5 * EPSILON, -EPSILON] {
        let ray = Ray::new(Vec3::new(0.0, 0.0, -1.0), Vec3::new(1.0, 0.0, dz));
        assert_eq!(None, plane.intersection(&ray, f64::INFINITY));
    }
}

#[test]
fn behind_origin_misses() {
    let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, 1.0));

    assert_eq!(None, ground().intersection(&ray, f64::INFINITY));
}

#[test]
fn farther_than_nearest_misses() {
    let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));

    assert_eq!(None, ground().intersection(&ray, 5.0));
    assert!(ground().intersection(&ray, 5.5).is_some());
}

#[test]
fn normalized_keeps_the_same_plane() {
    // 2z - 4 = 0 is z = 2.
    let plane = Plane::new(Vec3::new(0.0, 0.0, 2.0), -4.0).normalized().unwrap();

    assert_eq!(Plane::new(Vec3::new(0.0, 0.0, 1.0), -2.0), plane);
}

#[test]
fn normalized_rejects_degenerate_normal() {
    assert!(Plane::new(Vec3::new(0.0, 0.0, 0.0), 1.0).normalized().is_err());
    assert!(Plane::new(Vec3::new(0.0, f64::NAN, 1.0), 0.0).normalized().is_err());
    assert!(Plane::new(Vec3::new(0.0, 0.0, 1.0), f64::INFINITY).normalized().is_err());
}

#[test]
fn offset_moves_plane_along_normal() {
    // z = 2 is `z - 2 = 0`.
    let plane = Plane::new(Vec3::new(0.0, 0.0, 1.0), -2.0);
    let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));

    let hit = plane.intersection(&ray, f64::INFINITY).unwrap();
    assert!((hit.t - 3.0).abs() < 1e-12);
}
