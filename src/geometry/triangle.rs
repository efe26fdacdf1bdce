//! Single-sided triangle, tested with the Möller-Trumbore algorithm.

use crate::{
    geometry::Geometry,
    intersection::{Barycentric, Hit},
    ray::Ray,
    vec3::Vec3,
};

use super::{accept, EPSILON};

/// Three world-space vertices. Only the face whose vertices appear
/// counter-clockwise from the ray origin is ever hit.
#[derive(Copy, Clone, Debug, Deserialize, PartialEq)]
pub struct Triangle {
    pub a: Vec3<f64>,
    pub b: Vec3<f64>,
    pub c: Vec3<f64>,
}

impl Triangle {
    pub fn new(a: Vec3<f64>, b: Vec3<f64>, c: Vec3<f64>) -> Self {
        Self { a, b, c }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.a.is_finite() && self.b.is_finite() && self.c.is_finite() {
            Ok(())
        } else {
            Err(format!("non-finite vertex in {:?}", self))
        }
    }
}

impl Geometry for Triangle {
    fn intersection(&self, ray: &Ray<f64>, nearest: f64) -> Option<Hit> {
        let e1 = self.b - self.a;
        let e2 = self.c - self.a;

        let pvec = ray.direction().cross(&e2);
        let det = e1.dot(&pvec);

        // Rejects back faces and near-parallel front faces alike.
        if det < EPSILON {
            return None;
        }

        let tvec = ray.origin() - self.a;
        let u = tvec.dot(&pvec);
        if u < 0.0 || u > det {
            return None;
        }

        let qvec = tvec.cross(&e1);
        let v = ray.direction().dot(&qvec);
        if v < 0.0 || u + v > det {
            return None;
        }

        let t = e2.dot(&qvec) / det;

        accept(t, nearest).map(|hit| Hit {
            barycentric: Some(Barycentric { u: u / det, v: v / det }),
            ..hit
        })
    }
}

#[cfg(test)]
fn unit() -> Triangle {
    Triangle::new(
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(1.0, 0.0, 0.0),
        Vec3::new(0.0, 1.0, 0.0),
    )
}

#[test]
fn hit_reports_barycentric() {
    let ray = Ray::new(Vec3::new(0.25, 0.25, 1.0), Vec3::new(0.0, 0.0, -1.0));

    let hit = unit().intersection(&ray, f64::INFINITY).unwrap();
    let uv = hit.barycentric.unwrap();

    assert!((hit.t - 1.0).abs() < 1e-9);
    assert!((uv.u - 0.25).abs() < 1e-9);
    assert!((uv.v - 0.25).abs() < 1e-9);
    assert!(uv.u >= 0.0 && uv.v >= 0.0 && uv.u + uv.v <= 1.0);
}

#[test]
fn back_face_is_culled() {
    let ray = Ray::new(Vec3::new(0.25, 0.25, -1.0), Vec3::new(0.0, 0.0, 1.0));

    assert_eq!(None, unit().intersection(&ray, f64::INFINITY));
}

#[test]
fn outside_edges_misses() {
    for &(x, y) in &[(0.75, 0.75), (-0.1, 0.5), (0.5, -0.1), (1.5, 0.0)] {
        let ray = Ray::new(Vec3::new(x, y, 1.0), Vec3::new(0.0, 0.0, -1.0));
        assert_eq!(None, unit().intersection(&ray, f64::INFINITY));
    }
}

#[test]
fn grazing_ray_misses() {
    let ray = Ray::new(Vec3::new(-1.0, 0.25, 0.0), Vec3::new(1.0, 0.0, 0.0));

    assert_eq!(None, unit().intersection(&ray, f64::INFINITY));
}

#[test]
fn nearest_bound_is_respected() {
    let ray = Ray::new(Vec3::new(0.25, 0.25, 1.0), Vec3::new(0.0, 0.0, -1.0));

    assert_eq!(None, unit().intersection(&ray, 0.5));
}

#[test]
fn vertices_must_be_finite() {
    assert!(unit().validate().is_ok());

    let tri = Triangle { b: Vec3::new(f64::INFINITY, 0.0, 0.0), ..unit() };
    assert!(tri.validate().is_err());
}
