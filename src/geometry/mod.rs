use crate::intersection::{Hit, Intersection};
use crate::ray::Ray;

mod plane;
mod sphere;
mod triangle;

pub use self::plane::Plane;
pub use self::sphere::Sphere;
pub use self::triangle::Triangle;

/// Tolerance shared by the parallel, tangent and determinant rejections.
pub const EPSILON: f64 = 1e-4;

pub trait Geometry {
    /// Returns a hit only when it is strictly in front of the ray origin and
    /// strictly closer than `nearest`.
    fn intersection(&self, ray: &Ray<f64>, nearest: f64) -> Option<Hit>;
}

/// The closed set of primitives a world can hold.
#[derive(Copy, Clone, Debug)]
pub enum Shape {
    Plane(Plane),
    Sphere(Sphere),
    Triangle(Triangle),
}

impl Geometry for Shape {
    #[inline]
    fn intersection(&self, ray: &Ray<f64>, nearest: f64) -> Option<Hit> {
        match self {
            Shape::Plane(plane) => plane.intersection(ray, nearest),
            Shape::Sphere(sphere) => sphere.intersection(ray, nearest),
            Shape::Triangle(triangle) => triangle.intersection(ray, nearest),
        }
    }
}

impl From<Plane> for Shape {
    fn from(plane: Plane) -> Self {
        Shape::Plane(plane)
    }
}

impl From<Sphere> for Shape {
    fn from(sphere: Sphere) -> Self {
        Shape::Sphere(sphere)
    }
}

impl From<Triangle> for Shape {
    fn from(triangle: Triangle) -> Self {
        Shape::Triangle(triangle)
    }
}

/// Geometry paired with the index of its material.
#[derive(Copy, Clone, Debug)]
pub struct Model<G> {
    pub geometry: G,
    pub material: usize,
}

impl<G> Model<G> {
    pub fn new(geometry: G, material: usize) -> Self {
        Self { geometry, material }
    }
}

impl<G: Geometry> Model<G> {
    pub fn intersection(&self, ray: &Ray<f64>, nearest: f64) -> Option<Intersection> {
        self.geometry
            .intersection(ray, nearest)
            .map(|hit| Intersection::new(hit, self.material))
    }
}

/// Accepts `t` only inside the open interval `(0, nearest)`.
#[inline]
fn accept(t: f64, nearest: f64) -> Option<Hit> {
    if t > 0.0 && t < nearest {
        Some(Hit::at(t))
    } else {
        None
    }
}
