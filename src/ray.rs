use crate::vec3::Vec3;

#[derive(Copy, Clone, Debug)]
pub struct Ray<T> {
    origin: Vec3<T>,
    direction: Vec3<T>,
}

impl Ray<f64> {
    /// The direction is normalized, so it must not be the zero vector.
    pub fn new(origin: Vec3<f64>, direction: Vec3<f64>) -> Self {
        Self {
            origin,
            direction: direction.unit(),
        }
    }

    #[inline]
    pub fn origin(&self) -> Vec3<f64> {
        self.origin
    }

    #[inline]
    pub fn direction(&self) -> &Vec3<f64> {
        &self.direction
    }

    #[inline]
    pub fn offset(&self, t: f64) -> Vec3<f64> {
        self.origin + self.direction.scale(t)
    }
}

#[test]
fn direction_is_normalized() {
    let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -10.0));

    assert_eq!(Vec3::new(0.0, 0.0, -1.0), *ray.direction());
    assert_eq!(Vec3::new(0.0, 0.0, 1.0), ray.offset(4.0));
}
