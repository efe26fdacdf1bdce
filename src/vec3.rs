use std::ops::{Add, Mul, Sub};

#[derive(Copy, Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(from = "[T; 3]")]
#[serde(bound(deserialize = "T: Copy + serde::Deserialize<'de>"))]
pub struct Vec3<T> {
    pub x: T,
    pub y: T,
    pub z: T,
}

impl<T> Vec3<T> {
    #[inline]
    pub fn new(x: T, y: T, z: T) -> Self {
        Self { x, y, z }
    }
}

impl<T: Copy> From<[T; 3]> for Vec3<T> {
    #[inline]
    fn from(v: [T; 3]) -> Self {
        Vec3::new(v[0], v[1], v[2])
    }
}

impl<T: Copy + Mul<Output = T>> Vec3<T> {
    #[inline]
    pub fn scale(&self, factor: T) -> Vec3<T> {
        Vec3 {
            x: self.x * factor,
            y: self.y * factor,
            z: self.z * factor,
        }
    }
}

impl<T: Copy + Add<Output = T> + Mul<Output = T>> Vec3<T> {
    #[inline]
    pub fn dot(&self, other: &Vec3<T>) -> T {
        self.x * other.x + self.y * other.y + self.z * other.z
    }
}

impl<T: Copy + Sub<Output = T> + Mul<Output = T>> Vec3<T> {
    #[inline]
    pub fn cross(&self, other: &Vec3<T>) -> Vec3<T> {
        Vec3 {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }
}

impl Vec3<f64> {
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    #[inline]
    pub fn len(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Returns the normalized vector.
    ///
    /// The caller guarantees a nonzero length, otherwise every component ends up NaN.
    #[inline]
    pub fn unit(&self) -> Vec3<f64> {
        let len = self.len();

        Vec3 {
            x: self.x / len,
            y: self.y / len,
            z: self.z / len,
        }
    }
}

impl<T: Add<Output = T>> Add for Vec3<T> {
    type Output = Vec3<T>;

    #[inline]
    fn add(self, other: Vec3<T>) -> Self::Output {
        Vec3 {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl<T: Sub<Output = T>> Sub for Vec3<T> {
    type Output = Vec3<T>;

    #[inline]
    fn sub(self, other: Vec3<T>) -> Self::Output {
        Vec3 {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

#[test]
fn cross_of_axes() {
    let x = Vec3::new(1.0, 0.0, 0.0);
    let y = Vec3::new(0.0, 1.0, 0.0);

    assert_eq!(Vec3::new(0.0, 0.0, 1.0), x.cross(&y));
    assert_eq!(Vec3::new(0.0, 0.0, -1.0), y.cross(&x));
}

#[test]
fn unit_has_length_one() {
    let v = Vec3::new(3.0, 4.0, 12.0).unit();

    assert!((v.len() - 1.0).abs() < 1e-12);
    assert!((v.x - 3.0 / 13.0).abs() < 1e-12);
}

#[test]
fn arithmetic() {
    let a = Vec3::new(1, 2, 3);
    let b = Vec3::new(4, 5, 6);

    assert_eq!(Vec3::new(5, 7, 9), a + b);
    assert_eq!(Vec3::new(3, 3, 3), b - a);
    assert_eq!(Vec3::new(2, 4, 6), a.scale(2));
    assert_eq!(32, a.dot(&b));
}

#[test]
fn deserialize_from_array() {
    let v: Vec3<f64> = serde_json::from_str("[1.0, -2.5, 3]").unwrap();

    assert_eq!(Vec3::new(1.0, -2.5, 3.0), v);
}
