use crate::error::{Error, Result};
use crate::ray::Ray;
use crate::vec3::Vec3;

/// Distance from the camera position to the film plane.
const FILM_DISTANCE: f64 = 1.0;

/// Pinhole camera looking from `position` toward the world origin, with `+z` up.
#[derive(Copy, Clone, Debug)]
pub struct Camera {
    position: Vec3<f64>,
    right: Vec3<f64>,
    /// Points toward the bottom of the image, so that row 0 is the top row.
    up: Vec3<f64>,
    film_center: Vec3<f64>,
    half_width: f64,
    half_height: f64,
    width: u32,
    height: u32,
}

impl Camera {
    /// Fails when the position is parallel to the up axis, since no basis can
    /// be derived from it.
    pub fn new(position: Vec3<f64>, width: u32, height: u32) -> Result<Self> {
        let world_up = Vec3::new(0.0, 0.0, 1.0);

        if width == 0 || height == 0 {
            return Err(Error::EmptyImage { width, height });
        }

        if position.x == 0.0 && position.y == 0.0 {
            return Err(Error::DegenerateCamera([position.x, position.y, position.z]));
        }

        // Points from the origin back to the camera.
        let forward = position.unit();
        let right = world_up.cross(&forward).unit();
        let up = right.cross(&forward).unit();

        // The longer side of the image spans a film length of one.
        let (mut film_width, mut film_height) = (1.0, 1.0);
        if width > height {
            film_height = film_width * height as f64 / width as f64;
        } else if height > width {
            film_width = film_height * width as f64 / height as f64;
        }

        Ok(Self {
            position,
            right,
            up,
            film_center: position - forward.scale(FILM_DISTANCE),
            half_width: 0.5 * film_width,
            half_height: 0.5 * film_height,
            width,
            height,
        })
    }

    #[inline]
    pub fn position(&self) -> Vec3<f64> {
        self.position
    }

    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// The primary ray through pixel `(i, j)`, `i` counting columns and `j` rows.
    pub fn ray(&self, i: u32, j: u32) -> Ray<f64> {
        let nx = -1.0 + 2.0 * i as f64 / self.width as f64;
        let ny = -1.0 + 2.0 * j as f64 / self.height as f64;

        let film = self.film_center
            + self.right.scale(nx * self.half_width)
            + self.up.scale(ny * self.half_height);

        Ray::new(self.position, film - self.position)
    }
}

#[cfg(test)]
fn close(a: Vec3<f64>, b: Vec3<f64>) -> bool {
    (a - b).len() < 1e-9
}

#[test]
fn basis_is_orthonormal() {
    let camera = Camera::new(Vec3::new(3.0, -10.0, 2.0), 1024, 768).unwrap();

    let forward = camera.position().unit();

    for v in &[forward, camera.right, camera.up] {
        assert!((v.len() - 1.0).abs() < 1e-9);
    }
    assert!(forward.dot(&camera.right).abs() < 1e-9);
    assert!(forward.dot(&camera.up).abs() < 1e-9);
    assert!(camera.right.dot(&camera.up).abs() < 1e-9);
}

#[test]
fn center_pixel_looks_at_origin() {
    let position = Vec3::new(0.0, -10.0, 1.0);
    let camera = Camera::new(position, 1024, 768).unwrap();

    let ray = camera.ray(512, 384);
    assert_eq!(position, ray.origin());
    assert!(close(position.scale(-1.0).unit(), *ray.direction()));
}

#[test]
fn top_left_pixel_looks_up_and_left() {
    let camera = Camera::new(Vec3::new(0.0, -10.0, 0.5), 800, 600).unwrap();

    let ray = camera.ray(0, 0);
    assert!(ray.direction().x < 0.0);
    assert!(ray.direction().z > 0.0);
    assert!(ray.direction().y > 0.0);
}

#[test]
fn longer_side_spans_unit_film() {
    let wide = Camera::new(Vec3::new(0.0, -10.0, 1.0), 1024, 768).unwrap();
    assert_eq!((1024, 768), wide.dimensions());
    assert_eq!(0.5, wide.half_width);
    assert_eq!(0.375, wide.half_height);

    let tall = Camera::new(Vec3::new(0.0, -10.0, 1.0), 300, 600).unwrap();
    assert_eq!(0.25, tall.half_width);
    assert_eq!(0.5, tall.half_height);
}

#[test]
fn vertical_position_is_rejected() {
    match Camera::new(Vec3::new(0.0, 0.0, 7.0), 64, 64) {
        Err(Error::DegenerateCamera(..)) => {}
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn empty_image_is_rejected() {
    match Camera::new(Vec3::new(0.0, -10.0, 1.0), 0, 768) {
        Err(Error::EmptyImage { width: 0, height: 768 }) => {}
        other => panic!("unexpected result: {:?}", other),
    }
}
