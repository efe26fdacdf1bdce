//! Single-bounce, emissive-only shading.
//!
//! Each pixel gets one primary ray. The color is the emissive color of the
//! nearest primitive it hits, or the sky color if it hits nothing. No shadow,
//! reflection or secondary rays are ever traced.

use std::f64;

use image::{ImageBuffer, Rgb};
use rayon::prelude::*;

use crate::camera::Camera;
use crate::intersection::Intersection;
use crate::material::Color;
use crate::ray::Ray;
use crate::world::World;

/// Float RGB image, one entry per pixel.
pub type Framebuffer = ImageBuffer<Rgb<f32>, Vec<f32>>;

/// The nearest hit with a strictly positive `t`. Among equal `t` the first
/// tested primitive wins.
pub fn closest_intersection(world: &World, ray: &Ray<f64>) -> Option<Intersection> {
    let mut t = f64::INFINITY;
    let mut closest = None;

    for model in world.models() {
        if let Some(intersection) = model.intersection(ray, t) {
            t = intersection.t;
            closest = Some(intersection);
        }
    }

    closest
}

pub fn trace(world: &World, ray: &Ray<f64>) -> Color {
    closest_intersection(world, ray)
        .map(|i| world.materials()[i.material].emit)
        .unwrap_or(world.sky().emit)
}

/// Renders every pixel of the camera's image in parallel.
pub fn render(world: &World, camera: &Camera) -> Framebuffer {
    let (width, height) = camera.dimensions();
    let mut framebuffer = Framebuffer::new(width, height);

    framebuffer.par_chunks_mut(3).enumerate().for_each(|(n, c)| {
        let i = (n % width as usize) as u32;
        let j = (n / width as usize) as u32;

        let color = trace(world, &camera.ray(i, j));

        c.copy_from_slice(&color.0);
    });

    framebuffer
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Plane, Sphere, Triangle};
    use crate::material::Material;
    use crate::vec3::Vec3;

    const SKY: [f32; 3] = [0.3, 0.4, 0.5];
    const GROUND: [f32; 3] = [0.5, 0.5, 0.5];
    const BALL: [f32; 3] = [0.7, 0.5, 0.3];

    fn world() -> World {
        let mut world = World::new(Material::emissive(SKY));
        let ground = world.add_material(Material::emissive(GROUND));
        let ball = world.add_material(Material::new(BALL, [0.9, 0.9, 0.9]));

        world.add_plane(Plane::new(Vec3::new(0.0, 0.0, 1.0), 0.0), ground).unwrap();
        world.add_sphere(Sphere::new(Vec3::new(0.0, 0.0, 0.0), 1.0), ball).unwrap();
        world
    }

    fn down(x: f64) -> Ray<f64> {
        Ray::new(Vec3::new(x, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0))
    }

    #[test]
    fn sphere_in_front_of_plane() {
        let world = world();

        let hit = closest_intersection(&world, &down(0.0)).unwrap();
        assert!((hit.t - 4.0).abs() < 1e-12);
        assert_eq!(Vec3::new(0.0, 0.0, 1.0), down(0.0).offset(hit.t));
        assert_eq!(Rgb(BALL), trace(&world, &down(0.0)));
    }

    #[test]
    fn plane_beside_sphere() {
        assert_eq!(Rgb(GROUND), trace(&world(), &down(3.0)));
    }

    #[test]
    fn miss_is_sky() {
        let up = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.3, 0.0, 1.0));

        assert!(closest_intersection(&world(), &up).is_none());
        assert_eq!(Rgb(SKY), trace(&world(), &up));
        assert_eq!(Rgb(SKY), trace(&World::new(Material::emissive(SKY)), &down(0.0)));
    }

    #[test]
    fn triangle_closer_than_sphere() {
        let mut world = world();
        let red = world.add_material(Material::emissive([1.0, 0.0, 0.0]));
        world
            .add_triangle(
                Triangle::new(
                    Vec3::new(-1.0, -1.0, 2.0),
                    Vec3::new(1.0, -1.0, 2.0),
                    Vec3::new(0.0, 1.0, 2.0),
                ),
                red,
            )
            .unwrap();

        let hit = closest_intersection(&world, &down(0.0)).unwrap();
        assert!((hit.t - 3.0).abs() < 1e-12);
        assert!(hit.barycentric.is_some());
        assert_eq!(Rgb([1.0, 0.0, 0.0]), trace(&world, &down(0.0)));
    }

    #[test]
    fn first_tested_wins_on_tie() {
        let mut world = World::new(Material::emissive(SKY));
        let a = world.add_material(Material::emissive([1.0, 0.0, 0.0]));
        let b = world.add_material(Material::emissive([0.0, 1.0, 0.0]));
        world.add_plane(Plane::new(Vec3::new(0.0, 0.0, 1.0), 0.0), a).unwrap();
        world.add_plane(Plane::new(Vec3::new(0.0, 0.0, 1.0), 0.0), b).unwrap();

        assert_eq!(Rgb([1.0, 0.0, 0.0]), trace(&world, &down(0.0)));
    }

    #[test]
    fn framebuffer_matches_camera() {
        let world = world();
        let camera = Camera::new(Vec3::new(0.0, -10.0, 1.0), 32, 24).unwrap();

        let framebuffer = render(&world, &camera);
        assert_eq!((32, 24), framebuffer.dimensions());

        // The top row looks over the horizon, the bottom row at the ground.
        assert_eq!(&Rgb(SKY), framebuffer.get_pixel(0, 0));
        assert_eq!(&Rgb(GROUND), framebuffer.get_pixel(0, 23));
        assert_eq!(&Rgb(BALL), framebuffer.get_pixel(16, 12));

        for (i, j, pixel) in framebuffer.enumerate_pixels() {
            assert_eq!(trace(&world, &camera.ray(i, j)), *pixel);
        }
    }
}
