//! The container every population strategy fills and the renderer reads.

use crate::collection::Collection;
use crate::error::{Error, Result};
use crate::geometry::{Model, Plane, Shape, Sphere, Triangle};
use crate::material::Material;

/// Materials and primitives in insertion order.
///
/// `materials[0]` always exists and is the sky: the color of any ray that hits
/// nothing. Every primitive refers to a material that was added before it.
#[derive(Clone, Debug)]
pub struct World {
    materials: Collection<Material>,
    planes: Collection<Model<Plane>>,
    spheres: Collection<Model<Sphere>>,
    triangles: Collection<Model<Triangle>>,
}

impl World {
    pub fn new(sky: Material) -> Self {
        let mut materials = Collection::new();
        materials.push(sky);

        Self {
            materials,
            planes: Collection::new(),
            spheres: Collection::new(),
            triangles: Collection::new(),
        }
    }

    #[inline]
    pub fn sky(&self) -> &Material {
        &self.materials[0]
    }

    #[inline]
    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    #[inline]
    pub fn planes(&self) -> &[Model<Plane>] {
        &self.planes
    }

    #[inline]
    pub fn spheres(&self) -> &[Model<Sphere>] {
        &self.spheres
    }

    #[inline]
    pub fn triangles(&self) -> &[Model<Triangle>] {
        &self.triangles
    }

    /// Returns the index the new material is referred to by.
    pub fn add_material(&mut self, material: Material) -> usize {
        self.materials.push(material)
    }

    /// The plane is stored with its normal rescaled to unit length.
    pub fn add_plane(&mut self, plane: Plane, material: usize) -> Result<usize> {
        self.check(material)?;
        let plane = plane.normalized().map_err(|reason| invalid("plane", reason))?;
        Ok(self.planes.push(Model::new(plane, material)))
    }

    pub fn add_sphere(&mut self, sphere: Sphere, material: usize) -> Result<usize> {
        self.check(material)?;
        sphere.validate().map_err(|reason| invalid("sphere", reason))?;
        Ok(self.spheres.push(Model::new(sphere, material)))
    }

    pub fn add_triangle(&mut self, triangle: Triangle, material: usize) -> Result<usize> {
        self.check(material)?;
        triangle.validate().map_err(|reason| invalid("triangle", reason))?;
        Ok(self.triangles.push(Model::new(triangle, material)))
    }

    /// Adds a shape to the collection of its kind.
    pub fn add(&mut self, shape: Shape, material: usize) -> Result<usize> {
        match shape {
            Shape::Plane(plane) => self.add_plane(plane, material),
            Shape::Sphere(sphere) => self.add_sphere(sphere, material),
            Shape::Triangle(triangle) => self.add_triangle(triangle, material),
        }
    }

    /// Every primitive: planes, then spheres, then triangles, each group in
    /// insertion order.
    pub fn models(&self) -> impl Iterator<Item = Model<Shape>> + '_ {
        let planes = self.planes.iter().map(|m| Model::new(Shape::from(m.geometry), m.material));
        let spheres = self.spheres.iter().map(|m| Model::new(Shape::from(m.geometry), m.material));
        let triangles = self.triangles.iter().map(|m| Model::new(Shape::from(m.geometry), m.material));

        planes.chain(spheres).chain(triangles)
    }

    pub fn primitive_count(&self) -> usize {
        self.planes.len() + self.spheres.len() + self.triangles.len()
    }

    fn check(&self, material: usize) -> Result<()> {
        if material < self.materials.len() {
            Ok(())
        } else {
            Err(Error::InvalidMaterial {
                index: material,
                count: self.materials.len(),
            })
        }
    }
}

fn invalid(kind: &'static str, reason: String) -> Error {
    Error::InvalidGeometry { kind, reason }
}

#[cfg(test)]
use crate::vec3::Vec3;

#[test]
fn sky_is_first_material() {
    let sky = Material::emissive([0.3, 0.4, 0.5]);
    let mut world = World::new(sky);

    assert_eq!(1, world.add_material(Material::emissive([1.0, 0.0, 0.0])));
    assert_eq!(&sky, world.sky());
    assert_eq!(2, world.materials().len());
}

#[test]
fn dangling_material_is_rejected() {
    let mut world = World::new(Material::emissive([0.0, 0.0, 0.0]));
    let sphere = Sphere::new(Vec3::new(0.0, 0.0, 0.0), 1.0);

    match world.add_sphere(sphere, 1) {
        Err(Error::InvalidMaterial { index: 1, count: 1 }) => {}
        other => panic!("unexpected result: {:?}", other),
    }
    assert_eq!(0, world.primitive_count());

    assert_eq!(0, world.add_sphere(sphere, 0).unwrap());
    assert_eq!(1, world.spheres().len());
}

#[test]
fn models_are_grouped_by_kind() {
    let mut world = World::new(Material::emissive([0.0, 0.0, 0.0]));
    let red = world.add_material(Material::emissive([1.0, 0.0, 0.0]));
    let tri = Triangle::new(
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(1.0, 0.0, 0.0),
        Vec3::new(0.0, 1.0, 0.0),
    );

    world.add(Shape::from(tri), red).unwrap();
    world.add(Shape::from(Sphere::new(Vec3::new(0.0, 0.0, 0.0), 1.0)), 0).unwrap();
    world.add(Shape::from(Plane::new(Vec3::new(0.0, 0.0, 1.0), 0.0)), red).unwrap();

    let kinds: Vec<_> = world
        .models()
        .map(|m| match m.geometry {
            Shape::Plane(..) => ("plane", m.material),
            Shape::Sphere(..) => ("sphere", m.material),
            Shape::Triangle(..) => ("triangle", m.material),
        })
        .collect();

    assert_eq!(vec![("plane", 1), ("sphere", 0), ("triangle", 1)], kinds);
    assert_eq!(3, world.primitive_count());
}

#[test]
fn degenerate_geometry_is_rejected() {
    let mut world = World::new(Material::emissive([0.0, 0.0, 0.0]));

    for &radius in &[-1.0, 0.0] {
        match world.add_sphere(Sphere::new(Vec3::new(0.0, 0.0, 0.0), radius), 0) {
            Err(Error::InvalidGeometry { kind: "sphere", .. }) => {}
            other => panic!("unexpected result: {:?}", other),
        }
    }
    match world.add_plane(Plane::new(Vec3::new(0.0, 0.0, 0.0), 1.0), 0) {
        Err(Error::InvalidGeometry { kind: "plane", .. }) => {}
        other => panic!("unexpected result: {:?}", other),
    }
    let tri = Triangle::new(
        Vec3::new(f64::NAN, 0.0, 0.0),
        Vec3::new(1.0, 0.0, 0.0),
        Vec3::new(0.0, 1.0, 0.0),
    );
    match world.add_triangle(tri, 0) {
        Err(Error::InvalidGeometry { kind: "triangle", .. }) => {}
        other => panic!("unexpected result: {:?}", other),
    }

    assert_eq!(0, world.primitive_count());
}

#[test]
fn plane_normal_is_stored_unit_length() {
    let mut world = World::new(Material::emissive([0.0, 0.0, 0.0]));
    world.add_plane(Plane::new(Vec3::new(0.0, 3.0, 4.0), 10.0), 0).unwrap();

    let plane = world.planes()[0].geometry;
    assert!((plane.normal.len() - 1.0).abs() < 1e-12);
    assert!((plane.offset - 2.0).abs() < 1e-12);
}
