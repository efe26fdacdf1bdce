//! Ways of populating a [`World`].
//!
//! A world is either hand-authored, derived from an OBJ mesh, or described by
//! a JSON file. All three fill the same container.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::error::{Error, Result};
use crate::geometry::{Plane, Shape, Sphere, Triangle};
use crate::material::Material;
use crate::model::obj;
use crate::vec3::Vec3;
use crate::world::World;

/// Sky color shared by the built-in and mesh-derived worlds.
const SKY: [f32; 3] = [0.3, 0.4, 0.5];

/// Index of the material every mesh-derived triangle carries.
pub const MESH_MATERIAL: usize = 1;

#[derive(Clone, Debug, PartialEq)]
pub enum SceneSource {
    Builtin,
    Mesh(PathBuf),
    Descriptor(PathBuf),
}

impl Default for SceneSource {
    fn default() -> Self {
        SceneSource::Builtin
    }
}

impl From<Option<PathBuf>> for SceneSource {
    /// `*.json` files are scene descriptors, anything else is read as OBJ.
    fn from(path: Option<PathBuf>) -> Self {
        match path {
            None => SceneSource::Builtin,
            Some(path) => match path.extension().and_then(|e| e.to_str()) {
                Some(ext) if ext.eq_ignore_ascii_case("json") => SceneSource::Descriptor(path),
                _ => SceneSource::Mesh(path),
            },
        }
    }
}

/// A populated world, plus the camera position it asks for, if any.
#[derive(Debug)]
pub struct Scene {
    pub world: World,
    pub camera: Option<Vec3<f64>>,
}

impl SceneSource {
    pub fn populate(&self) -> Result<Scene> {
        let scene = match self {
            SceneSource::Builtin => {
                info!("generating built-in scene");
                Scene { world: generate()?, camera: None }
            }
            SceneSource::Mesh(path) => {
                info!("loading mesh from {}", path.display());
                Scene { world: from_mesh(path)?, camera: None }
            }
            SceneSource::Descriptor(path) => {
                info!("loading scene descriptor from {}", path.display());
                load(path)?
            }
        };

        let world = &scene.world;
        info!(
            "world: {} materials, {} primitives ({} planes, {} spheres, {} triangles)",
            world.materials().len(),
            world.primitive_count(),
            world.planes().len(),
            world.spheres().len(),
            world.triangles().len(),
        );

        Ok(scene)
    }
}

/// The hand-authored scene: a ground plane with a few spheres resting on it.
pub fn generate() -> Result<World> {
    let mut world = World::new(Material::emissive(SKY));

    let ground = world.add_material(Material::new([0.5, 0.5, 0.5], [0.0, 0.0, 0.0]));
    let clay = world.add_material(Material::new([0.7, 0.5, 0.3], [0.5, 0.5, 0.5]));
    let grass = world.add_material(Material::new([0.2, 0.8, 0.2], [0.0, 0.0, 0.0]));
    let glass = world.add_material(Material::new([0.4, 0.8, 0.9], [0.95, 0.95, 0.95]));

    world.add_plane(Plane::new(Vec3::new(0.0, 0.0, 1.0), 0.0), ground)?;
    world.add_sphere(Sphere::new(Vec3::new(0.0, 0.0, 0.0), 1.0), clay)?;
    world.add_sphere(Sphere::new(Vec3::new(3.0, -2.0, 0.0), 1.0), grass)?;
    world.add_sphere(Sphere::new(Vec3::new(-2.0, 2.0, 1.0), 1.0), glass)?;

    Ok(world)
}

/// A world holding only the triangles of an OBJ mesh.
pub fn from_mesh<P: AsRef<Path>>(path: P) -> Result<World> {
    let mut world = World::new(Material::emissive(SKY));
    let material = world.add_material(Material::emissive([0.8, 0.8, 0.8]));
    debug_assert_eq!(MESH_MATERIAL, material);

    for triangle in obj::load(path)? {
        world.add_triangle(triangle, material)?;
    }

    Ok(world)
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum GeometryDescriptor {
    Plane(Plane),
    Sphere(Sphere),
    Triangle(Triangle),
    Mesh { path: PathBuf },
}

#[derive(Debug, Deserialize)]
struct ModelDescriptor {
    geometry: GeometryDescriptor,
    material: usize,
}

/// JSON scene description. The first material is the sky.
#[derive(Debug, Deserialize)]
struct Descriptor {
    #[serde(default)]
    camera: Option<Vec3<f64>>,
    materials: Vec<Material>,
    #[serde(default)]
    models: Vec<ModelDescriptor>,
}

/// Loads a JSON scene descriptor. Mesh paths are relative to the descriptor.
pub fn load<P: AsRef<Path>>(path: P) -> Result<Scene> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let descriptor: Descriptor = serde_json::from_reader(BufReader::new(file))?;

    build(descriptor, path.parent().unwrap_or_else(|| Path::new("")))
}

fn build(descriptor: Descriptor, base: &Path) -> Result<Scene> {
    let mut materials = descriptor.materials.into_iter();
    let mut world = World::new(materials.next().ok_or(Error::MissingSky)?);
    for material in materials {
        world.add_material(material);
    }

    for model in descriptor.models {
        let shape = match model.geometry {
            GeometryDescriptor::Plane(plane) => Shape::from(plane),
            GeometryDescriptor::Sphere(sphere) => Shape::from(sphere),
            GeometryDescriptor::Triangle(triangle) => Shape::from(triangle),
            GeometryDescriptor::Mesh { path } => {
                let path = base.join(path);
                let triangles = obj::load(&path)?;
                debug!("{} triangles from {}", triangles.len(), path.display());

                for triangle in triangles {
                    world.add_triangle(triangle, model.material)?;
                }
                continue;
            }
        };

        world.add(shape, model.material)?;
    }

    Ok(Scene {
        world,
        camera: descriptor.camera,
    })
}

#[cfg(test)]
fn parse(json: &str) -> Result<Scene> {
    build(serde_json::from_str(json)?, Path::new(""))
}

#[test]
fn source_from_path() {
    assert_eq!(SceneSource::Builtin, SceneSource::from(None));
    assert_eq!(
        SceneSource::Descriptor(PathBuf::from("scene.JSON")),
        SceneSource::from(Some(PathBuf::from("scene.JSON")))
    );
    assert_eq!(
        SceneSource::Mesh(PathBuf::from("teapot.obj")),
        SceneSource::from(Some(PathBuf::from("teapot.obj")))
    );
}

#[test]
fn generated_world_is_valid() {
    let world = generate().unwrap();

    assert_eq!(&Material::emissive(SKY), world.sky());
    assert_eq!(1, world.planes().len());
    assert_eq!(3, world.spheres().len());
    assert!(world.triangles().is_empty());
    for model in world.models() {
        assert!(model.material < world.materials().len());
    }
}

#[test]
fn descriptor_with_all_primitives() {
    let scene = parse(
        r#"{
            "camera": [1, -8, 2],
            "materials": [
                { "emit": [0.3, 0.4, 0.5] },
                { "emit": [1, 0, 0], "reflect": [0.5, 0.5, 0.5] }
            ],
            "models": [
                { "geometry": { "type": "sphere", "center": [0, 0, 0], "radius": 1 }, "material": 1 },
                { "geometry": { "type": "plane", "normal": [0, 0, 1], "offset": 0 }, "material": 0 },
                { "geometry": { "type": "triangle", "a": [0, 0, 0], "b": [1, 0, 0], "c": [0, 1, 0] }, "material": 1 }
            ]
        }"#,
    )
    .unwrap();

    assert_eq!(Some(Vec3::new(1.0, -8.0, 2.0)), scene.camera);
    assert_eq!(2, scene.world.materials().len());
    assert_eq!(Material::new([1.0, 0.0, 0.0], [0.5, 0.5, 0.5]), scene.world.materials()[1]);
    assert_eq!(Plane::new(Vec3::new(0.0, 0.0, 1.0), 0.0), scene.world.planes()[0].geometry);
    assert_eq!(1.0, scene.world.spheres()[0].geometry.radius);
    assert_eq!(1, scene.world.triangles()[0].material);
}

#[test]
fn descriptor_rejects_dangling_material() {
    let result = parse(
        r#"{
            "materials": [{ "emit": [0, 0, 0] }],
            "models": [{ "geometry": { "type": "sphere", "center": [0, 0, 0], "radius": 1 }, "material": 3 }]
        }"#,
    );

    match result {
        Err(Error::InvalidMaterial { index: 3, count: 1 }) => {}
        other => panic!("unexpected result: {:?}", other.map(|s| s.camera)),
    }
}

#[test]
fn descriptor_requires_sky() {
    match parse(r#"{ "materials": [] }"#) {
        Err(Error::MissingSky) => {}
        other => panic!("unexpected result: {:?}", other.map(|s| s.camera)),
    }
}

#[test]
fn descriptor_rejects_unknown_geometry() {
    let result = parse(
        r#"{
            "materials": [{ "emit": [0, 0, 0] }],
            "models": [{ "geometry": { "type": "torus" }, "material": 0 }]
        }"#,
    );

    match result {
        Err(Error::Descriptor(..)) => {}
        other => panic!("unexpected result: {:?}", other.map(|s| s.camera)),
    }
}

#[test]
fn mesh_world_uses_default_material() {
    let dir = std::env::temp_dir().join(format!("bray-scene-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(
        dir.join("tri.obj"),
        "v 0 0 0\nv 1 0 0\nv 0 1 0\nvt 0 0\nvn 0 0 1\nf 1/1/1 2/1/1 3/1/1\n",
    )
    .unwrap();
    std::fs::write(
        dir.join("scene.json"),
        r#"{
            "materials": [{ "emit": [0, 0, 0] }, { "emit": [1, 1, 1] }],
            "models": [{ "geometry": { "type": "mesh", "path": "tri.obj" }, "material": 1 }]
        }"#,
    )
    .unwrap();

    let world = from_mesh(dir.join("tri.obj")).unwrap();
    let described = SceneSource::Descriptor(dir.join("scene.json")).populate().unwrap();
    std::fs::remove_dir_all(&dir).unwrap();

    assert_eq!(2, world.materials().len());
    assert_eq!(1, world.triangles().len());
    assert_eq!(MESH_MATERIAL, world.triangles()[0].material);
    assert_eq!(0, world.planes().len() + world.spheres().len());

    assert_eq!(1, described.world.triangles().len());
    assert_eq!(None, described.camera);
}

#[test]
fn mesh_errors_are_propagated() {
    match from_mesh("/nonexistent/bray/model.obj") {
        Err(Error::Obj(obj::ParseError::Io(..))) => {}
        other => panic!("unexpected result: {:?}", other.map(|w| w.primitive_count())),
    }
}

#[test]
fn descriptor_rejects_degenerate_geometry() {
    let cases = [
        r#"{ "type": "sphere", "center": [0, 0, 0], "radius": -1 }"#,
        r#"{ "type": "sphere", "center": [0, 0, 0], "radius": 0 }"#,
        r#"{ "type": "plane", "normal": [0, 0, 0], "offset": 1 }"#,
    ];

    for geometry in &cases {
        let json = format!(
            r#"{{ "materials": [{{ "emit": [0, 0, 0] }}], "models": [{{ "geometry": {}, "material": 0 }}] }}"#,
            geometry
        );
        match parse(&json) {
            Err(Error::InvalidGeometry { .. }) => {}
            other => panic!("{} was accepted: {:?}", geometry, other.map(|s| s.camera)),
        }
    }
}

#[test]
fn descriptor_plane_normal_is_normalized() {
    let scene = parse(
        r#"{
            "materials": [{ "emit": [0, 0, 0] }],
            "models": [{ "geometry": { "type": "plane", "normal": [0, 0, 2], "offset": -4 }, "material": 0 }]
        }"#,
    )
    .unwrap();

    assert_eq!(Plane::new(Vec3::new(0.0, 0.0, 1.0), -2.0), scene.world.planes()[0].geometry);
}
