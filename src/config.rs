use std::path::PathBuf;

use crate::scene::SceneSource;
use crate::vec3::Vec3;

pub const DEFAULT_WIDTH: u32 = 1024;
pub const DEFAULT_HEIGHT: u32 = 768;
pub const DEFAULT_OUTPUT: &str = "output.png";

/// Everything a render pass needs besides the world itself.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
    /// Used unless the scene asks for its own camera.
    pub camera: Vec3<f64>,
    pub output: PathBuf,
    pub scene: SceneSource,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            camera: Vec3::new(0.0, -10.0, 1.0),
            output: PathBuf::from(DEFAULT_OUTPUT),
            scene: SceneSource::Builtin,
        }
    }
}

impl RenderConfig {
    pub fn with_scene(scene: SceneSource) -> Self {
        Self {
            scene,
            ..Self::default()
        }
    }
}

#[test]
fn default_is_1024x768_png() {
    let config = RenderConfig::with_scene(SceneSource::Mesh(PathBuf::from("bunny.obj")));

    assert_eq!((1024, 768), (config.width, config.height));
    assert_eq!(PathBuf::from("output.png"), config.output);
    assert_eq!(SceneSource::Mesh(PathBuf::from("bunny.obj")), config.scene);
}
