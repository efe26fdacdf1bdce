use image::Rgb;
use serde::{Deserialize, Deserializer};

pub type Color = Rgb<f32>;

fn deserialize_rgb<'de, D>(de: D) -> Result<Color, D::Error>
where
    D: Deserializer<'de>,
{
    let (r, g, b) = Deserialize::deserialize(de)?;
    let rgb = Rgb([r, g, b]);

    Ok(rgb)
}

fn black() -> Color {
    Rgb([0.0, 0.0, 0.0])
}

#[derive(Copy, Clone, Debug, Deserialize, PartialEq)]
pub struct Material {
    /// Color returned for any ray whose nearest hit carries this material.
    #[serde(deserialize_with = "deserialize_rgb")]
    pub emit: Color,

    /// Carried along with the scene but never consulted by shading.
    #[serde(deserialize_with = "deserialize_rgb", default = "black")]
    pub reflect: Color,
}

impl Material {
    pub fn new(emit: [f32; 3], reflect: [f32; 3]) -> Self {
        Self {
            emit: Rgb(emit),
            reflect: Rgb(reflect),
        }
    }

    pub fn emissive(emit: [f32; 3]) -> Self {
        Self::new(emit, [0.0, 0.0, 0.0])
    }
}

#[test]
fn deserialize_without_reflect() {
    let material: Material = serde_json::from_str(r#"{ "emit": [0.5, 0.25, 1.0] }"#).unwrap();

    assert_eq!(Material::emissive([0.5, 0.25, 1.0]), material);
}
