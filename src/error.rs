use std::path::PathBuf;

use thiserror::Error;

use crate::model::obj::ParseError;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to load mesh: {0}")]
    Obj(#[from] ParseError),

    #[error("invalid scene descriptor: {0}")]
    Descriptor(#[from] serde_json::Error),

    #[error("scene has no materials, the first one is the sky")]
    MissingSky,

    #[error("material index {index} is out of range, the world has {count} materials")]
    InvalidMaterial { index: usize, count: usize },

    #[error("invalid {kind}: {reason}")]
    InvalidGeometry { kind: &'static str, reason: String },

    #[error("camera position {0:?} is parallel to the up axis")]
    DegenerateCamera([f64; 3]),

    #[error("image has zero area: {width}x{height}")]
    EmptyImage { width: u32, height: u32 },

    #[error("failed to encode {path}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
