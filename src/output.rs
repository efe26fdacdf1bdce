use std::path::Path;

use image::ColorType;
use log::info;

use crate::error::{Error, Result};
use crate::render::Framebuffer;

/// Converts a color channel to 8 bits as `floor(c * 255)`.
///
/// Values are not clamped: anything at or above `256 / 255` wraps around
/// modulo 256, negative values end up as 0.
#[inline]
pub fn to_byte(c: f32) -> u8 {
    (c * 255.0).floor() as u32 as u8
}

/// Packs the framebuffer into interleaved 8-bit RGB.
pub fn pack(framebuffer: &Framebuffer) -> Vec<u8> {
    framebuffer.as_raw().iter().map(|&c| to_byte(c)).collect()
}

/// Encodes the framebuffer as a PNG file.
pub fn save<P: AsRef<Path>>(framebuffer: &Framebuffer, path: P) -> Result<()> {
    let path = path.as_ref();
    let (width, height) = framebuffer.dimensions();
    let pixels = pack(framebuffer);

    image::save_buffer(path, &pixels, width, height, ColorType::Rgb8).map_err(|source| Error::Encode {
        path: path.to_path_buf(),
        source,
    })?;

    info!("written {}x{} image to {}", width, height, path.display());
    Ok(())
}

#[test]
fn byte_conversion_floors() {
    assert_eq!(0, to_byte(0.0));
    assert_eq!(255, to_byte(1.0));
    assert_eq!(127, to_byte(0.5));
    assert_eq!(76, to_byte(0.3));
}

#[test]
fn byte_conversion_is_unclamped() {
    assert_eq!(24, to_byte(1.1));
    assert_eq!(254, to_byte(2.0));
    assert_eq!(0, to_byte(-0.5));
}

#[test]
fn pack_is_row_major_rgb() {
    let mut framebuffer = Framebuffer::new(2, 1);
    framebuffer.put_pixel(1, 0, image::Rgb([1.0, 0.5, 0.0]));

    assert_eq!(vec![0, 0, 0, 255, 127, 0], pack(&framebuffer));
}

#[test]
fn save_to_missing_directory_fails() {
    let framebuffer = Framebuffer::new(4, 4);

    match save(&framebuffer, "/nonexistent/bray/output.png") {
        Err(Error::Encode { .. }) => {}
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn save_roundtrip() {
    let path = std::env::temp_dir().join(format!("bray-{}.png", std::process::id()));
    let mut framebuffer = Framebuffer::new(3, 2);
    framebuffer.put_pixel(2, 1, image::Rgb([0.3, 0.4, 0.5]));

    save(&framebuffer, &path).unwrap();
    let written = std::fs::read(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(&[0x89, b'P', b'N', b'G'], &written[..4]);
}
