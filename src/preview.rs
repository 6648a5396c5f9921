//! Image previews of a built mesh, for inspecting terrain without a renderer.
//!
//! One pixel per grid vertex, row 0 at the top.

use std::path::Path;

use image::{GrayImage, Luma, Rgb, RgbImage};

use crate::error::Result;
use crate::terrain::Mesh;

/// Normals coloured as `0.5 * n + 0.5`
pub fn normal_map(mesh: &Mesh) -> RgbImage {
    let width = mesh.width();
    RgbImage::from_fn(mesh.width() as u32, mesh.height() as u32, |x, y| {
        let n = mesh.vertices()[x as usize + width * y as usize].normal();
        let c = (n * 0.5 + 0.5) * 255.0;
        Rgb([to_byte(c.x), to_byte(c.y), to_byte(c.z)])
    })
}

/// Heights normalised to the mesh's own range; a flat mesh is mid gray
pub fn height_map(mesh: &Mesh) -> GrayImage {
    let width = mesh.width();
    let (lo, hi) = mesh.height_range();
    let span = hi - lo;
    GrayImage::from_fn(mesh.width() as u32, mesh.height() as u32, |x, y| {
        let h = mesh.vertices()[x as usize + width * y as usize].position[1];
        let level = if span > 0.0 && span.is_finite() {
            (h - lo) / span * 255.0
        } else {
            128.0
        };
        Luma([to_byte(level)])
    })
}

pub fn save_normal_map(mesh: &Mesh, path: impl AsRef<Path>) -> Result<()> {
    normal_map(mesh).save(path)?;
    Ok(())
}

pub fn save_height_map(mesh: &Mesh, path: impl AsRef<Path>) -> Result<()> {
    height_map(mesh).save(path)?;
    Ok(())
}

fn to_byte(v: f32) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}
