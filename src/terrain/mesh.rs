//! Heightfield grid mesh with analytic normals.

use std::time::Instant;

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use rayon::prelude::*;

use super::{surface_normal, TerrainSampler};
use crate::error::{Result, TerrainError};
use crate::params::TerrainConfig;

/// Vertex data for the terrain mesh (position + normal)
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl Vertex {
    pub fn position(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }

    pub fn normal(&self) -> Vec3 {
        Vec3::from_array(self.normal)
    }
}

/// Triangulated heightfield.
///
/// Vertices are stored row-major (row = z, column = x); indices hold two
/// triangles per grid cell in the order the cells are visited. The mesh is
/// read-only once built; a new resolution means a new mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    width: usize,
    height: usize,
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
}

impl Mesh {
    /// Grid points per row
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid rows
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Vertex at grid column `col`, row `row`
    pub fn vertex(&self, col: usize, row: usize) -> Option<&Vertex> {
        if col >= self.width || row >= self.height {
            return None;
        }
        self.vertices.get(col + self.width * row)
    }

    /// Triangles as index triples
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices
            .chunks_exact(3)
            .map(|tri| [tri[0], tri[1], tri[2]])
    }

    /// Vertex buffer contents, ready for upload
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Index buffer contents (u32), ready for upload
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    /// Lowest and highest vertex height
    pub fn height_range(&self) -> (f32, f32) {
        self.vertices
            .iter()
            .map(|v| v.position[1])
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), y| {
                (lo.min(y), hi.max(y))
            })
    }
}

/// Builds heightfield meshes from a terrain configuration
pub struct HeightmapMesh;

impl HeightmapMesh {
    /// Sample the terrain on a `width` x `height` grid spanning `[-1, 1]²`.
    ///
    /// Each vertex is evaluated independently on the rayon pool; the index
    /// buffer depends only on the grid dimensions.
    ///
    /// # Errors
    /// * `InvalidGridSize` if either axis has fewer than 2 points
    /// * `GridTooLarge` if the vertex count does not fit a u32 index buffer
    pub fn build(width: usize, height: usize, config: &TerrainConfig) -> Result<Mesh> {
        if width < 2 || height < 2 {
            return Err(TerrainError::InvalidGridSize { width, height });
        }
        let vertex_count = width
            .checked_mul(height)
            .filter(|&n| u32::try_from(n - 1).is_ok())
            .ok_or(TerrainError::GridTooLarge { width, height })?;

        let start = Instant::now();
        let sampler = TerrainSampler::new(config);
        let x_step = 2.0 / (width - 1) as f32;
        let z_step = 2.0 / (height - 1) as f32;

        let mut vertices = vec![Vertex::zeroed(); vertex_count];
        vertices
            .par_iter_mut()
            .enumerate()
            .for_each(|(index, vertex)| {
                let col = index % width;
                let row = index / width;

                // Map to [-1, 1]
                let x = grid_coordinate(col, width, x_step);
                let z = grid_coordinate(row, height, z_step);

                let field = sampler.sample(x, z);
                *vertex = Vertex {
                    position: [x, field.height, z],
                    normal: surface_normal(field.gradient).to_array(),
                };
            });

        // Both dimensions fit in u32 since their product does
        let indices = grid_indices(width as u32, height as u32);

        log::debug!(
            "Built {}x{} heightfield: {} vertices, {} triangles in {:.2}ms",
            width,
            height,
            vertices.len(),
            indices.len() / 3,
            start.elapsed().as_secs_f64() * 1000.0
        );

        Ok(Mesh {
            width,
            height,
            vertices,
            indices,
        })
    }
}

/// Build a mesh of the default terrain
pub fn build_heightfield_mesh(width: usize, height: usize) -> Result<Mesh> {
    HeightmapMesh::build(width, height, &TerrainConfig::default())
}

/// Position of grid line `i` of `count` in `[-1, 1]`, with both ends exact
fn grid_coordinate(i: usize, count: usize, step: f32) -> f32 {
    if i + 1 == count {
        1.0
    } else {
        i as f32 * step - 1.0
    }
}

/// Two triangles per cell, cells visited row by row.
///
/// Cell corners are `(c, r)`, `(c+1, r)`, `(c, r+1)`, `(c+1, r+1)` with
/// linear index `c + width * r`; triangles are
/// `{(c,r), (c+1,r), (c,r+1)}` and `{(c+1,r), (c+1,r+1), (c,r+1)}`.
fn grid_indices(width: u32, height: u32) -> Vec<u32> {
    let cells = (width as usize - 1) * (height as usize - 1);
    let mut indices = Vec::with_capacity(cells * 6);

    for row in 0..height - 1 {
        for col in 0..width - 1 {
            let top_left = col + width * row;
            let top_right = top_left + 1;
            let bottom_left = top_left + width;
            let bottom_right = bottom_left + 1;

            indices.extend_from_slice(&[
                top_left,
                top_right,
                bottom_left,
                top_right,
                bottom_right,
                bottom_left,
            ]);
        }
    }

    indices
}
