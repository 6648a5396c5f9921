//! Terrain heightfield: sampling the shaped fractal field and meshing it.

mod mesh;
mod system;

use glam::{Vec2, Vec3};

use crate::params::{SamplingMode, TerrainConfig};
use crate::profile::ShapedField;

// Re-export public types
pub use mesh::{build_heightfield_mesh, HeightmapMesh, Mesh, Vertex};
pub use system::TerrainSystem;

/// Evaluates terrain height and slope at grid-domain positions
#[derive(Debug, Clone, Copy)]
pub struct TerrainSampler<'a> {
    config: &'a TerrainConfig,
}

impl<'a> TerrainSampler<'a> {
    pub fn new(config: &'a TerrainConfig) -> Self {
        Self { config }
    }

    /// Height and `(d/dx, d/dz)` slope at grid position `(x, z)`
    pub fn sample(&self, x: f32, z: f32) -> ShapedField {
        let config = self.config;
        let p = Vec2::new(x, z) * config.domain_scale + config.domain_offset;

        let (value, gradient) = match config.sampling {
            SamplingMode::Planar => {
                let field = config.fractal.accumulate(p);
                (field.value, field.gradient)
            }
            SamplingMode::Slice { slice_y } => {
                let field = config.fractal.accumulate(Vec3::new(p.x, slice_y, p.y));
                (field.value, Vec2::new(field.gradient.x, field.gradient.z))
            }
        };

        let mut field = ShapedField {
            height: config.height_scale * value + config.height_offset,
            gradient: gradient * config.derivative_scale,
        };

        if let Some(cliff) = &config.cliff {
            field = cliff.apply(field);
        }

        // Literal reproduction of the reference output, see TerrainConfig docs
        if let Some(slope) = config.gradient_override {
            field.gradient = Vec2::splat(slope);
        }

        field
    }

    /// Upward unit normal of the surface `y = f(x, z)` at `(x, z)`
    pub fn normal(&self, x: f32, z: f32) -> Vec3 {
        surface_normal(self.sample(x, z).gradient)
    }
}

/// Normal of a heightfield with slope `gradient`: `normalize(-gx, 1, -gz)`
pub fn surface_normal(gradient: Vec2) -> Vec3 {
    Vec3::new(-gradient.x, 1.0, -gradient.y).normalize()
}
