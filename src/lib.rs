//! Heightfield library - procedural terrain with analytic normals
//!
//! Fractal simplex noise is summed together with its exact gradient, shaped
//! by an optional cliff profile and sampled on a grid to produce a triangle
//! mesh whose normals come straight from the analytic slope.

pub mod cli;
pub mod error;
pub mod fractal;
pub mod noise;
pub mod params;
pub mod preview;
pub mod profile;
pub mod terrain;

pub use error::{Result, TerrainError};
pub use fractal::{accumulate_fractal, FractalField};
pub use noise::{evaluate_noise, NoiseSample};
pub use profile::{smoothed_threshold, ShapedField};
pub use terrain::{build_heightfield_mesh, HeightmapMesh, Mesh, TerrainSampler, Vertex};
