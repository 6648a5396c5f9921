//! Parameter definitions with units and documented semantics.
//!
//! All tunable numbers live here with:
//! - Units (normalised domain units, height units)
//! - Documented ranges and meanings
//! - Defaults that reproduce the reference terrain

mod fractal;
mod terrain;

// Re-export all types
pub use fractal::FractalParams;
pub use terrain::{CliffParams, SamplingMode, TerrainConfig};
