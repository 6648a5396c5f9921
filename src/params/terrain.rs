//! Terrain sampling parameters: domain mapping, scaling and profile shaping.

use glam::Vec2;

use super::FractalParams;

/// How a grid position is turned into a noise sample position
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SamplingMode {
    /// 2D noise at `(x, z)`
    Planar,

    /// 3D noise on the horizontal plane `y = slice_y`, i.e. at `(x, slice_y, z)`.
    /// Only the x and z gradient components are used.
    Slice { slice_y: f32 },
}

/// Cliff band shaping: heights inside `[lower, upper]` get pushed up by up to
/// `boost` along a smoothed ramp
#[derive(Debug, Clone, PartialEq)]
pub struct CliffParams {
    /// Height where the ramp starts (height units, after scaling)
    pub lower: f32,

    /// Height where the ramp reaches full boost
    pub upper: f32,

    /// Extra height added above `upper` (height units)
    pub boost: f32,
}

/// Complete terrain configuration consumed by the sampler and mesh builder
#[derive(Debug, Clone, PartialEq)]
pub struct TerrainConfig {
    pub fractal: FractalParams,

    pub sampling: SamplingMode,

    /// Grid domain → noise domain scale (noise units per grid unit)
    pub domain_scale: f32,

    /// Offset added after scaling, shifts the visible window of the noise
    pub domain_offset: Vec2,

    /// Multiplier from fractal value to output height
    pub height_scale: f32,

    /// Constant added to the scaled height
    pub height_offset: f32,

    /// Multiplier from fractal gradient to output gradient.
    ///
    /// Equal to `height_scale * domain_scale` when the output gradient should
    /// be the true slope of the output height over the grid domain.
    pub derivative_scale: f32,

    /// Optional cliff band applied after scaling
    pub cliff: Option<CliffParams>,

    /// Replace both gradient components by this constant after shaping.
    ///
    /// The reference cliff terrain discards its computed slope this way;
    /// keep `None` for normals that follow the surface.
    pub gradient_override: Option<f32>,
}

impl Default for TerrainConfig {
    /// The reference heightmap mesh: 16 octaves of 3D noise sliced at `y = 1`
    fn default() -> Self {
        Self {
            fractal: FractalParams::default(),
            sampling: SamplingMode::Slice { slice_y: 1.0 },
            domain_scale: 1.0,
            domain_offset: Vec2::ZERO,
            height_scale: 1.0,
            height_offset: 0.0,
            derivative_scale: 1.0,
            cliff: None,
            gradient_override: None,
        }
    }
}

impl TerrainConfig {
    /// Large-scale cliff terrain in world units (metres).
    ///
    /// Heights land around 0..1200 with a cliff band between 550 and 600.
    /// The gradient scale and override reproduce the reference output
    /// literally, so normals from this preset are constant.
    pub fn reference_cliffs() -> Self {
        Self {
            fractal: FractalParams {
                octaves: 9,
                lacunarity: 1.9,
                gain: 0.55,
                initial_amplitude: 0.5,
            },
            sampling: SamplingMode::Planar,
            domain_scale: 1.0 / 2000.0,
            domain_offset: Vec2::new(1.0, -2.0),
            height_scale: 600.0,
            height_offset: 600.0,
            derivative_scale: 600.0,
            cliff: Some(CliffParams {
                lower: 550.0,
                upper: 600.0,
                boost: 90.0,
            }),
            gradient_override: Some(2000.0),
        }
    }

    /// Cliff terrain with the same shape as [`Self::reference_cliffs`] but a
    /// gradient that is the true slope of the output height.
    pub fn cliffs() -> Self {
        let reference = Self::reference_cliffs();
        Self {
            derivative_scale: reference.height_scale * reference.domain_scale,
            gradient_override: None,
            ..reference
        }
    }
}
