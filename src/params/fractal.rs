//! Octave parameters for fractal noise.

/// Fractal Brownian motion parameters
#[derive(Debug, Clone, PartialEq)]
pub struct FractalParams {
    /// Number of noise layers summed (0 = flat field)
    pub octaves: u32,

    /// Frequency multiplier per octave (> 1 for finer detail each layer)
    pub lacunarity: f32,

    /// Amplitude multiplier per octave, in (0, 1) so higher octaves fade
    pub gain: f32,

    /// Weight of the first octave
    pub initial_amplitude: f32,
}

impl Default for FractalParams {
    fn default() -> Self {
        Self {
            octaves: 16,
            lacunarity: 1.98,
            gain: 0.5,
            initial_amplitude: 0.5,
        }
    }
}

impl FractalParams {
    /// Weight applied to octave `k` (zero-based)
    pub fn amplitude(&self, octave: u32) -> f32 {
        self.initial_amplitude * self.gain.powi(octave as i32)
    }

    /// Spatial frequency of octave `k` relative to the input coordinate
    pub fn frequency(&self, octave: u32) -> f32 {
        self.lacunarity.powi(octave as i32)
    }

    /// Log parameter values that produce degenerate fields.
    ///
    /// Boundary values are legal; they only flatten or blow up the result.
    pub fn warn_if_degenerate(&self) {
        if !(self.gain > 0.0 && self.gain < 1.0) {
            log::warn!(
                "gain {} is outside (0, 1); octaves will not decay",
                self.gain
            );
        }
        if self.lacunarity <= 1.0 {
            log::warn!(
                "lacunarity {} <= 1; octaves will not add finer detail",
                self.lacunarity
            );
        }
    }
}
