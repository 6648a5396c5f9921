//! Command-line argument parsing.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::params::TerrainConfig;

/// Terrain preset selection
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Preset {
    /// 16-octave 3D noise slice over [-1, 1]²
    Default,
    /// Kilometre-scale cliff terrain with true slopes
    Cliffs,
    /// Cliff terrain with the reference constant gradient
    ReferenceCliffs,
}

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "heightfield")]
#[command(about = "Procedural terrain heightfield with analytic normals", long_about = None)]
pub struct Args {
    /// Grid points along x
    #[arg(long, value_name = "POINTS", default_value_t = 128)]
    pub width: usize,

    /// Grid points along z
    #[arg(long, value_name = "POINTS", default_value_t = 128)]
    pub height: usize,

    /// Terrain preset
    #[arg(long, value_enum, default_value_t = Preset::Default)]
    pub preset: Preset,

    /// Override the preset's octave count
    #[arg(long)]
    pub octaves: Option<u32>,

    /// Override the preset's per-octave frequency multiplier
    #[arg(long)]
    pub lacunarity: Option<f32>,

    /// Override the preset's per-octave amplitude multiplier
    #[arg(long)]
    pub gain: Option<f32>,

    /// Override the preset's domain scale (noise units per grid unit)
    #[arg(long, value_name = "SCALE")]
    pub domain_scale: Option<f32>,

    /// Write the normal field as an RGB PNG
    #[arg(long, value_name = "PATH")]
    pub normal_map: Option<PathBuf>,

    /// Write the height field as a grayscale PNG
    #[arg(long, value_name = "PATH")]
    pub height_map: Option<PathBuf>,
}

impl Args {
    /// Terrain configuration from the preset plus any overrides
    pub fn terrain_config(&self) -> TerrainConfig {
        let mut config = match self.preset {
            Preset::Default => TerrainConfig::default(),
            Preset::Cliffs => TerrainConfig::cliffs(),
            Preset::ReferenceCliffs => TerrainConfig::reference_cliffs(),
        };
        log::info!("Preset: {:?}", self.preset);

        if let Some(octaves) = self.octaves {
            config.fractal.octaves = octaves;
        }
        if let Some(lacunarity) = self.lacunarity {
            config.fractal.lacunarity = lacunarity;
        }
        if let Some(gain) = self.gain {
            config.fractal.gain = gain;
        }
        if let Some(scale) = self.domain_scale {
            // Keep the slope consistent with the height when it already was
            let consistent = config.gradient_override.is_none()
                && config.derivative_scale == config.height_scale * config.domain_scale;
            config.domain_scale = scale;
            if consistent {
                config.derivative_scale = config.height_scale * scale;
            }
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["heightfield"]);
        assert_eq!((args.width, args.height), (128, 128));
        assert_eq!(args.terrain_config(), TerrainConfig::default());
    }

    #[test]
    fn test_overrides() {
        let args = Args::parse_from([
            "heightfield",
            "--preset",
            "cliffs",
            "--octaves",
            "4",
            "--gain",
            "0.4",
            "--width",
            "9",
        ]);
        let config = args.terrain_config();
        assert_eq!(args.width, 9);
        assert_eq!(config.fractal.octaves, 4);
        assert_eq!(config.fractal.gain, 0.4);
        assert_eq!(config.fractal.lacunarity, 1.9);
        assert!(config.cliff.is_some());
    }

    #[test]
    fn test_domain_scale_keeps_slope_consistent() {
        let args = Args::parse_from(["heightfield", "--domain-scale", "3"]);
        let config = args.terrain_config();
        assert_eq!(config.domain_scale, 3.0);
        assert_eq!(config.derivative_scale, 3.0);

        let args = Args::parse_from([
            "heightfield",
            "--preset",
            "reference-cliffs",
            "--domain-scale",
            "0.001",
        ]);
        assert_eq!(args.terrain_config().derivative_scale, 600.0);
    }
}
