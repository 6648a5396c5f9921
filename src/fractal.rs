//! Fractal Brownian motion with accumulated analytic derivatives.
//!
//! Each octave samples the noise at `x_k = (λR)^k x_0`. By the chain rule the
//! octave's contribution to the gradient with respect to `x_0` is
//! `((λR)^k)ᵀ ∇n(x_k)`, so alongside the sample position we carry the running
//! map `m_k = (λRᵀ)^k` and project every octave's gradient through it.

use glam::{Mat2, Mat3, Vec2, Vec3};

use crate::noise::{GradientNoise, NoiseSample};
use crate::params::FractalParams;

/// Per-octave rotation for 2D sampling (column-major)
pub const OCTAVE_ROTATION_2D: Mat2 = Mat2::from_cols_array(&[0.80, 0.60, -0.60, 0.80]);

/// Per-octave rotation for 3D sampling (column-major)
pub const OCTAVE_ROTATION_3D: Mat3 = Mat3::from_cols_array(&[
    0.00, 0.80, 0.60, //
    -0.80, 0.36, -0.48, //
    -0.60, -0.48, 0.64,
]);

/// A noise domain with a fixed rotation applied between octaves.
pub trait OctaveFrame: GradientNoise {
    /// Linear map type for this dimensionality
    type Map: Copy
        + std::ops::Mul<Self, Output = Self>
        + std::ops::Mul<Self::Map, Output = Self::Map>
        + std::ops::Mul<f32, Output = Self::Map>;

    const IDENTITY: Self::Map;
    const ROTATION: Self::Map;

    fn transpose(map: Self::Map) -> Self::Map;
}

impl OctaveFrame for Vec2 {
    type Map = Mat2;

    const IDENTITY: Mat2 = Mat2::IDENTITY;
    const ROTATION: Mat2 = OCTAVE_ROTATION_2D;

    fn transpose(map: Mat2) -> Mat2 {
        map.transpose()
    }
}

impl OctaveFrame for Vec3 {
    type Map = Mat3;

    const IDENTITY: Mat3 = Mat3::IDENTITY;
    const ROTATION: Mat3 = OCTAVE_ROTATION_3D;

    fn transpose(map: Mat3) -> Mat3 {
        map.transpose()
    }
}

/// Accumulated fBm value and its gradient with respect to the unscaled input.
pub type FractalField<P> = NoiseSample<P>;

/// Loop-carried state of the octave fold
struct OctaveState<P: OctaveFrame> {
    value: f32,
    gradient: P,
    amplitude: f32,
    position: P,
    map: P::Map,
}

/// Sum `params.octaves` octaves of noise starting at `point`.
///
/// Zero octaves yield a zero field without touching the noise primitive.
/// Boundary lacunarity or gain values are accepted as given.
pub fn accumulate<P: OctaveFrame>(point: P, params: &FractalParams) -> FractalField<P> {
    let lacunarity = params.lacunarity;
    let gain = params.gain;
    let forward = P::ROTATION * lacunarity;
    let backward = P::transpose(P::ROTATION) * lacunarity;

    let init = OctaveState {
        value: 0.0,
        gradient: P::ZERO,
        amplitude: params.initial_amplitude,
        position: point,
        map: P::IDENTITY,
    };

    let last = (0..params.octaves).fold(init, |s, _| {
        let n = s.position.evaluate();
        OctaveState {
            value: s.value + s.amplitude * n.value,
            gradient: s.gradient + (s.map * n.gradient) * s.amplitude,
            amplitude: s.amplitude * gain,
            position: forward * s.position,
            map: backward * s.map,
        }
    });

    NoiseSample {
        value: last.value,
        gradient: last.gradient,
    }
}

impl FractalParams {
    /// Sum this configuration's octaves starting at `point`
    pub fn accumulate<P: OctaveFrame>(&self, point: P) -> FractalField<P> {
        accumulate(point, self)
    }
}

/// Convenience form taking the octave parameters directly.
pub fn accumulate_fractal<P: OctaveFrame>(
    point: P,
    octaves: u32,
    lacunarity: f32,
    gain: f32,
) -> FractalField<P> {
    let params = FractalParams {
        octaves,
        lacunarity,
        gain,
        ..FractalParams::default()
    };
    accumulate(point, &params)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-3;

    fn params(octaves: u32) -> FractalParams {
        FractalParams {
            octaves,
            lacunarity: 2.0,
            gain: 0.5,
            ..FractalParams::default()
        }
    }

    #[test]
    fn test_zero_octaves_is_zero() {
        let field = accumulate(Vec2::new(3.7, -1.2), &params(0));
        assert_eq!(field.value, 0.0);
        assert_eq!(field.gradient, Vec2::ZERO);

        // Holds even for input the primitive would turn into NaN
        let field = accumulate_fractal(Vec3::splat(f32::NAN), 0, 1.98, 0.5);
        assert_eq!(field.value, 0.0);
        assert_eq!(field.gradient, Vec3::ZERO);
    }

    #[test]
    fn test_single_octave_is_scaled_noise() {
        let p = Vec2::new(0.35, 1.7);
        let field = accumulate(p, &params(1));
        let n = p.evaluate();
        assert_eq!(field.value, 0.5 * n.value);
        assert_eq!(field.gradient, n.gradient * 0.5);
    }

    #[test]
    fn test_each_octave_adds_its_decaying_amplitude() {
        let base = FractalParams {
            octaves: 0,
            lacunarity: 1.98,
            gain: 0.55,
            initial_amplitude: 0.5,
        };
        let p = Vec2::new(0.37, -1.21);
        let forward = OCTAVE_ROTATION_2D * base.lacunarity;

        let mut x = p;
        let mut previous = accumulate(p, &base);
        for k in 0..8 {
            let next = accumulate(
                p,
                &FractalParams {
                    octaves: k + 1,
                    ..base.clone()
                },
            );
            let expected = base.amplitude(k) * x.evaluate().value;
            let added = next.value - previous.value;
            assert!(
                (added - expected).abs() < 1e-6,
                "octave {k} added {added}, expected {expected}"
            );

            // Rotation keeps length, so octave k samples at frequency(k) times the input
            let freq = base.frequency(k);
            assert!((x.length() - freq * p.length()).abs() < 1e-4 * freq);
            assert!(base.amplitude(k + 1) < base.amplitude(k));

            previous = next;
            x = forward * x;
        }
    }

    #[test]
    fn test_rotations_are_orthonormal() {
        let r2 = OCTAVE_ROTATION_2D * OCTAVE_ROTATION_2D.transpose();
        assert!(r2.abs_diff_eq(Mat2::IDENTITY, 1e-6));
        let r3 = OCTAVE_ROTATION_3D * OCTAVE_ROTATION_3D.transpose();
        assert!(r3.abs_diff_eq(Mat3::IDENTITY, 1e-5));
    }

    #[test]
    fn test_fractal_gradient_matches_finite_difference_2d() {
        let p5 = params(5);
        for i in 0..50 {
            let p = Vec2::new(i as f32 * 0.21 - 4.0, (i as f32 * 0.7).sin());
            let analytic = accumulate(p, &p5).gradient;
            let dx = Vec2::new(EPS, 0.0);
            let dy = Vec2::new(0.0, EPS);
            let numeric = Vec2::new(
                (accumulate(p + dx, &p5).value - accumulate(p - dx, &p5).value) / (2.0 * EPS),
                (accumulate(p + dy, &p5).value - accumulate(p - dy, &p5).value) / (2.0 * EPS),
            );
            assert!(
                (analytic - numeric).length() < 2e-2,
                "fbm gradient mismatch at {p}: analytic {analytic}, numeric {numeric}"
            );
        }
    }

    #[test]
    fn test_fractal_gradient_matches_finite_difference_3d() {
        let p4 = params(4);
        for i in 0..50 {
            let f = i as f32;
            let p = Vec3::new(f * 0.13 - 3.0, 1.0, (f * 0.4).cos() * 2.0);
            let analytic = accumulate(p, &p4).gradient;
            let axis = |a: Vec3| {
                (accumulate(p + a * EPS, &p4).value - accumulate(p - a * EPS, &p4).value)
                    / (2.0 * EPS)
            };
            let numeric = Vec3::new(axis(Vec3::X), axis(Vec3::Y), axis(Vec3::Z));
            assert!(
                (analytic - numeric).length() < 2e-2,
                "fbm gradient mismatch at {p}: analytic {analytic}, numeric {numeric}"
            );
        }
    }

    #[test]
    fn test_deterministic() {
        let p = Vec3::new(0.25, 1.0, -0.75);
        let a = accumulate_fractal(p, 16, 1.98, 0.5);
        let b = accumulate_fractal(p, 16, 1.98, 0.5);
        assert_eq!(a, b);
    }

    #[test]
    fn test_boundary_gain_is_accepted() {
        // gain 0 keeps only the first octave
        let p = Vec2::new(0.4, 0.9);
        let first = accumulate_fractal(p, 1, 2.0, 0.0);
        let many = accumulate_fractal(p, 8, 2.0, 0.0);
        assert_eq!(first.value, many.value);

        // gain 1 and lacunarity 1 simply repeat rotated samples; still finite
        let flat = accumulate_fractal(p, 8, 1.0, 1.0);
        assert!(flat.value.is_finite());
    }
}
