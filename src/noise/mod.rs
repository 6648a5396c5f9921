//! Gradient noise with analytic derivatives.
//!
//! Every evaluation returns the noise value together with its exact gradient,
//! so terrain normals can be derived from the same field that drives the
//! height instead of from finite differences between neighbouring vertices.

mod simplex;

use std::ops::{Add, AddAssign, Mul};

use glam::{Vec2, Vec3};

pub use simplex::{simplex_2d, simplex_3d, PERMUTATION};

/// Noise value plus its gradient with respect to the sample coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoiseSample<P> {
    /// Noise value, within `[-1, 1]`
    pub value: f32,
    /// Partial derivatives of `value` along each input axis
    pub gradient: P,
}

/// A sample position the noise primitive can be evaluated at.
///
/// Implemented for [`Vec2`] and [`Vec3`].
pub trait GradientNoise:
    Copy + Add<Output = Self> + AddAssign + Mul<f32, Output = Self>
{
    const ZERO: Self;

    /// Evaluate simplex noise and its gradient at this position.
    fn evaluate(self) -> NoiseSample<Self>;
}

impl GradientNoise for Vec2 {
    const ZERO: Self = Vec2::ZERO;

    fn evaluate(self) -> NoiseSample<Self> {
        simplex_2d(self)
    }
}

impl GradientNoise for Vec3 {
    const ZERO: Self = Vec3::ZERO;

    fn evaluate(self) -> NoiseSample<Self> {
        simplex_3d(self)
    }
}

/// Evaluate the noise primitive at `point`.
///
/// Values lie within `[-1, 1]`. Pure and deterministic: the only table
/// involved is the constant [`PERMUTATION`].
pub fn evaluate_noise<P: GradientNoise>(point: P) -> NoiseSample<P> {
    point.evaluate()
}
