//! Height profile shaping with derivative propagation.

use glam::Vec2;

use crate::params::CliffParams;

/// Height and gradient after profile shaping, consistent with each other
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapedField {
    pub height: f32,
    /// `(d height / dx, d height / dz)`
    pub gradient: Vec2,
}

/// Smooth 0→1 ramp between `lower` and `upper`, with its derivative in `x`.
///
/// Returns exactly `(0, 0)` at and below `lower` and exactly `(1, 0)` at and
/// above `upper`. A band with `upper <= lower` degrades to a hard step at
/// `lower`.
pub fn smoothed_threshold(lower: f32, upper: f32, x: f32) -> (f32, f32) {
    if x < lower {
        return (0.0, 0.0);
    }
    if x >= upper || upper <= lower {
        return (1.0, 0.0);
    }
    let inv_range = 1.0 / (upper - lower);
    let u = (x - lower) * inv_range;
    (u * u * (3.0 - 2.0 * u), 6.0 * u * (1.0 - u) * inv_range)
}

impl CliffParams {
    /// Push heights inside the band up by a smoothed fraction of `boost`.
    ///
    /// `h' = h + boost * t(h)` so `∇h' = (1 + boost * t'(h)) ∇h`.
    pub fn apply(&self, field: ShapedField) -> ShapedField {
        let (t, dt) = smoothed_threshold(self.lower, self.upper, field.height);
        ShapedField {
            height: field.height + self.boost * t,
            gradient: field.gradient * (1.0 + self.boost * dt),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_outside_band() {
        assert_eq!(smoothed_threshold(2.0, 4.0, -10.0), (0.0, 0.0));
        assert_eq!(smoothed_threshold(2.0, 4.0, 10.0), (1.0, 0.0));
    }

    #[test]
    fn test_threshold_exact_at_bounds() {
        for (a, b) in [(0.0, 1.0), (550.0, 600.0), (-3.5, -3.25), (-1e3, 1e3)] {
            assert_eq!(smoothed_threshold(a, b, a), (0.0, 0.0));
            assert_eq!(smoothed_threshold(a, b, b), (1.0, 0.0));
        }
    }

    #[test]
    fn test_threshold_midpoint() {
        let (t, dt) = smoothed_threshold(0.0, 2.0, 1.0);
        assert_eq!(t, 0.5);
        // 6 * 0.5 * 0.5 / 2
        assert_eq!(dt, 0.75);
    }

    #[test]
    fn test_threshold_derivative_matches_finite_difference() {
        let (a, b) = (550.0, 600.0);
        let eps = 1e-2;
        for i in 1..50 {
            let x = a + (b - a) * i as f32 / 50.0;
            let (_, dt) = smoothed_threshold(a, b, x);
            let numeric =
                (smoothed_threshold(a, b, x + eps).0 - smoothed_threshold(a, b, x - eps).0)
                    / (2.0 * eps);
            assert!((dt - numeric).abs() < 1e-3, "at {x}: {dt} vs {numeric}");
        }
    }

    #[test]
    fn test_degenerate_band_is_a_step() {
        assert_eq!(smoothed_threshold(1.0, 1.0, 0.5), (0.0, 0.0));
        assert_eq!(smoothed_threshold(1.0, 1.0, 1.0), (1.0, 0.0));
        assert_eq!(smoothed_threshold(2.0, 1.0, 1.5), (0.0, 0.0));
    }

    #[test]
    fn test_threshold_nan_propagates() {
        let (t, dt) = smoothed_threshold(0.0, 1.0, f32::NAN);
        assert!(t.is_nan());
        assert!(dt.is_nan());
    }

    #[test]
    fn test_cliff_gradient_is_chain_ruled() {
        let cliff = CliffParams {
            lower: 550.0,
            upper: 600.0,
            boost: 90.0,
        };

        // Height field h(x) = 500 + 10 x, shaped along x
        let shaped = |x: f32| {
            cliff.apply(ShapedField {
                height: 500.0 + 10.0 * x,
                gradient: Vec2::new(10.0, 0.0),
            })
        };

        let eps = 1e-2;
        for i in 0..40 {
            let x = i as f32 * 0.25;
            let analytic = shaped(x).gradient.x;
            let numeric = (shaped(x + eps).height - shaped(x - eps).height) / (2.0 * eps);
            assert!(
                (analytic - numeric).abs() < 0.5,
                "at x={x}: analytic {analytic}, numeric {numeric}"
            );
        }

        // Full boost above the band, untouched gradient
        let above = shaped(20.0);
        assert_eq!(above.height, 700.0 + 90.0);
        assert_eq!(above.gradient, Vec2::new(10.0, 0.0));
    }
}
