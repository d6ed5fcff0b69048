//! Easing curves for tween interpolation

use serde::{Deserialize, Serialize};

/// Easing function applied to a tween's normalized progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Ease {
    #[default]
    Linear,
    QuadIn,
    QuadOut,
    QuadInOut,
    CubicIn,
    CubicOut,
    CubicInOut,
    /// Overshoots past the target before settling
    BackOut,
    /// Settles with decaying bounces
    BounceOut,
}

impl Ease {
    /// Map linear progress `t` in [0, 1] to eased progress.
    ///
    /// Every curve maps 0 to 0 and 1 to 1 exactly, so tween endpoints are
    /// never approximated.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Ease::Linear => t,
            Ease::QuadIn => t * t,
            Ease::QuadOut => t * (2.0 - t),
            Ease::QuadInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
            Ease::CubicIn => t * t * t,
            Ease::CubicOut => {
                let u = t - 1.0;
                u * u * u + 1.0
            }
            Ease::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let u = 2.0 * t - 2.0;
                    0.5 * u * u * u + 1.0
                }
            }
            Ease::BackOut => {
                const OVERSHOOT: f64 = 1.70158;
                let u = t - 1.0;
                u * u * ((OVERSHOOT + 1.0) * u + OVERSHOOT) + 1.0
            }
            Ease::BounceOut => bounce_out(t),
        }
    }
}

fn bounce_out(t: f64) -> f64 {
    const N: f64 = 7.5625;
    const D: f64 = 2.75;
    if t < 1.0 / D {
        N * t * t
    } else if t < 2.0 / D {
        let u = t - 1.5 / D;
        N * u * u + 0.75
    } else if t < 2.5 / D {
        let u = t - 2.25 / D;
        N * u * u + 0.9375
    } else {
        let u = t - 2.625 / D;
        N * u * u + 0.984375
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_ease_hits_exact_endpoints() {
        let eases = [
            Ease::Linear,
            Ease::QuadIn,
            Ease::QuadOut,
            Ease::QuadInOut,
            Ease::CubicIn,
            Ease::CubicOut,
            Ease::CubicInOut,
            Ease::BackOut,
            Ease::BounceOut,
        ];
        for ease in eases {
            assert_eq!(ease.apply(0.0), 0.0, "{ease:?} at 0");
            assert_eq!(ease.apply(1.0), 1.0, "{ease:?} at 1");
        }
    }

    #[test]
    fn progress_is_clamped() {
        assert_eq!(Ease::QuadIn.apply(-0.5), 0.0);
        assert_eq!(Ease::QuadIn.apply(1.5), 1.0);
    }

    #[test]
    fn back_out_overshoots() {
        assert!(Ease::BackOut.apply(0.7) > 1.0);
    }
}
