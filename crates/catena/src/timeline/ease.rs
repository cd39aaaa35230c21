//! Easing curves.
//!
//! Curves are named the way tweening engines name them (`power2.inOut`,
//! `back.out(1.7)`) so a composed timeline can be handed to an engine
//! verbatim. [`Ease::apply`] evaluates the curve for hosts that interpolate
//! on their own.

use std::{f64::consts::PI, fmt, str::FromStr};

use thiserror::Error;

/// Overshoot used by `back.out` when no amount is given.
pub const DEFAULT_OVERSHOOT: f64 = 1.70158;

/// An easing curve mapping linear progress to eased progress.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Ease {
    /// No easing.
    Linear,
    /// Quadratic deceleration.
    #[default]
    Power1Out,
    /// Cubic acceleration.
    Power2In,
    /// Cubic deceleration.
    Power2Out,
    /// Cubic acceleration then deceleration.
    Power2InOut,
    SineInOut,
    /// Deceleration that overshoots the target by the given amount before
    /// settling.
    BackOut(f64),
}

impl Ease {
    /// Evaluates the curve at `progress`, clamped to `0..=1`.
    pub fn apply(self, progress: f64) -> f64 {
        let t = progress.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::Power1Out => 1.0 - (1.0 - t).powi(2),
            Self::Power2In => t.powi(3),
            Self::Power2Out => 1.0 - (1.0 - t).powi(3),
            Self::Power2InOut => {
                if t < 0.5 {
                    4.0 * t.powi(3)
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Self::SineInOut => -((PI * t).cos() - 1.0) / 2.0,
            Self::BackOut(overshoot) => {
                let u = t - 1.0;
                1.0 + (overshoot + 1.0) * u.powi(3) + overshoot * u.powi(2)
            }
        }
    }
}

impl fmt::Display for Ease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linear => write!(f, "none"),
            Self::Power1Out => write!(f, "power1.out"),
            Self::Power2In => write!(f, "power2.in"),
            Self::Power2Out => write!(f, "power2.out"),
            Self::Power2InOut => write!(f, "power2.inOut"),
            Self::SineInOut => write!(f, "sine.inOut"),
            Self::BackOut(overshoot) => write!(f, "back.out({overshoot})"),
        }
    }
}

/// Error returned when an easing name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown easing curve `{0}`")]
pub struct UnknownEase(String);

impl FromStr for Ease {
    type Err = UnknownEase;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        match name {
            "none" | "linear" => return Ok(Self::Linear),
            "power1.out" | "power1" => return Ok(Self::Power1Out),
            "power2.in" => return Ok(Self::Power2In),
            "power2.out" | "power2" => return Ok(Self::Power2Out),
            "power2.inOut" => return Ok(Self::Power2InOut),
            "sine.inOut" => return Ok(Self::SineInOut),
            "back.out" => return Ok(Self::BackOut(DEFAULT_OVERSHOOT)),
            _ => {}
        }

        name.strip_prefix("back.out(")
            .and_then(|rest| rest.strip_suffix(')'))
            .and_then(|amount| amount.trim().parse::<f64>().ok())
            .filter(|amount| amount.is_finite())
            .map(Self::BackOut)
            .ok_or_else(|| UnknownEase(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    const CURVES: [Ease; 7] = [
        Ease::Linear,
        Ease::Power1Out,
        Ease::Power2In,
        Ease::Power2Out,
        Ease::Power2InOut,
        Ease::SineInOut,
        Ease::BackOut(1.7),
    ];

    #[test]
    fn test_endpoints_are_fixed() {
        for ease in CURVES {
            assert_approx_eq!(f64, ease.apply(0.0), 0.0, epsilon = 1e-12);
            assert_approx_eq!(f64, ease.apply(1.0), 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_progress_is_clamped() {
        assert_approx_eq!(f64, Ease::Power2Out.apply(-3.0), 0.0);
        assert_approx_eq!(f64, Ease::Power2Out.apply(4.0), 1.0);
    }

    #[test]
    fn test_midpoints() {
        assert_approx_eq!(f64, Ease::Linear.apply(0.5), 0.5);
        assert_approx_eq!(f64, Ease::Power2InOut.apply(0.5), 0.5);
        assert_approx_eq!(f64, Ease::SineInOut.apply(0.5), 0.5, epsilon = 1e-12);
        assert_approx_eq!(f64, Ease::Power2Out.apply(0.5), 0.875);
        assert_approx_eq!(f64, Ease::Power2In.apply(0.5), 0.125);
        assert_approx_eq!(f64, Ease::Power1Out.apply(0.5), 0.75);
    }

    #[test]
    fn test_back_out_overshoots() {
        let peak = (1..100)
            .map(|i| Ease::BackOut(1.7).apply(f64::from(i) / 100.0))
            .fold(f64::MIN, f64::max);
        assert!(peak > 1.0);
    }

    #[test]
    fn test_names_round_trip() {
        for ease in CURVES {
            assert_eq!(ease.to_string().parse::<Ease>(), Ok(ease));
        }
    }

    #[test]
    fn test_parse_aliases_and_errors() {
        assert_eq!("linear".parse::<Ease>(), Ok(Ease::Linear));
        assert_eq!("back.out".parse::<Ease>(), Ok(Ease::BackOut(DEFAULT_OVERSHOOT)));
        assert_eq!("back.out( 1.5 )".parse::<Ease>(), Ok(Ease::BackOut(1.5)));
        assert!("elastic.out".parse::<Ease>().is_err());
        assert!("back.out(x)".parse::<Ease>().is_err());
    }
}
