// extensions/easing.rs
//
// Easing curves for PathStyle::Eased. Pure math, no engine types.
// Every curve maps 0 -> 0 and 1 -> 1 and stays inside [0, 1] so the
// eased value is always a valid path progress.

use std::f32::consts::FRAC_PI_2;
use serde::{Deserialize, Serialize};

/// Easing curve applied to path progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Easing {
    /// Constant speed.
    #[default]
    Linear,
    /// Accelerate from rest.
    QuadIn,
    /// Decelerate to rest.
    QuadOut,
    QuadInOut,
    CubicIn,
    CubicOut,
    CubicInOut,
    /// Gentle sine start.
    SineIn,
    SineOut,
    SineInOut,
}

impl Easing {
    /// Apply the curve to `t`, clamped to [0, 1] first.
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::QuadIn => t.powi(2),
            Easing::QuadOut => out(t, |x| x.powi(2)),
            Easing::QuadInOut => in_out(t, |x| x.powi(2)),
            Easing::CubicIn => t.powi(3),
            Easing::CubicOut => out(t, |x| x.powi(3)),
            Easing::CubicInOut => in_out(t, |x| x.powi(3)),
            Easing::SineIn => sine_in(t),
            Easing::SineOut => out(t, sine_in),
            Easing::SineInOut => in_out(t, sine_in),
        }
    }
}

#[inline]
fn sine_in(t: f32) -> f32 {
    1.0 - (t * FRAC_PI_2).cos()
}

/// Mirror an ease-in curve into its ease-out counterpart.
#[inline]
fn out(t: f32, ease_in: impl Fn(f32) -> f32) -> f32 {
    1.0 - ease_in(1.0 - t)
}

/// Ease-in for the first half, ease-out for the second.
#[inline]
fn in_out(t: f32, ease_in: impl Fn(f32) -> f32) -> f32 {
    if t < 0.5 {
        ease_in(2.0 * t) / 2.0
    } else {
        1.0 - ease_in(2.0 - 2.0 * t) / 2.0
    }
}
