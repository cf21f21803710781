//! Follow curves: map a normalized distance ratio to a speed multiplier.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::util::easing::EasingFunction;

/// A single key on a [`FollowCurve::Keyframes`] curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CurveKey {
    /// Normalized distance ratio at which this key applies.
    pub t: f32,
    /// Speed multiplier at `t`.
    pub value: f32,
}

impl CurveKey {
    /// Create a key.
    #[must_use]
    pub const fn new(t: f32, value: f32) -> Self {
        Self { t, value }
    }
}

/// Speed multiplier as a function of `distance / curve_start`.
///
/// Samples outside the curve's domain clamp to the nearest end. Curves are
/// expected to be monotonically non-decreasing, so the far end of the
/// domain is the curve's maximum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FollowCurve {
    /// Same multiplier everywhere.
    Constant {
        /// The multiplier.
        value: f32,
    },
    /// An easing preset over `[0, 1]`.
    Easing {
        /// The preset.
        function: EasingFunction,
    },
    /// Piecewise-linear keys, sorted by `t`.
    Keyframes {
        /// Keys in ascending `t` order.
        points: Vec<CurveKey>,
    },
}

impl FollowCurve {
    /// Build a keyframe curve, sorting the keys by `t`.
    #[must_use]
    pub fn keyframes(mut points: Vec<CurveKey>) -> Self {
        points.sort_by(|a, b| a.t.total_cmp(&b.t));
        Self::Keyframes { points }
    }

    /// Re-sort keyframes after deserialization. No-op for other variants.
    pub fn normalize(&mut self) {
        if let Self::Keyframes { points } = self {
            points.sort_by(|a, b| a.t.total_cmp(&b.t));
        }
    }

    /// Sample the curve at `t`.
    #[must_use]
    pub fn sample(&self, t: f32) -> f32 {
        match self {
            Self::Constant { value } => *value,
            Self::Easing { function } => function.evaluate(t),
            Self::Keyframes { points } => sample_keys(points, t),
        }
    }

    /// Sample at `distance / curve_start`.
    ///
    /// A non-positive `curve_start` saturates the ratio, yielding the
    /// curve's far-end (maximum) sample.
    #[must_use]
    pub fn sample_ratio(&self, distance: f32, curve_start: f32) -> f32 {
        let ratio = if curve_start > 0.0 {
            distance / curve_start
        } else {
            f32::INFINITY
        };
        self.sample(ratio)
    }
}

impl Default for FollowCurve {
    /// Slow to a quarter speed near the target, full speed at and beyond the
    /// curve start.
    fn default() -> Self {
        Self::keyframes(vec![CurveKey::new(0.0, 0.25), CurveKey::new(1.0, 1.0)])
    }
}

fn sample_keys(points: &[CurveKey], t: f32) -> f32 {
    let (Some(first), Some(last)) = (points.first(), points.last()) else {
        return 1.0;
    };
    if t.is_nan() || t <= first.t {
        return first.value;
    }
    if t >= last.t {
        return last.value;
    }
    for pair in points.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if t <= b.t {
            let span = b.t - a.t;
            if span <= f32::EPSILON {
                return b.value;
            }
            return a.value + (b.value - a.value) * ((t - a.t) / span);
        }
    }
    last.value
}
