//! Confidence score module

use serde::{Deserialize, Serialize};

/// A confidence score in `[0.0, 1.0]`
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Confidence(f64);

impl Confidence {
    /// Lowest possible confidence
    pub const ZERO: Confidence = Confidence(0.0);

    /// Highest possible confidence
    pub const ONE: Confidence = Confidence(1.0);

    /// Create a new confidence score
    ///
    /// # Panics
    /// Panics if `value` is outside `[0, 1]` or NaN
    pub fn new(value: f64) -> Self {
        assert!((0.0..=1.0).contains(&value), "Confidence must be in [0, 1]");
        Self(value)
    }

    /// Create a confidence score, clamping into `[0, 1]` (NaN becomes 0)
    pub fn clamped(value: f64) -> Self {
        if value.is_nan() {
            return Self::ZERO;
        }
        Self(value.clamp(0.0, 1.0))
    }

    /// Raw value
    pub fn value(&self) -> f64 {
        self.0
    }
}

impl From<Confidence> for f64 {
    fn from(c: Confidence) -> f64 {
        c.0
    }
}
