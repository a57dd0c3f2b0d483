//! Fold parameters.

use pleat_types::constants;
use pleat_types::{PleatError, PleatResult};
use serde::{Deserialize, Serialize};

/// Shape and pace of the fold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FoldParams {
    /// Number of pleats stacked over the curtain height (>= 1).
    pub layers: u32,
    /// Depth of the pleats along Z (>= 0).
    pub amount: f32,
    /// Animation speed multiplier (> 0).
    pub speed: f32,
    /// Constant damping the raw speed (> 0).
    pub rate: f32,
}

impl Default for FoldParams {
    fn default() -> Self {
        Self {
            layers: constants::DEFAULT_FOLD_LAYERS,
            amount: constants::DEFAULT_FOLD_AMOUNT,
            speed: constants::DEFAULT_FOLD_SPEED,
            rate: constants::DEFAULT_FOLD_RATE,
        }
    }
}

impl FoldParams {
    /// Seconds a full fold (0 → 1) takes.
    pub fn duration(&self) -> f32 {
        1.0 / (self.speed * self.rate)
    }

    pub fn validate(&self) -> PleatResult<()> {
        if self.layers == 0 {
            return Err(PleatError::InvalidConfig("Fold layers must be >= 1".into()));
        }
        if !(self.amount.is_finite() && self.amount >= 0.0) {
            return Err(PleatError::InvalidConfig(format!(
                "Fold amount must be non-negative, got {}",
                self.amount
            )));
        }
        if !(self.speed.is_finite() && self.speed > 0.0) {
            return Err(PleatError::InvalidConfig(format!(
                "Fold speed must be positive, got {}",
                self.speed
            )));
        }
        if !(self.rate.is_finite() && self.rate > 0.0) {
            return Err(PleatError::InvalidConfig(format!(
                "Fold rate must be positive, got {}",
                self.rate
            )));
        }
        Ok(())
    }
}
