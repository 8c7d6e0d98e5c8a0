//! Account-wide bonus accessors (talents, badges, collection milestones).

use super::types::BallKind;
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Account-wide modifiers. Percent-style bonuses are fractions (0.1 = +10%)
/// and are summed by the caller; multipliers are applied as-is.
pub trait AccountBonuses {
    /// Σ player damage bonuses, applied as `1 + bonus`.
    fn damage_bonus(&self) -> f64;

    /// Σ resistance bonuses, applied to incoming damage as `1 - bonus`.
    fn resistance_bonus(&self) -> f64;

    fn exp_multiplier(&self) -> f64;

    fn currency_multiplier(&self) -> f64;

    /// Σ drop-chance bonuses, applied as `1 + bonus`.
    fn drop_bonus(&self) -> f64;

    /// Chance that a consumed capture item is refunded.
    fn recycle_chance(&self) -> f64;

    fn auto_capture(&self) -> bool;

    fn preferred_ball(&self) -> BallKind;
}

/// Plain bonus values, loadable from JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StaticBonuses {
    pub damage_bonus: f64,
    pub resistance_bonus: f64,
    pub exp_multiplier: f64,
    pub currency_multiplier: f64,
    pub drop_bonus: f64,
    pub recycle_chance: f64,
    pub auto_capture: bool,
    pub preferred_ball: BallKind,
}

impl Default for StaticBonuses {
    fn default() -> Self {
        Self {
            damage_bonus: 0.0,
            resistance_bonus: 0.0,
            exp_multiplier: 1.0,
            currency_multiplier: 1.0,
            drop_bonus: 0.0,
            recycle_chance: 0.0,
            auto_capture: false,
            preferred_ball: BallKind::Basic,
        }
    }
}

impl StaticBonuses {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl AccountBonuses for StaticBonuses {
    fn damage_bonus(&self) -> f64 {
        self.damage_bonus
    }

    fn resistance_bonus(&self) -> f64 {
        self.resistance_bonus
    }

    fn exp_multiplier(&self) -> f64 {
        self.exp_multiplier
    }

    fn currency_multiplier(&self) -> f64 {
        self.currency_multiplier
    }

    fn drop_bonus(&self) -> f64 {
        self.drop_bonus
    }

    fn recycle_chance(&self) -> f64 {
        self.recycle_chance
    }

    fn auto_capture(&self) -> bool {
        self.auto_capture
    }

    fn preferred_ball(&self) -> BallKind {
        self.preferred_ball
    }
}
