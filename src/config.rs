//! Host-tunable combat configuration.
//!
//! Hard caps (turn cap, encounter cap, offline clamp) are contracts and live
//! in `core::constants`; everything a host may reasonably tune is here.

use crate::core::constants::*;
use crate::error::{CombatError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatConfig {
    /// Delay between spawning an enemy and the first gauge tick.
    pub start_delay_ms: f64,
    /// Pause after an encounter before the next spawn.
    pub cooldown_ms: f64,
    /// Minimum time between two resolved turns in interactive mode.
    pub min_turn_delay_ms: f64,
    /// Largest frame delta accepted before clamping.
    pub frame_delta_cap_ms: f64,
    /// Time spent in the dead state before the roster is restored.
    pub death_recovery_ms: f64,
    pub elite_chance: f64,
    /// Every Nth kill in a zone is a boss (0 disables bosses).
    pub boss_interval: u32,
    pub shiny_chance: f64,
    /// % of max HP restored per second outside of fights.
    pub passive_regen_percent: f64,
    pub stamina_regen_per_second: u32,
    /// Max capture summaries kept in a catch-up report.
    pub capture_summary_cap: usize,
    /// Drop-chance factor applied during catch-up.
    pub offline_drop_factor: f64,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            start_delay_ms: COMBAT_START_DELAY_MS,
            cooldown_ms: INTER_COMBAT_COOLDOWN_MS,
            min_turn_delay_ms: MIN_TURN_DELAY_MS,
            frame_delta_cap_ms: FRAME_DELTA_CAP_MS,
            death_recovery_ms: DEATH_RECOVERY_MS,
            elite_chance: ELITE_SPAWN_CHANCE,
            boss_interval: BOSS_INTERVAL_KILLS,
            shiny_chance: SHINY_CHANCE,
            passive_regen_percent: PASSIVE_REGEN_PERCENT,
            stamina_regen_per_second: STAMINA_REGEN_PER_SECOND,
            capture_summary_cap: MAX_CAPTURE_SUMMARIES,
            offline_drop_factor: OFFLINE_DROP_RATE_FACTOR,
        }
    }
}

impl CombatConfig {
    /// Parse a config from JSON. Missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| CombatError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Quick config for tests: no spawn or turn pacing delays.
    pub fn instant() -> Self {
        Self {
            start_delay_ms: 0.0,
            cooldown_ms: 0.0,
            min_turn_delay_ms: 0.0,
            ..Default::default()
        }
    }
}
