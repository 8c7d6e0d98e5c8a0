//! Victory rewards, drops, captures and fusion.

use super::EncounterTier;
use crate::config::CombatConfig;
use crate::core::constants::*;
use crate::creature::{fuse, Combatant, FusionResult, Party};
use crate::data::{AccountBonuses, BallKind, CombatData, Rarity, ZoneInfo};
use crate::zones::ZoneProgress;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Which play mode rewards are being resolved for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewardMode {
    Interactive,
    /// Catch-up: reduced drop chances, outcomes graded by performance.
    Batch,
}

/// How comfortably a time-compressed fight was won.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PerformanceTier {
    Narrow,
    Solid,
    Flawless,
}

impl PerformanceTier {
    /// Grades by the winning creature's remaining HP fraction.
    pub fn from_hp_fraction(fraction: f64) -> Self {
        if fraction >= 1.0 {
            PerformanceTier::Flawless
        } else if fraction >= 0.5 {
            PerformanceTier::Solid
        } else {
            PerformanceTier::Narrow
        }
    }
}

/// Short description of a captured creature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptureSummary {
    pub species: u32,
    pub name: String,
    pub level: u32,
    pub rarity: Rarity,
    pub shiny: bool,
    /// The capture was fused into an owned duplicate.
    pub fused: bool,
}

/// One thrown capture item.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureAttempt {
    pub ball: BallKind,
    pub chance: f64,
    pub success: bool,
    /// The item was refunded by the recycle bonus.
    pub recycled: bool,
    pub summary: Option<CaptureSummary>,
    pub fusion: Option<FusionResult>,
}

/// Everything a completed fight hands to collaborators.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EncounterOutcome {
    pub exp: u64,
    pub currency: u64,
    /// Item key -> quantity. Eggs use `egg:<species id>`.
    pub items: BTreeMap<String, u32>,
    pub capture: Option<CaptureSummary>,
    /// Set only for time-compressed (batch) outcomes.
    pub performance: Option<PerformanceTier>,
    /// Shards from fusion.
    pub shards: u32,
    pub levels_gained: u32,
    /// Species mastery tier advanced.
    pub tier_advanced: bool,
}

/// Turns a won fight into rewards.
pub struct OutcomeResolver<'a> {
    pub data: &'a dyn CombatData,
    pub bonuses: &'a dyn AccountBonuses,
    pub config: &'a CombatConfig,
    pub mode: RewardMode,
}

impl<'a> OutcomeResolver<'a> {
    pub fn new(
        data: &'a dyn CombatData,
        bonuses: &'a dyn AccountBonuses,
        config: &'a CombatConfig,
        mode: RewardMode,
    ) -> Self {
        Self {
            data,
            bonuses,
            config,
            mode,
        }
    }

    fn drop_factor(&self) -> f64 {
        let mode_factor = match self.mode {
            RewardMode::Interactive => 1.0,
            RewardMode::Batch => self.config.offline_drop_factor,
        };
        mode_factor * (1.0 + self.bonuses.drop_bonus()).max(0.0)
    }

    pub fn exp_reward(&self, enemy_level: u32, tier: EncounterTier) -> u64 {
        let (exp_multiplier, _) = reward_multipliers(tier);
        (enemy_level as f64 * exp_multiplier * self.bonuses.exp_multiplier()).max(0.0) as u64
    }

    pub fn currency_reward(&self, zone: &ZoneInfo, tier: EncounterTier, rng: &mut impl Rng) -> u64 {
        let (_, currency_multiplier) = reward_multipliers(tier);
        let low = zone.currency_min.min(zone.currency_max);
        let high = zone.currency_min.max(zone.currency_max);
        let base = rng.gen_range(low..=high) as f64;
        (base * currency_multiplier * self.bonuses.currency_multiplier())
            .max(0.0)
            .round() as u64
    }

    /// Independent item and egg rolls from the zone tables.
    pub fn roll_drops(
        &self,
        zone: &ZoneInfo,
        enemy_species: u32,
        rng: &mut impl Rng,
    ) -> BTreeMap<String, u32> {
        let factor = self.drop_factor();
        let mut items = BTreeMap::new();
        for entry in &zone.drops {
            if rng.gen::<f64>() < entry.chance * factor {
                *items.entry(entry.item.clone()).or_insert(0) += 1;
            }
        }
        if rng.gen::<f64>() < zone.egg_chance * factor {
            *items.entry(format!("egg:{}", enemy_species)).or_insert(0) += 1;
        }
        items
    }

    /// Resolves a victory over `enemy`, paying rewards to the creature in
    /// `active`. Auto-capture runs here when the account has it enabled.
    pub fn resolve_victory(
        &self,
        enemy: &Combatant,
        tier: EncounterTier,
        progress: &mut ZoneProgress,
        party: &mut Party,
        active: usize,
        rng: &mut impl Rng,
    ) -> EncounterOutcome {
        let fallback;
        let zone = match self.data.zone(progress.zone_id) {
            Some(zone) => zone,
            None => {
                fallback = ZoneInfo::fallback(progress.zone_id);
                &fallback
            }
        };

        let mut outcome = EncounterOutcome {
            exp: self.exp_reward(enemy.level, tier),
            currency: self.currency_reward(zone, tier, rng),
            items: self.roll_drops(zone, enemy.species, rng),
            ..Default::default()
        };

        if let Some(winner) = party.team.get_mut(active) {
            outcome.exp = (outcome.exp as f64 * winner.exp_multiplier()) as u64;
            outcome.levels_gained = winner.add_exp(outcome.exp);
            if self.mode == RewardMode::Batch {
                outcome.performance = Some(PerformanceTier::from_hp_fraction(winner.hp_fraction()));
            }
        }

        outcome.tier_advanced = progress.record_kill(enemy.species, zone.max_tier);

        if self.bonuses.auto_capture() {
            if let Some(attempt) = self.attempt_capture(enemy, party, rng) {
                outcome.capture = attempt.summary;
                outcome.shards += attempt.fusion.map_or(0, |f| f.shards);
            }
        }
        outcome
    }

    /// `catch_rate(rarity) × ball_multiplier`, clamped to a probability.
    pub fn capture_chance(&self, rarity: Rarity, ball: BallKind) -> f64 {
        (self.data.catch_rate(rarity) * self.data.ball_multiplier(ball)).clamp(0.0, 1.0)
    }

    /// Throws one capture item at the defeated `enemy`. Returns `None` when
    /// the party has no capture items.
    pub fn attempt_capture(
        &self,
        enemy: &Combatant,
        party: &mut Party,
        rng: &mut impl Rng,
    ) -> Option<CaptureAttempt> {
        let ball = party.take_capture_item(self.bonuses.preferred_ball())?;
        let recycled = rng.gen::<f64>() < self.bonuses.recycle_chance();
        if recycled {
            party.return_capture_item(ball);
        }

        let chance = self.capture_chance(enemy.rarity, ball);
        let success = rng.gen::<f64>() < chance;
        let mut attempt = CaptureAttempt {
            ball,
            chance,
            success,
            recycled,
            summary: None,
            fusion: None,
        };
        if !success {
            return Some(attempt);
        }

        let captured = captured_copy(enemy);
        let mut summary = CaptureSummary {
            species: captured.species,
            name: captured.name.clone(),
            level: captured.level,
            rarity: captured.rarity,
            shiny: captured.shiny,
            fused: false,
        };
        match party.find_duplicate_mut(captured.species, captured.shiny) {
            Some(owned) => {
                attempt.fusion = Some(fuse(owned, &captured));
                summary.fused = true;
            }
            None => party.store(captured),
        }
        attempt.summary = Some(summary);
        Some(attempt)
    }
}

/// (exp, currency) multipliers for an encounter tier.
pub fn reward_multipliers(tier: EncounterTier) -> (f64, f64) {
    match tier {
        EncounterTier::Standard => STANDARD_REWARD_MULTIPLIERS,
        EncounterTier::Elite => ELITE_REWARD_MULTIPLIERS,
        EncounterTier::Boss => BOSS_REWARD_MULTIPLIERS,
    }
}

/// A freshly caught creature: the defeated enemy restored to full health.
fn captured_copy(enemy: &Combatant) -> Combatant {
    let mut captured = enemy.clone();
    captured.uid = uuid::Uuid::new_v4().to_string();
    captured.status = None;
    captured.gauge = 0.0;
    captured.heal_full();
    captured.restore_stamina();
    captured
}
