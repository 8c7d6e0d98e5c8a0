//! Combat resolution: damage, status, gauge scheduling, turns and outcomes.

pub mod context;
pub mod damage;
pub mod gauge;
pub mod outcome;
pub mod spawn;
pub mod status;
pub mod turn;

pub use context::{BattleContext, ContextClaim, EncounterState, EncounterTier};
pub use damage::{compute_damage, DamageInput, DamageModifiers, DamageResult};
pub use gauge::{advance, jump, BatchStep, GaugeAdvance, GaugeSnapshot};
pub use outcome::{
    CaptureAttempt, CaptureSummary, EncounterOutcome, OutcomeResolver, PerformanceTier,
    RewardMode,
};
pub use spawn::spawn_enemy;
pub use status::{StatusEffect, StatusKind, StatusTick};
pub use turn::{execute_scheduled_turn, resolve_turn, tick_statuses, TurnOutcome, TurnResolution};

use serde::{Deserialize, Serialize};

/// Which side of the battle acts or is affected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Player,
    Enemy,
}

impl Side {
    pub fn opponent(&self) -> Side {
        match self {
            Side::Player => Side::Enemy,
            Side::Enemy => Side::Player,
        }
    }
}
