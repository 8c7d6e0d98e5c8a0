//! Lookup tables consumed by the combat core.
//!
//! The core never reads tables directly: everything goes through the
//! [`CombatData`] and [`AccountBonuses`] traits, injected when the engine is
//! built. [`GameData`] and [`StaticBonuses`] are the bundled implementations.

pub mod bonuses;
mod builtin;
pub mod game_data;
pub mod types;

pub use bonuses::{AccountBonuses, StaticBonuses};
pub use game_data::{GameData, GameDataFile};
pub use types::*;

use crate::combat::status::StatusKind;

/// Stat, type, move, capture and zone dataset.
pub trait CombatData {
    fn species(&self, id: u32) -> Option<&SpeciesInfo>;

    fn move_info(&self, name: &str) -> Option<&MoveInfo>;

    /// Raw matchup entry for `attack` hitting `defend`, if the table has one.
    fn matchup(&self, attack: ElementType, defend: ElementType) -> Option<f64>;

    fn catch_rate(&self, rarity: Rarity) -> f64;

    fn ball_multiplier(&self, ball: BallKind) -> f64;

    /// Status a hit of this element may inflict.
    fn status_affinity(&self, element: ElementType) -> Option<StatusKind>;

    fn proc_chance(&self, status: StatusKind) -> f64;

    fn zone(&self, id: u32) -> Option<&ZoneInfo>;

    /// Matchup multiplier with unknown or corrupt entries treated as neutral.
    fn effectiveness(&self, attack: ElementType, defend: ElementType) -> f64 {
        self.matchup(attack, defend)
            .filter(|m| m.is_finite() && *m >= 0.0)
            .unwrap_or(1.0)
    }

    /// The species' default move, falling back to Charge.
    fn default_move(&self, species: u32) -> MoveInfo {
        self.species(species)
            .and_then(|s| self.move_info(&s.default_move))
            .cloned()
            .unwrap_or_else(MoveInfo::charge)
    }
}
