//! Creatures: stat blocks, combatants, talents, the party and fusion.

pub mod combatant;
pub mod fusion;
pub mod party;
pub mod stats;
pub mod talents;

pub use combatant::Combatant;
pub use fusion::{fuse, FusionResult};
pub use party::Party;
pub use stats::{Stat, StatBlock};
pub use talents::{HeldItem, Talent, TalentStacks};
