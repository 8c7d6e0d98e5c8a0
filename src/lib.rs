//! Tamer - combat core for a creature-collection incremental game.
//!
//! Damage, status effects, action-gauge scheduling, turn execution, reward
//! resolution with capture and fusion, and bounded offline catch-up. The
//! host owns rendering and persistence and drives [`CombatEngine`] with
//! frame deltas.

// Allow dead code in library - some helpers are only used by the binary
#![allow(dead_code)]

pub mod combat;
pub mod config;
pub mod core;
pub mod creature;
pub mod data;
pub mod error;
pub mod zones;

pub use crate::config::CombatConfig;
pub use crate::core::{CatchupReport, CombatEngine, TickEvent, TickResult};
pub use crate::error::{CombatError, Result};
