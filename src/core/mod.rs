//! Core engine: constants, balance formulas, the run loop and catch-up.

pub mod balance;
pub mod combat_engine;
pub mod constants;
pub mod game_loop;
pub mod offline;
pub mod tick;

pub use combat_engine::CombatEngine;
pub use constants::*;
pub use game_loop::{LoopTask, RunLoop};
pub use offline::{CatchupEnv, CatchupReport, CombatHistory};
pub use tick::{TickEvent, TickResult};
