//! Zone mastery tracking.

mod progress;

pub use progress::ZoneProgress;
