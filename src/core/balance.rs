//! Shared balance formulas used by both the interactive engine and catch-up.
//!
//! All core balance numbers should be defined here or in `constants`.
//! Change once, test everywhere.

use super::constants::{MAX_LEVEL, PRESTIGE_STAT_BONUS};

// =============================================================================
// LEVELING
// =============================================================================

/// Base XP required for leveling.
pub const XP_CURVE_BASE: f64 = 100.0;

/// XP curve exponent (polynomial scaling).
/// XP for level N = XP_CURVE_BASE * N^XP_CURVE_EXPONENT
pub const XP_CURVE_EXPONENT: f64 = 1.5;

/// Calculate XP required to go from `level` to `level + 1`.
pub fn xp_required_for_level(level: u32) -> u64 {
    (XP_CURVE_BASE * f64::powf(level.max(1) as f64, XP_CURVE_EXPONENT)) as u64
}

/// Total XP spent to reach `level` from level 1.
pub fn cumulative_xp_for_level(level: u32) -> u64 {
    (1..level.min(MAX_LEVEL)).map(xp_required_for_level).sum()
}

// =============================================================================
// STATS
// =============================================================================

/// HP stat for a base value, individual value and level.
pub fn hp_stat(base: u32, iv: u32, level: u32) -> u32 {
    (2 * base + iv) * level / 100 + level + 10
}

/// Non-HP stat for a base value, individual value and level.
pub fn other_stat(base: u32, iv: u32, level: u32) -> u32 {
    (2 * base + iv) * level / 100 + 5
}

/// Stat multiplier granted by a creature's prestige tier.
pub fn prestige_multiplier(prestige: u32) -> f64 {
    1.0 + prestige as f64 * PRESTIGE_STAT_BONUS
}

// =============================================================================
// TALENT STACKING
// =============================================================================

/// Bonus by number of teammates holding the same talent.
/// Index 0 = nobody holds it; counts past the end use the last entry.
pub const TALENT_STACK_TABLE: [f64; 5] = [0.0, 0.10, 0.18, 0.24, 0.28];

/// Catalyst stacks add flat proc chance instead of a multiplier.
pub const CATALYST_STACK_TABLE: [f64; 5] = [0.0, 0.05, 0.09, 0.12, 0.14];

/// Look up a stacking bonus, capped at the table's last entry.
pub fn stack_bonus(table: &[f64], count: usize) -> f64 {
    match table.last() {
        Some(last) => table.get(count).copied().unwrap_or(*last),
        None => 0.0,
    }
}
