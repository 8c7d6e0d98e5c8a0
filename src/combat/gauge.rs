//! Action gauge (ATB) scheduling.
//!
//! Each side's gauge fills at `speed` units per millisecond. Crossing
//! [`GAUGE_THRESHOLD`] fires a turn and subtracts the threshold, so the
//! remainder carries into the next turn.

use super::Side;
use crate::core::constants::{BATCH_EPSILON_MS, GAUGE_THRESHOLD, MAX_TURNS_PER_ENCOUNTER};

/// Result of advancing both gauges by one time step.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GaugeAdvance {
    pub player_turns: u32,
    pub enemy_turns: u32,
    pub player_gauge: f64,
    pub enemy_gauge: f64,
}

impl GaugeAdvance {
    /// Turns fired this step in firing order. When both sides fire, the one
    /// that was closer to the threshold goes first, the player on a tie.
    ///
    /// No encounter outlives [`MAX_TURNS_PER_ENCOUNTER`], so each side
    /// contributes at most that many turns.
    pub fn firing_order(&self, player_first: bool) -> Vec<Side> {
        let (first, second, first_count, second_count) = if player_first {
            (Side::Player, Side::Enemy, self.player_turns, self.enemy_turns)
        } else {
            (Side::Enemy, Side::Player, self.enemy_turns, self.player_turns)
        };
        let first_count = first_count.min(MAX_TURNS_PER_ENCOUNTER);
        let second_count = second_count.min(MAX_TURNS_PER_ENCOUNTER);
        let mut order = Vec::with_capacity((first_count + second_count) as usize);
        let mut remaining = (first_count, second_count);
        while remaining.0 > 0 || remaining.1 > 0 {
            if remaining.0 > 0 {
                order.push(first);
                remaining.0 -= 1;
            }
            if remaining.1 > 0 {
                order.push(second);
                remaining.1 -= 1;
            }
        }
        order
    }
}

/// One analytic jump of batch scheduling.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchStep {
    pub delta_ms: f64,
    pub advance: GaugeAdvance,
    pub order: Vec<Side>,
}

/// Gauges and effective speeds of the two active combatants.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GaugeSnapshot {
    pub player_gauge: f64,
    pub enemy_gauge: f64,
    pub player_speed: f64,
    pub enemy_speed: f64,
}

impl GaugeSnapshot {
    pub fn advance(&self, delta_ms: f64) -> GaugeAdvance {
        advance(
            self.player_gauge,
            self.enemy_gauge,
            self.player_speed,
            self.enemy_speed,
            delta_ms,
        )
    }

    pub fn jump(&self) -> Option<BatchStep> {
        jump(
            self.player_gauge,
            self.enemy_gauge,
            self.player_speed,
            self.enemy_speed,
        )
    }

    /// The player reaches the threshold no later than the enemy.
    pub fn player_first(&self) -> bool {
        time_to_threshold(self.player_gauge, self.player_speed)
            <= time_to_threshold(self.enemy_gauge, self.enemy_speed)
    }
}

/// Corrupted gauges (NaN, infinite, negative) read as empty.
pub fn sanitize_gauge(gauge: f64) -> f64 {
    if gauge.is_finite() && gauge >= 0.0 {
        gauge
    } else {
        0.0
    }
}

fn sanitize_speed(speed: f64) -> f64 {
    if speed.is_finite() && speed > 0.0 {
        speed
    } else {
        0.0
    }
}

fn fill(gauge: f64, speed: f64, delta_ms: f64) -> (f64, u32) {
    let gauge = sanitize_gauge(sanitize_gauge(gauge) + sanitize_speed(speed) * delta_ms);
    if gauge < GAUGE_THRESHOLD {
        return (gauge, 0);
    }
    // `as` saturates at u32::MAX
    let turns = (gauge / GAUGE_THRESHOLD).floor() as u32;
    (gauge % GAUGE_THRESHOLD, turns)
}

/// Advances both gauges by `delta_ms` and counts the turns fired.
pub fn advance(
    player_gauge: f64,
    enemy_gauge: f64,
    player_speed: f64,
    enemy_speed: f64,
    delta_ms: f64,
) -> GaugeAdvance {
    let delta_ms = sanitize_gauge(delta_ms);
    let (player_gauge, player_turns) = fill(player_gauge, player_speed, delta_ms);
    let (enemy_gauge, enemy_turns) = fill(enemy_gauge, enemy_speed, delta_ms);
    GaugeAdvance {
        player_turns,
        enemy_turns,
        player_gauge,
        enemy_gauge,
    }
}

/// Milliseconds until a gauge reaches the threshold. Infinite for a side that
/// cannot move.
pub fn time_to_threshold(gauge: f64, speed: f64) -> f64 {
    let speed = sanitize_speed(speed);
    if speed == 0.0 {
        return f64::INFINITY;
    }
    (GAUGE_THRESHOLD - sanitize_gauge(gauge)).max(0.0) / speed
}

/// Milliseconds until the next turn on either side, `None` if neither side
/// can ever act.
pub fn next_turn_delta(
    player_gauge: f64,
    enemy_gauge: f64,
    player_speed: f64,
    enemy_speed: f64,
) -> Option<f64> {
    let delta = time_to_threshold(player_gauge, player_speed)
        .min(time_to_threshold(enemy_gauge, enemy_speed));
    delta.is_finite().then_some(delta)
}

/// Jumps straight to the next turn boundary (plus a small epsilon so a side
/// sitting exactly on the threshold still fires).
pub fn jump(
    player_gauge: f64,
    enemy_gauge: f64,
    player_speed: f64,
    enemy_speed: f64,
) -> Option<BatchStep> {
    let delta = next_turn_delta(player_gauge, enemy_gauge, player_speed, enemy_speed)?;
    let delta_ms = delta + BATCH_EPSILON_MS;
    let player_first = time_to_threshold(player_gauge, player_speed)
        <= time_to_threshold(enemy_gauge, enemy_speed);
    let advance = advance(
        player_gauge,
        enemy_gauge,
        player_speed,
        enemy_speed,
        delta_ms,
    );
    let order = advance.firing_order(player_first);
    Some(BatchStep {
        delta_ms,
        advance,
        order,
    })
}
