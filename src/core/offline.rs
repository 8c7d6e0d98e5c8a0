//! Offline catch-up.
//!
//! Replays the encounters missed while the player was away using the same
//! spawn, gauge, turn and reward code as interactive play, at batch speed.
//! The pass is bounded twice: absence is clamped to 72 hours and at most
//! 2,000 encounters are simulated.

use super::constants::*;
use crate::combat::context::{BattleContext, ContextClaim, EncounterState};
use crate::combat::gauge::time_to_threshold;
use crate::combat::outcome::{CaptureSummary, EncounterOutcome, OutcomeResolver, PerformanceTier, RewardMode};
use crate::combat::spawn::spawn_enemy;
use crate::combat::turn::{execute_scheduled_turn, tick_statuses, TurnResolution};
use crate::combat::Side;
use crate::config::CombatConfig;
use crate::creature::Party;
use crate::data::{AccountBonuses, CombatData};
use crate::zones::ZoneProgress;
use chrono::Utc;
use rand::Rng;
use std::collections::{BTreeMap, VecDeque};
use tracing::{info, warn};

/// Rolling window of recent interactive combat durations.
#[derive(Debug, Clone, Default)]
pub struct CombatHistory {
    durations: VecDeque<f64>,
}

impl CombatHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one combat duration. Nonsense values are ignored.
    pub fn record(&mut self, duration_ms: f64) {
        if !duration_ms.is_finite() || duration_ms <= 0.0 {
            return;
        }
        if self.durations.len() == COMBAT_HISTORY_WINDOW {
            self.durations.pop_front();
        }
        self.durations.push_back(duration_ms);
    }

    pub fn len(&self) -> usize {
        self.durations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.durations.is_empty()
    }

    pub fn average(&self) -> Option<f64> {
        if self.durations.is_empty() {
            return None;
        }
        Some(self.durations.iter().sum::<f64>() / self.durations.len() as f64)
    }
}

/// Shortest possible fight: the start delay plus one gauge fill.
pub fn minimum_combat_duration(start_delay_ms: f64, player_speed: f64) -> f64 {
    let fill = time_to_threshold(0.0, player_speed);
    if fill.is_finite() {
        start_delay_ms + fill
    } else {
        start_delay_ms
    }
}

/// Expected fight length: the rolling average (or the default) with a 10%
/// margin, never below `minimum_ms`.
pub fn estimate_combat_duration(history: &CombatHistory, minimum_ms: f64) -> f64 {
    let average = history.average().unwrap_or(DEFAULT_COMBAT_DURATION_MS);
    (average * COMBAT_DURATION_SAFETY_MARGIN).max(minimum_ms)
}

/// Encounters that fit into `elapsed_ms`, before the encounter cap.
pub fn candidate_encounter_count(elapsed_ms: u64, average_ms: f64, cooldown_ms: f64) -> u64 {
    let per_encounter = (average_ms + cooldown_ms).max(1.0);
    (elapsed_ms as f64 / per_encounter).floor() as u64
}

/// Clamps an absence to the 72-hour contract. Returns the clamped value and
/// whether clamping happened.
pub fn clamp_elapsed(elapsed_ms: u64) -> (u64, bool) {
    if elapsed_ms > MAX_OFFLINE_MS {
        (MAX_OFFLINE_MS, true)
    } else {
        (elapsed_ms, false)
    }
}

/// Aggregate of one catch-up pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatchupReport {
    /// Absence after clamping.
    pub elapsed_ms: u64,
    pub elapsed_clamped: bool,
    pub estimated_combat_ms: f64,
    pub encounters_planned: u32,
    pub encounter_cap_hit: bool,
    pub encounters_simulated: u32,
    pub won: u32,
    pub lost: u32,
    /// Encounters abandoned at the turn cap.
    pub stalemates: u32,
    pub exp: u64,
    pub currency: u64,
    pub items: BTreeMap<String, u32>,
    pub captures: Vec<CaptureSummary>,
    /// Captures beyond the summary cap (still applied to the party).
    pub captures_not_listed: u32,
    pub shards: u32,
    pub levels_gained: u32,
    pub tiers_advanced: u32,
    pub performance: BTreeMap<PerformanceTier, u32>,
    /// The roster ran out of living members before the plan finished.
    pub stopped_early: bool,
    /// Part of the absence not covered by simulated encounters.
    pub remaining_budget_ms: u64,
}

impl CatchupReport {
    pub fn record_victory(&mut self, outcome: EncounterOutcome, capture_cap: usize) {
        self.won += 1;
        self.exp += outcome.exp;
        self.currency += outcome.currency;
        for (item, count) in outcome.items {
            *self.items.entry(item).or_insert(0) += count;
        }
        if let Some(capture) = outcome.capture {
            if self.captures.len() < capture_cap {
                self.captures.push(capture);
            } else {
                self.captures_not_listed += 1;
            }
        }
        if let Some(tier) = outcome.performance {
            *self.performance.entry(tier).or_insert(0) += 1;
        }
        self.shards += outcome.shards;
        self.levels_gained += outcome.levels_gained;
        if outcome.tier_advanced {
            self.tiers_advanced += 1;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.encounters_simulated == 0
    }
}

/// Read-only collaborators for a catch-up pass.
#[derive(Clone, Copy)]
pub struct CatchupEnv<'a> {
    pub data: &'a dyn CombatData,
    pub bonuses: &'a dyn AccountBonuses,
    pub config: &'a CombatConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BatchResult {
    Victory,
    Defeat,
    Stalemate,
}

/// Plays the current encounter in `ctx` to the end with analytic gauge jumps.
/// Statuses tick once per simulated second, ahead of any turn due at the
/// same moment.
fn run_encounter(
    env: CatchupEnv<'_>,
    ctx: &mut BattleContext,
    party: &mut Party,
    rng: &mut impl Rng,
) -> BatchResult {
    let mut since_status_tick = 0.0;
    loop {
        if ctx.turns_taken >= MAX_TURNS_PER_ENCOUNTER {
            return BatchResult::Stalemate;
        }
        let Some(snapshot) = ctx.gauge_snapshot(party) else {
            return BatchResult::Stalemate;
        };
        let Some(step) = snapshot.jump() else {
            return BatchResult::Stalemate;
        };

        let until_status = STATUS_TICK_INTERVAL_MS - since_status_tick;
        let order = if until_status < step.delta_ms {
            let advance = snapshot.advance(until_status);
            ctx.store_gauges(party, &advance);
            since_status_tick = 0.0;
            match tick_statuses(ctx, party).1 {
                TurnResolution::EnemyDefeated => return BatchResult::Victory,
                TurnResolution::PlayerDefeated => return BatchResult::Defeat,
                _ => {}
            }
            advance.firing_order(snapshot.player_first())
        } else {
            ctx.store_gauges(party, &step.advance);
            since_status_tick += step.delta_ms;
            step.order
        };

        let mut swapped = false;
        for side in order {
            if swapped && side == Side::Player {
                continue;
            }
            let (_, resolution) =
                execute_scheduled_turn(ctx, party, side, env.data, env.bonuses, rng);
            match resolution {
                TurnResolution::EnemyDefeated => return BatchResult::Victory,
                TurnResolution::PlayerDefeated => return BatchResult::Defeat,
                TurnResolution::PlayerSwapped { .. } => swapped = true,
                TurnResolution::Continue | TurnResolution::Skipped => {}
            }
        }
    }
}

/// Runs a catch-up pass for an absence of `elapsed_ms`.
///
/// The interactive context is claimed for the duration of the pass and
/// restored afterwards. The roster is fully healed once at the end.
pub fn simulate(
    env: CatchupEnv<'_>,
    ctx: &mut BattleContext,
    party: &mut Party,
    progress: &mut ZoneProgress,
    history: &CombatHistory,
    elapsed_ms: u64,
    rng: &mut impl Rng,
) -> CatchupReport {
    let (elapsed_ms, elapsed_clamped) = clamp_elapsed(elapsed_ms);
    if elapsed_clamped {
        warn!(
            max_hours = MAX_OFFLINE_MS / 3_600_000,
            "Offline time exceeds the catch-up window, clamping"
        );
    }
    let mut report = CatchupReport {
        elapsed_ms,
        elapsed_clamped,
        remaining_budget_ms: elapsed_ms,
        ..Default::default()
    };
    if elapsed_ms == 0 {
        return report;
    }

    let lead_speed = ctx
        .player(party)
        .or_else(|| party.first_living().and_then(|i| party.team.get(i)))
        .map_or(0.0, |c| c.effective_speed());
    let minimum = minimum_combat_duration(env.config.start_delay_ms, lead_speed);
    let average = estimate_combat_duration(history, minimum);
    let per_encounter = average + env.config.cooldown_ms;
    let candidates = candidate_encounter_count(elapsed_ms, average, env.config.cooldown_ms);
    report.estimated_combat_ms = average;
    report.encounters_planned = candidates.min(MAX_CATCHUP_ENCOUNTERS as u64) as u32;
    if candidates > MAX_CATCHUP_ENCOUNTERS as u64 {
        report.encounter_cap_hit = true;
        warn!(
            candidates,
            cap = MAX_CATCHUP_ENCOUNTERS,
            "Catch-up encounter count capped"
        );
    }

    // Out-of-fight time per encounter, regenerated at the same 1 Hz cadence
    // as interactive play.
    let idle_ms = env.config.cooldown_ms + env.config.start_delay_ms;
    let mut regen_clock_ms = 0.0;

    {
        let mut claim = ContextClaim::new(ctx);
        let resolver = OutcomeResolver::new(env.data, env.bonuses, env.config, RewardMode::Batch);

        for _ in 0..report.encounters_planned {
            if !party.has_living() {
                report.stopped_early = true;
                break;
            }
            let (enemy, tier) = spawn_enemy(env.data, progress, env.config, rng);
            if let Err(err) = claim
                .begin(enemy, tier, party)
                .and_then(|_| claim.transition(EncounterState::Fighting))
            {
                warn!(%err, "Catch-up could not start an encounter");
                break;
            }

            let result = run_encounter(env, &mut claim, party, rng);
            report.encounters_simulated += 1;
            match result {
                BatchResult::Victory => {
                    if let Some(enemy) = claim.enemy.take() {
                        let outcome = resolver.resolve_victory(
                            &enemy,
                            claim.tier,
                            progress,
                            party,
                            claim.active,
                            rng,
                        );
                        report.record_victory(outcome, env.config.capture_summary_cap);
                    }
                }
                BatchResult::Defeat => report.lost += 1,
                BatchResult::Stalemate => report.stalemates += 1,
            }
            claim.reset(party);

            if party.has_living() {
                regen_clock_ms += idle_ms;
                while regen_clock_ms >= STATUS_TICK_INTERVAL_MS {
                    regen_clock_ms -= STATUS_TICK_INTERVAL_MS;
                    party.passive_regen(
                        env.config.passive_regen_percent,
                        env.config.stamina_regen_per_second,
                    );
                }
            }
        }
    }

    let consumed = report.encounters_simulated as f64 * per_encounter;
    report.remaining_budget_ms = (elapsed_ms as f64 - consumed).max(0.0) as u64;

    party.heal_all();

    if report.stalemates > 0 {
        warn!(
            stalemates = report.stalemates,
            turn_cap = MAX_TURNS_PER_ENCOUNTER,
            "Catch-up encounters hit the turn cap"
        );
    }
    info!(
        elapsed_ms = report.elapsed_ms,
        encounters = report.encounters_simulated,
        won = report.won,
        lost = report.lost,
        exp = report.exp,
        currency = report.currency,
        captures = report.captures.len() as u32 + report.captures_not_listed,
        stopped_early = report.stopped_early,
        "Offline catch-up complete"
    );
    report
}

/// Milliseconds since `last_seen_unix` (seconds), zero when the clock went
/// backwards. A timestamp too old to subtract reads as the offline cap.
pub fn elapsed_since(last_seen_unix: i64) -> u64 {
    let Some(elapsed_seconds) = Utc::now().timestamp().checked_sub(last_seen_unix) else {
        return MAX_OFFLINE_MS;
    };
    if elapsed_seconds <= 0 {
        return 0;
    }
    (elapsed_seconds as u64).saturating_mul(1000)
}
