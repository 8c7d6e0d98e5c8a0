//! Interactive combat engine.
//!
//! `CombatEngine` owns the party, the battle context and zone progress, and
//! advances them on every frame the host reports. Each update runs the 1 Hz
//! status task for every whole second that passed and then the frame task
//! (state timers, gauges, one paced turn). Everything observable comes back
//! as a [`TickResult`].
//!
//! The same engine runs offline catch-up through [`CombatEngine::catch_up`],
//! which claims the battle context for the duration of the batch pass.

use super::constants::MAX_TURNS_PER_ENCOUNTER;
use super::game_loop::{LoopTask, RunLoop};
use super::offline::{self, CatchupEnv, CatchupReport, CombatHistory};
use super::tick::{TickEvent, TickResult};
use crate::combat::context::{BattleContext, EncounterState};
use crate::combat::outcome::{OutcomeResolver, RewardMode};
use crate::combat::spawn::spawn_enemy;
use crate::combat::status::StatusKind;
use crate::combat::turn::{execute_scheduled_turn, tick_statuses, TurnResolution};
use crate::config::CombatConfig;
use crate::creature::Party;
use crate::data::{AccountBonuses, CombatData, GameData, StaticBonuses};
use crate::error::{CombatError, Result};
use crate::zones::ZoneProgress;
use rand::Rng;
use tracing::{debug, info, warn};

pub struct CombatEngine {
    party: Party,
    context: BattleContext,
    progress: ZoneProgress,
    data: Box<dyn CombatData>,
    bonuses: Box<dyn AccountBonuses>,
    config: CombatConfig,
    history: CombatHistory,
    run_loop: RunLoop,
}

impl CombatEngine {
    pub fn new(
        party: Party,
        progress: ZoneProgress,
        data: Box<dyn CombatData>,
        bonuses: Box<dyn AccountBonuses>,
        config: CombatConfig,
    ) -> Self {
        Self {
            party,
            context: BattleContext::new(),
            progress,
            data,
            bonuses,
            config,
            history: CombatHistory::new(),
            run_loop: RunLoop::new(),
        }
    }

    /// Engine on the built-in dataset with neutral account bonuses.
    pub fn with_builtin_data(party: Party, zone_id: u32) -> Self {
        Self::new(
            party,
            ZoneProgress::new(zone_id),
            Box::new(GameData::builtin()),
            Box::new(StaticBonuses::default()),
            CombatConfig::default(),
        )
    }

    pub fn set_bonuses(&mut self, bonuses: Box<dyn AccountBonuses>) {
        self.bonuses = bonuses;
    }

    pub fn set_config(&mut self, config: CombatConfig) {
        self.config = config;
    }

    pub fn party(&self) -> &Party {
        &self.party
    }

    pub fn party_mut(&mut self) -> &mut Party {
        &mut self.party
    }

    pub fn context(&self) -> &BattleContext {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut BattleContext {
        &mut self.context
    }

    pub fn state(&self) -> EncounterState {
        self.context.state
    }

    pub fn progress(&self) -> &ZoneProgress {
        &self.progress
    }

    pub fn progress_mut(&mut self) -> &mut ZoneProgress {
        &mut self.progress
    }

    pub fn config(&self) -> &CombatConfig {
        &self.config
    }

    pub fn history(&self) -> &CombatHistory {
        &self.history
    }

    pub fn data(&self) -> &dyn CombatData {
        self.data.as_ref()
    }

    /// Advances the engine by one frame of `delta_ms`.
    ///
    /// Negative or non-finite deltas count as zero and long frames are capped,
    /// so a stalled host cannot fast-forward a fight.
    pub fn update(&mut self, delta_ms: f64, rng: &mut impl Rng) -> TickResult {
        let delta_ms = clamp_frame_delta(delta_ms, self.config.frame_delta_cap_ms);
        let mut result = TickResult::default();
        for task in self.run_loop.due(delta_ms) {
            match task {
                LoopTask::StatusTick => self.second_tick(rng, &mut result),
                LoopTask::Frame => self.frame_tick(delta_ms, rng, &mut result),
            }
        }
        result
    }

    // ── 1 Hz task ───────────────────────────────────────────────

    fn second_tick(&mut self, rng: &mut impl Rng, result: &mut TickResult) {
        match self.context.state {
            EncounterState::Fighting => {
                let (ticks, resolution) = tick_statuses(&mut self.context, &mut self.party);
                for (side, tick) in ticks {
                    if let Some(kind) = tick.kind {
                        result.push(TickEvent::StatusTicked {
                            side,
                            kind,
                            damage: tick.damage,
                            expired: tick.expired,
                        });
                    }
                }
                self.apply_resolution(resolution, rng, result);
            }
            EncounterState::Waiting | EncounterState::Starting => self.party.passive_regen(
                self.config.passive_regen_percent,
                self.config.stamina_regen_per_second,
            ),
            EncounterState::Capture | EncounterState::Dead => {}
        }
    }

    // ── Frame task ──────────────────────────────────────────────

    fn frame_tick(&mut self, delta_ms: f64, rng: &mut impl Rng, result: &mut TickResult) {
        self.context.state_timer_ms += delta_ms;
        match self.context.state {
            EncounterState::Waiting => {
                if self.context.state_timer_ms >= self.config.cooldown_ms {
                    self.start_encounter(rng, result);
                }
            }
            EncounterState::Starting => {
                self.context.elapsed_ms += delta_ms;
                if self.context.state_timer_ms >= self.config.start_delay_ms {
                    self.enter(EncounterState::Fighting, result);
                }
            }
            EncounterState::Fighting => self.fight_frame(delta_ms, rng, result),
            EncounterState::Capture => {}
            EncounterState::Dead => {
                if self.context.state_timer_ms >= self.config.death_recovery_ms {
                    self.party.heal_all();
                    self.enter(EncounterState::Waiting, result);
                    result.push(TickEvent::Recovered);
                }
            }
        }
    }

    fn start_encounter(&mut self, rng: &mut impl Rng, result: &mut TickResult) {
        if !self.party.has_living() {
            return;
        }
        let (enemy, tier) = spawn_enemy(self.data.as_ref(), &self.progress, &self.config, rng);
        let started = TickEvent::EncounterStarted {
            species: enemy.species,
            name: enemy.name.clone(),
            level: enemy.level,
            tier,
            shiny: enemy.shiny,
        };
        match self.context.begin(enemy, tier, &mut self.party) {
            Ok(from) => {
                debug!(zone = self.progress.zone_id, ?tier, "Encounter started");
                result.push(started);
                result.push(TickEvent::StateChanged {
                    from,
                    to: EncounterState::Starting,
                });
            }
            Err(err) => warn!(%err, "Could not start encounter"),
        }
    }

    fn fight_frame(&mut self, delta_ms: f64, rng: &mut impl Rng, result: &mut TickResult) {
        self.context.elapsed_ms += delta_ms;
        self.context.since_last_turn_ms += delta_ms;

        // Gauges wait while earned turns are still queued.
        if self.context.pending_turns.is_empty() {
            if let Some(snapshot) = self.context.gauge_snapshot(&mut self.party) {
                let advance = snapshot.advance(delta_ms);
                self.context.store_gauges(&mut self.party, &advance);
                self.context
                    .pending_turns
                    .extend(advance.firing_order(snapshot.player_first()));
            }
        }

        if self.context.since_last_turn_ms < self.config.min_turn_delay_ms {
            return;
        }
        let Some(side) = self.context.pending_turns.pop_front() else {
            return;
        };
        self.context.since_last_turn_ms = 0.0;

        let was_enraged = self.enemy_enraged();
        let (outcome, resolution) = execute_scheduled_turn(
            &mut self.context,
            &mut self.party,
            side,
            self.data.as_ref(),
            self.bonuses.as_ref(),
            rng,
        );
        if let Some(outcome) = outcome {
            debug!(
                ?side,
                attacker = %outcome.attacker,
                defender = %outcome.defender,
                damage = outcome.damage,
                effectiveness = outcome.effectiveness,
                "Turn resolved"
            );
            result.push(TickEvent::Attack(outcome));
        }
        if !was_enraged && self.enemy_enraged() {
            result.push(TickEvent::EnemyEnraged);
        }
        self.apply_resolution(resolution, rng, result);

        if self.context.state == EncounterState::Fighting
            && self.context.turns_taken >= MAX_TURNS_PER_ENCOUNTER
        {
            let turns = self.context.turns_taken;
            warn!(turns, "Encounter hit the turn cap, abandoning it");
            result.push(TickEvent::TurnCapReached { turns });
            self.context.end_encounter(&mut self.party);
            self.enter(EncounterState::Waiting, result);
        }
    }

    fn enemy_enraged(&self) -> bool {
        self.context
            .enemy
            .as_ref()
            .and_then(|enemy| enemy.status)
            .is_some_and(|effect| effect.kind == StatusKind::Enraged)
    }

    fn apply_resolution(
        &mut self,
        resolution: TurnResolution,
        rng: &mut impl Rng,
        result: &mut TickResult,
    ) {
        match resolution {
            TurnResolution::EnemyDefeated => self.on_victory(rng, result),
            TurnResolution::PlayerSwapped { fainted, next } => {
                debug!(fainted, next, "Active creature fainted, swapping");
                result.push(TickEvent::PlayerSwapped { fainted, next });
            }
            TurnResolution::PlayerDefeated => self.on_defeat(result),
            TurnResolution::Continue | TurnResolution::Skipped => {}
        }
    }

    /// Pays out the current encounter. Leaving `Fighting` here makes a
    /// second call for the same enemy a no-op.
    fn on_victory(&mut self, rng: &mut impl Rng, result: &mut TickResult) {
        if self.context.state != EncounterState::Fighting {
            return;
        }
        let Some(enemy) = self.context.enemy.take() else {
            return;
        };
        self.history.record(self.context.elapsed_ms);

        let resolver = OutcomeResolver::new(
            self.data.as_ref(),
            self.bonuses.as_ref(),
            &self.config,
            RewardMode::Interactive,
        );
        let outcome = resolver.resolve_victory(
            &enemy,
            self.context.tier,
            &mut self.progress,
            &mut self.party,
            self.context.active,
            rng,
        );
        info!(
            species = enemy.species,
            level = enemy.level,
            tier = ?self.context.tier,
            exp = outcome.exp,
            currency = outcome.currency,
            duration_ms = self.context.elapsed_ms,
            "Encounter won"
        );
        result.push(TickEvent::Victory(outcome));

        let offer_capture = !self.bonuses.auto_capture() && self.party.capture_items_left() > 0;
        if offer_capture {
            self.context.pending_turns.clear();
            self.context.enemy = Some(enemy);
            self.enter(EncounterState::Capture, result);
        } else {
            self.context.end_encounter(&mut self.party);
            self.enter(EncounterState::Waiting, result);
        }
    }

    fn on_defeat(&mut self, result: &mut TickResult) {
        info!(zone = self.progress.zone_id, "Party defeated");
        result.push(TickEvent::Defeat);
        self.context.end_encounter(&mut self.party);
        self.enter(EncounterState::Dead, result);
    }

    /// Internal transitions follow the state machine; a rejected one is
    /// logged and the engine stays where it is.
    fn enter(&mut self, next: EncounterState, result: &mut TickResult) {
        match self.context.transition(next) {
            Ok(from) => result.push(TickEvent::StateChanged { from, to: next }),
            Err(err) => warn!(%err, ?next, "Rejected encounter transition"),
        }
    }

    // ── Player commands ─────────────────────────────────────────

    /// Abandons the current encounter without rewards.
    pub fn forfeit(&mut self) -> Result<TickResult> {
        if !self.context.state.in_encounter() {
            return Err(CombatError::InvalidState(self.context.state));
        }
        let mut result = TickResult::default();
        self.context.end_encounter(&mut self.party);
        let from = self.context.transition(EncounterState::Waiting)?;
        info!("Encounter forfeited");
        result.push(TickEvent::Forfeited);
        result.push(TickEvent::StateChanged {
            from,
            to: EncounterState::Waiting,
        });
        Ok(result)
    }

    /// Throws a capture item at the defeated enemy. Only valid in `Capture`;
    /// the encounter ends either way.
    pub fn attempt_capture(&mut self, rng: &mut impl Rng) -> Result<TickResult> {
        if self.context.state != EncounterState::Capture {
            return Err(CombatError::InvalidState(self.context.state));
        }
        let Some(enemy) = self.context.enemy.as_ref() else {
            return Err(CombatError::InvalidState(self.context.state));
        };
        let resolver = OutcomeResolver::new(
            self.data.as_ref(),
            self.bonuses.as_ref(),
            &self.config,
            RewardMode::Interactive,
        );
        let attempt = resolver
            .attempt_capture(enemy, &mut self.party, rng)
            .ok_or(CombatError::NoCaptureItems)?;
        info!(
            ball = ?attempt.ball,
            chance = attempt.chance,
            success = attempt.success,
            "Capture attempted"
        );
        let mut result = TickResult::default();
        result.push(TickEvent::CaptureAttempted(attempt));
        self.leave_capture(&mut result)?;
        Ok(result)
    }

    /// Leaves the capture prompt without throwing anything.
    pub fn flee(&mut self) -> Result<TickResult> {
        if self.context.state != EncounterState::Capture {
            return Err(CombatError::InvalidState(self.context.state));
        }
        let mut result = TickResult::default();
        self.leave_capture(&mut result)?;
        Ok(result)
    }

    fn leave_capture(&mut self, result: &mut TickResult) -> Result<()> {
        self.context.end_encounter(&mut self.party);
        let from = self.context.transition(EncounterState::Waiting)?;
        result.push(TickEvent::StateChanged {
            from,
            to: EncounterState::Waiting,
        });
        Ok(())
    }

    pub fn select_active(&mut self, slot: usize) -> Result<()> {
        self.context.select_active(&mut self.party, slot)
    }

    // ── Offline catch-up ────────────────────────────────────────

    /// Simulates `elapsed_ms` of absence in batch mode.
    pub fn catch_up(&mut self, elapsed_ms: u64, rng: &mut impl Rng) -> CatchupReport {
        let env = CatchupEnv {
            data: self.data.as_ref(),
            bonuses: self.bonuses.as_ref(),
            config: &self.config,
        };
        offline::simulate(
            env,
            &mut self.context,
            &mut self.party,
            &mut self.progress,
            &self.history,
            elapsed_ms,
            rng,
        )
    }

    /// Catch-up for the time since `last_seen_unix` (seconds).
    pub fn catch_up_since(&mut self, last_seen_unix: i64, rng: &mut impl Rng) -> CatchupReport {
        let elapsed_ms = offline::elapsed_since(last_seen_unix);
        self.catch_up(elapsed_ms, rng)
    }
}

fn clamp_frame_delta(delta_ms: f64, cap_ms: f64) -> f64 {
    if !delta_ms.is_finite() || delta_ms <= 0.0 {
        return 0.0;
    }
    delta_ms.min(cap_ms.max(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::creature::Combatant;
    use crate::data::BallKind;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn engine(level: u32) -> CombatEngine {
        let data = GameData::builtin();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let starter = Combatant::wild(&data, 4, level, &mut rng);
        let mut engine = CombatEngine::with_builtin_data(Party::new(vec![starter]), 1);
        engine.set_config(CombatConfig::instant());
        engine
    }

    fn run_until(
        engine: &mut CombatEngine,
        rng: &mut ChaCha8Rng,
        frames: usize,
        stop: impl Fn(&TickResult) -> bool,
    ) -> TickResult {
        let mut all = TickResult::default();
        for _ in 0..frames {
            let result = engine.update(16.0, rng);
            let done = stop(&result);
            all.extend(result);
            if done {
                break;
            }
        }
        all
    }

    #[test]
    fn test_frame_delta_clamped() {
        assert_eq!(clamp_frame_delta(f64::NAN, 1_000.0), 0.0);
        assert_eq!(clamp_frame_delta(-5.0, 1_000.0), 0.0);
        assert_eq!(clamp_frame_delta(60_000.0, 1_000.0), 1_000.0);
        assert_eq!(clamp_frame_delta(16.0, 1_000.0), 16.0);
    }

    #[test]
    fn test_spawns_and_starts_fighting() {
        let mut engine = engine(20);
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let result = engine.update(16.0, &mut rng);
        assert!(result
            .events
            .iter()
            .any(|e| matches!(e, TickEvent::EncounterStarted { .. })));
        assert_eq!(engine.state(), EncounterState::Starting);

        engine.update(16.0, &mut rng);
        assert_eq!(engine.state(), EncounterState::Fighting);
    }

    #[test]
    fn test_strong_party_wins_and_returns_to_waiting() {
        let mut engine = engine(60);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let all = run_until(&mut engine, &mut rng, 20_000, |r| r.victories().count() > 0);
        assert_eq!(all.victories().count(), 1, "exactly one victory expected");
        assert_eq!(engine.state(), EncounterState::Waiting);
        assert_eq!(engine.history().len(), 1);
        assert!(engine.progress().kills >= 1);
    }

    #[test]
    fn test_victory_offers_capture_with_items() {
        let mut engine = engine(60);
        engine.party_mut().add_capture_items(BallKind::Master, 1);
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        run_until(&mut engine, &mut rng, 20_000, |r| r.victories().count() > 0);
        assert_eq!(engine.state(), EncounterState::Capture);

        // Nothing happens while the prompt is open.
        let idle = engine.update(16.0, &mut rng);
        assert!(idle.attacks().next().is_none());

        let result = engine.attempt_capture(&mut rng).unwrap();
        let attempt = result.captures().next().unwrap();
        assert!(attempt.success);
        assert_eq!(attempt.ball, BallKind::Master);
        assert_eq!(
            result.state_changes().collect::<Vec<_>>(),
            vec![(EncounterState::Capture, EncounterState::Waiting)]
        );
        assert_eq!(engine.state(), EncounterState::Waiting);
        assert_eq!(engine.party().team.len(), 2);
    }

    #[test]
    fn test_commands_rejected_in_wrong_state() {
        let mut engine = engine(10);
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        assert!(matches!(
            engine.forfeit(),
            Err(CombatError::InvalidState(EncounterState::Waiting))
        ));
        assert!(engine.attempt_capture(&mut rng).is_err());
        assert!(engine.flee().is_err());
    }

    #[test]
    fn test_forfeit_skips_rewards() {
        let mut engine = engine(10);
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        engine.update(16.0, &mut rng);
        let result = engine.forfeit().unwrap();
        assert!(result.events.contains(&TickEvent::Forfeited));
        assert_eq!(engine.state(), EncounterState::Waiting);
        assert!(engine.context().enemy.is_none());
        assert_eq!(engine.progress().kills, 0);
    }

    #[test]
    fn test_defeat_then_recovery() {
        let mut engine = engine(1);
        let mut rng = ChaCha8Rng::seed_from_u64(13);
        engine.progress_mut().zone_id = 3;
        let all = run_until(&mut engine, &mut rng, 50_000, |r| {
            r.events.contains(&TickEvent::Defeat)
        });
        assert!(all.events.contains(&TickEvent::Defeat));
        assert_eq!(engine.state(), EncounterState::Dead);

        let recovered = run_until(&mut engine, &mut rng, 2_000, |r| {
            r.events.contains(&TickEvent::Recovered)
        });
        assert!(recovered.events.contains(&TickEvent::Recovered));
        assert!(engine.party().team[0].hp_fraction() >= 1.0);
    }

    #[test]
    fn test_passive_regen_between_fights() {
        let mut engine = engine(10);
        let mut config = CombatConfig::default();
        config.cooldown_ms = 60_000.0;
        engine.set_config(config);
        engine.party_mut().team[0].current_hp = 1;
        engine.party_mut().team[0].stamina = 0;
        let mut rng = ChaCha8Rng::seed_from_u64(17);
        engine.update(1_000.0, &mut rng);
        let member = &engine.party().team[0];
        assert!(member.current_hp > 1);
        assert!(member.stamina > 0);
    }

    #[test]
    fn test_catch_up_restores_interactive_context() {
        let mut engine = engine(40);
        let mut rng = ChaCha8Rng::seed_from_u64(19);
        engine.update(16.0, &mut rng);
        let before = engine.context().enemy.as_ref().map(|e| e.uid.clone());
        assert!(before.is_some());

        let report = engine.catch_up(60_000, &mut rng);
        assert!(report.encounters_simulated > 0);
        assert_eq!(engine.state(), EncounterState::Starting);
        assert_eq!(
            engine.context().enemy.as_ref().map(|e| e.uid.clone()),
            before
        );
    }
}
