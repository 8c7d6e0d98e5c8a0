//! The battle context: who is fighting whom, and the encounter state machine.

use super::gauge::{GaugeAdvance, GaugeSnapshot};
use super::{status, Side};
use crate::creature::{Combatant, Party};
use crate::error::{CombatError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, VecDeque};
use std::ops::{Deref, DerefMut};

/// Encounter lifecycle:
/// `Waiting -> Starting -> Fighting -> {Capture | Dead} -> Waiting`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EncounterState {
    /// Cooling down between encounters.
    #[default]
    Waiting,
    /// Enemy spawned, gauges not yet running.
    Starting,
    Fighting,
    /// Enemy defeated, player may attempt a capture or flee.
    Capture,
    /// Whole roster fainted, recovering.
    Dead,
}

impl EncounterState {
    pub fn can_transition_to(&self, next: EncounterState) -> bool {
        use EncounterState::*;
        matches!(
            (self, next),
            (Waiting, Starting)
                | (Starting, Fighting)
                | (Starting, Waiting)
                | (Fighting, Capture)
                | (Fighting, Dead)
                | (Fighting, Waiting)
                | (Capture, Waiting)
                | (Dead, Waiting)
        )
    }

    pub fn in_encounter(&self) -> bool {
        matches!(self, EncounterState::Starting | EncounterState::Fighting)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EncounterTier {
    #[default]
    Standard,
    Elite,
    Boss,
}

impl EncounterTier {
    /// Elite and boss enemies enrage at low HP.
    pub fn can_enrage(&self) -> bool {
        !matches!(self, EncounterTier::Standard)
    }
}

/// One player slot against one enemy, plus per-encounter bookkeeping.
#[derive(Debug, Clone, Default)]
pub struct BattleContext {
    pub state: EncounterState,
    pub enemy: Option<Combatant>,
    pub tier: EncounterTier,
    /// Index into the party team of the active player creature.
    pub active: usize,
    /// Slots that fainted during this encounter.
    pub fainted: BTreeSet<usize>,
    pub turns_taken: u32,
    /// Time since the encounter started (Starting + Fighting).
    pub elapsed_ms: f64,
    /// Time spent in the current state.
    pub state_timer_ms: f64,
    pub since_last_turn_ms: f64,
    /// Turns that crossed the threshold but have not been resolved yet.
    pub pending_turns: VecDeque<Side>,
}

impl BattleContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves to `next`, returning the previous state.
    pub fn transition(&mut self, next: EncounterState) -> Result<EncounterState> {
        if !self.state.can_transition_to(next) {
            return Err(CombatError::InvalidState(self.state));
        }
        let previous = self.state;
        self.state = next;
        self.state_timer_ms = 0.0;
        Ok(previous)
    }

    /// Sets up a new encounter against `enemy` and enters `Starting`.
    pub fn begin(
        &mut self,
        mut enemy: Combatant,
        tier: EncounterTier,
        party: &mut Party,
    ) -> Result<EncounterState> {
        let previous = self.transition(EncounterState::Starting)?;
        enemy.gauge = 0.0;
        self.enemy = Some(enemy);
        self.tier = tier;
        self.fainted.clear();
        self.turns_taken = 0;
        self.elapsed_ms = 0.0;
        self.since_last_turn_ms = 0.0;
        self.pending_turns.clear();

        let active_alive = party.team.get(self.active).is_some_and(|c| c.is_alive());
        if !active_alive {
            self.active = party.first_living().unwrap_or(0);
        }
        for member in &mut party.team {
            member.gauge = 0.0;
        }
        Ok(previous)
    }

    pub fn player<'a>(&self, party: &'a Party) -> Option<&'a Combatant> {
        party.team.get(self.active)
    }

    /// Gauges and effective speeds of both active combatants. Corrupted
    /// gauges are reset first.
    pub fn gauge_snapshot(&mut self, party: &mut Party) -> Option<GaugeSnapshot> {
        let player = party.team.get_mut(self.active)?;
        let enemy = self.enemy.as_mut()?;
        player.sanitize_gauge();
        enemy.sanitize_gauge();
        Some(GaugeSnapshot {
            player_gauge: player.gauge,
            enemy_gauge: enemy.gauge,
            player_speed: player.effective_speed(),
            enemy_speed: enemy.effective_speed(),
        })
    }

    pub fn store_gauges(&mut self, party: &mut Party, advance: &GaugeAdvance) {
        if let Some(player) = party.team.get_mut(self.active) {
            player.gauge = advance.player_gauge;
        }
        if let Some(enemy) = self.enemy.as_mut() {
            enemy.gauge = advance.enemy_gauge;
        }
    }

    /// Clears everything the finished encounter left behind. Statuses do not
    /// outlive a fight.
    pub fn end_encounter(&mut self, party: &mut Party) {
        for member in &mut party.team {
            status::clear(member);
            member.gauge = 0.0;
        }
        self.enemy = None;
        self.tier = EncounterTier::Standard;
        self.fainted.clear();
        self.pending_turns.clear();
        self.turns_taken = 0;
        self.since_last_turn_ms = 0.0;
    }

    /// Ends the encounter without notifications and returns to `Waiting`.
    pub fn reset(&mut self, party: &mut Party) {
        self.end_encounter(party);
        self.state = EncounterState::Waiting;
        self.state_timer_ms = 0.0;
    }

    /// Marks the active slot as fainted and swaps in the next living
    /// teammate. Returns the new slot, or `None` when nobody is left.
    pub fn handle_player_faint(&mut self, party: &mut Party) -> Option<usize> {
        if let Some(fainted) = party.team.get_mut(self.active) {
            status::clear(fainted);
            fainted.gauge = 0.0;
        }
        self.fainted.insert(self.active);
        self.pending_turns.retain(|side| *side != Side::Player);

        let next = party.next_living(&self.fainted)?;
        self.active = next;
        if let Some(incoming) = party.team.get_mut(next) {
            incoming.gauge = 0.0;
        }
        Some(next)
    }

    /// Manually switches the active creature.
    pub fn select_active(&mut self, party: &mut Party, slot: usize) -> Result<()> {
        let Some(candidate) = party.team.get(slot) else {
            return Err(CombatError::InvalidSlot(slot));
        };
        if self.state.in_encounter() && self.fainted.contains(&slot) {
            return Err(CombatError::SlotFainted(slot));
        }
        if !candidate.is_alive() {
            return Err(CombatError::SlotUnavailable(slot));
        }
        if slot == self.active {
            return Ok(());
        }

        if let Some(outgoing) = party.team.get_mut(self.active) {
            status::clear(outgoing);
            outgoing.gauge = 0.0;
        }
        self.pending_turns.retain(|side| *side != Side::Player);
        self.active = slot;
        Ok(())
    }
}

/// Exclusive claim on a battle context for a batch run.
///
/// The claimed context is set aside and the holder works on a fresh one
/// through `Deref`. The original is put back when the claim drops, on every
/// exit path.
pub struct ContextClaim<'a> {
    home: &'a mut BattleContext,
    saved: BattleContext,
}

impl<'a> ContextClaim<'a> {
    pub fn new(home: &'a mut BattleContext) -> Self {
        let saved = std::mem::take(home);
        // Start from the player's current slot so the batch run fights with
        // the same lead creature.
        home.active = saved.active;
        Self { home, saved }
    }

    /// The context that will be restored.
    pub fn saved(&self) -> &BattleContext {
        &self.saved
    }
}

impl Deref for ContextClaim<'_> {
    type Target = BattleContext;

    fn deref(&self) -> &BattleContext {
        &*self.home
    }
}

impl DerefMut for ContextClaim<'_> {
    fn deref_mut(&mut self) -> &mut BattleContext {
        &mut *self.home
    }
}

impl Drop for ContextClaim<'_> {
    fn drop(&mut self) {
        *self.home = std::mem::take(&mut self.saved);
    }
}
