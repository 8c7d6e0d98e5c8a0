//! Events produced by one update of the interactive engine.
//!
//! The engine never talks to a display. It returns a [`TickResult`] and the
//! host maps the events to log lines, animations and refreshes.

use crate::combat::{
    CaptureAttempt, EncounterOutcome, EncounterState, EncounterTier, Side, StatusKind,
    TurnOutcome,
};

/// A single event produced by an engine update.
#[derive(Debug, Clone, PartialEq)]
pub enum TickEvent {
    // ── Encounter lifecycle ─────────────────────────────────────
    /// The encounter state machine moved.
    StateChanged {
        from: EncounterState,
        to: EncounterState,
    },

    /// A new enemy appeared.
    EncounterStarted {
        species: u32,
        name: String,
        level: u32,
        tier: EncounterTier,
        shiny: bool,
    },

    // ── Combat ──────────────────────────────────────────────────
    /// A scheduled turn was resolved.
    Attack(TurnOutcome),

    /// A status dealt damage or ran out.
    StatusTicked {
        side: Side,
        kind: StatusKind,
        damage: u32,
        expired: bool,
    },

    /// An elite or boss enemy became enraged.
    EnemyEnraged,

    /// The active player creature fainted and a teammate was sent in.
    PlayerSwapped { fainted: usize, next: usize },

    // ── Results ─────────────────────────────────────────────────
    /// The enemy was defeated and rewards were resolved.
    Victory(EncounterOutcome),

    /// The whole roster fainted.
    Defeat,

    /// The encounter hit the turn cap and was abandoned without rewards.
    TurnCapReached { turns: u32 },

    /// The player abandoned the encounter.
    Forfeited,

    /// A capture item was thrown.
    CaptureAttempted(CaptureAttempt),

    /// The roster recovered after a defeat.
    Recovered,
}

/// Everything that happened during one engine update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickResult {
    pub events: Vec<TickEvent>,
}

impl TickResult {
    pub fn push(&mut self, event: TickEvent) {
        self.events.push(event);
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn victories(&self) -> impl Iterator<Item = &EncounterOutcome> {
        self.events.iter().filter_map(|event| match event {
            TickEvent::Victory(outcome) => Some(outcome),
            _ => None,
        })
    }

    pub fn attacks(&self) -> impl Iterator<Item = &TurnOutcome> {
        self.events.iter().filter_map(|event| match event {
            TickEvent::Attack(turn) => Some(turn),
            _ => None,
        })
    }

    pub fn captures(&self) -> impl Iterator<Item = &CaptureAttempt> {
        self.events.iter().filter_map(|event| match event {
            TickEvent::CaptureAttempted(attempt) => Some(attempt),
            _ => None,
        })
    }

    pub fn state_changes(&self) -> impl Iterator<Item = (EncounterState, EncounterState)> + '_ {
        self.events.iter().filter_map(|event| match event {
            TickEvent::StateChanged { from, to } => Some((*from, *to)),
            _ => None,
        })
    }

    pub fn extend(&mut self, other: TickResult) {
        self.events.extend(other.events);
    }
}
