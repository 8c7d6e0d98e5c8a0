//! Per-zone kill counter and per-species mastery tiers.

use crate::data::ZoneInfo;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Tracks the player's progress through one zone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ZoneProgress {
    pub zone_id: u32,
    /// Victories in this zone, drives the boss interval.
    pub kills: u32,
    /// Species id -> mastery tier.
    #[serde(default)]
    pub species_tiers: BTreeMap<u32, u32>,
}

impl ZoneProgress {
    pub fn new(zone_id: u32) -> Self {
        Self {
            zone_id,
            ..Default::default()
        }
    }

    pub fn tier(&self, species: u32) -> u32 {
        self.species_tiers.get(&species).copied().unwrap_or(0)
    }

    /// Counts a victory over `species`. Returns true when its tier advanced.
    pub fn record_kill(&mut self, species: u32, max_tier: u32) -> bool {
        self.kills = self.kills.saturating_add(1);
        let tier = self.species_tiers.entry(species).or_insert(0);
        if *tier < max_tier {
            *tier += 1;
            true
        } else {
            false
        }
    }

    /// Whether the next victory lands on a boss kill.
    pub fn boss_due(&self, interval: u32) -> bool {
        interval > 0 && (self.kills + 1) % interval == 0
    }

    /// Every species in the zone's pool has reached the zone's max tier.
    pub fn is_mastered(&self, zone: &ZoneInfo) -> bool {
        !zone.species.is_empty()
            && zone
                .species
                .iter()
                .all(|species| self.tier(*species) >= zone.max_tier)
    }
}
