//! Zone progression integration tests
//!
//! Kill counting, boss cadence, per-species mastery tiers and the level
//! growth they feed back into spawning.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tamer::combat::{spawn_enemy, EncounterTier};
use tamer::core::constants::BOSS_INTERVAL_KILLS;
use tamer::creature::{Combatant, Party};
use tamer::data::{CombatData, GameData};
use tamer::zones::ZoneProgress;
use tamer::{CombatConfig, CombatEngine};

fn no_elites() -> CombatConfig {
    CombatConfig {
        elite_chance: 0.0,
        ..Default::default()
    }
}

// ============================================================================
// Kill counting and bosses
// ============================================================================

#[test]
fn test_boss_every_interval_then_back_to_pool() {
    let data = GameData::builtin();
    let config = no_elites();
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let mut progress = ZoneProgress::new(1);

    let mut bosses = 0;
    for _ in 0..BOSS_INTERVAL_KILLS * 3 {
        let (enemy, tier) = spawn_enemy(&data, &progress, &config, &mut rng);
        if tier == EncounterTier::Boss {
            bosses += 1;
            assert_eq!(enemy.species, 12);
        }
        progress.record_kill(enemy.species, 5);
    }
    assert_eq!(bosses, 3);
}

#[test]
fn test_zone_without_boss_never_spawns_one() {
    let data = GameData::builtin();
    let config = no_elites();
    let mut rng = ChaCha8Rng::seed_from_u64(2);
    let mut progress = ZoneProgress::new(42);
    progress.kills = BOSS_INTERVAL_KILLS - 1;

    let (enemy, tier) = spawn_enemy(&data, &progress, &config, &mut rng);
    assert_eq!(tier, EncounterTier::Standard);
    assert_eq!(enemy.level, 5);
}

// ============================================================================
// Mastery
// ============================================================================

#[test]
fn test_mastery_after_every_species_maxed() {
    let data = GameData::builtin();
    let zone = data.zone(1).unwrap().clone();
    let mut progress = ZoneProgress::new(1);

    for species in &zone.species[..zone.species.len() - 1] {
        for _ in 0..zone.max_tier {
            progress.record_kill(*species, zone.max_tier);
        }
    }
    assert!(!progress.is_mastered(&zone));

    let last = *zone.species.last().unwrap();
    for _ in 0..zone.max_tier + 3 {
        progress.record_kill(last, zone.max_tier);
    }
    assert!(progress.is_mastered(&zone));
    assert_eq!(progress.tier(last), zone.max_tier, "tier is capped");
}

#[test]
fn test_mastered_species_spawn_higher() {
    let data = GameData::builtin();
    let config = no_elites();
    let zone = data.zone(1).unwrap().clone();
    let mut progress = ZoneProgress::new(1);
    for species in &zone.species {
        progress.species_tiers.insert(*species, zone.max_tier);
    }

    let mut rng = ChaCha8Rng::seed_from_u64(3);
    for _ in 0..50 {
        let (enemy, _) = spawn_enemy(&data, &progress, &config, &mut rng);
        assert!(enemy.level >= zone.base_level + zone.max_tier);
        assert!(enemy.level <= zone.base_level + zone.level_spread + zone.max_tier);
    }
}

#[test]
fn test_engine_victories_advance_tiers() {
    let data = GameData::builtin();
    let mut rng = ChaCha8Rng::seed_from_u64(4);
    let lead = Combatant::wild(&data, 4, 60, &mut rng);
    let mut engine = CombatEngine::with_builtin_data(Party::new(vec![lead]), 1);

    let report = engine.catch_up(3_600_000, &mut rng);
    assert_eq!(engine.progress().kills, report.won);
    assert!(report.tiers_advanced > 0);
    assert!(engine.progress().is_mastered(data.zone(1).unwrap()));
}
