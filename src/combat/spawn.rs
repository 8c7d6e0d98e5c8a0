use super::EncounterTier;
use crate::config::CombatConfig;
use crate::core::constants::{BOSS_LEVEL_BONUS, ELITE_LEVEL_BONUS, MAX_LEVEL};
use crate::creature::Combatant;
use crate::data::{CombatData, ZoneInfo};
use crate::zones::ZoneProgress;
use rand::seq::SliceRandom;
use rand::Rng;

/// Spawns the next enemy for the zone in `progress`.
///
/// Every `boss_interval`th kill fights the zone boss when the zone has one;
/// other spawns roll for elite. Level grows with the species' mastery tier.
/// Unknown zones and species fall back to neutral data.
pub fn spawn_enemy(
    data: &dyn CombatData,
    progress: &ZoneProgress,
    config: &CombatConfig,
    rng: &mut impl Rng,
) -> (Combatant, EncounterTier) {
    let fallback;
    let zone = match data.zone(progress.zone_id) {
        Some(zone) => zone,
        None => {
            fallback = ZoneInfo::fallback(progress.zone_id);
            &fallback
        }
    };

    let (species, tier) = match zone.boss {
        Some(boss) if progress.boss_due(config.boss_interval) => (boss, EncounterTier::Boss),
        _ => {
            let species = zone.species.choose(rng).copied().unwrap_or(0);
            let tier = if rng.gen::<f64>() < config.elite_chance {
                EncounterTier::Elite
            } else {
                EncounterTier::Standard
            };
            (species, tier)
        }
    };

    let tier_bonus = match tier {
        EncounterTier::Standard => 0,
        EncounterTier::Elite => ELITE_LEVEL_BONUS,
        EncounterTier::Boss => BOSS_LEVEL_BONUS,
    };
    let level = (zone.base_level
        + rng.gen_range(0..=zone.level_spread)
        + progress.tier(species)
        + tier_bonus)
        .clamp(1, MAX_LEVEL);

    let mut enemy = Combatant::wild(data, species, level, rng);
    enemy.shiny = rng.gen::<f64>() < config.shiny_chance;
    (enemy, tier)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::BOSS_INTERVAL_KILLS;
    use crate::data::{GameData, GameDataFile};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_spawn_from_zone_pool() {
        let data = GameData::builtin();
        let zone = data.zone(1).unwrap().clone();
        let config = CombatConfig {
            elite_chance: 0.0,
            ..Default::default()
        };
        let progress = ZoneProgress::new(1);
        let mut rng = ChaCha8Rng::seed_from_u64(42);

        for _ in 0..50 {
            let (enemy, tier) = spawn_enemy(&data, &progress, &config, &mut rng);
            assert!(zone.species.contains(&enemy.species));
            assert_eq!(tier, EncounterTier::Standard);
            assert!(enemy.level >= zone.base_level);
            assert!(enemy.level <= zone.base_level + zone.level_spread);
            assert_eq!(enemy.current_hp, enemy.max_hp());
        }
    }

    #[test]
    fn test_boss_on_interval() {
        let data = GameData::builtin();
        let mut progress = ZoneProgress::new(1);
        progress.kills = BOSS_INTERVAL_KILLS - 1;
        let config = CombatConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let (enemy, tier) = spawn_enemy(&data, &progress, &config, &mut rng);
        assert_eq!(tier, EncounterTier::Boss);
        assert_eq!(Some(enemy.species), data.zone(1).unwrap().boss);
    }

    #[test]
    fn test_elite_always_with_full_chance() {
        let data = GameData::builtin();
        let config = CombatConfig {
            elite_chance: 1.0,
            ..Default::default()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let (_, tier) = spawn_enemy(&data, &ZoneProgress::new(1), &config, &mut rng);
        assert_eq!(tier, EncounterTier::Elite);
    }

    #[test]
    fn test_unknown_zone_falls_back() {
        let data = GameData::default();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let config = CombatConfig {
            elite_chance: 0.0,
            ..Default::default()
        };
        let (enemy, _) = spawn_enemy(&data, &ZoneProgress::new(77), &config, &mut rng);
        assert!(enemy.is_alive());
        assert_eq!(enemy.level, ZoneInfo::fallback(77).base_level);
    }

    #[test]
    fn test_mastery_tier_raises_level() {
        let mut data_file = GameDataFile::default();
        let mut zone = ZoneInfo::fallback(1);
        zone.species = vec![3];
        zone.max_tier = 10;
        data_file.zones.push(zone);
        let data = GameData::from(data_file);

        let mut progress = ZoneProgress::new(1);
        for _ in 0..4 {
            progress.record_kill(3, 10);
        }
        let config = CombatConfig {
            elite_chance: 0.0,
            boss_interval: 0,
            ..Default::default()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let (enemy, _) = spawn_enemy(&data, &progress, &config, &mut rng);
        assert_eq!(enemy.level, ZoneInfo::fallback(1).base_level + 4);
    }
}
