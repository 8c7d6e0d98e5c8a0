//! Bundled dataset used when the host does not supply its own.

use super::game_data::*;
use super::types::*;
use crate::combat::status::StatusKind;
use crate::creature::stats::StatBlock;

use super::types::ElementType::*;

// (attacking type, super effective against, not very effective against, no effect on)
type ChartRow = (
    ElementType,
    &'static [ElementType],
    &'static [ElementType],
    &'static [ElementType],
);

const TYPE_CHART: [ChartRow; 18] = [
    (Normal, &[], &[Rock, Steel], &[Ghost]),
    (Fire, &[Grass, Ice, Bug, Steel], &[Fire, Water, Rock, Dragon], &[]),
    (Water, &[Fire, Ground, Rock], &[Water, Grass, Dragon], &[]),
    (Electric, &[Water, Flying], &[Electric, Grass, Dragon], &[Ground]),
    (
        Grass,
        &[Water, Ground, Rock],
        &[Fire, Grass, Poison, Flying, Bug, Dragon, Steel],
        &[],
    ),
    (Ice, &[Grass, Ground, Flying, Dragon], &[Fire, Water, Ice, Steel], &[]),
    (
        Fighting,
        &[Normal, Ice, Rock, Dark, Steel],
        &[Poison, Flying, Psychic, Bug, Fairy],
        &[Ghost],
    ),
    (Poison, &[Grass, Fairy], &[Poison, Ground, Rock, Ghost], &[Steel]),
    (Ground, &[Fire, Electric, Poison, Rock, Steel], &[Grass, Bug], &[Flying]),
    (Flying, &[Grass, Fighting, Bug], &[Electric, Rock, Steel], &[]),
    (Psychic, &[Fighting, Poison], &[Psychic, Steel], &[Dark]),
    (
        Bug,
        &[Grass, Psychic, Dark],
        &[Fire, Fighting, Poison, Flying, Ghost, Steel, Fairy],
        &[],
    ),
    (Rock, &[Fire, Ice, Flying, Bug], &[Fighting, Ground, Steel], &[]),
    (Ghost, &[Psychic, Ghost], &[Dark], &[Normal]),
    (Dragon, &[Dragon], &[Steel], &[Fairy]),
    (Dark, &[Psychic, Ghost], &[Fighting, Dark, Fairy], &[]),
    (Steel, &[Ice, Rock, Fairy], &[Fire, Water, Electric, Steel], &[]),
    (Fairy, &[Fighting, Dragon, Dark], &[Fire, Poison, Steel], &[]),
];

// (id, name, primary, secondary, base stats, rarity, move)
type SpeciesRow = (
    u32,
    &'static str,
    ElementType,
    Option<ElementType>,
    StatBlock,
    Rarity,
    &'static str,
);

const SPECIES: [SpeciesRow; 17] = [
    (1, "Sproutling", Grass, Some(Poison), StatBlock::new(45, 49, 65, 49, 65, 45), Rarity::Common, "Vine Lash"),
    (2, "Emberpup", Fire, None, StatBlock::new(39, 52, 60, 43, 50, 65), Rarity::Common, "Ember"),
    (3, "Ripplet", Water, None, StatBlock::new(44, 48, 50, 65, 64, 43), Rarity::Common, "Water Jet"),
    (4, "Voltmouse", Electric, None, StatBlock::new(35, 55, 50, 40, 50, 90), Rarity::Uncommon, "Spark"),
    (5, "Pebblit", Rock, Some(Ground), StatBlock::new(40, 80, 30, 100, 30, 20), Rarity::Common, "Rock Toss"),
    (6, "Gustling", Normal, Some(Flying), StatBlock::new(40, 45, 35, 40, 35, 56), Rarity::Common, "Gust"),
    (7, "Toxibug", Bug, Some(Poison), StatBlock::new(40, 35, 20, 30, 20, 50), Rarity::Common, "Poison Sting"),
    (8, "Frostkit", Ice, None, StatBlock::new(50, 45, 70, 45, 60, 70), Rarity::Uncommon, "Ice Shard"),
    (9, "Shadewisp", Ghost, None, StatBlock::new(30, 35, 100, 30, 35, 80), Rarity::Rare, "Shadow Sneak"),
    (10, "Brawlet", Fighting, None, StatBlock::new(70, 80, 35, 50, 35, 35), Rarity::Uncommon, "Karate Chop"),
    (11, "Mindmoth", Psychic, Some(Bug), StatBlock::new(60, 45, 90, 50, 80, 70), Rarity::Rare, "Confusion"),
    (12, "Ironshell", Steel, None, StatBlock::new(50, 85, 40, 120, 50, 30), Rarity::Rare, "Metal Claw"),
    (13, "Drakeling", Dragon, None, StatBlock::new(61, 84, 60, 65, 60, 70), Rarity::Epic, "Dragon Breath"),
    (14, "Pixiebell", Fairy, None, StatBlock::new(70, 45, 60, 48, 65, 35), Rarity::Uncommon, "Fairy Wind"),
    (15, "Nightfang", Dark, None, StatBlock::new(55, 70, 40, 55, 45, 75), Rarity::Uncommon, "Bite"),
    (16, "Tidalord", Water, Some(Dragon), StatBlock::new(100, 90, 110, 90, 100, 80), Rarity::Legendary, "Hydro Pump"),
    (17, "Magmaw", Fire, Some(Ground), StatBlock::new(85, 100, 80, 90, 75, 60), Rarity::Epic, "Flame Crash"),
];

// (name, element, power, category)
const MOVES: [(&str, ElementType, u32, MoveCategory); 18] = [
    ("Charge", Normal, 50, MoveCategory::Physical),
    ("Vine Lash", Grass, 45, MoveCategory::Physical),
    ("Ember", Fire, 40, MoveCategory::Special),
    ("Water Jet", Water, 40, MoveCategory::Special),
    ("Spark", Electric, 65, MoveCategory::Physical),
    ("Rock Toss", Rock, 50, MoveCategory::Physical),
    ("Gust", Flying, 40, MoveCategory::Special),
    ("Poison Sting", Poison, 35, MoveCategory::Physical),
    ("Ice Shard", Ice, 40, MoveCategory::Physical),
    ("Shadow Sneak", Ghost, 40, MoveCategory::Physical),
    ("Karate Chop", Fighting, 50, MoveCategory::Physical),
    ("Confusion", Psychic, 50, MoveCategory::Special),
    ("Metal Claw", Steel, 50, MoveCategory::Physical),
    ("Dragon Breath", Dragon, 60, MoveCategory::Special),
    ("Fairy Wind", Fairy, 40, MoveCategory::Special),
    ("Bite", Dark, 60, MoveCategory::Physical),
    ("Hydro Pump", Water, 110, MoveCategory::Special),
    ("Flame Crash", Fire, 90, MoveCategory::Physical),
];

fn type_chart() -> Vec<Matchup> {
    let mut matchups = Vec::new();
    for (attack, strong, weak, immune) in TYPE_CHART {
        let rows = [(strong, 2.0), (weak, 0.5), (immune, 0.0)];
        for (defenders, multiplier) in rows {
            matchups.extend(defenders.iter().map(|defend| Matchup {
                attack,
                defend: *defend,
                multiplier,
            }));
        }
    }
    matchups
}

fn species() -> Vec<SpeciesInfo> {
    SPECIES
        .iter()
        .map(
            |(id, name, primary, secondary, base_stats, rarity, mv)| SpeciesInfo {
                id: *id,
                name: name.to_string(),
                primary_type: *primary,
                secondary_type: *secondary,
                base_stats: *base_stats,
                rarity: *rarity,
                default_move: mv.to_string(),
            },
        )
        .collect()
}

fn moves() -> Vec<MoveInfo> {
    MOVES
        .iter()
        .map(|(name, element, power, category)| MoveInfo {
            name: name.to_string(),
            element: *element,
            power: *power,
            category: *category,
        })
        .collect()
}

fn drops(entries: &[(&str, f64)]) -> Vec<DropEntry> {
    entries
        .iter()
        .map(|(item, chance)| DropEntry {
            item: item.to_string(),
            chance: *chance,
        })
        .collect()
}

fn zones() -> Vec<ZoneInfo> {
    vec![
        ZoneInfo {
            id: 1,
            name: "Verdant Meadow".to_string(),
            base_level: 3,
            level_spread: 3,
            species: vec![1, 2, 3, 6, 7],
            boss: Some(12),
            currency_min: 5,
            currency_max: 12,
            max_tier: 5,
            drops: drops(&[("potion", 0.08), ("berry", 0.12)]),
            egg_chance: 0.01,
        },
        ZoneInfo {
            id: 2,
            name: "Ember Ridge".to_string(),
            base_level: 15,
            level_spread: 5,
            species: vec![2, 4, 5, 10, 15],
            boss: Some(17),
            currency_min: 20,
            currency_max: 45,
            max_tier: 8,
            drops: drops(&[("potion", 0.08), ("fire_stone", 0.02), ("great_ball", 0.04)]),
            egg_chance: 0.012,
        },
        ZoneInfo {
            id: 3,
            name: "Frostfall Hollow".to_string(),
            base_level: 30,
            level_spread: 6,
            species: vec![8, 9, 11, 12, 14],
            boss: Some(16),
            currency_min: 60,
            currency_max: 120,
            max_tier: 10,
            drops: drops(&[("super_potion", 0.06), ("ice_stone", 0.02), ("ultra_ball", 0.03)]),
            egg_chance: 0.015,
        },
    ]
}

pub(super) fn builtin_file() -> GameDataFile {
    GameDataFile {
        species: species(),
        moves: moves(),
        matchups: type_chart(),
        catch_rates: vec![
            CatchRateEntry { rarity: Rarity::Common, rate: 0.45 },
            CatchRateEntry { rarity: Rarity::Uncommon, rate: 0.30 },
            CatchRateEntry { rarity: Rarity::Rare, rate: 0.15 },
            CatchRateEntry { rarity: Rarity::Epic, rate: 0.06 },
            CatchRateEntry { rarity: Rarity::Legendary, rate: 0.02 },
        ],
        balls: vec![
            BallEntry { ball: BallKind::Basic, multiplier: 1.0 },
            BallEntry { ball: BallKind::Great, multiplier: 1.5 },
            BallEntry { ball: BallKind::Ultra, multiplier: 2.0 },
            BallEntry { ball: BallKind::Master, multiplier: 255.0 },
        ],
        status_affinities: vec![
            StatusAffinity { element: Fire, status: StatusKind::Burn },
            StatusAffinity { element: Poison, status: StatusKind::Poison },
            StatusAffinity { element: Electric, status: StatusKind::Paralysis },
        ],
        proc_chances: vec![
            ProcChanceEntry { status: StatusKind::Burn, chance: 0.10 },
            ProcChanceEntry { status: StatusKind::Poison, chance: 0.15 },
            ProcChanceEntry { status: StatusKind::Paralysis, chance: 0.10 },
        ],
        zones: zones(),
    }
}
