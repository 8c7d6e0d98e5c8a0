use crate::core::constants::{DEFAULT_MOVE_NAME, DEFAULT_MOVE_POWER};
use crate::creature::stats::StatBlock;
use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ElementType {
    #[default]
    Normal,
    Fire,
    Water,
    Electric,
    Grass,
    Ice,
    Fighting,
    Poison,
    Ground,
    Flying,
    Psychic,
    Bug,
    Rock,
    Ghost,
    Dragon,
    Dark,
    Steel,
    Fairy,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    #[default]
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    pub fn index(&self) -> u32 {
        match self {
            Rarity::Common => 0,
            Rarity::Uncommon => 1,
            Rarity::Rare => 2,
            Rarity::Epic => 3,
            Rarity::Legendary => 4,
        }
    }
}

/// Capture item kinds, ordered from weakest to strongest.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum BallKind {
    #[default]
    Basic,
    Great,
    Ultra,
    Master,
}

impl BallKind {
    pub const ALL: [BallKind; 4] = [
        BallKind::Basic,
        BallKind::Great,
        BallKind::Ultra,
        BallKind::Master,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveCategory {
    #[default]
    Physical,
    Special,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveInfo {
    pub name: String,
    pub element: ElementType,
    pub power: u32,
    #[serde(default)]
    pub category: MoveCategory,
}

impl MoveInfo {
    /// Fallback move used whenever a species' move cannot be resolved.
    pub fn charge() -> Self {
        Self {
            name: DEFAULT_MOVE_NAME.to_string(),
            element: ElementType::Normal,
            power: DEFAULT_MOVE_POWER,
            category: MoveCategory::Physical,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciesInfo {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub primary_type: ElementType,
    #[serde(default)]
    pub secondary_type: Option<ElementType>,
    pub base_stats: StatBlock,
    #[serde(default)]
    pub rarity: Rarity,
    #[serde(default = "default_move_name")]
    pub default_move: String,
}

fn default_move_name() -> String {
    DEFAULT_MOVE_NAME.to_string()
}

impl SpeciesInfo {
    /// Neutral stand-in for species missing from the dataset.
    pub fn fallback(id: u32) -> Self {
        Self {
            id,
            name: format!("Unknown #{}", id),
            primary_type: ElementType::Normal,
            secondary_type: None,
            base_stats: StatBlock::uniform(50),
            rarity: Rarity::Common,
            default_move: default_move_name(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropEntry {
    pub item: String,
    pub chance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneInfo {
    pub id: u32,
    pub name: String,
    pub base_level: u32,
    #[serde(default)]
    pub level_spread: u32,
    #[serde(default)]
    pub species: Vec<u32>,
    #[serde(default)]
    pub boss: Option<u32>,
    pub currency_min: u64,
    pub currency_max: u64,
    /// Cap for the per-species mastery tier counter.
    pub max_tier: u32,
    #[serde(default)]
    pub drops: Vec<DropEntry>,
    #[serde(default)]
    pub egg_chance: f64,
}

impl ZoneInfo {
    /// Neutral stand-in for zones missing from the dataset.
    pub fn fallback(id: u32) -> Self {
        Self {
            id,
            name: format!("Zone {}", id),
            base_level: 5,
            level_spread: 0,
            species: Vec::new(),
            boss: None,
            currency_min: 1,
            currency_max: 1,
            max_tier: 1,
            drops: Vec::new(),
            egg_chance: 0.0,
        }
    }
}
