use super::builtin;
use super::types::*;
use super::CombatData;
use crate::combat::status::StatusKind;
use crate::core::constants::DEFAULT_CATCH_RATE;
use crate::error::{CombatError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matchup {
    pub attack: ElementType,
    pub defend: ElementType,
    pub multiplier: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatchRateEntry {
    pub rarity: Rarity,
    pub rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BallEntry {
    pub ball: BallKind,
    pub multiplier: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusAffinity {
    pub element: ElementType,
    pub status: StatusKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcChanceEntry {
    pub status: StatusKind,
    pub chance: f64,
}

/// On-disk shape of the dataset: flat record lists, indexed on load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameDataFile {
    pub species: Vec<SpeciesInfo>,
    pub moves: Vec<MoveInfo>,
    pub matchups: Vec<Matchup>,
    pub catch_rates: Vec<CatchRateEntry>,
    pub balls: Vec<BallEntry>,
    pub status_affinities: Vec<StatusAffinity>,
    pub proc_chances: Vec<ProcChanceEntry>,
    pub zones: Vec<ZoneInfo>,
}

/// Indexed dataset implementing [`CombatData`].
#[derive(Debug, Clone, Default)]
pub struct GameData {
    species: HashMap<u32, SpeciesInfo>,
    moves: HashMap<String, MoveInfo>,
    matchups: HashMap<(ElementType, ElementType), f64>,
    catch_rates: HashMap<Rarity, f64>,
    balls: HashMap<BallKind, f64>,
    affinities: HashMap<ElementType, StatusKind>,
    proc_chances: HashMap<StatusKind, f64>,
    zones: HashMap<u32, ZoneInfo>,
}

impl From<GameDataFile> for GameData {
    fn from(file: GameDataFile) -> Self {
        Self {
            species: file.species.into_iter().map(|s| (s.id, s)).collect(),
            moves: file
                .moves
                .into_iter()
                .map(|m| (m.name.clone(), m))
                .collect(),
            matchups: file
                .matchups
                .into_iter()
                .map(|m| ((m.attack, m.defend), m.multiplier))
                .collect(),
            catch_rates: file
                .catch_rates
                .into_iter()
                .map(|c| (c.rarity, c.rate))
                .collect(),
            balls: file
                .balls
                .into_iter()
                .map(|b| (b.ball, b.multiplier))
                .collect(),
            affinities: file
                .status_affinities
                .into_iter()
                .map(|a| (a.element, a.status))
                .collect(),
            proc_chances: file
                .proc_chances
                .into_iter()
                .map(|p| (p.status, p.chance))
                .collect(),
            zones: file.zones.into_iter().map(|z| (z.id, z)).collect(),
        }
    }
}

impl GameData {
    /// Bundled species, moves, type chart and zones.
    pub fn builtin() -> Self {
        Self::from(builtin::builtin_file())
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let file: GameDataFile = serde_json::from_str(json)?;
        Ok(Self::from(file))
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| CombatError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn species_count(&self) -> usize {
        self.species.len()
    }
}

impl CombatData for GameData {
    fn species(&self, id: u32) -> Option<&SpeciesInfo> {
        self.species.get(&id)
    }

    fn move_info(&self, name: &str) -> Option<&MoveInfo> {
        self.moves.get(name)
    }

    fn matchup(&self, attack: ElementType, defend: ElementType) -> Option<f64> {
        self.matchups.get(&(attack, defend)).copied()
    }

    /// Rarities missing from the table catch like common creatures.
    fn catch_rate(&self, rarity: Rarity) -> f64 {
        self.catch_rates
            .get(&rarity)
            .or_else(|| self.catch_rates.get(&Rarity::Common))
            .copied()
            .unwrap_or(DEFAULT_CATCH_RATE)
    }

    fn ball_multiplier(&self, ball: BallKind) -> f64 {
        self.balls.get(&ball).copied().unwrap_or(1.0)
    }

    fn status_affinity(&self, element: ElementType) -> Option<StatusKind> {
        self.affinities.get(&element).copied()
    }

    fn proc_chance(&self, status: StatusKind) -> f64 {
        self.proc_chances.get(&status).copied().unwrap_or(0.0)
    }

    fn zone(&self, id: u32) -> Option<&ZoneInfo> {
        self.zones.get(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_has_species_and_zones() {
        let data = GameData::builtin();
        assert!(data.species_count() >= 10);
        assert!(data.zone(1).is_some());
    }

    #[test]
    fn test_builtin_type_chart() {
        let data = GameData::builtin();
        assert_eq!(data.effectiveness(ElementType::Water, ElementType::Fire), 2.0);
        assert_eq!(data.effectiveness(ElementType::Fire, ElementType::Water), 0.5);
        assert_eq!(data.effectiveness(ElementType::Normal, ElementType::Ghost), 0.0);
        assert_eq!(data.effectiveness(ElementType::Normal, ElementType::Fire), 1.0);
    }

    #[test]
    fn test_unknown_keys_resolve_to_neutral() {
        let data = GameData::default();
        assert_eq!(data.effectiveness(ElementType::Dragon, ElementType::Fairy), 1.0);
        assert!(data.species(999).is_none());
        let mv = data.default_move(999);
        assert_eq!(mv.name, "Charge");
        assert_eq!(mv.power, 50);
        assert_eq!(data.ball_multiplier(BallKind::Great), 1.0);
    }

    #[test]
    fn test_unknown_rarity_catches_like_common() {
        let empty = GameData::default();
        assert_eq!(empty.catch_rate(Rarity::Legendary), DEFAULT_CATCH_RATE);

        let json = r#"{ "catch_rates": [ { "rarity": "common", "rate": 0.6 } ] }"#;
        let data = GameData::from_json_str(json).unwrap();
        assert_eq!(data.catch_rate(Rarity::Legendary), 0.6);
        assert_eq!(data.catch_rate(Rarity::Common), 0.6);
    }

    #[test]
    fn test_corrupt_matchup_treated_as_neutral() {
        let json = r#"{ "matchups": [
            { "attack": "fire", "defend": "grass", "multiplier": -3.0 }
        ] }"#;
        let data = GameData::from_json_str(json).unwrap();
        assert_eq!(data.effectiveness(ElementType::Fire, ElementType::Grass), 1.0);
    }

    #[test]
    fn test_from_json_minimal_species() {
        let json = r#"{
            "species": [
                { "id": 7, "name": "Testmon",
                  "base_stats": { "hp": 40, "attack": 50, "sp_attack": 50,
                                  "defense": 40, "sp_defense": 40, "speed": 60 } }
            ]
        }"#;
        let data = GameData::from_json_str(json).unwrap();
        let species = data.species(7).unwrap();
        assert_eq!(species.primary_type, ElementType::Normal);
        assert_eq!(species.default_move, "Charge");
        // Move table is empty, so the default move falls back to Charge.
        assert_eq!(data.default_move(7).power, 50);
    }
}
