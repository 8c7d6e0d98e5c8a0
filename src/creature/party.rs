use super::combatant::Combatant;
use super::talents::TalentStacks;
use crate::core::constants::MAX_TEAM_SIZE;
use crate::data::BallKind;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// The player's creatures: the ordered battle roster, the storage box for
/// captures, and the capture-item bag.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Party {
    pub team: Vec<Combatant>,
    #[serde(default)]
    pub storage: Vec<Combatant>,
    #[serde(default)]
    pub capture_items: BTreeMap<BallKind, u32>,
}

impl Party {
    pub fn new(team: Vec<Combatant>) -> Self {
        Self {
            team,
            ..Default::default()
        }
    }

    pub fn has_living(&self) -> bool {
        self.team.iter().any(|c| c.is_alive())
    }

    pub fn first_living(&self) -> Option<usize> {
        self.team.iter().position(|c| c.is_alive())
    }

    /// Next living slot that is not in `excluded`, searching from the top.
    pub fn next_living(&self, excluded: &BTreeSet<usize>) -> Option<usize> {
        self.team
            .iter()
            .enumerate()
            .find(|(i, c)| c.is_alive() && !excluded.contains(i))
            .map(|(i, _)| i)
    }

    pub fn talent_stacks(&self) -> TalentStacks {
        TalentStacks::from_members(&self.team)
    }

    /// Full heal, stamina restore and status clear for the whole team.
    pub fn heal_all(&mut self) {
        for member in &mut self.team {
            member.heal_full();
            member.restore_stamina();
            member.status = None;
            member.gauge = 0.0;
        }
    }

    /// One second of out-of-fight regeneration: `percent` of max HP (at
    /// least 1) and `stamina` points for every team member, fainted ones
    /// included.
    pub fn passive_regen(&mut self, percent: f64, stamina: u32) {
        let percent = percent.max(0.0);
        for member in &mut self.team {
            let amount = (member.max_hp() as f64 * percent / 100.0).ceil() as u32;
            member.heal(amount);
            member.regen_stamina(stamina);
        }
    }

    /// Owned creature of the same species, team first. An owned copy with
    /// the same shiny state is preferred over one without.
    pub fn find_duplicate_mut(&mut self, species: u32, shiny: bool) -> Option<&mut Combatant> {
        let owned = || self.team.iter().chain(self.storage.iter());
        let index = owned()
            .position(|c| c.species == species && c.shiny == shiny)
            .or_else(|| owned().position(|c| c.species == species))?;
        let team_len = self.team.len();
        if index < team_len {
            self.team.get_mut(index)
        } else {
            self.storage.get_mut(index - team_len)
        }
    }

    /// Adds a new creature to the team, or to storage once the team is full.
    pub fn store(&mut self, creature: Combatant) {
        if self.team.len() < MAX_TEAM_SIZE {
            self.team.push(creature);
        } else {
            self.storage.push(creature);
        }
    }

    pub fn add_capture_items(&mut self, ball: BallKind, count: u32) {
        *self.capture_items.entry(ball).or_insert(0) += count;
    }

    pub fn capture_items_left(&self) -> u32 {
        self.capture_items.values().sum()
    }

    /// Takes one capture item: the preferred kind when stocked, otherwise
    /// the strongest kind in stock.
    pub fn take_capture_item(&mut self, preferred: BallKind) -> Option<BallKind> {
        let ball = if self.capture_items.get(&preferred).copied().unwrap_or(0) > 0 {
            preferred
        } else {
            self.capture_items
                .iter()
                .rev()
                .find(|(_, count)| **count > 0)
                .map(|(ball, _)| *ball)?
        };
        if let Some(count) = self.capture_items.get_mut(&ball) {
            *count -= 1;
        }
        Some(ball)
    }

    pub fn return_capture_item(&mut self, ball: BallKind) {
        self.add_capture_items(ball, 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::creature::stats::StatBlock;
    use crate::data::SpeciesInfo;

    fn member(species: u32) -> Combatant {
        Combatant::from_species(&SpeciesInfo::fallback(species), 10, StatBlock::default())
    }

    #[test]
    fn test_next_living_skips_fainted_and_excluded() {
        let mut party = Party::new(vec![member(1), member(2), member(3)]);
        party.team[0].current_hp = 0;
        let mut excluded = BTreeSet::new();
        assert_eq!(party.next_living(&excluded), Some(1));
        excluded.insert(1);
        assert_eq!(party.next_living(&excluded), Some(2));
        party.team[2].current_hp = 0;
        assert_eq!(party.next_living(&excluded), None);
        assert!(party.has_living());
    }

    #[test]
    fn test_heal_all_restores_everything() {
        let mut party = Party::new(vec![member(1)]);
        party.team[0].current_hp = 0;
        party.team[0].stamina = 0;
        party.team[0].gauge = 500.0;
        party.heal_all();
        assert_eq!(party.team[0].current_hp, party.team[0].max_hp());
        assert!(!party.team[0].stamina_depleted());
        assert_eq!(party.team[0].gauge, 0.0);
    }

    #[test]
    fn test_take_capture_item_prefers_then_falls_back() {
        let mut party = Party::default();
        party.add_capture_items(BallKind::Basic, 1);
        party.add_capture_items(BallKind::Ultra, 1);

        assert_eq!(party.take_capture_item(BallKind::Basic), Some(BallKind::Basic));
        // Preferred kind is out: strongest in stock is used
        assert_eq!(party.take_capture_item(BallKind::Basic), Some(BallKind::Ultra));
        assert_eq!(party.take_capture_item(BallKind::Basic), None);
        assert_eq!(party.capture_items_left(), 0);
    }

    #[test]
    fn test_find_duplicate_searches_storage() {
        let mut party = Party::new(vec![member(1)]);
        party.storage.push(member(2));
        assert!(party.find_duplicate_mut(2, false).is_some());
        assert!(party.find_duplicate_mut(3, false).is_none());
    }

    #[test]
    fn test_find_duplicate_prefers_same_shiny_state() {
        let mut shiny = member(2);
        shiny.shiny = true;
        let mut party = Party::new(vec![member(2), shiny]);
        assert!(party.find_duplicate_mut(2, true).map(|c| c.shiny).unwrap());
        assert!(!party.find_duplicate_mut(2, false).map(|c| c.shiny).unwrap());

        // Only a plain copy owned: a shiny capture still finds it
        let mut party = Party::new(vec![member(2)]);
        assert!(party.find_duplicate_mut(2, true).is_some());
    }

    #[test]
    fn test_passive_regen_revives_slowly() {
        let mut party = Party::new(vec![member(1)]);
        party.team[0].current_hp = 0;
        party.team[0].stamina = 10;
        party.passive_regen(5.0, 2);
        assert!(party.team[0].is_alive());
        assert!(party.team[0].hp_fraction() < 1.0);
        assert_eq!(party.team[0].stamina, 12);

        party.passive_regen(0.0, 0);
        assert!(party.team[0].is_alive());
    }

    #[test]
    fn test_store_overflows_into_storage() {
        let mut party = Party::default();
        for _ in 0..MAX_TEAM_SIZE + 2 {
            party.store(member(1));
        }
        assert_eq!(party.team.len(), MAX_TEAM_SIZE);
        assert_eq!(party.storage.len(), 2);
    }
}
