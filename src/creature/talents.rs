use super::combatant::Combatant;
use super::stats::Stat;
use crate::core::balance::{stack_bonus, CATALYST_STACK_TABLE, TALENT_STACK_TABLE};
use crate::core::constants::{HELD_ITEM_STAT_MULTIPLIER, LUCKY_EGG_EXP_MULTIPLIER};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Item held by a creature, granting a passive multiplier to its holder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HeldItem {
    /// +10% Attack and SpAttack
    PowerBand,
    /// +10% Defense and SpDefense
    GuardCharm,
    /// +10% Speed
    SwiftFeather,
    /// +10% max HP
    VitalityOrb,
    /// +50% exp earned by the holder
    LuckyEgg,
}

impl HeldItem {
    pub fn stat_multiplier(&self, stat: Stat) -> f64 {
        let boosted = match self {
            HeldItem::PowerBand => matches!(stat, Stat::Attack | Stat::SpAttack),
            HeldItem::GuardCharm => matches!(stat, Stat::Defense | Stat::SpDefense),
            HeldItem::SwiftFeather => stat == Stat::Speed,
            HeldItem::VitalityOrb => stat == Stat::Hp,
            HeldItem::LuckyEgg => false,
        };
        if boosted {
            HELD_ITEM_STAT_MULTIPLIER
        } else {
            1.0
        }
    }

    pub fn exp_multiplier(&self) -> f64 {
        match self {
            HeldItem::LuckyEgg => LUCKY_EGG_EXP_MULTIPLIER,
            _ => 1.0,
        }
    }
}

/// Passive talent. Stacking talents grant a team-wide bonus that grows with
/// the number of teammates holding them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Talent {
    /// Boosts the same-type bonus.
    Adaptability,
    /// Adds status proc chance.
    Catalyst,
    /// Adds player damage.
    Bruiser,
    /// Adds resistance to enemy damage.
    Guardian,
    /// Holder ignores the stamina-depleted penalty. Does not stack.
    Tireless,
}

impl Talent {
    pub const ALL: [Talent; 5] = [
        Talent::Adaptability,
        Talent::Catalyst,
        Talent::Bruiser,
        Talent::Guardian,
        Talent::Tireless,
    ];

    pub fn stacks(&self) -> bool {
        !matches!(self, Talent::Tireless)
    }
}

/// Count of teammates holding each talent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TalentStacks {
    counts: HashMap<Talent, usize>,
}

impl TalentStacks {
    pub fn from_members<'a>(members: impl IntoIterator<Item = &'a Combatant>) -> Self {
        let mut counts = HashMap::new();
        for talent in members.into_iter().filter_map(|c| c.talent) {
            *counts.entry(talent).or_insert(0) += 1;
        }
        Self { counts }
    }

    pub fn count(&self, talent: Talent) -> usize {
        self.counts.get(&talent).copied().unwrap_or(0)
    }

    /// Team-wide bonus for a stacking talent (0.0 for non-stacking ones).
    pub fn bonus(&self, talent: Talent) -> f64 {
        if !talent.stacks() {
            return 0.0;
        }
        let count = self.count(talent);
        match talent {
            Talent::Catalyst => stack_bonus(&CATALYST_STACK_TABLE, count),
            _ => stack_bonus(&TALENT_STACK_TABLE, count),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::creature::stats::StatBlock;
    use crate::data::SpeciesInfo;

    fn member(talent: Option<Talent>) -> Combatant {
        let mut c = Combatant::from_species(&SpeciesInfo::fallback(1), 10, StatBlock::default());
        c.talent = talent;
        c
    }

    #[test]
    fn test_stacks_count_team_members() {
        let team = vec![
            member(Some(Talent::Adaptability)),
            member(Some(Talent::Adaptability)),
            member(Some(Talent::Catalyst)),
            member(None),
        ];
        let stacks = TalentStacks::from_members(&team);
        assert_eq!(stacks.count(Talent::Adaptability), 2);
        assert_eq!(stacks.bonus(Talent::Adaptability), 0.18);
        assert_eq!(stacks.bonus(Talent::Catalyst), 0.05);
        assert_eq!(stacks.bonus(Talent::Bruiser), 0.0);
    }

    #[test]
    fn test_stack_bonus_caps() {
        let team: Vec<_> = (0..8).map(|_| member(Some(Talent::Bruiser))).collect();
        let stacks = TalentStacks::from_members(&team);
        assert_eq!(stacks.bonus(Talent::Bruiser), 0.28);
    }

    #[test]
    fn test_tireless_never_stacks() {
        let team = vec![member(Some(Talent::Tireless)), member(Some(Talent::Tireless))];
        let stacks = TalentStacks::from_members(&team);
        assert!(!Talent::Tireless.stacks());
        assert_eq!(stacks.bonus(Talent::Tireless), 0.0);
    }

    #[test]
    fn test_held_item_multipliers() {
        assert_eq!(HeldItem::PowerBand.stat_multiplier(Stat::Attack), 1.1);
        assert_eq!(HeldItem::PowerBand.stat_multiplier(Stat::Speed), 1.0);
        assert_eq!(HeldItem::LuckyEgg.exp_multiplier(), 1.5);
        assert_eq!(HeldItem::SwiftFeather.exp_multiplier(), 1.0);
    }
}
