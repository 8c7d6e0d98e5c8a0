use crate::core::constants::MAX_IV;
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stat {
    Hp,
    Attack,
    SpAttack,
    Defense,
    SpDefense,
    Speed,
}

impl Stat {
    pub const ALL: [Stat; 6] = [
        Stat::Hp,
        Stat::Attack,
        Stat::SpAttack,
        Stat::Defense,
        Stat::SpDefense,
        Stat::Speed,
    ];
}

/// Six-stat block, used both for species base stats and individual values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatBlock {
    pub hp: u32,
    pub attack: u32,
    pub sp_attack: u32,
    pub defense: u32,
    pub sp_defense: u32,
    pub speed: u32,
}

impl StatBlock {
    pub const fn new(
        hp: u32,
        attack: u32,
        sp_attack: u32,
        defense: u32,
        sp_defense: u32,
        speed: u32,
    ) -> Self {
        Self {
            hp,
            attack,
            sp_attack,
            defense,
            sp_defense,
            speed,
        }
    }

    pub const fn uniform(value: u32) -> Self {
        Self::new(value, value, value, value, value, value)
    }

    pub fn get(&self, stat: Stat) -> u32 {
        match stat {
            Stat::Hp => self.hp,
            Stat::Attack => self.attack,
            Stat::SpAttack => self.sp_attack,
            Stat::Defense => self.defense,
            Stat::SpDefense => self.sp_defense,
            Stat::Speed => self.speed,
        }
    }

    pub fn set(&mut self, stat: Stat, value: u32) {
        match stat {
            Stat::Hp => self.hp = value,
            Stat::Attack => self.attack = value,
            Stat::SpAttack => self.sp_attack = value,
            Stat::Defense => self.defense = value,
            Stat::SpDefense => self.sp_defense = value,
            Stat::Speed => self.speed = value,
        }
    }

    /// Rolls a fresh set of individual values in `0..=MAX_IV`.
    pub fn random_ivs(rng: &mut impl Rng) -> Self {
        let mut ivs = Self::default();
        for stat in Stat::ALL {
            ivs.set(stat, rng.gen_range(0..=MAX_IV));
        }
        ivs
    }

    /// Clamps every value into the valid IV range.
    pub fn clamped_ivs(mut self) -> Self {
        for stat in Stat::ALL {
            self.set(stat, self.get(stat).min(MAX_IV));
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_get_set_roundtrip_per_stat() {
        let mut block = StatBlock::default();
        for (i, stat) in Stat::ALL.iter().enumerate() {
            block.set(*stat, i as u32 + 1);
        }
        assert_eq!(block, StatBlock::new(1, 2, 3, 4, 5, 6));
    }

    #[test]
    fn test_random_ivs_in_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..100 {
            let ivs = StatBlock::random_ivs(&mut rng);
            for stat in Stat::ALL {
                assert!(ivs.get(stat) <= MAX_IV);
            }
        }
    }

    #[test]
    fn test_clamped_ivs() {
        let ivs = StatBlock::uniform(99).clamped_ivs();
        assert_eq!(ivs, StatBlock::uniform(MAX_IV));
    }
}
