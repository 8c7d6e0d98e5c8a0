use super::stats::{Stat, StatBlock};
use super::talents::{HeldItem, Talent};
use crate::combat::status::StatusEffect;
use crate::core::balance::{
    cumulative_xp_for_level, hp_stat, other_stat, prestige_multiplier, xp_required_for_level,
};
use crate::core::constants::{MAX_LEVEL, MAX_STAMINA, STAMINA_COST_PER_ATTACK};
use crate::data::{CombatData, ElementType, Rarity, SpeciesInfo};
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A creature taking part in battle, on either side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Combatant {
    pub uid: String,
    pub species: u32,
    pub name: String,
    pub level: u32,
    /// Progress toward the next level.
    pub exp: u64,
    pub rarity: Rarity,
    #[serde(default)]
    pub shiny: bool,
    #[serde(default)]
    pub prestige: u32,
    #[serde(default)]
    pub upgrade_tokens: u32,
    pub primary_type: ElementType,
    #[serde(default)]
    pub secondary_type: Option<ElementType>,
    pub base_stats: StatBlock,
    pub ivs: StatBlock,
    pub current_hp: u32,
    pub stamina: u32,
    /// Action gauge accumulator (transient, not saved)
    #[serde(skip)]
    pub gauge: f64,
    #[serde(default)]
    pub status: Option<StatusEffect>,
    #[serde(default)]
    pub held_item: Option<HeldItem>,
    #[serde(default)]
    pub talent: Option<Talent>,
}

impl Combatant {
    /// Creates a full-health combatant from species data.
    pub fn from_species(info: &SpeciesInfo, level: u32, ivs: StatBlock) -> Self {
        let mut combatant = Self {
            uid: Uuid::new_v4().to_string(),
            species: info.id,
            name: info.name.clone(),
            level: level.clamp(1, MAX_LEVEL),
            exp: 0,
            rarity: info.rarity,
            shiny: false,
            prestige: 0,
            upgrade_tokens: 0,
            primary_type: info.primary_type,
            secondary_type: info.secondary_type,
            base_stats: info.base_stats,
            ivs: ivs.clamped_ivs(),
            current_hp: 0,
            stamina: MAX_STAMINA,
            gauge: 0.0,
            status: None,
            held_item: None,
            talent: None,
        };
        combatant.current_hp = combatant.max_hp();
        combatant
    }

    /// Creates a wild creature with random IVs. Unknown species fall back to
    /// neutral stats instead of failing the encounter.
    pub fn wild(data: &dyn CombatData, species: u32, level: u32, rng: &mut impl Rng) -> Self {
        let fallback;
        let info = match data.species(species) {
            Some(info) => info,
            None => {
                fallback = SpeciesInfo::fallback(species);
                &fallback
            }
        };
        Self::from_species(info, level, StatBlock::random_ivs(rng))
    }

    pub fn max_hp(&self) -> u32 {
        let raw = hp_stat(
            self.base_stats.hp,
            self.ivs.hp,
            self.level,
        );
        self.scaled(raw, Stat::Hp)
    }

    /// Final stat value including prestige and held item.
    pub fn stat(&self, stat: Stat) -> u32 {
        if stat == Stat::Hp {
            return self.max_hp();
        }
        let raw = other_stat(self.base_stats.get(stat), self.ivs.get(stat), self.level);
        self.scaled(raw, stat)
    }

    fn scaled(&self, raw: u32, stat: Stat) -> u32 {
        let item = self
            .held_item
            .map_or(1.0, |item| item.stat_multiplier(stat));
        ((raw as f64 * prestige_multiplier(self.prestige) * item).round() as u32).max(1)
    }

    /// Speed used to fill the action gauge, after status modifiers.
    pub fn effective_speed(&self) -> f64 {
        let modifier = self
            .status
            .map_or(1.0, |status| status.kind.speed_multiplier());
        self.stat(Stat::Speed) as f64 * modifier
    }

    pub fn types(&self) -> (ElementType, Option<ElementType>) {
        (self.primary_type, self.secondary_type)
    }

    pub fn is_alive(&self) -> bool {
        self.current_hp > 0
    }

    pub fn hp_fraction(&self) -> f64 {
        self.current_hp as f64 / self.max_hp() as f64
    }

    /// Applies damage. Returns true if this hit made the combatant faint.
    pub fn take_damage(&mut self, amount: u32) -> bool {
        let was_alive = self.is_alive();
        self.current_hp = self.current_hp.saturating_sub(amount);
        was_alive && !self.is_alive()
    }

    pub fn heal(&mut self, amount: u32) {
        self.current_hp = self.current_hp.saturating_add(amount).min(self.max_hp());
    }

    pub fn heal_full(&mut self) {
        self.current_hp = self.max_hp();
    }

    /// Re-establishes `current_hp <= max_hp` after stats changed.
    pub fn clamp_hp(&mut self) {
        self.current_hp = self.current_hp.min(self.max_hp());
    }

    pub fn stamina_depleted(&self) -> bool {
        self.stamina == 0
    }

    pub fn spend_stamina(&mut self) {
        self.stamina = self.stamina.saturating_sub(STAMINA_COST_PER_ATTACK);
    }

    pub fn regen_stamina(&mut self, amount: u32) {
        self.stamina = self.stamina.saturating_add(amount).min(MAX_STAMINA);
    }

    pub fn restore_stamina(&mut self) {
        self.stamina = MAX_STAMINA;
    }

    /// Resets a gauge that became NaN, infinite or negative.
    pub fn sanitize_gauge(&mut self) {
        if !self.gauge.is_finite() || self.gauge < 0.0 {
            self.gauge = 0.0;
        }
    }

    pub fn ignores_stamina_penalty(&self) -> bool {
        self.talent == Some(Talent::Tireless)
    }

    pub fn exp_multiplier(&self) -> f64 {
        self.held_item.map_or(1.0, |item| item.exp_multiplier())
    }

    /// Adds experience, leveling up as needed. Max HP gained on level-up is
    /// added to current HP. Returns the number of levels gained.
    pub fn add_exp(&mut self, amount: u64) -> u32 {
        if self.level >= MAX_LEVEL {
            return 0;
        }
        let max_hp_before = self.max_hp();
        self.exp = self.exp.saturating_add(amount);

        let mut levels_gained = 0;
        while self.level < MAX_LEVEL {
            let required = xp_required_for_level(self.level);
            if self.exp < required {
                break;
            }
            self.exp -= required;
            self.level += 1;
            levels_gained += 1;
        }
        if self.level >= MAX_LEVEL {
            self.exp = 0;
        }

        if levels_gained > 0 && self.is_alive() {
            let gained_hp = self.max_hp().saturating_sub(max_hp_before);
            self.heal(gained_hp);
        }
        levels_gained
    }

    /// All experience earned since level 1.
    pub fn total_exp(&self) -> u64 {
        cumulative_xp_for_level(self.level) + self.exp
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::status::StatusKind;
    use crate::data::GameData;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn test_creature(level: u32) -> Combatant {
        let info = SpeciesInfo::fallback(1);
        Combatant::from_species(&info, level, StatBlock::uniform(31))
    }

    #[test]
    fn test_new_combatant_is_at_full_health() {
        let c = test_creature(20);
        assert_eq!(c.current_hp, c.max_hp());
        assert_eq!(c.stamina, MAX_STAMINA);
        assert_eq!(c.gauge, 0.0);
        assert!(c.status.is_none());
    }

    #[test]
    fn test_take_damage_reports_faint_once() {
        let mut c = test_creature(5);
        let hp = c.current_hp;
        assert!(!c.take_damage(hp - 1));
        assert!(c.take_damage(10));
        assert_eq!(c.current_hp, 0);
        // Already fainted: further damage does not report a new faint
        assert!(!c.take_damage(10));
    }

    #[test]
    fn test_heal_never_exceeds_max() {
        let mut c = test_creature(5);
        c.take_damage(5);
        c.heal(1_000);
        assert_eq!(c.current_hp, c.max_hp());
    }

    #[test]
    fn test_paralysis_and_enrage_change_effective_speed() {
        let mut c = test_creature(50);
        let base = c.effective_speed();
        c.status = Some(StatusEffect::new(StatusKind::Paralysis, 0));
        assert!((c.effective_speed() - base * 0.75).abs() < 1e-9);
        c.status = Some(StatusEffect::new(StatusKind::Enraged, 0));
        assert!((c.effective_speed() - base * 1.15).abs() < 1e-9);
    }

    #[test]
    fn test_sanitize_gauge() {
        let mut c = test_creature(5);
        c.gauge = f64::NAN;
        c.sanitize_gauge();
        assert_eq!(c.gauge, 0.0);
        c.gauge = -4.0;
        c.sanitize_gauge();
        assert_eq!(c.gauge, 0.0);
        c.gauge = 1234.0;
        c.sanitize_gauge();
        assert_eq!(c.gauge, 1234.0);
    }

    #[test]
    fn test_add_exp_levels_up_and_grows_hp() {
        let mut c = test_creature(1);
        let hp_before = c.max_hp();
        let gained = c.add_exp(xp_required_for_level(1) + xp_required_for_level(2));
        assert_eq!(gained, 2);
        assert_eq!(c.level, 3);
        assert_eq!(c.exp, 0);
        assert!(c.max_hp() > hp_before);
        assert_eq!(c.current_hp, c.max_hp());
    }

    #[test]
    fn test_total_exp_counts_previous_levels() {
        let mut c = test_creature(1);
        c.add_exp(150);
        assert_eq!(c.level, 2);
        assert_eq!(c.total_exp(), 150);
    }

    #[test]
    fn test_max_level_stops_exp() {
        let mut c = test_creature(MAX_LEVEL);
        assert_eq!(c.add_exp(1_000_000), 0);
        assert_eq!(c.level, MAX_LEVEL);
    }

    #[test]
    fn test_held_item_and_prestige_scale_stats() {
        let mut c = test_creature(50);
        let attack = c.stat(Stat::Attack);
        c.held_item = Some(HeldItem::PowerBand);
        assert!(c.stat(Stat::Attack) > attack);
        let boosted = c.stat(Stat::Attack);
        c.prestige = 2;
        assert!(c.stat(Stat::Attack) > boosted);
    }

    #[test]
    fn test_wild_unknown_species_uses_fallback() {
        let data = GameData::default();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let c = Combatant::wild(&data, 404, 10, &mut rng);
        assert_eq!(c.species, 404);
        assert_eq!(c.primary_type, ElementType::Normal);
        assert!(c.is_alive());
    }
}
