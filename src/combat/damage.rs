//! Damage calculation shared by interactive play and catch-up.

use super::Side;
use crate::core::constants::*;
use crate::creature::{Combatant, Stat, Talent, TalentStacks};
use crate::data::{AccountBonuses, CombatData, ElementType, MoveCategory, MoveInfo};

/// Additive bonuses applied on top of the base formula.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DamageModifiers {
    /// Extra same-type bonus from stacked talents (fraction).
    pub stab_bonus: f64,
    /// Σ damage bonuses, player side only.
    pub damage_bonus: f64,
    /// Σ resistance bonuses, reduces damage the player receives.
    pub resistance_bonus: f64,
    /// Attacker ignores the depleted-stamina penalty.
    pub stamina_bypass: bool,
}

impl DamageModifiers {
    /// Modifiers for an attack made by `attacker` on `side`.
    pub fn for_side(
        side: Side,
        attacker: &Combatant,
        bonuses: &dyn AccountBonuses,
        stacks: &TalentStacks,
    ) -> Self {
        match side {
            Side::Player => Self {
                stab_bonus: stacks.bonus(Talent::Adaptability),
                damage_bonus: bonuses.damage_bonus() + stacks.bonus(Talent::Bruiser),
                resistance_bonus: 0.0,
                stamina_bypass: attacker.ignores_stamina_penalty(),
            },
            Side::Enemy => Self {
                resistance_bonus: bonuses.resistance_bonus() + stacks.bonus(Talent::Guardian),
                ..Default::default()
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DamageInput {
    pub attack_power: u32,
    pub defense_power: u32,
    pub move_type: ElementType,
    pub move_power: u32,
    pub attacker_types: (ElementType, Option<ElementType>),
    pub defender_primary: ElementType,
    pub defender_secondary: Option<ElementType>,
    pub side: Side,
    pub stamina_depleted: bool,
    pub modifiers: DamageModifiers,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageResult {
    pub damage: u32,
    pub effectiveness: f64,
    pub stab: bool,
}

/// Product of the move's matchups against both defender types.
pub fn type_effectiveness(
    data: &dyn CombatData,
    move_type: ElementType,
    primary: ElementType,
    secondary: Option<ElementType>,
) -> f64 {
    let first = data.effectiveness(move_type, primary);
    match secondary {
        Some(secondary) => first * data.effectiveness(move_type, secondary),
        None => first,
    }
}

/// Smallest damage any hit can deal: `max(1, round(power / 20))`.
pub fn min_damage(move_power: u32) -> u32 {
    ((move_power as f64 / MIN_DAMAGE_POWER_DIVISOR).round() as u32).max(1)
}

pub fn compute_damage(data: &dyn CombatData, input: &DamageInput) -> DamageResult {
    let effectiveness = type_effectiveness(
        data,
        input.move_type,
        input.defender_primary,
        input.defender_secondary,
    );

    let (own_primary, own_secondary) = input.attacker_types;
    let stab = input.move_type == own_primary || Some(input.move_type) == own_secondary;
    let stab_multiplier = if stab {
        STAB_MULTIPLIER * (1.0 + input.modifiers.stab_bonus)
    } else {
        1.0
    };

    let account_multiplier = match input.side {
        Side::Player => (1.0 + input.modifiers.damage_bonus).max(0.0),
        Side::Enemy => (1.0 - input.modifiers.resistance_bonus).max(0.0),
    };

    let stamina_multiplier = if input.side == Side::Player
        && input.stamina_depleted
        && !input.modifiers.stamina_bypass
    {
        STAMINA_DEPLETED_MULTIPLIER
    } else {
        1.0
    };

    let attack = input.attack_power as f64;
    let defense = input.defense_power as f64;
    let raw = attack
        * (input.move_power as f64 / 100.0)
        * (effectiveness * stab_multiplier * stamina_multiplier * account_multiplier);
    let mitigation = attack / (attack + defense * DEFENSE_WEIGHT + 1.0);

    let damage = ((raw * mitigation).floor() as u32).max(min_damage(input.move_power));
    DamageResult {
        damage,
        effectiveness,
        stab,
    }
}

/// Assembles the damage input for `attacker` using `mv` on `defender`.
/// Physical moves use Attack/Defense, special moves SpAttack/SpDefense.
pub fn build_input(
    attacker: &Combatant,
    defender: &Combatant,
    mv: &MoveInfo,
    side: Side,
    modifiers: DamageModifiers,
) -> DamageInput {
    let (attack_stat, defense_stat) = match mv.category {
        MoveCategory::Physical => (Stat::Attack, Stat::Defense),
        MoveCategory::Special => (Stat::SpAttack, Stat::SpDefense),
    };
    DamageInput {
        attack_power: attacker.stat(attack_stat),
        defense_power: defender.stat(defense_stat),
        move_type: mv.element,
        move_power: mv.power,
        attacker_types: attacker.types(),
        defender_primary: defender.primary_type,
        defender_secondary: defender.secondary_type,
        side,
        stamina_depleted: side == Side::Player && attacker.stamina_depleted(),
        modifiers,
    }
}
