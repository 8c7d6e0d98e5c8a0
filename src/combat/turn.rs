//! Turn execution: one scheduled attack, then faint evaluation.

use super::context::BattleContext;
use super::damage::{build_input, compute_damage, DamageModifiers};
use super::status::{self, StatusKind, StatusTick};
use super::Side;
use crate::creature::{Combatant, Party, Talent};
use crate::data::{AccountBonuses, CombatData};
use rand::Rng;

/// What a single attack did.
#[derive(Debug, Clone, PartialEq)]
pub struct TurnOutcome {
    pub side: Side,
    pub attacker: String,
    pub defender: String,
    pub move_name: String,
    pub damage: u32,
    pub effectiveness: f64,
    pub stab: bool,
    pub status_inflicted: Option<StatusKind>,
    pub defender_fainted: bool,
}

/// Where the encounter stands after a turn or status tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnResolution {
    /// Nothing happened (missing or fainted combatant).
    Skipped,
    Continue,
    /// The enemy fainted; rewards are due.
    EnemyDefeated,
    /// The active player creature fainted and `next` was sent in.
    PlayerSwapped { fainted: usize, next: usize },
    /// The active player creature fainted and nobody is left.
    PlayerDefeated,
}

/// Resolves one attack of `attacker` on `defender` with the attacker's
/// default move. Returns `None` when either side is missing or fainted.
pub fn resolve_turn(
    attacker: Option<&mut Combatant>,
    defender: Option<&mut Combatant>,
    side: Side,
    data: &dyn CombatData,
    modifiers: DamageModifiers,
    catalyst_bonus: f64,
    rng: &mut impl Rng,
) -> Option<TurnOutcome> {
    let (attacker, defender) = (attacker?, defender?);
    if !attacker.is_alive() || !defender.is_alive() {
        return None;
    }

    let mv = data.default_move(attacker.species);
    let input = build_input(attacker, defender, &mv, side, modifiers);
    let result = compute_damage(data, &input);
    if side == Side::Player {
        attacker.spend_stamina();
    }

    let defender_fainted = defender.take_damage(result.damage);
    let status_inflicted = if defender_fainted {
        status::clear(defender);
        None
    } else {
        status::try_inflict(
            data,
            defender,
            mv.element,
            input.attack_power,
            catalyst_bonus,
            rng,
        )
    };

    Some(TurnOutcome {
        side,
        attacker: attacker.name.clone(),
        defender: defender.name.clone(),
        move_name: mv.name,
        damage: result.damage,
        effectiveness: result.effectiveness,
        stab: result.stab,
        status_inflicted,
        defender_fainted,
    })
}

/// Resolves the turn `side` earned on the gauge and evaluates fainting.
///
/// A fainted player creature is marked for this encounter and the next
/// living teammate is swapped in. Elite and boss enemies may enrage after
/// taking damage.
pub fn execute_scheduled_turn(
    ctx: &mut BattleContext,
    party: &mut Party,
    side: Side,
    data: &dyn CombatData,
    bonuses: &dyn AccountBonuses,
    rng: &mut impl Rng,
) -> (Option<TurnOutcome>, TurnResolution) {
    let stacks = party.talent_stacks();
    let active = ctx.active;
    let Some(player) = party.team.get_mut(active) else {
        return (None, TurnResolution::Skipped);
    };
    let Some(enemy) = ctx.enemy.as_mut() else {
        return (None, TurnResolution::Skipped);
    };

    let outcome = match side {
        Side::Player => {
            let modifiers = DamageModifiers::for_side(side, player, bonuses, &stacks);
            let catalyst = stacks.bonus(Talent::Catalyst);
            resolve_turn(Some(player), Some(enemy), side, data, modifiers, catalyst, rng)
        }
        Side::Enemy => {
            let modifiers = DamageModifiers::for_side(side, enemy, bonuses, &stacks);
            resolve_turn(Some(enemy), Some(player), side, data, modifiers, 0.0, rng)
        }
    };
    let Some(outcome) = outcome else {
        return (None, TurnResolution::Skipped);
    };
    ctx.turns_taken += 1;

    let resolution = if !outcome.defender_fainted {
        if side == Side::Player {
            let eligible = ctx.tier.can_enrage();
            if let Some(enemy) = ctx.enemy.as_mut() {
                status::maybe_enrage(enemy, eligible);
            }
        }
        TurnResolution::Continue
    } else {
        faint_resolution(ctx, party, side.opponent())
    };
    (Some(outcome), resolution)
}

/// Ticks both active combatants' statuses (player first) and routes any
/// status death through the same faint handling as an attack. A player swap
/// still lets the enemy tick; an enemy death that follows it wins out. Only a
/// wiped roster stops early.
pub fn tick_statuses(
    ctx: &mut BattleContext,
    party: &mut Party,
) -> (Vec<(Side, StatusTick)>, TurnResolution) {
    let mut ticks = Vec::new();
    let mut resolution = TurnResolution::Continue;

    if let Some(player) = party.team.get_mut(ctx.active) {
        let tick = status::tick(player);
        if tick.kind.is_some() {
            ticks.push((Side::Player, tick));
        }
        if tick.is_dead {
            resolution = faint_resolution(ctx, party, Side::Player);
            if resolution == TurnResolution::PlayerDefeated {
                return (ticks, resolution);
            }
        }
    }

    if let Some(enemy) = ctx.enemy.as_mut() {
        let tick = status::tick(enemy);
        if tick.kind.is_some() {
            ticks.push((Side::Enemy, tick));
        }
        if tick.is_dead {
            return (ticks, TurnResolution::EnemyDefeated);
        }
    }
    (ticks, resolution)
}

/// Outcome of `fainted_side` losing its active combatant.
fn faint_resolution(ctx: &mut BattleContext, party: &mut Party, fainted_side: Side) -> TurnResolution {
    match fainted_side {
        Side::Enemy => TurnResolution::EnemyDefeated,
        Side::Player => {
            let fainted = ctx.active;
            match ctx.handle_player_faint(party) {
                Some(next) => TurnResolution::PlayerSwapped { fainted, next },
                None => TurnResolution::PlayerDefeated,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::context::EncounterTier;
    use crate::combat::status::StatusEffect;
    use crate::creature::StatBlock;
    use crate::data::{GameData, SpeciesInfo, StaticBonuses};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn creature(species: u32, level: u32) -> Combatant {
        Combatant::from_species(&SpeciesInfo::fallback(species), level, StatBlock::uniform(15))
    }

    fn battle(team: Vec<Combatant>, enemy: Combatant, tier: EncounterTier) -> (BattleContext, Party) {
        let mut party = Party::new(team);
        let mut ctx = BattleContext::new();
        ctx.begin(enemy, tier, &mut party).unwrap();
        (ctx, party)
    }

    #[test]
    fn test_resolve_turn_missing_or_fainted_is_noop() {
        let data = GameData::default();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut a = creature(1, 10);
        let mut b = creature(2, 10);
        let modifiers = DamageModifiers::default();

        assert!(resolve_turn(None, Some(&mut b), Side::Player, &data, modifiers, 0.0, &mut rng).is_none());
        b.current_hp = 0;
        assert!(resolve_turn(Some(&mut a), Some(&mut b), Side::Player, &data, modifiers, 0.0, &mut rng).is_none());
        assert_eq!(a.stamina, crate::core::constants::MAX_STAMINA, "no stamina spent");
    }

    #[test]
    fn test_player_attack_spends_stamina_and_damages() {
        let data = GameData::default();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut a = creature(1, 20);
        let mut b = creature(2, 20);
        let hp = b.current_hp;

        let outcome = resolve_turn(
            Some(&mut a),
            Some(&mut b),
            Side::Player,
            &data,
            DamageModifiers::default(),
            0.0,
            &mut rng,
        )
        .unwrap();
        assert_eq!(outcome.move_name, "Charge");
        assert!(outcome.damage >= 3);
        assert_eq!(b.current_hp, hp - outcome.damage);
        assert_eq!(a.stamina, crate::core::constants::MAX_STAMINA - 1);
    }

    #[test]
    fn test_enemy_faint_hands_off_to_rewards() {
        let data = GameData::default();
        let bonuses = StaticBonuses::default();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut enemy = creature(9, 5);
        enemy.current_hp = 1;
        let (mut ctx, mut party) = battle(vec![creature(1, 30)], enemy, EncounterTier::Standard);

        let (outcome, resolution) =
            execute_scheduled_turn(&mut ctx, &mut party, Side::Player, &data, &bonuses, &mut rng);
        assert!(outcome.unwrap().defender_fainted);
        assert_eq!(resolution, TurnResolution::EnemyDefeated);
        assert_eq!(ctx.turns_taken, 1);
    }

    #[test]
    fn test_player_faint_swaps_to_next_living() {
        let data = GameData::default();
        let bonuses = StaticBonuses::default();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut lead = creature(1, 5);
        lead.current_hp = 1;
        let (mut ctx, mut party) =
            battle(vec![lead, creature(2, 5)], creature(9, 30), EncounterTier::Standard);

        let (_, resolution) =
            execute_scheduled_turn(&mut ctx, &mut party, Side::Enemy, &data, &bonuses, &mut rng);
        assert_eq!(resolution, TurnResolution::PlayerSwapped { fainted: 0, next: 1 });
        assert_eq!(ctx.active, 1);
        assert!(ctx.fainted.contains(&0));
    }

    #[test]
    fn test_last_player_faint_is_defeat() {
        let data = GameData::default();
        let bonuses = StaticBonuses::default();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut lead = creature(1, 5);
        lead.current_hp = 1;
        let (mut ctx, mut party) = battle(vec![lead], creature(9, 30), EncounterTier::Standard);

        let (_, resolution) =
            execute_scheduled_turn(&mut ctx, &mut party, Side::Enemy, &data, &bonuses, &mut rng);
        assert_eq!(resolution, TurnResolution::PlayerDefeated);
    }

    #[test]
    fn test_boss_enrages_at_low_hp() {
        let data = GameData::default();
        let bonuses = StaticBonuses::default();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut boss = creature(9, 50);
        boss.current_hp = boss.max_hp() / 4;
        let (mut ctx, mut party) = battle(vec![creature(1, 5)], boss, EncounterTier::Boss);

        execute_scheduled_turn(&mut ctx, &mut party, Side::Player, &data, &bonuses, &mut rng);
        let enemy = ctx.enemy.as_ref().unwrap();
        assert!(enemy.is_alive());
        assert_eq!(enemy.status.map(|s| s.kind), Some(StatusKind::Enraged));
    }

    #[test]
    fn test_poison_tick_death_routes_to_victory() {
        let mut enemy = creature(9, 10);
        enemy.status = Some(StatusEffect::new(StatusKind::Poison, 0));
        enemy.current_hp = 1;
        let (mut ctx, mut party) = battle(vec![creature(1, 10)], enemy, EncounterTier::Standard);

        let (ticks, resolution) = tick_statuses(&mut ctx, &mut party);
        assert_eq!(resolution, TurnResolution::EnemyDefeated);
        assert_eq!(ticks.len(), 1);
        assert_eq!(ticks[0].0, Side::Enemy);
        assert!(ticks[0].1.is_dead);
    }

    #[test]
    fn test_player_status_death_swaps() {
        let mut lead = creature(1, 10);
        lead.status = Some(StatusEffect::new(StatusKind::Burn, 0));
        lead.current_hp = 1;
        let (mut ctx, mut party) =
            battle(vec![lead, creature(2, 10)], creature(9, 10), EncounterTier::Standard);

        let (_, resolution) = tick_statuses(&mut ctx, &mut party);
        assert_eq!(resolution, TurnResolution::PlayerSwapped { fainted: 0, next: 1 });
    }

    #[test]
    fn test_enemy_status_ticks_after_player_swap() {
        let mut lead = creature(1, 10);
        lead.status = Some(StatusEffect::new(StatusKind::Burn, 0));
        lead.current_hp = 1;
        let mut enemy = creature(9, 10);
        enemy.status = Some(StatusEffect::new(StatusKind::Poison, 0));
        let enemy_hp = enemy.current_hp;
        let (mut ctx, mut party) =
            battle(vec![lead, creature(2, 10)], enemy, EncounterTier::Standard);

        let (ticks, resolution) = tick_statuses(&mut ctx, &mut party);
        assert_eq!(resolution, TurnResolution::PlayerSwapped { fainted: 0, next: 1 });
        let sides: Vec<_> = ticks.iter().map(|(side, _)| *side).collect();
        assert_eq!(sides, vec![Side::Player, Side::Enemy]);
        assert!(ctx.enemy.as_ref().unwrap().current_hp < enemy_hp);
    }

    #[test]
    fn test_enemy_status_death_after_swap_is_victory() {
        let mut lead = creature(1, 10);
        lead.status = Some(StatusEffect::new(StatusKind::Burn, 0));
        lead.current_hp = 1;
        let mut enemy = creature(9, 10);
        enemy.status = Some(StatusEffect::new(StatusKind::Poison, 0));
        enemy.current_hp = 1;
        let (mut ctx, mut party) =
            battle(vec![lead, creature(2, 10)], enemy, EncounterTier::Standard);

        let (ticks, resolution) = tick_statuses(&mut ctx, &mut party);
        assert_eq!(resolution, TurnResolution::EnemyDefeated);
        assert_eq!(ticks.len(), 2);
        assert_eq!(ctx.active, 1);
    }
}
