//! Status effects: application, per-second ticking and hit-time procs.
//!
//! A combatant holds at most one status. Damage-over-time and duration are
//! advanced by the 1 Hz task, never per turn.

use crate::core::constants::*;
use crate::creature::Combatant;
use crate::data::{CombatData, ElementType};
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusKind {
    Poison,
    Burn,
    Paralysis,
    Enraged,
}

impl StatusKind {
    pub fn duration_seconds(&self) -> u32 {
        match self {
            StatusKind::Poison => POISON_DURATION_SECONDS,
            StatusKind::Burn => BURN_DURATION_SECONDS,
            StatusKind::Paralysis => PARALYSIS_DURATION_SECONDS,
            StatusKind::Enraged => ENRAGED_DURATION_SECONDS,
        }
    }

    /// Percent of max HP lost per tick (0 for non-damaging statuses).
    pub fn dot_percent(&self) -> f64 {
        match self {
            StatusKind::Poison => POISON_DAMAGE_PERCENT,
            StatusKind::Burn => BURN_DAMAGE_PERCENT,
            _ => 0.0,
        }
    }

    /// Multiplier on effective speed, read by the gauge scheduler.
    pub fn speed_multiplier(&self) -> f64 {
        match self {
            StatusKind::Paralysis => PARALYSIS_SPEED_MULTIPLIER,
            StatusKind::Enraged => ENRAGED_SPEED_MULTIPLIER,
            _ => 1.0,
        }
    }

    pub fn is_damaging(&self) -> bool {
        self.dot_percent() > 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatusEffect {
    pub kind: StatusKind,
    pub remaining_seconds: u32,
    /// Attack of the inflicting combatant when the status landed.
    pub source_attack: u32,
}

impl StatusEffect {
    pub fn new(kind: StatusKind, source_attack: u32) -> Self {
        Self {
            kind,
            remaining_seconds: kind.duration_seconds(),
            source_attack,
        }
    }
}

/// What one status tick did to its holder.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StatusTick {
    pub kind: Option<StatusKind>,
    pub damage: u32,
    pub expired: bool,
    /// The holder fainted from this tick.
    pub is_dead: bool,
}

/// Applies `kind`, replacing whatever status the target had.
pub fn apply(target: &mut Combatant, kind: StatusKind, source_attack: u32) {
    if target.is_alive() {
        target.status = Some(StatusEffect::new(kind, source_attack));
    }
}

pub fn clear(target: &mut Combatant) {
    target.status = None;
}

/// Damage one tick of a damaging status deals to `target`.
pub fn dot_damage(target: &Combatant, effect: &StatusEffect) -> u32 {
    if !effect.kind.is_damaging() {
        return 0;
    }
    let percent = (target.max_hp() as f64 * effect.kind.dot_percent() / 100.0).floor() as u32;
    percent.max(1) + effect.source_attack / DOT_SOURCE_ATTACK_DIVISOR
}

/// Advances the target's status by one second.
pub fn tick(target: &mut Combatant) -> StatusTick {
    let Some(mut effect) = target.status else {
        return StatusTick::default();
    };
    if !target.is_alive() {
        clear(target);
        return StatusTick::default();
    }

    let damage = dot_damage(target, &effect);
    let is_dead = damage > 0 && target.take_damage(damage);

    effect.remaining_seconds = effect.remaining_seconds.saturating_sub(1);
    let expired = effect.remaining_seconds == 0;
    if expired || is_dead {
        clear(target);
    } else {
        target.status = Some(effect);
    }

    StatusTick {
        kind: Some(effect.kind),
        damage,
        expired,
        is_dead,
    }
}

/// Status a hit of `move_type` may inflict and its proc chance, including the
/// team's Catalyst bonus. `None` when the element inflicts nothing.
pub fn proc_chance(
    data: &dyn CombatData,
    move_type: ElementType,
    catalyst_bonus: f64,
) -> Option<(StatusKind, f64)> {
    let kind = data.status_affinity(move_type)?;
    let chance = (data.proc_chance(kind) + catalyst_bonus).clamp(0.0, 1.0);
    Some((kind, chance))
}

/// Rolls a status proc for one landed hit. Targets that are fainted or
/// already afflicted are not eligible.
pub fn try_inflict(
    data: &dyn CombatData,
    target: &mut Combatant,
    move_type: ElementType,
    source_attack: u32,
    catalyst_bonus: f64,
    rng: &mut impl Rng,
) -> Option<StatusKind> {
    if !target.is_alive() || target.status.is_some() {
        return None;
    }
    let (kind, chance) = proc_chance(data, move_type, catalyst_bonus)?;
    if chance > 0.0 && rng.gen::<f64>() < chance {
        apply(target, kind, source_attack);
        Some(kind)
    } else {
        None
    }
}

/// Enrages an eligible enemy once it drops under the HP threshold.
/// Returns true when the enrage happened now.
pub fn maybe_enrage(target: &mut Combatant, eligible: bool) -> bool {
    let already = target.status.is_some_and(|s| s.kind == StatusKind::Enraged);
    if !eligible || already || !target.is_alive() {
        return false;
    }
    if target.hp_fraction() < ENRAGE_HP_THRESHOLD {
        apply(target, StatusKind::Enraged, 0);
        return true;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::creature::StatBlock;
    use crate::data::{GameData, SpeciesInfo};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn target() -> Combatant {
        Combatant::from_species(&SpeciesInfo::fallback(1), 50, StatBlock::uniform(31))
    }

    #[test]
    fn test_poison_ticks_percent_of_max_hp() {
        let mut c = target();
        let max_hp = c.max_hp();
        apply(&mut c, StatusKind::Poison, 100);

        let result = tick(&mut c);
        let expected = (max_hp as f64 * 0.06).floor() as u32 + 100 / 20;
        assert_eq!(result.damage, expected);
        assert_eq!(c.current_hp, max_hp - expected);
        assert!(!result.is_dead);
        assert_eq!(c.status.unwrap().remaining_seconds, POISON_DURATION_SECONDS - 1);
    }

    #[test]
    fn test_dot_has_minimum_of_one() {
        let mut c = target();
        c.base_stats = StatBlock::uniform(1);
        c.level = 1;
        c.heal_full();
        let effect = StatusEffect::new(StatusKind::Burn, 0);
        assert!(dot_damage(&c, &effect) >= 1);
    }

    #[test]
    fn test_status_expires_after_duration() {
        let mut c = target();
        apply(&mut c, StatusKind::Paralysis, 0);
        for _ in 0..PARALYSIS_DURATION_SECONDS - 1 {
            let result = tick(&mut c);
            assert!(!result.expired);
            assert_eq!(result.damage, 0);
        }
        let last = tick(&mut c);
        assert!(last.expired);
        assert!(c.status.is_none());
    }

    #[test]
    fn test_tick_reports_death_once() {
        let mut c = target();
        apply(&mut c, StatusKind::Poison, 0);
        c.current_hp = 1;
        let result = tick(&mut c);
        assert!(result.is_dead);
        assert_eq!(c.current_hp, 0);
        assert!(c.status.is_none(), "faint clears the status");
        assert_eq!(tick(&mut c), StatusTick::default());
    }

    #[test]
    fn test_apply_ignores_fainted_target() {
        let mut c = target();
        c.current_hp = 0;
        apply(&mut c, StatusKind::Burn, 10);
        assert!(c.status.is_none());
    }

    #[test]
    fn test_proc_chance_uses_affinity_and_catalyst() {
        let data = GameData::builtin();
        let (kind, base) = proc_chance(&data, ElementType::Fire, 0.0).unwrap();
        assert_eq!(kind, StatusKind::Burn);
        let (_, boosted) = proc_chance(&data, ElementType::Fire, 0.09).unwrap();
        assert!((boosted - base - 0.09).abs() < 1e-9);
        assert!(proc_chance(&data, ElementType::Water, 0.5).is_none());
    }

    #[test]
    fn test_try_inflict_certain_proc() {
        let data = GameData::builtin();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut c = target();
        let inflicted = try_inflict(&data, &mut c, ElementType::Poison, 40, 1.0, &mut rng);
        assert_eq!(inflicted, Some(StatusKind::Poison));
        assert_eq!(c.status.unwrap().source_attack, 40);

        // Already afflicted: no second proc
        let again = try_inflict(&data, &mut c, ElementType::Fire, 40, 1.0, &mut rng);
        assert_eq!(again, None);
        assert_eq!(c.status.unwrap().kind, StatusKind::Poison);
    }

    #[test]
    fn test_enrage_under_threshold() {
        let mut c = target();
        assert!(!maybe_enrage(&mut c, true));
        c.current_hp = c.max_hp() / 5;
        assert!(!maybe_enrage(&mut c, false));
        assert!(maybe_enrage(&mut c, true));
        assert_eq!(c.status.unwrap().kind, StatusKind::Enraged);
        assert!(!maybe_enrage(&mut c, true), "enrage triggers once");
    }
}
