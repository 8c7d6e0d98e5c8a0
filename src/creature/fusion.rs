//! Fusion: merging a newly obtained duplicate into an owned creature.
//!
//! The target keeps the best of each attribute. Nothing the target already
//! has can get worse, and shards are always granted.

use super::combatant::Combatant;
use super::stats::Stat;
use crate::core::constants::{FUSION_EXP_TRANSFER_RATIO, FUSION_SHARD_BASE};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FusionResult {
    /// Stats whose IV was raised by the source.
    pub improved_ivs: Vec<Stat>,
    pub exp_transferred: u64,
    pub levels_gained: u32,
    pub tokens_granted: u32,
    pub prestige_promoted: bool,
    pub shiny_promoted: bool,
    pub rarity_promoted: bool,
    pub shards: u32,
}

/// Fuses `source` into `target`.
///
/// * each IV becomes the better of the two
/// * half of the source's lifetime exp is added to the target
/// * the higher prestige tier is kept, the tier gap is paid out as upgrade tokens
/// * shiny and rarity are promoted when the source is strictly better
pub fn fuse(target: &mut Combatant, source: &Combatant) -> FusionResult {
    let mut result = FusionResult::default();

    for stat in Stat::ALL {
        let source_iv = source.ivs.get(stat);
        if source_iv > target.ivs.get(stat) {
            target.ivs.set(stat, source_iv);
            result.improved_ivs.push(stat);
        }
    }

    let transfer = (source.total_exp() as f64 * FUSION_EXP_TRANSFER_RATIO) as u64;
    result.exp_transferred = transfer;
    result.levels_gained = target.add_exp(transfer);

    result.tokens_granted = source.prestige.abs_diff(target.prestige);
    target.upgrade_tokens = target.upgrade_tokens.saturating_add(result.tokens_granted);
    if source.prestige > target.prestige {
        target.prestige = source.prestige;
        result.prestige_promoted = true;
    }

    if source.shiny && !target.shiny {
        target.shiny = true;
        result.shiny_promoted = true;
    }
    if source.rarity > target.rarity {
        target.rarity = source.rarity;
        result.rarity_promoted = true;
    }

    result.shards = FUSION_SHARD_BASE * (1 + source.rarity.index());
    target.clamp_hp();
    result
}
