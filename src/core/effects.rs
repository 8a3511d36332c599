use crate::core::state::{BattleState, Side};
use crate::data::moves::{EffectTarget, MoveEffect, StatKind, StatusCondition};

fn stat_label(stat: StatKind) -> &'static str {
    match stat {
        StatKind::Attack => "Attack",
        StatKind::Defense => "Defense",
        StatKind::SpAttack => "Sp. Atk",
        StatKind::SpDefense => "Sp. Def",
        StatKind::Speed => "Speed",
    }
}

fn status_label(status: StatusCondition) -> &'static str {
    match status {
        StatusCondition::Burn => "burned",
        StatusCondition::Poison => "poisoned",
        StatusCondition::Paralysis => "paralyzed",
    }
}

/// Applies the tagged effect carried by a move that just landed.
/// `damage_dealt` is the damage of the triggering hit, for recoil.
pub fn apply_move_effect(
    state: &mut BattleState,
    attacker_side: Side,
    effect: &MoveEffect,
    damage_dealt: i32,
    rng: &mut dyn FnMut() -> f64,
) {
    match effect {
        MoveEffect::StatModifier { target, stat, delta } => {
            let side = match target {
                EffectTarget::User => attacker_side,
                EffectTarget::Foe => attacker_side.other(),
            };
            let Some(combatant) = state.roster_mut(side).active_mut() else {
                return;
            };
            if combatant.is_fainted() {
                return;
            }
            let name = combatant.name.clone();
            let stage = match stat {
                StatKind::Attack => &mut combatant.stages.atk,
                StatKind::Defense => &mut combatant.stages.def,
                StatKind::SpAttack => &mut combatant.stages.spa,
                StatKind::SpDefense => &mut combatant.stages.spd,
                StatKind::Speed => &mut combatant.stages.spe,
            };
            let before = *stage;
            *stage = (*stage + delta).clamp(-6, 6);
            let label = stat_label(*stat);
            let message = if *stage == before {
                if *delta < 0 {
                    format!("{}'s {} won't go any lower!", name, label)
                } else {
                    format!("{}'s {} won't go any higher!", name, label)
                }
            } else if *delta < 0 {
                format!("{}'s {} fell!", name, label)
            } else {
                format!("{}'s {} rose!", name, label)
            };
            state.log.push(message);
        }
        MoveEffect::StatusInflict {
            status,
            chance,
            duration,
        } => {
            if *chance < 1.0 && (rng)() >= *chance as f64 {
                return;
            }
            let side = attacker_side.other();
            let Some(target) = state.roster_mut(side).active_mut() else {
                return;
            };
            if target.is_fainted() {
                return;
            }
            let name = target.name.clone();
            // Single status slot: silently no-ops when one is present.
            if target.set_status(*status, *duration) {
                state.log.push(format!("{} was {}!", name, status_label(*status)));
            }
        }
        MoveEffect::Recoil { fraction } => {
            if damage_dealt <= 0 {
                return;
            }
            let recoil = ((damage_dealt as f64 * *fraction as f64).floor() as i32).max(1);
            let Some(attacker) = state.roster_mut(attacker_side).active_mut() else {
                return;
            };
            let name = attacker.name.clone();
            let fainted = attacker.apply_damage(recoil);
            state.log.push(format!("{} is damaged by recoil!", name));
            if fainted {
                state.log.push(format!("{} fainted!", name));
            }
        }
    }
}
