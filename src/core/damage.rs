use crate::core::state::{Combatant, LearnedMove};
use crate::core::utils::stage_multiplier;
use crate::data::moves::Category;
use crate::data::type_chart::{Effectiveness, TypeChart};

/// Result of one attack resolution. The caller applies the damage and any
/// move effect; this function never mutates anything.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AttackResolution {
    pub hit: bool,
    pub damage: i32,
    pub effectiveness: Effectiveness,
    pub critical: bool,
}

impl AttackResolution {
    fn miss() -> Self {
        Self {
            hit: false,
            damage: 0,
            effectiveness: Effectiveness::Normal,
            critical: false,
        }
    }
}

/// Resolves whether `mv` hits `defender` and for how much.
///
/// Roll order: accuracy, then (unless immune or a status move) critical
/// hit, then the damage variance. An immunity short-circuits before the
/// crit and variance draws. The variance is drawn fresh on every hit.
pub fn resolve_attack(
    attacker: &Combatant,
    defender: &Combatant,
    mv: &LearnedMove,
    type_chart: &TypeChart,
    rng: &mut dyn FnMut() -> f64,
) -> AttackResolution {
    let accuracy_draw = ((rng)() * 100.0).floor() as i32 + 1;
    if accuracy_draw > mv.accuracy {
        return AttackResolution::miss();
    }

    if mv.power <= 0 || mv.category == Category::Status {
        return AttackResolution {
            hit: true,
            damage: 0,
            effectiveness: Effectiveness::Normal,
            critical: false,
        };
    }

    let type_multiplier = type_chart.effectiveness(mv.move_type, &defender.types);
    if type_multiplier == 0.0 {
        return AttackResolution {
            hit: true,
            damage: 0,
            effectiveness: Effectiveness::Immune,
            critical: false,
        };
    }

    let critical = (rng)() < 0.1;

    let (attack_stat, defense_stat, atk_stage, def_stage) = match mv.category {
        Category::Special => (
            attacker.sp_attack,
            defender.sp_defense,
            attacker.stages.spa,
            defender.stages.spd,
        ),
        _ => (
            attacker.attack,
            defender.defense,
            attacker.stages.atk,
            defender.stages.def,
        ),
    };

    // A critical hit ignores the defender's defensive boosts.
    let def_stage = if critical && def_stage > 0 { 0 } else { def_stage };

    let attack = attack_stat as f64 * stage_multiplier(atk_stage) as f64;
    let defense = (defense_stat as f64 * stage_multiplier(def_stage) as f64).max(1.0);

    let stab = if attacker.types.contains(&mv.move_type) {
        1.5
    } else {
        1.0
    };
    let crit_multiplier = if critical { 1.5 } else { 1.0 };
    let variance = 0.85 + (rng)() * 0.15;

    let level_factor = 2.0 * attacker.level as f64 / 5.0 + 2.0;
    let base = ((level_factor * mv.power as f64 * attack / defense) / 50.0 + 2.0).floor();
    let damage = (base * stab * type_multiplier as f64 * crit_multiplier * variance).floor() as i32;

    AttackResolution {
        hit: true,
        damage,
        effectiveness: Effectiveness::classify(type_multiplier),
        critical,
    }
}
