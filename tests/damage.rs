use combat_engine::core::damage::resolve_attack;
use combat_engine::{
    BaseStats, Category, Combatant, Effectiveness, LearnedMove, StatStages, Type, TypeChart,
};

fn combatant(name: &str, types: &[Type], level: u32, stats: [i32; 6]) -> Combatant {
    Combatant {
        name: name.to_string(),
        types: types.to_vec(),
        level,
        base_stats: BaseStats {
            hp: 0,
            atk: 0,
            def: 0,
            spa: 0,
            spd: 0,
            spe: 0,
        },
        max_hp: stats[0],
        attack: stats[1],
        defense: stats[2],
        sp_attack: stats[3],
        sp_defense: stats[4],
        speed: stats[5],
        hp: stats[0],
        status: None,
        status_turns: None,
        stages: StatStages::default(),
        fainted: false,
        moves: Vec::new(),
    }
}

fn learned(name: &str, ty: Type, category: Category, power: i32, accuracy: i32) -> LearnedMove {
    LearnedMove {
        name: name.to_string(),
        move_type: ty,
        category,
        power,
        accuracy,
        pp: 10,
        max_pp: 10,
        effect: None,
    }
}

/// Scripted draws; panics if the resolver consumes more than expected.
fn seq(draws: Vec<f64>) -> impl FnMut() -> f64 {
    let mut i = 0;
    move || {
        let v = draws[i];
        i += 1;
        v
    }
}

#[test]
fn stab_super_effective_damage_is_exact() {
    // Level 10 fire attacker, 40-power fire move, pure grass defender.
    // base = floor((6 * 40 * 18 / 14) / 50 + 2) = 8
    // damage = floor(8 * 1.5 * 2.0 * 0.85) = 20
    let attacker = combatant("Attacker", &[Type::Fire], 10, [30, 18, 16, 20, 18, 21]);
    let defender = combatant("Defender", &[Type::Grass], 10, [30, 15, 14, 20, 18, 15]);
    let mv = learned("Ember", Type::Fire, Category::Physical, 40, 100);
    let chart = TypeChart::new();

    let mut rng = seq(vec![0.5, 0.5, 0.0]);
    let result = resolve_attack(&attacker, &defender, &mv, &chart, &mut rng);
    assert!(result.hit);
    assert!(!result.critical);
    assert_eq!(result.effectiveness, Effectiveness::SuperEffective);
    assert_eq!(result.damage, 20);
}

#[test]
fn critical_hit_multiplies_by_half_again() {
    let attacker = combatant("Attacker", &[Type::Fire], 10, [30, 18, 16, 20, 18, 21]);
    let defender = combatant("Defender", &[Type::Grass], 10, [30, 15, 14, 20, 18, 15]);
    let mv = learned("Ember", Type::Fire, Category::Physical, 40, 100);
    let chart = TypeChart::new();

    let mut rng = seq(vec![0.5, 0.05, 0.0]);
    let result = resolve_attack(&attacker, &defender, &mv, &chart, &mut rng);
    assert!(result.critical);
    // floor(8 * 1.5 * 2.0 * 1.5 * 0.85) = 30
    assert_eq!(result.damage, 30);
}

#[test]
fn resisted_hit_is_classified_and_halved() {
    let attacker = combatant("Attacker", &[Type::Fire], 10, [30, 18, 16, 20, 18, 21]);
    let defender = combatant("Defender", &[Type::Water], 10, [30, 15, 14, 20, 18, 15]);
    let mv = learned("Ember", Type::Fire, Category::Physical, 40, 100);
    let chart = TypeChart::new();

    let mut rng = seq(vec![0.5, 0.5, 0.0]);
    let result = resolve_attack(&attacker, &defender, &mv, &chart, &mut rng);
    assert_eq!(result.effectiveness, Effectiveness::Resisted);
    // floor(8 * 1.5 * 0.5 * 0.85) = 5
    assert_eq!(result.damage, 5);
}

#[test]
fn special_moves_use_special_stats() {
    let attacker = combatant("Attacker", &[Type::Fire], 10, [30, 1, 16, 30, 18, 21]);
    let defender = combatant("Defender", &[Type::Water], 10, [30, 15, 1, 20, 10, 15]);
    let mv = learned("Swift", Type::Normal, Category::Special, 40, 100);
    let chart = TypeChart::new();

    let mut rng = seq(vec![0.5, 0.5, 0.0]);
    let result = resolve_attack(&attacker, &defender, &mv, &chart, &mut rng);
    // base = floor((6 * 40 * 30 / 10) / 50 + 2) = 16; floor(16 * 0.85) = 13
    assert_eq!(result.effectiveness, Effectiveness::Normal);
    assert_eq!(result.damage, 13);
}

#[test]
fn miss_consumes_only_the_accuracy_roll() {
    let attacker = combatant("Attacker", &[Type::Fire], 10, [30, 18, 16, 20, 18, 21]);
    let defender = combatant("Defender", &[Type::Grass], 10, [30, 15, 14, 20, 18, 15]);
    let mv = learned("Ember", Type::Fire, Category::Physical, 40, 50);
    let chart = TypeChart::new();

    // draw 0.75 -> 76 > 50 accuracy: miss. One draw only.
    let mut rng = seq(vec![0.75]);
    let result = resolve_attack(&attacker, &defender, &mv, &chart, &mut rng);
    assert!(!result.hit);
    assert_eq!(result.damage, 0);
}

#[test]
fn immunity_short_circuits_before_crit_and_variance() {
    let attacker = combatant("Attacker", &[Type::Normal], 10, [30, 18, 16, 20, 18, 21]);
    let ghost = combatant("Ghost", &[Type::Ghost], 10, [30, 15, 14, 20, 18, 15]);
    let mv = learned("Tackle", Type::Normal, Category::Physical, 40, 100);
    let chart = TypeChart::new();

    // Only the accuracy draw: the resolver must not roll crit or variance.
    let mut rng = seq(vec![0.5]);
    let result = resolve_attack(&attacker, &ghost, &mv, &chart, &mut rng);
    assert!(result.hit);
    assert_eq!(result.effectiveness, Effectiveness::Immune);
    assert_eq!(result.damage, 0);
}

#[test]
fn normal_moves_cannot_touch_rock() {
    let attacker = combatant("Attacker", &[Type::Normal], 10, [30, 18, 16, 20, 18, 21]);
    let rock = combatant("Rock", &[Type::Rock], 10, [30, 15, 14, 20, 18, 15]);
    let mv = learned("Tackle", Type::Normal, Category::Physical, 40, 100);
    let chart = TypeChart::new();

    let mut rng = seq(vec![0.5]);
    let result = resolve_attack(&attacker, &rock, &mv, &chart, &mut rng);
    assert_eq!(result.effectiveness, Effectiveness::Immune);
    assert_eq!(result.damage, 0);
}

#[test]
fn fighting_moves_cannot_touch_ghost() {
    let attacker = combatant("Attacker", &[Type::Fighting], 10, [30, 18, 16, 20, 18, 21]);
    let ghost = combatant("Ghost", &[Type::Ghost], 10, [30, 15, 14, 20, 18, 15]);
    let mv = learned("Karate Chop", Type::Fighting, Category::Physical, 50, 100);
    let chart = TypeChart::new();

    let mut rng = seq(vec![0.5]);
    let result = resolve_attack(&attacker, &ghost, &mv, &chart, &mut rng);
    assert_eq!(result.effectiveness, Effectiveness::Immune);
}

#[test]
fn immunity_holds_regardless_of_power_and_level() {
    let attacker = combatant("Attacker", &[Type::Normal], 100, [300, 250, 16, 20, 18, 21]);
    let ghost = combatant("Ghost", &[Type::Ghost], 5, [30, 15, 1, 20, 18, 15]);
    let mv = learned("Hyper Beam", Type::Normal, Category::Physical, 150, 100);
    let chart = TypeChart::new();

    let mut rng = seq(vec![0.0]);
    let result = resolve_attack(&attacker, &ghost, &mv, &chart, &mut rng);
    assert_eq!(result.damage, 0);
}

#[test]
fn dual_types_multiply_effectiveness() {
    // Fire vs grass/poison: 2.0 from grass, 1.0 from poison.
    let chart = TypeChart::new();
    assert_eq!(chart.effectiveness(Type::Fire, &[Type::Grass, Type::Poison]), 2.0);
    // Grass vs grass/poison: 0.5 from grass, 0.5 from poison.
    assert_eq!(chart.effectiveness(Type::Grass, &[Type::Grass, Type::Poison]), 0.25);
    // Ground vs electric/flying: the flying immunity wins outright.
    assert_eq!(chart.effectiveness(Type::Ground, &[Type::Electric, Type::Flying]), 0.0);
}

#[test]
fn status_moves_deal_no_damage() {
    let attacker = combatant("Attacker", &[Type::Normal], 10, [30, 18, 16, 20, 18, 21]);
    let defender = combatant("Defender", &[Type::Water], 10, [30, 15, 14, 20, 18, 15]);
    let mv = learned("Growl", Type::Normal, Category::Status, 0, 100);
    let chart = TypeChart::new();

    let mut rng = seq(vec![0.5]);
    let result = resolve_attack(&attacker, &defender, &mv, &chart, &mut rng);
    assert!(result.hit);
    assert_eq!(result.damage, 0);
    assert_eq!(result.effectiveness, Effectiveness::Normal);
}

#[test]
fn variance_spans_eighty_five_to_one_hundred_percent() {
    let attacker = combatant("Attacker", &[Type::Fire], 10, [30, 18, 16, 20, 18, 21]);
    let defender = combatant("Defender", &[Type::Grass], 10, [30, 15, 14, 20, 18, 15]);
    let mv = learned("Ember", Type::Fire, Category::Physical, 40, 100);
    let chart = TypeChart::new();

    // Low roll: floor(24 * 0.85) = 20. High roll just under 1.0:
    // floor(24 * 0.99985) = 23.
    let mut low = seq(vec![0.5, 0.5, 0.0]);
    let mut high = seq(vec![0.5, 0.5, 0.999]);
    let low_result = resolve_attack(&attacker, &defender, &mv, &chart, &mut low);
    let high_result = resolve_attack(&attacker, &defender, &mv, &chart, &mut high);
    assert_eq!(low_result.damage, 20);
    assert_eq!(high_result.damage, 23);
}
