use combat_engine::{
    choose_action, choose_replacement, Action, BaseStats, BattleState, Category, Combatant, Item,
    LearnedMove, Outcome, Roster, Side, StatStages, Type,
};

fn learned(name: &str, pp: i32) -> LearnedMove {
    LearnedMove {
        name: name.to_string(),
        move_type: Type::Normal,
        category: Category::Physical,
        power: 40,
        accuracy: 100,
        pp,
        max_pp: 35,
        effect: None,
    }
}

fn combatant(name: &str, hp: i32, moves: Vec<LearnedMove>) -> Combatant {
    Combatant {
        name: name.to_string(),
        types: vec![Type::Normal],
        level: 10,
        base_stats: BaseStats {
            hp: 0,
            atk: 0,
            def: 0,
            spa: 0,
            spd: 0,
            spe: 0,
        },
        max_hp: 30,
        attack: 10,
        defense: 10,
        sp_attack: 10,
        sp_defense: 10,
        speed: 10,
        hp,
        status: None,
        status_turns: None,
        stages: StatStages::default(),
        fainted: false,
        moves,
    }
}

fn state_with_opponent(opponent: Roster) -> BattleState {
    let mut player = Roster::new("Hero");
    player
        .add_combatant(combatant("Alpha", 30, vec![learned("Tackle", 35)]))
        .expect("add");
    BattleState {
        player,
        opponent,
        turn: 0,
        outcome: Outcome::Undetermined,
        log: Vec::new(),
        history: None,
    }
}

fn seq(draws: Vec<f64>) -> impl FnMut() -> f64 {
    let mut i = 0;
    move || {
        let v = draws[i];
        i += 1;
        v
    }
}

#[test]
fn picks_uniformly_among_moves_with_pp() {
    let mut opponent = Roster::new("Rival");
    opponent
        .add_combatant(combatant(
            "Beta",
            30,
            vec![learned("Tackle", 35), learned("Scratch", 0), learned("Growl", 40)],
        ))
        .expect("add");
    let state = state_with_opponent(opponent);

    // Below the 0.8 threshold: a move is chosen from the two with PP left.
    let mut rng = seq(vec![0.0, 0.0]);
    assert_eq!(
        choose_action(&state, Side::Opponent, &mut rng),
        Some(Action::Attack { move_name: "Tackle".to_string() })
    );

    // The drained move is never in the pool: index 1 is Growl.
    let mut rng = seq(vec![0.5, 0.9]);
    assert_eq!(
        choose_action(&state, Side::Opponent, &mut rng),
        Some(Action::Attack { move_name: "Growl".to_string() })
    );
}

#[test]
fn empty_bag_always_attacks() {
    let mut opponent = Roster::new("Rival");
    opponent
        .add_combatant(combatant("Beta", 5, vec![learned("Tackle", 35)]))
        .expect("add");
    let state = state_with_opponent(opponent);

    // Even on an item roll there is no item to reach for.
    let mut rng = seq(vec![0.95, 0.0]);
    assert_eq!(
        choose_action(&state, Side::Opponent, &mut rng),
        Some(Action::Attack { move_name: "Tackle".to_string() })
    );
}

#[test]
fn hurt_active_heals_with_the_smallest_tier_first() {
    let mut opponent = Roster::new("Rival");
    opponent
        .add_combatant(combatant("Beta", 10, vec![learned("Tackle", 35)]))
        .expect("add");
    opponent.add_item(Item::Potion, 1);
    opponent.add_item(Item::SuperPotion, 1);
    let state = state_with_opponent(opponent);

    let mut rng = seq(vec![0.9]);
    assert_eq!(
        choose_action(&state, Side::Opponent, &mut rng),
        Some(Action::UseItem { item: Item::Potion, target: 0 })
    );
}

#[test]
fn super_potion_is_the_fallback_tier() {
    let mut opponent = Roster::new("Rival");
    opponent
        .add_combatant(combatant("Beta", 10, vec![learned("Tackle", 35)]))
        .expect("add");
    opponent.add_item(Item::SuperPotion, 2);
    let state = state_with_opponent(opponent);

    let mut rng = seq(vec![0.9]);
    assert_eq!(
        choose_action(&state, Side::Opponent, &mut rng),
        Some(Action::UseItem { item: Item::SuperPotion, target: 0 })
    );
}

#[test]
fn revives_a_fallen_teammate_when_healthy() {
    let mut opponent = Roster::new("Rival");
    opponent
        .add_combatant(combatant("Beta", 30, vec![learned("Tackle", 35)]))
        .expect("add");
    let mut downed = combatant("Gamma", 30, vec![learned("Tackle", 35)]);
    downed.apply_damage(100);
    opponent.add_combatant(downed).expect("add");
    opponent.add_item(Item::Revive, 1);
    let state = state_with_opponent(opponent);

    let mut rng = seq(vec![0.9]);
    assert_eq!(
        choose_action(&state, Side::Opponent, &mut rng),
        Some(Action::UseItem { item: Item::Revive, target: 1 })
    );
}

#[test]
fn inapplicable_items_fall_back_to_a_move() {
    // Healthy active, nobody fainted: the potion in the bag is useless.
    let mut opponent = Roster::new("Rival");
    opponent
        .add_combatant(combatant("Beta", 30, vec![learned("Tackle", 35)]))
        .expect("add");
    opponent.add_item(Item::Potion, 2);
    let state = state_with_opponent(opponent);

    let mut rng = seq(vec![0.9, 0.0]);
    assert_eq!(
        choose_action(&state, Side::Opponent, &mut rng),
        Some(Action::Attack { move_name: "Tackle".to_string() })
    );
}

#[test]
fn struggles_when_every_move_is_dry() {
    let mut opponent = Roster::new("Rival");
    opponent
        .add_combatant(combatant(
            "Beta",
            30,
            vec![learned("Tackle", 0), learned("Growl", 0)],
        ))
        .expect("add");
    let state = state_with_opponent(opponent);

    let mut rng = seq(vec![0.1]);
    assert_eq!(
        choose_action(&state, Side::Opponent, &mut rng),
        Some(Action::Attack { move_name: "Struggle".to_string() })
    );
}

#[test]
fn fainted_active_forces_a_replacement() {
    let mut opponent = Roster::new("Rival");
    let mut downed = combatant("Beta", 30, vec![learned("Tackle", 35)]);
    downed.apply_damage(100);
    opponent.add_combatant(downed).expect("add");
    opponent
        .add_combatant(combatant("Gamma", 30, vec![learned("Tackle", 35)]))
        .expect("add");
    let state = state_with_opponent(opponent);

    let mut rng = seq(vec![]);
    assert_eq!(
        choose_action(&state, Side::Opponent, &mut rng),
        Some(Action::Switch { index: 1 })
    );
}

#[test]
fn replacement_is_the_first_usable_member() {
    let mut opponent = Roster::new("Rival");
    for name in ["Beta", "Gamma", "Delta"] {
        opponent
            .add_combatant(combatant(name, 30, vec![learned("Tackle", 35)]))
            .expect("add");
    }
    opponent.team[0].apply_damage(100);
    opponent.team[1].apply_damage(100);
    let state = state_with_opponent(opponent);

    assert_eq!(
        choose_replacement(&state, Side::Opponent),
        Some(Action::Switch { index: 2 })
    );
}

#[test]
fn no_replacement_when_the_whole_team_is_down() {
    let mut opponent = Roster::new("Rival");
    let mut downed = combatant("Beta", 30, vec![learned("Tackle", 35)]);
    downed.apply_damage(100);
    opponent.add_combatant(downed).expect("add");
    let state = state_with_opponent(opponent);

    assert_eq!(choose_replacement(&state, Side::Opponent), None);
}
