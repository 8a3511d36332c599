use combat_engine::{
    choose_action, choose_replacement, create_combatant_from_id, rng_from_seed, Battle,
    BattleOptions, CreateCombatantOptions, Item, MoveDatabase, Outcome, Roster, Side,
    SpeciesDatabase,
};

/// Runs a fully AI-driven battle with the classic starter matchup and
/// prints the transcript. Usage: auto-battle [seed]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let seed = std::env::args()
        .nth(1)
        .map(|arg| arg.parse::<u64>())
        .transpose()?
        .unwrap_or(42);

    let species_db = SpeciesDatabase::load_default()?;
    let move_db = MoveDatabase::load_default()?;

    let mut player = Roster::new("Ash");
    for species in ["charmander", "squirtle", "bulbasaur"] {
        let combatant = create_combatant_from_id(
            &species_db,
            species,
            CreateCombatantOptions {
                level: Some(10),
                ..Default::default()
            },
            &move_db,
        )?;
        player.add_combatant(combatant)?;
    }
    player.add_item(Item::Potion, 3);
    player.add_item(Item::SuperPotion, 1);
    player.add_item(Item::Revive, 1);

    let mut opponent = Roster::new("Gary");
    opponent.add_combatant(create_combatant_from_id(
        &species_db,
        "pikachu",
        CreateCombatantOptions {
            level: Some(10),
            ..Default::default()
        },
        &move_db,
    )?)?;
    opponent.add_item(Item::Potion, 2);
    opponent.add_item(Item::SuperPotion, 1);
    opponent.add_item(Item::Revive, 1);

    let mut battle = Battle::new(player, opponent, BattleOptions::default());
    let mut rng = rng_from_seed(seed);

    let mut turns = 0;
    while battle.outcome() == Outcome::Undetermined && turns < 100 {
        turns += 1;
        for side in [Side::Player, Side::Opponent] {
            if battle.must_switch(side) {
                if let Some(action) = choose_replacement(battle.state(), side) {
                    battle.submit_action(side, action, &mut rng)?;
                }
            }
        }
        for side in [Side::Player, Side::Opponent] {
            if battle.outcome() != Outcome::Undetermined {
                break;
            }
            let Some(action) = choose_action(battle.state(), side, &mut rng) else {
                break;
            };
            battle.submit_action(side, action, &mut rng)?;
        }
    }

    for line in &battle.state().log {
        println!("{}", line);
    }
    println!();
    match battle.outcome() {
        Outcome::PlayerWin => println!("Result: {} wins", battle.state().player.name),
        Outcome::OpponentWin => println!("Result: {} wins", battle.state().opponent.name),
        Outcome::Fled => println!("Result: fled"),
        Outcome::Undetermined => println!("Result: no decision after {} turns", turns),
    }
    Ok(())
}
