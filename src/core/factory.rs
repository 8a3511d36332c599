use crate::core::error::CatalogError;
use crate::core::state::{Combatant, LearnedMove, StatStages, MAX_MOVES};
use crate::data::moves::MoveDatabase;
use crate::data::species::{SpeciesData, SpeciesDatabase};

#[derive(Clone, Debug, Default)]
pub struct CreateCombatantOptions {
    pub name: Option<String>,
    pub level: Option<u32>,
    /// Move ids; falls back to the species' default moveset.
    pub moves: Option<Vec<String>>,
}

pub fn calc_stat(base: i32, is_hp: bool, level: i32, iv: i32, ev: i32) -> i32 {
    if is_hp {
        ((base * 2 + iv + (ev / 4)) * level) / 100 + level + 10
    } else {
        ((base * 2 + iv + (ev / 4)) * level) / 100 + 5
    }
}

pub fn create_combatant(
    species: &SpeciesData,
    options: CreateCombatantOptions,
    move_db: &MoveDatabase,
) -> Result<Combatant, CatalogError> {
    let level = options.level.unwrap_or(50);
    let iv = 31;
    let ev = 0;
    let stats = &species.base_stats;

    let move_ids = options.moves.unwrap_or_else(|| species.moves.clone());
    if move_ids.len() > MAX_MOVES {
        return Err(CatalogError::TooManyMoves {
            max: MAX_MOVES,
            got: move_ids.len(),
        });
    }
    let moves = move_ids
        .iter()
        .map(|id| {
            move_db
                .get(id)
                .map(LearnedMove::from_template)
                .ok_or_else(|| CatalogError::UnknownMove(id.clone()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let max_hp = calc_stat(stats.hp, true, level as i32, iv, ev);
    Ok(Combatant {
        name: options.name.unwrap_or_else(|| species.name.clone()),
        types: species.types.clone(),
        level,
        base_stats: stats.clone(),
        max_hp,
        attack: calc_stat(stats.atk, false, level as i32, iv, ev),
        defense: calc_stat(stats.def, false, level as i32, iv, ev),
        sp_attack: calc_stat(stats.spa, false, level as i32, iv, ev),
        sp_defense: calc_stat(stats.spd, false, level as i32, iv, ev),
        speed: calc_stat(stats.spe, false, level as i32, iv, ev),
        hp: max_hp,
        status: None,
        status_turns: None,
        stages: StatStages::default(),
        fainted: false,
        moves,
    })
}

pub fn create_combatant_from_id(
    species_db: &SpeciesDatabase,
    species_id: &str,
    options: CreateCombatantOptions,
    move_db: &MoveDatabase,
) -> Result<Combatant, CatalogError> {
    let species = species_db
        .get(species_id)
        .ok_or_else(|| CatalogError::UnknownSpecies(species_id.to_string()))?;
    create_combatant(species, options, move_db)
}
