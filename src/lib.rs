pub mod ai;
pub mod core;
pub mod data;

pub use ai::{choose_action, choose_replacement};
pub use core::{
    battle::{Battle, BattleOptions, TurnOutcome},
    damage::{resolve_attack, AttackResolution},
    error::{ActionError, CatalogError},
    factory::{calc_stat, create_combatant, create_combatant_from_id, CreateCombatantOptions},
    replay::replay_battle,
    state::{
        Action, BattleHistory, BattleState, BattleTurn, ChosenAction, Combatant, Item, ItemUse,
        LearnedMove, Outcome, Roster, Side, StatStages,
    },
    utils::rng_from_seed,
};
pub use data::{
    moves::{Category, EffectTarget, MoveData, MoveDatabase, MoveEffect, StatKind, StatusCondition},
    species::{BaseStats, SpeciesData, SpeciesDatabase},
    type_chart::{Effectiveness, Type, TypeChart},
};
