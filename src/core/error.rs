use thiserror::Error;

/// Rejection of a submitted action. All variants are recoverable: the
/// battle state is untouched and the same side is re-solicited.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("no team member at that index")]
    InvalidIndex,
    #[error("that combatant is already in battle")]
    AlreadyActive,
    #[error("that combatant has fainted")]
    TargetFainted,
    #[error("that combatant has not fainted")]
    TargetNotFainted,
    #[error("no such item left")]
    NoItem,
    #[error("the active combatant does not know that move")]
    MoveNotFound,
    #[error("no PP left for that move")]
    NoPPRemaining,
    #[error("the active combatant fainted; a replacement switch is required")]
    MustSwitch,
    #[error("the battle is over")]
    BattleOver,
}

/// Setup-time failure while building combatants or teams from the catalog.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("unknown species '{0}'")]
    UnknownSpecies(String),
    #[error("unknown move '{0}'")]
    UnknownMove(String),
    #[error("a combatant can learn at most {max} moves, got {got}")]
    TooManyMoves { max: usize, got: usize },
    #[error("the team is full")]
    TeamFull,
}
