use crate::core::battle::{Battle, BattleOptions};
use crate::core::state::{BattleHistory, BattleState};

/// Re-runs a recorded battle from its initial state, feeding back the RNG
/// draws captured in the history. Produces the same final state.
pub fn replay_battle(initial_state: &BattleState, history: &BattleHistory) -> BattleState {
    let mut battle = Battle::from_state(
        initial_state.clone(),
        BattleOptions { record_history: false },
    );
    for turn in &history.turns {
        let mut idx = 0usize;
        let mut rng = || {
            let v = turn.rng.get(idx).copied().unwrap_or(0.5);
            idx += 1;
            v
        };
        for chosen in &turn.actions {
            let _ = battle.submit_action(chosen.side, chosen.action.clone(), &mut rng);
        }
    }
    battle.into_state()
}
