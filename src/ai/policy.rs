use crate::core::state::{Action, BattleState, Combatant, Item, Side};

/// Reactive opponent heuristic: 80% of the time (or always, when the bag
/// is empty) pick a random move with PP left; otherwise try an item —
/// smallest healing tier first when hurt, then a revive for a downed
/// teammate — and fall back to a move when nothing applies.
pub fn choose_action(
    state: &BattleState,
    side: Side,
    rng: &mut dyn FnMut() -> f64,
) -> Option<Action> {
    let roster = state.roster(side);
    let active = roster.active()?;
    if active.is_fainted() {
        return choose_replacement(state, side);
    }

    let roll = (rng)();
    if roll < 0.8 || !roster.has_any_item() {
        return Some(choose_move(active, rng));
    }

    if active.hp < active.max_hp / 2 {
        if roster.item_count(Item::Potion) > 0 {
            return Some(Action::UseItem {
                item: Item::Potion,
                target: roster.active_index,
            });
        }
        if roster.item_count(Item::SuperPotion) > 0 {
            return Some(Action::UseItem {
                item: Item::SuperPotion,
                target: roster.active_index,
            });
        }
    }
    if roster.item_count(Item::Revive) > 0 {
        if let Some(index) = roster.team.iter().position(|c| c.is_fainted()) {
            return Some(Action::UseItem {
                item: Item::Revive,
                target: index,
            });
        }
    }

    Some(choose_move(active, rng))
}

/// First usable team member, for the mandatory switch after a faint.
pub fn choose_replacement(state: &BattleState, side: Side) -> Option<Action> {
    let roster = state.roster(side);
    roster
        .team
        .iter()
        .position(|c| !c.is_fainted())
        .map(|index| Action::Switch { index })
}

fn choose_move(active: &Combatant, rng: &mut dyn FnMut() -> f64) -> Action {
    let usable: Vec<&str> = active
        .moves
        .iter()
        .filter(|m| m.pp > 0)
        .map(|m| m.name.as_str())
        .collect();
    if usable.is_empty() {
        return Action::Attack {
            move_name: "Struggle".to_string(),
        };
    }
    let index = (((rng)() * usable.len() as f64).floor() as usize).min(usable.len() - 1);
    Action::Attack {
        move_name: usable[index].to_string(),
    }
}
