use crate::core::damage::resolve_attack;
use crate::core::effects::apply_move_effect;
use crate::core::error::ActionError;
use crate::core::state::{
    Action, BattleHistory, BattleState, BattleTurn, ChosenAction, ItemUse, LearnedMove, Outcome,
    Roster, Side,
};
use crate::data::moves::StatusCondition;
use crate::data::type_chart::{Effectiveness, TypeChart};

#[derive(Clone, Debug)]
pub struct BattleOptions {
    pub record_history: bool,
}

impl Default for BattleOptions {
    fn default() -> Self {
        Self { record_history: true }
    }
}

/// What a submission did. `Pending` means the coordinator is still waiting
/// on the other side before the turn can resolve.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnOutcome {
    Pending,
    Replaced,
    Resolved(Outcome),
}

/// Turn coordinator. Collects one action per side, resolves them in speed
/// order, applies end-of-turn effects and checks end conditions. All
/// randomness flows through the injected closure, so a seeded source
/// replays the whole battle.
pub struct Battle {
    state: BattleState,
    type_chart: TypeChart,
    options: BattleOptions,
    pending_player: Option<Action>,
    pending_opponent: Option<Action>,
}

impl Battle {
    pub fn new(player: Roster, opponent: Roster, options: BattleOptions) -> Self {
        let mut state = BattleState {
            player,
            opponent,
            turn: 0,
            outcome: Outcome::Undetermined,
            log: Vec::new(),
            history: options.record_history.then(|| BattleHistory { turns: Vec::new() }),
        };
        if let Some(active) = state.opponent.active() {
            state
                .log
                .push(format!("{} sent out {}!", state.opponent.name, active.name));
        }
        if let Some(active) = state.player.active() {
            state
                .log
                .push(format!("{} sent out {}!", state.player.name, active.name));
        }
        Self::from_state(state, options)
    }

    /// Rebuilds a coordinator around an existing state, e.g. for replay.
    pub fn from_state(state: BattleState, options: BattleOptions) -> Self {
        Self {
            state,
            type_chart: TypeChart::new(),
            options,
            pending_player: None,
            pending_opponent: None,
        }
    }

    pub fn state(&self) -> &BattleState {
        &self.state
    }

    pub fn into_state(self) -> BattleState {
        self.state
    }

    pub fn outcome(&self) -> Outcome {
        self.state.outcome
    }

    /// True while `side` has a fainted active but a usable bench: the only
    /// acceptable submission is a replacement switch.
    pub fn must_switch(&self, side: Side) -> bool {
        if self.state.outcome != Outcome::Undetermined {
            return false;
        }
        let roster = self.state.roster(side);
        roster.active().map_or(false, |c| c.is_fainted()) && roster.has_usable_combatant()
    }

    /// Submits one side's action for the coming turn.
    ///
    /// A rejected submission leaves every bit of state untouched; the same
    /// side is simply asked again. `Flee` ends the battle at once, without
    /// resolving the other side's action. Once both sides have a pending
    /// action the turn resolves and the outcome is reported.
    pub fn submit_action(
        &mut self,
        side: Side,
        action: Action,
        rng: &mut dyn FnMut() -> f64,
    ) -> Result<TurnOutcome, ActionError> {
        if self.state.outcome != Outcome::Undetermined {
            return Err(ActionError::BattleOver);
        }

        if self.must_switch(side) {
            let Action::Switch { index } = action else {
                return Err(ActionError::MustSwitch);
            };
            self.state.roster_mut(side).switch_active(index)?;
            let log_start = self.state.log.len();
            let roster = self.state.roster(side);
            if let Some(active) = roster.active() {
                let line = format!("{} sent out {}!", roster.name, active.name);
                self.state.log.push(line);
            }
            self.record_turn(vec![ChosenAction { side, action: Action::Switch { index } }], log_start, Vec::new());
            return Ok(TurnOutcome::Replaced);
        }

        self.validate_action(side, &action)?;

        if let Action::Flee = action {
            let log_start = self.state.log.len();
            self.state.log.push("Got away safely!".to_string());
            self.state.outcome = Outcome::Fled;
            self.pending_player = None;
            self.pending_opponent = None;
            self.record_turn(vec![ChosenAction { side, action: Action::Flee }], log_start, Vec::new());
            return Ok(TurnOutcome::Resolved(Outcome::Fled));
        }

        match side {
            Side::Player => self.pending_player = Some(action),
            Side::Opponent => self.pending_opponent = Some(action),
        }

        if self.pending_player.is_some() && self.pending_opponent.is_some() {
            let outcome = self.resolve_turn(rng);
            Ok(TurnOutcome::Resolved(outcome))
        } else {
            Ok(TurnOutcome::Pending)
        }
    }

    fn validate_action(&self, side: Side, action: &Action) -> Result<(), ActionError> {
        let roster = self.state.roster(side);
        match action {
            Action::Attack { move_name } => {
                let active = roster.active().ok_or(ActionError::MoveNotFound)?;
                if active.is_fainted() {
                    return Err(ActionError::MustSwitch);
                }
                if move_name.eq_ignore_ascii_case("struggle") {
                    // The fallback is only reachable once every learned
                    // move has run dry.
                    if active.has_usable_move() {
                        return Err(ActionError::MoveNotFound);
                    }
                    return Ok(());
                }
                let mv = active.get_move(move_name).ok_or(ActionError::MoveNotFound)?;
                if mv.pp <= 0 {
                    return Err(ActionError::NoPPRemaining);
                }
                Ok(())
            }
            Action::Switch { index } => roster.validate_switch(*index),
            Action::UseItem { item, target } => roster.validate_item(*item, *target),
            Action::Flee => Ok(()),
        }
    }

    fn resolve_turn(&mut self, rng: &mut dyn FnMut() -> f64) -> Outcome {
        let (Some(player_action), Some(opponent_action)) =
            (self.pending_player.take(), self.pending_opponent.take())
        else {
            return self.state.outcome;
        };

        self.state.turn += 1;
        let log_start = self.state.log.len();
        let mut rng_log: Vec<f64> = Vec::new();

        self.state.log.push(format!("--- Turn {} ---", self.state.turn));

        let player_speed = self
            .state
            .player
            .active()
            .map_or(0, |c| c.effective_speed());
        let opponent_speed = self
            .state
            .opponent
            .active()
            .map_or(0, |c| c.effective_speed());
        let player_first = if player_speed != opponent_speed {
            player_speed > opponent_speed
        } else {
            // Exact speed tie: a coin flip, so neither side gets a
            // standing priority.
            let mut wrapped = wrap_recorder(rng, &mut rng_log);
            wrapped() < 0.5
        };

        let order = if player_first {
            [
                (Side::Player, player_action.clone()),
                (Side::Opponent, opponent_action.clone()),
            ]
        } else {
            [
                (Side::Opponent, opponent_action.clone()),
                (Side::Player, player_action.clone()),
            ]
        };

        {
            let (first_side, first_action) = &order[0];
            let mut wrapped = wrap_recorder(rng, &mut rng_log);
            self.execute_action(*first_side, first_action, &mut wrapped);
        }

        let (second_side, second_action) = &order[1];
        let second_can_act = !self.battle_over()
            && self
                .state
                .roster(*second_side)
                .active()
                .map_or(false, |c| !c.is_fainted());
        if second_can_act {
            let mut wrapped = wrap_recorder(rng, &mut rng_log);
            self.execute_action(*second_side, second_action, &mut wrapped);
        }

        if !self.battle_over() {
            self.apply_end_of_turn();
        }

        if !self.state.player.has_usable_combatant() {
            self.state.outcome = Outcome::OpponentWin;
            let line = format!("{} wins the battle!", self.state.opponent.name);
            self.state.log.push(line);
        } else if !self.state.opponent.has_usable_combatant() {
            self.state.outcome = Outcome::PlayerWin;
            let line = format!("{} wins the battle!", self.state.player.name);
            self.state.log.push(line);
        }

        self.record_turn(
            vec![
                ChosenAction { side: Side::Player, action: player_action },
                ChosenAction { side: Side::Opponent, action: opponent_action },
            ],
            log_start,
            rng_log,
        );

        self.state.outcome
    }

    fn battle_over(&self) -> bool {
        !self.state.player.has_usable_combatant() || !self.state.opponent.has_usable_combatant()
    }

    fn execute_action(&mut self, side: Side, action: &Action, rng: &mut dyn FnMut() -> f64) {
        match action {
            Action::Attack { move_name } => self.execute_attack(side, move_name, rng),
            Action::Switch { index } => {
                let roster = self.state.roster(side);
                let withdrawn = roster.active().map(|c| c.name.clone());
                match self.state.roster_mut(side).switch_active(*index) {
                    Ok(()) => {
                        let roster = self.state.roster(side);
                        let sent = roster.active().map(|c| c.name.clone()).unwrap_or_default();
                        let line = match withdrawn {
                            Some(old) => {
                                format!("{} withdrew {} and sent out {}!", roster.name, old, sent)
                            }
                            None => format!("{} sent out {}!", roster.name, sent),
                        };
                        self.state.log.push(line);
                    }
                    Err(_) => {
                        let name = self.state.roster(side).name.clone();
                        self.state.log.push(format!("{} couldn't switch!", name));
                    }
                }
            }
            Action::UseItem { item, target } => {
                let target_name = self
                    .state
                    .roster(side)
                    .team
                    .get(*target)
                    .map(|c| c.name.clone())
                    .unwrap_or_default();
                match self.state.roster_mut(side).use_item(*item, *target) {
                    Ok(ItemUse::Healed(amount)) => {
                        self.state
                            .log
                            .push(format!("{} recovered {} HP!", target_name, amount));
                    }
                    Ok(ItemUse::Revived(hp)) => {
                        self.state
                            .log
                            .push(format!("{} was revived with {} HP!", target_name, hp));
                    }
                    Err(_) => {
                        let name = self.state.roster(side).name.clone();
                        self.state.log.push(format!("{} has no usable item!", name));
                    }
                }
            }
            // Flee never reaches turn resolution; it terminates at submit.
            Action::Flee => {}
        }
    }

    fn execute_attack(&mut self, side: Side, move_name: &str, rng: &mut dyn FnMut() -> f64) {
        let Some(attacker) = self.state.roster(side).active().cloned() else {
            return;
        };
        if attacker.is_fainted() {
            self.state.log.push(format!("{} cannot act!", attacker.name));
            return;
        }

        if attacker.status == Some(StatusCondition::Paralysis) && (rng)() < 0.25 {
            self.state
                .log
                .push(format!("{} is fully paralyzed!", attacker.name));
            return;
        }

        let is_struggle = move_name.eq_ignore_ascii_case("struggle");
        let mv = if is_struggle {
            if attacker.has_usable_move() {
                self.state
                    .log
                    .push(format!("{} doesn't know {}!", attacker.name, move_name));
                return;
            }
            LearnedMove::struggle()
        } else {
            match attacker.get_move(move_name) {
                Some(m) => m.clone(),
                None => {
                    self.state
                        .log
                        .push(format!("{} doesn't know {}!", attacker.name, move_name));
                    return;
                }
            }
        };

        if !is_struggle {
            let consumed = self
                .state
                .roster_mut(side)
                .active_mut()
                .and_then(|active| active.get_move_mut(move_name))
                .map_or(false, |learned| learned.consume_pp());
            if !consumed {
                self.state.log.push(format!("No PP left for {}!", mv.name));
                return;
            }
        }

        self.state
            .log
            .push(format!("{} used {}!", attacker.name, mv.name));

        let defender = self.state.roster(side.other()).active().cloned();
        let Some(defender) = defender.filter(|c| !c.is_fainted()) else {
            self.state.log.push("But it failed!".to_string());
            return;
        };

        let resolution = resolve_attack(&attacker, &defender, &mv, &self.type_chart, rng);
        if !resolution.hit {
            self.state.log.push("But it missed!".to_string());
            return;
        }
        if resolution.effectiveness == Effectiveness::Immune {
            self.state.log.push("It had no effect!".to_string());
            return;
        }
        match resolution.effectiveness {
            Effectiveness::SuperEffective => {
                self.state.log.push("It's super effective!".to_string());
            }
            Effectiveness::Resisted => {
                self.state.log.push("It's not very effective...".to_string());
            }
            _ => {}
        }
        if resolution.critical {
            self.state.log.push("A critical hit!".to_string());
        }

        if resolution.damage > 0 {
            if let Some(target) = self.state.roster_mut(side.other()).active_mut() {
                let name = target.name.clone();
                let fainted = target.apply_damage(resolution.damage);
                self.state
                    .log
                    .push(format!("{} took {} damage!", name, resolution.damage));
                if fainted {
                    self.state.log.push(format!("{} fainted!", name));
                }
            }
        }

        if let Some(effect) = &mv.effect {
            apply_move_effect(&mut self.state, side, effect, resolution.damage, rng);
        }
    }

    fn apply_end_of_turn(&mut self) {
        for side in [Side::Player, Side::Opponent] {
            let mut lines = Vec::new();
            if let Some(active) = self.state.roster_mut(side).active_mut() {
                if active.is_fainted() {
                    continue;
                }
                let name = active.name.clone();
                match active.status {
                    Some(StatusCondition::Burn) => {
                        let damage = (active.max_hp / 16).max(1);
                        let fainted = active.apply_damage(damage);
                        lines.push(format!("{} is hurt by its burn!", name));
                        if fainted {
                            lines.push(format!("{} fainted!", name));
                        }
                    }
                    Some(StatusCondition::Poison) => {
                        let damage = (active.max_hp / 8).max(1);
                        let fainted = active.apply_damage(damage);
                        lines.push(format!("{} is hurt by poison!", name));
                        if fainted {
                            lines.push(format!("{} fainted!", name));
                        }
                    }
                    _ => {}
                }
                if !active.is_fainted() {
                    if let (Some(status), Some(turns)) = (active.status, active.status_turns) {
                        if turns <= 1 {
                            active.cure_status();
                            lines.push(format!("{}'s {} wore off!", name, status_noun(status)));
                        } else {
                            active.status_turns = Some(turns - 1);
                        }
                    }
                }
            }
            self.state.log.extend(lines);
        }
    }

    fn record_turn(&mut self, actions: Vec<ChosenAction>, log_start: usize, rng_log: Vec<f64>) {
        if !self.options.record_history {
            return;
        }
        let turn_log = self.state.log[log_start..].to_vec();
        let turn = self.state.turn;
        let history = self
            .state
            .history
            .get_or_insert(BattleHistory { turns: Vec::new() });
        history.turns.push(BattleTurn {
            turn,
            actions,
            log: turn_log,
            rng: rng_log,
        });
    }
}

fn status_noun(status: StatusCondition) -> &'static str {
    match status {
        StatusCondition::Burn => "burn",
        StatusCondition::Poison => "poison",
        StatusCondition::Paralysis => "paralysis",
    }
}

fn wrap_recorder<'a>(
    rng: &'a mut dyn FnMut() -> f64,
    log: &'a mut Vec<f64>,
) -> impl FnMut() -> f64 + 'a {
    move || {
        let v = rng();
        log.push(v);
        v
    }
}
