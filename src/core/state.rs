use crate::core::error::{ActionError, CatalogError};
use crate::core::utils::stage_multiplier;
use crate::data::moves::{Category, MoveData, MoveEffect, StatusCondition};
use crate::data::species::BaseStats;
use crate::data::type_chart::Type;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

pub const MAX_TEAM_SIZE: usize = 6;
pub const MAX_MOVES: usize = 4;

/// In-battle stat stages, clamped to ±6. These scale the derived stats
/// without ever mutating them, and persist across switches.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatStages {
    pub atk: i32,
    pub def: i32,
    pub spa: i32,
    pub spd: i32,
    pub spe: i32,
}

/// A move as learned by one combatant: the template data plus this
/// instance's remaining PP.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LearnedMove {
    pub name: String,
    #[serde(rename = "type")]
    pub move_type: Type,
    pub category: Category,
    pub power: i32,
    pub accuracy: i32,
    pub pp: i32,
    pub max_pp: i32,
    #[serde(default)]
    pub effect: Option<MoveEffect>,
}

impl LearnedMove {
    pub fn from_template(template: &MoveData) -> Self {
        Self {
            name: template.name.clone(),
            move_type: template.move_type,
            category: template.category,
            power: template.power,
            accuracy: template.accuracy,
            pp: template.pp,
            max_pp: template.pp,
            effect: template.effect.clone(),
        }
    }

    pub fn struggle() -> Self {
        Self::from_template(&MoveData::struggle())
    }

    /// One invocation attempt. PP is spent even if the hit is later
    /// negated by immunity.
    pub fn consume_pp(&mut self) -> bool {
        if self.pp <= 0 {
            return false;
        }
        self.pp -= 1;
        true
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Combatant {
    pub name: String,
    pub types: Vec<Type>,
    pub level: u32,
    pub base_stats: BaseStats,
    pub max_hp: i32,
    pub attack: i32,
    pub defense: i32,
    pub sp_attack: i32,
    pub sp_defense: i32,
    pub speed: i32,
    pub hp: i32,
    pub status: Option<StatusCondition>,
    pub status_turns: Option<i32>,
    pub stages: StatStages,
    pub fainted: bool,
    pub moves: Vec<LearnedMove>,
}

impl Combatant {
    pub fn is_fainted(&self) -> bool {
        self.fainted
    }

    /// Clamps to 0 and triggers the faint transition exactly when HP
    /// reaches 0. Returns true if this call caused the faint.
    pub fn apply_damage(&mut self, amount: i32) -> bool {
        self.hp = (self.hp - amount.max(0)).max(0);
        if self.hp == 0 && !self.fainted {
            self.faint();
            return true;
        }
        false
    }

    /// Clamps to max HP. Legal on a full combatant, illegal on a fainted
    /// one (revive is the only way back).
    pub fn heal(&mut self, amount: i32) -> Result<(), ActionError> {
        if self.fainted {
            return Err(ActionError::TargetFainted);
        }
        self.hp = (self.hp + amount.max(0)).min(self.max_hp);
        Ok(())
    }

    pub fn revive(&mut self) -> Result<(), ActionError> {
        if !self.fainted {
            return Err(ActionError::TargetNotFainted);
        }
        self.fainted = false;
        self.hp = self.max_hp / 2;
        Ok(())
    }

    fn faint(&mut self) {
        self.fainted = true;
        self.status = None;
        self.status_turns = None;
        self.stages = StatStages::default();
    }

    /// Single status slot: a second status never replaces the first.
    /// Returns whether the status was applied.
    pub fn set_status(&mut self, status: StatusCondition, duration: Option<i32>) -> bool {
        if self.status.is_some() {
            return false;
        }
        self.status = Some(status);
        self.status_turns = duration;
        true
    }

    pub fn cure_status(&mut self) {
        self.status = None;
        self.status_turns = None;
    }

    pub fn get_move(&self, name: &str) -> Option<&LearnedMove> {
        self.moves.iter().find(|m| m.name.eq_ignore_ascii_case(name))
    }

    pub fn get_move_mut(&mut self, name: &str) -> Option<&mut LearnedMove> {
        self.moves.iter_mut().find(|m| m.name.eq_ignore_ascii_case(name))
    }

    pub fn has_usable_move(&self) -> bool {
        self.moves.iter().any(|m| m.pp > 0)
    }

    /// Speed after stat stages and paralysis, used for turn ordering.
    pub fn effective_speed(&self) -> i32 {
        let mut speed = self.speed as f32 * stage_multiplier(self.stages.spe);
        if self.status == Some(StatusCondition::Paralysis) {
            speed *= 0.5;
        }
        speed.round() as i32
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Item {
    Potion,
    SuperPotion,
    Revive,
}

impl Item {
    /// Fixed heal tiers; revive restores half of max HP instead.
    pub fn heal_amount(&self) -> Option<i32> {
        match self {
            Item::Potion => Some(20),
            Item::SuperPotion => Some(50),
            Item::Revive => None,
        }
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Item::Potion => "Potion",
            Item::SuperPotion => "Super Potion",
            Item::Revive => "Revive",
        };
        write!(f, "{}", name)
    }
}

/// What a successful item use did, for transcript logging.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ItemUse {
    Healed(i32),
    Revived(i32),
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Roster {
    pub name: String,
    pub team: Vec<Combatant>,
    pub active_index: usize,
    #[serde(default)]
    pub items: HashMap<Item, u32>,
}

impl Roster {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            team: Vec::new(),
            active_index: 0,
            items: HashMap::new(),
        }
    }

    pub fn add_combatant(&mut self, combatant: Combatant) -> Result<(), CatalogError> {
        if self.team.len() >= MAX_TEAM_SIZE {
            return Err(CatalogError::TeamFull);
        }
        self.team.push(combatant);
        Ok(())
    }

    pub fn add_item(&mut self, item: Item, count: u32) {
        *self.items.entry(item).or_insert(0) += count;
    }

    pub fn item_count(&self, item: Item) -> u32 {
        self.items.get(&item).copied().unwrap_or(0)
    }

    pub fn has_any_item(&self) -> bool {
        self.items.values().any(|count| *count > 0)
    }

    pub fn active(&self) -> Option<&Combatant> {
        self.team.get(self.active_index)
    }

    pub fn active_mut(&mut self) -> Option<&mut Combatant> {
        self.team.get_mut(self.active_index)
    }

    pub fn validate_switch(&self, index: usize) -> Result<(), ActionError> {
        let target = self.team.get(index).ok_or(ActionError::InvalidIndex)?;
        if target.is_fainted() {
            return Err(ActionError::TargetFainted);
        }
        if index == self.active_index {
            return Err(ActionError::AlreadyActive);
        }
        Ok(())
    }

    /// Pure index change; stats, stages and status persist across switches.
    pub fn switch_active(&mut self, index: usize) -> Result<(), ActionError> {
        self.validate_switch(index)?;
        self.active_index = index;
        Ok(())
    }

    pub fn validate_item(&self, item: Item, target: usize) -> Result<(), ActionError> {
        if self.item_count(item) == 0 {
            return Err(ActionError::NoItem);
        }
        let combatant = self.team.get(target).ok_or(ActionError::InvalidIndex)?;
        match item.heal_amount() {
            Some(_) if combatant.is_fainted() => Err(ActionError::TargetFainted),
            None if !combatant.is_fainted() => Err(ActionError::TargetNotFainted),
            _ => Ok(()),
        }
    }

    /// Applies the item to the team member at `target` and decrements the
    /// count by exactly one. Any failure leaves the inventory unchanged.
    pub fn use_item(&mut self, item: Item, target: usize) -> Result<ItemUse, ActionError> {
        self.validate_item(item, target)?;
        let combatant = self.team.get_mut(target).ok_or(ActionError::InvalidIndex)?;
        let outcome = match item.heal_amount() {
            Some(amount) => {
                combatant.heal(amount)?;
                ItemUse::Healed(amount)
            }
            None => {
                combatant.revive()?;
                ItemUse::Revived(combatant.hp)
            }
        };
        if let Some(count) = self.items.get_mut(&item) {
            *count -= 1;
        }
        Ok(outcome)
    }

    pub fn has_usable_combatant(&self) -> bool {
        self.team.iter().any(|c| !c.is_fainted())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Player,
    Opponent,
}

impl Side {
    pub fn other(&self) -> Side {
        match self {
            Side::Player => Side::Opponent,
            Side::Opponent => Side::Player,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Undetermined,
    PlayerWin,
    OpponentWin,
    Fled,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    Attack { move_name: String },
    Switch { index: usize },
    UseItem { item: Item, target: usize },
    Flee,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChosenAction {
    pub side: Side,
    pub action: Action,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BattleTurn {
    pub turn: u32,
    pub actions: Vec<ChosenAction>,
    pub log: Vec<String>,
    pub rng: Vec<f64>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BattleHistory {
    pub turns: Vec<BattleTurn>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BattleState {
    pub player: Roster,
    pub opponent: Roster,
    pub turn: u32,
    pub outcome: Outcome,
    #[serde(default)]
    pub log: Vec<String>,
    pub history: Option<BattleHistory>,
}

impl BattleState {
    pub fn roster(&self, side: Side) -> &Roster {
        match side {
            Side::Player => &self.player,
            Side::Opponent => &self.opponent,
        }
    }

    pub fn roster_mut(&mut self, side: Side) -> &mut Roster {
        match side {
            Side::Player => &mut self.player,
            Side::Opponent => &mut self.opponent,
        }
    }
}
