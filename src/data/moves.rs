use crate::data::type_chart::Type;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Physical,
    Special,
    Status,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusCondition {
    Burn,
    Poison,
    Paralysis,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EffectTarget {
    User,
    Foe,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatKind {
    Attack,
    Defense,
    SpAttack,
    SpDefense,
    Speed,
}

/// Side effect carried as data on a move and dispatched by a fixed match
/// in `core::effects`. Applied after damage, on a successful non-immune hit.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MoveEffect {
    StatModifier {
        target: EffectTarget,
        stat: StatKind,
        delta: i32,
    },
    StatusInflict {
        status: StatusCondition,
        #[serde(default = "default_chance")]
        chance: f32,
        #[serde(default)]
        duration: Option<i32>,
    },
    Recoil {
        fraction: f32,
    },
}

fn default_chance() -> f32 {
    1.0
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MoveData {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub move_type: Type,
    pub category: Category,
    pub power: i32,
    pub accuracy: i32,
    pub pp: i32,
    #[serde(default)]
    pub effect: Option<MoveEffect>,
}

impl MoveData {
    /// Reserved fallback used when every learned move is out of PP.
    /// Not part of any catalog or moveset, and consumes no PP.
    pub fn struggle() -> Self {
        Self {
            id: "struggle".to_string(),
            name: "Struggle".to_string(),
            move_type: Type::Normal,
            category: Category::Physical,
            power: 50,
            accuracy: 100,
            pp: 1,
            effect: Some(MoveEffect::Recoil { fraction: 0.25 }),
        }
    }
}

#[derive(Clone, Debug)]
pub struct MoveDatabase {
    moves: HashMap<String, MoveData>,
}

impl MoveDatabase {
    pub fn new() -> Self {
        Self {
            moves: HashMap::new(),
        }
    }

    /// Small built-in set for tests and quick setups.
    pub fn minimal() -> Self {
        let mut db = Self::new();
        db.insert(MoveData {
            id: "tackle".to_string(),
            name: "Tackle".to_string(),
            move_type: Type::Normal,
            category: Category::Physical,
            power: 40,
            accuracy: 100,
            pp: 35,
            effect: None,
        });
        db.insert(MoveData {
            id: "ember".to_string(),
            name: "Ember".to_string(),
            move_type: Type::Fire,
            category: Category::Special,
            power: 40,
            accuracy: 100,
            pp: 25,
            effect: None,
        });
        db.insert(MoveData {
            id: "water_gun".to_string(),
            name: "Water Gun".to_string(),
            move_type: Type::Water,
            category: Category::Special,
            power: 40,
            accuracy: 100,
            pp: 25,
            effect: None,
        });
        db.insert(MoveData {
            id: "vine_whip".to_string(),
            name: "Vine Whip".to_string(),
            move_type: Type::Grass,
            category: Category::Physical,
            power: 45,
            accuracy: 100,
            pp: 25,
            effect: None,
        });
        db.insert(MoveData {
            id: "thunder_shock".to_string(),
            name: "Thunder Shock".to_string(),
            move_type: Type::Electric,
            category: Category::Special,
            power: 40,
            accuracy: 100,
            pp: 30,
            effect: None,
        });
        db.insert(MoveData {
            id: "growl".to_string(),
            name: "Growl".to_string(),
            move_type: Type::Normal,
            category: Category::Status,
            power: 0,
            accuracy: 100,
            pp: 40,
            effect: Some(MoveEffect::StatModifier {
                target: EffectTarget::Foe,
                stat: StatKind::Attack,
                delta: -1,
            }),
        });
        db
    }

    pub fn load_default() -> Result<Self, serde_yaml::Error> {
        const DEFAULT_MOVES_YAML: &str = include_str!("../../data/moves.yaml");
        Self::load_from_yaml_str(DEFAULT_MOVES_YAML)
    }

    pub fn insert(&mut self, move_data: MoveData) {
        self.moves.insert(move_data.id.clone(), move_data);
    }

    pub fn get(&self, move_id: &str) -> Option<&MoveData> {
        self.moves.get(move_id)
    }

    pub fn as_map(&self) -> &HashMap<String, MoveData> {
        &self.moves
    }

    pub fn load_from_yaml_str(yaml: &str) -> Result<Self, serde_yaml::Error> {
        let moves: Vec<MoveData> = serde_yaml::from_str(yaml)?;
        let mut db = Self::new();
        for move_data in moves {
            db.insert(move_data);
        }
        Ok(db)
    }

    pub fn load_from_yaml_file(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let content = fs::read_to_string(path)?;
        let db = Self::load_from_yaml_str(&content)?;
        Ok(db)
    }
}

impl Default for MoveDatabase {
    fn default() -> Self {
        Self::load_default().unwrap_or_else(|_| Self::minimal())
    }
}
