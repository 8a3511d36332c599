use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Type {
    Normal,
    Fire,
    Water,
    Electric,
    Grass,
    Ice,
    Fighting,
    Poison,
    Ground,
    Flying,
    Psychic,
    Bug,
    Rock,
    Ghost,
    Dragon,
    Dark,
    Steel,
    Fairy,
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Type::Normal => "Normal",
            Type::Fire => "Fire",
            Type::Water => "Water",
            Type::Electric => "Electric",
            Type::Grass => "Grass",
            Type::Ice => "Ice",
            Type::Fighting => "Fighting",
            Type::Poison => "Poison",
            Type::Ground => "Ground",
            Type::Flying => "Flying",
            Type::Psychic => "Psychic",
            Type::Bug => "Bug",
            Type::Rock => "Rock",
            Type::Ghost => "Ghost",
            Type::Dragon => "Dragon",
            Type::Dark => "Dark",
            Type::Steel => "Steel",
            Type::Fairy => "Fairy",
        };
        write!(f, "{}", name)
    }
}

/// Categorical result of a type matchup, for display and tests.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Effectiveness {
    Immune,
    Resisted,
    Normal,
    SuperEffective,
}

impl Effectiveness {
    pub fn classify(multiplier: f32) -> Self {
        if multiplier == 0.0 {
            Effectiveness::Immune
        } else if multiplier < 1.0 {
            Effectiveness::Resisted
        } else if multiplier > 1.0 {
            Effectiveness::SuperEffective
        } else {
            Effectiveness::Normal
        }
    }
}

#[derive(Clone, Debug)]
struct TypeEntry {
    weak_to: Vec<Type>,
    resists: Vec<Type>,
    immune_to: Vec<Type>,
}

/// Defender-oriented matchup table. Normal→Rock and Fighting→Ghost are
/// full immunities in this chart.
#[derive(Clone, Debug)]
pub struct TypeChart {
    chart: HashMap<Type, TypeEntry>,
}

impl TypeChart {
    pub fn new() -> Self {
        use Type::*;
        let mut chart = HashMap::new();
        let mut add_entry = |defender: Type, weak_to: &[Type], resists: &[Type], immune_to: &[Type]| {
            chart.insert(
                defender,
                TypeEntry {
                    weak_to: weak_to.to_vec(),
                    resists: resists.to_vec(),
                    immune_to: immune_to.to_vec(),
                },
            );
        };

        add_entry(Normal, &[Fighting], &[], &[Ghost]);
        add_entry(Fire, &[Water, Ground, Rock], &[Fire, Grass, Ice, Bug, Steel, Fairy], &[]);
        add_entry(Water, &[Electric, Grass], &[Fire, Water, Ice, Steel], &[]);
        add_entry(Electric, &[Ground], &[Electric, Flying, Steel], &[]);
        add_entry(Grass, &[Fire, Ice, Poison, Flying, Bug], &[Water, Grass, Electric, Ground], &[]);
        add_entry(Ice, &[Fire, Fighting, Rock, Steel], &[Ice], &[]);
        add_entry(Fighting, &[Flying, Psychic, Fairy], &[Bug, Rock, Dark], &[]);
        add_entry(Poison, &[Ground, Psychic], &[Grass, Fighting, Poison, Bug, Fairy], &[]);
        add_entry(Ground, &[Water, Grass, Ice], &[Poison, Rock], &[Electric]);
        add_entry(Flying, &[Electric, Ice, Rock], &[Grass, Fighting, Bug], &[Ground]);
        add_entry(Psychic, &[Bug, Ghost, Dark], &[Fighting, Psychic], &[]);
        add_entry(Bug, &[Fire, Flying, Rock], &[Grass, Fighting, Ground], &[]);
        add_entry(Rock, &[Water, Grass, Fighting, Ground, Steel], &[Fire, Poison, Flying], &[Normal]);
        add_entry(Ghost, &[Ghost, Dark], &[Poison, Bug], &[Normal, Fighting]);
        add_entry(Dragon, &[Ice, Dragon, Fairy], &[Fire, Water, Grass, Electric], &[]);
        add_entry(Dark, &[Fighting, Bug, Fairy], &[Ghost, Dark], &[Psychic]);
        add_entry(
            Steel,
            &[Fire, Fighting, Ground],
            &[Normal, Grass, Ice, Flying, Psychic, Bug, Rock, Dragon, Steel, Fairy],
            &[Poison],
        );
        add_entry(Fairy, &[Poison, Steel], &[Fighting, Bug, Dark], &[Dragon]);

        Self { chart }
    }

    /// Combined multiplier of `move_type` against all of the defender's
    /// types. An immunity on any defending type short-circuits to 0.
    pub fn effectiveness(&self, move_type: Type, defender_types: &[Type]) -> f32 {
        let mut multiplier = 1.0;
        for defender_type in defender_types {
            let Some(entry) = self.chart.get(defender_type) else {
                continue;
            };
            if entry.immune_to.contains(&move_type) {
                return 0.0;
            }
            if entry.weak_to.contains(&move_type) {
                multiplier *= 2.0;
            }
            if entry.resists.contains(&move_type) {
                multiplier *= 0.5;
            }
        }
        multiplier
    }
}

impl Default for TypeChart {
    fn default() -> Self {
        Self::new()
    }
}
