//! Level catalog
//!
//! Static, immutable level definitions for each variant, in tier order.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::rules::{Ruleset, Variant};
use crate::sim::{Outcome, TerminalResult};

/// Difficulty tier (ordered: Easy < Medium < Hard)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    pub(crate) fn index(&self) -> usize {
        match self {
            Difficulty::Easy => 0,
            Difficulty::Medium => 1,
            Difficulty::Hard => 2,
        }
    }
}

/// Round time limit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeLimit {
    Seconds(u32),
    Unlimited,
}

impl TimeLimit {
    pub fn seconds(&self) -> Option<u32> {
        match self {
            TimeLimit::Seconds(s) => Some(*s),
            TimeLimit::Unlimited => None,
        }
    }

    pub fn is_unlimited(&self) -> bool {
        matches!(self, TimeLimit::Unlimited)
    }
}

/// Final-score thresholds for the 2- and 3-star ratings (a win is always 1 star)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StarThresholds {
    pub two_stars: u32,
    pub three_stars: u32,
}

/// One playable level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelDefinition {
    pub id: String,
    pub name: String,
    pub description: String,
    pub difficulty: Difficulty,
    /// Target categories, one findable item each
    pub roster: Vec<String>,
    /// Score per target found
    pub item_reward: u32,
    pub decoy_count: u32,
    pub time_limit: TimeLimit,
    /// Wrong clicks allowed; None when the level has no lives
    pub lives: Option<u8>,
    pub stars: StarThresholds,
}

impl LevelDefinition {
    pub fn target_count(&self) -> usize {
        self.roster.len()
    }

    /// Star rating for a finished round on this level
    pub fn stars(&self, result: &TerminalResult) -> u8 {
        if result.outcome != Outcome::Won {
            return 0;
        }
        if result.final_score >= self.stars.three_stars {
            3
        } else if result.final_score >= self.stars.two_stars {
            2
        } else {
            1
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("unknown level id `{id}`")]
    UnknownLevel { id: String },
}

/// Categories shared by every variant; decoys are drawn from whatever the
/// level roster does not use.
pub const SHARED_CATEGORIES: [&str; 25] = [
    "Cat", "Bird", "Rabbit", "Dog", "Lion", "Fish", "Bear", "Bug", "Snail", "Turtle", "Snake",
    "Mouse", "Fox", "Owl", "Frog", "Tiger", "Panda", "Koala", "Pig", "Cow", "Chicken", "Duck",
    "Bee", "Butterfly", "Octopus",
];

/// Jungle roster; levels take the first N
const JUNGLE_ANIMALS: [&str; 16] = [
    "Lion", "Bird", "Snake", "Rabbit", "Bug", "Fish", "Pig", "Butterfly", "Squirrel", "Raven",
    "Spider", "Globe", "Frog", "Owl", "Turtle", "Fox",
];

/// All levels of one variant, in tier order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelCatalog {
    pub variant: Variant,
    levels: Vec<LevelDefinition>,
    decoy_pool: Vec<String>,
}

impl LevelCatalog {
    /// Build a catalog from explicit levels (sorted into tier order)
    pub fn new(variant: Variant, mut levels: Vec<LevelDefinition>) -> Self {
        levels.sort_by_key(|l| l.difficulty);
        Self {
            variant,
            levels,
            decoy_pool: SHARED_CATEGORIES.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn for_variant(variant: Variant) -> Self {
        match variant {
            Variant::Zoo => Self::zoo(&Ruleset::zoo()),
            Variant::Jungle => Self::jungle(&Ruleset::jungle()),
        }
    }

    fn zoo(rules: &Ruleset) -> Self {
        let level = |id: &str,
                     name: &str,
                     description: &str,
                     difficulty: Difficulty,
                     count: usize,
                     secs: u32,
                     stars: StarThresholds| {
            LevelDefinition {
                id: id.to_string(),
                name: name.to_string(),
                description: description.to_string(),
                difficulty,
                roster: SHARED_CATEGORIES[..count]
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
                item_reward: 100,
                decoy_count: rules.decoys_for(difficulty),
                time_limit: TimeLimit::Seconds(secs),
                lives: None,
                stars,
            }
        };

        Self::new(
            Variant::Zoo,
            vec![
                level(
                    "easy",
                    "Petting Zoo",
                    "A handful of friendly animals to warm up",
                    Difficulty::Easy,
                    5,
                    180,
                    StarThresholds {
                        two_stars: 3000,
                        three_stars: 4500,
                    },
                ),
                level(
                    "medium",
                    "Safari Park",
                    "More animals, less time",
                    Difficulty::Medium,
                    10,
                    120,
                    StarThresholds {
                        two_stars: 2500,
                        three_stars: 3500,
                    },
                ),
                level(
                    "hard",
                    "Night Zoo",
                    "Fifteen animals hiding among lookalikes",
                    Difficulty::Hard,
                    15,
                    60,
                    StarThresholds {
                        two_stars: 2000,
                        three_stars: 2800,
                    },
                ),
            ],
        )
    }

    fn jungle(rules: &Ruleset) -> Self {
        let level = |id: &str,
                     name: &str,
                     description: &str,
                     difficulty: Difficulty,
                     count: usize,
                     secs: u32,
                     lives: u8,
                     stars: StarThresholds| {
            LevelDefinition {
                id: id.to_string(),
                name: name.to_string(),
                description: description.to_string(),
                difficulty,
                roster: JUNGLE_ANIMALS[..count].iter().map(|s| s.to_string()).collect(),
                item_reward: 500,
                decoy_count: rules.decoys_for(difficulty),
                time_limit: TimeLimit::Seconds(secs),
                lives: Some(lives),
                stars,
            }
        };

        Self::new(
            Variant::Jungle,
            vec![
                level(
                    "easy",
                    "Easy",
                    "For beginners: basic observation practice",
                    Difficulty::Easy,
                    8,
                    50,
                    5,
                    StarThresholds {
                        two_stars: 3000,
                        three_stars: 4500,
                    },
                ),
                level(
                    "medium",
                    "Medium",
                    "More things to find",
                    Difficulty::Medium,
                    12,
                    45,
                    5,
                    StarThresholds {
                        two_stars: 4500,
                        three_stars: 6000,
                    },
                ),
                level(
                    "hard",
                    "Hard",
                    "Test your limits",
                    Difficulty::Hard,
                    16,
                    40,
                    3,
                    StarThresholds {
                        two_stars: 5500,
                        three_stars: 7000,
                    },
                ),
            ],
        )
    }

    /// Look up a level; unknown ids are a configuration error
    pub fn get(&self, id: &str) -> Result<&LevelDefinition, CatalogError> {
        self.levels
            .iter()
            .find(|l| l.id == id)
            .ok_or_else(|| CatalogError::UnknownLevel { id: id.to_string() })
    }

    /// First level (unlocked on a fresh save)
    pub fn first(&self) -> Option<&LevelDefinition> {
        self.levels.first()
    }

    /// The level unlocked by completing `id` (None for the last tier)
    pub fn next_after(&self, id: &str) -> Option<&LevelDefinition> {
        let pos = self.levels.iter().position(|l| l.id == id)?;
        self.levels.get(pos + 1)
    }

    pub fn levels(&self) -> impl Iterator<Item = &LevelDefinition> {
        self.levels.iter()
    }

    /// Categories decoys may be drawn from
    pub fn decoy_pool(&self) -> &[String] {
        &self.decoy_pool
    }
}
