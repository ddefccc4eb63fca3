//! Game variant rulesets
//!
//! Both games share one round engine; everything that differs between them
//! is a number or a switch in [`Ruleset`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::catalog::Difficulty;

/// The two hidden-object games built on the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Variant {
    /// Zoo search: decoys, no lives, hints paid with score
    #[default]
    Zoo,
    /// Jungle search: lives, a few free hints, countdown before play
    Jungle,
}

impl Variant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Zoo => "Zoo",
            Variant::Jungle => "Jungle",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "zoo" => Some(Variant::Zoo),
            "jungle" => Some(Variant::Jungle),
            _ => None,
        }
    }

    /// Ruleset used by this variant
    pub fn rules(&self) -> Ruleset {
        match self {
            Variant::Zoo => Ruleset::zoo(),
            Variant::Jungle => Ruleset::jungle(),
        }
    }
}

/// How hints are paid for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HintCost {
    /// Hint allowed once score reaches `min_score`; costs `cost` points
    ScoreThreshold { min_score: u32, cost: u32 },
    /// A fixed number of hints per round
    Counter { charges: u32 },
}

/// Rectangle (normalized 0-100 units) where items may be placed.
/// Edges outside it are reserved for HUD chrome.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayArea {
    pub min: Vec2,
    pub max: Vec2,
}

impl PlayArea {
    pub fn new(min_x: f32, min_y: f32, max_x: f32, max_y: f32) -> Self {
        Self {
            min: Vec2::new(min_x, min_y),
            max: Vec2::new(max_x, max_y),
        }
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

/// Scoring, penalty and timing rules for a variant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ruleset {
    pub variant: Variant,
    /// Score lost per wrong click (clamped at 0)
    pub penalty_score: u32,
    /// Seconds lost per wrong click on timed levels (clamped at 0)
    pub penalty_secs: u32,
    /// Win bonus per second left on the clock
    pub time_bonus_per_sec: u32,
    /// Win bonus per life left (lives-based levels only)
    pub life_bonus: u32,
    pub hint_cost: HintCost,
    /// How long a hint highlight stays up
    pub hint_duration_ms: u64,
    /// How long the wrong-click flash stays up
    pub penalty_feedback_ms: u64,
    /// 1-second countdown ticks before play starts (0 = start immediately)
    pub countdown_ticks: u32,
    /// Decoys per tier: Easy, Medium, Hard
    pub decoys_per_tier: [u32; 3],
    /// Found targets are removed from the board instead of marked found
    pub remove_found: bool,
    pub play_area: PlayArea,
    /// Key of the progress record in the key-value store
    pub storage_key: String,
}

impl Ruleset {
    pub fn zoo() -> Self {
        Self {
            variant: Variant::Zoo,
            penalty_score: 50,
            penalty_secs: 5,
            time_bonus_per_sec: 30,
            life_bonus: 0,
            hint_cost: HintCost::ScoreThreshold {
                min_score: 50,
                cost: 50,
            },
            hint_duration_ms: 2000,
            penalty_feedback_ms: 800,
            countdown_ticks: 0,
            decoys_per_tier: [2, 3, 5],
            remove_found: false,
            play_area: PlayArea::new(8.0, 25.0, 92.0, 60.0),
            storage_key: "hidden_objects_zoo_save_v1".to_string(),
        }
    }

    pub fn jungle() -> Self {
        Self {
            variant: Variant::Jungle,
            penalty_score: 100,
            penalty_secs: 3,
            time_bonus_per_sec: 50,
            life_bonus: 300,
            hint_cost: HintCost::Counter { charges: 3 },
            hint_duration_ms: 4000,
            penalty_feedback_ms: 800,
            countdown_ticks: 3,
            decoys_per_tier: [0, 0, 0],
            remove_found: true,
            play_area: PlayArea::new(10.0, 15.0, 90.0, 85.0),
            storage_key: "hidden_objects_jungle_save_v1".to_string(),
        }
    }

    /// Number of decoys placed on a level of the given tier
    pub fn decoys_for(&self, difficulty: Difficulty) -> u32 {
        self.decoys_per_tier[difficulty.index()]
    }

    /// Hint charges a round starts with (None when hints cost score)
    pub fn starting_hints(&self) -> Option<u32> {
        match self.hint_cost {
            HintCost::Counter { charges } => Some(charges),
            HintCost::ScoreThreshold { .. } => None,
        }
    }
}
