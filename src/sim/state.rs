//! Round state and core simulation types
//!
//! `RoundState` is the read-only snapshot handed to the presentation layer
//! after every mutation. Only the engine in `tick.rs` mutates it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::catalog::{Difficulty, LevelDefinition, TimeLimit};

/// Item identifier, unique within a round
pub type ItemId = u32;

/// Current phase of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    /// Pre-play countdown, no scoring
    Countdown,
    /// Active gameplay, timer running
    Playing,
    /// Timer suspended
    Paused,
    /// All targets found
    Won,
    /// Out of time or out of lives
    Lost,
}

impl RoundPhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, RoundPhase::Won | RoundPhase::Lost)
    }
}

/// Something on the board the player can click
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FindableItem {
    pub id: ItemId,
    /// Display category, mapped to a glyph by the UI
    pub category: String,
    /// Decoys only cost points when clicked
    pub is_decoy: bool,
    /// Position on the 0-100 normalized board
    pub pos: Vec2,
    /// Cosmetic scale (0.8 - 1.2)
    pub scale: f32,
    /// Cosmetic rotation in degrees (-15 - 15)
    pub rotation: f32,
    pub found: bool,
}

impl FindableItem {
    /// A target that can still be clicked for reward
    pub fn is_open_target(&self) -> bool {
        !self.is_decoy && !self.found
    }
}

/// Why a penalty was applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PenaltyKind {
    /// Click on empty background
    Miss,
    /// Click on a decoy
    Wrong,
}

/// Round outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Won,
    Lost,
}

/// Complete mutable state of one round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundState {
    pub level_id: String,
    pub difficulty: Difficulty,
    pub phase: RoundPhase,
    /// Countdown ticks left before play starts
    pub countdown: u32,
    /// Accumulated score (never negative)
    pub score: u32,
    pub time_limit: TimeLimit,
    /// Seconds left; None for unlimited levels
    pub time_remaining: Option<u32>,
    /// Lives left; None when the level has no lives
    pub lives: Option<u8>,
    pub max_lives: Option<u8>,
    /// Hint charges left; None when hints are paid with score
    pub hints_remaining: Option<u32>,
    /// Items on the board
    pub items: Vec<FindableItem>,
    /// Target currently highlighted by a hint (at most one)
    pub hint_target: Option<ItemId>,
    /// Transient wrong-click flash (cosmetic)
    pub penalty_feedback: Option<PenaltyKind>,
    /// Seconds of play time elapsed
    pub elapsed_secs: u32,
    /// Number of penalties applied
    pub penalties: u32,
    pub hints_used: u32,
}

impl RoundState {
    /// Create the starting state for a level with an already-placed board
    pub fn new(
        level: &LevelDefinition,
        items: Vec<FindableItem>,
        countdown: u32,
        hints: Option<u32>,
    ) -> Self {
        Self {
            level_id: level.id.clone(),
            difficulty: level.difficulty,
            phase: if countdown > 0 {
                RoundPhase::Countdown
            } else {
                RoundPhase::Playing
            },
            countdown,
            score: 0,
            time_limit: level.time_limit,
            time_remaining: level.time_limit.seconds(),
            lives: level.lives,
            max_lives: level.lives,
            hints_remaining: hints,
            items,
            hint_target: None,
            penalty_feedback: None,
            elapsed_secs: 0,
            penalties: 0,
            hints_used: 0,
        }
    }

    pub fn item(&self, id: ItemId) -> Option<&FindableItem> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Targets not yet found (found targets may already be removed)
    pub fn open_targets(&self) -> impl Iterator<Item = &FindableItem> {
        self.items.iter().filter(|i| i.is_open_target())
    }

    pub fn all_found(&self) -> bool {
        self.open_targets().next().is_none()
    }

    pub fn decoys(&self) -> impl Iterator<Item = &FindableItem> {
        self.items.iter().filter(|i| i.is_decoy)
    }
}

/// Immutable outcome of a finished round, produced exactly once
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerminalResult {
    pub level_id: String,
    pub difficulty: Difficulty,
    pub outcome: Outcome,
    /// Score accumulated during play
    pub base_score: u32,
    pub time_bonus: u32,
    pub life_bonus: u32,
    /// base + bonuses on a win, base on a loss
    pub final_score: u32,
    pub time_limit: TimeLimit,
    pub time_remaining: Option<u32>,
    pub lives_remaining: Option<u8>,
    pub max_lives: Option<u8>,
    pub elapsed_secs: u32,
    pub penalties: u32,
    pub hints_used: u32,
}

impl TerminalResult {
    pub fn won(&self) -> bool {
        self.outcome == Outcome::Won
    }

    /// Lives lost during the round (0 for levels without lives)
    pub fn lives_lost(&self) -> u8 {
        match (self.max_lives, self.lives_remaining) {
            (Some(max), Some(left)) => max.saturating_sub(left),
            _ => 0,
        }
    }
}

/// Notable things that happened, for the UI to animate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RoundEvent {
    Countdown { remaining: u32 },
    PhaseChanged { from: RoundPhase, to: RoundPhase },
    ItemFound { id: ItemId, reward: u32 },
    Penalty { kind: PenaltyKind },
    HintShown { id: ItemId },
    HintCleared { id: ItemId },
    PenaltyFeedbackCleared,
    Finished(TerminalResult),
}
