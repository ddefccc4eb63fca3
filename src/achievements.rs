//! Achievement badges
//!
//! Evaluation is a pure function of a winning round and the set of badges
//! already unlocked. Losses never unlock anything.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::catalog::{Difficulty, LevelDefinition};
use crate::sim::TerminalResult;

pub const ANIMAL_FRIEND: &str = "animal_friend";
pub const SHARP_EYE: &str = "sharp_eye";
pub const ZOO_GUARDIAN: &str = "zoo_guardian";
pub const SMART_BRAIN: &str = "smart_brain";
pub const LIGHTNING: &str = "lightning";
pub const PERFECT_RUN: &str = "secret_1";
pub const TIME_LORD: &str = "secret_2";
pub const SUPER_STAR: &str = "secret_3";

/// A badge in the static catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AchievementDefinition {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    /// Hidden title and description until unlocked
    pub secret: bool,
}

impl AchievementDefinition {
    pub fn display_title(&self, unlocked: bool) -> &'static str {
        if unlocked || !self.secret { self.title } else { "???" }
    }

    pub fn display_description(&self, unlocked: bool) -> &'static str {
        if unlocked || !self.secret {
            self.description
        } else {
            "A secret..."
        }
    }
}

pub const ACHIEVEMENTS: [AchievementDefinition; 8] = [
    AchievementDefinition {
        id: ZOO_GUARDIAN,
        title: "Zoo Guardian",
        description: "Win a Hard level",
        secret: false,
    },
    AchievementDefinition {
        id: SHARP_EYE,
        title: "Sharp Eye",
        description: "Win a Medium level",
        secret: false,
    },
    AchievementDefinition {
        id: ANIMAL_FRIEND,
        title: "Animal Friend",
        description: "Win an Easy level",
        secret: false,
    },
    AchievementDefinition {
        id: SMART_BRAIN,
        title: "Smart Brain",
        description: "Score more than 3000 points",
        secret: false,
    },
    AchievementDefinition {
        id: LIGHTNING,
        title: "Lightning",
        description: "Finish a level within 20 seconds",
        secret: false,
    },
    AchievementDefinition {
        id: PERFECT_RUN,
        title: "Perfect Run",
        description: "Win a Hard level without losing a life",
        secret: true,
    },
    AchievementDefinition {
        id: TIME_LORD,
        title: "Time Lord",
        description: "Finish with more than 40 seconds left",
        secret: true,
    },
    AchievementDefinition {
        id: SUPER_STAR,
        title: "Super Star",
        description: "Earn all three stars",
        secret: true,
    },
];

pub fn definition(id: &str) -> Option<&'static AchievementDefinition> {
    ACHIEVEMENTS.iter().find(|a| a.id == id)
}

/// Thresholds for the score, speed and time-surplus badges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AchievementRules {
    /// Smart Brain: final score strictly above this
    pub high_score: u32,
    /// Lightning: elapsed seconds at or below this
    pub fast_finish_secs: u32,
    /// Time Lord: seconds remaining strictly above this
    pub time_surplus_secs: u32,
}

impl Default for AchievementRules {
    fn default() -> Self {
        Self {
            high_score: 3000,
            fast_finish_secs: 20,
            time_surplus_secs: 40,
        }
    }
}

/// Badges unlocked by one evaluation
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Unlock {
    /// Full unlocked set after this round
    pub unlocked: BTreeSet<String>,
    /// Only the badges this round added
    pub newly_unlocked: Vec<&'static str>,
}

impl Unlock {
    pub fn changed(&self) -> bool {
        !self.newly_unlocked.is_empty()
    }
}

impl AchievementRules {
    /// Badges the result qualifies for, whether or not already unlocked
    pub fn earned(&self, result: &TerminalResult, level: &LevelDefinition) -> Vec<&'static str> {
        if !result.won() {
            return Vec::new();
        }

        let mut earned = Vec::new();
        match result.difficulty {
            Difficulty::Easy => earned.push(ANIMAL_FRIEND),
            Difficulty::Medium => earned.push(SHARP_EYE),
            Difficulty::Hard => earned.push(ZOO_GUARDIAN),
        }

        if result.final_score > self.high_score {
            earned.push(SMART_BRAIN);
        }

        // Penalty seconds count as elapsed, same as the clock the player saw
        let elapsed = match (result.time_limit.seconds(), result.time_remaining) {
            (Some(limit), Some(left)) => limit.saturating_sub(left),
            _ => result.elapsed_secs,
        };
        if elapsed <= self.fast_finish_secs {
            earned.push(LIGHTNING);
        }

        let flawless = match result.max_lives {
            Some(_) => result.lives_lost() == 0,
            None => result.penalties == 0,
        };
        if result.difficulty == Difficulty::Hard && flawless {
            earned.push(PERFECT_RUN);
        }

        if result.time_remaining.unwrap_or(0) > self.time_surplus_secs {
            earned.push(TIME_LORD);
        }

        if result.final_score > level.stars.three_stars {
            earned.push(SUPER_STAR);
        }

        earned
    }

    /// Merge the badges earned by `result` into `unlocked`.
    /// Badges already present are left alone and never reported again.
    pub fn evaluate(
        &self,
        result: &TerminalResult,
        level: &LevelDefinition,
        unlocked: &BTreeSet<String>,
    ) -> Unlock {
        let mut out = Unlock {
            unlocked: unlocked.clone(),
            newly_unlocked: Vec::new(),
        };
        for id in self.earned(result, level) {
            if out.unlocked.insert(id.to_string()) {
                log::info!("Achievement unlocked: {}", id);
                out.newly_unlocked.push(id);
            }
        }
        out
    }
}
