//! Hidden Objects - round engine for hidden-object browser games
//!
//! Core modules:
//! - `sim`: Deterministic round simulation (timer, clicks, hints, placement)
//! - `rules`: Per-variant scoring and timing rules
//! - `catalog`: Static level definitions
//! - `achievements`: Badge evaluation
//! - `progress`: Saved unlocks, best scores and badges
//! - `persistence`: Key-value storage backends
//! - `session`: Ties the above together around a round
//! - `platform`: Browser/native platform abstraction

pub mod achievements;
pub mod catalog;
pub mod persistence;
pub mod platform;
pub mod progress;
pub mod rules;
pub mod session;
pub mod sim;

pub use achievements::{AchievementDefinition, AchievementRules, Unlock};
pub use catalog::{CatalogError, Difficulty, LevelCatalog, LevelDefinition, TimeLimit};
pub use persistence::{KeyValueStore, MemoryStore, StoreError};
pub use progress::{GlobalProgress, ProgressRecord, ProgressStore};
pub use rules::{Ruleset, Variant};
pub use session::{GameSession, RoundSummary};
pub use sim::{ClickOutcome, RoundEngine, RoundPhase, RoundState, TerminalResult};

/// Game configuration constants
pub mod consts {
    /// Length of one round tick (countdown step or one second of play)
    pub const TICK_MS: u64 = 1000;

    /// Preferred minimum distance between item centers, in play-area percent
    pub const MIN_ITEM_SEPARATION: f32 = 10.0;
    /// Candidate positions tried per item before keeping the best one
    pub const MAX_PLACEMENT_ATTEMPTS: u32 = 100;
}
