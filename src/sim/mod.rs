//! Deterministic round simulation
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time advances only through explicit ticks / clock deltas
//! - Seeded RNG only
//! - No rendering, storage or platform dependencies

pub mod deferred;
pub mod placement;
pub mod state;
pub mod tick;

pub use deferred::{DeferredAction, DeferredHandle, DeferredQueue};
pub use placement::ItemPlacementGenerator;
pub use state::{
    FindableItem, ItemId, Outcome, PenaltyKind, RoundEvent, RoundPhase, RoundState,
    TerminalResult,
};
pub use tick::{ClickOutcome, RoundEngine};
