//! Browser bindings
//!
//! The page owns rendering and input; it forwards clicks and frame deltas
//! here and reads back JSON snapshots.

use serde_json::json;
use wasm_bindgen::prelude::*;

use crate::achievements::ACHIEVEMENTS;
use crate::persistence::LocalStorage;
use crate::rules::Variant;
use crate::session::GameSession;
use crate::sim::{ClickOutcome, RoundEngine};

fn to_js(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// One variant's session plus the round in progress, if any
#[wasm_bindgen]
pub struct WebGame {
    session: GameSession<LocalStorage>,
    round: Option<RoundEngine>,
}

#[wasm_bindgen]
impl WebGame {
    #[wasm_bindgen(constructor)]
    pub fn new(variant: &str) -> Result<WebGame, JsValue> {
        super::init_logging();
        let variant = Variant::from_str(variant)
            .ok_or_else(|| JsValue::from_str(&format!("unknown variant `{}`", variant)))?;
        log::info!("Hidden objects ({}) starting...", variant.as_str());
        Ok(Self {
            session: GameSession::new(variant, LocalStorage),
            round: None,
        })
    }

    /// Start a new round, abandoning any round in progress
    pub fn start_round(&mut self, level_id: &str) -> Result<(), JsValue> {
        self.quit();
        let round = self
            .session
            .start_round(level_id, super::clock_seed())
            .map_err(to_js)?;
        self.round = Some(round);
        Ok(())
    }

    /// Click an item, or the background when `item_id` is undefined.
    /// Returns "found", "wrong", "miss" or "ignored".
    pub fn click(&mut self, item_id: Option<u32>) -> String {
        let outcome = match self.round.as_mut() {
            Some(round) => round.click(item_id),
            None => ClickOutcome::Ignored,
        };
        match outcome {
            ClickOutcome::Found { .. } => "found",
            ClickOutcome::Wrong => "wrong",
            ClickOutcome::Miss => "miss",
            ClickOutcome::Ignored => "ignored",
        }
        .to_string()
    }

    pub fn hint(&mut self) -> bool {
        self.round.as_mut().is_some_and(|r| r.request_hint())
    }

    pub fn toggle_pause(&mut self) {
        if let Some(round) = self.round.as_mut() {
            round.toggle_pause();
        }
    }

    /// Feed a frame delta in ms
    pub fn advance(&mut self, elapsed_ms: f64) {
        if let Some(round) = self.round.as_mut() {
            round.advance(elapsed_ms.max(0.0) as u64);
        }
    }

    /// Current round state as JSON, or null when no round is running
    pub fn snapshot(&self) -> Result<String, JsValue> {
        let state = self.round.as_ref().map(|r| r.state());
        serde_json::to_string(&state).map_err(to_js)
    }

    /// Events since the last call, as a JSON array
    pub fn events(&mut self) -> Result<String, JsValue> {
        let events = self
            .round
            .as_mut()
            .map(|r| r.drain_events())
            .unwrap_or_default();
        serde_json::to_string(&events).map_err(to_js)
    }

    /// Collect the finished round as a JSON summary. Undefined while the
    /// round is still running.
    pub fn finish(&mut self) -> Result<Option<String>, JsValue> {
        let Some(round) = self.round.as_mut() else {
            return Ok(None);
        };
        let Some(summary) = self.session.finish_round(round) else {
            return Ok(None);
        };
        self.round = None;
        serde_json::to_string(&summary).map(Some).map_err(to_js)
    }

    /// Abandon the current round without recording it
    pub fn quit(&mut self) {
        if let Some(mut round) = self.round.take() {
            round.teardown();
        }
    }

    pub fn levels(&self) -> Result<String, JsValue> {
        let progress = self.session.progress();
        let levels: Vec<_> = self
            .session
            .catalog()
            .levels()
            .map(|l| {
                json!({
                    "id": l.id,
                    "name": l.name,
                    "description": l.description,
                    "difficulty": l.difficulty,
                    "targets": l.target_count(),
                    "timeLimit": l.time_limit.seconds(),
                    "unlocked": progress.is_unlocked(&l.id),
                    "highScore": progress.best_score(&l.id),
                })
            })
            .collect();
        serde_json::to_string(&levels).map_err(to_js)
    }

    pub fn progress(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.session.progress()).map_err(to_js)
    }

    /// Badge list with secret entries masked until unlocked
    pub fn achievements(&self) -> Result<String, JsValue> {
        let unlocked = self.session.progress().achievements;
        let list: Vec<_> = ACHIEVEMENTS
            .iter()
            .map(|a| {
                let got = unlocked.contains(a.id);
                json!({
                    "id": a.id,
                    "title": a.display_title(got),
                    "description": a.display_description(got),
                    "unlocked": got,
                })
            })
            .collect();
        serde_json::to_string(&list).map_err(to_js)
    }

    pub fn reset_progress(&mut self) {
        self.session.reset_progress();
    }
}
