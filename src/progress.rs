//! Saved progression: per-level best scores, unlocks and achievements
//!
//! Persisted as one JSON record per variant in a key-value store. Loading is
//! forgiving (bad or partial records are merged into the defaults field by
//! field) and saving is best-effort (failures are logged, never surfaced).

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::catalog::LevelCatalog;
use crate::persistence::{KeyValueStore, StoreError};
use crate::sim::TerminalResult;

/// Progress on a single level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressRecord {
    pub unlocked: bool,
    pub high_score: u32,
}

/// Everything saved for one variant
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalProgress {
    pub levels: BTreeMap<String, ProgressRecord>,
    /// Best winning score across all levels
    pub high_score: u32,
    pub achievements: BTreeSet<String>,
}

impl GlobalProgress {
    /// Fresh save: first level unlocked, everything else locked, no scores
    pub fn defaults(catalog: &LevelCatalog) -> Self {
        let first = catalog.first().map(|l| l.id.as_str());
        let levels = catalog
            .levels()
            .map(|l| {
                (
                    l.id.clone(),
                    ProgressRecord {
                        unlocked: Some(l.id.as_str()) == first,
                        high_score: 0,
                    },
                )
            })
            .collect();
        Self {
            levels,
            high_score: 0,
            achievements: BTreeSet::new(),
        }
    }

    /// Overlay whatever fields of `value` are well-formed onto `self`.
    /// Unknown levels are kept; bad fields keep their current value.
    pub fn merge(mut self, value: &Value) -> Self {
        let Some(obj) = value.as_object() else {
            return self;
        };

        if let Some(levels) = obj.get("levels").and_then(Value::as_object) {
            for (id, raw) in levels {
                let record = self.levels.entry(id.clone()).or_default();
                if let Some(unlocked) = raw.get("unlocked").and_then(Value::as_bool) {
                    record.unlocked = unlocked;
                }
                if let Some(score) = raw.get("highScore").and_then(as_score) {
                    record.high_score = score;
                }
            }
        }

        if let Some(score) = obj.get("highScore").and_then(as_score) {
            self.high_score = score;
        }

        if let Some(list) = obj.get("achievements").and_then(Value::as_array) {
            self.achievements
                .extend(list.iter().filter_map(Value::as_str).map(str::to_string));
        }

        self
    }

    pub fn is_unlocked(&self, level_id: &str) -> bool {
        self.levels.get(level_id).is_some_and(|r| r.unlocked)
    }

    pub fn best_score(&self, level_id: &str) -> u32 {
        self.levels.get(level_id).map_or(0, |r| r.high_score)
    }

    /// Sum of per-level best scores
    pub fn total_high_score(&self) -> u32 {
        self.levels
            .values()
            .fold(0u32, |acc, r| acc.saturating_add(r.high_score))
    }

    /// Apply a finished round. `next_level` is unlocked when `completed`.
    /// Returns true if anything changed.
    pub fn record_result(
        &mut self,
        level_id: &str,
        final_score: u32,
        completed: bool,
        next_level: Option<&str>,
    ) -> bool {
        let mut changed = false;

        let record = self.levels.entry(level_id.to_string()).or_default();
        if final_score > record.high_score {
            record.high_score = final_score;
            changed = true;
        }

        if completed {
            if let Some(next) = next_level {
                let next = self.levels.entry(next.to_string()).or_default();
                if !next.unlocked {
                    next.unlocked = true;
                    changed = true;
                }
            }
            if final_score > self.high_score {
                self.high_score = final_score;
                changed = true;
            }
        }

        changed
    }

    /// Add achievement ids; returns true if any were new
    pub fn add_achievements<'a>(&mut self, ids: impl IntoIterator<Item = &'a String>) -> bool {
        let before = self.achievements.len();
        self.achievements.extend(ids.into_iter().cloned());
        self.achievements.len() != before
    }
}

fn as_score(v: &Value) -> Option<u32> {
    v.as_u64().map(|s| s.min(u32::MAX as u64) as u32)
}

/// Progress record bound to a store key
#[derive(Debug)]
pub struct ProgressStore<S: KeyValueStore> {
    store: S,
    key: String,
    defaults: GlobalProgress,
    /// Tier order, for unlocking the next level
    catalog: LevelCatalog,
}

impl<S: KeyValueStore> ProgressStore<S> {
    pub fn new(store: S, key: impl Into<String>, catalog: &LevelCatalog) -> Self {
        Self {
            store,
            key: key.into(),
            defaults: GlobalProgress::defaults(catalog),
            catalog: catalog.clone(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Current progress; defaults when nothing (usable) is stored
    pub fn load(&self) -> GlobalProgress {
        let json = match self.store.get(&self.key) {
            Ok(Some(json)) => json,
            Ok(None) => {
                log::info!("No saved progress under {}, starting fresh", self.key);
                return self.defaults.clone();
            }
            Err(e) => {
                log::warn!("Failed to load progress: {}", e);
                return self.defaults.clone();
            }
        };

        match serde_json::from_str::<Value>(&json) {
            Ok(value) => {
                let progress = self.defaults.clone().merge(&value);
                log::info!(
                    "Loaded progress: {} levels, {} achievements",
                    progress.levels.len(),
                    progress.achievements.len()
                );
                progress
            }
            Err(e) => {
                log::warn!("Saved progress is corrupt ({}), using defaults", e);
                self.defaults.clone()
            }
        }
    }

    /// Write the whole record in one `set`. Failures are logged and dropped.
    pub fn save(&mut self, progress: &GlobalProgress) -> bool {
        match self.try_save(progress) {
            Ok(()) => {
                log::info!("Progress saved under {}", self.key);
                true
            }
            Err(e) => {
                log::warn!("Failed to save progress: {}", e);
                false
            }
        }
    }

    fn try_save(&mut self, progress: &GlobalProgress) -> Result<(), StoreError> {
        let json = serde_json::to_string(progress)?;
        self.store.set(&self.key, &json)
    }

    /// Record a level score; unlocks the next tier when `completed`
    pub fn record_result(&mut self, level_id: &str, final_score: u32, completed: bool) -> GlobalProgress {
        let mut progress = self.load();
        let next = self.next_level(level_id).map(str::to_string);
        if progress.record_result(level_id, final_score, completed, next.as_deref()) {
            self.save(&progress);
        }
        progress
    }

    /// Merge achievement ids into the saved set
    pub fn record_achievements(&mut self, achievements: &BTreeSet<String>) -> GlobalProgress {
        let mut progress = self.load();
        if progress.add_achievements(achievements) {
            self.save(&progress);
        }
        progress
    }

    /// Record a finished round and its achievement set in a single write
    pub fn record_round(
        &mut self,
        result: &TerminalResult,
        achievements: &BTreeSet<String>,
    ) -> GlobalProgress {
        let mut progress = self.load();
        let next = self.next_level(&result.level_id).map(str::to_string);
        let scored = progress.record_result(
            &result.level_id,
            result.final_score,
            result.won(),
            next.as_deref(),
        );
        let badges = progress.add_achievements(achievements);
        if scored || badges {
            self.save(&progress);
        }
        progress
    }

    pub fn total_high_score(&self) -> u32 {
        self.load().total_high_score()
    }

    pub fn is_unlocked(&self, level_id: &str) -> bool {
        self.load().is_unlocked(level_id)
    }

    /// Forget all progress
    pub fn reset(&mut self) {
        match self.store.remove(&self.key) {
            Ok(()) => log::info!("Progress under {} cleared", self.key),
            Err(e) => log::warn!("Failed to clear progress: {}", e),
        }
    }

    fn next_level(&self, level_id: &str) -> Option<&str> {
        self.catalog.next_after(level_id).map(|l| l.id.as_str())
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
