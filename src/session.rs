//! Game session: catalog, rules, achievements and saved progress for one
//! variant, glued around individual rounds.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::achievements::AchievementRules;
use crate::catalog::{CatalogError, LevelCatalog};
use crate::persistence::KeyValueStore;
use crate::progress::{GlobalProgress, ProgressStore};
use crate::rules::{Ruleset, Variant};
use crate::sim::{RoundEngine, TerminalResult};

/// Everything the results screen needs after a round
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundSummary {
    pub result: TerminalResult,
    pub stars: u8,
    pub new_achievements: Vec<&'static str>,
    /// Final score beat the previous best for this level
    pub new_level_best: bool,
    pub progress: GlobalProgress,
}

#[derive(Debug)]
pub struct GameSession<S: KeyValueStore> {
    rules: Ruleset,
    catalog: LevelCatalog,
    achievements: AchievementRules,
    progress: ProgressStore<S>,
}

impl<S: KeyValueStore> GameSession<S> {
    pub fn new(variant: Variant, store: S) -> Self {
        let rules = variant.rules();
        let catalog = LevelCatalog::for_variant(variant);
        let progress = ProgressStore::new(store, rules.storage_key.clone(), &catalog);
        Self {
            rules,
            catalog,
            achievements: AchievementRules::default(),
            progress,
        }
    }

    pub fn with_achievement_rules(mut self, achievements: AchievementRules) -> Self {
        self.achievements = achievements;
        self
    }

    pub fn variant(&self) -> Variant {
        self.rules.variant
    }

    pub fn rules(&self) -> &Ruleset {
        &self.rules
    }

    pub fn catalog(&self) -> &LevelCatalog {
        &self.catalog
    }

    pub fn progress(&self) -> GlobalProgress {
        self.progress.load()
    }

    pub fn progress_store(&self) -> &ProgressStore<S> {
        &self.progress
    }

    /// Begin a round on `level_id`. Locked levels are not refused here;
    /// level selection is the host's job.
    pub fn start_round(&self, level_id: &str, seed: u64) -> Result<RoundEngine, CatalogError> {
        let level = self.catalog.get(level_id)?;
        if !self.progress.is_unlocked(level_id) {
            log::warn!("Starting locked level {}", level_id);
        }
        Ok(RoundEngine::new(
            level,
            &self.rules,
            self.catalog.decoy_pool(),
            seed,
        ))
    }

    /// Collect a finished round: rate it, evaluate badges and persist
    /// everything in one write. The round is torn down. Returns None if the
    /// round has not ended or its result was already collected.
    pub fn finish_round(&mut self, round: &mut RoundEngine) -> Option<RoundSummary> {
        let result = round.take_result()?;
        round.teardown();
        Some(self.record(result))
    }

    /// Rate and persist a terminal result
    pub fn record(&mut self, result: TerminalResult) -> RoundSummary {
        let before = self.progress.load();
        let previous_best = before.best_score(&result.level_id);

        let (stars, unlock) = match self.catalog.get(&result.level_id) {
            Ok(level) => (
                level.stars(&result),
                self.achievements.evaluate(&result, level, &before.achievements),
            ),
            Err(e) => {
                log::warn!("Result for {}: {}", result.level_id, e);
                (0, Default::default())
            }
        };

        let unlocked: BTreeSet<String> = unlock.unlocked;
        let progress = self.progress.record_round(&result, &unlocked);

        RoundSummary {
            stars,
            new_achievements: unlock.newly_unlocked,
            new_level_best: result.final_score > previous_best,
            progress,
            result,
        }
    }

    /// Forget all saved progress for this variant
    pub fn reset_progress(&mut self) {
        self.progress.reset();
    }
}
