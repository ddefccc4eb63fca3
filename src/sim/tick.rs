//! Round engine
//!
//! One state machine drives every variant:
//! `Countdown -> Playing <-> Paused`, `Playing -> Won | Lost`.
//! Time only moves through [`RoundEngine::tick`] (one second of play) or
//! [`RoundEngine::advance`] (wall-clock delta from the host), so a paused or
//! torn-down round cannot be touched by a stray timer.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::deferred::{DeferredAction, DeferredHandle, DeferredQueue};
use super::placement::ItemPlacementGenerator;
use super::state::{
    FindableItem, ItemId, Outcome, PenaltyKind, RoundEvent, RoundPhase, RoundState,
    TerminalResult,
};
use crate::catalog::LevelDefinition;
use crate::consts::TICK_MS;
use crate::rules::{HintCost, Ruleset};

/// What a click did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// A target was found
    Found { id: ItemId, reward: u32 },
    /// A decoy was clicked and penalized
    Wrong,
    /// Empty background was clicked and penalized
    Miss,
    /// Not playing, unknown id, or already found
    Ignored,
}

/// A single round of play
#[derive(Debug, Clone)]
pub struct RoundEngine {
    state: RoundState,
    rules: Ruleset,
    item_reward: u32,
    seed: u64,
    rng: Pcg32,
    /// Wall-clock ms since the round started (runs while paused)
    now_ms: u64,
    /// Progress toward the next 1-second tick (frozen while paused)
    tick_progress_ms: u64,
    deferred: DeferredQueue,
    hint_expiry: Option<DeferredHandle>,
    feedback_clear: Option<DeferredHandle>,
    events: Vec<RoundEvent>,
    result: Option<TerminalResult>,
    torn_down: bool,
}

impl RoundEngine {
    /// Start a round on `level`, generating a fresh board from `seed`
    pub fn new(level: &LevelDefinition, rules: &Ruleset, decoy_pool: &[String], seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let items = ItemPlacementGenerator::new(rules.play_area).generate(level, decoy_pool, &mut rng);
        Self::with_rng(level, rules, items, seed, rng)
    }

    /// Start a round on a board laid out by the caller
    pub fn with_items(
        level: &LevelDefinition,
        rules: &Ruleset,
        items: Vec<FindableItem>,
        seed: u64,
    ) -> Self {
        Self::with_rng(level, rules, items, seed, Pcg32::seed_from_u64(seed))
    }

    fn with_rng(
        level: &LevelDefinition,
        rules: &Ruleset,
        items: Vec<FindableItem>,
        seed: u64,
        rng: Pcg32,
    ) -> Self {
        let state = RoundState::new(level, items, rules.countdown_ticks, rules.starting_hints());
        log::info!(
            "Round started: {} {} ({:?}), {} items, seed {}",
            rules.variant.as_str(),
            level.id,
            level.difficulty,
            state.items.len(),
            seed
        );
        Self {
            state,
            rules: rules.clone(),
            item_reward: level.item_reward,
            seed,
            rng,
            now_ms: 0,
            tick_progress_ms: 0,
            deferred: DeferredQueue::new(),
            hint_expiry: None,
            feedback_clear: None,
            events: Vec::new(),
            result: None,
            torn_down: false,
        }
    }

    /// Read-only snapshot of the round
    pub fn state(&self) -> &RoundState {
        &self.state
    }

    pub fn rules(&self) -> &Ruleset {
        &self.rules
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn phase(&self) -> RoundPhase {
        self.state.phase
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Deferred actions still waiting to fire
    pub fn pending_deferred(&self) -> usize {
        self.deferred.len()
    }

    /// Events since the last drain
    pub fn drain_events(&mut self) -> Vec<RoundEvent> {
        std::mem::take(&mut self.events)
    }

    /// The terminal result, if the round has ended and it was not taken yet
    pub fn result(&self) -> Option<&TerminalResult> {
        self.result.as_ref()
    }

    /// Hand out the terminal result. Returns it once; later calls get None.
    pub fn take_result(&mut self) -> Option<TerminalResult> {
        self.result.take()
    }

    /// Stop the round for good: pending deferred actions are cancelled and
    /// every later call is a no-op.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;
        self.deferred.cancel_all();
        self.hint_expiry = None;
        self.feedback_clear = None;
        log::debug!("Round {} torn down", self.state.level_id);
    }

    /// Advance the round's clocks by a wall-clock delta.
    ///
    /// Whole seconds of countdown/play become [`tick`](Self::tick)s; paused
    /// time never counts toward the next tick. Deferred clears run on wall
    /// time and fire in due order, interleaved with ticks.
    pub fn advance(&mut self, elapsed_ms: u64) {
        if self.torn_down {
            return;
        }
        let mut remaining = elapsed_ms;
        loop {
            let ticking = self.is_ticking();
            let to_tick = if ticking {
                TICK_MS - self.tick_progress_ms
            } else {
                u64::MAX
            };
            let to_deferred = self
                .deferred
                .next_due()
                .map(|due| due.saturating_sub(self.now_ms))
                .unwrap_or(u64::MAX);

            let step = to_tick.min(to_deferred).min(remaining);
            self.now_ms += step;
            remaining -= step;
            if ticking {
                self.tick_progress_ms += step;
            }

            while let Some(action) = self.deferred.pop_due(self.now_ms) {
                self.fire(action);
            }
            if ticking && self.tick_progress_ms >= TICK_MS {
                self.tick_progress_ms = 0;
                self.tick();
            }

            if remaining == 0 {
                break;
            }
        }
    }

    fn is_ticking(&self) -> bool {
        matches!(self.state.phase, RoundPhase::Countdown | RoundPhase::Playing)
    }

    /// One second of round time
    pub fn tick(&mut self) {
        if self.torn_down {
            return;
        }
        match self.state.phase {
            RoundPhase::Countdown => {
                self.state.countdown = self.state.countdown.saturating_sub(1);
                self.events.push(RoundEvent::Countdown {
                    remaining: self.state.countdown,
                });
                if self.state.countdown == 0 {
                    self.set_phase(RoundPhase::Playing);
                }
            }
            RoundPhase::Playing => {
                self.state.elapsed_secs += 1;
                if let Some(t) = self.state.time_remaining.as_mut() {
                    *t = t.saturating_sub(1);
                }
                self.check_end();
            }
            RoundPhase::Paused | RoundPhase::Won | RoundPhase::Lost => {}
        }
    }

    /// Resolve a click on an item, or on the background when `target` is None
    pub fn click(&mut self, target: Option<ItemId>) -> ClickOutcome {
        if self.torn_down || self.state.phase != RoundPhase::Playing {
            return ClickOutcome::Ignored;
        }

        let Some(id) = target else {
            self.apply_penalty(PenaltyKind::Miss);
            return ClickOutcome::Miss;
        };
        let Some(idx) = self.state.items.iter().position(|i| i.id == id) else {
            return ClickOutcome::Ignored;
        };

        let item = &self.state.items[idx];
        if item.is_decoy {
            self.apply_penalty(PenaltyKind::Wrong);
            return ClickOutcome::Wrong;
        }
        if item.found {
            return ClickOutcome::Ignored;
        }

        if self.rules.remove_found {
            self.state.items.remove(idx);
        } else {
            self.state.items[idx].found = true;
        }
        let reward = self.item_reward;
        self.state.score = self.state.score.saturating_add(reward);
        self.events.push(RoundEvent::ItemFound { id, reward });

        if self.state.hint_target == Some(id) {
            self.clear_hint();
        }

        self.check_end();
        ClickOutcome::Found { id, reward }
    }

    /// Highlight a random unfound target. Returns false (and changes
    /// nothing) when a hint is already showing, nothing is left to find,
    /// or the player cannot pay for it.
    pub fn request_hint(&mut self) -> bool {
        if self.torn_down
            || self.state.phase != RoundPhase::Playing
            || self.state.hint_target.is_some()
        {
            return false;
        }

        let open: Vec<ItemId> = self.state.open_targets().map(|i| i.id).collect();
        if open.is_empty() {
            return false;
        }

        match self.rules.hint_cost {
            HintCost::ScoreThreshold { min_score, cost } => {
                if self.state.score < min_score {
                    return false;
                }
                self.state.score = self.state.score.saturating_sub(cost);
            }
            HintCost::Counter { .. } => match self.state.hints_remaining.as_mut() {
                Some(n) if *n > 0 => *n -= 1,
                _ => return false,
            },
        }

        let id = open[self.rng.random_range(0..open.len())];
        self.state.hint_target = Some(id);
        self.state.hints_used += 1;
        self.hint_expiry = Some(self.deferred.schedule(
            self.now_ms + self.rules.hint_duration_ms,
            DeferredAction::ExpireHint(id),
        ));
        self.events.push(RoundEvent::HintShown { id });
        log::debug!("Hint on item {}", id);
        true
    }

    /// Playing <-> Paused. No-op in any other phase.
    pub fn toggle_pause(&mut self) {
        if self.torn_down {
            return;
        }
        match self.state.phase {
            RoundPhase::Playing => self.set_phase(RoundPhase::Paused),
            RoundPhase::Paused => self.set_phase(RoundPhase::Playing),
            _ => {}
        }
    }

    fn set_phase(&mut self, to: RoundPhase) {
        let from = self.state.phase;
        if from != to {
            self.state.phase = to;
            self.events.push(RoundEvent::PhaseChanged { from, to });
        }
    }

    /// Score, time and lives change together; then the round may end
    fn apply_penalty(&mut self, kind: PenaltyKind) {
        let state = &mut self.state;
        state.score = state.score.saturating_sub(self.rules.penalty_score);
        if let Some(t) = state.time_remaining.as_mut() {
            *t = t.saturating_sub(self.rules.penalty_secs);
        }
        if let Some(l) = state.lives.as_mut() {
            *l = l.saturating_sub(1);
        }
        state.penalties += 1;
        state.penalty_feedback = Some(kind);

        if let Some(handle) = self.feedback_clear.take() {
            self.deferred.cancel(handle);
        }
        self.feedback_clear = Some(self.deferred.schedule(
            self.now_ms + self.rules.penalty_feedback_ms,
            DeferredAction::ClearPenaltyFeedback,
        ));
        self.events.push(RoundEvent::Penalty { kind });
        log::debug!(
            "Penalty {:?}: score {}, time {:?}, lives {:?}",
            kind,
            state.score,
            state.time_remaining,
            state.lives
        );

        self.check_end();
    }

    fn clear_hint(&mut self) {
        if let Some(id) = self.state.hint_target.take() {
            self.events.push(RoundEvent::HintCleared { id });
        }
        if let Some(handle) = self.hint_expiry.take() {
            self.deferred.cancel(handle);
        }
    }

    fn fire(&mut self, action: DeferredAction) {
        match action {
            DeferredAction::ExpireHint(id) => {
                self.hint_expiry = None;
                if self.state.hint_target == Some(id) {
                    self.state.hint_target = None;
                    self.events.push(RoundEvent::HintCleared { id });
                }
            }
            DeferredAction::ClearPenaltyFeedback => {
                self.feedback_clear = None;
                if self.state.penalty_feedback.take().is_some() {
                    self.events.push(RoundEvent::PenaltyFeedbackCleared);
                }
            }
        }
    }

    /// Win takes precedence over running out of lives or time
    fn check_end(&mut self) {
        if self.state.phase != RoundPhase::Playing {
            return;
        }
        if self.state.all_found() {
            self.finish(Outcome::Won);
        } else if self.state.lives == Some(0) || self.state.time_remaining == Some(0) {
            self.finish(Outcome::Lost);
        }
    }

    fn finish(&mut self, outcome: Outcome) {
        let state = &self.state;
        let (time_bonus, life_bonus) = match outcome {
            Outcome::Won => (
                state.time_remaining.unwrap_or(0) * self.rules.time_bonus_per_sec,
                state.lives.map(u32::from).unwrap_or(0) * self.rules.life_bonus,
            ),
            Outcome::Lost => (0, 0),
        };

        let result = TerminalResult {
            level_id: state.level_id.clone(),
            difficulty: state.difficulty,
            outcome,
            base_score: state.score,
            time_bonus,
            life_bonus,
            final_score: state.score + time_bonus + life_bonus,
            time_limit: state.time_limit,
            time_remaining: state.time_remaining,
            lives_remaining: state.lives,
            max_lives: state.max_lives,
            elapsed_secs: state.elapsed_secs,
            penalties: state.penalties,
            hints_used: state.hints_used,
        };

        log::info!(
            "Round {} ended: {:?}, final score {} (base {}, time +{}, lives +{})",
            result.level_id,
            outcome,
            result.final_score,
            result.base_score,
            time_bonus,
            life_bonus
        );

        // The final snapshot stays as it was at the moment the round ended
        self.deferred.cancel_all();
        self.hint_expiry = None;
        self.feedback_clear = None;

        self.set_phase(match outcome {
            Outcome::Won => RoundPhase::Won,
            Outcome::Lost => RoundPhase::Lost,
        });
        self.events.push(RoundEvent::Finished(result.clone()));
        self.result = Some(result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Difficulty, LevelCatalog, StarThresholds, TimeLimit};
    use crate::rules::Variant;
    use glam::Vec2;

    fn item(id: ItemId, is_decoy: bool) -> FindableItem {
        FindableItem {
            id,
            category: format!("item{}", id),
            is_decoy,
            pos: Vec2::new(10.0 * id as f32, 40.0),
            scale: 1.0,
            rotation: 0.0,
            found: false,
        }
    }

    fn level(targets: usize, time_limit: TimeLimit, lives: Option<u8>) -> LevelDefinition {
        LevelDefinition {
            id: "test".to_string(),
            name: "Test".to_string(),
            description: String::new(),
            difficulty: Difficulty::Easy,
            roster: (0..targets).map(|i| format!("item{}", i + 1)).collect(),
            item_reward: 100,
            decoy_count: 0,
            time_limit,
            lives,
            stars: StarThresholds {
                two_stars: 1000,
                three_stars: 2000,
            },
        }
    }

    /// Zoo rules, 3 targets (ids 1-3) and 1 decoy (id 4)
    fn zoo_round() -> RoundEngine {
        let items = vec![item(1, false), item(2, false), item(3, false), item(4, true)];
        RoundEngine::with_items(
            &level(3, TimeLimit::Seconds(60), None),
            &Ruleset::zoo(),
            items,
            1,
        )
    }

    #[test]
    fn test_zoo_starts_playing() {
        let round = zoo_round();
        assert_eq!(round.phase(), RoundPhase::Playing);
        assert_eq!(round.state().time_remaining, Some(60));
        assert_eq!(round.state().hints_remaining, None);
    }

    #[test]
    fn test_jungle_countdown() {
        let catalog = LevelCatalog::for_variant(Variant::Jungle);
        let mut round = RoundEngine::new(
            catalog.get("easy").unwrap(),
            &Ruleset::jungle(),
            catalog.decoy_pool(),
            9,
        );
        assert_eq!(round.phase(), RoundPhase::Countdown);

        // Clicks do nothing during the countdown
        assert_eq!(round.click(None), ClickOutcome::Ignored);
        round.tick();
        round.tick();
        assert_eq!(round.phase(), RoundPhase::Countdown);
        round.tick();
        assert_eq!(round.phase(), RoundPhase::Playing);
        // Countdown does not consume play time
        assert_eq!(round.state().time_remaining, Some(50));
    }

    #[test]
    fn test_found_item_rewards_once() {
        let mut round = zoo_round();
        assert_eq!(round.click(Some(1)), ClickOutcome::Found { id: 1, reward: 100 });
        assert_eq!(round.state().score, 100);
        assert!(round.state().item(1).unwrap().found);

        assert_eq!(round.click(Some(1)), ClickOutcome::Ignored);
        assert_eq!(round.state().score, 100);
    }

    #[test]
    fn test_unknown_id_is_noop() {
        let mut round = zoo_round();
        let before = round.state().clone();
        assert_eq!(round.click(Some(99)), ClickOutcome::Ignored);
        assert_eq!(round.state(), &before);
    }

    #[test]
    fn test_decoy_penalty() {
        let mut round = zoo_round();
        round.click(Some(1));
        assert_eq!(round.click(Some(4)), ClickOutcome::Wrong);
        assert_eq!(round.state().score, 50);
        assert_eq!(round.state().time_remaining, Some(55));
        assert_eq!(round.state().penalty_feedback, Some(PenaltyKind::Wrong));
        // Decoy stays on the board
        assert!(round.state().item(4).is_some());
    }

    #[test]
    fn test_penalty_clamps_at_zero() {
        let mut round = zoo_round();
        assert_eq!(round.click(None), ClickOutcome::Miss);
        assert_eq!(round.state().score, 0);
        assert_eq!(round.state().time_remaining, Some(55));
    }

    #[test]
    fn test_penalty_feedback_clears() {
        let mut round = zoo_round();
        round.click(None);
        round.advance(500);
        assert_eq!(round.state().penalty_feedback, Some(PenaltyKind::Miss));
        round.advance(300);
        assert_eq!(round.state().penalty_feedback, None);
        assert!(round.drain_events().contains(&RoundEvent::PenaltyFeedbackCleared));
    }

    #[test]
    fn test_repeat_penalty_restarts_feedback() {
        let mut round = zoo_round();
        round.click(None);
        round.advance(600);
        round.click(Some(4));
        round.advance(600);
        // First clear was cancelled; the second penalty keeps its full 800 ms
        assert_eq!(round.state().penalty_feedback, Some(PenaltyKind::Wrong));
        round.advance(200);
        assert_eq!(round.state().penalty_feedback, None);
    }

    #[test]
    fn test_win_finalizes_score() {
        let mut round = zoo_round();
        for _ in 0..10 {
            round.tick();
        }
        round.click(Some(1));
        round.click(Some(2));
        round.click(Some(3));
        assert_eq!(round.phase(), RoundPhase::Won);

        let result = round.take_result().unwrap();
        assert_eq!(result.outcome, Outcome::Won);
        assert_eq!(result.base_score, 300);
        assert_eq!(result.time_bonus, 50 * 30);
        assert_eq!(result.final_score, 300 + 1500);
        assert!(round.take_result().is_none());
    }

    #[test]
    fn test_timeout_loses_without_bonus() {
        let mut round = zoo_round();
        round.click(Some(1));
        for _ in 0..60 {
            round.tick();
        }
        assert_eq!(round.phase(), RoundPhase::Lost);
        let result = round.take_result().unwrap();
        assert_eq!(result.final_score, 100);
        assert_eq!(result.time_bonus, 0);
        assert_eq!(result.time_remaining, Some(0));

        // Terminal: nothing moves anymore
        round.tick();
        assert_eq!(round.click(Some(2)), ClickOutcome::Ignored);
        round.toggle_pause();
        assert_eq!(round.phase(), RoundPhase::Lost);
    }

    #[test]
    fn test_penalty_draining_clock_loses() {
        let mut round = zoo_round();
        for _ in 0..57 {
            round.tick();
        }
        round.click(None);
        assert_eq!(round.state().time_remaining, Some(0));
        assert_eq!(round.phase(), RoundPhase::Lost);

        // Pending clears are dropped with the round
        assert_eq!(round.pending_deferred(), 0);
        round.advance(5000);
        assert_eq!(round.state().penalty_feedback, Some(PenaltyKind::Miss));
    }

    #[test]
    fn test_unlimited_time_never_times_out() {
        let items = vec![item(1, false), item(2, false)];
        let mut round = RoundEngine::with_items(
            &level(2, TimeLimit::Unlimited, None),
            &Ruleset::zoo(),
            items,
            1,
        );
        for _ in 0..1000 {
            round.tick();
        }
        round.click(None);
        assert_eq!(round.phase(), RoundPhase::Playing);
        assert_eq!(round.state().time_remaining, None);

        round.click(Some(1));
        round.click(Some(2));
        let result = round.take_result().unwrap();
        assert_eq!(result.time_bonus, 0);
        assert_eq!(result.final_score, 200);
    }

    #[test]
    fn test_pause_suspends_time() {
        let mut round = zoo_round();
        round.advance(400);
        round.toggle_pause();
        assert_eq!(round.phase(), RoundPhase::Paused);

        round.advance(10_000);
        round.tick();
        assert_eq!(round.state().time_remaining, Some(60));
        assert_eq!(round.click(Some(1)), ClickOutcome::Ignored);

        round.toggle_pause();
        // 400 ms were banked before the pause
        round.advance(600);
        assert_eq!(round.state().time_remaining, Some(59));
        round.advance(5000);
        assert_eq!(round.state().time_remaining, Some(54));
    }

    #[test]
    fn test_zoo_hint_costs_score() {
        let mut round = zoo_round();
        assert!(!round.request_hint(), "needs 50 score");

        round.click(Some(1));
        assert!(round.request_hint());
        assert_eq!(round.state().score, 50);
        let target = round.state().hint_target.unwrap();
        assert!(target == 2 || target == 3);

        // Only one hint at a time
        assert!(!round.request_hint());
        assert_eq!(round.state().score, 50);

        round.advance(1999);
        assert_eq!(round.state().hint_target, Some(target));
        round.advance(1);
        assert_eq!(round.state().hint_target, None);
    }

    #[test]
    fn test_finding_hinted_item_clears_hint() {
        let mut round = zoo_round();
        round.click(Some(1));
        round.click(Some(2));
        assert!(round.request_hint());
        assert_eq!(round.state().hint_target, Some(3));
        assert_eq!(round.pending_deferred(), 1);

        round.click(Some(3));
        assert_eq!(round.state().hint_target, None);
        assert_eq!(round.pending_deferred(), 0);
    }

    #[test]
    fn test_counter_hints() {
        let catalog = LevelCatalog::for_variant(Variant::Jungle);
        let mut round = RoundEngine::new(
            catalog.get("easy").unwrap(),
            &Ruleset::jungle(),
            catalog.decoy_pool(),
            5,
        );
        assert!(!round.request_hint(), "no hints during countdown");
        for _ in 0..3 {
            round.tick();
        }

        for left in (0..3).rev() {
            assert!(round.request_hint());
            assert_eq!(round.state().hints_remaining, Some(left));
            // Hints are free of score in this variant
            assert_eq!(round.state().score, 0);
            round.advance(4000);
            assert_eq!(round.state().hint_target, None);
        }
        assert!(!round.request_hint());
        assert_eq!(round.state().hints_used, 3);
    }

    #[test]
    fn test_jungle_removes_found_items() {
        let items = vec![item(1, false), item(2, false)];
        let mut round = RoundEngine::with_items(
            &level(2, TimeLimit::Seconds(50), Some(5)),
            &Ruleset::jungle(),
            items,
            1,
        );
        for _ in 0..3 {
            round.tick();
        }
        assert_eq!(round.click(Some(1)), ClickOutcome::Found { id: 1, reward: 100 });
        assert!(round.state().item(1).is_none());
        assert_eq!(round.click(Some(1)), ClickOutcome::Ignored);
    }

    #[test]
    fn test_lives_bonus_on_win() {
        let items = vec![item(1, false), item(2, false)];
        let mut round = RoundEngine::with_items(
            &level(2, TimeLimit::Seconds(50), Some(5)),
            &Ruleset::jungle(),
            items,
            1,
        );
        for _ in 0..3 {
            round.tick();
        }
        round.click(None); // -100 (clamped), -3 s, -1 life
        for _ in 0..7 {
            round.tick();
        }
        round.click(Some(1));
        round.click(Some(2));

        let result = round.take_result().unwrap();
        assert!(result.won());
        assert_eq!(result.base_score, 200);
        assert_eq!(result.time_remaining, Some(40));
        assert_eq!(result.time_bonus, 40 * 50);
        assert_eq!(result.lives_remaining, Some(4));
        assert_eq!(result.life_bonus, 4 * 300);
        assert_eq!(result.final_score, 200 + 2000 + 1200);
        assert_eq!(result.lives_lost(), 1);
    }

    #[test]
    fn test_teardown_cancels_everything() {
        let mut round = zoo_round();
        round.click(Some(1));
        round.request_hint();
        round.click(None);
        assert_eq!(round.pending_deferred(), 2);

        round.teardown();
        assert_eq!(round.pending_deferred(), 0);
        let before = round.state().clone();
        round.advance(60_000);
        round.tick();
        assert_eq!(round.click(Some(2)), ClickOutcome::Ignored);
        assert!(!round.request_hint());
        assert_eq!(round.state(), &before);
    }

    #[test]
    fn test_events_report_transitions() {
        let mut round = zoo_round();
        round.toggle_pause();
        round.toggle_pause();
        round.click(Some(1));
        let events = round.drain_events();
        assert_eq!(
            events,
            vec![
                RoundEvent::PhaseChanged {
                    from: RoundPhase::Playing,
                    to: RoundPhase::Paused
                },
                RoundEvent::PhaseChanged {
                    from: RoundPhase::Paused,
                    to: RoundPhase::Playing
                },
                RoundEvent::ItemFound { id: 1, reward: 100 },
            ]
        );
        assert!(round.drain_events().is_empty());
    }

    #[test]
    fn test_determinism() {
        let catalog = LevelCatalog::for_variant(Variant::Zoo);
        let level = catalog.get("medium").unwrap();
        let a = RoundEngine::new(level, &Ruleset::zoo(), catalog.decoy_pool(), 1234);
        let b = RoundEngine::new(level, &Ruleset::zoo(), catalog.decoy_pool(), 1234);
        assert_eq!(a.state(), b.state());
    }
}
