//! Hidden Objects entry point
//!
//! On the web the page drives `WebGame` from the library. Natively this
//! plays every level of a variant with a scripted player and logs the results.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use hidden_objects::platform;
    use hidden_objects::{GameSession, MemoryStore, Variant};

    platform::init_logging();

    let variant = std::env::args()
        .nth(1)
        .and_then(|arg| Variant::from_str(&arg))
        .unwrap_or_default();
    log::info!("Hidden Objects (native) starting, variant {}", variant.as_str());

    let mut session = GameSession::new(variant, MemoryStore::new());
    let ids: Vec<String> = session.catalog().levels().map(|l| l.id.clone()).collect();
    let seed = platform::clock_seed();

    for (i, id) in ids.iter().enumerate() {
        let mut round = match session.start_round(id, seed.wrapping_add(i as u64)) {
            Ok(round) => round,
            Err(e) => {
                log::error!("{}", e);
                continue;
            }
        };
        autoplay::play(&mut round);

        match session.finish_round(&mut round) {
            Some(summary) => println!(
                "{:<8} {:?}  score {:>5}  stars {}  new badges {:?}",
                id,
                summary.result.outcome,
                summary.result.final_score,
                summary.stars,
                summary.new_achievements
            ),
            None => log::warn!("Round {} did not finish", id),
        }
    }

    let progress = session.progress();
    println!(
        "Total of best scores: {}  achievements: {:?}",
        progress.total_high_score(),
        progress.achievements
    );
}

#[cfg(not(target_arch = "wasm32"))]
mod autoplay {
    use hidden_objects::RoundEngine;

    /// Scripted player: one miss, one hint, then find a target every two
    /// seconds until the round ends.
    pub fn play(round: &mut RoundEngine) {
        while !round.phase().is_terminal() && !round.state().items.is_empty() {
            if round.state().phase == hidden_objects::RoundPhase::Playing {
                if round.state().penalties == 0 {
                    round.click(None);
                } else if round.state().hints_used == 0 && round.request_hint() {
                    log::info!("Hint on {:?}", round.state().hint_target);
                } else {
                    let next = round
                        .state()
                        .hint_target
                        .or_else(|| round.state().open_targets().next().map(|i| i.id));
                    round.click(next);
                }
            }
            round.advance(2000);
            for event in round.drain_events() {
                log::debug!("{:?}", event);
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is WebGame's constructor, this is just to satisfy the compiler
}
