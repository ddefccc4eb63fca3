//! Board generation
//!
//! Builds the round's targets and decoys and scatters them over the play
//! area without letting them sit on top of each other.

use std::collections::HashSet;

use glam::Vec2;
use rand::Rng;

use super::state::{FindableItem, ItemId};
use crate::catalog::LevelDefinition;
use crate::consts::{MAX_PLACEMENT_ATTEMPTS, MIN_ITEM_SEPARATION};
use crate::rules::PlayArea;

/// Places findable items for a round
#[derive(Debug, Clone, Copy)]
pub struct ItemPlacementGenerator {
    pub area: PlayArea,
    /// Minimum distance between two items (normalized units)
    pub min_separation: f32,
    /// Sampling attempts per item before settling for the best one seen
    pub max_attempts: u32,
}

impl ItemPlacementGenerator {
    pub fn new(area: PlayArea) -> Self {
        Self {
            area,
            min_separation: MIN_ITEM_SEPARATION,
            max_attempts: MAX_PLACEMENT_ATTEMPTS,
        }
    }

    /// Generate the level's targets plus its decoys.
    ///
    /// Decoy categories are drawn without repetition from `decoy_pool`,
    /// skipping anything on the level roster. If the pool runs dry the board
    /// simply gets fewer decoys.
    pub fn generate<R: Rng>(
        &self,
        level: &LevelDefinition,
        decoy_pool: &[String],
        rng: &mut R,
    ) -> Vec<FindableItem> {
        let mut seen = HashSet::new();
        let mut available: Vec<&String> = decoy_pool
            .iter()
            .filter(|c| !level.roster.contains(*c) && seen.insert(*c))
            .collect();

        let mut decoys = Vec::with_capacity(level.decoy_count as usize);
        for _ in 0..level.decoy_count {
            if available.is_empty() {
                log::warn!(
                    "Level {}: decoy pool exhausted after {} decoys",
                    level.id,
                    decoys.len()
                );
                break;
            }
            let idx = rng.random_range(0..available.len());
            decoys.push(available.swap_remove(idx).clone());
        }

        let entries = level
            .roster
            .iter()
            .map(|c| (c.clone(), false))
            .chain(decoys.into_iter().map(|c| (c, true)));

        let mut placed: Vec<Vec2> = Vec::new();
        let mut items = Vec::new();
        for (i, (category, is_decoy)) in entries.enumerate() {
            let pos = self.place(&placed, rng);
            placed.push(pos);
            items.push(FindableItem {
                id: i as ItemId + 1,
                category,
                is_decoy,
                pos,
                scale: rng.random_range(0.8..=1.2),
                rotation: rng.random_range(-15.0..=15.0),
                found: false,
            });
        }

        log::debug!(
            "Level {}: placed {} targets and {} decoys",
            level.id,
            level.roster.len(),
            items.len() - level.roster.len()
        );
        items
    }

    /// Sample a position at least `min_separation` from every placed item.
    /// After `max_attempts` misses, take the candidate that came closest.
    pub fn place<R: Rng>(&self, placed: &[Vec2], rng: &mut R) -> Vec2 {
        let mut best = self.sample(rng);
        let mut best_gap = nearest_distance(best, placed);

        for _ in 1..self.max_attempts.max(1) {
            if best_gap >= self.min_separation {
                break;
            }
            let candidate = self.sample(rng);
            let gap = nearest_distance(candidate, placed);
            if gap > best_gap {
                best = candidate;
                best_gap = gap;
            }
        }

        best
    }

    fn sample<R: Rng>(&self, rng: &mut R) -> Vec2 {
        Vec2::new(
            rng.random_range(self.area.min.x..=self.area.max.x),
            rng.random_range(self.area.min.y..=self.area.max.y),
        )
    }
}

/// Distance to the closest placed point (infinite when nothing is placed)
fn nearest_distance(p: Vec2, placed: &[Vec2]) -> f32 {
    placed
        .iter()
        .map(|q| p.distance(*q))
        .fold(f32::INFINITY, f32::min)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::LevelCatalog;
    use crate::rules::{Ruleset, Variant};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_zoo_easy_board() {
        let catalog = LevelCatalog::for_variant(Variant::Zoo);
        let level = catalog.get("easy").unwrap();
        let generator = ItemPlacementGenerator::new(Ruleset::zoo().play_area);
        let mut rng = Pcg32::seed_from_u64(7);

        let items = generator.generate(level, catalog.decoy_pool(), &mut rng);
        assert_eq!(items.iter().filter(|i| !i.is_decoy).count(), 5);
        assert_eq!(items.iter().filter(|i| i.is_decoy).count(), 2);

        let ids: HashSet<_> = items.iter().map(|i| i.id).collect();
        assert_eq!(ids.len(), items.len());

        let decoy_names: HashSet<_> = items
            .iter()
            .filter(|i| i.is_decoy)
            .map(|i| i.category.as_str())
            .collect();
        assert_eq!(decoy_names.len(), 2);
        for name in decoy_names {
            assert!(!level.roster.iter().any(|r| r == name));
        }
    }

    #[test]
    fn test_items_stay_in_area_and_apart() {
        let catalog = LevelCatalog::for_variant(Variant::Jungle);
        let level = catalog.get("easy").unwrap();
        let area = Ruleset::jungle().play_area;
        let generator = ItemPlacementGenerator::new(area);
        let mut rng = Pcg32::seed_from_u64(42);

        let items = generator.generate(level, catalog.decoy_pool(), &mut rng);
        for (i, a) in items.iter().enumerate() {
            assert!(area.contains(a.pos));
            assert!((0.8..=1.2).contains(&a.scale));
            assert!((-15.0..=15.0).contains(&a.rotation));
            for b in &items[i + 1..] {
                // 8 items in a 80x70 area always fit
                assert!(a.pos.distance(b.pos) >= MIN_ITEM_SEPARATION);
            }
        }
    }

    #[test]
    fn test_crowded_board_terminates() {
        // A 5x5 area cannot hold items 10 apart; placement must still finish
        let generator = ItemPlacementGenerator::new(PlayArea::new(0.0, 0.0, 5.0, 5.0));
        let mut rng = Pcg32::seed_from_u64(1);
        let mut placed = Vec::new();
        for _ in 0..20 {
            let p = generator.place(&placed, &mut rng);
            placed.push(p);
        }
        assert_eq!(placed.len(), 20);
    }

    #[test]
    fn test_crowded_placement_keeps_widest_candidate() {
        let generator = ItemPlacementGenerator::new(PlayArea::new(0.0, 0.0, 5.0, 5.0));
        let placed = [Vec2::new(2.5, 2.5)];
        let mut rng = Pcg32::seed_from_u64(11);

        // Nothing in a 5x5 area is 10 away from the center, so every attempt runs
        let mut replay = rng.clone();
        let candidates: Vec<Vec2> = (0..generator.max_attempts)
            .map(|_| generator.sample(&mut replay))
            .collect();
        let widest = candidates[1..].iter().fold(candidates[0], |best, c| {
            if nearest_distance(*c, &placed) > nearest_distance(best, &placed) {
                *c
            } else {
                best
            }
        });

        let p = generator.place(&placed, &mut rng);
        assert_eq!(p, widest);
        assert!(nearest_distance(p, &placed) >= nearest_distance(candidates[0], &placed));
        assert!(nearest_distance(p, &placed) < generator.min_separation);
    }

    #[test]
    fn test_repeated_pool_entries_draw_once() {
        let catalog = LevelCatalog::for_variant(Variant::Zoo);
        let mut level = catalog.get("easy").unwrap().clone();
        level.decoy_count = 3;
        let pool: Vec<String> = ["Cow", "Pig", "Cow", "Pig", "Cow"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let generator = ItemPlacementGenerator::new(Ruleset::zoo().play_area);
        let mut rng = Pcg32::seed_from_u64(0);

        let items = generator.generate(&level, &pool, &mut rng);
        let mut decoys: Vec<_> = items
            .iter()
            .filter(|i| i.is_decoy)
            .map(|i| i.category.as_str())
            .collect();
        decoys.sort();
        assert_eq!(decoys, vec!["Cow", "Pig"]);
    }

    #[test]
    fn test_decoy_pool_exhausted() {
        let catalog = LevelCatalog::for_variant(Variant::Zoo);
        let mut level = catalog.get("hard").unwrap().clone();
        level.decoy_count = 50;
        let generator = ItemPlacementGenerator::new(Ruleset::zoo().play_area);
        let mut rng = Pcg32::seed_from_u64(3);

        let items = generator.generate(&level, catalog.decoy_pool(), &mut rng);
        // 25 shared categories minus the 15 on the roster
        assert_eq!(items.iter().filter(|i| i.is_decoy).count(), 10);
    }
}
