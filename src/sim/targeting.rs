//! Spatial queries over the hostile arena
//!
//! Plain linear scans. Hostile counts stay small (tens, not thousands), so
//! no spatial index is worth its bookkeeping here; if that assumption ever
//! breaks these are the functions to swap out.
//!
//! Ties on exactly equal distance go to the first match in slot order,
//! which is stable between arena mutations.

use std::collections::HashSet;

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use crate::dist_sq;
use crate::sim::hostiles::HostileArena;

/// Nearest live hostile within `max_radius` of `point`, skipping `exclude`.
///
/// Distance is measured center-to-center.
pub fn nearest_within(
    arena: &HostileArena,
    point: Vec2,
    max_radius: f32,
    exclude: &HashSet<usize>,
) -> Option<usize> {
    let r_sq = max_radius * max_radius;
    let mut best: Option<(usize, f32)> = None;
    for (slot, hostile) in arena.iter() {
        if exclude.contains(&slot) {
            continue;
        }
        let d_sq = dist_sq(hostile.pos, point);
        if d_sq <= r_sq && best.is_none_or(|(_, b)| d_sq < b) {
            best = Some((slot, d_sq));
        }
    }
    best.map(|(slot, _)| slot)
}

/// All live hostiles within `max_radius` of `point`, in slot order
pub fn all_within(arena: &HostileArena, point: Vec2, max_radius: f32) -> Vec<usize> {
    let r_sq = max_radius * max_radius;
    arena
        .iter()
        .filter(|(_, h)| dist_sq(h.pos, point) <= r_sq)
        .map(|(slot, _)| slot)
        .collect()
}

/// Draw up to `k` distinct entries from `candidates` (consumed as a pool)
pub fn sample_without_replacement(
    mut candidates: Vec<usize>,
    k: usize,
    rng: &mut Pcg32,
) -> Vec<usize> {
    let mut picked = Vec::with_capacity(k.min(candidates.len()));
    while picked.len() < k && !candidates.is_empty() {
        let idx = rng.random_range(0..candidates.len());
        picked.push(candidates.swap_remove(idx));
    }
    picked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::hostiles::Hostile;
    use rand::SeedableRng;

    fn arena_at(positions: &[(f32, f32)]) -> HostileArena {
        let mut arena = HostileArena::new();
        for (i, (x, y)) in positions.iter().enumerate() {
            arena.spawn(Hostile {
                id: i as u32 + 1,
                pos: Vec2::new(*x, *y),
                hp: 5,
                hp_start: 5,
                radius: 10.0,
                speed: 40.0,
            });
        }
        arena
    }

    #[test]
    fn test_nearest_picks_minimum_distance() {
        let arena = arena_at(&[(100.0, 0.0), (30.0, 0.0), (60.0, 0.0)]);
        let nearest = nearest_within(&arena, Vec2::ZERO, 200.0, &HashSet::new());
        assert_eq!(nearest, Some(1));
    }

    #[test]
    fn test_nearest_respects_radius_and_exclusion() {
        let arena = arena_at(&[(100.0, 0.0), (30.0, 0.0)]);
        assert_eq!(
            nearest_within(&arena, Vec2::ZERO, 20.0, &HashSet::new()),
            None
        );
        let exclude: HashSet<usize> = [1].into_iter().collect();
        assert_eq!(
            nearest_within(&arena, Vec2::ZERO, 200.0, &exclude),
            Some(0)
        );
    }

    #[test]
    fn test_nearest_tie_takes_first_slot() {
        // Two hostiles at mirrored positions, identical distance
        let arena = arena_at(&[(50.0, 0.0), (-50.0, 0.0)]);
        assert_eq!(
            nearest_within(&arena, Vec2::ZERO, 100.0, &HashSet::new()),
            Some(0)
        );
    }

    #[test]
    fn test_all_within_boundary_inclusive() {
        let arena = arena_at(&[(50.0, 0.0), (51.0, 0.0), (0.0, 49.0)]);
        let hits = all_within(&arena, Vec2::ZERO, 50.0);
        assert_eq!(hits, vec![0, 2]);
    }

    #[test]
    fn test_sample_without_replacement_distinct() {
        let mut rng = Pcg32::seed_from_u64(17);
        let picked = sample_without_replacement(vec![0, 1, 2, 3, 4], 3, &mut rng);
        assert_eq!(picked.len(), 3);
        let unique: HashSet<usize> = picked.iter().copied().collect();
        assert_eq!(unique.len(), 3);
    }

    #[test]
    fn test_sample_caps_at_pool_size() {
        let mut rng = Pcg32::seed_from_u64(17);
        let picked = sample_without_replacement(vec![7, 8], 5, &mut rng);
        assert_eq!(picked.len(), 2);
    }
}
