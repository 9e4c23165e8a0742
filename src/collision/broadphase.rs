//! Spatial-hash broad-phase for collision detection.
//!
//! Independent of the gravity tree: a uniform grid over the world bounds,
//! rebuilt every step from post-integration positions. This pass is exact,
//! not approximate — any two overlapping bodies share at least one cell by
//! construction, so no true overlap can be missed.

use std::collections::{HashMap, HashSet};

use crate::config::{DEFAULT_GRID_CELL_SIZE, RADIUS_SCALE};
use crate::core::body::Body;
use crate::core::params::Bounds;

/// A body recorded in a grid cell together with its cached radius.
#[derive(Debug, Clone, Copy)]
struct CellEntry {
    body: u32,
    radius: f64,
}

/// Candidate colliding pair produced by the broad-phase. Distances have not
/// been checked yet; radii are carried along so the resolver does not
/// recompute them.
#[derive(Debug, Clone, Copy)]
pub struct PairCandidate {
    pub a: u32,
    pub b: u32,
    pub radius_a: f64,
    pub radius_b: f64,
}

/// Collision radii memoized by quantized mass.
///
/// Masses are bucketed to a tenth of a unit; every mass in a bucket shares
/// one radius, so repeated lookups over a slowly-changing population avoid
/// the square root.
#[derive(Debug, Default)]
pub struct RadiusCache {
    radii: HashMap<u64, f64>,
}

impl RadiusCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn radius(&mut self, mass: f64) -> f64 {
        let key = (mass * 10.0).round() as u64;
        *self
            .radii
            .entry(key)
            .or_insert_with(|| (key as f64 / 10.0).sqrt() * RADIUS_SCALE)
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.radii.len()
    }
}

/// Uniform grid spatial hash used by the collision broad-phase.
pub struct SpatialGrid {
    cell_size: f64,
    cells: HashMap<(i32, i32), Vec<CellEntry>>,
}

impl Default for SpatialGrid {
    fn default() -> Self {
        Self::new(DEFAULT_GRID_CELL_SIZE)
    }
}

impl SpatialGrid {
    pub fn new(cell_size: f64) -> Self {
        Self {
            cell_size,
            cells: HashMap::new(),
        }
    }

    /// Clears and repopulates the grid from the current valid bodies.
    ///
    /// Each body is inserted into every cell its radius-expanded bounding
    /// box overlaps, clipped to the world bounds, so large bodies straddling
    /// cell borders are seen from all sides.
    pub fn rebuild(&mut self, bodies: &[Body], bounds: &Bounds, radii: &mut RadiusCache) {
        self.cells.clear();

        let max_cx = ((bounds.width / self.cell_size).ceil() as i32 - 1).max(0);
        let max_cy = ((bounds.height / self.cell_size).ceil() as i32 - 1).max(0);

        for (index, body) in bodies.iter().enumerate() {
            if !body.alive {
                continue;
            }
            let radius = radii.radius(body.mass);

            let min_x = (((body.pos.x - radius) / self.cell_size).floor() as i32).clamp(0, max_cx);
            let max_x = (((body.pos.x + radius) / self.cell_size).floor() as i32).clamp(0, max_cx);
            let min_y = (((body.pos.y - radius) / self.cell_size).floor() as i32).clamp(0, max_cy);
            let max_y = (((body.pos.y + radius) / self.cell_size).floor() as i32).clamp(0, max_cy);

            for cx in min_x..=max_x {
                for cy in min_y..=max_y {
                    self.cells.entry((cx, cy)).or_default().push(CellEntry {
                        body: index as u32,
                        radius,
                    });
                }
            }
        }
    }

    /// Enumerates candidate pairs: all intra-cell pairs, deduplicated by
    /// `(min, max)` index so two bodies sharing several cells are processed
    /// once. Never yields `(i, i)` or both orientations of a pair.
    pub fn nearby_pairs(&self) -> Vec<PairCandidate> {
        let mut pairs = Vec::new();
        let mut seen: HashSet<(u32, u32)> = HashSet::new();

        for entries in self.cells.values() {
            for (i, a) in entries.iter().enumerate() {
                for b in &entries[i + 1..] {
                    let key = if a.body < b.body {
                        (a.body, b.body)
                    } else {
                        (b.body, a.body)
                    };
                    if seen.insert(key) {
                        pairs.push(PairCandidate {
                            a: a.body,
                            b: b.body,
                            radius_a: a.radius,
                            radius_b: b.radius,
                        });
                    }
                }
            }
        }

        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_pairs(bodies: &[Body], cell_size: f64) -> Vec<PairCandidate> {
        let mut grid = SpatialGrid::new(cell_size);
        let mut radii = RadiusCache::new();
        grid.rebuild(bodies, &Bounds::default(), &mut radii);
        grid.nearby_pairs()
    }

    #[test]
    fn overlapping_bodies_share_a_cell_for_any_cell_size() {
        // Straddles the boundary between two cells at x=100 for cell_size=100.
        let bodies = vec![
            Body::new(95.0, 50.0, 0.0, 0.0, 100.0),
            Body::new(110.0, 50.0, 0.0, 0.0, 100.0),
        ];

        for cell_size in [25.0, 60.0, 100.0, 300.0] {
            let pairs = grid_pairs(&bodies, cell_size);
            assert!(
                pairs.iter().any(|p| (p.a, p.b) == (0, 1) || (p.a, p.b) == (1, 0)),
                "pair lost at cell_size={cell_size}"
            );
        }
    }

    #[test]
    fn pairs_are_unique_and_never_self() {
        // A tight clump; every body spans several cells.
        let bodies: Vec<Body> = (0..6)
            .map(|i| Body::new(90.0 + i as f64 * 4.0, 100.0, 0.0, 0.0, 300.0))
            .collect();
        let pairs = grid_pairs(&bodies, 50.0);

        let mut seen = std::collections::HashSet::new();
        for pair in &pairs {
            assert_ne!(pair.a, pair.b);
            let key = (pair.a.min(pair.b), pair.a.max(pair.b));
            assert!(seen.insert(key), "duplicate pair {key:?}");
        }
    }

    #[test]
    fn dead_bodies_are_not_indexed() {
        let mut bodies = vec![
            Body::new(100.0, 100.0, 0.0, 0.0, 100.0),
            Body::new(102.0, 100.0, 0.0, 0.0, 100.0),
        ];
        bodies[1].invalidate();
        assert!(grid_pairs(&bodies, 100.0).is_empty());
    }

    #[test]
    fn radius_cache_buckets_by_quantized_mass() {
        let mut cache = RadiusCache::new();
        let a = cache.radius(100.0);
        let b = cache.radius(100.04); // same bucket
        let c = cache.radius(101.0);
        assert_eq!(a, b);
        assert!(c > a);
        assert_eq!(cache.len(), 2);
    }
}
