//! Step orchestration. The [`Engine`] is a caller-owned value holding the
//! broad-phase grid and radius cache; everything else is rebuilt fresh each
//! step and discarded.

use std::time::Instant;

use crate::collision::{resolve_collisions, RadiusCache, SpatialGrid};
use crate::config::{DEFAULT_GRID_CELL_SIZE, DEFAULT_STEP_BUDGET_MS};
use crate::core::{Body, SimParams, StepResult};
use crate::dynamics::integrator;
use crate::gravity;
use crate::utils::logging::{warn_if_step_budget_exceeded, ScopedTimer};

/// The N-body engine. Owns no bodies; callers pass the population in and
/// receive the updated view back, so a step is a pure transform of its
/// inputs. The grid and radius cache persist only as allocations.
pub struct Engine {
    grid: SpatialGrid,
    radii: RadiusCache,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    pub fn new() -> Self {
        Self::with_cell_size(DEFAULT_GRID_CELL_SIZE)
    }

    pub fn with_cell_size(cell_size: f64) -> Self {
        Self {
            grid: SpatialGrid::new(cell_size),
            radii: RadiusCache::new(),
        }
    }

    /// Advances the population by one step.
    ///
    /// Phases run strictly in sequence — tree build and force solve,
    /// integration, grid rebuild, collision resolution — because each
    /// phase's output is the next one's input; the grid in particular must
    /// index post-integration positions. Dead bodies are compacted out of
    /// the returned vec.
    pub fn step(&mut self, mut bodies: Vec<Body>, params: &SimParams, dt: f64) -> StepResult {
        let started = Instant::now();
        bodies.retain(|b| b.alive);

        // Fewer than two bodies: gravity and collisions are no-ops and the
        // population is returned unchanged.
        if bodies.len() < 2 {
            return StepResult {
                bodies,
                events: Vec::new(),
            };
        }

        let forces = {
            let _timer = ScopedTimer::new("gravity::solve");
            gravity::net_forces(&bodies, params)
        };

        {
            let _timer = ScopedTimer::new("integrate");
            for (body, force) in bodies.iter_mut().zip(forces) {
                integrator::integrate(body, force, dt, params);
                body.check_finite();
            }
        }

        let mut events = Vec::new();
        if params.collisions_enabled {
            {
                let _timer = ScopedTimer::new("broadphase::rebuild");
                self.grid.rebuild(&bodies, &params.bounds, &mut self.radii);
            }
            let _timer = ScopedTimer::new("collision::resolve");
            let pairs = self.grid.nearby_pairs();
            events = resolve_collisions(&mut bodies, &pairs, params.collision_sensitivity);
        }

        bodies.retain(|b| b.alive);
        warn_if_step_budget_exceeded(started.elapsed(), DEFAULT_STEP_BUDGET_MS);
        StepResult { bodies, events }
    }
}
