use serde::{Deserialize, Serialize};

use crate::config::{
    DEFAULT_COLLISION_SENSITIVITY, DEFAULT_GRAVITY, DEFAULT_PAIRWISE_CUTOFF, DEFAULT_SOFTENING,
    DEFAULT_SPEED_LIMIT, DEFAULT_THETA, DEFAULT_WORLD_HEIGHT, DEFAULT_WORLD_MARGIN,
    DEFAULT_WORLD_WIDTH,
};

/// Reflecting world box. Bodies are kept within `margin` of every edge.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
    pub margin: f64,
}

impl Bounds {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            margin: DEFAULT_WORLD_MARGIN,
        }
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::new(DEFAULT_WORLD_WIDTH, DEFAULT_WORLD_HEIGHT)
    }
}

/// Numeric parameters steering one simulation step.
///
/// Everything the solver, integrator, and resolver consult is carried here
/// explicitly; the engine keeps no hidden tuning state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SimParams {
    /// User-facing gravity strength, scaled by a fixed multiplier before use.
    pub gravity: f64,
    /// Barnes-Hut multipole acceptance parameter. Smaller is more exact.
    pub theta: f64,
    /// Additive softening under the distance square root.
    pub softening: f64,
    /// Hard cap on speed, enforced by uniform velocity rescaling.
    pub speed_limit: f64,
    /// Scale applied to the summed radii when confirming an overlap.
    pub collision_sensitivity: f64,
    pub collisions_enabled: bool,
    /// Populations at or below this size use the exact pairwise solver.
    pub pairwise_cutoff: usize,
    pub bounds: Bounds,
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            gravity: DEFAULT_GRAVITY,
            theta: DEFAULT_THETA,
            softening: DEFAULT_SOFTENING,
            speed_limit: DEFAULT_SPEED_LIMIT,
            collision_sensitivity: DEFAULT_COLLISION_SENSITIVITY,
            collisions_enabled: true,
            pairwise_cutoff: DEFAULT_PAIRWISE_CUTOFF,
            bounds: Bounds::default(),
        }
    }
}

impl SimParams {
    /// Effective gravitational constant used by both solvers.
    pub fn effective_gravity(&self) -> f64 {
        self.gravity * crate::config::GRAVITY_SCALE
    }
}
