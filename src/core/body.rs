use glam::DVec2;
use log::warn;
use serde::{Deserialize, Serialize};

use crate::config::{BLACK_HOLE_BOOST, MASS_MAX, MASS_MIN, RADIUS_SCALE};

/// Role of a body as far as the dynamics are concerned.
///
/// Only the black-hole gravity boost affects the physics; any finer
/// classification lives with the rendering collaborators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BodyKind {
    #[default]
    Normal,
    BlackHole,
}

/// A point mass evolved by the simulation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Body {
    pub pos: DVec2,
    pub vel: DVec2,
    pub mass: f64,
    pub kind: BodyKind,
    /// Cleared once and never set again; dead bodies are skipped by every
    /// phase and compacted out of the step output.
    pub alive: bool,
    /// Opaque token handed back through collision events. Not interpreted.
    pub hint: u32,
}

impl Body {
    /// Creates a body at the given position and velocity. Mass is silently
    /// clamped to the supported range.
    pub fn new(x: f64, y: f64, vx: f64, vy: f64, mass: f64) -> Self {
        Self {
            pos: DVec2::new(x, y),
            vel: DVec2::new(vx, vy),
            mass: mass.clamp(MASS_MIN, MASS_MAX),
            kind: BodyKind::Normal,
            alive: true,
            hint: 0,
        }
    }

    /// Creates a black hole; same state as a normal body, boosted as a
    /// gravity source.
    pub fn new_black_hole(x: f64, y: f64, mass: f64) -> Self {
        Self {
            kind: BodyKind::BlackHole,
            ..Self::new(x, y, 0.0, 0.0, mass)
        }
    }

    pub fn is_black_hole(&self) -> bool {
        self.kind == BodyKind::BlackHole
    }

    /// Collision radius derived from mass.
    pub fn radius(&self) -> f64 {
        self.mass.sqrt() * RADIUS_SCALE
    }

    /// Mass as seen by other bodies when this one acts as a gravity source.
    pub fn gravitational_mass(&self) -> f64 {
        match self.kind {
            BodyKind::Normal => self.mass,
            BodyKind::BlackHole => self.mass * BLACK_HOLE_BOOST,
        }
    }

    pub fn momentum(&self) -> DVec2 {
        self.vel * self.mass
    }

    pub fn speed(&self) -> f64 {
        self.vel.length()
    }

    pub fn invalidate(&mut self) {
        self.alive = false;
    }

    /// Contains non-finite state by killing the body instead of letting
    /// NaN/Inf spread to the rest of the population. Returns whether the
    /// body is still usable.
    pub fn check_finite(&mut self) -> bool {
        if self.pos.is_finite() && self.vel.is_finite() {
            return true;
        }
        warn!(
            "body invalidated: non-finite state pos={:?} vel={:?}",
            self.pos, self.vel
        );
        self.alive = false;
        false
    }
}
