//! Gravity Well – 2D N-body dynamics engine for Rust.
//!
//! This crate simulates the mutual attraction and inelastic merging of a
//! population of point masses: a Barnes-Hut quadtree approximates gravity
//! in O(n log n), a spatial-hash grid finds colliding pairs exactly in
//! sub-quadratic time, and a per-step integrator applies speed capping and
//! boundary reflection. Rendering, trails, and classification are external
//! consumers of the step output.

pub mod collision;
pub mod config;
pub mod core;
pub mod dynamics;
pub mod engine;
pub mod gravity;
pub mod utils;
pub mod worker;

pub use glam::DVec2;

pub use crate::collision::{PairCandidate, RadiusCache, SpatialGrid};
pub use crate::core::{Body, BodyKind, Bounds, CollisionEvent, SimParams, StepResult};
pub use crate::engine::Engine;
pub use crate::gravity::{net_forces, pairwise_force, tree_force, QuadTree};
pub use crate::worker::StepWorker;

/// High-level convenience wrapper that owns an [`Engine`], its parameters,
/// and the body population.
pub struct Simulation {
    engine: Engine,
    pub params: SimParams,
    bodies: Vec<Body>,
    events: Vec<CollisionEvent>,
}

impl Simulation {
    /// Creates a simulation with the provided parameters.
    pub fn new(params: SimParams) -> Self {
        Self {
            engine: Engine::new(),
            params,
            bodies: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Adds a body; mass is clamped to the supported range. The returned
    /// reference is valid until the next [`step`](Self::step).
    pub fn spawn(&mut self, x: f64, y: f64, vx: f64, vy: f64, mass: f64) -> &mut Body {
        self.push_body(Body::new(x, y, vx, vy, mass))
    }

    /// Adds a black hole at rest.
    pub fn spawn_black_hole(&mut self, x: f64, y: f64, mass: f64) -> &mut Body {
        self.push_body(Body::new_black_hole(x, y, mass))
    }

    fn push_body(&mut self, body: Body) -> &mut Body {
        self.bodies.push(body);
        let index = self.bodies.len() - 1;
        &mut self.bodies[index]
    }

    /// Advances the simulation by `dt`, replacing the population with the
    /// step's surviving bodies and keeping the step's collision events.
    pub fn step(&mut self, dt: f64) {
        let result = self
            .engine
            .step(std::mem::take(&mut self.bodies), &self.params, dt);
        self.bodies = result.bodies;
        self.events = result.events;
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    /// Collisions resolved during the most recent step.
    pub fn events(&self) -> &[CollisionEvent] {
        &self.events
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }
}
