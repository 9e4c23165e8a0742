use serde::{Deserialize, Serialize};

use crate::core::body::Body;

/// A merge reported to external collaborators (particle VFX, body
/// evolution). The hints are the participants' opaque tokens, passed
/// through untouched.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CollisionEvent {
    pub x: f64,
    pub y: f64,
    pub hint_a: u32,
    pub hint_b: u32,
    /// Kinetic energy of the impact: `0.5 * reduced_mass * impact_speed²`.
    pub energy: f64,
}

/// Output of one simulation step: the surviving bodies (dead ones are
/// compacted out) and the collisions resolved during the step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepResult {
    pub bodies: Vec<Body>,
    pub events: Vec<CollisionEvent>,
}
