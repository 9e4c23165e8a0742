//! Core types describing bodies, step parameters, and step output.

pub mod body;
pub mod events;
pub mod params;

pub use body::{Body, BodyKind};
pub use events::{CollisionEvent, StepResult};
pub use params::{Bounds, SimParams};
