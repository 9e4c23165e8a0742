//! Collision modules: spatial-hash broad-phase and the merge resolver.

pub mod broadphase;
pub mod resolver;

pub use broadphase::{PairCandidate, RadiusCache, SpatialGrid};
pub use resolver::resolve_collisions;
