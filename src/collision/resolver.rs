//! Collision resolution: perfectly inelastic, momentum-conserving mergers.

use glam::DVec2;
use log::debug;

use crate::collision::broadphase::PairCandidate;
use crate::config::{HEAVY_MASS_THRESHOLD, INERTIA_LOSS_MAX, INERTIA_LOSS_RATE, MASS_MAX};
use crate::core::body::{Body, BodyKind};
use crate::core::events::CollisionEvent;

/// Confirms candidate pairs against actual separations and merges the
/// first overlapping pair found, in grid-iteration order.
///
/// At most one collision is resolved per step; resolving more would make
/// the outcome depend on the ordering of same-frame cascades. Candidates
/// referencing bodies already invalidated earlier in the frame are skipped.
pub fn resolve_collisions(
    bodies: &mut [Body],
    pairs: &[PairCandidate],
    sensitivity: f64,
) -> Vec<CollisionEvent> {
    for pair in pairs {
        let (a, b) = (pair.a as usize, pair.b as usize);
        if !bodies[a].alive || !bodies[b].alive {
            continue;
        }

        // Squared comparison; the square root is never needed to reject.
        let dist_sq = bodies[a].pos.distance_squared(bodies[b].pos);
        let reach = (pair.radius_a + pair.radius_b) * sensitivity;
        if dist_sq < reach * reach {
            return vec![merge(bodies, a, b)];
        }
    }
    Vec::new()
}

/// Merges the pair `(a, b)`: the heavier body survives (ties favor `a`),
/// absorbing the victim's mass and momentum.
fn merge(bodies: &mut [Body], a: usize, b: usize) -> CollisionEvent {
    let (survivor_idx, victim_idx) = if bodies[b].mass > bodies[a].mass {
        (b, a)
    } else {
        (a, b)
    };
    let survivor = bodies[survivor_idx];
    let victim = bodies[victim_idx];

    let combined = survivor.mass + victim.mass;
    let impact: DVec2 = survivor.vel - victim.vel;
    let reduced_mass = survivor.mass * victim.mass / combined;
    let energy = 0.5 * reduced_mass * impact.length_squared();

    let pos = (survivor.pos * survivor.mass + victim.pos * victim.mass) / combined;
    let mut vel = (survivor.momentum() + victim.momentum()) / combined;

    // Large mergers shed a fraction of their velocity, preventing runaway
    // high-speed giants.
    if combined > HEAVY_MASS_THRESHOLD {
        let excess = (combined - HEAVY_MASS_THRESHOLD) / HEAVY_MASS_THRESHOLD;
        let loss = (excess * INERTIA_LOSS_RATE).min(INERTIA_LOSS_MAX);
        vel *= 1.0 - loss;
    }

    let merged = &mut bodies[survivor_idx];
    merged.pos = pos;
    merged.vel = vel;
    merged.mass = combined.min(MASS_MAX);
    // An event horizon survives the merger no matter which side was heavier.
    if victim.kind == BodyKind::BlackHole {
        merged.kind = BodyKind::BlackHole;
    }
    bodies[victim_idx].invalidate();

    debug!(
        "merge: {} + {} -> mass {:.1} at ({:.1}, {:.1}), energy {:.1}",
        survivor_idx, victim_idx, bodies[survivor_idx].mass, pos.x, pos.y, energy
    );

    CollisionEvent {
        x: pos.x,
        y: pos.y,
        hint_a: bodies[a].hint,
        hint_b: bodies[b].hint,
        energy,
    }
}
