//! Explicit integration of body state, with a speed cap and inelastic wall
//! reflection. Runs after gravity and before collision detection, so
//! collisions are evaluated on post-motion positions.

use glam::DVec2;

use crate::config::WALL_DAMPING;
use crate::core::body::Body;
use crate::core::params::{Bounds, SimParams};

/// Advances one body by one step under the given net force.
pub fn integrate(body: &mut Body, force: DVec2, dt: f64, params: &SimParams) {
    body.vel += force / body.mass * dt;
    clamp_speed(body, params.speed_limit);
    body.pos += body.vel * dt;
    reflect_at_walls(body, &params.bounds);
}

/// Caps speed by uniform rescaling, preserving direction. A velocity cap,
/// not a force cap: applied once per step after the force is integrated.
pub fn clamp_speed(body: &mut Body, limit: f64) {
    let speed = body.vel.length();
    if speed > limit {
        body.vel *= limit / speed;
    }
}

/// Clamps the body inside the margin on every edge, reflecting and damping
/// the corresponding velocity component on contact.
pub fn reflect_at_walls(body: &mut Body, bounds: &Bounds) {
    let lo = bounds.margin;
    let hi_x = bounds.width - bounds.margin;
    let hi_y = bounds.height - bounds.margin;

    if body.pos.x < lo {
        body.pos.x = lo;
        body.vel.x = -body.vel.x * WALL_DAMPING;
    } else if body.pos.x > hi_x {
        body.pos.x = hi_x;
        body.vel.x = -body.vel.x * WALL_DAMPING;
    }

    if body.pos.y < lo {
        body.pos.y = lo;
        body.vel.y = -body.vel.y * WALL_DAMPING;
    } else if body.pos.y > hi_y {
        body.pos.y = hi_y;
        body.vel.y = -body.vel.y * WALL_DAMPING;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn speed_clamp_preserves_direction() {
        let mut body = Body::new(0.0, 0.0, 3000.0, -4000.0, 50.0);
        clamp_speed(&mut body, 400.0);

        assert_relative_eq!(body.speed(), 400.0, max_relative = 1e-12);
        assert_relative_eq!(body.vel.y / body.vel.x, -4000.0 / 3000.0, max_relative = 1e-12);
    }

    #[test]
    fn bodies_stay_inside_the_margin_for_any_velocity() {
        let params = SimParams::default();
        let bounds = params.bounds;

        for vel in [50.0, 5_000.0, 500_000.0] {
            let mut body = Body::new(bounds.width - 20.0, 20.0, vel, -vel, 50.0);
            integrate(&mut body, DVec2::ZERO, 0.016, &params);

            assert!(body.pos.x >= bounds.margin && body.pos.x <= bounds.width - bounds.margin);
            assert!(body.pos.y >= bounds.margin && body.pos.y <= bounds.height - bounds.margin);
        }
    }

    #[test]
    fn wall_contact_reflects_and_damps_velocity() {
        let bounds = Bounds::default();
        let mut body = Body::new(0.0, 100.0, -30.0, 5.0, 50.0);
        body.pos.x = -25.0; // already past the wall
        reflect_at_walls(&mut body, &bounds);

        assert_eq!(body.pos.x, bounds.margin);
        assert_relative_eq!(body.vel.x, 30.0 * WALL_DAMPING, max_relative = 1e-12);
        assert_eq!(body.vel.y, 5.0);
    }
}
