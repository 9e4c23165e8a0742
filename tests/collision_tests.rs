use approx::assert_relative_eq;
use gravity_well::*;

fn build_pairs(bodies: &[Body], cell_size: f64) -> Vec<PairCandidate> {
    let mut grid = SpatialGrid::new(cell_size);
    let mut radii = RadiusCache::new();
    grid.rebuild(bodies, &Bounds::default(), &mut radii);
    grid.nearby_pairs()
}

fn contains_pair(pairs: &[PairCandidate], a: u32, b: u32) -> bool {
    pairs
        .iter()
        .any(|p| (p.a, p.b) == (a, b) || (p.a, p.b) == (b, a))
}

#[test]
fn broadphase_never_misses_a_true_overlap() {
    // Overlapping pairs dropped at several positions relative to the cell
    // lattice, including corners and borders.
    let placements = [
        (55.0, 55.0),
        (99.0, 99.0),
        (100.0, 100.0),
        (101.0, 350.0),
        (799.5, 449.5),
        (1500.0, 820.0),
    ];

    for &(x, y) in &placements {
        for cell_size in [40.0, 100.0, 250.0] {
            let bodies = vec![
                Body::new(x, y, 0.0, 0.0, 150.0),
                Body::new(x + 12.0, y + 9.0, 0.0, 0.0, 150.0),
            ];
            let distance = bodies[0].pos.distance(bodies[1].pos);
            assert!(distance < bodies[0].radius() + bodies[1].radius());

            let pairs = build_pairs(&bodies, cell_size);
            assert!(
                contains_pair(&pairs, 0, 1),
                "overlap missed at ({x}, {y}) cell_size={cell_size}"
            );
        }
    }
}

#[test]
fn broadphase_emits_each_pair_at_most_once() {
    // Large bodies stacked so every pair shares many cells.
    let bodies: Vec<Body> = (0..8)
        .map(|i| Body::new(400.0 + i as f64 * 10.0, 400.0, 0.0, 0.0, 400.0))
        .collect();

    let pairs = build_pairs(&bodies, 60.0);
    let mut seen = std::collections::HashSet::new();
    for pair in &pairs {
        assert_ne!(pair.a, pair.b, "self pair emitted");
        assert!(
            seen.insert((pair.a.min(pair.b), pair.a.max(pair.b))),
            "pair ({}, {}) emitted twice",
            pair.a,
            pair.b
        );
    }
}

#[test]
fn at_most_one_merge_is_resolved_per_step() {
    let mut sim = Simulation::new(SimParams::default());
    // Two disjoint overlapping pairs, far apart from each other.
    sim.spawn(300.0, 300.0, 0.0, 0.0, 100.0);
    sim.spawn(308.0, 300.0, 0.0, 0.0, 50.0);
    sim.spawn(1200.0, 600.0, 0.0, 0.0, 100.0);
    sim.spawn(1208.0, 600.0, 0.0, 0.0, 50.0);

    sim.step(0.016);
    assert_eq!(sim.events().len(), 1);
    assert_eq!(sim.body_count(), 3);

    // The second pair merges on a later step.
    sim.step(0.016);
    assert_eq!(sim.events().len(), 1);
    assert_eq!(sim.body_count(), 2);
}

#[test]
fn merged_mass_never_exceeds_the_body_cap() {
    let mut sim = Simulation::new(SimParams::default());
    sim.spawn(800.0, 450.0, 0.0, 0.0, 380.0);
    sim.spawn(812.0, 450.0, 0.0, 0.0, 100.0);

    sim.step(0.016);

    assert_eq!(sim.body_count(), 1);
    assert_eq!(sim.bodies()[0].mass, 400.0);
}

#[test]
fn merge_places_the_survivor_at_the_weighted_midpoint() {
    let mut bodies = vec![
        Body::new(100.0, 200.0, 0.0, 0.0, 300.0),
        Body::new(120.0, 200.0, 0.0, 0.0, 100.0),
    ];
    let pairs = vec![PairCandidate {
        a: 0,
        b: 1,
        radius_a: bodies[0].radius(),
        radius_b: bodies[1].radius(),
    }];

    let events = gravity_well::collision::resolve_collisions(&mut bodies, &pairs, 1.0);

    assert_eq!(events.len(), 1);
    assert_relative_eq!(bodies[0].pos.x, 105.0, max_relative = 1e-12);
    assert_relative_eq!(events[0].x, 105.0, max_relative = 1e-12);
}
