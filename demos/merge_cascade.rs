use gravity_well::*;

fn main() {
    let mut sim = Simulation::new(SimParams::default());

    let cx = sim.params.bounds.width / 2.0;
    let cy = sim.params.bounds.height / 2.0;

    // A ring of bodies drifting inward; a heavy black hole at the center.
    sim.spawn_black_hole(cx, cy, 300.0);
    for i in 0..24 {
        let angle = i as f64 / 24.0 * std::f64::consts::TAU;
        let (x, y) = (cx + 350.0 * angle.cos(), cy + 350.0 * angle.sin());
        sim.spawn(x, y, -angle.cos() * 25.0, -angle.sin() * 25.0, 20.0 + i as f64 * 5.0);
    }

    let mut merges = 0;
    for frame in 0..2000 {
        sim.step(0.016);
        for event in sim.events() {
            merges += 1;
            println!(
                "frame {frame:4}: merge #{merges} at ({:6.1}, {:6.1}), energy {:9.1}",
                event.x, event.y, event.energy
            );
        }
    }

    println!("{} bodies remain after {merges} merges", sim.body_count());
}
