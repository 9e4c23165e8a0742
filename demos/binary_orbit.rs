use gravity_well::*;

fn main() {
    let params = SimParams {
        collisions_enabled: false,
        ..SimParams::default()
    };
    let mut sim = Simulation::new(params);

    let cx = sim.params.bounds.width / 2.0;
    let cy = sim.params.bounds.height / 2.0;
    sim.spawn(cx - 80.0, cy, 0.0, 35.0, 200.0);
    sim.spawn(cx + 80.0, cy, 0.0, -35.0, 200.0);

    for frame in 0..600 {
        sim.step(0.016);
        if frame % 100 == 0 {
            let [a, b] = [sim.bodies()[0], sim.bodies()[1]];
            println!(
                "frame {frame:4}: a=({:7.1}, {:7.1})  b=({:7.1}, {:7.1})  separation={:6.1}",
                a.pos.x,
                a.pos.y,
                b.pos.x,
                b.pos.y,
                a.pos.distance(b.pos)
            );
        }
    }
}
