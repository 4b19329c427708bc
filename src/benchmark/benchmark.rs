use std::time::Instant;

use log::warn;

use crate::simulation::engine::Integrator;
use crate::simulation::forces::{AccelSet, NewtonianGravity, Snapshot};
use crate::simulation::params::Parameters;
use crate::simulation::scenario::Simulation;
use crate::simulation::states::{Body, NVec3};

/// Deterministic cloud of `n` equal bodies spread over a few AU
fn make_bodies(n: usize) -> Vec<Body> {
    let scale = 1.0e11;
    (0..n)
        .map(|i| {
            let i_f = i as f64;
            let x = NVec3::new(
                (i_f * 0.37).sin() * scale,
                (i_f * 0.13).cos() * scale,
                (i_f * 0.07).sin() * scale,
            );
            Body::new(format!("b{i}"), 1.0e24, 1.0e6, "#ffffff", x, NVec3::zeros())
        })
        .collect()
}

/// Time one force evaluation, sequential vs rayon fan-out
pub fn bench_gravity() {
    let ns = [200, 400, 800, 1600, 3200, 6400];
    let params = Parameters::default();

    for n in ns {
        let bodies = make_bodies(n);
        let pos: Vec<NVec3> = bodies.iter().map(|b| b.position).collect();
        let vel: Vec<NVec3> = bodies.iter().map(|b| b.velocity).collect();
        let masses: Vec<f64> = bodies.iter().map(|b| b.mass).collect();
        let snap = Snapshot::new(&pos, &vel, &masses);
        let mut out = vec![NVec3::zeros(); n];

        let sequential = AccelSet::new().with(NewtonianGravity::sequential());
        let parallel = AccelSet::new().with(NewtonianGravity { parallel_threshold: 0 });

        // Warm up
        sequential.accumulate_accels(&params, false, &snap, &mut out);
        parallel.accumulate_accels(&params, false, &snap, &mut out);

        let t0 = Instant::now();
        sequential.accumulate_accels(&params, false, &snap, &mut out);
        let dt_seq = t0.elapsed().as_secs_f64();

        let t1 = Instant::now();
        parallel.accumulate_accels(&params, false, &snap, &mut out);
        let dt_par = t1.elapsed().as_secs_f64();

        println!("N = {n:5}, sequential = {:8.6} s, parallel = {:8.6} s", dt_seq, dt_par);
    }
}

/// Time one step of each integrator for a range of n
/// Paste output directly into a spreadsheet to graph
pub fn bench_integrators() {
    println!("N,verlet_ms,rk4_ms");

    for n in (200..=3200).step_by(200) {
        let steps = if n <= 800 { 5 } else { 1 };
        let bodies = make_bodies(n);

        let mut ms = [0.0; 2];
        for (slot, integrator) in [Integrator::Verlet, Integrator::RungeKutta4].into_iter().enumerate() {
            let mut sim = Simulation::new();
            if let Err(e) = sim.load_bodies(bodies.clone()) {
                warn!("skipping N = {}: {}", n, e);
                continue;
            }
            sim.set_integrator(integrator);

            let t0 = Instant::now();
            sim.run(3600.0, steps);
            ms[slot] = t0.elapsed().as_secs_f64() * 1000.0 / steps as f64;
        }

        println!("{},{:.6},{:.6}", n, ms[0], ms[1]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn benchmark_cloud_is_accepted() {
        for n in [200, 3200] {
            let mut sim = Simulation::new();
            assert!(sim.load_bodies(make_bodies(n)).is_ok());
            assert_eq!(sim.len(), n);
        }
    }
}
