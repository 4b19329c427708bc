//! Fixed-step time integrators
//!
//! Provides velocity-Verlet and classical RK4, both driven by an [`AccelSet`].
//! Each integrator owns its scratch buffers; they are resized to the body
//! count at the start of every step and never shared between the two.

use super::forces::{AccelSet, Snapshot};
use super::params::Parameters;
use super::states::{Body, NVec3};

/// Resize `buf` to `n` slots; contents are stale and written before use
fn fit(buf: &mut Vec<NVec3>, n: usize) {
    if buf.len() != n {
        buf.resize(n, NVec3::zeros());
    }
}

/// Copy the masses of `bodies` into `masses`
fn load_masses(bodies: &[Body], masses: &mut Vec<f64>) {
    masses.clear();
    masses.extend(bodies.iter().map(|b| b.mass));
}

/// Scratch space for one Verlet step
#[derive(Debug, Default, Clone)]
pub struct VerletScratch {
    a_old: Vec<NVec3>, // a(t), copied before the cache is overwritten
    a_new: Vec<NVec3>, // a(t + dt)
    pos: Vec<NVec3>,
    vel: Vec<NVec3>,
    masses: Vec<f64>,
}

impl VerletScratch {
    pub fn resize(&mut self, n: usize) {
        fit(&mut self.a_old, n);
        fit(&mut self.a_new, n);
        fit(&mut self.pos, n);
        fit(&mut self.vel, n);
        if self.masses.len() != n {
            self.masses.resize(n, 0.0);
        }
    }

    pub fn len(&self) -> usize {
        self.a_old.len()
    }

    pub fn is_empty(&self) -> bool {
        self.a_old.is_empty()
    }
}

/// Advance `bodies` by `dt` using velocity-Verlet.
///
/// Uses the acceleration cached on each body as a(t), so the first step after
/// bodies are added starts from whatever the cache holds (zero for new bodies).
/// One force evaluation per step.
pub fn verlet_step(
    bodies: &mut [Body],
    forces: &AccelSet,
    params: &Parameters,
    relativity: bool,
    scratch: &mut VerletScratch,
    dt: f64,
) {
    let n = bodies.len();
    if n == 0 {
        return;
    }
    scratch.resize(n);

    // Drift: x(t+dt) = x(t) + v(t) dt + 1/2 a(t) dt^2
    for b in bodies.iter_mut() {
        b.position += b.velocity * dt + 0.5 * b.acceleration * dt * dt;
    }

    // keep a(t) before the cache is replaced
    for (slot, b) in scratch.a_old.iter_mut().zip(bodies.iter()) {
        *slot = b.acceleration;
    }

    for (i, b) in bodies.iter().enumerate() {
        scratch.pos[i] = b.position;
        scratch.vel[i] = b.velocity;
    }
    load_masses(bodies, &mut scratch.masses);

    let snap = Snapshot::new(&scratch.pos, &scratch.vel, &scratch.masses);
    forces.accumulate_accels(params, relativity, &snap, &mut scratch.a_new);

    // Kick: v(t+dt) = v(t) + 1/2 (a(t) + a(t+dt)) dt
    for ((b, a_old), a_new) in bodies.iter_mut().zip(scratch.a_old.iter()).zip(scratch.a_new.iter()) {
        b.velocity += 0.5 * (a_old + a_new) * dt;
        b.acceleration = *a_new;
    }
}

/// Scratch space for one RK4 step
#[derive(Debug, Default, Clone)]
pub struct Rk4Scratch {
    pos0: Vec<NVec3>,
    vel0: Vec<NVec3>,
    stage_pos: Vec<NVec3>,
    stage_vel: Vec<NVec3>,
    k: [Vec<NVec3>; 4], // stage accelerations
    kx: [Vec<NVec3>; 4], // stage velocities
    masses: Vec<f64>,
}

impl Rk4Scratch {
    pub fn resize(&mut self, n: usize) {
        fit(&mut self.pos0, n);
        fit(&mut self.vel0, n);
        fit(&mut self.stage_pos, n);
        fit(&mut self.stage_vel, n);
        for buf in self.k.iter_mut().chain(self.kx.iter_mut()) {
            fit(buf, n);
        }
        if self.masses.len() != n {
            self.masses.resize(n, 0.0);
        }
    }

    pub fn len(&self) -> usize {
        self.pos0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pos0.is_empty()
    }

    /// Fill the stage state from the start state: x0 + kx[src] h, v0 + k[src] h
    fn set_stage(&mut self, src: usize, h: f64) {
        for i in 0..self.pos0.len() {
            self.stage_pos[i] = self.pos0[i] + self.kx[src][i] * h;
            self.stage_vel[i] = self.vel0[i] + self.k[src][i] * h;
        }
    }

    /// Evaluate the stage state into k[dst] and record its velocity in kx[dst]
    fn eval_stage(&mut self, dst: usize, forces: &AccelSet, params: &Parameters, relativity: bool) {
        let snap = Snapshot::new(&self.stage_pos, &self.stage_vel, &self.masses);
        forces.accumulate_accels(params, relativity, &snap, &mut self.k[dst]);
        self.kx[dst].copy_from_slice(&self.stage_vel);
    }
}

/// Advance `bodies` by `dt` using classical 4th-order Runge-Kutta.
///
/// Does not read the cached acceleration. Four force evaluations for the
/// stages, plus one more at the end so the cache matches the new state.
pub fn rk4_step(
    bodies: &mut [Body],
    forces: &AccelSet,
    params: &Parameters,
    relativity: bool,
    scratch: &mut Rk4Scratch,
    dt: f64,
) {
    let n = bodies.len();
    if n == 0 {
        return;
    }
    scratch.resize(n);

    for (i, b) in bodies.iter().enumerate() {
        scratch.pos0[i] = b.position;
        scratch.vel0[i] = b.velocity;
    }
    load_masses(bodies, &mut scratch.masses);

    // k1 at the start state
    scratch.stage_pos.copy_from_slice(&scratch.pos0);
    scratch.stage_vel.copy_from_slice(&scratch.vel0);
    scratch.eval_stage(0, forces, params, relativity);

    // k2, k3 at the half step, k4 at the full step
    let half_dt = 0.5 * dt;
    scratch.set_stage(0, half_dt);
    scratch.eval_stage(1, forces, params, relativity);
    scratch.set_stage(1, half_dt);
    scratch.eval_stage(2, forces, params, relativity);
    scratch.set_stage(2, dt);
    scratch.eval_stage(3, forces, params, relativity);

    let w = dt / 6.0;
    for (i, b) in bodies.iter_mut().enumerate() {
        let [k1, k2, k3, k4] = &scratch.k;
        let [x1, x2, x3, x4] = &scratch.kx;
        b.position = scratch.pos0[i] + w * (x1[i] + 2.0 * x2[i] + 2.0 * x3[i] + x4[i]);
        b.velocity = scratch.vel0[i] + w * (k1[i] + 2.0 * k2[i] + 2.0 * k3[i] + k4[i]);
    }

    // refresh the cache at the new state
    for (i, b) in bodies.iter().enumerate() {
        scratch.stage_pos[i] = b.position;
        scratch.stage_vel[i] = b.velocity;
    }
    scratch.eval_stage(0, forces, params, relativity);
    for (b, a) in bodies.iter_mut().zip(scratch.k[0].iter()) {
        b.acceleration = *a;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair() -> Vec<Body> {
        vec![
            Body::new("a", 1.0e20, 1.0, "#ffffff", NVec3::new(0.0, 0.0, 0.0), NVec3::zeros()),
            Body::new("b", 1.0e20, 1.0, "#ffffff", NVec3::new(1.0e7, 0.0, 0.0), NVec3::zeros()),
        ]
    }

    #[test]
    fn verlet_scratch_follows_body_count() {
        let forces = AccelSet::gravity();
        let params = Parameters::default();
        let mut scratch = VerletScratch::default();
        let mut bodies = pair();

        verlet_step(&mut bodies, &forces, &params, false, &mut scratch, 1.0);
        assert_eq!(scratch.len(), 2);

        bodies.push(Body::new("c", 1.0e20, 1.0, "#ffffff", NVec3::new(0.0, 1.0e7, 0.0), NVec3::zeros()));
        verlet_step(&mut bodies, &forces, &params, false, &mut scratch, 1.0);
        assert_eq!(scratch.len(), 3);

        bodies.truncate(1);
        verlet_step(&mut bodies, &forces, &params, false, &mut scratch, 1.0);
        assert_eq!(scratch.len(), 1);
        assert_eq!(bodies[0].acceleration(), NVec3::zeros());
    }

    #[test]
    fn rk4_scratch_follows_body_count() {
        let forces = AccelSet::gravity();
        let params = Parameters::default();
        let mut scratch = Rk4Scratch::default();
        let mut bodies = pair();

        rk4_step(&mut bodies, &forces, &params, false, &mut scratch, 1.0);
        assert_eq!(scratch.len(), 2);

        bodies.truncate(1);
        rk4_step(&mut bodies, &forces, &params, false, &mut scratch, 1.0);
        assert_eq!(scratch.len(), 1);
        assert_eq!(bodies[0].acceleration(), NVec3::zeros());
    }

    #[test]
    fn resize_to_same_count_keeps_buffers() {
        let mut verlet = VerletScratch::default();
        verlet.resize(3);
        verlet.a_old[2] = NVec3::new(1.0, 2.0, 3.0);
        verlet.resize(3);
        assert_eq!(verlet.a_old[2], NVec3::new(1.0, 2.0, 3.0));

        let mut rk4 = Rk4Scratch::default();
        rk4.resize(2);
        rk4.k[3][1] = NVec3::new(4.0, 5.0, 6.0);
        rk4.resize(2);
        assert_eq!(rk4.k[3][1], NVec3::new(4.0, 5.0, 6.0));

        rk4.resize(4);
        assert_eq!(rk4.len(), 4);
        assert!(rk4.k.iter().chain(rk4.kx.iter()).all(|b| b.len() == 4));
    }

    #[test]
    fn empty_system_is_a_no_op() {
        let forces = AccelSet::gravity();
        let params = Parameters::default();
        let mut bodies: Vec<Body> = Vec::new();
        verlet_step(&mut bodies, &forces, &params, false, &mut VerletScratch::default(), 1.0);
        rk4_step(&mut bodies, &forces, &params, false, &mut Rk4Scratch::default(), 1.0);
        assert!(bodies.is_empty());
    }

    #[test]
    fn rk4_pulls_bodies_together() {
        let forces = AccelSet::gravity();
        let params = Parameters::default();
        let mut bodies = pair();
        rk4_step(&mut bodies, &forces, &params, false, &mut Rk4Scratch::default(), 10.0);

        assert!(bodies[0].velocity.x > 0.0);
        assert!(bodies[1].velocity.x < 0.0);
        assert!(bodies[0].acceleration().x > 0.0);
    }
}
