//! Conserved-quantity diagnostics
//!
//! Used to watch numerical drift: an isolated system should hold total
//! energy, linear and angular momentum (Verlet keeps energy bounded, RK4
//! drifts slowly). Pairs inside the softening cutoff contribute no potential
//! energy, matching the force model.

use super::params::Parameters;
use super::states::{Body, NVec3};

pub fn kinetic_energy(bodies: &[Body]) -> f64 {
    bodies.iter().map(|b| b.kinetic_energy()).sum()
}

/// Newtonian potential energy, each pair counted once
pub fn potential_energy(bodies: &[Body], params: &Parameters) -> f64 {
    bodies
        .iter()
        .enumerate()
        .flat_map(|(i, a)| {
            bodies[i + 1..].iter().map(move |b| {
                let dist2 = (b.position - a.position).norm_squared();
                if dist2 < params.softening2 {
                    0.0
                } else {
                    -params.g * a.mass * b.mass / dist2.sqrt()
                }
            })
        })
        .sum()
}

pub fn total_energy(bodies: &[Body], params: &Parameters) -> f64 {
    kinetic_energy(bodies) + potential_energy(bodies, params)
}

pub fn total_momentum(bodies: &[Body]) -> NVec3 {
    bodies
        .iter()
        .map(|b| b.momentum())
        .fold(NVec3::zeros(), |acc, p| acc + p)
}

/// Total angular momentum about the origin, sum of m (r x v)
pub fn total_angular_momentum(bodies: &[Body]) -> NVec3 {
    bodies
        .iter()
        .map(|b| b.position.cross(&b.velocity) * b.mass)
        .fold(NVec3::zeros(), |acc, l| acc + l)
}
