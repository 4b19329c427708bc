//! Core state types for the gravity simulation.
//!
//! A `Body` is a point mass with a label, display hints (radius, color) and
//! its dynamic state. Positions are meters, velocities meters/second.
//!
//! `acceleration` is a derived cache: it is written only by the integrators
//! and always holds the field evaluated during the last completed step.

use nalgebra::Vector3;
pub type NVec3 = Vector3<f64>;

#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub name: String, // label, not a key
    pub mass: f64, // kg, > 0
    pub radius: f64, // m, display only
    pub color: String, // display only, e.g. "#ffcc00"
    pub position: NVec3, // m
    pub velocity: NVec3, // m/s
    pub(crate) acceleration: NVec3, // m/s^2, derived
}

impl Body {
    /// New body at rest acceleration-wise; the cache is filled by the first step
    pub fn new(
        name: impl Into<String>,
        mass: f64,
        radius: f64,
        color: impl Into<String>,
        position: NVec3,
        velocity: NVec3,
    ) -> Self {
        Self {
            name: name.into(),
            mass,
            radius,
            color: color.into(),
            position,
            velocity,
            acceleration: NVec3::zeros(),
        }
    }

    /// Acceleration evaluated during the most recent step
    pub fn acceleration(&self) -> NVec3 {
        self.acceleration
    }

    pub fn momentum(&self) -> NVec3 {
        self.velocity * self.mass
    }

    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.velocity.norm_squared()
    }
}
