//! Runtime engine settings
//!
//! Selects the integrator and whether the post-Newtonian correction is
//! applied. Both may change between steps; stored body state is untouched.

use std::fmt;

/// Which update rule `Simulation::step` dispatches to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Integrator {
    /// Velocity-Verlet: symplectic, 2nd order, one force evaluation per step
    #[default]
    Verlet,
    /// Classical Runge-Kutta: 4th order, not symplectic, four force evaluations per step
    RungeKutta4,
}

impl fmt::Display for Integrator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Integrator::Verlet => write!(f, "verlet"),
            Integrator::RungeKutta4 => write!(f, "rk4"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Engine {
    pub integrator: Integrator, // verlet or rk4
    pub relativity: bool, // apply 1 + 3 v^2 / c^2 to every pull
}
