//! The simulation: body collection, configuration and step dispatch
//!
//! `Simulation` owns the bodies, the engine settings, the physical
//! parameters, the active force set and the private scratch buffers of both
//! integrators. It has no running/paused state: the caller decides when to
//! call [`Simulation::step`].

use log::{debug, info, trace, warn};

use crate::configuration::config::{BodyRecord, ScenarioConfig};
use crate::simulation::engine::{Engine, Integrator};
use crate::simulation::error::SimError;
use crate::simulation::forces::AccelSet;
use crate::simulation::integrator::{rk4_step, verlet_step, Rk4Scratch, VerletScratch};
use crate::simulation::params::Parameters;
use crate::simulation::states::{Body, NVec3};

pub struct Simulation {
    engine: Engine,
    parameters: Parameters,
    bodies: Vec<Body>,
    forces: AccelSet,
    verlet: VerletScratch,
    rk4: Rk4Scratch,
    t: f64, // simulated seconds
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new()
    }
}

impl Simulation {
    /// Empty simulation with physical constants, Verlet, relativity off
    pub fn new() -> Self {
        Self::with_parameters(Parameters::default())
    }

    pub fn with_parameters(parameters: Parameters) -> Self {
        Self {
            engine: Engine::default(),
            parameters,
            bodies: Vec::new(),
            forces: AccelSet::gravity(),
            verlet: VerletScratch::default(),
            rk4: Rk4Scratch::default(),
            t: 0.0,
        }
    }

    /// Replace the force set (direct Newtonian gravity by default)
    pub fn with_forces(mut self, forces: AccelSet) -> Self {
        self.forces = forces;
        self
    }

    /// Build a simulation from a loaded scenario
    pub fn from_config(cfg: ScenarioConfig) -> Result<Self, SimError> {
        let mut sim = Self::with_parameters(cfg.parameters.to_parameters());
        sim.set_integrator(cfg.engine.integrator.into());
        sim.set_relativity(cfg.engine.relativity);
        sim.load_records(cfg.bodies)?;
        Ok(sim)
    }

    fn validate(body: &Body) -> Result<(), SimError> {
        // written negated so NaN fails too
        if !(body.mass > 0.0 && body.mass.is_finite()) {
            return Err(SimError::InvalidMass { name: body.name.clone(), mass: body.mass });
        }
        if !(body.radius >= 0.0) {
            return Err(SimError::InvalidRadius { name: body.name.clone(), radius: body.radius });
        }
        // a single NaN or inf here spreads to every body on the next step
        let finite = body.position.iter().chain(body.velocity.iter()).all(|x| x.is_finite());
        if !finite {
            return Err(SimError::NonFiniteState { name: body.name.clone() });
        }
        Ok(())
    }

    /// Append a body. Refused bodies leave the collection untouched.
    pub fn add_body(&mut self, body: Body) -> Result<(), SimError> {
        if let Err(e) = Self::validate(&body) {
            warn!("rejected body: {}", e);
            return Err(e);
        }
        debug!("adding body '{}' (mass {} kg)", body.name, body.mass);
        self.bodies.push(body);
        self.invalidate_scratch();
        Ok(())
    }

    /// Append a body from its raw parts
    pub fn add(
        &mut self,
        name: &str,
        mass: f64,
        radius: f64,
        color: &str,
        position: [f64; 3],
        velocity: [f64; 3],
    ) -> Result<(), SimError> {
        self.add_body(Body::new(name, mass, radius, color, position.into(), velocity.into()))
    }

    /// Remove every body and reset the clock
    pub fn clear(&mut self) {
        debug!("clearing {} bodies", self.bodies.len());
        self.bodies.clear();
        self.invalidate_scratch();
        self.t = 0.0;
    }

    fn invalidate_scratch(&mut self) {
        let n = self.bodies.len();
        self.verlet.resize(n);
        self.rk4.resize(n);
    }

    /// Advance the system by `dt` seconds with the active integrator
    pub fn step(&mut self, dt: f64) {
        trace!("step t={} dt={} n={} via {}", self.t, dt, self.bodies.len(), self.engine.integrator);
        let relativity = self.engine.relativity;
        match self.engine.integrator {
            Integrator::Verlet => verlet_step(
                &mut self.bodies,
                &self.forces,
                &self.parameters,
                relativity,
                &mut self.verlet,
                dt,
            ),
            Integrator::RungeKutta4 => rk4_step(
                &mut self.bodies,
                &self.forces,
                &self.parameters,
                relativity,
                &mut self.rk4,
                dt,
            ),
        }
        self.t += dt;
    }

    /// Run `steps` consecutive steps of size `dt`
    pub fn run(&mut self, dt: f64, steps: usize) {
        for _ in 0..steps {
            self.step(dt);
        }
    }

    pub fn set_integrator(&mut self, integrator: Integrator) {
        if self.engine.integrator != integrator {
            info!("integrator: {} -> {}", self.engine.integrator, integrator);
        }
        self.engine.integrator = integrator;
    }

    pub fn integrator(&self) -> Integrator {
        self.engine.integrator
    }

    pub fn set_relativity(&mut self, enabled: bool) {
        if self.engine.relativity != enabled {
            info!("relativity correction {}", if enabled { "on" } else { "off" });
        }
        self.engine.relativity = enabled;
    }

    pub fn relativity(&self) -> bool {
        self.engine.relativity
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Simulated seconds since creation or the last clear
    pub fn time(&self) -> f64 {
        self.t
    }

    /// Persisted view of every body, in collection order
    pub fn records(&self) -> Vec<BodyRecord> {
        self.bodies.iter().map(BodyRecord::from).collect()
    }

    /// Replace the collection with `records`. Either every record is valid
    /// and loaded, or nothing changes.
    pub fn load_records(&mut self, records: Vec<BodyRecord>) -> Result<(), SimError> {
        self.load_bodies(records.into_iter().map(Body::from).collect())
    }

    /// Replace the collection with `bodies`, all or nothing
    pub fn load_bodies(&mut self, bodies: Vec<Body>) -> Result<(), SimError> {
        if let Some(e) = bodies.iter().find_map(|b| Self::validate(b).err()) {
            warn!("rejected body set: {}", e);
            return Err(e);
        }
        self.clear();
        debug!("loading {} bodies", bodies.len());
        self.bodies = bodies;
        self.invalidate_scratch();
        Ok(())
    }

    /// Center of mass of the collection, zero when empty
    pub fn center_of_mass(&self) -> NVec3 {
        let total: f64 = self.bodies.iter().map(|b| b.mass).sum();
        if total == 0.0 {
            return NVec3::zeros();
        }
        self.bodies.iter().fold(NVec3::zeros(), |acc, b| acc + b.position * b.mass) / total
    }
}
