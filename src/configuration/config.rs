//! Configuration types for loading simulation scenarios from YAML.
//!
//! This module defines a thin, `serde` representation of a scenario:
//!
//! - [`EngineConfig`]     – integrator choice and the relativity toggle
//! - [`ParametersConfig`] – step size, step count and optional constant overrides
//! - [`BodyRecord`]       – persisted shape of one body
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! # YAML format
//!
//! ```yaml
//! engine:
//!   integrator: "verlet"    # or "rk4"
//!   relativity: false
//!
//! parameters:
//!   dt: 3600.0              # seconds per step
//!   steps: 8760             # number of steps to run
//!   # G: 6.6743e-11         # optional, defaults to CODATA value
//!   # c: 299792458.0        # optional
//!   # softening2: 1.0e6     # optional, m^2
//!
//! bodies:
//!   - name: "Sun"
//!     mass: 1.989e30
//!     radius: 6.9634e8
//!     color: "#ffff00"
//!     position: { x: 0.0, y: 0.0, z: 0.0 }
//!     velocity: { x: 0.0, y: 0.0, z: 0.0 }
//! ```
//!
//! `BodyRecord` carries no acceleration: it is recomputed by the first step
//! after loading.

use serde::{Deserialize, Serialize};

use crate::simulation::engine::Integrator;
use crate::simulation::params::Parameters;
use crate::simulation::states::{Body, NVec3};

/// Which integrator method used by the engine
/// `integrator: "verlet"` or `integrator: "rk4"`
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IntegratorConfig {
    #[serde(rename = "verlet")] // symplectic, bounded energy error
    #[default]
    Verlet,

    #[serde(rename = "rk4")] // higher local accuracy per step, not symplectic
    Rk4,
}

impl From<IntegratorConfig> for Integrator {
    fn from(cfg: IntegratorConfig) -> Self {
        match cfg {
            IntegratorConfig::Verlet => Integrator::Verlet,
            IntegratorConfig::Rk4 => Integrator::RungeKutta4,
        }
    }
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct EngineConfig {
    #[serde(default)]
    pub integrator: IntegratorConfig,
    #[serde(default)]
    pub relativity: bool, // apply the post-Newtonian multiplier
}

#[derive(Deserialize, Debug, Clone)]
#[allow(non_snake_case)]
pub struct ParametersConfig {
    pub dt: f64, // seconds per step
    pub steps: usize, // steps to run
    #[serde(default)]
    pub G: Option<f64>, // gravitational constant override
    #[serde(default)]
    pub c: Option<f64>, // speed of light override
    #[serde(default)]
    pub softening2: Option<f64>, // squared cutoff distance override
}

impl ParametersConfig {
    /// Runtime parameters, falling back to the physical constants
    pub fn to_parameters(&self) -> Parameters {
        let defaults = Parameters::default();
        Parameters {
            g: self.G.unwrap_or(defaults.g),
            c: self.c.unwrap_or(defaults.c),
            softening2: self.softening2.unwrap_or(defaults.softening2),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec3Record {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl From<NVec3> for Vec3Record {
    fn from(v: NVec3) -> Self {
        Self { x: v.x, y: v.y, z: v.z }
    }
}

impl From<Vec3Record> for NVec3 {
    fn from(r: Vec3Record) -> Self {
        NVec3::new(r.x, r.y, r.z)
    }
}

/// Persisted state of a single body
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BodyRecord {
    pub name: String,
    pub mass: f64, // kg
    pub radius: f64, // m
    pub color: String, // hex RGB
    pub position: Vec3Record, // m
    pub velocity: Vec3Record, // m/s
}

impl From<&Body> for BodyRecord {
    fn from(b: &Body) -> Self {
        Self {
            name: b.name.clone(),
            mass: b.mass,
            radius: b.radius,
            color: b.color.clone(),
            position: b.position.into(),
            velocity: b.velocity.into(),
        }
    }
}

impl From<BodyRecord> for Body {
    fn from(r: BodyRecord) -> Self {
        Body::new(r.name, r.mass, r.radius, r.color, r.position.into(), r.velocity.into())
    }
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub engine: EngineConfig,
    pub parameters: ParametersConfig,
    pub bodies: Vec<BodyRecord>,
}

impl ScenarioConfig {
    pub fn from_yaml(text: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENARIO: &str = r##"
engine:
  integrator: "rk4"
  relativity: true
parameters:
  dt: 60.0
  steps: 10
  softening2: 4.0
bodies:
  - name: "A"
    mass: 1.0e10
    radius: 1.0
    color: "#ffffff"
    position: { x: 0.0, y: 0.0, z: 0.0 }
    velocity: { x: 0.0, y: 0.0, z: 0.0 }
  - name: "B"
    mass: 2.0e10
    radius: 1.0
    color: "#00ff00"
    position: { x: 100.0, y: 0.0, z: 0.0 }
    velocity: { x: 0.0, y: 1.5, z: 0.0 }
"##;

    #[test]
    fn parses_full_scenario() {
        let cfg = ScenarioConfig::from_yaml(SCENARIO).expect("scenario should parse");
        assert_eq!(cfg.engine.integrator, IntegratorConfig::Rk4);
        assert!(cfg.engine.relativity);
        assert_eq!(cfg.parameters.steps, 10);
        assert_eq!(cfg.bodies.len(), 2);
        assert_eq!(cfg.bodies[1].velocity.y, 1.5);

        let p = cfg.parameters.to_parameters();
        assert_eq!(p.softening2, 4.0);
        assert_eq!(p.g, crate::simulation::params::GRAVITATIONAL_CONSTANT);
    }

    #[test]
    fn engine_section_is_optional() {
        let text = r##"
parameters: { dt: 1.0, steps: 1 }
bodies: []
"##;
        let cfg = ScenarioConfig::from_yaml(text).expect("scenario should parse");
        assert_eq!(cfg.engine.integrator, IntegratorConfig::Verlet);
        assert!(!cfg.engine.relativity);
    }

    #[test]
    fn unknown_integrator_is_rejected() {
        let text = r##"
engine: { integrator: "euler" }
parameters: { dt: 1.0, steps: 1 }
bodies: []
"##;
        assert!(ScenarioConfig::from_yaml(text).is_err());
    }

    #[test]
    fn record_does_not_carry_acceleration() {
        let body = Body::new("X", 1.0, 0.0, "#123456", NVec3::new(1.0, 2.0, 3.0), NVec3::zeros());
        let yaml = serde_yaml::to_string(&BodyRecord::from(&body)).expect("serialize");
        assert!(!yaml.contains("acceleration"));
        assert!(yaml.contains("#123456"));
    }
}
