pub mod simulation;
pub mod configuration;
pub mod benchmark;

pub use simulation::states::{Body, NVec3};
pub use simulation::params::{Parameters, GRAVITATIONAL_CONSTANT, SPEED_OF_LIGHT, DEFAULT_SOFTENING2};
pub use simulation::engine::{Engine, Integrator};
pub use simulation::error::SimError;
pub use simulation::forces::{Acceleration, AccelSet, NewtonianGravity, Snapshot};
pub use simulation::integrator::{verlet_step, rk4_step, VerletScratch, Rk4Scratch};
pub use simulation::scenario::Simulation;
pub use configuration::config::{IntegratorConfig, EngineConfig, ParametersConfig, BodyRecord, Vec3Record, ScenarioConfig};
pub use benchmark::benchmark::{bench_gravity, bench_integrators};
