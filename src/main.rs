use orbitsim::simulation::diagnostics::{total_energy, total_momentum};
use orbitsim::simulation::presets::solar_system;
use orbitsim::{bench_gravity, bench_integrators};
use orbitsim::{Integrator, IntegratorConfig, ScenarioConfig, Simulation};
use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(about = "Point-mass gravity simulation")]
struct Args {
    /// Scenario YAML; the built-in Sun/Earth/Mars system when absent
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Number of steps (overrides the scenario)
    #[arg(short, long)]
    steps: Option<usize>,

    /// Step size in seconds (overrides the scenario)
    #[arg(long)]
    dt: Option<f64>,

    /// Integrator (overrides the scenario)
    #[arg(short, long, value_parser = parse_integrator)]
    integrator: Option<IntegratorConfig>,

    /// Turn on the post-Newtonian correction
    #[arg(short, long)]
    relativity: bool,

    /// Log energy every N steps, 0 for start and end only
    #[arg(long, default_value_t = 0)]
    report_every: usize,

    /// Run the timing benchmarks instead of a simulation
    #[arg(long)]
    bench: bool,
}

fn parse_integrator(s: &str) -> Result<IntegratorConfig, String> {
    match s {
        "verlet" => Ok(IntegratorConfig::Verlet),
        "rk4" => Ok(IntegratorConfig::Rk4),
        other => Err(format!("unknown integrator '{other}' (expected verlet or rk4)")),
    }
}

// load here to keep main clean
fn load_scenario(path: &PathBuf) -> Result<ScenarioConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading scenario {}", path.display()))?;
    let cfg = ScenarioConfig::from_yaml(&text)
        .with_context(|| format!("parsing scenario {}", path.display()))?;
    Ok(cfg)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    if args.bench {
        bench_gravity();
        bench_integrators();
        return Ok(());
    }

    // one day per step, one year by default
    let (mut sim, mut dt, mut steps) = match &args.file {
        Some(path) => {
            let cfg = load_scenario(path)?;
            let (dt, steps) = (cfg.parameters.dt, cfg.parameters.steps);
            (Simulation::from_config(cfg)?, dt, steps)
        }
        None => {
            let mut sim = Simulation::new();
            sim.load_bodies(solar_system())?;
            (sim, 86_400.0, 365)
        }
    };
    if let Some(d) = args.dt {
        dt = d;
    }
    if let Some(s) = args.steps {
        steps = s;
    }
    if let Some(i) = args.integrator {
        sim.set_integrator(Integrator::from(i));
    }
    if args.relativity {
        sim.set_relativity(true);
    }

    info!(
        "running {} bodies for {} steps of {} s ({}, relativity {})",
        sim.len(), steps, dt, sim.integrator(), sim.relativity()
    );

    let e0 = total_energy(sim.bodies(), sim.parameters());
    info!("initial energy {:.6e} J", e0);

    for k in 1..=steps {
        sim.step(dt);
        if args.report_every > 0 && k % args.report_every == 0 {
            let e = total_energy(sim.bodies(), sim.parameters());
            info!("step {k:>8}  t = {:.3e} s  E = {:.6e} J  dE/E = {:.3e}", sim.time(), e, (e - e0) / e0.abs());
        }
    }

    let e1 = total_energy(sim.bodies(), sim.parameters());
    info!("final energy {:.6e} J, relative drift {:.3e}", e1, (e1 - e0) / e0.abs());
    info!("total momentum {:?}", total_momentum(sim.bodies()));

    for b in sim.bodies() {
        println!(
            "{:<12} x = [{:+.6e}, {:+.6e}, {:+.6e}] m  v = [{:+.6e}, {:+.6e}, {:+.6e}] m/s  |a| = {:.6e} m/s^2",
            b.name,
            b.position.x, b.position.y, b.position.z,
            b.velocity.x, b.velocity.y, b.velocity.z,
            b.acceleration().norm(),
        );
    }
    Ok(())
}
