use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use orbit_core::constants::{AU, SECONDS_PER_DAY};
use orbit_sim::{summarize_validation, validate_range, Body, EngineConfig, Planet, SolarSystem};
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "orbit")]
#[command(about = "Keplerian orbit engine")]
struct Cli {
    /// Engine configuration as JSON (missing fields use defaults)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show every catalog planet at a given day
    Planets {
        /// Days since periapsis passage
        #[arg(short, long, default_value = "0")]
        day: f64,
    },

    /// Show every state query for one planet
    State {
        #[arg(short, long)]
        planet: String,
        #[arg(short, long, default_value = "0")]
        day: f64,
        /// Terms of the Bessel series
        #[arg(long, default_value = "20")]
        terms: u32,
    },

    /// Sample a closed orbit and dump it as JSON
    Orbit {
        #[arg(short, long)]
        planet: String,
        #[arg(short = 'n', long, default_value = "360")]
        points: usize,
        /// Use the reduced two-body model in the barycentric frame
        #[arg(long, default_value = "false")]
        two_body: bool,
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check conservation laws and solver agreement over a time range
    Validate {
        #[arg(short, long)]
        planet: String,
        #[arg(long, default_value = "0")]
        start: f64,
        /// End day (defaults to one period)
        #[arg(long)]
        end: Option<f64>,
        #[arg(long, default_value = "1")]
        step: f64,
        #[arg(long, default_value = "20")]
        terms: u32,
    },
}

#[derive(Serialize)]
struct OrbitDump<'a> {
    planet: &'a str,
    two_body: bool,
    period_days: f64,
    samples: usize,
    points: Vec<[f64; 3]>,
}

fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    let Some(path) = path else {
        return Ok(EngineConfig::default());
    };

    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config: EngineConfig = serde_json::from_str(&text)
        .with_context(|| format!("parsing config {}", path.display()))?;
    config.validate()?;

    tracing::info!(path = %path.display(), "loaded engine config");
    Ok(config)
}

fn build_body(name: &str, config: EngineConfig) -> Result<Body> {
    let Some(planet) = Planet::from_name(name) else {
        anyhow::bail!("Unknown planet '{}' (expected one of Mercury..Neptune)", name);
    };
    Ok(planet.body_with_config(config)?)
}

fn main() -> Result<()> {
    // RUST_LOG controls verbosity (env-filter feature)
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Planets { day } => {
            let system = SolarSystem::with_config(Planet::all(), config)?;
            let snapshot = system.snapshot(day)?;

            println!("Planet positions {} days after periapsis:\n", snapshot.time);
            println!("{:<10} {:>12} {:>12} {:>12} {:>10} {:>12}",
                "Planet", "X (AU)", "Y (AU)", "Z (AU)", "r (AU)", "v (AU/d)");

            for planet in system.planets() {
                let state = &snapshot.states[&planet];
                println!("{:<10} {:>12.6} {:>12.6} {:>12.6} {:>10.4} {:>12.6}",
                    planet.name(), state.position.x, state.position.y, state.position.z,
                    state.distance, state.velocity.norm());
            }
        }

        Commands::State { planet, day, terms } => {
            let body = build_body(&planet, config)?;
            let pos = body.position(day)?;
            let vel = body.speed(day)?;
            let pos_2d = body.position_2d(day)?;
            let two_body = body.two_body();
            let [planet_bc, star_bc] = two_body.positions(day)?;

            println!("{} at day {}", body, day);
            println!("  e = {}, a = {} AU, P = {} d, m = {:.4e} kg",
                body.elements().eccentricity(), body.elements().semi_major_axis(), body.period(), body.mass());
            println!("  μ = {:.6e} AU³/d², c = {:.6e} AU²/d", body.mu(), body.angular_momentum_constant());

            println!("\nAnomalies:");
            println!("  Mean:              {:.10} rad", body.mean_anomaly(day));
            println!("  Eccentric:         {:.10} rad", body.eccentric_anomaly(day)?);
            println!("  Eccentric ({:>2}):    {:.10} rad", terms, body.eccentric_anomaly_via_series(day, terms));
            println!("  True (RK4):        {:.10} rad", body.real_anomaly(day));
            println!("  True (closed):     {:.10} rad", body.real_anomaly_from_eccentric(day)?);
            println!("  dθ/dt:             {:.6e} rad/d", body.real_anomaly_rate(day));

            println!("\nState:");
            println!("  Plane position:    ({:.6}, {:.6}) AU", pos_2d.x, pos_2d.y);
            println!("  Position:          ({:.6}, {:.6}, {:.6}) AU", pos.x, pos.y, pos.z);
            println!("  Velocity:          ({:.6e}, {:.6e}, {:.6e}) AU/d", vel.x, vel.y, vel.z);
            println!("  Distance:          {:.6} AU", body.distance_to_sun(day)?);
            println!("  Speed:             {:.6e} AU/d ({:.3} km/s)",
                body.speed_module(day)?, body.speed_module(day)? * AU / 1000.0 / SECONDS_PER_DAY);
            println!("  Energy:            {:.10e} (constant {:.10e})", body.energy_from_time(day)?, body.energy());
            println!("  |L|:               {:.10e}", body.angular_moment(day)?.norm());

            println!("\nReduced two-body:");
            println!("  μ' = {:.6e}, P' = {:.4} d, m/(m+M) = {:.4e}",
                two_body.mu(), two_body.period(), two_body.mass_ratio());
            println!("  Planet:            ({:.6}, {:.6}) AU", planet_bc.x, planet_bc.y);
            println!("  Star:              ({:.6e}, {:.6e}) AU", star_bc.x, star_bc.y);
        }

        Commands::Orbit { planet, points, two_body, output } => {
            let body = build_body(&planet, config)?;
            let (orbit, period) = if two_body {
                (body.get_orbit_2bodies(points)?, body.two_body().period())
            } else {
                (body.get_orbit(points)?, body.period())
            };

            let dump = OrbitDump {
                planet: body.name(),
                two_body,
                period_days: period,
                samples: orbit.samples(),
                points: orbit.iter().map(|p| [p.x, p.y, p.z]).collect(),
            };
            let json = serde_json::to_string_pretty(&dump)?;

            match output {
                Some(path) => {
                    std::fs::write(&path, json)
                        .with_context(|| format!("writing {}", path.display()))?;
                    println!("Wrote {} points for {} to {}", orbit.len(), body, path.display());
                }
                None => println!("{}", json),
            }
        }

        Commands::Validate { planet, start, end, step, terms } => {
            let body = build_body(&planet, config)?;
            let end = end.unwrap_or(start + body.period());

            println!("Validating {} from day {} to {} with step {} ({} series terms)",
                body, start, end, step, terms);

            let results = validate_range(&body, start, end, step, terms)?;
            let summary = summarize_validation(&results);

            println!("\n{:<24} {:>15} {:>15}", "Check", "Max", "Mean");
            println!("{:<24} {:>15.3e} {:>15.3e}", "Newton vs series", summary.max_series_gap, summary.mean_series_gap);
            println!("{:<24} {:>15.3e} {:>15}", "Energy (relative)", summary.max_energy_residual, "-");
            println!("{:<24} {:>15.3e} {:>15}", "|L| vs c (relative)", summary.max_momentum_residual, "-");
            println!("{:<24} {:>15.3e} {:>15.3e}", "True anomaly (rad)", summary.max_anomaly_gap, summary.mean_anomaly_gap);
            println!("\n{} points", summary.num_points);
        }
    }

    Ok(())
}
