use gravsim::{bench_derivatives, bench_rk4};
use gravsim::{relative_motion, render, rk4_integrate, Scenario, ScenarioConfig};

use anyhow::{Context, Result};
use clap::Parser;

use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
struct Args {
    /// Scenario file; bare names are looked up under scenarios/
    #[arg(short, default_value = "leo.yaml")]
    file_name: String,

    /// Write the rendered report here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Run the micro-benchmarks instead of a scenario
    #[arg(long)]
    bench: bool,
}

// direct paths win; bare names fall back to the crate's scenarios/ directory
fn resolve_scenario_path(file_name: &str) -> PathBuf {
    let direct = PathBuf::from(file_name);
    if direct.exists() {
        return direct;
    }
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();

    if args.bench {
        bench_derivatives()?;
        bench_rk4()?;
        return Ok(());
    }

    let config_path = resolve_scenario_path(&args.file_name);
    let scenario_cfg = ScenarioConfig::from_path(&config_path)
        .with_context(|| format!("failed to load scenario {}", config_path.display()))?;

    let mut scenario = Scenario::build_scenario(scenario_cfg)?;

    let snapshots = rk4_integrate(&mut scenario.model, &scenario.parameters)?;
    tracing::info!(snapshots = snapshots.len(), "integration finished");

    let records = relative_motion(
        &scenario.model,
        &snapshots,
        &scenario.report.reference,
        &scenario.report.observed,
        scenario.report.reference_radius,
    )?;
    let text = render(&records);

    match &args.output {
        Some(path) => {
            fs::write(path, text)
                .with_context(|| format!("failed to write report {}", path.display()))?;
            tracing::info!(path = %path.display(), "report written");
        }
        None => print!("{text}"),
    }

    Ok(())
}
