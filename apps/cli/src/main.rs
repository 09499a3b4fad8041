#![deny(warnings)]

//! Headless CLI: runs purchase strategies against a catalog and prints the
//! final state of each run.

use anyhow::{Context, Result};
use sim_core::SimConfig;
use sim_econ::{BuildCatalog, StandardCatalog};
use sim_strategy::StrategyKind;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Horizon used when no `--duration` is given: the classic ten-billion
/// second marathon.
const DEFAULT_DURATION: f64 = 10_000_000_000.0;

const GIT_SHA: &str = env!("GIT_SHA");

struct Args {
    duration: Option<f64>,
    strategy: Option<String>,
    seed: Option<u64>,
    catalog: Option<String>,
    initial_cps: Option<f64>,
    history: bool,
    version: bool,
}

fn parse_args() -> Args {
    let mut args = Args {
        duration: None,
        strategy: None,
        seed: None,
        catalog: None,
        initial_cps: None,
        history: false,
        version: false,
    };
    let mut it = std::env::args().skip(1);
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--duration" => args.duration = it.next().and_then(|s| s.parse().ok()),
            "--strategy" => args.strategy = it.next(),
            "--seed" => args.seed = it.next().and_then(|s| s.parse().ok()),
            "--catalog" => args.catalog = it.next(),
            "--cps" => args.initial_cps = it.next().and_then(|s| s.parse().ok()),
            "--history" => args.history = true,
            "--version" => args.version = true,
            _ => {}
        }
    }
    args
}

fn main() -> Result<()> {
    let args = parse_args();
    if args.version {
        println!("clicker-sim {} ({})", env!("CARGO_PKG_VERSION"), GIT_SHA);
        return Ok(());
    }

    // Logging setup
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let catalog = match &args.catalog {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading catalog file {path}"))?;
            StandardCatalog::from_yaml_str(&text)
                .with_context(|| format!("parsing catalog file {path}"))?
        }
        None => StandardCatalog::classic(),
    };

    let kinds: Vec<StrategyKind> = match args.strategy.as_deref() {
        Some(s) => vec![s.parse().map_err(anyhow::Error::msg)?],
        None => StrategyKind::all().to_vec(),
    };

    let config = SimConfig {
        duration: args.duration.unwrap_or(DEFAULT_DURATION),
        initial_cps: args.initial_cps.unwrap_or(1.0),
    };
    let seed = args.seed.unwrap_or(42);
    info!(
        git_sha = GIT_SHA,
        duration = config.duration,
        seed,
        items = catalog.items().len(),
        "starting simulator"
    );

    for kind in kinds {
        let mut strategy = kind.create(seed);
        let state = sim_runtime::simulate_with_config(&catalog, config, strategy.as_mut())
            .with_context(|| format!("running {kind} strategy"))?;
        println!("{kind}: {state}");
        if args.history {
            let series: Vec<(f64, f64)> = state
                .history()
                .iter()
                .map(|entry| (entry.time, entry.total))
                .collect();
            println!("{}", serde_json::to_string(&series)?);
        }
    }

    Ok(())
}
