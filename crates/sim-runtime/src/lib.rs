#![deny(warnings)]

//! Simulation engine: drives the purchase loop against a catalog clone.
//!
//! Strategies own policy ("what to buy next"); this crate owns mechanism:
//! advancing time exactly far enough for each purchase, updating the
//! catalog, and enforcing the time horizon.

use sim_core::{validate_config, ClickerState, SimConfig, ValidationError};
use sim_econ::{validate_catalog, BuildCatalog, CatalogError};
use sim_strategy::Strategy;
use thiserror::Error;
use tracing::debug;

/// Errors that abort a simulation run.
#[derive(Debug, Error)]
pub enum SimError {
    /// Rejected run parameters.
    #[error(transparent)]
    Config(#[from] ValidationError),
    /// Rejected catalog data.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    /// The strategy named an item the catalog does not carry. A broken
    /// strategy contract, unlike the tolerated unaffordable-in-time case.
    #[error("strategy chose unknown item: {0}")]
    UnknownItem(String),
}

/// Run the simulation for `duration` seconds with the default 1.0 starting
/// rate. See [`simulate_with_config`].
pub fn simulate<C>(
    catalog: &C,
    duration: f64,
    strategy: &mut dyn Strategy,
) -> Result<ClickerState, SimError>
where
    C: BuildCatalog + Clone,
{
    simulate_with_config(catalog, SimConfig::for_duration(duration), strategy)
}

/// Run the simulation to the configured horizon and return the final state.
///
/// The catalog is cloned once up front, so the caller's copy never changes.
/// Each iteration consults the strategy with a snapshot of the state; a
/// `None` decision ends purchasing, and a purchase whose wait would overrun
/// the remaining horizon ends it too. Either way the rest of the horizon is
/// consumed as passive production, so the returned state always sits exactly
/// at `config.duration`.
///
/// # Errors
///
/// Invalid run parameters, invalid catalog data, and unknown item names
/// chosen by the strategy are fatal for the whole call.
pub fn simulate_with_config<C>(
    catalog: &C,
    config: SimConfig,
    strategy: &mut dyn Strategy,
) -> Result<ClickerState, SimError>
where
    C: BuildCatalog + Clone,
{
    validate_config(&config)?;
    validate_catalog(catalog)?;

    let mut build = catalog.clone();
    let mut state = ClickerState::with_initial_cps(config.initial_cps);

    while state.time() <= config.duration {
        let time_left = config.duration - state.time();
        let history = state.history();
        let Some(item) =
            strategy.choose(state.cookies(), state.cps(), &history, time_left, &build)
        else {
            break;
        };
        let cost = build
            .cost(&item)
            .ok_or_else(|| SimError::UnknownItem(item.clone()))?;
        let gain = build
            .cps_gain(&item)
            .ok_or_else(|| SimError::UnknownItem(item.clone()))?;
        let wait = state.time_until(cost);
        if wait > time_left {
            break;
        }
        state.wait(wait);
        state.buy_item(&item, cost, gain);
        build.record_purchase(&item);
        debug!(item = %item, wait, cost, cps = state.cps(), "purchase applied");
    }

    state.wait(config.duration - state.time());
    debug!(
        strategy = strategy.name(),
        produced = state.total(),
        "run complete"
    );
    Ok(state)
}
