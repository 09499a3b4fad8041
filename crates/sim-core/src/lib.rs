#![deny(warnings)]

//! Core domain state for the clicker simulator.
//!
//! This crate defines the mutable run state with its purchase history, the
//! run configuration, and validation helpers to guarantee basic invariants.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// One row of the purchase audit log.
///
/// The first entry of every run is the sentinel `(0.0, None, 0.0, 0.0)`;
/// each later entry records exactly one purchase.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Simulated time of the event, in seconds.
    pub time: f64,
    /// Purchased item name; `None` only in the sentinel entry.
    pub item: Option<String>,
    /// Price paid.
    pub cost: f64,
    /// Lifetime cookies produced at the moment of purchase.
    pub total: f64,
}

/// Mutable state of one simulation run.
///
/// Mutations flow exclusively through [`ClickerState::wait`] and
/// [`ClickerState::buy_item`]; accessors hand out copies, so a returned
/// state is effectively read-only for its consumers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClickerState {
    total: f64,
    current: f64,
    time: f64,
    cps: f64,
    history: Vec<HistoryEntry>,
}

impl ClickerState {
    /// Fresh state at time zero with the default 1.0 CpS.
    pub fn new() -> Self {
        Self::with_initial_cps(1.0)
    }

    /// Fresh state at time zero with a caller-chosen starting rate.
    ///
    /// The rate is not checked here; engines validate their [`SimConfig`]
    /// before constructing state.
    pub fn with_initial_cps(cps: f64) -> Self {
        Self {
            total: 0.0,
            current: 0.0,
            time: 0.0,
            cps,
            history: vec![HistoryEntry {
                time: 0.0,
                item: None,
                cost: 0.0,
                total: 0.0,
            }],
        }
    }

    /// Currently spendable cookies (not the lifetime total).
    pub fn cookies(&self) -> f64 {
        self.current
    }

    /// Lifetime cookies produced.
    pub fn total(&self) -> f64 {
        self.total
    }

    /// Current production rate in cookies per second.
    pub fn cps(&self) -> f64 {
        self.cps
    }

    /// Elapsed simulated time in seconds.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Copy of the purchase history, sentinel entry first.
    pub fn history(&self) -> Vec<HistoryEntry> {
        self.history.clone()
    }

    /// Seconds of waiting until `target` cookies are on hand: `0.0` when
    /// the balance already covers it, otherwise the smallest whole number
    /// of seconds that does at the current rate. Only meaningful for a
    /// positive rate; engine validation guarantees that.
    pub fn time_until(&self, target: f64) -> f64 {
        if target <= self.current {
            0.0
        } else {
            ((target - self.current) / self.cps).ceil()
        }
    }

    /// Advance time by `delta` seconds, producing at the current rate.
    /// Balance and lifetime total move together since nothing is spent
    /// while waiting. Non-positive deltas are ignored.
    pub fn wait(&mut self, delta: f64) {
        if delta > 0.0 {
            self.time += delta;
            self.current += delta * self.cps;
            self.total += delta * self.cps;
        }
    }

    /// Spend `cost` on `name`, gaining `cps_gain`, and append the purchase
    /// to the history. Ignored when the balance cannot cover the cost.
    pub fn buy_item(&mut self, name: &str, cost: f64, cps_gain: f64) {
        if self.current >= cost {
            self.current -= cost;
            self.cps += cps_gain;
            self.history.push(HistoryEntry {
                time: self.time,
                item: Some(name.to_string()),
                cost,
                total: self.total,
            });
        }
    }
}

impl Default for ClickerState {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ClickerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "produced {:.1} cookies, {:.1} in the bank, {:.1}s elapsed at {:.1} CpS",
            self.total, self.current, self.time, self.cps
        )
    }
}

/// Parameters of one simulation run.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct SimConfig {
    /// Time horizon in seconds.
    pub duration: f64,
    /// Starting production rate.
    pub initial_cps: f64,
}

impl SimConfig {
    /// Config for `duration` with the default 1.0 starting rate.
    pub fn for_duration(duration: f64) -> Self {
        Self {
            duration,
            initial_cps: 1.0,
        }
    }
}

/// Validation errors for run parameters.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// Horizons must be a finite number of seconds.
    #[error("duration must be finite, got {0}")]
    NonFiniteDuration(f64),
    /// Negative horizons are meaningless.
    #[error("duration must be >= 0, got {0}")]
    NegativeDuration(f64),
    /// The wait arithmetic terminates only for a strictly positive rate.
    #[error("initial CpS must be finite and > 0, got {0}")]
    NonPositiveRate(f64),
}

/// Validate run parameters. A zero duration is allowed.
pub fn validate_config(cfg: &SimConfig) -> Result<(), ValidationError> {
    if !cfg.duration.is_finite() {
        return Err(ValidationError::NonFiniteDuration(cfg.duration));
    }
    if cfg.duration < 0.0 {
        return Err(ValidationError::NegativeDuration(cfg.duration));
    }
    if !cfg.initial_cps.is_finite() || cfg.initial_cps <= 0.0 {
        return Err(ValidationError::NonPositiveRate(cfg.initial_cps));
    }
    Ok(())
}
