#![deny(warnings)]

//! Purchase strategies: pluggable what-to-buy policies for the simulator.
//!
//! The engine owns mechanism (waiting, paying, the horizon); a [`Strategy`]
//! owns policy. Each call answers one question: given the state right now,
//! which item next, or stop?

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use sim_core::HistoryEntry;
use sim_econ::BuildCatalog;
use std::fmt;
use std::str::FromStr;

/// A purchase policy consulted once per engine iteration.
///
/// Implementations treat their inputs as read-only: the history slice is
/// already a defensive copy and the catalog may only be queried. Returning
/// `None` tells the engine to stop purchasing for good.
pub trait Strategy {
    /// Short name used in logs and driver output.
    fn name(&self) -> &'static str;

    /// Pick the next item to buy, or `None` to stop.
    ///
    /// `time_left` is the remaining horizon in seconds; policies that care
    /// about affordability can budget `cookies + cps * time_left`.
    fn choose(
        &mut self,
        cookies: f64,
        cps: f64,
        history: &[HistoryEntry],
        time_left: f64,
        catalog: &dyn BuildCatalog,
    ) -> Option<String>;
}

/// Baseline policy: never buys anything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoPurchase;

impl Strategy for NoPurchase {
    fn name(&self) -> &'static str {
        "none"
    }

    fn choose(
        &mut self,
        _cookies: f64,
        _cps: f64,
        _history: &[HistoryEntry],
        _time_left: f64,
        _catalog: &dyn BuildCatalog,
    ) -> Option<String> {
        None
    }
}

/// Buys the cheapest item affordable within the remaining horizon.
///
/// On a cost tie the item listed first in the catalog wins.
#[derive(Clone, Copy, Debug, Default)]
pub struct CheapestAffordable;

impl Strategy for CheapestAffordable {
    fn name(&self) -> &'static str {
        "cheap"
    }

    fn choose(
        &mut self,
        cookies: f64,
        cps: f64,
        _history: &[HistoryEntry],
        time_left: f64,
        catalog: &dyn BuildCatalog,
    ) -> Option<String> {
        let budget = cookies + cps * time_left;
        let mut best: Option<(f64, String)> = None;
        for name in catalog.items() {
            let Some(cost) = catalog.cost(&name) else {
                continue;
            };
            if cost > budget {
                continue;
            }
            if best.as_ref().map_or(true, |(c, _)| cost < *c) {
                best = Some((cost, name));
            }
        }
        best.map(|(_, name)| name)
    }
}

/// Buys the most expensive item affordable within the remaining horizon.
///
/// On a cost tie the item listed first in the catalog wins.
#[derive(Clone, Copy, Debug, Default)]
pub struct MostExpensiveAffordable;

impl Strategy for MostExpensiveAffordable {
    fn name(&self) -> &'static str {
        "expensive"
    }

    fn choose(
        &mut self,
        cookies: f64,
        cps: f64,
        _history: &[HistoryEntry],
        time_left: f64,
        catalog: &dyn BuildCatalog,
    ) -> Option<String> {
        let budget = cookies + cps * time_left;
        let mut best: Option<(f64, String)> = None;
        for name in catalog.items() {
            let Some(cost) = catalog.cost(&name) else {
                continue;
            };
            if cost > budget {
                continue;
            }
            if best.as_ref().map_or(true, |(c, _)| cost > *c) {
                best = Some((cost, name));
            }
        }
        best.map(|(_, name)| name)
    }
}

/// Picks an item uniformly at random, ignoring affordability entirely; the
/// engine's horizon guard absorbs infeasible picks.
#[derive(Clone, Debug)]
pub struct RandomChoice {
    rng: ChaCha8Rng,
}

impl RandomChoice {
    /// Policy with a reproducible stream of picks.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl Strategy for RandomChoice {
    fn name(&self) -> &'static str {
        "random"
    }

    fn choose(
        &mut self,
        _cookies: f64,
        _cps: f64,
        _history: &[HistoryEntry],
        _time_left: f64,
        catalog: &dyn BuildCatalog,
    ) -> Option<String> {
        let items = catalog.items();
        if items.is_empty() {
            return None;
        }
        let idx = self.rng.gen_range(0..items.len());
        items.into_iter().nth(idx)
    }
}

/// Buys the item with the highest projected value for the remaining
/// horizon: `cps_gain * time_left / cost`.
///
/// Affordability is deliberately not checked; an unreachable winner simply
/// ends the run at the engine's horizon guard. Ties keep the item listed
/// first.
#[derive(Clone, Copy, Debug, Default)]
pub struct BestValue;

impl Strategy for BestValue {
    fn name(&self) -> &'static str {
        "best"
    }

    fn choose(
        &mut self,
        _cookies: f64,
        _cps: f64,
        _history: &[HistoryEntry],
        time_left: f64,
        catalog: &dyn BuildCatalog,
    ) -> Option<String> {
        let mut best: Option<(f64, String)> = None;
        for name in catalog.items() {
            let (Some(cost), Some(gain)) = (catalog.cost(&name), catalog.cps_gain(&name)) else {
                continue;
            };
            let value = gain * time_left / cost;
            let dominated = best.as_ref().map_or(false, |(v, _)| *v >= value);
            if !dominated {
                best = Some((value, name));
            }
        }
        best.map(|(_, name)| name)
    }
}

/// Always names the same item, affordable or not. Useful for exercising
/// engine behavior against strategies that ignore the catalog.
#[derive(Clone, Debug)]
pub struct Pinned {
    item: String,
}

impl Pinned {
    pub fn new(item: impl Into<String>) -> Self {
        Self { item: item.into() }
    }
}

impl Strategy for Pinned {
    fn name(&self) -> &'static str {
        "pinned"
    }

    fn choose(
        &mut self,
        _cookies: f64,
        _cps: f64,
        _history: &[HistoryEntry],
        _time_left: f64,
        _catalog: &dyn BuildCatalog,
    ) -> Option<String> {
        Some(self.item.clone())
    }
}

/// Built-in policies selectable by name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StrategyKind {
    None,
    Cheap,
    Expensive,
    Random,
    Best,
}

impl StrategyKind {
    /// All reference policies in presentation order.
    pub fn all() -> [StrategyKind; 5] {
        [
            Self::None,
            Self::Cheap,
            Self::Expensive,
            Self::Random,
            Self::Best,
        ]
    }

    /// Stable label, also accepted by [`FromStr`].
    pub fn label(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Cheap => "cheap",
            Self::Expensive => "expensive",
            Self::Random => "random",
            Self::Best => "best",
        }
    }

    /// Instantiate the policy; `seed` feeds only the random one.
    pub fn create(self, seed: u64) -> Box<dyn Strategy> {
        match self {
            Self::None => Box::new(NoPurchase),
            Self::Cheap => Box::new(CheapestAffordable),
            Self::Expensive => Box::new(MostExpensiveAffordable),
            Self::Random => Box::new(RandomChoice::seeded(seed)),
            Self::Best => Box::new(BestValue),
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for StrategyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Self::None),
            "cheap" => Ok(Self::Cheap),
            "expensive" => Ok(Self::Expensive),
            "random" => Ok(Self::Random),
            "best" => Ok(Self::Best),
            other => Err(format!("unknown strategy: {other}")),
        }
    }
}
