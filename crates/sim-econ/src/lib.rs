#![deny(warnings)]

//! Build catalog: the purchasable-item side of the clicker simulator.
//!
//! This crate provides:
//! - The [`BuildCatalog`] capability consumed by engines and strategies
//! - [`StandardCatalog`], the classic ten-item table with 1.15x cost growth
//! - Validation and YAML loading for catalog scenario files

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;

/// Cost multiplier applied after each purchase unless a scenario overrides it.
pub const DEFAULT_GROWTH_FACTOR: f64 = 1.15;

/// Errors produced by catalog construction and validation.
#[derive(Debug, Error, PartialEq)]
pub enum CatalogError {
    /// Item names must be non-empty.
    #[error("item with empty name")]
    EmptyName,
    /// Item names must be unique within a catalog.
    #[error("duplicate item name: {0}")]
    DuplicateName(String),
    /// Costs must be finite and strictly positive, or instant re-purchases
    /// would never stop.
    #[error("item {name}: cost must be finite and > 0, got {cost}")]
    InvalidCost { name: String, cost: f64 },
    /// Rate gains must be finite and non-negative.
    #[error("item {name}: cps gain must be finite and >= 0, got {gain}")]
    InvalidGain { name: String, gain: f64 },
    /// Growth factors below 1.0 would shrink costs toward zero.
    #[error("growth factor must be finite and >= 1.0, got {0}")]
    InvalidGrowth(f64),
    /// Scenario file could not be parsed.
    #[error("malformed catalog file: {0}")]
    Malformed(String),
}

/// Catalog capability: what engines and strategies may ask of the item
/// collection. `cost`/`cps_gain` return `None` for names the catalog does
/// not carry; the caller decides whether that is fatal.
pub trait BuildCatalog {
    /// Item names in catalog order.
    fn items(&self) -> Vec<String>;

    /// Current price of `item`.
    fn cost(&self, item: &str) -> Option<f64>;

    /// Rate gained by the next purchase of `item`.
    fn cps_gain(&self, item: &str) -> Option<f64>;

    /// Advance `item`'s price along its growth schedule after a purchase.
    /// Unknown names are ignored.
    fn record_purchase(&mut self, item: &str);
}

/// One purchasable item of a [`StandardCatalog`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    /// Display name, unique within the catalog.
    pub name: String,
    /// Current price in cookies.
    pub cost: f64,
    /// CpS granted per purchase.
    pub cps_gain: f64,
}

/// The standard catalog: a fixed item table whose costs grow geometrically
/// with each purchase while gains stay flat.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StandardCatalog {
    items: Vec<CatalogItem>,
    growth_factor: f64,
}

impl StandardCatalog {
    /// Build a validated catalog.
    ///
    /// Example:
    /// let item = CatalogItem { name: "Cursor".into(), cost: 15.0, cps_gain: 0.1 };
    /// let catalog = StandardCatalog::new(vec![item], 1.15).unwrap();
    pub fn new(items: Vec<CatalogItem>, growth_factor: f64) -> Result<Self, CatalogError> {
        if !growth_factor.is_finite() || growth_factor < 1.0 {
            return Err(CatalogError::InvalidGrowth(growth_factor));
        }
        let catalog = Self {
            items,
            growth_factor,
        };
        validate_catalog(&catalog)?;
        Ok(catalog)
    }

    /// The classic ten-item table, Cursor through Antimatter Condenser.
    pub fn classic() -> Self {
        let table: [(&str, f64, f64); 10] = [
            ("Cursor", 15.0, 0.1),
            ("Grandma", 100.0, 0.5),
            ("Farm", 500.0, 4.0),
            ("Factory", 3000.0, 10.0),
            ("Mine", 10000.0, 40.0),
            ("Shipment", 40000.0, 100.0),
            ("Alchemy Lab", 200000.0, 400.0),
            ("Portal", 1666666.0, 6666.0),
            ("Time Machine", 123456789.0, 98765.0),
            ("Antimatter Condenser", 3999999999.0, 999999.0),
        ];
        Self {
            items: table
                .iter()
                .map(|&(name, cost, cps_gain)| CatalogItem {
                    name: name.to_string(),
                    cost,
                    cps_gain,
                })
                .collect(),
            growth_factor: DEFAULT_GROWTH_FACTOR,
        }
    }

    /// Load and validate a catalog from a YAML scenario document.
    pub fn from_yaml_str(text: &str) -> Result<Self, CatalogError> {
        let spec: CatalogSpec =
            serde_yaml::from_str(text).map_err(|e| CatalogError::Malformed(e.to_string()))?;
        let items = spec
            .items
            .into_iter()
            .map(|item| CatalogItem {
                name: item.name,
                cost: item.cost,
                cps_gain: item.cps_gain,
            })
            .collect();
        Self::new(items, spec.growth_factor)
    }

    /// Cost multiplier applied after each purchase.
    pub fn growth_factor(&self) -> f64 {
        self.growth_factor
    }
}

impl Default for StandardCatalog {
    fn default() -> Self {
        Self::classic()
    }
}

impl BuildCatalog for StandardCatalog {
    fn items(&self) -> Vec<String> {
        self.items.iter().map(|item| item.name.clone()).collect()
    }

    fn cost(&self, item: &str) -> Option<f64> {
        self.items.iter().find(|i| i.name == item).map(|i| i.cost)
    }

    fn cps_gain(&self, item: &str) -> Option<f64> {
        self.items
            .iter()
            .find(|i| i.name == item)
            .map(|i| i.cps_gain)
    }

    fn record_purchase(&mut self, item: &str) {
        if let Some(entry) = self.items.iter_mut().find(|i| i.name == item) {
            entry.cost *= self.growth_factor;
        }
    }
}

/// On-disk shape of a catalog scenario file.
#[derive(Clone, Debug, Deserialize)]
pub struct CatalogSpec {
    /// Cost multiplier applied after each purchase; defaults to 1.15.
    #[serde(default = "default_growth")]
    pub growth_factor: f64,
    /// Purchasable items in presentation order.
    pub items: Vec<ItemSpec>,
}

/// One item row of a scenario file.
#[derive(Clone, Debug, Deserialize)]
pub struct ItemSpec {
    pub name: String,
    pub cost: f64,
    pub cps_gain: f64,
}

fn default_growth() -> f64 {
    DEFAULT_GROWTH_FACTOR
}

/// Validate the items any catalog implementation exposes: unique non-empty
/// names, finite positive costs, finite non-negative gains. An empty
/// catalog is valid.
pub fn validate_catalog(catalog: &dyn BuildCatalog) -> Result<(), CatalogError> {
    let mut seen: BTreeSet<String> = BTreeSet::new();
    for name in catalog.items() {
        if name.trim().is_empty() {
            return Err(CatalogError::EmptyName);
        }
        if !seen.insert(name.clone()) {
            return Err(CatalogError::DuplicateName(name));
        }
        // A None lookup for a listed name is a broken implementation; the
        // NaN fallback routes it through the finiteness checks.
        let cost = catalog.cost(&name).unwrap_or(f64::NAN);
        if !cost.is_finite() || cost <= 0.0 {
            return Err(CatalogError::InvalidCost { name, cost });
        }
        let gain = catalog.cps_gain(&name).unwrap_or(f64::NAN);
        if !gain.is_finite() || gain < 0.0 {
            return Err(CatalogError::InvalidGain { name, gain });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn item(name: &str, cost: f64, cps_gain: f64) -> CatalogItem {
        CatalogItem {
            name: name.to_string(),
            cost,
            cps_gain,
        }
    }

    #[test]
    fn classic_table_spot_checks() {
        let catalog = StandardCatalog::classic();
        assert_eq!(catalog.items().len(), 10);
        assert_eq!(catalog.cost("Cursor"), Some(15.0));
        assert_eq!(catalog.cps_gain("Cursor"), Some(0.1));
        assert_eq!(catalog.cost("Antimatter Condenser"), Some(3999999999.0));
        assert_eq!(catalog.cps_gain("Antimatter Condenser"), Some(999999.0));
        assert_eq!(catalog.growth_factor(), 1.15);
        assert!(validate_catalog(&catalog).is_ok());
    }

    #[test]
    fn purchase_grows_cost_and_leaves_gain() {
        let mut catalog = StandardCatalog::classic();
        catalog.record_purchase("Cursor");
        assert_eq!(catalog.cost("Cursor"), Some(15.0 * 1.15));
        assert_eq!(catalog.cps_gain("Cursor"), Some(0.1));
        // other rows untouched
        assert_eq!(catalog.cost("Grandma"), Some(100.0));
    }

    #[test]
    fn purchases_compound_geometrically() {
        let mut catalog = StandardCatalog::classic();
        for _ in 0..3 {
            catalog.record_purchase("Grandma");
        }
        let cost = catalog.cost("Grandma").unwrap();
        assert!((cost - 100.0 * 1.15_f64.powi(3)).abs() < 1e-9);
    }

    #[test]
    fn clones_evolve_independently() {
        let original = StandardCatalog::classic();
        let mut copy = original.clone();
        copy.record_purchase("Farm");
        assert_eq!(original.cost("Farm"), Some(500.0));
        assert!(copy.cost("Farm").unwrap() > 500.0);
    }

    #[test]
    fn unknown_item_is_absent_and_ignored() {
        let mut catalog = StandardCatalog::classic();
        assert_eq!(catalog.cost("Mainframe"), None);
        assert_eq!(catalog.cps_gain("Mainframe"), None);
        let before = catalog.clone();
        catalog.record_purchase("Mainframe");
        assert_eq!(catalog, before);
    }

    #[test]
    fn empty_catalog_is_valid() {
        let catalog = StandardCatalog::new(Vec::new(), 1.15).unwrap();
        assert!(catalog.items().is_empty());
        assert!(validate_catalog(&catalog).is_ok());
    }

    #[test]
    fn construction_rejects_bad_items() {
        assert_eq!(
            StandardCatalog::new(vec![item("", 10.0, 0.1)], 1.15),
            Err(CatalogError::EmptyName)
        );
        assert_eq!(
            StandardCatalog::new(vec![item("A", 10.0, 0.1), item("A", 20.0, 0.2)], 1.15),
            Err(CatalogError::DuplicateName("A".to_string()))
        );
        assert!(matches!(
            StandardCatalog::new(vec![item("A", 0.0, 0.1)], 1.15),
            Err(CatalogError::InvalidCost { .. })
        ));
        assert!(matches!(
            StandardCatalog::new(vec![item("A", f64::NAN, 0.1)], 1.15),
            Err(CatalogError::InvalidCost { .. })
        ));
        assert!(matches!(
            StandardCatalog::new(vec![item("A", 10.0, -0.1)], 1.15),
            Err(CatalogError::InvalidGain { .. })
        ));
    }

    #[test]
    fn construction_rejects_shrinking_growth() {
        assert_eq!(
            StandardCatalog::new(vec![item("A", 10.0, 0.1)], 0.9),
            Err(CatalogError::InvalidGrowth(0.9))
        );
        assert!(matches!(
            StandardCatalog::new(vec![item("A", 10.0, 0.1)], f64::NAN),
            Err(CatalogError::InvalidGrowth(_))
        ));
        // flat growth is allowed
        assert!(StandardCatalog::new(vec![item("A", 10.0, 0.1)], 1.0).is_ok());
    }

    #[test]
    fn yaml_scenario_roundtrip() {
        let text = r#"
growth_factor: 2.0
items:
  - name: Oven
    cost: 10.0
    cps_gain: 1.0
  - name: Bakery
    cost: 250.0
    cps_gain: 8.0
"#;
        let catalog = StandardCatalog::from_yaml_str(text).unwrap();
        assert_eq!(catalog.items(), vec!["Oven".to_string(), "Bakery".to_string()]);
        assert_eq!(catalog.growth_factor(), 2.0);
        assert_eq!(catalog.cost("Bakery"), Some(250.0));
    }

    #[test]
    fn yaml_growth_defaults_to_classic_factor() {
        let text = r#"
items:
  - name: Oven
    cost: 10.0
    cps_gain: 1.0
"#;
        let catalog = StandardCatalog::from_yaml_str(text).unwrap();
        assert_eq!(catalog.growth_factor(), DEFAULT_GROWTH_FACTOR);
    }

    #[test]
    fn yaml_rejects_malformed_and_invalid_documents() {
        assert!(matches!(
            StandardCatalog::from_yaml_str("items: [not a map]"),
            Err(CatalogError::Malformed(_))
        ));
        let negative_cost = r#"
items:
  - name: Oven
    cost: -1.0
    cps_gain: 1.0
"#;
        assert!(matches!(
            StandardCatalog::from_yaml_str(negative_cost),
            Err(CatalogError::InvalidCost { .. })
        ));
    }

    proptest! {
        #[test]
        fn growth_keeps_costs_positive_and_non_decreasing(
            cost in 0.001f64..1e9,
            growth in 1.0f64..3.0,
            purchases in 0usize..50,
        ) {
            let mut catalog =
                StandardCatalog::new(vec![item("A", cost, 0.5)], growth).unwrap();
            let mut last = catalog.cost("A").unwrap();
            for _ in 0..purchases {
                catalog.record_purchase("A");
                let now = catalog.cost("A").unwrap();
                prop_assert!(now > 0.0);
                prop_assert!(now >= last);
                last = now;
            }
        }
    }
}
