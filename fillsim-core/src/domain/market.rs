//! Market data access — the read-only seam the engines consume.
//!
//! The engines never see a data source, only the current bar through this
//! trait: volume and close per asset, one timestamp for the whole bar.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::asset::Asset;
use super::bar::Bar;
use super::Symbol;

/// Read-only view of the current bar.
pub trait MarketData {
    /// Traded volume of the current bar. Zero means no liquidity this bar.
    fn volume(&self, asset: &Asset) -> f64;

    /// Close price of the current bar. Only meaningful for assets whose
    /// volume is non-zero; callers gate on `volume` first.
    fn close(&self, asset: &Asset) -> f64;

    /// Timestamp of the current bar.
    fn current_dt(&self) -> DateTime<Utc>;
}

/// Materialized snapshot of one bar per asset.
///
/// The concrete `MarketData` used by the surrounding harness and the test
/// suites; a production data layer can implement the trait directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarSnapshot {
    dt: DateTime<Utc>,
    bars: HashMap<Symbol, Bar>,
}

impl BarSnapshot {
    pub fn new(dt: DateTime<Utc>) -> Self {
        Self {
            dt,
            bars: HashMap::new(),
        }
    }

    /// Add or replace the bar for its symbol.
    pub fn insert(&mut self, bar: Bar) {
        self.bars.insert(bar.symbol.clone(), bar);
    }

    pub fn get(&self, symbol: &str) -> Option<&Bar> {
        self.bars.get(symbol)
    }
}

impl MarketData for BarSnapshot {
    fn volume(&self, asset: &Asset) -> f64 {
        self.bars.get(&asset.symbol).map_or(0.0, |bar| bar.volume)
    }

    fn close(&self, asset: &Asset) -> f64 {
        self.bars
            .get(&asset.symbol)
            .map_or(f64::NAN, |bar| bar.close)
    }

    fn current_dt(&self) -> DateTime<Utc> {
        self.dt
    }
}
