//! Bar — the fundamental market data unit.

use serde::{Deserialize, Serialize};

use super::Symbol;

/// OHLCV bar for a single asset over one time-slice.
///
/// Volume is fractional: crypto pairs trade in sub-unit quantities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub symbol: Symbol,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Bar {
    /// Basic OHLCV sanity check: high >= low, range contains open/close,
    /// positive prices, non-negative volume.
    pub fn is_sane(&self) -> bool {
        self.high >= self.low
            && self.high >= self.open
            && self.high >= self.close
            && self.low <= self.open
            && self.low <= self.close
            && self.open > 0.0
            && self.close > 0.0
            && self.volume >= 0.0
    }
}
