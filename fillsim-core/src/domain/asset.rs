//! Tradable instruments and the category used for model routing.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Symbol;

/// Instrument category. The model registry routes every asset of a
/// category to the same slippage and commission model instances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetCategory {
    /// Crypto trading pair, e.g. btc_usdt.
    TradingPair,
    /// Cash equity.
    Equity,
}

/// A tradable instrument.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Asset {
    pub symbol: Symbol,
    pub category: AssetCategory,
}

impl Asset {
    pub fn trading_pair(symbol: impl Into<Symbol>) -> Self {
        Self {
            symbol: symbol.into(),
            category: AssetCategory::TradingPair,
        }
    }

    pub fn equity(symbol: impl Into<Symbol>) -> Self {
        Self {
            symbol: symbol.into(),
            category: AssetCategory::Equity,
        }
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol)
    }
}
