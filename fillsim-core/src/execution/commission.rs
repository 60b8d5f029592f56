//! Commission models — trading fees on completed fills.

use std::fmt;

use crate::domain::{Order, Transaction};

use super::ModelError;

/// Stock maker rate: 0.1% of notional.
pub const DEFAULT_MAKER_FEE: f64 = 0.001;
/// Stock taker rate: 0.2% of notional.
pub const DEFAULT_TAKER_FEE: f64 = 0.002;

/// Liquidity role of a fill: makers rest on the book, takers cross it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiquidityRole {
    Maker,
    Taker,
}

/// Computes the fee owed for a completed fill.
pub trait CommissionModel: Send + Sync {
    /// Fee for this (order, transaction) pair. Never negative; a
    /// degenerate fill with no positive notional costs nothing. Must not
    /// mutate either argument.
    fn calculate(&self, order: &Order, transaction: &Transaction) -> f64;

    /// Name of this model.
    fn name(&self) -> &'static str;
}

/// Percentage-of-notional fee schedule with distinct maker and taker rates.
///
/// Classifying a fill as maker requires knowing how the order interacted
/// with the book, which this simulation does not model, so `calculate`
/// charges the taker rate on every fill. A caller that can classify a fill
/// explicitly may price it through `rate`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeeSchedule {
    maker_fee: f64,
    taker_fee: f64,
}

impl FeeSchedule {
    /// Both rates are fractional (0.001 = 0.1%) and must be non-negative.
    pub fn new(maker_fee: f64, taker_fee: f64) -> Result<Self, ModelError> {
        for rate in [maker_fee, taker_fee] {
            if rate.is_nan() || rate < 0.0 {
                return Err(ModelError::InvalidFeeRate(rate));
            }
        }
        Ok(Self {
            maker_fee,
            taker_fee,
        })
    }

    pub fn maker_fee(&self) -> f64 {
        self.maker_fee
    }

    pub fn taker_fee(&self) -> f64 {
        self.taker_fee
    }

    /// Fee rate for an explicitly classified fill.
    pub fn rate(&self, role: LiquidityRole) -> f64 {
        match role {
            LiquidityRole::Maker => self.maker_fee,
            LiquidityRole::Taker => self.taker_fee,
        }
    }
}

impl Default for FeeSchedule {
    fn default() -> Self {
        Self {
            maker_fee: DEFAULT_MAKER_FEE,
            taker_fee: DEFAULT_TAKER_FEE,
        }
    }
}

impl CommissionModel for FeeSchedule {
    fn calculate(&self, _order: &Order, transaction: &Transaction) -> f64 {
        // Degenerate fills carry no positive quantity and cost nothing.
        if transaction.amount <= 0.0 {
            return 0.0;
        }
        let cost = transaction.amount * transaction.price;
        if cost <= 0.0 {
            return 0.0;
        }
        cost * self.rate(LiquidityRole::Taker)
    }

    fn name(&self) -> &'static str {
        "FeeSchedule"
    }
}

impl fmt::Display for FeeSchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "FeeSchedule(maker_fee={}, taker_fee={})",
            self.maker_fee, self.taker_fee
        )
    }
}
