//! Liquidity sizing — how much of an order the current bar can absorb.
//!
//! The policy returns a tagged decision instead of raising: `Fill` carries
//! the signed execution volume, `Exhausted` tells the engine the bar's
//! liquidity is spent and the whole batch must stop.

use crate::domain::Order;

/// Outcome of the execution-volume decision for one order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VolumeDecision {
    /// Execute this signed volume.
    Fill(f64),
    /// Bar liquidity is spent; no further orders fill this bar.
    Exhausted,
}

/// Determines the execution volume for one order against the bar.
pub trait LiquidityPolicy: Send + Sync {
    /// Execution volume for `order`, given the bar's total volume and the
    /// absolute volume already executed against it this bar.
    fn execution_volume(&self, order: &Order, bar_volume: f64, executed: f64) -> VolumeDecision;

    /// Name of this policy.
    fn name(&self) -> &'static str;
}

/// Hard ceiling at the bar's volume: an order fills whole or not at all.
///
/// No partial fills — when the remaining bar volume cannot absorb the
/// order's full open amount, the batch terminates and that order (plus
/// every order after it) stays pending for the next bar.
#[derive(Debug, Clone, Copy, Default)]
pub struct BarVolumeCap;

impl LiquidityPolicy for BarVolumeCap {
    fn execution_volume(&self, order: &Order, bar_volume: f64, executed: f64) -> VolumeDecision {
        let open = order.open_amount();
        if executed + open.abs() > bar_volume {
            VolumeDecision::Exhausted
        } else {
            VolumeDecision::Fill(open)
        }
    }

    fn name(&self) -> &'static str {
        "BarVolumeCap"
    }
}

/// No liquidity ceiling: every triggered order fills its full open amount.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unconstrained;

impl LiquidityPolicy for Unconstrained {
    fn execution_volume(&self, order: &Order, _bar_volume: f64, _executed: f64) -> VolumeDecision {
        VolumeDecision::Fill(order.open_amount())
    }

    fn name(&self) -> &'static str {
        "Unconstrained"
    }
}
