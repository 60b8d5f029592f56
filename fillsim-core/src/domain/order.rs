//! Order types and trigger evaluation.
//!
//! Amounts are signed: positive buys, negative sells. An order is eligible
//! for execution only once `check_triggers` has marked it triggered against
//! the current reference price; untriggered orders stay pending.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::asset::Asset;
use super::ids::OrderId;

/// Buy or sell, derived from the sign of the requested amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderSide {
    Buy,
    Sell,
}

/// What kind of order and its price parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum OrderType {
    /// Eligible as soon as the bar has liquidity.
    Market,
    /// Fill at limit price or better.
    Limit { limit_price: f64 },
    /// Becomes a market order once price reaches the stop level.
    Stop { stop_price: f64 },
    /// Stop stage first, then fills subject to the limit price.
    StopLimit { stop_price: f64, limit_price: f64 },
}

/// A pending order.
///
/// Owned by the blotter. The engines read it and call `check_triggers`;
/// fill bookkeeping goes through `record_fill`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub asset: Asset,
    pub created_dt: DateTime<Utc>,
    /// Requested quantity, signed.
    pub amount: f64,
    /// Quantity filled so far, carrying the same sign as `amount`.
    pub filled: f64,
    pub order_type: OrderType,
    /// Updated by `check_triggers` each bar.
    pub triggered: bool,
    /// Stop stage latch: once price reaches the stop level, a stop-limit
    /// order behaves as a plain limit order from then on.
    pub stop_reached: bool,
    /// When the order first triggered, if it has.
    pub trigger_dt: Option<DateTime<Utc>>,
}

impl Order {
    pub fn new(
        id: OrderId,
        asset: Asset,
        created_dt: DateTime<Utc>,
        amount: f64,
        order_type: OrderType,
    ) -> Self {
        Self {
            id,
            asset,
            created_dt,
            amount,
            filled: 0.0,
            order_type,
            triggered: false,
            stop_reached: false,
            trigger_dt: None,
        }
    }

    pub fn side(&self) -> OrderSide {
        if self.amount >= 0.0 {
            OrderSide::Buy
        } else {
            OrderSide::Sell
        }
    }

    /// Remaining unfilled quantity, signed like `amount`.
    pub fn open_amount(&self) -> f64 {
        self.amount - self.filled
    }

    /// Re-evaluate trigger conditions against the current price,
    /// updating `triggered` as a side effect.
    pub fn check_triggers(&mut self, price: f64, dt: DateTime<Utc>) {
        let was_triggered = self.triggered;
        self.triggered = match self.order_type {
            OrderType::Market => true,
            OrderType::Limit { limit_price } => limit_reached(self.side(), limit_price, price),
            OrderType::Stop { stop_price } => {
                if stop_reached(self.side(), stop_price, price) {
                    self.stop_reached = true;
                }
                self.stop_reached
            }
            OrderType::StopLimit {
                stop_price,
                limit_price,
            } => {
                if stop_reached(self.side(), stop_price, price) {
                    self.stop_reached = true;
                }
                self.stop_reached && limit_reached(self.side(), limit_price, price)
            }
        };
        if self.triggered && !was_triggered {
            self.trigger_dt = Some(dt);
        }
    }

    /// Record an executed quantity against this order. `amount` is signed
    /// and must carry the order's direction.
    pub fn record_fill(&mut self, amount: f64) {
        self.filled += amount;
    }
}

/// Buy limits fill at or below the limit; sell limits at or above.
fn limit_reached(side: OrderSide, limit_price: f64, price: f64) -> bool {
    match side {
        OrderSide::Buy => price <= limit_price,
        OrderSide::Sell => price >= limit_price,
    }
}

/// Buy stops arm at or above the stop; sell stops at or below.
fn stop_reached(side: OrderSide, stop_price: f64, price: f64) -> bool {
    match side {
        OrderSide::Buy => price >= stop_price,
        OrderSide::Sell => price <= stop_price,
    }
}
