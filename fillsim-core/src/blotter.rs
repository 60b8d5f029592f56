//! Blotter — owns pending orders and routes each asset's batch through
//! its category's models every bar.
//!
//! Order creation and portfolio accounting live outside this crate; the
//! blotter only queues already-built orders, drives the slippage engine
//! per asset, prices each fill through the commission model, and keeps
//! order bookkeeping current.

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;

use crate::domain::{AssetCategory, MarketData, Order, OrderId, OrderSide, Symbol, Transaction};
use crate::execution::{BarVolumeCap, LiquidityPolicy, ModelRegistry, SlippageEngine};

/// A priced fill: the transaction plus the fee it incurred.
#[derive(Debug, Clone, PartialEq)]
pub struct FillEvent {
    pub order_id: OrderId,
    pub transaction: Transaction,
    pub commission: f64,
}

#[derive(Debug, Error)]
pub enum BlotterError {
    #[error("no models registered for asset category {0:?}")]
    UnregisteredCategory(AssetCategory),
}

/// Routes pending orders through the configured per-category models.
pub struct ExchangeBlotter {
    registry: ModelRegistry,
    liquidity: Arc<dyn LiquidityPolicy>,
    open_orders: HashMap<Symbol, Vec<Order>>,
}

impl ExchangeBlotter {
    pub fn new(registry: ModelRegistry, liquidity: Arc<dyn LiquidityPolicy>) -> Self {
        Self {
            registry,
            liquidity,
            open_orders: HashMap::new(),
        }
    }

    /// Queue an already-constructed order for execution.
    pub fn place(&mut self, order: Order) {
        self.open_orders
            .entry(order.asset.symbol.clone())
            .or_default()
            .push(order);
    }

    /// Pending orders for a symbol, in placement sequence.
    pub fn open_orders(&self, symbol: &str) -> &[Order] {
        self.open_orders
            .get(symbol)
            .map_or(&[], |orders| orders.as_slice())
    }

    /// Simulate the current bar.
    ///
    /// Every asset with pending orders is processed independently; each
    /// fill is priced through the asset category's commission model and
    /// recorded against its order. Fully-filled orders are removed from
    /// the book; everything else stays pending for the next bar.
    pub fn get_transactions(
        &mut self,
        data: &dyn MarketData,
    ) -> Result<Vec<FillEvent>, BlotterError> {
        let mut events = Vec::new();

        let mut symbols: Vec<Symbol> = self.open_orders.keys().cloned().collect();
        symbols.sort();

        for symbol in symbols {
            let Some(orders) = self.open_orders.get_mut(&symbol) else {
                continue;
            };
            if orders.is_empty() {
                continue;
            }

            let asset = orders[0].asset.clone();
            let category = asset.category;
            let slippage = self
                .registry
                .slippage(category)
                .ok_or(BlotterError::UnregisteredCategory(category))?;
            let commission = self
                .registry
                .commission(category)
                .ok_or(BlotterError::UnregisteredCategory(category))?;

            let engine = SlippageEngine::new(slippage, Arc::clone(&self.liquidity));
            for (order, transaction) in engine.simulate(data, &asset, orders) {
                let fee = commission.calculate(order, &transaction);
                let signed_amount = match order.side() {
                    OrderSide::Buy => transaction.amount,
                    OrderSide::Sell => -transaction.amount,
                };
                order.record_fill(signed_amount);
                events.push(FillEvent {
                    order_id: order.id,
                    transaction,
                    commission: fee,
                });
            }

            orders.retain(|order| order.open_amount() != 0.0);
        }

        Ok(events)
    }
}

impl Default for ExchangeBlotter {
    /// Blotter with the stock trading-pair wiring and the hard bar-volume
    /// liquidity ceiling.
    fn default() -> Self {
        Self::new(ModelRegistry::trading_pair_defaults(), Arc::new(BarVolumeCap))
    }
}
