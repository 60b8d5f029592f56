//! Fill simulation — drives one asset's pending orders through the
//! slippage model for the current bar.
//!
//! `simulate` returns a lazy iterator: each fill is computed when the
//! caller asks for it, so a consumer can stop early without touching the
//! remaining orders. The executed-volume accumulator lives on the
//! iterator, never on the engine, so concurrent batches for different
//! assets cannot observe each other's state.

use std::mem;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::domain::{Asset, MarketData, Order, Transaction};

use super::liquidity::{LiquidityPolicy, VolumeDecision};
use super::slippage::SlippageModel;

/// Prices and sizes fills for one asset's pending orders per bar.
pub struct SlippageEngine {
    model: Arc<dyn SlippageModel>,
    liquidity: Arc<dyn LiquidityPolicy>,
}

impl SlippageEngine {
    pub fn new(model: Arc<dyn SlippageModel>, liquidity: Arc<dyn LiquidityPolicy>) -> Self {
        Self { model, liquidity }
    }

    /// Simulate fills for `orders` against the current bar.
    ///
    /// Orders are visited in the caller's sequence and never reordered.
    /// A zero-volume bar yields nothing and consumes nothing; the close
    /// price is fetched once and reused as the reference for every order
    /// in the batch. Each yielded transaction carries a positive amount —
    /// the direction stays on the order.
    pub fn simulate<'a>(
        &self,
        data: &dyn MarketData,
        asset: &Asset,
        orders: &'a mut [Order],
    ) -> Fills<'a> {
        let dt = data.current_dt();
        let bar_volume = data.volume(asset);
        if bar_volume == 0.0 {
            return Fills {
                model: Arc::clone(&self.model),
                liquidity: Arc::clone(&self.liquidity),
                price: 0.0,
                dt,
                bar_volume,
                volume_for_bar: 0.0,
                orders: &mut [],
                halted: true,
            };
        }

        // Volume confirmed, so the close is usable as the single
        // reference price for this bar.
        let price = data.close(asset);
        Fills {
            model: Arc::clone(&self.model),
            liquidity: Arc::clone(&self.liquidity),
            price,
            dt,
            bar_volume,
            volume_for_bar: 0.0,
            orders,
            halted: false,
        }
    }
}

/// Lazy sequence of fills for one (asset, bar) batch.
///
/// Yields at most one transaction per order. Once the liquidity policy
/// reports the bar exhausted, the sequence ends for good — later orders
/// are not consulted even if they would individually fit.
pub struct Fills<'a> {
    model: Arc<dyn SlippageModel>,
    liquidity: Arc<dyn LiquidityPolicy>,
    price: f64,
    dt: DateTime<Utc>,
    bar_volume: f64,
    /// Absolute volume executed so far this bar.
    volume_for_bar: f64,
    orders: &'a mut [Order],
    halted: bool,
}

impl<'a> Fills<'a> {
    /// Absolute volume executed by the fills yielded so far.
    pub fn executed_volume(&self) -> f64 {
        self.volume_for_bar
    }
}

impl<'a> Iterator for Fills<'a> {
    type Item = (&'a mut Order, Transaction);

    fn next(&mut self) -> Option<Self::Item> {
        if self.halted {
            return None;
        }
        loop {
            let orders = mem::take(&mut self.orders);
            let (order, rest) = orders.split_first_mut()?;
            self.orders = rest;

            if order.open_amount() == 0.0 {
                continue;
            }

            order.check_triggers(self.price, self.dt);
            if !order.triggered {
                continue;
            }

            let adjusted = self.model.adjusted_price(order.side(), self.price);
            debug!(
                asset = %order.asset,
                reference = self.price,
                adjusted,
                "applied spread to fill price"
            );

            match self
                .liquidity
                .execution_volume(order, self.bar_volume, self.volume_for_bar)
            {
                VolumeDecision::Exhausted => {
                    debug!(
                        asset = %order.asset,
                        executed = self.volume_for_bar,
                        bar_volume = self.bar_volume,
                        "bar liquidity exhausted, batch stopped"
                    );
                    self.halted = true;
                    return None;
                }
                VolumeDecision::Fill(volume) => {
                    if volume == 0.0 {
                        continue;
                    }
                    let transaction = Transaction {
                        asset: order.asset.clone(),
                        amount: volume.abs(),
                        price: adjusted,
                        dt: self.dt,
                        order_id: order.id,
                    };
                    self.volume_for_bar += transaction.amount;
                    return Some((order, transaction));
                }
            }
        }
    }
}
