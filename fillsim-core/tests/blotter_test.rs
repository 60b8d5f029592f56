//! Integration tests for the blotter pipeline.
//!
//! These tests exercise the full path: order placement → slippage engine
//! simulation → commission pricing → order bookkeeping. They cover the
//! fixed-spread fill scenarios, zero-volume bars, trigger carry-over
//! across bars, liquidity exhaustion, multi-asset batches, and registry
//! misconfiguration.

use std::cell::Cell;
use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};

use fillsim_core::blotter::{BlotterError, ExchangeBlotter};
use fillsim_core::domain::{
    Asset, Bar, BarSnapshot, MarketData, Order, OrderId, OrderType,
};
use fillsim_core::execution::{
    BarVolumeCap, FeeSchedule, FixedSpreadSlippage, ModelRegistry,
};

// ─── Helpers ──────────────────────────────────────────────────────────

fn dt() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2018, 4, 2, 12, 0, 0).unwrap()
}

fn bar(symbol: &str, close: f64, volume: f64) -> Bar {
    Bar {
        symbol: symbol.into(),
        open: close,
        high: close,
        low: close,
        close,
        volume,
    }
}

fn snapshot(bars: &[Bar]) -> BarSnapshot {
    let mut snap = BarSnapshot::new(dt());
    for b in bars {
        snap.insert(b.clone());
    }
    snap
}

fn market_order(id: u64, symbol: &str, amount: f64) -> Order {
    Order::new(
        OrderId(id),
        Asset::trading_pair(symbol),
        dt(),
        amount,
        OrderType::Market,
    )
}

/// Counts market data accesses to pin down the per-bar fetch guarantee.
struct CountingData {
    inner: BarSnapshot,
    volume_calls: Cell<u32>,
    close_calls: Cell<u32>,
}

impl CountingData {
    fn new(inner: BarSnapshot) -> Self {
        Self {
            inner,
            volume_calls: Cell::new(0),
            close_calls: Cell::new(0),
        }
    }
}

impl MarketData for CountingData {
    fn volume(&self, asset: &Asset) -> f64 {
        self.volume_calls.set(self.volume_calls.get() + 1);
        self.inner.volume(asset)
    }

    fn close(&self, asset: &Asset) -> f64 {
        self.close_calls.set(self.close_calls.get() + 1);
        self.inner.close(asset)
    }

    fn current_dt(&self) -> DateTime<Utc> {
        self.inner.current_dt()
    }
}

// ─── Fixed-spread fill scenarios ─────────────────────────────────────

#[test]
fn buy_fill_pays_spread_and_taker_fee() {
    let mut blotter = ExchangeBlotter::default();
    blotter.place(market_order(1, "btc_usdt", 10.0));

    let data = snapshot(&[bar("btc_usdt", 100.0, 1_000.0)]);
    let events = blotter.get_transactions(&data).unwrap();

    assert_eq!(events.len(), 1);
    let event = &events[0];
    assert_eq!(event.order_id, OrderId(1));
    assert_eq!(event.transaction.price, 102.0); // 100 * (1 + 0.02)
    assert_eq!(event.transaction.amount, 10.0);
    assert_eq!(event.transaction.dt, dt());
    // 10 * 102.0 * 0.002
    assert!((event.commission - 2.04).abs() < 1e-12);

    // Fully filled orders leave the book.
    assert!(blotter.open_orders("btc_usdt").is_empty());
}

#[test]
fn sell_fill_receives_spread_discount() {
    let mut blotter = ExchangeBlotter::default();
    blotter.place(market_order(1, "btc_usdt", -5.0));

    let data = snapshot(&[bar("btc_usdt", 100.0, 1_000.0)]);
    let events = blotter.get_transactions(&data).unwrap();

    assert_eq!(events.len(), 1);
    assert_eq!(events[0].transaction.price, 98.0); // 100 * (1 - 0.02)
    assert_eq!(events[0].transaction.amount, 5.0); // positive, sign dropped
    // 5 * 98.0 * 0.002
    assert!((events[0].commission - 0.98).abs() < 1e-12);
}

// ─── Degenerate bars and orders ──────────────────────────────────────

#[test]
fn zero_volume_bar_produces_no_fills() {
    let mut blotter = ExchangeBlotter::default();
    blotter.place(market_order(1, "btc_usdt", 10.0));

    let data = snapshot(&[bar("btc_usdt", 100.0, 0.0)]);
    let events = blotter.get_transactions(&data).unwrap();

    assert!(events.is_empty());
    // The order is untouched and pending for the next bar.
    let pending = blotter.open_orders("btc_usdt");
    assert_eq!(pending.len(), 1);
    assert!(!pending[0].triggered);
}

#[test]
fn missing_bar_is_treated_as_no_liquidity() {
    let mut blotter = ExchangeBlotter::default();
    blotter.place(market_order(1, "eth_usdt", 10.0));

    let data = snapshot(&[bar("btc_usdt", 100.0, 1_000.0)]);
    let events = blotter.get_transactions(&data).unwrap();

    assert!(events.is_empty());
    assert_eq!(blotter.open_orders("eth_usdt").len(), 1);
}

// ─── Trigger carry-over ──────────────────────────────────────────────

#[test]
fn stop_order_waits_for_its_bar() {
    let mut blotter = ExchangeBlotter::default();
    blotter.place(Order::new(
        OrderId(1),
        Asset::trading_pair("btc_usdt"),
        dt(),
        10.0,
        OrderType::Stop { stop_price: 105.0 },
    ));

    // Bar one: close below the stop — nothing happens.
    let data = snapshot(&[bar("btc_usdt", 100.0, 1_000.0)]);
    assert!(blotter.get_transactions(&data).unwrap().is_empty());
    assert_eq!(blotter.open_orders("btc_usdt").len(), 1);

    // Bar two: close through the stop — the order fills at the new
    // reference plus spread.
    let data = snapshot(&[bar("btc_usdt", 106.0, 1_000.0)]);
    let events = blotter.get_transactions(&data).unwrap();
    assert_eq!(events.len(), 1);
    assert!((events[0].transaction.price - 106.0 * 1.02).abs() < 1e-12);
    assert!(blotter.open_orders("btc_usdt").is_empty());
}

// ─── Liquidity exhaustion ────────────────────────────────────────────

#[test]
fn exhaustion_stops_the_batch_and_keeps_later_orders_pending() {
    let mut blotter = ExchangeBlotter::default();
    blotter.place(market_order(1, "btc_usdt", 60.0));
    blotter.place(market_order(2, "btc_usdt", 60.0));
    blotter.place(market_order(3, "btc_usdt", 10.0));

    let data = snapshot(&[bar("btc_usdt", 100.0, 100.0)]);
    let events = blotter.get_transactions(&data).unwrap();

    // Order 1 fills; order 2 breaches the cap and aborts the batch;
    // order 3 would fit alone but is never reached.
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].order_id, OrderId(1));

    let pending = blotter.open_orders("btc_usdt");
    assert_eq!(pending.len(), 2);
    assert_eq!(pending[0].id, OrderId(2));
    assert_eq!(pending[1].id, OrderId(3));
}

#[test]
fn pending_remainder_fills_on_the_next_bar() {
    let mut blotter = ExchangeBlotter::default();
    blotter.place(market_order(1, "btc_usdt", 60.0));
    blotter.place(market_order(2, "btc_usdt", 60.0));

    let data = snapshot(&[bar("btc_usdt", 100.0, 100.0)]);
    assert_eq!(blotter.get_transactions(&data).unwrap().len(), 1);

    // Next bar has fresh liquidity; the leftover order fills.
    let events = blotter.get_transactions(&data).unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].order_id, OrderId(2));
    assert!(blotter.open_orders("btc_usdt").is_empty());
}

// ─── Market data access ──────────────────────────────────────────────

#[test]
fn reference_price_is_fetched_once_per_batch() {
    let mut blotter = ExchangeBlotter::default();
    blotter.place(market_order(1, "btc_usdt", 1.0));
    blotter.place(market_order(2, "btc_usdt", 2.0));
    blotter.place(market_order(3, "btc_usdt", 3.0));

    let data = CountingData::new(snapshot(&[bar("btc_usdt", 100.0, 1_000.0)]));
    let events = blotter.get_transactions(&data).unwrap();

    assert_eq!(events.len(), 3);
    assert_eq!(data.volume_calls.get(), 1);
    assert_eq!(data.close_calls.get(), 1);
}

#[test]
fn zero_volume_bar_never_reads_the_close() {
    let mut blotter = ExchangeBlotter::default();
    blotter.place(market_order(1, "btc_usdt", 1.0));

    let data = CountingData::new(snapshot(&[bar("btc_usdt", 100.0, 0.0)]));
    let events = blotter.get_transactions(&data).unwrap();

    assert!(events.is_empty());
    assert_eq!(data.volume_calls.get(), 1);
    assert_eq!(data.close_calls.get(), 0);
}

// ─── Multi-asset batches ─────────────────────────────────────────────

#[test]
fn assets_are_simulated_independently() {
    let mut blotter = ExchangeBlotter::default();
    // btc's batch exhausts its bar; eth's batch must be unaffected.
    blotter.place(market_order(1, "btc_usdt", 150.0));
    blotter.place(market_order(2, "eth_usdt", 20.0));

    let data = snapshot(&[
        bar("btc_usdt", 100.0, 100.0),
        bar("eth_usdt", 10.0, 1_000.0),
    ]);
    let events = blotter.get_transactions(&data).unwrap();

    assert_eq!(events.len(), 1);
    assert_eq!(events[0].order_id, OrderId(2));
    assert_eq!(events[0].transaction.asset, Asset::trading_pair("eth_usdt"));
    assert_eq!(blotter.open_orders("btc_usdt").len(), 1);
}

// ─── Registry wiring ─────────────────────────────────────────────────

#[test]
fn unregistered_category_is_an_error() {
    // Stock wiring only covers trading pairs.
    let mut blotter = ExchangeBlotter::default();
    blotter.place(Order::new(
        OrderId(1),
        Asset::equity("SPY"),
        dt(),
        10.0,
        OrderType::Market,
    ));

    let data = snapshot(&[bar("SPY", 100.0, 1_000.0)]);
    let result = blotter.get_transactions(&data);

    assert!(matches!(
        result,
        Err(BlotterError::UnregisteredCategory(_))
    ));
}

#[test]
fn custom_models_route_through_the_registry() {
    let mut registry = ModelRegistry::new();
    registry.register_slippage(
        fillsim_core::domain::AssetCategory::TradingPair,
        Arc::new(FixedSpreadSlippage::new(0.1).unwrap()),
    );
    registry.register_commission(
        fillsim_core::domain::AssetCategory::TradingPair,
        Arc::new(FeeSchedule::new(0.0, 0.01).unwrap()),
    );
    let mut blotter = ExchangeBlotter::new(registry, Arc::new(BarVolumeCap));
    blotter.place(market_order(1, "btc_usdt", 10.0));

    let data = snapshot(&[bar("btc_usdt", 100.0, 1_000.0)]);
    let events = blotter.get_transactions(&data).unwrap();

    assert_eq!(events.len(), 1);
    assert!((events[0].transaction.price - 110.0).abs() < 1e-12);
    // 10 * 110.0 * 0.01
    assert!((events[0].commission - 11.0).abs() < 1e-12);
}
