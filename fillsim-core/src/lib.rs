//! FillSim Core — bar-level fill simulation for pending trade orders.
//!
//! This crate contains the execution core of the simulator:
//! - Domain types (assets, bars, orders, transactions)
//! - Slippage engine producing a lazy per-bar fill sequence with a
//!   liquidity ceiling
//! - Commission engine pricing fees on completed fills
//! - Blotter routing each asset category to its configured models

pub mod blotter;
pub mod domain;
pub mod execution;
