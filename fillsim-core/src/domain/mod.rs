//! Domain types for fill simulation.

pub mod asset;
pub mod bar;
pub mod ids;
pub mod market;
pub mod order;
pub mod transaction;

pub use asset::{Asset, AssetCategory};
pub use bar::Bar;
pub use ids::OrderId;
pub use market::{BarSnapshot, MarketData};
pub use order::{Order, OrderSide, OrderType};
pub use transaction::Transaction;

/// Symbol type alias
pub type Symbol = String;
