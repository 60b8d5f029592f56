//! Execution engines — slippage pricing, liquidity sizing, commission.
//!
//! The engines are stateless: they carry only configuration. Per-bar state
//! (the executed-volume accumulator) is scoped to a single `simulate` call,
//! so one engine instance can serve many bars and, behind an `Arc`, many
//! per-asset workers.

pub mod commission;
pub mod fills;
pub mod liquidity;
pub mod registry;
pub mod slippage;

pub use commission::{
    CommissionModel, FeeSchedule, LiquidityRole, DEFAULT_MAKER_FEE, DEFAULT_TAKER_FEE,
};
pub use fills::{Fills, SlippageEngine};
pub use liquidity::{BarVolumeCap, LiquidityPolicy, Unconstrained, VolumeDecision};
pub use registry::ModelRegistry;
pub use slippage::{FixedSpreadSlippage, SlippageModel, DEFAULT_SPREAD};

use thiserror::Error;

/// Model construction errors.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("spread {0} must lie within [0, 1)")]
    InvalidSpread(f64),

    #[error("fee rate {0} must be non-negative")]
    InvalidFeeRate(f64),
}
