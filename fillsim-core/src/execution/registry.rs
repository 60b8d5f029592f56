//! Model routing — which slippage and commission models an asset category
//! uses.
//!
//! Static configuration: the maps are filled when the blotter is built and
//! only read afterwards. Every asset of a category shares the same model
//! instances.

use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::AssetCategory;

use super::commission::{CommissionModel, FeeSchedule};
use super::slippage::{FixedSpreadSlippage, SlippageModel};

/// Per-category registry of slippage and commission models.
#[derive(Default)]
pub struct ModelRegistry {
    slippage: HashMap<AssetCategory, Arc<dyn SlippageModel>>,
    commission: HashMap<AssetCategory, Arc<dyn CommissionModel>>,
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stock wiring for crypto trading pairs: one shared fixed-spread
    /// model and one shared fee schedule for the whole category.
    pub fn trading_pair_defaults() -> Self {
        let mut registry = Self::new();
        registry.register_slippage(
            AssetCategory::TradingPair,
            Arc::new(FixedSpreadSlippage::default()),
        );
        registry.register_commission(AssetCategory::TradingPair, Arc::new(FeeSchedule::default()));
        registry
    }

    pub fn register_slippage(&mut self, category: AssetCategory, model: Arc<dyn SlippageModel>) {
        self.slippage.insert(category, model);
    }

    pub fn register_commission(&mut self, category: AssetCategory, model: Arc<dyn CommissionModel>) {
        self.commission.insert(category, model);
    }

    pub fn slippage(&self, category: AssetCategory) -> Option<Arc<dyn SlippageModel>> {
        self.slippage.get(&category).map(Arc::clone)
    }

    pub fn commission(&self, category: AssetCategory) -> Option<Arc<dyn CommissionModel>> {
        self.commission.get(&category).map(Arc::clone)
    }
}
