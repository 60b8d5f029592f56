use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::asset::Asset;
use super::ids::OrderId;

/// Immutable record of a fill.
///
/// `amount` is always positive; the direction lives on the originating
/// order. Created exactly once per fill and owned by the caller thereafter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub asset: Asset,
    pub amount: f64,
    pub price: f64,
    pub dt: DateTime<Utc>,
    pub order_id: OrderId,
}

impl Transaction {
    /// Traded value of this fill.
    pub fn notional(&self) -> f64 {
        self.amount * self.price
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_transaction() -> Transaction {
        Transaction {
            asset: Asset::trading_pair("btc_usdt"),
            amount: 10.0,
            price: 102.0,
            dt: Utc.with_ymd_and_hms(2018, 4, 2, 12, 0, 0).unwrap(),
            order_id: OrderId(1),
        }
    }

    #[test]
    fn notional_is_amount_times_price() {
        assert_eq!(sample_transaction().notional(), 1020.0);
    }

    #[test]
    fn transaction_serialization_roundtrip() {
        let txn = sample_transaction();
        let json = serde_json::to_string(&txn).unwrap();
        let deser: Transaction = serde_json::from_str(&json).unwrap();
        assert_eq!(txn, deser);
    }
}
