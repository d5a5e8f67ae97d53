//! Stock records: available quantity of a product at a location.

use crate::catalog::{coerce_number, Location};
use crate::ids::{ProductId, StockId};
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Product fields embedded in a stock record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StockProduct {
    pub id: ProductId,
    pub name: String,
    /// Reference sale price in major units.
    #[serde(deserialize_with = "coerce_number")]
    pub sale_price: f64,
}

/// Available quantity of one product at one location.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StockRecord {
    pub id: StockId,
    /// Units on hand. Never negative.
    pub quantity: i64,
    pub product: StockProduct,
    pub location: Location,
}

impl StockRecord {
    /// Units available for sale.
    pub fn available(&self) -> i64 {
        self.quantity.max(0)
    }

    /// Check if a specific quantity can be sold from this record.
    pub fn can_fulfill(&self, quantity: i64) -> bool {
        quantity <= self.available()
    }

    /// Check if nothing is left.
    pub fn is_out_of_stock(&self) -> bool {
        self.available() == 0
    }

    /// Reference sale price as money.
    pub fn reference_price(&self, currency: Currency) -> Money {
        Money::from_decimal(self.product.sale_price, currency)
    }
}
