//! Cart line items.

use crate::catalog::{Location, StockRecord};
use crate::error::PosError;
use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Product identity carried by a cart line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProductRef {
    pub id: ProductId,
    pub name: String,
}

/// One confirmed intent to buy a quantity of a product from a location.
///
/// Lines are never edited in place. Changing one means removing it and
/// adding a new one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLineItem {
    pub product: ProductRef,
    pub location: Location,
    /// Always positive.
    pub quantity: i64,
    /// Price per unit, possibly overridden at the counter.
    pub unit_price: Money,
    /// `unit_price * quantity`.
    pub line_total: Money,
}

impl CartLineItem {
    /// Create a line, validating the quantity and computing its total.
    pub fn new(
        product: ProductRef,
        location: Location,
        quantity: i64,
        unit_price: Money,
    ) -> Result<Self, PosError> {
        if quantity <= 0 {
            return Err(PosError::InvalidQuantity(quantity.to_string()));
        }
        if unit_price.is_negative() {
            return Err(PosError::InvalidPrice(unit_price.display()));
        }
        let line_total = unit_price
            .try_multiply(quantity)
            .ok_or(PosError::Overflow)?;
        Ok(Self {
            product,
            location,
            quantity,
            unit_price,
            line_total,
        })
    }

    /// Create a line for a stock record, copying its product and location identity.
    pub fn from_stock(
        record: &StockRecord,
        quantity: i64,
        unit_price: Money,
    ) -> Result<Self, PosError> {
        Self::new(
            ProductRef {
                id: record.product.id,
                name: record.product.name.clone(),
            },
            record.location.clone(),
            quantity,
            unit_price,
        )
    }
}
