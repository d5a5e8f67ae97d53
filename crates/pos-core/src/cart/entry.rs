//! Per-stock-record line entry.
//!
//! Holds the editable price and quantity fields shown next to a stock
//! record and turns them into a validated [`CartLineItem`].

use std::num::IntErrorKind;

use crate::cart::{CartLineItem, CartStore};
use crate::catalog::StockRecord;
use crate::error::PosError;
use crate::money::{Currency, Money};

/// Editable entry for one stock record.
#[derive(Debug, Clone, PartialEq)]
pub struct LineItemEntry {
    record: StockRecord,
    committed_price: Money,
    price_input: String,
    quantity_input: String,
}

impl LineItemEntry {
    /// Start with the record's reference price and a quantity of one.
    pub fn new(record: StockRecord, currency: Currency) -> Self {
        let committed_price = record.reference_price(currency);
        Self {
            price_input: committed_price.input_text(),
            committed_price,
            quantity_input: "1".to_string(),
            record,
        }
    }

    pub fn record(&self) -> &StockRecord {
        &self.record
    }

    /// Price that will be used for the line.
    pub fn committed_price(&self) -> Money {
        self.committed_price
    }

    /// Text currently in the price field.
    pub fn price_input(&self) -> &str {
        &self.price_input
    }

    /// Text currently in the quantity field.
    pub fn quantity_input(&self) -> &str {
        &self.quantity_input
    }

    /// Replace the price field text without committing it.
    pub fn edit_price(&mut self, input: impl Into<String>) {
        self.price_input = input.into();
    }

    /// Commit the price field (blur or Enter).
    ///
    /// Anything that is not a non-negative number reverts the field to the
    /// last committed price. Returns whether the input was accepted.
    pub fn commit_price(&mut self) -> bool {
        match Money::parse_non_negative(&self.price_input, self.committed_price.currency) {
            Some(price) => {
                self.committed_price = price;
                true
            }
            None => {
                self.price_input = self.committed_price.input_text();
                false
            }
        }
    }

    /// Key handler for the price field: Enter commits.
    pub fn price_key(&mut self, key: &str) -> Option<bool> {
        (key == "Enter").then(|| self.commit_price())
    }

    /// Replace the quantity field text, keeping digits only.
    pub fn edit_quantity(&mut self, input: &str) {
        self.quantity_input = input.chars().filter(char::is_ascii_digit).collect();
    }

    /// Parse and check the quantity field against available stock.
    pub fn requested_quantity(&self) -> Result<i64, PosError> {
        let quantity: i64 = match self.quantity_input.parse() {
            Ok(quantity) => quantity,
            // A digit string too long for i64 is still more than any stock on hand.
            Err(err) if *err.kind() == IntErrorKind::PosOverflow => {
                return Err(PosError::InsufficientStock {
                    requested: i64::MAX,
                    available: self.record.available(),
                });
            }
            Err(_) => return Err(PosError::InvalidQuantity(self.quantity_input.clone())),
        };
        if quantity < 1 {
            return Err(PosError::InvalidQuantity(self.quantity_input.clone()));
        }
        if !self.record.can_fulfill(quantity) {
            return Err(PosError::InsufficientStock {
                requested: quantity,
                available: self.record.available(),
            });
        }
        Ok(quantity)
    }

    /// Build the cart line from the committed price and current quantity.
    ///
    /// An uncommitted price edit is ignored.
    pub fn build_line(&self) -> Result<CartLineItem, PosError> {
        let quantity = self.requested_quantity()?;
        CartLineItem::from_stock(&self.record, quantity, self.committed_price)
    }

    /// Validate and append the line to `store`. Nothing changes on error.
    pub fn add_to(&self, store: &mut CartStore) -> Result<usize, PosError> {
        let line = self.build_line()?;
        store.add_line(line)
    }
}
