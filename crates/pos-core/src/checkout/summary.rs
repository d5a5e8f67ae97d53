//! Read-only order summary for presentation.

use crate::cart::{CartStore, PaymentMethod};
use crate::checkout::OrderPhase;
use crate::money::Money;
use serde::Serialize;

/// One displayed cart line.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SummaryRow {
    /// Position to pass back to `remove_line`.
    pub index: usize,
    pub product_name: String,
    pub location_name: String,
    pub quantity: i64,
    pub unit_price: Money,
    pub line_total: Money,
}

/// A selectable payment method button.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct PaymentOption {
    pub method: PaymentMethod,
    pub selected: bool,
}

/// Everything the order summary panel shows.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct OrderSummary {
    pub rows: Vec<SummaryRow>,
    pub sub_total: Money,
    pub taxes: Money,
    pub total: Money,
    pub payment_method: PaymentMethod,
    pub payment_options: Vec<PaymentOption>,
    pub phase: OrderPhase,
    /// False for an empty cart or while a submission is unresolved.
    pub can_submit: bool,
    pub success_message: Option<String>,
    pub error_message: Option<String>,
}

impl OrderSummary {
    pub fn from_store(store: &CartStore) -> Self {
        let state = store.state();
        let rows = state
            .lines
            .iter()
            .enumerate()
            .map(|(index, line)| SummaryRow {
                index,
                product_name: line.product.name.clone(),
                location_name: line.location.name.clone(),
                quantity: line.quantity,
                unit_price: line.unit_price,
                line_total: line.line_total,
            })
            .collect();
        let payment_options = PaymentMethod::ALL
            .into_iter()
            .map(|method| PaymentOption {
                method,
                selected: method == state.payment_method,
            })
            .collect();
        let phase = store.phase();

        Self {
            rows,
            sub_total: state.sub_total,
            taxes: state.taxes,
            total: state.total,
            payment_method: state.payment_method,
            payment_options,
            phase,
            can_submit: phase.can_submit(),
            success_message: state.last_success.clone(),
            error_message: state.last_error.clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
