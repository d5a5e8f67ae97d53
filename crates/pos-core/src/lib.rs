//! Point-of-sale domain types and cart logic.
//!
//! This crate holds everything a sales session needs that does not touch
//! the network:
//!
//! - **Catalog**: Products, categories, locations, stock records, movements
//! - **Cart**: Line items, the cart store with derived totals, tax rules
//! - **Checkout**: Order payload, submission gateway seam, order summary
//!
//! # Example
//!
//! ```rust,ignore
//! use pos_core::prelude::*;
//!
//! let handle = CartHandle::new(CartStore::new(Currency::COP), Arc::new(client));
//!
//! // One entry per stock record shown in the sale screen
//! let mut entry = LineItemEntry::new(record, Currency::COP);
//! entry.edit_price("90");
//! entry.commit_price();
//! entry.edit_quantity("3");
//! handle.add_entry(&entry).await?;
//!
//! handle.set_payment_method(PaymentMethod::Card).await?;
//! let outcome = handle.submit_order().await?;
//! println!("{}", outcome.message());
//! handle.acknowledge_outcome().await;
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod checkout;

pub use error::{GatewayError, PosError};
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::{GatewayError, PosError};
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{
        Category, CategoryForm, Location, LocationForm, Movement, MovementForm, MovementType,
        Product, ProductForm, StockRecord,
    };

    // Cart
    pub use crate::cart::{
        CartHandle, CartLineItem, CartState, CartStore, CartTotals, FlatRate, LineItemEntry,
        NoTax, PaymentMethod, ProductRef, TaxRule,
    };

    // Checkout
    pub use crate::checkout::{
        GatewayResult, OrderConfirmation, OrderGateway, OrderItem, OrderPhase, OrderRequest,
        OrderSummary, SubmissionOutcome,
    };
}
