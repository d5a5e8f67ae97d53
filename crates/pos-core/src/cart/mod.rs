//! Shopping cart module.
//!
//! Contains the cart line items, the cart store with its derived totals,
//! tax rules, payment methods, and the per-stock-record entry that feeds
//! lines into the store.

mod entry;
mod handle;
mod line;
mod payment;
mod store;
mod tax;

pub use entry::LineItemEntry;
pub use handle::CartHandle;
pub use line::{CartLineItem, ProductRef};
pub use payment::PaymentMethod;
pub use store::{CartState, CartStore, CartTotals};
pub use tax::{rule_for_percent, FlatRate, NoTax, TaxRule};
