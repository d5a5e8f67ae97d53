//! Checkout module.
//!
//! Contains the order payload projected from the cart, the gateway seam used
//! to submit it, the order lifecycle phases, and the summary view.

mod flow;
mod gateway;
mod order;
mod summary;

pub use flow::{OrderPhase, SubmissionOutcome};
pub use gateway::{GatewayResult, OrderGateway};
pub use order::{OrderConfirmation, OrderItem, OrderRequest};
pub use summary::{OrderSummary, PaymentOption, SummaryRow};
