//! Point-of-sale error types.

use thiserror::Error;

/// Errors that can occur in point-of-sale operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PosError {
    /// Requested quantity exceeds the stock record's available quantity.
    #[error("Stock insuficiente. Disponible: {available}")]
    InsufficientStock { requested: i64, available: i64 },

    /// Quantity is missing, zero, or negative.
    #[error("La cantidad debe ser un número positivo")]
    InvalidQuantity(String),

    /// Price input does not parse as a non-negative number.
    #[error("Invalid price: {0}")]
    InvalidPrice(String),

    /// Unknown payment method code.
    #[error("Unknown payment method: {0}")]
    UnknownPaymentMethod(String),

    /// Unknown movement type code.
    #[error("Unknown movement type: {0}")]
    UnknownMovementType(String),

    /// An order submission is in flight.
    #[error("An order submission is already in progress")]
    SubmissionInProgress,

    /// A submission result arrived with nothing in flight.
    #[error("No order submission is in flight")]
    NoSubmissionInFlight,

    /// A submission outcome has not been acknowledged yet.
    #[error("The last order outcome has not been acknowledged")]
    OutcomePending,

    /// Cannot submit a cart with no lines.
    #[error("Cannot submit an empty cart")]
    EmptyCart,

    /// Currency mismatch.
    #[error("Currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch { expected: String, got: String },

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,

    /// Form validation error, carrying the user-facing message.
    #[error("{0}")]
    Validation(String),
}

/// Failure reported by an [`OrderGateway`](crate::checkout::OrderGateway).
///
/// Carries the human-readable reason that ends up in the cart's error message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct GatewayError {
    pub message: String,
}

impl GatewayError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
