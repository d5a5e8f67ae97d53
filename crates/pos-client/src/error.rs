//! Client error types.

use pos_core::{GatewayError, PosError};
use thiserror::Error;

/// Message shown when a request fails without a usable server reply.
pub const UNEXPECTED_ERROR: &str = "Ocurrió un error inesperado";

/// Message shown when a list response does not have the expected shape.
pub const SCHEMA_ERROR: &str = "Error de validación de tipado.";

/// Errors that can occur when talking to the inventory service.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The request never produced a response (connection, timeout, TLS).
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("HTTP {status}: {message}")]
    Rejected { status: u16, message: String },

    /// A success response whose body did not match the expected shape.
    #[error("Unexpected response from {endpoint}: {reason}")]
    Schema { endpoint: String, reason: String },

    /// The payload failed client-side validation and was not sent.
    #[error(transparent)]
    Validation(#[from] PosError),

    /// The client could not be configured.
    #[error("Invalid client configuration: {0}")]
    Config(String),
}

impl ApiError {
    /// Single human-readable message for display.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Transport(_) | ApiError::Config(_) => UNEXPECTED_ERROR.to_string(),
            ApiError::Rejected { message, .. } => message.clone(),
            ApiError::Schema { .. } => SCHEMA_ERROR.to_string(),
            ApiError::Validation(err) => err.to_string(),
        }
    }

    /// HTTP status of a rejected request.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<ApiError> for GatewayError {
    fn from(err: ApiError) -> Self {
        GatewayError::new(err.user_message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_uses_server_message() {
        let err = ApiError::Rejected {
            status: 400,
            message: "Producto sin stock".to_string(),
        };
        assert_eq!(err.user_message(), "Producto sin stock");
        assert_eq!(err.status(), Some(400));
    }

    #[test]
    fn test_schema_message() {
        let err = ApiError::Schema {
            endpoint: "/inventory/stock".to_string(),
            reason: "expected array".to_string(),
        };
        assert_eq!(err.user_message(), SCHEMA_ERROR);
        assert!(err.to_string().contains("/inventory/stock"));
    }

    #[test]
    fn test_validation_keeps_form_message() {
        let err = ApiError::from(PosError::Validation("El nombre es obligatorio".to_string()));
        assert_eq!(err.user_message(), "El nombre es obligatorio");
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_into_gateway_error() {
        let err = ApiError::Config("bad url".to_string());
        let gateway: GatewayError = err.into();
        assert_eq!(gateway.message, UNEXPECTED_ERROR);
    }
}
