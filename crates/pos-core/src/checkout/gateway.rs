//! Seam between the cart and whatever creates orders remotely.

use crate::checkout::{OrderConfirmation, OrderRequest};
use crate::error::GatewayError;
use async_trait::async_trait;

/// Result of one order creation attempt.
pub type GatewayResult = Result<OrderConfirmation, GatewayError>;

/// Creates sales orders.
///
/// Implementations make a single attempt per call and never retry.
#[async_trait]
pub trait OrderGateway: Send + Sync {
    async fn create_order(&self, request: &OrderRequest) -> GatewayResult;
}
