//! Inventory and sales service client.

use std::sync::Arc;

use async_trait::async_trait;
use pos_core::catalog::{
    Category, CategoryForm, Location, LocationForm, Movement, MovementForm, Product, ProductForm,
    StockRecord,
};
use pos_core::checkout::{GatewayResult, OrderConfirmation, OrderGateway, OrderRequest};
use pos_core::{CategoryId, GatewayError, LocationId, PosError, ProductId};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::instrument;

use crate::{extract, ApiError, ClientConfig, MutationReply};

const PRODUCTS: &str = "/inventory/products";
const CATEGORIES: &str = "/inventory/categories";
const LOCATIONS: &str = "/inventory/locations";
const MOVEMENTS: &str = "/inventory/movements";
const STOCK: &str = "/inventory/stock";
const ORDERS: &str = "/sales/orders";

/// Client for the inventory and sales REST service.
///
/// Cheap to clone; clones share one connection pool. Requests are never
/// retried: every failure is reported once and the caller decides.
#[derive(Clone)]
pub struct InventoryClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: reqwest::Client,
    config: ClientConfig,
}

impl InventoryClient {
    /// Build a client from its configuration.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Config` if the HTTP client cannot be created.
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|err| ApiError::Config(err.to_string()))?;

        Ok(Self {
            inner: Arc::new(ClientInner { http, config }),
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    // =========================================================================
    // Products
    // =========================================================================

    pub async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        self.list(PRODUCTS).await
    }

    pub async fn create_product(&self, form: &ProductForm) -> Result<MutationReply, ApiError> {
        form.validate()?;
        self.mutate(Method::POST, PRODUCTS, Some(form)).await
    }

    pub async fn update_product(
        &self,
        id: ProductId,
        form: &ProductForm,
    ) -> Result<MutationReply, ApiError> {
        form.validate()?;
        self.mutate(Method::PUT, &format!("{PRODUCTS}/{id}"), Some(form))
            .await
    }

    pub async fn delete_product(&self, id: ProductId) -> Result<MutationReply, ApiError> {
        self.mutate::<()>(Method::DELETE, &format!("{PRODUCTS}/{id}"), None)
            .await
    }

    // =========================================================================
    // Categories
    // =========================================================================

    pub async fn list_categories(&self) -> Result<Vec<Category>, ApiError> {
        self.list(CATEGORIES).await
    }

    pub async fn create_category(&self, form: &CategoryForm) -> Result<MutationReply, ApiError> {
        form.validate()?;
        self.mutate(Method::POST, CATEGORIES, Some(form)).await
    }

    pub async fn update_category(
        &self,
        id: CategoryId,
        form: &CategoryForm,
    ) -> Result<MutationReply, ApiError> {
        form.validate()?;
        self.mutate(Method::PUT, &format!("{CATEGORIES}/{id}"), Some(form))
            .await
    }

    pub async fn delete_category(&self, id: CategoryId) -> Result<MutationReply, ApiError> {
        self.mutate::<()>(Method::DELETE, &format!("{CATEGORIES}/{id}"), None)
            .await
    }

    // =========================================================================
    // Locations
    // =========================================================================

    pub async fn list_locations(&self) -> Result<Vec<Location>, ApiError> {
        self.list(LOCATIONS).await
    }

    pub async fn create_location(&self, form: &LocationForm) -> Result<MutationReply, ApiError> {
        form.validate()?;
        self.mutate(Method::POST, LOCATIONS, Some(form)).await
    }

    pub async fn update_location(
        &self,
        id: LocationId,
        form: &LocationForm,
    ) -> Result<MutationReply, ApiError> {
        form.validate()?;
        self.mutate(Method::PUT, &format!("{LOCATIONS}/{id}"), Some(form))
            .await
    }

    pub async fn delete_location(&self, id: LocationId) -> Result<MutationReply, ApiError> {
        self.mutate::<()>(Method::DELETE, &format!("{LOCATIONS}/{id}"), None)
            .await
    }

    // =========================================================================
    // Movements and stock
    // =========================================================================

    pub async fn list_movements(&self) -> Result<Vec<Movement>, ApiError> {
        self.list(MOVEMENTS).await
    }

    /// Record a movement. Location ids that do not apply to the type are dropped.
    pub async fn create_movement(&self, form: &MovementForm) -> Result<MutationReply, ApiError> {
        form.validate()?;
        let form = form.clone().normalized();
        self.mutate(Method::POST, MOVEMENTS, Some(&form)).await
    }

    pub async fn list_stock(&self) -> Result<Vec<StockRecord>, ApiError> {
        self.list(STOCK).await
    }

    // =========================================================================
    // Sales
    // =========================================================================

    /// Submit an order.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Validation` without sending anything when the
    /// order has no items.
    #[instrument(skip(self, request), fields(items = request.items.len()))]
    pub async fn create_order(
        &self,
        request: &OrderRequest,
    ) -> Result<OrderConfirmation, ApiError> {
        if request.items.is_empty() {
            return Err(PosError::EmptyCart.into());
        }
        let body = self.send(Method::POST, ORDERS, Some(request)).await?;
        let reply = MutationReply::from_body(&body);
        Ok(OrderConfirmation::new(reply.message().unwrap_or_default()))
    }

    // =========================================================================
    // Transport
    // =========================================================================

    async fn list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, ApiError> {
        let body = self.send::<()>(Method::GET, path, None).await?;
        serde_json::from_slice(&body).map_err(|err| {
            tracing::warn!(endpoint = path, error = %err, "unexpected list response");
            ApiError::Schema {
                endpoint: path.to_string(),
                reason: err.to_string(),
            }
        })
    }

    async fn mutate<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<MutationReply, ApiError> {
        let body = self.send(method, path, body).await?;
        Ok(MutationReply::from_body(&body))
    }

    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<Vec<u8>, ApiError> {
        let url = self.inner.config.url(path);
        tracing::debug!(%method, %url, "sending request");

        let mut request = self.inner.http.request(method.clone(), &url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|err| {
            tracing::warn!(%method, %url, error = %err, "request failed");
            ApiError::Transport(err)
        })?;
        let status = response.status();
        let body = response.bytes().await?.to_vec();

        if !status.is_success() {
            let message = extract::error_message(status.as_u16(), &body);
            tracing::warn!(%method, %url, status = status.as_u16(), %message, "request rejected");
            return Err(ApiError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        tracing::debug!(%method, %url, status = status.as_u16(), bytes = body.len(), "response received");
        Ok(body)
    }
}

#[async_trait]
impl OrderGateway for InventoryClient {
    async fn create_order(&self, request: &OrderRequest) -> GatewayResult {
        InventoryClient::create_order(self, request)
            .await
            .map_err(GatewayError::from)
    }
}
