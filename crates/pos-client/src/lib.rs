//! Async client for the inventory and sales REST service.
//!
//! Wraps the service's endpoints with typed requests and responses:
//!
//! - **Catalog**: list, create, update and delete products, categories, locations
//! - **Stock**: list stock records and record movements
//! - **Sales**: submit orders; [`InventoryClient`] is an [`OrderGateway`](pos_core::checkout::OrderGateway)
//!
//! # Example
//!
//! ```rust,ignore
//! use pos_client::{ClientConfig, FetchState, InventoryClient};
//!
//! let client = InventoryClient::new(ClientConfig::new("http://localhost:4000/api"))?;
//!
//! let stock: FetchState<_> = client.list_stock().await.into();
//! match stock {
//!     FetchState::Ready(records) => println!("{} records", records.len()),
//!     FetchState::Failed(message) => eprintln!("{message}"),
//!     FetchState::Loading => {}
//! }
//! ```

mod client;
mod config;
mod error;
pub mod extract;
mod reply;
mod state;

pub use client::InventoryClient;
pub use config::{ClientConfig, DEFAULT_BASE_URL};
pub use error::{ApiError, SCHEMA_ERROR, UNEXPECTED_ERROR};
pub use reply::MutationReply;
pub use state::FetchState;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{ApiError, ClientConfig, FetchState, InventoryClient, MutationReply};
}
