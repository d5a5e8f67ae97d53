//! Catalog module.
//!
//! Read models and editable forms for the records the inventory service
//! exposes: products, categories, locations, stock, and movements.

mod category;
mod movement;
mod product;
mod stock;

pub use category::{Category, CategoryForm, Location, LocationForm};
pub use movement::{Movement, MovementForm, MovementType, NamedRef};
pub use product::{Product, ProductForm};
pub use stock::{StockProduct, StockRecord};

use serde::{Deserialize, Deserializer};
use std::str::FromStr;

/// Accept a JSON number or a numeric string.
///
/// The service serializes decimal columns as strings on some endpoints.
pub(crate) fn coerce_number<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + FromStr,
    T::Err: std::fmt::Display,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString<T> {
        Number(T),
        Text(String),
    }

    match NumberOrString::<T>::deserialize(deserializer)? {
        NumberOrString::Number(n) => Ok(n),
        NumberOrString::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

/// Reject a blank required text field with the given message.
pub(crate) fn require_text(value: &str, message: &str) -> Result<(), crate::PosError> {
    if value.trim().is_empty() {
        return Err(crate::PosError::Validation(message.to_string()));
    }
    Ok(())
}
