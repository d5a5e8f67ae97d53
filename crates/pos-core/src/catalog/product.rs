//! Product types.

use crate::catalog::{coerce_number, require_text, Category};
use crate::error::PosError;
use crate::ids::{CategoryId, ProductId};
use serde::{Deserialize, Serialize};

/// A product as listed by the inventory service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Product description.
    pub description: String,
    /// Brand or manufacturer.
    pub brand: String,
    /// Purchase cost per unit.
    #[serde(deserialize_with = "coerce_number")]
    pub unit_cost: f64,
    /// Reference sale price per unit.
    #[serde(deserialize_with = "coerce_number")]
    pub sale_price: f64,
    /// Warranty length in days.
    #[serde(deserialize_with = "coerce_number")]
    pub warranty_period_days: i64,
    /// Owning category id.
    pub category_id: CategoryId,
    /// Owning category, embedded.
    pub category: Category,
}

impl Product {
    /// Build an edit form pre-filled with this product's values.
    pub fn to_form(&self) -> ProductForm {
        ProductForm {
            name: self.name.clone(),
            description: self.description.clone(),
            brand: self.brand.clone(),
            unit_cost: self.unit_cost,
            sale_price: self.sale_price,
            warranty_period_days: self.warranty_period_days,
            category_id: self.category_id,
        }
    }
}

/// Payload for creating or updating a product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductForm {
    pub name: String,
    pub description: String,
    pub brand: String,
    pub unit_cost: f64,
    pub sale_price: f64,
    pub warranty_period_days: i64,
    pub category_id: CategoryId,
}

impl ProductForm {
    /// Check required fields and numeric ranges before the form is sent.
    ///
    /// Reports the first problem found, in field order.
    pub fn validate(&self) -> Result<(), PosError> {
        require_text(&self.name, "El nombre es obligatorio")?;
        require_text(&self.description, "La descripción es obligatoria")?;
        require_text(&self.brand, "La marca es obligatoria")?;
        if self.category_id.get() <= 0 {
            return Err(PosError::Validation(
                "El ID de categoría es obligatorio".to_string(),
            ));
        }
        if !(self.unit_cost.is_finite() && self.unit_cost > 0.0) {
            return Err(PosError::Validation(
                "El costo debe ser mayor a 0".to_string(),
            ));
        }
        if !(self.sale_price.is_finite() && self.sale_price > 0.0) {
            return Err(PosError::Validation(
                "El precio de venta debe ser mayor a 0".to_string(),
            ));
        }
        if self.warranty_period_days < 0 {
            return Err(PosError::Validation(
                "La garantía no puede ser negativa".to_string(),
            ));
        }
        Ok(())
    }
}
