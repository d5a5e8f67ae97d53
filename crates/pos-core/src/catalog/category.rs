//! Category and location types.

use crate::catalog::require_text;
use crate::error::PosError;
use crate::ids::{CategoryId, LocationId};
use serde::{Deserialize, Serialize};

/// A product category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

/// Payload for creating or renaming a category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryForm {
    pub name: String,
}

impl CategoryForm {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Check required fields before the form is sent.
    pub fn validate(&self) -> Result<(), PosError> {
        require_text(&self.name, "El nombre es obligatorio")
    }
}

/// A physical place where stock is held (store, warehouse, shelf).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Location {
    pub id: LocationId,
    pub name: String,
}

/// Payload for creating or renaming a location.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LocationForm {
    pub name: String,
}

impl LocationForm {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Check required fields before the form is sent.
    pub fn validate(&self) -> Result<(), PosError> {
        require_text(&self.name, "El nombre es obligatorio")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_name_rejected() {
        let err = CategoryForm::new("   ").validate().unwrap_err();
        assert_eq!(err, PosError::Validation("El nombre es obligatorio".into()));
        assert!(LocationForm::new("").validate().is_err());
    }

    #[test]
    fn test_named_forms_accepted() {
        assert!(CategoryForm::new("Herramientas").validate().is_ok());
        assert!(LocationForm::new("Bodega principal").validate().is_ok());
    }

    #[test]
    fn test_category_deserializes() {
        let c: Category = serde_json::from_str(r#"{"id":4,"name":"Audio"}"#).unwrap();
        assert_eq!(c.id, CategoryId::new(4));
        assert_eq!(c.name, "Audio");
    }
}
