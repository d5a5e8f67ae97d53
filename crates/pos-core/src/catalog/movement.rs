//! Stock movement types.

use crate::error::PosError;
use crate::ids::{LocationId, MovementId, ProductId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of stock movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MovementType {
    InPurchase,
    InReturn,
    InAdjustment,
    Transfer,
    OutSale,
    OutAdjustment,
    OutWarrantyRepair,
    OutDisposal,
}

impl MovementType {
    /// Every movement type, in menu order.
    pub const ALL: [MovementType; 8] = [
        MovementType::InPurchase,
        MovementType::InReturn,
        MovementType::InAdjustment,
        MovementType::Transfer,
        MovementType::OutSale,
        MovementType::OutAdjustment,
        MovementType::OutWarrantyRepair,
        MovementType::OutDisposal,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MovementType::InPurchase => "IN_PURCHASE",
            MovementType::InReturn => "IN_RETURN",
            MovementType::InAdjustment => "IN_ADJUSTMENT",
            MovementType::Transfer => "TRANSFER",
            MovementType::OutSale => "OUT_SALE",
            MovementType::OutAdjustment => "OUT_ADJUSTMENT",
            MovementType::OutWarrantyRepair => "OUT_WARRANTY_REPAIR",
            MovementType::OutDisposal => "OUT_DISPOSAL",
        }
    }

    /// Label shown to staff.
    pub fn label(&self) -> &'static str {
        match self {
            MovementType::InPurchase => "Entrada por Compra",
            MovementType::InReturn => "Entrada por Devolución",
            MovementType::InAdjustment => "Ajuste Positivo",
            MovementType::Transfer => "Transferencia",
            MovementType::OutSale => "Salida por Venta",
            MovementType::OutAdjustment => "Ajuste Negativo",
            MovementType::OutWarrantyRepair => "Garantía/Reparación",
            MovementType::OutDisposal => "Desecho",
        }
    }

    /// Stock leaves a location: outbound kinds and transfers.
    pub fn requires_origin(&self) -> bool {
        matches!(
            self,
            MovementType::Transfer
                | MovementType::OutSale
                | MovementType::OutAdjustment
                | MovementType::OutWarrantyRepair
                | MovementType::OutDisposal
        )
    }

    /// Stock arrives at a location: inbound kinds and transfers.
    pub fn requires_destination(&self) -> bool {
        matches!(
            self,
            MovementType::Transfer
                | MovementType::InPurchase
                | MovementType::InReturn
                | MovementType::InAdjustment
        )
    }
}

impl fmt::Display for MovementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MovementType {
    type Err = PosError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_uppercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == wanted)
            .ok_or_else(|| PosError::UnknownMovementType(s.to_string()))
    }
}

/// A `{name}` reference embedded in movement listings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NamedRef {
    pub name: String,
}

/// A recorded stock movement.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Movement {
    pub id: MovementId,
    /// Raw type code as reported by the service.
    pub movement_type: String,
    pub quantity: i64,
    #[serde(rename = "doc_ref")]
    pub doc_ref: i64,
    pub product: NamedRef,
    pub location_origin: Option<NamedRef>,
    pub location_dest: Option<NamedRef>,
    /// ISO-8601 timestamp.
    pub created_at: String,
    /// ISO-8601 timestamp.
    pub updated_at: String,
}

impl Movement {
    /// Parsed movement type, if the code is one we know.
    pub fn kind(&self) -> Option<MovementType> {
        self.movement_type.parse().ok()
    }
}

/// Payload for recording a stock movement.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MovementForm {
    #[serde(rename = "movementType")]
    pub movement_type: MovementType,
    pub quantity: i64,
    pub doc_ref: i64,
    pub product_id: ProductId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_origin_id: Option<LocationId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_dest_id: Option<LocationId>,
}

impl MovementForm {
    /// Check the form against the rules for its movement type.
    pub fn validate(&self) -> Result<(), PosError> {
        if self.quantity <= 0 {
            return Err(PosError::Validation(
                "La cantidad debe ser un número positivo".to_string(),
            ));
        }
        if self.doc_ref <= 0 {
            return Err(PosError::Validation(
                "La referencia del documento es requerida".to_string(),
            ));
        }
        if self.product_id.get() <= 0 {
            return Err(PosError::Validation(
                "El ID del producto es requerido".to_string(),
            ));
        }
        if self.movement_type.requires_origin() && !is_set(self.location_origin_id) {
            return Err(PosError::Validation(
                "La ubicación de origen es obligatoria".to_string(),
            ));
        }
        if self.movement_type.requires_destination() && !is_set(self.location_dest_id) {
            return Err(PosError::Validation(
                "La ubicación de destino es obligatoria".to_string(),
            ));
        }
        Ok(())
    }

    /// Drop location ids that do not apply to the movement type.
    pub fn normalized(mut self) -> Self {
        if !self.movement_type.requires_origin() {
            self.location_origin_id = None;
        }
        if !self.movement_type.requires_destination() {
            self.location_dest_id = None;
        }
        self
    }
}

fn is_set(id: Option<LocationId>) -> bool {
    id.is_some_and(|id| id.get() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(movement_type: MovementType) -> MovementForm {
        MovementForm {
            movement_type,
            quantity: 3,
            doc_ref: 1001,
            product_id: ProductId::new(1),
            location_origin_id: None,
            location_dest_id: None,
        }
    }

    #[test]
    fn test_direction_rules() {
        assert!(MovementType::Transfer.requires_origin());
        assert!(MovementType::Transfer.requires_destination());
        assert!(MovementType::InPurchase.requires_destination());
        assert!(!MovementType::InPurchase.requires_origin());
        assert!(MovementType::OutDisposal.requires_origin());
        assert!(!MovementType::OutDisposal.requires_destination());
    }

    #[test]
    fn test_inbound_needs_destination() {
        let mut f = form(MovementType::InPurchase);
        assert_eq!(
            f.validate().unwrap_err().to_string(),
            "La ubicación de destino es obligatoria"
        );
        f.location_dest_id = Some(LocationId::new(2));
        assert!(f.validate().is_ok());
    }

    #[test]
    fn test_transfer_needs_both() {
        let mut f = form(MovementType::Transfer);
        f.location_dest_id = Some(LocationId::new(2));
        assert!(f.validate().is_err());
        f.location_origin_id = Some(LocationId::new(1));
        assert!(f.validate().is_ok());
    }

    #[test]
    fn test_quantity_must_be_positive() {
        let mut f = form(MovementType::OutSale);
        f.location_origin_id = Some(LocationId::new(1));
        f.quantity = 0;
        assert_eq!(
            f.validate().unwrap_err().to_string(),
            "La cantidad debe ser un número positivo"
        );
    }

    #[test]
    fn test_normalized_drops_unused_locations() {
        let mut f = form(MovementType::OutSale);
        f.location_origin_id = Some(LocationId::new(1));
        f.location_dest_id = Some(LocationId::new(2));
        let f = f.normalized();
        assert_eq!(f.location_dest_id, None);

        let json = serde_json::to_value(&f).unwrap();
        assert_eq!(json["movementType"], "OUT_SALE");
        assert_eq!(json["location_origin_id"], 1);
        assert!(json.get("location_dest_id").is_none());
    }

    #[test]
    fn test_parse_movement_type() {
        assert_eq!(
            "out-warranty-repair".parse::<MovementType>().unwrap(),
            MovementType::OutWarrantyRepair
        );
        assert!("SIDEWAYS".parse::<MovementType>().is_err());
    }

    #[test]
    fn test_movement_deserializes() {
        let json = r#"{
            "id": 1, "movementType": "TRANSFER", "quantity": 2, "doc_ref": 55,
            "product": {"name": "Widget"},
            "locationOrigin": {"name": "Bodega"}, "locationDest": null,
            "createdAt": "2025-01-02T10:00:00.000Z", "updatedAt": "2025-01-02T10:00:00.000Z"
        }"#;
        let m: Movement = serde_json::from_str(json).unwrap();
        assert_eq!(m.kind(), Some(MovementType::Transfer));
        assert_eq!(m.location_origin.unwrap().name, "Bodega");
        assert!(m.location_dest.is_none());
    }
}
