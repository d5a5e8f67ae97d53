//! Order submission payload.

use crate::cart::{CartLineItem, PaymentMethod};
use crate::ids::{LocationId, ProductId};
use crate::money::{serialize_major, Money};
use serde::{Deserialize, Serialize};

/// One item of an order: a cart line stripped of display-only fields.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product_id: ProductId,
    pub location_id: LocationId,
    pub quantity: i64,
    #[serde(serialize_with = "serialize_major")]
    pub unit_price: Money,
}

impl From<&CartLineItem> for OrderItem {
    fn from(line: &CartLineItem) -> Self {
        Self {
            product_id: line.product.id,
            location_id: line.location.id,
            quantity: line.quantity,
            unit_price: line.unit_price,
        }
    }
}

/// Body of `POST /sales/orders`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    pub payment_method: PaymentMethod,
    /// One item per cart line, same order.
    pub items: Vec<OrderItem>,
}

impl OrderRequest {
    pub fn from_lines(payment_method: PaymentMethod, lines: &[CartLineItem]) -> Self {
        Self {
            payment_method,
            items: lines.iter().map(OrderItem::from).collect(),
        }
    }
}

/// Successful reply to an order submission.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderConfirmation {
    /// Server confirmation text.
    #[serde(default)]
    pub message: String,
}

impl OrderConfirmation {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::ProductRef;
    use crate::catalog::Location;
    use crate::money::Currency;
    use serde_json::json;

    #[test]
    fn test_wire_shape() {
        let line = CartLineItem::new(
            ProductRef {
                id: ProductId::new(1),
                name: "Widget".to_string(),
            },
            Location {
                id: LocationId::new(4),
                name: "Store".to_string(),
            },
            3,
            Money::new(90, Currency::COP),
        )
        .unwrap();

        let request = OrderRequest::from_lines(PaymentMethod::Card, &[line]);
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "paymentMethod": "CARD",
                "items": [{"productId": 1, "locationId": 4, "quantity": 3, "unitPrice": 90}]
            })
        );
    }

    #[test]
    fn test_confirmation_tolerates_extra_fields() {
        let c: OrderConfirmation =
            serde_json::from_str(r#"{"message":"Orden creada","orderId":12}"#).unwrap();
        assert_eq!(c.message, "Orden creada");
    }
}
