//! Newtype IDs for type-safe identifiers.
//!
//! The inventory service assigns integer ids. Wrapping them keeps a
//! `ProductId` from being passed where a `LocationId` is expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Macro to generate integer newtype ID structs.
macro_rules! define_id {
    ($name:ident) => {
        /// A server-assigned identifier.
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Create an ID from its raw value.
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            /// Get the raw value.
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse().map(Self)
            }
        }
    };
}

define_id!(ProductId);
define_id!(CategoryId);
define_id!(LocationId);
define_id!(StockId);
define_id!(MovementId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_creation() {
        let id = ProductId::new(42);
        assert_eq!(id.get(), 42);
    }

    #[test]
    fn test_id_display() {
        assert_eq!(format!("{}", LocationId::new(7)), "7");
    }

    #[test]
    fn test_id_parse() {
        let id: StockId = " 12 ".parse().unwrap();
        assert_eq!(id, StockId::new(12));
        assert!("abc".parse::<StockId>().is_err());
    }

    #[test]
    fn test_id_serializes_as_plain_number() {
        let json = serde_json::to_string(&ProductId::new(3)).unwrap();
        assert_eq!(json, "3");
        let back: ProductId = serde_json::from_str("3").unwrap();
        assert_eq!(back, ProductId::new(3));
    }
}
