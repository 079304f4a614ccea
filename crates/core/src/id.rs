//! Strongly-typed identifiers used across the domain.
//!
//! Identifiers are store-assigned positive integers; zero is never a valid id.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Identifier of a client record.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientId(u64);

/// Identifier of a sandal (catalog) record.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SandalId(u64);

/// Identifier of a sale header.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SaleId(u64);

/// Identifier of a line item within a sale.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineItemId(u64);

macro_rules! impl_u64_id {
    ($t:ty, $name:literal) => {
        impl $t {
            /// Wrap a store-assigned identifier.
            pub fn new(id: u64) -> Self {
                Self(id)
            }

            pub fn as_u64(&self) -> u64 {
                self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<u64> for $t {
            fn from(value: u64) -> Self {
                Self(value)
            }
        }

        impl From<$t> for u64 {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let id = u64::from_str(s)
                    .map_err(|e| DomainError::invalid_id(format!("{}: {}", $name, e)))?;
                if id == 0 {
                    return Err(DomainError::invalid_id(format!(
                        "{}: must be positive",
                        $name
                    )));
                }
                Ok(Self(id))
            }
        }
    };
}

impl_u64_id!(ClientId, "ClientId");
impl_u64_id!(SandalId, "SandalId");
impl_u64_id!(SaleId, "SaleId");
impl_u64_id!(LineItemId, "LineItemId");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_positive_integers() {
        let id: SaleId = "42".parse().unwrap();
        assert_eq!(id, SaleId::new(42));
        assert_eq!(id.to_string(), "42");
    }

    #[test]
    fn rejects_zero() {
        let err = "0".parse::<ClientId>().unwrap_err();
        assert!(matches!(err, DomainError::InvalidId(_)));
    }

    #[test]
    fn rejects_non_numeric_text() {
        let err = "abc".parse::<SandalId>().unwrap_err();
        assert!(matches!(err, DomainError::InvalidId(_)));
    }

    #[test]
    fn rejects_negative_numbers() {
        let err = "-3".parse::<LineItemId>().unwrap_err();
        assert!(matches!(err, DomainError::InvalidId(_)));
    }

    #[test]
    fn serializes_as_bare_integers() {
        let id = ClientId::new(7);
        assert_eq!(serde_json::to_string(&id).unwrap(), "7");
        let back: ClientId = serde_json::from_str("7").unwrap();
        assert_eq!(back, id);
    }
}
