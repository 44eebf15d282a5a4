//! Product types as exchanged with the catalog service.

use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// A product in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Identifier assigned by the catalog service.
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Unit price as a decimal number.
    pub price: f64,
}

impl Product {
    /// Unit price in the given currency.
    pub fn unit_price(&self, currency: Currency) -> Result<Money, CommerceError> {
        Money::try_from_decimal(self.price, currency)
    }
}

/// Request body for creating or replacing a product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub price: f64,
}

impl ProductDraft {
    /// Create a new draft.
    pub fn new(name: impl Into<String>, description: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            price,
        }
    }

    /// Check the draft before sending it.
    pub fn validate(&self) -> Result<(), CommerceError> {
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(CommerceError::InvalidPrice(self.price));
        }
        Ok(())
    }
}
