//! Cart line record.

use serde::{Deserialize, Serialize};

use crate::types::{Amount, Cost};

/// One product entry in the cart with its quantity.
///
/// Lines are keyed by `name`; the store never holds two lines with the same
/// name and never lets `quantity` fall below 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// Product name, unique within the cart.
    pub name: String,
    /// Unit cost as supplied by the catalog.
    pub cost: Cost,
    /// Number of units, at least 1.
    pub quantity: u32,
    /// Product image URL.
    pub image: String,
    /// Optional product description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CartLine {
    /// Create a line with quantity 1.
    #[must_use]
    pub fn new(name: impl Into<String>, cost: Cost, image: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cost,
            quantity: 1,
            image: image.into(),
            description: None,
        }
    }

    /// Attach a description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Unit cost, not-a-number when the cost text is malformed.
    #[must_use]
    pub fn unit_cost(&self) -> Amount {
        self.cost.to_amount()
    }

    /// Cost times quantity.
    #[must_use]
    pub fn subtotal(&self) -> Amount {
        self.unit_cost().times(self.quantity)
    }

    /// Whether a decrement would change this line.
    #[must_use]
    pub const fn can_decrement(&self) -> bool {
        self.quantity > 1
    }
}
