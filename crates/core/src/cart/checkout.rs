//! Checkout stub.
//!
//! Real checkout is not offered. A checkout request either stops at the
//! empty-cart notice or acknowledges that checkout is coming soon. Neither
//! outcome changes the cart.

use serde::Serialize;

use super::store::CartStore;

/// What a checkout request produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutOutcome {
    /// The cart has no lines; checkout is aborted.
    EmptyCart,
    /// The cart has lines, but checkout is not available yet.
    ComingSoon,
}

impl CheckoutOutcome {
    /// Decide the outcome for the given cart.
    #[must_use]
    pub fn for_cart(cart: &CartStore) -> Self {
        if cart.is_empty() {
            Self::EmptyCart
        } else {
            Self::ComingSoon
        }
    }

    /// The notice shown to the shopper.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::EmptyCart => "Your cart is empty. Please add items before checkout.",
            Self::ComingSoon => "Checkout functionality coming soon!",
        }
    }

    /// Whether the notice blocks the shopper from continuing.
    #[must_use]
    pub const fn is_blocking(self) -> bool {
        matches!(self, Self::EmptyCart)
    }
}
