//! Cart state container.
//!
//! Mutations are expressed as [`CartAction`]s applied by
//! [`CartStore::dispatch`]. [`CartStore::increment`] and
//! [`CartStore::decrement`] derive an `UpdateQuantity` from the current line,
//! and [`CartStore::add`] dispatches `AddItem`.

use serde::{Deserialize, Serialize};

use super::checkout::CheckoutOutcome;
use super::line::CartLine;
use super::totals::CartTotals;

/// Errors returned when an action cannot be applied.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CartError {
    /// Quantities below 1 are not representable; use removal instead.
    #[error("quantity must be at least 1")]
    InvalidQuantity,
    /// No line with the given name is in the cart.
    #[error("no cart line named {0:?}")]
    LineNotFound(String),
}

/// Actions that mutate the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CartAction {
    /// Upsert by name: bump the quantity of an existing line, or append the
    /// line with quantity 1.
    AddItem(CartLine),
    /// Set the quantity of an existing line.
    UpdateQuantity { name: String, quantity: u32 },
    /// Delete a line. Unknown names are ignored.
    RemoveItem { name: String },
}

/// In-memory list of cart lines, unique by name, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartStore {
    lines: Vec<CartLine>,
}

impl CartStore {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Apply one action.
    ///
    /// # Errors
    ///
    /// - [`CartError::InvalidQuantity`] for `UpdateQuantity` with quantity 0
    /// - [`CartError::LineNotFound`] for `UpdateQuantity` on an unknown name
    pub fn dispatch(&mut self, action: CartAction) -> Result<(), CartError> {
        match action {
            CartAction::AddItem(line) => {
                self.upsert(line);
                Ok(())
            }
            CartAction::UpdateQuantity { name, quantity } => {
                if quantity == 0 {
                    return Err(CartError::InvalidQuantity);
                }
                let line = self
                    .get_mut(&name)
                    .ok_or_else(|| CartError::LineNotFound(name.clone()))?;
                line.quantity = quantity;
                Ok(())
            }
            CartAction::RemoveItem { name } => {
                self.lines.retain(|line| line.name != name);
                Ok(())
            }
        }
    }

    /// Add a product, bumping its quantity if it is already in the cart.
    pub fn add(&mut self, line: CartLine) {
        // AddItem never fails
        let _ = self.dispatch(CartAction::AddItem(line));
    }

    fn upsert(&mut self, line: CartLine) {
        if let Some(existing) = self.get_mut(&line.name) {
            existing.quantity = existing.quantity.saturating_add(1);
        } else {
            self.lines.push(CartLine { quantity: 1, ..line });
        }
    }

    /// Increase a line's quantity by one and return the new quantity.
    ///
    /// Saturates at `u32::MAX`.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::LineNotFound`] if no line has this name.
    pub fn increment(&mut self, name: &str) -> Result<u32, CartError> {
        let current = self.quantity_of(name)?;
        let quantity = current.saturating_add(1);
        self.dispatch(CartAction::UpdateQuantity {
            name: name.to_string(),
            quantity,
        })?;
        Ok(quantity)
    }

    /// Decrease a line's quantity by one, never below 1, and return the new
    /// quantity. A line already at 1 is left unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::LineNotFound`] if no line has this name.
    pub fn decrement(&mut self, name: &str) -> Result<u32, CartError> {
        let current = self.quantity_of(name)?;
        if current <= 1 {
            return Ok(current);
        }
        let quantity = current - 1;
        self.dispatch(CartAction::UpdateQuantity {
            name: name.to_string(),
            quantity,
        })?;
        Ok(quantity)
    }

    /// All lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Look up a line by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.name == name)
    }

    fn get_mut(&mut self, name: &str) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|line| line.name == name)
    }

    fn quantity_of(&self, name: &str) -> Result<u32, CartError> {
        self.get(name)
            .map(|line| line.quantity)
            .ok_or_else(|| CartError::LineNotFound(name.to_string()))
    }

    /// Whether a line with this name is in the cart.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Sum of all line quantities.
    #[must_use]
    pub fn total_quantity(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Derive subtotal, tax and total from the current lines.
    #[must_use]
    pub fn totals(&self) -> CartTotals {
        CartTotals::compute(&self.lines)
    }

    /// Decide what a checkout request produces. Never mutates the cart.
    #[must_use]
    pub fn checkout(&self) -> CheckoutOutcome {
        CheckoutOutcome::for_cart(self)
    }
}
