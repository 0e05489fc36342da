//! Shopping cart state and derived values.
//!
//! - [`line`] - A single product entry with its quantity
//! - [`store`] - The cart state container and the actions dispatched to it
//! - [`totals`] - Subtotal, tax and grand total derived from the lines
//! - [`checkout`] - The outcome of a checkout request

pub mod checkout;
pub mod line;
pub mod store;
pub mod totals;

pub use checkout::CheckoutOutcome;
pub use line::CartLine;
pub use store::{CartAction, CartError, CartStore};
pub use totals::{CartTotals, LineTotal, TAX_RATE, TOTAL_MULTIPLIER};
