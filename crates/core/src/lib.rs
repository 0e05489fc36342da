//! Paradise Nursery Core - Cart types and totals.
//!
//! This crate provides the cart logic used by the storefront binary:
//! - [`types`] - Currency values ([`Cost`], [`Amount`]) and their parsing/formatting
//! - [`cart`] - The cart store, its dispatched actions, derived totals and checkout
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP,
//! no locking. The storefront owns a single [`CartStore`] and mutates it
//! exclusively through [`CartStore::dispatch`].
//!
//! # Example
//!
//! ```
//! use paradise_nursery_core::{CartLine, CartStore, Cost};
//!
//! let mut cart = CartStore::new();
//! let fern = CartLine::new("Fern", Cost::text("$15.00"), "https://example.com/fern.jpg");
//! cart.add(fern.clone());
//! cart.add(fern);
//!
//! let totals = cart.totals();
//! assert_eq!(totals.subtotal.to_string(), "30.00");
//! assert_eq!(totals.tax.to_string(), "3.00");
//! assert_eq!(totals.total.to_string(), "33.00");
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod types;

pub use cart::*;
pub use types::*;
