//! Core types for Paradise Nursery.
//!
//! This module provides type-safe wrappers for currency values.

pub mod price;

pub use price::{Amount, Cost, PriceError};
