//! Totals derived from cart lines.
//!
//! ```text
//! line subtotal = unit cost × quantity
//! subtotal      = Σ line subtotals, each rounded to cents
//! tax           = subtotal × 0.10
//! total         = subtotal × 1.10
//! shipping      = 0 (always free)
//! ```
//!
//! Line subtotals are summed as displayed, so the summary always adds up to
//! the lines shown above it. Tax and total are kept exact from there and are
//! rounded only on display.

use rust_decimal::Decimal;

use super::line::CartLine;
use crate::types::Amount;

/// Flat tax rate (10%).
pub const TAX_RATE: Decimal = Decimal::from_parts(10, 0, 0, false, 2);

/// Subtotal multiplier giving the grand total (1 + [`TAX_RATE`]).
pub const TOTAL_MULTIPLIER: Decimal = Decimal::from_parts(110, 0, 0, false, 2);

/// Subtotal of one cart line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineTotal {
    pub name: String,
    pub quantity: u32,
    pub subtotal: Amount,
}

/// Everything the order summary shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartTotals {
    /// Per-line subtotals in cart order.
    pub lines: Vec<LineTotal>,
    /// Sum of the line subtotals as displayed (rounded to cents).
    pub subtotal: Amount,
    /// Always zero.
    pub shipping: Amount,
    /// `subtotal × TAX_RATE`.
    pub tax: Amount,
    /// `subtotal × TOTAL_MULTIPLIER`.
    pub total: Amount,
    /// Number of distinct lines.
    pub line_count: usize,
    /// Sum of quantities.
    pub total_quantity: u64,
}

impl CartTotals {
    /// Compute totals for a list of lines.
    #[must_use]
    pub fn compute(lines: &[CartLine]) -> Self {
        let line_totals: Vec<LineTotal> = lines
            .iter()
            .map(|line| LineTotal {
                name: line.name.clone(),
                quantity: line.quantity,
                subtotal: line.subtotal(),
            })
            .collect();

        let subtotal: Amount = line_totals
            .iter()
            .map(|line| line.subtotal.to_cents())
            .sum();

        Self {
            subtotal,
            shipping: Amount::ZERO,
            tax: subtotal.scale(TAX_RATE),
            total: subtotal.scale(TOTAL_MULTIPLIER),
            line_count: lines.len(),
            total_quantity: lines.iter().map(|line| u64::from(line.quantity)).sum(),
            lines: line_totals,
        }
    }

    /// Totals of an empty cart.
    #[must_use]
    pub fn empty() -> Self {
        Self::compute(&[])
    }

    /// Subtotal for the named line, if present.
    #[must_use]
    pub fn line(&self, name: &str) -> Option<&LineTotal> {
        self.lines.iter().find(|line| line.name == name)
    }
}
