//! # Cart
//!
//! The transient, per-session shopping cart.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Cart Operations                                │
//! │                                                                     │
//! │  User Action              Cart Change                               │
//! │  ───────────              ───────────                               │
//! │  Add to Cart ───────────► lines.push(line)   (always appends)       │
//! │  Checkout ──────────────► lines drained into the Receipt            │
//! │  Logout ────────────────► (nothing - lines survive the session)     │
//! │                                                                     │
//! │  The cart is never persisted. A fresh process starts empty.         │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## No Merging
//! Adding the same product twice yields two lines. Availability is only
//! checked at checkout, where quantities for the same product id are
//! summed before stock is validated.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::Product;
use crate::validation::validate_quantity;
use crate::MAX_CART_LINES;

// =============================================================================
// Cart Line
// =============================================================================

/// A line in the shopping cart.
///
/// ## Price Freezing
/// The line stores a full snapshot of the product as it was when added.
/// If an admin changes the discount afterwards, this line is unaffected.
#[derive(Debug, Clone, Serialize)]
pub struct CartLine {
    /// Product snapshot at time of adding (frozen).
    pub product: Product,

    /// Quantity requested.
    pub quantity: i64,

    /// When this line was added.
    pub added_at: DateTime<Utc>,
}

impl CartLine {
    /// Line total at the undiscounted unit price.
    ///
    /// Checkout totals use this - the browsing screen shows discounted
    /// prices, checkout does not. Inherited behavior, kept and flagged
    /// in the checkout tests.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.product.price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart.
///
/// ## Invariants
/// - Lines are append-only until checkout drains them in bulk
/// - No merging: the same product id may appear on several lines
/// - Maximum lines: 100, maximum line quantity: 999 (crate constants)
#[derive(Debug, Clone, Default)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { lines: Vec::new() }
    }

    /// Appends a line to the cart.
    ///
    /// ## Behavior
    /// - Does NOT check inventory availability (checkout's job)
    /// - Does NOT merge with existing lines for the same product
    ///
    /// ## Errors
    /// - Validation error for a non-positive or oversized quantity
    /// - `CartTooLarge` when the line limit is reached
    pub fn add_line(&mut self, product: Product, quantity: i64) -> CoreResult<()> {
        validate_quantity(quantity)?;

        if self.lines.len() >= MAX_CART_LINES {
            return Err(CoreError::CartTooLarge {
                max: MAX_CART_LINES,
            });
        }

        self.lines.push(CartLine {
            product,
            quantity,
            added_at: Utc::now(),
        });
        Ok(())
    }

    /// Read access to the lines, in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Drains all lines out of the cart, leaving it empty.
    ///
    /// Called exactly once per successful checkout; the drained lines
    /// become the receipt's line items.
    pub fn take_lines(&mut self) -> Vec<CartLine> {
        std::mem::take(&mut self.lines)
    }

    /// Removes all lines.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Checks if the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of lines (not quantities).
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Total quantity across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Sum of undiscounted line totals.
    pub fn subtotal(&self) -> Money {
        self.lines
            .iter()
            .fold(Money::zero(), |acc, l| acc + l.line_total())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DiscountRate;

    fn test_product(id: u32, price_cents: i64) -> Product {
        Product {
            product_id: id,
            name: format!("Product {}", id),
            price: Money::from_cents(price_cents),
            discount: DiscountRate::zero(),
        }
    }

    #[test]
    fn test_add_line() {
        let mut cart = Cart::new();
        cart.add_line(test_product(1, 999), 2).unwrap();

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.total_quantity(), 2);
        assert_eq!(cart.subtotal(), Money::from_cents(1998));
    }

    #[test]
    fn test_same_product_yields_two_lines() {
        let mut cart = Cart::new();
        cart.add_line(test_product(1, 999), 2).unwrap();
        cart.add_line(test_product(1, 999), 3).unwrap();

        // No merging: two separate lines, quantities NOT combined
        assert_eq!(cart.line_count(), 2);
        assert_eq!(cart.total_quantity(), 5);
    }

    #[test]
    fn test_rejects_bad_quantity() {
        let mut cart = Cart::new();
        assert!(cart.add_line(test_product(1, 100), 0).is_err());
        assert!(cart.add_line(test_product(1, 100), -3).is_err());
        assert!(cart.add_line(test_product(1, 100), 1000).is_err());
        assert!(cart.is_empty());
    }

    #[test]
    fn test_line_limit() {
        let mut cart = Cart::new();
        for i in 0..MAX_CART_LINES {
            cart.add_line(test_product(i as u32, 100), 1).unwrap();
        }

        let err = cart.add_line(test_product(999, 100), 1).unwrap_err();
        assert!(matches!(err, CoreError::CartTooLarge { .. }));
    }

    #[test]
    fn test_subtotal_ignores_discount() {
        let mut cart = Cart::new();
        let mut product = test_product(1, 10000);
        product.discount = DiscountRate::from_bps(2500);

        cart.add_line(product, 2).unwrap();

        // Undiscounted: 2 × $100.00, not 2 × $75.00
        assert_eq!(cart.subtotal(), Money::from_cents(20000));
    }

    #[test]
    fn test_take_lines_empties_cart() {
        let mut cart = Cart::new();
        cart.add_line(test_product(1, 100), 1).unwrap();

        let lines = cart.take_lines();
        assert_eq!(lines.len(), 1);
        assert!(cart.is_empty());
    }
}
