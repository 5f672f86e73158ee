//! # Domain Types
//!
//! Core domain types used throughout Shopkeep.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                │
//! │                                                                     │
//! │  ┌────────────────┐   ┌────────────────┐   ┌────────────────┐      │
//! │  │    Account     │   │    Product     │   │   StockEntry   │      │
//! │  │  ────────────  │   │  ────────────  │   │  ────────────  │      │
//! │  │  username      │   │  product_id    │   │  product       │      │
//! │  │  password_hash │   │  name          │   │  quantity      │      │
//! │  │  role          │   │  price (¢)     │   └────────────────┘      │
//! │  └────────────────┘   │  discount (bps)│                           │
//! │                       └────────────────┘                           │
//! │  ┌────────────────┐   ┌────────────────┐   ┌────────────────┐      │
//! │  │     Role       │   │  DiscountRate  │   │   StockView    │      │
//! │  │  ────────────  │   │  ────────────  │   │  display-only  │      │
//! │  │  Admin         │   │  bps (u32)     │   │  projection    │      │
//! │  │  User          │   │  2500 = 25%    │   │  row           │      │
//! │  └────────────────┘   └────────────────┘   └────────────────┘      │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Accounts are created by registration and never mutated afterward.
//! Products are keyed by a caller-supplied integer id; repeated stock
//! additions for the same id mutate only the discount.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::cart::CartLine;
use crate::error::CoreError;
use crate::money::Money;

// =============================================================================
// Role
// =============================================================================

/// Account role controlling inventory permissions.
///
/// Serialized lowercase so the account file carries `"admin"` / `"user"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Can add and restock inventory.
    Admin,
    /// Can browse, fill a cart, and check out.
    User,
}

impl FromStr for Role {
    type Err = CoreError;

    /// Parses menu input. Case-insensitive, whitespace-trimmed.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "user" => Ok(Role::User),
            other => Err(CoreError::InvalidRole(other.to_string())),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Admin => write!(f, "admin"),
            Role::User => write!(f, "user"),
        }
    }
}

// =============================================================================
// Account
// =============================================================================

/// A registered account.
///
/// ## Invariants
/// - Usernames are unique within the credential store
/// - The hash is produced at the store boundary (argon2), never here -
///   this struct carries data only and performs no hashing of its own
/// - Immutable after creation, never deleted
///
/// ## Serialization
/// The hash field is renamed to `"password"` to stay byte-compatible with
/// the legacy account file shape `{username, password, role}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub username: String,

    /// Salted argon2 hash in PHC string format. Never the plaintext.
    #[serde(rename = "password")]
    pub password_hash: String,

    pub role: Role,
}

impl Account {
    /// Checks whether this account may administer inventory.
    #[inline]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

// =============================================================================
// Discount Rate
// =============================================================================

/// Discount rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000, so 2500 bps = 25%. Admins type
/// percentages like `12.5`; storing bps keeps the math in integers.
/// A valid rate lies in [0, 10000]; range enforcement happens in
/// [`crate::validation::validate_discount`] so out-of-range input fails
/// loudly instead of silently clamping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountRate(u32);

impl DiscountRate {
    /// Creates a discount rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        DiscountRate(bps)
    }

    /// Creates a discount rate from a percentage (for convenience).
    pub fn from_percentage(pct: f64) -> Self {
        DiscountRate((pct * 100.0).round() as u32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero discount.
    #[inline]
    pub const fn zero() -> Self {
        DiscountRate(0)
    }

    /// Checks if the discount is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for DiscountRate {
    fn default() -> Self {
        DiscountRate::zero()
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product available for sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Caller-supplied integer id, unique within the inventory.
    pub product_id: u32,

    /// Display name shown while browsing and on receipts.
    pub name: String,

    /// Undiscounted unit price in cents.
    pub price: Money,

    /// Current discount applied to the listed price for display.
    pub discount: DiscountRate,
}

impl Product {
    /// Unit price after the current discount, rounded to the cent.
    #[inline]
    pub fn discounted_price(&self) -> Money {
        self.price.apply_discount(self.discount)
    }
}

// =============================================================================
// Stock Entry
// =============================================================================

/// The inventory record pairing a Product with its on-hand quantity.
///
/// One entry per product id. Quantity is incremented on restock and
/// decremented at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockEntry {
    pub product: Product,
    pub quantity: i64,
}

// =============================================================================
// Stock View
// =============================================================================

/// Read-only projection of a stock entry for display.
///
/// ## Why a Projection?
/// The browsing screen shows the *discounted* unit price, which is a
/// computed value. Computing it once here keeps rendering code dumb and
/// gives tests a single row shape to assert against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StockView {
    pub product_id: u32,
    pub name: String,
    pub price: Money,
    pub discount: DiscountRate,
    pub discounted_unit_price: Money,
    pub quantity: i64,
}

impl From<&StockEntry> for StockView {
    fn from(entry: &StockEntry) -> Self {
        StockView {
            product_id: entry.product.product_id,
            name: entry.product.name.clone(),
            price: entry.product.price,
            discount: entry.product.discount,
            discounted_unit_price: entry.product.discounted_price(),
            quantity: entry.quantity,
        }
    }
}

// =============================================================================
// Receipt
// =============================================================================

/// The result of a successful checkout.
///
/// Carries the consumed cart lines so the CLI can print an itemized bill.
/// NOTE: the total is computed from *undiscounted* prices - inherited
/// behavior kept deliberately, see the checkout tests in `inventory`.
#[derive(Debug, Clone, Serialize)]
pub struct Receipt {
    pub total: Money,
    pub lines: Vec<CartLine>,
    pub completed_at: DateTime<Utc>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_from_str() {
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!(" User ".parse::<Role>().unwrap(), Role::User);
        assert!(matches!(
            "manager".parse::<Role>(),
            Err(CoreError::InvalidRole(s)) if s == "manager"
        ));
    }

    #[test]
    fn test_role_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), "\"user\"");
    }

    #[test]
    fn test_account_serializes_hash_as_password() {
        let account = Account {
            username: "alice".to_string(),
            password_hash: "$argon2id$stub".to_string(),
            role: Role::Admin,
        };
        let json = serde_json::to_string(&account).unwrap();
        assert!(json.contains("\"password\":\"$argon2id$stub\""));
        assert!(!json.contains("password_hash"));
    }

    #[test]
    fn test_discount_rate_from_percentage() {
        assert_eq!(DiscountRate::from_percentage(25.0).bps(), 2500);
        assert_eq!(DiscountRate::from_percentage(12.5).bps(), 1250);
        assert_eq!(DiscountRate::from_percentage(0.0).bps(), 0);
    }

    #[test]
    fn test_stock_view_computes_discounted_price() {
        let entry = StockEntry {
            product: Product {
                product_id: 7,
                name: "Widget".to_string(),
                price: Money::from_cents(10000),
                discount: DiscountRate::from_bps(2500),
            },
            quantity: 4,
        };

        let view = StockView::from(&entry);
        assert_eq!(view.discounted_unit_price, Money::from_cents(7500));
        assert_eq!(view.quantity, 4);
    }
}
