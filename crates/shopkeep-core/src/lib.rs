//! # shopkeep-core: Pure Business Logic for Shopkeep
//!
//! This crate is the **heart** of Shopkeep. It contains all business logic
//! as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Shopkeep Architecture                          │
//! │                                                                     │
//! │  ┌─────────────────────────────────────────────────────────────┐   │
//! │  │                    apps/cli (Menu Loop)                     │   │
//! │  │    Register ──► Login ──► Admin/User menus ──► Checkout     │   │
//! │  └─────────────────────────────┬───────────────────────────────┘   │
//! │                                │                                    │
//! │  ┌─────────────────────────────▼───────────────────────────────┐   │
//! │  │              ★ shopkeep-core (THIS CRATE) ★                 │   │
//! │  │                                                             │   │
//! │  │   ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌───────────────┐    │   │
//! │  │   │  types  │ │  money  │ │  cart   │ │   inventory   │    │   │
//! │  │   │ Account │ │  Money  │ │  Cart   │ │  StockEntry   │    │   │
//! │  │   │ Product │ │Discount │ │CartLine │ │   checkout    │    │   │
//! │  │   └─────────┘ └─────────┘ └─────────┘ └───────────────┘    │   │
//! │  │                                                             │   │
//! │  │   NO I/O • NO FILES • NO PROMPTS • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────┬───────────────────────────────┘   │
//! │                                │                                    │
//! │  ┌─────────────────────────────▼───────────────────────────────┐   │
//! │  │              shopkeep-store (Persistence Layer)             │   │
//! │  │        JSON flat files, argon2 hashing, legacy format       │   │
//! │  └─────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Account, Role, Product, StockEntry, Receipt)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`cart`] - Transient shopping cart with append-only lines
//! - [`inventory`] - In-memory stock map and the checkout flow
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic for its inputs
//! 2. **No I/O**: File system and console access are FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64)
//! 4. **Explicit Errors**: All errors are typed, never strings or panics

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod inventory;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use shopkeep_core::Money` instead of
// `use shopkeep_core::money::Money`

pub use cart::{Cart, CartLine};
pub use error::{CoreError, CoreResult, ValidationError};
pub use inventory::Inventory;
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum lines allowed in a single cart.
///
/// ## Business Reason
/// Prevents runaway carts in a session that never checks out. Lines are
/// append-only (no merging), so the same product can occupy several lines.
pub const MAX_CART_LINES: usize = 100;

/// Maximum quantity of a single cart line or stock addition.
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10).
pub const MAX_LINE_QUANTITY: i64 = 999;
