//! # shopkeep-store: Flat-File Persistence for Shopkeep
//!
//! Two JSON files, each owned exclusively by its in-memory store for the
//! lifetime of one process run:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                        On-Disk Layout                               │
//! │                                                                     │
//! │  users.json          JSON array of {username, password, role}       │
//! │                      ("password" holds the argon2 hash)             │
//! │                                                                     │
//! │  inventory.json      JSON object keyed by stringified product id:   │
//! │                      { "1": { "product": { "name", "product_id",    │
//! │                                 "price", "discount" },              │
//! │                               "quantity": 7 } }                     │
//! │                                                                     │
//! │  Both files: pretty-printed, UTF-8, rewritten in full after every   │
//! │  mutation. A malformed file is logged and treated as empty - the    │
//! │  process keeps running.                                             │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//! - [`accounts`] - Credential store: register, authenticate, argon2
//! - [`inventory`] - Inventory store: file mirror around the core map
//! - [`paths`] - File locations (redirectable for tests)
//! - [`error`] - Persistence error types

pub mod accounts;
pub mod error;
pub mod inventory;
pub mod paths;

pub use accounts::AccountStore;
pub use error::{StoreError, StoreResult};
pub use inventory::InventoryStore;
pub use paths::StorePaths;
