//! # Application Context
//!
//! Everything the menu loop touches, in one explicit struct that is
//! passed down by reference - no ambient singletons, no globals.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                          AppContext                                 │
//! │                                                                     │
//! │  accounts   AccountStore    persisted  (users.json)                 │
//! │  inventory  InventoryStore  persisted  (inventory.json)             │
//! │  cart       Cart            transient  (survives logout, not exit)  │
//! │  session    Session         transient                               │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use shopkeep_core::Cart;
use shopkeep_store::{AccountStore, InventoryStore, StorePaths};

use crate::error::CliResult;
use crate::session::Session;

/// The live application state for one process run.
pub struct AppContext {
    pub accounts: AccountStore,
    pub inventory: InventoryStore,
    pub cart: Cart,
    pub session: Session,
}

impl AppContext {
    /// Loads both stores and starts with an empty cart, logged out.
    pub fn load(paths: StorePaths) -> CliResult<Self> {
        Ok(AppContext {
            accounts: AccountStore::load(paths.accounts)?,
            inventory: InventoryStore::load(paths.inventory)?,
            cart: Cart::new(),
            session: Session::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_load_from_empty_dir() {
        let dir = tempdir().unwrap();
        let ctx = AppContext::load(StorePaths::in_dir(dir.path())).unwrap();

        assert!(ctx.accounts.is_empty());
        assert!(ctx.inventory.inventory().is_empty());
        assert!(ctx.cart.is_empty());
        assert!(ctx.session.current().is_none());
    }
}
