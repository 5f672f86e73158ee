//! # Session
//!
//! Tracks the single logged-in identity.
//!
//! ## State Machine
//! ```text
//! Anonymous ──(register|login)──► Authenticated{role} ──(logout)──► Anonymous
//! ```
//!
//! Nothing here is persisted: a fresh process always starts Anonymous.
//! At most one account is logged in at a time; a new login replaces any
//! current one.

use shopkeep_core::Account;
use tracing::debug;

/// The current login state.
#[derive(Debug, Default)]
pub struct Session {
    current: Option<Account>,
}

impl Session {
    pub fn new() -> Self {
        Session { current: None }
    }

    /// Makes `account` the active identity, replacing any previous one.
    pub fn login(&mut self, account: Account) {
        debug!(username = %account.username, role = %account.role, "Session login");
        self.current = Some(account);
    }

    /// Clears the active identity, returning who was logged in (for the
    /// goodbye message). `None` if nobody was.
    pub fn logout(&mut self) -> Option<Account> {
        let account = self.current.take();
        if let Some(ref a) = account {
            debug!(username = %a.username, "Session logout");
        }
        account
    }

    /// The active account, if any.
    pub fn current(&self) -> Option<&Account> {
        self.current.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shopkeep_core::Role;

    fn account(name: &str) -> Account {
        Account {
            username: name.to_string(),
            password_hash: "$argon2id$stub".to_string(),
            role: Role::User,
        }
    }

    #[test]
    fn test_login_replaces_current() {
        let mut session = Session::new();
        assert!(session.current().is_none());

        session.login(account("alice"));
        session.login(account("bob"));

        assert_eq!(session.current().unwrap().username, "bob");
    }

    #[test]
    fn test_logout_returns_account() {
        let mut session = Session::new();
        session.login(account("alice"));

        let out = session.logout().unwrap();
        assert_eq!(out.username, "alice");
        assert!(session.current().is_none());
        assert!(session.logout().is_none());
    }
}
