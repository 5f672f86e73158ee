//! # Account Store
//!
//! The credential store: username / password-hash / role records in one
//! JSON array, plus the argon2 hashing boundary.
//!
//! ## Registration Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                     Registration Flow                               │
//! │                                                                     │
//! │  register("alice", "hunter2", Some(User))                           │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  Username taken? ──────────────► DuplicateUsername                  │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  Store empty? ── yes ──► role = Admin (choice ignored)              │
//! │       │ no                                                          │
//! │       ▼                                                             │
//! │  Choice given? ── no ──► InvalidRole                                │
//! │       │ yes                                                         │
//! │       ▼                                                             │
//! │  argon2 hash (fresh random salt) ← hashing happens HERE, at the     │
//! │       │                            store boundary - never inside    │
//! │       ▼                            a data type's constructor        │
//! │  append + rewrite the whole file                                    │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Authentication is a linear scan with an argon2 verify per candidate.
//! No lockout, no rate limiting - single-user CLI scope.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use tracing::{debug, info, warn};

use shopkeep_core::validation::{validate_password, validate_username};
use shopkeep_core::{Account, CoreError, Role};

use crate::error::{StoreError, StoreResult};

/// The credential store, mirrored to a JSON array file.
#[derive(Debug)]
pub struct AccountStore {
    accounts: Vec<Account>,
    path: PathBuf,
}

impl AccountStore {
    /// Loads the store from `path`.
    ///
    /// ## Recovery Behavior
    /// - Missing file: normal first run, empty store
    /// - Malformed JSON: logged at warn, empty store (the next mutation
    ///   overwrites the corrupt file)
    /// - Any other read failure: propagated
    pub fn load(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();

        let accounts = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<Vec<Account>>(&raw) {
                Ok(accounts) => accounts,
                Err(err) => {
                    warn!(path = %path.display(), %err, "Account file is corrupted, starting with an empty store");
                    Vec::new()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => Vec::new(),
            Err(err) => return Err(StoreError::io(path, err)),
        };

        debug!(path = %path.display(), count = accounts.len(), "Loaded account store");
        Ok(AccountStore { accounts, path })
    }

    /// Registers a new account and persists the whole store.
    ///
    /// ## Role Assignment
    /// - First ever account: always `Admin`, any supplied choice ignored
    /// - Every later account: `role_choice` is required; `None` fails
    ///   with `InvalidRole` (the CLI re-prompts until the text parses)
    pub fn register(
        &mut self,
        username: &str,
        password: &str,
        role_choice: Option<Role>,
    ) -> StoreResult<Account> {
        validate_username(username).map_err(CoreError::from)?;
        validate_password(password).map_err(CoreError::from)?;

        let username = username.trim();
        if self.accounts.iter().any(|a| a.username == username) {
            return Err(CoreError::DuplicateUsername(username.to_string()).into());
        }

        let role = if self.accounts.is_empty() {
            info!(%username, "First account registered, forcing admin role");
            Role::Admin
        } else {
            role_choice.ok_or_else(|| CoreError::InvalidRole("unspecified".to_string()))?
        };

        let account = Account {
            username: username.to_string(),
            password_hash: hash_password(password)?,
            role,
        };

        self.accounts.push(account.clone());
        self.save()?;

        info!(%username, %role, "Registered account");
        Ok(account)
    }

    /// Authenticates a username/password pair.
    ///
    /// Scans all accounts and returns the first whose username matches
    /// and whose password verifies against the stored hash. `None` is
    /// the only failure signal (invalid credentials are not an error
    /// type - the CLI turns `None` into a message).
    pub fn authenticate(&self, username: &str, password: &str) -> Option<Account> {
        let username = username.trim();
        self.accounts
            .iter()
            .find(|a| a.username == username && verify_password(password, &a.password_hash))
            .cloned()
    }

    /// Rewrites the whole account file (pretty-printed JSON array).
    pub fn save(&self) -> StoreResult<()> {
        let json = serde_json::to_string_pretty(&self.accounts)?;
        fs::write(&self.path, json).map_err(|e| StoreError::io(&self.path, e))?;
        debug!(path = %self.path.display(), count = self.accounts.len(), "Saved account store");
        Ok(())
    }

    /// Checks whether no accounts are registered yet.
    ///
    /// The CLI uses this to skip the role prompt for the first account.
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Number of registered accounts.
    pub fn len(&self) -> usize {
        self.accounts.len()
    }
}

// =============================================================================
// Hashing Helpers
// =============================================================================

/// Hashes a password with argon2 and a fresh random salt.
///
/// Output is a self-describing PHC string (`$argon2id$...`) carrying the
/// salt and parameters, so verification needs no extra bookkeeping.
fn hash_password(password: &str) -> StoreResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| StoreError::Hashing(e.to_string()))?;
    Ok(hash.to_string())
}

/// Verifies a password against a stored PHC hash string.
///
/// An unparseable stored hash counts as "no match" (logged) rather than
/// an error: a mangled record must not lock up the login prompt.
fn verify_password(password: &str, stored_hash: &str) -> bool {
    match PasswordHash::new(stored_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(err) => {
            warn!(%err, "Stored password hash is malformed, treating as mismatch");
            false
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn store_in(dir: &tempfile::TempDir) -> AccountStore {
        AccountStore::load(dir.path().join("users.json")).unwrap()
    }

    #[test]
    fn test_first_registration_is_always_admin() {
        let dir = tempdir().unwrap();
        let mut store = store_in(&dir);

        // Explicitly asks for a plain user role; ignored for the first account
        let account = store.register("boss", "secret", Some(Role::User)).unwrap();
        assert_eq!(account.role, Role::Admin);
    }

    #[test]
    fn test_second_registration_requires_role_choice() {
        let dir = tempdir().unwrap();
        let mut store = store_in(&dir);
        store.register("boss", "secret", None).unwrap();

        let err = store.register("alice", "pw", None).unwrap_err();
        assert!(matches!(
            err,
            StoreError::Core(CoreError::InvalidRole(_))
        ));

        let account = store.register("alice", "pw", Some(Role::User)).unwrap();
        assert_eq!(account.role, Role::User);
    }

    #[test]
    fn test_duplicate_username_leaves_store_unchanged() {
        let dir = tempdir().unwrap();
        let mut store = store_in(&dir);
        store.register("boss", "secret", None).unwrap();

        let err = store.register("boss", "other", Some(Role::User)).unwrap_err();
        assert!(matches!(
            err,
            StoreError::Core(CoreError::DuplicateUsername(ref name)) if name == "boss"
        ));
        assert_eq!(store.len(), 1);

        // And the file still holds exactly one account
        let reloaded = store_in(&dir);
        assert_eq!(reloaded.len(), 1);
    }

    #[test]
    fn test_authenticate_round_trip() {
        let dir = tempdir().unwrap();
        let mut store = store_in(&dir);
        store.register("boss", "secret", None).unwrap();

        let account = store.authenticate("boss", "secret").unwrap();
        assert_eq!(account.username, "boss");
        assert_eq!(account.role, Role::Admin);

        assert!(store.authenticate("boss", "wrong").is_none());
        assert!(store.authenticate("nobody", "secret").is_none());
    }

    #[test]
    fn test_password_is_stored_hashed() {
        let dir = tempdir().unwrap();
        let mut store = store_in(&dir);
        store.register("boss", "secret", None).unwrap();

        let raw = std::fs::read_to_string(dir.path().join("users.json")).unwrap();
        assert!(!raw.contains("secret"));
        assert!(raw.contains("$argon2"));
        // Legacy field names on disk
        assert!(raw.contains("\"password\""));
        assert!(raw.contains("\"admin\""));
    }

    #[test]
    fn test_persists_across_reload() {
        let dir = tempdir().unwrap();
        let mut store = store_in(&dir);
        store.register("boss", "secret", None).unwrap();
        store.register("alice", "pw", Some(Role::User)).unwrap();

        let reloaded = store_in(&dir);
        assert_eq!(reloaded.len(), 2);
        assert!(reloaded.authenticate("alice", "pw").is_some());
    }

    #[test]
    fn test_corrupt_file_recovers_as_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("users.json");
        std::fs::write(&path, "{not json at all").unwrap();

        let mut store = AccountStore::load(&path).unwrap();
        assert!(store.is_empty());

        // The store stays usable; the next mutation replaces the file
        let account = store.register("boss", "secret", None).unwrap();
        assert_eq!(account.role, Role::Admin);
        assert!(AccountStore::load(&path).unwrap().authenticate("boss", "secret").is_some());
    }

    #[test]
    fn test_missing_file_is_a_normal_first_run() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);
        assert!(store.is_empty());
    }

    #[test]
    fn test_rejects_blank_username_and_password() {
        let dir = tempdir().unwrap();
        let mut store = store_in(&dir);

        assert!(store.register("   ", "pw", None).is_err());
        assert!(store.register("boss", "", None).is_err());
        assert!(store.is_empty());
    }
}
