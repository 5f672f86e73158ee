//! # Store Paths
//!
//! Locations of the two flat files. Kept in one place so tests (and any
//! future packaging change) can redirect the whole data set at once.

use std::path::{Path, PathBuf};

/// Locations of the account and inventory files.
#[derive(Debug, Clone)]
pub struct StorePaths {
    pub accounts: PathBuf,
    pub inventory: PathBuf,
}

impl StorePaths {
    /// Both files inside the given directory, with the default names.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        StorePaths {
            accounts: dir.join("users.json"),
            inventory: dir.join("inventory.json"),
        }
    }
}

/// Default: both files in the working directory.
impl Default for StorePaths {
    fn default() -> Self {
        StorePaths {
            accounts: PathBuf::from("users.json"),
            inventory: PathBuf::from("inventory.json"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_dir_joins_both_files() {
        let paths = StorePaths::in_dir("/tmp/shop");
        assert_eq!(paths.accounts, PathBuf::from("/tmp/shop/users.json"));
        assert_eq!(paths.inventory, PathBuf::from("/tmp/shop/inventory.json"));
    }
}
