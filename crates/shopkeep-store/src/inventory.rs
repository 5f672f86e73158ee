//! # Inventory Store
//!
//! File mirror around the core [`Inventory`] map.
//!
//! ## On-Disk Shape (legacy format, kept byte-compatible)
//! ```json
//! {
//!     "1": {
//!         "product": {
//!             "name": "Cola",
//!             "product_id": 1,
//!             "price": 2.5,
//!             "discount": 10.0
//!         },
//!         "quantity": 7
//!     }
//! }
//! ```
//!
//! ## The DTO Boundary
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │   In memory (core)                On disk (this module)             │
//! │   ───────────────                 ─────────────────────             │
//! │   Money      250 cents      ◄──►  price     2.5   (decimal)         │
//! │   Discount  1000 bps        ◄──►  discount 10.0   (percent)         │
//! │   key       u32             ◄──►  key      "1"    (string)          │
//! │                                                                     │
//! │   Floats exist ONLY here. Every conversion rounds exactly once.     │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use shopkeep_core::{
    Account, Cart, DiscountRate, Inventory, Money, Product, Receipt, StockEntry, StockView,
};

use crate::error::{StoreError, StoreResult};

// =============================================================================
// On-Disk Records
// =============================================================================

/// Product as stored in the inventory file.
///
/// Field order matches the legacy writer: name first, then id, price,
/// discount. `price` is a 2-decimal amount, `discount` a percentage.
#[derive(Debug, Serialize, Deserialize)]
struct ProductRecord {
    name: String,
    product_id: u32,
    price: f64,
    discount: f64,
}

impl From<&Product> for ProductRecord {
    fn from(product: &Product) -> Self {
        ProductRecord {
            name: product.name.clone(),
            product_id: product.product_id,
            price: product.price.cents() as f64 / 100.0,
            discount: product.discount.percentage(),
        }
    }
}

impl ProductRecord {
    /// Converts back to the integer-cents domain type.
    ///
    /// Rounds half-up at the cent / basis point; a hand-edited file with
    /// extra decimals loses them here, once.
    fn into_product(self) -> Product {
        Product {
            product_id: self.product_id,
            name: self.name,
            price: Money::from_cents((self.price * 100.0).round() as i64),
            discount: DiscountRate::from_percentage(self.discount),
        }
    }
}

/// One inventory file entry: a product plus its on-hand quantity.
#[derive(Debug, Serialize, Deserialize)]
struct StockRecord {
    product: ProductRecord,
    quantity: i64,
}

// =============================================================================
// Inventory Store
// =============================================================================

/// The inventory store: core map plus its file mirror.
///
/// Every mutating call rewrites the whole file on success. Reads never
/// touch the disk after load.
#[derive(Debug)]
pub struct InventoryStore {
    inventory: Inventory,
    path: PathBuf,
}

impl InventoryStore {
    /// Loads the store from `path`.
    ///
    /// ## Recovery Behavior
    /// Missing file → empty. Malformed JSON, a non-numeric product-id
    /// key, or a discount outside [0, 100] → logged at warn, empty
    /// store. Other read failures propagate.
    pub fn load(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();

        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Ok(InventoryStore {
                    inventory: Inventory::new(),
                    path,
                });
            }
            Err(err) => return Err(StoreError::io(path, err)),
        };

        let inventory = match parse_inventory(&raw) {
            Some(inventory) => inventory,
            None => {
                warn!(path = %path.display(), "Inventory file is corrupted, starting with an empty store");
                Inventory::new()
            }
        };

        debug!(path = %path.display(), products = inventory.len(), "Loaded inventory store");
        Ok(InventoryStore { inventory, path })
    }

    /// Adds stock (admin only) and persists the whole store on success.
    pub fn add_stock(
        &mut self,
        product: Product,
        quantity: i64,
        requester: &Account,
    ) -> StoreResult<()> {
        let product_id = product.product_id;
        self.inventory.add_stock(product, quantity, requester)?;
        self.save()?;
        info!(
            product_id,
            quantity,
            requester = %requester.username,
            "Stock added"
        );
        Ok(())
    }

    /// Checks the cart out against the inventory and persists the
    /// decremented stock. The cart is drained only on success.
    pub fn checkout(&mut self, cart: &mut Cart) -> StoreResult<Receipt> {
        let receipt = self.inventory.checkout(cart)?;
        self.save()?;
        info!(
            lines = receipt.lines.len(),
            total = %receipt.total,
            "Checkout completed"
        );
        Ok(receipt)
    }

    /// Read-only projection for display.
    pub fn list(&self) -> Vec<StockView> {
        self.inventory.list()
    }

    /// Looks up a single stock entry.
    pub fn lookup(&self, product_id: u32) -> Option<&StockEntry> {
        self.inventory.lookup(product_id)
    }

    /// Direct access to the in-memory map (tests, diagnostics).
    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    /// Rewrites the whole inventory file (pretty-printed).
    pub fn save(&self) -> StoreResult<()> {
        let records: BTreeMap<String, StockRecord> = self
            .inventory
            .entries()
            .map(|entry| {
                (
                    entry.product.product_id.to_string(),
                    StockRecord {
                        product: ProductRecord::from(&entry.product),
                        quantity: entry.quantity,
                    },
                )
            })
            .collect();

        let json = serde_json::to_string_pretty(&records)?;
        fs::write(&self.path, json).map_err(|e| StoreError::io(&self.path, e))?;
        debug!(path = %self.path.display(), products = records.len(), "Saved inventory store");
        Ok(())
    }
}

/// Parses the legacy file shape. `None` means "treat as corrupt".
fn parse_inventory(raw: &str) -> Option<Inventory> {
    let records: BTreeMap<String, StockRecord> = serde_json::from_str(raw).ok()?;

    let mut entries = Vec::with_capacity(records.len());
    for (key, record) in records {
        // The JSON key is authoritative for the map; it must agree with
        // a parseable integer. The embedded product_id travels along.
        let product_id: u32 = key.parse().ok()?;

        // A discount outside [0, 100] would bypass validate_discount
        // (which only guards the mutation path) and render negative
        // prices. Same treatment as an unparseable key.
        if !(0.0..=100.0).contains(&record.product.discount) {
            return None;
        }
        let mut product = record.product.into_product();
        product.product_id = product_id;
        entries.push(StockEntry {
            product,
            quantity: record.quantity,
        });
    }

    Some(Inventory::from_entries(entries))
}

// =============================================================================
// Unit Tests
// =============================================================================
