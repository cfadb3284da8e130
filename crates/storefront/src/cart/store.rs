//! Cart persistence on top of a shared key-value store.
//!
//! The whole cart lives in one slot ([`CART_KEY`]) as a JSON array of
//! [`CartEntry`]. Every mutation reads the full array and writes it back.
//! [`CartStore`] funnels those read-modify-write cycles through a single writer
//! lock and is the only place that enforces one entry per product.

use std::collections::HashMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use souk_core::{CartEntry, Product, ProductId};
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::debug;

use super::CartError;

/// Key of the slot holding the serialized cart.
pub const CART_KEY: &str = "cart-products";

/// Errors raised by a [`KeyValueStore`] backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing file is not a JSON object of strings.
    #[error("Corrupt store file: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// A string-keyed store of string values, rewritten a whole value at a time.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Replace the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

// =============================================================================
// MemoryStore
// =============================================================================

/// In-process key-value store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slots: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let slots = self.slots.read().unwrap_or_else(PoisonError::into_inner);
        Ok(slots.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut slots = self.slots.write().unwrap_or_else(PoisonError::into_inner);
        slots.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

// =============================================================================
// FileStore
// =============================================================================

/// Key-value store persisted as a single JSON object on disk.
///
/// A missing file reads as an empty store. Each write goes to a fresh
/// temporary file in the same directory which is then persisted over the
/// original, so readers never observe a half-written file.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStore {
    /// Open (lazily) the store at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Location of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_slots(&self) -> Result<HashMap<String, String>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) if contents.trim().is_empty() => Ok(HashMap::new()),
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn write_slots(&self, slots: &HashMap<String, String>) -> Result<(), StoreError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        // Uniquely named per write, so concurrent writers never share a temp file.
        let mut tmp = NamedTempFile::new_in(dir)?;
        serde_json::to_writer_pretty(&mut tmp, slots)?;
        tmp.flush()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(self.read_slots()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut slots = self.read_slots()?;
        slots.insert(key.to_string(), value.to_string());
        self.write_slots(&slots)
    }
}

// =============================================================================
// CartStore
// =============================================================================

/// The persisted cart.
///
/// Cheaply cloneable; clones share the backend and the writer lock.
#[derive(Clone)]
pub struct CartStore {
    inner: Arc<CartStoreInner>,
}

struct CartStoreInner {
    backend: Arc<dyn KeyValueStore>,
    write_lock: Mutex<()>,
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("key", &CART_KEY)
            .finish_non_exhaustive()
    }
}

impl CartStore {
    /// Wrap a key-value backend.
    #[must_use]
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self {
            inner: Arc::new(CartStoreInner {
                backend,
                write_lock: Mutex::new(()),
            }),
        }
    }

    /// Write an empty cart if the slot does not exist yet.
    ///
    /// Every other operation requires the slot to exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    pub fn ensure_initialized(&self) -> Result<(), CartError> {
        let _guard = self.write_guard();
        if self.inner.backend.get(CART_KEY)?.is_none() {
            debug!(key = CART_KEY, "Initializing empty cart");
            self.write_entries(&[])?;
        }
        Ok(())
    }

    /// Read every entry, in stored order.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::MissingStore`] if the slot is absent and
    /// [`CartError::Parse`] if it does not hold a cart.
    pub fn load(&self) -> Result<Vec<CartEntry>, CartError> {
        self.read_entries()
    }

    /// Replace the whole cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    pub fn save(&self, entries: &[CartEntry]) -> Result<(), CartError> {
        let _guard = self.write_guard();
        self.write_entries(entries)
    }

    /// Put `quantity` units of `product` in the cart.
    ///
    /// Increments the existing line for the product if there is one, otherwise
    /// appends a new line. Returns the resulting line.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart cannot be read or written.
    pub fn add(&self, product: Product, quantity: u32) -> Result<CartEntry, CartError> {
        let quantity = quantity.max(1);
        self.modify(|entries| {
            if let Some(existing) = entries.iter_mut().find(|e| e.product.id == product.id) {
                existing.quantity = existing.quantity.saturating_add(quantity);
                existing.clone()
            } else {
                let entry = CartEntry::new(product, quantity);
                entries.push(entry.clone());
                entry
            }
        })
    }

    /// Drop any line for `entry`'s product and append `entry`.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart cannot be read or written.
    pub fn upsert(&self, entry: &CartEntry) -> Result<(), CartError> {
        self.modify(|entries| {
            entries.retain(|e| e.product.id != entry.product.id);
            entries.push(entry.clone());
        })
    }

    /// Drop the line for `product_id`, leaving the others in order.
    ///
    /// Returns whether a line was dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart cannot be read or written.
    pub fn remove(&self, product_id: &ProductId) -> Result<bool, CartError> {
        self.modify(|entries| {
            let before = entries.len();
            entries.retain(|e| &e.product.id != product_id);
            entries.len() != before
        })
    }

    /// Read, mutate and write back the cart under the writer lock.
    fn modify<T>(&self, f: impl FnOnce(&mut Vec<CartEntry>) -> T) -> Result<T, CartError> {
        let _guard = self.write_guard();
        let mut entries = self.read_entries()?;
        let result = f(&mut entries);
        self.write_entries(&entries)?;
        Ok(result)
    }

    fn write_guard(&self) -> std::sync::MutexGuard<'_, ()> {
        self.inner
            .write_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn read_entries(&self) -> Result<Vec<CartEntry>, CartError> {
        let raw = self
            .inner
            .backend
            .get(CART_KEY)?
            .ok_or(CartError::MissingStore(CART_KEY))?;
        serde_json::from_str(&raw).map_err(CartError::Parse)
    }

    fn write_entries(&self, entries: &[CartEntry]) -> Result<(), CartError> {
        let raw = serde_json::to_string(entries).map_err(CartError::Encode)?;
        self.inner.backend.set(CART_KEY, &raw)?;
        debug!(entries = entries.len(), "Cart written");
        Ok(())
    }
}
