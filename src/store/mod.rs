//! Storefront state stores.
//!
//! Every store owns one storage key, loads its snapshot when opened and
//! writes the whole collection back after each mutation. Stores share a
//! single [`Storage`] backend through an `Arc`.

mod cart;
mod checkout;
mod compare;
mod orders;
mod reviews;
mod wishlist;

pub use cart::{CART_KEY, CartItem, CartStore};
pub use checkout::checkout;
pub use compare::{COMPARE_CAPACITY, COMPARE_KEY, CompareStore};
pub use orders::{CustomerInfo, ORDERS_KEY, Order, OrderStatus, OrderStore, PaymentMethod};
pub use reviews::{REVIEWS_KEY, RatingSummary, Review, ReviewStore};
pub use wishlist::{ListItem, WISHLIST_KEY, WishlistStore};

use crate::StoreError;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

/// String key/value storage, last write wins.
pub trait Storage: Send + Sync {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn save(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> Arc<dyn Storage> {
        Arc::new(Self::new())
    }
}

impl Storage for MemoryStorage {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        let entries = self.entries.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().map_err(|_| StoreError::Poisoned)?;
        entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().map_err(|_| StoreError::Poisoned)?;
        entries.remove(key);
        Ok(())
    }
}

/// One `<key>.json` file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let dir = dir.as_ref().to_path_buf();
        if !dir.exists() {
            fs::create_dir_all(&dir)?;
            debug!("created storage directory {}", dir.display());
        }
        Ok(Self { dir })
    }

    fn path(&self, key: &str) -> Result<PathBuf, StoreError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StoreError::InvalidKey(key.to_owned()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl Storage for FileStorage {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path(key)?;
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(path)?))
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path(key)?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let path = self.path(key)?;
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}

/// A collection mirrored to one storage key.
pub(crate) struct PersistentVec<T> {
    key: &'static str,
    storage: Arc<dyn Storage>,
    items: Vec<T>,
}

impl<T: Clone + Serialize + DeserializeOwned> PersistentVec<T> {
    /// Loads the snapshot under `key`. A missing or unreadable snapshot
    /// starts from `default()`.
    pub(crate) fn open(
        storage: Arc<dyn Storage>,
        key: &'static str,
        default: impl FnOnce() -> Vec<T>,
    ) -> Result<Self, StoreError> {
        let items = match storage.load(key)? {
            Some(raw) => match serde_json::from_str(&raw) {
                Ok(items) => items,
                Err(err) => {
                    warn!(key, %err, "discarding corrupt snapshot");
                    default()
                }
            },
            None => default(),
        };
        debug!(key, items = items.len(), "store opened");
        Ok(Self {
            key,
            storage,
            items,
        })
    }

    #[inline]
    pub(crate) fn items(&self) -> &[T] {
        &self.items
    }

    /// Applies `f` to a copy of the collection. The copy replaces the
    /// in-memory items only once it has been saved.
    pub(crate) fn update<R>(&mut self, f: impl FnOnce(&mut Vec<T>) -> R) -> Result<R, StoreError> {
        let mut next = self.items.clone();
        let out = f(&mut next);
        self.write(&next)?;
        self.items = next;
        Ok(out)
    }

    fn write(&self, items: &[T]) -> Result<(), StoreError> {
        let raw = serde_json::to_string(items)?;
        self.storage.save(self.key, &raw)?;
        debug!(key = self.key, items = items.len(), "store flushed");
        Ok(())
    }
}

#[cfg(test)]
pub(crate) fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

/// Memory storage whose saves to one key can be made to fail.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct FailingStorage {
    inner: MemoryStorage,
    failing: Mutex<Option<&'static str>>,
}

#[cfg(test)]
impl FailingStorage {
    pub(crate) fn fail_saves(&self, key: &'static str) {
        *self.failing.lock().unwrap() = Some(key);
    }
}

#[cfg(test)]
impl Storage for FailingStorage {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.inner.load(key)
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StoreError> {
        if *self.failing.lock().unwrap() == Some(key) {
            return Err(std::io::Error::other("disk full").into());
        }
        self.inner.save(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.inner.remove(key)
    }
}
