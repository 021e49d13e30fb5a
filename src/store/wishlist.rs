use super::{PersistentVec, Storage};
use crate::{CatalogItem, ItemId, StoreError};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub const WISHLIST_KEY: &str = "toy-wishlist";

/// Product snapshot kept by the wishlist and compare stores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListItem {
    pub id: ItemId,
    pub name: String,
    pub price: u32,
    #[serde(default)]
    pub emoji: String,
    pub category: String,
    pub age_group: String,
    pub in_stock: bool,
}

impl From<&CatalogItem> for ListItem {
    fn from(item: &CatalogItem) -> Self {
        Self {
            id: item.id,
            name: item.name.clone(),
            price: item.price,
            emoji: item.emoji.clone(),
            category: item.category.clone(),
            age_group: item.age_group.clone(),
            in_stock: item.in_stock,
        }
    }
}

pub struct WishlistStore {
    inner: PersistentVec<ListItem>,
}

impl WishlistStore {
    pub fn open(storage: Arc<dyn Storage>) -> Result<Self, StoreError> {
        Ok(Self {
            inner: PersistentVec::open(storage, WISHLIST_KEY, Vec::new)?,
        })
    }

    pub fn items(&self) -> &[ListItem] {
        self.inner.items()
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.items().iter().any(|i| i.id == id)
    }

    /// Returns `false` when the item was already present.
    pub fn add(&mut self, item: impl Into<ListItem>) -> Result<bool, StoreError> {
        let item = item.into();
        if self.contains(item.id) {
            return Ok(false);
        }
        self.inner.update(|items| items.push(item))?;
        Ok(true)
    }

    pub fn remove(&mut self, id: ItemId) -> Result<(), StoreError> {
        self.inner.update(|items| items.retain(|i| i.id != id))
    }

    /// Adds or removes; returns whether the item is in the wishlist afterwards.
    pub fn toggle(&mut self, item: impl Into<ListItem>) -> Result<bool, StoreError> {
        let item = item.into();
        if self.contains(item.id) {
            self.remove(item.id)?;
            Ok(false)
        } else {
            self.add(item)
        }
    }

    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.inner.update(Vec::clear)
    }
}
