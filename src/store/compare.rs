use super::{ListItem, PersistentVec, Storage};
use crate::{ItemId, StoreError};
use std::sync::Arc;

pub const COMPARE_KEY: &str = "toy-compare";
pub const COMPARE_CAPACITY: usize = 4;

/// Side-by-side comparison list with a fixed capacity.
pub struct CompareStore {
    inner: PersistentVec<ListItem>,
    capacity: usize,
}

impl CompareStore {
    pub fn open(storage: Arc<dyn Storage>) -> Result<Self, StoreError> {
        Self::with_capacity(storage, COMPARE_CAPACITY)
    }

    pub fn with_capacity(storage: Arc<dyn Storage>, capacity: usize) -> Result<Self, StoreError> {
        Ok(Self {
            inner: PersistentVec::open(storage, COMPARE_KEY, Vec::new)?,
            capacity,
        })
    }

    pub fn items(&self) -> &[ListItem] {
        self.inner.items()
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.items().iter().any(|i| i.id == id)
    }

    pub fn is_full(&self) -> bool {
        self.items().len() >= self.capacity
    }

    /// Returns `false` when the item is already listed or the list is full.
    pub fn add(&mut self, item: impl Into<ListItem>) -> Result<bool, StoreError> {
        let item = item.into();
        if self.contains(item.id) || self.is_full() {
            return Ok(false);
        }
        self.inner.update(|items| items.push(item))?;
        Ok(true)
    }

    pub fn remove(&mut self, id: ItemId) -> Result<(), StoreError> {
        self.inner.update(|items| items.retain(|i| i.id != id))
    }

    /// Returns whether the item is listed afterwards.
    pub fn toggle(&mut self, item: impl Into<ListItem>) -> Result<bool, StoreError> {
        let item = item.into();
        if self.contains(item.id) {
            self.remove(item.id)?;
            return Ok(false);
        }
        self.add(item)
    }

    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.inner.update(Vec::clear)
    }
}
