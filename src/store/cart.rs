use super::{ListItem, PersistentVec, Storage};
use crate::{CatalogItem, ItemId, StoreError};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub const CART_KEY: &str = "toy-cart";

/// A cart line; also used as an order line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: ItemId,
    pub name: String,
    pub price: u32,
    #[serde(default)]
    pub emoji: String,
    pub quantity: u32,
}

impl CartItem {
    #[inline]
    pub fn subtotal(&self) -> u64 {
        u64::from(self.price) * u64::from(self.quantity)
    }
}

impl From<&CatalogItem> for CartItem {
    fn from(item: &CatalogItem) -> Self {
        Self {
            id: item.id,
            name: item.name.clone(),
            price: item.price,
            emoji: item.emoji.clone(),
            quantity: 1,
        }
    }
}

impl From<&ListItem> for CartItem {
    fn from(item: &ListItem) -> Self {
        Self {
            id: item.id,
            name: item.name.clone(),
            price: item.price,
            emoji: item.emoji.clone(),
            quantity: 1,
        }
    }
}

pub struct CartStore {
    inner: PersistentVec<CartItem>,
}

impl CartStore {
    pub fn open(storage: Arc<dyn Storage>) -> Result<Self, StoreError> {
        Ok(Self {
            inner: PersistentVec::open(storage, CART_KEY, Vec::new)?,
        })
    }

    pub fn items(&self) -> &[CartItem] {
        self.inner.items()
    }

    /// Adds one unit of `item`, merging with an existing line of the same id.
    pub fn add(&mut self, item: impl Into<CartItem>) -> Result<(), StoreError> {
        let item = item.into();
        self.inner.update(|items| {
            match items.iter_mut().find(|line| line.id == item.id) {
                Some(line) => line.quantity = line.quantity.saturating_add(1),
                None => items.push(CartItem { quantity: 1, ..item }),
            }
        })
    }

    /// Sets the quantity of a line; zero removes it. Unknown ids are ignored.
    pub fn update_quantity(&mut self, id: ItemId, quantity: u32) -> Result<(), StoreError> {
        self.inner.update(|items| {
            if quantity == 0 {
                items.retain(|line| line.id != id);
            } else if let Some(line) = items.iter_mut().find(|line| line.id == id) {
                line.quantity = quantity;
            }
        })
    }

    pub fn remove(&mut self, id: ItemId) -> Result<(), StoreError> {
        self.inner.update(|items| items.retain(|line| line.id != id))
    }

    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.inner.update(Vec::clear)
    }

    pub fn total(&self) -> u64 {
        self.items().iter().map(CartItem::subtotal).sum()
    }

    pub fn item_count(&self) -> u64 {
        self.items().iter().map(|line| u64::from(line.quantity)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.items().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample_catalog;
    use crate::store::{MemoryStorage, WishlistStore};

    #[test]
    fn test_add_merges_lines() {
        let mut cart = CartStore::open(MemoryStorage::shared()).unwrap();
        let bear = &sample_catalog()[0];
        cart.add(bear).unwrap();
        cart.add(bear).unwrap();
        cart.add(&sample_catalog()[8]).unwrap();

        assert_eq!(cart.items().len(), 2);
        assert_eq!(cart.items()[0].quantity, 2);
        assert_eq!(cart.item_count(), 3);
        assert_eq!(cart.total(), 2 * 1299 + 599);
    }

    #[test]
    fn test_update_quantity_and_remove() {
        let mut cart = CartStore::open(MemoryStorage::shared()).unwrap();
        cart.add(&sample_catalog()[0]).unwrap();
        cart.add(&sample_catalog()[1]).unwrap();

        cart.update_quantity(1, 4).unwrap();
        assert_eq!(cart.items()[0].quantity, 4);

        cart.update_quantity(1, 0).unwrap();
        assert_eq!(cart.items().len(), 1);

        cart.update_quantity(99, 3).unwrap();
        assert_eq!(cart.item_count(), 1);

        cart.remove(2).unwrap();
        assert!(cart.is_empty());
        assert_eq!(cart.total(), 0);
    }

    #[test]
    fn test_cart_survives_reopen() {
        let storage = MemoryStorage::shared();
        {
            let mut cart = CartStore::open(storage.clone()).unwrap();
            cart.add(&sample_catalog()[3]).unwrap();
        }
        let cart = CartStore::open(storage.clone()).unwrap();
        assert_eq!(cart.items()[0].name, "Машинка на радиоуправлении");

        let mut cart = cart;
        cart.clear().unwrap();
        assert_eq!(storage.load(CART_KEY).unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_add_from_wishlist() {
        let storage = MemoryStorage::shared();
        let mut wishlist = WishlistStore::open(storage.clone()).unwrap();
        wishlist.add(&sample_catalog()[11]).unwrap();
        let mut cart = CartStore::open(storage).unwrap();

        let saved = &wishlist.items()[0];
        cart.add(saved).unwrap();
        assert_eq!(cart.items()[0].quantity, 1);
        assert_eq!(cart.items()[0].name, "Мягкий единорог");
        assert_eq!(cart.items()[0].emoji, "🦄");

        // merges with the same toy added from the wishlist or the catalog
        cart.add(saved).unwrap();
        cart.add(&sample_catalog()[11]).unwrap();
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].quantity, 3);
        assert_eq!(cart.total(), 3 * 1499);
    }

    #[test]
    fn test_quantities_saturate() {
        let mut cart = CartStore::open(MemoryStorage::shared()).unwrap();
        cart.add(&sample_catalog()[0]).unwrap();
        cart.add(&sample_catalog()[1]).unwrap();
        cart.update_quantity(1, u32::MAX).unwrap();
        cart.update_quantity(2, u32::MAX).unwrap();

        cart.add(&sample_catalog()[0]).unwrap();
        assert_eq!(cart.items()[0].quantity, u32::MAX);
        assert_eq!(cart.item_count(), 2 * u64::from(u32::MAX));
        assert_eq!(cart.total(), (1299 + 2499) * u64::from(u32::MAX));
    }
}
