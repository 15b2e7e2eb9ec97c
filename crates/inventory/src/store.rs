//! Append-only item store.

use std::fmt;
use std::io::Read;
use std::sync::RwLock;

use thiserror::Error;

use crate::item::{Item, seed_items};

/// Errors that can occur while using the store
#[derive(Debug, Error)]
pub enum StoreError {
    /// A writer panicked while holding the lock
    #[error("inventory lock poisoned")]
    Poisoned,
    /// The seed set could not be parsed
    #[error("invalid seed data: {0}")]
    Seed(#[from] serde_json::Error),
}

/// Storage backing the inventory service.
///
/// `add` only ever appends; `snapshot` returns the collection in insertion
/// order.
pub trait ItemStore: Send + Sync + fmt::Debug {
    /// Append an item.
    fn add(&self, item: Item) -> Result<(), StoreError>;

    /// Copy of the current collection in insertion order.
    fn snapshot(&self) -> Result<Vec<Item>, StoreError>;
}

/// The authoritative item collection.
///
/// Appends take the write lock; reads take the read lock and copy the whole
/// collection out, so a snapshot never observes a later append.
#[derive(Debug)]
pub struct InventoryStore {
    items: RwLock<Vec<Item>>,
}

impl InventoryStore {
    /// Create a store holding the fixed seed items.
    pub fn seeded() -> Self {
        Self::with_items(seed_items())
    }

    /// Create a store holding `items`, in order.
    pub fn with_items(items: Vec<Item>) -> Self {
        Self {
            items: RwLock::new(items),
        }
    }

    /// Create a store from a JSON array of items.
    pub fn from_json_reader(reader: impl Read) -> Result<Self, StoreError> {
        let items: Vec<Item> = serde_json::from_reader(reader)?;
        tracing::debug!("Loaded {} seed items", items.len());
        Ok(Self::with_items(items))
    }

    /// Append an item. Duplicates are kept.
    pub fn add(&self, item: Item) -> Result<(), StoreError> {
        let mut items = self.items.write().map_err(|_| StoreError::Poisoned)?;
        items.push(item);
        Ok(())
    }

    /// Copy of the current collection in insertion order.
    pub fn snapshot(&self) -> Result<Vec<Item>, StoreError> {
        let items = self.items.read().map_err(|_| StoreError::Poisoned)?;
        Ok(items.clone())
    }

    /// Number of items currently held.
    pub fn len(&self) -> Result<usize, StoreError> {
        let items = self.items.read().map_err(|_| StoreError::Poisoned)?;
        Ok(items.len())
    }

    /// Whether the store holds no items.
    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }
}

impl ItemStore for InventoryStore {
    fn add(&self, item: Item) -> Result<(), StoreError> {
        InventoryStore::add(self, item)
    }

    fn snapshot(&self) -> Result<Vec<Item>, StoreError> {
        InventoryStore::snapshot(self)
    }
}

impl Default for InventoryStore {
    fn default() -> Self {
        Self::seeded()
    }
}
