//! Inventory: the in-memory item collection behind the inventory RPC service.
//!
//! The store is an append-only list of [`Item`]s. It starts out with a fixed
//! seed set, grows by one entry per add, and hands out whole-collection
//! snapshots on read. Items are never updated or removed.

mod item;
mod store;

pub use item::{Item, seed_items};
pub use store::{InventoryStore, ItemStore, StoreError};
