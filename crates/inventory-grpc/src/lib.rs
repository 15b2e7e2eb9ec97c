//! Inventory gRPC Service
//!
//! A gRPC service exposing an in-memory inventory list, plus the clients
//! that call it.
//!
//! # Architecture
//!
//! The server owns one [`InventoryStore`](inventory::InventoryStore) and
//! answers two unary calls: `AddItem` appends an item and replies with a
//! boolean, `GetItems` replies with a copy of the whole collection.
//!
//! Clients come in two flavours. [`InventoryClient`] is the async client.
//! [`BlockingInventoryClient`] owns its own runtime so that plain threads can
//! block on `add_item` while retrieval is dispatched in the background and
//! reported through an [`ItemsObserver`].
//!
//! # Example Flow
//!
//! ```text
//! Client                                    Server
//! │                                           │
//! │  AddItem{id: "1234", name: "New Item"}    │
//! │ ─────────────────────────────────────────>│
//! │                                           │
//! │       BoolResult{value: true}             │
//! │<───────────────────────────────────────── │
//! │                                           │
//! │  GetItems{}                  (dispatched) │
//! │ ─────────────────────────────────────────>│
//! │                                           │
//! │       Items{items: [001, 002, 003, 1234]} │
//! │<───────────────────────────────────────── │
//! │                                           │
//! │  on_next(items), on_completed()           │
//! ```

use std::time::Duration;

pub mod proto {
    #![allow(missing_docs)]
    #![allow(clippy::doc_markdown)]
    tonic::include_proto!("inventory.v1");
}

mod client;
mod convert;
mod error;
mod observer;
mod server;

pub use client::{BlockingInventoryClient, CallHandle, InventoryClient, add_new_item};
pub use error::{ClientError, ServerError};
pub use observer::{ItemsObserver, LoggingObserver};
pub use server::{InventoryServer, InventoryService};

// Re-export proto types for convenience
pub use proto::{
    inventory_service_client::InventoryServiceClient,
    inventory_service_server::InventoryServiceServer as InventoryGrpcServer,
};

/// Host the client connects to by default.
pub const DEFAULT_HOST: &str = "localhost";

/// Port the service listens on by default.
pub const DEFAULT_PORT: u16 = 50551;

/// How long client shutdown waits for in-flight calls to drain.
pub const SHUTDOWN_GRACE: Duration = Duration::from_secs(5);
