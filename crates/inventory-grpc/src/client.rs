//! Async and blocking clients for the Inventory service.

use std::sync::{Mutex, PoisonError};

use inventory::Item;
use tokio::runtime::Runtime;
use tokio::sync::oneshot;
use tokio::task::JoinSet;
use tonic::transport::{Channel, Endpoint};

use crate::SHUTDOWN_GRACE;
use crate::error::ClientError;
use crate::observer::ItemsObserver;
use crate::proto::{self, Empty, inventory_service_client::InventoryServiceClient};

/// Async client for the Inventory service.
///
/// Cloning is cheap; clones share the underlying channel.
#[derive(Debug, Clone)]
pub struct InventoryClient {
    inner: InventoryServiceClient<Channel>,
}

impl InventoryClient {
    /// Create a plaintext client for `host:port`.
    ///
    /// The connection is made lazily on the first call, so an unreachable
    /// server shows up as a failed call rather than a failed connect.
    pub async fn connect(host: &str, port: u16) -> Result<Self, ClientError> {
        let uri = endpoint_uri(host, port);
        let endpoint = Endpoint::from_shared(uri.clone())
            .map_err(|e| ClientError::InvalidEndpoint(format!("{}: {}", uri, e)))?;
        tracing::debug!("Using endpoint {}", uri);
        Ok(Self::from_channel(endpoint.connect_lazy()))
    }

    /// Wrap an existing channel.
    pub fn from_channel(channel: Channel) -> Self {
        Self {
            inner: InventoryServiceClient::new(channel),
        }
    }

    /// Add an item. `Ok(false)` means the server could not store it.
    pub async fn add_item(&self, item: Item) -> Result<bool, ClientError> {
        let mut client = self.inner.clone();
        let reply = client.add_item(proto::Item::from(item)).await?;
        Ok(reply.into_inner().value)
    }

    /// Fetch the whole collection.
    pub async fn get_items(&self) -> Result<Vec<Item>, ClientError> {
        let mut client = self.inner.clone();
        let reply = client.get_items(Empty {}).await?;
        Ok(reply.into_inner().into())
    }

    /// Dispatch a `GetItems` call and report it to `observer`.
    ///
    /// Returns immediately. Must be called from within a Tokio runtime.
    pub fn get_items_with<O: ItemsObserver>(&self, observer: O) -> CallHandle {
        let (done_tx, done_rx) = oneshot::channel();
        tokio::spawn(observe_items(self.clone(), observer, done_tx));
        CallHandle { done: done_rx }
    }
}

/// Plaintext URI for `host:port`; IPv6 literals get brackets.
fn endpoint_uri(host: &str, port: u16) -> String {
    if host.contains(':') && !host.starts_with('[') {
        format!("http://[{}]:{}", host, port)
    } else {
        format!("http://{}:{}", host, port)
    }
}

/// Run one `GetItems` call, feed the observer, then signal the outcome.
async fn observe_items<O: ItemsObserver>(
    client: InventoryClient,
    mut observer: O,
    done: oneshot::Sender<Result<(), ClientError>>,
) {
    let mut inner = client.inner;
    let outcome = match inner.get_items(Empty {}).await {
        Ok(reply) => {
            observer.on_next(reply.into_inner().into());
            observer.on_completed();
            Ok(())
        }
        Err(status) => {
            observer.on_error(&status);
            Err(ClientError::from(status))
        }
    };

    // The caller may have dropped its handle
    let _ = done.send(outcome);
}

/// Completion signal for a dispatched call.
#[derive(Debug)]
pub struct CallHandle {
    done: oneshot::Receiver<Result<(), ClientError>>,
}

impl CallHandle {
    /// Block the current thread until the call has finished.
    ///
    /// Must not be called from within an async context.
    pub fn wait(self) -> Result<(), ClientError> {
        self.done.blocking_recv().unwrap_or(Err(ClientError::Dropped))
    }

    /// Wait for the call to finish.
    pub async fn completed(self) -> Result<(), ClientError> {
        self.done.await.unwrap_or(Err(ClientError::Dropped))
    }
}

/// Client for callers that are not running inside an async runtime.
///
/// Owns a Tokio runtime. Unary calls block the calling thread; dispatched
/// calls run on the runtime's worker threads.
#[derive(Debug)]
pub struct BlockingInventoryClient {
    client: InventoryClient,
    in_flight: Mutex<JoinSet<()>>,
    runtime: Runtime,
}

impl BlockingInventoryClient {
    /// Create a plaintext client for `host:port`.
    ///
    /// Panics if called from within an async context.
    pub fn connect(host: &str, port: u16) -> Result<Self, ClientError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .map_err(ClientError::Runtime)?;
        let client = runtime.block_on(InventoryClient::connect(host, port))?;
        Ok(Self {
            client,
            in_flight: Mutex::new(JoinSet::new()),
            runtime,
        })
    }

    /// Add an item, blocking until the server replies.
    pub fn add_item(&self, item: Item) -> Result<bool, ClientError> {
        self.runtime.block_on(self.client.add_item(item))
    }

    /// Fetch the whole collection, blocking until the server replies.
    pub fn get_items(&self) -> Result<Vec<Item>, ClientError> {
        self.runtime.block_on(self.client.get_items())
    }

    /// Dispatch a `GetItems` call without blocking.
    ///
    /// `observer` runs on a runtime worker thread. Use the returned handle to
    /// wait for the call to finish.
    pub fn get_items_with<O: ItemsObserver>(&self, observer: O) -> CallHandle {
        let (done_tx, done_rx) = oneshot::channel();
        let mut in_flight = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
        while in_flight.try_join_next().is_some() {}
        in_flight.spawn_on(
            observe_items(self.client.clone(), observer, done_tx),
            self.runtime.handle(),
        );
        CallHandle { done: done_rx }
    }

    /// Close the channel, giving in-flight calls up to [`SHUTDOWN_GRACE`] to
    /// finish. Calls still running after that are cancelled.
    pub fn shutdown(self) {
        let Self {
            client,
            in_flight,
            runtime,
        } = self;
        drop(client);

        let mut in_flight = in_flight.into_inner().unwrap_or_else(PoisonError::into_inner);
        let drained = runtime.block_on(async {
            tokio::time::timeout(SHUTDOWN_GRACE, async {
                while in_flight.join_next().await.is_some() {}
            })
            .await
        });
        if drained.is_err() {
            tracing::warn!(
                "{} calls still in flight after {:?}, cancelling",
                in_flight.len(),
                SHUTDOWN_GRACE
            );
        }

        drop(in_flight);
        runtime.shutdown_background();
        tracing::info!("Channel closed");
    }
}

/// Add `item` and log the outcome.
///
/// Transport failures are logged and swallowed. Returns whether the item
/// was added.
pub fn add_new_item(client: &BlockingInventoryClient, item: Item) -> bool {
    tracing::info!("Adding new inventory item {}", item);

    match client.add_item(item.clone()) {
        Ok(true) => {
            tracing::info!("Successfully added item {}", item);
            true
        }
        Ok(false) => {
            tracing::warn!("Failed to add item {}", item);
            false
        }
        Err(e) => {
            tracing::warn!("{}", e);
            false
        }
    }
}
