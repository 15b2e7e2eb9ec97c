//! gRPC server implementation for the Inventory service.

use std::net::SocketAddr;
use std::sync::Arc;

use inventory::{InventoryStore, Item, ItemStore};
use tokio::net::TcpListener;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::{Request, Response, Status};

use crate::error::ServerError;
use crate::proto::{self, BoolResult, Empty, Items};

/// The Inventory gRPC service implementation.
#[derive(Clone, Debug)]
pub struct InventoryService {
    store: Arc<dyn ItemStore>,
}

impl InventoryService {
    /// Create a service holding the seed items.
    pub fn new() -> Self {
        Self::with_store(Arc::new(InventoryStore::seeded()))
    }

    /// Create a service backed by an existing store.
    pub fn with_store(store: Arc<dyn ItemStore>) -> Self {
        Self { store }
    }

    /// The store this service reads and appends to.
    pub fn store(&self) -> &Arc<dyn ItemStore> {
        &self.store
    }
}

impl Default for InventoryService {
    fn default() -> Self {
        Self::new()
    }
}

#[tonic::async_trait]
impl proto::inventory_service_server::InventoryService for InventoryService {
    async fn add_item(
        &self,
        request: Request<proto::Item>,
    ) -> Result<Response<BoolResult>, Status> {
        let item = Item::from(request.into_inner());

        // A failed append is reported in-band, not as a gRPC error
        let value = match self.store.add(item.clone()) {
            Ok(()) => {
                tracing::info!("Added new item: {}", item);
                true
            }
            Err(e) => {
                tracing::warn!("Failed to add item {}: {}", item.id, e);
                false
            }
        };

        Ok(Response::new(BoolResult { value }))
    }

    async fn get_items(&self, _request: Request<Empty>) -> Result<Response<Items>, Status> {
        let items = self.store.snapshot().map_err(|e| {
            tracing::error!("Failed to read items: {}", e);
            Status::internal(e.to_string())
        })?;

        tracing::debug!("Returning {} items", items.len());
        Ok(Response::new(Items::from(items)))
    }
}

/// Server configuration and runner.
#[derive(Debug)]
pub struct InventoryServer {
    addr: SocketAddr,
    store: Arc<dyn ItemStore>,
}

impl InventoryServer {
    /// Create a new server bound to the given address, holding the seed items.
    pub fn new(addr: SocketAddr) -> Self {
        Self {
            addr,
            store: Arc::new(InventoryStore::seeded()),
        }
    }

    /// Serve from `store` instead of the seed items.
    pub fn with_store(mut self, store: Arc<dyn ItemStore>) -> Self {
        self.store = store;
        self
    }

    /// Run the server until shutdown signal.
    pub async fn run(self) -> Result<(), ServerError> {
        let listener = TcpListener::bind(self.addr)
            .await
            .map_err(ServerError::Bind)?;
        self.serve(listener, shutdown_signal()).await
    }

    /// Serve on an already bound listener until `shutdown` resolves.
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> Result<(), ServerError>
    where
        F: Future<Output = ()>,
    {
        let local_addr = listener.local_addr().map_err(ServerError::Bind)?;
        let service = InventoryService::with_store(self.store);

        tracing::info!("Starting gRPC server on {}", local_addr);

        tonic::transport::Server::builder()
            .add_service(proto::inventory_service_server::InventoryServiceServer::new(service))
            .serve_with_incoming_shutdown(TcpListenerStream::new(listener), shutdown)
            .await?;

        tracing::info!("gRPC server shut down");
        Ok(())
    }
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Inventory server cannot listen for Ctrl+C: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Inventory server cannot listen for SIGTERM: {}", e);
                // Ctrl+C is then the only way to stop
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, stopping inventory server");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, stopping inventory server");
        }
    }
}
