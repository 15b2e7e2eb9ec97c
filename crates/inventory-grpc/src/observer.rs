//! Callbacks for asynchronous item retrieval.

use inventory::Item;
use tonic::Status;

/// Receives the events of one asynchronous `GetItems` call.
///
/// Events fire on a runtime worker thread, never on the thread that
/// dispatched the call. A call delivers either `on_next` followed by
/// `on_completed`, or a single `on_error`.
pub trait ItemsObserver: Send + 'static {
    /// The collection arrived.
    fn on_next(&mut self, items: Vec<Item>);

    /// The call failed. No further events follow.
    fn on_error(&mut self, status: &Status);

    /// The call finished successfully. No further events follow.
    fn on_completed(&mut self);
}

/// Observer that logs every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingObserver;

impl ItemsObserver for LoggingObserver {
    fn on_next(&mut self, items: Vec<Item>) {
        tracing::info!("Received {} items", items.len());
        for item in &items {
            tracing::info!("  {}", item);
        }
    }

    fn on_error(&mut self, status: &Status) {
        tracing::warn!("RPC error: {}", status);
    }

    fn on_completed(&mut self) {
        tracing::info!("Finished receiving items");
    }
}
