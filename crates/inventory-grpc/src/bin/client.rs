//! Inventory gRPC Client
//!
//! Adds one item, blocking until the server replies, then requests the
//! whole collection in the background and waits for it to arrive.

use anyhow::Context;
use clap::Parser;
use inventory::Item;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use inventory_grpc::{
    BlockingInventoryClient, DEFAULT_HOST, DEFAULT_PORT, LoggingObserver, add_new_item,
};

/// Inventory gRPC Client - Adds an item and lists the inventory
#[derive(Parser, Debug)]
#[command(name = "inventory-client")]
#[command(about = "Adds one item to the inventory service and lists all items")]
struct Args {
    /// Server host
    #[arg(long, default_value = DEFAULT_HOST)]
    host: String,

    /// Server port
    #[arg(long, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Identifier of the item to add
    #[arg(long, default_value = "1234")]
    id: String,

    /// Name of the item to add
    #[arg(long, default_value = "New Item")]
    name: String,

    /// Description of the item to add
    #[arg(long, default_value = "Best New Item")]
    description: String,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let args = Args::parse();

    let client = BlockingInventoryClient::connect(&args.host, args.port)
        .with_context(|| format!("failed to create client for {}:{}", args.host, args.port))?;

    add_new_item(&client, Item::new(args.id, args.name, args.description));

    tracing::info!("Requesting all items");
    let call = client.get_items_with(LoggingObserver);
    tracing::info!("Returned from requesting all items");

    // The observer has already logged any failure
    if let Err(e) = call.wait() {
        tracing::debug!("Item retrieval ended with error: {}", e);
    }

    client.shutdown();
    Ok(())
}
