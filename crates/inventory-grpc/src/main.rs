//! Inventory gRPC Server
//!
//! Serves the in-memory inventory over gRPC until Ctrl+C or SIGTERM.

use std::fs::File;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use inventory::InventoryStore;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use inventory_grpc::InventoryServer;

/// Inventory gRPC Server - In-memory item list over gRPC
#[derive(Parser, Debug)]
#[command(name = "inventory-server")]
#[command(about = "gRPC server exposing an in-memory inventory")]
struct Args {
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:50551")]
    addr: SocketAddr,

    /// JSON file with the initial items, replacing the built-in seed items
    #[arg(long)]
    seed_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let args = Args::parse();

    let store = match &args.seed_file {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open seed file {}", path.display()))?;
            InventoryStore::from_json_reader(file)
                .with_context(|| format!("failed to load seed file {}", path.display()))?
        }
        None => InventoryStore::seeded(),
    };

    let server = InventoryServer::new(args.addr).with_store(Arc::new(store));
    server.run().await?;

    Ok(())
}
