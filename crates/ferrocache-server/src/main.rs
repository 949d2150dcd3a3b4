//! ferrocache-server - a TCP server speaking a subset of the memcache
//! text protocol, backed by a bounded, batched-eviction LRU cache.

use std::sync::Arc;

use clap::Parser;
use ferrocache_core::{Cache, CacheConfig};
use ferrocache_server::connection;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// ferrocache-server - an in-memory memcache-text-protocol cache server
#[derive(Parser, Debug)]
#[command(name = "ferrocache-server")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// TCP port to listen on
    #[arg(short, long, default_value_t = 11211, env = "FERROCACHE_PORT")]
    port: u16,

    /// Maximum entries the cache holds in steady state
    #[arg(long, env = "FERROCACHE_CACHE_CAPACITY")]
    cache_capacity: usize,

    /// Number of stripes the primary store is partitioned into.
    /// Defaults to the host's available parallelism.
    #[arg(long, env = "FERROCACHE_BIN_COUNT")]
    bin_count: Option<usize>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    if args.cache_capacity == 0 {
        anyhow::bail!("cache-capacity must be > 0");
    }

    let mut config = CacheConfig::new(args.cache_capacity);
    if let Some(bin_count) = args.bin_count {
        config.bin_count = bin_count;
    }

    tracing::info!(
        capacity = args.cache_capacity,
        bin_count = config.bin_count,
        port = args.port,
        "starting ferrocache-server"
    );

    let cache = Arc::new(Cache::new(config));

    let addr = format!("0.0.0.0:{}", args.port);
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("listening on {addr}");

    loop {
        tokio::select! {
            accept = listener.accept() => {
                let (stream, peer) = match accept {
                    Ok(pair) => pair,
                    Err(err) => {
                        tracing::warn!(error = %err, "failed to accept connection");
                        continue;
                    }
                };
                tracing::debug!(%peer, "accepted connection");
                let cache = Arc::clone(&cache);
                tokio::spawn(connection::handle(stream, cache));
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("shutdown signal received, closing cache");
                cache.close();
                break;
            }
        }
    }

    Ok(())
}
