//! Gateway client entry point
//!
//! Run with:
//! ```bash
//! DISCORD_TOKEN=... cargo run -p discord-gateway
//! ```
//!
//! Configuration is loaded from environment variables.

use discord_common::{try_init_tracing, GatewayConfig};
use discord_gateway::GatewayClient;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Initialize tracing
    if let Err(e) = try_init_tracing() {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    // Run the client
    if let Err(e) = run().await {
        error!(error = %e, "Gateway session ended with error");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    info!("Starting gateway client...");

    // Load configuration
    let config = GatewayConfig::from_env().map_err(|e| {
        error!(error = %e, "Failed to load configuration");
        e
    })?;

    info!(
        shard = config.shard_num,
        shard_total = config.shard_total,
        max_reconnect_attempts = config.max_reconnect_attempts,
        "Configuration loaded"
    );

    let (client, mut messages) = GatewayClient::new(config);
    let handle = client.handle();
    let snapshots = client.snapshots();

    // Log API messages as they arrive
    let consumer = tokio::spawn(async move {
        while let Some(message) = messages.recv().await {
            info!(
                event = message.kind.name(),
                guilds = message.curr.guild_count(),
                "API message"
            );
        }
    });

    let mut session = tokio::spawn(client.run());

    tokio::select! {
        result = &mut session => {
            consumer.abort();
            result??;
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown requested");
            handle.shutdown();
            consumer.abort();
            session.await??;
        }
    }

    info!(
        guilds = snapshots.current().guild_count(),
        "Session ended cleanly"
    );
    Ok(())
}
