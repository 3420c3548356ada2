//! Parley signaling relay server.
//!
//! Relays WebRTC negotiation messages between peers and fans out room messages
//! translated into each member's language.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin parley-server
//! cargo run --bin parley-server -- --host 0.0.0.0 --port 3000
//! PARLEY_TRANSLATOR_URL=http://127.0.0.1:9000 cargo run --bin parley-server
//! ```

use std::time::Duration;

use clap::Parser;
use parley_server::{bootstrap::build_server, config::ServerConfig};
use parley_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "parley-server")]
#[command(about = "WebRTC signaling relay with per-peer translated room chat", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, env = "PARLEY_HOST", default_value = ServerConfig::DEFAULT_HOST)]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = "PARLEY_PORT", default_value_t = ServerConfig::DEFAULT_PORT)]
    port: u16,

    /// Base URL of the translation service
    #[arg(
        long,
        env = "PARLEY_TRANSLATOR_URL",
        default_value = "https://translate.googleapis.com"
    )]
    translator_url: String,

    /// Upper bound for a single translation call, in milliseconds
    #[arg(
        long,
        env = "PARLEY_TRANSLATION_TIMEOUT_MS",
        default_value_t = ServerConfig::DEFAULT_TRANSLATION_TIMEOUT_MS
    )]
    translation_timeout_ms: u64,

    /// Default log level (overridden by RUST_LOG)
    #[arg(long, default_value = "debug")]
    log_level: String,
}

impl From<Args> for ServerConfig {
    fn from(args: Args) -> Self {
        Self {
            host: args.host,
            port: args.port,
            translator_url: args.translator_url,
            translation_timeout: Duration::from_millis(args.translation_timeout_ms),
        }
    }
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &args.log_level);

    let config = ServerConfig::from(args);
    let server = match build_server(&config) {
        Ok(server) => server,
        Err(e) => {
            tracing::error!("Failed to initialize server: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = server.run(config.host, config.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
