//! Product catalog CLI server
//!
//! Headless REST API suitable for deployment as a systemd service, Docker
//! container, or standalone process.
//!
//! ```sh
//! # Run with default config (~/.config/product-catalog/config.toml)
//! catalog-cli
//!
//! # Custom config path
//! catalog-cli --config /etc/product-catalog/config.toml
//!
//! # Override port and database
//! catalog-cli --port 9000 --database-url "sqlite://./dev.db?mode=rwc"
//!
//! # Validate config without starting
//! catalog-cli --check
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};

use product_catalog::config::AppConfig;
use product_catalog::server::{init_tracing, ServerHandle, ServerOptions};

/// Product catalog REST API server.
#[derive(Parser, Debug)]
#[command(
    name = "catalog-cli",
    version,
    about = "Product catalog REST API",
    long_about = "Product catalog REST API: paginated product listing with nested \
                  reviews, images, pricing and attributes.\n\n\
                  Default config: ~/.config/product-catalog/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "CATALOG_CONFIG")]
    config: Option<PathBuf>,

    /// Override the REST API listen port.
    #[arg(short, long)]
    port: Option<u16>,

    /// Override the database URL.
    #[arg(long)]
    database_url: Option<String>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Validate the configuration file and exit without starting the server.
    #[arg(long)]
    check: bool,

    /// Skip database migrations on startup.
    #[arg(long)]
    no_migrate: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(product_catalog::default_config_path);

    let mut config = match AppConfig::load_or_default(&config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            // Invalid pagination bounds or an unreadable file are fatal.
            eprintln!("Failed to load config from {}: {}", config_path.display(), e);
            return ExitCode::FAILURE;
        }
    };

    // ── Apply CLI overrides ────────────────────────────────────
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(ref url) = cli.database_url {
        config.database.url = url.clone();
    }
    if let Some(ref level) = cli.log_level {
        config.logging.level = level.clone();
    }

    // ── Config validation mode ─────────────────────────────────
    if cli.check {
        if let Err(e) = config.validate() {
            eprintln!("❌ Configuration is invalid: {}", e);
            return ExitCode::FAILURE;
        }
        println!("✅ Configuration is valid");
        println!("   Config file : {}", config_path.display());
        println!("   API address : {}", config.server.address());
        println!("   Database    : {}", config.database.url);
        println!("   Log level   : {}", config.logging.level);
        println!(
            "   Page size   : default {}, bounds [{}, {}]",
            config.pagination.default_limit,
            config.pagination.min_limit,
            config.pagination.max_limit
        );
        return ExitCode::SUCCESS;
    }

    init_tracing(&config);
    info!("Configuration loaded from {}", config_path.display());

    // ── Start server ───────────────────────────────────────────
    let handle = match ServerHandle::start(ServerOptions {
        config,
        auto_migrate: !cli.no_migrate,
    })
    .await
    {
        Ok(handle) => handle,
        Err(e) => {
            error!("Failed to start server: {}", e);
            return ExitCode::FAILURE;
        }
    };

    // Install OS signal handlers (SIGTERM, SIGINT)
    handle.install_signal_handler();

    info!("🚀 Press Ctrl+C to shutdown gracefully.");

    // Wait for shutdown signal, then clean up
    handle.shutdown_signal().wait().await;
    handle.wait().await;

    ExitCode::SUCCESS
}
