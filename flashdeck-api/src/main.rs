//! flashdeck-api - flashcard storage and scoring service
//!
//! Configuration resolves CLI > environment > TOML file > compiled
//! defaults; see `flashdeck_common::config`.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use flashdeck_api::api::health::BuildInfo;
use flashdeck_common::config::{CliOverrides, ConfigResolver};
use flashdeck_common::db::init_database;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments for flashdeck-api
#[derive(Parser, Debug)]
#[command(name = "flashdeck-api")]
#[command(about = "Flashcard storage and scoring service")]
#[command(version)]
struct Args {
    /// Path to TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Address to bind
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// SQLite database file
    #[arg(short, long)]
    database: Option<PathBuf>,

    /// Origin allowed by CORS (any origin when unset)
    #[arg(long)]
    allowed_origin: Option<String>,
}

impl From<Args> for CliOverrides {
    fn from(args: Args) -> Self {
        CliOverrides {
            config_path: args.config,
            host: args.host,
            port: args.port,
            database_path: args.database,
            allowed_origin: args.allowed_origin,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Config comes first so its log_level can seed the filter
    let resolver = ConfigResolver::new(args.into());
    let config = resolver.resolve().context("Failed to resolve configuration")?;

    let level = &config.log_level;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "flashdeck_api={level},flashdeck_common={level},tower_http={level}"
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let build = BuildInfo::CURRENT;
    info!(
        "Starting flashdeck-api v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        build.git_hash,
        build.built_at,
        build.profile
    );

    let config_path = resolver.config_path();
    if config_path.exists() {
        info!("Config file: {}", config_path.display());
    } else {
        info!("Config file {} not found, using defaults", config_path.display());
    }
    info!("Database path: {}", config.database_path.display());

    let pool = match init_database(&config.database_path).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("Failed to initialize database: {}", e);
            return Err(e.into());
        }
    };

    flashdeck_api::server::run(config, pool).await
}
