use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info, warn};

mod config;
mod error;
mod events;
mod services;

use config::Config;
use events::ClassId;
use services::{
    create_game_tracker, create_window_service, GameStatusWatcher, WindowCoordinator,
};

#[derive(Parser, Debug)]
#[command(name = "overhud")]
#[command(about = "Background coordinator for the overlay's desktop and in-game windows")]
struct Args {
    /// Path to the configuration file
    #[arg(short, long, default_value = "overhud.toml")]
    config: String,

    /// Simulate the platform services instead of talking to the session bus
    #[arg(long)]
    dry_run: bool,

    /// Log level (overrides the configuration file)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = Arc::new(Config::load(&args.config)?);

    let level = args.log_level.as_deref().unwrap_or(&config.logging.level);
    init_tracing(level, &config.logging.format, &config.logging.filter)?;

    info!("starting overhud v{}", env!("CARGO_PKG_VERSION"));
    info!("configuration loaded from: {}", args.config);

    if args.dry_run {
        warn!("dry-run mode, platform services are simulated");
    }

    let tracker = create_game_tracker(Arc::clone(&config), args.dry_run).await?;
    let window_service = create_window_service(args.dry_run).await?;

    let watcher = GameStatusWatcher::new(tracker, ClassId::new(config.game.target_class_id));
    let coordinator = Arc::new(WindowCoordinator::new(
        watcher,
        window_service,
        &config.windows,
    ));

    coordinator.run().await?;
    info!("window coordinator running");

    match signal::ctrl_c().await {
        Ok(()) => info!("received shutdown signal (Ctrl+C)"),
        Err(err) => error!("failed to wait for shutdown signal: {}", err),
    }

    info!("overhud shut down");
    Ok(())
}

fn init_tracing(level: &str, format: &str, filter: &str) -> Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(filter))
        .or_else(|_| EnvFilter::try_new(level))?;

    match format {
        "json" => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
        _ => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().compact())
            .init(),
    }

    Ok(())
}
