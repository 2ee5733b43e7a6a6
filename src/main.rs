use anyhow::Result;
use clap::Parser;
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing::{debug, error};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod catalog;
mod cli;
mod config;
mod tui;
mod version;

use cli::Cli;

#[tokio::main]
async fn main() {
    install_panic_hook();

    // Load environment variables from .env file before anything reads them
    let dotenv = dotenvy::dotenv();

    let cli = Cli::parse();

    if let Err(e) = init_logging(&cli) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = dotenv {
        // Don't error if .env file doesn't exist, just log it
        debug!("No .env file found or error loading it: {}", e);
    }

    if let Err(e) = cli.execute().await {
        error!("Application error: {}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

/// Log panics and hand them on to the default hook. A panic on the main
/// thread unwinds the viewer loop, so the terminal is put back first; panics
/// in runtime workers only fail their own task.
fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        if owns_terminal(std::thread::current().name()) {
            tui::reset_terminal();
        }
        error!("Application panicked: {}", panic_info);
        default_hook(panic_info);
    }));
}

/// The viewer loop runs on the main thread, inside `block_on`
fn owns_terminal(thread_name: Option<&str>) -> bool {
    thread_name == Some("main")
}

/// Log to a file while the viewer owns the terminal, to stderr otherwise
fn init_logging(cli: &Cli) -> Result<()> {
    let default_level = if cli.debug { "vitrine=debug" } else { "vitrine=info" };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_level.into());

    match cli.log_path() {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(&path)?;
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_writer(Mutex::new(file))
                        .with_ansi(false),
                )
                .try_init()
                .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))?;
        }
        None => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .try_init()
                .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))?;
        }
    }

    Ok(())
}
