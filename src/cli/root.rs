use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{debug, info};

use super::list::ListCommand;
use crate::catalog;
use crate::config::Config;
use crate::tui;

/// Vitrine - browse a product catalog from your terminal
#[derive(Parser)]
#[command(
    name = "vitrine",
    version,
    about = "Browse a product catalog from your terminal",
    long_about = r#"Vitrine fetches a product catalog once and shows it four products at a time,
with color variants and star ratings.

Examples:
  vitrine                                   # Browse the default catalog
  vitrine --endpoint http://localhost:8000/ # Browse another endpoint
  vitrine --file products.json              # Browse a local JSON file
  vitrine list --page 2                     # Print the second page"#
)]
pub struct Cli {
    /// Catalog endpoint URL
    #[arg(short = 'e', long = "endpoint", global = true)]
    pub endpoint: Option<String>,

    /// Read the catalog from a local JSON file instead of the endpoint
    #[arg(short = 'f', long = "file", global = true)]
    pub file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short = 'd', long = "debug", global = true)]
    pub debug: bool,

    /// Write logs to this file
    #[arg(long = "log-file", global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print one page of the catalog and exit
    List(ListCommand),
}

impl Cli {
    /// Whether this invocation takes over the terminal
    pub fn is_interactive(&self) -> bool {
        self.command.is_none()
    }

    /// Log destination: the flag, then `VITRINE_LOG_FILE`, then a file in
    /// the temp dir for the interactive viewer. `None` means stderr.
    pub fn log_path(&self) -> Option<PathBuf> {
        self.log_file
            .clone()
            .or_else(|| std::env::var_os("VITRINE_LOG_FILE").map(PathBuf::from))
            .or_else(|| {
                self.is_interactive()
                    .then(|| std::env::temp_dir().join("vitrine.log"))
            })
    }

    pub async fn execute(self) -> Result<()> {
        if self.debug {
            debug!("Debug logging enabled");
        }

        let mut config = Config::init().await?;
        config.apply_overrides(self.endpoint.clone(), self.file.clone());
        config.validate()?;
        debug!("Configuration initialized: {:?}", config);

        match &self.command {
            Some(Commands::List(list_cmd)) => list_cmd.execute(&config).await,
            None => self.start_interactive_mode(&config).await,
        }
    }

    async fn start_interactive_mode(&self, config: &Config) -> Result<()> {
        info!("Starting interactive mode");

        let source = catalog::source_for(config)?;
        tui::run(config, source).await?;

        info!("Application finished");
        Ok(())
    }
}
