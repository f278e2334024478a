pub mod bundle;
pub mod collect;
pub mod config;
pub mod load_config;
pub mod manifest;
pub mod payload;
pub mod publish;
pub mod redact;
pub mod response;
pub mod transport;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use collect::FileLogSource;
use load_config::load_config;
use publish::{LogPublisher, PublishStatus};
use transport::GistClient;

/// CLI for gist-publisher: redact and publish application logs as gists.
#[derive(Parser)]
#[clap(
    name = "gist-publisher",
    version,
    about = "Collect, redact and publish application logs as GitHub gists"
)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Collect the configured log file, redact it and upload it as a gist
    Publish {
        /// Path to the YAML config file
        #[clap(long)]
        config: PathBuf,
    },
}

/// Extracted async CLI logic entrypoint for integration tests and main()
pub async fn run(cli: Cli) -> Result<()> {
    tracing::info!("trace_initialised");

    match cli.command {
        Commands::Publish { config } => {
            let config = load_config(config)?;
            let transport = GistClient::new(&config.upload)
                .map_err(|e| anyhow::anyhow!("Failed to construct gist client: {e}"))?;
            let resolver = FileLogSource::new(config.log.file_path.clone());
            let publisher = LogPublisher::new(
                transport,
                resolver,
                config.components,
                config.log.install_dir,
            );

            println!("Publishing log...");
            publisher.publish();
            match publisher.wait_terminal().await {
                PublishStatus::Done => {
                    let url = publisher.result_url().unwrap_or_default();
                    println!("Log published: {url}");
                    Ok(())
                }
                _ => {
                    let message = publisher.error_message().unwrap_or_default();
                    eprintln!("[ERROR] Publish failed: {message}");
                    Err(anyhow::anyhow!("Publish failed: {message}"))
                }
            }
        }
    }
}
