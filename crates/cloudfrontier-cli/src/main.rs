//! # cfr — cloudfrontier CLI
//!
//! Augments a generated deployment template with a CloudFront distribution
//! and DNS record, resolving the viewer certificate for the configured
//! domain.

mod commands;
mod sources;

use clap::Parser;

use crate::commands::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
        )
        .init();

    let cli = Cli::parse();
    commands::execute(cli).await
}
