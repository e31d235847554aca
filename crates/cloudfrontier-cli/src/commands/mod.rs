//! CLI command definitions and dispatch.

pub mod prepare;
pub mod summary;

use clap::{Parser, Subcommand};

/// cloudfrontier — CloudFront distribution and DNS for generated templates.
#[derive(Parser, Debug)]
#[command(name = "cfr", version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Prepare the distribution fragment and merge it into a template.
    Prepare(prepare::PrepareArgs),
    /// Print the deployed distribution domain from gathered stack outputs.
    Summary(summary::SummaryArgs),
}

/// Dispatches the parsed CLI command to its handler.
///
/// # Errors
///
/// Returns an error if the command execution fails.
pub async fn execute(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Prepare(args) => prepare::execute(args).await,
        Command::Summary(args) => summary::execute(&args),
    }
}
