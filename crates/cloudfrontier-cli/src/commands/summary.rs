//! `cfr summary` — Print the deployed distribution domain.

use std::path::PathBuf;

use clap::Args;
use cloudfrontier_common::config::ConfigResolver;
use cloudfrontier_pipeline::{DomainSettings, StackOutput, summarize};

/// Arguments for the `summary` subcommand.
#[derive(Args, Debug)]
pub struct SummaryArgs {
    /// Gathered stack outputs (JSON array of `OutputKey`/`OutputValue`).
    #[arg(long, default_value = "outputs.json")]
    pub outputs: PathBuf,

    /// Path to the project configuration file.
    #[arg(long, default_value = "project.yml")]
    pub config: PathBuf,
}

/// Executes the `summary` command.
///
/// # Errors
///
/// Returns an error if a file cannot be read or parsed, or if the
/// configuration lacks the required domain.
pub fn execute(args: &SummaryArgs) -> anyhow::Result<()> {
    let project: serde_yaml::Value =
        serde_yaml::from_str(&std::fs::read_to_string(&args.config)?)?;
    let config = ConfigResolver::from_project(&project);
    let domains = DomainSettings::resolve(&config)?;

    let outputs: Vec<StackOutput> =
        serde_json::from_str(&std::fs::read_to_string(&args.outputs)?)?;

    match summarize(&outputs, &domains) {
        Some(summary) => {
            let cnames: Vec<String> = summary.aliases.iter().map(ToString::to_string).collect();
            println!("CloudFront domain name");
            println!(
                "  {} (CNAME: {})",
                summary.distribution_domain,
                cnames.join(", ")
            );
        }
        None => println!("No CloudFront distribution output found."),
    }

    Ok(())
}
