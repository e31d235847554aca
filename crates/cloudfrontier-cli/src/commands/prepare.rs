//! `cfr prepare` — Prepare the fragment and merge it into a template.

use std::path::PathBuf;

use clap::Args;
use cloudfrontier_common::config::ConfigResolver;
use cloudfrontier_pipeline::{DeployContext, merge_into, prepare};

use crate::sources::FileAcm;

/// Arguments for the `prepare` subcommand.
#[derive(Args, Debug)]
pub struct PrepareArgs {
    /// Path to the project configuration file.
    #[arg(long, default_value = "project.yml")]
    pub config: PathBuf,

    /// Path to the generated deployment template.
    #[arg(long, default_value = "template.yml")]
    pub template: PathBuf,

    /// Deployment stage, used as the origin path.
    #[arg(long, default_value = "dev")]
    pub stage: String,

    /// Certificate listing file (`CertificateSummaryList` JSON). Without
    /// it, only an explicitly configured certificate can be attached.
    #[arg(long)]
    pub certificates: Option<PathBuf>,

    /// Write the merged template to a file instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Executes the `prepare` command.
///
/// Loads the project configuration and deployment template, runs the full
/// preparation pipeline, merges the fragment, and writes the result.
///
/// # Errors
///
/// Returns an error if any file cannot be read or parsed, or if any
/// pipeline stage fails.
pub async fn execute(args: PrepareArgs) -> anyhow::Result<()> {
    let project: serde_yaml::Value =
        serde_yaml::from_str(&std::fs::read_to_string(&args.config)?)?;
    let config = ConfigResolver::from_project(&project);

    let service_name = project
        .get("service")
        .and_then(serde_yaml::Value::as_str)
        .unwrap_or("service");
    let context = DeployContext::new(&args.stage, format!("{}-{service_name}", args.stage));

    let acm = match &args.certificates {
        Some(path) => FileAcm::load(path)?,
        None => FileAcm::empty(),
    };

    let mut template: serde_yaml::Value =
        serde_yaml::from_str(&std::fs::read_to_string(&args.template)?)?;

    let prepared = prepare(&config, &context, &acm).await?;
    tracing::info!(host = %prepared.domains.host_name, "fragment prepared");
    merge_into(&mut template, prepared.fragment)?;

    let rendered = serde_yaml::to_string(&template)?;
    if let Some(ref out_path) = args.output {
        std::fs::write(out_path, &rendered)?;
        println!(
            "Prepared {} -> {}",
            args.template.display(),
            out_path.display()
        );
        println!("Aliases: {}", prepared.domains.aliases.len());
    } else {
        print!("{rendered}");
    }

    Ok(())
}
