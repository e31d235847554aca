//! # cloudfrontier-pipeline
//!
//! The preparation pipeline: ordered mutations of the base fragment driven
//! by resolved configuration, certificate resolution as the single awaited
//! step, the merge into the deployment template, the per-domain alias
//! record upserts, and the post-deployment summary.

pub mod configurator;
pub mod context;
pub mod dns;
pub mod report;

pub use configurator::{DomainSettings, Preparation, merge_into, prepare};
pub use context::DeployContext;
pub use dns::upsert_alias_records;
pub use report::{DeploymentSummary, StackOutput, summarize};
