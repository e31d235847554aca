//! Unified error types for the cloudfrontier workspace.
//!
//! Every failure in a preparation run is fatal: the pipeline aborts and no
//! partially mutated fragment reaches the template merge. The variants keep
//! the failure classes distinct so an operator can tell "service
//! unreachable" apart from "no certificate covers this domain".

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type shared across the workspace.
#[derive(Debug, Error)]
pub enum CloudfrontierError {
    /// An I/O operation failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path where the I/O error occurred.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A configuration value is missing or invalid.
    #[error("invalid configuration: {message}")]
    Config {
        /// Description of the invalid configuration.
        message: String,
    },

    /// The packaged base fragment is missing or corrupt.
    #[error("base resource fragment is invalid: {message}")]
    Fragment {
        /// Description of the packaging defect.
        message: String,
    },

    /// The certificate service listing request failed.
    #[error("could not list certificates in the certificate service: {message}")]
    CertificateService {
        /// Description of the underlying service failure.
        message: String,
    },

    /// The listing succeeded but no certificate covers the target domain.
    #[error("no certificate found matching {host_name}")]
    NoMatchingCertificate {
        /// Host name the lookup was performed for.
        host_name: String,
    },

    /// A DNS alias record upsert failed.
    #[error("DNS record upsert failed for {record_name}: {message}")]
    DnsUpsert {
        /// Record name the upsert was attempted for.
        record_name: String,
        /// Description of the underlying service failure.
        message: String,
    },

    /// YAML serialization or deserialization failed.
    #[error("YAML error: {source}")]
    Yaml {
        /// Underlying YAML error.
        #[from]
        source: serde_yaml::Error,
    },

    /// JSON serialization or deserialization failed.
    #[error("JSON error: {source}")]
    Json {
        /// Underlying JSON error.
        #[from]
        source: serde_json::Error,
    },
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, CloudfrontierError>;
