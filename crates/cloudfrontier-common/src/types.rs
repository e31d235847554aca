//! Domain primitive types used across the cloudfrontier workspace.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Fully qualified domain name a distribution is served under.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DomainName(String);

impl DomainName {
    /// Creates a domain name from a string value.
    #[must_use]
    pub fn new(domain: impl Into<String>) -> Self {
        Self(domain.into())
    }

    /// Returns the inner string representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Derives the host name by stripping the leftmost dot-delimited label.
    ///
    /// `api.example.com` becomes `example.com`. A domain without a dot maps
    /// to itself, so a bare apex still yields a usable zone name.
    #[must_use]
    pub fn host_name(&self) -> HostName {
        let host = self
            .0
            .split_once('.')
            .map_or(self.0.as_str(), |(_, rest)| rest);
        HostName(host.to_string())
    }
}

impl fmt::Display for DomainName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Target domain minus its leftmost label; used for certificate matching
/// and hosted-zone naming.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HostName(String);

impl HostName {
    /// Creates a host name from a string value.
    #[must_use]
    pub fn new(host: impl Into<String>) -> Self {
        Self(host.into())
    }

    /// Returns the inner string representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the Route53 hosted-zone name form, with a trailing dot.
    #[must_use]
    pub fn zone_name(&self) -> String {
        format!("{}.", self.0)
    }
}

impl fmt::Display for HostName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque ARN identifying a certificate in the certificate service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CertificateArn(String);

impl CertificateArn {
    /// Creates an ARN from a string value.
    #[must_use]
    pub fn new(arn: impl Into<String>) -> Self {
        Self(arn.into())
    }

    /// Returns the inner string representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CertificateArn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque identifier of a Route53 hosted zone.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HostedZoneId(String);

impl HostedZoneId {
    /// Creates a hosted-zone ID from a string value.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the inner string representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HostedZoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
