//! Certificate service boundary.
//!
//! The raw network client lives outside this workspace; only the listing
//! contract is modeled here. Implementors translate their transport errors
//! into the certificate-service error variant.

use async_trait::async_trait;
use cloudfrontier_common::error::Result;
use cloudfrontier_common::types::CertificateArn;
use serde::{Deserialize, Serialize};

/// Lifecycle states a listed certificate may be in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CertificateStatus {
    /// Requested but not yet validated.
    PendingValidation,
    /// Issued and usable.
    Issued,
    /// Issued but not currently in use.
    Inactive,
}

/// States requested by the resolver's single listing call.
pub const RESOLVABLE_STATUSES: [CertificateStatus; 3] = [
    CertificateStatus::PendingValidation,
    CertificateStatus::Issued,
    CertificateStatus::Inactive,
];

/// One entry from the certificate service listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CertificateSummary {
    /// Domain the certificate covers, possibly wildcard-prefixed.
    pub domain_name: String,
    /// Opaque certificate ARN.
    pub certificate_arn: CertificateArn,
}

/// Listing side of the certificate service.
///
/// The service returns candidates in no documented order; callers must not
/// rely on it.
#[async_trait]
pub trait CertificateService: Send + Sync {
    /// Lists certificates in the given states.
    ///
    /// # Errors
    ///
    /// Returns [`CloudfrontierError::CertificateService`] if the listing
    /// request fails. The resolver treats that as fatal and does not retry.
    ///
    /// [`CloudfrontierError::CertificateService`]: cloudfrontier_common::error::CloudfrontierError::CertificateService
    async fn list_certificates(
        &self,
        statuses: &[CertificateStatus],
    ) -> Result<Vec<CertificateSummary>>;
}
