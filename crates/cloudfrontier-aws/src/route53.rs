//! DNS service boundary.
//!
//! Models the Route53 create-or-replace contract for alias records: one
//! UPSERT change per domain, pointing an `A` record at the distribution's
//! domain name inside CloudFront's fixed hosted zone. Hosted-zone ID
//! resolution is a lookup keyed by the derived host name and belongs to the
//! implementor.

use async_trait::async_trait;
use cloudfrontier_common::constants::{CLOUDFRONT_HOSTED_ZONE_ID, DNS_CHANGE_COMMENT};
use cloudfrontier_common::error::Result;
use cloudfrontier_common::types::{DomainName, HostName, HostedZoneId};
use serde::{Deserialize, Serialize};

/// Target of an alias record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AliasTarget {
    /// Domain name the alias points at.
    #[serde(rename = "DNSName")]
    pub dns_name: String,
    /// Whether the target's health is evaluated; always off for
    /// distribution aliases.
    pub evaluate_target_health: bool,
    /// Hosted zone the target lives in.
    pub hosted_zone_id: HostedZoneId,
}

impl AliasTarget {
    /// Builds the alias target for a CloudFront distribution domain.
    #[must_use]
    pub fn distribution(distribution_domain: impl Into<String>) -> Self {
        Self {
            dns_name: distribution_domain.into(),
            evaluate_target_health: false,
            hosted_zone_id: HostedZoneId::new(CLOUDFRONT_HOSTED_ZONE_ID),
        }
    }
}

/// One create-or-replace request for an alias record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AliasUpsert {
    /// Fully qualified record name.
    pub record_name: String,
    /// Record type; `A` for distribution aliases.
    pub record_type: String,
    /// Alias target the record points at.
    pub alias_target: AliasTarget,
    /// Hosted zone the change applies in.
    pub hosted_zone_id: HostedZoneId,
    /// Comment attached to the change batch.
    pub comment: String,
}

impl AliasUpsert {
    /// Builds an `A`-record upsert for `domain` in the given zone.
    #[must_use]
    pub fn for_domain(domain: &DomainName, target: AliasTarget, zone: HostedZoneId) -> Self {
        Self {
            record_name: domain.as_str().to_string(),
            record_type: "A".to_string(),
            alias_target: target,
            hosted_zone_id: zone,
            comment: DNS_CHANGE_COMMENT.to_string(),
        }
    }
}

/// Upsert side of the DNS service.
#[async_trait]
pub trait DnsService: Send + Sync {
    /// Resolves the hosted-zone ID serving `host_name`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the zone lookup itself fails; an absent zone is
    /// `Ok(None)`.
    async fn find_hosted_zone(&self, host_name: &HostName) -> Result<Option<HostedZoneId>>;

    /// Creates or replaces the alias record described by `request`.
    ///
    /// # Errors
    ///
    /// Returns a DNS-upsert error if the change is rejected. Callers treat
    /// that as fatal and do not retry.
    async fn upsert_alias(&self, request: &AliasUpsert) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distribution_target_never_evaluates_health() {
        let target = AliasTarget::distribution("d123.cloudfront.net");
        assert!(!target.evaluate_target_health);
        assert_eq!(target.hosted_zone_id.as_str(), CLOUDFRONT_HOSTED_ZONE_ID);
    }

    #[test]
    fn upsert_is_an_a_record_with_change_comment() {
        let upsert = AliasUpsert::for_domain(
            &DomainName::new("api.example.com"),
            AliasTarget::distribution("d123.cloudfront.net"),
            HostedZoneId::new("Z0EXAMPLE"),
        );
        assert_eq!(upsert.record_name, "api.example.com");
        assert_eq!(upsert.record_type, "A");
        assert_eq!(upsert.comment, DNS_CHANGE_COMMENT);
    }
}
