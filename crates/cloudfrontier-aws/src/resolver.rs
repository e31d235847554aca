//! Certificate resolution for a target host name.
//!
//! One listing call, then a most-specific-match selection: candidate
//! domains are normalized by stripping a leading wildcard marker, a
//! candidate is eligible when the target host name contains its normalized
//! domain, and the longest normalized domain wins. The comparison is
//! strictly greater-than, so among equal-longest eligible candidates the
//! first one seen wins; the service documents no ordering, so callers must
//! not depend on tie outcomes.

use cloudfrontier_common::error::{CloudfrontierError, Result};
use cloudfrontier_common::types::{CertificateArn, HostName};

use crate::acm::{CertificateService, CertificateSummary, RESOLVABLE_STATUSES};

/// Resolves the viewer certificate ARN for `host_name`.
///
/// An explicitly configured non-empty ARN is returned verbatim without any
/// network call. Otherwise the service is queried once and the best match
/// selected. When nothing matches, the outcome depends on what was
/// configured: no `certificate` option at all is a fatal no-match error,
/// while an explicitly configured empty string opts out of the
/// certificate, yielding `Ok(None)` so the caller drops the
/// viewer-certificate section.
///
/// # Errors
///
/// Propagates the listing failure as a certificate-service error, and
/// returns a distinct no-match error when no candidate covers the host
/// name and no empty-string opt-out was configured.
pub async fn resolve_certificate(
    service: &dyn CertificateService,
    host_name: &HostName,
    configured: Option<&CertificateArn>,
) -> Result<Option<CertificateArn>> {
    if let Some(arn) = configured.filter(|arn| !arn.as_str().is_empty()) {
        tracing::info!(arn = %arn, "using explicitly configured certificate");
        return Ok(Some(arn.clone()));
    }
    let opted_out = configured.is_some_and(|arn| arn.as_str().is_empty());

    let candidates = service.list_certificates(&RESOLVABLE_STATUSES).await?;
    match select_candidate(host_name.as_str(), &candidates) {
        Some(candidate) => {
            tracing::info!(
                host = %host_name,
                arn = %candidate.certificate_arn,
                "certificate resolved"
            );
            Ok(Some(candidate.certificate_arn.clone()))
        }
        None if opted_out => {
            tracing::debug!(host = %host_name, "no certificate matched; empty override opts out");
            Ok(None)
        }
        None => Err(CloudfrontierError::NoMatchingCertificate {
            host_name: host_name.to_string(),
        }),
    }
}

/// Picks the eligible candidate with the longest normalized domain.
fn select_candidate<'a>(
    host_name: &str,
    candidates: &'a [CertificateSummary],
) -> Option<&'a CertificateSummary> {
    let mut best: Option<&CertificateSummary> = None;
    let mut best_len = 0;

    for candidate in candidates {
        let normalized = normalize_domain(&candidate.domain_name);
        if host_name.contains(normalized) && normalized.len() > best_len {
            best_len = normalized.len();
            best = Some(candidate);
        }
    }
    best
}

/// Strips the leading wildcard marker from a certificate domain.
fn normalize_domain(domain: &str) -> &str {
    domain.strip_prefix("*.").unwrap_or(domain)
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::acm::CertificateStatus;

    struct StaticAcm {
        certificates: Vec<CertificateSummary>,
    }

    #[async_trait]
    impl CertificateService for StaticAcm {
        async fn list_certificates(
            &self,
            _statuses: &[CertificateStatus],
        ) -> Result<Vec<CertificateSummary>> {
            Ok(self.certificates.clone())
        }
    }

    /// Fails every request; used to prove the override path never calls out.
    struct UnreachableAcm;

    #[async_trait]
    impl CertificateService for UnreachableAcm {
        async fn list_certificates(
            &self,
            _statuses: &[CertificateStatus],
        ) -> Result<Vec<CertificateSummary>> {
            Err(CloudfrontierError::CertificateService {
                message: "connection refused".to_string(),
            })
        }
    }

    fn summary(domain: &str, arn: &str) -> CertificateSummary {
        CertificateSummary {
            domain_name: domain.to_string(),
            certificate_arn: CertificateArn::new(arn),
        }
    }

    #[tokio::test]
    async fn longest_match_beats_wildcard_and_base() {
        let acm = StaticAcm {
            certificates: vec![
                summary("example.com", "arn:a1"),
                summary("*.example.com", "arn:a2"),
                summary("sub.example.com", "arn:a3"),
            ],
        };
        let resolved = resolve_certificate(&acm, &HostName::new("sub.example.com"), None)
            .await
            .expect("resolution succeeds");
        assert_eq!(resolved, Some(CertificateArn::new("arn:a3")));
    }

    #[tokio::test]
    async fn wildcard_domain_is_normalized_before_matching() {
        let acm = StaticAcm {
            certificates: vec![summary("*.example.com", "arn:wild")],
        };
        let resolved = resolve_certificate(&acm, &HostName::new("example.com"), None)
            .await
            .expect("resolution succeeds");
        assert_eq!(resolved, Some(CertificateArn::new("arn:wild")));
    }

    #[tokio::test]
    async fn no_eligible_candidate_is_a_distinct_error() {
        let acm = StaticAcm {
            certificates: vec![summary("other.org", "arn:a1")],
        };
        let err = resolve_certificate(&acm, &HostName::new("example.com"), None)
            .await
            .expect_err("no candidate covers the host");
        assert!(matches!(
            err,
            CloudfrontierError::NoMatchingCertificate { ref host_name }
                if host_name.as_str() == "example.com"
        ));
    }

    #[tokio::test]
    async fn empty_listing_is_a_no_match_error() {
        let acm = StaticAcm {
            certificates: Vec::new(),
        };
        let err = resolve_certificate(&acm, &HostName::new("example.com"), None)
            .await
            .expect_err("an empty listing covers nothing");
        assert!(matches!(
            err,
            CloudfrontierError::NoMatchingCertificate { .. }
        ));
    }

    #[tokio::test]
    async fn empty_override_opts_out_when_nothing_matches() {
        let empty = CertificateArn::new("");
        let acm = StaticAcm {
            certificates: vec![summary("other.org", "arn:other")],
        };
        let resolved =
            resolve_certificate(&acm, &HostName::new("example.com"), Some(&empty))
                .await
                .expect("empty override tolerates a miss");
        assert_eq!(resolved, None);
    }

    #[tokio::test]
    async fn explicit_override_skips_the_service() {
        let override_arn = CertificateArn::new("arn:explicit");
        let resolved = resolve_certificate(
            &UnreachableAcm,
            &HostName::new("example.com"),
            Some(&override_arn),
        )
        .await
        .expect("override must not touch the service");
        assert_eq!(resolved, Some(override_arn));
    }

    #[tokio::test]
    async fn empty_override_still_queries_the_service() {
        let empty = CertificateArn::new("");
        let acm = StaticAcm {
            certificates: vec![summary("example.com", "arn:a1")],
        };
        let resolved = resolve_certificate(&acm, &HostName::new("api.example.com"), Some(&empty))
            .await
            .expect("resolution succeeds");
        assert_eq!(resolved, Some(CertificateArn::new("arn:a1")));
    }

    #[tokio::test]
    async fn listing_failure_propagates() {
        let err = resolve_certificate(&UnreachableAcm, &HostName::new("example.com"), None)
            .await
            .expect_err("listing failure is fatal");
        assert!(matches!(
            err,
            CloudfrontierError::CertificateService { .. }
        ));
    }

    #[test]
    fn selection_ignores_longer_ineligible_domains() {
        let candidates = vec![
            summary("deep.sub.example.com", "arn:too-specific"),
            summary("example.com", "arn:base"),
        ];
        let best = select_candidate("sub.example.com", &candidates).expect("base matches");
        assert_eq!(best.certificate_arn, CertificateArn::new("arn:base"));
    }
}
