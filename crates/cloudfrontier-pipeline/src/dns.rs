//! Post-deployment alias record upserts.
//!
//! One create-or-replace request per configured domain, all against the
//! hosted zone resolved from the derived host name. A missing zone skips
//! the pass; a rejected upsert aborts it.

use cloudfrontier_aws::route53::{AliasTarget, AliasUpsert, DnsService};
use cloudfrontier_common::error::Result;

use crate::configurator::DomainSettings;

/// Points every configured alias at the distribution domain.
///
/// # Errors
///
/// Propagates a zone-lookup failure or the first rejected upsert; no
/// partial retry is attempted.
pub async fn upsert_alias_records(
    dns: &dyn DnsService,
    domains: &DomainSettings,
    distribution_domain: &str,
) -> Result<()> {
    let Some(zone) = dns.find_hosted_zone(&domains.host_name).await? else {
        tracing::warn!(
            host = %domains.host_name,
            "no hosted zone found, skipping alias record upserts"
        );
        return Ok(());
    };

    for domain in &domains.aliases {
        let request = AliasUpsert::for_domain(
            domain,
            AliasTarget::distribution(distribution_domain),
            zone.clone(),
        );
        dns.upsert_alias(&request).await?;
        tracing::info!(record = %domain, zone = %zone, "alias record upserted");
    }
    Ok(())
}
