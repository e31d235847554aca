//! The distribution preparation pipeline.
//!
//! Thirteen ordered stages mutate the base fragment: domain assignment
//! first (certificate matching and DNS naming need the derived host name),
//! the synchronous distribution settings next, and certificate resolution
//! last as the single awaited suspension point. The orchestrator
//! short-circuits on the first failing stage, so a failed run never hands a
//! partially mutated fragment to the merge.

use cloudfrontier_aws::acm::CertificateService;
use cloudfrontier_aws::resolver::resolve_certificate;
use cloudfrontier_common::config::{ConfigResolver, ConfigValue};
use cloudfrontier_common::constants::DEFAULT_PRICE_CLASS;
use cloudfrontier_common::error::{CloudfrontierError, Result};
use cloudfrontier_common::types::{CertificateArn, DomainName, HostName};
use cloudfrontier_template::model::{
    DistributionConfig, FragmentDocument, LoggingConfig, ViewerCertificate,
};
use cloudfrontier_template::{deep_merge, load_base_fragment};
use serde_yaml::Value;

use crate::context::DeployContext;

/// Domains a deployment is served under, resolved once from configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainSettings {
    /// All configured aliases, in order; never empty.
    pub aliases: Vec<DomainName>,
    /// Host name derived from the first alias, used for certificate
    /// matching and hosted-zone naming.
    pub host_name: HostName,
}

impl DomainSettings {
    /// Resolves the required `fullDomainName` option.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the option is absent or an empty
    /// list. This is checked before any network call.
    pub fn resolve(config: &ConfigResolver) -> Result<Self> {
        let value = config.get_string_or_list("fullDomainName")?.ok_or_else(|| {
            CloudfrontierError::Config {
                message: "fullDomainName must be provided".to_string(),
            }
        })?;

        let aliases = match value {
            ConfigValue::Scalar(domain) => vec![DomainName::new(domain)],
            ConfigValue::List(domains) => {
                if domains.is_empty() {
                    return Err(CloudfrontierError::Config {
                        message: "fullDomainName must not be an empty list".to_string(),
                    });
                }
                domains.into_iter().map(DomainName::new).collect()
            }
        };

        let host_name = aliases[0].host_name();
        Ok(Self { aliases, host_name })
    }

    /// The DNS record name: the first configured alias.
    #[must_use]
    pub fn record_name(&self) -> &DomainName {
        &self.aliases[0]
    }
}

/// Result of a successful preparation run.
#[derive(Debug, Clone, PartialEq)]
pub struct Preparation {
    /// The fully prepared fragment, ready to merge.
    pub fragment: FragmentDocument,
    /// Domains the run was prepared for.
    pub domains: DomainSettings,
    /// The viewer certificate attached to the fragment, if any.
    pub certificate: Option<CertificateArn>,
}

/// Runs the full preparation pipeline against a freshly loaded base
/// fragment.
///
/// # Errors
///
/// Fails on missing required configuration, a corrupt base fragment, a
/// certificate-service failure, or an unmatched domain; every failure
/// aborts the run before the fragment can be merged.
pub async fn prepare(
    config: &ConfigResolver,
    context: &DeployContext,
    certificates: &dyn CertificateService,
) -> Result<Preparation> {
    let mut fragment = load_base_fragment()?;

    let domains = apply_domain(&mut fragment, config)?;
    {
        let dist = distribution_config_mut(&mut fragment);
        apply_logging(dist, config);
        apply_price_class(dist, config);
        apply_origin_path(dist, context)?;
        apply_cookies(dist, config)?;
        apply_headers(dist, config)?;
        apply_query_string(dist, config)?;
        apply_comment(dist, context);
        apply_waf(dist, config);
        apply_compress(dist, config);
        apply_minimum_protocol_version(dist, config);
        apply_ttl(dist, config)?;
    }
    let certificate =
        apply_certificate(&mut fragment, config, &domains.host_name, certificates).await?;

    Ok(Preparation {
        fragment,
        domains,
        certificate,
    })
}

/// Folds a prepared fragment into the deployment template.
///
/// # Errors
///
/// Returns an error if the fragment cannot be serialized, which indicates
/// a model defect rather than a user error.
pub fn merge_into(template: &mut Value, fragment: FragmentDocument) -> Result<()> {
    let value = fragment.into_value()?;
    deep_merge(template, value);
    Ok(())
}

fn distribution_config_mut(fragment: &mut FragmentDocument) -> &mut DistributionConfig {
    &mut fragment
        .resources
        .api_distribution
        .properties
        .distribution_config
}

/// Stage 1: aliases, host name, and DNS naming.
fn apply_domain(
    fragment: &mut FragmentDocument,
    config: &ConfigResolver,
) -> Result<DomainSettings> {
    let domains = DomainSettings::resolve(config)?;

    let dist = distribution_config_mut(fragment);
    dist.aliases = domains
        .aliases
        .iter()
        .map(|d| d.as_str().to_string())
        .collect();

    let dns = &mut fragment.resources.cloud_front_dns.properties;
    dns.hosted_zone_name = domains.host_name.zone_name();
    let record = dns
        .record_sets
        .first_mut()
        .ok_or_else(|| CloudfrontierError::Fragment {
            message: "base fragment must ship one DNS record set".to_string(),
        })?;
    record.name = domains.record_name().as_str().to_string();

    Ok(domains)
}

/// Stage 2: access logging is opt-in; no bucket removes the section.
fn apply_logging(dist: &mut DistributionConfig, config: &ConfigResolver) {
    match config.get_str("logging.bucket").filter(|b| !b.is_empty()) {
        Some(bucket) => {
            let logging = dist.logging.get_or_insert_with(LoggingConfig::default);
            logging.bucket = bucket;
            logging.prefix = config.get_str_or("logging.prefix", "");
        }
        None => dist.logging = None,
    }
}

/// Stage 3: price class.
fn apply_price_class(dist: &mut DistributionConfig, config: &ConfigResolver) {
    dist.price_class = config.get_str_or("priceClass", DEFAULT_PRICE_CLASS);
}

/// Stage 4: the first origin serves this deployment's stage.
fn apply_origin_path(dist: &mut DistributionConfig, context: &DeployContext) -> Result<()> {
    let origin = dist
        .origins
        .first_mut()
        .ok_or_else(|| CloudfrontierError::Fragment {
            message: "base fragment must ship one origin".to_string(),
        })?;
    origin.origin_path = context.origin_path();
    Ok(())
}

/// Stage 5: cookie forwarding.
fn apply_cookies(dist: &mut DistributionConfig, config: &ConfigResolver) -> Result<()> {
    let cookies = config
        .get_string_or_list("cookies")?
        .unwrap_or(ConfigValue::Scalar("all".to_string()));
    let forwarding = &mut dist.default_cache_behavior.forwarded_values.cookies;
    match cookies {
        ConfigValue::List(names) => {
            forwarding.forward = "whitelist".to_string();
            forwarding.whitelisted_names = Some(names);
        }
        ConfigValue::Scalar(mode) => {
            forwarding.forward = mode;
            forwarding.whitelisted_names = None;
        }
    }
    Ok(())
}

/// Stage 6: header forwarding. A list is forwarded verbatim, `none` means
/// no headers, any other string means all.
fn apply_headers(dist: &mut DistributionConfig, config: &ConfigResolver) -> Result<()> {
    let headers = config
        .get_string_or_list("headers")?
        .unwrap_or(ConfigValue::Scalar("none".to_string()));
    dist.default_cache_behavior.forwarded_values.headers = match headers {
        ConfigValue::List(names) => names,
        ConfigValue::Scalar(mode) if mode == "none" => Vec::new(),
        ConfigValue::Scalar(_) => vec!["*".to_string()],
    };
    Ok(())
}

/// Stage 7: query-string forwarding and cache keys.
fn apply_query_string(dist: &mut DistributionConfig, config: &ConfigResolver) -> Result<()> {
    let querystring = config
        .get_string_or_list("querystring")?
        .unwrap_or(ConfigValue::Scalar("all".to_string()));
    let forwarded = &mut dist.default_cache_behavior.forwarded_values;
    match querystring {
        ConfigValue::List(keys) => {
            forwarded.query_string = true;
            forwarded.query_string_cache_keys = Some(keys);
        }
        ConfigValue::Scalar(mode) => {
            forwarded.query_string = mode == "all";
            forwarded.query_string_cache_keys = None;
        }
    }
    Ok(())
}

/// Stage 8: console comment from the deployment naming scheme.
fn apply_comment(dist: &mut DistributionConfig, context: &DeployContext) {
    dist.comment = context.distribution_comment();
}

/// Stage 9: WAF attachment; absence removes the field.
fn apply_waf(dist: &mut DistributionConfig, config: &ConfigResolver) {
    dist.web_acl_id = config.get_str("waf").filter(|id| !id.is_empty());
}

/// Stage 10: response compression, enabled only by an exact `true`.
fn apply_compress(dist: &mut DistributionConfig, config: &ConfigResolver) {
    dist.default_cache_behavior.compress = config.get_bool("compress") == Some(true);
}

/// Stage 11: minimum TLS protocol version; leaves the fragment default
/// untouched when not configured.
fn apply_minimum_protocol_version(dist: &mut DistributionConfig, config: &ConfigResolver) {
    if let Some(version) = config.get_str("minimumProtocolVersion") {
        if let Some(cert) = dist.viewer_certificate.as_mut() {
            cert.minimum_protocol_version = Some(version);
        }
    }
}

/// Stage 12: cache TTLs.
fn apply_ttl(dist: &mut DistributionConfig, config: &ConfigResolver) -> Result<()> {
    dist.default_cache_behavior.default_ttl = config.get_ttl("defaultTTL")?;
    dist.default_cache_behavior.min_ttl = config.get_ttl("minTTL")?;
    Ok(())
}

/// Stage 13: certificate resolution, the pipeline's only suspension point.
async fn apply_certificate(
    fragment: &mut FragmentDocument,
    config: &ConfigResolver,
    host_name: &HostName,
    certificates: &dyn CertificateService,
) -> Result<Option<CertificateArn>> {
    let configured = config.try_get_str("certificate")?.map(CertificateArn::new);
    let resolved = resolve_certificate(certificates, host_name, configured.as_ref()).await?;

    let dist = distribution_config_mut(fragment);
    match &resolved {
        Some(arn) => {
            let cert = dist
                .viewer_certificate
                .get_or_insert_with(ViewerCertificate::default);
            cert.acm_certificate_arn = Some(arn.as_str().to_string());
        }
        None => dist.viewer_certificate = None,
    }
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(yaml: &str) -> ConfigResolver {
        ConfigResolver::new(serde_yaml::from_str(yaml).expect("valid test yaml"))
    }

    fn base_distribution() -> DistributionConfig {
        load_base_fragment()
            .expect("embedded fragment must parse")
            .resources
            .api_distribution
            .properties
            .distribution_config
    }

    #[test]
    fn domain_scalar_sets_single_alias() {
        let mut fragment = load_base_fragment().expect("fragment");
        let domains =
            apply_domain(&mut fragment, &config("fullDomainName: api.example.com\n"))
                .expect("domain stage");

        let dist = &fragment.resources.api_distribution.properties.distribution_config;
        assert_eq!(dist.aliases, vec!["api.example.com"]);
        assert_eq!(domains.host_name.as_str(), "example.com");

        let dns = &fragment.resources.cloud_front_dns.properties;
        assert_eq!(dns.hosted_zone_name, "example.com.");
        assert_eq!(dns.record_sets[0].name, "api.example.com");
    }

    #[test]
    fn domain_list_derives_from_first_entry() {
        let mut fragment = load_base_fragment().expect("fragment");
        let domains = apply_domain(
            &mut fragment,
            &config("fullDomainName:\n  - api.example.com\n  - www.example.com\n"),
        )
        .expect("domain stage");

        let dist = &fragment.resources.api_distribution.properties.distribution_config;
        assert_eq!(dist.aliases, vec!["api.example.com", "www.example.com"]);
        assert_eq!(domains.host_name.as_str(), "example.com");
        assert_eq!(
            fragment.resources.cloud_front_dns.properties.record_sets[0].name,
            "api.example.com"
        );
    }

    #[test]
    fn missing_domain_is_a_config_error() {
        let mut fragment = load_base_fragment().expect("fragment");
        let err = apply_domain(&mut fragment, &config("{}")).expect_err("required option");
        assert!(matches!(err, CloudfrontierError::Config { .. }));
    }

    #[test]
    fn logging_defaults_to_removed() {
        let mut dist = base_distribution();
        apply_logging(&mut dist, &config("{}"));
        assert!(dist.logging.is_none());
    }

    #[test]
    fn logging_bucket_enables_the_section() {
        let mut dist = base_distribution();
        apply_logging(
            &mut dist,
            &config("logging:\n  bucket: logs.s3.amazonaws.com\n  prefix: api\n"),
        );
        let logging = dist.logging.expect("logging section");
        assert_eq!(logging.bucket, "logs.s3.amazonaws.com");
        assert_eq!(logging.prefix, "api");
    }

    #[test]
    fn logging_prefix_defaults_to_empty() {
        let mut dist = base_distribution();
        apply_logging(&mut dist, &config("logging:\n  bucket: logs.s3.amazonaws.com\n"));
        assert_eq!(dist.logging.expect("logging section").prefix, "");
    }

    #[test]
    fn cookies_list_becomes_whitelist() {
        let mut dist = base_distribution();
        apply_cookies(&mut dist, &config("cookies:\n  - session\n")).expect("cookie stage");
        let cookies = &dist.default_cache_behavior.forwarded_values.cookies;
        assert_eq!(cookies.forward, "whitelist");
        assert_eq!(cookies.whitelisted_names.as_deref(), Some(&["session".to_string()][..]));
    }

    #[test]
    fn cookies_scalar_passes_through_without_whitelist() {
        let mut dist = base_distribution();
        apply_cookies(&mut dist, &config("cookies: none\n")).expect("cookie stage");
        let cookies = &dist.default_cache_behavior.forwarded_values.cookies;
        assert_eq!(cookies.forward, "none");
        assert!(cookies.whitelisted_names.is_none());
    }

    #[test]
    fn headers_none_forwards_nothing() {
        let mut dist = base_distribution();
        apply_headers(&mut dist, &config("{}")).expect("header stage");
        assert!(dist.default_cache_behavior.forwarded_values.headers.is_empty());
    }

    #[test]
    fn headers_other_string_forwards_all() {
        let mut dist = base_distribution();
        apply_headers(&mut dist, &config("headers: all\n")).expect("header stage");
        assert_eq!(
            dist.default_cache_behavior.forwarded_values.headers,
            vec!["*"]
        );
    }

    #[test]
    fn headers_list_is_forwarded_verbatim() {
        let mut dist = base_distribution();
        apply_headers(&mut dist, &config("headers:\n  - Authorization\n")).expect("header stage");
        assert_eq!(
            dist.default_cache_behavior.forwarded_values.headers,
            vec!["Authorization"]
        );
    }

    #[test]
    fn query_string_list_enables_cache_keys() {
        let mut dist = base_distribution();
        apply_query_string(&mut dist, &config("querystring:\n  - page\n")).expect("stage");
        let forwarded = &dist.default_cache_behavior.forwarded_values;
        assert!(forwarded.query_string);
        assert_eq!(
            forwarded.query_string_cache_keys.as_deref(),
            Some(&["page".to_string()][..])
        );
    }

    #[test]
    fn query_string_disabled_unless_all() {
        let mut dist = base_distribution();
        apply_query_string(&mut dist, &config("querystring: whitelist\n")).expect("stage");
        assert!(!dist.default_cache_behavior.forwarded_values.query_string);
    }

    #[test]
    fn waf_absent_removes_the_field() {
        let mut dist = base_distribution();
        apply_waf(&mut dist, &config("{}"));
        assert!(dist.web_acl_id.is_none());
    }

    #[test]
    fn waf_configured_attaches_the_acl() {
        let mut dist = base_distribution();
        apply_waf(&mut dist, &config("waf: acl-1234\n"));
        assert_eq!(dist.web_acl_id.as_deref(), Some("acl-1234"));
    }

    #[test]
    fn compress_requires_exact_true() {
        let mut dist = base_distribution();
        apply_compress(&mut dist, &config("compress: true\n"));
        assert!(dist.default_cache_behavior.compress);
        apply_compress(&mut dist, &config("compress: \"true\"\n"));
        assert!(!dist.default_cache_behavior.compress);
    }

    #[test]
    fn minimum_protocol_version_untouched_by_default() {
        let mut dist = base_distribution();
        let shipped = dist
            .viewer_certificate
            .as_ref()
            .and_then(|c| c.minimum_protocol_version.clone());
        apply_minimum_protocol_version(&mut dist, &config("{}"));
        assert_eq!(
            dist.viewer_certificate
                .as_ref()
                .and_then(|c| c.minimum_protocol_version.clone()),
            shipped
        );
    }

    #[test]
    fn minimum_protocol_version_set_when_configured() {
        let mut dist = base_distribution();
        apply_minimum_protocol_version(&mut dist, &config("minimumProtocolVersion: TLSv1.2_2021\n"));
        assert_eq!(
            dist.viewer_certificate
                .as_ref()
                .and_then(|c| c.minimum_protocol_version.as_deref()),
            Some("TLSv1.2_2021")
        );
    }

    #[test]
    fn ttl_defaults_to_zero() {
        let mut dist = base_distribution();
        apply_ttl(&mut dist, &config("{}")).expect("ttl stage");
        assert_eq!(dist.default_cache_behavior.default_ttl, 0);
        assert_eq!(dist.default_cache_behavior.min_ttl, 0);
    }

    #[test]
    fn ttl_reads_numbers_and_strings() {
        let mut dist = base_distribution();
        apply_ttl(&mut dist, &config("defaultTTL: 300\nminTTL: \"60\"\n")).expect("ttl stage");
        assert_eq!(dist.default_cache_behavior.default_ttl, 300);
        assert_eq!(dist.default_cache_behavior.min_ttl, 60);
    }
}
