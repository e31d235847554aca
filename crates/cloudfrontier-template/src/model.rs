//! Typed model of the distribution + DNS resource fragment.
//!
//! Field names follow the CloudFormation schema via PascalCase renames.
//! Sections the pipeline may remove (`Logging`, `WebACLId`,
//! `ViewerCertificate`) are `Option`s that skip serialization entirely when
//! absent, so a removed section never reappears as an empty mapping.
//! CloudFormation intrinsics (`Fn::Join`, `Fn::GetAtt`, `Ref`) the pipeline
//! never touches pass through as raw YAML values.

use std::collections::BTreeMap;

use cloudfrontier_common::error::Result;
use serde::{Deserialize, Serialize};
use serde_yaml::Value;

/// The full fragment document merged into the deployment template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FragmentDocument {
    /// CloudFormation resources: the distribution and its DNS record group.
    pub resources: FragmentResources,
    /// Stack outputs exposing the distribution domain.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outputs: Option<Value>,
}

impl FragmentDocument {
    /// Converts the prepared fragment into a raw YAML value for merging.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails, which indicates a defect in
    /// the model rather than a user error.
    pub fn into_value(self) -> Result<Value> {
        Ok(serde_yaml::to_value(self)?)
    }
}

/// The two resources every fragment carries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FragmentResources {
    /// The CloudFront distribution resource.
    pub api_distribution: DistributionResource,
    /// The Route53 record-set-group resource.
    pub cloud_front_dns: DnsResource,
}

/// `AWS::CloudFront::Distribution` resource wrapper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DistributionResource {
    /// CloudFormation resource type.
    #[serde(rename = "Type")]
    pub resource_type: String,
    /// Resource properties.
    pub properties: DistributionProperties,
}

/// Properties of the distribution resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DistributionProperties {
    /// The distribution configuration the pipeline mutates.
    pub distribution_config: DistributionConfig,
}

/// CloudFront distribution configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DistributionConfig {
    /// Alternate domain names (CNAMEs) for the distribution.
    #[serde(default)]
    pub aliases: Vec<String>,
    /// Human-readable comment shown in the console.
    pub comment: String,
    /// Price class controlling the edge locations used.
    pub price_class: String,
    /// Origins the distribution pulls from; the base fragment ships one.
    pub origins: Vec<Origin>,
    /// Cache behavior applied to all requests.
    pub default_cache_behavior: CacheBehavior,
    /// Access logging; removed entirely when not configured.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logging: Option<LoggingConfig>,
    /// Attached WAF web ACL; removed entirely when not configured.
    #[serde(rename = "WebACLId", default, skip_serializing_if = "Option::is_none")]
    pub web_acl_id: Option<String>,
    /// TLS certificate for the aliases; removed when none is resolved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub viewer_certificate: Option<ViewerCertificate>,
    /// Fields the pipeline never touches (`Enabled`, `HttpVersion`, ...).
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// A single distribution origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Origin {
    /// Origin identifier referenced by cache behaviors.
    pub id: String,
    /// Origin domain name; a CloudFormation intrinsic in the base fragment.
    pub domain_name: Value,
    /// Path prefix appended to origin requests.
    #[serde(default)]
    pub origin_path: String,
    /// Remaining origin settings passed through untouched.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Default cache behavior of the distribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CacheBehavior {
    /// Origin this behavior routes to.
    pub target_origin_id: String,
    /// Request attributes forwarded to the origin.
    pub forwarded_values: ForwardedValues,
    /// Whether CloudFront compresses responses.
    #[serde(default)]
    pub compress: bool,
    /// Default cache TTL in seconds.
    #[serde(rename = "DefaultTTL", default)]
    pub default_ttl: u64,
    /// Minimum cache TTL in seconds.
    #[serde(rename = "MinTTL", default)]
    pub min_ttl: u64,
    /// Remaining behavior settings passed through untouched.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Request attributes forwarded to the origin and used in the cache key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ForwardedValues {
    /// Whether query strings are forwarded.
    pub query_string: bool,
    /// Query parameters included in the cache key, when whitelisted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_string_cache_keys: Option<Vec<String>>,
    /// Cookie forwarding mode.
    pub cookies: CookieForwarding,
    /// Headers forwarded to the origin; `["*"]` forwards all.
    #[serde(default)]
    pub headers: Vec<String>,
}

/// Cookie forwarding mode and optional whitelist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CookieForwarding {
    /// One of `all`, `none`, or `whitelist`.
    pub forward: String,
    /// Cookie names forwarded when the mode is `whitelist`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub whitelisted_names: Option<Vec<String>>,
}

/// Access logging destination.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LoggingConfig {
    /// Whether cookies are included in access logs.
    #[serde(default)]
    pub include_cookies: bool,
    /// Destination S3 bucket.
    #[serde(default)]
    pub bucket: String,
    /// Key prefix for log objects.
    #[serde(default)]
    pub prefix: String,
}

/// Viewer certificate settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ViewerCertificate {
    /// ARN of the ACM certificate serving the aliases.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acm_certificate_arn: Option<String>,
    /// SSL support method, `sni-only` in the base fragment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssl_support_method: Option<String>,
    /// Minimum TLS protocol version viewers must speak.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_protocol_version: Option<String>,
}

/// `AWS::Route53::RecordSetGroup` resource wrapper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DnsResource {
    /// CloudFormation resource type.
    #[serde(rename = "Type")]
    pub resource_type: String,
    /// Resource properties.
    pub properties: DnsProperties,
}

/// Properties of the DNS record group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DnsProperties {
    /// Hosted zone the records live in, with a trailing dot.
    pub hosted_zone_name: String,
    /// Record sets; the base fragment ships one alias record.
    pub record_sets: Vec<RecordSet>,
}

/// A single DNS record set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RecordSet {
    /// Fully qualified record name.
    pub name: String,
    /// Record type, `A` for the alias record.
    #[serde(rename = "Type")]
    pub record_type: String,
    /// Alias target; a CloudFormation intrinsic in the base fragment.
    pub alias_target: Value,
}
