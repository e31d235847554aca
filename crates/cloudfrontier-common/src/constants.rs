//! System-wide constants and fixed identifiers.

/// Application name used in CLI output and the distribution comment.
pub const APP_NAME: &str = "cloudfrontier";

/// Binary name for the CLI.
pub const BIN_NAME: &str = "cfr";

/// Dotted namespace inside the project configuration that holds all
/// cloudfrontier options.
pub const CONFIG_NAMESPACE: &str = "custom.cloudfrontier";

/// Default CloudFront price class when none is configured.
pub const DEFAULT_PRICE_CLASS: &str = "PriceClass_100";

/// Logical ID of the distribution resource in the base fragment, also the
/// stack output key exposing the distribution domain.
pub const DISTRIBUTION_RESOURCE_ID: &str = "ApiDistribution";

/// Hosted-zone ID all CloudFront distributions alias into. Fixed by AWS,
/// identical in every account and region.
pub const CLOUDFRONT_HOSTED_ZONE_ID: &str = "Z2FDTNDATAQYW2";

/// Comment attached to DNS change batches created by the upsert pass.
pub const DNS_CHANGE_COMMENT: &str = "Record created by cloudfrontier";
