//! Post-deployment summary of the distribution.
//!
//! Pure lookup over gathered stack outputs; formatting and printing belong
//! to the caller.

use cloudfrontier_common::constants::DISTRIBUTION_RESOURCE_ID;
use cloudfrontier_common::types::DomainName;
use serde::{Deserialize, Serialize};

use crate::configurator::DomainSettings;

/// One stack output as gathered after deployment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StackOutput {
    /// Logical output key.
    pub output_key: String,
    /// Output value; absent when the stack did not produce one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_value: Option<String>,
}

/// The resolved distribution domain and its configured aliases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentSummary {
    /// CloudFront domain the distribution is served from.
    pub distribution_domain: String,
    /// Aliases pointing at the distribution, in configuration order.
    pub aliases: Vec<DomainName>,
}

/// Extracts the distribution summary from gathered stack outputs.
///
/// Returns `None` when the distribution output is absent or empty, which
/// happens when the stack was deployed without this fragment.
#[must_use]
pub fn summarize(outputs: &[StackOutput], domains: &DomainSettings) -> Option<DeploymentSummary> {
    let distribution_domain = outputs
        .iter()
        .find(|output| output.output_key == DISTRIBUTION_RESOURCE_ID)
        .and_then(|output| output.output_value.clone())
        .filter(|value| !value.is_empty())?;

    Some(DeploymentSummary {
        distribution_domain,
        aliases: domains.aliases.clone(),
    })
}

#[cfg(test)]
mod tests {
    use cloudfrontier_common::types::HostName;

    use super::*;

    fn domains() -> DomainSettings {
        DomainSettings {
            aliases: vec![DomainName::new("api.example.com")],
            host_name: HostName::new("example.com"),
        }
    }

    fn output(key: &str, value: Option<&str>) -> StackOutput {
        StackOutput {
            output_key: key.to_string(),
            output_value: value.map(str::to_string),
        }
    }

    #[test]
    fn finds_the_distribution_output() {
        let outputs = vec![
            output("ServiceEndpoint", Some("https://x.execute-api.amazonaws.com")),
            output("ApiDistribution", Some("d123.cloudfront.net")),
        ];
        let summary = summarize(&outputs, &domains()).expect("output present");
        assert_eq!(summary.distribution_domain, "d123.cloudfront.net");
        assert_eq!(summary.aliases, vec![DomainName::new("api.example.com")]);
    }

    #[test]
    fn absent_output_yields_none() {
        let outputs = vec![output("ServiceEndpoint", Some("https://elsewhere"))];
        assert!(summarize(&outputs, &domains()).is_none());
    }

    #[test]
    fn empty_output_value_yields_none() {
        let outputs = vec![output("ApiDistribution", None)];
        assert!(summarize(&outputs, &domains()).is_none());
    }
}
