//! File-backed implementations of the service boundaries.
//!
//! The raw AWS clients are out of scope for this workspace; the CLI feeds
//! the pipeline from local listing files instead, using the same wire
//! shapes the certificate service returns.

use std::path::Path;

use async_trait::async_trait;
use cloudfrontier_aws::acm::{CertificateService, CertificateStatus, CertificateSummary};
use cloudfrontier_common::error::{CloudfrontierError, Result};
use serde::Deserialize;

/// Wire shape of a certificate listing response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct CertificateListing {
    certificate_summary_list: Vec<CertificateSummary>,
}

/// Certificate service reading its listing from a JSON file.
#[derive(Debug)]
pub struct FileAcm {
    certificates: Vec<CertificateSummary>,
}

impl FileAcm {
    /// Loads a listing file (`{"CertificateSummaryList": [...]}`).
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| CloudfrontierError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let listing: CertificateListing = serde_json::from_str(&content)?;
        Ok(Self {
            certificates: listing.certificate_summary_list,
        })
    }

    /// A source with no certificates at all.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            certificates: Vec::new(),
        }
    }
}

#[async_trait]
impl CertificateService for FileAcm {
    async fn list_certificates(
        &self,
        _statuses: &[CertificateStatus],
    ) -> Result<Vec<CertificateSummary>> {
        Ok(self.certificates.clone())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use cloudfrontier_common::types::CertificateArn;

    use super::*;

    #[tokio::test]
    async fn loads_the_acm_listing_shape() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(
            file,
            concat!(
                "{{\"CertificateSummaryList\": [",
                "{{\"DomainName\": \"*.example.com\", \"CertificateArn\": \"arn:wild\"}}",
                "]}}"
            )
        )
        .expect("write listing");

        let acm = FileAcm::load(file.path()).expect("listing parses");
        let certificates = acm
            .list_certificates(&cloudfrontier_aws::acm::RESOLVABLE_STATUSES)
            .await
            .expect("listing succeeds");
        assert_eq!(certificates.len(), 1);
        assert_eq!(certificates[0].domain_name, "*.example.com");
        assert_eq!(
            certificates[0].certificate_arn,
            CertificateArn::new("arn:wild")
        );
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = FileAcm::load(Path::new("/nonexistent/listing.json"))
            .expect_err("missing file fails");
        assert!(matches!(err, CloudfrontierError::Io { .. }));
    }
}
