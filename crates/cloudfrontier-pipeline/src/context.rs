//! Execution context supplied by the deployment orchestration.

use cloudfrontier_common::constants::APP_NAME;

/// Values the enclosing deployment supplies outside the configuration
/// tree: the stage being deployed and the generated API name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployContext {
    /// Deployment stage, used as the origin path (`/<stage>`).
    pub stage: String,
    /// Generated API name from the deployment naming scheme.
    pub api_name: String,
}

impl DeployContext {
    /// Creates a context for one preparation run.
    #[must_use]
    pub fn new(stage: impl Into<String>, api_name: impl Into<String>) -> Self {
        Self {
            stage: stage.into(),
            api_name: api_name.into(),
        }
    }

    /// Distribution comment derived from the naming scheme.
    #[must_use]
    pub fn distribution_comment(&self) -> String {
        format!("{APP_NAME} - {}", self.api_name)
    }

    /// Origin path for this stage.
    #[must_use]
    pub fn origin_path(&self) -> String {
        format!("/{}", self.stage)
    }
}
