// Analysis orchestration: submits the composed upload payload to the remote
// endpoint and tracks in-flight, error, and result state for the dashboard.

pub mod orchestrator;

use async_trait::async_trait;

use crate::api_client::ApiError;
use crate::models::analysis::AnalysisResult;
use crate::upload::form::SubmissionPayload;

/// The remote analysis endpoint. Implemented by `ApiClient`; tests swap in
/// fakes.
#[async_trait]
pub trait AnalysisApi: Send + Sync {
    async fn analyze_resume(
        &self,
        payload: &SubmissionPayload,
        token: Option<&str>,
    ) -> Result<AnalysisResult, ApiError>;
}
