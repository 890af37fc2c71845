//! API Client — the single point of entry for all calls to the resume analysis
//! service.
//!
//! Endpoints:
//! - `POST /api/analyze-resume` (multipart, bearer auth)
//! - `GET  /api/users/me`       (bearer auth)
//! - `POST /api/auth/token`     (form login)
//! - `POST /api/auth/signup`    (JSON signup)
//!
//! Calls are never retried here; a failed request is reported to the caller.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::analysis::AnalysisApi;
use crate::auth::controller::IdentityApi;
use crate::models::analysis::AnalysisResult;
use crate::models::user::{SignupRequest, TokenResponse, User};
use crate::upload::form::SubmissionPayload;

pub const ANALYZE_PATH: &str = "/api/analyze-resume";
pub const CURRENT_USER_PATH: &str = "/api/users/me";
pub const LOGIN_PATH: &str = "/api/auth/token";
pub const SIGNUP_PATH: &str = "/api/auth/signup";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {}", .detail.as_deref().unwrap_or("no detail"))]
    Status { status: u16, detail: Option<String> },

    #[error("Could not read resume file: {0}")]
    File(#[from] std::io::Error),
}

/// HTTP client for the analysis service.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Uploads the resume and form fields for analysis.
    pub async fn analyze_resume(
        &self,
        payload: &SubmissionPayload,
        token: Option<&str>,
    ) -> Result<AnalysisResult, ApiError> {
        let file = payload.resume_file();
        let contents = file.read_contents().await?;

        let length = contents.len() as u64;
        let part = Part::stream_with_length(contents, length)
            .file_name(file.name.clone())
            .mime_str(&file.mime_type)?;

        let mut form = Form::new()
            .text("target_role", payload.target_role().to_string())
            .text("job_description", payload.job_description().to_string());
        if let Some(level) = payload.experience_level() {
            form = form.text("experience_level", level.as_str());
        }
        let form = form.part("resume_file", part);

        info!(
            "Submitting {} ({}) for role '{}'",
            file.name,
            file.display_size(),
            payload.target_role()
        );

        let request = with_bearer(self.client.post(self.url(ANALYZE_PATH)), token).multipart(form);
        let result: AnalysisResult = send_json(request).await?;

        debug!("Analysis complete: overall_score={}", result.overall_score);
        Ok(result)
    }

    /// Resolves the identity behind a bearer token.
    pub async fn fetch_current_user(&self, token: &str) -> Result<User, ApiError> {
        let request = self.client.get(self.url(CURRENT_USER_PATH)).bearer_auth(token);
        send_json(request).await
    }

    /// Exchanges email and password for an access token.
    pub async fn login(&self, email: &str, password: &str) -> Result<TokenResponse, ApiError> {
        let request = self
            .client
            .post(self.url(LOGIN_PATH))
            .form(&[("username", email), ("password", password)]);
        send_json(request).await
    }

    /// Registers a new account and returns its access token.
    pub async fn signup(&self, email: &str, password: &str) -> Result<TokenResponse, ApiError> {
        let request = self
            .client
            .post(self.url(SIGNUP_PATH))
            .json(&SignupRequest { email, password });
        send_json(request).await
    }
}

#[async_trait]
impl AnalysisApi for ApiClient {
    async fn analyze_resume(
        &self,
        payload: &SubmissionPayload,
        token: Option<&str>,
    ) -> Result<AnalysisResult, ApiError> {
        ApiClient::analyze_resume(self, payload, token).await
    }
}

#[async_trait]
impl IdentityApi for ApiClient {
    async fn fetch_current_user(&self, token: &str) -> Result<User, ApiError> {
        ApiClient::fetch_current_user(self, token).await
    }
}

fn with_bearer(request: RequestBuilder, token: Option<&str>) -> RequestBuilder {
    match token {
        Some(token) => request.bearer_auth(token),
        None => request,
    }
}

async fn send_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, ApiError> {
    let response = request.send().await?;
    let response = check_status(response).await?;
    Ok(response.json().await?)
}

/// Turns a non-success response into `ApiError::Status`, keeping the
/// server's `detail` message when the body carries one as a string.
async fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let detail = extract_detail(&body);
    warn!("API returned {}: {}", status, detail.as_deref().unwrap_or("<no detail>"));

    Err(ApiError::Status {
        status: status.as_u16(),
        detail,
    })
}

fn extract_detail(body: &str) -> Option<String> {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()?
        .get("detail")?
        .as_str()
        .filter(|detail| !detail.trim().is_empty())
        .map(String::from)
}
