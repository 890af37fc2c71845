use std::fmt;

use thiserror::Error;

use crate::api_client::ApiError;

/// Fixed banner shown when the analysis endpoint answers 403.
pub const QUOTA_EXCEEDED_MESSAGE: &str =
    "Usage limit exceeded. You have reached the maximum of 50 resume analyses.";

/// Banner shown when a failed analysis carries no server detail.
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong. Please try again.";

/// Rejection reasons from the file validator. The display text is shown to
/// the user verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("File too large. Max 10MB.")]
    FileTooLarge,

    #[error("Invalid file type. Please upload PDF, DOC, or DOCX.")]
    InvalidFileType,
}

/// Identity resolution failures. These never reach the user as a message;
/// the session is cleared and protected routes redirect to login.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Identity request failed: {0}")]
    Api(#[from] ApiError),

    #[error("Token store error: {0}")]
    Store(#[from] std::io::Error),
}

/// Failures of a resume analysis submission. All are recoverable: the form
/// stays usable and resubmission is allowed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    QuotaExceeded,
    /// Carries the server's `detail` message when one was sent.
    RequestFailed(Option<String>),
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisError::QuotaExceeded => f.write_str(QUOTA_EXCEEDED_MESSAGE),
            AnalysisError::RequestFailed(detail) => {
                f.write_str(detail.as_deref().unwrap_or(GENERIC_FAILURE_MESSAGE))
            }
        }
    }
}

impl std::error::Error for AnalysisError {}

impl From<&ApiError> for AnalysisError {
    fn from(err: &ApiError) -> Self {
        match err {
            ApiError::Status { status: 403, .. } => AnalysisError::QuotaExceeded,
            ApiError::Status { detail, .. } => AnalysisError::RequestFailed(
                detail
                    .as_deref()
                    .filter(|detail| !detail.trim().is_empty())
                    .map(String::from),
            ),
            _ => AnalysisError::RequestFailed(None),
        }
    }
}

/// Top-level client error used at the command boundary.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Not logged in")]
    Unauthenticated,

    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),

    #[error("Analysis failed: {0}")]
    Analysis(#[from] AnalysisError),

    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl ClientError {
    /// The text surfaced to the user for this error. Internal details are
    /// logged instead of shown.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Validation(e) => e.to_string(),
            ClientError::Unauthenticated => {
                "Please log in first: run `resume-optimizer login`.".to_string()
            }
            ClientError::Auth(AuthError::Store(e)) => {
                tracing::error!("Token store error: {e}");
                "Could not save your session. Check that the token file is writable.".to_string()
            }
            ClientError::Auth(e) => {
                tracing::warn!("Auth error: {e}");
                "Your session has expired. Please log in again.".to_string()
            }
            ClientError::Analysis(e) => e.to_string(),
            ClientError::Api(ApiError::Status {
                detail: Some(detail),
                ..
            }) => detail.clone(),
            ClientError::Api(e) => {
                tracing::error!("API error: {e}");
                GENERIC_FAILURE_MESSAGE.to_string()
            }
            ClientError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                format!("An internal error occurred: {e}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_messages_are_exact() {
        assert_eq!(
            ValidationError::FileTooLarge.to_string(),
            "File too large. Max 10MB."
        );
        assert_eq!(
            ValidationError::InvalidFileType.to_string(),
            "Invalid file type. Please upload PDF, DOC, or DOCX."
        );
    }

    #[test]
    fn test_403_maps_to_quota_even_with_detail() {
        let err = ApiError::Status {
            status: 403,
            detail: Some("Usage limit reached".to_string()),
        };
        assert_eq!(AnalysisError::from(&err), AnalysisError::QuotaExceeded);
        assert_eq!(AnalysisError::QuotaExceeded.to_string(), QUOTA_EXCEEDED_MESSAGE);
    }

    #[test]
    fn test_detail_is_used_verbatim() {
        let err = ApiError::Status {
            status: 500,
            detail: Some("Server Explosion".to_string()),
        };
        assert_eq!(AnalysisError::from(&err).to_string(), "Server Explosion");
    }

    #[test]
    fn test_missing_detail_falls_back_to_generic() {
        let err = ApiError::Status {
            status: 502,
            detail: None,
        };
        assert_eq!(AnalysisError::from(&err).to_string(), GENERIC_FAILURE_MESSAGE);
    }

    #[test]
    fn test_blank_detail_falls_back_to_generic() {
        for blank in ["", "  \n"] {
            let err = ApiError::Status {
                status: 500,
                detail: Some(blank.to_string()),
            };
            assert_eq!(AnalysisError::from(&err), AnalysisError::RequestFailed(None));
            assert_eq!(AnalysisError::from(&err).to_string(), GENERIC_FAILURE_MESSAGE);
        }
    }

    #[test]
    fn test_store_failure_is_not_reported_as_expired_session() {
        let err = ClientError::from(AuthError::Store(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "read-only",
        )));
        let message = err.user_message();
        assert_eq!(message, "Could not save your session. Check that the token file is writable.");
        assert!(!message.contains("expired"));
    }

    #[test]
    fn test_identity_failure_reads_as_expired_session() {
        let err = ClientError::from(AuthError::Api(ApiError::Status {
            status: 401,
            detail: None,
        }));
        assert_eq!(err.user_message(), "Your session has expired. Please log in again.");
    }

    #[test]
    fn test_user_message_for_validation_is_reason() {
        let err = ClientError::from(ValidationError::InvalidFileType);
        assert_eq!(
            err.user_message(),
            "Invalid file type. Please upload PDF, DOC, or DOCX."
        );
    }
}
