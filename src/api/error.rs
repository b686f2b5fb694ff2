//! Request-level error taxonomy.
//!
//! Tool-level failures never reach this module: they are converted to
//! fallback strings inside the tools. Parse failures are outcome data, not
//! errors. What remains is the small set of failures that end a request
//! without a plan result.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use super::types::ErrorResponse;

#[derive(Debug, Error)]
pub enum PlanError {
    /// No model credential: the agent was never constructed and must not
    /// be invoked.
    #[error("OPENROUTER_API_KEY is missing; trip planning is disabled")]
    ConfigurationMissing,

    /// The submission itself was unusable.
    #[error("{0}")]
    InvalidRequest(String),

    /// The model or tool-call framework failed mid-run.
    #[error("Agent execution failed: {0}")]
    Agent(#[source] anyhow::Error),
}

impl PlanError {
    /// Stable machine-readable kind for the error envelope.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ConfigurationMissing => "configuration_missing",
            Self::InvalidRequest(_) => "invalid_request",
            Self::Agent(_) => "agent_failed",
        }
    }

    /// Message safe to show in the UI. Agent internals stay in the logs.
    pub fn user_message(&self) -> String {
        match self {
            Self::ConfigurationMissing => {
                "OPENROUTER_API_KEY is missing. Add it to your .env file and restart the \
                 server, then submit again."
                    .to_string()
            }
            Self::InvalidRequest(message) => message.clone(),
            Self::Agent(_) => {
                "The planning agent failed to complete the request. Please try again.".to_string()
            }
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::ConfigurationMissing => StatusCode::SERVICE_UNAVAILABLE,
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::Agent(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for PlanError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.user_message(),
            kind: self.kind().to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_and_status_mapping() {
        assert_eq!(PlanError::ConfigurationMissing.kind(), "configuration_missing");
        assert_eq!(
            PlanError::InvalidRequest("bad".to_string()).kind(),
            "invalid_request"
        );
        assert_eq!(
            PlanError::Agent(anyhow::anyhow!("boom")).kind(),
            "agent_failed"
        );

        assert_eq!(
            PlanError::ConfigurationMissing.status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            PlanError::Agent(anyhow::anyhow!("boom")).status(),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn test_agent_message_is_generic() {
        let message = PlanError::Agent(anyhow::anyhow!("api key leaked into error")).user_message();
        assert!(!message.contains("leaked"));
        assert!(message.contains("failed to complete"));
    }
}
