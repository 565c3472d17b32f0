use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

use crate::config::Provider;
use crate::web::models::ErrorResponse;

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("{} API key not found. Set {} in the environment.", .0.display_name(), .0.key_var())]
    MissingApiKey(Provider),
    #[error("{} rate limit reached, try again shortly", .0.display_name())]
    RateLimited(Provider),
    #[error("{} request timed out", .0.display_name())]
    Timeout(Provider),
    #[error("{} request failed: {message}", .provider.display_name())]
    Network { provider: Provider, message: String },
    #[error("{} API error {status}: {body}", .provider.display_name())]
    Upstream {
        provider: Provider,
        status: u16,
        body: String,
    },
    #[error("{} returned an unexpected response: {message}", .provider.display_name())]
    MalformedResponse { provider: Provider, message: String },
}

/// Longest provider error body echoed back to clients, in characters.
pub const MAX_ECHOED_BODY: usize = 300;

impl RelayError {
    /// Non-2xx provider response. The body is cut to `MAX_ECHOED_BODY`
    /// characters so a large upstream page never reaches the client whole.
    pub(crate) fn upstream(provider: Provider, status: u16, body: &str) -> Self {
        let body = match body.char_indices().nth(MAX_ECHOED_BODY) {
            Some((cut, _)) => format!("{}...", &body[..cut]),
            None => body.to_string(),
        };
        RelayError::Upstream {
            provider,
            status,
            body,
        }
    }

    pub(crate) fn from_transport(provider: Provider, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            RelayError::Timeout(provider)
        } else if err.is_decode() {
            RelayError::MalformedResponse {
                provider,
                message: err.to_string(),
            }
        } else {
            RelayError::Network {
                provider,
                message: err.to_string(),
            }
        }
    }
}

impl ResponseError for RelayError {
    fn status_code(&self) -> StatusCode {
        match self {
            RelayError::MissingApiKey(_) => StatusCode::SERVICE_UNAVAILABLE,
            RelayError::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
            RelayError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            RelayError::Network { .. }
            | RelayError::Upstream { .. }
            | RelayError::MalformedResponse { .. } => StatusCode::BAD_GATEWAY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_names_the_variable() {
        let err = RelayError::MissingApiKey(Provider::Gemini);
        assert_eq!(
            err.to_string(),
            "Gemini API key not found. Set GEMINI_API_KEY in the environment."
        );
        assert_eq!(err.status_code(), StatusCode::SERVICE_UNAVAILABLE);

        let err = RelayError::MissingApiKey(Provider::Groq);
        assert!(err.to_string().contains("GROQ_API_KEY"));
    }

    #[test]
    fn upstream_failures_map_to_gateway_statuses() {
        let err = RelayError::upstream(Provider::Groq, 500, "boom");
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(err.to_string(), "Groq API error 500: boom");
        assert_eq!(
            RelayError::Timeout(Provider::Gemini).status_code(),
            StatusCode::GATEWAY_TIMEOUT
        );
        assert_eq!(
            RelayError::RateLimited(Provider::Gemini).status_code(),
            StatusCode::TOO_MANY_REQUESTS
        );
    }

    #[test]
    fn provider_names_are_capitalized_in_messages() {
        assert_eq!(
            RelayError::Timeout(Provider::Gemini).to_string(),
            "Gemini request timed out"
        );
        let err = RelayError::Network {
            provider: Provider::Groq,
            message: "connection refused".to_string(),
        };
        assert_eq!(err.to_string(), "Groq request failed: connection refused");
    }

    #[test]
    fn long_upstream_bodies_are_truncated() {
        let body = "é".repeat(MAX_ECHOED_BODY + 50);
        match RelayError::upstream(Provider::Gemini, 503, &body) {
            RelayError::Upstream { body, status, .. } => {
                assert_eq!(status, 503);
                assert!(body.ends_with("..."));
                assert_eq!(body.chars().count(), MAX_ECHOED_BODY + 3);
            }
            other => panic!("expected upstream error, got {other}"),
        }

        let short = RelayError::upstream(Provider::Gemini, 500, "short body");
        assert!(short.to_string().ends_with(": short body"));
    }
}
