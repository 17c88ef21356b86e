use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    /// The identity provider rejected the request. `message` is the
    /// provider's own text, passed through untouched.
    #[error("{message}")]
    Provider {
        status: u16,
        code: Option<String>,
        message: String,
    },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Invalid identity: {0}")]
    InvalidIdentity(String),
}

/// Maximum length for error response bodies in error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

/// GoTrue has returned errors in a few shapes over its lifetime:
/// `{"code":400,"error_code":"invalid_credentials","msg":"..."}`,
/// `{"error":"invalid_grant","error_description":"..."}` and `{"message":"..."}`.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    msg: Option<String>,
    message: Option<String>,
    error_description: Option<String>,
    error: Option<String>,
    error_code: Option<String>,
}

impl AuthError {
    /// Truncate a response body to avoid logging excessive data
    fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            body.to_string()
        } else {
            let cut = (0..=MAX_ERROR_BODY_LENGTH)
                .rev()
                .find(|&i| body.is_char_boundary(i))
                .unwrap_or(0);
            format!("{}... (truncated, {} total bytes)", &body[..cut], body.len())
        }
    }

    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
        let code = parsed.error_code.clone().or_else(|| parsed.error.clone());
        let message = parsed
            .msg
            .or(parsed.error_description)
            .or(parsed.message)
            .or(parsed.error)
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| {
                let truncated = Self::truncate_body(body);
                if truncated.trim().is_empty() {
                    format!("Status {}", status)
                } else {
                    truncated
                }
            });

        AuthError::Provider {
            status: status.as_u16(),
            code,
            message,
        }
    }

    /// HTTP status reported by the provider, if the failure came from one
    pub fn status(&self) -> Option<u16> {
        match self {
            AuthError::Provider { status, .. } => Some(*status),
            AuthError::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_from_status_new_style_body() {
        let body = r#"{"code":400,"error_code":"invalid_credentials","msg":"Invalid login credentials"}"#;
        match AuthError::from_status(StatusCode::BAD_REQUEST, body) {
            AuthError::Provider { status, code, message } => {
                assert_eq!(status, 400);
                assert_eq!(code.as_deref(), Some("invalid_credentials"));
                assert_eq!(message, "Invalid login credentials");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_from_status_oauth_style_body() {
        let body = r#"{"error":"invalid_grant","error_description":"Email not confirmed"}"#;
        let err = AuthError::from_status(StatusCode::BAD_REQUEST, body);
        assert_eq!(err.to_string(), "Email not confirmed");
        match err {
            AuthError::Provider { code, .. } => assert_eq!(code.as_deref(), Some("invalid_grant")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_from_status_plain_text_body() {
        let err = AuthError::from_status(StatusCode::BAD_GATEWAY, "upstream unavailable");
        assert_eq!(err.to_string(), "upstream unavailable");
        assert_eq!(err.status(), Some(502));
    }

    #[test]
    fn test_from_status_empty_body() {
        let err = AuthError::from_status(StatusCode::INTERNAL_SERVER_ERROR, "");
        assert_eq!(err.to_string(), "Status 500 Internal Server Error");
    }

    #[test]
    fn test_from_status_rate_limit_keeps_provider_message() {
        let body = r#"{"code":429,"error_code":"over_email_send_rate_limit","msg":"Email rate limit exceeded"}"#;
        let err = AuthError::from_status(StatusCode::TOO_MANY_REQUESTS, body);
        assert_eq!(err.to_string(), "Email rate limit exceeded");
        assert_eq!(err.status(), Some(429));
        match err {
            AuthError::Provider { code, .. } => {
                assert_eq!(code.as_deref(), Some("over_email_send_rate_limit"))
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_truncate_body() {
        let long = "x".repeat(MAX_ERROR_BODY_LENGTH + 20);
        let truncated = AuthError::truncate_body(&long);
        assert!(truncated.starts_with(&"x".repeat(MAX_ERROR_BODY_LENGTH)));
        assert!(truncated.ends_with("(truncated, 520 total bytes)"));
        assert_eq!(AuthError::truncate_body("short"), "short");
    }
}
