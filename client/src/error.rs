//! Error types for the character client

use serde::Deserialize;
use thiserror::Error;

/// Result type for client calls
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors returned by [`crate::CharacterClient`]
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure or undecodable response body
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The base URL could not be parsed
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// The base URL cannot carry a path, e.g. `mailto:`
    #[error("Base URL cannot be used for API calls: {0}")]
    InvalidBaseUrl(String),

    /// The server answered with an error envelope
    #[error("API error {status} {code}: {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Machine-readable error code, e.g. `character_not_found`
        code: String,
        /// Human-readable message
        message: String,
        /// Whether the server marked the request as safe to retry
        allow_retry: bool,
    },
}

impl ClientError {
    /// Machine-readable code of an API error
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Api { code, .. } => Some(code),
            _ => None,
        }
    }

    /// Whether the failed call may be retried as is
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Api {
                allow_retry: true,
                ..
            }
        )
    }

    /// Builds an API error from a non-success response body
    ///
    /// Bodies that are not an error envelope keep the raw text as the message.
    pub(crate) fn from_response_body(status: u16, body: &str) -> Self {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Envelope {
            allow_retry: bool,
            error: Body,
        }

        #[derive(Deserialize)]
        struct Body {
            code: String,
            message: String,
        }

        match serde_json::from_str::<Envelope>(body) {
            Ok(envelope) => Self::Api {
                status,
                code: envelope.error.code,
                message: envelope.error.message,
                allow_retry: envelope.allow_retry,
            },
            Err(_) => Self::Api {
                status,
                code: "unknown".to_string(),
                message: body.to_string(),
                allow_retry: false,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_decodes_error_envelope() {
        let err = ClientError::from_response_body(
            409,
            r#"{"allowRetry":true,"error":{"code":"concurrent_modification","message":"Character was modified by another request"}}"#,
        );

        assert_eq!(err.code(), Some("concurrent_modification"));
        assert!(err.is_retryable());
        assert!(matches!(err, ClientError::Api { status: 409, .. }));
    }

    #[test]
    fn test_keeps_raw_body_when_not_an_envelope() {
        let err = ClientError::from_response_body(502, "Bad Gateway");

        match err {
            ClientError::Api {
                status,
                code,
                message,
                allow_retry,
            } => {
                assert_eq!(status, 502);
                assert_eq!(code, "unknown");
                assert_eq!(message, "Bad Gateway");
                assert!(!allow_retry);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
