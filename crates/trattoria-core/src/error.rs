// ── Core error types ──
//
// `TransportError` is what the reducer stores and the UI shows: its
// message is already human-readable. `CoreError` covers engine
// construction and lifecycle. The `From<trattoria_api::Error>` impls
// translate HTTP-layer failures into these.

use thiserror::Error;
use tracing::debug;

use crate::entity::EntityKind;

/// Broad failure category of a transport call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum TransportErrorKind {
    /// HTTP 404 on a by-id operation.
    NotFound,
    /// Any other non-2xx response.
    Http,
    Timeout,
    /// Connection refused, DNS failure, TLS failure.
    Connection,
    /// Response body did not match the expected shape.
    Decode,
    /// Request could not be built (bad base URL, invalid id).
    Request,
}

/// A failed transport call, as stored in `CollectionState::last_error`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct TransportError {
    pub status: Option<u16>,
    pub kind: TransportErrorKind,
    pub message: String,
}

impl TransportError {
    pub fn new(kind: TransportErrorKind, status: Option<u16>, message: impl Into<String>) -> Self {
        Self {
            status,
            kind,
            message: message.into(),
        }
    }

    /// An HTTP error carrying the server's message.
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        let kind = if status == 404 {
            TransportErrorKind::NotFound
        } else {
            TransportErrorKind::Http
        };
        Self::new(kind, Some(status), message)
    }

    pub fn is_not_found(&self) -> bool {
        self.kind == TransportErrorKind::NotFound
    }
}

impl From<trattoria_api::Error> for TransportError {
    fn from(err: trattoria_api::Error) -> Self {
        use trattoria_api::Error as Api;

        match err {
            Api::Api { status, message } => Self::http(status, message),
            Api::Timeout { timeout_secs } => Self::new(
                TransportErrorKind::Timeout,
                None,
                format!("The server did not respond within {timeout_secs}s"),
            ),
            Api::Transport(ref e) if e.is_timeout() => Self::new(
                TransportErrorKind::Timeout,
                None,
                "The server did not respond in time",
            ),
            Api::Transport(ref e) if e.is_connect() => Self::new(
                TransportErrorKind::Connection,
                None,
                format!(
                    "Cannot reach the server at {}",
                    e.url().map_or_else(|| "<unknown>".into(), |u| u.origin().ascii_serialization())
                ),
            ),
            Api::Transport(e) => Self::new(
                TransportErrorKind::Connection,
                e.status().map(|s| s.as_u16()),
                format!("Network error: {e}"),
            ),
            Api::Deserialization { message, body: _ } => {
                debug!(detail = %message, "response could not be decoded");
                Self::new(
                    TransportErrorKind::Decode,
                    None,
                    "The server sent a response the console could not read",
                )
            }
            Api::InvalidUrl(e) => Self::new(
                TransportErrorKind::Request,
                None,
                format!("Invalid request URL: {e}"),
            ),
            Api::ClientBuild(message) => Self::new(
                TransportErrorKind::Request,
                None,
                format!("HTTP client unavailable: {message}"),
            ),
        }
    }
}

/// Unified error type for engine setup and lifecycle.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Remote errors ────────────────────────────────────────────────
    #[error(transparent)]
    Transport(#[from] TransportError),

    // ── Lifecycle errors ─────────────────────────────────────────────
    #[error("The {kind} store has shut down")]
    StoreClosed { kind: EntityKind },

    #[error("No async runtime available: {message}")]
    Runtime { message: String },
}

impl From<trattoria_api::Error> for CoreError {
    fn from(err: trattoria_api::Error) -> Self {
        match err {
            trattoria_api::Error::InvalidUrl(e) => Self::Config {
                message: format!("Invalid API URL: {e}"),
            },
            trattoria_api::Error::ClientBuild(message) => Self::Config { message },
            other => Self::Transport(other.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_keeps_server_message_verbatim() {
        let err: TransportError = trattoria_api::Error::Api {
            status: 404,
            message: "not found".into(),
        }
        .into();
        assert!(err.is_not_found());
        assert_eq!(err.status, Some(404));
        assert_eq!(err.to_string(), "not found");
    }

    #[test]
    fn conflict_is_plain_http() {
        let err = TransportError::http(409, "Email already registered");
        assert_eq!(err.kind, TransportErrorKind::Http);
        assert!(!err.is_not_found());
    }

    #[test]
    fn timeout_message_is_readable() {
        let err: TransportError = trattoria_api::Error::Timeout { timeout_secs: 30 }.into();
        assert_eq!(err.kind, TransportErrorKind::Timeout);
        assert_eq!(err.message, "The server did not respond within 30s");
    }

    #[test]
    fn decode_errors_hide_the_body() {
        let err: TransportError = trattoria_api::Error::Deserialization {
            message: "invalid type: string \"<html>\", expected a sequence".into(),
            body: "<html>".into(),
        }
        .into();
        assert_eq!(err.kind, TransportErrorKind::Decode);
        assert!(!err.message.contains("<html>"));
        assert!(!err.message.is_empty());
    }

    #[test]
    fn invalid_url_is_a_config_error() {
        let err: CoreError =
            trattoria_api::Error::InvalidUrl(url::ParseError::EmptyHost).into();
        assert!(matches!(err, CoreError::Config { .. }));
    }
}
