//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use trattoria_config::ConfigError;
use trattoria_core::{CoreError, TransportErrorKind};

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
    pub const CONFLICT: i32 = 6;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────

    #[error("{message}")]
    #[diagnostic(
        code(trattoria::connection_failed),
        help(
            "Check that the back-office API is running and reachable.\n\
             Override the URL with --api-url or TRATTORIA_API_URL."
        )
    )]
    ConnectionFailed { message: String },

    #[error("{message}")]
    #[diagnostic(
        code(trattoria::timeout),
        help("Increase the timeout with --timeout or check server responsiveness.")
    )]
    Timeout { message: String },

    // ── Resources ────────────────────────────────────────────────────

    /// `message` is the server's own text; the hint names what was asked for.
    #[error("{message}")]
    #[diagnostic(
        code(trattoria::not_found),
        help(
            "No {resource_type} '{identifier}'.\n\
             Run: trattoria {list_command} to see available {resource_type}s"
        )
    )]
    NotFound {
        message: String,
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    // ── API ──────────────────────────────────────────────────────────

    #[error("{message}")]
    #[diagnostic(code(trattoria::api_error))]
    Api {
        status: Option<u16>,
        message: String,
    },

    #[error("{message}")]
    #[diagnostic(code(trattoria::engine))]
    Engine { message: String },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(trattoria::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(trattoria::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: trattoria config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error(transparent)]
    #[diagnostic(code(trattoria::config))]
    Config(ConfigError),

    // ── Interactive ──────────────────────────────────────────────────

    #[error("Destructive operation '{action}' requires confirmation")]
    #[diagnostic(
        code(trattoria::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── IO ───────────────────────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::NotFound { .. }
            | Self::Api {
                status: Some(404), ..
            } => exit_code::NOT_FOUND,
            Self::Api {
                status: Some(409), ..
            } => exit_code::CONFLICT,
            Self::Validation { .. }
            | Self::NonInteractiveRequiresYes { .. }
            | Self::ProfileNotFound { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }

    /// Attach the resource a 404 refers to, for a better hint.
    pub fn for_resource(self, resource_type: &str, identifier: &str, list_command: &str) -> Self {
        match self {
            Self::Api {
                status: Some(404),
                message,
            } => Self::NotFound {
                message,
                resource_type: resource_type.into(),
                identifier: identifier.into(),
                list_command: list_command.into(),
            },
            other => other,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Transport(e) => match e.kind {
                TransportErrorKind::Connection => Self::ConnectionFailed { message: e.message },
                TransportErrorKind::Timeout => Self::Timeout { message: e.message },
                TransportErrorKind::NotFound
                | TransportErrorKind::Http
                | TransportErrorKind::Decode
                | TransportErrorKind::Request => Self::Api {
                    status: e.status,
                    message: e.message,
                },
            },
            CoreError::Config { message } => Self::Validation {
                field: "api_url".into(),
                reason: message,
            },
            other @ (CoreError::StoreClosed { .. } | CoreError::Runtime { .. }) => Self::Engine {
                message: other.to_string(),
            },
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            other => Self::Config(other),
        }
    }
}
