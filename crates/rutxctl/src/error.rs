//! CLI error types with miette diagnostics.
//!
//! Maps `rutx_core::CoreError` and `rutx_api::Error` into user-facing
//! errors with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use rutx_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────

    #[error("Router at {host} is not reachable")]
    #[diagnostic(
        code(rutx::device_unreachable),
        help(
            "Check that the router is powered on and you are on its network.\n\
             Host: {host}\n\
             Override with --device or RUTX_DEVICE."
        )
    )]
    DeviceUnreachable { host: String },

    // ── Authentication ───────────────────────────────────────────────

    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(rutx::auth_failed),
        help(
            "Verify the router username and password.\n\
             Factory credentials are printed on the router label."
        )
    )]
    AuthFailed { message: String },

    #[error("The router rejected the Wi-Fi password")]
    #[diagnostic(
        code(rutx::wifi_auth),
        help("The access point denied authentication. Check the network password.")
    )]
    WrongWifiPassword,

    // ── Connectivity ─────────────────────────────────────────────────

    #[error("No internet connectivity through the router")]
    #[diagnostic(code(rutx::no_internet), help("{hint}"))]
    NoInternet { hint: String },

    // ── API ──────────────────────────────────────────────────────────

    #[error("Router API error ({status}): {body}")]
    #[diagnostic(code(rutx::api_error))]
    Api { status: u16, body: String },

    // ── Setup file ───────────────────────────────────────────────────

    #[error("Could not read setup file '{path}'")]
    #[diagnostic(
        code(rutx::setup_file),
        help("Pass the file with --config; see config.template.json for the format.")
    )]
    SetupFile {
        path: String,
        #[source]
        source: Box<figment::Error>,
    },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(rutx::validation))]
    Validation { field: String, reason: String },

    // ── Subprocess / SSH ─────────────────────────────────────────────

    #[error("SSH command failed: {message}")]
    #[diagnostic(
        code(rutx::ssh),
        help("Check the SSH password and that dropbear is enabled on the router.")
    )]
    Ssh { message: String },

    #[error("Could not run '{program}'")]
    #[diagnostic(
        code(rutx::subprocess),
        help("Make sure '{program}' is installed and on PATH.")
    )]
    Subprocess {
        program: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("'{program}' failed: {message}")]
    #[diagnostic(code(rutx::subprocess_failed))]
    SubprocessFailed {
        program: &'static str,
        message: String,
    },

    // ── IO ───────────────────────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::DeviceUnreachable { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } | Self::WrongWifiPassword => exit_code::AUTH,
            Self::NoInternet { .. } => exit_code::TIMEOUT,
            Self::Validation { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── api/core error mapping ───────────────────────────────────────────

impl From<rutx_api::Error> for CliError {
    fn from(err: rutx_api::Error) -> Self {
        match err {
            rutx_api::Error::Authentication { message } => Self::AuthFailed { message },
            rutx_api::Error::SessionExpired | rutx_api::Error::NotLoggedIn => Self::AuthFailed {
                message: err.to_string(),
            },
            rutx_api::Error::Api { status, body } => Self::Api { status, body },
            other => Self::Api {
                status: 0,
                body: other.to_string(),
            },
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Api(api) => api.into(),
            CoreError::Validation { message } => Self::Validation {
                field: "input".into(),
                reason: message,
            },
            CoreError::Ssh { message } => Self::Ssh { message },
            CoreError::Subprocess { program, source } => Self::Subprocess { program, source },
            CoreError::SubprocessFailed { program, message } => {
                Self::SubprocessFailed { program, message }
            }
        }
    }
}
