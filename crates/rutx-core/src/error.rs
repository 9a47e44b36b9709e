use thiserror::Error;

/// Error type for the provisioning engine.
///
/// Three classes matter to callers: API errors bubbled up from
/// rutx-api (fatal when raised by a reconciler, logged-and-continued
/// inside the apply engine), validation failures caught before any
/// remote work, and SSH/local-process failures from the UCI path.
#[derive(Debug, Error)]
pub enum CoreError {
    /// An HTTP API call failed.
    #[error(transparent)]
    Api(#[from] rutx_api::Error),

    /// Input rejected before touching the device.
    #[error("{message}")]
    Validation { message: String },

    /// SSH command execution failed (connection refused, non-zero
    /// exit, garbled output).
    #[error("SSH error: {message}")]
    Ssh { message: String },

    /// A local subprocess (ping, husarnet) could not be spawned.
    #[error("Failed to run {program}: {source}")]
    Subprocess {
        program: &'static str,
        #[source]
        source: std::io::Error,
    },

    /// A local subprocess ran but reported failure.
    #[error("{program} failed: {message}")]
    SubprocessFailed {
        program: &'static str,
        message: String,
    },
}

impl CoreError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub(crate) fn ssh(message: impl Into<String>) -> Self {
        Self::Ssh {
            message: message.into(),
        }
    }

    /// Returns `true` if this wraps a credential/session failure.
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Api(e) if e.is_auth())
    }
}
