use thiserror::Error;

/// Why an authentication attempt did not succeed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The device or policy cannot evaluate biometrics.
    #[error("biometric authentication is not supported on this device")]
    Unsupported,
    /// The challenge ran and did not succeed.
    ///
    /// Covers cancellation, lockout and any other platform-reported failure;
    /// the cause is only kept as free-form text.
    #[error("biometric authentication failed")]
    Failed {
        /// Message reported by the platform, if any.
        diagnostic: Option<String>,
    },
}

impl AuthError {
    pub(crate) fn failed(cause: &PlatformError) -> Self {
        Self::Failed {
            diagnostic: Some(cause.to_string()),
        }
    }

    /// Platform message attached to a failed challenge.
    #[must_use]
    pub fn diagnostic(&self) -> Option<&str> {
        match self {
            Self::Failed { diagnostic } => diagnostic.as_deref(),
            Self::Unsupported => None,
        }
    }
}

/// Errors reported by a platform backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlatformError {
    /// The platform rejected the request with a message.
    #[error("{0}")]
    Message(String),
    /// The platform released the reply without ever answering.
    #[error("platform dropped the reply without answering")]
    Abandoned,
}

impl PlatformError {
    /// Shorthand for [`PlatformError::Message`].
    pub fn message(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::{AuthError, PlatformError};

    #[test]
    fn failed_keeps_platform_text() {
        let err = AuthError::failed(&PlatformError::message("User canceled"));
        assert_eq!(err.diagnostic(), Some("User canceled"));
        assert_eq!(err.to_string(), "biometric authentication failed");
    }

    #[test]
    fn unsupported_has_no_diagnostic() {
        assert_eq!(AuthError::Unsupported.diagnostic(), None);
    }
}
