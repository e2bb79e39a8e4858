use log::{debug, warn};

use crate::completion;
use crate::{AuthContext, AuthError, Modality, Platform};

/// Justification shown by the system prompt when none is configured.
pub const DEFAULT_REASON: &str = "Authenticate to continue";

/// Result of one authentication attempt: the modality used, or why it failed.
pub type AuthOutcome = Result<Modality, AuthError>;

/// Configuration for an [`Authenticator`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatorConfig {
    reason: String,
}

impl Default for AuthenticatorConfig {
    fn default() -> Self {
        Self {
            reason: DEFAULT_REASON.to_string(),
        }
    }
}

impl AuthenticatorConfig {
    /// Create a config with the default reason.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the justification shown to the user.
    ///
    /// Blank reasons are ignored; the system prompt refuses them.
    #[must_use]
    pub fn reason(mut self, reason: impl Into<String>) -> Self {
        let reason = reason.into();
        if reason.trim().is_empty() {
            warn!("ignoring blank authentication reason");
        } else {
            self.reason = reason;
        }
        self
    }

    /// The justification passed to the platform.
    #[must_use]
    pub fn justification(&self) -> &str {
        &self.reason
    }
}

/// Runs one-shot biometric challenges.
///
/// Callers are expected not to overlap attempts on the same instance.
#[derive(Debug, Clone, Default)]
pub struct Authenticator<P> {
    platform: P,
    config: AuthenticatorConfig,
}

impl<P: Platform> Authenticator<P> {
    /// Creates an authenticator with the default configuration.
    pub fn new(platform: P) -> Self {
        Self::with_config(platform, AuthenticatorConfig::default())
    }

    /// Creates an authenticator with `config`.
    pub const fn with_config(platform: P, config: AuthenticatorConfig) -> Self {
        Self { platform, config }
    }

    /// The active configuration.
    pub const fn config(&self) -> &AuthenticatorConfig {
        &self.config
    }

    /// Run one attempt and hand its outcome to `callback`.
    ///
    /// `callback` runs exactly once, on the task awaiting this call.
    pub async fn authenticate<F>(&self, callback: F)
    where
        F: FnOnce(AuthOutcome),
    {
        callback(self.attempt().await);
    }

    /// Run one attempt: check capability on a fresh context, then challenge.
    ///
    /// # Errors
    /// [`AuthError::Unsupported`] when the capability check fails (no
    /// challenge is issued); [`AuthError::Failed`] when the challenge does not
    /// succeed.
    pub async fn attempt(&self) -> AuthOutcome {
        let mut context = self.platform.new_context();

        let modality = match context.can_evaluate().await {
            Ok(modality) => modality,
            Err(err) => {
                debug!("skipping challenge, biometric policy not satisfiable: {err}");
                return Err(AuthError::Unsupported);
            }
        };

        debug!("issuing {modality} challenge");
        let (reply, completion) = completion::channel();
        context.evaluate(self.config.justification(), reply).await;

        match completion.wait().await {
            Ok(()) => Ok(modality),
            Err(err) => {
                warn!("biometric challenge failed: {err}");
                Err(AuthError::failed(&err))
            }
        }
    }
}
