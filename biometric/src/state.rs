use log::debug;
use tokio::sync::watch;

use crate::{
    AuthError, AuthOutcome, Authenticator, AuthenticatorConfig, CapabilityProber, Platform,
};

/// The two flags a front end observes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AuthState {
    /// Whether the authenticate action should be enabled.
    pub supported: bool,
    /// `None` until an attempt finished, then whether it succeeded.
    pub authenticated: Option<bool>,
}

impl AuthState {
    /// Initial state after probing.
    #[must_use]
    pub const fn new(supported: bool) -> Self {
        Self {
            supported,
            authenticated: None,
        }
    }

    /// Fold an attempt's outcome into the flags.
    pub fn apply(&mut self, outcome: &AuthOutcome) {
        match outcome {
            Ok(_) => self.authenticated = Some(true),
            Err(AuthError::Failed { .. }) => self.authenticated = Some(false),
            Err(AuthError::Unsupported) => {
                self.supported = false;
                self.authenticated = Some(false);
            }
        }
    }
}

/// Presentation state for an "Authenticate" action.
///
/// Probes support once when loaded and only reaches the authenticator while
/// the action is enabled.
#[derive(Debug)]
pub struct AuthViewModel<P> {
    authenticator: Authenticator<P>,
    state: watch::Sender<AuthState>,
}

impl<P: Platform + Clone> AuthViewModel<P> {
    /// Probe `platform` and build the view model.
    pub async fn load(platform: P, config: AuthenticatorConfig) -> Self {
        let supported = CapabilityProber::new(platform.clone()).is_supported().await;
        debug!("biometric action enabled: {supported}");
        let (state, _) = watch::channel(AuthState::new(supported));

        Self {
            authenticator: Authenticator::with_config(platform, config),
            state,
        }
    }

    /// Current flags.
    pub fn state(&self) -> AuthState {
        *self.state.borrow()
    }

    /// Observe flag changes.
    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }

    /// The user pressed the action.
    ///
    /// Returns `None` without touching the platform when the action is
    /// disabled, otherwise the attempt's outcome after the flags were updated.
    pub async fn trigger(&self) -> Option<AuthOutcome> {
        if !self.state.borrow().supported {
            debug!("authenticate action is disabled");
            return None;
        }

        let mut delivered = None;
        self.authenticator
            .authenticate(|outcome| {
                self.state.send_modify(|state| state.apply(&outcome));
                delivered = Some(outcome);
            })
            .await;
        delivered
    }
}

#[cfg(test)]
mod tests {
    use super::{AuthState, AuthViewModel};
    use crate::testing::FakePlatform;
    use crate::{AuthError, AuthenticatorConfig, Modality};

    #[tokio::test]
    async fn no_enrolment_disables_the_action() {
        let platform = FakePlatform::unsupported("No identities are enrolled.");
        let model = AuthViewModel::load(platform.clone(), AuthenticatorConfig::new()).await;

        assert_eq!(model.state(), AuthState::new(false));
        assert_eq!(model.trigger().await, None);
        assert_eq!(platform.challenges_issued(), 0);
        assert_eq!(model.state().authenticated, None);
    }

    #[tokio::test]
    async fn face_success_sets_authenticated() {
        let platform = FakePlatform::supporting(Modality::Face);
        let model = AuthViewModel::load(platform, AuthenticatorConfig::new()).await;
        let mut changes = model.subscribe();

        let outcome = model.trigger().await;

        assert_eq!(outcome, Some(Ok(Modality::Face)));
        assert!(changes.has_changed().unwrap());
        assert_eq!(
            *changes.borrow_and_update(),
            AuthState {
                supported: true,
                authenticated: Some(true)
            }
        );
    }

    #[tokio::test]
    async fn face_cancel_clears_authenticated() {
        let platform = FakePlatform::supporting(Modality::Face).challenge_fails("User canceled.");
        let model = AuthViewModel::load(platform, AuthenticatorConfig::new()).await;

        let outcome = model.trigger().await;

        assert!(matches!(outcome, Some(Err(AuthError::Failed { .. }))));
        assert_eq!(model.state().authenticated, Some(false));
        assert!(model.state().supported);
    }

    #[tokio::test]
    async fn losing_support_disables_the_action() {
        let platform = FakePlatform::supporting(Modality::Fingerprint);
        let model = AuthViewModel::load(platform.clone(), AuthenticatorConfig::new()).await;

        platform.set_capability(Err(crate::PlatformError::message("Biometry is locked out.")));
        assert_eq!(model.trigger().await, Some(Err(AuthError::Unsupported)));
        assert_eq!(
            model.state(),
            AuthState {
                supported: false,
                authenticated: Some(false)
            }
        );

        assert_eq!(model.trigger().await, None);
        assert_eq!(platform.challenges_issued(), 0);
    }
}
