//! Biometric capability probing and one-shot authentication.
//!
//! This crate asks the host's secure authentication service (Face ID, Touch ID,
//! Optic ID, Windows Hello or `fprintd`) whether a biometric policy can be
//! evaluated, runs a single challenge against it and reports the outcome
//! exactly once.
//!
//! ```no_run
//! use bioauth_biometric::{Authenticator, CapabilityProber, SystemPlatform};
//!
//! async fn unlock() {
//!     if !CapabilityProber::new(SystemPlatform).is_supported().await {
//!         return;
//!     }
//!
//!     Authenticator::new(SystemPlatform)
//!         .authenticate(|outcome| match outcome {
//!             Ok(modality) => println!("unlocked with {modality}"),
//!             Err(err) => println!("{err}"),
//!         })
//!         .await;
//! }
//! ```

#![warn(missing_docs)]

mod authenticator;
pub mod completion;
mod error;
mod platform;
mod prober;
mod state;
/// Platform-specific implementations.
mod sys;

#[cfg(test)]
mod testing;

use std::fmt;

pub use authenticator::{AuthOutcome, Authenticator, AuthenticatorConfig, DEFAULT_REASON};
pub use error::{AuthError, PlatformError};
pub use platform::{AuthContext, Platform};
pub use prober::CapabilityProber;
pub use state::{AuthState, AuthViewModel};
pub use sys::{SystemContext, SystemPlatform};

/// The biometric sensing mechanism a device offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modality {
    /// Facial recognition (`FaceID`, Windows Hello Face).
    Face,
    /// Fingerprint (`TouchID`, fingerprint readers).
    Fingerprint,
    /// Iris scanning (`OpticID`).
    Iris,
    /// A biometric the platform vouches for without naming it.
    Other,
}

impl Modality {
    /// Human readable name reported alongside a successful authentication.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Face => "Face",
            Self::Fingerprint => "Fingerprint",
            Self::Iris => "Iris",
            Self::Other => "Biometrics",
        }
    }
}

impl fmt::Display for Modality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Checks if biometric authentication is available on the current device.
pub async fn is_supported() -> bool {
    CapabilityProber::new(SystemPlatform).is_supported().await
}

/// Get the available biometric modality.
///
/// Returns `None` if biometrics are not available.
pub async fn detect_modality() -> Option<Modality> {
    CapabilityProber::new(SystemPlatform).detect_modality().await
}

/// Request biometric authentication with a reason.
///
/// # Errors
/// Returns [`AuthError::Unsupported`] if no biometric policy can be evaluated,
/// or [`AuthError::Failed`] if the challenge did not succeed.
pub async fn authenticate(reason: &str) -> AuthOutcome {
    Authenticator::with_config(SystemPlatform, AuthenticatorConfig::new().reason(reason))
        .attempt()
        .await
}

#[cfg(test)]
mod tests {
    use super::Modality;

    #[test]
    fn modality_names() {
        assert_eq!(Modality::Face.name(), "Face");
        assert_eq!(Modality::Fingerprint.to_string(), "Fingerprint");
        assert_eq!(Modality::Other.to_string(), "Biometrics");
    }
}
