//! Windows Hello through `UserConsentVerifier`.

use std::sync::Mutex;

use log::warn;
use windows::Foundation::AsyncOperationCompletedHandler;
use windows::Security::Credentials::UI::{
    UserConsentVerificationResult, UserConsentVerifier, UserConsentVerifierAvailability,
};
use windows::core::HSTRING;

use crate::completion::Reply;
use crate::{AuthContext, Modality, PlatformError};

fn platform_error(err: &windows::core::Error) -> PlatformError {
    PlatformError::message(err.to_string())
}

fn describe_availability(availability: UserConsentVerifierAvailability) -> &'static str {
    match availability {
        UserConsentVerifierAvailability::DeviceNotPresent => "no biometric device present",
        UserConsentVerifierAvailability::NotConfiguredForUser => {
            "Windows Hello is not configured for this user"
        }
        UserConsentVerifierAvailability::DisabledByPolicy => "Windows Hello is disabled by policy",
        UserConsentVerifierAvailability::DeviceBusy => "biometric device is busy",
        _ => "Windows Hello is not available",
    }
}

fn verification_result(result: UserConsentVerificationResult) -> Result<(), PlatformError> {
    let message = match result {
        UserConsentVerificationResult::Verified => return Ok(()),
        UserConsentVerificationResult::Canceled => "verification canceled",
        UserConsentVerificationResult::DeviceBusy => "device busy",
        UserConsentVerificationResult::RetriesExhausted => "retries exhausted",
        UserConsentVerificationResult::DisabledByPolicy => "disabled by policy",
        UserConsentVerificationResult::NotConfiguredForUser => "not configured for user",
        UserConsentVerificationResult::DeviceNotPresent => "device not present",
        _ => "verification failed",
    };
    Err(PlatformError::message(message))
}

/// Windows Hello keeps no per-session state; each value stands for one request.
#[derive(Debug, Default)]
pub struct SystemContext;

impl SystemContext {
    /// Creates a context.
    pub const fn new() -> Self {
        Self
    }
}

impl AuthContext for SystemContext {
    async fn can_evaluate(&mut self) -> Result<Modality, PlatformError> {
        let availability = UserConsentVerifier::CheckAvailabilityAsync()
            .map_err(|e| platform_error(&e))?
            .await
            .map_err(|e| platform_error(&e))?;

        if availability == UserConsentVerifierAvailability::Available {
            // UserConsentVerifier does not say whether Hello uses face or fingerprint.
            Ok(Modality::Other)
        } else {
            Err(PlatformError::message(describe_availability(availability)))
        }
    }

    async fn evaluate(self, reason: &str, reply: Reply) {
        let operation = match UserConsentVerifier::RequestVerificationAsync(&HSTRING::from(reason)) {
            Ok(operation) => operation,
            Err(err) => {
                reply.fail(platform_error(&err));
                return;
            }
        };

        // The handler is Fn and may be invoked on any thread.
        let pending = Mutex::new(Some(reply));
        let handler = AsyncOperationCompletedHandler::new(move |operation, _status| {
            let result = operation
                .ok()
                .and_then(|operation| operation.GetResults())
                .map_err(|e| platform_error(&e))
                .and_then(verification_result);

            if let Some(reply) = pending.lock().ok().and_then(|mut pending| pending.take()) {
                reply.finish(result);
            }
            Ok(())
        });

        if let Err(err) = operation.SetCompleted(&handler) {
            warn!("failed to observe Windows Hello verification: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use windows::Security::Credentials::UI::{
        UserConsentVerificationResult, UserConsentVerifierAvailability,
    };

    use super::{describe_availability, verification_result};
    use crate::PlatformError;

    #[test]
    fn verified_is_success() {
        assert_eq!(
            verification_result(UserConsentVerificationResult::Verified),
            Ok(())
        );
    }

    #[test]
    fn canceled_is_failure() {
        assert_eq!(
            verification_result(UserConsentVerificationResult::Canceled),
            Err(PlatformError::message("verification canceled"))
        );
    }

    #[test]
    fn unavailable_states_are_described() {
        assert_eq!(
            describe_availability(UserConsentVerifierAvailability::NotConfiguredForUser),
            "Windows Hello is not configured for this user"
        );
    }
}
