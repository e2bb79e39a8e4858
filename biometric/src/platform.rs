use crate::completion::Reply;
use crate::{Modality, PlatformError};

/// A single authentication session with the host's secure authentication
/// service.
///
/// Running the challenge consumes the context, so a session that has already
/// answered can never back a later capability check.
#[allow(async_fn_in_trait)]
pub trait AuthContext {
    /// Ask whether the biometric policy can be evaluated right now and, if so,
    /// with which modality.
    ///
    /// # Errors
    /// Returns the platform's reason when the policy is not satisfiable.
    async fn can_evaluate(&mut self) -> Result<Modality, PlatformError>;

    /// Issue the challenge, showing `reason` to the user.
    ///
    /// The result is delivered through `reply`, either before this future
    /// resolves or later from a platform callback on any thread.
    async fn evaluate(self, reason: &str, reply: Reply);
}

/// Creates fresh [`AuthContext`] values.
pub trait Platform {
    /// Session type produced by this platform.
    type Context: AuthContext;

    /// Allocate a new, never used context.
    fn new_context(&self) -> Self::Context;
}

impl<P: Platform + ?Sized> Platform for &P {
    type Context = P::Context;

    fn new_context(&self) -> Self::Context {
        (**self).new_context()
    }
}
