//! Apple platform (iOS/macOS) implementation on `LocalAuthentication`, via swift-bridge.

use std::fmt;

use crate::completion::Reply;
use crate::{AuthContext, Modality, PlatformError};

#[swift_bridge::bridge]
mod ffi {
    extern "Rust" {
        type BiometricReply;
        fn on_success(self);
        fn on_error(self, error: String);
    }

    extern "Swift" {
        type BiometricContext;

        #[swift_bridge(init)]
        fn new() -> BiometricContext;

        fn can_evaluate(&self) -> bool;

        fn biometry_type(&self) -> u8; // 0: None, 1: TouchID, 2: FaceID, 3: OpticID

        fn capability_error(&self) -> String;

        fn evaluate(&self, reason: &str, reply: BiometricReply);
    }
}

/// Completion handed to Swift's `evaluatePolicy` reply block.
pub struct BiometricReply {
    reply: Reply,
}

impl fmt::Debug for BiometricReply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BiometricReply").finish_non_exhaustive()
    }
}

impl BiometricReply {
    fn on_success(self) {
        self.reply.succeed();
    }

    fn on_error(self, error: String) {
        self.reply.fail(PlatformError::Message(error));
    }
}

/// Owns one `LAContext`.
pub struct SystemContext {
    context: ffi::BiometricContext,
}

impl SystemContext {
    /// Allocates a fresh `LAContext`.
    pub fn new() -> Self {
        Self {
            context: ffi::BiometricContext::new(),
        }
    }
}

impl Default for SystemContext {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SystemContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SystemContext").finish_non_exhaustive()
    }
}

impl AuthContext for SystemContext {
    async fn can_evaluate(&mut self) -> Result<Modality, PlatformError> {
        if !self.context.can_evaluate() {
            return Err(PlatformError::Message(self.context.capability_error()));
        }

        // biometryType is only meaningful after canEvaluatePolicy.
        match self.context.biometry_type() {
            1 => Ok(Modality::Fingerprint),
            2 => Ok(Modality::Face),
            3 => Ok(Modality::Iris),
            other => Err(PlatformError::message(format!(
                "policy satisfiable but no biometry reported ({other})"
            ))),
        }
    }

    async fn evaluate(self, reason: &str, reply: Reply) {
        // The Swift reply block retains the LAContext until it fires.
        self.context.evaluate(reason, BiometricReply { reply });
    }
}
