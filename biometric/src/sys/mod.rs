use crate::Platform;

#[cfg(any(target_os = "ios", target_os = "macos"))]
mod apple;
#[cfg(any(target_os = "ios", target_os = "macos"))]
pub use apple::SystemContext;

#[cfg(target_os = "windows")]
mod windows;
#[cfg(target_os = "windows")]
pub use windows::SystemContext;

#[cfg(target_os = "linux")]
mod linux;
#[cfg(target_os = "linux")]
pub use linux::SystemContext;

#[cfg(not(any(
    target_os = "ios",
    target_os = "macos",
    target_os = "windows",
    target_os = "linux"
)))]
mod stub {
    use crate::completion::Reply;
    use crate::{AuthContext, Modality, PlatformError};

    const UNSUPPORTED: &str = "biometric authentication is not available on this platform";

    /// Context for targets without a biometric backend.
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
            Err(PlatformError::message(UNSUPPORTED))
        }

        async fn evaluate(self, _reason: &str, reply: Reply) {
            reply.fail(PlatformError::message(UNSUPPORTED));
        }
    }
}
#[cfg(not(any(
    target_os = "ios",
    target_os = "macos",
    target_os = "windows",
    target_os = "linux"
)))]
pub use stub::SystemContext;

/// The authentication service of the platform this crate was compiled for.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemPlatform;

impl Platform for SystemPlatform {
    type Context = SystemContext;

    fn new_context(&self) -> SystemContext {
        SystemContext::new()
    }
}
