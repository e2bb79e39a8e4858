//! Linux fingerprint readers through the `fprintd` D-Bus service.

use std::fmt;

use futures::StreamExt;
use log::{debug, warn};
use zbus::Connection;
use zbus::zvariant::OwnedObjectPath;

use crate::completion::Reply;
use crate::{AuthContext, Modality, PlatformError};

// fprintd resolves the empty user name to the caller.
const CURRENT_USER: &str = "";
const ANY_FINGER: &str = "any";
const VERIFY_MATCH: &str = "verify-match";

#[zbus::proxy(
    interface = "net.reactivated.Fprint.Manager",
    default_service = "net.reactivated.Fprint",
    default_path = "/net/reactivated/Fprint/Manager"
)]
trait FprintManager {
    fn get_default_device(&self) -> zbus::Result<OwnedObjectPath>;
}

#[zbus::proxy(
    interface = "net.reactivated.Fprint.Device",
    default_service = "net.reactivated.Fprint"
)]
trait FprintDevice {
    fn list_enrolled_fingers(&self, username: &str) -> zbus::Result<Vec<String>>;

    fn claim(&self, username: &str) -> zbus::Result<()>;

    fn release(&self) -> zbus::Result<()>;

    fn verify_start(&self, finger_name: &str) -> zbus::Result<()>;

    fn verify_stop(&self) -> zbus::Result<()>;

    #[zbus(signal)]
    fn verify_status(&self, result: &str, done: bool) -> zbus::Result<()>;
}

fn platform_error(err: &zbus::Error) -> PlatformError {
    PlatformError::message(err.to_string())
}

/// Decide a challenge from one `VerifyStatus` signal.
///
/// Returns `None` while fprintd is still scanning (`done == false`).
fn verify_outcome(result: &str, done: bool) -> Option<Result<(), PlatformError>> {
    if !done {
        return None;
    }
    if result == VERIFY_MATCH {
        Some(Ok(()))
    } else {
        Some(Err(PlatformError::message(result)))
    }
}

/// A session with the default `fprintd` device.
///
/// The device found by the capability check is the one challenged.
#[derive(Default)]
pub struct SystemContext {
    device: Option<FprintDeviceProxy<'static>>,
}

impl SystemContext {
    /// Creates a context; the system bus is contacted on first use.
    pub const fn new() -> Self {
        Self { device: None }
    }

    async fn default_device() -> zbus::Result<FprintDeviceProxy<'static>> {
        let connection = Connection::system().await?;
        let path = FprintManagerProxy::new(&connection)
            .await?
            .get_default_device()
            .await?;
        debug!("using fprintd device {}", path.as_str());

        FprintDeviceProxy::builder(&connection)
            .path(path.into_inner())?
            .build()
            .await
    }

    async fn verify(device: &FprintDeviceProxy<'static>) -> Result<(), PlatformError> {
        device
            .claim(CURRENT_USER)
            .await
            .map_err(|e| platform_error(&e))?;

        let result = Self::scan(device).await;

        if let Err(err) = device.release().await {
            warn!("failed to release fprintd device: {err}");
        }
        result
    }

    async fn scan(device: &FprintDeviceProxy<'static>) -> Result<(), PlatformError> {
        // Subscribe before starting so the final status cannot be missed.
        let mut statuses = device
            .receive_verify_status()
            .await
            .map_err(|e| platform_error(&e))?;
        device
            .verify_start(ANY_FINGER)
            .await
            .map_err(|e| platform_error(&e))?;

        let mut outcome = Err(PlatformError::message("fprintd stopped reporting"));
        while let Some(status) = statuses.next().await {
            let args = match status.args() {
                Ok(args) => args,
                Err(err) => {
                    outcome = Err(platform_error(&err));
                    break;
                }
            };
            debug!("fprintd verify status: {}", args.result());
            if let Some(result) = verify_outcome(args.result(), *args.done()) {
                outcome = result;
                break;
            }
        }

        if let Err(err) = device.verify_stop().await {
            warn!("failed to stop fprintd verification: {err}");
        }
        outcome
    }
}

impl fmt::Debug for SystemContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SystemContext")
            .field("device", &self.device.as_ref().map(|device| device.inner().path().as_str()))
            .finish()
    }
}

impl AuthContext for SystemContext {
    async fn can_evaluate(&mut self) -> Result<Modality, PlatformError> {
        let device = Self::default_device()
            .await
            .map_err(|e| platform_error(&e))?;

        let fingers = device
            .list_enrolled_fingers(CURRENT_USER)
            .await
            .map_err(|e| platform_error(&e))?;
        if fingers.is_empty() {
            return Err(PlatformError::message("no fingers enrolled"));
        }

        self.device = Some(device);
        Ok(Modality::Fingerprint)
    }

    async fn evaluate(self, reason: &str, reply: Reply) {
        let Some(device) = self.device else {
            reply.fail(PlatformError::message("no fprintd device was selected"));
            return;
        };

        debug!("fprintd has no prompt; reason not shown: {reason}");
        reply.finish(Self::verify(&device).await);
    }
}

#[cfg(test)]
mod tests {
    use super::verify_outcome;
    use crate::PlatformError;

    #[test]
    fn match_is_success() {
        assert_eq!(verify_outcome("verify-match", true), Some(Ok(())));
    }

    #[test]
    fn retry_scan_keeps_waiting() {
        assert_eq!(verify_outcome("verify-retry-scan", false), None);
        assert_eq!(verify_outcome("verify-swipe-too-short", false), None);
    }

    #[test]
    fn other_final_statuses_fail() {
        assert_eq!(
            verify_outcome("verify-no-match", true),
            Some(Err(PlatformError::message("verify-no-match")))
        );
        assert_eq!(
            verify_outcome("verify-disconnected", true),
            Some(Err(PlatformError::message("verify-disconnected")))
        );
    }
}
