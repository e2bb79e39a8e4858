//! Single-shot completion between a platform callback and the awaiting task.
//!
//! Backends receive a [`Reply`] and finish it from whatever thread the
//! operating system calls back on. The [`Completion`] half is awaited by the
//! authenticator, so the outcome is always produced on the caller's task.

use log::debug;
use tokio::sync::oneshot;

use crate::PlatformError;

/// Creates a connected [`Reply`] / [`Completion`] pair.
#[must_use]
pub fn channel() -> (Reply, Completion) {
    let (sender, receiver) = oneshot::channel();
    (Reply { sender }, Completion { receiver })
}

/// The sending half, handed to the platform. Consumed on use.
#[derive(Debug)]
pub struct Reply {
    sender: oneshot::Sender<Result<(), PlatformError>>,
}

impl Reply {
    /// Report a successful challenge.
    pub fn succeed(self) {
        self.finish(Ok(()));
    }

    /// Report a failed challenge.
    pub fn fail(self, error: PlatformError) {
        self.finish(Err(error));
    }

    /// Report the challenge result.
    pub fn finish(self, result: Result<(), PlatformError>) {
        if self.sender.send(result).is_err() {
            debug!("completion dropped before the platform replied");
        }
    }
}

/// The receiving half, awaited by the authenticator.
#[derive(Debug)]
pub struct Completion {
    receiver: oneshot::Receiver<Result<(), PlatformError>>,
}

impl Completion {
    /// Wait for the platform's answer.
    ///
    /// # Errors
    /// Returns the platform's error, or [`PlatformError::Abandoned`] if the
    /// [`Reply`] was dropped without being finished.
    pub async fn wait(self) -> Result<(), PlatformError> {
        self.receiver
            .await
            .unwrap_or(Err(PlatformError::Abandoned))
    }
}
