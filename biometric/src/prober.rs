use log::debug;

use crate::{AuthContext, Modality, Platform};

/// Answers whether biometric authentication is currently usable.
#[derive(Debug, Clone, Default)]
pub struct CapabilityProber<P> {
    platform: P,
}

impl<P: Platform> CapabilityProber<P> {
    /// Creates a prober backed by `platform`.
    pub const fn new(platform: P) -> Self {
        Self { platform }
    }

    /// Returns `true` if a biometric modality is available.
    pub async fn is_supported(&self) -> bool {
        self.detect_modality().await.is_some()
    }

    /// Get the available modality, using a fresh context for the query.
    ///
    /// Every unsatisfiable state collapses to `None`.
    pub async fn detect_modality(&self) -> Option<Modality> {
        let mut context = self.platform.new_context();
        match context.can_evaluate().await {
            Ok(modality) => {
                debug!("biometric policy satisfiable with {modality}");
                Some(modality)
            }
            Err(err) => {
                debug!("biometric policy not satisfiable: {err}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::CapabilityProber;
    use crate::Modality;
    use crate::testing::{Event, FakePlatform};

    #[tokio::test]
    async fn reports_platform_modality() {
        let platform = FakePlatform::supporting(Modality::Face);
        let prober = CapabilityProber::new(platform.clone());

        assert_eq!(prober.detect_modality().await, Some(Modality::Face));
        assert!(prober.is_supported().await);
    }

    #[tokio::test]
    async fn unsatisfiable_policy_collapses_to_none() {
        let platform = FakePlatform::unsupported("No identities are enrolled.");
        let prober = CapabilityProber::new(platform.clone());

        assert_eq!(prober.detect_modality().await, None);
        assert!(!prober.is_supported().await);
        assert_eq!(platform.challenges_issued(), 0);
    }

    #[tokio::test]
    async fn each_query_uses_a_new_context() {
        let platform = FakePlatform::supporting(Modality::Fingerprint);
        let prober = CapabilityProber::new(&platform);

        prober.detect_modality().await;
        prober.detect_modality().await;

        assert_eq!(platform.events(), vec![Event::Check(0), Event::Check(1)]);
    }
}
