//! Checkout phase machine.

use crate::error::CommerceError;
use serde::{Deserialize, Serialize};

/// Phases of a checkout submission.
///
/// `Failed` always recovers to `Idle` on reset; nothing here is terminal —
/// a completed checkout leaves the page via the external redirect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum CheckoutPhase {
    /// Nothing in flight; the form may be submitted.
    #[default]
    Idle,
    /// A payment session is being created.
    Processing,
    /// The provider returned a session URL; the browser should redirect.
    Redirecting(String),
    /// Session creation failed with a user-visible message.
    Failed(String),
}

impl CheckoutPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutPhase::Idle => "idle",
            CheckoutPhase::Processing => "processing",
            CheckoutPhase::Redirecting(_) => "redirecting",
            CheckoutPhase::Failed(_) => "failed",
        }
    }
}

/// Checkout flow state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CheckoutFlow {
    phase: CheckoutPhase,
}

impl CheckoutFlow {
    /// Create a flow in the idle phase.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current phase.
    pub fn phase(&self) -> &CheckoutPhase {
        &self.phase
    }

    /// Start a submission. Valid from `Idle` and `Failed` (resubmission);
    /// rejects a double submit while processing.
    pub fn begin(&mut self) -> Result<(), CommerceError> {
        match self.phase {
            CheckoutPhase::Idle | CheckoutPhase::Failed(_) => {
                self.phase = CheckoutPhase::Processing;
                Ok(())
            }
            _ => Err(self.invalid_transition("processing")),
        }
    }

    /// Record a created session and its redirect URL.
    pub fn succeed(&mut self, url: impl Into<String>) -> Result<(), CommerceError> {
        match self.phase {
            CheckoutPhase::Processing => {
                self.phase = CheckoutPhase::Redirecting(url.into());
                Ok(())
            }
            _ => Err(self.invalid_transition("redirecting")),
        }
    }

    /// Record a failed submission with a user-visible message.
    pub fn fail(&mut self, message: impl Into<String>) -> Result<(), CommerceError> {
        match self.phase {
            CheckoutPhase::Processing => {
                self.phase = CheckoutPhase::Failed(message.into());
                Ok(())
            }
            _ => Err(self.invalid_transition("failed")),
        }
    }

    /// Return to idle so the form can be resubmitted.
    pub fn reset(&mut self) {
        self.phase = CheckoutPhase::Idle;
    }

    /// Check if a submission is in flight.
    pub fn is_processing(&self) -> bool {
        self.phase == CheckoutPhase::Processing
    }

    /// The redirect URL, when a session has been created.
    pub fn redirect_url(&self) -> Option<&str> {
        match &self.phase {
            CheckoutPhase::Redirecting(url) => Some(url),
            _ => None,
        }
    }

    /// The failure message, when the last submission failed.
    pub fn error(&self) -> Option<&str> {
        match &self.phase {
            CheckoutPhase::Failed(message) => Some(message),
            _ => None,
        }
    }

    fn invalid_transition(&self, to: &str) -> CommerceError {
        CommerceError::InvalidPhaseTransition {
            from: self.phase.as_str().to_string(),
            to: to.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_path() {
        let mut flow = CheckoutFlow::new();
        flow.begin().unwrap();
        assert!(flow.is_processing());

        flow.succeed("https://pay.example/s/1").unwrap();
        assert_eq!(flow.redirect_url(), Some("https://pay.example/s/1"));
    }

    #[test]
    fn test_failure_recovers_to_idle() {
        let mut flow = CheckoutFlow::new();
        flow.begin().unwrap();
        flow.fail("Payment could not be started").unwrap();
        assert_eq!(flow.error(), Some("Payment could not be started"));

        flow.reset();
        assert_eq!(flow.phase(), &CheckoutPhase::Idle);
        assert!(flow.begin().is_ok());
    }

    #[test]
    fn test_resubmit_from_failed() {
        let mut flow = CheckoutFlow::new();
        flow.begin().unwrap();
        flow.fail("boom").unwrap();
        // resubmitting the form goes straight back to processing
        assert!(flow.begin().is_ok());
        assert!(flow.is_processing());
    }

    #[test]
    fn test_double_submit_rejected() {
        let mut flow = CheckoutFlow::new();
        flow.begin().unwrap();
        assert!(flow.begin().is_err());
    }

    #[test]
    fn test_succeed_requires_processing() {
        let mut flow = CheckoutFlow::new();
        assert!(flow.succeed("https://pay.example").is_err());
    }
}
