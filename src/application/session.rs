//! Session: the single controller owning form state and the prediction cycle.

use crate::domain::{FieldError, FieldValue, FormState, UnknownFieldError, Validation};

use super::orchestrator::{Lifecycle, NotIdleError, Phase, PredictionOrchestrator};

/// Label of the submit affordance when a request may be sent.
pub const SUBMIT_LABEL: &str = "Calculate Risk";

/// Label of the submit affordance while a request is in flight.
pub const SUBMITTING_LABEL: &str = "Analyzing...";

/// Submission was refused before any request was sent.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SubmitError {
    #[error(transparent)]
    NotIdle(#[from] NotIdleError),

    #[error("{} field(s) failed validation", .0.len())]
    Invalid(Vec<FieldError>),
}

/// One user session: form values plus the request lifecycle.
pub struct Session {
    form: FormState,
    orchestrator: PredictionOrchestrator,
    validate_before_submit: bool,
    field_errors: Vec<FieldError>,
}

impl Session {
    /// Start a session with every field at its default.
    pub fn new(orchestrator: PredictionOrchestrator, validate_before_submit: bool) -> Self {
        Self {
            form: FormState::initialize(),
            orchestrator,
            validate_before_submit,
            field_errors: Vec::new(),
        }
    }

    #[must_use]
    pub fn form(&self) -> &FormState {
        &self.form
    }

    #[must_use]
    pub fn lifecycle(&self) -> &Lifecycle {
        self.orchestrator.lifecycle()
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.orchestrator.phase()
    }

    /// Errors from the last rejected submission, cleared field by field as
    /// the user edits.
    #[must_use]
    pub fn field_errors(&self) -> &[FieldError] {
        &self.field_errors
    }

    /// Error for `name` from the last rejected submission, if any.
    #[must_use]
    pub fn field_error(&self, name: &str) -> Option<&FieldError> {
        self.field_errors.iter().find(|e| e.field() == name)
    }

    /// Whether the submit affordance is enabled.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.phase() == Phase::Idle
    }

    #[must_use]
    pub fn submit_label(&self) -> &'static str {
        if self.phase() == Phase::Submitting {
            SUBMITTING_LABEL
        } else {
            SUBMIT_LABEL
        }
    }

    /// Replace one field's value. Allowed in every phase; edits made while
    /// submitting only affect the next submission.
    ///
    /// # Errors
    /// Returns `UnknownFieldError` if `name` is not registered.
    pub fn update(
        &mut self,
        name: &str,
        value: impl Into<FieldValue>,
    ) -> Result<(), UnknownFieldError> {
        self.form.update(name, value)?;
        self.field_errors.retain(|e| e.field() != name);
        Ok(())
    }

    /// Validate (if enabled) and submit the current form.
    ///
    /// # Errors
    /// Returns `SubmitError::NotIdle` outside `Idle` and
    /// `SubmitError::Invalid` when the validation stage rejects the form.
    pub fn submit(&mut self) -> Result<(), SubmitError> {
        if self.phase() != Phase::Idle {
            return Err(NotIdleError(self.phase()).into());
        }

        if self.validate_before_submit {
            if let Validation::Invalid(errors) = self.form.validate() {
                tracing::info!("Form rejected: {} invalid field(s)", errors.len());
                self.field_errors = errors.clone();
                return Err(SubmitError::Invalid(errors));
            }
        }

        self.field_errors.clear();
        self.orchestrator.submit(&self.form)?;
        Ok(())
    }

    /// Non-blocking check for request completion; `true` if anything changed.
    pub fn poll(&mut self) -> bool {
        self.orchestrator.poll()
    }

    /// Wait for the in-flight request to settle.
    pub async fn wait(&mut self) -> &Lifecycle {
        self.orchestrator.wait().await
    }

    /// "Check another patient": drop the held result, keep the form.
    pub fn check_another(&mut self) -> bool {
        self.orchestrator.check_another()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::orchestrator::tests::{MockScoring, Reply};
    use crate::domain::{RiskClass, SeverityTier};
    use crate::ports::ScoringService;
    use std::sync::atomic::Ordering;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::runtime::Handle;
    use tokio::time::Instant;

    fn session(mock: &Arc<MockScoring>, validate: bool) -> Session {
        let service: Arc<dyn ScoringService> = mock.clone();
        let orchestrator =
            PredictionOrchestrator::new(service, Handle::current(), Duration::from_millis(1500));
        Session::new(orchestrator, validate)
    }

    #[tokio::test(start_paused = true)]
    async fn test_default_submission_shows_low_tier() {
        let mock = MockScoring::new(200, Reply::Ok(RiskClass::Low, 0.12));
        let mut session = session(&mock, true);

        let start = Instant::now();
        session.submit().expect("defaults are valid");
        assert_eq!(session.submit_label(), SUBMITTING_LABEL);
        assert!(!session.can_submit());

        tokio::time::sleep(Duration::from_millis(300)).await;
        assert!(!session.poll());
        assert_eq!(session.phase(), Phase::Submitting);

        tokio::time::sleep(Duration::from_millis(1000)).await;
        assert!(!session.poll());
        assert_eq!(session.phase(), Phase::Submitting);

        match session.wait().await {
            Lifecycle::Succeeded { display, .. } => {
                assert_eq!(display.severity_tier, SeverityTier::Low);
                assert_eq!(display.percentage_label, 12);
            }
            other => panic!("expected success, got {other:?}"),
        }
        assert!(start.elapsed() >= Duration::from_millis(1500));
        assert_eq!(session.submit_label(), SUBMIT_LABEL);
    }

    #[tokio::test(start_paused = true)]
    async fn test_connection_error_keeps_form_resubmittable() {
        let mock = MockScoring::new(0, Reply::Refused);
        let mut session = session(&mock, true);
        session.update("ap_hi", "150").expect("registered");
        let before = session.form().clone();

        session.submit().expect("valid");
        assert_eq!(session.wait().await.phase(), Phase::Failed);
        assert_eq!(session.form(), &before);

        assert!(matches!(session.submit(), Err(SubmitError::NotIdle(_))));
        assert!(session.check_another());
        assert_eq!(session.form(), &before);

        session.submit().expect("idle again");
        session.wait().await;
        assert_eq!(mock.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalid_form_never_sent() {
        let mock = MockScoring::new(0, Reply::Ok(RiskClass::Low, 0.1));
        let mut session = session(&mock, true);
        session.update("age", "7").expect("registered");
        session.update("gender", "x").expect("registered");

        let err = session.submit().unwrap_err();
        let SubmitError::Invalid(errors) = err else {
            panic!("expected validation failure");
        };
        assert_eq!(errors.len(), 2);
        assert_eq!(session.phase(), Phase::Idle);
        assert!(session.field_error("age").is_some());

        session.update("age", "70").expect("registered");
        assert!(session.field_error("age").is_none());
        assert!(session.field_error("gender").is_some());

        tokio::task::yield_now().await;
        assert_eq!(mock.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_pass_through_when_validation_disabled() {
        let mock = MockScoring::new(0, Reply::Ok(RiskClass::Elevated, 0.9));
        let mut session = session(&mock, false);
        session.update("age", "999").expect("registered");

        session.submit().expect("no validation stage");
        session.wait().await;

        let seen = mock.seen.lock().expect("lock");
        assert_eq!(seen[0].get("age"), Some(&FieldValue::from("999")));
    }

    #[tokio::test(start_paused = true)]
    async fn test_edits_during_submission_apply_to_next_cycle() {
        let mock = MockScoring::new(100, Reply::Ok(RiskClass::Low, 0.4));
        let mut session = session(&mock, true);

        session.submit().expect("valid");
        session.update("weight", "95").expect("edits allowed while submitting");
        session.wait().await;
        session.check_another();
        session.submit().expect("valid");
        session.wait().await;

        let seen = mock.seen.lock().expect("lock");
        assert_eq!(seen[0].get("weight"), Some(&FieldValue::Number(70.0)));
        assert_eq!(seen[1].get("weight"), Some(&FieldValue::from("95")));
    }
}
