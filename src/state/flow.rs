/// The comparison submission lifecycle
///
/// One submit action walks the status through
/// idle -> validating -> in-flight -> settled -> idle. Invalid input stops
/// at validating and falls straight back to idle with an error recorded,
/// producing no request at all. A settled outcome, success or failure,
/// always resets the form for the next attempt.
use tracing::{info, warn};

use crate::api::error::CompareError;
use crate::api::response::ComparisonResult;
use crate::state::form::{CompareRequest, SubmissionForm, ValidationError};

/// Where the current submission stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionStatus {
    /// Ready for input; nothing outstanding
    #[default]
    Idle,
    /// Local checks running (transient within one submit action)
    Validating,
    /// Exactly one request is on the wire
    InFlight,
    /// The request resolved; outcome recorded (transient before reset)
    Settled,
}

impl SubmissionStatus {
    /// True while a request is outstanding and resubmission must stay
    /// disabled
    pub fn is_busy(&self) -> bool {
        matches!(self, SubmissionStatus::InFlight)
    }
}

/// Why the last submission attempt produced no result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowError {
    /// Input failed local checks; nothing was sent
    Validation(ValidationError),
    /// The request was sent and failed
    Submission(CompareError),
}

/// State machine driving one comparison form instance
///
/// Owns the form, the status, and the last settled outcome. Each mounted
/// form gets its own flow; nothing here is shared across instances.
#[derive(Debug, Default)]
pub struct SubmissionFlow {
    pub form: SubmissionForm,
    status: SubmissionStatus,
    result: Option<ComparisonResult>,
    error: Option<FlowError>,
}

impl SubmissionFlow {
    pub fn status(&self) -> SubmissionStatus {
        self.status
    }

    /// Last successful comparison outcome, until the next attempt starts
    pub fn result(&self) -> Option<&ComparisonResult> {
        self.result.as_ref()
    }

    /// Last validation or submission error, until the next attempt starts
    pub fn error(&self) -> Option<&FlowError> {
        self.error.as_ref()
    }

    pub fn is_busy(&self) -> bool {
        self.status.is_busy()
    }

    /// Start a submission attempt
    ///
    /// Clears the previous outcome, validates the form, and either returns
    /// the single request to dispatch (status moves to in-flight) or
    /// records the validation error and returns `None` (status back to
    /// idle, nothing sent).
    pub fn begin_submit(&mut self) -> Option<CompareRequest> {
        self.result = None;
        self.error = None;
        self.status = SubmissionStatus::Validating;

        match self.form.validate() {
            Ok(request) => {
                info!(
                    variant = %request.variant,
                    image = %request.image.file_name,
                    "submission accepted, dispatching comparison"
                );
                self.status = SubmissionStatus::InFlight;
                Some(request)
            }
            Err(error) => {
                warn!(%error, "submission rejected by local validation");
                self.error = Some(FlowError::Validation(error));
                self.status = SubmissionStatus::Idle;
                None
            }
        }
    }

    /// Settle the in-flight request with its outcome
    ///
    /// Records the result or error, then always resets the identifier and
    /// photo and returns to idle, matching the upstream behavior of
    /// clearing the form even after a failure.
    pub fn finish(&mut self, outcome: Result<ComparisonResult, CompareError>) {
        self.status = SubmissionStatus::Settled;

        match outcome {
            Ok(result) => {
                info!(score = ?result.score, verified = ?result.verified, "comparison settled");
                self.result = Some(result);
            }
            Err(error) => {
                warn!(kind = error.kind(), %error, "comparison failed");
                self.error = Some(FlowError::Submission(error));
            }
        }

        self.form.reset();
        self.status = SubmissionStatus::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::ImagePayload;
    use crate::state::form::AlgorithmVariant;

    fn sample_image() -> ImagePayload {
        ImagePayload {
            file_name: "photo.jpg".to_string(),
            mime_type: "image/jpeg".to_string(),
            bytes: vec![1, 2, 3],
            width: 10,
            height: 10,
        }
    }

    fn ready_flow() -> SubmissionFlow {
        let mut flow = SubmissionFlow::default();
        flow.form.identifier = "202412345".to_string();
        flow.form.image = Some(sample_image());
        flow
    }

    #[test]
    fn test_short_identifier_produces_no_request() {
        let mut flow = ready_flow();
        flow.form.identifier = "12".to_string();

        assert_eq!(flow.begin_submit(), None);
        assert_eq!(
            flow.error(),
            Some(&FlowError::Validation(ValidationError::IdentifierTooShort))
        );
        assert_eq!(flow.status(), SubmissionStatus::Idle);
        // Invalid input must not clear what the operator typed.
        assert_eq!(flow.form.identifier, "12");
    }

    #[test]
    fn test_missing_image_produces_no_request() {
        let mut flow = ready_flow();
        flow.form.image = None;

        assert_eq!(flow.begin_submit(), None);
        assert_eq!(
            flow.error(),
            Some(&FlowError::Validation(ValidationError::MissingImage))
        );
        assert_eq!(flow.status(), SubmissionStatus::Idle);
    }

    #[test]
    fn test_valid_submit_goes_in_flight() {
        let mut flow = ready_flow();

        let request = flow.begin_submit().unwrap();

        assert_eq!(request.registration_number, "202412345");
        assert_eq!(flow.status(), SubmissionStatus::InFlight);
        assert!(flow.is_busy());
    }

    #[test]
    fn test_begin_submit_clears_previous_outcome() {
        let mut flow = ready_flow();
        flow.begin_submit().unwrap();
        flow.finish(Ok(ComparisonResult {
            score: Some(80.0),
            verified: None,
            message: None,
        }));
        assert!(flow.result().is_some());

        // Next attempt starts clean.
        flow.form.identifier = "12".to_string();
        flow.begin_submit();

        assert!(flow.result().is_none());
        assert!(matches!(flow.error(), Some(FlowError::Validation(_))));
    }

    #[test]
    fn test_success_records_result_and_resets_form() {
        let mut flow = ready_flow();
        flow.begin_submit().unwrap();

        flow.finish(Ok(ComparisonResult {
            score: Some(91.2),
            verified: Some(true),
            message: Some("Match found".to_string()),
        }));

        let result = flow.result().unwrap();
        assert_eq!(result.score, Some(91.2));
        assert_eq!(result.verified, Some(true));

        assert_eq!(flow.status(), SubmissionStatus::Idle);
        assert!(flow.form.identifier.is_empty());
        assert!(flow.form.image.is_none());
    }

    #[test]
    fn test_failure_records_error_and_resets_form() {
        let mut flow = ready_flow();
        flow.begin_submit().unwrap();

        flow.finish(Err(CompareError::Network("connection refused".to_string())));

        assert_eq!(
            flow.error(),
            Some(&FlowError::Submission(CompareError::Network(
                "connection refused".to_string()
            )))
        );
        // Upstream always resets, even after a failure.
        assert_eq!(flow.status(), SubmissionStatus::Idle);
        assert!(flow.form.identifier.is_empty());
        assert!(flow.form.image.is_none());
        assert!(!flow.is_busy());
    }

    #[test]
    fn test_variant_survives_settlement() {
        let mut flow = ready_flow();
        flow.form.variant = AlgorithmVariant::ImageRecognition;
        flow.begin_submit().unwrap();

        flow.finish(Err(CompareError::Server(500)));

        assert_eq!(flow.form.variant, AlgorithmVariant::ImageRecognition);
    }
}
