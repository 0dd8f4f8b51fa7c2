//! Application state definitions

use super::forms::{FieldName, OnboardingForm, ValidationErrors};
use super::profile::SubmitFailure;

/// Where the form session is in the submit lifecycle
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmissionStatus {
    /// No submission in progress; the user is editing
    #[default]
    Idle,
    /// Running every rule, including the remote check
    Validating,
    /// Payload sent, waiting for the service
    Submitting,
    Succeeded,
    /// The service (or the network) rejected the submission
    Failed(Option<String>),
}

impl SubmissionStatus {
    /// True while a submission is validating or in flight
    pub fn is_busy(&self) -> bool {
        matches!(self, Self::Validating | Self::Submitting)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "Editing",
            Self::Validating => "Validating...",
            Self::Submitting => "Submitting...",
            Self::Succeeded => "Submitted",
            Self::Failed(_) => "Submission failed",
        }
    }
}

/// Main application state
#[derive(Debug, Default)]
pub struct AppState {
    pub form: OnboardingForm,
    pub errors: ValidationErrors,
    pub submission: SubmissionStatus,
    /// A blur-triggered corporation number check is in flight
    pub corporation_check_pending: bool,
    /// Transient feedback shown in the status bar
    pub status_message: Option<String>,
}

impl AppState {
    /// Handle character input in the focused field.
    /// Values are frozen while a submission is validating or in flight.
    pub fn form_input_char(&mut self, c: char) {
        if self.submission.is_busy() {
            return;
        }
        if let Some(field) = self.form.active_field_mut() {
            field.push_char(c);
        }
    }

    /// Handle backspace in the focused field
    pub fn form_backspace(&mut self) {
        if self.submission.is_busy() {
            return;
        }
        if let Some(field) = self.form.active_field_mut() {
            field.pop_char();
        }
    }

    pub fn field_error(&self, field: FieldName) -> Option<&str> {
        self.errors.get(field)
    }

    /// Message for the status banner, present only after a failed submission
    /// that carried a non-empty message
    pub fn banner_message(&self) -> Option<&str> {
        match &self.submission {
            SubmissionStatus::Failed(Some(message)) if !message.is_empty() => Some(message),
            _ => None,
        }
    }

    /// Enter the validating phase of a submission, clearing the banner
    pub fn begin_submission(&mut self) {
        self.submission = SubmissionStatus::Validating;
        self.corporation_check_pending = false;
        self.status_message = None;
    }

    /// Apply the result of validating every field before submission.
    /// Returns true when the payload should be sent.
    pub fn finish_validation(&mut self, errors: ValidationErrors) -> bool {
        let valid = errors.is_empty();
        self.errors = errors;
        self.submission = if valid {
            SubmissionStatus::Submitting
        } else {
            SubmissionStatus::Idle
        };
        valid
    }

    /// Apply the service's answer to a submission
    pub fn finish_submission(&mut self, failure: Option<SubmitFailure>) {
        match failure {
            None => {
                self.submission = SubmissionStatus::Succeeded;
                self.status_message = Some("Profile details submitted".to_string());
            }
            Some(failure) => {
                self.submission = SubmissionStatus::Failed(failure.message);
            }
        }
    }
}
