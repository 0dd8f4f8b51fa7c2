//! Application state and core logic

use crate::service::VaultServiceTrait;
use crate::state::validation::{has_remote_check, validate_corporation_number_remote};
use crate::state::{
    validate_all, validate_field, AppState, FieldName, SubmitFailure, ValidationErrors,
};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::{AbortHandle, JoinSet};

/// Completion of a background call to the Vault API
#[derive(Debug)]
pub enum ServiceEvent {
    /// A blur-triggered corporation number check finished
    CorporationNumberChecked {
        generation: u64,
        error: Option<String>,
    },
    /// Every rule ran ahead of a submission
    SubmissionValidated(ValidationErrors),
    /// The service answered the submission
    SubmissionFinished(Option<SubmitFailure>),
}

/// Main application struct
pub struct App {
    /// Current form session state
    pub state: AppState,
    /// Vault API used for remote checks and submission
    service: Arc<dyn VaultServiceTrait>,
    events_tx: mpsc::UnboundedSender<ServiceEvent>,
    events_rx: mpsc::UnboundedReceiver<ServiceEvent>,
    /// In-flight service calls
    tasks: JoinSet<()>,
    /// The blur-triggered corporation number check, if one is running
    corporation_check: Option<AbortHandle>,
    /// Only a check carrying this generation may update the field
    check_generation: u64,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    /// Create a new App instance
    pub fn new(service: Arc<dyn VaultServiceTrait>) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            state: AppState::default(),
            service,
            events_tx,
            events_rx,
            tasks: JoinSet::new(),
            corporation_check: None,
            check_generation: 0,
            quit: false,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Whether any service call is still running
    pub fn has_pending_work(&self) -> bool {
        !self.tasks.is_empty()
    }

    /// Handle a key event
    pub fn handle_key(&mut self, key: KeyEvent) {
        let on_submit_button = self.state.form.is_submit_active();

        match key.code {
            KeyCode::Esc => self.quit = true,
            // Submit shortcuts (work from anywhere)
            KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => self.submit(),
            KeyCode::Enter if key.modifiers.contains(crate::platform::SUBMIT_MODIFIER) => {
                self.submit()
            }
            KeyCode::Tab | KeyCode::Down => self.focus_next(),
            KeyCode::BackTab | KeyCode::Up => self.focus_prev(),
            KeyCode::Enter if on_submit_button => self.submit(),
            // Enter on an input moves on, like Tab
            KeyCode::Enter => self.focus_next(),
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.state.form_input_char(c)
            }
            KeyCode::Backspace => self.state.form_backspace(),
            _ => {}
        }
    }

    fn focus_next(&mut self) {
        if let Some(blurred) = self.state.form.next_field() {
            self.blur(blurred);
        }
    }

    fn focus_prev(&mut self) {
        if let Some(blurred) = self.state.form.prev_field() {
            self.blur(blurred);
        }
    }

    /// Validate a field that just lost focus
    fn blur(&mut self, field: FieldName) {
        let value = self.state.form.field(field).value.clone();
        let error = validate_field(field, &value);
        tracing::debug!("Blur {}: {:?}", field, error);

        if error.is_none() && has_remote_check(field) {
            self.state.errors.remove(field);
            self.start_corporation_check(value);
            return;
        }
        if has_remote_check(field) {
            // A pending check for an older value must not overwrite this error
            self.cancel_corporation_check();
        }
        self.state.errors.set(field, error);
    }

    /// Abort the running corporation number check and invalidate its result
    fn cancel_corporation_check(&mut self) {
        if let Some(handle) = self.corporation_check.take() {
            tracing::debug!("Cancelling in-flight corporation number check");
            handle.abort();
        }
        self.check_generation += 1;
        self.state.corporation_check_pending = false;
    }

    fn start_corporation_check(&mut self, value: String) {
        self.cancel_corporation_check();
        let generation = self.check_generation;
        let service = Arc::clone(&self.service);
        let tx = self.events_tx.clone();

        self.state.corporation_check_pending = true;
        let handle = self.tasks.spawn(async move {
            let error = validate_corporation_number_remote(service.as_ref(), &value).await;
            let _ = tx.send(ServiceEvent::CorporationNumberChecked { generation, error });
        });
        self.corporation_check = Some(handle);
    }

    /// Validate every field and, if all pass, send the profile
    pub fn submit(&mut self) {
        if self.state.submission.is_busy() {
            tracing::debug!("Submit ignored: submission already in progress");
            return;
        }

        self.cancel_corporation_check();
        self.state.begin_submission();

        let values = self.state.form.values();
        let service = Arc::clone(&self.service);
        let tx = self.events_tx.clone();
        tracing::info!("Validating profile details for submission");

        self.tasks.spawn(async move {
            let errors = validate_all(service.as_ref(), &values).await;
            let valid = errors.is_empty();
            if tx.send(ServiceEvent::SubmissionValidated(errors)).is_err() || !valid {
                return;
            }
            let result = service.submit_profile(&values).await;
            let _ = tx.send(ServiceEvent::SubmissionFinished(result));
        });
    }

    /// Fold a finished service call into the form state
    pub fn apply_event(&mut self, event: ServiceEvent) {
        match event {
            ServiceEvent::CorporationNumberChecked { generation, error } => {
                if generation != self.check_generation {
                    tracing::debug!(
                        "Dropping stale corporation number result (generation {} != {})",
                        generation,
                        self.check_generation
                    );
                    return;
                }
                self.corporation_check = None;
                self.state.corporation_check_pending = false;
                self.state.errors.set(FieldName::CorporationNumber, error);
            }
            ServiceEvent::SubmissionValidated(errors) => {
                let fields: Vec<_> = errors.iter().map(|(field, _)| field.key()).collect();
                if !self.state.finish_validation(errors) {
                    tracing::info!(
                        "Submission blocked by {} field error(s): {:?}",
                        fields.len(),
                        fields
                    );
                }
            }
            ServiceEvent::SubmissionFinished(result) => {
                match &result {
                    None => tracing::info!("Profile details submitted"),
                    Some(failure) => {
                        tracing::warn!("Submission failed: {:?}", failure.message)
                    }
                }
                self.state.finish_submission(result);
            }
        }
    }

    /// Apply every finished call without blocking
    pub fn drain_events(&mut self) {
        while let Ok(event) = self.events_rx.try_recv() {
            self.apply_event(event);
        }
        while let Some(joined) = self.tasks.try_join_next() {
            if let Err(e) = joined {
                if !e.is_cancelled() {
                    tracing::error!("Background task failed: {}", e);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::MockVaultServiceTrait;
    use crate::state::validation::{
        INCORRECT_CORPORATION_NUMBER_LENGTH, INCORRECT_PHONE, REQUIRED_MESSAGE,
    };
    use crate::state::{CorporationNumberCheck, ProfileDetails, SubmissionStatus, SUBMIT_BUTTON_INDEX};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
    }

    fn focus(app: &mut App, field: FieldName) {
        app.state.form.focus(field.index());
    }

    /// Wait for every in-flight call and apply its result
    async fn settle(app: &mut App) {
        while app.tasks.join_next().await.is_some() {}
        app.drain_events();
    }

    fn app_with(service: MockVaultServiceTrait) -> App {
        App::new(Arc::new(service))
    }

    fn valid_check() -> CorporationNumberCheck {
        CorporationNumberCheck {
            valid: true,
            ..Default::default()
        }
    }

    fn fill_valid_form(app: &mut App) {
        type_text(app, "John");
        app.handle_key(key(KeyCode::Tab));
        type_text(app, "Doe");
        app.handle_key(key(KeyCode::Tab));
        type_text(app, "+12345678901");
        app.handle_key(key(KeyCode::Tab));
        type_text(app, "123456789");
    }

    mod keys {
        use super::*;
        use pretty_assertions::assert_eq;

        #[tokio::test]
        async fn test_should_quit_initially_false() {
            let app = app_with(MockVaultServiceTrait::new());
            assert!(!app.should_quit());
            assert!(!app.has_pending_work());
        }

        #[tokio::test]
        async fn test_esc_quits() {
            let mut app = app_with(MockVaultServiceTrait::new());
            app.handle_key(key(KeyCode::Esc));
            assert!(app.should_quit());
        }

        #[tokio::test]
        async fn test_typing_edits_focused_field() {
            let mut app = app_with(MockVaultServiceTrait::new());
            type_text(&mut app, "Jon");
            app.handle_key(key(KeyCode::Backspace));
            app.handle_key(key(KeyCode::Char('e')));
            assert_eq!(app.state.form.first_name.as_text(), "Joe");
        }

        #[tokio::test]
        async fn test_control_chars_are_not_typed() {
            let mut app = app_with(MockVaultServiceTrait::new());
            app.handle_key(ctrl('a'));
            assert_eq!(app.state.form.first_name.as_text(), "");
        }

        #[tokio::test]
        async fn test_enter_on_input_moves_focus() {
            let mut app = app_with(MockVaultServiceTrait::new());
            type_text(&mut app, "John");
            app.handle_key(key(KeyCode::Enter));
            assert_eq!(app.state.form.active_field(), Some(FieldName::LastName));
        }

        #[tokio::test]
        async fn test_editing_does_not_validate() {
            let mut app = app_with(MockVaultServiceTrait::new());
            focus(&mut app, FieldName::Phone);
            type_text(&mut app, "123");
            assert!(app.state.errors.is_empty());
        }
    }

    mod blur {
        use super::*;
        use pretty_assertions::assert_eq;

        #[tokio::test]
        async fn test_empty_required_field_shows_one_error() {
            let mut app = app_with(MockVaultServiceTrait::new());
            type_text(&mut app, "Test");
            for _ in 0..4 {
                app.handle_key(key(KeyCode::Backspace));
            }
            app.handle_key(key(KeyCode::Tab));

            assert_eq!(app.state.errors.len(), 1);
            assert_eq!(app.state.field_error(FieldName::FirstName), Some(REQUIRED_MESSAGE));
        }

        #[tokio::test]
        async fn test_incorrect_phone() {
            let mut app = app_with(MockVaultServiceTrait::new());
            focus(&mut app, FieldName::Phone);
            type_text(&mut app, "12345");
            app.handle_key(key(KeyCode::Tab));

            assert_eq!(app.state.field_error(FieldName::Phone), Some(INCORRECT_PHONE));
        }

        #[tokio::test]
        async fn test_fixing_field_clears_error_on_next_blur() {
            let mut app = app_with(MockVaultServiceTrait::new());
            focus(&mut app, FieldName::Phone);
            type_text(&mut app, "12345");
            app.handle_key(key(KeyCode::BackTab));
            assert!(app.state.errors.contains(FieldName::Phone));

            focus(&mut app, FieldName::Phone);
            for _ in 0..5 {
                app.handle_key(key(KeyCode::Backspace));
            }
            type_text(&mut app, "+12345678901");
            // Error stays while editing
            assert!(app.state.errors.contains(FieldName::Phone));
            app.handle_key(key(KeyCode::Tab));
            assert!(!app.state.errors.contains(FieldName::Phone));
        }

        #[tokio::test]
        async fn test_short_corporation_number_skips_remote() {
            let mut service = MockVaultServiceTrait::new();
            service.expect_check_corporation_number().times(0);
            let mut app = app_with(service);

            focus(&mut app, FieldName::CorporationNumber);
            type_text(&mut app, "12345");
            app.handle_key(key(KeyCode::Tab));
            settle(&mut app).await;

            assert_eq!(
                app.state.field_error(FieldName::CorporationNumber),
                Some(INCORRECT_CORPORATION_NUMBER_LENGTH)
            );
            assert!(!app.state.corporation_check_pending);
        }

        #[tokio::test]
        async fn test_corporation_number_checked_remotely() {
            let mut service = MockVaultServiceTrait::new();
            service
                .expect_check_corporation_number()
                .withf(|number| number == "123456789")
                .times(1)
                .returning(|_| CorporationNumberCheck {
                    valid: false,
                    corporation_number: None,
                    message: Some("Find me".to_string()),
                });
            let mut app = app_with(service);

            focus(&mut app, FieldName::CorporationNumber);
            type_text(&mut app, "123456789");
            app.handle_key(key(KeyCode::Tab));
            assert!(app.state.corporation_check_pending);

            settle(&mut app).await;

            assert!(!app.state.corporation_check_pending);
            assert_eq!(
                app.state.field_error(FieldName::CorporationNumber),
                Some("Find me")
            );
        }

        #[tokio::test]
        async fn test_accepted_corporation_number_clears_error() {
            let mut service = MockVaultServiceTrait::new();
            service
                .expect_check_corporation_number()
                .returning(|_| valid_check());
            let mut app = app_with(service);
            app.state
                .errors
                .insert(FieldName::CorporationNumber, "old error");

            focus(&mut app, FieldName::CorporationNumber);
            type_text(&mut app, "826417395");
            app.handle_key(key(KeyCode::Tab));
            settle(&mut app).await;

            assert!(app.state.errors.is_empty());
        }

        #[tokio::test]
        async fn test_new_check_supersedes_previous() {
            let mut service = MockVaultServiceTrait::new();
            service
                .expect_check_corporation_number()
                .withf(|number| number == "111111111")
                .times(0..=1)
                .returning(|_| CorporationNumberCheck::failed("first"));
            service
                .expect_check_corporation_number()
                .withf(|number| number == "222222222")
                .times(1)
                .returning(|_| CorporationNumberCheck::failed("second"));
            let mut app = app_with(service);

            focus(&mut app, FieldName::CorporationNumber);
            type_text(&mut app, "111111111");
            app.handle_key(key(KeyCode::Tab));
            app.handle_key(key(KeyCode::BackTab));
            for _ in 0..9 {
                app.handle_key(key(KeyCode::Backspace));
            }
            type_text(&mut app, "222222222");
            app.handle_key(key(KeyCode::Tab));
            settle(&mut app).await;

            assert_eq!(
                app.state.field_error(FieldName::CorporationNumber),
                Some("second")
            );
        }

        #[tokio::test]
        async fn test_stale_result_is_dropped() {
            let mut app = app_with(MockVaultServiceTrait::new());
            let stale = app.check_generation;
            app.cancel_corporation_check();

            app.apply_event(ServiceEvent::CorporationNumberChecked {
                generation: stale,
                error: Some("stale".to_string()),
            });

            assert!(app.state.errors.is_empty());
        }

        #[tokio::test]
        async fn test_static_error_cancels_pending_check() {
            let mut service = MockVaultServiceTrait::new();
            service
                .expect_check_corporation_number()
                .times(0..=1)
                .returning(|_| valid_check());
            let mut app = app_with(service);

            focus(&mut app, FieldName::CorporationNumber);
            type_text(&mut app, "123456789");
            app.handle_key(key(KeyCode::Tab));
            app.handle_key(key(KeyCode::BackTab));
            app.handle_key(key(KeyCode::Backspace));
            app.handle_key(key(KeyCode::Tab));
            settle(&mut app).await;

            assert_eq!(
                app.state.field_error(FieldName::CorporationNumber),
                Some(INCORRECT_CORPORATION_NUMBER_LENGTH)
            );
        }
    }

    mod submission {
        use super::*;
        use pretty_assertions::assert_eq;

        #[tokio::test]
        async fn test_failed_submission_shows_banner() {
            let mut service = MockVaultServiceTrait::new();
            service
                .expect_check_corporation_number()
                .withf(|number| number == "123456789")
                .returning(|_| valid_check());
            service
                .expect_submit_profile()
                .withf(|profile| {
                    *profile
                        == ProfileDetails {
                            first_name: "John".to_string(),
                            last_name: "Doe".to_string(),
                            phone: "+12345678901".to_string(),
                            corporation_number: "123456789".to_string(),
                        }
                })
                .times(1)
                .returning(|_| Some(SubmitFailure::with_message("Not valid :(")));
            let mut app = app_with(service);

            fill_valid_form(&mut app);
            app.handle_key(ctrl('s'));
            assert_eq!(app.state.submission, SubmissionStatus::Validating);
            settle(&mut app).await;

            assert_eq!(app.state.banner_message(), Some("Not valid :("));
            assert!(app.state.errors.is_empty());
        }

        #[tokio::test]
        async fn test_successful_submission_has_no_banner() {
            let mut service = MockVaultServiceTrait::new();
            service
                .expect_check_corporation_number()
                .returning(|_| valid_check());
            service
                .expect_submit_profile()
                .times(1)
                .returning(|_| None);
            let mut app = app_with(service);

            fill_valid_form(&mut app);
            app.handle_key(key(KeyCode::Tab));
            settle(&mut app).await;
            assert_eq!(app.state.form.active_field_index, SUBMIT_BUTTON_INDEX);
            app.handle_key(key(KeyCode::Enter));
            settle(&mut app).await;

            assert_eq!(app.state.submission, SubmissionStatus::Succeeded);
            assert!(app.state.banner_message().is_none());
        }

        #[tokio::test]
        async fn test_invalid_form_is_not_submitted() {
            let mut service = MockVaultServiceTrait::new();
            service.expect_check_corporation_number().times(0);
            service.expect_submit_profile().times(0);
            let mut app = app_with(service);

            app.submit();
            settle(&mut app).await;

            assert_eq!(app.state.submission, SubmissionStatus::Idle);
            assert_eq!(app.state.errors.len(), 4);
            for (_, message) in app.state.errors.iter() {
                assert_eq!(message, REQUIRED_MESSAGE);
            }
        }

        #[tokio::test]
        async fn test_remote_rejection_blocks_submission() {
            let mut service = MockVaultServiceTrait::new();
            service
                .expect_check_corporation_number()
                .returning(|_| CorporationNumberCheck::failed("Find me"));
            service.expect_submit_profile().times(0);
            let mut app = app_with(service);

            fill_valid_form(&mut app);
            app.submit();
            settle(&mut app).await;

            assert_eq!(
                app.state.field_error(FieldName::CorporationNumber),
                Some("Find me")
            );
            assert!(app.state.banner_message().is_none());
        }

        #[tokio::test]
        async fn test_submit_while_busy_is_ignored() {
            let mut service = MockVaultServiceTrait::new();
            service
                .expect_check_corporation_number()
                .times(1)
                .returning(|_| valid_check());
            service
                .expect_submit_profile()
                .times(1)
                .returning(|_| None);
            let mut app = app_with(service);

            fill_valid_form(&mut app);
            app.submit();
            app.submit();
            settle(&mut app).await;

            assert_eq!(app.state.submission, SubmissionStatus::Succeeded);
        }

        #[tokio::test]
        async fn test_resubmit_clears_previous_banner() {
            let mut service = MockVaultServiceTrait::new();
            service
                .expect_check_corporation_number()
                .returning(|_| valid_check());
            service
                .expect_submit_profile()
                .times(1)
                .returning(|_| Some(SubmitFailure::with_message("Not valid :(")));
            service
                .expect_submit_profile()
                .times(1)
                .returning(|_| None);
            let mut app = app_with(service);

            fill_valid_form(&mut app);
            app.submit();
            settle(&mut app).await;
            assert!(app.state.banner_message().is_some());

            app.submit();
            assert!(app.state.banner_message().is_none());
            settle(&mut app).await;
            assert!(app.state.banner_message().is_none());
        }

        #[tokio::test]
        async fn test_edits_during_submission_do_not_desync_result() {
            let mut service = MockVaultServiceTrait::new();
            service
                .expect_check_corporation_number()
                .returning(|_| valid_check());
            service
                .expect_submit_profile()
                .withf(|profile| profile.corporation_number == "123456789")
                .times(1)
                .returning(|_| None);
            let mut app = app_with(service);

            fill_valid_form(&mut app);
            app.submit();
            app.handle_key(key(KeyCode::Backspace));
            app.handle_key(key(KeyCode::Tab));
            settle(&mut app).await;

            assert_eq!(app.state.form.corporation_number.as_text(), "123456789");
            assert!(!app.state.errors.contains(FieldName::CorporationNumber));
            assert_eq!(app.state.submission, SubmissionStatus::Succeeded);
        }

        #[tokio::test]
        async fn test_network_failure_message_shown_in_banner() {
            let mut service = MockVaultServiceTrait::new();
            service
                .expect_check_corporation_number()
                .returning(|_| valid_check());
            service
                .expect_submit_profile()
                .returning(|_| Some(SubmitFailure::with_message("error sending request")));
            let mut app = app_with(service);

            fill_valid_form(&mut app);
            app.submit();
            settle(&mut app).await;

            assert_eq!(app.state.banner_message(), Some("error sending request"));
        }
    }
}
