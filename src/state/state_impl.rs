use crate::app::{ConfigSaveSender, NetworkEventSender};
use crate::events::network::Event as NetworkEvent;
use crate::firebase::{Session, StoredSession, UserHandle};
use crate::ui::Theme;
use chrono::{NaiveDate, NaiveDateTime};
use log::*;
use ratatui::widgets::ListState;

use super::form::{
    AuthField, DetailsField, ExerciseField, FieldErrors, SessionForm, SignInForm, SignUpForm,
    WizardStep,
};
use super::navigation::{Tab, View};

/// Houses data representative of application state.
///
pub struct State {
    net_sender: Option<NetworkEventSender>,
    config_save_sender: Option<ConfigSaveSender>,
    user: Option<UserHandle>,
    spinner_index: usize,
    view_stack: Vec<View>,
    active_tab: Tab,
    // Authentication screens
    sign_in_form: SignInForm,
    sign_up_form: SignUpForm,
    auth_field: AuthField,
    auth_errors: FieldErrors,
    auth_error: Option<String>,
    // Stored sessions (None while a fetch is outstanding)
    sessions: Option<Vec<StoredSession>>,
    sessions_list_state: ListState,
    session_detail_id: Option<String>,
    session_detail: Option<Session>,
    // Session wizard
    wizard_form: SessionForm,
    wizard_step: WizardStep,
    wizard_errors: FieldErrors,
    details_field: DetailsField,
    exercise_row: usize,
    exercise_field: ExerciseField,
    submit_in_flight: bool,
    // Log overlay
    log_visible: bool,
    theme: Theme,
}

/// Defines default application state.
///
impl Default for State {
    fn default() -> State {
        State {
            net_sender: None,
            config_save_sender: None,
            user: None,
            spinner_index: 0,
            view_stack: vec![View::SignIn],
            active_tab: Tab::Sessions,
            sign_in_form: SignInForm::default(),
            sign_up_form: SignUpForm::default(),
            auth_field: AuthField::Email,
            auth_errors: FieldErrors::default(),
            auth_error: None,
            sessions: None,
            sessions_list_state: ListState::default(),
            session_detail_id: None,
            session_detail: None,
            wizard_form: SessionForm::default(),
            wizard_step: WizardStep::Details,
            wizard_errors: FieldErrors::default(),
            details_field: DetailsField::Category,
            exercise_row: 0,
            exercise_field: ExerciseField::Name,
            submit_in_flight: false,
            log_visible: false,
            theme: Theme::default(),
        }
    }
}

impl State {
    pub fn new(
        net_sender: NetworkEventSender,
        config_save_sender: ConfigSaveSender,
        theme: Theme,
    ) -> Self {
        State {
            net_sender: Some(net_sender),
            config_save_sender: Some(config_save_sender),
            theme,
            ..State::default()
        }
    }

    /// Send a network event for asynchronous handling.
    ///
    pub fn dispatch(&self, event: NetworkEvent) {
        match &self.net_sender {
            Some(sender) => {
                if let Err(e) = sender.send(event) {
                    error!("Failed to dispatch network event: {}", e);
                }
            }
            None => debug!("Skipping network event dispatch without sender."),
        }
    }

    /// Request an asynchronous configuration save.
    ///
    fn request_config_save(&self) {
        if let Some(sender) = &self.config_save_sender {
            if let Err(e) = sender.send(()) {
                error!("Failed to request configuration save: {}", e);
            }
        }
    }

    /// Get the current theme.
    ///
    pub fn get_theme(&self) -> &Theme {
        &self.theme
    }

    /// Switch between the light and dark themes, persisting the choice.
    ///
    pub fn toggle_dark_mode(&mut self) -> &mut Self {
        self.theme = if self.theme.name == "dark" {
            Theme::light()
        } else {
            Theme::dark()
        };
        self.request_config_save();
        self
    }

    /// Advance the spinner index.
    ///
    pub fn advance_spinner_index(&mut self) -> &mut Self {
        self.spinner_index += 1;
        if self.spinner_index >= crate::ui::SPINNER_FRAME_COUNT {
            self.spinner_index = 0;
        }
        self
    }

    /// Return the current spinner index.
    ///
    pub fn get_spinner_index(&self) -> &usize {
        &self.spinner_index
    }

    /// Return the current view.
    ///
    pub fn current_view(&self) -> &View {
        self.view_stack.last().unwrap_or(&View::SignIn)
    }

    /// Push a view onto the navigation stack.
    ///
    pub fn push_view(&mut self, view: View) -> &mut Self {
        self.view_stack.push(view);
        self
    }

    /// Pop the current view, keeping the base view of the stack in place.
    ///
    pub fn pop_view(&mut self) -> Option<View> {
        if self.view_stack.len() > 1 {
            self.view_stack.pop()
        } else {
            None
        }
    }

    /// Return the active tab of the signed-in stack.
    ///
    pub fn active_tab(&self) -> Tab {
        self.active_tab
    }

    /// Switch to the other tab, replacing the navigation stack with its base
    /// view.
    ///
    pub fn switch_tab(&mut self) -> &mut Self {
        self.active_tab = self.active_tab.toggled();
        self.view_stack = vec![self.active_tab.base_view()];
        self
    }

    /// Returns details for the signed-in user.
    ///
    pub fn get_user(&self) -> Option<&UserHandle> {
        self.user.as_ref()
    }

    /// Record a completed sign-in or sign-up and switch to the signed-in
    /// navigation stack.
    ///
    pub fn set_user(&mut self, user: UserHandle) -> &mut Self {
        self.user = Some(user);
        self.active_tab = Tab::Sessions;
        self.view_stack = vec![View::Sessions];
        self.sessions = None;
        self.sign_in_form = SignInForm::default();
        self.sign_up_form = SignUpForm::default();
        self.auth_field = AuthField::Email;
        self.auth_errors.clear();
        self.auth_error = None;
        self
    }

    /// Record a completed sign-out and return to the authentication stack.
    ///
    pub fn clear_user(&mut self) -> &mut Self {
        self.user = None;
        self.view_stack = vec![View::SignIn];
        self.active_tab = Tab::Sessions;
        self.sessions = None;
        self.session_detail_id = None;
        self.session_detail = None;
        self.auth_field = AuthField::Email;
        self.auth_errors.clear();
        self.auth_error = None;
        self
    }

    /// Return the sign-in form.
    ///
    pub fn sign_in_form(&self) -> &SignInForm {
        &self.sign_in_form
    }

    /// Return the sign-up form.
    ///
    pub fn sign_up_form(&self) -> &SignUpForm {
        &self.sign_up_form
    }

    /// Return the focused authentication field.
    ///
    pub fn auth_field(&self) -> AuthField {
        self.auth_field
    }

    /// Move focus to the next authentication field of the current screen.
    ///
    pub fn next_auth_field(&mut self) -> &mut Self {
        self.auth_field = match (self.current_view(), self.auth_field) {
            (View::SignUp, AuthField::Email) => AuthField::Password,
            (View::SignUp, AuthField::Password) => AuthField::ConfirmPassword,
            (View::SignUp, AuthField::ConfirmPassword) => AuthField::Email,
            (_, AuthField::Email) => AuthField::Password,
            (_, _) => AuthField::Email,
        };
        self
    }

    /// Move focus to the previous authentication field of the current screen.
    ///
    pub fn previous_auth_field(&mut self) -> &mut Self {
        self.auth_field = match (self.current_view(), self.auth_field) {
            (View::SignUp, AuthField::Email) => AuthField::ConfirmPassword,
            (View::SignUp, AuthField::ConfirmPassword) => AuthField::Password,
            (_, AuthField::Password) => AuthField::Email,
            (_, _) => AuthField::Password,
        };
        self
    }

    /// Append a character to the focused authentication field, dismissing
    /// any error banner.
    ///
    pub fn auth_insert_char(&mut self, c: char) -> &mut Self {
        if self.auth_error.is_some() {
            self.auth_error = None;
        }
        self.focused_auth_field_mut().push(c);
        self
    }

    /// Remove the trailing character of the focused authentication field.
    ///
    pub fn auth_backspace(&mut self) -> &mut Self {
        if self.auth_error.is_some() {
            self.auth_error = None;
        }
        self.focused_auth_field_mut().pop();
        self
    }

    fn focused_auth_field_mut(&mut self) -> &mut String {
        let signing_up = matches!(self.current_view(), View::SignUp);
        if signing_up {
            match self.auth_field {
                AuthField::Email => &mut self.sign_up_form.email,
                AuthField::Password => &mut self.sign_up_form.password,
                AuthField::ConfirmPassword => &mut self.sign_up_form.confirm_password,
            }
        } else {
            match self.auth_field {
                AuthField::Password => &mut self.sign_in_form.password,
                _ => &mut self.sign_in_form.email,
            }
        }
    }

    /// Validate the sign-in form, returning the credentials to submit or
    /// recording per-field messages.
    ///
    pub fn submit_sign_in(&mut self) -> Option<(String, String)> {
        match self.sign_in_form.validate() {
            Ok(()) => {
                self.auth_errors.clear();
                Some((
                    self.sign_in_form.email.clone(),
                    self.sign_in_form.password.clone(),
                ))
            }
            Err(errors) => {
                self.auth_errors = errors;
                None
            }
        }
    }

    /// Validate the sign-up form, returning the credentials to submit or
    /// recording per-field messages.
    ///
    pub fn submit_sign_up(&mut self) -> Option<(String, String)> {
        match self.sign_up_form.validate() {
            Ok(()) => {
                self.auth_errors.clear();
                Some((
                    self.sign_up_form.email.clone(),
                    self.sign_up_form.password.clone(),
                ))
            }
            Err(errors) => {
                self.auth_errors = errors;
                None
            }
        }
    }

    /// Open the sign-up screen with a fresh form.
    ///
    pub fn open_sign_up(&mut self) -> &mut Self {
        self.sign_up_form = SignUpForm::default();
        self.auth_field = AuthField::Email;
        self.auth_errors.clear();
        self.auth_error = None;
        self.push_view(View::SignUp);
        self
    }

    /// Leave the sign-up screen and return to sign-in.
    ///
    pub fn close_sign_up(&mut self) -> &mut Self {
        self.pop_view();
        self.auth_field = AuthField::Email;
        self.auth_errors.clear();
        self.auth_error = None;
        self
    }

    /// Return the per-field authentication messages.
    ///
    pub fn get_auth_errors(&self) -> &FieldErrors {
        &self.auth_errors
    }

    /// Return the authentication error banner, if any.
    ///
    pub fn get_auth_error(&self) -> Option<&str> {
        self.auth_error.as_deref()
    }

    /// Surface a generic authentication error banner.
    ///
    pub fn set_auth_error(&mut self, message: String) -> &mut Self {
        self.auth_error = Some(message);
        self
    }

    /// Returns the stored sessions, or None while a fetch is outstanding.
    ///
    pub fn get_sessions(&self) -> Option<&[StoredSession]> {
        self.sessions.as_deref()
    }

    /// Replace the stored sessions and keep the selection within bounds.
    ///
    pub fn set_sessions(&mut self, sessions: Vec<StoredSession>) -> &mut Self {
        if sessions.is_empty() {
            self.sessions_list_state.select(None);
        } else {
            let selected = self.sessions_list_state.selected().unwrap_or(0);
            self.sessions_list_state
                .select(Some(selected.min(sessions.len() - 1)));
        }
        self.sessions = Some(sessions);
        self
    }

    /// Mark the session list as loading.
    ///
    pub fn set_sessions_loading(&mut self) -> &mut Self {
        self.sessions = None;
        self
    }

    /// Return the list widget state for the session list.
    ///
    pub fn sessions_list_state(&mut self) -> &mut ListState {
        &mut self.sessions_list_state
    }

    /// Activate the next session in the list.
    ///
    pub fn next_session_index(&mut self) -> &mut Self {
        let count = self.sessions.as_ref().map(Vec::len).unwrap_or(0);
        if count == 0 {
            self.sessions_list_state.select(None);
            return self;
        }
        let current = self.sessions_list_state.selected().unwrap_or(0);
        self.sessions_list_state.select(Some((current + 1) % count));
        self
    }

    /// Activate the previous session in the list.
    ///
    pub fn previous_session_index(&mut self) -> &mut Self {
        let count = self.sessions.as_ref().map(Vec::len).unwrap_or(0);
        if count == 0 {
            self.sessions_list_state.select(None);
            return self;
        }
        let current = self.sessions_list_state.selected().unwrap_or(0);
        let previous = if current == 0 { count - 1 } else { current - 1 };
        self.sessions_list_state.select(Some(previous));
        self
    }

    /// Return the selected stored session, if any.
    ///
    pub fn selected_session(&self) -> Option<&StoredSession> {
        let sessions = self.sessions.as_ref()?;
        sessions.get(self.sessions_list_state.selected()?)
    }

    /// Open the detail view for a stored session, pending its fetch.
    ///
    pub fn open_session_detail(&mut self, id: String) -> &mut Self {
        self.session_detail_id = Some(id);
        self.session_detail = None;
        self.push_view(View::SessionDetail);
        self
    }

    /// Record a fetched session document, ignoring responses for a document
    /// other than the one currently open.
    ///
    pub fn set_session_detail(&mut self, id: &str, session: Session) -> &mut Self {
        if self.session_detail_id.as_deref() == Some(id) {
            self.session_detail = Some(session);
        } else {
            debug!("Discarding stale session detail for document {}.", id);
        }
        self
    }

    /// Return the open session document id.
    ///
    pub fn get_session_detail_id(&self) -> Option<&str> {
        self.session_detail_id.as_deref()
    }

    /// Return the fetched session detail, or None while loading.
    ///
    pub fn get_session_detail(&self) -> Option<&Session> {
        self.session_detail.as_ref()
    }

    /// Leave the session detail view.
    ///
    pub fn close_session_detail(&mut self) -> &mut Self {
        self.session_detail_id = None;
        self.session_detail = None;
        self.pop_view();
        self
    }

    /// Open the session wizard with a fresh form dated to the given day.
    ///
    pub fn open_wizard(&mut self, today: NaiveDate) -> &mut Self {
        self.wizard_form = SessionForm::new(today);
        self.wizard_step = WizardStep::Details;
        self.wizard_errors.clear();
        self.details_field = DetailsField::Category;
        self.exercise_row = 0;
        self.exercise_field = ExerciseField::Name;
        self.push_view(View::SessionWizard);
        self
    }

    /// Close the wizard from the details step, discarding in-progress data.
    ///
    pub fn cancel_wizard(&mut self) -> &mut Self {
        self.wizard_form = SessionForm::default();
        self.wizard_errors.clear();
        self.pop_view();
        self
    }

    /// Return the in-progress session form.
    ///
    pub fn wizard_form(&self) -> &SessionForm {
        &self.wizard_form
    }

    /// Return the current wizard step.
    ///
    pub fn wizard_step(&self) -> WizardStep {
        self.wizard_step
    }

    /// Return the focused field on the details step.
    ///
    pub fn details_field(&self) -> DetailsField {
        self.details_field
    }

    /// Return the focused entry row and column on the exercises step.
    ///
    pub fn exercise_focus(&self) -> (usize, ExerciseField) {
        (self.exercise_row, self.exercise_field)
    }

    /// Return the per-field wizard validation messages.
    ///
    pub fn get_wizard_errors(&self) -> &FieldErrors {
        &self.wizard_errors
    }

    /// Append a character to the focused wizard field.
    ///
    pub fn wizard_insert_char(&mut self, c: char) -> &mut Self {
        match self.wizard_step {
            WizardStep::Details => match self.details_field {
                DetailsField::Category => self.wizard_form.category.push(c),
                DetailsField::Date => self.wizard_form.date.push(c),
            },
            WizardStep::Exercises => {
                let field = self.exercise_field;
                if let Some(entry) = self.wizard_form.exercise_mut(self.exercise_row) {
                    entry.field_mut(field).push(c);
                }
            }
        }
        self
    }

    /// Remove the trailing character of the focused wizard field.
    ///
    pub fn wizard_backspace(&mut self) -> &mut Self {
        match self.wizard_step {
            WizardStep::Details => match self.details_field {
                DetailsField::Category => {
                    self.wizard_form.category.pop();
                }
                DetailsField::Date => {
                    self.wizard_form.date.pop();
                }
            },
            WizardStep::Exercises => {
                let field = self.exercise_field;
                if let Some(entry) = self.wizard_form.exercise_mut(self.exercise_row) {
                    entry.field_mut(field).pop();
                }
            }
        }
        self
    }

    /// Move wizard focus to the next field.
    ///
    pub fn wizard_focus_next(&mut self) -> &mut Self {
        match self.wizard_step {
            WizardStep::Details => self.details_field = self.details_field.next(),
            WizardStep::Exercises => match self.exercise_field.next() {
                Some(field) => self.exercise_field = field,
                None => {
                    self.exercise_field = ExerciseField::Name;
                    self.exercise_row =
                        (self.exercise_row + 1) % self.wizard_form.exercises().len().max(1);
                }
            },
        }
        self
    }

    /// Move wizard focus to the previous field.
    ///
    pub fn wizard_focus_previous(&mut self) -> &mut Self {
        match self.wizard_step {
            WizardStep::Details => self.details_field = self.details_field.next(),
            WizardStep::Exercises => match self.exercise_field.previous() {
                Some(field) => self.exercise_field = field,
                None => {
                    let count = self.wizard_form.exercises().len().max(1);
                    self.exercise_field = ExerciseField::Reps;
                    self.exercise_row = if self.exercise_row == 0 {
                        count - 1
                    } else {
                        self.exercise_row - 1
                    };
                }
            },
        }
        self
    }

    /// Move wizard focus one entry row down, keeping the column.
    ///
    pub fn wizard_focus_row_down(&mut self) -> &mut Self {
        if self.wizard_step == WizardStep::Exercises {
            let count = self.wizard_form.exercises().len();
            if count > 0 {
                self.exercise_row = (self.exercise_row + 1).min(count - 1);
            }
        }
        self
    }

    /// Move wizard focus one entry row up, keeping the column.
    ///
    pub fn wizard_focus_row_up(&mut self) -> &mut Self {
        if self.wizard_step == WizardStep::Exercises {
            self.exercise_row = self.exercise_row.saturating_sub(1);
        }
        self
    }

    /// Advance from the details step once category and date validate.
    ///
    pub fn wizard_next(&mut self, now: NaiveDateTime) -> &mut Self {
        match self.wizard_form.validate_details(now) {
            Ok(()) => {
                self.wizard_errors.clear();
                self.wizard_step = WizardStep::Exercises;
                self.exercise_row = 0;
                self.exercise_field = ExerciseField::Name;
            }
            Err(errors) => self.wizard_errors = errors,
        }
        self
    }

    /// Return from the exercises step to the details step, preserving
    /// entered data.
    ///
    pub fn wizard_back(&mut self) -> &mut Self {
        self.wizard_step = WizardStep::Details;
        self.wizard_errors.clear();
        self
    }

    /// Append a blank exercise entry and focus it.
    ///
    pub fn wizard_append_exercise(&mut self) -> &mut Self {
        self.exercise_row = self.wizard_form.append_exercise();
        self.exercise_field = ExerciseField::Name;
        self
    }

    /// Restore the exercise list to a single blank entry, preserving the
    /// category and date.
    ///
    pub fn wizard_reset(&mut self) -> &mut Self {
        self.wizard_form.reset_exercises();
        self.exercise_row = 0;
        self.exercise_field = ExerciseField::Name;
        self
    }

    /// Validate the full record and hand back the session to submit, marking
    /// a submission as outstanding. Further saves are ignored until the
    /// outstanding one settles.
    ///
    pub fn wizard_save(&mut self, now: NaiveDateTime) -> Option<Session> {
        if self.submit_in_flight {
            debug!("Ignoring save request while a submission is outstanding.");
            return None;
        }
        match self.wizard_form.validate(now) {
            Ok(()) => {
                self.wizard_errors.clear();
                let session = self.wizard_form.to_session()?;
                self.submit_in_flight = true;
                Some(session)
            }
            Err(errors) => {
                self.wizard_errors = errors;
                None
            }
        }
    }

    /// Returns whether a submission is outstanding.
    ///
    pub fn is_submit_in_flight(&self) -> bool {
        self.submit_in_flight
    }

    /// Record a completed submission: the form returns to its defaults and
    /// the wizard navigates back to the listing view.
    ///
    pub fn finish_submission(&mut self) -> &mut Self {
        self.submit_in_flight = false;
        self.wizard_form = SessionForm::default();
        self.wizard_step = WizardStep::Details;
        self.wizard_errors.clear();
        if matches!(self.current_view(), View::SessionWizard) {
            self.pop_view();
        }
        self.sessions = None;
        self
    }

    /// Record a failed submission, leaving the wizard where it is.
    ///
    pub fn abort_submission(&mut self) -> &mut Self {
        self.submit_in_flight = false;
        self
    }

    /// Returns whether the log overlay is visible.
    ///
    pub fn is_log_visible(&self) -> bool {
        self.log_visible
    }

    /// Toggle the log overlay.
    ///
    pub fn toggle_log(&mut self) -> &mut Self {
        self.log_visible = !self.log_visible;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::form::{EMPTY_CATEGORY_MESSAGE, FUTURE_DATE_MESSAGE};
    use chrono::{Duration, Local};
    use fake::{Fake, Faker};

    fn now() -> NaiveDateTime {
        Local::now().naive_local()
    }

    fn today() -> NaiveDate {
        Local::now().date_naive()
    }

    fn signed_in_state() -> State {
        let mut state = State::default();
        state.set_user(UserHandle {
            local_id: "user-1".to_string(),
            email: "lifter@example.com".to_string(),
        });
        state
    }

    #[test]
    fn test_sign_in_switches_to_sessions_stack() {
        let mut state = State::default();
        assert_eq!(state.current_view(), &View::SignIn);

        state.set_user(Faker.fake());
        assert_eq!(state.current_view(), &View::Sessions);
        assert!(state.get_sessions().is_none());

        state.clear_user();
        assert_eq!(state.current_view(), &View::SignIn);
    }

    #[test]
    fn test_sign_up_screen_round_trip() {
        let mut state = State::default();
        state.open_sign_up();
        assert_eq!(state.current_view(), &View::SignUp);
        state.close_sign_up();
        assert_eq!(state.current_view(), &View::SignIn);
    }

    #[test]
    fn test_auth_chars_route_to_focused_field() {
        let mut state = State::default();
        state.auth_insert_char('a');
        state.next_auth_field();
        state.auth_insert_char('b');
        assert_eq!(state.sign_in_form().email, "a");
        assert_eq!(state.sign_in_form().password, "b");

        state.auth_backspace();
        assert!(state.sign_in_form().password.is_empty());
    }

    #[test]
    fn test_typing_dismisses_auth_banner() {
        let mut state = State::default();
        state.set_auth_error("Could not sign in.".to_string());
        assert!(state.get_auth_error().is_some());
        state.auth_insert_char('a');
        assert!(state.get_auth_error().is_none());
    }

    #[test]
    fn test_submit_sign_in_records_field_errors() {
        let mut state = State::default();
        assert!(state.submit_sign_in().is_none());
        assert!(!state.get_auth_errors().is_empty());

        state.sign_in_form.email = "lifter@example.com".to_string();
        state.sign_in_form.password = "secret-password".to_string();
        let credentials = state.submit_sign_in().unwrap();
        assert_eq!(credentials.0, "lifter@example.com");
        assert!(state.get_auth_errors().is_empty());
    }

    #[test]
    fn test_wizard_cannot_advance_without_valid_details() {
        let mut state = signed_in_state();
        state.open_wizard(today());

        state.wizard_next(now());
        assert_eq!(state.wizard_step(), WizardStep::Details);
        assert_eq!(
            state.get_wizard_errors().get("category"),
            Some(EMPTY_CATEGORY_MESSAGE)
        );
    }

    #[test]
    fn test_wizard_rejects_future_date() {
        let mut state = signed_in_state();
        state.open_wizard(today() + Duration::days(1));
        state.wizard_insert_char('P');

        state.wizard_next(now());
        assert_eq!(state.wizard_step(), WizardStep::Details);
        assert_eq!(
            state.get_wizard_errors().get("date"),
            Some(FUTURE_DATE_MESSAGE)
        );
    }

    #[test]
    fn test_wizard_advances_and_saves() {
        let mut state = signed_in_state();
        state.open_wizard(today() - Duration::days(1));
        for c in "Push Day".chars() {
            state.wizard_insert_char(c);
        }

        state.wizard_next(now());
        assert_eq!(state.wizard_step(), WizardStep::Exercises);
        assert!(state.get_wizard_errors().is_empty());

        for c in "Bench Press".chars() {
            state.wizard_insert_char(c);
        }
        state.wizard_focus_next();
        for c in "60".chars() {
            state.wizard_insert_char(c);
        }

        let session = state.wizard_save(now()).unwrap();
        assert_eq!(session.category, "Push Day");
        assert_eq!(session.exercises[0].name, "Bench Press");
        assert_eq!(session.exercises[0].weight, "60");
        assert!(state.is_submit_in_flight());
    }

    #[test]
    fn test_second_save_is_ignored_while_in_flight() {
        let mut state = signed_in_state();
        state.open_wizard(today() - Duration::days(1));
        for c in "Push Day".chars() {
            state.wizard_insert_char(c);
        }
        state.wizard_next(now());

        assert!(state.wizard_save(now()).is_some());
        assert!(state.wizard_save(now()).is_none());

        state.abort_submission();
        assert!(state.wizard_save(now()).is_some());
    }

    #[test]
    fn test_finish_submission_resets_form_and_navigates_to_listing() {
        let mut state = signed_in_state();
        state.open_wizard(today() - Duration::days(1));
        for c in "Push Day".chars() {
            state.wizard_insert_char(c);
        }
        state.wizard_next(now());
        state.wizard_save(now()).unwrap();

        state.finish_submission();
        assert!(!state.is_submit_in_flight());
        assert_eq!(state.current_view(), &View::Sessions);
        assert_eq!(state.wizard_form(), &SessionForm::default());
        assert!(state.get_sessions().is_none());
    }

    #[test]
    fn test_wizard_back_preserves_entered_data() {
        let mut state = signed_in_state();
        state.open_wizard(today() - Duration::days(1));
        for c in "Legs".chars() {
            state.wizard_insert_char(c);
        }
        state.wizard_next(now());
        for c in "Squat".chars() {
            state.wizard_insert_char(c);
        }

        state.wizard_back();
        assert_eq!(state.wizard_step(), WizardStep::Details);
        state.wizard_next(now());
        assert_eq!(state.wizard_form().exercises()[0].name, "Squat");
    }

    #[test]
    fn test_wizard_reset_keeps_category_and_date() {
        let mut state = signed_in_state();
        state.open_wizard(today() - Duration::days(1));
        for c in "Legs".chars() {
            state.wizard_insert_char(c);
        }
        let date = state.wizard_form().date.clone();
        state.wizard_next(now());
        for c in "Squat".chars() {
            state.wizard_insert_char(c);
        }
        state.wizard_append_exercise();

        state.wizard_reset();
        assert_eq!(state.wizard_form().exercises().len(), 1);
        assert!(state.wizard_form().exercises()[0].name.is_empty());
        assert_eq!(state.wizard_form().category, "Legs");
        assert_eq!(state.wizard_form().date, date);
        assert_eq!(state.exercise_focus().0, 0);
    }

    #[test]
    fn test_cancel_wizard_discards_data() {
        let mut state = signed_in_state();
        state.open_wizard(today());
        state.wizard_insert_char('x');
        state.cancel_wizard();
        assert_eq!(state.current_view(), &View::Sessions);
        assert_eq!(state.wizard_form(), &SessionForm::default());
    }

    #[test]
    fn test_exercise_focus_wraps_across_rows() {
        let mut state = signed_in_state();
        state.open_wizard(today() - Duration::days(1));
        for c in "Push".chars() {
            state.wizard_insert_char(c);
        }
        state.wizard_next(now());
        state.wizard_append_exercise();
        assert_eq!(state.exercise_focus(), (1, ExerciseField::Name));

        state.wizard_focus_previous();
        assert_eq!(state.exercise_focus(), (0, ExerciseField::Reps));
        state.wizard_focus_next();
        assert_eq!(state.exercise_focus(), (1, ExerciseField::Name));

        state.wizard_focus_row_up();
        assert_eq!(state.exercise_focus().0, 0);
        state.wizard_focus_row_down();
        assert_eq!(state.exercise_focus().0, 1);
    }

    #[test]
    fn test_session_selection_wraps() {
        let mut state = signed_in_state();
        state.set_sessions(vec![Faker.fake(), Faker.fake(), Faker.fake()]);

        state.next_session_index();
        assert_eq!(state.sessions_list_state().selected(), Some(1));
        state.previous_session_index();
        state.previous_session_index();
        assert_eq!(state.sessions_list_state().selected(), Some(2));
    }

    #[test]
    fn test_selection_clamped_when_sessions_shrink() {
        let mut state = signed_in_state();
        state.set_sessions(vec![Faker.fake(), Faker.fake(), Faker.fake()]);
        state.next_session_index();
        state.next_session_index();
        assert_eq!(state.sessions_list_state().selected(), Some(2));

        state.set_sessions(vec![Faker.fake()]);
        assert_eq!(state.sessions_list_state().selected(), Some(0));
        assert!(state.selected_session().is_some());

        state.set_sessions(vec![]);
        assert!(state.selected_session().is_none());
    }

    #[test]
    fn test_stale_session_detail_is_discarded() {
        let mut state = signed_in_state();
        state.open_session_detail("doc-1".to_string());
        assert_eq!(state.current_view(), &View::SessionDetail);
        assert!(state.get_session_detail().is_none());

        let stale: Session = Faker.fake();
        state.set_session_detail("doc-2", stale);
        assert!(state.get_session_detail().is_none());

        let fresh: Session = Faker.fake();
        state.set_session_detail("doc-1", fresh.clone());
        assert_eq!(state.get_session_detail(), Some(&fresh));

        state.close_session_detail();
        assert_eq!(state.current_view(), &View::Sessions);
    }

    #[test]
    fn test_switch_tab_replaces_stack() {
        let mut state = signed_in_state();
        state.open_session_detail("doc-1".to_string());
        state.switch_tab();
        assert_eq!(state.active_tab(), Tab::Settings);
        assert_eq!(state.current_view(), &View::Settings);
        state.switch_tab();
        assert_eq!(state.current_view(), &View::Sessions);
    }

    #[test]
    fn test_toggle_dark_mode_switches_theme() {
        let mut state = State::default();
        assert_eq!(state.get_theme().name, "light");
        state.toggle_dark_mode();
        assert_eq!(state.get_theme().name, "dark");
        state.toggle_dark_mode();
        assert_eq!(state.get_theme().name, "light");
    }
}
