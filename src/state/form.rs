//! Form editing state types.
//!
//! This module contains the in-progress session form, the wizard step
//! machinery, the authentication forms, and their validation rules.
//! Validation is pure and synchronous: it never touches external state.

use crate::firebase::{Exercise, Session};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use std::collections::BTreeMap;

/// Input format for the date field.
pub const DATE_INPUT_FORMAT: &str = "%Y-%m-%d";

pub const EMPTY_CATEGORY_MESSAGE: &str = "Please fill in category.";
pub const FUTURE_DATE_MESSAGE: &str = "Date cannot be in the future.";
pub const INVALID_DATE_MESSAGE: &str = "Date must be a valid YYYY-MM-DD date.";
pub const INVALID_EMAIL_MESSAGE: &str = "Email must be valid.";
pub const SHORT_PASSWORD_MESSAGE: &str = "Password must contain at least 8 characters.";
pub const PASSWORD_MISMATCH_MESSAGE: &str = "Passwords do not match.";

const MIN_PASSWORD_LENGTH: usize = 8;

/// A mapping from field path to a human-readable validation message.
///
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn insert(&mut self, field: &str, message: &str) {
        self.0.insert(field.to_string(), message.to_string());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

/// Specifying the wizard step.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum WizardStep {
    Details,
    Exercises,
}

/// Specifying the focused field on the details step.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum DetailsField {
    Category,
    Date,
}

impl DetailsField {
    pub fn next(self) -> Self {
        match self {
            DetailsField::Category => DetailsField::Date,
            DetailsField::Date => DetailsField::Category,
        }
    }
}

/// Specifying the focused column of an exercise entry.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ExerciseField {
    Name,
    Weight,
    Sets,
    Reps,
}

impl ExerciseField {
    pub fn next(self) -> Option<Self> {
        match self {
            ExerciseField::Name => Some(ExerciseField::Weight),
            ExerciseField::Weight => Some(ExerciseField::Sets),
            ExerciseField::Sets => Some(ExerciseField::Reps),
            ExerciseField::Reps => None,
        }
    }

    pub fn previous(self) -> Option<Self> {
        match self {
            ExerciseField::Name => None,
            ExerciseField::Weight => Some(ExerciseField::Name),
            ExerciseField::Sets => Some(ExerciseField::Weight),
            ExerciseField::Reps => Some(ExerciseField::Sets),
        }
    }
}

/// Specifying the focused field on the authentication screens.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum AuthField {
    Email,
    Password,
    ConfirmPassword,
}

/// One editable exercise entry. Entries carry a stable identity assigned at
/// creation so rendering and focus survive list growth.
///
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExerciseEntry {
    pub id: u64,
    pub name: String,
    pub weight: String,
    pub sets: String,
    pub reps: String,
}

impl ExerciseEntry {
    fn blank(id: u64) -> Self {
        ExerciseEntry {
            id,
            ..ExerciseEntry::default()
        }
    }

    /// Return the text of one column.
    ///
    pub fn field(&self, field: ExerciseField) -> &str {
        match field {
            ExerciseField::Name => &self.name,
            ExerciseField::Weight => &self.weight,
            ExerciseField::Sets => &self.sets,
            ExerciseField::Reps => &self.reps,
        }
    }

    /// Return mutable access to the text of one column.
    ///
    pub fn field_mut(&mut self, field: ExerciseField) -> &mut String {
        match field {
            ExerciseField::Name => &mut self.name,
            ExerciseField::Weight => &mut self.weight,
            ExerciseField::Sets => &mut self.sets,
            ExerciseField::Reps => &mut self.reps,
        }
    }
}

/// The in-progress session record owned by the wizard. Fields hold the text
/// exactly as typed; conversion to a storable session happens only after
/// validation passes.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionForm {
    pub category: String,
    pub date: String,
    exercises: Vec<ExerciseEntry>,
    next_entry_id: u64,
}

impl Default for SessionForm {
    fn default() -> SessionForm {
        SessionForm {
            category: String::new(),
            date: String::new(),
            exercises: vec![ExerciseEntry::blank(0)],
            next_entry_id: 1,
        }
    }
}

impl SessionForm {
    /// Return a fresh form with the date defaulted to the given day and a
    /// single blank exercise entry.
    ///
    pub fn new(today: NaiveDate) -> SessionForm {
        SessionForm {
            date: today.format(DATE_INPUT_FORMAT).to_string(),
            ..SessionForm::default()
        }
    }

    /// Return the exercise entries in display order.
    ///
    pub fn exercises(&self) -> &[ExerciseEntry] {
        &self.exercises
    }

    /// Return mutable access to one exercise entry.
    ///
    pub fn exercise_mut(&mut self, index: usize) -> Option<&mut ExerciseEntry> {
        self.exercises.get_mut(index)
    }

    /// Append one blank entry to the end of the list, returning its index.
    ///
    pub fn append_exercise(&mut self) -> usize {
        let id = self.next_entry_id;
        self.next_entry_id += 1;
        self.exercises.push(ExerciseEntry::blank(id));
        self.exercises.len() - 1
    }

    /// Restore the exercise list to a single blank entry, preserving the
    /// category and date fields.
    ///
    pub fn reset_exercises(&mut self) {
        let id = self.next_entry_id;
        self.next_entry_id += 1;
        self.exercises = vec![ExerciseEntry::blank(id)];
    }

    /// Validate the fields gating the step transition: category and date.
    ///
    pub fn validate_details(&self, now: NaiveDateTime) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::default();
        if self.category.is_empty() {
            errors.insert("category", EMPTY_CATEGORY_MESSAGE);
        }
        match self.parsed_date() {
            Some(date) => {
                // Strictly before the current moment: the day's midnight has
                // already passed for any non-future day.
                if date.and_time(NaiveTime::MIN) >= now {
                    errors.insert("date", FUTURE_DATE_MESSAGE);
                }
            }
            None => errors.insert("date", INVALID_DATE_MESSAGE),
        }
        errors.into_result()
    }

    /// Validate the full record. Exercise fields are free text with no
    /// constraints, so an entry with all-blank fields is structurally valid.
    ///
    pub fn validate(&self, now: NaiveDateTime) -> Result<(), FieldErrors> {
        self.validate_details(now)
    }

    /// Convert the validated form into a storable session. Returns None when
    /// the date text does not parse; callers validate first.
    ///
    pub fn to_session(&self) -> Option<Session> {
        let date = self.parsed_date()?;
        Some(Session {
            category: self.category.clone(),
            date: date.and_time(NaiveTime::MIN).and_utc(),
            exercises: self
                .exercises
                .iter()
                .map(|entry| Exercise {
                    name: entry.name.clone(),
                    weight: entry.weight.clone(),
                    sets: entry.sets.clone(),
                    reps: entry.reps.clone(),
                })
                .collect(),
        })
    }

    fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.date.trim(), DATE_INPUT_FORMAT).ok()
    }
}

/// The sign-in form.
///
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SignInForm {
    pub email: String,
    pub password: String,
}

impl SignInForm {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::default();
        if !valid_email(&self.email) {
            errors.insert("email", INVALID_EMAIL_MESSAGE);
        }
        if self.password.chars().count() < MIN_PASSWORD_LENGTH {
            errors.insert("password", SHORT_PASSWORD_MESSAGE);
        }
        errors.into_result()
    }
}

/// The sign-up form.
///
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SignUpForm {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl SignUpForm {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::default();
        if !valid_email(&self.email) {
            errors.insert("email", INVALID_EMAIL_MESSAGE);
        }
        if self.password.chars().count() < MIN_PASSWORD_LENGTH {
            errors.insert("password", SHORT_PASSWORD_MESSAGE);
        }
        if self.confirm_password.chars().count() < MIN_PASSWORD_LENGTH {
            errors.insert("confirm_password", SHORT_PASSWORD_MESSAGE);
        } else if self.password != self.confirm_password {
            errors.insert("confirm_password", PASSWORD_MISMATCH_MESSAGE);
        }
        errors.into_result()
    }
}

fn valid_email(email: &str) -> bool {
    let mut parts = email.splitn(2, '@');
    let local = parts.next().unwrap_or_default();
    let domain = parts.next().unwrap_or_default();
    !local.is_empty()
        && !domain.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !email.contains(char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Duration, Local};

    fn now() -> NaiveDateTime {
        Local::now().naive_local()
    }

    fn valid_form() -> SessionForm {
        let mut form = SessionForm::new(Local::now().date_naive() - Duration::days(1));
        form.category = "Push Day".to_string();
        form
    }

    #[test]
    fn test_validation_accepts_past_date_and_category() {
        assert!(valid_form().validate_details(now()).is_ok());
        assert!(valid_form().validate(now()).is_ok());
    }

    #[test]
    fn test_empty_category_fails_validation() {
        let mut form = valid_form();
        form.category.clear();
        let errors = form.validate_details(now()).unwrap_err();
        assert_eq!(errors.get("category"), Some(EMPTY_CATEGORY_MESSAGE));
        assert_eq!(errors.get("date"), None);
    }

    #[test]
    fn test_future_date_fails_validation() {
        let mut form = valid_form();
        let tomorrow = Local::now().date_naive() + Duration::days(1);
        form.date = tomorrow.format(DATE_INPUT_FORMAT).to_string();
        let errors = form.validate_details(now()).unwrap_err();
        assert_eq!(errors.get("date"), Some(FUTURE_DATE_MESSAGE));
    }

    #[test]
    fn test_unparseable_date_fails_validation() {
        let mut form = valid_form();
        form.date = "not-a-date".to_string();
        let errors = form.validate_details(now()).unwrap_err();
        assert_eq!(errors.get("date"), Some(INVALID_DATE_MESSAGE));
    }

    #[test]
    fn test_blank_exercise_entries_are_structurally_valid() {
        let mut form = valid_form();
        form.append_exercise();
        form.append_exercise();
        assert!(form.validate(now()).is_ok());
    }

    #[test]
    fn test_append_adds_one_blank_entry_with_fresh_id() {
        let mut form = SessionForm::default();
        let before = form.exercises().len();
        let index = form.append_exercise();

        assert_eq!(form.exercises().len(), before + 1);
        assert_eq!(index, before);
        let entry = &form.exercises()[index];
        assert!(entry.name.is_empty());
        assert!(entry.weight.is_empty());
        assert!(entry.sets.is_empty());
        assert!(entry.reps.is_empty());

        let ids: Vec<u64> = form.exercises().iter().map(|e| e.id).collect();
        let mut deduped = ids.clone();
        deduped.dedup();
        assert_eq!(ids, deduped);
    }

    #[test]
    fn test_reset_restores_single_blank_entry_preserving_details() {
        let mut form = valid_form();
        form.append_exercise();
        if let Some(entry) = form.exercise_mut(0) {
            entry.name = "Bench Press".to_string();
            entry.weight = "60".to_string();
        }
        let category = form.category.clone();
        let date = form.date.clone();

        form.reset_exercises();

        assert_eq!(form.exercises().len(), 1);
        assert!(form.exercises()[0].name.is_empty());
        assert_eq!(form.category, category);
        assert_eq!(form.date, date);
    }

    #[test]
    fn test_to_session_carries_fields_through() {
        let mut form = valid_form();
        if let Some(entry) = form.exercise_mut(0) {
            entry.name = "Bench Press".to_string();
            entry.weight = "60".to_string();
            entry.sets = "3".to_string();
            entry.reps = "10".to_string();
        }

        let session = form.to_session().unwrap();
        assert_eq!(session.category, "Push Day");
        assert_eq!(session.exercises.len(), 1);
        assert_eq!(session.exercises[0].weight, "60");
        let yesterday = Local::now().date_naive() - Duration::days(1);
        assert_eq!(session.date.year(), yesterday.year());
    }

    #[test]
    fn test_to_session_requires_parseable_date() {
        let mut form = valid_form();
        form.date = "??".to_string();
        assert!(form.to_session().is_none());
    }

    #[test]
    fn test_sign_in_validation() {
        let mut form = SignInForm {
            email: "lifter@example.com".to_string(),
            password: "secret-password".to_string(),
        };
        assert!(form.validate().is_ok());

        form.email = "not-an-email".to_string();
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get("email"), Some(INVALID_EMAIL_MESSAGE));

        form.email = "lifter@example.com".to_string();
        form.password = "short".to_string();
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get("password"), Some(SHORT_PASSWORD_MESSAGE));
    }

    #[test]
    fn test_sign_up_requires_matching_passwords() {
        let mut form = SignUpForm {
            email: "lifter@example.com".to_string(),
            password: "secret-password".to_string(),
            confirm_password: "secret-password".to_string(),
        };
        assert!(form.validate().is_ok());

        form.confirm_password = "different-password".to_string();
        let errors = form.validate().unwrap_err();
        assert_eq!(
            errors.get("confirm_password"),
            Some(PASSWORD_MISMATCH_MESSAGE)
        );
    }
}
