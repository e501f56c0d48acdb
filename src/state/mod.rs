//! Application state management module.
//!
//! This module contains the core state management for the application,
//! including:
//! - Main `State` struct that holds all application data
//! - Navigation types (View, Tab)
//! - Form editing types (SessionForm, wizard steps, validation)

mod form;
mod navigation;
mod state_impl;

pub use form::{
    AuthField, DetailsField, ExerciseEntry, ExerciseField, FieldErrors, SessionForm, SignInForm,
    SignUpForm, WizardStep,
};
pub use navigation::{Tab, View};
pub use state_impl::State;
