//! Application state management module.
//!
//! This module contains the core state management for the application, including:
//! - Main `State` struct that holds view-level data
//! - Navigation types (Route, Navigator, ListOutcome, etc.)
//! - Form editing types (TaskForm, SignInForm, FormPhase, etc.)
//! - State error handling

mod error;
mod form;
pub mod greeting;
mod navigation;

pub use error::StateError;
pub use form::{
    validate_registration, validate_sign_in, validate_task, Credentials, Field, FieldErrors,
    FormPhase, FormStatus, InputForm, RegisterForm, Registration, SignInForm, TaskForm,
};
pub use navigation::{
    FormMode, ListOutcome, Navigator, ParamSlot, Popup, Route, ViewEntry, ViewId,
};

#[path = "state_impl.rs"]
mod state_impl;

pub use state_impl::State;
