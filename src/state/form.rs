//! Form editing state types.
//!
//! Every form runs the same submit cycle:
//! `Idle -> Validating -> (Idle with field errors | Submitting) -> Done`.
//! A backend failure while submitting returns the form to `Idle`.

use super::navigation::FormMode;
use crate::task::TaskDraft;
use crate::utils::validation::{is_filled, is_valid_email, MIN_PASSWORD_LEN};
use std::collections::BTreeMap;
use tui_textarea::{CursorMove, TextArea};

/// Specifying form fields.
///
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
pub enum Field {
    Title,
    Description,
    Name,
    Email,
    Password,
    ConfirmPassword,
}

impl Field {
    pub fn label(&self) -> &'static str {
        match self {
            Field::Title => "Task Title",
            Field::Description => "Task Description",
            Field::Name => "Name",
            Field::Email => "Email",
            Field::Password => "Password",
            Field::ConfirmPassword => "Confirm Password",
        }
    }

    /// Return whether the field's text is masked on screen.
    ///
    pub fn is_secret(&self) -> bool {
        matches!(self, Field::Password | Field::ConfirmPassword)
    }
}

/// Per-field validation messages.
///
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<Field, &'static str>);

impl FieldErrors {
    pub fn insert(&mut self, field: Field, message: &'static str) {
        self.0.entry(field).or_insert(message);
    }

    pub fn get(&self, field: Field) -> Option<&'static str> {
        self.0.get(&field).copied()
    }

    pub fn clear(&mut self, field: Field) {
        self.0.remove(&field);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    fn into_result<T>(self, value: T) -> Result<T, FieldErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

/// Specifying the submit cycle of a form.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum FormPhase {
    Idle,
    Validating,
    Submitting,
    Done,
}

/// Submit-cycle bookkeeping shared by all forms.
///
#[derive(Debug, Clone)]
pub struct FormStatus {
    phase: FormPhase,
    errors: FieldErrors,
    failure: Option<String>,
}

impl Default for FormStatus {
    fn default() -> Self {
        FormStatus {
            phase: FormPhase::Idle,
            errors: FieldErrors::default(),
            failure: None,
        }
    }
}

impl FormStatus {
    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Return the last backend failure message.
    ///
    pub fn failure(&self) -> Option<&str> {
        self.failure.as_deref()
    }

    pub fn is_busy(&self) -> bool {
        matches!(self.phase, FormPhase::Submitting | FormPhase::Done)
    }

    /// Validate and move to `Submitting` on success. Returns `None` when
    /// validation fails or a submission is already under way.
    ///
    pub fn submit<T>(&mut self, validate: impl FnOnce() -> Result<T, FieldErrors>) -> Option<T> {
        if self.is_busy() {
            return None;
        }
        self.phase = FormPhase::Validating;
        self.failure = None;
        match validate() {
            Ok(value) => {
                self.errors = FieldErrors::default();
                self.phase = FormPhase::Submitting;
                Some(value)
            }
            Err(errors) => {
                self.errors = errors;
                self.phase = FormPhase::Idle;
                None
            }
        }
    }

    /// Mark the pending submission as finished.
    ///
    pub fn complete(&mut self) {
        if self.phase == FormPhase::Submitting {
            self.phase = FormPhase::Done;
        }
    }

    /// Return to `Idle` after the pending submission failed.
    ///
    pub fn fail(&mut self, message: impl Into<String>) {
        if self.phase == FormPhase::Submitting {
            self.phase = FormPhase::Idle;
            self.failure = Some(message.into());
        }
    }

    pub fn clear_error(&mut self, field: Field) {
        self.errors.clear(field);
    }
}

/// Validated sign-in input.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Validated registration input.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
}

pub fn validate_task(title: &str, description: &str) -> Result<TaskDraft, FieldErrors> {
    let mut errors = FieldErrors::default();
    if !is_filled(title) {
        errors.insert(Field::Title, "Title is required");
    }
    if !is_filled(description) {
        errors.insert(Field::Description, "Description is required");
    }
    errors.into_result(TaskDraft {
        title: title.trim().to_string(),
        description: description.trim().to_string(),
    })
}

pub fn validate_sign_in(email: &str, password: &str) -> Result<Credentials, FieldErrors> {
    let mut errors = FieldErrors::default();
    check_email(&mut errors, email);
    if password.is_empty() {
        errors.insert(Field::Password, "Password is required");
    }
    errors.into_result(Credentials {
        email: email.trim().to_string(),
        password: password.to_string(),
    })
}

pub fn validate_registration(
    name: &str,
    email: &str,
    password: &str,
    confirm_password: &str,
) -> Result<Registration, FieldErrors> {
    let mut errors = FieldErrors::default();
    if !is_filled(name) {
        errors.insert(Field::Name, "Name is required");
    }
    check_email(&mut errors, email);
    if password.is_empty() {
        errors.insert(Field::Password, "Password is required");
    } else if password.chars().count() < MIN_PASSWORD_LEN {
        errors.insert(Field::Password, "Password must be at least 6 characters");
    }
    if password != confirm_password {
        errors.insert(Field::ConfirmPassword, "Passwords do not match");
    }
    errors.into_result(Registration {
        name: name.trim().to_string(),
        email: email.trim().to_string(),
        password: password.to_string(),
    })
}

fn check_email(errors: &mut FieldErrors, email: &str) {
    if email.is_empty() {
        errors.insert(Field::Email, "Email is required");
    } else if !is_valid_email(email) {
        errors.insert(Field::Email, "Email is invalid");
    }
}

/// Field focus and text entry shared by the forms.
///
pub trait InputForm {
    /// Fields in focus order.
    fn fields(&self) -> &'static [Field];

    fn focus(&self) -> Field;

    fn set_focus(&mut self, field: Field);

    fn status(&self) -> &FormStatus;

    fn status_mut(&mut self) -> &mut FormStatus;

    /// Return the single-line text buffer for the field.
    fn text_mut(&mut self, field: Field) -> Option<&mut String>;

    fn insert_char(&mut self, c: char) {
        if self.status().is_busy() {
            return;
        }
        let field = self.focus();
        if let Some(text) = self.text_mut(field) {
            text.push(c);
        }
        self.status_mut().clear_error(field);
    }

    fn backspace(&mut self) {
        if self.status().is_busy() {
            return;
        }
        let field = self.focus();
        if let Some(text) = self.text_mut(field) {
            text.pop();
        }
        self.status_mut().clear_error(field);
    }

    fn next_field(&mut self) {
        let fields = self.fields();
        let index = fields.iter().position(|f| *f == self.focus()).unwrap_or(0);
        self.set_focus(fields[(index + 1) % fields.len()]);
    }

    fn previous_field(&mut self) {
        let fields = self.fields();
        let index = fields.iter().position(|f| *f == self.focus()).unwrap_or(0);
        self.set_focus(fields[(index + fields.len() - 1) % fields.len()]);
    }
}

const TASK_FIELDS: &[Field] = &[Field::Title, Field::Description];
const SIGN_IN_FIELDS: &[Field] = &[Field::Email, Field::Password];
const REGISTER_FIELDS: &[Field] = &[
    Field::Name,
    Field::Email,
    Field::Password,
    Field::ConfirmPassword,
];

/// Task add/edit form.
///
pub struct TaskForm {
    mode: FormMode,
    title: String,
    description: TextArea<'static>,
    focus: Field,
    status: FormStatus,
}

impl TaskForm {
    pub fn new(mode: FormMode) -> Self {
        let (title, description) = match &mode {
            FormMode::Add => (String::new(), TextArea::default()),
            FormMode::Edit { task } => {
                let mut lines: Vec<String> = task.description.lines().map(String::from).collect();
                if lines.is_empty() {
                    lines.push(String::new());
                }
                let mut textarea = TextArea::new(lines);
                textarea.move_cursor(CursorMove::Bottom);
                textarea.move_cursor(CursorMove::End);
                (task.title.clone(), textarea)
            }
        };
        TaskForm {
            mode,
            title,
            description,
            focus: Field::Title,
            status: FormStatus::default(),
        }
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn is_edit(&self) -> bool {
        matches!(self.mode, FormMode::Edit { .. })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> String {
        self.description.lines().join("\n")
    }

    pub fn description_textarea(&self) -> &TextArea<'static> {
        &self.description
    }

    pub fn set_title(&mut self, title: impl Into<String>) -> &mut Self {
        self.title = title.into();
        self.status.clear_error(Field::Title);
        self
    }

    pub fn set_description(&mut self, description: &str) -> &mut Self {
        let mut lines: Vec<String> = description.lines().map(String::from).collect();
        if lines.is_empty() {
            lines.push(String::new());
        }
        self.description = TextArea::new(lines);
        self.status.clear_error(Field::Description);
        self
    }

    /// Break the description line; other fields ignore it.
    ///
    pub fn insert_newline(&mut self) {
        if self.focus == Field::Description && !self.status.is_busy() {
            self.description.insert_newline();
        }
    }

    /// Validate and start submitting.
    ///
    pub fn submit(&mut self) -> Option<TaskDraft> {
        let title = self.title.clone();
        let description = self.description();
        self.status
            .submit(|| validate_task(&title, &description))
    }
}

impl InputForm for TaskForm {
    fn fields(&self) -> &'static [Field] {
        TASK_FIELDS
    }

    fn focus(&self) -> Field {
        self.focus
    }

    fn set_focus(&mut self, field: Field) {
        self.focus = field;
    }

    fn status(&self) -> &FormStatus {
        &self.status
    }

    fn status_mut(&mut self) -> &mut FormStatus {
        &mut self.status
    }

    fn text_mut(&mut self, field: Field) -> Option<&mut String> {
        match field {
            Field::Title => Some(&mut self.title),
            _ => None,
        }
    }

    fn insert_char(&mut self, c: char) {
        if self.status.is_busy() {
            return;
        }
        match self.focus {
            Field::Description => self.description.insert_char(c),
            _ => self.title.push(c),
        }
        self.status.clear_error(self.focus);
    }

    fn backspace(&mut self) {
        if self.status.is_busy() {
            return;
        }
        match self.focus {
            Field::Description => {
                self.description.delete_char();
            }
            _ => {
                self.title.pop();
            }
        }
        self.status.clear_error(self.focus);
    }
}

/// Sign-in form.
///
#[derive(Debug, Clone)]
pub struct SignInForm {
    pub email: String,
    pub password: String,
    focus: Field,
    status: FormStatus,
}

impl Default for SignInForm {
    fn default() -> Self {
        SignInForm {
            email: String::new(),
            password: String::new(),
            focus: Field::Email,
            status: FormStatus::default(),
        }
    }
}

impl SignInForm {
    pub fn submit(&mut self) -> Option<Credentials> {
        let (email, password) = (self.email.clone(), self.password.clone());
        self.status.submit(|| validate_sign_in(&email, &password))
    }
}

impl InputForm for SignInForm {
    fn fields(&self) -> &'static [Field] {
        SIGN_IN_FIELDS
    }

    fn focus(&self) -> Field {
        self.focus
    }

    fn set_focus(&mut self, field: Field) {
        self.focus = field;
    }

    fn status(&self) -> &FormStatus {
        &self.status
    }

    fn status_mut(&mut self) -> &mut FormStatus {
        &mut self.status
    }

    fn text_mut(&mut self, field: Field) -> Option<&mut String> {
        match field {
            Field::Email => Some(&mut self.email),
            Field::Password => Some(&mut self.password),
            _ => None,
        }
    }
}

/// Registration form.
///
#[derive(Debug, Clone)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    focus: Field,
    status: FormStatus,
}

impl Default for RegisterForm {
    fn default() -> Self {
        RegisterForm {
            name: String::new(),
            email: String::new(),
            password: String::new(),
            confirm_password: String::new(),
            focus: Field::Name,
            status: FormStatus::default(),
        }
    }
}

impl RegisterForm {
    pub fn submit(&mut self) -> Option<Registration> {
        let form = self.clone();
        self.status.submit(|| {
            validate_registration(&form.name, &form.email, &form.password, &form.confirm_password)
        })
    }
}

impl InputForm for RegisterForm {
    fn fields(&self) -> &'static [Field] {
        REGISTER_FIELDS
    }

    fn focus(&self) -> Field {
        self.focus
    }

    fn set_focus(&mut self, field: Field) {
        self.focus = field;
    }

    fn status(&self) -> &FormStatus {
        &self.status
    }

    fn status_mut(&mut self) -> &mut FormStatus {
        &mut self.status
    }

    fn text_mut(&mut self, field: Field) -> Option<&mut String> {
        match field {
            Field::Name => Some(&mut self.name),
            Field::Email => Some(&mut self.email),
            Field::Password => Some(&mut self.password),
            Field::ConfirmPassword => Some(&mut self.confirm_password),
            _ => None,
        }
    }
}
