use crate::app::{NetworkEventSender, Stores};
use crate::events::network::Event as NetworkEvent;
use crate::logger::LogBuffer;
use crate::session::{BootstrapState, Session};
use crate::task::{Task, Tasks};
use crate::ui::{Theme, SPINNER_FRAME_COUNT};
use log::*;
use ratatui::widgets::ListState;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::watch;

use super::error::StateError;
use super::form::{InputForm, RegisterForm, SignInForm, TaskForm};
use super::greeting;
use super::navigation::{FormMode, ListOutcome, Navigator, Popup, Route, ViewId};

/// How often the motivational line above the task list changes.
///
const GREETING_ROTATION: Duration = Duration::from_secs(2);

/// Houses data representative of application state.
///
pub struct State {
    net_sender: Option<NetworkEventSender>,
    stores: Stores,
    tasks_rx: watch::Receiver<Tasks>,
    tasks: Tasks, // Snapshot rendered by the task list
    navigator: Navigator,
    bootstrap: BootstrapState,
    tasks_list_state: ListState,
    sign_in_form: SignInForm,
    register_form: RegisterForm,
    task_form: Option<TaskForm>,
    popup: Option<Popup>,
    popup_busy: bool, // Confirmed popup waiting for its operation
    refreshing: bool,
    notice: Option<String>,
    spinner_index: usize,
    greeting_line: &'static str,
    greeting_rotated_at: Instant,
    theme: Theme,
    log: LogBuffer,
    log_visible: bool,
}

impl State {
    pub fn new(
        net_sender: Option<NetworkEventSender>,
        stores: Stores,
        theme: Theme,
        log: LogBuffer,
    ) -> Self {
        let mut tasks_rx = stores.tasks.subscribe();
        let tasks = Arc::clone(&tasks_rx.borrow_and_update());
        State {
            net_sender,
            stores,
            tasks_rx,
            tasks,
            navigator: Navigator::new(Route::Splash),
            bootstrap: BootstrapState::Checking,
            tasks_list_state: ListState::default(),
            sign_in_form: SignInForm::default(),
            register_form: RegisterForm::default(),
            task_form: None,
            popup: None,
            popup_busy: false,
            refreshing: false,
            notice: None,
            spinner_index: 0,
            greeting_line: greeting::pick_line(
                chrono::Timelike::hour(&chrono::Local::now()),
                &mut rand::thread_rng(),
            ),
            greeting_rotated_at: Instant::now(),
            theme,
            log,
            log_visible: false,
        }
    }

    /// Get the current theme.
    ///
    pub fn get_theme(&self) -> &Theme {
        &self.theme
    }

    /// Return the signed-in user.
    ///
    pub fn get_session(&self) -> Option<Session> {
        self.stores.sessions.current()
    }

    /// Advance the spinner and rotate the greeting line when due.
    ///
    pub fn tick(&mut self) -> &mut Self {
        self.spinner_index = (self.spinner_index + 1) % SPINNER_FRAME_COUNT;
        if self.greeting_rotated_at.elapsed() >= GREETING_ROTATION {
            let hour = chrono::Timelike::hour(&chrono::Local::now());
            self.greeting_line = greeting::pick_line(hour, &mut rand::thread_rng());
            self.greeting_rotated_at = Instant::now();
        }
        self
    }

    pub fn get_spinner_index(&self) -> usize {
        self.spinner_index
    }

    pub fn get_greeting_line(&self) -> &'static str {
        self.greeting_line
    }

    /// Pull the latest store snapshot and consume any outcome waiting for
    /// the task list. Called once per frame.
    ///
    pub fn sync(&mut self) -> &mut Self {
        if self.tasks_rx.has_changed().unwrap_or(false) {
            self.tasks = Arc::clone(&self.tasks_rx.borrow_and_update());
            self.clamp_task_selection();
        }
        if matches!(self.navigator.current_route(), Route::TaskList) {
            if let Some(outcome) = self.navigator.take_list_outcome() {
                self.apply_list_outcome(outcome);
            }
        }
        self
    }

    fn apply_list_outcome(&mut self, outcome: ListOutcome) {
        match outcome {
            ListOutcome::NewTask(task) => {
                if let Some(index) = self.tasks.iter().position(|t| t.id == task.id) {
                    self.tasks_list_state.select(Some(index));
                }
                self.notice = Some(format!("Added \"{}\"", task.title));
            }
            ListOutcome::DeletedTaskId(id) => {
                debug!("Task list acknowledged deletion of task {}.", id);
                self.notice = Some("Task deleted".to_string());
            }
        }
    }

    fn clamp_task_selection(&mut self) {
        if self.tasks.is_empty() {
            self.tasks_list_state.select(None);
            return;
        }
        let selected = self.tasks_list_state.selected().unwrap_or(0);
        self.tasks_list_state
            .select(Some(selected.min(self.tasks.len() - 1)));
    }

    // Navigation

    pub fn current_route(&self) -> &Route {
        self.navigator.current_route()
    }

    pub fn current_view_id(&self) -> ViewId {
        self.navigator.current().id
    }

    /// Return whether the view that issued an operation is still mounted.
    ///
    pub fn is_mounted(&self, id: ViewId) -> bool {
        self.navigator.is_mounted(id)
    }

    pub fn get_navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn get_bootstrap(&self) -> &BootstrapState {
        &self.bootstrap
    }

    /// Route according to the bootstrap outcome.
    ///
    pub fn finish_bootstrap(&mut self, outcome: BootstrapState) -> &mut Self {
        match &outcome {
            BootstrapState::Authenticated(_) => {
                self.enter_task_list();
            }
            BootstrapState::Unauthenticated => {
                self.show_sign_in();
            }
            BootstrapState::Checking => {
                warn!("Bootstrap finished without a decision; staying on splash.");
            }
        }
        self.bootstrap = outcome;
        self
    }

    /// Mount the task list as the only view and reseed the store.
    ///
    pub fn enter_task_list(&mut self) -> &mut Self {
        self.navigator.reset(Route::TaskList);
        self.stores.tasks.seed();
        self.tasks_list_state.select(Some(0));
        self.task_form = None;
        self.popup = None;
        self.popup_busy = false;
        self.notice = None;
        self.sync();
        self
    }

    /// Mount the sign-in form as the only view.
    ///
    pub fn show_sign_in(&mut self) -> &mut Self {
        self.navigator.reset(Route::SignIn);
        self.sign_in_form = SignInForm::default();
        self.register_form = RegisterForm::default();
        self.task_form = None;
        self.popup = None;
        self.popup_busy = false;
        self.refreshing = false;
        self.notice = None;
        self
    }

    pub fn open_register(&mut self) -> Result<&mut Self, StateError> {
        if !matches!(self.current_route(), Route::SignIn) {
            return Err(StateError::InvalidViewTransition(
                "register is only reachable from sign in".to_string(),
            ));
        }
        self.register_form = RegisterForm::default();
        self.navigator.push(Route::Register);
        Ok(self)
    }

    /// Open the detail view for the selected task.
    ///
    pub fn open_selected_task(&mut self) -> Result<&mut Self, StateError> {
        if !matches!(self.current_route(), Route::TaskList) {
            return Err(StateError::InvalidViewTransition(
                "task detail opens from the task list".to_string(),
            ));
        }
        let task = (*self.get_selected_task().ok_or(StateError::NoTaskSelected)?).clone();
        self.navigator.push(Route::TaskDetail { task });
        Ok(self)
    }

    pub fn open_add_form(&mut self) -> Result<&mut Self, StateError> {
        if !matches!(self.current_route(), Route::TaskList) {
            return Err(StateError::InvalidViewTransition(
                "add form opens from the task list".to_string(),
            ));
        }
        self.task_form = Some(TaskForm::new(FormMode::Add));
        self.navigator.push(Route::TaskForm(FormMode::Add));
        Ok(self)
    }

    pub fn open_edit_form(&mut self) -> Result<&mut Self, StateError> {
        let task = match self.current_route() {
            Route::TaskDetail { task } => task.clone(),
            _ => {
                return Err(StateError::InvalidViewTransition(
                    "edit form opens from task detail".to_string(),
                ))
            }
        };
        let mode = FormMode::Edit { task };
        self.task_form = Some(TaskForm::new(mode.clone()));
        self.navigator.push(Route::TaskForm(mode));
        Ok(self)
    }

    /// Close the popup if one is open, otherwise leave the current view.
    /// Returns false when there is nothing to go back to.
    ///
    pub fn go_back(&mut self) -> bool {
        if self.popup.is_some() {
            if !self.popup_busy {
                self.popup = None;
            }
            return true;
        }
        match self.navigator.pop() {
            Some(entry) => {
                if matches!(entry.route, Route::TaskForm(_)) {
                    self.task_form = None;
                }
                true
            }
            None => false,
        }
    }

    // Task list

    pub fn get_tasks(&self) -> &Tasks {
        &self.tasks
    }

    pub fn get_tasks_list_state(&mut self) -> &mut ListState {
        &mut self.tasks_list_state
    }

    pub fn get_selected_task(&self) -> Option<Arc<Task>> {
        self.tasks_list_state
            .selected()
            .and_then(|i| self.tasks.get(i))
            .cloned()
    }

    /// Activate the next task.
    ///
    pub fn next_task_index(&mut self) -> &mut Self {
        if self.tasks.is_empty() {
            self.tasks_list_state.select(None);
            return self;
        }
        let next = match self.tasks_list_state.selected() {
            Some(i) if i + 1 < self.tasks.len() => i + 1,
            _ => 0,
        };
        self.tasks_list_state.select(Some(next));
        self
    }

    /// Activate the previous task.
    ///
    pub fn previous_task_index(&mut self) -> &mut Self {
        if self.tasks.is_empty() {
            self.tasks_list_state.select(None);
            return self;
        }
        let prev = match self.tasks_list_state.selected() {
            Some(i) if i > 0 => i - 1,
            _ => self.tasks.len() - 1,
        };
        self.tasks_list_state.select(Some(prev));
        self
    }

    pub fn is_refreshing(&self) -> bool {
        self.refreshing
    }

    /// Ask for a fresh task list.
    ///
    pub fn refresh_tasks(&mut self) -> &mut Self {
        if self.refreshing || !matches!(self.current_route(), Route::TaskList) {
            return self;
        }
        self.refreshing = true;
        self.dispatch(NetworkEvent::RefreshTasks {
            origin: self.current_view_id(),
        });
        self
    }

    pub fn finish_refresh(&mut self) -> &mut Self {
        self.refreshing = false;
        self.notice = Some("Tasks refreshed".to_string());
        self
    }

    pub fn get_notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn clear_notice(&mut self) -> &mut Self {
        self.notice = None;
        self
    }

    // Popups

    pub fn get_popup(&self) -> Option<Popup> {
        self.popup
    }

    pub fn is_popup_busy(&self) -> bool {
        self.popup_busy
    }

    pub fn request_logout(&mut self) -> &mut Self {
        if matches!(self.current_route(), Route::TaskList) {
            self.popup = Some(Popup::Logout);
        }
        self
    }

    pub fn request_delete(&mut self) -> Result<&mut Self, StateError> {
        let id = match self.current_route() {
            Route::TaskDetail { task } => task.id,
            _ => {
                return Err(StateError::InvalidViewTransition(
                    "delete is confirmed from task detail".to_string(),
                ))
            }
        };
        self.popup = Some(Popup::DeleteTask { id });
        Ok(self)
    }

    /// Confirm the open popup and start its operation.
    ///
    pub fn confirm_popup(&mut self) -> &mut Self {
        if self.popup_busy {
            return self;
        }
        let origin = self.current_view_id();
        match self.popup {
            Some(Popup::Logout) => {
                self.popup_busy = true;
                self.dispatch(NetworkEvent::Logout { origin });
            }
            Some(Popup::DeleteTask { id }) => {
                self.popup_busy = true;
                self.dispatch(NetworkEvent::DeleteTask { origin, id });
            }
            None => {}
        }
        self
    }

    // Forms

    pub fn get_sign_in_form(&self) -> &SignInForm {
        &self.sign_in_form
    }

    pub fn get_register_form(&self) -> &RegisterForm {
        &self.register_form
    }

    pub fn get_task_form(&self) -> Option<&TaskForm> {
        self.task_form.as_ref()
    }

    pub fn get_task_form_mut(&mut self) -> Option<&mut TaskForm> {
        self.task_form.as_mut()
    }

    /// Return the form of the current view.
    ///
    pub fn active_form(&mut self) -> Option<&mut dyn InputForm> {
        match self.navigator.current_route() {
            Route::SignIn => Some(&mut self.sign_in_form as &mut dyn InputForm),
            Route::Register => Some(&mut self.register_form as &mut dyn InputForm),
            Route::TaskForm(_) => self.task_form.as_mut().map(|f| f as &mut dyn InputForm),
            _ => None,
        }
    }

    /// Submit the form of the current view.
    ///
    pub fn submit_form(&mut self) -> Result<&mut Self, StateError> {
        let origin = self.current_view_id();
        let route = self.current_route().clone();
        match route {
            Route::SignIn => {
                if let Some(credentials) = self.sign_in_form.submit() {
                    self.dispatch(NetworkEvent::SignIn {
                        origin,
                        email: credentials.email,
                        password: credentials.password,
                    });
                }
            }
            Route::Register => {
                if let Some(registration) = self.register_form.submit() {
                    self.dispatch(NetworkEvent::Register {
                        origin,
                        name: registration.name,
                        email: registration.email,
                        password: registration.password,
                    });
                }
            }
            Route::TaskForm(_) => {
                let form = self.task_form.as_mut().ok_or(StateError::NoTaskForm)?;
                if let Some(draft) = form.submit() {
                    let event = match form.mode() {
                        FormMode::Add => NetworkEvent::CreateTask { origin, draft },
                        FormMode::Edit { task } => NetworkEvent::UpdateTask {
                            origin,
                            task: task.with_draft(&draft),
                        },
                    };
                    self.dispatch(event);
                }
            }
            _ => {
                return Err(StateError::InvalidViewTransition(
                    "no form on this view".to_string(),
                ))
            }
        }
        Ok(self)
    }

    /// Record a failed sign-in or registration on the form of the view that
    /// submitted it, even when another view now covers it.
    ///
    pub fn fail_auth(&mut self, origin: ViewId, message: impl Into<String>) -> &mut Self {
        let message = message.into();
        match self.navigator.route_of(origin) {
            Some(Route::SignIn) => self.sign_in_form.status_mut().fail(message),
            Some(Route::Register) => self.register_form.status_mut().fail(message),
            other => warn!("No auth form on view {} ({:?}).", origin, other),
        }
        self
    }

    /// Leave the add form for the task list with the created task.
    ///
    pub fn task_created(&mut self, task: Task) -> &mut Self {
        if let Some(form) = self.task_form.as_mut() {
            form.status_mut().complete();
        }
        self.task_form = None;
        self.navigator.return_to_list(ListOutcome::NewTask(task));
        self
    }

    /// Leave the edit form for the detail view showing the updated task.
    ///
    pub fn task_updated(&mut self, task: Task) -> &mut Self {
        if let Some(form) = self.task_form.as_mut() {
            form.status_mut().complete();
        }
        self.task_form = None;
        self.notice = Some("Task updated".to_string());
        self.navigator.return_to_detail(task);
        self
    }

    /// Leave the detail view for the task list after a deletion.
    ///
    pub fn task_deleted(&mut self, id: i64) -> &mut Self {
        self.popup = None;
        self.popup_busy = false;
        self.navigator.return_to_list(ListOutcome::DeletedTaskId(id));
        self
    }

    /// Record a failed task operation on the form or popup of the view that
    /// started it.
    ///
    pub fn fail_task_operation(
        &mut self,
        origin: ViewId,
        message: impl Into<String>,
    ) -> &mut Self {
        let message = message.into();
        match self.navigator.route_of(origin) {
            Some(Route::TaskForm(_)) => {
                if let Some(form) = self.task_form.as_mut() {
                    form.status_mut().fail(message.clone());
                }
            }
            Some(Route::TaskDetail { .. }) if self.current_view_id() == origin => {
                self.popup = None;
                self.popup_busy = false;
            }
            other => debug!("Task failure for view {} ({:?}).", origin, other),
        }
        self.notice = Some(message);
        self
    }

    /// End a failed refresh. Forms opened since are left alone.
    ///
    pub fn fail_refresh(&mut self, message: impl Into<String>) -> &mut Self {
        self.refreshing = false;
        self.notice = Some(message.into());
        self
    }

    // Log pane

    pub fn toggle_log(&mut self) -> &mut Self {
        self.log_visible = !self.log_visible;
        self
    }

    pub fn is_log_visible(&self) -> bool {
        self.log_visible
    }

    pub fn get_log_entries(&self) -> Vec<String> {
        self.log.entries()
    }

    /// Send the event to the network thread.
    ///
    pub fn dispatch(&self, event: NetworkEvent) {
        if let Some(net_sender) = &self.net_sender {
            if let Err(err) = net_sender.send(event) {
                error!("Received error from network dispatch: {}", err);
            }
        }
    }
}
