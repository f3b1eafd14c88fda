use crate::app::Stores;
use crate::backend::Backend;
use crate::session::Bootstrap;
use crate::state::{State, ViewId};
use crate::task::{Task, TaskDraft};
use anyhow::Result;
use log::*;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

/// Specify different network event types. Every operation started by a view
/// carries the id of that view as `origin`.
///
#[derive(Debug, Clone)]
pub enum Event {
    Bootstrap,
    SignIn {
        origin: ViewId,
        email: String,
        password: String,
    },
    Register {
        origin: ViewId,
        name: String,
        email: String,
        password: String,
    },
    Logout {
        origin: ViewId,
    },
    CreateTask {
        origin: ViewId,
        draft: TaskDraft,
    },
    UpdateTask {
        origin: ViewId,
        task: Task,
    },
    DeleteTask {
        origin: ViewId,
        id: i64,
    },
    RefreshTasks {
        origin: ViewId,
    },
}

/// Specify struct for managing state with network events.
///
pub struct Handler<'a, B: Backend> {
    state: &'a Arc<Mutex<State>>,
    backend: &'a B,
    stores: &'a Stores,
    splash_delay: Duration,
}

impl<'a, B: Backend> Handler<'a, B> {
    /// Return new instance with reference to state.
    ///
    pub fn new(
        state: &'a Arc<Mutex<State>>,
        backend: &'a B,
        stores: &'a Stores,
        splash_delay: Duration,
    ) -> Self {
        Handler {
            state,
            backend,
            stores,
            splash_delay,
        }
    }

    /// Handle network events by type.
    ///
    pub async fn handle(&mut self, event: Event) -> Result<()> {
        debug!("Processing network event '{:?}'...", event);
        match event {
            Event::Bootstrap => self.bootstrap().await?,
            Event::SignIn {
                origin,
                email,
                password,
            } => self.sign_in(origin, email, password).await?,
            Event::Register {
                origin,
                name,
                email,
                password,
            } => self.register(origin, name, email, password).await?,
            Event::Logout { origin } => self.logout(origin).await?,
            Event::CreateTask { origin, draft } => self.create_task(origin, draft).await?,
            Event::UpdateTask { origin, task } => self.update_task(origin, task).await?,
            Event::DeleteTask { origin, id } => self.delete_task(origin, id).await?,
            Event::RefreshTasks { origin } => self.refresh_tasks(origin).await?,
        }
        Ok(())
    }

    /// Wait out the splash screen, then route by the persisted session.
    ///
    async fn bootstrap(&mut self) -> Result<()> {
        info!("Checking for a persisted session...");
        let mut bootstrap = Bootstrap::new();
        let outcome = bootstrap
            .run(&self.stores.sessions, self.splash_delay)
            .await
            .clone();
        let mut state = self.state.lock().await;
        state.finish_bootstrap(outcome);
        Ok(())
    }

    async fn sign_in(&mut self, origin: ViewId, email: String, password: String) -> Result<()> {
        info!("Signing in as {}...", email);
        let result = self.backend.sign_in(email, password).await;
        let signed_in = {
            let mut state = self.state.lock().await;
            if !is_still_mounted(&state, origin) {
                return Ok(());
            }
            match result {
                Ok(session) => {
                    self.stores.sessions.activate(session);
                    state.enter_task_list();
                    info!("Signed in.");
                    true
                }
                Err(e) => {
                    warn!("Sign in failed: {}", e);
                    state.fail_auth(origin, e.to_string());
                    false
                }
            }
        };
        if signed_in {
            self.write_session().await;
        }
        Ok(())
    }

    async fn register(
        &mut self,
        origin: ViewId,
        name: String,
        email: String,
        password: String,
    ) -> Result<()> {
        info!("Registering {}...", email);
        let result = self.backend.register(name, email, password).await;
        let registered = {
            let mut state = self.state.lock().await;
            if !is_still_mounted(&state, origin) {
                return Ok(());
            }
            match result {
                Ok(session) => {
                    self.stores.sessions.activate(session);
                    state.enter_task_list();
                    info!("Registered.");
                    true
                }
                Err(e) => {
                    warn!("Registration failed: {}", e);
                    state.fail_auth(origin, e.to_string());
                    false
                }
            }
        };
        if registered {
            self.write_session().await;
        }
        Ok(())
    }

    async fn logout(&mut self, origin: ViewId) -> Result<()> {
        {
            let mut state = self.state.lock().await;
            if !is_still_mounted(&state, origin) {
                return Ok(());
            }
            self.stores.sessions.deactivate();
            state.show_sign_in();
        }
        self.write_session().await;
        info!("Logged out.");
        Ok(())
    }

    /// Mirror the session to storage on the blocking pool, after the state
    /// lock has been released.
    ///
    async fn write_session(&self) {
        let sessions = Arc::clone(&self.stores.sessions);
        if let Err(e) = tokio::task::spawn_blocking(move || sessions.write_through()).await {
            error!("Failed to write session to storage: {}", e);
        }
    }

    /// Create the task remotely, then add it to the store and hand it to the
    /// task list.
    ///
    async fn create_task(&mut self, origin: ViewId, draft: TaskDraft) -> Result<()> {
        info!("Creating task '{}'...", draft.title);
        let result = self.backend.create_task(draft).await;
        let mut state = self.state.lock().await;
        if !is_still_mounted(&state, origin) {
            return Ok(());
        }
        match result {
            Ok(task) => {
                if !self.stores.tasks.add(task.clone()) {
                    warn!("Task {} already present; keeping existing entry.", task.id);
                }
                info!("Created task {}.", task.id);
                state.task_created(task);
            }
            Err(e) => {
                error!("Failed to create task: {}", e);
                state.fail_task_operation(origin, format!("Failed to create task: {}", e));
            }
        }
        Ok(())
    }

    /// Save the edit remotely, then replace the stored task and the snapshot
    /// on the detail view.
    ///
    async fn update_task(&mut self, origin: ViewId, task: Task) -> Result<()> {
        info!("Updating task {}...", task.id);
        let result = self.backend.update_task(task).await;
        let mut state = self.state.lock().await;
        if !is_still_mounted(&state, origin) {
            return Ok(());
        }
        match result {
            Ok(task) => {
                if !self.stores.tasks.update(task.clone()) {
                    warn!("Task {} no longer in store; showing edit anyway.", task.id);
                }
                info!("Updated task {}.", task.id);
                state.task_updated(task);
            }
            Err(e) => {
                error!("Failed to update task: {}", e);
                state.fail_task_operation(origin, format!("Failed to update task: {}", e));
            }
        }
        Ok(())
    }

    async fn delete_task(&mut self, origin: ViewId, id: i64) -> Result<()> {
        info!("Deleting task {}...", id);
        let result = self.backend.delete_task(id).await;
        let mut state = self.state.lock().await;
        if !is_still_mounted(&state, origin) {
            return Ok(());
        }
        match result {
            Ok(()) => {
                if !self.stores.tasks.remove(id) {
                    debug!("Task {} was already gone.", id);
                }
                info!("Deleted task {}.", id);
                state.task_deleted(id);
            }
            Err(e) => {
                error!("Failed to delete task: {}", e);
                state.fail_task_operation(origin, format!("Failed to delete task: {}", e));
            }
        }
        Ok(())
    }

    async fn refresh_tasks(&mut self, origin: ViewId) -> Result<()> {
        info!("Refreshing tasks...");
        let result = self.backend.fetch_tasks().await;
        let mut state = self.state.lock().await;
        if !is_still_mounted(&state, origin) {
            return Ok(());
        }
        match result {
            Ok(tasks) => {
                info!("Fetched {} tasks.", tasks.len());
                self.stores.tasks.replace(tasks);
                state.finish_refresh();
            }
            Err(e) => {
                error!("Failed to refresh tasks: {}", e);
                state.fail_refresh(format!("Failed to refresh tasks: {}", e));
            }
        }
        Ok(())
    }
}

fn is_still_mounted(state: &State, origin: ViewId) -> bool {
    if state.is_mounted(origin) {
        return true;
    }
    debug!("Discarding result for unmounted view {}.", origin);
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{BackendError, Latency, SimulatedBackend};
    use crate::logger::LogBuffer;
    use crate::session::{BootstrapState, MemoryStorage, Session, SessionStore};
    use crate::state::{FormMode, FormPhase, InputForm, Popup, Route};
    use crate::task::TaskStore;
    use crate::ui::Theme;

    struct Offline;

    #[async_trait::async_trait]
    impl Backend for Offline {
        async fn sign_in(&self, _: String, _: String) -> Result<Session, BackendError> {
            Err(BackendError::Unavailable("offline".to_string()))
        }

        async fn register(&self, _: String, _: String, _: String) -> Result<Session, BackendError> {
            Err(BackendError::Unavailable("offline".to_string()))
        }

        async fn create_task(&self, _: TaskDraft) -> Result<Task, BackendError> {
            Err(BackendError::Unavailable("offline".to_string()))
        }

        async fn update_task(&self, task: Task) -> Result<Task, BackendError> {
            Err(BackendError::TaskNotFound { id: task.id })
        }

        async fn delete_task(&self, id: i64) -> Result<(), BackendError> {
            Err(BackendError::TaskNotFound { id })
        }

        async fn fetch_tasks(&self) -> Result<Vec<Task>, BackendError> {
            Err(BackendError::Unavailable("offline".to_string()))
        }
    }

    fn fixture() -> (Arc<Mutex<State>>, Stores) {
        let stores = Stores {
            tasks: Arc::new(TaskStore::new()),
            sessions: Arc::new(SessionStore::new(Box::new(MemoryStorage::new()))),
        };
        let state = State::new(None, stores.clone(), Theme::default(), LogBuffer::default());
        (Arc::new(Mutex::new(state)), stores)
    }

    async fn signed_in(state: &Arc<Mutex<State>>, stores: &Stores) {
        let session = stores.sessions.sign_in("a@b.com");
        state
            .lock()
            .await
            .finish_bootstrap(BootstrapState::Authenticated(session));
    }

    #[tokio::test]
    async fn test_bootstrap_without_session_routes_to_sign_in() {
        let (state, stores) = fixture();
        let backend = SimulatedBackend::new(Latency::none());
        let mut handler = Handler::new(&state, &backend, &stores, Duration::ZERO);
        handler.handle(Event::Bootstrap).await.unwrap();

        let state = state.lock().await;
        assert_eq!(state.current_route(), &Route::SignIn);
        assert_eq!(state.get_bootstrap(), &BootstrapState::Unauthenticated);
    }

    #[tokio::test]
    async fn test_bootstrap_with_session_routes_to_list() {
        let (state, stores) = fixture();
        stores.sessions.sign_in("a@b.com");
        let backend = SimulatedBackend::new(Latency::none());
        let mut handler = Handler::new(&state, &backend, &stores, Duration::ZERO);
        handler.handle(Event::Bootstrap).await.unwrap();

        let state = state.lock().await;
        assert_eq!(state.current_route(), &Route::TaskList);
        assert_eq!(stores.tasks.len(), 12);
    }

    #[tokio::test]
    async fn test_sign_in_establishes_session() {
        let (state, stores) = fixture();
        state
            .lock()
            .await
            .finish_bootstrap(BootstrapState::Unauthenticated);
        let origin = state.lock().await.current_view_id();
        let backend = SimulatedBackend::new(Latency::none());
        let mut handler = Handler::new(&state, &backend, &stores, Duration::ZERO);
        handler
            .handle(Event::SignIn {
                origin,
                email: "a@b.com".to_string(),
                password: "secret".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(stores.sessions.current(), Some(Session::new("a@b.com")));
        assert_eq!(state.lock().await.current_route(), &Route::TaskList);
        // The record reached storage as well.
        assert_eq!(stores.sessions.restore(), Some(Session::new("a@b.com")));
    }

    #[tokio::test]
    async fn test_failed_sign_in_stays_on_form() {
        let (state, stores) = fixture();
        {
            let mut state = state.lock().await;
            state.finish_bootstrap(BootstrapState::Unauthenticated);
        }
        let origin = state.lock().await.current_view_id();
        let mut handler = Handler::new(&state, &Offline, &stores, Duration::ZERO);
        handler
            .handle(Event::SignIn {
                origin,
                email: "a@b.com".to_string(),
                password: "secret".to_string(),
            })
            .await
            .unwrap();

        assert!(!stores.sessions.is_signed_in());
        assert_eq!(state.lock().await.current_route(), &Route::SignIn);
    }

    #[tokio::test]
    async fn test_create_task_adds_and_returns_to_list() {
        let (state, stores) = fixture();
        signed_in(&state, &stores).await;
        let origin = {
            let mut state = state.lock().await;
            state.open_add_form().unwrap();
            state.current_view_id()
        };
        let backend = SimulatedBackend::new(Latency::none());
        let mut handler = Handler::new(&state, &backend, &stores, Duration::ZERO);
        handler
            .handle(Event::CreateTask {
                origin,
                draft: TaskDraft {
                    title: "X".to_string(),
                    description: "Y".to_string(),
                },
            })
            .await
            .unwrap();

        assert_eq!(stores.tasks.len(), 13);
        let mut state = state.lock().await;
        assert_eq!(state.current_route(), &Route::TaskList);
        state.sync();
        let selected = state.get_selected_task().unwrap();
        assert_eq!(selected.title, "X");
        assert!(selected.id > 12);
    }

    #[tokio::test]
    async fn test_update_task_refreshes_store_and_detail() {
        let (state, stores) = fixture();
        signed_in(&state, &stores).await;
        let origin = {
            let mut state = state.lock().await;
            state.next_task_index().next_task_index();
            state.open_selected_task().unwrap();
            state.open_edit_form().unwrap();
            state.current_view_id()
        };
        let backend = SimulatedBackend::new(Latency::none());
        let mut handler = Handler::new(&state, &backend, &stores, Duration::ZERO);
        let edited = Task::new(3, "New", "New");
        handler
            .handle(Event::UpdateTask {
                origin,
                task: edited.clone(),
            })
            .await
            .unwrap();

        assert_eq!(stores.tasks.get(3).as_deref(), Some(&edited));
        assert_eq!(stores.tasks.len(), 12);
        let state = state.lock().await;
        assert_eq!(state.current_route(), &Route::TaskDetail { task: edited });
    }

    #[tokio::test]
    async fn test_delete_task_removes_and_returns_to_list() {
        let (state, stores) = fixture();
        signed_in(&state, &stores).await;
        let origin = {
            let mut state = state.lock().await;
            state.open_selected_task().unwrap();
            state.request_delete().unwrap();
            state.current_view_id()
        };
        let backend = SimulatedBackend::new(Latency::none());
        let mut handler = Handler::new(&state, &backend, &stores, Duration::ZERO);
        handler
            .handle(Event::DeleteTask { origin, id: 1 })
            .await
            .unwrap();

        assert!(stores.tasks.get(1).is_none());
        let state = state.lock().await;
        assert_eq!(state.current_route(), &Route::TaskList);
        assert_eq!(state.get_popup(), None);
    }

    #[tokio::test]
    async fn test_result_for_unmounted_view_is_discarded() {
        let (state, stores) = fixture();
        signed_in(&state, &stores).await;
        let origin = {
            let mut state = state.lock().await;
            state.open_add_form().unwrap();
            let origin = state.current_view_id();
            state.go_back();
            origin
        };
        let backend = SimulatedBackend::new(Latency::none());
        let mut handler = Handler::new(&state, &backend, &stores, Duration::ZERO);
        handler
            .handle(Event::CreateTask {
                origin,
                draft: TaskDraft {
                    title: "X".to_string(),
                    description: "Y".to_string(),
                },
            })
            .await
            .unwrap();

        assert_eq!(stores.tasks.len(), 12);
        let state = state.lock().await;
        assert_eq!(state.current_route(), &Route::TaskList);
        assert!(!state.get_navigator().has_list_outcome());
    }

    #[tokio::test]
    async fn test_failed_update_keeps_form_and_store() {
        let (state, stores) = fixture();
        signed_in(&state, &stores).await;
        let before = stores.tasks.snapshot();
        let origin = {
            let mut state = state.lock().await;
            state.open_selected_task().unwrap();
            state.open_edit_form().unwrap();
            state.submit_form().unwrap();
            state.current_view_id()
        };
        let mut handler = Handler::new(&state, &Offline, &stores, Duration::ZERO);
        handler
            .handle(Event::UpdateTask {
                origin,
                task: Task::new(1, "New", "New"),
            })
            .await
            .unwrap();

        assert!(Arc::ptr_eq(&before, &stores.tasks.snapshot()));
        let state = state.lock().await;
        assert!(matches!(
            state.current_route(),
            Route::TaskForm(FormMode::Edit { .. })
        ));
        assert!(state
            .get_task_form()
            .and_then(|f| f.status().failure())
            .is_some());
    }

    #[tokio::test]
    async fn test_logout_clears_session() {
        let (state, stores) = fixture();
        signed_in(&state, &stores).await;
        let origin = {
            let mut state = state.lock().await;
            state.request_logout();
            assert_eq!(state.get_popup(), Some(Popup::Logout));
            state.current_view_id()
        };
        let backend = SimulatedBackend::new(Latency::none());
        let mut handler = Handler::new(&state, &backend, &stores, Duration::ZERO);
        handler.handle(Event::Logout { origin }).await.unwrap();

        assert!(!stores.sessions.is_signed_in());
        assert_eq!(stores.sessions.restore(), None);
        let state = state.lock().await;
        assert_eq!(state.current_route(), &Route::SignIn);
        assert_eq!(state.get_popup(), None);
    }

    #[tokio::test]
    async fn test_refresh_reseeds_store() {
        let (state, stores) = fixture();
        signed_in(&state, &stores).await;
        stores.tasks.remove(1);
        let origin = {
            let mut state = state.lock().await;
            state.refresh_tasks();
            state.current_view_id()
        };
        let backend = SimulatedBackend::new(Latency::none());
        let mut handler = Handler::new(&state, &backend, &stores, Duration::ZERO);
        handler
            .handle(Event::RefreshTasks { origin })
            .await
            .unwrap();

        assert_eq!(stores.tasks.len(), 12);
        assert!(!state.lock().await.is_refreshing());
    }

    #[tokio::test]
    async fn test_failed_sign_in_reaches_form_under_register() {
        let (state, stores) = fixture();
        let origin = {
            let mut state = state.lock().await;
            state.finish_bootstrap(BootstrapState::Unauthenticated);
            let origin = state.current_view_id();
            let form = state.active_form().unwrap();
            for c in "a@b.com".chars() {
                form.insert_char(c);
            }
            form.next_field();
            form.insert_char('p');
            state.submit_form().unwrap();
            state.open_register().unwrap();
            origin
        };
        let mut handler = Handler::new(&state, &Offline, &stores, Duration::ZERO);
        handler
            .handle(Event::SignIn {
                origin,
                email: "a@b.com".to_string(),
                password: "p".to_string(),
            })
            .await
            .unwrap();

        let mut state = state.lock().await;
        assert_eq!(state.current_route(), &Route::Register);
        state.go_back();
        let form = state.get_sign_in_form();
        assert_eq!(form.status().phase(), FormPhase::Idle);
        assert!(form.status().failure().is_some());
    }

    #[tokio::test]
    async fn test_failed_refresh_leaves_pending_task_form() {
        let (state, stores) = fixture();
        signed_in(&state, &stores).await;
        let origin = {
            let mut state = state.lock().await;
            state.refresh_tasks();
            let origin = state.current_view_id();
            state.open_add_form().unwrap();
            state
                .get_task_form_mut()
                .unwrap()
                .set_title("X")
                .set_description("Y");
            state.submit_form().unwrap();
            origin
        };
        let mut handler = Handler::new(&state, &Offline, &stores, Duration::ZERO);
        handler
            .handle(Event::RefreshTasks { origin })
            .await
            .unwrap();

        let state = state.lock().await;
        assert!(!state.is_refreshing());
        let form = state.get_task_form().unwrap();
        assert_eq!(form.status().phase(), FormPhase::Submitting);
        assert_eq!(form.status().failure(), None);
    }

    #[tokio::test]
    async fn test_register_after_leaving_register_is_discarded() {
        let (state, stores) = fixture();
        let origin = {
            let mut state = state.lock().await;
            state.finish_bootstrap(BootstrapState::Unauthenticated);
            state.open_register().unwrap();
            let origin = state.current_view_id();
            state.go_back();
            origin
        };
        let backend = SimulatedBackend::new(Latency::none());
        let mut handler = Handler::new(&state, &backend, &stores, Duration::ZERO);
        handler
            .handle(Event::Register {
                origin,
                name: "Ada".to_string(),
                email: "a@b.com".to_string(),
                password: "secret".to_string(),
            })
            .await
            .unwrap();

        assert!(!stores.sessions.is_signed_in());
        assert_eq!(stores.sessions.restore(), None);
        assert_eq!(state.lock().await.current_route(), &Route::SignIn);
    }

    #[tokio::test]
    async fn test_update_after_leaving_edit_form_is_discarded() {
        let (state, stores) = fixture();
        signed_in(&state, &stores).await;
        let before = stores.tasks.snapshot();
        let (origin, original) = {
            let mut state = state.lock().await;
            state.open_selected_task().unwrap();
            let original = state.current_route().clone();
            state.open_edit_form().unwrap();
            let origin = state.current_view_id();
            state.go_back();
            (origin, original)
        };
        let backend = SimulatedBackend::new(Latency::none());
        let mut handler = Handler::new(&state, &backend, &stores, Duration::ZERO);
        handler
            .handle(Event::UpdateTask {
                origin,
                task: Task::new(1, "New", "New"),
            })
            .await
            .unwrap();

        assert!(Arc::ptr_eq(&before, &stores.tasks.snapshot()));
        let state = state.lock().await;
        assert_eq!(state.current_route(), &original);
        assert_eq!(state.get_notice(), None);
    }
}
