use crate::state::{Field, InputForm, Route, State};
use anyhow::Result;
use crossterm::{
    event,
    event::{Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
};
use log::*;
use std::{sync::mpsc, thread, time::Duration};

/// Specify terminal event poll rate in milliseconds.
///
const TICK_RATE_IN_MS: u64 = 60;

/// Specify different terminal event types.
///
#[derive(Debug)]
pub enum Event<I> {
    Input(I),
    Tick,
}

/// Specify struct for managing terminal events channel.
///
pub struct Handler {
    rx: mpsc::Receiver<Event<KeyEvent>>,
    _tx: mpsc::Sender<Event<KeyEvent>>,
}

impl Default for Handler {
    fn default() -> Self {
        Handler::new()
    }
}

impl Handler {
    /// Return new instance after spawning new input polling thread.
    ///
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        let tx_clone = tx.clone();
        thread::spawn(move || loop {
            let tick_rate = Duration::from_millis(TICK_RATE_IN_MS);
            match event::poll(tick_rate) {
                Ok(true) => match event::read() {
                    Ok(CrosstermEvent::Key(key)) if key.kind == KeyEventKind::Press => {
                        if tx_clone.send(Event::Input(key)).is_err() {
                            break;
                        }
                    }
                    Ok(_) => {}
                    Err(e) => error!("Failed to read terminal event: {}", e),
                },
                Ok(false) => {}
                Err(e) => error!("Failed to poll terminal events: {}", e),
            }
            if tx_clone.send(Event::Tick).is_err() {
                break;
            }
        });
        Handler { rx, _tx: tx }
    }

    /// Receive next terminal event and handle it accordingly. Returns result
    /// with value true if should continue or false if exit was requested.
    ///
    pub fn handle_next(&self, state: &mut State) -> Result<bool> {
        match self.rx.recv()? {
            Event::Input(event) => Ok(handle_key(state, event)),
            Event::Tick => {
                state.tick();
                Ok(true)
            }
        }
    }
}

/// Apply a key press to the state. Returns false if exit was requested.
///
pub fn handle_key(state: &mut State, event: KeyEvent) -> bool {
    if event.code == KeyCode::Char('c') && event.modifiers.contains(KeyModifiers::CONTROL) {
        debug!("Processing exit terminal event '{:?}'...", event);
        return false;
    }
    if state.get_popup().is_some() {
        handle_popup_key(state, event);
        return true;
    }
    match state.current_route() {
        Route::SignIn | Route::Register | Route::TaskForm(_) => {
            handle_form_key(state, event);
            true
        }
        Route::Splash => !matches!(event.code, KeyCode::Char('q')),
        Route::TaskList => handle_list_key(state, event),
        Route::TaskDetail { .. } => handle_detail_key(state, event),
    }
}

fn handle_popup_key(state: &mut State, event: KeyEvent) {
    match event.code {
        KeyCode::Char('y') | KeyCode::Enter => {
            state.confirm_popup();
        }
        KeyCode::Char('n') | KeyCode::Esc => {
            state.go_back();
        }
        _ => {}
    }
}

fn handle_form_key(state: &mut State, event: KeyEvent) {
    let control = event.modifiers.contains(KeyModifiers::CONTROL);
    match event.code {
        KeyCode::Char('s') if control => submit(state),
        KeyCode::Char('r') if control && matches!(state.current_route(), Route::SignIn) => {
            if let Err(e) = state.open_register() {
                warn!("{}", e);
            }
        }
        KeyCode::Char('l') if control => {
            state.toggle_log();
        }
        KeyCode::Esc => {
            state.go_back();
        }
        KeyCode::Tab | KeyCode::Down => {
            if let Some(form) = state.active_form() {
                form.next_field();
            }
        }
        KeyCode::BackTab | KeyCode::Up => {
            if let Some(form) = state.active_form() {
                form.previous_field();
            }
        }
        KeyCode::Enter => {
            let multiline = state
                .get_task_form()
                .map(|form| form.focus() == Field::Description)
                .unwrap_or(false)
                && matches!(state.current_route(), Route::TaskForm(_));
            if multiline {
                if let Some(form) = state.get_task_form_mut() {
                    form.insert_newline();
                }
            } else {
                submit(state);
            }
        }
        KeyCode::Backspace => {
            if let Some(form) = state.active_form() {
                form.backspace();
            }
        }
        KeyCode::Char(c) if !control => {
            if let Some(form) = state.active_form() {
                form.insert_char(c);
            }
        }
        _ => {}
    }
}

fn submit(state: &mut State) {
    if let Err(e) = state.submit_form() {
        warn!("Ignoring submit: {}", e);
    }
}

fn handle_list_key(state: &mut State, event: KeyEvent) -> bool {
    state.clear_notice();
    match event.code {
        KeyCode::Char('q') => return false,
        KeyCode::Char('j') | KeyCode::Down => {
            state.next_task_index();
        }
        KeyCode::Char('k') | KeyCode::Up => {
            state.previous_task_index();
        }
        KeyCode::Enter => {
            if let Err(e) = state.open_selected_task() {
                warn!("{}", e);
            }
        }
        KeyCode::Char('a') => {
            if let Err(e) = state.open_add_form() {
                warn!("{}", e);
            }
        }
        KeyCode::Char('r') => {
            state.refresh_tasks();
        }
        KeyCode::Char('l') => {
            state.request_logout();
        }
        KeyCode::Char('L') => {
            state.toggle_log();
        }
        _ => {}
    }
    true
}

fn handle_detail_key(state: &mut State, event: KeyEvent) -> bool {
    state.clear_notice();
    match event.code {
        KeyCode::Char('q') => return false,
        KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('h') => {
            state.go_back();
        }
        KeyCode::Char('e') => {
            if let Err(e) = state.open_edit_form() {
                warn!("{}", e);
            }
        }
        KeyCode::Char('d') => {
            if let Err(e) = state.request_delete() {
                warn!("{}", e);
            }
        }
        KeyCode::Char('L') => {
            state.toggle_log();
        }
        _ => {}
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Stores;
    use crate::events::network::Event as NetworkEvent;
    use crate::logger::LogBuffer;
    use crate::session::{BootstrapState, MemoryStorage, Session, SessionStore};
    use crate::state::{FormMode, Popup};
    use crate::task::TaskStore;
    use crate::ui::Theme;
    use std::sync::Arc;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn state_on(outcome: BootstrapState) -> (State, mpsc::Receiver<NetworkEvent>) {
        let stores = Stores {
            tasks: Arc::new(TaskStore::new()),
            sessions: Arc::new(SessionStore::new(Box::new(MemoryStorage::new()))),
        };
        let (tx, rx) = mpsc::channel();
        let mut state = State::new(Some(tx), stores, Theme::default(), LogBuffer::default());
        state.finish_bootstrap(outcome);
        (state, rx)
    }

    fn type_text(state: &mut State, text: &str) {
        for c in text.chars() {
            assert!(handle_key(state, key(KeyCode::Char(c))));
        }
    }

    #[test]
    fn test_ctrl_c_exits_everywhere() {
        let (mut state, _rx) = state_on(BootstrapState::Unauthenticated);
        assert!(!handle_key(
            &mut state,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)
        ));
    }

    #[test]
    fn test_q_types_into_forms_but_quits_list() {
        let (mut state, _rx) = state_on(BootstrapState::Unauthenticated);
        assert!(handle_key(&mut state, key(KeyCode::Char('q'))));
        assert_eq!(state.get_sign_in_form().email, "q");

        let (mut state, _rx) =
            state_on(BootstrapState::Authenticated(Session::new("a@b.com")));
        assert!(!handle_key(&mut state, key(KeyCode::Char('q'))));
    }

    #[test]
    fn test_sign_in_by_keyboard() {
        let (mut state, rx) = state_on(BootstrapState::Unauthenticated);
        type_text(&mut state, "a@b.com");
        handle_key(&mut state, key(KeyCode::Tab));
        type_text(&mut state, "secret");
        handle_key(&mut state, key(KeyCode::Enter));
        assert!(matches!(
            rx.try_recv().unwrap(),
            NetworkEvent::SignIn { .. }
        ));
    }

    #[test]
    fn test_open_register_from_sign_in() {
        let (mut state, _rx) = state_on(BootstrapState::Unauthenticated);
        handle_key(
            &mut state,
            KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL),
        );
        assert_eq!(state.current_route(), &Route::Register);
        handle_key(&mut state, key(KeyCode::Esc));
        assert_eq!(state.current_route(), &Route::SignIn);
    }

    #[test]
    fn test_add_task_by_keyboard() {
        let (mut state, rx) =
            state_on(BootstrapState::Authenticated(Session::new("a@b.com")));
        handle_key(&mut state, key(KeyCode::Char('a')));
        assert_eq!(state.current_route(), &Route::TaskForm(FormMode::Add));
        type_text(&mut state, "Title");
        handle_key(&mut state, key(KeyCode::Tab));
        type_text(&mut state, "Line");
        handle_key(&mut state, key(KeyCode::Enter));
        type_text(&mut state, "Two");
        assert!(rx.try_recv().is_err());

        handle_key(
            &mut state,
            KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL),
        );
        match rx.try_recv().unwrap() {
            NetworkEvent::CreateTask { draft, .. } => {
                assert_eq!(draft.title, "Title");
                assert_eq!(draft.description, "Line\nTwo");
            }
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn test_delete_popup_by_keyboard() {
        let (mut state, rx) =
            state_on(BootstrapState::Authenticated(Session::new("a@b.com")));
        handle_key(&mut state, key(KeyCode::Enter));
        handle_key(&mut state, key(KeyCode::Char('d')));
        assert_eq!(state.get_popup(), Some(Popup::DeleteTask { id: 1 }));

        handle_key(&mut state, key(KeyCode::Char('n')));
        assert_eq!(state.get_popup(), None);
        assert!(rx.try_recv().is_err());

        handle_key(&mut state, key(KeyCode::Char('d')));
        handle_key(&mut state, key(KeyCode::Char('y')));
        assert!(matches!(
            rx.try_recv().unwrap(),
            NetworkEvent::DeleteTask { id: 1, .. }
        ));
    }

    #[test]
    fn test_log_toggle() {
        let (mut state, _rx) =
            state_on(BootstrapState::Authenticated(Session::new("a@b.com")));
        handle_key(&mut state, key(KeyCode::Char('L')));
        assert!(state.is_log_visible());
    }
}
