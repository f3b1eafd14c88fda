use super::*;
use crate::state::{Route, State};
use ratatui::layout::{Constraint, Direction, Layout};

/// Height of the log pane when it is visible.
///
const LOG_HEIGHT: u16 = 10;

/// Render the current view, the footer, the optional log pane and any popup.
///
pub fn all(frame: &mut Frame, state: &mut State) {
    let size = frame.size();
    let (body, log_area) = if state.is_log_visible() {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(LOG_HEIGHT)].as_ref())
            .split(size);
        (rows[0], Some(rows[1]))
    } else {
        (size, None)
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)].as_ref())
        .split(body);

    let route = state.current_route().clone();
    match route {
        Route::Splash => splash::splash(frame, rows[0], state),
        Route::SignIn => auth::sign_in(frame, rows[0], state),
        Route::Register => auth::register(frame, rows[0], state),
        Route::TaskList => task_list::task_list(frame, rows[0], state),
        Route::TaskDetail { task } => task_detail::task_detail(frame, rows[0], state, &task),
        Route::TaskForm(mode) => task_form::task_form(frame, rows[0], state, &mode),
    }
    footer(frame, rows[1], state);

    if let Some(area) = log_area {
        log(frame, area, state);
    }
    if state.get_popup().is_some() {
        popup(frame, size, state);
    }
}
