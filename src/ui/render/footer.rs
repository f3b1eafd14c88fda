use super::Frame;
use crate::state::{Route, State};
use crate::ui::widgets::styling;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

/// Return the key hints for the current view.
///
fn hints(state: &State) -> &'static str {
    if state.get_popup().is_some() {
        return " y: confirm  n/Esc: cancel";
    }
    match state.current_route() {
        Route::Splash => " q: quit",
        Route::SignIn => " Tab: next field  Enter: sign in  Ctrl+R: register  Ctrl+C: quit",
        Route::Register => " Tab: next field  Enter: create account  Esc: back  Ctrl+C: quit",
        Route::TaskList => {
            " j/k: navigate  Enter: view  a: add  r: refresh  l: logout  L: log  q: quit"
        }
        Route::TaskDetail { .. } => " e: edit  d: delete  Esc: back  L: log  q: quit",
        Route::TaskForm(_) => " Tab: next field  Ctrl+S: save  Esc: cancel",
    }
}

fn mode_label(route: &Route) -> &'static str {
    match route {
        Route::Splash => " LOADING ",
        Route::SignIn | Route::Register => " ACCOUNT ",
        Route::TaskList => " TASKS ",
        Route::TaskDetail { .. } => " TASK ",
        Route::TaskForm(_) => " EDIT ",
    }
}

/// Render footer with the view label, key hints and the latest notice.
///
pub fn footer(frame: &mut Frame, size: Rect, state: &mut State) {
    let theme = state.get_theme();
    let label = mode_label(state.current_route());
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(
            [
                Constraint::Length(label.len() as u16),
                Constraint::Min(10),
                Constraint::Length(32),
            ]
            .as_ref(),
        )
        .split(size);

    frame.render_widget(
        Paragraph::new(Span::styled(
            label,
            Style::default()
                .fg(theme.highlight_fg.to_color())
                .bg(theme.primary.to_color())
                .add_modifier(Modifier::BOLD),
        )),
        columns[0],
    );
    frame.render_widget(
        Paragraph::new(Span::styled(hints(state), styling::muted_text_style(theme))),
        columns[1],
    );
    if let Some(notice) = state.get_notice() {
        let style = if notice.starts_with("Failed") {
            styling::error_text_style(theme)
        } else {
            styling::success_text_style(theme)
        };
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(notice.to_string(), style)))
                .alignment(ratatui::layout::Alignment::Right),
            columns[2],
        );
    }
}
