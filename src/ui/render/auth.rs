use super::fields::{field_rows, text_field};
use super::Frame;
use crate::state::{Field, FormPhase, FormStatus, InputForm, State};
use crate::ui::widgets::{spinner, styling};
use crate::ui::Theme;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

/// Width of the centered form column.
///
const FORM_WIDTH: u16 = 50;

/// Render the sign-in form.
///
pub fn sign_in(frame: &mut Frame, size: Rect, state: &mut State) {
    let theme = state.get_theme();
    let form = state.get_sign_in_form();
    let inner = frame_form(frame, size, "Sign In", theme);
    let rows = field_rows(inner, 2);
    for (i, (field, value)) in [(Field::Email, &form.email), (Field::Password, &form.password)]
        .into_iter()
        .enumerate()
    {
        text_field(
            frame,
            rows[i],
            field,
            value,
            form.focus() == field,
            form.status().errors(),
            theme,
        );
    }
    status_lines(
        frame,
        rows[2],
        form.status(),
        "Signing in...",
        "New here? Press Ctrl+R to create an account.",
        state.get_spinner_index(),
        theme,
    );
}

/// Render the registration form.
///
pub fn register(frame: &mut Frame, size: Rect, state: &mut State) {
    let theme = state.get_theme();
    let form = state.get_register_form();
    let inner = frame_form(frame, size, "Create Account", theme);
    let rows = field_rows(inner, 4);
    let fields = [
        (Field::Name, &form.name),
        (Field::Email, &form.email),
        (Field::Password, &form.password),
        (Field::ConfirmPassword, &form.confirm_password),
    ];
    for (i, (field, value)) in fields.into_iter().enumerate() {
        text_field(
            frame,
            rows[i],
            field,
            value,
            form.focus() == field,
            form.status().errors(),
            theme,
        );
    }
    status_lines(
        frame,
        rows[4],
        form.status(),
        "Creating your account...",
        "Already have an account? Press Esc to sign in.",
        state.get_spinner_index(),
        theme,
    );
}

/// Draw the outer block and return the centered column for the fields.
///
fn frame_form(frame: &mut Frame, size: Rect, title: &str, theme: &Theme) -> Rect {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(
            format!(" {} ", title),
            styling::active_block_title_style(),
        ))
        .border_style(styling::active_block_border_style(theme));
    frame.render_widget(block, size);

    let width = FORM_WIDTH.min(size.width.saturating_sub(4));
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(
            [
                Constraint::Min(0),
                Constraint::Length(width),
                Constraint::Min(0),
            ]
            .as_ref(),
        )
        .split(size);
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(0)].as_ref())
        .split(columns[1])[1]
}

fn status_lines(
    frame: &mut Frame,
    size: Rect,
    status: &FormStatus,
    busy_label: &'static str,
    hint: &'static str,
    spinner_index: usize,
    theme: &Theme,
) {
    let mut lines = vec![];
    match status.phase() {
        FormPhase::Submitting | FormPhase::Done => {
            lines.push(Line::from(spinner::spinner(spinner_index, busy_label, theme)));
        }
        FormPhase::Idle | FormPhase::Validating => {
            if let Some(failure) = status.failure() {
                lines.push(Line::from(Span::styled(
                    failure.to_string(),
                    styling::error_text_style(theme),
                )));
            }
        }
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(hint, styling::muted_text_style(theme))));
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        size,
    );
}
