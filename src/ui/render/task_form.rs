use super::fields::text_field;
use super::Frame;
use crate::state::{Field, FormMode, FormPhase, InputForm, State};
use crate::ui::widgets::{spinner, styling};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Render the add or edit form.
///
pub fn task_form(frame: &mut Frame, size: Rect, state: &mut State, mode: &FormMode) {
    let theme = state.get_theme();
    let Some(form) = state.get_task_form() else {
        return;
    };
    let heading = match mode {
        FormMode::Add => " Add Task ".to_string(),
        FormMode::Edit { task } => format!(" Edit Task #{} ", task.id),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(heading, styling::active_block_title_style()))
        .border_style(styling::active_block_border_style(theme));
    let inner = block.inner(size);
    frame.render_widget(block, size);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(4),
                Constraint::Min(4),
                Constraint::Length(1),
                Constraint::Length(1),
            ]
            .as_ref(),
        )
        .split(inner);

    let errors = form.status().errors();
    text_field(
        frame,
        rows[0],
        Field::Title,
        form.title(),
        form.focus() == Field::Title,
        errors,
        theme,
    );

    let focused = form.focus() == Field::Description;
    let mut textarea = form.description_textarea().clone();
    textarea.set_block(
        Block::default()
            .borders(Borders::ALL)
            .title(Field::Description.label())
            .border_style(if focused {
                styling::active_block_border_style(theme)
            } else {
                styling::normal_block_border_style(theme)
            }),
    );
    textarea.set_style(styling::normal_text_style(theme));
    if !focused {
        textarea.set_cursor_style(styling::normal_text_style(theme));
    }
    frame.render_widget(textarea.widget(), rows[1]);

    if let Some(message) = errors.get(Field::Description) {
        frame.render_widget(
            Paragraph::new(Span::styled(message, styling::error_text_style(theme))),
            rows[2],
        );
    }

    let status = match form.status().phase() {
        FormPhase::Submitting | FormPhase::Done => {
            let label = if form.is_edit() {
                "Saving task..."
            } else {
                "Adding task..."
            };
            Line::from(spinner::spinner(state.get_spinner_index(), label, theme))
        }
        _ => match form.status().failure() {
            Some(failure) => Line::from(Span::styled(
                failure.to_string(),
                styling::error_text_style(theme),
            )),
            None => Line::from(""),
        },
    };
    frame.render_widget(Paragraph::new(status), rows[3]);
}
