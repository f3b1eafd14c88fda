use super::Frame;
use crate::state::{Field, FieldErrors};
use crate::ui::widgets::styling;
use crate::ui::Theme;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Rows taken by one field: a bordered input plus its error line.
///
pub const FIELD_HEIGHT: u16 = 4;

/// Render a single-line input with its validation message beneath it.
///
pub fn text_field(
    frame: &mut Frame,
    size: Rect,
    field: Field,
    value: &str,
    focused: bool,
    errors: &FieldErrors,
    theme: &Theme,
) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(1)].as_ref())
        .split(size);

    let border_style = if focused {
        styling::active_block_border_style(theme)
    } else {
        styling::normal_block_border_style(theme)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(field.label())
        .border_style(border_style);

    let shown = if field.is_secret() {
        "*".repeat(value.chars().count())
    } else {
        value.to_string()
    };
    let mut spans = vec![Span::styled(shown, styling::normal_text_style(theme))];
    if focused {
        spans.push(Span::styled("_", styling::heading_style(theme)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), rows[0]);

    if let Some(message) = errors.get(field) {
        frame.render_widget(
            Paragraph::new(Span::styled(message, styling::error_text_style(theme))),
            rows[1],
        );
    }
}

/// Split the area into one slot per field followed by the remainder.
///
pub fn field_rows(size: Rect, count: usize) -> std::rc::Rc<[Rect]> {
    let mut constraints = vec![Constraint::Length(FIELD_HEIGHT); count];
    constraints.push(Constraint::Min(0));
    Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(size)
}
