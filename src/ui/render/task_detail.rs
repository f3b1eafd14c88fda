use super::Frame;
use crate::state::State;
use crate::task::Task;
use crate::ui::widgets::styling;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
};

/// Render the snapshot the detail view was opened with.
///
pub fn task_detail(frame: &mut Frame, size: Rect, state: &mut State, task: &Task) {
    let theme = state.get_theme();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3)].as_ref())
        .split(size);

    let title = Paragraph::new(Line::from(Span::styled(
        task.title.clone(),
        styling::heading_style(theme),
    )))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" Task #{} ", task.id))
            .border_style(styling::active_block_border_style(theme)),
    );
    frame.render_widget(title, rows[0]);

    let description = Text::from(task.description.as_str());
    let description = description.patch_style(styling::normal_text_style(theme));
    let body = Paragraph::new(description)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Description ")
                .border_style(styling::normal_block_border_style(theme)),
        );
    frame.render_widget(body, rows[1]);
}
