use super::Frame;
use crate::state::State;
use crate::ui::widgets::{spinner, styling};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

const POPUP_WIDTH: u16 = 48;
const POPUP_HEIGHT: u16 = 7;

/// Render the confirmation dialog over the current view.
///
pub fn popup(frame: &mut Frame, size: Rect, state: &mut State) {
    let Some(popup) = state.get_popup() else {
        return;
    };
    let theme = state.get_theme();
    let area = centered_rect(POPUP_WIDTH, POPUP_HEIGHT, size);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(
            format!(" {} ", popup.title()),
            styling::active_block_title_style(),
        ))
        .border_style(styling::active_block_border_style(theme));

    let actions = if state.is_popup_busy() {
        Line::from(spinner::spinner(
            state.get_spinner_index(),
            "Please wait...",
            theme,
        ))
    } else {
        Line::from(vec![
            Span::styled(
                format!("y: {}", popup.confirm_label()),
                styling::error_text_style(theme),
            ),
            Span::raw("    "),
            Span::styled("n: Cancel", styling::muted_text_style(theme)),
        ])
    };
    let content = vec![
        Line::from(Span::styled(popup.message(), styling::normal_text_style(theme))),
        Line::from(""),
        actions,
    ];

    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(content)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(block),
        area,
    );
}

/// Return a rectangle of the given size centered in the area, shrunk to fit.
///
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Min(0),
                Constraint::Length(height),
                Constraint::Min(0),
            ]
            .as_ref(),
        )
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints(
            [
                Constraint::Min(0),
                Constraint::Length(width),
                Constraint::Min(0),
            ]
            .as_ref(),
        )
        .split(rows[1])[1]
}
