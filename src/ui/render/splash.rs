use super::Frame;
use crate::state::State;
use crate::ui::widgets::{spinner, styling};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Text},
    widgets::{Block, Borders, Paragraph},
};

pub const BANNER: &str = "
  _____         _      __  __
 |_   _|_ _ ___| | __ |  \\/  | __ _ _ __   __ _  __ _  ___ _ __
   | |/ _` / __| |/ / | |\\/| |/ _` | '_ \\ / _` |/ _` |/ _ \\ '__|
   | | (_| \\__ \\   <  | |  | | (_| | | | | (_| | (_| |  __/ |
   |_|\\__,_|___/_|\\_\\ |_|  |_|\\__,_|_| |_|\\__,_|\\__, |\\___|_|
                                                |___/
";

/// Render the launch screen shown while the persisted session is checked.
///
pub fn splash(frame: &mut Frame, size: Rect, state: &mut State) {
    let theme = state.get_theme();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styling::active_block_border_style(theme));
    frame.render_widget(block, size);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Percentage(30),
                Constraint::Length(8),
                Constraint::Length(2),
                Constraint::Min(0),
            ]
            .as_ref(),
        )
        .margin(1)
        .split(size);

    let banner = Text::from(BANNER);
    let banner = banner.patch_style(styling::banner_style(theme));
    frame.render_widget(Paragraph::new(banner).alignment(Alignment::Center), rows[1]);

    let progress = Line::from(spinner::spinner(
        state.get_spinner_index(),
        "Checking your session...",
        theme,
    ));
    frame.render_widget(
        Paragraph::new(progress).alignment(Alignment::Center),
        rows[2],
    );
}
