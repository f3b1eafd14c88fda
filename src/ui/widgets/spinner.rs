use super::styling;
use crate::ui::theme::Theme;
use ratatui::text::Span;

/// Braille animation frames, advanced once per tick.
///
pub const FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Return the spinner frame for the index followed by the label.
///
pub fn spinner<'a>(index: usize, label: &'a str, theme: &Theme) -> Vec<Span<'a>> {
    vec![
        Span::styled(FRAMES[index % FRAMES.len()], styling::heading_style(theme)),
        Span::raw(" "),
        Span::styled(label, styling::muted_text_style(theme)),
    ]
}
