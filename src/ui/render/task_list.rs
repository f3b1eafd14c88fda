use super::Frame;
use crate::state::State;
use crate::ui::widgets::{spinner, styling};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

/// Render the signed-in home screen: greeting header, user card and tasks.
///
pub fn task_list(frame: &mut Frame, size: Rect, state: &mut State) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(4),
                Constraint::Length(1),
                Constraint::Min(3),
            ]
            .as_ref(),
        )
        .split(size);

    header(frame, rows[0], state);
    greeting(frame, rows[1], state);
    tasks(frame, rows[2], state);
}

fn header(frame: &mut Frame, size: Rect, state: &State) {
    let theme = state.get_theme();
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(36)].as_ref())
        .split(size);

    let session = state.get_session();
    let name = session
        .as_ref()
        .and_then(|s| s.name.clone())
        .unwrap_or_else(|| "User".to_string());
    let date = chrono::Local::now().format("%A, %B %-d, %Y").to_string();
    let welcome = vec![
        Line::from(Span::styled(
            format!("Welcome, {}", name),
            styling::heading_style(theme),
        )),
        Line::from(Span::styled(date, styling::muted_text_style(theme))),
    ];
    frame.render_widget(
        Paragraph::new(welcome).block(Block::default().borders(Borders::NONE)),
        columns[0],
    );

    let (initial, email) = match &session {
        Some(session) => (session.initial(), session.email.clone()),
        None => ("U".to_string(), String::new()),
    };
    let card = Paragraph::new(Line::from(vec![
        Span::styled(format!(" {} ", initial), styling::active_list_item_style(theme)),
        Span::raw(" "),
        Span::styled(email, styling::normal_text_style(theme)),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(styling::normal_block_border_style(theme)),
    );
    frame.render_widget(card, columns[1]);
}

fn greeting(frame: &mut Frame, size: Rect, state: &State) {
    let theme = state.get_theme();
    let line = Line::from(Span::styled(
        state.get_greeting_line(),
        styling::accent_text_style(theme),
    ));
    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), size);
}

fn tasks(frame: &mut Frame, size: Rect, state: &mut State) {
    let count = state.get_tasks().len();
    let noun = if count == 1 { "task" } else { "tasks" };
    let theme = state.get_theme().clone();
    let mut title = vec![
        Span::styled(" My Tasks ", styling::active_block_title_style()),
        Span::styled(
            format!("You have {} {} ", count, noun),
            styling::muted_text_style(&theme),
        ),
    ];
    if state.is_refreshing() {
        title.extend(spinner::spinner(
            state.get_spinner_index(),
            "Refreshing ",
            &theme,
        ));
    }
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Line::from(title))
        .border_style(styling::active_block_border_style(&theme));

    if count == 0 {
        let empty = Paragraph::new(Span::styled(
            "No tasks yet. Press a to add one.",
            styling::muted_text_style(&theme),
        ))
        .alignment(Alignment::Center)
        .block(block);
        frame.render_widget(empty, size);
        return;
    }

    let items: Vec<ListItem> = state
        .get_tasks()
        .iter()
        .map(|task| {
            let summary = task.description.lines().next().unwrap_or_default();
            ListItem::new(vec![
                Line::from(Span::styled(
                    task.title.clone(),
                    styling::normal_text_style(&theme),
                )),
                Line::from(Span::styled(
                    format!("  {}", summary),
                    styling::muted_text_style(&theme),
                )),
            ])
        })
        .collect();
    let list = List::new(items)
        .block(block)
        .highlight_style(styling::active_list_item_style(&theme));
    frame.render_stateful_widget(list, size, state.get_tasks_list_state());
}
