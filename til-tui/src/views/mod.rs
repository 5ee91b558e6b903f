//! View rendering dispatch.

pub mod feed;
pub mod form;

use crate::notifications::NotificationLevel;
use crate::state::App;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::Span,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render_view(f: &mut Frame<'_>, app: &App) {
    let constraints = if app.form.is_some() {
        vec![
            Constraint::Length(3),
            Constraint::Length(12),
            Constraint::Min(0),
            Constraint::Length(2),
        ]
    } else {
        vec![
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(2),
        ]
    };
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(f.size());

    render_header(f, app, layout[0]);

    if let Some(form) = &app.form {
        form::render(f, app, form, layout[1]);
        feed::render(f, app, layout[2]);
        render_footer(f, app, layout[3]);
    } else {
        feed::render(f, app, layout[1]);
        render_footer(f, app, layout[2]);
    }
}

fn render_header(f: &mut Frame<'_>, app: &App, area: Rect) {
    let form_hint = if app.form.is_some() { "Esc close form" } else { "n share a fact" };
    let title = format!(
        "TODAY I LEARNED | {} facts | category: {} | {}",
        app.feed.facts.len(),
        app.feed.filter.label(),
        form_hint,
    );
    let block = Block::default().borders(Borders::ALL).title(Span::styled(
        title,
        Style::default().fg(app.theme.primary),
    ));
    f.render_widget(block, area);
}

fn render_footer(f: &mut Frame<'_>, app: &App, area: Rect) {
    let help = if app.form.is_some() {
        "Tab next field • \u{2190}/\u{2192} category • Enter post • Esc close"
    } else {
        "j/k move • Tab category • 0-8 jump • i/w/f vote • n new • r refresh • q quit"
    };
    let (text, style) = if let Some(note) = app.notifications.last() {
        let label = match note.level {
            NotificationLevel::Info => "INFO",
            NotificationLevel::Error => "ERROR",
        };
        let color = match note.level {
            NotificationLevel::Info => app.theme.accent,
            NotificationLevel::Error => app.theme.error,
        };
        (format!("{}: {}", label, note.message), Style::default().fg(color))
    } else {
        (help.to_string(), Style::default().fg(app.theme.text_dim))
    };
    let footer = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL))
        .style(style);
    f.render_widget(footer, area);
}
