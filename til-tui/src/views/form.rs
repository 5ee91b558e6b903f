//! Submission form view.

use crate::state::{App, FormField, FormState};
use crate::theme::category_color;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use til_core::MAX_FACT_TEXT_LEN;

pub fn render(f: &mut Frame<'_>, app: &App, form: &FormState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(area);

    render_text_field(f, app, form, chunks[0]);
    render_field(f, app, form, FormField::Source, "Trustworthy source", &form.source, chunks[1]);
    render_category_field(f, app, form, chunks[2]);
}

fn field_border(app: &App, form: &FormState, field: FormField) -> Style {
    if form.focus == field {
        Style::default().fg(app.theme.border_focus)
    } else {
        Style::default().fg(app.theme.border)
    }
}

fn render_text_field(f: &mut Frame<'_>, app: &App, form: &FormState, area: Rect) {
    let remaining = form.draft().remaining_chars();
    let counter_style = if remaining == 0 {
        Style::default().fg(app.theme.error)
    } else {
        Style::default().fg(app.theme.text_dim)
    };
    let block = Block::default()
        .title(Line::from(vec![
            Span::raw("Your fact "),
            Span::styled(format!("({}/{})", remaining, MAX_FACT_TEXT_LEN), counter_style),
        ]))
        .borders(Borders::ALL)
        .border_style(field_border(app, form, FormField::Text));
    let inner = block.inner(area);
    f.render_widget(block, area);
    f.render_widget(&form.text, inner);
}

fn render_field(
    f: &mut Frame<'_>,
    app: &App,
    form: &FormState,
    field: FormField,
    title: &str,
    textarea: &tui_textarea::TextArea<'static>,
    area: Rect,
) {
    let block = Block::default()
        .title(title.to_string())
        .borders(Borders::ALL)
        .border_style(field_border(app, form, field));
    let inner = block.inner(area);
    f.render_widget(block, area);
    f.render_widget(textarea, inner);
}

fn render_category_field(f: &mut Frame<'_>, app: &App, form: &FormState, area: Rect) {
    let content = match form.category {
        Some(category) => Span::styled(
            category.name(),
            Style::default()
                .fg(category_color(category))
                .add_modifier(Modifier::BOLD),
        ),
        None => Span::styled("Choose category:", Style::default().fg(app.theme.text_dim)),
    };
    let paragraph = Paragraph::new(Line::from(content)).block(
        Block::default()
            .title("Category (\u{2190}/\u{2192})")
            .borders(Borders::ALL)
            .border_style(field_border(app, form, FormField::Category)),
    );
    f.render_widget(paragraph, area);
}
