//! Fact feed view: category sidebar, fact list, selected-fact detail.

use crate::state::App;
use crate::theme::category_color;
use crate::widgets::CategorySidebar;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};
use til_core::Fact;

pub fn render(f: &mut Frame<'_>, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(22), Constraint::Min(0)])
        .split(area);

    let sidebar = CategorySidebar {
        active: app.feed.filter,
        theme: &app.theme,
    };
    sidebar.render(f, chunks[0]);

    if app.feed.loading {
        render_loader(f, app, chunks[1]);
    } else if app.feed.facts.is_empty() {
        render_empty_state(f, app, chunks[1]);
    } else {
        render_feed(f, app, chunks[1]);
    }
}

fn render_loader(f: &mut Frame<'_>, app: &App, area: Rect) {
    let loader = Paragraph::new("Loading.....")
        .style(Style::default().fg(app.theme.accent))
        .block(Block::default().title("Facts").borders(Borders::ALL));
    f.render_widget(loader, area);
}

/// Zero rows never render as a blank list; the placeholder makes the
/// empty feed explicit.
fn render_empty_state(f: &mut Frame<'_>, app: &App, area: Rect) {
    let message = Paragraph::new("No facts for this category yet. Share the first one!")
        .style(Style::default().fg(app.theme.text_dim))
        .wrap(Wrap { trim: true })
        .block(Block::default().title("Facts").borders(Borders::ALL));
    f.render_widget(message, area);
}

fn render_feed(f: &mut Frame<'_>, app: &App, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(8)])
        .split(area);

    let items: Vec<ListItem> = app.feed.facts.iter().map(|fact| feed_line(app, fact)).collect();

    let mut state = ListState::default();
    if let Some(selected) = app.feed.selected {
        if let Some(index) = app.feed.facts.iter().position(|fact| fact.id == selected) {
            state.select(Some(index));
        }
    }

    let title = format!("Facts ({})", app.feed.facts.len());
    let list = List::new(items)
        .block(Block::default().title(title).borders(Borders::ALL))
        .highlight_style(
            Style::default()
                .bg(app.theme.bg_highlight)
                .add_modifier(Modifier::BOLD),
        );
    f.render_stateful_widget(list, rows[0], &mut state);

    if let Some(fact) = app.feed.selected_fact() {
        render_detail(f, app, fact, rows[1]);
    }
}

fn feed_line<'a>(app: &App, fact: &'a Fact) -> ListItem<'a> {
    let tag_style = Style::default()
        .fg(category_color(fact.category))
        .add_modifier(Modifier::BOLD);
    let votes = format!(
        " i:{} w:{} f:{}",
        fact.votes_interesting, fact.votes_mindblowing, fact.votes_false
    );
    let line = Line::from(vec![
        Span::styled(format!("[{}] ", fact.category), tag_style),
        Span::styled(fact.text.as_str(), Style::default().fg(app.theme.text)),
        Span::styled(votes, Style::default().fg(app.theme.text_dim)),
    ]);
    ListItem::new(line)
}

fn render_detail(f: &mut Frame<'_>, app: &App, fact: &Fact, area: Rect) {
    let dim = Style::default().fg(app.theme.text_dim);
    let lines = vec![
        Line::from(Span::styled(fact.text.as_str(), Style::default().fg(app.theme.text))),
        Line::from(vec![
            Span::styled("source: ", dim),
            Span::styled(fact.source.as_str(), Style::default().fg(app.theme.accent)),
        ]),
        Line::from(vec![
            Span::styled("category: ", dim),
            Span::styled(
                fact.category.name(),
                Style::default().fg(category_color(fact.category)),
            ),
            Span::styled(format!("   posted in {}", fact.created_in), dim),
        ]),
        Line::from(Span::styled(
            format!(
                "interesting {} • mindblowing {} • false {}",
                fact.votes_interesting, fact.votes_mindblowing, fact.votes_false
            ),
            dim,
        )),
    ];
    let detail = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().title("Detail").borders(Borders::ALL));
    f.render_widget(detail, area);
}
