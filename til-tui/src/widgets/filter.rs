//! Category sidebar widget.

use crate::theme::{category_color, InkwellTheme};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};
use til_core::CategoryFilter;

/// Vertical list of the nine filters: "all" plus the eight categories,
/// each in its tag color, the active one highlighted. Digits 0-8 jump
/// straight to an entry, hence the index prefix.
pub struct CategorySidebar<'a> {
    pub active: CategoryFilter,
    pub theme: &'a InkwellTheme,
}

impl<'a> CategorySidebar<'a> {
    pub fn render(&self, f: &mut Frame<'_>, area: Rect) {
        let items: Vec<ListItem> = CategoryFilter::all()
            .iter()
            .enumerate()
            .map(|(index, filter)| {
                let color = match filter {
                    CategoryFilter::All => self.theme.text,
                    CategoryFilter::Only(category) => category_color(*category),
                };
                let mut style = Style::default().fg(color);
                if *filter == self.active {
                    style = style.bg(self.theme.bg_highlight).add_modifier(Modifier::BOLD);
                }
                let line = Line::from(vec![
                    Span::styled(format!("{} ", index), Style::default().fg(self.theme.text_dim)),
                    Span::styled(filter.label().to_string(), style),
                ]);
                ListItem::new(line)
            })
            .collect();

        let list = List::new(items).block(
            Block::default()
                .title("Categories")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(self.theme.border)),
        );
        f.render_widget(list, area);
    }
}
