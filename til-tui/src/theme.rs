//! Inkwell theme and category color lookup.

use ratatui::style::Color;
use til_core::Category;

#[derive(Debug, Clone)]
pub struct InkwellTheme {
    pub bg: Color,
    pub bg_highlight: Color,
    pub primary: Color,
    pub accent: Color,
    pub success: Color,
    pub error: Color,
    pub text: Color,
    pub text_dim: Color,
    pub border: Color,
    pub border_focus: Color,
}

impl InkwellTheme {
    pub fn inkwell() -> Self {
        Self {
            bg: Color::Rgb(16, 16, 20),
            bg_highlight: Color::Rgb(40, 40, 48),
            primary: Color::Rgb(238, 190, 0),
            accent: Color::Rgb(120, 170, 255),
            success: Color::Rgb(60, 200, 120),
            error: Color::Rgb(230, 70, 70),
            text: Color::Rgb(230, 230, 230),
            text_dim: Color::Rgb(130, 130, 140),
            border: Color::Rgb(70, 70, 80),
            border_focus: Color::Rgb(238, 190, 0),
        }
    }
}

/// Tag color for a category, from the fixed catalog.
pub fn category_color(category: Category) -> Color {
    let (r, g, b) = category.color();
    Color::Rgb(r, g, b)
}
