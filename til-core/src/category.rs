//! The fixed category catalog and the feed filter built on it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the eight fixed topical tags. The set is compiled in; the store
/// never defines categories and users never edit them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Technology,
    Science,
    Finance,
    Society,
    Entertainment,
    Health,
    History,
    News,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Technology,
        Category::Science,
        Category::Finance,
        Category::Society,
        Category::Entertainment,
        Category::Health,
        Category::History,
        Category::News,
    ];

    /// Store column value and display label.
    pub fn name(&self) -> &'static str {
        match self {
            Category::Technology => "technology",
            Category::Science => "science",
            Category::Finance => "finance",
            Category::Society => "society",
            Category::Entertainment => "entertainment",
            Category::Health => "health",
            Category::History => "history",
            Category::News => "news",
        }
    }

    /// Fixed display color for the tag, as an RGB triple.
    pub fn color(&self) -> (u8, u8, u8) {
        match self {
            Category::Technology => (0x3b, 0x82, 0xf6),
            Category::Science => (0x16, 0xa3, 0x4a),
            Category::Finance => (0xef, 0x44, 0x44),
            Category::Society => (0xea, 0xb3, 0x08),
            Category::Entertainment => (0xdb, 0x27, 0x77),
            Category::Health => (0x14, 0xb8, 0xa6),
            Category::History => (0xf9, 0x73, 0x16),
            Category::News => (0x8b, 0x5c, 0xf6),
        }
    }

    pub fn from_name(name: &str) -> Option<Category> {
        Category::ALL
            .iter()
            .copied()
            .find(|category| category.name() == name)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The feed's active filter: the `All` sentinel or a single category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CategoryFilter {
    All,
    Only(Category),
}

impl CategoryFilter {
    /// Sidebar order: `All` first, then the catalog order.
    pub fn all() -> [CategoryFilter; 9] {
        [
            CategoryFilter::All,
            CategoryFilter::Only(Category::Technology),
            CategoryFilter::Only(Category::Science),
            CategoryFilter::Only(Category::Finance),
            CategoryFilter::Only(Category::Society),
            CategoryFilter::Only(Category::Entertainment),
            CategoryFilter::Only(Category::Health),
            CategoryFilter::Only(Category::History),
            CategoryFilter::Only(Category::News),
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            CategoryFilter::All => "all",
            CategoryFilter::Only(category) => category.name(),
        }
    }

    /// Equality query value for the store; `None` means unfiltered.
    pub fn query_value(&self) -> Option<&'static str> {
        match self {
            CategoryFilter::All => None,
            CategoryFilter::Only(category) => Some(category.name()),
        }
    }

    pub fn matches(&self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(only) => *only == category,
        }
    }

    pub fn index(&self) -> usize {
        Self::all().iter().position(|f| f == self).unwrap_or(0)
    }

    pub fn from_index(index: usize) -> Option<CategoryFilter> {
        Self::all().get(index).copied()
    }

    pub fn next(&self) -> CategoryFilter {
        let all = Self::all();
        all[(self.index() + 1) % all.len()]
    }

    pub fn previous(&self) -> CategoryFilter {
        let all = Self::all();
        let idx = self.index();
        if idx == 0 {
            all[all.len() - 1]
        } else {
            all[idx - 1]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_has_eight_entries() {
        assert_eq!(Category::ALL.len(), 8);
    }

    #[test]
    fn test_from_name_roundtrip() {
        for category in Category::ALL {
            assert_eq!(Category::from_name(category.name()), Some(category));
        }
        assert_eq!(Category::from_name("sports"), None);
        assert_eq!(Category::from_name(""), None);
    }

    #[test]
    fn test_serde_uses_lowercase_names() {
        let json = serde_json::to_string(&Category::Science).unwrap();
        assert_eq!(json, "\"science\"");
        let parsed: Category = serde_json::from_str("\"entertainment\"").unwrap();
        assert_eq!(parsed, Category::Entertainment);
    }

    #[test]
    fn test_unknown_category_rejected() {
        assert!(serde_json::from_str::<Category>("\"sports\"").is_err());
    }

    #[test]
    fn test_filter_sidebar_has_nine_entries() {
        let filters = CategoryFilter::all();
        assert_eq!(filters.len(), 9);
        assert_eq!(filters[0], CategoryFilter::All);
    }

    #[test]
    fn test_filter_query_value() {
        assert_eq!(CategoryFilter::All.query_value(), None);
        assert_eq!(
            CategoryFilter::Only(Category::Science).query_value(),
            Some("science")
        );
    }

    #[test]
    fn test_filter_matches() {
        assert!(CategoryFilter::All.matches(Category::News));
        assert!(CategoryFilter::Only(Category::News).matches(Category::News));
        assert!(!CategoryFilter::Only(Category::News).matches(Category::Health));
    }

    #[test]
    fn test_filter_next_cycles() {
        let mut current = CategoryFilter::All;
        for _ in 0..CategoryFilter::all().len() {
            current = current.next();
        }
        assert_eq!(current, CategoryFilter::All);
    }

    #[test]
    fn test_filter_previous_cycles() {
        let mut current = CategoryFilter::Only(Category::Finance);
        for _ in 0..CategoryFilter::all().len() {
            current = current.previous();
        }
        assert_eq!(current, CategoryFilter::Only(Category::Finance));
    }

    #[test]
    fn test_filter_previous_wraps_to_last() {
        assert_eq!(
            CategoryFilter::All.previous(),
            CategoryFilter::Only(Category::News)
        );
    }
}
