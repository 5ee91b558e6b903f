//! Application state and pure transition methods.
//!
//! Every transition here is synchronous and side-effect free; the event
//! loop in `main` owns all I/O and feeds results back as [`crate::events::TuiEvent`]s.

use crate::config::TuiConfig;
use crate::notifications::{Notification, NotificationLevel};
use crate::theme::InkwellTheme;
use til_core::{Category, CategoryFilter, Fact, FactDraft, FactId};
use tui_textarea::TextArea;

/// Source field prefill, kept from the web client.
const SOURCE_PREFILL: &str = "https://www.google.com";

pub struct App {
    pub config: TuiConfig,
    pub theme: InkwellTheme,
    pub feed: FeedViewState,
    /// The submission form; `Some` while it is open.
    pub form: Option<FormState>,
    pub notifications: Vec<Notification>,
    /// Monotonic token for issued fetches. Only the response carrying the
    /// latest token is ever applied; see [`App::apply_facts_loaded`].
    fetch_seq: u64,
}

impl App {
    pub fn new(config: TuiConfig) -> Self {
        Self {
            config,
            theme: InkwellTheme::inkwell(),
            feed: FeedViewState::new(),
            form: None,
            notifications: Vec::new(),
            fetch_seq: 0,
        }
    }

    pub fn notify(&mut self, level: NotificationLevel, message: impl Into<String>) {
        self.notifications.push(Notification::new(level, message));
    }

    // ------------------------------------------------------------------
    // Fetch lifecycle
    // ------------------------------------------------------------------

    /// Mark a fetch as issued: bumps the sequence token, raises the
    /// loading flag, and returns the token the response must echo.
    pub fn begin_fetch(&mut self) -> u64 {
        self.fetch_seq += 1;
        self.feed.loading = true;
        self.fetch_seq
    }

    pub fn latest_fetch_seq(&self) -> u64 {
        self.fetch_seq
    }

    /// Apply a finished fetch. Responses to superseded fetches are
    /// discarded no matter when they arrive, so a slow early fetch can
    /// never overwrite the result of a later one. On error the previous
    /// list stays as it was and the failure surfaces as a notification.
    ///
    /// Returns whether the response was applied.
    pub fn apply_facts_loaded(&mut self, seq: u64, result: Result<Vec<Fact>, String>) -> bool {
        if seq != self.fetch_seq {
            tracing::debug!(seq, latest = self.fetch_seq, "discarding stale fetch response");
            return false;
        }
        self.feed.loading = false;
        match result {
            Ok(facts) => {
                self.feed.replace_all(facts);
            }
            Err(message) => {
                self.notify(
                    NotificationLevel::Error,
                    format!("There was a problem getting facts: {}", message),
                );
            }
        }
        true
    }

    /// Switch the active filter. The caller issues the re-fetch; this only
    /// records the selection.
    pub fn select_filter(&mut self, filter: CategoryFilter) {
        self.feed.filter = filter;
    }

    // ------------------------------------------------------------------
    // Submission lifecycle
    // ------------------------------------------------------------------

    pub fn open_form(&mut self) {
        if self.form.is_none() {
            self.form = Some(FormState::new());
        }
    }

    pub fn close_form(&mut self) {
        self.form = None;
    }

    /// Take the current draft and close the form. Fields are cleared and
    /// the form hidden on every attempt, valid or not; the caller decides
    /// whether the draft passes the gate and reaches the store.
    pub fn take_submission(&mut self) -> Option<FactDraft> {
        self.form.take().map(|form| form.draft())
    }

    /// A confirmed insert prepends the store's row; a failed one changes
    /// nothing visible.
    pub fn apply_fact_inserted(&mut self, result: Result<Fact, String>) {
        match result {
            Ok(fact) => self.feed.prepend(fact),
            Err(message) => {
                tracing::warn!(%message, "insert failed");
            }
        }
    }

    // ------------------------------------------------------------------
    // Vote lifecycle
    // ------------------------------------------------------------------

    /// A confirmed vote replaces the matching record with the store's row
    /// (never a locally computed increment); a failed one changes nothing
    /// visible.
    pub fn apply_vote(&mut self, fact_id: FactId, result: Result<Fact, String>) {
        match result {
            Ok(fact) => self.feed.replace_by_id(fact),
            Err(message) => {
                tracing::warn!(fact_id, %message, "vote update failed");
            }
        }
    }
}

// ============================================================================
// FEED STATE
// ============================================================================

#[derive(Debug, Clone)]
pub struct FeedViewState {
    pub facts: Vec<Fact>,
    pub selected: Option<FactId>,
    pub filter: CategoryFilter,
    pub loading: bool,
}

impl FeedViewState {
    pub fn new() -> Self {
        Self {
            facts: Vec::new(),
            selected: None,
            filter: CategoryFilter::All,
            loading: false,
        }
    }

    /// Wholesale replacement after a fetch. Selection is kept when the
    /// selected row survived the refresh, else dropped to the top.
    pub fn replace_all(&mut self, facts: Vec<Fact>) {
        self.facts = facts;
        if let Some(id) = self.selected {
            if !self.facts.iter().any(|f| f.id == id) {
                self.selected = self.facts.first().map(|f| f.id);
            }
        } else {
            self.selected = self.facts.first().map(|f| f.id);
        }
    }

    /// A freshly inserted fact goes to the front, without a re-fetch.
    pub fn prepend(&mut self, fact: Fact) {
        self.facts.insert(0, fact);
    }

    /// Replace the record with the same id, if present.
    pub fn replace_by_id(&mut self, fact: Fact) {
        if let Some(existing) = self.facts.iter_mut().find(|f| f.id == fact.id) {
            *existing = fact;
        }
    }

    pub fn selected_fact(&self) -> Option<&Fact> {
        self.selected
            .and_then(|id| self.facts.iter().find(|f| f.id == id))
    }

    pub fn select_next(&mut self) {
        select_next_id(&self.facts, &mut self.selected);
    }

    pub fn select_previous(&mut self) {
        select_prev_id(&self.facts, &mut self.selected);
    }
}

impl Default for FeedViewState {
    fn default() -> Self {
        Self::new()
    }
}

fn select_next_id(items: &[Fact], selected: &mut Option<FactId>) {
    if items.is_empty() {
        *selected = None;
        return;
    }
    let index = selected
        .and_then(|id| items.iter().position(|item| item.id == id))
        .unwrap_or(usize::MAX);
    let next = if index == usize::MAX {
        0
    } else {
        (index + 1) % items.len()
    };
    *selected = Some(items[next].id);
}

fn select_prev_id(items: &[Fact], selected: &mut Option<FactId>) {
    if items.is_empty() {
        *selected = None;
        return;
    }
    let index = selected
        .and_then(|id| items.iter().position(|item| item.id == id))
        .unwrap_or(0);
    let prev = if index == 0 { items.len() - 1 } else { index - 1 };
    *selected = Some(items[prev].id);
}

// ============================================================================
// FORM STATE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Text,
    Source,
    Category,
}

impl FormField {
    pub fn next(&self) -> FormField {
        match self {
            FormField::Text => FormField::Source,
            FormField::Source => FormField::Category,
            FormField::Category => FormField::Text,
        }
    }
}

pub struct FormState {
    pub text: TextArea<'static>,
    pub source: TextArea<'static>,
    pub category: Option<Category>,
    pub focus: FormField,
}

impl FormState {
    pub fn new() -> Self {
        let mut text = TextArea::default();
        text.set_placeholder_text("Share a fact with the world...");
        let mut source = TextArea::default();
        source.insert_str(SOURCE_PREFILL);
        Self {
            text,
            source,
            category: None,
            focus: FormField::Text,
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    /// Cycle the category selector. `None` sits between the last and the
    /// first entry so the "choose category" placeholder stays reachable.
    pub fn cycle_category(&mut self, forward: bool) {
        let all = Category::ALL;
        self.category = match (self.category, forward) {
            (None, true) => Some(all[0]),
            (None, false) => Some(all[all.len() - 1]),
            (Some(current), true) => {
                let idx = all.iter().position(|c| *c == current).unwrap_or(0);
                if idx + 1 == all.len() {
                    None
                } else {
                    Some(all[idx + 1])
                }
            }
            (Some(current), false) => {
                let idx = all.iter().position(|c| *c == current).unwrap_or(0);
                if idx == 0 {
                    None
                } else {
                    Some(all[idx - 1])
                }
            }
        };
    }

    /// Snapshot the editable fields as a validation draft.
    pub fn draft(&self) -> FactDraft {
        FactDraft {
            text: self.text.lines().join("\n"),
            source: self.source.lines().join("\n"),
            category: self.category,
        }
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ThemeConfig;
    use til_core::VoteKind;

    fn test_config() -> TuiConfig {
        TuiConfig {
            store_url: "https://project.supabase.co".to_string(),
            api_key: "anon-key".to_string(),
            request_timeout_ms: Some(5_000),
            tick_interval_ms: 200,
            log_path: "tmp/til-tui.log".into(),
            theme: ThemeConfig {
                name: "inkwell".to_string(),
            },
        }
    }

    fn sample_fact(id: FactId, category: Category) -> Fact {
        Fact {
            id,
            text: format!("fact {}", id),
            source: "https://example.com".to_string(),
            category,
            votes_interesting: 0,
            votes_mindblowing: 0,
            votes_false: 0,
            created_in: 2023,
        }
    }

    // ========================================================================
    // Fetch lifecycle
    // ========================================================================

    #[test]
    fn test_begin_fetch_is_monotonic_and_sets_loading() {
        let mut app = App::new(test_config());
        let first = app.begin_fetch();
        let second = app.begin_fetch();
        assert!(second > first);
        assert!(app.feed.loading);
    }

    #[test]
    fn test_facts_loaded_replaces_list() {
        let mut app = App::new(test_config());
        let seq = app.begin_fetch();
        let applied = app.apply_facts_loaded(
            seq,
            Ok(vec![
                sample_fact(1, Category::Science),
                sample_fact(2, Category::News),
            ]),
        );
        assert!(applied);
        assert!(!app.feed.loading);
        assert_eq!(app.feed.facts.len(), 2);
    }

    #[test]
    fn test_stale_fetch_response_discarded() {
        let mut app = App::new(test_config());
        let stale = app.begin_fetch();
        let latest = app.begin_fetch();

        // The later fetch resolves first.
        assert!(app.apply_facts_loaded(latest, Ok(vec![sample_fact(7, Category::History)])));
        // The earlier one straggles in afterwards and must not win.
        assert!(!app.apply_facts_loaded(stale, Ok(vec![sample_fact(1, Category::Science)])));

        assert_eq!(app.feed.facts.len(), 1);
        assert_eq!(app.feed.facts[0].id, 7);
    }

    #[test]
    fn test_fetch_error_keeps_previous_list_and_notifies() {
        let mut app = App::new(test_config());
        let seq = app.begin_fetch();
        app.apply_facts_loaded(seq, Ok(vec![sample_fact(1, Category::Science)]));

        let seq = app.begin_fetch();
        app.apply_facts_loaded(seq, Err("connection refused".to_string()));

        assert_eq!(app.feed.facts.len(), 1);
        assert!(!app.feed.loading);
        let last = app.notifications.last().unwrap();
        assert_eq!(last.level, NotificationLevel::Error);
    }

    // ========================================================================
    // Feed state
    // ========================================================================

    #[test]
    fn test_prepend_puts_new_fact_first() {
        let mut feed = FeedViewState::new();
        feed.replace_all(vec![sample_fact(1, Category::Science)]);
        feed.prepend(sample_fact(2, Category::News));
        assert_eq!(feed.facts[0].id, 2);
        assert_eq!(feed.facts.len(), 2);
    }

    #[test]
    fn test_replace_by_id_swaps_matching_record() {
        let mut feed = FeedViewState::new();
        feed.replace_all(vec![
            sample_fact(1, Category::Science),
            sample_fact(2, Category::News),
        ]);
        let mut updated = sample_fact(2, Category::News);
        updated.votes_interesting = 4;
        feed.replace_by_id(updated);
        assert_eq!(feed.facts[1].votes_interesting, 4);
        assert_eq!(feed.facts[0].votes_interesting, 0);
    }

    #[test]
    fn test_replace_by_id_without_match_is_noop() {
        let mut feed = FeedViewState::new();
        feed.replace_all(vec![sample_fact(1, Category::Science)]);
        feed.replace_by_id(sample_fact(99, Category::News));
        assert_eq!(feed.facts.len(), 1);
        assert_eq!(feed.facts[0].id, 1);
    }

    #[test]
    fn test_vote_reconciles_to_store_row() {
        // Displayed count follows the store's returned row, not a local
        // increment: 3 becomes 4 because the row says so.
        let mut app = App::new(test_config());
        let seq = app.begin_fetch();
        let mut fact = sample_fact(5, Category::Finance);
        fact.votes_interesting = 3;
        app.apply_facts_loaded(seq, Ok(vec![fact]));

        let mut from_store = sample_fact(5, Category::Finance);
        from_store.votes_interesting = 4;
        app.apply_vote(5, Ok(from_store));

        assert_eq!(app.feed.facts[0].vote_count(VoteKind::Interesting), 4);
    }

    #[test]
    fn test_failed_vote_changes_nothing() {
        let mut app = App::new(test_config());
        let seq = app.begin_fetch();
        let mut fact = sample_fact(5, Category::Finance);
        fact.votes_interesting = 3;
        app.apply_facts_loaded(seq, Ok(vec![fact]));
        let notifications_before = app.notifications.len();

        app.apply_vote(5, Err("permission denied".to_string()));

        assert_eq!(app.feed.facts[0].votes_interesting, 3);
        assert_eq!(app.notifications.len(), notifications_before);
    }

    #[test]
    fn test_selection_navigation_wraps() {
        let mut feed = FeedViewState::new();
        feed.replace_all(vec![
            sample_fact(1, Category::Science),
            sample_fact(2, Category::News),
        ]);
        assert_eq!(feed.selected, Some(1));
        feed.select_next();
        assert_eq!(feed.selected, Some(2));
        feed.select_next();
        assert_eq!(feed.selected, Some(1));
        feed.select_previous();
        assert_eq!(feed.selected, Some(2));
    }

    #[test]
    fn test_selection_survives_refresh_when_row_remains() {
        let mut feed = FeedViewState::new();
        feed.replace_all(vec![
            sample_fact(1, Category::Science),
            sample_fact(2, Category::News),
        ]);
        feed.select_next();
        assert_eq!(feed.selected, Some(2));
        feed.replace_all(vec![sample_fact(2, Category::News)]);
        assert_eq!(feed.selected, Some(2));
        feed.replace_all(vec![sample_fact(3, Category::Health)]);
        assert_eq!(feed.selected, Some(3));
    }

    // ========================================================================
    // Submission lifecycle
    // ========================================================================

    #[test]
    fn test_take_submission_clears_and_hides_form() {
        let mut app = App::new(test_config());
        app.open_form();
        app.form
            .as_mut()
            .unwrap()
            .text
            .insert_str("Cats sleep two thirds of their lives.");

        let draft = app.take_submission().unwrap();
        assert_eq!(draft.text, "Cats sleep two thirds of their lives.");
        // Form is gone, fields with it; the next open starts clean.
        assert!(app.form.is_none());
        app.open_form();
        assert!(app.form.as_ref().unwrap().text.lines().join("").is_empty());
    }

    #[test]
    fn test_failed_insert_changes_nothing_visible() {
        let mut app = App::new(test_config());
        let notifications_before = app.notifications.len();
        app.apply_fact_inserted(Err("row-level security".to_string()));
        assert!(app.feed.facts.is_empty());
        assert_eq!(app.notifications.len(), notifications_before);
    }

    #[test]
    fn test_successful_insert_prepends_store_row() {
        let mut app = App::new(test_config());
        let seq = app.begin_fetch();
        app.apply_facts_loaded(seq, Ok(vec![sample_fact(1, Category::Science)]));

        app.apply_fact_inserted(Ok(sample_fact(2, Category::News)));
        assert_eq!(app.feed.facts[0].id, 2);
    }

    #[test]
    fn test_form_source_is_prefilled() {
        let form = FormState::new();
        assert_eq!(form.source.lines().join(""), SOURCE_PREFILL);
    }

    #[test]
    fn test_cycle_category_passes_through_placeholder() {
        let mut form = FormState::new();
        assert_eq!(form.category, None);
        form.cycle_category(true);
        assert_eq!(form.category, Some(Category::ALL[0]));
        // All the way around: 8 categories then back to the placeholder.
        for _ in 0..Category::ALL.len() {
            form.cycle_category(true);
        }
        assert_eq!(form.category, None);
        form.cycle_category(false);
        assert_eq!(form.category, Some(Category::News));
    }

    #[test]
    fn test_form_focus_cycles_all_fields() {
        let mut form = FormState::new();
        let start = form.focus;
        form.focus_next();
        form.focus_next();
        form.focus_next();
        assert_eq!(form.focus, start);
    }
}

// ============================================================================
// PROPERTY-BASED TESTS
// ============================================================================
