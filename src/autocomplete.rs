//! Autocomplete State Machine
//!
//! Browser-free core of the suggestion search control. The component in
//! `components::autocomplete_input` owns one [`SearchState`] and feeds it
//! keystrokes, timer ticks and lookup results.
//!
//! Every keystroke, selection and clear bumps a generation counter. Timer
//! callbacks and lookup results carry the generation they were started
//! with and are ignored once it is stale, so only the latest query can
//! ever reach the suggestion list.

use std::fmt::Display;

use crate::models::User;

/// Minimum trimmed query length before a lookup is issued
pub const MIN_QUERY_LEN: usize = 2;

/// Quiet period after the last keystroke before looking up
pub const DEBOUNCE_MS: u32 = 300;

/// A record that can be offered as an autocomplete candidate
pub trait Suggestion: Clone + 'static {
    /// Stable list key
    fn key(&self) -> String;

    /// Named field lookup, used for the caller-chosen label field
    fn field(&self, name: &str) -> Option<String>;

    /// Secondary lines shown under the label
    fn details(&self) -> Vec<String> {
        Vec::new()
    }

    /// Visible label for `display_field`, empty when the field is missing
    fn label(&self, display_field: &str) -> String {
        self.field(display_field).unwrap_or_default()
    }
}

impl Suggestion for User {
    fn key(&self) -> String {
        self.id.to_string()
    }

    fn field(&self, name: &str) -> Option<String> {
        match name {
            "id" => Some(self.id.to_string()),
            "name" => Some(self.name.clone()),
            "email" => self.email.clone(),
            "phone" => self.phone.clone(),
            "address" => self.address.clone(),
            _ => None,
        }
    }

    fn details(&self) -> Vec<String> {
        [&self.phone, &self.address]
            .into_iter()
            .flatten()
            .filter(|s| !s.is_empty())
            .cloned()
            .collect()
    }
}

/// Keys the control reacts to while the panel is open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    Down,
    Up,
    Enter,
    Escape,
}

impl NavKey {
    /// Map a `KeyboardEvent.key` value
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowDown" => Some(Self::Down),
            "ArrowUp" => Some(Self::Up),
            "Enter" => Some(Self::Enter),
            "Escape" => Some(Self::Escape),
            _ => None,
        }
    }
}

/// What the component has to do after a key press
#[derive(Debug, Clone, PartialEq)]
pub enum KeyOutcome<T> {
    /// Panel closed or key irrelevant; let the browser handle it
    Ignored,
    /// Highlight moved; suppress the default action
    Moved,
    /// Enter with nothing highlighted
    Nothing,
    /// Enter on a highlighted suggestion
    Select(T),
    /// Escape: panel closed, input should lose focus
    Dismissed,
}

/// Result of feeding a keystroke
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputChange {
    /// A committed selection was revoked by this keystroke
    pub revoked_selection: bool,
    /// Generation the debounce timer must present when it fires
    pub generation: u64,
}

/// Search state owned by one autocomplete control
#[derive(Debug, Clone, PartialEq)]
pub struct SearchState<T> {
    query: String,
    open: bool,
    suggestions: Vec<T>,
    highlighted: Option<usize>,
    loading: bool,
    has_selection: bool,
    generation: u64,
}

impl<T> Default for SearchState<T> {
    fn default() -> Self {
        Self {
            query: String::new(),
            open: false,
            suggestions: Vec::new(),
            highlighted: None,
            loading: false,
            has_selection: false,
            generation: 0,
        }
    }
}

impl<T: Clone> SearchState<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn is_open(&self) -> bool {
        self.open && !self.suggestions.is_empty()
    }

    pub fn suggestions(&self) -> &[T] {
        &self.suggestions
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn has_selection(&self) -> bool {
        self.has_selection
    }

    /// A keystroke changed the text to `value`
    pub fn input(&mut self, value: &str) -> InputChange {
        let revoked_selection = std::mem::take(&mut self.has_selection);
        self.query = value.to_string();
        self.highlighted = None;
        self.generation += 1;
        InputChange {
            revoked_selection,
            generation: self.generation,
        }
    }

    /// The debounce timer for `generation` fired.
    ///
    /// Returns the trimmed query to look up, or `None` when no lookup
    /// should happen (stale timer, query too short, selection committed).
    pub fn fire(&mut self, generation: u64) -> Option<String> {
        if generation != self.generation {
            return None;
        }
        let query = self.query.trim();
        if query.chars().count() < MIN_QUERY_LEN || self.has_selection {
            self.reset_panel();
            self.loading = false;
            return None;
        }
        self.loading = true;
        Some(query.to_string())
    }

    /// A lookup started by `generation` completed.
    ///
    /// Returns `false` when the result was superseded and discarded.
    pub fn resolve<E: Display>(&mut self, generation: u64, result: Result<Vec<T>, E>) -> bool {
        if generation != self.generation {
            log::debug!("dropping superseded lookup result (generation {})", generation);
            return false;
        }
        self.loading = false;
        self.highlighted = None;
        match result {
            Ok(found) => {
                self.open = !found.is_empty();
                self.suggestions = found;
            }
            Err(e) => {
                log::warn!("suggestion lookup failed: {}", e);
                self.reset_panel();
            }
        }
        true
    }

    /// Keyboard navigation; only active while the panel shows suggestions
    pub fn key(&mut self, key: NavKey) -> KeyOutcome<T> {
        if !self.is_open() {
            return KeyOutcome::Ignored;
        }
        let len = self.suggestions.len();
        match key {
            NavKey::Down => {
                self.highlighted = Some(match self.highlighted {
                    Some(i) if i + 1 < len => i + 1,
                    _ => 0,
                });
                KeyOutcome::Moved
            }
            NavKey::Up => {
                self.highlighted = Some(match self.highlighted {
                    Some(i) if i > 0 => i - 1,
                    _ => len - 1,
                });
                KeyOutcome::Moved
            }
            NavKey::Enter => match self.highlighted.and_then(|i| self.suggestions.get(i)).cloned() {
                Some(choice) => KeyOutcome::Select(choice),
                None => KeyOutcome::Nothing,
            },
            NavKey::Escape => {
                self.open = false;
                self.highlighted = None;
                KeyOutcome::Dismissed
            }
        }
    }

    /// Pointer moved over a suggestion row
    pub fn hover(&mut self, index: usize) {
        if index < self.suggestions.len() {
            self.highlighted = Some(index);
        }
    }

    /// Commit `label` as the visible text of a chosen suggestion
    pub fn commit(&mut self, label: &str) {
        self.query = label.to_string();
        self.has_selection = true;
        self.loading = false;
        self.generation += 1;
        self.reset_panel();
    }

    /// Explicit clear. Returns whether a selection was revoked.
    pub fn clear(&mut self) -> bool {
        let had_selection = std::mem::take(&mut self.has_selection);
        self.query.clear();
        self.loading = false;
        self.generation += 1;
        self.reset_panel();
        had_selection
    }

    /// Input regained focus; reopen earlier results unless committed
    pub fn focus(&mut self) {
        if !self.suggestions.is_empty() && !self.has_selection {
            self.open = true;
        }
    }

    /// Pointer pressed outside both the input and the panel
    pub fn click_outside(&mut self) {
        self.open = false;
        self.highlighted = None;
    }

    /// Component teardown; anything still pending becomes stale
    pub fn cancel(&mut self) {
        self.generation += 1;
        self.loading = false;
    }

    fn reset_panel(&mut self) {
        self.open = false;
        self.suggestions.clear();
        self.highlighted = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: i64, name: &str) -> User {
        User {
            id,
            name: name.to_string(),
            phone: Some(format!("55500{}", id)),
            ..Default::default()
        }
    }

    fn abc() -> Vec<User> {
        vec![user(1, "Ada"), user(2, "Ben"), user(3, "Cleo")]
    }

    fn open_with(list: Vec<User>) -> SearchState<User> {
        let mut state = SearchState::new();
        let change = state.input("ad");
        assert_eq!(state.fire(change.generation), Some("ad".to_string()));
        assert!(state.resolve::<String>(change.generation, Ok(list)));
        state
    }

    #[test]
    fn test_short_queries_never_look_up() {
        for text in ["", "a", " a ", "   ", "é"] {
            let mut state = open_with(abc());
            let change = state.input(text);
            assert_eq!(state.fire(change.generation), None, "query {:?}", text);
            assert!(!state.is_open());
            assert!(state.suggestions().is_empty());
            assert!(!state.is_loading());
        }
    }

    #[test]
    fn test_query_is_trimmed() {
        let mut state: SearchState<User> = SearchState::new();
        let change = state.input("  jo  ");
        assert_eq!(state.fire(change.generation), Some("jo".to_string()));
        assert!(state.is_loading());
        assert_eq!(state.query(), "  jo  ");
    }

    #[test]
    fn test_rapid_typing_issues_one_lookup() {
        let mut state: SearchState<User> = SearchState::new();
        let timers: Vec<u64> = ["j", "jo", "joh", "john"]
            .iter()
            .map(|text| state.input(text).generation)
            .collect();

        let lookups: Vec<String> = timers.iter().filter_map(|g| state.fire(*g)).collect();
        assert_eq!(lookups, vec!["john".to_string()]);
    }

    #[test]
    fn test_superseded_result_is_discarded() {
        let mut state: SearchState<User> = SearchState::new();
        let first = state.input("ad").generation;
        state.fire(first);
        let second = state.input("ada").generation;
        state.fire(second);

        assert!(!state.resolve::<String>(first, Ok(vec![user(9, "Stale")])));
        assert!(state.suggestions().is_empty());
        assert!(state.resolve::<String>(second, Ok(vec![user(1, "Ada")])));
        assert_eq!(state.suggestions()[0].name, "Ada");
    }

    #[test]
    fn test_panel_opens_only_with_results() {
        let state = open_with(Vec::new());
        assert!(!state.is_open());
        let state = open_with(abc());
        assert!(state.is_open());
        assert!(!state.is_loading());
    }

    #[test]
    fn test_lookup_failure_degrades_to_empty() {
        let mut state = open_with(abc());
        let change = state.input("zz");
        state.fire(change.generation);
        assert!(state.resolve(change.generation, Err("HTTP 500")));
        assert!(!state.is_open());
        assert!(state.suggestions().is_empty());
        assert!(!state.is_loading());
    }

    #[test]
    fn test_arrow_keys_wrap() {
        let mut state = open_with(abc());
        assert_eq!(state.highlighted(), None);
        for _ in 0..3 {
            assert_eq!(state.key(NavKey::Down), KeyOutcome::Moved);
        }
        assert_eq!(state.highlighted(), Some(2));
        state.key(NavKey::Down);
        assert_eq!(state.highlighted(), Some(0));
        state.key(NavKey::Up);
        assert_eq!(state.highlighted(), Some(2));
    }

    #[test]
    fn test_three_downs_from_first_return_to_first() {
        let mut state = open_with(abc());
        state.key(NavKey::Down);
        assert_eq!(state.highlighted(), Some(0));
        for _ in 0..3 {
            state.key(NavKey::Down);
        }
        assert_eq!(state.highlighted(), Some(0));
    }

    #[test]
    fn test_enter_selects_highlighted_only() {
        let mut state = open_with(abc());
        assert_eq!(state.key(NavKey::Enter), KeyOutcome::Nothing);
        state.key(NavKey::Down);
        state.key(NavKey::Down);
        assert_eq!(state.key(NavKey::Enter), KeyOutcome::Select(user(2, "Ben")));
    }

    #[test]
    fn test_keys_ignored_when_closed() {
        let mut state: SearchState<User> = SearchState::new();
        assert_eq!(state.key(NavKey::Down), KeyOutcome::Ignored);
        assert_eq!(state.highlighted(), None);
    }

    #[test]
    fn test_escape_closes_but_keeps_text() {
        let mut state = open_with(abc());
        state.key(NavKey::Down);
        assert_eq!(state.key(NavKey::Escape), KeyOutcome::Dismissed);
        assert!(!state.is_open());
        assert_eq!(state.query(), "ad");
        assert_eq!(state.highlighted(), None);
    }

    #[test]
    fn test_selection_revoked_once_by_next_keystroke() {
        let mut state = open_with(abc());
        state.commit("Ada");
        assert!(state.has_selection());
        assert!(!state.is_open());
        assert!(state.suggestions().is_empty());
        assert_eq!(state.query(), "Ada");

        let revocations = ["Adam", "Adams"]
            .iter()
            .filter(|text| state.input(text).revoked_selection)
            .count();
        assert_eq!(revocations, 1);
        assert!(!state.has_selection());
    }

    #[test]
    fn test_commit_invalidates_pending_timer() {
        let mut state = open_with(abc());
        let pending = state.input("Ad").generation;
        state.commit("Ada");
        assert_eq!(state.fire(pending), None);
        assert!(!state.is_open());
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut state = open_with(abc());
        state.commit("Ada");
        assert!(state.clear());
        assert_eq!(state.query(), "");
        assert!(!state.has_selection());
        assert!(!state.clear());
    }

    #[test]
    fn test_click_outside_keeps_selection() {
        let mut state = open_with(abc());
        state.key(NavKey::Down);
        state.click_outside();
        assert!(!state.is_open());
        assert_eq!(state.highlighted(), None);
        assert_eq!(state.suggestions().len(), 3);

        state.focus();
        assert!(state.is_open());
    }

    #[test]
    fn test_cancel_drops_in_flight_result() {
        let mut state: SearchState<User> = SearchState::new();
        let g = state.input("ada").generation;
        state.fire(g);
        state.cancel();
        assert!(!state.resolve::<String>(g, Ok(abc())));
        assert!(state.suggestions().is_empty());
    }

    #[test]
    fn test_user_suggestion_fields() {
        let mut u = user(4, "Dee");
        u.address = Some("12 Hill Rd".to_string());
        assert_eq!(u.label("name"), "Dee");
        assert_eq!(u.label("email"), "");
        assert_eq!(u.details(), vec!["555004".to_string(), "12 Hill Rd".to_string()]);
        assert_eq!(NavKey::from_key("ArrowUp"), Some(NavKey::Up));
        assert_eq!(NavKey::from_key("Tab"), None);
    }

    #[test]
    fn test_same_name_users_keep_distinct_keys() {
        let twins = vec![user(7, "Ada"), user(8, "Ada")];
        let keys: Vec<String> = twins.iter().map(Suggestion::key).collect();
        assert_eq!(keys, vec!["7".to_string(), "8".to_string()]);
        assert_eq!(twins[0].label("name"), twins[1].label("name"));
    }
}
