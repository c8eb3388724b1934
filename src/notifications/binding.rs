//! Session Binding
//!
//! Tracks which session the notification book belongs to. The login flow
//! writes the token and the user record as two separate storage writes,
//! so a switch between users arrives as two session changes in a row.
//! Every change that moves the book to another cache key or another token
//! starts a new fetch generation; an unread fetch that finishes under an
//! older generation is dropped instead of merged into the wrong book.

/// What a session change requires of the provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BindingChange {
    /// Reopen the book on the new cache key
    pub rebind: bool,
    /// Fetch the server's unread list for the new binding
    pub fetch_unread: bool,
}

/// Identifies one unread fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    key: String,
    generation: u64,
}

impl FetchTicket {
    /// Cache key the fetch was started for
    pub fn key(&self) -> &str {
        &self.key
    }
}

#[derive(Debug, Clone)]
pub struct SessionBinding {
    key: String,
    token: Option<String>,
    generation: u64,
}

impl SessionBinding {
    pub fn new(key: impl Into<String>, token: Option<String>) -> Self {
        Self {
            key: key.into(),
            token,
            generation: 0,
        }
    }

    pub fn change(&mut self, key: String, token: Option<String>) -> BindingChange {
        let rebind = key != self.key;
        let token_changed = token != self.token;
        if !rebind && !token_changed {
            return BindingChange::default();
        }

        // In-flight fetches belong to the old binding
        self.generation += 1;
        let fetch_unread = token.is_some();
        self.key = key;
        self.token = token;
        BindingChange { rebind, fetch_unread }
    }

    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.generation += 1;
        FetchTicket {
            key: self.key.clone(),
            generation: self.generation,
        }
    }

    /// Whether a finished fetch may still be merged
    pub fn accepts(&self, ticket: &FetchTicket) -> bool {
        ticket.generation == self.generation && ticket.key == self.key
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unchanged_session_keeps_fetch() {
        let mut binding = SessionBinding::new("notifications:1", Some("a".into()));
        let ticket = binding.begin_fetch();
        assert_eq!(binding.change("notifications:1".into(), Some("a".into())), BindingChange::default());
        assert!(binding.accepts(&ticket));
    }

    #[test]
    fn test_user_switch_token_then_user() {
        let mut binding = SessionBinding::new("notifications:1", Some("token-a".into()));

        // token written first: same cache key, new token
        let first = binding.change("notifications:1".into(), Some("token-b".into()));
        assert_eq!(first, BindingChange { rebind: false, fetch_unread: true });
        let early = binding.begin_fetch();

        // user written second: the book moves to the new user's cache
        let second = binding.change("notifications:2".into(), Some("token-b".into()));
        assert_eq!(second, BindingChange { rebind: true, fetch_unread: true });
        assert!(!binding.accepts(&early));

        let late = binding.begin_fetch();
        assert!(binding.accepts(&late));
        assert_eq!(late.key(), "notifications:2");
    }

    #[test]
    fn test_user_record_arriving_alone_refetches() {
        let mut binding = SessionBinding::new("notifications:anonymous", Some("t".into()));
        let change = binding.change("notifications:5".into(), Some("t".into()));
        assert!(change.rebind);
        assert!(change.fetch_unread);
    }

    #[test]
    fn test_logout_drops_in_flight_fetch() {
        let mut binding = SessionBinding::new("notifications:1", Some("t".into()));
        let ticket = binding.begin_fetch();
        let change = binding.change("notifications:anonymous".into(), None);
        assert_eq!(change, BindingChange { rebind: true, fetch_unread: false });
        assert!(!binding.accepts(&ticket));
    }

    #[test]
    fn test_newer_fetch_supersedes_older() {
        let mut binding = SessionBinding::new("notifications:1", Some("t".into()));
        let first = binding.begin_fetch();
        let second = binding.begin_fetch();
        assert!(!binding.accepts(&first));
        assert!(binding.accepts(&second));
    }
}
