//! Notification Book
//!
//! The local notification list, most recent first. Every mutation is
//! written through to a [`NotificationCache`] so the list survives a
//! reload. Read-state changes return the [`SyncRequest`] the caller should
//! send to the server; local state is never rolled back.

use crate::models::Notification;

/// Durable storage for the notification list
pub trait NotificationCache {
    fn load(&self) -> Vec<Notification>;
    fn store(&self, items: &[Notification]);
}

/// Outbound update implied by a local read-state change
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncRequest {
    /// `PATCH /notifications/{id}/read`
    MarkRead(String),
    /// `PATCH /notifications/mark-all-read`
    MarkAllRead,
}

#[derive(Debug, Clone)]
pub struct NotificationBook<C> {
    items: Vec<Notification>,
    cache: C,
}

impl<C: NotificationCache> NotificationBook<C> {
    /// Open a book over `cache`, starting from whatever it holds
    pub fn open(cache: C) -> Self {
        let mut items = cache.load();
        dedup_by_id(&mut items);
        Self { items, cache }
    }

    pub fn items(&self) -> &[Notification] {
        &self.items
    }

    pub fn cache(&self) -> &C {
        &self.cache
    }

    pub fn unread_count(&self) -> usize {
        self.items.iter().filter(|n| !n.is_read).count()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.items.iter().any(|n| n.id == id)
    }

    /// Ingest one notification at the front.
    ///
    /// Returns `false` (and changes nothing) if the id is already held.
    pub fn add(&mut self, notification: Notification) -> bool {
        if self.contains(&notification.id) {
            return false;
        }
        self.items.insert(0, notification);
        self.persist();
        true
    }

    /// Merge the server's unread list. Items already held win; the result
    /// is re-sorted newest first. Returns how many were added.
    pub fn merge(&mut self, incoming: Vec<Notification>) -> usize {
        let before = self.items.len();
        for notification in incoming {
            if !self.contains(&notification.id) {
                self.items.push(notification);
            }
        }
        let added = self.items.len() - before;
        if added > 0 {
            self.items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            self.persist();
        }
        added
    }

    pub fn mark_read(&mut self, id: &str) -> Option<SyncRequest> {
        let item = self.items.iter_mut().find(|n| n.id == id)?;
        item.is_read = true;
        self.persist();
        Some(SyncRequest::MarkRead(id.to_string()))
    }

    /// Mark everything read; always a single bulk request
    pub fn mark_all_read(&mut self) -> SyncRequest {
        for item in &mut self.items {
            item.is_read = true;
        }
        self.persist();
        SyncRequest::MarkAllRead
    }

    /// Local-only removal
    pub fn dismiss(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|n| n.id != id);
        let removed = self.items.len() != before;
        if removed {
            self.persist();
        }
        removed
    }

    fn persist(&self) {
        self.cache.store(&self.items);
    }
}

fn dedup_by_id(items: &mut Vec<Notification>) {
    let mut seen = std::collections::HashSet::new();
    items.retain(|n| seen.insert(n.id.clone()));
}

/// In-memory cache for tests
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct MemoryCache {
    pub items: std::rc::Rc<std::cell::RefCell<Vec<Notification>>>,
}

#[cfg(test)]
impl NotificationCache for MemoryCache {
    fn load(&self) -> Vec<Notification> {
        self.items.borrow().clone()
    }

    fn store(&self, items: &[Notification]) {
        *self.items.borrow_mut() = items.to_vec();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NotificationKind;
    use chrono::{TimeZone, Utc};

    fn note(id: &str, minute: u32, is_read: bool) -> Notification {
        Notification {
            id: id.to_string(),
            kind: NotificationKind::Info,
            title: format!("title {}", id),
            message: format!("message {}", id),
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, 9, minute, 0).unwrap(),
            is_read,
        }
    }

    fn book_with(items: Vec<Notification>) -> (NotificationBook<MemoryCache>, MemoryCache) {
        let cache = MemoryCache::default();
        cache.store(&items);
        (NotificationBook::open(cache.clone()), cache)
    }

    #[test]
    fn test_open_reads_cache() {
        let (book, _) = book_with(vec![note("a", 2, false), note("b", 1, true)]);
        assert_eq!(book.items().len(), 2);
        assert_eq!(book.unread_count(), 1);
    }

    #[test]
    fn test_add_is_idempotent_and_keeps_first() {
        let (mut book, cache) = book_with(Vec::new());
        assert!(book.add(note("n1", 1, false)));

        let mut replacement = note("n1", 5, true);
        replacement.message = "changed".to_string();
        assert!(!book.add(replacement));

        assert_eq!(book.items().len(), 1);
        assert_eq!(book.items()[0].message, "message n1");
        assert!(!book.items()[0].is_read);
        assert_eq!(cache.load().len(), 1);
    }

    #[test]
    fn test_add_puts_newest_first() {
        let (mut book, _) = book_with(vec![note("old", 1, false)]);
        book.add(note("new", 2, false));
        assert_eq!(book.items()[0].id, "new");
    }

    #[test]
    fn test_merge_does_not_overwrite_stored() {
        let (mut book, cache) = book_with(vec![note("a", 3, true)]);
        let added = book.merge(vec![note("a", 3, false), note("b", 4, false), note("c", 1, false)]);
        assert_eq!(added, 2);

        let ids: Vec<&str> = book.items().iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
        assert!(book.items().iter().find(|n| n.id == "a").unwrap().is_read);
        assert_eq!(cache.load().len(), 3);
    }

    #[test]
    fn test_mark_read() {
        let (mut book, cache) = book_with(vec![note("a", 1, false)]);
        assert_eq!(book.mark_read("a"), Some(SyncRequest::MarkRead("a".to_string())));
        assert!(cache.load()[0].is_read);
        assert_eq!(book.mark_read("missing"), None);
    }

    #[test]
    fn test_mark_all_read_single_request() {
        let (mut book, cache) = book_with(vec![note("a", 3, false), note("b", 2, true), note("c", 1, false)]);
        let requests = vec![book.mark_all_read()];

        assert_eq!(requests, vec![SyncRequest::MarkAllRead]);
        assert_eq!(book.unread_count(), 0);
        assert!(book.items().iter().all(|n| n.is_read));
        assert!(cache.load().iter().all(|n| n.is_read));
    }

    #[test]
    fn test_dismiss_removes_from_list_and_cache() {
        let (mut book, cache) = book_with(vec![note("n1", 2, false), note("n2", 1, false)]);
        assert!(book.dismiss("n1"));
        assert!(!book.contains("n1"));
        assert!(cache.load().iter().all(|n| n.id != "n1"));
        assert_eq!(cache.load().len(), 1);
        assert!(!book.dismiss("n1"));
    }

    #[test]
    fn test_open_drops_duplicate_cache_entries() {
        let (book, _) = book_with(vec![note("a", 2, false), note("a", 1, true)]);
        assert_eq!(book.items().len(), 1);
        assert!(!book.items()[0].is_read);
    }
}
