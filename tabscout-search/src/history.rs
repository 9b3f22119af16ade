//! Bounded most-recent-first lists.
//!
//! Used for the query history and the recent-tabs ordering. Touching an
//! item moves it to the front (removing any earlier equal entry) and the
//! list is truncated to its capacity.

/// A bounded, deduplicated, most-recent-first list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentList<T> {
    items: Vec<T>,
    capacity: usize,
}

impl<T> RecentList<T> {
    /// Create an empty list holding at most `capacity` items.
    pub fn new(capacity: usize) -> Self {
        Self {
            items: Vec::new(),
            capacity,
        }
    }

    /// Wrap persisted items, truncating to `capacity`.
    pub fn from_vec(mut items: Vec<T>, capacity: usize) -> Self {
        items.truncate(capacity);
        Self { items, capacity }
    }

    /// Move `item` to the front, dropping earlier entries for which
    /// `same(existing, &item)` holds.
    pub fn touch_by<F>(&mut self, item: T, same: F)
    where
        F: Fn(&T, &T) -> bool,
    {
        self.items.retain(|existing| !same(existing, &item));
        self.items.insert(0, item);
        self.items.truncate(self.capacity);
    }

    /// Remove every entry matching `pred`. Returns whether anything was removed.
    pub fn remove_by<F>(&mut self, pred: F) -> bool
    where
        F: Fn(&T) -> bool,
    {
        let before = self.items.len();
        self.items.retain(|existing| !pred(existing));
        self.items.len() != before
    }

    /// Items, most recent first.
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Consume the list, returning its items most recent first.
    pub fn into_vec(self) -> Vec<T> {
        self.items
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T: PartialEq> RecentList<T> {
    /// Move `item` to the front, dropping an earlier equal entry.
    pub fn touch(&mut self, item: T) {
        self.touch_by(item, |a, b| a == b);
    }

    /// Position of `item`, if present.
    pub fn position(&self, item: &T) -> Option<usize> {
        self.items.iter().position(|existing| existing == item)
    }
}

impl RecentList<String> {
    /// Record a query, replacing an earlier entry that differs only in case.
    pub fn touch_query(&mut self, query: &str) {
        self.touch_by(query.to_owned(), |a, b| a.to_lowercase() == b.to_lowercase());
    }
}

/// History entries containing `query` (case-insensitive), most recent first,
/// with case-insensitive duplicates removed.
pub fn matching_queries(history: &[String], query: &str) -> Vec<String> {
    let needle = query.to_lowercase();
    let mut seen = std::collections::HashSet::new();
    history
        .iter()
        .filter(|item| {
            let lower = item.to_lowercase();
            lower.contains(&needle) && seen.insert(lower)
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touch_moves_to_front_and_dedups() {
        let mut list = RecentList::new(10);
        list.touch(1);
        list.touch(2);
        list.touch(3);
        list.touch(1);
        assert_eq!(list.as_slice(), &[1, 3, 2]);
    }

    #[test]
    fn capacity_is_enforced() {
        let mut list = RecentList::new(3);
        for id in 0..10 {
            list.touch(id);
        }
        assert_eq!(list.as_slice(), &[9, 8, 7]);
    }

    #[test]
    fn from_vec_truncates() {
        let list = RecentList::from_vec(vec![1, 2, 3, 4], 2);
        assert_eq!(list.into_vec(), vec![1, 2]);
    }

    #[test]
    fn remove_by_drops_matches() {
        let mut list = RecentList::from_vec(vec![4, 5, 6], 10);
        assert!(list.remove_by(|&id| id == 5));
        assert!(!list.remove_by(|&id| id == 5));
        assert_eq!(list.as_slice(), &[4, 6]);
        assert_eq!(list.position(&6), Some(1));
    }

    #[test]
    fn query_touch_is_case_insensitive() {
        let mut list = RecentList::new(50);
        list.touch_query("Rust async");
        list.touch_query("tokio");
        list.touch_query("rust ASYNC");
        assert_eq!(list.as_slice(), &["rust ASYNC".to_string(), "tokio".to_string()]);
    }

    #[test]
    fn matching_queries_filters_and_dedups() {
        let history = vec![
            "Rust book".to_string(),
            "python".to_string(),
            "rust BOOK".to_string(),
            "trust me".to_string(),
        ];
        let matches = matching_queries(&history, "RUST");
        assert_eq!(matches, vec!["Rust book".to_string(), "trust me".to_string()]);
    }

    #[test]
    fn empty_list_reports_empty() {
        let list: RecentList<u64> = RecentList::new(5);
        assert!(list.is_empty());
        assert_eq!(list.len(), 0);
    }
}
