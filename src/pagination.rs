//! Marker-based pagination for Stash API listings.
//!
//! Listing endpoints return an envelope of the shape
//! `{limit, next_marker, entries}`. The marker is an opaque cursor: pass it
//! back verbatim to fetch the following page, stop when it comes back null
//! or the entries array is empty.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::client::StashClient;
use crate::error::Result;
use crate::traits::List;

/// One page of a marker-paginated listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkerPage<T> {
    /// Page size the server applied.
    pub limit: u32,
    /// Cursor for the next page; `None` on the final page.
    #[serde(default)]
    pub next_marker: Option<String>,
    /// The entries on this page.
    pub entries: Vec<T>,
}

impl<T> MarkerPage<T> {
    /// Whether a follow-up request could yield more entries.
    #[must_use]
    pub fn has_more(&self) -> bool {
        self.next_marker.is_some() && !self.entries.is_empty()
    }

    /// Returns true if this page has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of entries on this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns an iterator over the entries on this page.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.entries.iter()
    }
}

impl<T> IntoIterator for MarkerPage<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a MarkerPage<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Lazy cursor over a marker-paginated listing.
///
/// No request is issued until the first [`next`](MarkerCursor::next) call.
/// Pages are fetched one at a time and entries are yielded across page
/// boundaries; the cursor is finite and cannot be restarted.
///
/// # Example
///
/// ```ignore
/// use stashapi::{List, StoragePolicy};
///
/// let mut cursor = StoragePolicy::cursor(&client, &Default::default(), 100);
/// while let Some(policy) = cursor.next().await? {
///     println!("{}", policy.id);
/// }
/// ```
pub struct MarkerCursor<'a, T: List> {
    client: &'a StashClient,
    query: &'a T::Query,
    limit: u32,
    buffer: VecDeque<T>,
    next_marker: Option<String>,
    exhausted: bool,
}

impl<'a, T: List> MarkerCursor<'a, T> {
    pub(crate) fn new(client: &'a StashClient, query: &'a T::Query, limit: u32) -> Self {
        Self {
            client,
            query,
            limit,
            buffer: VecDeque::new(),
            next_marker: None,
            exhausted: false,
        }
    }

    /// Fetch the next entry, requesting the next page only when the
    /// buffered entries are spent.
    ///
    /// Returns `Ok(None)` once the listing ends.
    ///
    /// # Errors
    ///
    /// Returns an error if a page request fails; the cursor is then
    /// exhausted and further calls return `Ok(None)`.
    pub async fn next(&mut self) -> Result<Option<T>> {
        if let Some(entry) = self.buffer.pop_front() {
            return Ok(Some(entry));
        }
        if self.exhausted {
            return Ok(None);
        }

        let page = match T::list_page(self.client, self.query, self.next_marker.as_deref(), self.limit).await
        {
            Ok(page) => page,
            Err(e) => {
                self.exhausted = true;
                return Err(e);
            }
        };

        // A null marker or an empty page ends the listing
        if page.next_marker.is_none() || page.entries.is_empty() {
            self.exhausted = true;
        }
        self.next_marker = page.next_marker;
        self.buffer.extend(page.entries);

        Ok(self.buffer.pop_front())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_deserialize_null_marker() {
        let json = r#"{"limit": 1000, "next_marker": null, "entries": ["a", "b"]}"#;
        let page: MarkerPage<String> = serde_json::from_str(json).unwrap();
        assert_eq!(page.limit, 1000);
        assert!(page.next_marker.is_none());
        assert_eq!(page.entries, vec!["a", "b"]);
        assert!(!page.has_more());
    }

    #[test]
    fn test_envelope_deserialize_absent_marker() {
        let json = r#"{"limit": 100, "entries": []}"#;
        let page: MarkerPage<String> = serde_json::from_str(json).unwrap();
        assert!(page.next_marker.is_none());
        assert!(page.is_empty());
    }

    #[test]
    fn test_has_more_requires_marker_and_entries() {
        let page = MarkerPage {
            limit: 2,
            next_marker: Some("m1".to_string()),
            entries: vec![1, 2],
        };
        assert!(page.has_more());

        // A marker on an empty page does not promise more entries
        let page = MarkerPage::<i32> {
            limit: 2,
            next_marker: Some("m1".to_string()),
            entries: vec![],
        };
        assert!(!page.has_more());
    }

    #[test]
    fn test_page_iteration() {
        let page = MarkerPage {
            limit: 10,
            next_marker: None,
            entries: vec![1, 2, 3],
        };
        assert_eq!(page.len(), 3);
        assert_eq!(page.iter().sum::<i32>(), 6);
        assert_eq!(page.into_iter().collect::<Vec<_>>(), vec![1, 2, 3]);
    }
}
