//! List filtering
//!
//! Every searchable list in the app (task names, category task titles) goes
//! through [`filter`]: a case-insensitive substring match on the item's
//! display text that keeps the original order.

use serde::{Deserialize, Serialize};

/// Items that can be matched against a search query
pub trait Searchable {
    /// Text the query is matched against
    fn display_text(&self) -> &str;
}

impl Searchable for str {
    fn display_text(&self) -> &str {
        self
    }
}

impl Searchable for String {
    fn display_text(&self) -> &str {
        self
    }
}

impl Searchable for &str {
    fn display_text(&self) -> &str {
        self
    }
}

/// A search query as typed by the user
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchQuery(String);

impl SearchQuery {
    /// Create a query from user input
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Text as typed
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the query matches everything
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether `item` matches
    pub fn matches<T: Searchable + ?Sized>(&self, item: &T) -> bool {
        self.0.is_empty()
            || item
                .display_text()
                .to_lowercase()
                .contains(&self.0.to_lowercase())
    }
}

/// Items whose display text contains `query`, ignoring case, in original order.
///
/// An empty query returns every item.
pub fn filter<T: Searchable + Clone>(items: &[T], query: &str) -> Vec<T> {
    let query = SearchQuery::new(query);
    items
        .iter()
        .filter(|item| query.matches(*item))
        .cloned()
        .collect()
}
