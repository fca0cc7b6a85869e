// Filter/tab controller - which bucket is visible, and which page of each
//
// ViewState is plain data owned by the caller. Methods that move between
// pages take the current total page count so the invariant
// 1 <= page <= total_pages holds after every call.

use super::paginate::clamp_page;
use super::{BucketKey, ListingError};
use std::collections::BTreeMap;

/// What happens to a bucket's remembered page when its tab is selected
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TabPolicy {
    /// Every bucket keeps its own page across tab switches (default)
    #[default]
    Preserve,
    /// The newly selected bucket starts over at page 1
    Reset,
}

impl TabPolicy {
    /// Parse policy string from config
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "reset" => Self::Reset,
            "preserve" => Self::Preserve,
            _ => Self::Preserve, // Default to preserve for unknown values
        }
    }

    /// Convert to string for TOML serialization
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Preserve => "preserve",
            Self::Reset => "reset",
        }
    }
}

/// Selection and pagination state for one board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState<K: BucketKey> {
    active: K,
    pages: BTreeMap<K, usize>,
    query: String,
}

impl<K: BucketKey> Default for ViewState<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: BucketKey> ViewState<K> {
    /// First tab active, every bucket on page 1, no search
    pub fn new() -> Self {
        Self {
            active: K::default(),
            pages: K::ALL.iter().map(|k| (*k, 1)).collect(),
            query: String::new(),
        }
    }

    pub fn active(&self) -> K {
        self.active
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Remembered page of a bucket (1 if never visited)
    pub fn page(&self, key: K) -> usize {
        self.pages.get(&key).copied().unwrap_or(1)
    }

    pub fn active_page(&self) -> usize {
        self.page(self.active)
    }

    /// Select a bucket. Returns true if the active bucket changed.
    pub fn select(&mut self, key: K, policy: TabPolicy) -> bool {
        if key == self.active {
            return false;
        }
        self.active = key;
        if policy == TabPolicy::Reset {
            self.pages.insert(key, 1);
        }
        true
    }

    /// Select a bucket by name, failing for names outside the enumeration
    pub fn select_str(&mut self, name: &str, policy: TabPolicy) -> Result<K, ListingError> {
        let key = K::parse(name).ok_or_else(|| ListingError::InvalidFilterKind {
            kind: name.to_string(),
            expected: K::names(),
        })?;
        self.select(key, policy);
        Ok(key)
    }

    /// Select the next tab, wrapping around
    pub fn next_bucket(&mut self, policy: TabPolicy) {
        let all = K::ALL;
        let next = all[(self.active.ordinal() + 1) % all.len()];
        self.select(next, policy);
    }

    /// Select the previous tab, wrapping around
    pub fn prev_bucket(&mut self, policy: TabPolicy) {
        let all = K::ALL;
        let prev = all[(self.active.ordinal() + all.len() - 1) % all.len()];
        self.select(prev, policy);
    }

    /// Set a bucket's page, clamped into `[1, total_pages]`. Returns the
    /// page actually stored.
    pub fn set_page(&mut self, key: K, requested: usize, total_pages: usize) -> usize {
        let page = clamp_page(requested, total_pages);
        self.pages.insert(key, page);
        page
    }

    pub fn next_page(&mut self, total_pages: usize) -> usize {
        let current = self.active_page();
        self.set_page(self.active, current.saturating_add(1), total_pages)
    }

    pub fn prev_page(&mut self, total_pages: usize) -> usize {
        let current = self.active_page();
        self.set_page(self.active, current.saturating_sub(1), total_pages)
    }

    pub fn first_page(&mut self) -> usize {
        self.set_page(self.active, 1, 1)
    }

    pub fn last_page(&mut self, total_pages: usize) -> usize {
        self.set_page(self.active, total_pages, total_pages)
    }

    /// Change the search text. A different query sends every bucket back to
    /// page 1; the same query is a no-op. Returns true if it changed.
    pub fn set_query(&mut self, query: &str) -> bool {
        let query = query.trim();
        if query == self.query {
            return false;
        }
        self.query = query.to_string();
        for page in self.pages.values_mut() {
            *page = 1;
        }
        true
    }

    /// Clamp a bucket's remembered page after its length changed
    pub(super) fn clamp_bucket(&mut self, key: K, total_pages: usize) {
        let page = self.page(key);
        self.pages.insert(key, clamp_page(page, total_pages));
    }
}
