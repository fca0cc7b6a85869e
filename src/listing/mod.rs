//! Listing core: partition records into status buckets, paginate each bucket,
//! and track which bucket is visible.
//!
//! Everything in here is synchronous and pure. The caller owns a
//! [`ViewState`] and hands it to [`recompute`] whenever the record source
//! delivers a new collection, then asks [`view`] for the page to draw.
//!
//! ```text
//! records ──▶ partition ──▶ Buckets ──▶ paginate ──▶ PageView
//!                              ▲
//!                  ViewState (active key, page per key, query)
//! ```

mod controller;
mod error;
mod paginate;
mod partition;
mod recompute;

#[cfg(test)]
mod tests;

pub use controller::{TabPolicy, ViewState};
pub use error::ListingError;
pub use paginate::{clamp_page, paginate, total_pages, Page};
pub use partition::{partition, Buckets};
pub use recompute::{recompute, view, visible, PageView};

use std::fmt;
use std::hash::Hash;

/// A closed enumeration of bucket keys (statuses, roles, categories).
///
/// `ALL` lists every key in tab order. `Default` must be the first tab.
pub trait BucketKey: Copy + Eq + Ord + Hash + Default + fmt::Debug + Send + Sync + 'static {
    /// Every key, in the order tabs are shown
    const ALL: &'static [Self];

    /// Wire name, e.g. `in_review`
    fn as_str(&self) -> &'static str;

    /// Human label for tabs
    fn label(&self) -> &'static str;

    /// Extra accepted spellings, already normalized
    fn aliases() -> &'static [(&'static str, Self)] {
        &[]
    }

    /// Parse a wire or user-supplied name. See [`normalize_key`].
    fn parse(name: &str) -> Option<Self> {
        let normalized = normalize_key(name);
        Self::ALL
            .iter()
            .copied()
            .find(|k| k.as_str() == normalized)
            .or_else(|| {
                Self::aliases()
                    .iter()
                    .find(|(alias, _)| *alias == normalized)
                    .map(|(_, k)| *k)
            })
    }

    /// Position of this key in `ALL`
    fn ordinal(&self) -> usize {
        Self::ALL.iter().position(|k| k == self).unwrap_or(0)
    }

    /// Wire names of every key, for error messages
    fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|k| k.as_str()).collect()
    }
}

/// A record that can be listed on a board.
pub trait Listing {
    type Key: BucketKey;

    /// Stable unique id
    fn id(&self) -> &str;

    /// The bucket this record belongs to
    fn bucket_key(&self) -> Self::Key;

    /// Whether the record matches a search query. `needle` is already
    /// trimmed and lowercased, and never empty.
    fn matches(&self, needle: &str) -> bool;
}

/// Normalize a key spelling: `In-Review`, `in review` and `inReview` all
/// become `in_review`.
pub fn normalize_key(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 2);
    let mut prev_lower = false;

    for ch in name.trim().chars() {
        match ch {
            '-' | ' ' | '_' => {
                if !out.ends_with('_') {
                    out.push('_');
                }
                prev_lower = false;
            }
            c if c.is_uppercase() => {
                if prev_lower {
                    out.push('_');
                }
                out.extend(c.to_lowercase());
                prev_lower = false;
            }
            c => {
                out.push(c);
                prev_lower = c.is_lowercase() || c.is_ascii_digit();
            }
        }
    }

    out
}

/// Case-insensitive substring match used by [`Listing::matches`] impls
pub fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}
