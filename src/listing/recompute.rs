// Recompute - apply a delivered collection to a ViewState, and build the
// page the renderer draws

use super::paginate::{paginate, total_pages};
use super::partition::partition;
use super::{BucketKey, Listing, ViewState};
use std::num::NonZeroUsize;

/// Records matching the search query (all of them for an empty query)
pub fn visible<'a, R: Listing>(records: &'a [R], query: &str) -> impl Iterator<Item = &'a R> {
    let needle = query.trim().to_lowercase();
    records
        .iter()
        .filter(move |r| needle.is_empty() || r.matches(&needle))
}

/// Recompute state for a freshly delivered collection.
///
/// Keeps the active bucket and query, and clamps every remembered page into
/// its bucket's new bounds. Redelivering the same collection returns a state
/// equal to `prev`.
pub fn recompute<R: Listing>(
    records: &[R],
    page_size: NonZeroUsize,
    prev: &ViewState<R::Key>,
) -> ViewState<R::Key> {
    let buckets = partition(visible(records, prev.query()), R::bucket_key);

    let mut next = prev.clone();
    for key in <R::Key as BucketKey>::ALL {
        next.clamp_bucket(*key, total_pages(buckets.len(*key), page_size));
    }
    next
}

/// Everything needed to draw the active bucket
#[derive(Debug, Clone, PartialEq)]
pub struct PageView<'a, R: Listing> {
    pub active: R::Key,
    pub items: Vec<&'a R>,
    pub page: usize,
    pub total_pages: usize,
    /// Records in the active bucket (after search)
    pub bucket_len: usize,
    /// 1-based range shown, None when the bucket is empty
    pub item_range: Option<(usize, usize)>,
    /// Per-bucket counts for tab badges
    pub counts: Vec<(R::Key, usize)>,
}

/// Build the active bucket's current page.
///
/// The stored page is clamped again here so a stale state can never index
/// past the end.
pub fn view<'a, R: Listing>(
    records: &'a [R],
    page_size: NonZeroUsize,
    state: &ViewState<R::Key>,
) -> PageView<'a, R> {
    let buckets = partition(visible(records, state.query()), R::bucket_key);
    let active = state.active();
    let page = paginate(buckets.get(active), page_size, state.active_page());

    PageView {
        active,
        items: page.items.to_vec(),
        page: page.number,
        total_pages: page.total_pages,
        bucket_len: page.total_items,
        item_range: page.item_range(),
        counts: buckets.counts(),
    }
}
