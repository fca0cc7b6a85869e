//! Property tests for the listing core
//!
//! Partition totality and disjointness, the page bound invariant, slice
//! reconstruction, idempotence, and stability under a no-op refetch.

use super::*;
use proptest::prelude::*;
use std::collections::HashSet;
use std::num::NonZeroUsize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
enum Status {
    #[default]
    Available,
    InReview,
    Completed,
}

impl BucketKey for Status {
    const ALL: &'static [Self] = &[Status::Available, Status::InReview, Status::Completed];

    fn as_str(&self) -> &'static str {
        match self {
            Status::Available => "available",
            Status::InReview => "in_review",
            Status::Completed => "completed",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Status::Available => "Available",
            Status::InReview => "In Review",
            Status::Completed => "Completed",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Item {
    id: String,
    name: String,
    status: Status,
}

impl Listing for Item {
    type Key = Status;

    fn id(&self) -> &str {
        &self.id
    }

    fn bucket_key(&self) -> Status {
        self.status
    }

    fn matches(&self, needle: &str) -> bool {
        contains_ci(&self.name, needle)
    }
}

fn items(statuses: &[Status]) -> Vec<Item> {
    statuses
        .iter()
        .enumerate()
        .map(|(i, s)| Item {
            id: format!("rec-{}", i),
            name: format!("App {}", i),
            status: *s,
        })
        .collect()
}

fn arb_status() -> impl Strategy<Value = Status> {
    prop_oneof![
        Just(Status::Available),
        Just(Status::InReview),
        Just(Status::Completed),
    ]
}

fn arb_items() -> impl Strategy<Value = Vec<Item>> {
    prop::collection::vec(arb_status(), 0..60).prop_map(|s| items(&s))
}

fn arb_page_size() -> impl Strategy<Value = NonZeroUsize> {
    (1usize..=20).prop_map(|n| NonZeroUsize::new(n).unwrap())
}

fn size(n: usize) -> NonZeroUsize {
    NonZeroUsize::new(n).unwrap()
}

proptest! {
    #[test]
    fn prop_partition_is_total_and_disjoint(records in arb_items()) {
        let buckets = partition(&records, Item::bucket_key);

        prop_assert_eq!(buckets.total(), records.len());

        let mut seen = HashSet::new();
        for (key, bucket) in buckets.iter() {
            for item in bucket {
                prop_assert_eq!(item.status, key);
                prop_assert!(seen.insert(item.id.clone()), "duplicated {}", item.id);
            }
        }
        prop_assert_eq!(seen.len(), records.len());
    }

    #[test]
    fn prop_partition_keeps_relative_order(records in arb_items()) {
        let buckets = partition(&records, Item::bucket_key);

        for (key, bucket) in buckets.iter() {
            let expected: Vec<&Item> = records.iter().filter(|r| r.status == key).collect();
            prop_assert_eq!(bucket, expected.as_slice());
        }
    }

    #[test]
    fn prop_clamped_page_is_in_bounds(len in 0usize..500, page_size in arb_page_size(), requested in 0usize..1000) {
        let total = total_pages(len, page_size);
        let page = clamp_page(requested, total);

        prop_assert!(page >= 1);
        prop_assert!(page <= len.div_ceil(page_size.get()).max(1));
    }

    #[test]
    fn prop_pages_reconstruct_bucket(records in arb_items(), page_size in arb_page_size()) {
        let total = total_pages(records.len(), page_size);
        let mut rebuilt = Vec::new();

        for p in 1..=total {
            let page = paginate(&records, page_size, p);
            let start = (p - 1) * page_size.get();
            let end = (p * page_size.get()).min(records.len());
            prop_assert_eq!(page.items, &records[start.min(records.len())..end]);
            rebuilt.extend_from_slice(page.items);
        }

        prop_assert_eq!(rebuilt, records);
    }

    #[test]
    fn prop_paginate_is_idempotent(records in arb_items(), page_size in arb_page_size(), requested in 0usize..20) {
        let first = paginate(&records, page_size, requested);
        let second = paginate(&records, page_size, requested);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_noop_refetch_keeps_state(
        records in arb_items(),
        page_size in arb_page_size(),
        active in arb_status(),
        requested in 0usize..10
    ) {
        let mut state = ViewState::<Status>::new();
        state.select(active, TabPolicy::Preserve);
        let mut state = recompute(&records, page_size, &state);
        let buckets = partition(&records, Item::bucket_key);
        state.set_page(active, requested, total_pages(buckets.len(active), page_size));

        let redelivered = records.clone();
        let next = recompute(&redelivered, page_size, &state);
        prop_assert_eq!(&next, &state);
        prop_assert_eq!(view(&redelivered, page_size, &next), view(&records, page_size, &state));
    }

    #[test]
    fn prop_recompute_clamps_after_shrink(records in arb_items(), keep in 0usize..60, page_size in arb_page_size()) {
        let mut state = ViewState::<Status>::new();
        let buckets = partition(&records, Item::bucket_key);
        for key in Status::ALL {
            state.set_page(*key, usize::MAX, total_pages(buckets.len(*key), page_size));
        }

        let shrunk: Vec<Item> = records.into_iter().take(keep).collect();
        let next = recompute(&shrunk, page_size, &state);
        let buckets = partition(&shrunk, Item::bucket_key);
        for key in Status::ALL {
            prop_assert!(next.page(*key) <= total_pages(buckets.len(*key), page_size));
            prop_assert!(next.page(*key) >= 1);
        }
    }
}

#[test]
fn test_tab_switch_scenario() {
    let records = items(&[Status::Available; 13]);
    let page_size = size(6);
    let mut state = ViewState::<Status>::new();

    let total = view(&records, page_size, &state).total_pages;
    state.next_page(total);
    assert_eq!(view(&records, page_size, &state).page, 2);

    state.select(Status::Completed, TabPolicy::Preserve);
    let completed = view(&records, page_size, &state);
    assert_eq!(completed.page, 1);
    assert!(completed.items.is_empty());
    assert_eq!(completed.total_pages, 1);

    state.select(Status::Available, TabPolicy::Preserve);
    let available = view(&records, page_size, &state);
    assert_eq!(available.page, 2);
    assert_eq!(available.items.len(), 6);
    assert_eq!(available.item_range, Some((7, 12)));
}

#[test]
fn test_refetch_that_removes_records_clamps_page() {
    let records = items(&[Status::InReview; 13]);
    let page_size = size(6);
    let mut state = ViewState::<Status>::new();
    state.select(Status::InReview, TabPolicy::Preserve);
    state.last_page(3);

    let after_delete: Vec<Item> = records.into_iter().take(7).collect();
    let state = recompute(&after_delete, page_size, &state);
    assert_eq!(state.active_page(), 2);

    let page = view(&after_delete, page_size, &state);
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].id, "rec-6");
}

#[test]
fn test_query_narrows_buckets() {
    let mut records = items(&[Status::Available, Status::Available, Status::Completed]);
    records[1].name = "Weather Buddy".to_string();
    records[2].name = "weather station".to_string();

    let mut state = ViewState::<Status>::new();
    state.set_query("WEATHER");
    let page = view(&records, size(5), &state);

    assert_eq!(page.bucket_len, 1);
    assert_eq!(page.items[0].id, "rec-1");
    assert_eq!(
        page.counts,
        vec![
            (Status::Available, 1),
            (Status::InReview, 0),
            (Status::Completed, 1)
        ]
    );
}

#[test]
fn test_normalize_key_spellings() {
    assert_eq!(normalize_key("in_review"), "in_review");
    assert_eq!(normalize_key("In-Review"), "in_review");
    assert_eq!(normalize_key("inReview"), "in_review");
    assert_eq!(normalize_key(" IN REVIEW "), "in_review");
    assert_eq!(Status::parse("inReview"), Some(Status::InReview));
    assert_eq!(Status::parse("archived"), None);
}
