// Paginator - fixed-size pages over one bucket
//
// Page numbers are 1-based. Requests outside [1, total_pages] are clamped,
// never rejected: a bucket can shrink under the user after a refetch.

use std::num::NonZeroUsize;

/// One page of a bucket
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<'s, T> {
    /// Records on this page (at most `page_size`)
    pub items: &'s [T],
    /// Effective page number after clamping
    pub number: usize,
    /// Always at least 1, so page 1 is valid for an empty bucket
    pub total_pages: usize,
    /// Length of the whole bucket
    pub total_items: usize,
    pub page_size: NonZeroUsize,
}

impl<T> Page<'_, T> {
    pub fn has_prev(&self) -> bool {
        self.number > 1
    }

    pub fn has_next(&self) -> bool {
        self.number < self.total_pages
    }

    /// 1-based index range of the items shown, for "7-12 of 13" labels.
    /// None for an empty page.
    pub fn item_range(&self) -> Option<(usize, usize)> {
        if self.items.is_empty() {
            return None;
        }
        let start = (self.number - 1) * self.page_size.get() + 1;
        Some((start, start + self.items.len() - 1))
    }
}

/// `max(1, ceil(len / page_size))`
pub fn total_pages(len: usize, page_size: NonZeroUsize) -> usize {
    len.div_ceil(page_size.get()).max(1)
}

/// Clamp a requested page into `[1, total_pages]`
pub fn clamp_page(requested: usize, total_pages: usize) -> usize {
    requested.clamp(1, total_pages.max(1))
}

/// Slice `items[(p-1)*N .. p*N]` for the clamped page `p`
pub fn paginate<T>(items: &[T], page_size: NonZeroUsize, requested: usize) -> Page<'_, T> {
    let total = total_pages(items.len(), page_size);
    let number = clamp_page(requested, total);

    let start = ((number - 1) * page_size.get()).min(items.len());
    let end = (start + page_size.get()).min(items.len());

    Page {
        items: &items[start..end],
        number,
        total_pages: total,
        total_items: items.len(),
        page_size,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn size(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn test_thirteen_records_six_per_page() {
        let records: Vec<u32> = (0..13).collect();

        let first = paginate(&records, size(6), 1);
        assert_eq!(first.total_pages, 3);
        assert_eq!(first.items, &records[0..6]);
        assert!(!first.has_prev());
        assert!(first.has_next());

        let last = paginate(&records, size(6), 3);
        assert_eq!(last.items, &[12]);
        assert_eq!(last.item_range(), Some((13, 13)));
        assert!(!last.has_next());
    }

    #[test]
    fn test_out_of_range_request_clamps() {
        let records: Vec<u32> = (0..13).collect();

        let page = paginate(&records, size(6), 5);
        assert_eq!(page.number, 3);
        assert_eq!(page.items, &[12]);

        let page = paginate(&records, size(6), 0);
        assert_eq!(page.number, 1);
    }

    #[test]
    fn test_empty_bucket_has_one_empty_page() {
        let records: Vec<u32> = Vec::new();

        let page = paginate(&records, size(5), 1);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.number, 1);
        assert!(page.items.is_empty());
        assert_eq!(page.item_range(), None);
    }

    #[test]
    fn test_exact_multiple_has_no_trailing_page() {
        assert_eq!(total_pages(12, size(6)), 2);
        assert_eq!(total_pages(0, size(3)), 1);
        assert_eq!(total_pages(1, size(15)), 1);
    }
}
