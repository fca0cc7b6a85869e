// Partitioner - group records into one bucket per key
//
// Buckets borrow the records; they are rebuilt from scratch on every
// delivery and never stored.

use super::BucketKey;
use std::collections::BTreeMap;

/// Records grouped by bucket key, in source order within each bucket.
///
/// Every key of the enumeration is present, even when empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Buckets<'a, R, K: BucketKey> {
    buckets: BTreeMap<K, Vec<&'a R>>,
}

impl<'a, R, K: BucketKey> Buckets<'a, R, K> {
    fn empty() -> Self {
        Self {
            buckets: K::ALL.iter().map(|k| (*k, Vec::new())).collect(),
        }
    }

    /// Records in one bucket
    pub fn get(&self, key: K) -> &[&'a R] {
        self.buckets.get(&key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self, key: K) -> usize {
        self.get(key).len()
    }

    pub fn is_empty(&self, key: K) -> bool {
        self.get(key).is_empty()
    }

    /// Record count per key, in tab order
    pub fn counts(&self) -> Vec<(K, usize)> {
        self.iter().map(|(k, v)| (k, v.len())).collect()
    }

    /// Iterate buckets in tab order
    pub fn iter(&self) -> impl Iterator<Item = (K, &[&'a R])> + '_ {
        self.buckets.iter().map(|(k, v)| (*k, v.as_slice()))
    }

    /// Number of records across all buckets
    pub fn total(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }
}

/// Partition records by `key_of`.
///
/// Pure: the same input always yields the same buckets. An empty input
/// yields every bucket empty.
pub fn partition<'a, R, K, I, F>(records: I, key_of: F) -> Buckets<'a, R, K>
where
    R: 'a,
    K: BucketKey,
    I: IntoIterator<Item = &'a R>,
    F: Fn(&R) -> K,
{
    let mut buckets = Buckets::empty();
    for record in records {
        buckets
            .buckets
            .entry(key_of(record))
            .or_default()
            .push(record);
    }
    buckets
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
    enum Parity {
        #[default]
        Even,
        Odd,
    }

    impl BucketKey for Parity {
        const ALL: &'static [Self] = &[Parity::Even, Parity::Odd];

        fn as_str(&self) -> &'static str {
            match self {
                Parity::Even => "even",
                Parity::Odd => "odd",
            }
        }

        fn label(&self) -> &'static str {
            self.as_str()
        }
    }

    fn parity(n: &u32) -> Parity {
        if n % 2 == 0 {
            Parity::Even
        } else {
            Parity::Odd
        }
    }

    #[test]
    fn test_partition_preserves_source_order() {
        let numbers = [5, 2, 9, 4, 1, 8];
        let buckets = partition(&numbers, parity);

        assert_eq!(buckets.get(Parity::Even), &[&2, &4, &8]);
        assert_eq!(buckets.get(Parity::Odd), &[&5, &9, &1]);
        assert_eq!(buckets.total(), 6);
    }

    #[test]
    fn test_empty_input_yields_all_empty_buckets() {
        let numbers: [u32; 0] = [];
        let buckets = partition(&numbers, parity);

        assert_eq!(buckets.counts(), vec![(Parity::Even, 0), (Parity::Odd, 0)]);
        assert!(buckets.is_empty(Parity::Even));
        assert!(buckets.is_empty(Parity::Odd));
    }

    #[test]
    fn test_iter_follows_tab_order() {
        let numbers = [1, 3];
        let buckets = partition(&numbers, parity);
        let keys: Vec<_> = buckets.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec![Parity::Even, Parity::Odd]);
    }
}
