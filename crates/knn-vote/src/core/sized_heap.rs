//! A helper struct for keeping the `k` smallest items seen in a stream.

use std::collections::BinaryHeap;

use super::KnnError;

/// A max heap that never holds more than `k` items.
///
/// Offering an item to a full heap evicts the largest item, which may be the
/// offered item itself. Items that compare equal are told apart by the order
/// in which they were offered: the earlier one is considered smaller and so
/// survives. With a total order on `T` the retained items therefore depend
/// only on the multiset of items offered, never on their arrival order.
///
/// `offer` is `O(log k)`.
#[derive(Debug, Clone)]
pub struct SizedHeap<T: Ord> {
    /// The heap of items.
    heap: BinaryHeap<MaxItem<T>>,
    /// The maximum size of the heap.
    k: usize,
    /// The sequence number given to the next offered item.
    next_seq: u64,
}

impl<T: Ord> SizedHeap<T> {
    /// Creates a new `SizedHeap` holding at most `k` items.
    ///
    /// # Errors
    ///
    /// If `k` is zero.
    pub fn new(k: usize) -> Result<Self, KnnError> {
        if k == 0 {
            return Err(KnnError::configuration("k must be at least 1"));
        }
        Ok(Self::from_k(k))
    }

    /// Creates a heap for a `k` the caller has already validated. A zero `k`
    /// is raised to one.
    pub(crate) fn from_k(k: usize) -> Self {
        let k = k.max(1);
        Self {
            heap: BinaryHeap::with_capacity(k + 1),
            k,
            next_seq: 0,
        }
    }

    /// Returns the maximum size of the heap.
    #[must_use]
    pub const fn k(&self) -> usize {
        self.k
    }

    /// Offers an item to the heap, maintaining the max size.
    pub fn offer(&mut self, item: T) {
        let item = MaxItem(item, self.next_seq);
        self.next_seq += 1;

        if self.heap.len() < self.k {
            self.heap.push(item);
        } else if let Some(mut top) = self.heap.peek_mut() {
            if item < *top {
                *top = item;
            }
        }
    }

    /// Offers several items to the heap, maintaining the max size.
    pub fn extend<I: IntoIterator<Item = T>>(&mut self, items: I) {
        for item in items {
            self.offer(item);
        }
    }

    /// Merges another heap into this one, keeping this heap's `k`.
    pub fn merge(&mut self, other: Self) {
        self.extend(other.into_sorted_vec());
    }

    /// Peeks at the largest retained item, the next one to be evicted.
    #[must_use]
    pub fn peek(&self) -> Option<&T> {
        self.heap.peek().map(|MaxItem(x, _)| x)
    }

    /// Returns the number of items in the heap.
    #[must_use]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Returns whether the heap is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Returns whether the heap is full.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.heap.len() == self.k
    }

    /// Consumes the `SizedHeap` and returns the items in ascending order.
    #[must_use]
    pub fn into_sorted_vec(self) -> Vec<T> {
        self.heap.into_sorted_vec().into_iter().map(|MaxItem(x, _)| x).collect()
    }
}

impl<T: Ord + Clone> SizedHeap<T> {
    /// Returns a copy of the items in ascending order without modifying the
    /// heap.
    #[must_use]
    pub fn snapshot(&self) -> Vec<T> {
        let mut items = self.heap.iter().collect::<Vec<_>>();
        items.sort_unstable();
        items.into_iter().map(|MaxItem(x, _)| x.clone()).collect()
    }
}

/// A wrapper that orders items first by value and then by the sequence number
/// they were offered with.
#[derive(Debug, Clone)]
struct MaxItem<T: Ord>(T, u64);

impl<T: Ord> PartialEq for MaxItem<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other).is_eq()
    }
}

impl<T: Ord> Eq for MaxItem<T> {}

impl<T: Ord> PartialOrd for MaxItem<T> {
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: Ord> Ord for MaxItem<T> {
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        self.0.cmp(&other.0).then(self.1.cmp(&other.1))
    }
}

#[cfg(test)]
mod tests {
    use rand::prelude::*;
    use test_case::test_case;

    use super::*;

    #[test]
    fn zero_k() {
        assert!(matches!(
            SizedHeap::<u32>::new(0),
            Err(KnnError::Configuration { .. })
        ));
    }

    #[test_case(1 ; "k = 1")]
    #[test_case(3 ; "k = 3")]
    #[test_case(10 ; "k = 10")]
    #[test_case(1000 ; "k larger than input")]
    fn keeps_smallest(k: usize) -> Result<(), KnnError> {
        let mut rng = StdRng::seed_from_u64(42);
        let items = (0..500).map(|_| rng.gen_range(0..100_u32)).collect::<Vec<_>>();

        let mut heap = SizedHeap::new(k)?;
        assert_eq!(heap.k(), k);
        for &item in &items {
            heap.offer(item);
            assert!(heap.len() <= heap.k());
        }

        let mut expected = items;
        expected.sort_unstable();
        expected.truncate(k);

        assert_eq!(heap.snapshot(), expected);
        assert_eq!(heap.len(), expected.len());
        assert_eq!(heap.into_sorted_vec(), expected);
        Ok(())
    }

    #[test]
    fn snapshot_does_not_mutate() -> Result<(), KnnError> {
        let mut heap = SizedHeap::new(2)?;
        heap.extend([5, 1, 3]);
        assert_eq!(heap.snapshot(), vec![1, 3]);
        assert_eq!(heap.snapshot(), vec![1, 3]);
        assert_eq!(heap.peek(), Some(&3));
        assert!(heap.is_full());
        Ok(())
    }

    #[test]
    fn equal_items_keep_earliest() -> Result<(), KnnError> {
        let mut heap = SizedHeap::new(2)?;
        heap.extend([(1, 'a'), (2, 'b'), (2, 'c')].map(|(d, tag)| Tagged(d, tag)));
        let tags = heap.snapshot().into_iter().map(|Tagged(_, t)| t).collect::<String>();
        assert_eq!(tags, "ab");

        let mut heap = SizedHeap::new(2)?;
        heap.extend([(2, 'c'), (2, 'b'), (1, 'a')].map(|(d, tag)| Tagged(d, tag)));
        let tags = heap.snapshot().into_iter().map(|Tagged(_, t)| t).collect::<String>();
        assert_eq!(tags, "ac");
        Ok(())
    }

    #[test]
    fn merge_is_order_independent() -> Result<(), KnnError> {
        let mut rng = StdRng::seed_from_u64(7);
        let items = (0..200).map(|_| rng.gen_range(0..50_u32)).collect::<Vec<_>>();
        let (left, right) = items.split_at(120);

        let mut a = SizedHeap::new(8)?;
        a.extend(left.iter().copied());
        let mut b = SizedHeap::new(8)?;
        b.extend(right.iter().copied());

        let mut ab = a.clone();
        ab.merge(b.clone());
        let mut ba = b;
        ba.merge(a);

        let mut shuffled = items;
        shuffled.shuffle(&mut rng);
        let mut whole = SizedHeap::new(8)?;
        whole.extend(shuffled);

        assert_eq!(ab.snapshot(), ba.snapshot());
        assert_eq!(ab.snapshot(), whole.snapshot());
        Ok(())
    }

    /// Compares only on the first field so ties can be observed.
    #[derive(Debug, Clone)]
    struct Tagged(u32, char);

    impl PartialEq for Tagged {
        fn eq(&self, other: &Self) -> bool {
            self.0 == other.0
        }
    }

    impl Eq for Tagged {}

    impl PartialOrd for Tagged {
        fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
            Some(self.cmp(other))
        }
    }

    impl Ord for Tagged {
        fn cmp(&self, other: &Self) -> core::cmp::Ordering {
            self.0.cmp(&other.0)
        }
    }
}
