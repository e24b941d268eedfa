use std::cmp::Ordering;

/// Extraction order of a [`PriorityHeap`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeapOrder {
    /// Highest key is extracted first (event queue).
    Max,
    /// Lowest key is extracted first (cursor candidate ranking).
    Min,
}

impl HeapOrder {
    fn compare(self, a: i64, b: i64) -> Ordering {
        match self {
            HeapOrder::Max => a.cmp(&b),
            HeapOrder::Min => b.cmp(&a),
        }
    }
}

#[derive(Debug, Clone)]
struct HeapEntry<T> {
    key: i64,
    seq: u64,
    item: T,
}

/// Array-backed binary heap keyed by an integer priority.
///
/// Both orders share the same sift logic; only the key comparison flips.
/// Entries with equal keys come out in insertion order: each entry carries a
/// sequence number and the older entry always outranks the newer one.
#[derive(Debug, Clone)]
pub struct PriorityHeap<T> {
    order: HeapOrder,
    entries: Vec<HeapEntry<T>>,
    next_seq: u64,
}

impl<T> PriorityHeap<T> {
    pub fn new(order: HeapOrder) -> Self {
        Self {
            order,
            entries: Vec::new(),
            next_seq: 0,
        }
    }

    pub fn max() -> Self {
        Self::new(HeapOrder::Max)
    }

    pub fn min() -> Self {
        Self::new(HeapOrder::Min)
    }

    pub fn order(&self) -> HeapOrder {
        self.order
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Insert `item` with the given key. O(log n).
    pub fn insert(&mut self, key: i64, item: T) {
        let seq = self.next_seq;
        self.next_seq = self.next_seq.wrapping_add(1);
        self.entries.push(HeapEntry { key, seq, item });
        self.sift_up(self.entries.len() - 1);
    }

    /// Key of the entry that would be extracted next.
    pub fn peek_key(&self) -> Option<i64> {
        self.entries.first().map(|entry| entry.key)
    }

    pub fn peek(&self) -> Option<&T> {
        self.entries.first().map(|entry| &entry.item)
    }

    /// Remove and return the top entry, or `None` when empty. O(log n).
    pub fn extract_top(&mut self) -> Option<T> {
        self.extract_top_with_key().map(|(_, item)| item)
    }

    pub fn extract_top_with_key(&mut self) -> Option<(i64, T)> {
        if self.entries.is_empty() {
            return None;
        }
        let last = self.entries.len() - 1;
        self.entries.swap(0, last);
        let top = self.entries.pop()?;
        if !self.entries.is_empty() {
            self.sift_down(0);
        }
        Some((top.key, top.item))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Drain every entry in extraction order.
    pub fn drain_ordered(&mut self) -> Vec<T> {
        let mut out = Vec::with_capacity(self.entries.len());
        while let Some(item) = self.extract_top() {
            out.push(item);
        }
        out
    }

    fn outranks(&self, a: usize, b: usize) -> bool {
        let (left, right) = (&self.entries[a], &self.entries[b]);
        match self.order.compare(left.key, right.key) {
            Ordering::Greater => true,
            Ordering::Less => false,
            Ordering::Equal => left.seq < right.seq,
        }
    }

    fn sift_up(&mut self, mut idx: usize) {
        while idx > 0 {
            let parent = (idx - 1) / 2;
            if !self.outranks(idx, parent) {
                break;
            }
            self.entries.swap(idx, parent);
            idx = parent;
        }
    }

    fn sift_down(&mut self, mut idx: usize) {
        let len = self.entries.len();
        loop {
            let left = 2 * idx + 1;
            let right = left + 1;
            let mut best = idx;
            if left < len && self.outranks(left, best) {
                best = left;
            }
            if right < len && self.outranks(right, best) {
                best = right;
            }
            if best == idx {
                break;
            }
            self.entries.swap(idx, best);
            idx = best;
        }
    }
}
