//! Fixed-capacity binary heap whose items remember their own position.
//!
//! The heap only stores keys. The items themselves live in an arena owned by the
//! caller (see [HeapItems]), which also holds each item's heap index. Keeping
//! that back-reference in sync with every slot write is what makes
//! [contains](PriorityHeap::contains) O(1) and
//! [notify_priority_increased](PriorityHeap::notify_priority_increased) O(log n).
use crate::error::HeapError;
use std::cmp::Ordering;
use std::fmt::Debug;

/// Arena of items ordered by a [PriorityHeap].
pub trait HeapItems {
    type Key: Copy + PartialEq + Debug;

    /// Total order over items. [Ordering::Greater] means `a` has the higher priority
    /// and belongs closer to the root.
    fn compare(&self, a: Self::Key, b: Self::Key) -> Ordering;
    fn heap_index(&self, key: Self::Key) -> Option<usize>;
    fn set_heap_index(&mut self, key: Self::Key, index: Option<usize>);
}

#[derive(Clone, Debug)]
pub struct PriorityHeap<K> {
    items: Vec<K>,
    capacity: usize,
}

impl<K: Copy + PartialEq + Debug> PriorityHeap<K> {
    pub fn new(capacity: usize) -> PriorityHeap<K> {
        PriorityHeap {
            items: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Empties the heap and grows the capacity to at least `capacity`. Heap indices
    /// left on previously stored items are not touched.
    pub fn reset(&mut self, capacity: usize) {
        self.items.clear();
        if capacity > self.capacity {
            self.items.reserve(capacity);
            self.capacity = capacity;
        }
    }

    /// Appends `key` and sifts it up to its place.
    pub fn push<S>(&mut self, store: &mut S, key: K) -> Result<(), HeapError>
    where
        S: HeapItems<Key = K>,
    {
        if self.items.len() >= self.capacity {
            return Err(HeapError::Full {
                capacity: self.capacity,
            });
        }
        let index = self.items.len();
        self.items.push(key);
        store.set_heap_index(key, Some(index));
        self.sift_up(store, index);
        Ok(())
    }

    /// Removes and returns the item with the highest priority, or [None] if the heap is empty.
    pub fn pop_highest_priority<S>(&mut self, store: &mut S) -> Option<K>
    where
        S: HeapItems<Key = K>,
    {
        let last = self.items.len().checked_sub(1)?;
        self.swap(store, 0, last);
        let first = self.items.pop()?;
        store.set_heap_index(first, None);
        if !self.items.is_empty() {
            self.sift_down(store, 0);
        }
        Some(first)
    }

    pub fn peek(&self) -> Option<K> {
        self.items.first().copied()
    }

    /// Checks the slot named by the item's own heap index.
    pub fn contains<S>(&self, store: &S, key: K) -> bool
    where
        S: HeapItems<Key = K>,
    {
        store
            .heap_index(key)
            .and_then(|ix| self.items.get(ix))
            .map_or(false, |k| *k == key)
    }

    /// Restores the heap after the priority of `key` went up. Priorities never
    /// decrease during a search, so only the upward sift is needed.
    pub fn notify_priority_increased<S>(&mut self, store: &mut S, key: K)
    where
        S: HeapItems<Key = K>,
    {
        if let Some(index) = store.heap_index(key) {
            debug_assert!(self.items.get(index) == Some(&key));
            self.sift_up(store, index);
        }
    }

    /// Checks the heap property and every back-reference.
    pub fn is_consistent<S>(&self, store: &S) -> bool
    where
        S: HeapItems<Key = K>,
    {
        self.items.iter().enumerate().all(|(ix, &key)| {
            let parent_ok =
                ix == 0 || store.compare(key, self.items[(ix - 1) / 2]) != Ordering::Greater;
            parent_ok && store.heap_index(key) == Some(ix)
        })
    }

    fn sift_up<S>(&mut self, store: &mut S, mut index: usize)
    where
        S: HeapItems<Key = K>,
    {
        while index > 0 {
            let parent = (index - 1) / 2;
            if store.compare(self.items[index], self.items[parent]) == Ordering::Greater {
                self.swap(store, index, parent);
                index = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down<S>(&mut self, store: &mut S, mut index: usize)
    where
        S: HeapItems<Key = K>,
    {
        let len = self.items.len();
        loop {
            let left = index * 2 + 1;
            let right = left + 1;
            if left >= len {
                return;
            }
            let mut candidate = left;
            if right < len
                && store.compare(self.items[right], self.items[left]) == Ordering::Greater
            {
                candidate = right;
            }
            if store.compare(self.items[index], self.items[candidate]) == Ordering::Less {
                self.swap(store, index, candidate);
                index = candidate;
            } else {
                return;
            }
        }
    }

    /// Exchanges two slots together with both back-references.
    fn swap<S>(&mut self, store: &mut S, a: usize, b: usize)
    where
        S: HeapItems<Key = K>,
    {
        self.items.swap(a, b);
        store.set_heap_index(self.items[a], Some(a));
        store.set_heap_index(self.items[b], Some(b));
    }
}
