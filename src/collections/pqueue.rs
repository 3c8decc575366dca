//! A min-priority queue of distinct keys with updatable priorities.

use std::hash::Hash;

use super::probing::ProbingMap;
use crate::error::CollectionError;

/// A key paired with its (extrinsic) priority.
#[derive(Debug, Clone)]
struct Entry<K> {
    key: K,
    priority: f64,
}

/// A binary min-heap over distinct keys.
///
/// A parallel [`ProbingMap`] records each key's slot in the heap and is kept in sync on every swap, so
/// a key's priority can be changed in `O(log n)`. Ties between equal priorities are broken by heap
/// position, which is arbitrary but deterministic for a fixed sequence of operations.
#[derive(Clone)]
pub struct MinPQueue<K> {
    /// Satisfies `heap[i].priority >= heap[(i - 1) / 2].priority` for every `i > 0`.
    heap: Vec<Entry<K>>,
    /// Maps every key in `heap` to its index; `index.len() == heap.len()`.
    index: ProbingMap<K, usize>,
}

impl<K: Hash + Eq + Clone> MinPQueue<K> {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self {
            heap: Vec::new(),
            index: ProbingMap::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Returns the number of keys in the queue.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Returns whether `key` is currently queued.
    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Returns the key that [`remove`](Self::remove) would return next.
    pub fn peek(&self) -> Result<&K, CollectionError> {
        self.heap.first().map(|entry| &entry.key).ok_or(CollectionError::Empty)
    }

    /// Returns the smallest priority in the queue.
    pub fn min_priority(&self) -> Result<f64, CollectionError> {
        self.heap.first().map(|entry| entry.priority).ok_or(CollectionError::Empty)
    }

    /// Inserts `key` with `priority`, or changes its priority if it is already queued.
    pub fn add_or_update(&mut self, key: K, priority: f64) {
        match self.index.get(&key).ok().copied() {
            Some(i) => self.update(i, priority),
            None => self.add(key, priority),
        }
    }

    /// Removes and returns the key with the smallest priority.
    pub fn remove(&mut self) -> Result<K, CollectionError> {
        if self.heap.is_empty() {
            return Err(CollectionError::Empty);
        }

        let minimum = self.heap.swap_remove(0);
        self.index.remove(&minimum.key)?;
        if !self.heap.is_empty() {
            self.reindex(0);
            self.sift_down(0);
        }
        Ok(minimum.key)
    }

    fn add(&mut self, key: K, priority: f64) {
        let i = self.heap.len();
        self.index.put(key.clone(), i);
        self.heap.push(Entry { key, priority });
        self.sift_up(i);
    }

    /// Changes the priority at heap slot `i`, then moves it in whichever direction the parent
    /// comparison calls for.
    fn update(&mut self, i: usize, priority: f64) {
        self.heap[i].priority = priority;
        if i > 0 && priority < self.heap[(i - 1) / 2].priority {
            self.sift_up(i);
        } else {
            self.sift_down(i);
        }
    }

    fn swap(&mut self, i: usize, j: usize) {
        self.heap.swap(i, j);
        self.reindex(i);
        self.reindex(j);
    }

    /// Points the index entry of the key at heap slot `i` back at `i`.
    ///
    /// # Panics
    ///
    /// Panics if the key is missing from the index, which means the queue is corrupt.
    fn reindex(&mut self, i: usize) {
        let Ok(slot) = self.index.get_mut(&self.heap[i].key) else {
            panic!("priority queue key at heap slot {i} is missing from the index");
        };
        *slot = i;
    }

    fn sift_up(&mut self, mut i: usize) {
        while i > 0 {
            let parent = (i - 1) / 2;
            if self.heap[i].priority < self.heap[parent].priority {
                self.swap(i, parent);
                i = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, mut i: usize) {
        let len = self.heap.len();
        loop {
            let left = 2 * i + 1;
            let right = left + 1;
            if left >= len {
                break;
            }

            let smallest = if right < len && self.heap[right].priority < self.heap[left].priority {
                right
            } else {
                left
            };
            if self.heap[i].priority <= self.heap[smallest].priority {
                break;
            }

            self.swap(i, smallest);
            i = smallest;
        }
    }
}

impl<K: Hash + Eq + Clone> Default for MinPQueue<K> {
    fn default() -> Self {
        Self::new()
    }
}
