//! An open-addressed hash map using linear probing and tombstone deletion.

use std::fmt;
use std::hash::{BuildHasher, BuildHasherDefault, DefaultHasher, Hash};

use crate::error::CollectionError;

/// The number of slots allocated by [`ProbingMap::new`].
const INITIAL_CAPACITY: usize = 16;

/// The table doubles as soon as `(live + tombstoned) / capacity` exceeds this value.
pub const MAX_LOAD_FACTOR: f64 = 0.5;

#[derive(Debug, Clone)]
enum Slot<K, V> {
    Empty,
    Tombstone,
    Occupied(K, V),
}

/// A map backed by a single probing table.
///
/// Lookups walk forward from `hash(key) % capacity`, wrapping around, until they find the key or an
/// empty slot. Removal leaves a tombstone so later entries in the same run stay reachable; the first
/// tombstone seen during a failed lookup is where an insertion lands. Resizing reinserts only live
/// entries, which clears every tombstone.
///
/// The default hasher is deterministic, so iteration order is reproducible for a given sequence
/// of operations (but is otherwise unspecified).
#[derive(Clone)]
pub struct ProbingMap<K, V, S = BuildHasherDefault<DefaultHasher>> {
    slots: Vec<Slot<K, V>>,
    /// Number of live entries.
    len: usize,
    /// Number of non-empty slots (live entries plus tombstones).
    used: usize,
    hasher: S,
}

impl<K: Hash + Eq, V> ProbingMap<K, V> {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::with_hasher(BuildHasherDefault::default())
    }
}

impl<K: Hash + Eq, V> Default for ProbingMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> ProbingMap<K, V, S> {
    /// Creates an empty map that hashes keys with `hasher`.
    pub fn with_hasher(hasher: S) -> Self {
        Self {
            slots: empty_slots(INITIAL_CAPACITY),
            len: 0,
            used: 0,
            hasher,
        }
    }

    /// Returns the number of keys currently associated with values.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of slots in the backing table.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns whether `key` is associated with a value.
    pub fn contains_key(&self, key: &K) -> bool {
        matches!(&self.slots[self.find_slot(key)], Slot::Occupied(k, _) if k == key)
    }

    /// Returns the value associated with `key`.
    pub fn get(&self, key: &K) -> Result<&V, CollectionError> {
        match &self.slots[self.find_slot(key)] {
            Slot::Occupied(k, value) if k == key => Ok(value),
            _ => Err(CollectionError::KeyNotFound),
        }
    }

    /// Returns a mutable reference to the value associated with `key`.
    pub fn get_mut(&mut self, key: &K) -> Result<&mut V, CollectionError> {
        let index = self.find_slot(key);
        match &mut self.slots[index] {
            Slot::Occupied(k, value) if *k == *key => Ok(value),
            _ => Err(CollectionError::KeyNotFound),
        }
    }

    /// Associates `value` with `key`, returning the value it replaced, if any.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        let index = self.find_slot(&key);
        let previous = std::mem::replace(&mut self.slots[index], Slot::Occupied(key, value));

        let replaced = match previous {
            Slot::Empty => {
                self.len += 1;
                self.used += 1;
                None
            }
            Slot::Tombstone => {
                self.len += 1;
                None
            }
            Slot::Occupied(_, old) => Some(old),
        };

        if self.load_factor() > MAX_LOAD_FACTOR {
            self.resize();
        }
        replaced
    }

    /// Removes `key` and returns the value that was associated with it.
    pub fn remove(&mut self, key: &K) -> Result<V, CollectionError> {
        let index = self.find_slot(key);
        if !matches!(&self.slots[index], Slot::Occupied(k, _) if k == key) {
            return Err(CollectionError::KeyNotFound);
        }

        match std::mem::replace(&mut self.slots[index], Slot::Tombstone) {
            Slot::Occupied(_, value) => {
                self.len -= 1;
                Ok(value)
            }
            _ => unreachable!("slot was checked to be occupied"),
        }
    }

    /// Returns an iterator over the keys, in unspecified order.
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.iter().map(|(key, _)| key)
    }

    /// Returns an iterator over the values, in unspecified order.
    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.iter().map(|(_, value)| value)
    }

    /// Returns an iterator over the entries, in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        self.slots.iter().filter_map(|slot| match slot {
            Slot::Occupied(key, value) => Some((key, value)),
            _ => None,
        })
    }

    fn load_factor(&self) -> f64 {
        self.used as f64 / self.slots.len() as f64
    }

    fn start_index(&self, key: &K) -> usize {
        (self.hasher.hash_one(key) % self.slots.len() as u64) as usize
    }

    /// Returns the slot holding `key`, or else the first tombstone or empty slot on its collision run.
    fn find_slot(&self, key: &K) -> usize {
        let capacity = self.slots.len();
        let start = self.start_index(key);
        let mut first_tombstone = None;

        for offset in 0..capacity {
            let index = (start + offset) % capacity;
            match &self.slots[index] {
                Slot::Empty => return first_tombstone.unwrap_or(index),
                Slot::Tombstone => {
                    first_tombstone.get_or_insert(index);
                }
                Slot::Occupied(k, _) if k == key => return index,
                Slot::Occupied(..) => {}
            }
        }

        // Unreachable while the load factor stays below 1, but keep the lookup total.
        first_tombstone.unwrap_or(start)
    }

    fn resize(&mut self) {
        let capacity = self.slots.len() * 2;
        let old = std::mem::replace(&mut self.slots, empty_slots(capacity));
        self.len = 0;
        self.used = 0;

        for slot in old {
            if let Slot::Occupied(key, value) = slot {
                let index = self.find_slot(&key);
                self.slots[index] = Slot::Occupied(key, value);
                self.len += 1;
                self.used += 1;
            }
        }
    }
}

fn empty_slots<K, V>(capacity: usize) -> Vec<Slot<K, V>> {
    std::iter::repeat_with(|| Slot::Empty).take(capacity).collect()
}

impl<K: Hash + Eq + fmt::Debug, V: fmt::Debug, S: BuildHasher> fmt::Debug for ProbingMap<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
