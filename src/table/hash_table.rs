use log::trace;

use super::TableError;
use crate::chain::{self, Chain, Entry};

/// Bucket count of a fresh table.
pub const DEFAULT_CAPACITY: usize = 16;

/// Occupied-bucket ratio above which the table doubles its capacity.
pub const LOAD_FACTOR: f32 = 0.65;

/// Chained hash table, generic over the entry shape. The map and set
/// fronts share this; they differ only in what an entry carries.
#[derive(Debug)]
pub(crate) struct HashTable<E: Entry> {
    /// One slot per bucket index; `None` until the first entry hashes
    /// there, `None` again once its last entry is removed.
    buckets: Vec<Option<Chain<E>>>,
    /// Always equals `buckets.len()`.
    capacity: usize,
    /// Fixed for the lifetime of the table.
    load_factor: f32,
    /// Occupied slots, not entries. Growth is decided on this.
    bucket_count: usize,
    /// Total entries across all chains.
    len: usize,
}

impl<E: Entry> HashTable<E> {
    pub(crate) fn new() -> Self {
        Self {
            buckets: (0..DEFAULT_CAPACITY).map(|_| None).collect(),
            capacity: DEFAULT_CAPACITY,
            load_factor: LOAD_FACTOR,
            bucket_count: 0,
            len: 0,
        }
    }

    /// Number of entries in the table.
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current bucket-array length.
    pub(crate) fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of occupied buckets.
    pub(crate) fn bucket_count(&self) -> usize {
        self.bucket_count
    }

    /// Upserts `entry` under its own key.
    ///
    /// A brand-new bucket is the only path that can change the
    /// occupied-bucket count, so it is the only insert path that
    /// re-checks the growth condition.
    pub(crate) fn set(&mut self, entry: E) -> Result<(), TableError> {
        let i = self.bucket_index(entry.key())?;

        match self.buckets[i] {
            None => {
                self.buckets[i] = Some(Chain::new(entry));
                self.bucket_count += 1;
                self.len += 1;
                self.adjust_capacity()?;
            }
            Some(ref mut chain) => match chain.get_mut(entry.key()) {
                Some(existing) => existing.overwrite(entry),
                None => {
                    chain.append(entry);
                    self.len += 1;
                }
            },
        }

        Ok(())
    }

    pub(crate) fn get(&self, key: &str) -> Option<&E> {
        let i = self.bucket_index(key).ok()?;
        self.buckets[i].as_ref()?.get(key)
    }

    pub(crate) fn has(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Removes the entry stored under `key`, reporting whether one was
    /// there. Missing keys are a normal outcome, not an error.
    pub(crate) fn remove(&mut self, key: &str) -> Result<bool, TableError> {
        let i = self.bucket_index(key)?;

        let Some(chain) = self.buckets[i].as_mut() else {
            return Ok(false);
        };
        if chain.remove(key).is_none() {
            return Ok(false);
        }

        if chain.is_empty() {
            self.buckets[i] = None;
            self.bucket_count -= 1;
        }
        self.len -= 1;

        // mirrors the insert path; removal never raises bucket_count,
        // so this check stays inert
        self.adjust_capacity()?;

        Ok(true)
    }

    /// Empties every bucket at the current capacity. Capacity is never
    /// reduced, so a cleared table keeps its grown bucket array.
    pub(crate) fn clear(&mut self) {
        self.buckets = (0..self.capacity).map(|_| None).collect();
        self.bucket_count = 0;
        self.len = 0;
        trace!(target: "hash_table", "cleared table, capacity stays {}", self.capacity);
    }

    // [adapters]

    /// Visits slots in index order, entries in chain order. The order
    /// is insertion order within a chain only; a rehash redistributes
    /// entries across buckets.
    pub(crate) fn iter(&self) -> Iter<'_, E> {
        Iter {
            buckets: &self.buckets,
            bucket_idx: 0,
            chain: None,
        }
    }

    // [private]

    /// Polynomial rolling hash, base 31, over the UTF-16 code units of
    /// `key`, reduced modulo the current capacity at every step. The
    /// result depends on the capacity, so it is recomputed on rehash
    /// and never cached on an entry.
    fn hash(&self, key: &str) -> usize {
        const BASE: u64 = 31;

        let capacity = self.capacity as u64;
        let mut hash = 0u64;
        for code in key.encode_utf16() {
            hash = (BASE * hash + u64::from(code)) % capacity;
        }

        hash as usize
    }

    /// Hash plus the range guard of [`TableError::IndexOutOfRange`].
    fn bucket_index(&self, key: &str) -> Result<usize, TableError> {
        let index = self.hash(key);
        if index >= self.capacity {
            return Err(TableError::IndexOutOfRange {
                index,
                capacity: self.capacity,
            });
        }
        Ok(index)
    }

    /// Doubles the bucket array and redistributes every entry once the
    /// occupied-bucket count exceeds `capacity * load_factor`.
    ///
    /// The rebuild zeroes both counters and reconstructs them through
    /// the same bucket-creation logic as `set`, against the new array.
    /// Old buckets are drained, so the swap is all-or-nothing from the
    /// caller's point of view.
    fn adjust_capacity(&mut self) -> Result<(), TableError> {
        if self.bucket_count as f32 <= self.capacity as f32 * self.load_factor {
            return Ok(());
        }

        let old_capacity = self.capacity;
        self.capacity *= 2;

        let old_buckets = std::mem::replace(
            &mut self.buckets,
            (0..self.capacity).map(|_| None).collect(),
        );
        self.bucket_count = 0;
        self.len = 0;

        for chain in old_buckets.into_iter().flatten() {
            for entry in chain {
                self.insert_rehashed(entry)?;
            }
        }

        trace!(
            target: "adjust_capacity",
            "grew table {} -> {} ({} buckets, {} entries)",
            old_capacity,
            self.capacity,
            self.bucket_count,
            self.len
        );

        Ok(())
    }

    /// Insert path for the rehash: keys are already distinct, so there
    /// is no overwrite lookup and no growth re-check.
    fn insert_rehashed(&mut self, entry: E) -> Result<(), TableError> {
        let i = self.bucket_index(entry.key())?;

        match self.buckets[i] {
            None => {
                self.buckets[i] = Some(Chain::new(entry));
                self.bucket_count += 1;
            }
            Some(ref mut chain) => chain.append(entry),
        }
        self.len += 1;

        Ok(())
    }
}

pub(crate) struct Iter<'a, E> {
    buckets: &'a [Option<Chain<E>>],
    bucket_idx: usize,
    chain: Option<chain::Iter<'a, E>>,
}

impl<'a, E: Entry> Iterator for Iter<'a, E> {
    type Item = &'a E;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(chain) = self.chain.as_mut() {
                if let Some(entry) = chain.next() {
                    return Some(entry);
                }
            }
            if self.bucket_idx >= self.buckets.len() {
                return None;
            }
            self.chain = self.buckets[self.bucket_idx].as_ref().map(Chain::iter);
            self.bucket_idx += 1;
        }
    }
}

#[cfg(test)]
mod test {
    use super::{DEFAULT_CAPACITY, HashTable};

    // Under capacity 16 the rolling hash of a one-character ASCII key
    // reduces to `code % 16`, and under capacity 32 to `code % 32`, so
    // 'a'..='m' occupy 13 distinct buckets before and after a growth.

    #[test]
    fn single_char_buckets_are_code_mod_capacity() {
        let t: HashTable<String> = HashTable::new();
        assert_eq!(t.hash("a"), 97 % 16);
        assert_eq!(t.hash("q"), 113 % 16);
        assert_eq!(t.hash(""), 0);
    }

    #[test]
    fn set_and_get() {
        let mut t: HashTable<String> = HashTable::new();

        t.set("a".into()).unwrap();
        t.set("b".into()).unwrap();

        assert_eq!(t.len(), 2);
        assert_eq!(t.get("a").map(String::as_str), Some("a"));
        assert!(t.has("b"));
        assert!(!t.has("c"));
        assert!(t.get("c").is_none());
    }

    #[test]
    fn duplicate_key_leaves_len_alone() {
        let mut t: HashTable<String> = HashTable::new();

        t.set("a".into()).unwrap();
        t.set("a".into()).unwrap();

        assert_eq!(t.len(), 1);
        assert_eq!(t.bucket_count(), 1);
    }

    #[test]
    fn collisions_share_a_bucket_without_growth() {
        let mut t: HashTable<String> = HashTable::new();

        // 'a' (97) and 'q' (113) both land in bucket 1 of 16
        t.set("a".into()).unwrap();
        t.set("q".into()).unwrap();

        assert_eq!(t.len(), 2);
        assert_eq!(t.bucket_count(), 1);
        assert_eq!(t.capacity(), DEFAULT_CAPACITY);
        assert_eq!(t.buckets[1].as_ref().map(|c| c.len()), Some(2));
    }

    #[test]
    fn growth_doubles_capacity_and_keeps_entries() {
        let mut t: HashTable<String> = HashTable::new();

        // 13 distinct buckets; the 11th ('k') pushes the occupied
        // count past 16 * 0.65 = 10.4 and doubles the capacity
        for c in 'a'..='m' {
            t.set(c.to_string()).unwrap();
        }

        assert_eq!(t.capacity(), 32);
        assert_eq!(t.len(), 13);
        assert_eq!(t.bucket_count(), 13);
        for c in 'a'..='m' {
            assert!(t.has(&c.to_string()), "lost {c} across the rehash");
        }
    }

    #[test]
    fn growth_triggers_exactly_on_the_eleventh_bucket() {
        let mut t: HashTable<String> = HashTable::new();

        for c in 'a'..='j' {
            t.set(c.to_string()).unwrap();
        }
        assert_eq!(t.capacity(), DEFAULT_CAPACITY);
        assert_eq!(t.bucket_count(), 10);

        t.set("k".to_string()).unwrap();
        assert_eq!(t.capacity(), 32);
    }

    #[test]
    fn remove_clears_emptied_slot() {
        let mut t: HashTable<String> = HashTable::new();

        t.set("a".into()).unwrap();
        t.set("q".into()).unwrap();
        assert_eq!(t.bucket_count(), 1);

        assert!(t.remove("a").unwrap());
        assert_eq!(t.len(), 1);
        // "q" still chained in bucket 1
        assert_eq!(t.bucket_count(), 1);

        assert!(t.remove("q").unwrap());
        assert_eq!(t.len(), 0);
        assert_eq!(t.bucket_count(), 0);
        assert!(t.buckets[1].is_none());
    }

    #[test]
    fn remove_missing_reports_false() {
        let mut t: HashTable<String> = HashTable::new();
        t.set("a".into()).unwrap();

        // occupied bucket, absent key
        assert!(!t.remove("q").unwrap());
        // empty bucket
        assert!(!t.remove("b").unwrap());
        assert_eq!(t.len(), 1);
    }

    #[test]
    fn clear_keeps_grown_capacity() {
        let mut t: HashTable<String> = HashTable::new();
        for c in 'a'..='m' {
            t.set(c.to_string()).unwrap();
        }
        assert_eq!(t.capacity(), 32);

        t.clear();
        assert_eq!(t.len(), 0);
        assert_eq!(t.bucket_count(), 0);
        assert_eq!(t.capacity(), 32);
        assert!(t.is_empty());
        assert!(!t.has("a"));
    }

    #[test]
    fn iter_walks_buckets_then_chains() {
        let mut t: HashTable<String> = HashTable::new();

        // bucket 1: "a" then colliding "q"; bucket 2: "b"
        t.set("b".into()).unwrap();
        t.set("a".into()).unwrap();
        t.set("q".into()).unwrap();

        let order: Vec<_> = t.iter().map(String::as_str).collect();
        assert_eq!(order, ["a", "q", "b"]);
    }
}
