use super::TableError;
use super::hash_table::HashTable;
use crate::chain::Entry;

/// One stored key/value pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pair {
    pub key: String,
    pub value: String,
}

impl Entry for Pair {
    fn key(&self) -> &str {
        &self.key
    }

    fn overwrite(&mut self, other: Self) {
        self.value = other.value;
    }
}

/// String-keyed, string-valued hash map over chained buckets.
///
/// Lookups and removals of absent keys come back as `None`/`false`;
/// the only error is the defensive bucket-index guard, which the
/// hash construction cannot trip.
#[derive(Debug)]
pub struct Map {
    table: HashTable<Pair>,
}

impl Map {
    /// Creates an empty map with the default capacity of 16 buckets.
    pub fn new() -> Self {
        Self {
            table: HashTable::new(),
        }
    }

    /// Bulk-loads `pairs` through repeated [`Map::set`], so later
    /// duplicates overwrite earlier ones.
    pub fn from_entries<K, V, I>(pairs: I) -> Result<Self, TableError>
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut map = Self::new();
        for (key, value) in pairs {
            map.set(key, value)?;
        }
        Ok(map)
    }

    /// Inserts `value` under `key`, overwriting in place if the key is
    /// already present (the entry count does not change then).
    pub fn set<K, V>(&mut self, key: K, value: V) -> Result<(), TableError>
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.table.set(Pair {
            key: key.into(),
            value: value.into(),
        })
    }

    /// Value stored under `key`, or `None`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.table.get(key).map(|e| e.value.as_str())
    }

    pub fn has(&self, key: &str) -> bool {
        self.table.has(key)
    }

    /// Removes `key`, reporting whether an entry was there.
    pub fn remove(&mut self, key: &str) -> Result<bool, TableError> {
        self.table.remove(key)
    }

    /// Drops every entry but keeps the current capacity.
    pub fn clear(&mut self) {
        self.table.clear();
    }

    /// Number of entries in the map.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Current bucket-array length.
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    // [adapters]

    /// Keys in bucket-then-chain order. The order is not sorted and
    /// not stable across a growth.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.table.iter().map(|e| e.key.as_str())
    }

    /// Values, in the same order as [`Map::keys`].
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.table.iter().map(|e| e.value.as_str())
    }

    /// Key/value pairs, in the same order as [`Map::keys`].
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.table.iter().map(|e| (e.key.as_str(), e.value.as_str()))
    }
}

impl Default for Map {
    fn default() -> Self {
        Self::new()
    }
}
