use super::TableError;
use super::hash_table::HashTable;
use crate::chain::Entry;

// A set entry is the member string itself; re-adding a member is a
// no-op, there is no payload to replace.
impl Entry for String {
    fn key(&self) -> &str {
        self
    }

    fn overwrite(&mut self, _other: Self) {}
}

/// Hash set of strings over the same chained table as [`Map`].
///
/// [`Map`]: super::Map
#[derive(Debug)]
pub struct Set {
    table: HashTable<String>,
}

impl Set {
    /// Creates an empty set with the default capacity of 16 buckets.
    pub fn new() -> Self {
        Self {
            table: HashTable::new(),
        }
    }

    /// Bulk-loads `values` through repeated [`Set::set`]; duplicates
    /// collapse into one member.
    pub fn from_values<V, I>(values: I) -> Result<Self, TableError>
    where
        V: Into<String>,
        I: IntoIterator<Item = V>,
    {
        let mut set = Self::new();
        for value in values {
            set.set(value)?;
        }
        Ok(set)
    }

    /// Adds `value` to the set. Adding a present member changes
    /// nothing, including the entry count.
    pub fn set<V: Into<String>>(&mut self, value: V) -> Result<(), TableError> {
        self.table.set(value.into())
    }

    /// The stored member equal to `value`, or `None`.
    pub fn get(&self, value: &str) -> Option<&str> {
        self.table.get(value).map(String::as_str)
    }

    pub fn has(&self, value: &str) -> bool {
        self.table.has(value)
    }

    /// Removes `value`, reporting whether it was a member.
    pub fn remove(&mut self, value: &str) -> Result<bool, TableError> {
        self.table.remove(value)
    }

    /// Drops every member but keeps the current capacity.
    pub fn clear(&mut self) {
        self.table.clear();
    }

    /// Number of members in the set.
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

    /// Members in bucket-then-chain order; not sorted, not stable
    /// across a growth.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.table.iter().map(String::as_str)
    }
}

impl Default for Set {
    fn default() -> Self {
        Self::new()
    }
}
