//! Bucket chain: the collision list living in one table slot.
//!
//! A chain is created with its first entry and the table drops the
//! whole chain once the last entry is removed, so an occupied slot
//! always holds at least one node in steady state.

/// What a chain stores. The map keeps `(key, value)` pairs, the set
/// keeps bare values; both hash and compare on [`Entry::key`].
pub trait Entry {
    /// The string the table hashes and chains compare on.
    fn key(&self) -> &str;

    /// Called by the table when `set` finds `key()` already present.
    /// The map replaces its value in place, the set does nothing.
    fn overwrite(&mut self, other: Self);
}

struct Node<E> {
    entry: E,
    next: Option<Box<Node<E>>>,
}

/// Singly linked list of entries sharing one bucket index.
///
/// Nodes are owned by their predecessor, the head by the chain. There
/// is no stored tail link; `append` walks the links instead, which
/// stays cheap because the table's growth policy keeps chains short.
pub struct Chain<E> {
    head: Option<Box<Node<E>>>,
    len: usize,
}

impl<E: Entry> Chain<E> {
    /// Creates a one-entry chain. Chains never start empty: the table
    /// builds one on the first insert into a bucket.
    pub fn new(entry: E) -> Self {
        Self {
            head: Some(Box::new(Node { entry, next: None })),
            len: 1,
        }
    }

    /// Links `entries` in order (node i to node i + 1); `None` when the
    /// sequence is empty. Callers keep the keys distinct.
    pub fn from_entries<I>(entries: I) -> Option<Self>
    where
        I: IntoIterator<Item = E>,
    {
        let mut entries = entries.into_iter();
        let mut chain = Self::new(entries.next()?);
        for entry in entries {
            chain.append(entry);
        }
        Some(chain)
    }

    /// Number of entries in the chain.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Shorthand for `self.len() == 0`
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Links a new entry after the current last node.
    pub fn append(&mut self, entry: E) {
        let mut cursor = &mut self.head;
        while let Some(node) = cursor {
            cursor = &mut node.next;
        }
        *cursor = Some(Box::new(Node { entry, next: None }));
        self.len += 1;
    }

    /// Links a new entry in front of the current head.
    pub fn prepend(&mut self, entry: E) {
        let next = self.head.take();
        self.head = Some(Box::new(Node { entry, next }));
        self.len += 1;
    }

    /// Entry at `index`, or `None` past the end.
    pub fn at(&self, index: usize) -> Option<&E> {
        self.iter().nth(index)
    }

    /// Entry whose key equals `key`.
    pub fn get(&self, key: &str) -> Option<&E> {
        self.iter().find(|e| e.key() == key)
    }

    /// Mutable variant of [`Chain::get`], used for in-place overwrite.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut E> {
        let mut node = self.head.as_deref_mut()?;
        loop {
            if node.entry.key() == key {
                return Some(&mut node.entry);
            }
            node = node.next.as_deref_mut()?;
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Position of the entry with `key`, counting from the head.
    pub fn find_index(&self, key: &str) -> Option<usize> {
        self.iter().position(|e| e.key() == key)
    }

    /// Splices `entry` in before position `index`. `index == len`
    /// appends, `0` prepends; anything past the end is a no-op and
    /// returns `false`.
    pub fn insert_at(&mut self, index: usize, entry: E) -> bool {
        if index > self.len {
            return false;
        }
        let mut cursor = &mut self.head;
        for _ in 0..index {
            match cursor {
                Some(node) => cursor = &mut node.next,
                None => return false,
            }
        }
        let next = cursor.take();
        *cursor = Some(Box::new(Node { entry, next }));
        self.len += 1;
        true
    }

    /// Unlinks the node at `index`, handing its successor to the
    /// predecessor (or to `head` when `index` is 0).
    pub fn remove_at(&mut self, index: usize) -> Option<E> {
        if index >= self.len {
            return None;
        }
        let mut cursor = &mut self.head;
        for _ in 0..index {
            match cursor {
                Some(node) => cursor = &mut node.next,
                None => return None,
            }
        }
        let node = cursor.take()?;
        *cursor = node.next;
        self.len -= 1;
        Some(node.entry)
    }

    /// Key-based removal: find the position, then splice at it.
    /// `None` when the key is absent.
    pub fn remove(&mut self, key: &str) -> Option<E> {
        let index = self.find_index(key)?;
        self.remove_at(index)
    }

    // [adapters]

    pub fn iter(&self) -> Iter<'_, E> {
        Iter::new(self)
    }

    // [private]

    fn pop_head(&mut self) -> Option<E> {
        let node = self.head.take()?;
        self.head = node.next;
        self.len -= 1;
        Some(node.entry)
    }
}

impl<E> Drop for Chain<E> {
    fn drop(&mut self) {
        let mut curr = self.head.take();
        while let Some(mut node) = curr {
            curr = node.next.take();
            // node goes out of scope here, calling drop
        }
    }
}

impl<E: Entry + std::fmt::Debug> std::fmt::Debug for Chain<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<E: Entry> IntoIterator for Chain<E> {
    type Item = <IterOwn<E> as Iterator>::Item;
    type IntoIter = IterOwn<E>;

    fn into_iter(self) -> Self::IntoIter {
        IterOwn::new(self)
    }
}

// [iterators]

pub struct Iter<'a, E> {
    current: Option<&'a Node<E>>,
    len: usize,
}

impl<'a, E> Iter<'a, E> {
    fn new(chain: &'a Chain<E>) -> Self {
        Self {
            current: chain.head.as_deref(),
            len: chain.len,
        }
    }
}

impl<'a, E> Iterator for Iter<'a, E> {
    type Item = &'a E;

    fn next(&mut self) -> Option<Self::Item> {
        match self.current.take() {
            None => None,
            Some(node) => {
                self.current = node.next.as_deref();
                Some(&node.entry)
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

pub struct IterOwn<E>(Chain<E>);

impl<E: Entry> IterOwn<E> {
    fn new(chain: Chain<E>) -> Self {
        Self(chain)
    }
}

impl<E: Entry> Iterator for IterOwn<E> {
    type Item = E;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.pop_head()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.0.len, Some(self.0.len))
    }
}
