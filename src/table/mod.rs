use thiserror::Error;

mod hash_table;
mod map;
mod set;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum TableError {
    /// Defensive guard on the computed bucket index. The modulo
    /// construction in the hash cannot produce this today; the check
    /// only exists to catch future edits to the hash function.
    #[error("bucket index {index} out of range, capacity: {capacity}")]
    IndexOutOfRange { index: usize, capacity: usize },
}

pub use hash_table::{DEFAULT_CAPACITY, LOAD_FACTOR};
pub use map::{Map, Pair};
pub use set::Set;
