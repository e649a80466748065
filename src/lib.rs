//! String-keyed hash map and set built on open hashing with separate
//! chaining.
//!
//! One generic chained table backs both containers; they differ only
//! in their entry shape. Buckets grow lazily (a chain exists only
//! while it has entries) and the bucket array doubles once the number
//! of *occupied* buckets crosses the load factor, so collisions piling
//! into one chain never trigger a resize on their own.
//!
//! Everything here is single-threaded; `&mut self` on the mutating
//! operations is the whole locking discipline.

pub mod chain;
mod macros;
pub mod table;

pub use table::{Map, Pair, Set, TableError};
