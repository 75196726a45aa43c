//! Sequence Module
//!
//! The Fibonacci cursor, its recovery logic, and the lock-guarded store
//! shared with request handlers and the backup task.

mod fib;
mod store;


pub use fib::{FibSequence, SequenceStats};
pub use store::SequenceStore;
