//! Fib Cursor - A Fibonacci cursor server
//!
//! Serves next/current/previous over the Fibonacci sequence from a bounded LRU
//! cache, recomputing evicted values on demand, and checkpoints the cursor to disk.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod persistence;
pub mod sequence;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use persistence::BackupFile;
pub use sequence::{FibSequence, SequenceStore};
pub use tasks::spawn_backup_task;
