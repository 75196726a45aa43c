//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - Backup: Checkpoints the cursor index to the backup file at configured intervals

mod backup;

pub use backup::{persist_now, spawn_backup_task};
