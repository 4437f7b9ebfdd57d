//! Background Tasks Module
//!
//! # Tasks
//! - Expiry reaper: purges expired cache entries when `CLEANUP_INTERVAL` > 0

mod cleanup;

pub use cleanup::spawn_cleanup_task;
