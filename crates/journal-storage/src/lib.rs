//! # journal-storage
//!
//! Report folder stores for Field Journal. The local filesystem store backs
//! the running service; the in-memory store lets the scanning and
//! statistics logic be exercised without touching disk.

pub mod layout;
pub mod providers;

pub use layout::FolderLayout;
pub use providers::{LocalReportStore, MemoryReportStore};
