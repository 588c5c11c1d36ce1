//! Report store implementations.

pub mod local;
pub mod memory;

pub use local::LocalReportStore;
pub use memory::MemoryReportStore;
