//! Server-rendered pages.

pub mod dashboard;
