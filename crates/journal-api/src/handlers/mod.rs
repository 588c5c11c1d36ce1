//! Route handlers organized by domain.

pub mod dashboard;
pub mod health;
pub mod report;
pub mod statistics;
pub mod upload;
