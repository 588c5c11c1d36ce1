//! # journal-core
//!
//! Core crate for Field Journal. Contains the configuration schemas, the
//! report source/sink traits, the report domain types, and the unified
//! error system.
//!
//! This crate has **no** internal dependencies on other Field Journal crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
