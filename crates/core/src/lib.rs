//! Domain types and pure pricing logic shared by the database and API crates.
//!
//! This crate has no database or HTTP dependencies so the arithmetic that
//! prices quotes and projects can be unit-tested in isolation.

pub mod error;
pub mod pricing;
pub mod rate_card;
pub mod search;
pub mod types;
