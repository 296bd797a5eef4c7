//! Shared static catalogs used across all jobgram crates.

pub mod catalog;
