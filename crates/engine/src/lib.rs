//! Statement delta engine.
//!
//! This crate decides which statement entries are new between two polls of
//! the bank feed and owns the snapshot retained between polls.

pub mod delta;

pub use delta::*;
