//! Bank statement and currency feeds.
//!
//! - `feed` - the `BankFeed` trait consumed by the scheduler and the command handlers
//! - `bank` - Monobank REST implementation
//! - `error` - `FeedError` and its transient/permanent classification

pub mod bank;
pub mod error;
pub mod feed;

pub use bank::*;
pub use error::*;
pub use feed::*;
