//! Core data types for the statement monitor.

pub mod clock;
pub mod entry;
pub mod money;
pub mod rate;
pub mod snapshot;

pub use clock::*;
pub use entry::*;
pub use money::*;
pub use rate::*;
pub use snapshot::*;
