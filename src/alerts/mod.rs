//! Alert feed.
//!
//! - [`record`]: immutable [`AlertRecord`] values and their [`AlertAge`] labels
//! - [`feed`]: the bounded newest-first [`AlertFeed`]
//! - [`generator`]: synthetic and status-change alerts

pub mod feed;
pub mod generator;
pub mod record;

pub use feed::{AlertFeed, FeedEntry, AGE_QUANTUM, DEFAULT_MAX_VISIBLE};
pub use generator::AlertGenerator;
pub use record::{AlertAge, AlertRecord, Severity};
