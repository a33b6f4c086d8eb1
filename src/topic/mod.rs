//! Topic identification and per-topic storage
//!
//! This module holds the pieces every participant agrees on:
//! - `TopicDescriptor`: name + record size, declared once per topic
//! - `TopicRecord`: binds a plain-old-data layout to a descriptor
//! - `TopicEntry`: the single live record slot the registry keeps per topic

pub mod descriptor;
pub mod entry;
pub mod record;


// Re-export main types for convenience
pub use descriptor::{TopicDescriptor, MAX_TOPIC_NAME_LENGTH};
pub use entry::{CopyOutcome, Generation, TopicEntry};
pub use record::TopicRecord;
