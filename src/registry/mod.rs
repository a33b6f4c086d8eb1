//! Topic registry and the handles built on it
//!
//! The registry owns one record slot per topic name, counts the publishers
//! advertising each topic and versions every publish with a generation.
//! `Publisher<T>` and `Subscriber<T>` bind a record type to a registry and
//! keep advertisements balanced through RAII.

pub mod config;
pub mod global;
pub mod handles;
pub mod manager;
pub mod stats;

pub use config::RegistryConfig;
pub use handles::{Publisher, Subscriber};
pub use manager::{TopicInfo, TopicRegistry};
pub use stats::{RegistryStats, RegistryStatsSnapshot};
