//! # Monet - In-Process Topic Registry
//!
//! Monet is a small publish/subscribe store for threads sharing one address
//! space. Producers advertise a named topic and publish fixed-size records
//! into it; consumers poll for the latest record and use a generation
//! counter to tell whether it changed since their last read.
//!
//! ## Features
//!
//! - **One live value per topic**: a single fixed-size slot, overwritten on publish
//! - **Generation tracking**: monotonic per-topic counter, bumped on every publish
//! - **Reference-counted advertisement**: many producers may share a topic
//! - **Per-topic locking**: publishes are atomic for readers, topics never contend
//! - **Typed RAII handles**: `Publisher<T>` / `Subscriber<T>` over `bytemuck::Pod` records
//! - **C API**: optional `extern "C"` surface over the process-wide registry
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────┐         ┌──────────────────┐
//! │  Publisher<T>    │         │  Subscriber<T>   │
//! │  advertise/drop  │         │  cache + last gen│
//! └────────┬─────────┘         └────────┬─────────┘
//!          │ publish                    │ copy / updates_available
//!          ▼                            ▼
//! ┌─────────────────────────────────────────────────┐
//! │                 TopicRegistry                   │
//! │  name → Mutex<TopicEntry>                       │
//! │         buffer │ generation │ publisher_count   │
//! └─────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use monet::{topics::Iso, Publisher, Subscriber, TopicRegistry};
//!
//! let registry = Arc::new(TopicRegistry::new());
//! let mut publisher = Publisher::<Iso>::new(registry.clone());
//! let mut subscriber = Subscriber::<Iso>::new(registry);
//!
//! publisher.publish(&Iso::new(100, 5));
//! assert!(subscriber.updated());
//! assert!(subscriber.update());
//! assert_eq!(subscriber.get().iso, 5);
//! ```

// Core modules
pub mod error;
pub mod registry;
pub mod topic;

// Records shipped with the crate
pub mod topics;

#[cfg(feature = "c-api")]
pub mod ffi;

// Main API re-exports
pub use error::{MonetError, Result};
pub use registry::{
    Publisher, RegistryConfig, RegistryStats, RegistryStatsSnapshot, Subscriber, TopicInfo,
    TopicRegistry,
};
pub use topic::{CopyOutcome, Generation, TopicDescriptor, TopicRecord};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const VERSION_MAJOR: u32 = 0;
pub const VERSION_MINOR: u32 = 1;
pub const VERSION_PATCH: u32 = 0;

/// Default configuration constants
pub mod config {
    /// Name of the default registry, used in log output
    pub const DEFAULT_REGISTRY_NAME: &str = "monet";

    /// Default upper bound on a single topic record (1MB)
    pub const DEFAULT_MAX_RECORD_SIZE: usize = 1024 * 1024;
}
