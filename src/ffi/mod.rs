//! C Foreign Function Interface (FFI)
//!
//! This module exposes the process-wide topic registry to C and C++ callers,
//! organized into logical submodules.

pub mod topics;
pub mod types;
pub mod utils;
pub mod version;

#[cfg(test)]
mod topics_test;

// Re-export commonly used types and functions
pub use types::{MonetErrorCode, MonetTopicInfo, MonetVersion};

// Topic API
pub use topics::{
    monet_advertise, monet_advertise_checked, monet_copy, monet_is_advertised, monet_publish,
    monet_topic_generation, monet_topic_info, monet_unadvertise, monet_updates_available,
};

// Version API
pub use version::{
    monet_version, monet_version_compatible, monet_version_major, monet_version_minor,
    monet_version_patch, monet_version_string,
};
