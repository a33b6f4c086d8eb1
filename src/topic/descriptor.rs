//! Topic descriptors: the name + size pair that identifies a topic

use std::fmt;

use crate::error::{MonetError, Result};

/// Maximum topic name length
pub const MAX_TOPIC_NAME_LENGTH: usize = 255;

/// Identifies a topic and the exact byte length of its record
///
/// Descriptors are meant to be declared once as `const`/`static` values and
/// shared by every producer and consumer of the topic. Two descriptors with
/// the same name must carry the same size; the registry rejects calls that
/// disagree with the size a topic was created with.
///
/// The name is borrowed. The registry copies it into its own key the first
/// time a topic is advertised and never holds on to the descriptor, so a
/// name built at runtime works as well as a literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TopicDescriptor<'a> {
    name: &'a str,
    size: usize,
}

impl<'a> TopicDescriptor<'a> {
    /// Create a descriptor from a name and record size in bytes
    pub const fn new(name: &'a str, size: usize) -> Self {
        Self { name, size }
    }

    /// Create a descriptor sized for record type `T`
    pub const fn of<T>(name: &'a str) -> Self {
        Self::new(name, std::mem::size_of::<T>())
    }

    /// Topic name
    pub const fn name(&self) -> &'a str {
        self.name
    }

    /// Record size in bytes
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Check that the descriptor can name a topic
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(MonetError::invalid_descriptor("topic name is empty"));
        }

        if self.name.len() > MAX_TOPIC_NAME_LENGTH {
            return Err(MonetError::invalid_descriptor(format!(
                "topic name exceeds {} bytes",
                MAX_TOPIC_NAME_LENGTH
            )));
        }

        if self.size == 0 {
            return Err(MonetError::invalid_descriptor(format!(
                "topic {} has zero record size",
                self.name
            )));
        }

        Ok(())
    }
}

impl fmt::Display for TopicDescriptor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} bytes)", self.name, self.size)
    }
}
