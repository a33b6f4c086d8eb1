//! Error types and handling for Monet

/// Result type alias for Monet operations
pub type Result<T> = std::result::Result<T, MonetError>;

/// Reasons a registry operation can be rejected
///
/// The boolean registry API collapses every variant to `false`; the
/// `try_*` forms hand them back so callers can tell misuse from a topic
/// that simply is not live yet.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MonetError {
    /// Topic has no active publishers (or was never created)
    #[error("Topic not advertised: {topic}")]
    NotAdvertised { topic: String },

    /// Unadvertise called while the publisher count is already zero
    #[error("Unbalanced unadvertise: {topic} has no active publishers")]
    UnbalancedUnadvertise { topic: String },

    /// Backing buffer could not be allocated
    #[error("Allocation failure for {topic}: {size} bytes")]
    AllocationFailure { topic: String, size: usize },

    /// Byte copy into or out of a topic buffer could not complete
    #[error("Copy failure on {topic}: expected {expected} bytes, got {actual}")]
    CopyFailure {
        topic: String,
        expected: usize,
        actual: usize,
    },

    /// Entry exists but carries no buffer
    #[error("Uninitialized buffer for topic: {topic}")]
    UninitializedBuffer { topic: String },

    /// Descriptor size disagrees with the size the topic was created with
    #[error("Size mismatch on {topic}: registered {registered}, requested {requested}")]
    SizeMismatch {
        topic: String,
        registered: usize,
        requested: usize,
    },

    /// Descriptor cannot name a topic (empty name, zero size)
    #[error("Invalid descriptor: {message}")]
    InvalidDescriptor { message: String },

    /// Publisher count would exceed its counter width
    #[error("Publisher count overflow on topic: {topic}")]
    PublisherOverflow { topic: String },

    /// Registry already holds its configured maximum of topics
    #[error("Topic limit reached: {limit}")]
    TopicLimit { limit: usize },

    /// Invalid parameters or configuration
    #[error("Invalid parameter: {parameter} - {message}")]
    InvalidParameter { parameter: String, message: String },
}

impl MonetError {
    /// Create a not advertised error
    pub fn not_advertised(topic: impl Into<String>) -> Self {
        Self::NotAdvertised {
            topic: topic.into(),
        }
    }

    /// Create an unbalanced unadvertise error
    pub fn unbalanced_unadvertise(topic: impl Into<String>) -> Self {
        Self::UnbalancedUnadvertise {
            topic: topic.into(),
        }
    }

    /// Create an allocation failure error
    pub fn allocation_failure(topic: impl Into<String>, size: usize) -> Self {
        Self::AllocationFailure {
            topic: topic.into(),
            size,
        }
    }

    /// Create a copy failure error
    pub fn copy_failure(topic: impl Into<String>, expected: usize, actual: usize) -> Self {
        Self::CopyFailure {
            topic: topic.into(),
            expected,
            actual,
        }
    }

    /// Create an uninitialized buffer error
    pub fn uninitialized_buffer(topic: impl Into<String>) -> Self {
        Self::UninitializedBuffer {
            topic: topic.into(),
        }
    }

    /// Create a size mismatch error
    pub fn size_mismatch(topic: impl Into<String>, registered: usize, requested: usize) -> Self {
        Self::SizeMismatch {
            topic: topic.into(),
            registered,
            requested,
        }
    }

    /// Create an invalid descriptor error
    pub fn invalid_descriptor(message: impl Into<String>) -> Self {
        Self::InvalidDescriptor {
            message: message.into(),
        }
    }

    /// Create a publisher overflow error
    pub fn publisher_overflow(topic: impl Into<String>) -> Self {
        Self::PublisherOverflow {
            topic: topic.into(),
        }
    }

    /// Create a topic limit error
    pub fn topic_limit(limit: usize) -> Self {
        Self::TopicLimit { limit }
    }

    /// Create an invalid parameter error
    pub fn invalid_parameter(parameter: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            parameter: parameter.into(),
            message: message.into(),
        }
    }

    /// True for errors that mean "the topic is not live right now"
    ///
    /// Callers polling during startup treat these as retry-later.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::NotAdvertised { .. })
    }
}
