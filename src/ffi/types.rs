//! FFI type definitions

use crate::error::MonetError;

/// Error codes for C API
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonetErrorCode {
    Success = 0,
    InvalidParameter = 1,
    NotAdvertised = 2,
    UnbalancedUnadvertise = 3,
    AllocationFailure = 4,
    CopyFailure = 5,
    UninitializedBuffer = 6,
    SizeMismatch = 7,
    PublisherOverflow = 8,
    TopicLimit = 9,
    TopicNotFound = 10,
}

impl From<&MonetError> for MonetErrorCode {
    fn from(error: &MonetError) -> Self {
        match error {
            MonetError::NotAdvertised { .. } => MonetErrorCode::NotAdvertised,
            MonetError::UnbalancedUnadvertise { .. } => MonetErrorCode::UnbalancedUnadvertise,
            MonetError::AllocationFailure { .. } => MonetErrorCode::AllocationFailure,
            MonetError::CopyFailure { .. } => MonetErrorCode::CopyFailure,
            MonetError::UninitializedBuffer { .. } => MonetErrorCode::UninitializedBuffer,
            MonetError::SizeMismatch { .. } => MonetErrorCode::SizeMismatch,
            MonetError::PublisherOverflow { .. } => MonetErrorCode::PublisherOverflow,
            MonetError::TopicLimit { .. } => MonetErrorCode::TopicLimit,
            MonetError::InvalidDescriptor { .. } | MonetError::InvalidParameter { .. } => {
                MonetErrorCode::InvalidParameter
            }
        }
    }
}

impl From<MonetError> for MonetErrorCode {
    fn from(error: MonetError) -> Self {
        Self::from(&error)
    }
}

/// Topic snapshot for C callers
#[repr(C)]
#[derive(Debug, Clone, Copy, Default)]
pub struct MonetTopicInfo {
    pub size: usize,
    pub generation: u64,
    pub publisher_count: u32,
    pub advertised: bool,
}

/// Library version for C callers
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonetVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}
