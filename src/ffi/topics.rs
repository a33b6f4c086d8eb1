//! FFI functions over the process-wide topic registry
//!
//! Every function identifies a topic by a NUL-terminated name plus the
//! record size, the same pair a `TopicDescriptor` carries on the Rust side.
//! Null pointers and non-UTF-8 names make the call return `false`. Names are
//! only borrowed for the duration of the call.
//!
//! # Thread Safety
//! All functions are thread-safe.

use std::ffi::{c_char, c_void};

use crate::registry::TopicRegistry;

use super::{
    types::{MonetErrorCode, MonetTopicInfo},
    utils::descriptor_from_c,
};

/// Check whether a topic has at least one publisher
///
/// # Safety
/// `name` must be null or a valid NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn monet_is_advertised(name: *const c_char, size: usize) -> bool {
    match descriptor_from_c(name, size) {
        Some(descriptor) => TopicRegistry::global().is_advertised(&descriptor),
        None => false,
    }
}

/// Advertise a topic, creating it on first use
///
/// # Safety
/// `name` must be null or a valid NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn monet_advertise(name: *const c_char, size: usize) -> bool {
    match descriptor_from_c(name, size) {
        Some(descriptor) => TopicRegistry::global().advertise(&descriptor),
        None => false,
    }
}

/// Release one advertisement of a topic
///
/// # Safety
/// `name` must be null or a valid NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn monet_unadvertise(name: *const c_char, size: usize) -> bool {
    match descriptor_from_c(name, size) {
        Some(descriptor) => TopicRegistry::global().unadvertise(&descriptor),
        None => false,
    }
}

/// Publish `size` bytes from `data`
///
/// # Safety
/// `name` must be null or a valid NUL-terminated string; `data` must be
/// null or valid for reads of `size` bytes.
#[no_mangle]
pub unsafe extern "C" fn monet_publish(
    name: *const c_char,
    size: usize,
    data: *const c_void,
) -> bool {
    if data.is_null() {
        return false;
    }

    match descriptor_from_c(name, size) {
        Some(descriptor) => {
            let data = std::slice::from_raw_parts(data as *const u8, size);
            TopicRegistry::global().publish(&descriptor, data)
        }
        None => false,
    }
}

/// Copy the topic record into `dst`
///
/// When `only_if_updated` is set and `*generation` is current, returns true
/// without writing `dst`. Otherwise copies and stores the topic generation
/// in `*generation`.
///
/// # Safety
/// `name` must be null or a valid NUL-terminated string; `dst` must be null
/// or valid for writes of `size` bytes; `generation` must be null or valid
/// for reads and writes.
#[no_mangle]
pub unsafe extern "C" fn monet_copy(
    name: *const c_char,
    size: usize,
    dst: *mut c_void,
    generation: *mut u64,
    only_if_updated: bool,
) -> bool {
    if dst.is_null() || generation.is_null() {
        return false;
    }

    match descriptor_from_c(name, size) {
        Some(descriptor) => {
            let dst = std::slice::from_raw_parts_mut(dst as *mut u8, size);
            TopicRegistry::global().copy(&descriptor, dst, &mut *generation, only_if_updated)
        }
        None => false,
    }
}

/// Check whether the topic was published past `last_generation`
///
/// # Safety
/// `name` must be null or a valid NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn monet_updates_available(
    name: *const c_char,
    size: usize,
    last_generation: u64,
) -> bool {
    match descriptor_from_c(name, size) {
        Some(descriptor) => {
            TopicRegistry::global().updates_available(&descriptor, last_generation)
        }
        None => false,
    }
}

/// Store the current generation of a topic in `*generation`
///
/// Works whether or not the topic is live; fails for unknown topics and
/// size mismatches.
///
/// # Safety
/// `name` must be null or a valid NUL-terminated string; `generation` must
/// be null or valid for writes.
#[no_mangle]
pub unsafe extern "C" fn monet_topic_generation(
    name: *const c_char,
    size: usize,
    generation: *mut u64,
) -> bool {
    if generation.is_null() {
        return false;
    }

    let descriptor = match descriptor_from_c(name, size) {
        Some(descriptor) => descriptor,
        None => return false,
    };

    match TopicRegistry::global().topic_info(descriptor.name()) {
        Some(snapshot) if snapshot.size == size => {
            *generation = snapshot.generation;
            true
        }
        _ => false,
    }
}

/// Fill `info` with a snapshot of the topic
///
/// # Safety
/// `name` must be null or a valid NUL-terminated string; `info` must be
/// null or valid for writes.
#[no_mangle]
pub unsafe extern "C" fn monet_topic_info(
    name: *const c_char,
    size: usize,
    info: *mut MonetTopicInfo,
) -> MonetErrorCode {
    if info.is_null() {
        return MonetErrorCode::InvalidParameter;
    }

    let descriptor = match descriptor_from_c(name, size) {
        Some(descriptor) => descriptor,
        None => return MonetErrorCode::InvalidParameter,
    };

    match TopicRegistry::global().topic_info(descriptor.name()) {
        Some(snapshot) if snapshot.size != size => MonetErrorCode::SizeMismatch,
        Some(snapshot) => {
            *info = MonetTopicInfo {
                size: snapshot.size,
                generation: snapshot.generation,
                publisher_count: snapshot.publisher_count,
                advertised: snapshot.is_advertised(),
            };
            MonetErrorCode::Success
        }
        None => MonetErrorCode::TopicNotFound,
    }
}

/// Advertise a topic, reporting why it failed
///
/// # Safety
/// `name` must be null or a valid NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn monet_advertise_checked(
    name: *const c_char,
    size: usize,
) -> MonetErrorCode {
    match descriptor_from_c(name, size) {
        Some(descriptor) => match TopicRegistry::global().try_advertise(&descriptor) {
            Ok(_) => MonetErrorCode::Success,
            Err(err) => MonetErrorCode::from(&err),
        },
        None => MonetErrorCode::InvalidParameter,
    }
}
