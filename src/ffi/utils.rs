//! FFI utilities: turning C arguments into borrowed Rust views

use std::ffi::{c_char, CStr};

use crate::topic::TopicDescriptor;

/// Build a descriptor that borrows a C string name
///
/// Returns `None` for null pointers and names that are not UTF-8. Nothing is
/// copied: the registry only takes its own copy of the name when a call
/// creates a topic.
///
/// # Safety
/// `name` must be null or point to a NUL-terminated string that stays valid
/// and unmodified for `'a`.
pub unsafe fn descriptor_from_c<'a>(
    name: *const c_char,
    size: usize,
) -> Option<TopicDescriptor<'a>> {
    if name.is_null() {
        return None;
    }

    let name = CStr::from_ptr(name).to_str().ok()?;
    Some(TopicDescriptor::new(name, size))
}
