//! Library version as seen from C
//!
//! The version string is a static NUL-terminated literal, so callers never
//! free it.

use std::ffi::c_char;

use super::types::MonetVersion;

static VERSION_CSTR: &str = concat!(env!("CARGO_PKG_VERSION"), "\0");

impl MonetVersion {
    /// Version this library was built as
    pub const fn current() -> Self {
        Self {
            major: crate::VERSION_MAJOR,
            minor: crate::VERSION_MINOR,
            patch: crate::VERSION_PATCH,
        }
    }

    /// Whether headers for `major.minor` can drive this library
    ///
    /// Before 1.0 every minor release may break the C ABI, so the minor
    /// must match exactly. From 1.0 on the library accepts any older minor
    /// of the same major.
    pub const fn accepts(&self, major: u32, minor: u32) -> bool {
        if major != self.major {
            return false;
        }
        if self.major == 0 {
            minor == self.minor
        } else {
            minor <= self.minor
        }
    }
}

/// Full library version
#[no_mangle]
pub extern "C" fn monet_version() -> MonetVersion {
    MonetVersion::current()
}

/// Major version number
#[no_mangle]
pub extern "C" fn monet_version_major() -> u32 {
    MonetVersion::current().major
}

/// Minor version number
#[no_mangle]
pub extern "C" fn monet_version_minor() -> u32 {
    MonetVersion::current().minor
}

/// Patch version number
#[no_mangle]
pub extern "C" fn monet_version_patch() -> u32 {
    MonetVersion::current().patch
}

/// Version as a static NUL-terminated string; do not free
#[no_mangle]
pub extern "C" fn monet_version_string() -> *const c_char {
    VERSION_CSTR.as_ptr() as *const c_char
}

/// Check that headers built against `major.minor` match this library
#[no_mangle]
pub extern "C" fn monet_version_compatible(major: u32, minor: u32) -> bool {
    MonetVersion::current().accepts(major, minor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::CStr;

    #[test]
    fn test_version_string_matches_crate() {
        let version = unsafe { CStr::from_ptr(monet_version_string()) };
        assert_eq!(version.to_str().unwrap(), crate::VERSION);
    }

    #[test]
    fn test_pre_release_compatibility() {
        let version = MonetVersion {
            major: 0,
            minor: 3,
            patch: 1,
        };
        assert!(version.accepts(0, 3));
        assert!(!version.accepts(0, 2));
        assert!(!version.accepts(1, 3));
    }

    #[test]
    fn test_stable_compatibility() {
        let version = MonetVersion {
            major: 2,
            minor: 4,
            patch: 0,
        };
        assert!(version.accepts(2, 0));
        assert!(version.accepts(2, 4));
        assert!(!version.accepts(2, 5));
        assert!(!version.accepts(3, 0));
    }

    #[test]
    fn test_current_is_self_compatible() {
        let current = monet_version();
        assert!(monet_version_compatible(current.major, current.minor));
    }
}
