//! Test FFI topic functions directly

#[cfg(test)]
mod tests {
    use crate::ffi::topics::*;
    use crate::ffi::types::*;
    use std::ffi::{c_void, CString};
    use std::ptr;

    #[test]
    fn test_topic_round_trip() {
        // Unique name: the global registry is shared across tests
        let name = CString::new("/ffi/test/round_trip").unwrap();
        let payload: [u8; 8] = [1, 2, 3, 4, 5, 6, 7, 8];

        unsafe {
            assert!(!monet_is_advertised(name.as_ptr(), payload.len()));
            assert!(monet_advertise(name.as_ptr(), payload.len()));
            assert!(monet_publish(
                name.as_ptr(),
                payload.len(),
                payload.as_ptr() as *const c_void
            ));
            assert!(monet_updates_available(name.as_ptr(), payload.len(), 0));

            let mut dst = [0u8; 8];
            let mut generation: u64 = 0;
            assert!(monet_copy(
                name.as_ptr(),
                dst.len(),
                dst.as_mut_ptr() as *mut c_void,
                &mut generation,
                true
            ));
            assert_eq!(dst, payload);
            assert_eq!(generation, 1);

            let mut info = MonetTopicInfo::default();
            assert_eq!(
                monet_topic_info(name.as_ptr(), payload.len(), &mut info),
                MonetErrorCode::Success
            );
            assert_eq!(info.generation, 1);
            assert_eq!(info.publisher_count, 1);
            assert!(info.advertised);

            assert!(monet_unadvertise(name.as_ptr(), payload.len()));
            assert!(!monet_unadvertise(name.as_ptr(), payload.len()));
        }
    }

    #[test]
    fn test_null_pointers_rejected() {
        let name = CString::new("/ffi/test/nulls").unwrap();

        unsafe {
            assert!(!monet_advertise(ptr::null(), 4));
            assert!(!monet_publish(name.as_ptr(), 4, ptr::null()));
            assert!(!monet_copy(name.as_ptr(), 4, ptr::null_mut(), ptr::null_mut(), false));
            assert_eq!(
                monet_topic_info(name.as_ptr(), 4, ptr::null_mut()),
                MonetErrorCode::InvalidParameter
            );
        }
    }

    #[test]
    fn test_size_mismatch_reported() {
        let name = CString::new("/ffi/test/size_mismatch").unwrap();

        unsafe {
            assert_eq!(monet_advertise_checked(name.as_ptr(), 4), MonetErrorCode::Success);
            assert_eq!(
                monet_advertise_checked(name.as_ptr(), 8),
                MonetErrorCode::SizeMismatch
            );
            assert_eq!(monet_advertise_checked(name.as_ptr(), 0), MonetErrorCode::InvalidParameter);
        }
    }
}
