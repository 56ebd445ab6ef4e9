//! C ABI, for loading the library as a shared object:
//!
//! ```c
//! char *factorial(int n);
//! void factorial_free(char *s);
//! ```

use std::ffi::{c_char, c_int, CString};

use crate::fact::compute_factorial;

/// Returns the decimal digits of `n!` as a NUL-terminated string owned by
/// the caller, or null on error (negative `n`, result over the default
/// limit). Release it with [`factorial_free`].
#[no_mangle]
pub extern "C" fn factorial(n: c_int) -> *mut c_char {
    let digits = match compute_factorial(n) {
        Ok(digits) => digits,
        Err(e) => {
            tracing::warn!(n, %e, "factorial failed");
            return std::ptr::null_mut();
        }
    };
    match CString::new(digits) {
        Ok(s) => s.into_raw(),
        Err(_) => std::ptr::null_mut(),
    }
}

/// # Safety
///
/// `s` must be null or a pointer returned by [`factorial`] that has not been
/// freed yet.
#[no_mangle]
pub unsafe extern "C" fn factorial_free(s: *mut c_char) {
    if s.is_null() {
        return;
    }
    drop(CString::from_raw(s));
}

#[test]
fn ffi_round_trip() {
    use std::ffi::CStr;

    let p = factorial(5);
    assert!(!p.is_null());
    assert_eq!(unsafe { CStr::from_ptr(p) }.to_str(), Ok("120"));
    unsafe { factorial_free(p) };

    let p = factorial(25);
    assert_eq!(
        unsafe { CStr::from_ptr(p) }.to_str(),
        Ok("15511210043330985984000000")
    );
    unsafe { factorial_free(p) };
}

#[test]
fn ffi_errors() {
    assert!(factorial(-1).is_null());
    assert!(factorial(c_int::MIN).is_null());
    unsafe { factorial_free(std::ptr::null_mut()) };
}
