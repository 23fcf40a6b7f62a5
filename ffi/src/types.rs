//! `#[repr(C)]` types for the FFI boundary.
//!
//! # Design
//! Each type mirrors a core type but uses C-compatible representations:
//! `*mut c_char` instead of `String`, raw pointer plus length instead of
//! `Vec`, and enums with explicit discriminants. Conversion functions live
//! here to keep `lib.rs` focused on the `extern "C"` surface.

use std::ffi::CString;
use std::os::raw::c_char;

use courier_core::{Courier, CourierError, HttpResponse};

/// Opaque handle owning the executor and the runtime that drives it.
///
/// C callers receive a pointer to this and pass it back into
/// `courier_execute`. Calls through one handle are serialized by its
/// runtime; distinct handles are fully independent.
pub struct FfiCourierClient {
    pub(crate) courier: Courier,
    pub(crate) runtime: tokio::runtime::Runtime,
}

/// A single HTTP header as a key-value pair of C strings.
///
/// Used in both directions: callers pass an array of these into
/// `courier_execute`, and the result envelope carries the response headers
/// as an array allocated by this library.
#[repr(C)]
pub struct FfiHeader {
    pub key: *mut c_char,
    pub value: *mut c_char,
}

/// Error codes returned in `FfiExecuteResult`.
#[repr(C)]
pub enum FfiErrorCode {
    Ok = 0,
    Decode = 1,
    Method = 2,
    Network = 3,
    NullArg = 4,
    Panic = 5,
}

/// Result envelope for `courier_execute`.
///
/// On success `error_code` is `Ok`, `error_message` is null, `status` is
/// the HTTP status, `body` is the base64-encoded response payload, and
/// `headers`/`headers_len` describe the response headers. On failure
/// `error_code` names the category, `error_message` is a human-readable
/// C string, and the payload fields are null/zero.
#[repr(C)]
pub struct FfiExecuteResult {
    pub error_code: FfiErrorCode,
    pub error_message: *mut c_char,
    pub status: u16,
    pub body: *mut c_char,
    pub headers: *mut FfiHeader,
    pub headers_len: u32,
}

impl FfiExecuteResult {
    /// Build a success envelope from a core response.
    pub(crate) fn from_response(response: HttpResponse) -> *mut Self {
        let body = CString::new(response.body).unwrap().into_raw();

        let headers_len = response.headers.len() as u32;
        let headers = if response.headers.is_empty() {
            std::ptr::null_mut()
        } else {
            let ffi_headers: Vec<FfiHeader> = response
                .headers
                .into_iter()
                .map(|(k, v)| FfiHeader {
                    key: CString::new(k).unwrap().into_raw(),
                    value: CString::new(v).unwrap_or_default().into_raw(),
                })
                .collect();
            Box::into_raw(ffi_headers.into_boxed_slice()) as *mut FfiHeader
        };

        let result = Box::new(FfiExecuteResult {
            error_code: FfiErrorCode::Ok,
            error_message: std::ptr::null_mut(),
            status: response.status,
            body,
            headers,
            headers_len,
        });
        Box::into_raw(result)
    }

    /// Build an error envelope from a core error.
    pub(crate) fn from_error(err: CourierError) -> *mut Self {
        let error_code = match &err {
            CourierError::Decode(_) => FfiErrorCode::Decode,
            CourierError::Method(_) => FfiErrorCode::Method,
            CourierError::Network(_) => FfiErrorCode::Network,
        };
        Self::error(error_code, &err.to_string())
    }

    /// Build an error envelope for a null argument.
    pub(crate) fn null_arg(name: &str) -> *mut Self {
        Self::error(FfiErrorCode::NullArg, &format!("null argument: {name}"))
    }

    /// Build an error envelope for a caught panic.
    pub(crate) fn panic(msg: &str) -> *mut Self {
        Self::error(FfiErrorCode::Panic, msg)
    }

    fn error(error_code: FfiErrorCode, msg: &str) -> *mut Self {
        let result = Box::new(FfiExecuteResult {
            error_code,
            error_message: CString::new(msg).unwrap_or_default().into_raw(),
            status: 0,
            body: std::ptr::null_mut(),
            headers: std::ptr::null_mut(),
            headers_len: 0,
        });
        Box::into_raw(result)
    }
}
