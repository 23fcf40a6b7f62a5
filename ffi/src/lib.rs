//! C-ABI wrapper around `courier-core`.
//!
//! # Overview
//! Exposes encode, decode and execute through `extern "C"` functions so any
//! language with a C FFI can push an HTTP request across a string-only
//! boundary: bodies travel as base64 C strings, headers as key/value
//! arrays, and the response comes back in a single result envelope.
//!
//! # Design
//! - Every `extern "C"` function wraps its body in `catch_unwind` so panics
//!   never cross the FFI boundary.
//! - The opaque client handle owns a current-thread tokio runtime; the
//!   async executor is driven to completion inside `courier_execute`, so C
//!   callers see one ordinary blocking call per round trip.
//! - The C caller owns all returned pointers and must release them with
//!   the matching `courier_free_*` function.

pub mod types;

use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::panic::{catch_unwind, AssertUnwindSafe};

use courier_core::{codec, Courier, HttpRequest};

use types::*;

// ---------------------------------------------------------------------------
// Client lifecycle
// ---------------------------------------------------------------------------

/// Create a new courier client with its own runtime.
///
/// Returns null if the runtime cannot be created or an internal panic
/// occurs. The caller must free the returned pointer with
/// `courier_client_free`.
#[unsafe(no_mangle)]
pub extern "C" fn courier_client_new() -> *mut FfiCourierClient {
    catch_unwind(|| {
        let runtime = match tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
        {
            Ok(rt) => rt,
            Err(_) => return std::ptr::null_mut(),
        };
        Box::into_raw(Box::new(FfiCourierClient {
            courier: Courier::new(),
            runtime,
        }))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Free a client created by `courier_client_new`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn courier_client_free(client: *mut FfiCourierClient) {
    if !client.is_null() {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            drop(unsafe { Box::from_raw(client) });
        }));
    }
}

// ---------------------------------------------------------------------------
// Codec
// ---------------------------------------------------------------------------

/// Encode `len` bytes starting at `bytes` as a base64 C string.
///
/// `bytes` may be null only when `len` is zero (the empty sequence encodes
/// to `""`). Returns null on invalid arguments. The caller must free the
/// result with `courier_free_string`.
#[unsafe(no_mangle)]
pub extern "C" fn courier_encode(bytes: *const u8, len: usize) -> *mut c_char {
    catch_unwind(|| {
        let input: &[u8] = if len == 0 {
            &[]
        } else if bytes.is_null() {
            return std::ptr::null_mut();
        } else {
            unsafe { std::slice::from_raw_parts(bytes, len) }
        };
        // Base64 output is pure ASCII, never contains an interior NUL.
        CString::new(codec::encode(input)).unwrap().into_raw()
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Decode a base64 C string back into bytes.
///
/// On success returns a heap-allocated buffer and writes its length to
/// `out_len`; free it with `courier_free_bytes`. Returns null if any
/// argument is null or the payload is not valid base64 (`out_len` is left
/// untouched in that case).
#[unsafe(no_mangle)]
pub extern "C" fn courier_decode(payload: *const c_char, out_len: *mut usize) -> *mut u8 {
    catch_unwind(|| {
        if payload.is_null() || out_len.is_null() {
            return std::ptr::null_mut();
        }
        let payload = match unsafe { CStr::from_ptr(payload) }.to_str() {
            Ok(s) => s,
            Err(_) => return std::ptr::null_mut(),
        };
        match codec::decode(payload) {
            Ok(bytes) => {
                unsafe { *out_len = bytes.len() };
                Box::into_raw(bytes.into_boxed_slice()) as *mut u8
            }
            Err(_) => std::ptr::null_mut(),
        }
    })
    .unwrap_or(std::ptr::null_mut())
}

// ---------------------------------------------------------------------------
// Execute
// ---------------------------------------------------------------------------

/// Perform one HTTP round trip.
///
/// `method` and `url` are required C strings. `headers` may be null when
/// `headers_len` is zero; the array is read, never freed. `body` is an
/// optional base64 C string (null means no body). Blocks until the round
/// trip completes. Never returns null; the caller must free the envelope
/// with `courier_free_result`.
#[unsafe(no_mangle)]
pub extern "C" fn courier_execute(
    client: *const FfiCourierClient,
    method: *const c_char,
    url: *const c_char,
    headers: *const FfiHeader,
    headers_len: u32,
    body: *const c_char,
) -> *mut FfiExecuteResult {
    catch_unwind(AssertUnwindSafe(|| {
        if client.is_null() {
            return FfiExecuteResult::null_arg("client");
        }
        if method.is_null() {
            return FfiExecuteResult::null_arg("method");
        }
        if url.is_null() {
            return FfiExecuteResult::null_arg("url");
        }
        if headers.is_null() && headers_len > 0 {
            return FfiExecuteResult::null_arg("headers");
        }
        let client = unsafe { &*client };

        let method = unsafe { CStr::from_ptr(method) }
            .to_str()
            .unwrap_or("")
            .to_string();
        let url = unsafe { CStr::from_ptr(url) }
            .to_str()
            .unwrap_or("")
            .to_string();

        let mut header_pairs = Vec::with_capacity(headers_len as usize);
        if headers_len > 0 {
            let slice = unsafe { std::slice::from_raw_parts(headers, headers_len as usize) };
            for header in slice {
                if header.key.is_null() || header.value.is_null() {
                    return FfiExecuteResult::null_arg("headers");
                }
                let key = unsafe { CStr::from_ptr(header.key) }
                    .to_str()
                    .unwrap_or("")
                    .to_string();
                let value = unsafe { CStr::from_ptr(header.value) }
                    .to_str()
                    .unwrap_or("")
                    .to_string();
                header_pairs.push((key, value));
            }
        }

        let body = if body.is_null() {
            None
        } else {
            Some(
                unsafe { CStr::from_ptr(body) }
                    .to_str()
                    .unwrap_or("")
                    .to_string(),
            )
        };

        let request = HttpRequest {
            method,
            url,
            headers: header_pairs,
            body,
        };

        match client.runtime.block_on(client.courier.execute(request)) {
            Ok(response) => FfiExecuteResult::from_response(response),
            Err(err) => FfiExecuteResult::from_error(err),
        }
    }))
    .unwrap_or_else(|_| FfiExecuteResult::panic("panic in courier_execute"))
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Free a C string allocated by this library. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn courier_free_string(s: *mut c_char) {
    if !s.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { CString::from_raw(s) });
        });
    }
}

/// Free a byte buffer returned by `courier_decode`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn courier_free_bytes(bytes: *mut u8, len: usize) {
    if !bytes.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { Vec::from_raw_parts(bytes, len, len) });
        });
    }
}

/// Free a result envelope returned by `courier_execute`. Safe to call with
/// null.
#[unsafe(no_mangle)]
pub extern "C" fn courier_free_result(result: *mut FfiExecuteResult) {
    if result.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let result = unsafe { Box::from_raw(result) };
        if !result.error_message.is_null() {
            drop(unsafe { CString::from_raw(result.error_message) });
        }
        if !result.body.is_null() {
            drop(unsafe { CString::from_raw(result.body) });
        }
        if !result.headers.is_null() && result.headers_len > 0 {
            let headers = unsafe {
                Vec::from_raw_parts(
                    result.headers,
                    result.headers_len as usize,
                    result.headers_len as usize,
                )
            };
            for header in headers {
                if !header.key.is_null() {
                    drop(unsafe { CString::from_raw(header.key) });
                }
                if !header.value.is_null() {
                    drop(unsafe { CString::from_raw(header.value) });
                }
            }
        }
    });
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
