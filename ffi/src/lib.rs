//! C-ABI wrapper around `crossword-core`.
//!
//! # Overview
//! Exposes the crossword request builder and response parser through
//! `extern "C"` functions so any language with a C FFI can issue the call
//! with its own HTTP stack without linking to Rust's async runtime or serde.
//!
//! # Design
//! - Every `extern "C"` function wraps its body in `catch_unwind` so panics
//!   never cross the FFI boundary.
//! - `crossword_build_execute` / `crossword_parse_execute` mirror the core
//!   API 1:1.
//! - `FfiCrosswordResult` conveys the parsed envelope and errors uniformly.
//! - The C caller owns all returned pointers and must call the matching
//!   `crossword_free_*` function to release them.

pub mod types;

use std::ffi::CStr;
use std::os::raw::c_char;
use std::panic::catch_unwind;

use crossword_core::{ClientOptions, CrosswordClient, HttpResponse, QueryOptions};

use types::*;

/// Read an optional C string. Null and invalid UTF-8 both map to `None`.
fn opt_str(s: *const c_char) -> Option<String> {
    if s.is_null() {
        return None;
    }
    unsafe { CStr::from_ptr(s) }
        .to_str()
        .ok()
        .map(str::to_string)
}

// ---------------------------------------------------------------------------
// Client lifecycle
// ---------------------------------------------------------------------------

/// Create a new client for `api_key`. `secure` selects https over http.
///
/// Returns null if `api_key` is null or if an internal panic occurs.
/// The caller must free the returned pointer with `crossword_client_free`.
#[unsafe(no_mangle)]
pub extern "C" fn crossword_client_new(
    api_key: *const c_char,
    secure: bool,
) -> *mut FfiCrosswordClient {
    catch_unwind(|| {
        let Some(key) = opt_str(api_key) else {
            return std::ptr::null_mut();
        };
        let client = CrosswordClient::new(ClientOptions::new(key).with_secure(secure));
        Box::into_raw(Box::new(FfiCrosswordClient { inner: client }))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Like `crossword_client_new`, targeting `host` instead of the public
/// service. Returns null if `api_key` or `host` is null.
#[unsafe(no_mangle)]
pub extern "C" fn crossword_client_new_with_host(
    api_key: *const c_char,
    secure: bool,
    host: *const c_char,
) -> *mut FfiCrosswordClient {
    catch_unwind(|| {
        let (Some(key), Some(host)) = (opt_str(api_key), opt_str(host)) else {
            return std::ptr::null_mut();
        };
        let options = ClientOptions::new(key).with_secure(secure).with_host(&host);
        Box::into_raw(Box::new(FfiCrosswordClient {
            inner: CrosswordClient::new(options),
        }))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Free a client created by `crossword_client_new*`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn crossword_client_free(client: *mut FfiCrosswordClient) {
    if !client.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { Box::from_raw(client) });
        });
    }
}

// ---------------------------------------------------------------------------
// Build / parse
// ---------------------------------------------------------------------------

/// Build the HTTP request for one generation call.
///
/// `size`, `theme` and `difficulty` may each be null to leave them out.
/// Returns null if `client` is null or the endpoint URL is invalid.
/// The caller must free the returned pointer with `crossword_free_request`.
#[unsafe(no_mangle)]
pub extern "C" fn crossword_build_execute(
    client: *const FfiCrosswordClient,
    size: *const c_char,
    theme: *const c_char,
    difficulty: *const c_char,
) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if client.is_null() {
            return std::ptr::null_mut();
        }
        let client = unsafe { &*client };
        let query = QueryOptions {
            size: opt_str(size),
            theme: opt_str(theme),
            difficulty: opt_str(difficulty),
        };
        match client.inner.build_execute(&query) {
            Ok(req) => FfiHttpRequest::from_core(req),
            Err(_) => std::ptr::null_mut(),
        }
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Parse the HTTP response of a generation call.
///
/// The caller must free the returned pointer with `crossword_free_result`.
#[unsafe(no_mangle)]
pub extern "C" fn crossword_parse_execute(
    client: *const FfiCrosswordClient,
    response: *const FfiHttpResponse,
) -> *mut FfiCrosswordResult {
    catch_unwind(|| {
        if client.is_null() {
            return FfiCrosswordResult::null_arg("client");
        }
        if response.is_null() {
            return FfiCrosswordResult::null_arg("response");
        }
        let client = unsafe { &*client };
        let resp = unsafe { &*response };
        let raw: &[u8] = if resp.body.is_null() {
            &[]
        } else {
            unsafe { CStr::from_ptr(resp.body) }.to_bytes()
        };
        let core_resp = HttpResponse {
            status: resp.status,
            headers: Vec::new(),
            body: String::from_utf8_lossy(raw).into_owned(),
        };
        match client.inner.parse_execute(core_resp) {
            Ok(envelope) => FfiCrosswordResult::ok(envelope),
            Err(e) => FfiCrosswordResult::from_error(e, raw),
        }
    })
    .unwrap_or_else(|_| FfiCrosswordResult::panic("panic in crossword_parse_execute"))
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Free a request returned by `crossword_build_execute`. Safe to call with
/// null.
#[unsafe(no_mangle)]
pub extern "C" fn crossword_free_request(req: *mut FfiHttpRequest) {
    if req.is_null() {
        return;
    }
    let _ = catch_unwind(|| unsafe { FfiHttpRequest::free(req) });
}

/// Free a result returned by `crossword_parse_execute`. Safe to call with
/// null.
#[unsafe(no_mangle)]
pub extern "C" fn crossword_free_result(result: *mut FfiCrosswordResult) {
    if result.is_null() {
        return;
    }
    let _ = catch_unwind(|| unsafe { FfiCrosswordResult::free(result) });
}

/// Free a C string allocated by this library. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn crossword_free_string(s: *mut c_char) {
    let _ = catch_unwind(|| free_c_string(s));
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
