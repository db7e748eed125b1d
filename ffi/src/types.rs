//! `#[repr(C)]` types for the FFI boundary.
//!
//! # Design
//! Each type mirrors a core type but uses C-compatible representations:
//! `*mut c_char` instead of `String`, pointer + length instead of `Vec`, null
//! instead of `None`. Conversion functions live here to keep `lib.rs` focused
//! on the `extern "C"` surface. Freeing mirrors construction and also lives
//! here.

use std::ffi::CString;
use std::os::raw::c_char;
use std::ptr;

use crossword_core::{ApiError, Clue, CrosswordData, CrosswordResponse, Image};

/// Opaque handle to a `CrosswordClient`. C callers receive a pointer to this
/// and pass it back into every FFI function.
pub struct FfiCrosswordClient {
    pub(crate) inner: crossword_core::CrosswordClient,
}

/// Move bytes onto the C heap as a NUL-terminated string, cut at the first
/// interior NUL (the most a C string can carry).
pub(crate) fn c_string(s: impl Into<Vec<u8>>) -> *mut c_char {
    let c = CString::new(s).unwrap_or_else(|e| {
        let end = e.nul_position();
        let mut bytes = e.into_vec();
        bytes.truncate(end);
        CString::new(bytes).unwrap_or_default()
    });
    c.into_raw()
}

fn c_string_opt(s: Option<String>) -> *mut c_char {
    s.map(c_string).unwrap_or(ptr::null_mut())
}

/// Release a string produced by `c_string`. Null is ignored.
pub(crate) fn free_c_string(s: *mut c_char) {
    if !s.is_null() {
        drop(unsafe { CString::from_raw(s) });
    }
}

/// Leak a `Vec` as pointer + length; empty vectors become null.
fn into_raw_parts<T>(items: Vec<T>) -> (*mut T, usize) {
    if items.is_empty() {
        return (ptr::null_mut(), 0);
    }
    let len = items.len();
    let mut boxed = items.into_boxed_slice();
    let ptr = boxed.as_mut_ptr();
    std::mem::forget(boxed);
    (ptr, len)
}

/// Reclaim a slice leaked by `into_raw_parts`.
unsafe fn from_raw_parts<T>(ptr: *mut T, len: usize) -> Vec<T> {
    if ptr.is_null() || len == 0 {
        return Vec::new();
    }
    let slice = ptr::slice_from_raw_parts_mut(ptr, len);
    unsafe { Box::from_raw(slice) }.into_vec()
}

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// A single HTTP header as a key-value pair of C strings.
#[repr(C)]
pub struct FfiHeader {
    pub key: *mut c_char,
    pub value: *mut c_char,
}

/// A GET request described as C-compatible plain data.
///
/// Built by `crossword_build_execute`. The C caller performs the request and
/// passes the response back through `crossword_parse_execute`.
#[repr(C)]
pub struct FfiHttpRequest {
    pub url: *mut c_char,
    pub headers: *mut FfiHeader,
    pub headers_len: usize,
}

impl FfiHttpRequest {
    /// Convert a core `HttpRequest` into a heap-allocated `FfiHttpRequest`.
    pub(crate) fn from_core(req: crossword_core::HttpRequest) -> *mut Self {
        let headers = req
            .headers
            .into_iter()
            .map(|(k, v)| FfiHeader {
                key: c_string(k),
                value: c_string(v),
            })
            .collect();
        let (headers, headers_len) = into_raw_parts(headers);

        Box::into_raw(Box::new(FfiHttpRequest {
            url: c_string(req.url),
            headers,
            headers_len,
        }))
    }

    /// Free everything reachable from a request built by `from_core`.
    pub(crate) unsafe fn free(req: *mut Self) {
        let req = unsafe { Box::from_raw(req) };
        free_c_string(req.url);
        for h in unsafe { from_raw_parts(req.headers, req.headers_len) } {
            free_c_string(h.key);
            free_c_string(h.value);
        }
    }
}

// ---------------------------------------------------------------------------
// Response input (caller-provided, not heap-allocated by us)
// ---------------------------------------------------------------------------

/// An HTTP response described as C-compatible plain data.
///
/// The C caller constructs this after executing the request and passes a
/// pointer to `crossword_parse_execute`. The FFI layer reads but does not
/// free these fields.
#[repr(C)]
pub struct FfiHttpResponse {
    pub status: u16,
    pub body: *const c_char,
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Error codes returned in `FfiCrosswordResult`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiErrorCode {
    Ok = 0,
    Http = 1,
    Deserialization = 2,
    Transport = 3,
    InvalidUrl = 4,
    Panic = 5,
    NullArg = 6,
}

/// One word-list entry.
#[repr(C)]
pub struct FfiClue {
    pub number: u32,
    pub clue: *mut c_char,
    pub answer: *mut c_char,
    pub length: u32,
}

#[repr(C)]
pub struct FfiClueList {
    pub items: *mut FfiClue,
    pub len: usize,
}

#[repr(C)]
pub struct FfiImage {
    pub image_name: *mut c_char,
    pub format: *mut c_char,
    pub download_url: *mut c_char,
    pub expires: i64,
}

/// A generated puzzle.
///
/// `grid_cells` holds `grid_len` (`grid_rows * grid_cols`) entries in
/// row-major order; blocked squares (and padding of short rows) are null.
/// `image` and `solution_image` are null when the service omitted them.
#[repr(C)]
pub struct FfiCrosswordData {
    pub size: u32,
    pub difficulty: *mut c_char,
    pub theme: *mut c_char,
    pub grid_cells: *mut *mut c_char,
    pub grid_len: usize,
    pub grid_rows: usize,
    pub grid_cols: usize,
    pub across: FfiClueList,
    pub down: FfiClueList,
    pub word_count: u32,
    pub html: *mut c_char,
    pub image: *mut FfiImage,
    pub solution_image: *mut FfiImage,
}

/// Result envelope for `crossword_parse_execute`.
///
/// On success `error_code` is `Ok`, `error_message` is null and the envelope
/// fields (`status`, `error`, `code`, `data`) are filled in; `error` and
/// `data` stay null when the service sent null, and `has_code` tells whether
/// `code` was present. On failure `error_code` names the category,
/// `error_message` is a human-readable C string, `http_status` holds the
/// remote status for `Http` errors, and `raw_body` holds the untouched body.
#[repr(C)]
pub struct FfiCrosswordResult {
    pub error_code: FfiErrorCode,
    pub error_message: *mut c_char,
    pub http_status: u16,
    pub raw_body: *mut c_char,
    pub status: *mut c_char,
    pub error: *mut c_char,
    pub has_code: bool,
    pub code: u16,
    pub data: *mut FfiCrosswordData,
}

fn clue_list(clues: Vec<Clue>) -> FfiClueList {
    let items = clues
        .into_iter()
        .map(|c| FfiClue {
            number: c.number,
            clue: c_string(c.clue),
            answer: c_string(c.answer),
            length: c.length,
        })
        .collect();
    let (items, len) = into_raw_parts(items);
    FfiClueList { items, len }
}

unsafe fn free_clue_list(list: &FfiClueList) {
    for c in unsafe { from_raw_parts(list.items, list.len) } {
        free_c_string(c.clue);
        free_c_string(c.answer);
    }
}

fn image(image: Option<Image>) -> *mut FfiImage {
    match image {
        Some(i) => Box::into_raw(Box::new(FfiImage {
            image_name: c_string(i.image_name),
            format: c_string(i.format),
            download_url: c_string(i.download_url),
            expires: i.expires,
        })),
        None => ptr::null_mut(),
    }
}

unsafe fn free_image(image: *mut FfiImage) {
    if image.is_null() {
        return;
    }
    let image = unsafe { Box::from_raw(image) };
    free_c_string(image.image_name);
    free_c_string(image.format);
    free_c_string(image.download_url);
}

impl FfiCrosswordData {
    fn from_core(data: CrosswordData) -> *mut Self {
        let rows = data.grid.len();
        let cols = data.grid.iter().map(Vec::len).max().unwrap_or(0);
        let mut cells = Vec::with_capacity(rows * cols);
        for row in data.grid {
            let padding = cols - row.len();
            cells.extend(row.into_iter().map(c_string_opt));
            cells.extend(std::iter::repeat_with(ptr::null_mut).take(padding));
        }
        let (grid_cells, grid_len) = into_raw_parts(cells);

        Box::into_raw(Box::new(FfiCrosswordData {
            size: data.size,
            difficulty: c_string(data.difficulty),
            theme: c_string(data.theme),
            grid_cells,
            grid_len,
            grid_rows: rows,
            grid_cols: cols,
            across: clue_list(data.across),
            down: clue_list(data.down),
            word_count: data.word_count,
            html: c_string(data.html),
            image: image(data.image),
            solution_image: image(data.solution_image),
        }))
    }

    unsafe fn free(data: *mut Self) {
        let data = unsafe { Box::from_raw(data) };
        free_c_string(data.difficulty);
        free_c_string(data.theme);
        free_c_string(data.html);
        for cell in unsafe { from_raw_parts(data.grid_cells, data.grid_len) } {
            free_c_string(cell);
        }
        unsafe {
            free_clue_list(&data.across);
            free_clue_list(&data.down);
            free_image(data.image);
            free_image(data.solution_image);
        }
    }
}

impl FfiCrosswordResult {
    fn empty(error_code: FfiErrorCode) -> Self {
        FfiCrosswordResult {
            error_code,
            error_message: ptr::null_mut(),
            http_status: 0,
            raw_body: ptr::null_mut(),
            status: ptr::null_mut(),
            error: ptr::null_mut(),
            has_code: false,
            code: 0,
            data: ptr::null_mut(),
        }
    }

    /// Build a success result from a parsed envelope.
    pub(crate) fn ok(resp: CrosswordResponse) -> *mut Self {
        let mut result = Self::empty(FfiErrorCode::Ok);
        result.status = c_string(resp.status);
        result.error = c_string_opt(resp.error);
        result.has_code = resp.code.is_some();
        result.code = resp.code.unwrap_or(0);
        result.data = resp
            .data
            .map(FfiCrosswordData::from_core)
            .unwrap_or(ptr::null_mut());
        Box::into_raw(Box::new(result))
    }

    /// Build an error result from an `ApiError`. `raw_body` holds the
    /// response bytes exactly as the caller supplied them.
    pub(crate) fn from_error(err: ApiError, raw_body: &[u8]) -> *mut Self {
        let code = match &err {
            ApiError::Http { .. } => FfiErrorCode::Http,
            ApiError::Deserialization(_) => FfiErrorCode::Deserialization,
            ApiError::Transport(_) => FfiErrorCode::Transport,
            ApiError::InvalidUrl(_) => FfiErrorCode::InvalidUrl,
        };
        let mut result = Self::empty(code);
        result.error_message = c_string(err.to_string());
        if let ApiError::Http { status, .. } = err {
            result.http_status = status;
            result.raw_body = c_string(raw_body);
        }
        Box::into_raw(Box::new(result))
    }

    /// Build an error result for a null argument.
    pub(crate) fn null_arg(name: &str) -> *mut Self {
        let mut result = Self::empty(FfiErrorCode::NullArg);
        result.error_message = c_string(format!("null argument: {name}"));
        Box::into_raw(Box::new(result))
    }

    /// Build an error result for a caught panic.
    pub(crate) fn panic(msg: &str) -> *mut Self {
        let mut result = Self::empty(FfiErrorCode::Panic);
        result.error_message = c_string(msg);
        Box::into_raw(Box::new(result))
    }

    /// Free everything reachable from a result built by this module.
    pub(crate) unsafe fn free(result: *mut Self) {
        let result = unsafe { Box::from_raw(result) };
        free_c_string(result.error_message);
        free_c_string(result.raw_body);
        free_c_string(result.status);
        free_c_string(result.error);
        if !result.data.is_null() {
            unsafe { FfiCrosswordData::free(result.data) };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::CStr;

    #[test]
    fn c_string_cuts_at_interior_nul() {
        let s = c_string("abc\0def");
        assert_eq!(unsafe { CStr::from_ptr(s) }.to_bytes(), b"abc");
        free_c_string(s);
    }

    #[test]
    fn c_string_keeps_non_utf8_bytes() {
        let s = c_string(vec![0xff, b'o', b'k']);
        assert_eq!(unsafe { CStr::from_ptr(s) }.to_bytes(), [0xff, b'o', b'k']);
        free_c_string(s);
    }

    #[test]
    fn raw_parts_round_trip_keeps_length() {
        let (ptr, len) = into_raw_parts(vec![1u8, 2, 3]);
        assert_eq!(len, 3);
        assert_eq!(unsafe { from_raw_parts(ptr, len) }, vec![1, 2, 3]);

        let (ptr, len) = into_raw_parts(Vec::<u8>::new());
        assert!(ptr.is_null());
        assert_eq!(len, 0);
    }

    #[test]
    fn ragged_grid_is_padded_and_counted() {
        let data = CrosswordData {
            grid: vec![
                vec![Some("A".to_string()), None, Some("B".to_string())],
                vec![Some("C".to_string())],
            ],
            ..CrosswordData::default()
        };
        let ffi = FfiCrosswordData::from_core(data);
        let d = unsafe { &*ffi };
        assert_eq!((d.grid_rows, d.grid_cols, d.grid_len), (2, 3, 6));
        let cells = unsafe { std::slice::from_raw_parts(d.grid_cells, d.grid_len) };
        assert_eq!(unsafe { CStr::from_ptr(cells[3]) }.to_bytes(), b"C");
        assert!(cells[4].is_null() && cells[5].is_null());
        unsafe { FfiCrosswordData::free(ffi) };
    }
}
