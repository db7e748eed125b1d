//! API client core for the Crossword Generator service.
//!
//! # Overview
//! Describes the service's request and response shapes and wraps its single
//! endpoint. `CrosswordClient` builds `HttpRequest` values and parses
//! `HttpResponse` values without touching the network (host-does-IO pattern);
//! `Crossword` pairs it with a `Transport` to offer an async `execute`.
//!
//! # Design
//! - `CrosswordClient` is stateless: it holds only `ClientOptions`.
//! - The one operation is split into `build_execute` (produces request) and
//!   `parse_execute` (consumes response), so the I/O boundary is explicit and
//!   the C ABI can reuse it.
//! - Query values are never validated locally; the service decides.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.
//!
//! ```no_run
//! use crossword_core::{ClientOptions, Crossword, QueryOptions};
//!
//! # async fn demo() -> Result<(), crossword_core::ApiError> {
//! let crossword = Crossword::new(ClientOptions::new("my-api-key"));
//! let response = crossword
//!     .execute(Some(&QueryOptions::new().size("medium").theme("animals")))
//!     .await?;
//! if let Some(data) = response.data {
//!     println!("{} words", data.word_count);
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod http;
pub mod options;
pub mod transport;
pub mod types;
pub mod wrapper;

pub use client::CrosswordClient;
pub use error::{ApiError, ConfigError};
pub use http::{HttpRequest, HttpResponse};
pub use options::ClientOptions;
pub use transport::{ReqwestTransport, Transport, TransportError};
pub use types::{Clue, CrosswordData, CrosswordResponse, Image, QueryOptions};
pub use wrapper::{CallbackResult, Crossword};
