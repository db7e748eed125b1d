//! `Crossword`: the callable wrapper around one remote generation call.
//!
//! # Design
//! `Crossword` pairs the stateless `CrosswordClient` with a shared
//! `Transport`. Every `execute*` call clones its query into the returned
//! future, so the future is `'static` and concurrent calls never share a
//! query. Nothing runs until the future is polled; dropping it cancels the
//! call.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::client::CrosswordClient;
use crate::error::ApiError;
use crate::options::ClientOptions;
use crate::transport::{ReqwestTransport, Transport};
use crate::types::{CrosswordResponse, QueryOptions};

/// Outcome handed to an `execute_with` callback.
pub type CallbackResult<'a> = Result<&'a CrosswordResponse, &'a ApiError>;

#[derive(Clone)]
pub struct Crossword {
    client: CrosswordClient,
    transport: Arc<dyn Transport>,
}

impl Crossword {
    /// Wrapper using the default `reqwest` transport.
    pub fn new(options: ClientOptions) -> Self {
        Self::with_transport(options, Arc::new(ReqwestTransport::new()))
    }

    pub fn with_transport(options: ClientOptions, transport: Arc<dyn Transport>) -> Self {
        Self {
            client: CrosswordClient::new(options),
            transport,
        }
    }

    pub fn client(&self) -> &CrosswordClient {
        &self.client
    }

    /// Request one crossword. `None` sends no query parameters.
    ///
    /// Remote rejections come back as `ApiError::Http` and transport
    /// failures as `ApiError::Transport`, both unchanged.
    pub fn execute(
        &self,
        query: Option<&QueryOptions>,
    ) -> impl Future<Output = Result<CrosswordResponse, ApiError>> + Send + 'static {
        let this = self.clone();
        let query = query.cloned().unwrap_or_default();
        async move { this.round_trip(&query).await }
    }

    /// Same as `execute`, additionally reporting the outcome to `callback`
    /// once before the future resolves.
    pub fn execute_with<F>(
        &self,
        query: Option<&QueryOptions>,
        callback: F,
    ) -> impl Future<Output = Result<CrosswordResponse, ApiError>> + Send + 'static
    where
        F: for<'a> FnOnce(CallbackResult<'a>) + Send + 'static,
    {
        let call = self.execute(query);
        async move {
            let result = call.await;
            callback(result.as_ref());
            result
        }
    }

    async fn round_trip(&self, query: &QueryOptions) -> Result<CrosswordResponse, ApiError> {
        let request = self.client.build_execute(query)?;
        debug!(url = %request.url, "sending crossword request");

        let response = self.transport.send(request).await.map_err(|e| {
            warn!(error = %e, "crossword transport failed");
            ApiError::from(e)
        })?;
        self.client.parse_execute(response)
    }
}

impl fmt::Debug for Crossword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Crossword")
            .field("client", &self.client)
            .finish_non_exhaustive()
    }
}
