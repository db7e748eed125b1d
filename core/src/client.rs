//! Stateless HTTP request builder and response parser for the crossword API.
//!
//! # Design
//! `CrosswordClient` holds only its `ClientOptions` and carries no mutable
//! state between calls. The single operation is split into `build_execute`,
//! which produces an `HttpRequest`, and `parse_execute`, which consumes an
//! `HttpResponse`. Whoever sits between the two performs the round-trip, so
//! the core stays deterministic and free of I/O.

use tracing::{debug, warn};
use url::Url;

use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::options::ClientOptions;
use crate::types::{CrosswordResponse, QueryOptions};

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Synchronous, stateless client for the crossword API.
#[derive(Debug, Clone)]
pub struct CrosswordClient {
    options: ClientOptions,
}

impl CrosswordClient {
    pub fn new(options: ClientOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    /// Build the GET request for one generation call.
    ///
    /// Query values are forwarded as given; only unset and empty fields are
    /// left out of the query string.
    pub fn build_execute(&self, query: &QueryOptions) -> Result<HttpRequest, ApiError> {
        let mut url = Url::parse(&self.options.endpoint())
            .map_err(|e| ApiError::InvalidUrl(e.to_string()))?;

        let pairs = query.to_query_pairs();
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }
        debug!(endpoint = %self.options.endpoint(), query = ?url.query(), "built crossword request");

        Ok(HttpRequest {
            url: url.into(),
            headers: vec![
                (API_KEY_HEADER.to_string(), self.options.api_key.clone()),
                ("accept".to_string(), "application/json".to_string()),
            ],
        })
    }

    /// Parse the service's answer into the response envelope.
    pub fn parse_execute(&self, response: HttpResponse) -> Result<CrosswordResponse, ApiError> {
        check_status(&response)?;
        serde_json::from_str(&response.body)
            .map_err(|e| ApiError::Deserialization(e.to_string()))
    }
}

/// Pass any non-2xx response through as `ApiError::Http`, body untouched.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    warn!(status = response.status, "crossword service rejected request");
    Err(ApiError::Http {
        status: response.status,
        body: response.body.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> CrosswordClient {
        CrosswordClient::new(ClientOptions::new("test-key"))
    }

    fn ok_response(body: &str) -> HttpResponse {
        HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    #[test]
    fn build_execute_without_query_has_no_query_string() {
        let req = client().build_execute(&QueryOptions::new()).unwrap();
        assert_eq!(req.url, "https://api.apiverve.com/v1/crossword");
        assert_eq!(req.header("x-api-key"), Some("test-key"));
        assert_eq!(req.header("Accept"), Some("application/json"));
    }

    #[test]
    fn build_execute_encodes_all_fields() {
        let query = QueryOptions::new()
            .size("medium")
            .theme("animals")
            .difficulty("hard");
        let req = client().build_execute(&query).unwrap();
        assert_eq!(
            req.url,
            "https://api.apiverve.com/v1/crossword?size=medium&theme=animals&difficulty=hard"
        );
    }

    #[test]
    fn build_execute_escapes_values() {
        let query = QueryOptions::new().theme("fish & chips");
        let req = client().build_execute(&query).unwrap();
        assert_eq!(
            req.url,
            "https://api.apiverve.com/v1/crossword?theme=fish+%26+chips"
        );
    }

    #[test]
    fn build_execute_respects_insecure_flag() {
        let client = CrosswordClient::new(ClientOptions::new("k").with_secure(false));
        let req = client.build_execute(&QueryOptions::new()).unwrap();
        assert!(req.url.starts_with("http://"));
    }

    #[test]
    fn build_execute_rejects_broken_host() {
        let client = CrosswordClient::new(ClientOptions::new("k").with_host("bad host"));
        let err = client.build_execute(&QueryOptions::new()).unwrap_err();
        assert!(matches!(err, ApiError::InvalidUrl(_)));
    }

    #[test]
    fn parse_execute_success() {
        let resp = client()
            .parse_execute(ok_response(r#"{"status":"ok","error":null,"data":null}"#))
            .unwrap();
        assert!(resp.is_ok());
        assert!(resp.code.is_none());
    }

    #[test]
    fn parse_execute_passes_remote_error_through() {
        let body = r#"{"status":"error","error":"Invalid API key","data":null,"code":401}"#;
        let response = HttpResponse {
            status: 401,
            headers: Vec::new(),
            body: body.to_string(),
        };
        let err = client().parse_execute(response).unwrap_err();
        assert_eq!(
            err,
            ApiError::Http {
                status: 401,
                body: body.to_string()
            }
        );
    }

    #[test]
    fn parse_execute_bad_json() {
        let err = client().parse_execute(ok_response("not json")).unwrap_err();
        assert!(matches!(err, ApiError::Deserialization(_)));
    }

    #[test]
    fn parse_execute_accepts_any_2xx() {
        let response = HttpResponse {
            status: 203,
            headers: Vec::new(),
            body: r#"{"status":"ok"}"#.to_string(),
        };
        assert!(client().parse_execute(response).is_ok());
    }
}
