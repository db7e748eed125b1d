//! Client configuration: API key, transport security and target host.

use std::fmt;

use crate::error::ConfigError;

/// Host of the public crossword service.
pub const DEFAULT_HOST: &str = "api.apiverve.com";

/// Path of the generation endpoint, relative to the host.
pub const ENDPOINT_PATH: &str = "/v1/crossword";

pub const ENV_API_KEY: &str = "CROSSWORD_API_KEY";
pub const ENV_SECURE: &str = "CROSSWORD_SECURE";
pub const ENV_HOST: &str = "CROSSWORD_HOST";

/// Options shared by every call a client makes.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientOptions {
    pub api_key: String,
    /// `https` when true, plain `http` otherwise.
    pub secure: bool,
    /// Host (optionally with port) the endpoint lives on.
    pub host: String,
}

impl ClientOptions {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            secure: true,
            host: DEFAULT_HOST.to_string(),
        }
    }

    pub fn with_secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    pub fn with_host(mut self, host: &str) -> Self {
        self.host = host.trim_end_matches('/').to_string();
        self
    }

    /// Full URL of the generation endpoint, without a query string.
    pub fn endpoint(&self) -> String {
        let scheme = if self.secure { "https" } else { "http" };
        format!(
            "{scheme}://{}{ENDPOINT_PATH}",
            self.host.trim_end_matches('/')
        )
    }

    /// Load options from `CROSSWORD_API_KEY`, `CROSSWORD_SECURE` and
    /// `CROSSWORD_HOST`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Like `from_env`, reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(ENV_API_KEY)
            .filter(|k| !k.is_empty())
            .ok_or(ConfigError::Missing(ENV_API_KEY))?;
        let mut options = Self::new(api_key);

        if let Some(value) = lookup(ENV_SECURE) {
            options.secure = parse_flag(&value).ok_or(ConfigError::Invalid {
                name: ENV_SECURE,
                value,
            })?;
        }
        if let Some(host) = lookup(ENV_HOST).filter(|h| !h.is_empty()) {
            options = options.with_host(&host);
        }
        Ok(options)
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" => Some(true),
        "0" | "false" => Some(false),
        _ => None,
    }
}

impl fmt::Debug for ClientOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientOptions")
            .field("api_key", &"<redacted>")
            .field("secure", &self.secure)
            .field("host", &self.host)
            .finish()
    }
}
