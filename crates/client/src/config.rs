//! Client configuration.

pub const DEFAULT_API_URL: &str = "http://localhost:8085";

/// Read at runtime on native targets and baked in at compile time for the
/// browser build.
pub const API_URL_ENV: &str = "CHAINBOARD_API_URL";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend base URL, without a trailing slash.
    pub api_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

impl ClientConfig {
    pub fn new(api_url: impl Into<String>) -> Self {
        let api_url: String = api_url.into();
        Self {
            api_url: api_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_env() -> Self {
        Self::resolve(
            std::env::var(API_URL_ENV).ok(),
            option_env!("CHAINBOARD_API_URL"),
        )
    }

    /// The runtime value, then the compile-time one, then the default. Blank
    /// values count as unset.
    fn resolve(runtime: Option<String>, compiled: Option<&str>) -> Self {
        let api_url = runtime
            .filter(|url| !url.trim().is_empty())
            .or_else(|| {
                compiled
                    .filter(|url| !url.trim().is_empty())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        Self::new(api_url.trim())
    }
}
