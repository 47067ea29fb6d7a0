//! Application configuration.
//!
//! Compile-time defaults, overridable at runtime by `<meta>` tags in the
//! hosting page:
//!
//! ```html
//! <meta name="dfs:api-base" content="http://gateway.local:3000/api">
//! <meta name="dfs:poll-interval-ms" content="2000">
//! <meta name="dfs:request-timeout-ms" content="5000">
//! ```

/// Gateway API base URL (no trailing slash).
pub const DEFAULT_API_BASE: &str = "http://localhost:3000/api";

/// Period of the status/files/logs refresh cycle.
pub const POLL_INTERVAL_MS: u32 = 2000;

/// Upper bound on any single gateway call.
pub const REQUEST_TIMEOUT_MS: u32 = 5000;

pub const API_BASE_META: &str = "dfs:api-base";
pub const POLL_INTERVAL_META: &str = "dfs:poll-interval-ms";
pub const REQUEST_TIMEOUT_META: &str = "dfs:request-timeout-ms";

/// Resolved console settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConsoleConfig {
    pub api_base: String,
    pub poll_interval_ms: u32,
    pub request_timeout_ms: u32,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            poll_interval_ms: POLL_INTERVAL_MS,
            request_timeout_ms: REQUEST_TIMEOUT_MS,
        }
    }
}

impl ConsoleConfig {
    /// Apply raw override strings on top of the defaults.
    ///
    /// Blank values and non-positive or unparsable numbers are ignored.
    pub fn from_overrides(
        api_base: Option<String>,
        poll_interval_ms: Option<String>,
        request_timeout_ms: Option<String>,
    ) -> Self {
        let defaults = Self::default();

        let api_base = api_base
            .map(|base| base.trim().trim_end_matches('/').to_string())
            .filter(|base| !base.is_empty())
            .unwrap_or(defaults.api_base);

        Self {
            api_base,
            poll_interval_ms: parse_millis(poll_interval_ms).unwrap_or(defaults.poll_interval_ms),
            request_timeout_ms: parse_millis(request_timeout_ms)
                .unwrap_or(defaults.request_timeout_ms),
        }
    }

    /// Read overrides from the current document's `<meta>` tags.
    pub fn from_document() -> Self {
        let config = Self::from_overrides(
            read_meta(API_BASE_META),
            read_meta(POLL_INTERVAL_META),
            read_meta(REQUEST_TIMEOUT_META),
        );
        log::debug!("console config: {:?}", config);
        config
    }
}

fn parse_millis(raw: Option<String>) -> Option<u32> {
    raw?.trim().parse::<u32>().ok().filter(|ms| *ms > 0)
}

fn read_meta(name: &str) -> Option<String> {
    gloo_utils::document()
        .query_selector(&format!("meta[name=\"{}\"]", name))
        .ok()
        .flatten()
        .and_then(|meta| meta.get_attribute("content"))
}
