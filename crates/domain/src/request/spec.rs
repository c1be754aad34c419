//! Request specification type

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{DomainError, DomainResult};
use crate::request::HttpMethod;

/// Optional request settings supplied when registering a check.
///
/// Everything here falls back to an engine default: the method to `GET`, the
/// timeout to the engine timeout, the title to `"METHOD URL"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestOptions {
    /// HTTP method, `GET` when omitted.
    pub method: Option<HttpMethod>,
    /// Extra request headers.
    pub headers: BTreeMap<String, String>,
    /// Request body.
    pub body: Option<String>,
    /// Per-check timeout in milliseconds. `None` or `0` means engine default.
    pub timeout_ms: Option<u64>,
    /// Title used in result reporting.
    pub title: Option<String>,
    /// Arbitrary tag returned with the result.
    pub info: Option<String>,
}

impl RequestOptions {
    /// Creates empty options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the HTTP method.
    #[must_use]
    pub fn method(mut self, method: HttpMethod) -> Self {
        self.method = Some(method);
        self
    }

    /// Adds a request header.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Sets the request body.
    #[must_use]
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Sets the per-check timeout.
    #[must_use]
    pub fn timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = Some(timeout_ms);
        self
    }

    /// Sets the title used in reports.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the info tag.
    #[must_use]
    pub fn info(mut self, info: impl Into<String>) -> Self {
        self.info = Some(info.into());
        self
    }
}

/// A fully resolved request, ready for the transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestSpec {
    /// HTTP method
    pub method: HttpMethod,
    /// Absolute http(s) URL
    pub url: String,
    /// Request headers in sending order
    pub headers: Vec<(String, String)>,
    /// Optional request body
    pub body: Option<String>,
    /// Timeout enforced by the transport
    pub timeout_ms: u64,
    /// Title given by the caller
    pub title: Option<String>,
    /// Info tag given by the caller
    pub info: Option<String>,
}

impl RequestSpec {
    /// Resolves caller options against engine defaults.
    ///
    /// `agent` is sent as `User-Agent` unless the options already carry one.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidUrl`] if `url` is not an absolute
    /// http or https URL.
    pub fn resolve(
        url: &str,
        options: RequestOptions,
        default_timeout_ms: u64,
        agent: &str,
    ) -> DomainResult<Self> {
        let parsed = Url::parse(url.trim())
            .map_err(|e| DomainError::InvalidUrl(format!("{e}: {url}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(DomainError::InvalidUrl(format!(
                "URL must start with http:// or https://: {url}"
            )));
        }

        let mut headers: Vec<(String, String)> = options.headers.into_iter().collect();
        if !headers
            .iter()
            .any(|(name, _)| name.eq_ignore_ascii_case("user-agent"))
        {
            headers.push(("User-Agent".to_string(), agent.to_string()));
        }

        let timeout_ms = match options.timeout_ms {
            Some(ms) if ms > 0 => ms,
            _ => default_timeout_ms,
        };

        Ok(Self {
            method: options.method.unwrap_or_default(),
            url: url.trim().to_string(),
            headers,
            body: options.body,
            timeout_ms,
            title: options.title,
            info: options.info,
        })
    }

    /// Returns the caller's title, or `"METHOD URL"`.
    #[must_use]
    pub fn display_title(&self) -> String {
        self.title
            .clone()
            .unwrap_or_else(|| format!("{} {}", self.method, self.url))
    }

    /// Returns the value of a request header (case-insensitive).
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}
