//! Response specification type

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::response::ResponseHeaders;

/// Timing metadata reported by the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timings {
    /// When the request was issued
    pub started_at: DateTime<Utc>,
    /// Time until the response headers arrived
    #[serde(with = "option_duration_millis", default)]
    pub first_byte: Option<Duration>,
    /// Time until the body was fully read
    #[serde(with = "option_duration_millis", default)]
    pub total: Option<Duration>,
}

impl Timings {
    /// Timings for a request that never produced a response.
    #[must_use]
    pub const fn started(started_at: DateTime<Utc>) -> Self {
        Self {
            started_at,
            first_byte: None,
            total: None,
        }
    }
}

impl Default for Timings {
    fn default() -> Self {
        Self::started(Utc::now())
    }
}

/// HTTP response as seen by the assertion handlers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseSpec {
    /// HTTP status code
    pub status: u16,
    /// Response headers, case-folded
    pub headers: ResponseHeaders,
    /// Response body as string
    pub body: String,
    /// Timing metadata
    pub timings: Timings,
}

impl ResponseSpec {
    /// Creates a response with default timings.
    #[must_use]
    pub fn new<K, V>(
        status: u16,
        headers: impl IntoIterator<Item = (K, V)>,
        body: impl Into<String>,
    ) -> Self
    where
        K: AsRef<str>,
        V: Into<String>,
    {
        Self {
            status,
            headers: headers.into_iter().collect(),
            body: body.into(),
            timings: Timings::default(),
        }
    }

    /// Replaces the timing metadata.
    #[must_use]
    pub fn with_timings(mut self, timings: Timings) -> Self {
        self.timings = timings;
        self
    }

    /// Returns the raw `Content-Type` header, if any.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.headers.get("content-type")
    }
}

impl Default for ResponseSpec {
    fn default() -> Self {
        Self {
            status: 0,
            headers: ResponseHeaders::new(),
            body: String::new(),
            timings: Timings::default(),
        }
    }
}

mod option_duration_millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    #[allow(clippy::ref_option)]
    pub fn serialize<S>(duration: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match duration {
            Some(d) => {
                let millis = u64::try_from(d.as_millis()).unwrap_or(u64::MAX);
                serializer.serialize_some(&millis)
            }
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = Option::<u64>::deserialize(deserializer)?;
        Ok(millis.map(Duration::from_millis))
    }
}
