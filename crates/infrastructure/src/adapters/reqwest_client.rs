//! HTTP Client implementation using reqwest.
//!
//! This adapter implements the `HttpClient` port using the reqwest library.

use std::error::Error as _;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use chrono::Utc;
use hra_application::ports::{HttpClient, TransportError};
use hra_domain::{HttpMethod, RequestSpec, ResponseSpec, Timings};
use reqwest::{Client, Method, Url};
use tracing::debug;

/// HTTP client implementation using reqwest.
///
/// Redirects are followed (up to 10). The timeout of each request is taken
/// from its [`RequestSpec`].
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    client: Client,
}

impl ReqwestHttpClient {
    /// Creates a new HTTP client with default settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be created.
    pub fn new() -> Result<Self, TransportError> {
        let client = Client::builder()
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .map_err(|e| TransportError::Other(e.to_string()))?;

        Ok(Self { client })
    }

    /// Converts domain `HttpMethod` to reqwest `Method`.
    const fn to_reqwest_method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Patch => Method::PATCH,
            HttpMethod::Delete => Method::DELETE,
            HttpMethod::Head => Method::HEAD,
            HttpMethod::Options => Method::OPTIONS,
        }
    }

    /// Maps reqwest errors to `TransportError`.
    fn map_error(error: &reqwest::Error, timeout_ms: u64) -> TransportError {
        if error.is_timeout() {
            return TransportError::Timeout { timeout_ms };
        }
        if error.is_connect() {
            return TransportError::Connection(describe(error));
        }
        if error.is_builder() {
            return TransportError::InvalidUrl(describe(error));
        }
        TransportError::Other(describe(error))
    }
}

/// The error message followed by its sources.
fn describe(error: &reqwest::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn execute(&self, request: &RequestSpec) -> Result<ResponseSpec, TransportError> {
        let url = Url::parse(&request.url)
            .map_err(|e| TransportError::InvalidUrl(format!("{e}: {}", request.url)))?;
        let timeout_ms = request.timeout_ms;

        let mut builder = self
            .client
            .request(Self::to_reqwest_method(request.method), url)
            .timeout(Duration::from_millis(timeout_ms));
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        debug!(method = %request.method, url = %request.url, timeout_ms, "sending request");
        let started_at = Utc::now();
        let start = Instant::now();

        let response = builder
            .send()
            .await
            .map_err(|e| Self::map_error(&e, timeout_ms))?;
        let first_byte = start.elapsed();

        let status = response.status().as_u16();
        let headers: Vec<(String, String)> = response
            .headers()
            .iter()
            .map(|(k, v)| {
                (
                    k.as_str().to_string(),
                    String::from_utf8_lossy(v.as_bytes()).into_owned(),
                )
            })
            .collect();

        let body = response
            .text()
            .await
            .map_err(|e| Self::map_error(&e, timeout_ms))?;
        let total = start.elapsed();

        debug!(status, ?first_byte, ?total, "response received");
        Ok(ResponseSpec::new(status, headers, body).with_timings(Timings {
            started_at,
            first_byte: Some(first_byte),
            total: Some(total),
        }))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use hra_domain::RequestOptions;
    use pretty_assertions::assert_eq;
    use wiremock::matchers::{body_string, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn spec(url: &str, options: RequestOptions) -> RequestSpec {
        RequestSpec::resolve(url, options, 3000, "probe/1.0").unwrap()
    }

    #[test]
    fn test_to_reqwest_method() {
        assert_eq!(
            ReqwestHttpClient::to_reqwest_method(HttpMethod::Get),
            Method::GET
        );
        assert_eq!(
            ReqwestHttpClient::to_reqwest_method(HttpMethod::Post),
            Method::POST
        );
        assert_eq!(
            ReqwestHttpClient::to_reqwest_method(HttpMethod::Head),
            Method::HEAD
        );
    }

    #[tokio::test]
    async fn test_response_is_captured() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/page"))
            .and(header("user-agent", "probe/1.0"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("Content-Type", "text/html; charset=utf-8")
                    .insert_header("X-Trace", "abc")
                    .set_body_string("<h1>Hello</h1>"),
            )
            .mount(&server)
            .await;

        let client = ReqwestHttpClient::new().unwrap();
        let request = spec(&format!("{}/page", server.uri()), RequestOptions::new());
        let response = client.execute(&request).await.unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(response.body, "<h1>Hello</h1>");
        assert_eq!(response.content_type(), Some("text/html; charset=utf-8"));
        assert_eq!(response.headers.get("x-trace"), Some("abc"));
        assert!(response.timings.first_byte.is_some());
        assert!(response.timings.total >= response.timings.first_byte);
    }

    #[tokio::test]
    async fn test_method_headers_and_body_are_sent() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/submit"))
            .and(header("x-token", "secret"))
            .and(body_string("payload"))
            .respond_with(ResponseTemplate::new(201))
            .mount(&server)
            .await;

        let client = ReqwestHttpClient::new().unwrap();
        let request = spec(
            &format!("{}/submit", server.uri()),
            RequestOptions::new()
                .method(HttpMethod::Post)
                .header("X-Token", "secret")
                .body("payload"),
        );

        assert_eq!(client.execute(&request).await.unwrap().status, 201);
    }

    #[tokio::test]
    async fn test_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
            .mount(&server)
            .await;

        let client = ReqwestHttpClient::new().unwrap();
        let request = spec(&server.uri(), RequestOptions::new().timeout_ms(50));

        assert_eq!(
            client.execute(&request).await.unwrap_err(),
            TransportError::Timeout { timeout_ms: 50 }
        );
    }

    #[tokio::test]
    async fn test_connection_refused() {
        let client = ReqwestHttpClient::new().unwrap();
        let request = spec("http://127.0.0.1:1/", RequestOptions::new());

        assert!(matches!(
            client.execute(&request).await,
            Err(TransportError::Connection(_))
        ));
    }
}
