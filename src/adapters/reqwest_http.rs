//! Reqwest-based HTTP client adapter.
//!
//! This module provides a production HTTP client implementation using reqwest,
//! implementing the [`HttpClient`] trait from `crate::traits`.

use async_trait::async_trait;
use std::time::Duration;

use crate::traits::{Headers, HttpClient, HttpError, Response};

/// HTTP client implementation using reqwest.
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    client: reqwest::Client,
}

impl ReqwestHttpClient {
    /// Create a new ReqwestHttpClient with default settings.
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Create a client with a user agent and request timeout.
    ///
    /// The NWS API rejects requests without a `User-Agent`.
    pub fn with_settings(user_agent: &str, timeout: Duration) -> Result<Self, HttpError> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .map_err(|e| HttpError::Other(e.to_string()))?;
        Ok(Self { client })
    }

    /// Create a new ReqwestHttpClient with a custom reqwest::Client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Get a reference to the underlying reqwest::Client.
    pub fn inner(&self) -> &reqwest::Client {
        &self.client
    }

    /// Convert reqwest error to HttpError.
    fn convert_error(err: reqwest::Error) -> HttpError {
        if err.is_timeout() {
            HttpError::Timeout(err.to_string())
        } else if err.is_connect() {
            HttpError::ConnectionFailed(err.to_string())
        } else if err.is_builder() {
            HttpError::InvalidUrl(err.to_string())
        } else {
            HttpError::Other(err.to_string())
        }
    }

    /// Convert reqwest headers to our Headers type.
    fn convert_headers(headers: &reqwest::header::HeaderMap) -> Headers {
        headers
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.to_string(), v.to_string()))
            })
            .collect()
    }

    /// Apply headers to a request builder.
    fn apply_headers(
        builder: reqwest::RequestBuilder,
        headers: &Headers,
    ) -> reqwest::RequestBuilder {
        let mut builder = builder;
        for (key, value) in headers {
            builder = builder.header(key, value);
        }
        builder
    }
}

impl Default for ReqwestHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn get(&self, url: &str, headers: &Headers) -> Result<Response, HttpError> {
        let builder = self.client.get(url);
        let builder = Self::apply_headers(builder, headers);

        let response = builder.send().await.map_err(Self::convert_error)?;

        let status = response.status().as_u16();
        let response_headers = Self::convert_headers(response.headers());
        let body = response.bytes().await.map_err(Self::convert_error)?;

        tracing::debug!(url, status, bytes = body.len(), "GET completed");
        Ok(Response::with_headers(status, response_headers, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reqwest_http_client_new() {
        let client = ReqwestHttpClient::new();
        let _inner = client.inner();
    }

    #[test]
    fn test_reqwest_http_client_with_settings() {
        let client = ReqwestHttpClient::with_settings("afdview-test", Duration::from_secs(5));
        assert!(client.is_ok());
    }

    #[test]
    fn test_apply_headers() {
        let mut headers = Headers::new();
        headers.insert("Accept".to_string(), "application/geo+json".to_string());

        let client = reqwest::Client::new();
        let builder = client.get("https://api.weather.gov");
        let request = ReqwestHttpClient::apply_headers(builder, &headers)
            .build()
            .unwrap();

        assert_eq!(
            request.headers().get("Accept").unwrap(),
            "application/geo+json"
        );
    }
}
