//! NWS public API source.
//!
//! Two requests: the AFD product list for the office (newest first), then
//! the newest product itself.

use async_trait::async_trait;
use serde::Deserialize;

use crate::discussion::Discussion;
use crate::error::SourceError;
use crate::traits::{DiscussionSource, Headers, HttpClient};

/// Media type the API serves products as.
const ACCEPT: &str = "application/geo+json";

/// One entry of the product list.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummary {
    /// Product id, used to fetch the full product
    pub id: String,
    /// Issuance time of the product
    #[serde(default)]
    pub issuance_time: Option<String>,
}

/// Product list response.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductList {
    #[serde(rename = "@graph", default)]
    pub graph: Vec<ProductSummary>,
}

/// Loads the latest discussion for one office from `api.weather.gov`.
#[derive(Debug, Clone)]
pub struct NwsSource<C: HttpClient> {
    client: C,
    base_url: String,
    office: String,
    user_agent: String,
}

impl<C: HttpClient> NwsSource<C> {
    /// Create a source for `office` (e.g. `KPQR` or `PQR`).
    pub fn new(
        client: C,
        base_url: impl Into<String>,
        office: impl Into<String>,
        user_agent: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            office: office.into().trim().to_uppercase(),
            user_agent: user_agent.into(),
        }
    }

    /// Office as given.
    pub fn office(&self) -> &str {
        &self.office
    }

    /// Location id used by the product endpoints.
    ///
    /// The API indexes AFDs by the three-letter office code, so a four-letter
    /// ICAO id loses its region letter.
    pub fn location(&self) -> &str {
        if self.office.len() == 4 && self.office.is_ascii() {
            &self.office[1..]
        } else {
            &self.office
        }
    }

    /// URL of the AFD product list for this office.
    pub fn list_url(&self) -> String {
        format!(
            "{}/products/types/AFD/locations/{}",
            self.base_url,
            self.location()
        )
    }

    /// URL of a single product.
    pub fn product_url(&self, id: &str) -> String {
        format!("{}/products/{}", self.base_url, id)
    }

    fn headers(&self) -> Headers {
        let mut headers = Headers::new();
        headers.insert("User-Agent".to_string(), self.user_agent.clone());
        headers.insert("Accept".to_string(), ACCEPT.to_string());
        headers
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, SourceError> {
        let response = self.client.get(url, &self.headers()).await?;
        if !response.is_success() {
            tracing::warn!(status = response.status, url, "unexpected API status");
            return Err(SourceError::Status {
                status: response.status,
                url: url.to_string(),
            });
        }
        Ok(response.json()?)
    }
}

#[async_trait]
impl<C: HttpClient> DiscussionSource for NwsSource<C> {
    async fn load(&self) -> Result<Discussion, SourceError> {
        let list: ProductList = self.get_json(&self.list_url()).await?;
        let latest = list.graph.into_iter().next().ok_or_else(|| SourceError::NotAvailable {
            office: self.office.clone(),
        })?;

        tracing::debug!(id = %latest.id, issued = ?latest.issuance_time, "fetching latest AFD");
        let discussion: Discussion = self.get_json(&self.product_url(&latest.id)).await?;
        tracing::info!(
            office = %discussion.issuing_office,
            issued = %discussion.issuance_time,
            "discussion loaded"
        );
        Ok(discussion)
    }

    fn describe(&self) -> String {
        self.office.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{MockHttpClient, MockResponse};
    use crate::traits::HttpError;

    const BASE: &str = "https://api.test";

    fn source(client: MockHttpClient) -> NwsSource<MockHttpClient> {
        NwsSource::new(client, "https://api.test/", "kpqr", "afdview-test")
    }

    fn product_json() -> &'static str {
        r#"{
            "id": "abc-123",
            "productText": "000\nFXUS66 KPQR 011542\n.SYNOPSIS...\nRain.\n",
            "issuingOffice": "KPQR",
            "issuanceTime": "2024-05-01T15:42:00+00:00"
        }"#
    }

    #[test]
    fn test_urls() {
        let source = source(MockHttpClient::new());
        assert_eq!(source.office(), "KPQR");
        assert_eq!(source.location(), "PQR");
        assert_eq!(
            source.list_url(),
            "https://api.test/products/types/AFD/locations/PQR"
        );
        assert_eq!(source.product_url("abc"), "https://api.test/products/abc");
    }

    #[test]
    fn test_three_letter_office_kept() {
        let source = NwsSource::new(MockHttpClient::new(), BASE, "SEW", "ua");
        assert_eq!(source.location(), "SEW");
    }

    #[tokio::test]
    async fn test_load_latest_product() {
        let client = MockHttpClient::new();
        client.set_json(
            "https://api.test/products/types/AFD/locations/PQR",
            200,
            r#"{"@graph": [
                {"id": "abc-123", "issuanceTime": "2024-05-01T15:42:00+00:00"},
                {"id": "older", "issuanceTime": "2024-05-01T09:00:00+00:00"}
            ]}"#,
        );
        client.set_json("https://api.test/products/abc-123", 200, product_json());

        let discussion = source(client.clone()).load().await.unwrap();
        assert_eq!(discussion.issuing_office, "KPQR");
        assert_eq!(discussion.issuance_time, "2024-05-01T15:42:00+00:00");
        assert!(discussion.product_text.contains(".SYNOPSIS..."));

        let requests = client.get_requests();
        assert_eq!(requests.len(), 2);
        for request in &requests {
            assert_eq!(request.headers.get("User-Agent").unwrap(), "afdview-test");
            assert_eq!(request.headers.get("Accept").unwrap(), ACCEPT);
        }
    }

    #[tokio::test]
    async fn test_empty_graph_is_not_available() {
        let client = MockHttpClient::new();
        client.set_json(
            "https://api.test/products/types/AFD/locations/PQR",
            200,
            r#"{"@graph": []}"#,
        );

        let err = source(client).load().await.unwrap_err();
        assert!(matches!(err, SourceError::NotAvailable { ref office } if office == "KPQR"));
        assert!(err.is_not_available());
    }

    #[tokio::test]
    async fn test_bad_status() {
        let client = MockHttpClient::new();
        client.set_json(
            "https://api.test/products/types/AFD/locations/PQR",
            500,
            r#"{"title": "Unexpected Problem"}"#,
        );

        let err = source(client).load().await.unwrap_err();
        assert!(matches!(err, SourceError::Status { status: 500, .. }));
        assert!(!err.is_not_available());
    }

    #[tokio::test]
    async fn test_transport_error() {
        let client = MockHttpClient::new();
        client.set_response(
            "https://api.test/products",
            MockResponse::Error(HttpError::Timeout("20s".to_string())),
        );

        let err = source(client).load().await.unwrap_err();
        assert!(matches!(err, SourceError::Http(HttpError::Timeout(_))));
    }

    #[tokio::test]
    async fn test_malformed_product() {
        let client = MockHttpClient::new();
        client.set_json(
            "https://api.test/products/types/AFD/locations/PQR",
            200,
            r#"{"@graph": [{"id": "abc-123"}]}"#,
        );
        client.set_json("https://api.test/products/abc-123", 200, r#"{"id": "abc-123"}"#);

        let err = source(client).load().await.unwrap_err();
        assert!(matches!(err, SourceError::Decode(_)));
    }
}
