// src/fetch/mod.rs

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::debug;
use url::{form_urlencoded, Url};

pub mod mock;

pub use mock::MockTransport;

/// Status and body of one GET. The status is not checked here.
#[derive(Clone, Debug)]
pub struct FetchResponse {
    pub status: StatusCode,
    pub body: String,
}

impl FetchResponse {
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// HTTP GET collaborator used by the lookup.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &Url) -> Result<FetchResponse>;
}

/// `Transport` over a shared reqwest client.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder().user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("building HTTP client")?;
        Ok(Self { client })
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &Url) -> Result<FetchResponse> {
        debug!("Fetching text from {}", url);
        let resp = self
            .client
            .get(url.clone())
            .send()
            .await
            .with_context(|| format!("GET {} failed", url))?;
        let status = resp.status();
        let body = resp
            .text()
            .await
            .with_context(|| format!("Reading text from {}", url))?;
        Ok(FetchResponse { status, body })
    }
}

/// URL actually requested: `proxy` followed by the percent-encoded `source`, or
/// `source` itself when no proxy is configured.
pub fn request_url(source: &str, proxy: Option<&str>) -> Result<Url> {
    let raw = match proxy {
        Some(prefix) => {
            let encoded: String = form_urlencoded::byte_serialize(source.as_bytes()).collect();
            format!("{}{}", prefix, encoded)
        }
        None => source.to_string(),
    };
    Url::parse(&raw).with_context(|| format!("parsing request URL {}", raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHEET: &str = "https://docs.google.com/spreadsheets/d/e/abc/pub?output=csv";

    #[test]
    fn test_request_url_through_proxy() {
        let url = request_url(SHEET, Some("https://corsproxy.io/?")).unwrap();
        assert_eq!(
            url.as_str(),
            "https://corsproxy.io/?https%3A%2F%2Fdocs.google.com%2Fspreadsheets%2Fd%2Fe%2Fabc%2Fpub%3Foutput%3Dcsv"
        );
    }

    #[test]
    fn test_request_url_direct() {
        let url = request_url(SHEET, None).unwrap();
        assert_eq!(url.as_str(), SHEET);
    }

    #[test]
    fn test_http_transport_builds() {
        assert!(HttpTransport::new(None).is_ok());
        assert!(HttpTransport::new(Some(Duration::from_secs(3))).is_ok());
    }

    #[test]
    fn test_request_url_rejects_garbage() {
        assert!(request_url("not a url", None).is_err());
    }
}
