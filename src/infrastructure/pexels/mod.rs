// SPDX-License-Identifier: MPL-2.0
//! HTTP adapter for the stock photo search API.
//!
//! [`PexelsClient`] implements [`ImageSearch`] with a single
//! `GET <endpoint>?query=<q>&per_page=<n>&page=<p>` request per call, the API
//! credential travelling in the `Authorization` header. [`ImageDownloader`]
//! fetches the rendition bytes shown in the grid and the lightbox.
//!
//! Neither type retries; failures are reported once and the caller decides
//! what to do with them.

mod wire;

pub use wire::parse_page;

use crate::application::port::{ImageSearch, SearchFuture};
use crate::domain::error::SearchError;
use crate::domain::search::{PageNumber, PageSize, Query};
use crate::error::Result;
use futures_util::future::BoxFuture;
use reqwest::header::AUTHORIZATION;
use std::fmt;
use std::time::Duration;

/// User agent sent with every request.
const USER_AGENT: &str = concat!("VoiceLens/", env!("CARGO_PKG_VERSION"));

/// Connection settings for the search API.
#[derive(Clone)]
pub struct SearchEndpoint {
    /// Full URL of the search resource.
    pub url: String,
    /// Credential sent verbatim in the `Authorization` header.
    pub api_key: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl fmt::Debug for SearchEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchEndpoint")
            .field("url", &self.url)
            .field("api_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Image search provider backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct PexelsClient {
    http: reqwest::Client,
    endpoint: SearchEndpoint,
}

impl PexelsClient {
    /// Builds a client for `endpoint`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized (TLS
    /// backend unavailable).
    pub fn new(endpoint: SearchEndpoint) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(endpoint.timeout)
            .build()?;
        Ok(Self { http, endpoint })
    }

    /// Returns a downloader sharing this client's connection pool.
    #[must_use]
    pub fn downloader(&self) -> ImageDownloader {
        ImageDownloader {
            http: self.http.clone(),
        }
    }

    /// Returns true when a credential is configured.
    #[must_use]
    pub fn has_credential(&self) -> bool {
        !self.endpoint.api_key.trim().is_empty()
    }
}

impl ImageSearch for PexelsClient {
    fn fetch(&self, query: &Query, page: PageNumber, page_size: PageSize) -> SearchFuture {
        let request = self
            .http
            .get(&self.endpoint.url)
            .header(AUTHORIZATION, self.endpoint.api_key.as_str())
            .query(&[
                ("query", query.as_str().to_string()),
                ("per_page", page_size.value().to_string()),
                ("page", page.value().to_string()),
            ]);

        Box::pin(async move {
            let response = request
                .send()
                .await
                .map_err(|e| SearchError::Network(e.to_string()))?;

            let status = response.status();
            if !status.is_success() {
                return Err(SearchError::Http(status.as_u16()));
            }

            let body = response
                .bytes()
                .await
                .map_err(|e| SearchError::Network(e.to_string()))?;
            parse_page(&body)
        })
    }
}

/// Downloads image renditions referenced by result items.
#[derive(Debug, Clone)]
pub struct ImageDownloader {
    http: reqwest::Client,
}

impl ImageDownloader {
    /// Fetches the encoded bytes at `url`.
    ///
    /// The future resolves to [`SearchError::Network`] on transport failure
    /// and [`SearchError::Http`] for a non-success status.
    #[must_use]
    pub fn fetch(&self, url: &str) -> BoxFuture<'static, std::result::Result<Vec<u8>, SearchError>> {
        let request = self.http.get(url);

        Box::pin(async move {
            let response = request
                .send()
                .await
                .map_err(|e| SearchError::Network(e.to_string()))?;

            let status = response.status();
            if !status.is_success() {
                return Err(SearchError::Http(status.as_u16()));
            }

            let bytes = response
                .bytes()
                .await
                .map_err(|e| SearchError::Network(e.to_string()))?;
            Ok(bytes.to_vec())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::sync::oneshot;

    /// Serves one canned HTTP response and reports the raw request head.
    async fn serve_once(status_line: &'static str, body: &'static str) -> (String, oneshot::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("addr");
        let (head_tx, head_rx) = oneshot::channel();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.expect("accept");
            let mut buf = Vec::new();
            let mut chunk = [0u8; 1024];
            while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut chunk).await.expect("read");
                if n == 0 {
                    break;
                }
                buf.extend_from_slice(&chunk[..n]);
            }
            let _ = head_tx.send(String::from_utf8_lossy(&buf).to_string());

            let response = format!(
                "{status_line}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.expect("write");
            socket.shutdown().await.ok();
        });

        (format!("http://{addr}/v1/search"), head_rx)
    }

    fn client(url: String) -> PexelsClient {
        PexelsClient::new(SearchEndpoint {
            url,
            api_key: "test-key".to_string(),
            timeout: Duration::from_secs(5),
        })
        .expect("client")
    }

    #[tokio::test]
    async fn sends_query_parameters_and_credential() {
        let (url, head) = serve_once("HTTP/1.1 200 OK", r#"{"photos": []}"#).await;
        let client = client(url);
        let query = Query::parse("red balloons").expect("query");

        let page = client
            .fetch(&query, PageNumber::new(2), PageSize::new(16))
            .await
            .expect("success");
        assert!(page.is_empty());

        let head = head.await.expect("request captured");
        let request_line = head.lines().next().unwrap_or_default();
        assert!(request_line.starts_with("GET /v1/search?"));
        assert!(request_line.contains("query=red+balloons"));
        assert!(request_line.contains("per_page=16"));
        assert!(request_line.contains("page=2"));
        assert!(head.to_ascii_lowercase().contains("authorization: test-key"));
    }

    #[tokio::test]
    async fn non_success_status_is_http_error() {
        let (url, _head) = serve_once("HTTP/1.1 401 Unauthorized", r#"{"error":"bad key"}"#).await;
        let query = Query::parse("cats").expect("query");

        let err = client(url)
            .fetch(&query, PageNumber::FIRST, PageSize::default())
            .await
            .expect_err("401");
        assert_eq!(err, SearchError::Http(401));
    }

    #[tokio::test]
    async fn malformed_body_is_parse_error() {
        let (url, _head) = serve_once("HTTP/1.1 200 OK", "not json").await;
        let query = Query::parse("cats").expect("query");

        let err = client(url)
            .fetch(&query, PageNumber::FIRST, PageSize::default())
            .await
            .expect_err("garbage");
        assert!(matches!(err, SearchError::Parse(_)));
    }

    #[tokio::test]
    async fn unreachable_server_is_network_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("addr");
        drop(listener);
        let query = Query::parse("cats").expect("query");

        let err = client(format!("http://{addr}/v1/search"))
            .fetch(&query, PageNumber::FIRST, PageSize::default())
            .await
            .expect_err("connection refused");
        assert!(matches!(err, SearchError::Network(_)));
    }

    #[tokio::test]
    async fn downloader_returns_body_bytes() {
        let (url, _head) = serve_once("HTTP/1.1 200 OK", "JPEGDATA").await;
        let bytes = client(url.clone())
            .downloader()
            .fetch(&url)
            .await
            .expect("download");
        assert_eq!(bytes, b"JPEGDATA");
    }

    #[test]
    fn credential_is_redacted_in_debug_output() {
        let endpoint = SearchEndpoint {
            url: "https://api.example/search".into(),
            api_key: "secret".into(),
            timeout: Duration::from_secs(1),
        };
        assert!(!format!("{endpoint:?}").contains("secret"));
    }
}
