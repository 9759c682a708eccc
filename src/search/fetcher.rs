//! Retrieval of remote pages for the search.

use anyhow::{Context, bail};
use log::debug;
use mockall::automock;
use reqwest::Client;

/// Fetches the body of a web page.
///
/// This trait abstracts the HTTP operations for easier testing with mocks.
#[automock]
pub trait PageFetcher {
    /// Fetches `url` and returns the raw HTML document.
    async fn fetch_document(&self, url: &str) -> anyhow::Result<String>;
}

/// [PageFetcher] backed by a [reqwest] client.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        HttpFetcher {
            client: Client::new(),
        }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl PageFetcher for HttpFetcher {
    async fn fetch_document(&self, url: &str) -> anyhow::Result<String> {
        debug!("fetching page {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("request to {} failed", url))?;

        let status = response.status();
        if !status.is_success() {
            bail!("{} answered {}", url, status);
        }

        response
            .text()
            .await
            .with_context(|| format!("failed to read body of {}", url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fetch_document() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/tutorials/lighting")
            .with_status(200)
            .with_body("<html><title>Lighting</title></html>")
            .create_async()
            .await;

        let body = HttpFetcher::new()
            .fetch_document(&format!("{}/tutorials/lighting", server.url()))
            .await
            .unwrap();

        assert_eq!(body, "<html><title>Lighting</title></html>");
    }

    #[tokio::test]
    async fn test_fetch_document_error_status() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/missing")
            .with_status(404)
            .create_async()
            .await;

        let result = HttpFetcher::default()
            .fetch_document(&format!("{}/missing", server.url()))
            .await;

        assert!(result.unwrap_err().to_string().contains("404"));
    }
}
