//! GeoAsset HTTP Client implementation

use std::path::Path;
use std::time::Duration;

use geoasset_core::{Asset, UploadResponse};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, instrument};
use url::Url;

use crate::error::{AssetClientError, Result};
use crate::feed::ChangeFeed;

/// Default request timeout
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
/// Default connection timeout
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Error body returned by the server
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: String,
}

/// GeoAsset REST API client
#[derive(Debug, Clone)]
pub struct AssetClient {
    client: Client,
    /// Same settings minus the total timeout, for long-lived feeds
    stream_client: Client,
    base_url: Url,
}

impl AssetClient {
    /// Create a new client
    ///
    /// # Arguments
    /// * `base_url` - Base URL of the GeoAsset server (e.g., "http://localhost:3000")
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_config(base_url, DEFAULT_TIMEOUT, DEFAULT_CONNECT_TIMEOUT)
    }

    /// Create a new client with custom timeouts
    pub fn with_config(
        base_url: &str,
        timeout: Duration,
        connect_timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .build()?;
        let stream_client = Client::builder()
            .connect_timeout(connect_timeout)
            .build()?;

        let base_url = Url::parse(base_url)?;

        Ok(Self {
            client,
            stream_client,
            base_url,
        })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Get a reference to the underlying HTTP client.
    ///
    /// Useful for making custom requests while reusing the client's
    /// connection pool.
    pub fn http_client(&self) -> &Client {
        &self.client
    }

    // =========================================================================
    // Health Check
    // =========================================================================

    /// Check server health
    #[instrument(skip(self))]
    pub async fn health(&self) -> Result<String> {
        let url = self.base_url.join("/health")?;
        let response = self.client.get(url).send().await?;

        if response.status().is_success() {
            Ok(response.text().await?)
        } else {
            Err(self.extract_error(response).await)
        }
    }

    // =========================================================================
    // Asset Operations
    // =========================================================================

    /// URL of the asset collection, filtered to one company if given
    pub fn assets_url(&self, company_id: Option<&str>) -> Result<Url> {
        let mut url = self.base_url.join("/assets")?;
        if let Some(id) = company_id {
            url.query_pairs_mut().append_pair("companyId", id);
        }
        Ok(url)
    }

    /// URL of the change feed, filtered to one company if given
    pub fn events_url(&self, company_id: Option<&str>) -> Result<Url> {
        let mut url = self.base_url.join("/assets/events")?;
        if let Some(id) = company_id {
            url.query_pairs_mut().append_pair("companyId", id);
        }
        Ok(url)
    }

    /// List all assets, or those of one company
    #[instrument(skip(self))]
    pub async fn list_assets(&self, company_id: Option<&str>) -> Result<Vec<Asset>> {
        let url = self.assets_url(company_id)?;
        debug!("Listing assets from {}", url);

        let response = self.client.get(url).send().await?;
        self.handle_response(response).await
    }

    /// Check whether a company already has assets on the server
    ///
    /// Used before an upload to warn that existing assets will be replaced.
    #[instrument(skip(self))]
    pub async fn company_has_assets(&self, company_id: &str) -> Result<bool> {
        Ok(!self.list_assets(Some(company_id)).await?.is_empty())
    }

    /// Upload an asset file, replacing the company's current assets
    #[instrument(skip(self, content), fields(size = content.len()))]
    pub async fn upload_assets(
        &self,
        company_id: &str,
        file_name: &str,
        content: Vec<u8>,
    ) -> Result<UploadResponse> {
        let url = self.assets_url(None)?;

        let part = Part::bytes(content)
            .file_name(file_name.to_string())
            .mime_str("application/json")?;
        let form = Form::new()
            .text("companyId", company_id.to_string())
            .part("assetFile", part);

        let response = self.client.post(url).multipart(form).send().await?;
        self.handle_response(response).await
    }

    /// Read a file from disk and upload it
    #[instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    pub async fn upload_file(
        &self,
        company_id: &str,
        path: impl AsRef<Path>,
    ) -> Result<UploadResponse> {
        let path = path.as_ref();
        let content = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("assets.json");

        self.upload_assets(company_id, file_name, content).await
    }

    /// Follow the change feed
    #[instrument(skip(self))]
    pub async fn watch(&self, company_id: Option<&str>) -> Result<ChangeFeed> {
        let url = self.events_url(company_id)?;
        ChangeFeed::connect(&self.stream_client, url).await
    }

    // =========================================================================
    // Helper Methods
    // =========================================================================

    /// Handle response and parse JSON
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();

        if status.is_success() {
            response
                .json()
                .await
                .map_err(|e| AssetClientError::ParseError(e.to_string()))
        } else {
            Err(self.extract_error_from_status(response, status).await)
        }
    }

    /// Extract error from failed response
    async fn extract_error(&self, response: reqwest::Response) -> AssetClientError {
        let status = response.status();
        self.extract_error_from_status(response, status).await
    }

    async fn extract_error_from_status(
        &self,
        response: reqwest::Response,
        status: StatusCode,
    ) -> AssetClientError {
        // Try to parse error response body
        let message = match response.json::<ErrorResponse>().await {
            Ok(err) => err.error,
            Err(_) => format!("HTTP {}", status),
        };

        match status {
            StatusCode::BAD_REQUEST => AssetClientError::Rejected(message),
            StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => AssetClientError::Timeout,
            _ => AssetClientError::server_error(status.as_u16(), message),
        }
    }
}
