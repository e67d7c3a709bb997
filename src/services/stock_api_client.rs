use crate::error::{AppError, Result};
use crate::models::{SectorSummary, StockResponse};
use reqwest::Url;
use serde::de::DeserializeOwned;
use std::future::Future;
use tracing::{debug, info, warn};

/// The two queries the chart view needs from the stock API
pub trait StockApi {
    /// GET /api/stocks
    fn get_sectors(&self) -> impl Future<Output = Result<Vec<SectorSummary>>> + Send;

    /// GET /api/stocks/{ticker}?period={period}
    fn get_stocks(
        &self,
        ticker: &str,
        period: &str,
    ) -> impl Future<Output = Result<Vec<StockResponse>>> + Send;
}

/// HTTP client for the stock API.
///
/// No caching and no retries: any transport failure, non-2xx status or
/// undecodable body is returned to the caller as is.
#[derive(Debug, Clone)]
pub struct StockApiClient {
    base_url: String,
    client: reqwest::Client,
}

impl StockApiClient {
    /// Create a new API client
    ///
    /// # Arguments
    /// * `base_url` - Base URL of the API server (e.g., "http://127.0.0.1:3000")
    pub fn new(base_url: &str) -> Result<Self> {
        // Trim whitespace and remove trailing slashes from base_url
        let base_url = base_url.trim().trim_end_matches('/').to_string();

        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(AppError::Config(format!(
                "Invalid base_url: must start with http:// or https://, got: '{}'",
                base_url
            )));
        }

        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| AppError::Network(format!("Failed to create HTTP client: {}", e)))?;

        info!(%base_url, "Created StockApiClient");

        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn stocks_url(&self, ticker: &str) -> Result<Url> {
        let mut url = Url::parse(&format!("{}/api/stocks", self.base_url))
            .map_err(|e| AppError::Config(format!("Invalid base_url '{}': {}", self.base_url, e)))?;
        url.path_segments_mut()
            .map_err(|_| AppError::Config(format!("base_url cannot be a base: {}", self.base_url)))?
            .push(ticker);
        Ok(url)
    }

    async fn fetch_json<T: DeserializeOwned>(&self, request: reqwest::RequestBuilder) -> Result<T> {
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%status, %body, "Stock API request failed");
            return Err(AppError::Network(format!("HTTP {}: {}", status, body)));
        }

        Ok(response.json::<T>().await?)
    }
}

impl StockApi for StockApiClient {
    async fn get_sectors(&self) -> Result<Vec<SectorSummary>> {
        let url = format!("{}/api/stocks", self.base_url);
        debug!(%url, "Fetching sectors");
        self.fetch_json(self.client.get(url)).await
    }

    async fn get_stocks(&self, ticker: &str, period: &str) -> Result<Vec<StockResponse>> {
        let url = self.stocks_url(ticker)?;
        debug!(%url, period, "Fetching stocks");
        let stocks: Vec<StockResponse> = self
            .fetch_json(self.client.get(url).query(&[("period", period)]))
            .await?;
        debug!(ticker, period, records = stocks.len(), "Fetched stocks");
        Ok(stocks)
    }
}
