use super::{ApiError, MarketData, RawResponse};
use crate::{Pair, Query};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Root of the public BitoPro REST API.
pub const BASE_URL: &str = "https://api.bitopro.com/v3";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Client for the public BitoPro REST API. Every call is a single
/// independent GET; there are no retries and no caching.
pub struct BitoPro {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl BitoPro {
    pub fn new() -> Self {
        Self::with_base_url(BASE_URL)
    }

    /// Point the client somewhere else, e.g. a local stub of the exchange.
    pub fn with_base_url<S: Into<String>>(base_url: S) -> Self {
        BitoPro {
            client: Client::new(),
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    async fn get(
        &self,
        path: &str,
        params: &[(String, String)],
    ) -> Result<RawResponse, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        log::debug!("GET {} {:?}", url, params);

        let response = self
            .client
            .get(&url)
            .query(params)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|err| {
                if err.is_timeout() {
                    ApiError::Timeout
                } else {
                    ApiError::Network
                }
            })?;

        let status = response.status();
        let body = response.json().await.map_err(|err| {
            if err.is_timeout() {
                ApiError::Timeout
            } else {
                ApiError::Decode
            }
        })?;

        log::trace!("{} answered {}", url, status);
        Ok(RawResponse {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_owned(),
            body,
        })
    }
}

#[async_trait]
impl MarketData for BitoPro {
    const NAME: &'static str = "BitoPro";

    async fn ohlc(&self, query: &Query) -> Result<RawResponse, ApiError> {
        self.ohlc_with_params(query.pair, &query.params()).await
    }

    async fn ohlc_with_params(
        &self,
        pair: Pair,
        params: &[(String, String)],
    ) -> Result<RawResponse, ApiError> {
        self.get(&format!("/trading-history/{}", pair), params).await
    }

    async fn limits(&self) -> Result<RawResponse, ApiError> {
        self.get("/public/get_limitations_and_fees", &[]).await
    }
}
