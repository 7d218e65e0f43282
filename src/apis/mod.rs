mod bitopro;
mod mock;

pub use bitopro::*;
pub use mock::*;

use crate::{Pair, Query, RawCandle};
use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Response envelope kept for every HTTP outcome. A non-2xx status is data
/// for the checks to inspect, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub status_text: String,
    pub body: Value,
}

impl RawResponse {
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }

    /// The top-level `data` array, if the body carries one.
    pub fn data(&self) -> Option<&Vec<Value>> {
        self.body.get("data")?.as_array()
    }

    /// Typed view of the records. Fails on any record that does not match
    /// the documented shape.
    pub fn records(&self) -> Result<Vec<RawCandle>, serde_json::Error> {
        serde_json::from_value(self.body.get("data").cloned().unwrap_or(Value::Null))
    }
}

#[derive(Error, Debug)]
pub enum ApiError {
    /// The request never produced an HTTP response, so no status exists.
    #[error("Could not reach the exchange.")]
    Network,
    #[error("The request timed out.")]
    Timeout,
    #[error("The response body is not valid JSON.")]
    Decode,
}

#[async_trait]
pub trait MarketData: Send + Sync {
    const NAME: &'static str;

    /// Fetch candles for a query.
    async fn ohlc(&self, query: &Query) -> Result<RawResponse, ApiError>;
    /// Fetch with raw query parameters, for deliberately malformed requests.
    async fn ohlc_with_params(
        &self,
        pair: Pair,
        params: &[(String, String)],
    ) -> Result<RawResponse, ApiError>;
    /// Fetch the exchange-wide limitations and fees document.
    async fn limits(&self) -> Result<RawResponse, ApiError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn records_reject_malformed_data() {
        let response = RawResponse {
            status: 200,
            status_text: "OK".to_owned(),
            body: json!({ "data": [{ "timestamp": "oops" }] }),
        };
        assert!(response.records().is_err());

        let empty = RawResponse {
            status: 200,
            status_text: "OK".to_owned(),
            body: json!({ "data": [] }),
        };
        assert_eq!(empty.records().unwrap(), Vec::new());
    }

    #[test]
    fn data_is_none_without_an_array() {
        let response = RawResponse {
            status: 200,
            status_text: "OK".to_owned(),
            body: json!({ "data": 42 }),
        };
        assert!(response.data().is_none());
    }
}
