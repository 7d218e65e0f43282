use super::{ApiError, MarketData, RawResponse};
use crate::{Pair, Query, RawCandle, Resolution};

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::{json, Value};

pub trait SeriesGen: Fn(&Query) -> Vec<RawCandle> + Send + Sync {}

impl<F> SeriesGen for F where F: Fn(&Query) -> Vec<RawCandle> + Send + Sync {}

pub struct Settings<F>
where
    F: SeriesGen,
{
    pub known_pairs: Vec<Pair>,
    pub series: F,
    pub limits: Value,
}

impl<F> Settings<F>
where
    F: SeriesGen,
{
    pub fn new(series: F) -> Self {
        Settings {
            known_pairs: vec![Pair::new("btc_twd")],
            series,
            limits: json!({
                "data": {
                    "fees": {
                        "deposit": "0",
                        "withdrawal": "15",
                        "trading": "0.001",
                    },
                    "limitations": {
                        "minDeposit": "100",
                        "maxWithdrawal": "1000000",
                    },
                }
            }),
        }
    }
}

/// The Mock API answers from a candle generator instead of the network,
/// with the same status codes the real service uses for bad requests.
/// This is what the offline conformance suite runs against.
pub struct Mock<F>
where
    F: SeriesGen,
{
    settings: Settings<F>,
}

impl<F> Mock<F>
where
    F: SeriesGen,
{
    pub fn new(settings: Settings<F>) -> Self {
        Mock { settings }
    }

    fn envelope(status: u16, body: Value) -> RawResponse {
        let status_text = StatusCode::from_u16(status)
            .ok()
            .and_then(|code| code.canonical_reason())
            .unwrap_or_default()
            .to_owned();
        RawResponse {
            status,
            status_text,
            body,
        }
    }

    fn knows(&self, pair: Pair) -> bool {
        self.settings.known_pairs.contains(&pair)
    }
}

#[async_trait]
impl<F> MarketData for Mock<F>
where
    F: SeriesGen,
{
    const NAME: &'static str = "Mock";

    async fn ohlc(&self, query: &Query) -> Result<RawResponse, ApiError> {
        if !self.knows(query.pair) {
            return Ok(Self::envelope(404, json!({ "error": "pair not found" })));
        }

        let records = (self.settings.series)(query);
        Ok(Self::envelope(200, json!({ "data": records })))
    }

    async fn ohlc_with_params(
        &self,
        pair: Pair,
        params: &[(String, String)],
    ) -> Result<RawResponse, ApiError> {
        if !self.knows(pair) {
            return Ok(Self::envelope(404, json!({ "error": "pair not found" })));
        }

        let param = |key: &str| {
            params
                .iter()
                .find(|(name, _)| name == key)
                .map(|(_, value)| value.as_str())
        };

        let from = match param("from").and_then(|value| value.parse().ok()) {
            Some(from) => from,
            None => {
                return Ok(Self::envelope(
                    400,
                    json!({ "error": "missing required parameter `from`" }),
                ))
            }
        };
        let to = param("to")
            .and_then(|value| value.parse().ok())
            .unwrap_or(from);
        let resolution = param("resolution")
            .and_then(|value| value.parse().ok())
            .unwrap_or(Resolution::Day1);

        self.ohlc(&Query {
            pair,
            resolution,
            from,
            to,
        })
        .await
    }

    async fn limits(&self) -> Result<RawResponse, ApiError> {
        Ok(Self::envelope(200, self.settings.limits.clone()))
    }
}
