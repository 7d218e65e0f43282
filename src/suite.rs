use crate::{
    apis::{ApiError, MarketData, RawResponse},
    checks::{self, Rejection, Violation},
    report::{Outcome, Report},
    Pair, Query, RawCandle, Resolution,
};

use chrono::Duration;
use futures_util::future::join_all;

/// Reference configuration and scenario set for one conformance run.
pub struct Conformance {
    pub pair: Pair,
    /// Tolerance around wall-clock now for candle timestamps. A sanity
    /// bound, not an exchange guarantee.
    pub plausibility: Duration,
    /// Width of the window used for the ordering scenario, in days.
    pub ordering_window_days: i64,
    /// Dotted paths expected in the limitations-and-fees document.
    pub limit_keys: Vec<&'static str>,
}

impl Default for Conformance {
    fn default() -> Self {
        Conformance {
            pair: Pair::new("btc_twd"),
            plausibility: Duration::days(365),
            ordering_window_days: 30,
            limit_keys: vec!["data"],
        }
    }
}

impl Conformance {
    /// Run every scenario against the given API. Scenarios issue their own
    /// requests and never share state; one failing never stops the rest.
    pub async fn run<A: MarketData>(&self, api: &A) -> Report {
        log::info!("Running conformance suite for {} against {}", self.pair, A::NAME);
        let mut report = Report::default();

        let response = api.ohlc(&Query::new(self.pair)).await;
        report.record("status_ok", envelope_outcome("status_ok", &response, checks::status_ok));

        let response = api.ohlc(&Query::new(self.pair)).await;
        report.record("shape", envelope_outcome("shape", &response, checks::shape));

        let response = api.ohlc(&Query::new(self.pair)).await;
        report.record(
            "field_types",
            envelope_outcome("field_types", &response, checks::field_types),
        );

        let response = api.ohlc(&Query::new(self.pair)).await;
        report.record(
            "domain_invariants",
            records_outcome("domain_invariants", &response, |records| {
                checks::price_bounds(records)?;
                checks::ohlc_relations(records)
            }),
        );

        let window = self.plausibility;
        let response = api.ohlc(&Query::new(self.pair)).await;
        report.record(
            "timestamp_plausibility",
            records_outcome("timestamp_plausibility", &response, |records| {
                checks::plausible_timestamps(records, window)
            }),
        );

        let response = api
            .ohlc(&Query::new(self.pair).days_back(self.ordering_window_days))
            .await;
        report.record(
            "ordering",
            records_outcome("ordering", &response, checks::monotonic_timestamps),
        );

        let outcome = api.ohlc(&Query::new(Pair::new("invalid_pair_xyz"))).await;
        report.record(
            "unknown_pair",
            rejection_outcome("unknown_pair", &outcome, &checks::UNKNOWN_PAIR_STATUSES),
        );

        let query = Query::new(self.pair);
        let outcome = api
            .ohlc_with_params(self.pair, &query.params_without_from())
            .await;
        report.record(
            "missing_from",
            rejection_outcome("missing_from", &outcome, &checks::MISSING_PARAM_STATUSES),
        );

        // The matrix scenarios are independent read-only GETs, so they can
        // go out concurrently.
        let queries: Vec<Query> = Resolution::ALL
            .iter()
            .map(|resolution| Query::new(self.pair).resolution(*resolution).days_back(1))
            .collect();
        let responses = join_all(queries.iter().map(|query| api.ohlc(query))).await;
        for (resolution, response) in Resolution::ALL.iter().zip(&responses) {
            let outcome = envelope_outcome("resolution_matrix", response, |response| {
                if response.status != 200 {
                    return Err(Violation::series(
                        "resolution_matrix",
                        format!("expected status 200, got {}", response.status),
                    ));
                }
                checks::non_empty_structure(response)
            });
            report.record(format!("resolution_{}", resolution), outcome);
        }

        let response = api.ohlc(&Query::new(self.pair)).await;
        report.record(
            "non_empty_structure",
            envelope_outcome("non_empty_structure", &response, checks::non_empty_structure),
        );

        let response = api.limits().await;
        report.record(
            "limits",
            envelope_outcome("limits", &response, |response| {
                checks::limits_structure(response, &self.limit_keys)
            }),
        );

        log::info!(
            "Suite finished: {} passed, {} failed, {} anomalies",
            report.passed(),
            report.failed(),
            report.anomalies()
        );
        report
    }
}

fn envelope_outcome<F>(
    scenario: &'static str,
    response: &Result<RawResponse, ApiError>,
    check: F,
) -> Outcome
where
    F: FnOnce(&RawResponse) -> Result<(), Violation>,
{
    match response {
        Err(err) => Outcome::Fail(Violation::series(
            scenario,
            format!("transport failure: {}", err),
        )),
        Ok(response) => match check(response) {
            Ok(()) => Outcome::Pass,
            Err(violation) => Outcome::Fail(violation),
        },
    }
}

fn records_outcome<F>(
    scenario: &'static str,
    response: &Result<RawResponse, ApiError>,
    check: F,
) -> Outcome
where
    F: FnOnce(&[RawCandle]) -> Result<(), Violation>,
{
    match response {
        Err(err) => Outcome::Fail(Violation::series(
            scenario,
            format!("transport failure: {}", err),
        )),
        Ok(response) => match response.records() {
            Err(err) => Outcome::Fail(Violation::series(
                scenario,
                format!("records do not match the documented shape: {}", err),
            )),
            Ok(records) => match check(&records) {
                Ok(()) => Outcome::Pass,
                Err(violation) => Outcome::Fail(violation),
            },
        },
    }
}

fn rejection_outcome(
    scenario: &'static str,
    outcome: &Result<RawResponse, ApiError>,
    accepted: &[u16],
) -> Outcome {
    match checks::expect_rejection(outcome, accepted) {
        Ok(Rejection::Rejected(status)) => {
            log::debug!("{}: rejected with status {}", scenario, status);
            Outcome::Pass
        }
        Ok(Rejection::Unreachable) => {
            log::debug!("{}: transport failure, nothing to assert", scenario);
            Outcome::Pass
        }
        Ok(Rejection::Anomaly(status)) => {
            Outcome::Anomaly(format!("request was accepted with status {}", status))
        }
        Err(violation) => Outcome::Fail(violation),
    }
}
