use super::Violation;
use crate::apis::{ApiError, RawResponse};

/// Statuses accepted when querying a pair the exchange does not list.
pub const UNKNOWN_PAIR_STATUSES: [u16; 4] = [400, 404, 422, 500];

/// Statuses accepted when the required `from` parameter is missing.
pub const MISSING_PARAM_STATUSES: [u16; 2] = [400, 422];

/// What a deliberately invalid request produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// The service refused the request with an accepted status.
    Rejected(u16),
    /// The request never reached the service; nothing to assert.
    Unreachable,
    /// The service accepted a request it was expected to refuse.
    Anomaly(u16),
}

/// Judge an invalid-request outcome against the accepted status whitelist.
/// A 2xx answer is flagged as an anomaly rather than silently passed; a
/// transport failure is background noise, not a violation.
pub fn expect_rejection(
    outcome: &Result<RawResponse, ApiError>,
    accepted: &[u16],
) -> Result<Rejection, Violation> {
    match outcome {
        Err(_) => Ok(Rejection::Unreachable),
        Ok(response) if accepted.contains(&response.status) => {
            Ok(Rejection::Rejected(response.status))
        }
        Ok(response) if response.status / 100 == 2 => Ok(Rejection::Anomaly(response.status)),
        Ok(response) => Err(Violation::series(
            "expect_rejection",
            format!(
                "status {} is outside the accepted set {:?}",
                response.status, accepted
            ),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(status: u16) -> Result<RawResponse, ApiError> {
        Ok(RawResponse {
            status,
            status_text: String::new(),
            body: json!({ "error": "invalid" }),
        })
    }

    #[test]
    fn accepted_status_is_a_rejection() {
        assert_eq!(
            expect_rejection(&response(404), &UNKNOWN_PAIR_STATUSES).unwrap(),
            Rejection::Rejected(404)
        );
        assert_eq!(
            expect_rejection(&response(422), &MISSING_PARAM_STATUSES).unwrap(),
            Rejection::Rejected(422)
        );
    }

    #[test]
    fn success_is_an_anomaly() {
        assert_eq!(
            expect_rejection(&response(200), &UNKNOWN_PAIR_STATUSES).unwrap(),
            Rejection::Anomaly(200)
        );
    }

    #[test]
    fn unexpected_error_status_violates() {
        let violation = expect_rejection(&response(418), &UNKNOWN_PAIR_STATUSES).unwrap_err();
        assert!(violation.reason.contains("418"));
    }

    #[test]
    fn transport_failure_is_tolerated() {
        let outcome: Result<RawResponse, ApiError> = Err(ApiError::Network);
        assert_eq!(
            expect_rejection(&outcome, &UNKNOWN_PAIR_STATUSES).unwrap(),
            Rejection::Unreachable
        );
    }
}
