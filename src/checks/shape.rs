use super::Violation;
use crate::{apis::RawResponse, REQUIRED_FIELDS, VALUE_FIELDS};

use rust_decimal::Decimal;
use std::str::FromStr;

/// The endpoint answered a well-formed query with a plain 200 OK.
pub fn status_ok(response: &RawResponse) -> Result<(), Violation> {
    if response.status != 200 {
        return Err(Violation::series(
            "status_ok",
            format!("expected status 200, got {}", response.status),
        ));
    }
    if response.status_text != "OK" {
        return Err(Violation::series(
            "status_ok",
            format!("expected status text \"OK\", got \"{}\"", response.status_text),
        ));
    }
    Ok(())
}

/// The body is an object carrying a `data` array; a non-empty array leads
/// with a record that has all six documented fields.
pub fn shape(response: &RawResponse) -> Result<(), Violation> {
    let data = response
        .data()
        .ok_or_else(|| Violation::series("shape", "body has no `data` array"))?;

    if let Some(first) = data.first() {
        for field in REQUIRED_FIELDS {
            if first.get(field).is_none() {
                return Err(Violation::at("shape", 0, format!("missing field `{}`", field)));
            }
        }
    }
    Ok(())
}

/// Per record: `timestamp` is a positive JSON integer and the five value
/// fields are strings that parse as decimals.
pub fn field_types(response: &RawResponse) -> Result<(), Violation> {
    let data = response
        .data()
        .ok_or_else(|| Violation::series("field_types", "body has no `data` array"))?;

    for (index, record) in data.iter().enumerate() {
        let timestamp = record
            .get("timestamp")
            .and_then(|value| value.as_i64())
            .ok_or_else(|| {
                Violation::at("field_types", index, "`timestamp` is not an integer")
            })?;
        if timestamp <= 0 {
            return Err(Violation::at(
                "field_types",
                index,
                format!("`timestamp` is not positive: {}", timestamp),
            ));
        }

        for field in VALUE_FIELDS {
            let text = record
                .get(field)
                .and_then(|value| value.as_str())
                .ok_or_else(|| {
                    Violation::at("field_types", index, format!("`{}` is not a string", field))
                })?;
            if Decimal::from_str(text).is_err() {
                return Err(Violation::at(
                    "field_types",
                    index,
                    format!("`{}` does not parse as a decimal: \"{}\"", field, text),
                ));
            }
        }
    }
    Ok(())
}

/// The structure holds even when the window saw no trades: a defined body
/// whose `data` is an array. An empty array passes.
pub fn non_empty_structure(response: &RawResponse) -> Result<(), Violation> {
    if response.body.is_null() {
        return Err(Violation::series("non_empty_structure", "body is null"));
    }
    match response.body.get("data") {
        None => Err(Violation::series(
            "non_empty_structure",
            "body has no `data` field",
        )),
        Some(value) if !value.is_array() => Err(Violation::series(
            "non_empty_structure",
            "`data` is not an array",
        )),
        Some(_) => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ok_response(body: serde_json::Value) -> RawResponse {
        RawResponse {
            status: 200,
            status_text: "OK".to_owned(),
            body,
        }
    }

    fn record() -> serde_json::Value {
        json!({
            "timestamp": 1_700_000_000_000_i64,
            "open": "3200000",
            "high": "3250000",
            "low": "3150000",
            "close": "3210000",
            "volume": "1.5",
        })
    }

    #[test]
    fn accepts_reference_response() {
        let response = ok_response(json!({ "data": [record()] }));
        status_ok(&response).unwrap();
        shape(&response).unwrap();
        field_types(&response).unwrap();
        non_empty_structure(&response).unwrap();
    }

    #[test]
    fn empty_series_is_well_shaped() {
        let response = ok_response(json!({ "data": [] }));
        shape(&response).unwrap();
        field_types(&response).unwrap();
        non_empty_structure(&response).unwrap();
    }

    #[test]
    fn rejects_wrong_status() {
        let mut response = ok_response(json!({ "data": [] }));
        response.status = 503;
        response.status_text = "Service Unavailable".to_owned();
        let violation = status_ok(&response).unwrap_err();
        assert_eq!(violation.check, "status_ok");
        assert!(violation.reason.contains("503"));
    }

    #[test]
    fn rejects_missing_field() {
        let mut first = record();
        first.as_object_mut().unwrap().remove("volume");
        let response = ok_response(json!({ "data": [first] }));
        let violation = shape(&response).unwrap_err();
        assert_eq!(violation.record, Some(0));
        assert!(violation.reason.contains("volume"));
    }

    #[test]
    fn rejects_numeric_price() {
        let mut second = record();
        second["open"] = json!(3_200_000);
        let response = ok_response(json!({ "data": [record(), second] }));
        let violation = field_types(&response).unwrap_err();
        assert_eq!(violation.record, Some(1));
        assert!(violation.reason.contains("open"));
    }

    #[test]
    fn rejects_undecipherable_decimal() {
        let mut bad = record();
        bad["close"] = json!("12,5");
        let response = ok_response(json!({ "data": [bad] }));
        let violation = field_types(&response).unwrap_err();
        assert!(violation.reason.contains("close"));
    }

    #[test]
    fn rejects_non_array_data() {
        let response = ok_response(json!({ "data": "none" }));
        assert!(shape(&response).is_err());
        assert!(non_empty_structure(&response).is_err());
    }
}
