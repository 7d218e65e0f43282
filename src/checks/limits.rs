use super::Violation;
use crate::apis::RawResponse;

use serde_json::Value;

/// Look up a dotted path like `data.fees.deposit` in a JSON body.
pub fn value_at<'a>(body: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(body, |value, key| value.get(key))
}

/// The limitations-and-fees document answers 200 and carries every
/// expected dotted-path key.
pub fn limits_structure(response: &RawResponse, expected: &[&str]) -> Result<(), Violation> {
    if response.status != 200 {
        return Err(Violation::series(
            "limits_structure",
            format!("expected status 200, got {}", response.status),
        ));
    }
    for path in expected {
        if value_at(&response.body, path).is_none() {
            return Err(Violation::series(
                "limits_structure",
                format!("missing key `{}`", path),
            ));
        }
    }
    Ok(())
}
