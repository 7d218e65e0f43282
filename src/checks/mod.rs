mod domain;
mod limits;
mod negative;
mod shape;

pub use domain::*;
pub use limits::*;
pub use negative::*;
pub use shape::*;

use std::fmt;

/// One failed expectation: which check, which record where applicable,
/// and why. Checks are independent; a violation in one never stops another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub check: &'static str,
    pub record: Option<usize>,
    pub reason: String,
}

impl Violation {
    pub(crate) fn series<R: Into<String>>(check: &'static str, reason: R) -> Self {
        Violation {
            check,
            record: None,
            reason: reason.into(),
        }
    }

    pub(crate) fn at<R: Into<String>>(check: &'static str, record: usize, reason: R) -> Self {
        Violation {
            check,
            record: Some(record),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.record {
            Some(index) => write!(f, "{}: record {}: {}", self.check, index, self.reason),
            None => write!(f, "{}: {}", self.check, self.reason),
        }
    }
}

impl std::error::Error for Violation {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_record() {
        let violation = Violation::at("ohlc_relations", 3, "open outside [low, high]");
        assert_eq!(
            violation.to_string(),
            "ohlc_relations: record 3: open outside [low, high]"
        );

        let series = Violation::series("shape", "body has no `data` array");
        assert_eq!(series.to_string(), "shape: body has no `data` array");
    }
}
