use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

/// Time-bucket width of a candle, in the exchange's wire spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Resolution {
    #[serde(rename = "1m")]
    Minute1,
    #[serde(rename = "5m")]
    Minute5,
    #[serde(rename = "15m")]
    Minute15,
    #[serde(rename = "30m")]
    Minute30,
    #[serde(rename = "1h")]
    Hour1,
    #[serde(rename = "4h")]
    Hour4,
    #[serde(rename = "1d")]
    Day1,
}

#[derive(Error, Debug)]
#[error("Unsupported resolution.")]
pub struct UnknownResolution;

impl Resolution {
    /// All resolutions the endpoint documents, shortest first.
    pub const ALL: [Resolution; 7] = [
        Resolution::Minute1,
        Resolution::Minute5,
        Resolution::Minute15,
        Resolution::Minute30,
        Resolution::Hour1,
        Resolution::Hour4,
        Resolution::Day1,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Resolution::Minute1 => "1m",
            Resolution::Minute5 => "5m",
            Resolution::Minute15 => "15m",
            Resolution::Minute30 => "30m",
            Resolution::Hour1 => "1h",
            Resolution::Hour4 => "4h",
            Resolution::Day1 => "1d",
        }
    }

    /// Width of one bucket.
    pub fn duration(&self) -> Duration {
        match self {
            Resolution::Minute1 => Duration::minutes(1),
            Resolution::Minute5 => Duration::minutes(5),
            Resolution::Minute15 => Duration::minutes(15),
            Resolution::Minute30 => Duration::minutes(30),
            Resolution::Hour1 => Duration::hours(1),
            Resolution::Hour4 => Duration::hours(4),
            Resolution::Day1 => Duration::days(1),
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Resolution {
    type Err = UnknownResolution;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Resolution::ALL
            .iter()
            .find(|resolution| resolution.as_str() == s)
            .copied()
            .ok_or(UnknownResolution)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_spelling_round_trip() {
        for resolution in Resolution::ALL {
            assert_eq!(resolution.as_str().parse::<Resolution>().unwrap(), resolution);
        }
        assert!("2h".parse::<Resolution>().is_err());
    }

    #[test]
    fn bucket_widths() {
        assert_eq!(Resolution::Minute1.duration(), Duration::seconds(60));
        assert_eq!(Resolution::Day1.duration(), Duration::seconds(86_400));
    }
}
