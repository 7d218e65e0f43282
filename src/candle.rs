use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Fields every OHLC record must carry.
pub const REQUIRED_FIELDS: [&str; 6] = ["timestamp", "open", "high", "low", "close", "volume"];

/// The five fields transmitted as decimal strings.
pub const VALUE_FIELDS: [&str; 5] = ["open", "high", "low", "close", "volume"];

/// One OHLC record as it appears on the wire. The timestamp is epoch
/// milliseconds; prices and volume are decimal strings so the exchange
/// never loses precision to binary floats in transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawCandle {
    pub timestamp: i64,
    pub open: String,
    pub high: String,
    pub low: String,
    pub close: String,
    pub volume: String,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CandleError {
    #[error("Field `{0}` does not parse as a decimal.")]
    BadDecimal(&'static str),
    #[error("Timestamp does not form a valid instant.")]
    BadTimestamp,
}

/// A fully parsed candle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candle {
    pub time: DateTime<Utc>,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
    pub volume: Decimal,
}

impl TryFrom<&RawCandle> for Candle {
    type Error = CandleError;

    fn try_from(raw: &RawCandle) -> Result<Self, CandleError> {
        let decimal = |name: &'static str, text: &str| {
            Decimal::from_str(text).map_err(|_| CandleError::BadDecimal(name))
        };
        let time = Utc
            .timestamp_millis_opt(raw.timestamp)
            .single()
            .ok_or(CandleError::BadTimestamp)?;

        Ok(Candle {
            time,
            open: decimal("open", &raw.open)?,
            high: decimal("high", &raw.high)?,
            low: decimal("low", &raw.low)?,
            close: decimal("close", &raw.close)?,
            volume: decimal("volume", &raw.volume)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn raw() -> RawCandle {
        RawCandle {
            timestamp: 1_700_000_000_000,
            open: "3200000.5".into(),
            high: "3250000".into(),
            low: "3150000".into(),
            close: "3210000.25".into(),
            volume: "1.75".into(),
        }
    }

    #[test]
    fn parses_wire_record() {
        let candle = Candle::try_from(&raw()).unwrap();
        assert_eq!(candle.open, dec!(3200000.5));
        assert_eq!(candle.volume, dec!(1.75));
        assert_eq!(candle.time.timestamp_millis(), 1_700_000_000_000);
    }

    #[test]
    fn names_the_bad_field() {
        let mut record = raw();
        record.low = "not-a-number".into();
        assert_eq!(Candle::try_from(&record), Err(CandleError::BadDecimal("low")));
    }
}
