use super::Violation;
use crate::{Candle, RawCandle};

use chrono::{Duration, TimeZone, Utc};
use rust_decimal::Decimal;

fn parse(check: &'static str, index: usize, raw: &RawCandle) -> Result<Candle, Violation> {
    Candle::try_from(raw).map_err(|err| Violation::at(check, index, err.to_string()))
}

/// Prices are strictly positive and volume is non-negative.
pub fn price_bounds(records: &[RawCandle]) -> Result<(), Violation> {
    for (index, raw) in records.iter().enumerate() {
        let candle = parse("price_bounds", index, raw)?;
        let prices = [
            ("open", candle.open),
            ("high", candle.high),
            ("low", candle.low),
            ("close", candle.close),
        ];
        for (name, value) in prices {
            if value <= Decimal::ZERO {
                return Err(Violation::at(
                    "price_bounds",
                    index,
                    format!("`{}` is not positive: {}", name, value),
                ));
            }
        }
        if candle.volume < Decimal::ZERO {
            return Err(Violation::at(
                "price_bounds",
                index,
                format!("`volume` is negative: {}", candle.volume),
            ));
        }
    }
    Ok(())
}

/// High and low bracket both open and close. High need not equal the
/// maximum of the four; the relations only bound it from below.
pub fn ohlc_relations(records: &[RawCandle]) -> Result<(), Violation> {
    for (index, raw) in records.iter().enumerate() {
        let candle = parse("ohlc_relations", index, raw)?;
        if candle.high < candle.low {
            return Err(Violation::at(
                "ohlc_relations",
                index,
                format!("high {} below low {}", candle.high, candle.low),
            ));
        }
        if candle.open < candle.low || candle.open > candle.high {
            return Err(Violation::at(
                "ohlc_relations",
                index,
                format!(
                    "open {} outside [{}, {}]",
                    candle.open, candle.low, candle.high
                ),
            ));
        }
        if candle.close < candle.low || candle.close > candle.high {
            return Err(Violation::at(
                "ohlc_relations",
                index,
                format!(
                    "close {} outside [{}, {}]",
                    candle.close, candle.low, candle.high
                ),
            ));
        }
    }
    Ok(())
}

/// Timestamps are positive epoch milliseconds within the plausibility
/// window around wall-clock now, and survive an exact round-trip through
/// date construction.
pub fn plausible_timestamps(records: &[RawCandle], window: Duration) -> Result<(), Violation> {
    let now = Utc::now();
    for (index, raw) in records.iter().enumerate() {
        if raw.timestamp <= 0 {
            return Err(Violation::at(
                "plausible_timestamps",
                index,
                format!("timestamp is not positive: {}", raw.timestamp),
            ));
        }
        let time = Utc
            .timestamp_millis_opt(raw.timestamp)
            .single()
            .ok_or_else(|| {
                Violation::at(
                    "plausible_timestamps",
                    index,
                    "timestamp does not form a valid instant",
                )
            })?;
        if time.timestamp_millis() != raw.timestamp {
            return Err(Violation::at(
                "plausible_timestamps",
                index,
                "timestamp does not round-trip through date construction",
            ));
        }
        if time < now - window || time > now + window {
            return Err(Violation::at(
                "plausible_timestamps",
                index,
                format!("timestamp {} outside the plausibility window", time),
            ));
        }
    }
    Ok(())
}

/// The series is ordered oldest to newest; equal neighbours are allowed.
pub fn monotonic_timestamps(records: &[RawCandle]) -> Result<(), Violation> {
    for (index, pair) in records.windows(2).enumerate() {
        if pair[1].timestamp < pair[0].timestamp {
            return Err(Violation::at(
                "monotonic_timestamps",
                index + 1,
                format!(
                    "timestamp {} decreases after {}",
                    pair[1].timestamp, pair[0].timestamp
                ),
            ));
        }
    }
    Ok(())
}
