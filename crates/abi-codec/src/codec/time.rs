// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Time types and their `YYYY-MM-DDTHH:MM:SS.sss` text form.
//!
//! All three are UTC. Input may carry any number of fractional digits and
//! an optional trailing `Z`; output always has exactly three.

use crate::error::{AbiError, Result};
use chrono::{DateTime, NaiveDateTime, Utc};

/// Block timestamps count half-second slots from 2000-01-01T00:00:00.
pub const BLOCK_TIMESTAMP_EPOCH_MS: i64 = 946_684_800_000;
pub const BLOCK_INTERVAL_MS: i64 = 500;

const INPUT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";
const OUTPUT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f";

fn parse(s: &str) -> Result<DateTime<Utc>> {
    let trimmed = s.strip_suffix('Z').unwrap_or(s);
    NaiveDateTime::parse_from_str(trimmed, INPUT_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|_| AbiError::InvalidLiteral(format!("invalid time format: {}", s)))
}

fn format_micros(micros: i64) -> Result<String> {
    let secs = micros.div_euclid(1_000_000);
    let nanos = (micros.rem_euclid(1_000_000) * 1_000) as u32;
    DateTime::from_timestamp(secs, nanos)
        .map(|dt| dt.format(OUTPUT_FORMAT).to_string())
        .ok_or_else(|| AbiError::OutOfRange(format!("time point {} us", micros)))
}

/// Microseconds since the Unix epoch; sub-microsecond digits are dropped.
pub fn parse_time_point(s: &str) -> Result<i64> {
    let dt = parse(s)?;
    dt.timestamp()
        .checked_mul(1_000_000)
        .and_then(|us| us.checked_add(i64::from(dt.timestamp_subsec_micros())))
        .ok_or_else(|| AbiError::OutOfRange(format!("time point {}", s)))
}

/// Values past the calendar range (about +/-262000 years) are `OutOfRange`
/// rather than clamped.
pub fn format_time_point(micros: i64) -> Result<String> {
    format_micros(micros)
}

/// Whole seconds since the Unix epoch; any fraction is dropped.
pub fn parse_time_point_sec(s: &str) -> Result<u32> {
    let secs = parse(s)?.timestamp();
    u32::try_from(secs).map_err(|_| AbiError::OutOfRange(format!("time_point_sec {}", s)))
}

pub fn format_time_point_sec(secs: u32) -> Result<String> {
    format_micros(i64::from(secs) * 1_000_000)
}

/// Slot index; times between slots round down.
pub fn parse_block_timestamp(s: &str) -> Result<u32> {
    let ms = parse(s)?.timestamp_millis();
    let slot = (ms - BLOCK_TIMESTAMP_EPOCH_MS).div_euclid(BLOCK_INTERVAL_MS);
    u32::try_from(slot).map_err(|_| AbiError::OutOfRange(format!("block timestamp {}", s)))
}

pub fn format_block_timestamp(slot: u32) -> Result<String> {
    let ms = i64::from(slot) * BLOCK_INTERVAL_MS + BLOCK_TIMESTAMP_EPOCH_MS;
    format_micros(ms * 1_000)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_point_sec() {
        assert_eq!(parse_time_point_sec("1970-01-01T00:00:00.000").unwrap(), 0);
        let secs = parse_time_point_sec("2018-06-15T19:17:47.000").unwrap();
        assert_eq!(secs, 1_529_090_267);
        assert_eq!(
            format_time_point_sec(secs).unwrap(),
            "2018-06-15T19:17:47.000"
        );
        // Fraction is dropped, `Z` accepted.
        assert_eq!(parse_time_point_sec("2018-06-15T19:17:47.999Z").unwrap(), secs);
        assert_eq!(parse_time_point_sec("2018-06-15T19:17:47").unwrap(), secs);
    }

    #[test]
    fn test_time_point_millis() {
        for s in [
            "1970-01-01T00:00:00.000",
            "1970-01-01T00:00:00.001",
            "1970-01-01T00:00:00.010",
            "1970-01-01T00:00:00.100",
            "2018-06-15T19:17:47.999",
            "2060-06-15T19:17:47.999",
        ] {
            let us = parse_time_point(s).unwrap();
            assert_eq!(format_time_point(us).unwrap(), s);
        }
        assert_eq!(parse_time_point("1970-01-01T00:00:00.000001").unwrap(), 1);
    }

    #[test]
    fn test_block_timestamp() {
        assert_eq!(parse_block_timestamp("2000-01-01T00:00:00.000").unwrap(), 0);
        assert_eq!(parse_block_timestamp("2000-01-01T00:00:00.500").unwrap(), 1);
        assert_eq!(parse_block_timestamp("2000-01-01T00:00:01.000").unwrap(), 2);
        assert_eq!(
            format_block_timestamp(1).unwrap(),
            "2000-01-01T00:00:00.500"
        );
        let slot = parse_block_timestamp("2018-06-15T19:17:47.500").unwrap();
        assert_eq!(
            format_block_timestamp(slot).unwrap(),
            "2018-06-15T19:17:47.500"
        );
        assert!(parse_block_timestamp("1999-12-31T23:59:59.500").is_err());
    }

    #[test]
    fn test_time_point_calendar_range() {
        let max = format_time_point(i64::MAX).unwrap_err();
        assert_eq!(max.kind(), crate::error::ErrorKind::OutOfRange);
        assert!(format_time_point(i64::MIN).is_err());
        // Every time_point_sec and block timestamp fits.
        assert!(format_time_point_sec(u32::MAX).is_ok());
        assert!(format_block_timestamp(u32::MAX).is_ok());
    }

    #[test]
    fn test_invalid_format() {
        assert!(parse_time_point("yesterday").is_err());
        assert!(parse_time_point("2018-06-15 19:17:47").is_err());
        assert!(parse_time_point_sec("1969-12-31T23:59:59").is_err());
    }
}
