//! Earnings calendar queries over the sample calendar.

use chrono::{NaiveDate, TimeDelta};

use crate::error::DeskError;
use crate::types::EarningsRecord;
use crate::utils::sanitize_symbol;

/// Reports dated within `[today, today + window_days]`, earliest first.
///
/// Compares calendar days, so a report dated today is included. The hosted
/// handler compared against the current instant instead, which dropped
/// midnight-dated reports for today once the day had started.
///
/// A negative window matches nothing; a window past the last representable
/// date is open-ended.
pub fn upcoming(records: &[EarningsRecord], today: NaiveDate, window_days: i64) -> Vec<EarningsRecord> {
    if window_days < 0 {
        return Vec::new();
    }
    let until = TimeDelta::try_days(window_days)
        .and_then(|d| today.checked_add_signed(d))
        .unwrap_or(NaiveDate::MAX);
    let mut out: Vec<EarningsRecord> = records
        .iter()
        .filter(|r| r.date >= today && r.date <= until)
        .cloned()
        .collect();
    out.sort_by_key(|r| r.date);
    out
}

pub fn find(records: &[EarningsRecord], symbol: &str) -> Result<EarningsRecord, DeskError> {
    let sym = sanitize_symbol(symbol);
    records
        .iter()
        .find(|r| r.symbol == sym)
        .cloned()
        .ok_or(DeskError::NoEarnings { symbol: sym })
}
