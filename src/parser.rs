//! Parse free-text transaction entries.
//! Supported: `BUY|SELL <qty> <SYM> @ <price> [on] <YYYY-MM-DD>` and
//! `PREMIUM <SYM> [@] <amount> [on] <YYYY-MM-DD>`.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::types::{Transaction, TxnKind};

static RE_TRADE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(BUY|SELL)\s+(\d+(?:\.\d+)?)\s+([A-Z][A-Z.]{0,5})\s+@\s*(\d+(?:\.\d+)?)\s+(?:on\s+)?(\d{4}-\d{2}-\d{2})$")
        .expect("trade pattern")
});

static RE_PREMIUM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:PREMIUM|PREM)\s+([A-Z][A-Z.]{0,5})\s+(?:@\s*)?(\d+(?:\.\d+)?)\s+(?:on\s+)?(\d{4}-\d{2}-\d{2})$")
        .expect("premium pattern")
});

pub fn parse_transaction(text: &str) -> Option<Transaction> {
    let t = text.trim();

    if let Some(c) = RE_TRADE.captures(t) {
        let kind = match &c[1].to_uppercase()[..] {
            "BUY" => TxnKind::Buy,
            "SELL" => TxnKind::Sell,
            _ => return None,
        };
        let qty: f64 = c[2].parse().ok()?;
        if qty <= 0.0 {
            return None;
        }
        let price: f64 = c[4].parse().ok()?;
        let date = NaiveDate::parse_from_str(&c[5], "%Y-%m-%d").ok()?;
        return Some(Transaction::new(kind, &c[3], qty, price, date));
    }

    if let Some(c) = RE_PREMIUM.captures(t) {
        let amount: f64 = c[2].parse().ok()?;
        let date = NaiveDate::parse_from_str(&c[3], "%Y-%m-%d").ok()?;
        return Some(Transaction::new(TxnKind::Premium, &c[1], 0.0, amount, date));
    }

    None
}
