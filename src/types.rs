//! Core domain types for transactions, lots, position summaries and option candidates.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TxnKind {
    Buy,
    Sell,
    /// Flat cash credit (e.g. option premium); quantity is ignored.
    Premium,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum CostMethod {
    #[default]
    #[serde(rename = "FIFO", alias = "fifo")]
    Fifo,
    #[serde(rename = "LIFO", alias = "lifo")]
    Lifo,
    #[serde(rename = "Average", alias = "average", alias = "AVERAGE")]
    Average,
}

impl std::str::FromStr for CostMethod {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "FIFO" => Ok(CostMethod::Fifo),
            "LIFO" => Ok(CostMethod::Lifo),
            "AVERAGE" | "AVG" => Ok(CostMethod::Average),
            other => anyhow::bail!("Unknown cost method '{}' (expected FIFO, LIFO or Average)", other),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    #[serde(rename = "type")]
    pub kind: TxnKind,
    pub symbol: String,
    #[serde(default)]
    pub quantity: f64,
    /// Per-share price for buy/sell, flat cash amount for premium.
    pub price: f64,
    pub date: NaiveDate,
}

impl Transaction {
    pub fn new(kind: TxnKind, symbol: &str, quantity: f64, price: f64, date: NaiveDate) -> Self {
        Self {
            kind,
            symbol: symbol.to_uppercase(),
            quantity,
            price,
            date,
        }
    }
}

/// Open, unsold shares bought at one price.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lot {
    pub quantity: f64,
    pub price: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct PositionSummary {
    pub quantity: f64,
    pub cost_basis: f64,
    pub last_price: f64,
    pub market_value: f64,
    #[serde(rename = "realisedPL")]
    pub realized_pl: f64,
    #[serde(rename = "unrealisedPL")]
    pub unrealized_pl: f64,
    #[serde(rename = "totalPL")]
    pub total_pl: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct OptionQuote {
    pub strike: f64,
    /// Call premium per share.
    pub price: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OptionsChain {
    pub underlying_price: f64,
    #[serde(default)]
    pub options: Vec<OptionQuote>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct PayoffCurve {
    pub prices: Vec<f64>,
    pub covered_call: Vec<f64>,
    pub stock: Vec<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CoveredCallCandidate {
    pub strike: f64,
    pub premium: f64,
    /// Percent, 2 decimals.
    pub probability_of_profit: f64,
    pub price_range: Vec<f64>,
    pub covered_call_payoff: Vec<f64>,
    pub stock_payoff: Vec<f64>,
}

/// Everything the options view needs for one symbol.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OptionsReport {
    pub symbol: String,
    pub underlying_price: f64,
    /// Always true while chains come from the bundled fixtures.
    pub sample_data: bool,
    pub candidates: Vec<CoveredCallCandidate>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub close: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EarningsRecord {
    pub symbol: String,
    pub date: NaiveDate,
    /// Anything else the calendar carries (estimates, session, company name).
    #[serde(flatten)]
    pub details: serde_json::Map<String, serde_json::Value>,
}
