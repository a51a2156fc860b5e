//! Sample-data source: options chains, price series, earnings calendar and
//! the bootstrap portfolio, read from JSON files in one directory.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use tokio::task::JoinSet;
use tracing::warn;

use crate::error::DeskError;
use crate::types::{EarningsRecord, OptionsChain, PriceBar, Transaction};
use crate::utils::sanitize_symbol;

#[derive(Debug, Clone)]
pub struct FixtureSource {
    dir: PathBuf,
}

impl FixtureSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// `options_<SYM>.json`
    pub async fn options_chain(&self, symbol: &str) -> Result<OptionsChain, DeskError> {
        let sym = sanitize_symbol(symbol);
        let path = self.dir.join(format!("options_{sym}.json"));
        read_keyed(&path, "options", sym).await
    }

    /// `prices_<SYM>.json`, oldest bar first.
    pub async fn price_series(&self, symbol: &str) -> Result<Vec<PriceBar>, DeskError> {
        let sym = sanitize_symbol(symbol);
        let path = self.dir.join(format!("prices_{sym}.json"));
        read_keyed(&path, "price", sym).await
    }

    pub async fn earnings(&self) -> Result<Vec<EarningsRecord>, DeskError> {
        read_json(&self.dir.join("earnings.json")).await
    }

    /// Bootstrap transactions used when the store is empty.
    pub async fn portfolio_seed(&self) -> Result<Vec<Transaction>, DeskError> {
        let mut txns: Vec<Transaction> = read_json(&self.dir.join("portfolio.json")).await?;
        for t in &mut txns {
            t.symbol = sanitize_symbol(&t.symbol);
        }
        Ok(txns)
    }

    /// Last close per symbol, looked up concurrently. Anything that cannot be
    /// priced maps to 0.
    pub async fn latest_prices(&self, symbols: &[String]) -> HashMap<String, f64> {
        let mut tasks = JoinSet::new();
        for sym in symbols {
            let source = self.clone();
            let sym = sanitize_symbol(sym);
            tasks.spawn(async move {
                let last = match source.price_series(&sym).await {
                    Ok(series) => series.last().map(|b| b.close).unwrap_or(0.0),
                    Err(e) => {
                        warn!("No price for {}: {}", sym, e);
                        0.0
                    }
                };
                (sym, last)
            });
        }

        let mut prices = HashMap::new();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((sym, px)) => {
                    prices.insert(sym, px);
                }
                Err(e) => warn!("Price lookup task failed: {}", e),
            }
        }
        prices
    }
}

async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, DeskError> {
    let raw = tokio::fs::read_to_string(path).await?;
    Ok(serde_json::from_str(&raw)?)
}

/// Per-symbol file; absence is reported as missing sample data.
async fn read_keyed<T: DeserializeOwned>(path: &Path, kind: &'static str, symbol: String) -> Result<T, DeskError> {
    if !tokio::fs::try_exists(path).await? {
        return Err(DeskError::NoSampleData { kind, symbol });
    }
    read_json(path).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn fixture_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("portfolio-desk-fx-{}-{}", std::process::id(), name));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join("options_SPY.json"),
            r#"{"underlyingPrice": 500.0, "options": [{"strike": 500, "price": 6.1}, {"strike": 525, "price": 1.4}]}"#,
        )
        .unwrap();
        fs::write(
            dir.join("prices_SPY.json"),
            r#"[{"date": "2025-01-02", "close": 490.5}, {"date": "2025-01-03", "close": 498.25}]"#,
        )
        .unwrap();
        fs::write(dir.join("prices_EMPTY.json"), "[]").unwrap();
        fs::write(
            dir.join("portfolio.json"),
            r#"[{"type": "buy", "symbol": "spy", "quantity": 10, "price": 480, "date": "2025-01-02"},
                {"type": "premium", "symbol": "SPY", "price": 55, "date": "2025-01-03"}]"#,
        )
        .unwrap();
        fs::write(dir.join("earnings.json"), r#"[{"symbol": "AAPL", "date": "2025-05-01"}]"#).unwrap();
        dir
    }

    #[tokio::test]
    async fn reads_options_chain_case_insensitively() {
        let src = FixtureSource::new(fixture_dir("options"));
        let chain = src.options_chain("spy").await.unwrap();
        assert_eq!(chain.underlying_price, 500.0);
        assert_eq!(chain.options.len(), 2);
        assert_eq!(chain.options[1].strike, 525.0);
    }

    #[tokio::test]
    async fn missing_symbol_is_no_sample_data() {
        let src = FixtureSource::new(fixture_dir("missing"));
        let err = src.options_chain("QQQ").await.unwrap_err();
        assert_eq!(err.to_string(), "No sample options data for QQQ");
        let err = src.price_series("QQQ").await.unwrap_err();
        assert!(matches!(err, DeskError::NoSampleData { kind: "price", .. }));
    }

    #[tokio::test]
    async fn latest_prices_defaults_to_zero() {
        let src = FixtureSource::new(fixture_dir("latest"));
        let syms = vec!["SPY".to_string(), "EMPTY".to_string(), "nope".to_string()];
        let prices = src.latest_prices(&syms).await;
        assert_eq!(prices.len(), 3);
        assert_eq!(prices["SPY"], 498.25);
        assert_eq!(prices["EMPTY"], 0.0);
        assert_eq!(prices["NOPE"], 0.0);
    }

    #[tokio::test]
    async fn seed_and_earnings_parse() {
        let src = FixtureSource::new(fixture_dir("seed"));
        let seed = src.portfolio_seed().await.unwrap();
        assert_eq!(seed.len(), 2);
        assert_eq!(seed[0].symbol, "SPY");
        assert_eq!(seed[1].quantity, 0.0);
        assert_eq!(src.earnings().await.unwrap()[0].symbol, "AAPL");
    }
}
