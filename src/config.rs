//! Load runtime configuration. Every section has defaults so the tool runs
//! without a config file.

use serde::Deserialize;
use std::{fs, path::Path, path::PathBuf};

use crate::simulator::SimulationParams;
use crate::types::CostMethod;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct DataCfg {
    /// Directory holding the sample JSON fixtures.
    pub dir: PathBuf,
}

impl Default for DataCfg {
    fn default() -> Self {
        Self { dir: PathBuf::from("data") }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct StateCfg {
    /// Transaction store; defaults to the platform data directory.
    pub path: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct PortfolioCfg {
    pub cost_method: CostMethod,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct SimulationCfg {
    #[serde(flatten)]
    pub params: SimulationParams,
    /// Fixed seed makes probabilities reproducible.
    pub seed: Option<u64>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct EarningsCfg {
    pub window_days: i64,
}

impl Default for EarningsCfg {
    fn default() -> Self {
        Self { window_days: 7 }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub data: DataCfg,
    pub state: StateCfg,
    pub portfolio: PortfolioCfg,
    pub simulation: SimulationCfg,
    pub earnings: EarningsCfg,
}

impl AppConfig {
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let s = fs::read_to_string(path)?;
        let cfg: Self = serde_yaml::from_str(&s)?;
        Ok(cfg)
    }

    /// Like `load`, but a missing file means defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Configured store path, else `<data dir>/transactions.json`.
    pub fn state_path(&self) -> PathBuf {
        if let Some(p) = &self.state.path {
            return p.clone();
        }
        match directories::ProjectDirs::from("", "", "portfolio-desk") {
            Some(dirs) => dirs.data_dir().join("transactions.json"),
            None => PathBuf::from("transactions.json"),
        }
    }
}
