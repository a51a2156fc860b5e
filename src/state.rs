//! Persisted transaction list behind a small repository trait, so the
//! position engine never touches storage directly.

use std::future::Future;
use std::{fs, path::Path, path::PathBuf};

use anyhow::Context;
use tracing::{error, info};

use crate::types::Transaction;

pub trait TransactionStore {
    /// Stored transactions; empty when nothing has been stored yet. A store
    /// that exists but cannot be read is an error, never an empty list.
    fn load(&self) -> anyhow::Result<Vec<Transaction>>;
    fn save(&self, transactions: &[Transaction]) -> anyhow::Result<()>;
}

/// Pretty-printed JSON array on disk.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TransactionStore for JsonFileStore {
    fn load(&self) -> anyhow::Result<Vec<Transaction>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let parsed = fs::read_to_string(&self.path)
            .map_err(anyhow::Error::from)
            .and_then(|s| Ok(serde_json::from_str::<Vec<Transaction>>(&s)?));
        parsed.map_err(|e| {
            error!("Store {} is unreadable, leaving it untouched: {:#}", self.path.display(), e);
            e.context(format!("reading transaction store {}", self.path.display()))
        })
    }

    fn save(&self, transactions: &[Transaction]) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let s = serde_json::to_string_pretty(transactions)?;
        fs::write(&self.path, s)
            .with_context(|| format!("writing transaction store {}", self.path.display()))?;
        Ok(())
    }
}

/// Stored transactions, or `seed` (persisted first) when the store is empty.
/// The seed is only built when needed; an unreadable store is never
/// overwritten.
pub async fn load_or_seed<F, Fut>(store: &dyn TransactionStore, seed: F) -> anyhow::Result<Vec<Transaction>>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Vec<Transaction>>,
{
    let stored = store.load()?;
    if !stored.is_empty() {
        return Ok(stored);
    }
    let seeded = seed().await;
    if !seeded.is_empty() {
        store.save(&seeded)?;
        info!("Seeded store with {} sample transactions", seeded.len());
    }
    Ok(seeded)
}

/// Push `txn` onto the already-loaded `current` list and persist it.
pub fn append(
    store: &dyn TransactionStore,
    mut current: Vec<Transaction>,
    txn: Transaction,
) -> anyhow::Result<Vec<Transaction>> {
    current.push(txn);
    store.save(&current)?;
    Ok(current)
}
