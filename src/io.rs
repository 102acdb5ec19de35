// src/io.rs
//! Loading transaction and era tables from disk.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::ExplorerConfig;
use crate::models::{date_range, normalize_era_table, Era, Transaction};
use crate::tree::{apply_sign_conventions, build_account_tree, filter_accounts, AccountTree};

fn read_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    if path.extension().is_some_and(|ext| ext == "jsonl") {
        let mut items = Vec::new();
        for (lineno, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let item = serde_json::from_str(line).with_context(|| {
                format!("Failed to parse JSONL line {} of {}", lineno + 1, path.display())
            })?;
            items.push(item);
        }
        return Ok(items);
    }

    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse JSON from {}", path.display()))
}

/// Read transactions from a JSON array or a `.jsonl` file.
pub fn read_transactions(path: &Path) -> Result<Vec<Transaction>> {
    let transactions: Vec<Transaction> = read_records(path)?;
    debug!(path = %path.display(), count = transactions.len(), "Loaded transactions");
    Ok(transactions)
}

/// Read an era table; a missing or unreadable file yields no eras.
pub fn read_eras_or_empty(path: &Path) -> Vec<Era> {
    match read_records(path) {
        Ok(eras) => eras,
        Err(e) => {
            warn!(error = %e, path = %path.display(), "Ignoring era table");
            Vec::new()
        }
    }
}

/// Transactions with sign conventions applied, their account tree, and the
/// normalized era table.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub transactions: Vec<Transaction>,
    pub eras: Vec<Era>,
    pub tree: AccountTree,
}

impl Dataset {
    pub fn new(transactions: Vec<Transaction>, eras: Vec<Era>, config: &ExplorerConfig) -> Self {
        let transactions =
            apply_sign_conventions(&transactions, &config.root_accounts, &config.tree);
        let latest = date_range(&transactions).map(|(_, latest)| latest);
        let eras = normalize_era_table(eras, latest);
        let tree = build_account_tree(&transactions, &config.tree);
        Self {
            transactions,
            eras,
            tree,
        }
    }

    pub fn load(
        transactions_path: &Path,
        eras_path: Option<&Path>,
        config: &ExplorerConfig,
    ) -> Result<Self> {
        let transactions = read_transactions(transactions_path)?;
        let eras = eras_path.map(read_eras_or_empty).unwrap_or_default();
        Ok(Self::new(transactions, eras, config))
    }

    /// Transactions posted to any of `accounts` or below them. An empty list
    /// keeps everything.
    pub fn restrict_to_accounts(
        &self,
        accounts: &[String],
        config: &ExplorerConfig,
    ) -> Vec<Transaction> {
        let kept = filter_accounts(
            &self.transactions,
            &self.tree,
            accounts,
            config.tree.node_identity,
        );
        debug!(
            accounts = ?accounts,
            kept = kept.len(),
            total = self.transactions.len(),
            "Restricted dataset to accounts"
        );
        kept
    }
}
