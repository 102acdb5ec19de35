use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::AccountPath;

/// Amounts are whole currency units. Sources with fractional amounts are
/// rounded before they reach the engine.
pub type Amount = i64;

/// A single ledger posting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub date: NaiveDate,
    /// Signed amount - the sign convention is the exporter's until
    /// `apply_sign_conventions` has run.
    pub amount: Amount,
    #[serde(default)]
    pub description: String,
    /// Leaf segment of `full_account_path`.
    pub account: String,
    #[serde(alias = "full account name")]
    pub full_account_path: String,
}

impl Transaction {
    /// Create a transaction; `account` is derived from the last path segment.
    pub fn new(date: NaiveDate, amount: Amount, full_account_path: impl Into<String>) -> Self {
        let full_account_path = full_account_path.into();
        let account = AccountPath::parse(&full_account_path)
            .leaf()
            .unwrap_or_default()
            .to_string();
        Self {
            date,
            amount,
            description: String::new(),
            account,
            full_account_path,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_amount(mut self, amount: Amount) -> Self {
        self.amount = amount;
        self
    }

    pub fn path(&self) -> AccountPath {
        AccountPath::parse(&self.full_account_path)
    }
}

/// Sum of all amounts, saturating instead of overflowing.
pub fn sum_amounts<'a>(transactions: impl IntoIterator<Item = &'a Transaction>) -> Amount {
    transactions
        .into_iter()
        .fold(0, |acc: Amount, tx| acc.saturating_add(tx.amount))
}

/// Earliest and latest transaction dates, or `None` for an empty set.
pub fn date_range<'a>(
    transactions: impl IntoIterator<Item = &'a Transaction>,
) -> Option<(NaiveDate, NaiveDate)> {
    transactions.into_iter().fold(None, |range, tx| match range {
        None => Some((tx.date, tx.date)),
        Some((lo, hi)) => Some((lo.min(tx.date), hi.max(tx.date))),
    })
}
