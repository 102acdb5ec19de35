use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{date_range, Era, Transaction};
use crate::tree::AccountTree;

/// Overview of a loaded dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatasetSummary {
    pub record_count: usize,
    pub earliest: Option<NaiveDate>,
    pub latest: Option<NaiveDate>,
    pub era_count: usize,
    /// Node tags in pre-order.
    pub accounts: Vec<String>,
}

impl DatasetSummary {
    pub fn new(transactions: &[Transaction], eras: &[Era], tree: &AccountTree) -> Self {
        let range = date_range(transactions);
        Self {
            record_count: transactions.len(),
            earliest: range.map(|(earliest, _)| earliest),
            latest: range.map(|(_, latest)| latest),
            era_count: eras.len(),
            accounts: tree
                .preorder()
                .into_iter()
                .filter_map(|idx| tree.get(idx))
                .map(|node| node.tag.clone())
                .collect(),
        }
    }
}
