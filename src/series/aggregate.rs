// src/series/aggregate.rs
//! Time series for one account (optionally with its descendants).

use tracing::debug;

use crate::config::ExplorerConfig;
use crate::models::{date_range, Era, Transaction};
use crate::tree::{select_for_account, AccountTree};

use super::calendar::calendar_series;
use super::era::{total_series, EraBins};
use super::point::SeriesPoint;
use super::resolution::{TimeResolution, TimeSpan};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesRequest {
    pub account_id: String,
    pub resolution: TimeResolution,
    pub time_span: TimeSpan,
    /// Include every descendant of `account_id`.
    pub deep: bool,
}

impl SeriesRequest {
    /// Request using the configured default resolution and time span.
    pub fn for_account(account_id: impl Into<String>, config: &ExplorerConfig) -> Self {
        Self {
            account_id: account_id.into(),
            resolution: config.series.resolution,
            time_span: config.series.time_span,
            deep: false,
        }
    }

    pub fn deep(mut self, deep: bool) -> Self {
        self.deep = deep;
        self
    }
}

/// Bucket the account's transactions and normalize each bucket to
/// `request.time_span`.
///
/// Calendar resolutions produce every period between the first and last
/// selected transaction. Era resolution uses `eras`, or a single `total`
/// bucket when there are none.
pub fn aggregate_series(
    transactions: &[Transaction],
    tree: &AccountTree,
    request: &SeriesRequest,
    eras: &[Era],
    config: &ExplorerConfig,
) -> Vec<SeriesPoint> {
    let selected = select_for_account(
        transactions,
        tree,
        &request.account_id,
        request.deep,
        config.tree.node_identity,
        &config.sunburst.leaf_suffix,
    );
    let Some((earliest, latest)) = date_range(&selected) else {
        debug!(account = %request.account_id, "No transactions selected for series");
        return Vec::new();
    };

    let span_months = request.time_span.months();
    let points = match request.resolution {
        TimeResolution::Era => match EraBins::new(eras, earliest, latest) {
            Some(bins) => bins.series(&selected, span_months),
            None => total_series(&selected, earliest, latest, span_months),
        },
        calendar => calendar_series(&selected, calendar, span_months),
    };

    debug!(
        account = %request.account_id,
        resolution = %request.resolution,
        transactions = selected.len(),
        points = points.len(),
        "Aggregated series"
    );
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::build_account_tree;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample() -> Vec<Transaction> {
        vec![
            Transaction::new(date(2023, 1, 10), 120, "Expenses:Auto:Fuel"),
            Transaction::new(date(2023, 7, 10), 60, "Expenses:Auto:Repair"),
            Transaction::new(date(2024, 3, 1), 240, "Expenses:Auto:Fuel"),
            Transaction::new(date(2024, 3, 1), 999, "Income:Salary"),
        ]
    }

    #[test]
    fn deep_yearly_series_sums_descendants() {
        let txs = sample();
        let config = ExplorerConfig::default();
        let tree = build_account_tree(&txs, &config.tree);
        let request = SeriesRequest {
            account_id: "Auto".to_string(),
            resolution: TimeResolution::Year,
            time_span: TimeSpan::Annualized,
            deep: true,
        };
        let points = aggregate_series(&txs, &tree, &request, &[], &config);
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].label, "2023");
        assert_eq!(points[0].raw_total, 180);
        assert_eq!(points[0].value, Decimal::from(180));
        assert_eq!(points[1].raw_total, 240);
    }

    #[test]
    fn shallow_series_of_parent_is_empty() {
        let txs = sample();
        let config = ExplorerConfig::default();
        let tree = build_account_tree(&txs, &config.tree);
        let request = SeriesRequest::for_account("Auto", &config);
        assert!(aggregate_series(&txs, &tree, &request, &[], &config).is_empty());
    }

    #[test]
    fn era_resolution_without_eras_uses_total() {
        let txs = sample();
        let config = ExplorerConfig::default();
        let tree = build_account_tree(&txs, &config.tree);
        let request = SeriesRequest {
            account_id: "Fuel".to_string(),
            resolution: TimeResolution::Era,
            time_span: TimeSpan::Monthly,
            deep: false,
        };
        let points = aggregate_series(&txs, &tree, &request, &[], &config);
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].label, "total");
        assert_eq!(points[0].raw_total, 360);
        assert_eq!(points[0].date_start, date(2023, 1, 10));
        assert_eq!(points[0].date_end, date(2024, 3, 1));
    }

    #[test]
    fn leaf_suffixed_id_selects_account() {
        let txs = sample();
        let config = ExplorerConfig::default();
        let tree = build_account_tree(&txs, &config.tree);
        let request = SeriesRequest::for_account("Fuel [Leaf]", &config);
        let points = aggregate_series(&txs, &tree, &request, &[], &config);
        let total: i64 = points.iter().map(|p| p.raw_total).sum();
        assert_eq!(total, 360);
    }
}
