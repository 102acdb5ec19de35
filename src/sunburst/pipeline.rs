// src/sunburst/pipeline.rs
//! From raw transactions to a sunburst-ready tree.

use std::borrow::Cow;
use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use crate::clock::Clock;
use crate::config::ExplorerConfig;
use crate::duration::{months_between, normalize_amount, round_to_amount};
use crate::models::{date_range, Amount, Transaction};
use crate::series::TimeSpan;
use crate::tree::{trim_excess_root, AccountTree, NodeKind, PathTreeBuilder, TreeError};

use super::aggregate::set_node_totals;
use super::fanout::summarize_to_other;
use super::sign::positize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SunburstRequest {
    /// Defaults to the earliest transaction.
    pub date_start: Option<NaiveDate>,
    /// Defaults to today.
    pub date_end: Option<NaiveDate>,
    pub time_span: TimeSpan,
}

/// One slice, in the id/parent/value shape sunburst charts consume.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SunburstSlice {
    pub id: String,
    pub parent: Option<String>,
    pub name: String,
    pub value: Amount,
    pub kind: NodeKind,
}

/// Aggregated tree plus the window it was computed over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SunburstTree {
    pub tree: AccountTree,
    pub date_start: NaiveDate,
    pub date_end: NaiveDate,
    pub time_span: TimeSpan,
}

impl SunburstTree {
    /// Root total, zero for an empty tree.
    pub fn total(&self) -> Amount {
        self.tree
            .root_node()
            .and_then(|n| n.total_amount)
            .unwrap_or(0)
    }

    /// Every node in pre-order.
    pub fn slices(&self) -> Vec<SunburstSlice> {
        self.tree
            .preorder()
            .into_iter()
            .filter_map(|idx| {
                let node = self.tree.get(idx)?;
                Some(SunburstSlice {
                    id: node.id.clone(),
                    parent: self.tree.parent_id(idx).map(str::to_string),
                    name: node.tag.clone(),
                    value: node.total_amount.unwrap_or(0),
                    kind: node.kind,
                })
            })
            .collect()
    }
}

/// Build the sunburst for transactions dated within the request window.
///
/// Each account's amount is normalized to `time_span` over the whole window
/// and rounded to whole units.
pub fn aggregate_sunburst(
    transactions: &[Transaction],
    request: &SunburstRequest,
    config: &ExplorerConfig,
    clock: &dyn Clock,
) -> Result<SunburstTree, TreeError> {
    let today = clock.today();
    let date_start = request
        .date_start
        .or_else(|| date_range(transactions).map(|(earliest, _)| earliest))
        .unwrap_or(today);
    let date_end = request.date_end.unwrap_or(today);
    let months = months_between(date_start, date_end);
    let span_months = request.time_span.months();

    let selected = positize(
        transactions
            .iter()
            .filter(|tx| tx.date >= date_start && tx.date <= date_end)
            .cloned()
            .collect(),
    );

    let identity = config.tree.node_identity;
    let mut sums: HashMap<Cow<str>, Amount> = HashMap::new();
    let mut builder = PathTreeBuilder::new(&config.tree);
    for tx in &selected {
        builder.insert_path(&tx.full_account_path);
        let sum = sums.entry(identity.key_for(tx)).or_default();
        *sum = sum.saturating_add(tx.amount);
    }
    let mut tree = builder.build();

    for idx in tree.preorder() {
        let Some(sum) = tree.get(idx).and_then(|n| sums.get(n.id.as_str())).copied() else {
            continue;
        };
        let normalized = round_to_amount(normalize_amount(sum, span_months, months)).unwrap_or(0);
        let leaf_amount = if normalized < 0 {
            debug!(
                node = tree.get(idx).map(|n| n.id.as_str()).unwrap_or_default(),
                amount = normalized,
                "Clamping negative leaf amount to zero"
            );
            0
        } else {
            normalized
        };
        if let Some(node) = tree.get_mut(idx) {
            node.leaf_amount = Some(leaf_amount);
        }
    }

    let mut tree = trim_excess_root(tree);
    let total = set_node_totals(&mut tree, &config.sunburst)?;
    if config.sunburst.collapse_other {
        summarize_to_other(&mut tree, &config.sunburst)?;
    }

    debug!(
        transactions = selected.len(),
        nodes = tree.len(),
        total,
        start = %date_start,
        end = %date_end,
        "Aggregated sunburst"
    );
    Ok(SunburstTree {
        tree,
        date_start,
        date_end,
        time_span: request.time_span,
    })
}
