// src/series/era.rs
//! Era-based bucketing.

use chrono::NaiveDate;

use crate::models::{sum_amounts, Era, Transaction};

use super::point::SeriesPoint;

/// Label of the synthetic bucket covering data older than the first era.
pub const BEFORE_LABEL: &str = "before";

/// Label of the single bucket used when no eras are defined.
pub const TOTAL_LABEL: &str = "total";

/// Contiguous bucket boundaries derived from an era table.
///
/// Bucket `i` covers `[boundaries[i], boundaries[i + 1])`; the last one also
/// includes its end date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EraBins {
    boundaries: Vec<NaiveDate>,
    labels: Vec<String>,
}

impl EraBins {
    /// Fit `eras` to data spanning `earliest..=latest`. `None` without eras.
    ///
    /// A `before` bucket is prepended when the first era starts after
    /// `earliest`. When the last era starts before `latest`, `latest` closes
    /// it; otherwise the last era contributes only its start, as the closed
    /// end of the previous bucket. A last era starting on `latest` would be
    /// a zero-width bucket, so its data stays in the bucket before it.
    pub fn new(eras: &[Era], earliest: NaiveDate, latest: NaiveDate) -> Option<Self> {
        let mut sorted: Vec<&Era> = eras.iter().collect();
        sorted.sort_by_key(|era| era.date_start);
        let first = sorted.first()?;

        let mut boundaries = Vec::with_capacity(sorted.len() + 2);
        let mut labels = Vec::with_capacity(sorted.len() + 1);
        if first.date_start > earliest {
            boundaries.push(earliest);
            labels.push(BEFORE_LABEL.to_string());
        }
        for era in &sorted {
            boundaries.push(era.date_start);
            labels.push(era.name.clone());
        }

        let last_start = sorted.last().map(|era| era.date_start)?;
        if last_start < latest {
            boundaries.push(latest);
        } else {
            labels.pop();
        }

        if labels.is_empty() {
            return None;
        }
        Some(Self { boundaries, labels })
    }

    pub fn boundaries(&self) -> &[NaiveDate] {
        &self.boundaries
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Index of the bucket containing `date`.
    pub fn bucket_for(&self, date: NaiveDate) -> Option<usize> {
        let first = *self.boundaries.first()?;
        let last = *self.boundaries.last()?;
        if date < first || date > last {
            return None;
        }
        let last_bucket = self.labels.len() - 1;
        if date == last {
            return Some(last_bucket);
        }
        let upper = self.boundaries.partition_point(|b| *b <= date);
        Some(upper.saturating_sub(1).min(last_bucket))
    }

    /// One point per era, empty eras included.
    pub(crate) fn series(&self, transactions: &[Transaction], span_months: u32) -> Vec<SeriesPoint> {
        let mut totals = vec![(0i64, 0usize); self.labels.len()];
        for tx in transactions {
            if let Some(i) = self.bucket_for(tx.date) {
                totals[i].0 = totals[i].0.saturating_add(tx.amount);
                totals[i].1 += 1;
            }
        }

        self.labels
            .iter()
            .zip(self.boundaries.windows(2))
            .zip(totals)
            .map(|((label, bounds), (raw, count))| {
                SeriesPoint::spanning(label.clone(), bounds[0], bounds[1], raw, count, span_months)
            })
            .collect()
    }
}

/// A single bucket spanning the whole selection.
pub(crate) fn total_series(
    transactions: &[Transaction],
    earliest: NaiveDate,
    latest: NaiveDate,
    span_months: u32,
) -> Vec<SeriesPoint> {
    vec![SeriesPoint::spanning(
        TOTAL_LABEL.to_string(),
        earliest,
        latest,
        sum_amounts(transactions),
        transactions.len(),
        span_months,
    )]
}
