use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::duration::{months_between, normalize_amount};
use crate::models::Amount;

/// One bar of a time series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeriesPoint {
    pub label: String,
    pub date_start: NaiveDate,
    pub date_end: NaiveDate,
    /// Bucket width in months.
    pub months: Decimal,
    /// Summed amount before normalization.
    pub raw_total: Amount,
    pub transaction_count: usize,
    /// Normalized rate (or running total for cumulative series).
    pub value: Decimal,
}

impl SeriesPoint {
    /// A point whose value is `raw_total` scaled from `months` to
    /// `span_months`.
    pub(crate) fn normalized(
        label: String,
        date_start: NaiveDate,
        date_end: NaiveDate,
        months: Decimal,
        raw_total: Amount,
        transaction_count: usize,
        span_months: u32,
    ) -> Self {
        Self {
            label,
            date_start,
            date_end,
            months,
            raw_total,
            transaction_count,
            value: normalize_amount(raw_total, span_months, months),
        }
    }

    /// A point over `[date_start, date_end]` with its width measured from
    /// the dates.
    pub(crate) fn spanning(
        label: String,
        date_start: NaiveDate,
        date_end: NaiveDate,
        raw_total: Amount,
        transaction_count: usize,
        span_months: u32,
    ) -> Self {
        let months = months_between(date_start, date_end);
        Self::normalized(
            label,
            date_start,
            date_end,
            months,
            raw_total,
            transaction_count,
            span_months,
        )
    }

    /// Day halfway through the bucket, for bar placement.
    pub fn midpoint(&self) -> NaiveDate {
        self.date_start + Duration::days(self.width_days() / 2)
    }

    pub fn width_days(&self) -> i64 {
        (self.date_end - self.date_start).num_days()
    }
}
