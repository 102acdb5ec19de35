use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::models::{date_range, Amount, Transaction};

use super::point::SeriesPoint;
use super::resolution::TimeResolution;

/// Raw totals of one calendar period.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PeriodTotal {
    pub start: NaiveDate,
    /// Start of the following period.
    pub end: NaiveDate,
    pub label: String,
    pub amount: Amount,
    pub count: usize,
}

/// Every period from the one holding the earliest transaction to the one
/// holding the latest, empty ones included. Empty for era resolution.
pub(crate) fn period_totals(
    transactions: &[Transaction],
    resolution: TimeResolution,
) -> Vec<PeriodTotal> {
    let Some((earliest, latest)) = date_range(transactions) else {
        return Vec::new();
    };
    let (Some(mut start), Some(last)) = (
        resolution.period_start(earliest),
        resolution.period_start(latest),
    ) else {
        return Vec::new();
    };

    let mut periods = Vec::new();
    while start <= last {
        let Some(end) = resolution.next_period_start(start) else {
            break;
        };
        periods.push(PeriodTotal {
            start,
            end,
            label: resolution.period_label(start),
            amount: 0,
            count: 0,
        });
        start = end;
    }

    for tx in transactions {
        let slot = periods.partition_point(|p| p.end <= tx.date);
        if let Some(period) = periods.get_mut(slot) {
            period.amount = period.amount.saturating_add(tx.amount);
            period.count += 1;
        }
    }
    periods
}

/// Calendar series normalized by the nominal period length.
pub(crate) fn calendar_series(
    transactions: &[Transaction],
    resolution: TimeResolution,
    span_months: u32,
) -> Vec<SeriesPoint> {
    let Some(period_months) = resolution.months() else {
        return Vec::new();
    };
    period_totals(transactions, resolution)
        .into_iter()
        .map(|p| {
            SeriesPoint::normalized(
                p.label,
                p.start,
                p.end,
                Decimal::from(period_months),
                p.amount,
                p.count,
                span_months,
            )
        })
        .collect()
}
