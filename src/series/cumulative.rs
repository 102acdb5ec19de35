use rust_decimal::Decimal;

use crate::models::{Amount, Transaction};

use super::calendar::period_totals;
use super::point::SeriesPoint;
use super::resolution::TimeResolution;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SeriesError {
    #[error("Cumulative series need a calendar resolution, got {0}")]
    CalendarResolutionRequired(TimeResolution),
}

/// Running balance at the end of every calendar period.
///
/// `value` is the cumulative sum through the period; `raw_total` is the
/// period's own change.
pub fn cumulative_series(
    transactions: &[Transaction],
    resolution: TimeResolution,
) -> Result<Vec<SeriesPoint>, SeriesError> {
    let Some(period_months) = resolution.months() else {
        return Err(SeriesError::CalendarResolutionRequired(resolution));
    };

    let mut running: Amount = 0;
    Ok(period_totals(transactions, resolution)
        .into_iter()
        .map(|p| {
            running = running.saturating_add(p.amount);
            SeriesPoint {
                label: p.label,
                date_start: p.start,
                date_end: p.end,
                months: Decimal::from(period_months),
                raw_total: p.amount,
                transaction_count: p.count,
                value: Decimal::from(running),
            }
        })
        .collect())
}
