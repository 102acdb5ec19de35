//! Month-equivalent durations and rate normalization.
//!
//! Bucket widths are measured in fractional months (`days / 30.436875`, the
//! mean Gregorian month) so that uneven month lengths don't bias rates.

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::models::Amount;

/// Mean Gregorian month length in days (365.2425 / 12).
pub fn days_per_month() -> Decimal {
    Decimal::new(30_436_875, 6)
}

/// Signed length of `[start, end]` in months.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use ledger_explorer::duration::months_between;
/// use rust_decimal::Decimal;
///
/// let jan = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// let next_jan = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
/// assert_eq!(months_between(jan, jan), Decimal::ZERO);
/// assert!(months_between(jan, next_jan) > Decimal::from(12));
/// assert!(months_between(next_jan, jan) < Decimal::ZERO);
/// ```
pub fn months_between(start: NaiveDate, end: NaiveDate) -> Decimal {
    let days = (end - start).num_days();
    Decimal::from(days) / days_per_month()
}

/// Scale `amount` accumulated over `months` to a rate per `span_months`.
///
/// Returns zero for an empty or negative duration and on overflow.
///
/// # Examples
///
/// ```
/// use ledger_explorer::duration::normalize_amount;
/// use rust_decimal::Decimal;
///
/// // 300 over a quarter is 100 per month.
/// assert_eq!(normalize_amount(300, 1, Decimal::from(3)), Decimal::from(100));
/// assert_eq!(normalize_amount(300, 12, Decimal::ZERO), Decimal::ZERO);
/// ```
pub fn normalize_amount(amount: Amount, span_months: u32, months: Decimal) -> Decimal {
    if months <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    Decimal::from(amount)
        .checked_mul(Decimal::from(span_months))
        .and_then(|scaled| scaled.checked_div(months))
        .unwrap_or(Decimal::ZERO)
}

/// Round a normalized rate to whole units (half to even).
///
/// Returns `None` if the value doesn't fit an [`Amount`].
pub fn round_to_amount(value: Decimal) -> Option<Amount> {
    value.round().to_i64()
}
