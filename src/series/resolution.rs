// src/series/resolution.rs
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Invalid {kind}: {value:?}. Use: {expected}")]
pub struct ParseError {
    kind: &'static str,
    value: String,
    expected: &'static str,
}

/// Bucket width for series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeResolution {
    /// User-defined era table (falls back to one whole-range bucket).
    Era,
    #[default]
    Year,
    Quarter,
    Month,
}

impl TimeResolution {
    pub fn label(self) -> &'static str {
        match self {
            TimeResolution::Era => "Era",
            TimeResolution::Year => "Year",
            TimeResolution::Quarter => "Quarter",
            TimeResolution::Month => "Month",
        }
    }

    pub fn abbrev(self) -> &'static str {
        match self {
            TimeResolution::Era => "era",
            TimeResolution::Year => "Y",
            TimeResolution::Quarter => "Q",
            TimeResolution::Month => "Mo",
        }
    }

    /// Pandas-style resample code of the calendar resolutions.
    pub fn resample_code(self) -> Option<&'static str> {
        match self {
            TimeResolution::Era => None,
            TimeResolution::Year => Some("A"),
            TimeResolution::Quarter => Some("Q"),
            TimeResolution::Month => Some("M"),
        }
    }

    /// Nominal length of one period in months.
    pub fn months(self) -> Option<u32> {
        match self {
            TimeResolution::Era => None,
            TimeResolution::Year => Some(12),
            TimeResolution::Quarter => Some(3),
            TimeResolution::Month => Some(1),
        }
    }

    /// Label pattern (`%q` is the quarter number).
    pub fn label_format(self) -> Option<&'static str> {
        match self {
            TimeResolution::Era => None,
            TimeResolution::Year => Some("%Y"),
            TimeResolution::Quarter => Some("%Y-Q%q"),
            TimeResolution::Month => Some("%Y-%b"),
        }
    }

    pub fn is_calendar(self) -> bool {
        self.months().is_some()
    }

    /// First day of the calendar period containing `date`.
    pub fn period_start(self, date: NaiveDate) -> Option<NaiveDate> {
        match self {
            TimeResolution::Era => None,
            TimeResolution::Year => NaiveDate::from_ymd_opt(date.year(), 1, 1),
            TimeResolution::Quarter => {
                let q0 = (date.month0() / 3) * 3; // 0,3,6,9
                NaiveDate::from_ymd_opt(date.year(), q0 + 1, 1)
            }
            TimeResolution::Month => NaiveDate::from_ymd_opt(date.year(), date.month(), 1),
        }
    }

    /// First day of the period following the one starting at `start`.
    pub fn next_period_start(self, start: NaiveDate) -> Option<NaiveDate> {
        let months = self.months()?;
        let total = start.year() * 12 + start.month0() as i32 + months as i32;
        NaiveDate::from_ymd_opt(total.div_euclid(12), total.rem_euclid(12) as u32 + 1, 1)
    }

    /// Display label of the period starting at `start`, e.g. `2023`,
    /// `2023-Q1` or `2023-Jan`.
    pub fn period_label(self, start: NaiveDate) -> String {
        match self {
            TimeResolution::Era => start.format("%Y-%m-%d").to_string(),
            TimeResolution::Year => start.format("%Y").to_string(),
            TimeResolution::Quarter => format!("{}-Q{}", start.year(), start.month0() / 3 + 1),
            TimeResolution::Month => start.format("%Y-%b").to_string(),
        }
    }
}

impl fmt::Display for TimeResolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TimeResolution {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "era" | "eras" => Ok(TimeResolution::Era),
            "year" | "yearly" | "annual" => Ok(TimeResolution::Year),
            "quarter" | "quarterly" => Ok(TimeResolution::Quarter),
            "month" | "monthly" => Ok(TimeResolution::Month),
            _ => Err(ParseError {
                kind: "resolution",
                value: s.to_string(),
                expected: "era, year, quarter, month",
            }),
        }
    }
}

/// Common rate every bucket is normalized to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeSpan {
    Annualized,
    #[default]
    Monthly,
}

impl TimeSpan {
    pub fn label(self) -> &'static str {
        match self {
            TimeSpan::Annualized => "Annualized",
            TimeSpan::Monthly => "Monthly",
        }
    }

    pub fn abbrev(self) -> &'static str {
        match self {
            TimeSpan::Annualized => "/y",
            TimeSpan::Monthly => "/mo",
        }
    }

    pub fn months(self) -> u32 {
        match self {
            TimeSpan::Annualized => 12,
            TimeSpan::Monthly => 1,
        }
    }
}

impl fmt::Display for TimeSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TimeSpan {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "annualized" | "annual" | "yearly" | "year" | "y" => Ok(TimeSpan::Annualized),
            "monthly" | "month" | "mo" => Ok(TimeSpan::Monthly),
            _ => Err(ParseError {
                kind: "time span",
                value: s.to_string(),
                expected: "annualized, monthly",
            }),
        }
    }
}
