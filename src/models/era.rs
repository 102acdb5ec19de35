use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A named date range used as a custom aggregation bucket.
///
/// Only `date_start` takes part in binning: each era runs until the next
/// era's start. `date_end` is kept for display and for closing the last era.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Era {
    pub name: String,
    pub date_start: NaiveDate,
    #[serde(default)]
    pub date_end: Option<NaiveDate>,
}

impl Era {
    pub fn new(name: impl Into<String>, date_start: NaiveDate) -> Self {
        Self {
            name: name.into(),
            date_start,
            date_end: None,
        }
    }

    pub fn ending(mut self, date_end: NaiveDate) -> Self {
        self.date_end = Some(date_end);
        self
    }
}

/// Sort an era table by start date and close the latest open-ended era at
/// `latest`, the date of the newest transaction.
pub fn normalize_era_table(mut eras: Vec<Era>, latest: Option<NaiveDate>) -> Vec<Era> {
    eras.sort_by(|a, b| a.date_start.cmp(&b.date_start));
    if let (Some(last), Some(latest)) = (eras.last_mut(), latest) {
        if last.date_end.is_none() {
            last.date_end = Some(latest);
        }
    }
    eras
}
