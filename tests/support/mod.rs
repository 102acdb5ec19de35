#![allow(dead_code)]

use std::path::Path;

use anyhow::Result;
use chrono::NaiveDate;
use ledger_explorer::clock::FixedClock;
use ledger_explorer::models::{Amount, Transaction};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

pub fn tx(on: NaiveDate, amount: Amount, path: &str) -> Transaction {
    Transaction::new(on, amount, path)
}

pub fn clock() -> FixedClock {
    FixedClock::new(date(2024, 12, 31))
}

/// Two years of household spending in the exporter's sign convention.
pub fn household() -> Vec<Transaction> {
    vec![
        tx(date(2023, 1, 3), -4_000, "Income:Salary"),
        tx(date(2023, 1, 10), 120, "Expenses:Auto:Fuel"),
        tx(date(2023, 2, 14), 300, "Expenses:Auto:Repair"),
        tx(date(2023, 3, 1), 1_500, "Expenses:Housing:Rent"),
        tx(date(2023, 6, 20), 900, "Expenses:Travel"),
        tx(date(2024, 1, 3), -4_200, "Income:Salary"),
        tx(date(2024, 1, 12), 140, "Expenses:Auto:Fuel"),
        tx(date(2024, 3, 1), 1_600, "Expenses:Housing:Rent"),
    ]
}

pub fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<()> {
    std::fs::write(path, serde_json::to_string_pretty(value)?)?;
    Ok(())
}
