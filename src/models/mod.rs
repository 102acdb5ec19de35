mod era;
mod path;
mod transaction;

pub use era::{normalize_era_table, Era};
pub use path::{AccountPath, SEPARATOR};
pub use transaction::{date_range, sum_amounts, Amount, Transaction};
