// src/series/mod.rs
mod aggregate;
mod calendar;
mod cumulative;
mod era;
mod point;
mod resolution;

pub use aggregate::*;
pub use cumulative::*;
pub use era::{EraBins, BEFORE_LABEL, TOTAL_LABEL};
pub use point::SeriesPoint;
pub use resolution::*;
