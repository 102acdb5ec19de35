pub mod clock;
pub mod config;
pub mod duration;
pub mod io;
pub mod models;
pub mod series;
pub mod summary;
pub mod sunburst;
pub mod tree;

pub use config::ExplorerConfig;
pub use series::{aggregate_series, cumulative_series, SeriesPoint, SeriesRequest};
pub use sunburst::{aggregate_sunburst, SunburstRequest, SunburstTree};
pub use tree::{build_account_tree, AccountTree};
