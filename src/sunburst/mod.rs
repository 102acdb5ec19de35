// src/sunburst/mod.rs
mod aggregate;
mod fanout;
mod pipeline;
mod sign;

pub use aggregate::*;
pub use fanout::*;
pub use pipeline::*;
pub use sign::*;
