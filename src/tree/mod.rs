// src/tree/mod.rs
mod arena;
mod builder;
mod filter;

pub use arena::*;
pub use builder::*;
pub use filter::*;
