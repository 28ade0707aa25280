mod common;
pub use self::common::*;
pub mod crawl;
mod error;
pub use self::error::{Error, Result};
pub mod graph;
pub use self::graph::LinkGraph;

pub mod page_rank;

#[cfg(test)]
mod random_graph;
