//! PageRank estimators.
//!
//! [`sampled::SampledPageRank`] walks the graph as a random surfer and counts
//! visits; [`iterated::IteratedPageRank`] relaxes the PageRank equation until
//! it reaches a fixed point. Both share the surfer model of the
//! [`transition`](self::transition) module.

pub mod iterated;
pub mod sampled;
mod traits;
pub mod transition;

pub use self::iterated::IteratedPageRank;
pub use self::sampled::SampledPageRank;
pub use self::traits::*;
pub use self::transition::{transition, transition_from, Distribution};

use crate::{Error, LinkGraph, RankMap};

pub const DEFAULT_DAMPING: f64 = 0.85;

/// Estimates ranks from `samples` steps of a random walk.
pub fn sample_rank(graph: &LinkGraph, damping: f64, samples: usize) -> crate::Result<RankMap> {
    let config = sampled::Config {
        damping,
        samples,
        ..Default::default()
    };
    let res = sampled::SampledPageRank::new(graph, &config)?.calc()?;
    Ok(res.page_rank)
}

/// Iterates the PageRank equation to convergence with the default threshold.
pub fn iterate_rank(graph: &LinkGraph, damping: f64) -> crate::Result<RankMap> {
    let config = iterated::Config {
        damping,
        ..Default::default()
    };
    let res = iterated::IteratedPageRank::new(graph, &config)?.calc()?;
    Ok(res.page_rank)
}

pub(crate) fn check_graph(graph: &LinkGraph) -> crate::Result<()> {
    if graph.is_empty() {
        return Err(Error::InvalidGraph("the graph has no pages".to_string()));
    }
    Ok(())
}

pub(crate) fn check_damping(damping: f64) -> crate::Result<()> {
    if !(0.0..=1.0).contains(&damping) {
        return Err(Error::InvalidParameter(format!("damping={damping}")));
    }
    Ok(())
}
