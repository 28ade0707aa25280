//! The random surfer's next-page distribution.
//!
//! With probability `damping` the surfer follows one of the current page's
//! links, picked uniformly; otherwise it jumps to a page picked uniformly from
//! the whole corpus. A dangling page counts as linking to every page,
//! itself included, for the duration of one call.

use super::{check_damping, check_graph};
use crate::{Error, LinkGraph, RankMap};
use algograph::graph::VertexId;

/// Probability of visiting each page next.
pub type Distribution = RankMap;

/// Next-page distribution from the page named `page`.
pub fn transition(graph: &LinkGraph, page: &str, damping: f64) -> crate::Result<Distribution> {
    let v = graph
        .vertex(page)
        .ok_or_else(|| Error::UnknownPage(page.to_string()))?;
    transition_from(graph, &v, damping)
}

/// Next-page distribution from vertex `v`.
pub fn transition_from(
    graph: &LinkGraph,
    v: &VertexId,
    damping: f64,
) -> crate::Result<Distribution> {
    check_graph(graph)?;
    check_damping(damping)?;
    if !graph.contains_vertex(v) {
        return Err(Error::UnknownPage(format!("{v:?}")));
    }
    let mut weights = Vec::with_capacity(graph.len());
    fill_weights(graph, v, damping, &mut weights);
    Ok(graph.iter_vertices().zip(weights).collect())
}

/// Writes the distribution from `v` into `weights`, one entry per vertex in
/// [`LinkGraph::iter_vertices`] order.
///
/// The caller guarantees a non-empty graph, a known `v` and a valid damping.
pub(crate) fn fill_weights(
    graph: &LinkGraph,
    v: &VertexId,
    damping: f64,
    weights: &mut Vec<f64>,
) {
    let n = graph.len() as f64;
    let jump = (1.0 - damping) / n;
    weights.clear();
    if graph.is_dangling(v) {
        weights.resize(graph.len(), jump + damping / n);
        return;
    }

    let unit = damping / graph.out_degree(v) as f64;
    let mut links: Vec<_> = graph.links(v).collect();
    links.sort_unstable();
    weights.extend(graph.iter_vertices().map(|u| {
        if links.binary_search(&u).is_ok() {
            jump + unit
        } else {
            jump
        }
    }));
}
