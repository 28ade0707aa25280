use super::*;
use crate::{norm_1, norm_inf};
use algograph::graph::VertexId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// Solves `rank(p) = (1 - d) / N + d * sum(rank(q) / L(q))` over all `q`
/// linking to `p` by synchronous sweeps.
///
/// Every sweep reads the previous snapshot only and writes a fresh one; the
/// two buffers are swapped between sweeps. A dangling page links to every
/// page, so its rank is spread evenly over the corpus.
pub struct IteratedPageRank<'a> {
    graph: &'a LinkGraph,
    damping: f64,
    epsilon: f64,
    max_iterations: usize,
    out_degrees: HashMap<VertexId, f64, ahash::RandomState>,
    dangling: Vec<VertexId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub damping: f64,
    /// Convergence threshold on the largest per-page change of one sweep.
    pub epsilon: f64,
    pub max_iterations: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            damping: DEFAULT_DAMPING,
            epsilon: 0.001,
            max_iterations: 10_000,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Result {
    pub page_rank: RankMap,
    pub delta: RankMap,
    pub iterations: usize,
}

impl<'a> IteratedPageRank<'a> {
    pub fn new(g: &'a LinkGraph, config: &Config) -> crate::Result<Self> {
        check_graph(g)?;
        check_damping(config.damping)?;
        let epsilon = config.epsilon;
        if !(epsilon.is_finite() && epsilon > 0.0) {
            return Err(Error::InvalidParameter(format!("epsilon={epsilon}")));
        }
        if config.max_iterations == 0 {
            return Err(Error::InvalidParameter("max_iterations=0".to_string()));
        }

        let mut out_degrees = HashMap::with_hasher(ahash::RandomState::new());
        let mut dangling = vec![];
        for u in g.iter_vertices() {
            match g.out_degree(&u) {
                0 => dangling.push(u),
                d => {
                    out_degrees.insert(u, d as f64);
                }
            }
        }
        Ok(Self {
            graph: g,
            damping: config.damping,
            epsilon,
            max_iterations: config.max_iterations,
            out_degrees,
            dangling,
        })
    }

    /// Every page at `1 / N`.
    pub fn uniform(&self) -> RankMap {
        let n = self.graph.len() as f64;
        self.graph.iter_vertices().map(|v| (v, 1.0 / n)).collect()
    }

    /// One synchronous sweep from `ranks`. Pages missing from `ranks` count as 0.
    pub fn step(&self, ranks: &RankMap) -> RankMap {
        let mut next = HashMap::with_capacity_and_hasher(self.graph.len(), Default::default());
        self.sweep(ranks, &mut next);
        next
    }

    fn sweep(&self, p: &RankMap, r: &mut RankMap) {
        let damping = self.damping;
        let n = self.graph.len() as f64;
        let rank = |v: &VertexId| p.get(v).copied().unwrap_or(0.0);
        let dangling = self.dangling.iter().map(rank).sum::<f64>() / n;

        r.clear();
        for v in self.graph.iter_vertices() {
            let incoming: f64 = self
                .graph
                .linked_from(&v)
                .map(|u| rank(&u) / self.out_degrees[&u])
                .sum();
            r.insert(v, (1.0 - damping) / n + damping * (incoming + dangling));
        }
    }
}

impl PageRank for IteratedPageRank<'_> {
    type Result = self::Result;

    fn calc(&self) -> crate::Result<Self::Result> {
        let mut p = self.uniform();
        let mut r = HashMap::with_capacity_and_hasher(self.graph.len(), Default::default());
        let mut delta = HashMap::with_capacity_and_hasher(self.graph.len(), Default::default());
        for iteration in 1..=self.max_iterations {
            self.sweep(&p, &mut r);

            delta.clear();
            for v in self.graph.iter_vertices() {
                delta.insert(v, r[&v] - p[&v]);
            }
            let max_delta = norm_inf(&delta);
            debug!(iteration, max_delta, "sweep");

            if max_delta <= self.epsilon {
                info!(iterations = iteration, max_delta, total = norm_1(&r), "converged");
                return Ok(Self::Result {
                    page_rank: r,
                    delta,
                    iterations: iteration,
                });
            }

            std::mem::swap(&mut p, &mut r);
        }

        let max_delta = norm_inf(&delta);
        warn!(
            iterations = self.max_iterations,
            max_delta,
            epsilon = self.epsilon,
            "no convergence"
        );
        Err(Error::NonConvergence {
            iterations: self.max_iterations,
            delta: max_delta,
        })
    }
}

impl PageRankResult for self::Result {
    fn page_rank(&self) -> &RankMap {
        &self.page_rank
    }

    fn debug<'a>(&'a self, graph: &'a LinkGraph) -> impl std::fmt::Debug + 'a {
        ResultDebug {
            graph,
            result: self,
        }
    }
}

pub struct ResultDebug<'a> {
    graph: &'a LinkGraph,
    result: &'a self::Result,
}

impl std::fmt::Debug for ResultDebug<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for v in self.graph.iter_vertices() {
            let page = self.graph.page(&v).unwrap_or_default();
            let p = self.result.page_rank.get(&v).copied().unwrap_or_default();
            let d = self.result.delta.get(&v).copied().unwrap_or_default();
            writeln!(f, "{page}: {p:?}, {d:?}")?;
        }
        Ok(())
    }
}
