use super::transition::fill_weights;
use super::*;
use algograph::graph::VertexId;
use rand::{
    distr::{weighted::WeightedIndex, Distribution as _},
    rngs::SmallRng,
    seq::IndexedRandom,
    Rng, SeedableRng,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

pub struct SampledPageRank<'a> {
    graph: &'a LinkGraph,
    damping: f64,
    samples: usize,
    seed: Option<u64>,
    vertices: Vec<VertexId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub damping: f64,
    pub samples: usize,
    /// Seeds the walk for reproducible runs. `None` seeds from the thread-local generator.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            damping: DEFAULT_DAMPING,
            samples: 10_000,
            seed: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Result {
    pub page_rank: RankMap,
    pub visits: HashMap<VertexId, usize, ahash::RandomState>,
    pub samples: usize,
}

impl<'a> SampledPageRank<'a> {
    pub fn new(g: &'a LinkGraph, config: &Config) -> crate::Result<Self> {
        check_graph(g)?;
        check_damping(config.damping)?;
        if config.samples < 1 {
            return Err(Error::InvalidParameter(format!(
                "samples={}",
                config.samples
            )));
        }
        Ok(Self {
            graph: g,
            damping: config.damping,
            samples: config.samples,
            seed: config.seed,
            vertices: g.iter_vertices().collect(),
        })
    }

    /// Runs the walk on a caller-supplied generator.
    pub fn walk<R: Rng + ?Sized>(&self, rng: &mut R) -> crate::Result<self::Result> {
        debug!(
            pages = self.vertices.len(),
            damping = self.damping,
            samples = self.samples,
            "random walk"
        );
        let mut visits: HashMap<_, _, ahash::RandomState> =
            self.vertices.iter().map(|v| (*v, 0usize)).collect();
        let mut page = *self
            .vertices
            .choose(rng)
            .ok_or_else(|| Error::InvalidGraph("the graph has no pages".to_string()))?;
        *visits.entry(page).or_default() += 1;

        let mut weights = Vec::with_capacity(self.vertices.len());
        for _ in 1..self.samples {
            fill_weights(self.graph, &page, self.damping, &mut weights);
            let next = WeightedIndex::new(&weights)
                .map_err(|e| Error::InvalidParameter(format!("transition weights: {e}")))?;
            page = self.vertices[next.sample(rng)];
            *visits.entry(page).or_default() += 1;
        }

        let n = self.samples as f64;
        let page_rank = visits
            .iter()
            .map(|(v, count)| (*v, *count as f64 / n))
            .collect();
        Ok(self::Result {
            page_rank,
            visits,
            samples: self.samples,
        })
    }
}

impl PageRank for SampledPageRank<'_> {
    type Result = self::Result;

    fn calc(&self) -> crate::Result<Self::Result> {
        let mut rng = match self.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_rng(&mut rand::rng()),
        };
        self.walk(&mut rng)
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
            let c = self.result.visits.get(&v).copied().unwrap_or_default();
            writeln!(f, "{page}: {p:.4}, {c}/{}", self.result.samples)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::norm_1;
    use crate::random_graph::{Damping, RandomGraph};
    use quickcheck_macros::quickcheck;

    fn corpus() -> LinkGraph {
        LinkGraph::new([
            ("1.html", vec!["2.html"]),
            ("2.html", vec!["1.html", "3.html"]),
            ("3.html", vec!["2.html", "4.html", "5.html"]),
            ("4.html", vec!["1.html", "2.html"]),
            ("5.html", vec![]),
        ])
        .unwrap()
    }

    fn seeded(samples: usize, seed: u64) -> Config {
        Config {
            samples,
            seed: Some(seed),
            ..Default::default()
        }
    }

    #[test]
    fn single_sample() {
        let g = corpus();
        let res = SampledPageRank::new(&g, &seeded(1, 3407)).unwrap().calc().unwrap();
        assert_eq!(res.page_rank.len(), g.len());
        assert_eq!(res.page_rank.values().filter(|x| **x == 1.0).count(), 1);
        assert_eq!(res.page_rank.values().filter(|x| **x == 0.0).count(), g.len() - 1);
    }

    #[test]
    fn zero_samples() {
        let g = corpus();
        let res = SampledPageRank::new(&g, &seeded(0, 3407));
        assert!(matches!(res, Err(Error::InvalidParameter(_))));
    }

    #[test]
    fn invalid_damping() {
        let g = corpus();
        let cfg = Config {
            damping: 1.5,
            ..Default::default()
        };
        assert!(matches!(
            SampledPageRank::new(&g, &cfg),
            Err(Error::InvalidParameter(_))
        ));
    }

    #[test]
    fn reproducible() {
        let g = corpus();
        let cfg = seeded(2_000, 42);
        let a = SampledPageRank::new(&g, &cfg).unwrap().calc().unwrap();
        let b = SampledPageRank::new(&g, &cfg).unwrap().calc().unwrap();
        assert_eq!(a.visits, b.visits);
    }

    #[test]
    fn isolated_page_is_only_reached_by_jumps() {
        let g = LinkGraph::new([
            ("a", vec!["b"]),
            ("b", vec!["a"]),
            ("c", vec!["a", "b"]),
        ])
        .unwrap();
        let res = SampledPageRank::new(&g, &seeded(50_000, 7))
            .unwrap()
            .calc()
            .unwrap();
        let ranks = res.by_page(&g);
        // nothing links to `c`, so it is visited by random jumps only
        let expected = 0.15 / 3.0;
        assert!((ranks["c"] - expected).abs() < 0.01, "{ranks:?}");
        assert!((ranks["a"] - ranks["b"]).abs() < 0.03, "{ranks:?}");
    }

    #[test]
    fn debug_lists_every_page() {
        let g = corpus();
        let res = SampledPageRank::new(&g, &seeded(10, 1)).unwrap().calc().unwrap();
        let text = format!("{:?}", res.debug(&g));
        assert_eq!(text.lines().count(), g.len());
        assert!(text.starts_with("1.html: "), "{text}");
    }

    #[test]
    fn config_from_json() {
        let cfg: Config = serde_json::from_str(r#"{"samples": 500}"#).unwrap();
        assert_eq!(cfg.samples, 500);
        assert_eq!(cfg.damping, DEFAULT_DAMPING);
        assert_eq!(cfg.seed, None);
    }

    #[quickcheck]
    fn visits_add_up(g: RandomGraph, damping: Damping, samples: u8, seed: u64) {
        let g = &g.graph;
        let samples = usize::from(samples) + 1;
        let cfg = Config {
            damping: damping.0,
            samples,
            seed: Some(seed),
        };
        let res = SampledPageRank::new(g, &cfg).unwrap().calc().unwrap();
        assert_eq!(res.page_rank.len(), g.len());
        assert_eq!(res.visits.values().sum::<usize>(), samples);
        let sum = norm_1(&res.page_rank);
        assert!((sum - 1.0).abs() < 1e-9, "sum={sum}");
        for (v, p) in res.page_rank.iter() {
            let count = res.visits[v];
            assert!((p * samples as f64 - count as f64).abs() < 1e-9);
        }
    }
}
