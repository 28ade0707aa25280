use crate::{Error, LinkGraph, RankMap};
use std::collections::BTreeMap;

pub trait PageRank {
    type Result: PageRankResult;

    fn calc(&self) -> Result<Self::Result, Error>;
}

pub trait PageRankResult {
    fn page_rank(&self) -> &RankMap;
    fn debug<'a>(&'a self, graph: &'a LinkGraph) -> impl std::fmt::Debug + 'a;

    /// Ranks keyed by page name, sorted by name.
    fn by_page(&self, graph: &LinkGraph) -> BTreeMap<String, f64> {
        graph.named(self.page_rank())
    }
}
