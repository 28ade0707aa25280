use crate::{Error, RankMap};
use algograph::graph::*;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// A read-only hyperlink graph over a corpus of named pages.
///
/// Every page is a vertex of a directed `algograph` graph and every link an
/// edge. Self links and links to pages outside the corpus are rejected on
/// construction, so neighbor sets only ever reference other corpus pages.
/// Pages without outbound links are kept as they are; estimators treat them
/// as linking to the whole corpus without touching the graph.
pub struct LinkGraph {
    graph: directed::TreeBackedGraph,
    // sorted by page name
    vertices: Vec<VertexId>,
    names: HashMap<VertexId, String, ahash::RandomState>,
    ids: HashMap<String, VertexId, ahash::RandomState>,
}

impl LinkGraph {
    /// Builds a graph from `(page, links)` pairs.
    ///
    /// Duplicate links collapse into one. A page listed twice, a page linking
    /// to itself, or a link to a page which is not itself listed is an
    /// [`Error::InvalidGraph`].
    pub fn new<I, P, L, Q>(pages: I) -> crate::Result<Self>
    where
        I: IntoIterator<Item = (P, L)>,
        P: Into<String>,
        L: IntoIterator<Item = Q>,
        Q: Into<String>,
    {
        let mut adjacency: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        for (page, links) in pages {
            let page = page.into();
            let links: BTreeSet<String> = links.into_iter().map(Into::into).collect();
            if adjacency.contains_key(&page) {
                return Err(Error::InvalidGraph(format!("page `{page}` is listed twice")));
            }
            adjacency.insert(page, links);
        }

        let mut graph = directed::TreeBackedGraph::new();
        let mut vertices = Vec::with_capacity(adjacency.len());
        let mut names = HashMap::with_hasher(ahash::RandomState::new());
        let mut ids = HashMap::with_hasher(ahash::RandomState::new());
        for page in adjacency.keys() {
            let v = graph.add_vertex();
            vertices.push(v);
            names.insert(v, page.clone());
            ids.insert(page.clone(), v);
        }
        for (page, links) in adjacency.iter() {
            let u = ids[page];
            for link in links.iter() {
                if link == page {
                    return Err(Error::InvalidGraph(format!("page `{page}` links to itself")));
                }
                let Some(v) = ids.get(link) else {
                    return Err(Error::InvalidGraph(format!(
                        "page `{page}` links to `{link}` outside the corpus"
                    )));
                };
                graph.add_edge(u, *v);
            }
        }

        Ok(Self {
            graph,
            vertices,
            names,
            ids,
        })
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn link_size(&self) -> usize {
        self.graph.edge_size()
    }

    /// Iterates over all vertices, ordered by page name.
    pub fn iter_vertices(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.vertices.iter().copied()
    }

    /// Iterates over all page names in sorted order.
    pub fn pages(&self) -> impl Iterator<Item = &str> + '_ {
        self.vertices.iter().map(|v| self.names[v].as_str())
    }

    pub fn contains_vertex(&self, v: &VertexId) -> bool {
        self.names.contains_key(v)
    }

    pub fn vertex(&self, page: &str) -> Option<VertexId> {
        self.ids.get(page).copied()
    }

    pub fn page(&self, v: &VertexId) -> Option<&str> {
        self.names.get(v).map(String::as_str)
    }

    /// Pages `v` links to. Empty for a dangling page.
    pub fn links(&self, v: &VertexId) -> impl Iterator<Item = VertexId> + '_ {
        self.graph.out_edges(v).map(|e| e.sink)
    }

    /// Pages linking to `v`.
    pub fn linked_from(&self, v: &VertexId) -> impl Iterator<Item = VertexId> + '_ {
        self.graph.in_edges(v).map(|e| e.source)
    }

    pub fn out_degree(&self, v: &VertexId) -> usize {
        self.graph.out_edges(v).count()
    }

    pub fn is_dangling(&self, v: &VertexId) -> bool {
        self.graph.out_edges(v).next().is_none()
    }

    /// Out-degree after substituting "links to every page" for a dangling page.
    pub fn effective_out_degree(&self, v: &VertexId) -> usize {
        match self.out_degree(v) {
            0 => self.len(),
            d => d,
        }
    }

    /// Re-keys `values` by page name. Vertices unknown to this graph are dropped.
    pub fn named(&self, values: &RankMap) -> BTreeMap<String, f64> {
        values
            .iter()
            .filter_map(|(v, x)| self.page(v).map(|p| (p.to_string(), *x)))
            .collect()
    }
}

impl std::fmt::Debug for LinkGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut map = f.debug_map();
        for v in self.iter_vertices() {
            let mut links: Vec<_> = self.links(&v).filter_map(|u| self.page(&u)).collect();
            links.sort_unstable();
            map.entry(&self.names[&v], &links);
        }
        map.finish()
    }
}
