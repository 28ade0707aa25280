use crate::LinkGraph;
use quickcheck::{Arbitrary, Gen};

/// A small random corpus for property tests, dangling pages included.
#[derive(Debug)]
pub struct RandomGraph {
    pub graph: LinkGraph,
}

impl Clone for RandomGraph {
    fn clone(&self) -> Self {
        let pages: Vec<(String, Vec<String>)> = self
            .graph
            .iter_vertices()
            .map(|u| {
                let links = self
                    .graph
                    .links(&u)
                    .filter_map(|v| self.graph.page(&v))
                    .map(str::to_string)
                    .collect();
                (self.graph.page(&u).unwrap_or_default().to_string(), links)
            })
            .collect();
        Self {
            graph: LinkGraph::new(pages).unwrap(),
        }
    }
}

impl Arbitrary for RandomGraph {
    fn arbitrary(g: &mut Gen) -> Self {
        const N: usize = 8;

        let n: usize = usize::arbitrary(g) % N + 1;
        let names: Vec<String> = (0..n).map(|i| format!("{i}.html")).collect();
        let pages: Vec<(String, Vec<String>)> = names
            .iter()
            .enumerate()
            .map(|(i, page)| {
                let links: Vec<String> = (0..n)
                    .filter(|j| *j != i && usize::arbitrary(g) % 3 == 0)
                    .map(|j| names[j].clone())
                    .collect();
                (page.clone(), links)
            })
            .collect();
        Self {
            graph: LinkGraph::new(pages).unwrap(),
        }
    }
}

/// A damping factor strictly inside (0, 1).
#[derive(Debug, Clone, Copy)]
pub struct Damping(pub f64);

impl Arbitrary for Damping {
    fn arbitrary(g: &mut Gen) -> Self {
        Self(f64::from(u8::arbitrary(g) % 99 + 1) / 100.0)
    }
}
