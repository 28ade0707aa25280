use algograph::graph::VertexId;
use std::{collections::HashMap, hash::Hash};

/// Page rank values (or probabilities) keyed by vertex.
pub type RankMap = HashMap<VertexId, f64, ahash::RandomState>;

pub fn norm_1<K: Ord + Hash>(v: &HashMap<K, f64, ahash::RandomState>) -> f64 {
    v.values().map(|x| x.abs()).sum()
}

pub fn norm_inf<K: Ord + Hash>(v: &HashMap<K, f64, ahash::RandomState>) -> f64 {
    v.values().fold(0.0, |acc, x| acc.max(x.abs()))
}
