//! Builds a [`LinkGraph`] out of a corpus of HTML pages.
//!
//! A page is named after its file name. Links are the `href` targets of
//! anchor tags; links to the page itself or to files outside the corpus are
//! dropped.

use crate::{Error, LinkGraph};
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::{BTreeSet, HashSet};
use std::path::Path;
use tracing::{debug, info};
use walkdir::WalkDir;

lazy_static! {
    static ref LINK_RE: Regex = Regex::new(r#"<a\s+(?:[^>]*?)href="([^"]*)""#).unwrap();
}

/// All distinct `href` targets of anchor tags in `contents`.
pub fn extract_links(contents: &str) -> BTreeSet<String> {
    LINK_RE
        .captures_iter(contents)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Builds the graph from `(page name, contents)` documents.
pub fn from_documents<I, N, C>(documents: I) -> crate::Result<LinkGraph>
where
    I: IntoIterator<Item = (N, C)>,
    N: Into<String>,
    C: AsRef<str>,
{
    let pages: Vec<(String, BTreeSet<String>)> = documents
        .into_iter()
        .map(|(name, contents)| (name.into(), extract_links(contents.as_ref())))
        .collect();
    let corpus: HashSet<&str, ahash::RandomState> = pages.iter().map(|(p, _)| p.as_str()).collect();
    if corpus.len() != pages.len() {
        return Err(Error::InvalidGraph("duplicate page names".to_string()));
    }

    let filtered: Vec<(String, Vec<String>)> = pages
        .iter()
        .map(|(page, links)| {
            let links = links
                .iter()
                .filter(|link| *link != page && corpus.contains(link.as_str()))
                .cloned()
                .collect();
            (page.clone(), links)
        })
        .collect();
    LinkGraph::new(filtered)
}

/// Reads every `*.html` file directly inside `dir` and builds the graph.
pub fn crawl<P: AsRef<Path>>(dir: P) -> crate::Result<LinkGraph> {
    let dir = dir.as_ref();
    let mut documents = vec![];
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if !entry.file_type().is_file() || !name.ends_with(".html") {
            debug!(path = %entry.path().display(), "skipped");
            continue;
        }
        let contents = std::fs::read_to_string(entry.path()).map_err(|source| Error::Io {
            source,
            path: entry.path().to_path_buf(),
        })?;
        documents.push((name, contents));
    }

    let graph = from_documents(documents)?;
    info!(
        dir = %dir.display(),
        pages = graph.len(),
        links = graph.link_size(),
        "crawled"
    );
    Ok(graph)
}
