use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid graph: {0}")]
    InvalidGraph(String),

    #[error("unknown page: {0}")]
    UnknownPage(String),

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("no convergence after {iterations} iterations (max delta={delta})")]
    NonConvergence { iterations: usize, delta: f64 },

    #[error("I/O error: {source} (path: {})", .path.display())]
    Io {
        source: std::io::Error,
        path: PathBuf,
    },

    #[error("walk directory error: {0}")]
    Walk(#[from] walkdir::Error),
}
