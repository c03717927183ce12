use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{call} failed: {source}")]
    Terminal {
        call: &'static str,
        source: io::Error,
    },

    #[error("failed to build key matcher: {0}")]
    KeyMatcher(#[from] aho_corasick::BuildError),

    #[error("failed to open log file {}: {source}", path.display())]
    LogFile { path: PathBuf, source: io::Error },
}

pub type Result<T> = std::result::Result<T, Error>;
