//! Error types
//!
//! Only setup and traversal failures surface as [`Error`]. Everything that can
//! go wrong with a single record is absorbed and logged by the record processor.

use std::path::PathBuf;
use thiserror::Error;

/// Fatal errors that abort a run
#[derive(Error, Debug)]
pub enum Error {
    #[error("{role} directory {} does not exist", path.display())]
    MissingDirectory { role: &'static str, path: PathBuf },

    #[error("error walking {}: {source}", root.display())]
    Traversal {
        root: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("error listing {}: {source}", root.display())]
    Listing {
        root: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("failed to start worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("failed to initialize logging: {0}")]
    Logging(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn traversal(root: impl Into<PathBuf>, source: walkdir::Error) -> Self {
        Error::Traversal {
            root: root.into(),
            source,
        }
    }
}
