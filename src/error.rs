use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GlenError {
    #[error("invalid remote URL: {0:?}")]
    InvalidRemoteUrl(String),

    #[error("unable to open git repository ({}) with the following error: {source}", .path.display())]
    RepositoryOpen {
        path: PathBuf,
        #[source]
        source: git2::Error,
    },

    #[error("unable to find selected remote ({name}) with the following error: {source}")]
    RemoteNotFound {
        name: String,
        #[source]
        source: git2::Error,
    },

    #[error("remote ({0}) has no configured URLs")]
    RemoteWithoutUrl(String),

    #[error("failed to get variables from project {project}: {source}")]
    SourceUnavailable {
        project: String,
        #[source]
        source: Box<GlenError>,
    },

    #[error("{scope} {path} reported {total_pages} pages but paging stopped advancing at page {page}")]
    IncompletePagination {
        scope: String,
        path: String,
        page: u32,
        total_pages: u32,
    },

    #[error("API request failed with status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GlenError>;
