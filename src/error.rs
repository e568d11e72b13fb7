use std::path::PathBuf;

/// Failures reading the corpus directory.
#[derive(Debug, thiserror::Error)]
pub enum CorpusError {
    #[error("corpus directory {} does not exist", .0.display())]
    NotFound(PathBuf),
    #[error("{} is not a directory", .0.display())]
    NotADirectory(PathBuf),
    #[error("failed to walk {}: {source}", .path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("no files found in {}", .0.display())]
    Empty(PathBuf),
}

#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    #[error(transparent)]
    Corpus(#[from] CorpusError),
    #[error("index build task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    #[error("LLM call failed: {0:#}")]
    Llm(#[from] anyhow::Error),
    #[error("tree summarization did not converge after {0} levels")]
    TreeDepthExceeded(usize),
}

/// Errors surfaced to the page. Index and query failures are shown inline;
/// a template failure falls back to a plain-text 500.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Failed to load and index the essay: {0}")]
    Index(#[from] IndexError),
    #[error("Failed to answer the query: {0}")]
    Query(#[from] QueryError),
    #[error("Failed to render the page: {0}")]
    Template(#[from] minijinja::Error),
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        tracing::error!("{self}");
        (
            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            self.to_string(),
        )
            .into_response()
    }
}
