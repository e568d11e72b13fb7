//! Summary index: every node of every document, kept in load order.

pub mod cache;

use std::path::PathBuf;

use crate::chunking::{split_text, NODE_CHUNK_CHARS, NODE_OVERLAP_CHARS};
use crate::corpus::load_documents;
use crate::error::IndexError;
use crate::models::{Document, Node};

pub use cache::IndexCache;

/// Shown on the page and logged while the index is being built.
pub const LOADING_MESSAGE: &str =
    "Loading and indexing Paul Graham's essay. This may take a while...";

#[derive(Debug)]
pub struct SummaryIndex {
    documents: Vec<Document>,
    nodes: Vec<Node>,
}

impl SummaryIndex {
    /// Split every document into nodes. No LLM calls are made here.
    pub fn from_documents(documents: Vec<Document>) -> Self {
        let mut nodes = Vec::new();
        for (doc_index, doc) in documents.iter().enumerate() {
            for (chunk_index, split) in split_text(&doc.text, NODE_CHUNK_CHARS, NODE_OVERLAP_CHARS)
                .into_iter()
                .enumerate()
            {
                nodes.push(Node {
                    doc_index,
                    chunk_index,
                    text: split.content,
                    start_line: split.start_line,
                    end_line: split.end_line,
                });
            }
        }

        Self { documents, nodes }
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }
}

/// Load the corpus directory and index it. Filesystem work runs on the
/// blocking pool.
pub async fn build_index(data_dir: PathBuf) -> Result<SummaryIndex, IndexError> {
    tracing::info!("{LOADING_MESSAGE}");
    let start = std::time::Instant::now();

    let documents = tokio::task::spawn_blocking(move || load_documents(&data_dir)).await??;
    let index = SummaryIndex::from_documents(documents);

    tracing::info!(
        "Indexed {} document(s) into {} node(s) in {:?}",
        index.documents().len(),
        index.nodes().len(),
        start.elapsed()
    );
    Ok(index)
}
