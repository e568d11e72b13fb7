//! Corpus loader: every regular file under one directory becomes a [`Document`].

use std::path::Path;

use chrono::{DateTime, Utc};
use walkdir::WalkDir;

use crate::error::CorpusError;
use crate::models::Document;

/// Read all non-hidden files under `dir`, recursively, sorted by file name.
pub fn load_documents(dir: &Path) -> Result<Vec<Document>, CorpusError> {
    if !dir.exists() {
        return Err(CorpusError::NotFound(dir.to_path_buf()));
    }
    if !dir.is_dir() {
        return Err(CorpusError::NotADirectory(dir.to_path_buf()));
    }

    let mut docs = Vec::new();

    for entry in WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e))
    {
        let entry = entry.map_err(|source| CorpusError::Walk {
            path: dir.to_path_buf(),
            source,
        })?;

        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let read_err = |source| CorpusError::Read {
            path: path.to_path_buf(),
            source,
        };

        let bytes = std::fs::read(path).map_err(read_err)?;
        let meta = entry.metadata().map_err(|e| read_err(e.into()))?;

        docs.push(Document {
            file_path: relative_path(dir, path),
            file_name: entry.file_name().to_string_lossy().to_string(),
            file_size: meta.len(),
            last_modified: meta.modified().ok().map(DateTime::<Utc>::from),
            // Undecodable bytes are replaced, not rejected
            text: String::from_utf8_lossy(&bytes).into_owned(),
        });
    }

    if docs.is_empty() {
        return Err(CorpusError::Empty(dir.to_path_buf()));
    }

    tracing::info!("Loaded {} document(s) from {}", docs.len(), dir.display());
    Ok(docs)
}

fn is_hidden(entry: &walkdir::DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}

fn relative_path(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
