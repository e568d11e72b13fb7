use std::future::Future;
use std::sync::Arc;

use tokio::sync::OnceCell;

use super::SummaryIndex;
use crate::error::IndexError;

/// Process-wide slot for the one index. Filled at most once; a failed build
/// leaves it empty so the next caller builds again. Never invalidated.
#[derive(Default)]
pub struct IndexCache {
    cell: OnceCell<Arc<SummaryIndex>>,
}

impl IndexCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached index, running `build` first if the slot is empty.
    /// Concurrent first callers wait on a single build.
    pub async fn get_or_build<F, Fut>(&self, build: F) -> Result<Arc<SummaryIndex>, IndexError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<SummaryIndex, IndexError>>,
    {
        let index = self
            .cell
            .get_or_try_init(|| async move { build().await.map(Arc::new) })
            .await?;
        Ok(Arc::clone(index))
    }

    pub fn get(&self) -> Option<Arc<SummaryIndex>> {
        self.cell.get().cloned()
    }

    pub fn is_built(&self) -> bool {
        self.cell.initialized()
    }
}
