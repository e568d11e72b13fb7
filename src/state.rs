use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::config::Config;
use crate::error::IndexError;
use crate::index::{build_index, IndexCache, SummaryIndex};
use crate::llm::{ChatClient, LanguageModel};
use crate::query::QueryEngine;

type BuildTask = JoinHandle<Result<Arc<SummaryIndex>, IndexError>>;

/// Where the index stands, as seen by a page render that must not block.
#[derive(Debug)]
pub enum IndexStatus {
    Ready(Arc<SummaryIndex>),
    Building,
    /// The last background build failed. The next poll starts a new one.
    Failed(IndexError),
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub index: Arc<IndexCache>,
    pub llm: Arc<dyn LanguageModel>,
    pub templates: Arc<minijinja::Environment<'static>>,
    build: Arc<Mutex<Option<BuildTask>>>,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let llm = ChatClient::from_config(config.llm.clone())?;
        Self::with_llm(config, Arc::new(llm))
    }

    /// State with a caller-supplied model, e.g. a stub in tests.
    pub fn with_llm(config: Config, llm: Arc<dyn LanguageModel>) -> anyhow::Result<Self> {
        Ok(Self {
            config,
            index: Arc::new(IndexCache::new()),
            llm,
            templates: Arc::new(crate::api::templates()?),
            build: Arc::new(Mutex::new(None)),
        })
    }

    /// The process-wide index, built from the corpus directory on first use.
    pub async fn index(&self) -> Result<Arc<SummaryIndex>, IndexError> {
        let data_dir = self.config.data_dir.clone();
        self.index.get_or_build(|| build_index(data_dir)).await
    }

    /// Non-blocking view of the index. Starts a background build when none is
    /// cached or running, and reports a finished build's failure exactly once.
    pub async fn poll_index(&self) -> IndexStatus {
        if let Some(index) = self.index.get() {
            return IndexStatus::Ready(index);
        }

        let mut slot = self.build.lock().await;
        match slot.take() {
            Some(task) if !task.is_finished() => {
                *slot = Some(task);
                IndexStatus::Building
            }
            Some(task) => match task.await {
                Ok(Ok(index)) => IndexStatus::Ready(index),
                Ok(Err(e)) => IndexStatus::Failed(e),
                Err(e) => IndexStatus::Failed(IndexError::Join(e)),
            },
            None => {
                let state = self.clone();
                *slot = Some(tokio::spawn(async move { state.index().await }));
                IndexStatus::Building
            }
        }
    }

    pub async fn query_engine(&self) -> Result<QueryEngine, IndexError> {
        Ok(
            QueryEngine::new(self.index().await?, Arc::clone(&self.llm))
                .with_system_prompt(self.config.llm.system_prompt.clone()),
        )
    }
}
