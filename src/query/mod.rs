//! Query engine over a [`SummaryIndex`].

pub mod prompt;
pub mod tree_summarize;

use std::sync::Arc;

use crate::chunking::CHARS_PER_TOKEN;
use crate::config::DEFAULT_SYSTEM_PROMPT;
use crate::error::QueryError;
use crate::index::SummaryIndex;
use crate::llm::LanguageModel;
use crate::models::Answer;

use prompt::summary_prompt;
use tree_summarize::tree_summarize;

/// Context window of the default model, in tokens.
pub const CONTEXT_WINDOW_TOKENS: usize = 4096;
/// Tokens held back for the model's reply.
pub const NUM_OUTPUT_TOKENS: usize = 256;
const PADDING_TOKENS: usize = 5;
/// Floor for the packing budget so very long queries still make progress.
const MIN_PACKING_CHARS: usize = 256;

pub const EMPTY_RESPONSE: &str = "Empty Response";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseMode {
    #[default]
    TreeSummarize,
}

#[derive(Clone)]
pub struct QueryEngine {
    index: Arc<SummaryIndex>,
    llm: Arc<dyn LanguageModel>,
    system_prompt: String,
    mode: ResponseMode,
    packing_budget: Option<usize>,
}

impl QueryEngine {
    pub fn new(index: Arc<SummaryIndex>, llm: Arc<dyn LanguageModel>) -> Self {
        Self {
            index,
            llm,
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            mode: ResponseMode::default(),
            packing_budget: None,
        }
    }

    /// System message sent with every completion call.
    pub fn with_system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = system_prompt.into();
        self
    }

    pub fn with_response_mode(mut self, mode: ResponseMode) -> Self {
        self.mode = mode;
        self
    }

    /// Fix the per-call context size in characters instead of deriving it
    /// from the context window.
    pub fn with_packing_budget(mut self, chars: usize) -> Self {
        self.packing_budget = Some(chars);
        self
    }

    /// Answer `query` from every node in the index. The query is forwarded as
    /// given, and nothing is cached between calls.
    pub async fn query(&self, query: &str) -> Result<Answer, QueryError> {
        let nodes = self.index.nodes();
        if nodes.is_empty() {
            return Ok(Answer {
                text: EMPTY_RESPONSE.to_string(),
                llm_calls: 0,
            });
        }

        let system_prompt = self.system_prompt.as_str();
        let budget = self
            .packing_budget
            .unwrap_or_else(|| packing_budget(system_prompt, query));
        let texts = nodes.iter().map(|n| n.text.clone()).collect();

        tracing::info!(
            query_len = query.len(),
            nodes = nodes.len(),
            budget,
            "Running query"
        );

        let answer = match self.mode {
            ResponseMode::TreeSummarize => {
                tree_summarize(self.llm.as_ref(), system_prompt, query, texts, budget).await?
            }
        };

        tracing::info!(llm_calls = answer.llm_calls, "Query answered");
        Ok(answer)
    }
}

/// Characters of context that fit in one call next to the prompt template,
/// the system prompt, and the reserved output.
pub fn packing_budget(system_prompt: &str, query: &str) -> usize {
    let available = (CONTEXT_WINDOW_TOKENS - NUM_OUTPUT_TOKENS - PADDING_TOKENS) * CHARS_PER_TOKEN;
    let overhead = summary_prompt("", query).chars().count() + system_prompt.chars().count();
    available.saturating_sub(overhead).max(MIN_PACKING_CHARS)
}
