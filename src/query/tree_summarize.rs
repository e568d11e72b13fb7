//! Hierarchical summarize-then-combine synthesis.
//!
//! ```text
//!   texts ──► repack ──► 1 chunk?  ── yes ──► one call ──► answer
//!                │
//!                no
//!                ▼
//!        summarize each chunk (sequential)
//!                │
//!                └──────► summaries become the next level's texts
//! ```

use crate::chunking::repack;
use crate::error::QueryError;
use crate::llm::LanguageModel;
use crate::models::Answer;

use super::prompt::summary_prompt;

/// Levels allowed before giving up on a tree that does not shrink.
pub const MAX_TREE_DEPTH: usize = 8;

pub async fn tree_summarize(
    llm: &dyn LanguageModel,
    system_prompt: &str,
    query: &str,
    texts: Vec<String>,
    budget: usize,
) -> Result<Answer, QueryError> {
    let mut llm_calls = 0usize;
    let mut texts = texts;

    for level in 0..MAX_TREE_DEPTH {
        let chunks = repack(&texts, budget);

        if chunks.len() == 1 {
            let text = llm
                .complete(system_prompt, &summary_prompt(&chunks[0], query))
                .await?;
            llm_calls += 1;
            return Ok(Answer { text, llm_calls });
        }

        tracing::debug!(level, chunks = chunks.len(), "summarizing tree level");

        let mut summaries = Vec::with_capacity(chunks.len());
        for chunk in &chunks {
            summaries.push(
                llm.complete(system_prompt, &summary_prompt(chunk, query))
                    .await?,
            );
            llm_calls += 1;
        }
        texts = summaries;
    }

    Err(QueryError::TreeDepthExceeded(MAX_TREE_DEPTH))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use anyhow::Result;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Records every prompt and answers with a fixed reply.
    pub(crate) struct FixedLlm {
        pub reply: String,
        pub prompts: Mutex<Vec<(String, String)>>,
    }

    impl FixedLlm {
        pub(crate) fn new(reply: &str) -> Self {
            Self {
                reply: reply.to_string(),
                prompts: Mutex::new(Vec::new()),
            }
        }

        pub(crate) fn calls(&self) -> usize {
            self.prompts.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl LanguageModel for FixedLlm {
        async fn complete(&self, system_prompt: &str, prompt: &str) -> Result<String> {
            self.prompts
                .lock()
                .unwrap()
                .push((system_prompt.to_string(), prompt.to_string()));
            Ok(self.reply.clone())
        }
    }

    struct FailingLlm;

    #[async_trait]
    impl LanguageModel for FailingLlm {
        async fn complete(&self, _: &str, _: &str) -> Result<String> {
            anyhow::bail!("connection refused")
        }
    }

    #[tokio::test]
    async fn test_single_chunk_is_one_call() {
        let llm = FixedLlm::new("The sky is blue.");
        let answer = tree_summarize(&llm, "sys", "What color?", vec!["The sky is blue.".into()], 1000)
            .await
            .unwrap();

        assert_eq!(answer.text, "The sky is blue.");
        assert_eq!(answer.llm_calls, 1);
        let prompts = llm.prompts.lock().unwrap();
        assert_eq!(prompts[0].0, "sys");
        assert!(prompts[0].1.contains("The sky is blue."));
        assert!(prompts[0].1.contains("Query: What color?"));
    }

    #[tokio::test]
    async fn test_small_nodes_are_packed_together() {
        let llm = FixedLlm::new("ok");
        let texts = vec!["one".to_string(), "two".to_string(), "three".to_string()];
        let answer = tree_summarize(&llm, "sys", "q", texts, 1000).await.unwrap();

        assert_eq!(answer.llm_calls, 1);
        let prompts = llm.prompts.lock().unwrap();
        assert!(prompts[0].1.contains("one\n\ntwo\n\nthree"));
    }

    #[tokio::test]
    async fn test_two_level_tree() {
        // Four 40-char texts with a 50-char budget: four leaf calls, then one
        // combining call over the short summaries.
        let llm = FixedLlm::new("s");
        let texts: Vec<String> = (0..4).map(|i| format!("{i}").repeat(40)).collect();
        let answer = tree_summarize(&llm, "sys", "q", texts, 50).await.unwrap();

        assert_eq!(answer.llm_calls, 5);
        assert_eq!(llm.calls(), 5);
        let prompts = llm.prompts.lock().unwrap();
        assert!(prompts[4].1.contains("s\n\ns\n\ns\n\ns"));
    }

    #[tokio::test]
    async fn test_non_shrinking_tree_stops() {
        let llm = FixedLlm::new(&"y".repeat(50));
        let texts = vec!["a".repeat(50), "b".repeat(50)];
        let err = tree_summarize(&llm, "sys", "q", texts, 50).await.unwrap_err();

        assert!(matches!(err, QueryError::TreeDepthExceeded(MAX_TREE_DEPTH)));
        assert_eq!(llm.calls(), 2 * MAX_TREE_DEPTH);
    }

    #[tokio::test]
    async fn test_llm_failure_propagates() {
        let err = tree_summarize(&FailingLlm, "sys", "q", vec!["text".into()], 100)
            .await
            .unwrap_err();
        assert!(matches!(err, QueryError::Llm(_)));
        assert!(err.to_string().contains("connection refused"));
    }
}
