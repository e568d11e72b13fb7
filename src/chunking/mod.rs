//! Text chunking: node splitting at index time and prompt repacking at query time.
//!
//! Four-tier splitting strategy:
//! 1. Split at blank lines (natural paragraph boundaries)
//! 2. If a paragraph is too large, split at single newlines
//! 3. If a line is still too large, split at sentence ends
//! 4. Last resort: split at character boundary
//!
//! The resulting pieces are then merged greedily up to the character budget.

mod splitter;

use splitter::{merge, pieces, PARAGRAPH_SEP};

/// Rough characters-per-token ratio used to turn token budgets into char budgets.
pub const CHARS_PER_TOKEN: usize = 4;

/// Node size used when building the index (1024 tokens).
pub const NODE_CHUNK_CHARS: usize = 1024 * CHARS_PER_TOKEN;

/// Overlap carried between consecutive nodes (20 tokens).
pub const NODE_OVERLAP_CHARS: usize = 20 * CHARS_PER_TOKEN;

/// Output of the splitting process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextSplit {
    pub content: String,
    /// 1-based start line in the original text.
    pub start_line: usize,
    /// 1-based end line in the original text.
    pub end_line: usize,
}

/// Split `text` into chunks of at most `budget` characters, carrying up to
/// `overlap` characters of trailing pieces into the next chunk.
pub fn split_text(text: &str, budget: usize, overlap: usize) -> Vec<TextSplit> {
    if text.trim().is_empty() {
        return Vec::new();
    }
    let budget = budget.max(1);
    merge(pieces(text, budget), budget, overlap)
}

/// Pack `texts` into as few chunks as possible, each at most `budget`
/// characters. Texts are joined with a blank line; a text over the budget is
/// split. A non-empty input always yields at least one chunk.
pub fn repack(texts: &[String], budget: usize) -> Vec<String> {
    let budget = budget.max(1);
    let mut all = Vec::new();
    for text in texts {
        let mut split = pieces(text, budget);
        if let Some(first) = split.first_mut() {
            first.sep = PARAGRAPH_SEP;
        }
        all.extend(split);
    }

    let mut packed: Vec<String> = merge(all, budget, 0)
        .into_iter()
        .map(|s| s.content)
        .collect();
    if packed.is_empty() && !texts.is_empty() {
        packed.push(String::new());
    }
    packed
}
