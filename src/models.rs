use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A file read from the corpus directory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Path relative to the corpus root, `/`-separated
    pub file_path: String,
    pub file_name: String,
    pub file_size: u64,
    pub last_modified: Option<DateTime<Utc>>,
    pub text: String,
}

/// A contiguous slice of one document, the unit the index stores
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    /// Position of the source document in load order
    pub doc_index: usize,
    pub chunk_index: usize,
    pub text: String,
    /// 1-based start line in the source document.
    pub start_line: usize,
    /// 1-based end line in the source document.
    pub end_line: usize,
}

/// Generated answer for one query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    pub text: String,
    /// Number of completion calls spent producing it
    pub llm_calls: usize,
}

impl std::fmt::Display for Answer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

/// Form body posted by the page
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QueryForm {
    #[serde(default)]
    pub query: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answer_displays_text_only() {
        let answer = Answer {
            text: "The sky is blue.".into(),
            llm_calls: 1,
        };
        assert_eq!(format!("Answer: {answer}"), "Answer: The sky is blue.");
    }

    #[test]
    fn test_query_form_missing_field_is_empty() {
        let form: QueryForm = serde_json::from_str("{}").unwrap();
        assert_eq!(form.query, "");
    }
}
