/// Tree-summarize template: used for every leaf and every combining call.
pub const SUMMARY_TEMPLATE: &str = "Context information from multiple sources is below.\n\
---------------------\n\
{context_str}\n\
---------------------\n\
Given the information from multiple sources and not prior knowledge, answer the query.\n\
Query: {query_str}\n\
Answer: ";

pub fn summary_prompt(context: &str, query: &str) -> String {
    // Substitute the query last so braces in the context are never re-expanded
    let (head, tail) = SUMMARY_TEMPLATE
        .split_once("{context_str}")
        .unwrap_or((SUMMARY_TEMPLATE, ""));
    format!("{head}{context}{}", tail.replacen("{query_str}", query, 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_prompt_layout() {
        let prompt = summary_prompt("The sky is blue.", "What color is the sky?");
        assert_eq!(
            prompt,
            "Context information from multiple sources is below.\n\
             ---------------------\n\
             The sky is blue.\n\
             ---------------------\n\
             Given the information from multiple sources and not prior knowledge, answer the query.\n\
             Query: What color is the sky?\n\
             Answer: "
        );
    }

    #[test]
    fn test_placeholders_in_context_are_literal() {
        let prompt = summary_prompt("see {query_str}", "q");
        assert!(prompt.contains("see {query_str}"));
        assert!(prompt.contains("Query: q\n"));
    }

    #[test]
    fn test_empty_query_is_kept() {
        let prompt = summary_prompt("ctx", "");
        assert!(prompt.ends_with("Query: \nAnswer: "));
    }
}
