//! The API key gate. Runs before logging, config, or any I/O.

pub const API_KEY_VAR: &str = "OPENAI_API_KEY";

/// Exit status used when the key is missing.
pub const MISSING_KEY_EXIT_CODE: i32 = 1;

pub const REMEDIATION: &str = r#"
  You haven't set up your API key yet.

  If you don't have an API key yet, visit:

  https://platform.openai.com/signup

  1. Make an account or sign in
  2. Click "View API Keys" from the top right menu.
  3. Click "Create new secret key"

  Then, open the Secrets Tool and add OPENAI_API_KEY as a secret.
  "#;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("OPENAI_API_KEY is not set")]
pub struct MissingApiKey;

/// Succeeds if the variable is present. Its value is not inspected, so an
/// empty or non-UTF-8 value still counts as set.
pub fn check_api_key(is_set: impl Fn(&str) -> bool) -> Result<(), MissingApiKey> {
    if is_set(API_KEY_VAR) {
        Ok(())
    } else {
        Err(MissingApiKey)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key() {
        assert_eq!(check_api_key(|_| false), Err(MissingApiKey));
    }

    #[test]
    fn test_present_key() {
        assert_eq!(check_api_key(|name| name == API_KEY_VAR), Ok(()));
    }

    #[test]
    fn test_only_the_openai_variable_counts() {
        assert!(check_api_key(|name| name == "LLM_API_KEY").is_err());
    }

    #[test]
    fn test_remediation_mentions_signup_and_variable() {
        assert!(REMEDIATION.contains("https://platform.openai.com/signup"));
        assert!(REMEDIATION.contains("add OPENAI_API_KEY as a secret"));
        assert!(REMEDIATION.lines().count() > 5);
    }
}
