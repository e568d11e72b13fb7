use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_SYSTEM_PROMPT: &str =
    "You are an AI assistant that answers questions about Paul Graham's essay.";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding the essay, read recursively
    pub data_dir: PathBuf,
    /// Server bind address
    pub bind_addr: String,
    /// LLM provider configuration
    pub llm: LlmConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// "openai" or "ollama"
    pub provider: String,
    /// Base URL for the LLM API
    pub base_url: String,
    /// Model name used for every summarization call
    pub chat_model: String,
    /// Sampling temperature
    pub temperature: f32,
    /// Sent as the system message on every call
    pub system_prompt: String,
    /// API key (required for the openai provider)
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            bind_addr: "127.0.0.1:8501".to_string(),
            llm: LlmConfig::default(),
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            base_url: "https://api.openai.com".to_string(),
            chat_model: "gpt-3.5-turbo".to_string(),
            temperature: 0.1,
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            api_key: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| {
            std::env::var_os(key).map(|val| val.to_string_lossy().into_owned())
        })
    }

    /// Build a config from an arbitrary variable source, starting from defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(dir) = lookup("ESSAY_QA_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(addr) = lookup("ESSAY_QA_BIND_ADDR") {
            config.bind_addr = addr;
        }
        if let Some(provider) = lookup("LLM_PROVIDER") {
            config.llm.provider = provider;
        }
        if let Some(url) = lookup("LLM_BASE_URL") {
            config.llm.base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(model) = lookup("LLM_CHAT_MODEL") {
            config.llm.chat_model = model;
        }
        if let Some(val) = lookup("LLM_TEMPERATURE") {
            if let Ok(t) = val.parse() {
                config.llm.temperature = t;
            }
        }
        if let Some(key) = lookup(crate::credentials::API_KEY_VAR) {
            config.llm.api_key = Some(key);
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_match_original_script() {
        let config = Config::from_lookup(|_| None);
        assert_eq!(config.data_dir, PathBuf::from("./data"));
        assert_eq!(config.llm.chat_model, "gpt-3.5-turbo");
        assert!((config.llm.temperature - 0.1).abs() < f32::EPSILON);
        assert_eq!(config.llm.system_prompt, DEFAULT_SYSTEM_PROMPT);
        assert!(config.llm.api_key.is_none());
    }

    #[test]
    fn test_env_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("ESSAY_QA_DATA_DIR", "/srv/essay"),
            ("ESSAY_QA_BIND_ADDR", "0.0.0.0:80"),
            ("LLM_PROVIDER", "ollama"),
            ("LLM_BASE_URL", "http://localhost:11434/"),
            ("LLM_CHAT_MODEL", "llama3.2"),
            ("LLM_TEMPERATURE", "0.7"),
            ("OPENAI_API_KEY", "sk-test"),
        ]));
        assert_eq!(config.data_dir, PathBuf::from("/srv/essay"));
        assert_eq!(config.bind_addr, "0.0.0.0:80");
        assert_eq!(config.llm.provider, "ollama");
        assert_eq!(config.llm.base_url, "http://localhost:11434");
        assert_eq!(config.llm.chat_model, "llama3.2");
        assert!((config.llm.temperature - 0.7).abs() < f32::EPSILON);
        assert_eq!(config.llm.api_key.as_deref(), Some("sk-test"));
    }

    #[test]
    fn test_bad_temperature_keeps_default() {
        let config = Config::from_lookup(lookup_from(&[("LLM_TEMPERATURE", "warm")]));
        assert!((config.llm.temperature - 0.1).abs() < f32::EPSILON);
    }

    #[test]
    fn test_api_key_not_serialized() {
        let mut config = Config::default();
        config.llm.api_key = Some("sk-secret".into());
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("sk-secret"));
    }
}
