//! Settings types with compiled defaults.

use serde::{Deserialize, Serialize};

/// Container for all gloss settings.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GlossSettings {
    /// Chat-completion endpoint settings.
    pub api: ApiSettings,
}

/// Endpoint, model, and credential settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiSettings {
    /// Full chat-completions URL.
    pub endpoint: String,
    /// Model identifier.
    pub model: String,
    /// Bearer token; empty means not configured.
    pub api_key: String,
    /// Sampling temperature.
    pub temperature: f32,
    /// Whole-request deadline in milliseconds.
    pub timeout_ms: u64,
    /// Overrides the built-in system prompt when set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            endpoint: "https://api.openai.com/v1/chat/completions".to_string(),
            model: "gpt-4o-mini".to_string(),
            api_key: String::new(),
            temperature: 0.2,
            timeout_ms: 30_000,
            system_prompt: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_have_no_credential() {
        let settings = GlossSettings::default();
        assert!(settings.api.api_key.is_empty());
        assert!(settings.api.endpoint.ends_with("/chat/completions"));
        assert_eq!(settings.api.timeout_ms, 30_000);
    }

    #[test]
    fn partial_file_fills_missing_fields_from_defaults() {
        let settings: GlossSettings =
            serde_json::from_str(r#"{"api":{"apiKey":"sk-test"}}"#).unwrap();
        assert_eq!(settings.api.api_key, "sk-test");
        assert_eq!(settings.api.model, "gpt-4o-mini");
    }

    #[test]
    fn camel_case_keys_on_the_wire() {
        let v = serde_json::to_value(GlossSettings::default()).unwrap();
        assert!(v["api"].get("apiKey").is_some());
        assert!(v["api"].get("timeoutMs").is_some());
        assert!(v["api"].get("systemPrompt").is_none());
    }
}
