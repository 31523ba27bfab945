use super::TextGenerator;
use crate::config::Config;
use crate::log_debug;
use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Connection settings for the Gemini API
#[derive(Clone, Default)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub model: String,
    /// Base URL, without the `/models/...` suffix
    pub api_base: String,
}

impl From<&Config> for GeminiConfig {
    fn from(config: &Config) -> Self {
        Self {
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            api_base: GEMINI_API_BASE.to_string(),
        }
    }
}

/// Represents the Gemini `generateContent` endpoint
pub struct GeminiProvider {
    config: GeminiConfig,
    client: Client,
}

impl GeminiProvider {
    /// Creates a new instance of `GeminiProvider` with the given configuration.
    ///
    /// The client has no timeout; a request blocks until the service answers
    /// or the transport fails.
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    /// Creates a provider that sends requests through `client`
    pub fn with_client(config: GeminiConfig, client: Client) -> Self {
        Self { config, client }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.api_base.trim_end_matches('/'),
            self.config.model
        )
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    system_instruction: Content<'a>,
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

impl<'a> GenerateContentRequest<'a> {
    fn new(system_instruction: &'a str, prompt: &'a str) -> Self {
        Self {
            system_instruction: Content {
                role: None,
                parts: vec![Part {
                    text: system_instruction,
                }],
            },
            contents: vec![Content {
                role: Some("user"),
                parts: vec![Part { text: prompt }],
            }],
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate
    fn text(&self) -> Option<String> {
        let parts = &self.candidates.first()?.content.as_ref()?.parts;
        let texts: Vec<&str> = parts.iter().filter_map(|p| p.text.as_deref()).collect();
        if texts.is_empty() {
            None
        } else {
            Some(texts.concat())
        }
    }
}

#[async_trait]
impl TextGenerator for GeminiProvider {
    /// Generates a message using the Gemini API
    async fn generate_message(&self, system_instruction: &str, prompt: &str) -> Result<String> {
        let request_body = GenerateContentRequest::new(system_instruction, prompt);

        log_debug!(
            "Sending generateContent request to model {} ({} prompt chars)",
            self.config.model,
            prompt.chars().count()
        );
        tracing::debug!(model = %self.config.model, "gemini request");

        let mut request = self
            .client
            .post(self.endpoint())
            .header("Content-Type", "application/json")
            .json(&request_body);

        // The key goes in a header so it can never show up in a URL-bearing error
        if let Some(api_key) = &self.config.api_key {
            request = request.header("x-goog-api-key", api_key);
        }

        let response = request
            .send()
            .await
            .context("Failed to reach the Gemini API")?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(anyhow!(
                "Gemini API request failed with status {}: {}",
                status,
                text
            ));
        }

        let response_body: GenerateContentResponse = response
            .json()
            .await
            .context("Failed to decode Gemini API response")?;

        let content = response_body
            .text()
            .ok_or_else(|| anyhow!("Failed to extract content from Gemini API response"))?;

        log_debug!("Received {} chars from Gemini", content.chars().count());
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_body_shape() {
        let body = GenerateContentRequest::new("be terse", "write notes");
        let value = serde_json::to_value(&body).expect("request should serialize");

        assert_eq!(
            value,
            json!({
                "systemInstruction": { "parts": [{ "text": "be terse" }] },
                "contents": [
                    { "role": "user", "parts": [{ "text": "write notes" }] }
                ]
            })
        );
    }

    #[test]
    fn test_response_text_concatenates_parts() {
        let body: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [
                {
                    "content": {
                        "role": "model",
                        "parts": [{ "text": "## 🚀 Features\n" }, { "text": "- Login" }]
                    },
                    "finishReason": "STOP"
                },
                { "content": { "parts": [{ "text": "ignored" }] } }
            ],
            "usageMetadata": { "totalTokenCount": 42 }
        }))
        .expect("response should parse");

        assert_eq!(body.text().as_deref(), Some("## 🚀 Features\n- Login"));
    }

    #[test]
    fn test_response_without_text() {
        let empty: GenerateContentResponse =
            serde_json::from_value(json!({})).expect("empty response should parse");
        assert!(empty.text().is_none());

        let blocked: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{ "finishReason": "SAFETY" }]
        }))
        .expect("blocked response should parse");
        assert!(blocked.text().is_none());
    }

    #[test]
    fn test_endpoint_uses_model() {
        let provider = GeminiProvider::new(GeminiConfig {
            api_key: None,
            model: "gemini-2.5-flash".to_string(),
            api_base: format!("{GEMINI_API_BASE}/"),
        });

        assert_eq!(
            provider.endpoint(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }
}
