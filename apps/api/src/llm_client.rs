/// LLM Client — the single point of entry for all generation-service calls in Coverly.
///
/// ARCHITECTURAL RULE: No other module may call the completions API directly.
/// All LLM interactions MUST go through this module.
///
/// Model: gpt-4o (hardcoded — do not make configurable to prevent drift)
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

const COMPLETIONS_API_URL: &str = "https://api.openai.com/v1/chat/completions";
/// The model used for all LLM calls in Coverly.
/// This is intentionally hardcoded to prevent accidental drift.
pub const MODEL: &str = "gpt-4o";
const MAX_RETRIES: u32 = 3;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Rate limited after {retries} retries")]
    RateLimited { retries: u32 },

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// One fully assembled instruction for the generation service: a system role,
/// a user prompt, and the response mode. The credential travels separately —
/// it belongs to the authentication channel, never to the payload.
#[derive(Debug, Clone, Copy)]
pub struct CompletionRequest<'a> {
    pub system: &'a str,
    pub prompt: &'a str,
    pub temperature: f32,
    /// Request a schema-constrained JSON body instead of free text.
    pub json_response: bool,
}

/// Capability boundary to the generation service. Exactly one round trip per
/// call; every transport or service failure comes back as `LlmError`, never
/// as a panic. Carried in `AppState` as `Arc<dyn CompletionBackend>` so the
/// pipeline and its tests can substitute a deterministic stub.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    async fn complete(
        &self,
        api_key: &str,
        request: CompletionRequest<'_>,
    ) -> Result<String, LlmError>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f32,
    messages: Vec<ChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// The production backend: OpenAI-compatible chat completions over HTTPS,
/// with retry and exponential backoff on 429 and 5xx responses.
pub struct OpenAiBackend {
    client: Client,
}

impl OpenAiBackend {
    pub fn new() -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .build()
                .expect("Failed to build HTTP client"),
        }
    }
}

#[async_trait]
impl CompletionBackend for OpenAiBackend {
    async fn complete(
        &self,
        api_key: &str,
        request: CompletionRequest<'_>,
    ) -> Result<String, LlmError> {
        let body = ChatRequest {
            model: MODEL,
            temperature: request.temperature,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: request.system,
                },
                ChatMessage {
                    role: "user",
                    content: request.prompt,
                },
            ],
            response_format: request.json_response.then_some(ResponseFormat {
                format_type: "json_object",
            }),
        };

        let mut last_error: Option<LlmError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                // Exponential backoff: 1s, 2s
                let delay = std::time::Duration::from_millis(1000 * (1 << (attempt - 1)));
                warn!(
                    "Completion attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = self
                .client
                .post(COMPLETIONS_API_URL)
                .bearer_auth(api_key)
                .json(&body)
                .send()
                .await;

            let response = match response {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(LlmError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("Completions API returned {}: {}", status, body);
                last_error = Some(LlmError::Api {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                // Surface the service's own message when the error body parses
                let message = serde_json::from_str::<ApiError>(&body)
                    .map(|e| e.error.message)
                    .unwrap_or(body);
                return Err(LlmError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            let chat: ChatResponse = response.json().await?;

            if let Some(usage) = &chat.usage {
                debug!(
                    "Completion succeeded: prompt_tokens={}, completion_tokens={}",
                    usage.prompt_tokens, usage.completion_tokens
                );
            }

            return match chat
                .choices
                .into_iter()
                .next()
                .and_then(|choice| choice.message.content)
            {
                Some(text) if !text.is_empty() => Ok(text),
                _ => Err(LlmError::EmptyContent),
            };
        }

        Err(last_error.unwrap_or(LlmError::RateLimited {
            retries: MAX_RETRIES,
        }))
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
/// JSON mode makes fences unlikely, but a fenced payload should still decode.
pub fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_json_fences_with_json_tag() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_without_tag() {
        let input = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_no_fences() {
        let input = "{\"key\": \"value\"}";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_json_mode_flag_controls_response_format() {
        let with = ChatRequest {
            model: MODEL,
            temperature: 0.7,
            messages: vec![],
            response_format: true.then_some(ResponseFormat {
                format_type: "json_object",
            }),
        };
        let without = ChatRequest {
            model: MODEL,
            temperature: 0.7,
            messages: vec![],
            response_format: false.then_some(ResponseFormat {
                format_type: "json_object",
            }),
        };

        let with_json = serde_json::to_value(&with).unwrap();
        let without_json = serde_json::to_value(&without).unwrap();

        assert_eq!(with_json["response_format"]["type"], "json_object");
        assert!(without_json.get("response_format").is_none());
    }

    #[test]
    fn test_chat_response_extracts_first_choice() {
        let raw = r#"{
            "choices": [{"message": {"content": "Dear Hiring Manager,"}}],
            "usage": {"prompt_tokens": 100, "completion_tokens": 50}
        }"#;
        let parsed: ChatResponse = serde_json::from_str(raw).unwrap();
        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content);
        assert_eq!(content.as_deref(), Some("Dear Hiring Manager,"));
    }
}
