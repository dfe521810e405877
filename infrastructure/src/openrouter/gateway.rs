//! OpenRouter gateway
//!
//! Implements [`CompletionGateway`] against any OpenAI-compatible
//! `/chat/completions` endpoint. The rolling history is replayed as chat
//! messages: the calling agent's own entries become `assistant` turns, every
//! other speaker becomes a `user` turn prefixed with its name.

use super::types::{ApiError, ChatMessage, ChatRequest, ChatResponse, ChatUsage};
use crate::config::{DEFAULT_BASE_URL, FileGatewayConfig};
use agora_application::{Completion, CompletionGateway, CompletionRequest, GatewayError};
use agora_domain::{TokenUsage, mask_api_key};
use async_trait::async_trait;
use reqwest::Client;
use std::fmt;
use tracing::{debug, warn};

const MAX_ERROR_LEN: usize = 300;

/// OpenRouter gateway configuration
#[derive(Clone)]
pub struct OpenRouterConfig {
    /// Base URL, without the `/chat/completions` suffix
    pub base_url: String,
    /// Key used for agents that have none of their own
    pub fallback_api_key: Option<String>,
    pub max_tokens: Option<u32>,
}

impl fmt::Debug for OpenRouterConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenRouterConfig")
            .field("base_url", &self.base_url)
            .field(
                "fallback_api_key",
                &self.fallback_api_key.as_deref().map(mask_api_key),
            )
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}

impl Default for OpenRouterConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            fallback_api_key: None,
            max_tokens: None,
        }
    }
}

impl OpenRouterConfig {
    pub fn from_file_config(config: &FileGatewayConfig) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            fallback_api_key: config.resolve_api_key(),
            max_tokens: config.max_tokens,
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_fallback_api_key(mut self, key: impl Into<String>) -> Self {
        self.fallback_api_key = Some(key.into());
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

/// Completion gateway for OpenRouter and other OpenAI-compatible APIs
pub struct OpenRouterGateway {
    client: Client,
    config: OpenRouterConfig,
}

impl OpenRouterGateway {
    /// Create a new gateway.
    ///
    /// No client-side timeout is set; the orchestrator bounds each call.
    pub fn new(config: OpenRouterConfig) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .build()
            .map_err(|e| GatewayError::Other(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &OpenRouterConfig {
        &self.config
    }

    fn api_key_for<'a>(&'a self, request: &'a CompletionRequest) -> Result<&'a str, GatewayError> {
        if !request.api_key.is_empty() {
            return Ok(&request.api_key);
        }
        self.config
            .fallback_api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| GatewayError::MissingApiKey(request.agent.clone()))
    }

    fn build_request(&self, request: &CompletionRequest) -> ChatRequest {
        ChatRequest {
            model: request.model.as_str().to_string(),
            messages: build_messages(request),
            max_tokens: self.config.max_tokens,
        }
    }
}

#[async_trait]
impl CompletionGateway for OpenRouterGateway {
    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, GatewayError> {
        let api_key = self.api_key_for(request)?;
        let body = self.build_request(request);

        debug!(
            "POST {} model={} messages={}",
            self.config.endpoint(),
            body.model,
            body.messages.len()
        );

        let response = self
            .client
            .post(self.config.endpoint())
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(map_send_error)?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| GatewayError::RequestFailed(e.to_string()))?;

        if !status.is_success() {
            let message = serde_json::from_str::<ApiError>(&text)
                .map(|e| e.error.message)
                .unwrap_or(text);
            return Err(GatewayError::Http {
                status: status.as_u16(),
                message: sanitize_api_error(&message),
            });
        }

        parse_response(&text)
    }
}

/// Chat messages for one call: system prompt, replayed history, then the prompt
fn build_messages(request: &CompletionRequest) -> Vec<ChatMessage> {
    let mut messages = Vec::with_capacity(request.history.len() + 2);

    if !request.system_prompt.is_empty() {
        messages.push(ChatMessage::new("system", &request.system_prompt));
    }

    for entry in &request.history {
        if entry.role == request.agent {
            messages.push(ChatMessage::new("assistant", &entry.content));
        } else {
            messages.push(ChatMessage::new(
                "user",
                format!("{}: {}", entry.role, entry.content),
            ));
        }
    }

    messages.push(ChatMessage::new("user", &request.prompt));
    messages
}

fn parse_response(text: &str) -> Result<Completion, GatewayError> {
    let response: ChatResponse =
        serde_json::from_str(text).map_err(|e| GatewayError::InvalidResponse(e.to_string()))?;

    let content = response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message)
        .and_then(|message| message.content)
        .unwrap_or_default();

    let usage = response.usage.map(|u| to_token_usage(&u));
    Ok(Completion { content, usage })
}

fn to_token_usage(usage: &ChatUsage) -> TokenUsage {
    TokenUsage::new(
        clamp_tokens("prompt_tokens", usage.prompt_tokens),
        clamp_tokens("completion_tokens", usage.completion_tokens),
    )
}

/// Missing counts become 0; negative counts are clamped to 0
fn clamp_tokens(field: &str, value: Option<i64>) -> u64 {
    match value {
        Some(n) if n < 0 => {
            warn!("Provider reported negative {} ({}), using 0", field, n);
            0
        }
        Some(n) => n as u64,
        None => 0,
    }
}

fn map_send_error(e: reqwest::Error) -> GatewayError {
    if e.is_connect() {
        GatewayError::Connection(e.to_string())
    } else {
        GatewayError::RequestFailed(e.to_string())
    }
}

/// Keep provider errors short and free of credential hints
fn sanitize_api_error(error: &str) -> String {
    let lower = error.to_lowercase();

    if lower.contains("api key")
        || lower.contains("unauthorized")
        || lower.contains("authentication")
    {
        return "API authentication error. Please check the agent's API key.".to_string();
    }

    if lower.contains("rate limit") || lower.contains("quota") {
        return "API rate limit exceeded. Please try again later.".to_string();
    }

    if error.chars().count() > MAX_ERROR_LEN {
        let head: String = error.chars().take(MAX_ERROR_LEN).collect();
        format!("{}...(truncated)", head)
    } else {
        error.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agora_domain::{Agent, HistoryEntry};

    fn request(history: Vec<HistoryEntry>) -> CompletionRequest {
        let agent = Agent::new("Ada", "sk-ada", "openai/gpt-4o-mini", "Argue for.");
        CompletionRequest::for_agent(&agent, "Your rebuttal?", history)
    }

    #[test]
    fn test_build_messages_maps_roles() {
        let messages = build_messages(&request(vec![
            HistoryEntry::new("Ada", "Remote work boosts focus."),
            HistoryEntry::new("Bob", "It hurts mentoring."),
        ]));

        assert_eq!(
            messages,
            vec![
                ChatMessage::new("system", "Argue for."),
                ChatMessage::new("assistant", "Remote work boosts focus."),
                ChatMessage::new("user", "Bob: It hurts mentoring."),
                ChatMessage::new("user", "Your rebuttal?"),
            ]
        );
    }

    #[test]
    fn test_build_messages_skips_empty_system_prompt() {
        let agent = Agent::new("Ada", "k", "m", "");
        let messages = build_messages(&CompletionRequest::for_agent(&agent, "hi", vec![]));
        assert_eq!(messages, vec![ChatMessage::new("user", "hi")]);
    }

    #[test]
    fn test_parse_response() {
        let completion = parse_response(
            r#"{
                "id": "gen-1",
                "choices": [{"index": 0, "message": {"role": "assistant", "content": "Hello"}}],
                "usage": {"prompt_tokens": 12, "completion_tokens": 3, "total_tokens": 15}
            }"#,
        )
        .unwrap();
        assert_eq!(completion.content, "Hello");
        assert_eq!(completion.usage, Some(TokenUsage::new(12, 3)));
    }

    #[test]
    fn test_parse_response_defaults() {
        let completion = parse_response(r#"{"choices": []}"#).unwrap();
        assert_eq!(completion.content, "");
        assert_eq!(completion.usage, None);

        let completion = parse_response(
            r#"{"choices": [{"message": {"role": "assistant", "content": null}}],
                "usage": {"prompt_tokens": 4}}"#,
        )
        .unwrap();
        assert_eq!(completion.content, "");
        assert_eq!(completion.usage, Some(TokenUsage::new(4, 0)));
    }

    #[test]
    fn test_parse_response_clamps_negative_counts() {
        let completion = parse_response(
            r#"{"choices": [], "usage": {"prompt_tokens": -5, "completion_tokens": 7}}"#,
        )
        .unwrap();
        assert_eq!(completion.usage, Some(TokenUsage::new(0, 7)));
    }

    #[test]
    fn test_parse_response_rejects_garbage() {
        let err = parse_response("<html>bad gateway</html>").unwrap_err();
        assert!(matches!(err, GatewayError::InvalidResponse(_)));
    }

    #[test]
    fn test_api_key_fallback() {
        let gateway = OpenRouterGateway::new(OpenRouterConfig::default()).unwrap();
        let agent = Agent::new("Nobody", "", "m", "");
        let keyless = CompletionRequest::for_agent(&agent, "hi", vec![]);
        assert_eq!(
            gateway.api_key_for(&keyless),
            Err(GatewayError::MissingApiKey("Nobody".to_string()))
        );

        let gateway = OpenRouterGateway::new(
            OpenRouterConfig::default().with_fallback_api_key("sk-shared"),
        )
        .unwrap();
        assert_eq!(gateway.api_key_for(&keyless), Ok("sk-shared"));
        assert_eq!(gateway.api_key_for(&request(vec![])), Ok("sk-ada"));
    }

    #[test]
    fn test_endpoint_and_debug_masking() {
        let config = OpenRouterConfig::default()
            .with_base_url("http://localhost:8080/v1/")
            .with_fallback_api_key("sk-or-v1-abcdefgh12345678");
        assert_eq!(config.endpoint(), "http://localhost:8080/v1/chat/completions");
        let debug = format!("{:?}", config);
        assert!(!debug.contains("abcdefgh12345678"));
    }

    #[test]
    fn test_sanitize_api_error() {
        assert!(sanitize_api_error("Invalid API key provided").contains("authentication"));
        assert!(sanitize_api_error("Rate limit reached").contains("rate limit"));
        assert_eq!(sanitize_api_error("model not found"), "model not found");
        assert!(sanitize_api_error(&"x".repeat(400)).ends_with("...(truncated)"));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_connection_error() {
        let gateway = OpenRouterGateway::new(
            OpenRouterConfig::default().with_base_url("http://127.0.0.1:9"),
        )
        .unwrap();
        let err = gateway.complete(&request(vec![])).await.unwrap_err();
        assert!(matches!(
            err,
            GatewayError::Connection(_) | GatewayError::RequestFailed(_)
        ));
    }
}
