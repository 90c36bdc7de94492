//! Personalized AI adoption roadmaps from four questionnaire answers.
//!
//! `waymark-rs` is the roadmap content engine: it asks a generative backend
//! (the [OpenRouter](https://openrouter.ai/) chat completions API with a
//! strict JSON output schema) for a custom roadmap, and falls back to a
//! hand-written blueprint whenever the backend is unavailable or returns
//! anything that does not conform to the roadmap schema. Callers always get
//! a complete [`RoadmapData`](schema::RoadmapData) or, only when fallback has
//! been switched off, an explicit [`ResolveError`](error::ResolveError).
//!
//! # Getting started
//!
//! ```ignore
//! use waymark_rs::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), String> {
//!     let config = RoadmapConfig::from_env();
//!     let resolver = config.build_resolver(&Credential::from_env())?;
//!
//!     let responses = UserResponses::new(
//!         "Freelancer",
//!         "Content & marketing",
//!         "New to AI",
//!         "Save time",
//!     );
//!     let resolution = resolver.generate(&responses).await.map_err(|e| e.to_string())?;
//!     println!("{}", render_markdown(&resolution.roadmap, &responses, RenderTier::Both));
//!     Ok(())
//! }
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`schema`] | Dual-tier data model and the conformance predicate |
//! | [`blueprints`] | [`FocusArea`](blueprints::FocusArea) and the local blueprint table |
//! | [`prompt`] | Versioned [`PromptTemplate`](prompt::PromptTemplate) and strict output schema |
//! | [`backend`] | [`RoadmapBackend`](backend::RoadmapBackend) seam and the OpenRouter implementation |
//! | [`resolver`] | [`RoadmapResolver`](resolver::RoadmapResolver): credential gate, generation, fallback |
//! | [`config`] | [`RoadmapConfig`](config::RoadmapConfig) defaults and environment overrides |
//! | [`questionnaire`] | Question wording and answer vocabulary |
//! | [`render`] | Markdown rendering at preview or comprehensive depth |

pub mod backend;
pub mod blueprints;
pub mod config;
pub mod error;
pub mod prelude;
pub mod prompt;
pub mod questionnaire;
pub mod render;
pub mod resolver;
pub mod schema;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, trace};

use crate::error::GenerationFailure;

// Re-export schemars for downstream crates.
pub use schemars;

// ── Constants ──────────────────────────────────────────────────────

pub const OPENROUTER_URL: &str = "https://openrouter.ai/api/v1/chat/completions";

/// Default model for roadmap generation.
pub const DEFAULT_MODEL: &str = "google/gemini-3-pro-preview";

// ── Schema generation ──────────────────────────────────────────────

/// Generate a JSON Schema `serde_json::Value` from a type that implements
/// `schemars::JsonSchema`.
///
/// # Example
///
/// ```
/// use waymark_rs::json_schema_for;
/// use waymark_rs::schema::RoadmapSection;
///
/// let schema = json_schema_for::<RoadmapSection>();
/// assert_eq!(schema["type"], "object");
/// assert!(schema["required"].as_array().unwrap().contains(&"preview".into()));
/// ```
pub fn json_schema_for<T: JsonSchema>() -> serde_json::Value {
    let schema = schemars::schema_for!(T);
    serde_json::to_value(schema)
        .unwrap_or_else(|_| serde_json::json!({"type": "object", "properties": {}}))
}

// ── Request types ──────────────────────────────────────────────────

/// Chat completion request body. Unused optional fields are omitted from
/// serialization.
#[derive(Serialize, Debug, Default)]
pub struct ChatRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    pub messages: Vec<Message>,

    #[serde(skip_serializing_if = "is_zero_u32")]
    pub max_tokens: u32,
    #[serde(skip_serializing_if = "is_zero_f32")]
    pub temperature: f32,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<ResponseFormat>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub plugins: Option<Vec<Plugin>>,
}

fn is_zero_u32(v: &u32) -> bool {
    *v == 0
}
fn is_zero_f32(v: &f32) -> bool {
    *v == 0.0
}

/// JSON output format type.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub enum ResponseFormatType {
    #[serde(rename = "json_schema")]
    JsonSchema,
}

/// Named schema for structured outputs.
#[derive(Serialize, Debug, Clone)]
pub struct JsonSchemaFormat {
    pub name: String,
    pub strict: bool,
    pub schema: serde_json::Value,
}

/// JSON output mode.
#[derive(Serialize, Debug)]
pub struct ResponseFormat {
    #[serde(rename = "type")]
    pub fmt_type: ResponseFormatType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub json_schema: Option<JsonSchemaFormat>,
}

impl ResponseFormat {
    /// Structured output constrained by `schema`.
    pub fn json_schema(name: impl Into<String>, schema: serde_json::Value) -> Self {
        Self {
            fmt_type: ResponseFormatType::JsonSchema,
            json_schema: Some(JsonSchemaFormat {
                name: name.into(),
                strict: true,
                schema,
            }),
        }
    }
}

/// OpenRouter plugin configuration.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(tag = "id")]
pub enum Plugin {
    /// Repairs truncated or slightly malformed JSON before it reaches us.
    #[serde(rename = "response-healing")]
    ResponseHealing,
}

// ── Message types ──────────────────────────────────────────────────

/// Role of a message in the conversation.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
}

/// A message in the conversation.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Message {
    pub role: MessageRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: Some(content.into()),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: Some(content.into()),
        }
    }
}

// ── Response types ─────────────────────────────────────────────────

/// Raw API response (internal deserialization target).
#[derive(Deserialize, Debug)]
struct RawChatResponse {
    choices: Option<Vec<RawChoice>>,
    error: Option<ApiErrorResponse>,
    #[serde(default)]
    usage: Option<UsageInfo>,
}

#[derive(Deserialize, Debug)]
struct RawChoice {
    message: RawResponseMessage,
    finish_reason: Option<String>,
}

#[derive(Deserialize, Debug)]
struct RawResponseMessage {
    content: Option<String>,
}

#[derive(Deserialize, Debug)]
struct ApiErrorResponse {
    message: String,
}

/// Clean return type from [`OpenRouterClient::chat`].
#[derive(Debug)]
pub struct ChatCompletion {
    pub content: Option<String>,
    pub usage: Option<UsageInfo>,
    pub finish_reason: Option<String>,
}

/// Token usage statistics.
#[derive(Deserialize, Debug, Clone)]
pub struct UsageInfo {
    pub prompt_tokens: Option<u32>,
    pub completion_tokens: Option<u32>,
    pub total_tokens: Option<u32>,
}

// ── Client ─────────────────────────────────────────────────────────

/// Async HTTP client for the OpenRouter chat completions API.
pub struct OpenRouterClient {
    pub(crate) client: reqwest::Client,
    pub(crate) api_key: String,
    pub(crate) endpoint: String,
    pub(crate) referer: String,
    pub(crate) title: String,
    pub(crate) timeout: Duration,
}

impl OpenRouterClient {
    /// Create a new client with the given API key and default headers.
    pub fn new(api_key: impl Into<String>, timeout: Duration) -> Result<Self, String> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("waymark/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| format!("failed to build HTTP client: {e}"))?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            endpoint: OPENROUTER_URL.to_string(),
            referer: "https://github.com/waymark-rs/waymark".to_string(),
            title: "waymark".to_string(),
            timeout,
        })
    }

    /// Point the client at a different chat-completions endpoint
    /// (self-hosted gateways, test servers).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Send a chat completion request.
    pub async fn chat(&self, body: &ChatRequest) -> Result<ChatCompletion, GenerationFailure> {
        debug!(
            "LLM request: model={}, messages={}, max_tokens={}, temp={}",
            body.model.as_deref().unwrap_or("(none)"),
            body.messages.len(),
            body.max_tokens,
            body.temperature,
        );
        trace!(
            "Request payload size: {} bytes",
            serde_json::to_string(body).map_or(0, |s| s.len())
        );

        let start = Instant::now();

        let resp = self
            .client
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("HTTP-Referer", &self.referer)
            .header("X-Title", &self.title)
            .json(body)
            .send()
            .await
            .map_err(|e| self.transport_failure(e))?;

        let status = resp.status();
        let text = resp.text().await.map_err(|e| self.transport_failure(e))?;

        let elapsed = start.elapsed();
        debug!(
            "LLM response: HTTP {} in {:.1}s ({} bytes)",
            status,
            elapsed.as_secs_f64(),
            text.len()
        );

        if !status.is_success() {
            return Err(GenerationFailure::Http {
                status: status.as_u16(),
                body: text,
            });
        }

        let parsed: RawChatResponse = serde_json::from_str(&text)
            .map_err(|e| GenerationFailure::Malformed(format!("chat envelope: {e}")))?;

        if let Some(err) = parsed.error {
            return Err(GenerationFailure::Api(err.message));
        }

        if let Some(ref usage) = parsed.usage {
            debug!(
                "Token usage: prompt={}, completion={}, total={}",
                usage.prompt_tokens.unwrap_or(0),
                usage.completion_tokens.unwrap_or(0),
                usage.total_tokens.unwrap_or(0),
            );
        }

        let choice = parsed.choices.and_then(|c| c.into_iter().next());

        match choice {
            Some(c) => {
                debug!(
                    "LLM output: {} chars, finish_reason={}",
                    c.message.content.as_ref().map_or(0, |s| s.len()),
                    c.finish_reason.as_deref().unwrap_or("(none)")
                );
                Ok(ChatCompletion {
                    content: c.message.content,
                    usage: parsed.usage,
                    finish_reason: c.finish_reason,
                })
            }
            None => {
                debug!("LLM output: empty (no choices)");
                Ok(ChatCompletion {
                    content: None,
                    usage: parsed.usage,
                    finish_reason: None,
                })
            }
        }
    }

    fn transport_failure(&self, e: reqwest::Error) -> GenerationFailure {
        if e.is_timeout() {
            GenerationFailure::Timeout(self.timeout)
        } else {
            GenerationFailure::Transport(e.to_string())
        }
    }
}
