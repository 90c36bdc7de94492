//! Generative backends that synthesize a custom roadmap.
//!
//! [`RoadmapBackend`] is the seam the resolver calls through. The production
//! implementation, [`OpenRouterBackend`], sends the rendered
//! [`PromptTemplate`] with a strict `json_schema` response format and
//! accepts the reply only if it parses into a conforming
//! [`RoadmapData`]. Backends never retry and never fall back; that policy
//! belongs to the [`resolver`](crate::resolver).

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use tracing::{debug, warn};

use crate::error::GenerationFailure;
use crate::prompt::{PromptTemplate, RESPONSE_SCHEMA_NAME, response_schema};
use crate::schema::{RoadmapData, UserResponses};
use crate::{ChatRequest, Message, OpenRouterClient, Plugin, ResponseFormat};

/// Boxed future returned by [`RoadmapBackend::generate`].
pub type BackendFuture<'a> =
    Pin<Box<dyn Future<Output = Result<RoadmapData, GenerationFailure>> + Send + 'a>>;

/// A source of generated roadmaps.
///
/// Implementations must return either a fully conforming roadmap or a
/// [`GenerationFailure`]; never a partially filled document.
pub trait RoadmapBackend: Send + Sync {
    /// Human-readable backend identity, e.g. the model name.
    fn label(&self) -> String;

    /// Generate one roadmap for the given answers. Called at most once per
    /// resolver invocation.
    fn generate<'a>(&'a self, responses: &'a UserResponses) -> BackendFuture<'a>;
}

// ── OpenRouter ─────────────────────────────────────────────────────

/// Generation settings for [`OpenRouterBackend`].
#[derive(Debug, Clone)]
pub struct GenerationSettings {
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    /// Ask OpenRouter to repair near-miss JSON before returning it.
    pub response_healing: bool,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            model: crate::DEFAULT_MODEL.to_string(),
            max_tokens: 4096,
            temperature: 0.4,
            response_healing: true,
        }
    }
}

/// [`RoadmapBackend`] over the OpenRouter chat completions API.
pub struct OpenRouterBackend {
    client: OpenRouterClient,
    settings: GenerationSettings,
    prompt: PromptTemplate,
}

impl OpenRouterBackend {
    pub fn new(client: OpenRouterClient, settings: GenerationSettings, prompt: PromptTemplate) -> Self {
        Self {
            client,
            settings,
            prompt,
        }
    }

    /// Build a client for `api_key` and wrap it.
    pub fn from_api_key(
        api_key: &str,
        timeout: Duration,
        settings: GenerationSettings,
        prompt: PromptTemplate,
    ) -> Result<Self, String> {
        let client = OpenRouterClient::new(api_key, timeout)?;
        Ok(Self::new(client, settings, prompt))
    }

    /// The chat request sent for a set of answers.
    pub fn build_request(&self, responses: &UserResponses) -> ChatRequest {
        let rendered = self.prompt.render(responses);
        ChatRequest {
            model: Some(self.settings.model.clone()),
            messages: vec![Message::system(rendered.system), Message::user(rendered.user)],
            max_tokens: self.settings.max_tokens,
            temperature: self.settings.temperature,
            response_format: Some(ResponseFormat::json_schema(
                RESPONSE_SCHEMA_NAME,
                response_schema(),
            )),
            plugins: self
                .settings
                .response_healing
                .then(|| vec![Plugin::ResponseHealing]),
        }
    }

    async fn request(&self, responses: &UserResponses) -> Result<RoadmapData, GenerationFailure> {
        debug!(
            "requesting roadmap from {} (prompt {})",
            self.settings.model, self.prompt.version
        );
        let body = self.build_request(responses);
        let completion = self.client.chat(&body).await?;

        if completion.finish_reason.as_deref() == Some("length") {
            warn!("roadmap generation hit max_tokens={}", self.settings.max_tokens);
        }

        let content = completion.content.ok_or(GenerationFailure::EmptyResponse)?;
        let roadmap = parse_roadmap_payload(&content)?;

        let hits = self
            .prompt
            .forbidden_words_in(&serde_json::to_string(&roadmap).unwrap_or_default());
        if !hits.is_empty() {
            warn!("generated roadmap uses forbidden words: {}", hits.join(", "));
        }

        Ok(roadmap)
    }
}

impl RoadmapBackend for OpenRouterBackend {
    fn label(&self) -> String {
        format!("openrouter:{}", self.settings.model)
    }

    fn generate<'a>(&'a self, responses: &'a UserResponses) -> BackendFuture<'a> {
        Box::pin(self.request(responses))
    }
}

// ── Payload parsing ────────────────────────────────────────────────

/// Strip one surrounding Markdown code fence (```` ```json ... ``` ````).
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(body) = rest.strip_suffix("```") else {
        return trimmed;
    };
    // Drop the info string ("json") on the opening fence line.
    match body.split_once('\n') {
        Some((_, inner)) => inner.trim(),
        None => body.trim(),
    }
}

/// Parse a backend reply into a conforming roadmap.
///
/// Empty bodies are [`GenerationFailure::EmptyResponse`], unparseable text is
/// [`GenerationFailure::Malformed`], and JSON that does not satisfy the
/// roadmap schema is [`GenerationFailure::NonConforming`].
pub fn parse_roadmap_payload(text: &str) -> Result<RoadmapData, GenerationFailure> {
    let body = strip_code_fence(text);
    if body.is_empty() {
        return Err(GenerationFailure::EmptyResponse);
    }

    let value: serde_json::Value =
        serde_json::from_str(body).map_err(|e| GenerationFailure::Malformed(e.to_string()))?;

    let roadmap = RoadmapData::from_value(value).map_err(GenerationFailure::NonConforming)?;

    let mixed = roadmap.non_uniform_sections();
    if !mixed.is_empty() {
        warn!("generated sections with mixed preview/comprehensive shapes: {}", mixed.join(", "));
    }

    Ok(roadmap)
}
