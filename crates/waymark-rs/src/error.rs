//! Failure types for the generative path and the resolver.

use std::time::Duration;

/// Anything that went wrong while asking the generative backend for a
/// roadmap. The resolver absorbs these and falls back to a blueprint.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerationFailure {
    #[error("no usable backend credential configured")]
    MissingCredential,
    #[error("request failed: {0}")]
    Transport(String),
    #[error("backend HTTP {status}: {body}")]
    Http { status: u16, body: String },
    #[error("backend API error: {0}")]
    Api(String),
    #[error("backend timed out after {0:?}")]
    Timeout(Duration),
    #[error("backend returned an empty response")]
    EmptyResponse,
    #[error("backend returned malformed JSON: {0}")]
    Malformed(String),
    #[error("backend returned a non-conforming roadmap: {}", .0.join("; "))]
    NonConforming(Vec<String>),
}

impl GenerationFailure {
    /// Short machine-readable tag, used in logs and API responses.
    pub fn kind(&self) -> &'static str {
        match self {
            GenerationFailure::MissingCredential => "missing_credential",
            GenerationFailure::Transport(_) => "transport",
            GenerationFailure::Http { .. } => "http",
            GenerationFailure::Api(_) => "api",
            GenerationFailure::Timeout(_) => "timeout",
            GenerationFailure::EmptyResponse => "empty_response",
            GenerationFailure::Malformed(_) => "malformed",
            GenerationFailure::NonConforming(_) => "non_conforming",
        }
    }
}

/// The resolver could not produce any roadmap.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// Generation failed or was unavailable and local fallback is disabled.
    #[error("roadmap generation failed and no local fallback is available{}", cause_suffix(.cause))]
    TotalFailure { cause: Option<GenerationFailure> },
}

fn cause_suffix(cause: &Option<GenerationFailure>) -> String {
    cause.as_ref().map(|c| format!(" ({c})")).unwrap_or_default()
}
