//! Convenience re-exports for common `waymark-rs` types.
//!
//! ```ignore
//! use waymark_rs::prelude::*;
//! ```
//!
//! Covers resolving and rendering a roadmap. Wire types for the OpenRouter
//! API and the prompt internals are left in their modules.

// ── Data model ──────────────────────────────────────────────────────
pub use crate::schema::{
    RoadmapData, RoadmapSection, SectionContent, SectionSlot, ThirtyDayPlan, Tier, UserResponses,
};

// ── Resolution ──────────────────────────────────────────────────────
pub use crate::backend::{GenerationSettings, OpenRouterBackend, RoadmapBackend};
pub use crate::blueprints::{FocusArea, lookup};
pub use crate::config::RoadmapConfig;
pub use crate::error::{GenerationFailure, ResolveError};
pub use crate::prompt::PromptTemplate;
pub use crate::resolver::{Credential, Resolution, ResolverConfig, RoadmapResolver, RoadmapSource};

// ── Presentation ────────────────────────────────────────────────────
pub use crate::questionnaire::{QUESTIONS, Question};
pub use crate::render::{RenderTier, render_markdown};
