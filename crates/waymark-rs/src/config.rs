//! Engine configuration with sensible defaults.
//!
//! [`RoadmapConfig`] captures the settings a front end needs and turns them
//! into a ready [`RoadmapResolver`] via
//! [`build_resolver`](RoadmapConfig::build_resolver).

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::backend::{GenerationSettings, OpenRouterBackend};
use crate::prompt::PromptTemplate;
use crate::resolver::{Credential, ResolverConfig, RoadmapResolver};

/// Configuration for roadmap resolution.
#[derive(Debug, Clone)]
pub struct RoadmapConfig {
    /// Model identifier. Default: `"google/gemini-3-pro-preview"`.
    pub model: String,
    /// Maximum tokens per generated roadmap. Default: `4096`.
    pub max_tokens: u32,
    /// Sampling temperature. Default: `0.4`.
    pub temperature: f32,
    /// Bound on the generation attempt. Default: 60 s.
    pub request_timeout: Duration,
    /// Pause before serving a local blueprint. Default: 2 s.
    pub simulated_delay: Duration,
    /// Serve a blueprint when generation fails. Default: `true`.
    pub local_fallback: bool,
    /// Request OpenRouter response healing. Default: `true`.
    pub response_healing: bool,
    pub prompt: PromptTemplate,
}

impl Default for RoadmapConfig {
    fn default() -> Self {
        Self {
            model: crate::DEFAULT_MODEL.to_string(),
            max_tokens: 4096,
            temperature: 0.4,
            request_timeout: Duration::from_secs(60),
            simulated_delay: Duration::from_secs(2),
            local_fallback: true,
            response_healing: true,
            prompt: PromptTemplate::default(),
        }
    }
}

impl RoadmapConfig {
    /// Defaults with `WAYMARK_MODEL`, `WAYMARK_TIMEOUT_SECS` and
    /// `WAYMARK_SIMULATED_DELAY_MS` applied.
    pub fn from_env() -> Self {
        Self::default().with_overrides(|name| std::env::var(name).ok())
    }

    /// Apply environment-style overrides from `lookup`. Unparseable numbers
    /// are ignored with a warning.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(model) = lookup("WAYMARK_MODEL").filter(|m| !m.trim().is_empty()) {
            self.model = model.trim().to_string();
        }
        if let Some(raw) = lookup("WAYMARK_TIMEOUT_SECS") {
            match raw.trim().parse::<u64>() {
                Ok(secs) => self.request_timeout = Duration::from_secs(secs),
                Err(e) => warn!("ignoring WAYMARK_TIMEOUT_SECS={raw:?}: {e}"),
            }
        }
        if let Some(raw) = lookup("WAYMARK_SIMULATED_DELAY_MS") {
            match raw.trim().parse::<u64>() {
                Ok(ms) => self.simulated_delay = Duration::from_millis(ms),
                Err(e) => warn!("ignoring WAYMARK_SIMULATED_DELAY_MS={raw:?}: {e}"),
            }
        }
        self
    }

    pub fn generation_settings(&self) -> GenerationSettings {
        GenerationSettings {
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            response_healing: self.response_healing,
        }
    }

    pub fn resolver_config(&self) -> ResolverConfig {
        ResolverConfig {
            simulated_delay: self.simulated_delay,
            generation_timeout: self.request_timeout,
            local_fallback: self.local_fallback,
        }
    }

    /// Build a resolver. The OpenRouter backend is attached only when
    /// `credential` is usable; otherwise every call serves a blueprint.
    pub fn build_resolver(&self, credential: &Credential) -> Result<RoadmapResolver, String> {
        let resolver = RoadmapResolver::new(self.resolver_config());
        let Some(key) = credential.value() else {
            debug!("no usable credential; resolver will serve blueprints only");
            return Ok(resolver);
        };

        let backend = OpenRouterBackend::from_api_key(
            key,
            self.request_timeout,
            self.generation_settings(),
            self.prompt.clone(),
        )?;
        Ok(resolver.with_backend(credential.clone(), Arc::new(backend)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = RoadmapConfig::default();
        assert_eq!(config.model, "google/gemini-3-pro-preview");
        assert_eq!(config.max_tokens, 4096);
        assert!((config.temperature - 0.4).abs() < f32::EPSILON);
        assert_eq!(config.request_timeout, Duration::from_secs(60));
        assert_eq!(config.simulated_delay, Duration::from_secs(2));
        assert!(config.local_fallback);
        assert!(config.response_healing);
    }

    #[test]
    fn overrides_apply_and_bad_numbers_are_ignored() {
        let config = RoadmapConfig::default().with_overrides(|name| match name {
            "WAYMARK_MODEL" => Some(" openai/gpt-4o-mini ".into()),
            "WAYMARK_TIMEOUT_SECS" => Some("15".into()),
            "WAYMARK_SIMULATED_DELAY_MS" => Some("soon".into()),
            _ => None,
        });
        assert_eq!(config.model, "openai/gpt-4o-mini");
        assert_eq!(config.request_timeout, Duration::from_secs(15));
        assert_eq!(config.simulated_delay, Duration::from_secs(2));
    }

    #[test]
    fn resolver_config_carries_timeouts() {
        let config = RoadmapConfig {
            simulated_delay: Duration::ZERO,
            local_fallback: false,
            ..Default::default()
        };
        let rc = config.resolver_config();
        assert_eq!(rc.simulated_delay, Duration::ZERO);
        assert_eq!(rc.generation_timeout, Duration::from_secs(60));
        assert!(!rc.local_fallback);
    }

    #[test]
    fn backend_only_with_usable_credential() {
        let config = RoadmapConfig::default();
        assert!(!config.build_resolver(&Credential::none()).unwrap().can_generate());
        assert!(!config.build_resolver(&Credential::new("undefined")).unwrap().can_generate());
        assert!(config.build_resolver(&Credential::new("sk-or-test")).unwrap().can_generate());
    }
}
