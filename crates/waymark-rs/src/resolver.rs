//! Credential gate, one generation attempt, local fallback.
//!
//! [`RoadmapResolver::generate`] runs a two-step pipeline: an optional
//! attempt against the configured [`RoadmapBackend`], then, on any failure,
//! the blueprint for the caller's focus area. The attempt is skipped entirely
//! when no usable [`Credential`] is configured. Nothing is retried.

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::backend::RoadmapBackend;
use crate::blueprints::{FocusArea, blueprint, resolve_focus};
use crate::error::{GenerationFailure, ResolveError};
use crate::schema::{RoadmapData, UserResponses};

// ── Credential ─────────────────────────────────────────────────────

/// Environment variables consulted by [`Credential::from_env`], in order.
pub const CREDENTIAL_ENV_VARS: [&str; 2] = ["WAYMARK_API_KEY", "OPENROUTER_KEY"];

/// Placeholder values that front-end build tooling leaves behind when a key
/// was never set.
const PLACEHOLDERS: [&str; 2] = ["undefined", "null"];

/// API key for the generative backend. May be absent or a placeholder.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credential(Option<String>);

impl Credential {
    pub fn new(value: impl Into<String>) -> Self {
        Self(Some(value.into()))
    }

    pub fn none() -> Self {
        Self(None)
    }

    /// First usable value among [`CREDENTIAL_ENV_VARS`].
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Like [`from_env`](Self::from_env) with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut fallback = Self::none();
        for name in CREDENTIAL_ENV_VARS {
            let Some(value) = lookup(name) else { continue };
            let candidate = Self::new(value);
            if candidate.is_usable() {
                debug!("using backend credential from {name}");
                return candidate;
            }
            if fallback.0.is_none() {
                fallback = candidate;
            }
        }
        fallback
    }

    /// Non-empty after trimming and not a placeholder string.
    pub fn is_usable(&self) -> bool {
        self.0.as_deref().map(str::trim).is_some_and(|v| {
            !v.is_empty() && !PLACEHOLDERS.iter().any(|p| v.eq_ignore_ascii_case(p))
        })
    }

    /// The trimmed key, only when usable.
    pub fn value(&self) -> Option<&str> {
        if self.is_usable() {
            self.0.as_deref().map(str::trim)
        } else {
            None
        }
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match &self.0 {
            None => "unset",
            Some(_) if self.is_usable() => "set",
            Some(_) => "placeholder",
        };
        f.debug_tuple("Credential").field(&state).finish()
    }
}

// ── Resolver ───────────────────────────────────────────────────────

/// Resolver behavior knobs.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Pause before serving a blueprint. `Duration::ZERO` disables it.
    pub simulated_delay: Duration,
    /// Upper bound on the single generation attempt.
    pub generation_timeout: Duration,
    /// Serve a blueprint when generation is unavailable or fails. When
    /// false, such cases become [`ResolveError::TotalFailure`].
    pub local_fallback: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            simulated_delay: Duration::from_secs(2),
            generation_timeout: Duration::from_secs(60),
            local_fallback: true,
        }
    }
}

/// Where a resolved roadmap came from.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RoadmapSource {
    Generated {
        backend: String,
    },
    Blueprint {
        focus_area: FocusArea,
        /// False when the requested focus area was unknown and the default
        /// blueprint was served.
        exact_match: bool,
    },
}

/// A roadmap plus how it was obtained.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub roadmap: RoadmapData,
    pub source: RoadmapSource,
    /// The absorbed failure when a blueprint was served instead of a
    /// generated roadmap. Diagnostics only.
    pub fallback_reason: Option<GenerationFailure>,
}

impl Resolution {
    pub fn is_generated(&self) -> bool {
        matches!(self.source, RoadmapSource::Generated { .. })
    }
}

/// Produces a roadmap for every set of answers.
///
/// Holds no mutable state; share it behind an [`Arc`] across requests.
pub struct RoadmapResolver {
    config: ResolverConfig,
    backend: Option<Arc<dyn RoadmapBackend>>,
    credential: Credential,
}

impl RoadmapResolver {
    /// A resolver with no backend: every call serves a blueprint.
    pub fn new(config: ResolverConfig) -> Self {
        Self {
            config,
            backend: None,
            credential: Credential::none(),
        }
    }

    /// Attach a generative backend, gated by `credential`.
    pub fn with_backend(mut self, credential: Credential, backend: Arc<dyn RoadmapBackend>) -> Self {
        self.credential = credential;
        self.backend = Some(backend);
        self
    }

    /// Whether a generation attempt would be made.
    pub fn can_generate(&self) -> bool {
        self.backend.is_some() && self.credential.is_usable()
    }

    /// Resolve a roadmap for `responses`.
    ///
    /// With local fallback enabled this never fails.
    pub async fn generate(&self, responses: &UserResponses) -> Result<Resolution, ResolveError> {
        let started = Instant::now();

        let failure = match self.attempt(responses).await {
            Ok((roadmap, backend)) => {
                info!("generated roadmap via {backend} in {:?}", started.elapsed());
                return Ok(Resolution {
                    roadmap,
                    source: RoadmapSource::Generated { backend },
                    fallback_reason: None,
                });
            }
            Err(failure) => failure,
        };

        match &failure {
            Some(reason @ GenerationFailure::MissingCredential) => {
                info!("{reason}; serving local blueprint")
            }
            Some(reason) => warn!("roadmap generation failed ({}): {reason}", reason.kind()),
            None => debug!("no generative backend configured"),
        }

        if !self.config.local_fallback {
            return Err(ResolveError::TotalFailure { cause: failure });
        }

        if !self.config.simulated_delay.is_zero() {
            tokio::time::sleep(self.config.simulated_delay).await;
        }

        let (focus_area, exact_match) = resolve_focus(&responses.focus_area);
        info!(
            "serving '{focus_area}' blueprint (exact match: {exact_match}) in {:?}",
            started.elapsed()
        );
        Ok(Resolution {
            roadmap: blueprint(focus_area).clone(),
            source: RoadmapSource::Blueprint {
                focus_area,
                exact_match,
            },
            fallback_reason: failure,
        })
    }

    /// [`generate`](Self::generate), keeping only the roadmap.
    pub async fn generate_roadmap(&self, responses: &UserResponses) -> Result<RoadmapData, ResolveError> {
        self.generate(responses).await.map(|r| r.roadmap)
    }

    /// The single generation attempt. `Err(None)` means no backend is
    /// configured at all.
    async fn attempt(
        &self,
        responses: &UserResponses,
    ) -> Result<(RoadmapData, String), Option<GenerationFailure>> {
        let Some(backend) = &self.backend else {
            return Err(None);
        };
        if !self.credential.is_usable() {
            return Err(Some(GenerationFailure::MissingCredential));
        }

        let timeout = self.config.generation_timeout;
        match tokio::time::timeout(timeout, backend.generate(responses)).await {
            Ok(Ok(roadmap)) => Ok((roadmap, backend.label())),
            Ok(Err(failure)) => Err(Some(failure)),
            Err(_) => Err(Some(GenerationFailure::Timeout(timeout))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::BackendFuture;
    use crate::blueprints::lookup;
    use crate::schema::is_conforming;
    use std::sync::atomic::{AtomicUsize, Ordering};

    enum Reply {
        Roadmap(RoadmapData),
        Fail(GenerationFailure),
        Hang,
    }

    struct Scripted {
        calls: AtomicUsize,
        reply: Reply,
    }

    impl Scripted {
        fn new(reply: Reply) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                reply,
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl RoadmapBackend for Scripted {
        fn label(&self) -> String {
            "scripted".into()
        }

        fn generate<'a>(&'a self, _responses: &'a UserResponses) -> BackendFuture<'a> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Box::pin(async move {
                match &self.reply {
                    Reply::Roadmap(r) => Ok(r.clone()),
                    Reply::Fail(f) => Err(f.clone()),
                    Reply::Hang => {
                        tokio::time::sleep(Duration::from_secs(30)).await;
                        Err(GenerationFailure::EmptyResponse)
                    }
                }
            })
        }
    }

    fn quick() -> ResolverConfig {
        ResolverConfig {
            simulated_delay: Duration::ZERO,
            generation_timeout: Duration::from_secs(5),
            local_fallback: true,
        }
    }

    fn responses(focus: &str) -> UserResponses {
        UserResponses::new("Solopreneur", focus, "Tried a few tools", "Launch something")
    }

    fn custom_roadmap() -> RoadmapData {
        let mut r = blueprint(FocusArea::LearningAiBasics).clone();
        r.next_step.preview = "Custom next step".into();
        r
    }

    #[test]
    fn credential_usability() {
        assert!(Credential::new("sk-or-123").is_usable());
        assert!(Credential::new("  sk-or-123\n").is_usable());
        assert_eq!(Credential::new(" sk \n").value(), Some("sk"));
        for bad in ["", "   ", "undefined", "null", "NULL"] {
            assert!(!Credential::new(bad).is_usable(), "{bad:?}");
            assert_eq!(Credential::new(bad).value(), None);
        }
        assert!(!Credential::none().is_usable());
    }

    #[test]
    fn credential_debug_hides_key() {
        let shown = format!("{:?}", Credential::new("sk-or-secret"));
        assert!(!shown.contains("secret"));
        assert_eq!(shown, "Credential(\"set\")");
    }

    #[test]
    fn credential_lookup_prefers_first_usable() {
        let c = Credential::from_lookup(|name| match name {
            "WAYMARK_API_KEY" => Some("undefined".into()),
            "OPENROUTER_KEY" => Some("sk-or-real".into()),
            _ => None,
        });
        assert_eq!(c.value(), Some("sk-or-real"));

        let c = Credential::from_lookup(|name| (name == "WAYMARK_API_KEY").then(|| "null".into()));
        assert!(!c.is_usable());
        assert_eq!(c, Credential::new("null"));

        assert_eq!(Credential::from_lookup(|_| None), Credential::none());
    }

    #[tokio::test]
    async fn unusable_credential_never_calls_backend() {
        for credential in [
            Credential::none(),
            Credential::new(""),
            Credential::new("undefined"),
            Credential::new("null"),
        ] {
            let backend = Scripted::new(Reply::Roadmap(custom_roadmap()));
            let resolver = RoadmapResolver::new(quick()).with_backend(credential, backend.clone());
            let res = resolver.generate(&responses("Learning AI basics")).await.unwrap();

            assert_eq!(backend.calls(), 0);
            assert_eq!(&res.roadmap, lookup("Learning AI basics"));
            assert_eq!(res.fallback_reason, Some(GenerationFailure::MissingCredential));
        }
    }

    #[tokio::test]
    async fn successful_generation_is_returned_as_is() {
        let backend = Scripted::new(Reply::Roadmap(custom_roadmap()));
        let resolver = RoadmapResolver::new(quick()).with_backend(Credential::new("sk"), backend.clone());
        let res = resolver.generate(&responses("Content & marketing")).await.unwrap();

        assert_eq!(backend.calls(), 1);
        assert_eq!(res.roadmap, custom_roadmap());
        assert_eq!(
            res.source,
            RoadmapSource::Generated {
                backend: "scripted".into()
            }
        );
        assert!(res.fallback_reason.is_none());
    }

    #[tokio::test]
    async fn failure_falls_back_to_blueprint_after_one_attempt() {
        let backend = Scripted::new(Reply::Fail(GenerationFailure::Malformed("eof".into())));
        let resolver = RoadmapResolver::new(quick()).with_backend(Credential::new("sk"), backend.clone());
        let res = resolver.generate(&responses("Content & marketing")).await.unwrap();

        assert_eq!(backend.calls(), 1);
        assert_eq!(&res.roadmap, lookup("Content & marketing"));
        assert_eq!(
            res.source,
            RoadmapSource::Blueprint {
                focus_area: FocusArea::ContentMarketing,
                exact_match: true
            }
        );
        assert_eq!(res.fallback_reason.unwrap().kind(), "malformed");
    }

    #[tokio::test]
    async fn slow_backend_times_out_into_fallback() {
        let backend = Scripted::new(Reply::Hang);
        let config = ResolverConfig {
            generation_timeout: Duration::from_millis(50),
            ..quick()
        };
        let resolver = RoadmapResolver::new(config).with_backend(Credential::new("sk"), backend.clone());
        let res = resolver.generate(&responses("Business operations")).await.unwrap();

        assert_eq!(backend.calls(), 1);
        assert_eq!(
            res.fallback_reason,
            Some(GenerationFailure::Timeout(Duration::from_millis(50)))
        );
        assert_eq!(&res.roadmap, lookup("Business operations"));
    }

    #[tokio::test]
    async fn unknown_focus_gets_default_blueprint() {
        let resolver = RoadmapResolver::new(quick());
        let res = resolver.generate(&responses("Underwater basket weaving")).await.unwrap();

        assert_eq!(&res.roadmap, blueprint(FocusArea::BusinessOperations));
        assert_eq!(
            res.source,
            RoadmapSource::Blueprint {
                focus_area: FocusArea::BusinessOperations,
                exact_match: false
            }
        );
        assert!(res.fallback_reason.is_none());
    }

    #[tokio::test]
    async fn every_resolution_conforms() {
        let resolver = RoadmapResolver::new(quick());
        for focus in ["", " ", "content & marketing", "Clarifying what to build", "😀"] {
            let r = resolver.generate_roadmap(&responses(focus)).await.unwrap();
            assert!(is_conforming(&serde_json::to_value(&r).unwrap()), "{focus:?}");
        }
    }

    #[tokio::test]
    async fn disabled_fallback_surfaces_total_failure() {
        let config = ResolverConfig {
            local_fallback: false,
            ..quick()
        };
        let backend = Scripted::new(Reply::Fail(GenerationFailure::EmptyResponse));
        let resolver = RoadmapResolver::new(config.clone()).with_backend(Credential::new("sk"), backend.clone());
        let err = resolver.generate(&responses("Learning AI basics")).await.unwrap_err();
        assert_eq!(
            err,
            ResolveError::TotalFailure {
                cause: Some(GenerationFailure::EmptyResponse)
            }
        );
        assert_eq!(backend.calls(), 1);

        let err = RoadmapResolver::new(config)
            .generate(&responses("Learning AI basics"))
            .await
            .unwrap_err();
        assert_eq!(err, ResolveError::TotalFailure { cause: None });
    }

    #[tokio::test]
    async fn simulated_delay_applies_to_fallback() {
        let config = ResolverConfig {
            simulated_delay: Duration::from_millis(80),
            ..quick()
        };
        let started = Instant::now();
        RoadmapResolver::new(config)
            .generate(&responses("Learning AI basics"))
            .await
            .unwrap();
        assert!(started.elapsed() >= Duration::from_millis(80));
    }

    #[tokio::test]
    async fn concurrent_requests_share_one_resolver() {
        let backend = Scripted::new(Reply::Fail(GenerationFailure::Transport("reset".into())));
        let resolver = Arc::new(RoadmapResolver::new(quick()).with_backend(Credential::new("sk"), backend.clone()));

        let handles: Vec<_> = FocusArea::ALL
            .iter()
            .map(|area| {
                let resolver = resolver.clone();
                let answers = responses(area.label());
                tokio::spawn(async move { resolver.generate_roadmap(&answers).await })
            })
            .collect();

        for (area, handle) in FocusArea::ALL.iter().zip(handles) {
            let roadmap = handle.await.unwrap().unwrap();
            assert_eq!(&roadmap, blueprint(*area));
        }
        assert_eq!(backend.calls(), FocusArea::ALL.len());
    }
}
