//! REST API endpoint handlers.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tracing::{error, warn};
use waymark_rs::blueprints::{FocusArea, blueprint, resolve_focus};
use waymark_rs::questionnaire::{QUESTIONS, Question, unrecognized_answers};
use waymark_rs::resolver::{RoadmapResolver, RoadmapSource};
use waymark_rs::schema::{RoadmapData, UserResponses};

/// Shared application state passed to all handlers via axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<RoadmapResolver>,
}

/// Error body: `{"error": "..."}` with a status code.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorBody { error: &self.message })).into_response()
    }
}

/// GET /api/questions — The questionnaire and its answer options.
pub async fn get_questions() -> Json<[Question; 4]> {
    Json(QUESTIONS)
}

/// Response body for POST /api/roadmap.
#[derive(Serialize, Debug)]
pub struct RoadmapResponse {
    pub roadmap: RoadmapData,
    pub profile: UserResponses,
    pub source: RoadmapSource,
    /// Kind of the absorbed generation failure, when a blueprint was served.
    pub fallback: Option<&'static str>,
}

/// POST /api/roadmap — Resolve a roadmap for questionnaire answers.
///
/// Returns 422 when an answer is blank and 503 when generation failed with
/// local fallback disabled.
pub async fn post_roadmap(
    State(app): State<AppState>,
    Json(responses): Json<UserResponses>,
) -> Result<Json<RoadmapResponse>, ApiError> {
    responses.validate().map_err(|e| ApiError {
        status: StatusCode::UNPROCESSABLE_ENTITY,
        message: e.to_string(),
    })?;

    for (field, value) in unrecognized_answers(&responses) {
        warn!("unlisted answer for {field}: {value:?}");
    }

    match app.resolver.generate(&responses).await {
        Ok(resolution) => Ok(Json(RoadmapResponse {
            fallback: resolution.fallback_reason.as_ref().map(|f| f.kind()),
            roadmap: resolution.roadmap,
            profile: responses,
            source: resolution.source,
        })),
        Err(e) => {
            error!("{e}");
            Err(ApiError {
                status: StatusCode::SERVICE_UNAVAILABLE,
                message: "roadmap generation is temporarily unavailable".into(),
            })
        }
    }
}

/// Response body for GET /api/blueprints/{focus}.
#[derive(Serialize, Debug)]
pub struct BlueprintResponse {
    pub focus_area: FocusArea,
    pub label: &'static str,
    pub exact_match: bool,
    pub roadmap: &'static RoadmapData,
}

/// GET /api/blueprints/{focus} — The local blueprint for a focus label.
///
/// Total: unknown labels get the default blueprint with `exact_match: false`.
pub async fn get_blueprint(Path(focus): Path<String>) -> Json<BlueprintResponse> {
    let (focus_area, exact_match) = resolve_focus(&focus);
    Json(BlueprintResponse {
        focus_area,
        label: focus_area.label(),
        exact_match,
        roadmap: blueprint(focus_area),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use waymark_rs::resolver::ResolverConfig;

    fn state(local_fallback: bool) -> AppState {
        AppState {
            resolver: Arc::new(RoadmapResolver::new(ResolverConfig {
                simulated_delay: Duration::ZERO,
                local_fallback,
                ..Default::default()
            })),
        }
    }

    #[tokio::test]
    async fn roadmap_for_known_focus() {
        let answers = UserResponses::new("Coach or consultant", "Learning AI basics", "New to AI", "Learn AI efficiently");
        let Json(body) = post_roadmap(State(state(true)), Json(answers.clone())).await.unwrap();
        assert_eq!(&body.roadmap, blueprint(FocusArea::LearningAiBasics));
        assert_eq!(body.profile, answers);
        assert_eq!(body.fallback, None);
    }

    #[tokio::test]
    async fn blank_answer_is_unprocessable() {
        let answers = UserResponses::new("Freelancer", "Learning AI basics", "  ", "Save time");
        let err = post_roadmap(State(state(true)), Json(answers)).await.unwrap_err();
        assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(err.message.contains("aiLevel"));
    }

    #[tokio::test]
    async fn total_failure_is_unavailable() {
        let answers = UserResponses::new("Freelancer", "Learning AI basics", "New to AI", "Save time");
        let err = post_roadmap(State(state(false)), Json(answers)).await.unwrap_err();
        assert_eq!(err.status, StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn unknown_blueprint_label_uses_default() {
        let Json(body) = get_blueprint(Path("Knitting".to_string())).await;
        assert_eq!(body.focus_area, FocusArea::DEFAULT);
        assert!(!body.exact_match);
        assert_eq!(body.label, "Business operations");
    }

    #[test]
    fn roadmap_response_serializes_source_tag() {
        let body = RoadmapResponse {
            roadmap: blueprint(FocusArea::ContentMarketing).clone(),
            profile: UserResponses::new("a", "Content & marketing", "c", "d"),
            source: RoadmapSource::Blueprint {
                focus_area: FocusArea::ContentMarketing,
                exact_match: true,
            },
            fallback: Some("missing_credential"),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["source"]["kind"], "blueprint");
        assert_eq!(json["source"]["focus_area"], "content_marketing");
        assert_eq!(json["profile"]["focusArea"], "Content & marketing");
        assert_eq!(json["fallback"], "missing_credential");
        assert!(json["roadmap"]["next30Days"]["week4"].is_object());
    }
}
