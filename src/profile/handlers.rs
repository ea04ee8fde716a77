use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use time::OffsetDateTime;
use tracing::{info, instrument};

use super::{
    dto::{ProfileRequest, TargetsQuery},
    repo,
    repo_types::Profile,
    services::targets_for,
};
use crate::{
    auth::AuthUser,
    http::{bad_request, internal, not_found, ApiError},
    nutrition::DailyTargets,
    state::AppState,
};

pub fn profile_routes() -> Router<AppState> {
    Router::new()
        .route("/profile", get(get_profile).put(put_profile))
        .route("/targets", get(get_targets))
}

#[instrument(skip(state))]
pub async fn get_profile(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Profile>, ApiError> {
    repo::find(&state.db, user_id)
        .await
        .map_err(internal)?
        .map(Json)
        .ok_or_else(|| not_found("Profile"))
}

#[instrument(skip(state, payload))]
pub async fn put_profile(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<ProfileRequest>,
) -> Result<Json<Profile>, ApiError> {
    let profile = payload.validate().map_err(bad_request)?;
    repo::upsert(&state.db, user_id, &profile)
        .await
        .map_err(internal)?;
    info!(%user_id, goal = %profile.goal, "profile saved");
    Ok(Json(profile))
}

#[instrument(skip(state))]
pub async fn get_targets(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(q): Query<TargetsQuery>,
) -> Result<Json<DailyTargets>, ApiError> {
    let date = q.date.unwrap_or_else(|| OffsetDateTime::now_utc().date());
    let (_, targets) = targets_for(&state.db, &state.config.targets, user_id, date)
        .await
        .map_err(internal)?
        .ok_or_else(|| not_found("Profile"))?;
    Ok(Json(targets))
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{header, Method, Request, StatusCode},
    };
    use tower::ServiceExt;
    use uuid::Uuid;

    use super::*;
    use crate::state::testing::token_for;

    fn app() -> Router {
        profile_routes().with_state(AppState::fake())
    }

    #[tokio::test]
    async fn profile_requires_token() {
        let response = app()
            .oneshot(Request::get("/profile").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn invalid_profile_is_rejected_before_storage() {
        let body = serde_json::json!({
            "age_years": 30,
            "height_cm": 175.0,
            "weight_kg": 0.0,
            "sex": "male",
            "activity_level": "moderate",
            "goal": "lose"
        });
        let request = Request::builder()
            .method(Method::PUT)
            .uri("/profile")
            .header(header::AUTHORIZATION, format!("Bearer {}", token_for(Uuid::new_v4())))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(String::from_utf8_lossy(&bytes).contains("Weight"));
    }
}
