use axum::{extract::State, routing::post, Json, Router};
use tracing::instrument;

use super::{
    dto::{AdviceRequest, AdviceResponse},
    services::{advise, gather_context, CoachError},
};
use crate::{
    auth::AuthUser,
    http::{bad_gateway, internal, not_found, ApiError},
    state::AppState,
};

pub fn coach_routes() -> Router<AppState> {
    Router::new().route("/coach/advice", post(get_advice))
}

fn coach_error(e: CoachError) -> ApiError {
    match e {
        CoachError::NoProfile => not_found("Profile"),
        CoachError::Ai(e) => bad_gateway(e),
        CoachError::Storage(e) => internal(e),
    }
}

#[instrument(skip(state, body))]
pub async fn get_advice(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    body: Option<Json<AdviceRequest>>,
) -> Result<Json<AdviceResponse>, ApiError> {
    let req = body.map(|Json(b)| b).unwrap_or_default();
    let ctx = gather_context(&state, user_id, &req)
        .await
        .map_err(coach_error)?;
    let advice = advise(state.ai.as_ref(), &ctx)
        .await
        .map_err(coach_error)?;
    Ok(Json(AdviceResponse { advice }))
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    use super::*;
    use crate::ai::AiError;

    #[test]
    fn errors_map_to_statuses() {
        assert_eq!(coach_error(CoachError::NoProfile).0, StatusCode::NOT_FOUND);
        assert_eq!(
            coach_error(CoachError::Ai(AiError::Api { status: 500, message: "boom".into() })).0,
            StatusCode::BAD_GATEWAY
        );
    }

    #[tokio::test]
    async fn advice_requires_token() {
        let response = coach_routes()
            .with_state(AppState::fake())
            .oneshot(
                Request::post("/coach/advice")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
