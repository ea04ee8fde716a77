use axum::{routing::get, Json, Router};
use serde::Serialize;
use tracing::instrument;
use uuid::Uuid;

use super::extractors::AuthClaims;
use crate::state::AppState;

/// Public part of the caller's identity.
#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub id: Uuid,
    pub email: Option<String>,
}

pub fn me_routes() -> Router<AppState> {
    Router::new().route("/me", get(get_me))
}

#[instrument(skip_all)]
pub async fn get_me(AuthClaims(claims): AuthClaims) -> Json<MeResponse> {
    Json(MeResponse {
        id: claims.sub,
        email: claims.email,
    })
}
