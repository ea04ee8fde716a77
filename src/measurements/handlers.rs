use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use time::OffsetDateTime;
use tracing::{info, instrument};
use uuid::Uuid;

use super::{
    dto::CreateMeasurementRequest,
    repo::{self, Measurement},
};
use crate::{
    auth::AuthUser,
    http::{bad_request, internal, not_found, ApiError},
    profile,
    state::AppState,
};

pub fn measurement_routes() -> Router<AppState> {
    Router::new()
        .route("/measurements", get(list_measurements).post(create_measurement))
        .route("/measurements/:id", delete(delete_measurement))
}

#[instrument(skip(state))]
pub async fn list_measurements(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<Measurement>>, ApiError> {
    let rows = repo::list(&state.db, user_id).await.map_err(internal)?;
    Ok(Json(rows))
}

#[instrument(skip(state, body))]
pub async fn create_measurement(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(body): Json<CreateMeasurementRequest>,
) -> Result<(StatusCode, Json<Measurement>), ApiError> {
    let new = body.validate().map_err(bad_request)?;
    let saved = repo::insert(&state.db, user_id, &new)
        .await
        .map_err(internal)?;

    let today = OffsetDateTime::now_utc().date();
    if let Some(current) = profile::repo::find(&state.db, user_id)
        .await
        .map_err(internal)?
    {
        if let Some(updated) = new.mirrored_into(&current, today) {
            profile::repo::upsert(&state.db, user_id, &updated)
                .await
                .map_err(internal)?;
            info!(%user_id, weight_kg = updated.weight_kg, "profile weight synced from measurement");
        }
    }

    Ok((StatusCode::CREATED, Json(saved)))
}

#[instrument(skip(state))]
pub async fn delete_measurement(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    if repo::delete(&state.db, user_id, id).await.map_err(internal)? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found("Measurement"))
    }
}
