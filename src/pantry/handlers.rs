use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use tracing::{info, instrument};
use uuid::Uuid;

use super::{
    dto::AddItemRequest,
    repo,
    repo_types::{MealPlanSession, PantryItem},
    services::{generate_plan, PlanError},
};
use crate::{
    auth::AuthUser,
    http::{bad_gateway, bad_request, internal, not_found, ApiError},
    state::AppState,
};

pub fn pantry_routes() -> Router<AppState> {
    Router::new()
        .route("/pantry", get(list_items).post(add_item))
        .route("/pantry/:id", delete(remove_item))
        .route("/pantry/plans", post(create_plan).get(list_plans))
}

fn plan_error(e: PlanError) -> ApiError {
    match e {
        PlanError::EmptyPantry => bad_request(e),
        PlanError::Ai(e) => bad_gateway(e),
        PlanError::Storage(e) => internal(e),
    }
}

#[instrument(skip(state))]
pub async fn list_items(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<PantryItem>>, ApiError> {
    let items = repo::list_items(&state.db, user_id)
        .await
        .map_err(internal)?;
    Ok(Json(items))
}

#[instrument(skip(state, body))]
pub async fn add_item(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(body): Json<AddItemRequest>,
) -> Result<(StatusCode, Json<PantryItem>), ApiError> {
    let (name, category) = body.normalized().map_err(bad_request)?;
    let item = repo::insert_item(&state.db, user_id, &name, &category)
        .await
        .map_err(internal)?;
    info!(%user_id, item = %item.name, "pantry item added");
    Ok((StatusCode::CREATED, Json(item)))
}

#[instrument(skip(state))]
pub async fn remove_item(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    if repo::delete_item(&state.db, user_id, id)
        .await
        .map_err(internal)?
    {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found("Pantry item"))
    }
}

#[instrument(skip(state))]
pub async fn create_plan(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<(StatusCode, Json<MealPlanSession>), ApiError> {
    let session = generate_plan(&state, user_id).await.map_err(plan_error)?;
    Ok((StatusCode::CREATED, Json(session)))
}

#[instrument(skip(state))]
pub async fn list_plans(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<MealPlanSession>>, ApiError> {
    let plans = repo::list_plans(&state.db, user_id)
        .await
        .map_err(internal)?;
    Ok(Json(plans))
}
