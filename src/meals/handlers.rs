use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    routing::{get, put},
    Json, Router,
};
use tracing::{error, info, instrument};
use uuid::Uuid;

use super::{
    dto::{CreateMealRequest, DateQuery, PeriodTotals, UpdateMealRequest},
    repo,
    services::{create_entry, days_logged, update_entry, MealError},
};
use crate::{
    auth::AuthUser,
    http::{bad_request, internal, not_found, ApiError},
    nutrition::{aggregate_range, daily_breakdown, DayCalories, MealEntry},
    state::AppState,
};

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/meals", get(list_meals))
        .route("/meals/calendar", get(calendar))
        .route("/meals/totals", get(period_totals))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/meals", axum::routing::post(create_meal))
        .route("/meals/:id", put(update_meal).delete(delete_meal))
}

fn meal_error(e: MealError) -> ApiError {
    match e {
        MealError::Invalid(v) => bad_request(v),
        MealError::NotFound => not_found("Meal"),
        MealError::Storage(e) => internal(e),
    }
}

#[instrument(skip(state))]
pub async fn list_meals(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(q): Query<DateQuery>,
) -> Result<Json<Vec<MealEntry>>, ApiError> {
    let range = q.range().map_err(bad_request)?;
    let meals = repo::list_range(&state.db, user_id, &range)
        .await
        .map_err(internal)?;
    Ok(Json(meals))
}

#[instrument(skip(state))]
pub async fn calendar(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(q): Query<DateQuery>,
) -> Result<Json<Vec<DayCalories>>, ApiError> {
    let range = q.range().map_err(bad_request)?;
    let meals = repo::list_range(&state.db, user_id, &range)
        .await
        .map_err(internal)?;
    Ok(Json(daily_breakdown(&meals, &range)))
}

#[instrument(skip(state))]
pub async fn period_totals(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(q): Query<DateQuery>,
) -> Result<Json<PeriodTotals>, ApiError> {
    let range = q.range().map_err(bad_request)?;
    let meals = repo::list_range(&state.db, user_id, &range)
        .await
        .map_err(internal)?;
    Ok(Json(PeriodTotals {
        from: range.from,
        to: range.to,
        totals: aggregate_range(&meals, &range),
        days_logged: days_logged(&meals),
    }))
}

#[instrument(skip(state, body))]
pub async fn create_meal(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(body): Json<CreateMealRequest>,
) -> Result<(StatusCode, HeaderMap, Json<MealEntry>), ApiError> {
    let entry = create_entry(&state, user_id, body).await.map_err(meal_error)?;

    let mut headers = HeaderMap::new();
    let location = format!("/api/v1/meals/{}", entry.id).parse().map_err(internal)?;
    headers.insert(axum::http::header::LOCATION, location);

    Ok((StatusCode::CREATED, headers, Json(entry)))
}

#[instrument(skip(state, body))]
pub async fn update_meal(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateMealRequest>,
) -> Result<Json<MealEntry>, ApiError> {
    let entry = update_entry(&state, user_id, id, body)
        .await
        .map_err(meal_error)?;
    Ok(Json(entry))
}

#[instrument(skip(state))]
pub async fn delete_meal(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    match repo::delete(&state.db, user_id, id).await {
        Ok(true) => {
            info!(%user_id, %id, "meal deleted");
            Ok(StatusCode::NO_CONTENT)
        }
        Ok(false) => Err(not_found("Meal")),
        Err(e) => {
            error!(error = %e, %user_id, %id, "delete_meal failed");
            Err(internal(e))
        }
    }
}
