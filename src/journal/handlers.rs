use axum::{
    extract::{Path, State},
    routing::{get, post, put},
    Json, Router,
};
use time::Date;
use tracing::{info, instrument};

use super::{
    dto::{DaySummary, ExerciseResponse, NoteRequest, NoteResponse},
    repo,
};
use crate::{
    auth::AuthUser,
    http::{internal, ApiError},
    meals,
    profile::services::targets_for,
    state::AppState,
};

pub fn day_routes() -> Router<AppState> {
    Router::new()
        .route("/days/:date", get(get_day))
        .route("/days/:date/exercise", post(toggle_exercise))
        .route("/days/:date/note", put(put_note))
}

#[instrument(skip(state))]
pub async fn get_day(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(date): Path<Date>,
) -> Result<Json<DaySummary>, ApiError> {
    let log = repo::find(&state.db, user_id, date).await.map_err(internal)?;
    let meals = meals::repo::list_by_date(&state.db, user_id, date)
        .await
        .map_err(internal)?;
    let targets = targets_for(&state.db, &state.config.targets, user_id, date)
        .await
        .map_err(internal)?
        .map(|(_, t)| t);
    Ok(Json(DaySummary::build(
        date,
        log.exercise_day,
        log.note,
        meals,
        targets,
    )))
}

#[instrument(skip(state))]
pub async fn toggle_exercise(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(date): Path<Date>,
) -> Result<Json<ExerciseResponse>, ApiError> {
    let exercise_day = repo::toggle_exercise(&state.db, user_id, date)
        .await
        .map_err(internal)?;
    info!(%user_id, %date, exercise_day, "exercise day toggled");
    Ok(Json(ExerciseResponse { date, exercise_day }))
}

#[instrument(skip(state, body))]
pub async fn put_note(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(date): Path<Date>,
    Json(body): Json<NoteRequest>,
) -> Result<Json<NoteResponse>, ApiError> {
    repo::set_note(&state.db, user_id, date, &body.content)
        .await
        .map_err(internal)?;
    Ok(Json(NoteResponse {
        date,
        note: body.content,
    }))
}
