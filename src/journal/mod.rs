//! Per-date exercise flag and free-text notes, plus the day summary that
//! ties meals to targets.

mod dto;
pub mod handlers;
pub mod repo;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    Router::new().merge(handlers::day_routes())
}
