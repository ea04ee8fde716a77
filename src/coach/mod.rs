//! AI-written coaching based on the profile, targets, meals and measurements.

mod dto;
pub mod handlers;
pub mod services;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    Router::new().merge(handlers::coach_routes())
}
