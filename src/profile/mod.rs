mod dto;
pub mod handlers;
pub mod repo;
mod repo_types;
pub mod services;

pub use repo_types::Profile;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    Router::new().merge(handlers::profile_routes())
}
