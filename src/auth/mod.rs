//! Account gating. Sign-up, sign-in and session refresh live with the
//! hosted identity provider; this service only verifies its tokens.

use crate::state::AppState;
use axum::Router;

pub mod claims;
pub(crate) mod extractors;
pub mod handlers;
pub mod jwt;

pub use extractors::AuthUser;

pub fn router() -> Router<AppState> {
    Router::new().merge(handlers::me_routes())
}
