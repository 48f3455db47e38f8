//! API routes.

pub mod convert;
pub mod health;

use crate::AppState;
use axum::Router;

/// Build the extension router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(convert::router())
        .merge(health::router())
        .with_state(state)
}
