use axum::{extract::State, http::StatusCode};

use hrdesk_core::health::readiness;

use crate::state::AppState;

pub async fn readyz(State(state): State<AppState>) -> StatusCode {
    let ready = state.db.ping().await.is_ok();
    if !ready {
        tracing::warn!("readiness probe: database unreachable");
    }
    readiness(ready)
}
