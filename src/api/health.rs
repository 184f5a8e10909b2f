use std::sync::Arc;

use axum::{Extension, response::Json};
use serde_json::{Value, json};

use crate::{session::Session, spotify::SpotifyApi, types::AuthState};

pub async fn health<A: SpotifyApi + 'static>(
    Extension(session): Extension<Arc<Session<A>>>,
) -> Json<Value> {
    let auth = match session.state().await {
        AuthState::Unauthenticated => "unauthenticated",
        AuthState::PendingCallback => "pending_callback",
        AuthState::Authenticated(_) => "authenticated",
    };

    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "auth": auth
    }))
}
