use axum::{Extension, Router, routing::get};
use std::{io, sync::Arc};
use tokio::net::TcpListener;

use crate::{api, session::Session, spotify::SpotifyApi};

pub fn router<A: SpotifyApi + 'static>(session: Arc<Session<A>>) -> Router {
    Router::new()
        .route("/", get(api::landing::<A>))
        .route("/callback", get(api::callback::<A>))
        .route("/health", get(api::health::<A>))
        .layer(Extension(session))
}

/// Binds `addr` and serves the callback endpoints until the task is dropped.
pub async fn start_api_server<A: SpotifyApi + 'static>(
    session: Arc<Session<A>>,
    addr: &str,
) -> io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    serve(listener, session).await
}

pub async fn serve<A: SpotifyApi + 'static>(
    listener: TcpListener,
    session: Arc<Session<A>>,
) -> io::Result<()> {
    axum::serve(listener, router(session)).await
}
