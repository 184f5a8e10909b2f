use std::sync::Arc;

use axum::{
    Extension,
    extract::RawQuery,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};

use crate::{
    session::Session,
    spotify::{SpotifyApi, auth::parse_callback},
    types::AuthState,
    warning,
};

/// OAuth redirect target.
///
/// Hands the query string to [`Session::complete_login`]. A request carrying
/// neither `code` nor `error` is answered with 400 and leaves the pending
/// login untouched. After a successful exchange the browser is sent to `/`
/// so the authorization code disappears from the address bar.
pub async fn callback<A: SpotifyApi + 'static>(
    RawQuery(query): RawQuery,
    Extension(session): Extension<Arc<Session<A>>>,
) -> Response {
    let query = query.unwrap_or_default();
    let params = parse_callback(&query);
    if params.code.is_none() && params.error.is_none() {
        return missing_code();
    }

    match session.complete_login(&query).await {
        Ok(AuthState::Authenticated(_)) => Redirect::to("/").into_response(),
        Ok(_) => missing_code(),
        Err(e) => {
            warning!("Token exchange failed: {}", e);
            (
                StatusCode::BAD_REQUEST,
                Html(format!(
                    "<h4>Login failed.</h4><p>{}</p>",
                    html_escape::encode_text(&e.to_string())
                )),
            )
                .into_response()
        }
    }
}

/// Landing page once the code has been consumed.
pub async fn landing<A: SpotifyApi + 'static>(
    Extension(session): Extension<Arc<Session<A>>>,
) -> Html<String> {
    match session.state().await {
        AuthState::Authenticated(_) => Html(
            "<h2>Authentication successful.</h2><p>Close this window and return to the terminal.</p>"
                .to_string(),
        ),
        _ => match session.last_error().await {
            Some(e) => Html(format!(
                "<h4>Login failed.</h4><p>{}</p>",
                html_escape::encode_text(&e)
            )),
            None => Html("<h4>Waiting for Spotify login...</h4>".to_string()),
        },
    }
}

fn missing_code() -> Response {
    (
        StatusCode::BAD_REQUEST,
        Html("<h4>Missing authorization code.</h4>".to_string()),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    #[test]
    fn error_messages_are_escaped() {
        assert_eq!(
            html_escape::encode_text("<script>a&b</script>"),
            "&lt;script&gt;a&amp;b&lt;/script&gt;"
        );
    }
}
