use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use chrono::DateTime;

use crate::{
    error, info,
    server::start_api_server,
    session::Session,
    spotify::SpotifyApi,
    success,
    types::{AuthState, Token},
    warning,
};

/// Runs the complete OAuth 2.0 PKCE login.
///
/// 1. Generates and persists a code verifier, derives the challenge
/// 2. Starts the local callback server
/// 3. Opens the authorization URL in the default browser
/// 4. Waits for the callback to exchange the code for a token
///
/// Browser launch failures print the URL for manual navigation. A rejected
/// exchange or a timeout ends the program with an error message.
pub async fn login<A: SpotifyApi + 'static>(session: Arc<Session<A>>, timeout: Duration) {
    let auth_url = match session.begin_login().await {
        Ok(url) => url,
        Err(e) => error!("Cannot start login: {}", e),
    };

    let server_session = Arc::clone(&session);
    let addr = session.config().server_addr.clone();
    let server = tokio::spawn(async move {
        if let Err(e) = start_api_server(server_session, &addr).await {
            warning!(
                "Callback server on {} stopped: {}\nPaste the redirect URL with `festiby callback <url>` instead.",
                addr,
                e
            );
        }
    });

    if webbrowser::open(&auth_url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        )
    } else {
        info!("Continue the login in your browser.");
    }

    let token = wait_for_login(&session, timeout).await;

    // let the browser follow the redirect to the landing page
    tokio::time::sleep(Duration::from_millis(500)).await;
    server.abort();

    match token {
        Some(t) => {
            success!("Authentication successful!");
            print_token_info(&t);
            greet(&session).await;
        }
        None => match session.last_error().await {
            Some(e) => error!("{}", e),
            None => error!("Authentication timed out after {}s.", timeout.as_secs()),
        },
    }
}

/// Completes a login from a redirect URL pasted by the user.
pub async fn callback<A: SpotifyApi>(session: &Session<A>, url: &str) {
    match session.complete_login(url).await {
        Ok(AuthState::Authenticated(t)) => {
            success!("Authentication successful!");
            print_token_info(&t);
            greet(session).await;
        }
        Ok(_) => error!("No authorization code found in the given URL."),
        Err(e) => error!("{}", e),
    }
}

/// Shows whether a token is stored and greets the user.
pub async fn status<A: SpotifyApi>(session: &Session<A>) {
    match session.restore().await {
        Ok(AuthState::Authenticated(t)) => {
            success!("Logged in.");
            print_token_info(&t);
            greet(session).await;
        }
        Ok(_) => warning!("Not logged in. Run `festiby login`."),
        Err(e) => error!("Cannot read login state: {}", e),
    }
}

async fn wait_for_login<A: SpotifyApi>(session: &Session<A>, max_wait: Duration) -> Option<Token> {
    let start = Instant::now();

    while start.elapsed() < max_wait {
        match session.state().await {
            AuthState::Authenticated(token) => return Some(token),
            AuthState::Unauthenticated => return None,
            AuthState::PendingCallback => {}
        }
        tokio::time::sleep(Duration::from_millis(500)).await;
    }

    None
}

async fn greet<A: SpotifyApi>(session: &Session<A>) {
    match session.current_user().await {
        Ok(user) => info!("Hello, {}!", user.display_name.unwrap_or(user.id)),
        Err(e) => warning!("Could not fetch your Spotify profile: {}", e),
    }
}

fn print_token_info(token: &Token) {
    if let Some(obtained) = DateTime::from_timestamp(token.obtained_at as i64, 0) {
        info!("Token obtained {}", obtained.format("%Y-%m-%d %H:%M UTC"));
    }
    if !token.scope.is_empty() {
        info!("Granted scope: {}", token.scope);
    }
}
