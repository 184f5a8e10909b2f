mod common;

use std::time::Duration;

use common::{FakeSpotify, artist, authenticated_session, session, temp_store};
use festiby::{
    Error, ProviderError,
    management::{KEY_CODE_VERIFIER, TokenManager},
    types::{AuthState, TokenResponse},
    utils::generate_code_challenge,
};
use reqwest::{StatusCode, Url};

fn granted(token: &str) -> TokenResponse {
    TokenResponse {
        access_token: Some(token.to_string()),
        scope: Some("user-top-read".to_string()),
        ..Default::default()
    }
}

fn rejected(error: &str, description: Option<&str>) -> TokenResponse {
    TokenResponse {
        error: Some(error.to_string()),
        error_description: description.map(str::to_string),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_restore_without_token_is_unauthenticated() {
    let session = session(FakeSpotify::new());

    assert_eq!(session.restore().await.unwrap(), AuthState::Unauthenticated);
    assert!(session.api().calls().is_empty());
}

#[tokio::test]
async fn test_restore_with_persisted_token() {
    let session = authenticated_session(FakeSpotify::new()).await;

    match session.state().await {
        AuthState::Authenticated(token) => assert_eq!(token.access_token, "tok-1"),
        other => panic!("unexpected state {other:?}"),
    }
}

#[tokio::test]
async fn test_store_directory_is_removed_with_its_guard() {
    let (dir, store) = temp_store();
    store.set(KEY_CODE_VERIFIER, "verifier").await.unwrap();
    let path = dir.path().to_path_buf();
    assert!(path.join("store").is_dir());

    drop(dir);

    assert!(!path.exists());
}

#[tokio::test]
async fn test_begin_login_persists_verifier() {
    let session = session(FakeSpotify::new());

    let auth_url = session.begin_login().await.unwrap();

    let verifier = session.store().get(KEY_CODE_VERIFIER).await.unwrap().unwrap();
    assert_eq!(verifier.len(), 64);
    assert_eq!(session.state().await, AuthState::PendingCallback);

    let url = Url::parse(&auth_url).unwrap();
    let challenge = url
        .query_pairs()
        .find(|(k, _)| k == "code_challenge")
        .map(|(_, v)| v.into_owned());
    assert_eq!(challenge, Some(generate_code_challenge(&verifier)));
}

#[tokio::test]
async fn test_complete_login_exchanges_code_and_discards_verifier() {
    let session = session(FakeSpotify::new().with_token_response(granted("tok-new")));
    session.begin_login().await.unwrap();
    let verifier = session.store().get(KEY_CODE_VERIFIER).await.unwrap().unwrap();

    let state = session
        .complete_login("http://127.0.0.1:8888/callback?code=auth-code")
        .await
        .unwrap();

    match state {
        AuthState::Authenticated(token) => {
            assert_eq!(token.access_token, "tok-new");
            assert_eq!(token.scope, "user-top-read");
        }
        other => panic!("unexpected state {other:?}"),
    }
    assert_eq!(
        session.api().calls(),
        vec![format!("exchange:auth-code:{verifier}")]
    );

    let stored = TokenManager::load(session.store()).await.unwrap().unwrap();
    assert_eq!(stored.current_token().access_token, "tok-new");
    assert_eq!(session.store().get(KEY_CODE_VERIFIER).await.unwrap(), None);
    assert_eq!(session.last_error().await, None);
}

#[tokio::test]
async fn test_complete_login_surfaces_error_description() {
    let session = session(FakeSpotify::new().with_token_response(rejected(
        "invalid_grant",
        Some("Invalid authorization code"),
    )));
    session.begin_login().await.unwrap();

    let result = session.complete_login("?code=stale").await;

    match result {
        Err(Error::AuthExchange(msg)) => assert_eq!(msg, "Invalid authorization code"),
        other => panic!("unexpected result {other:?}"),
    }
    assert_eq!(session.state().await, AuthState::Unauthenticated);
    assert!(
        session
            .last_error()
            .await
            .unwrap()
            .contains("Invalid authorization code")
    );
    assert!(TokenManager::load(session.store()).await.unwrap().is_none());
    assert_eq!(session.store().get(KEY_CODE_VERIFIER).await.unwrap(), None);
}

#[tokio::test]
async fn test_complete_login_falls_back_to_error_code() {
    let session = session(FakeSpotify::new().with_token_response(rejected("invalid_client", None)));
    session.begin_login().await.unwrap();

    let result = session.complete_login("code=abc").await;

    assert!(matches!(result, Err(Error::AuthExchange(msg)) if msg == "invalid_client"));
}

#[tokio::test]
async fn test_complete_login_without_access_token_is_unknown_error() {
    let session = session(FakeSpotify::new());
    session.begin_login().await.unwrap();

    let result = session.complete_login("code=abc").await;

    assert!(matches!(result, Err(Error::AuthExchange(msg)) if msg == "unknown error"));
}

#[tokio::test]
async fn test_complete_login_without_verifier() {
    let session = session(FakeSpotify::new().with_token_response(granted("tok-new")));

    let result = session.complete_login("code=abc").await;

    assert!(matches!(result, Err(Error::AuthExchange(_))));
    assert!(session.api().calls().is_empty());
}

#[tokio::test]
async fn test_complete_login_with_denied_access() {
    let session = session(FakeSpotify::new());
    session.begin_login().await.unwrap();

    let result = session
        .complete_login("http://127.0.0.1:8888/callback?error=access_denied")
        .await;

    assert!(matches!(result, Err(Error::AuthExchange(msg)) if msg == "access_denied"));
    assert_eq!(session.state().await, AuthState::Unauthenticated);
    assert!(session.api().calls().is_empty());
}

#[tokio::test]
async fn test_rank_artists_end_to_end() {
    let fake = FakeSpotify::new()
        .with_top(vec![
            artist("Rosalía", &["flamenco pop", "pop"]),
            artist("C. Tangana", &["spanish hip hop", "trap latino"]),
        ])
        .with_artist(artist("Ibeyi", &["afropop"]))
        .with_artist(artist("Bad Bunny", &["reggaeton", "trap latino"]))
        .with_artist(artist("Rosalía", &["flamenco pop", "pop"]));
    let session = authenticated_session(fake).await;

    let ranked = session
        .rank_artists(&["Ibeyi", "Unknown Artist XYZ123", " Bad Bunny", "rosalía", ""])
        .await
        .unwrap();

    let summary: Vec<(&str, u32)> = ranked
        .iter()
        .map(|s| (s.artist.name.as_str(), s.score))
        .collect();
    assert_eq!(summary, vec![("Rosalía", 4), ("Bad Bunny", 1), ("Ibeyi", 0)]);
    assert_eq!(ranked[1].matched_genres, vec!["trap latino"]);
    assert!(!session.is_scoring());
}

#[tokio::test]
async fn test_rank_artists_empty_input_makes_no_request() {
    let session = authenticated_session(FakeSpotify::new()).await;

    let result = session.rank_artists(&["", "   ", "\t"]).await;

    assert!(matches!(result, Err(Error::Validation)));
    assert!(session.api().calls().is_empty());
}

#[tokio::test]
async fn test_rank_artists_requires_login() {
    let session = session(FakeSpotify::new());

    let result = session.rank_artists(&["Rosalía"]).await;

    assert!(matches!(result, Err(Error::NotAuthenticated)));
    assert!(session.api().calls().is_empty());
}

#[tokio::test]
async fn test_rank_artists_profile_unauthorized_aborts() {
    let fake = FakeSpotify::new()
        .failing_profile(StatusCode::UNAUTHORIZED)
        .with_artist(artist("Rosalía", &["flamenco pop"]));
    let session = authenticated_session(fake).await;

    let result = session.rank_artists(&["Rosalía", "Bad Bunny"]).await;

    assert!(matches!(
        result,
        Err(Error::ProfileFetch(ProviderError::AuthExpired(_)))
    ));
    assert!(session.api().search_calls().is_empty());
    assert!(!session.is_scoring());
}

#[tokio::test]
async fn test_rank_artists_rejects_concurrent_run() {
    let fake = FakeSpotify::new()
        .with_delay(Duration::from_millis(50))
        .with_artist(artist("Rosalía", &["flamenco pop"]));
    let session = authenticated_session(fake).await;

    let (first, second) = tokio::join!(
        session.rank_artists(&["Rosalía"]),
        session.rank_artists(&["Rosalía"])
    );

    assert_eq!(first.unwrap().len(), 1);
    assert!(matches!(second, Err(Error::ScoringInProgress)));
    assert!(!session.is_scoring());

    // the flag is released, a new run goes through
    assert_eq!(session.rank_artists(&["Rosalía"]).await.unwrap().len(), 1);
}
