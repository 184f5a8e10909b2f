#![allow(dead_code)]

use std::{collections::HashMap, ops::Deref, sync::Mutex, time::Duration};

use async_trait::async_trait;
use festiby::{
    ProviderError,
    config::Config,
    management::{LocalStore, TokenManager},
    session::Session,
    spotify::SpotifyApi,
    types::{Artist, CurrentUser, TokenResponse},
};
use reqwest::StatusCode;
use tempfile::TempDir;

pub fn artist(name: &str, genres: &[&str]) -> Artist {
    Artist {
        name: name.to_string(),
        genres: genres.iter().map(|g| g.to_string()).collect(),
        external_url: format!("https://open.spotify.com/artist/{}", name.len()),
    }
}

/// Store in a fresh temporary directory, removed when the guard drops.
pub fn temp_store() -> (TempDir, LocalStore) {
    let dir = tempfile::tempdir().unwrap();
    let store = LocalStore::new(dir.path().join("store"));
    (dir, store)
}

/// Session whose store lives as long as the session itself.
pub struct TestSession<A: SpotifyApi> {
    session: Session<A>,
    dir: TempDir,
}

impl<A: SpotifyApi> TestSession<A> {
    pub fn new(config: Config, api: A) -> Self {
        let (dir, store) = temp_store();
        Self {
            session: Session::new(config, store, api),
            dir,
        }
    }

    /// Splits off the directory guard, e.g. to share the session in an `Arc`.
    pub fn into_parts(self) -> (TempDir, Session<A>) {
        (self.dir, self.session)
    }
}

impl<A: SpotifyApi> Deref for TestSession<A> {
    type Target = Session<A>;

    fn deref(&self) -> &Session<A> {
        &self.session
    }
}

/// In-memory Spotify that records every call it receives.
#[derive(Default)]
pub struct FakeSpotify {
    top: Vec<Artist>,
    catalog: HashMap<String, Artist>,
    profile_failure: Option<StatusCode>,
    search_failure: Option<(String, StatusCode)>,
    token_response: TokenResponse,
    delay: Duration,
    calls: Mutex<Vec<String>>,
}

impl FakeSpotify {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_top(mut self, top: Vec<Artist>) -> Self {
        self.top = top;
        self
    }

    /// Makes `artist` the search hit for its own name, case-insensitively.
    pub fn with_artist(mut self, artist: Artist) -> Self {
        self.catalog.insert(artist.name.to_lowercase(), artist);
        self
    }

    pub fn failing_profile(mut self, status: StatusCode) -> Self {
        self.profile_failure = Some(status);
        self
    }

    pub fn failing_search(mut self, name: &str, status: StatusCode) -> Self {
        self.search_failure = Some((name.to_string(), status));
        self
    }

    pub fn with_token_response(mut self, response: TokenResponse) -> Self {
        self.token_response = response;
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn search_calls(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| c.strip_prefix("search:").map(str::to_string))
            .collect()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    async fn pause(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}

#[async_trait]
impl SpotifyApi for FakeSpotify {
    async fn exchange_code(
        &self,
        code: &str,
        verifier: &str,
    ) -> Result<TokenResponse, ProviderError> {
        self.record(format!("exchange:{code}:{verifier}"));
        Ok(self.token_response.clone())
    }

    async fn current_user(&self, token: &str) -> Result<CurrentUser, ProviderError> {
        self.record(format!("me:{token}"));
        self.pause().await;
        if let Some(status) = self.profile_failure {
            return Err(ProviderError::from_status(status));
        }
        Ok(CurrentUser {
            id: "user-1".to_string(),
            display_name: Some("Ana".to_string()),
        })
    }

    async fn top_artists(&self, _token: &str, limit: u32) -> Result<Vec<Artist>, ProviderError> {
        self.record(format!("top:{limit}"));
        if let Some(status) = self.profile_failure {
            return Err(ProviderError::from_status(status));
        }
        Ok(self.top.iter().take(limit as usize).cloned().collect())
    }

    async fn search_artist(
        &self,
        _token: &str,
        name: &str,
    ) -> Result<Option<Artist>, ProviderError> {
        self.record(format!("search:{name}"));
        if let Some((failing, status)) = &self.search_failure {
            if failing == name {
                return Err(ProviderError::from_status(*status));
            }
        }
        Ok(self.catalog.get(&name.to_lowercase()).cloned())
    }
}

pub fn session(fake: FakeSpotify) -> TestSession<FakeSpotify> {
    TestSession::new(Config::with_client_id("client-1"), fake)
}

/// Session with a persisted token, already restored.
pub async fn authenticated_session(fake: FakeSpotify) -> TestSession<FakeSpotify> {
    let session = session(fake);
    TokenManager::from_access_token("tok-1".to_string(), None)
        .persist(session.store())
        .await
        .unwrap();
    assert!(session.restore().await.unwrap().is_authenticated());
    session
}
