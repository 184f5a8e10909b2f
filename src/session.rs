//! Explicit session context.
//!
//! A [`Session`] owns everything a user action needs: configuration, the local
//! store, the Spotify client, the current [`AuthState`], the last error to
//! show and the scoring in-flight flag. The CLI and the callback server share
//! one session behind an `Arc`.

use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::Mutex;

use crate::{
    Error,
    config::Config,
    error::Result,
    management::LocalStore,
    scorer,
    spotify::{SpotifyApi, auth},
    types::{AuthState, CurrentUser, ScoredArtist},
    utils,
};

pub struct Session<A: SpotifyApi> {
    config: Config,
    store: LocalStore,
    api: A,
    state: Mutex<AuthState>,
    last_error: Mutex<Option<String>>,
    scoring: AtomicBool,
}

/// Releases the scoring flag when a run ends, however it ends.
struct ScoringGuard<'a>(&'a AtomicBool);

impl<'a> ScoringGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Result<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| Error::ScoringInProgress)?;
        Ok(Self(flag))
    }
}

impl Drop for ScoringGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl<A: SpotifyApi> Session<A> {
    pub fn new(config: Config, store: LocalStore, api: A) -> Self {
        Self {
            config,
            store,
            api,
            state: Mutex::new(AuthState::Unauthenticated),
            last_error: Mutex::new(None),
            scoring: AtomicBool::new(false),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn store(&self) -> &LocalStore {
        &self.store
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub async fn state(&self) -> AuthState {
        self.state.lock().await.clone()
    }

    /// Message of the last failed login, cleared by the next successful one.
    pub async fn last_error(&self) -> Option<String> {
        self.last_error.lock().await.clone()
    }

    pub fn is_scoring(&self) -> bool {
        self.scoring.load(Ordering::Acquire)
    }

    /// Persists a new PKCE verifier and returns the authorization URL.
    pub async fn begin_login(&self) -> Result<String> {
        let url = auth::begin_login(&self.config, &self.store).await?;
        *self.state.lock().await = AuthState::PendingCallback;
        Ok(url)
    }

    /// Completes a login from a redirect URL or query string.
    ///
    /// The state lock is held across the exchange, so at most one exchange
    /// runs at a time. On failure the session is left unauthenticated and the
    /// error message is kept for [`Session::last_error`].
    pub async fn complete_login(&self, current: &str) -> Result<AuthState> {
        let mut state = self.state.lock().await;
        match auth::complete_login(&self.api, &self.store, current).await {
            Ok(new_state) => {
                *state = new_state.clone();
                if new_state.is_authenticated() {
                    *self.last_error.lock().await = None;
                }
                Ok(new_state)
            }
            Err(e) => {
                *state = AuthState::Unauthenticated;
                *self.last_error.lock().await = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Restores a previously persisted login.
    pub async fn restore(&self) -> Result<AuthState> {
        self.complete_login("").await
    }

    pub async fn current_user(&self) -> Result<CurrentUser> {
        let token = self.access_token().await?;
        Ok(self.api.current_user(&token).await?)
    }

    /// Ranks the given artist names by affinity to the user's top artists.
    ///
    /// # Errors
    ///
    /// - [`Error::Validation`] when no name is left after trimming; nothing
    ///   is sent to Spotify in that case
    /// - [`Error::ScoringInProgress`] when another run on this session has
    ///   not finished yet
    /// - [`Error::NotAuthenticated`] without a token
    /// - [`Error::ProfileFetch`] when the profile cannot be fetched; no
    ///   search is issued then
    /// - [`Error::ProviderRequest`] when an artist search fails
    pub async fn rank_artists<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<ScoredArtist>> {
        let names = utils::clean_artist_names(names);
        if names.is_empty() {
            return Err(Error::Validation);
        }

        let _guard = ScoringGuard::acquire(&self.scoring)?;
        let token = self.access_token().await?;

        let profile = scorer::fetch_taste_profile(&self.api, &token)
            .await
            .map_err(Error::ProfileFetch)?;
        let scored = scorer::score_artists(&self.api, names.as_slice(), &profile, &token).await?;

        Ok(scorer::rank(scored))
    }

    async fn access_token(&self) -> Result<String> {
        match &*self.state.lock().await {
            AuthState::Authenticated(token) => Ok(token.access_token.clone()),
            _ => Err(Error::NotAuthenticated),
        }
    }
}
