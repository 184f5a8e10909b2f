//! # Spotify Integration Module
//!
//! This module is the integration layer between Festiby and the Spotify Web
//! API. It covers the two places where Festiby talks to Spotify:
//!
//! ```text
//! Session (auth state, scoring guard)
//!          ↓
//! Spotify Integration Layer
//!     ├── Authentication (OAuth 2.0 PKCE)
//!     └── Artist Operations (current user, top artists, search)
//!          ↓
//! HTTP Layer (reqwest, JSON)
//!          ↓
//! Spotify Web API
//! ```
//!
//! ## Core Modules
//!
//! - [`auth`] - PKCE login: authorization URL, callback parsing, code exchange
//! - [`artists`] - Authenticated GET requests for the user and artist data
//!
//! ## The `SpotifyApi` seam
//!
//! Everything above this module talks to Spotify through the [`SpotifyApi`]
//! trait. [`SpotifyClient`] implements it with `reqwest`; tests provide an
//! in-memory implementation so the login flow and the scorer run without a
//! network.
//!
//! ## Error Handling
//!
//! Every request returns [`ProviderError`]:
//! - `401 Unauthorized` becomes [`ProviderError::AuthExpired`]
//! - any other non-2xx status becomes [`ProviderError::Status`]
//! - transport and decoding failures become [`ProviderError::Http`]
//!
//! Nothing is retried. Rate limiting is left to Spotify's own error responses.
//!
//! ## API Coverage
//!
//! - `POST /api/token` - Authorization code exchange
//! - `GET /me` - Current user profile
//! - `GET /me/top/artists` - User's top artists with genres
//! - `GET /search` - Artist search

use async_trait::async_trait;
use reqwest::Client;

use crate::{
    ProviderError,
    config::Config,
    types::{Artist, CurrentUser, TokenResponse},
};

pub mod artists;
pub mod auth;

/// Operations Festiby needs from the Spotify Web API.
#[async_trait]
pub trait SpotifyApi: Send + Sync {
    /// Exchanges an authorization code for an access token.
    ///
    /// The token endpoint's JSON body is returned whether or not it carries
    /// an `access_token`; deciding what a missing token means is up to the
    /// login flow.
    async fn exchange_code(&self, code: &str, verifier: &str)
    -> Result<TokenResponse, ProviderError>;

    async fn current_user(&self, token: &str) -> Result<CurrentUser, ProviderError>;

    async fn top_artists(&self, token: &str, limit: u32) -> Result<Vec<Artist>, ProviderError>;

    /// Returns the best match for `name`, or `None` when Spotify finds nothing.
    async fn search_artist(&self, token: &str, name: &str)
    -> Result<Option<Artist>, ProviderError>;
}

/// `reqwest` backed implementation of [`SpotifyApi`].
#[derive(Debug, Clone)]
pub struct SpotifyClient {
    http: Client,
    config: Config,
}

impl SpotifyClient {
    pub fn new(config: Config) -> Self {
        Self {
            http: Client::new(),
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

#[async_trait]
impl SpotifyApi for SpotifyClient {
    async fn exchange_code(
        &self,
        code: &str,
        verifier: &str,
    ) -> Result<TokenResponse, ProviderError> {
        auth::exchange_code_pkce(&self.http, &self.config, code, verifier).await
    }

    async fn current_user(&self, token: &str) -> Result<CurrentUser, ProviderError> {
        artists::get_current_user(&self.http, &self.config.api_url, token).await
    }

    async fn top_artists(&self, token: &str, limit: u32) -> Result<Vec<Artist>, ProviderError> {
        artists::get_top_artists(&self.http, &self.config.api_url, token, limit).await
    }

    async fn search_artist(
        &self,
        token: &str,
        name: &str,
    ) -> Result<Option<Artist>, ProviderError> {
        artists::search_artist(&self.http, &self.config.api_url, token, name).await
    }
}
