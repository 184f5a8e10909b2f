//! Configuration management for Festiby.
//!
//! This module handles loading configuration values from environment variables
//! and `.env` files. Values are collected into a [`Config`] that is handed to
//! the session explicitly; nothing reads the environment after start-up.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults (where applicable)

use std::{env, path::PathBuf};

use thiserror::Error;

use crate::Res;

pub const DEFAULT_REDIRECT_URI: &str = "http://127.0.0.1:8888/callback";
pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:8888";
pub const DEFAULT_SCOPE: &str = "user-top-read";
pub const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{0} is invalid: {1}")]
    Invalid(&'static str, String),
}

/// Runtime configuration for the login flow and the Web API client.
#[derive(Debug, Clone)]
pub struct Config {
    pub client_id: String,
    pub redirect_uri: String,
    pub scope: String,
    pub auth_url: String,
    pub token_url: String,
    pub api_url: String,
    pub server_addr: String,
}

impl Config {
    /// Builds a configuration from the process environment.
    ///
    /// Only `SPOTIFY_API_AUTH_CLIENT_ID` is required; every other value falls
    /// back to the public Spotify endpoints and a loopback redirect.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] when the client ID is not set or empty
    /// and [`ConfigError::Invalid`] when the redirect URI is not a valid URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        let client_id = env::var("SPOTIFY_API_AUTH_CLIENT_ID")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::Missing("SPOTIFY_API_AUTH_CLIENT_ID"))?;

        let redirect_uri = var_or("SPOTIFY_API_REDIRECT_URI", DEFAULT_REDIRECT_URI);
        reqwest::Url::parse(&redirect_uri)
            .map_err(|e| ConfigError::Invalid("SPOTIFY_API_REDIRECT_URI", e.to_string()))?;

        Ok(Self {
            client_id,
            redirect_uri,
            scope: var_or("SPOTIFY_API_AUTH_SCOPE", DEFAULT_SCOPE),
            auth_url: var_or("SPOTIFY_API_AUTH_URL", DEFAULT_AUTH_URL),
            token_url: var_or("SPOTIFY_API_TOKEN_URL", DEFAULT_TOKEN_URL),
            api_url: trim_slash(var_or("SPOTIFY_API_URL", DEFAULT_API_URL)),
            server_addr: var_or("SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS),
        })
    }

    /// Configuration with default endpoints for the given client ID.
    pub fn with_client_id(client_id: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            redirect_uri: DEFAULT_REDIRECT_URI.to_string(),
            scope: DEFAULT_SCOPE.to_string(),
            auth_url: DEFAULT_AUTH_URL.to_string(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            server_addr: DEFAULT_SERVER_ADDRESS.to_string(),
        }
    }
}

/// Loads environment variables from a `.env` file in the local data directory.
///
/// Creates the directory structure if it doesn't exist and loads variables
/// from `festiby/.env` below the platform-specific local data directory:
/// - Linux: `~/.local/share/festiby/.env`
/// - macOS: `~/Library/Application Support/festiby/.env`
/// - Windows: `%LOCALAPPDATA%/festiby/.env`
///
/// A missing `.env` file is not an error; variables may come from the
/// environment alone.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or an existing `.env`
/// file cannot be parsed.
pub async fn load_env() -> Res<()> {
    let path = data_dir().join(".env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent).await?;
    }

    if path.is_file() {
        dotenv::from_path(&path)?;
    }
    Ok(())
}

/// Returns the application's directory below the local data directory.
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("festiby");
    path
}

fn var_or(name: &str, default: &str) -> String {
    env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn trim_slash(mut url: String) -> String {
    while url.ends_with('/') {
        url.pop();
    }
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_client_id_uses_public_endpoints() {
        let config = Config::with_client_id("abc");
        assert_eq!(config.client_id, "abc");
        assert_eq!(config.scope, "user-top-read");
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.redirect_uri, DEFAULT_REDIRECT_URI);
    }

    #[test]
    fn trim_slash_removes_trailing_slashes() {
        assert_eq!(trim_slash("http://x/v1//".to_string()), "http://x/v1");
        assert_eq!(trim_slash("http://x/v1".to_string()), "http://x/v1");
    }
}
