use reqwest::StatusCode;
use thiserror::Error;

use crate::{config::ConfigError, management::StoreError};

/// Failure of a single request against the Spotify Web API.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The bearer token was rejected, typically because it expired.
    #[error("access token rejected by Spotify (HTTP {0})")]
    AuthExpired(StatusCode),

    #[error("Spotify API returned HTTP {0}")]
    Status(StatusCode),

    #[error("request to Spotify failed: {0}")]
    Http(#[from] reqwest::Error),
}

impl ProviderError {
    /// Maps a non-success status to the matching variant.
    pub fn from_status(status: StatusCode) -> Self {
        if status == StatusCode::UNAUTHORIZED {
            ProviderError::AuthExpired(status)
        } else {
            ProviderError::Status(status)
        }
    }
}

/// Errors surfaced at the boundary of a user action.
///
/// None of them are fatal to the session: the user corrects the input, logs
/// in again or simply retries.
#[derive(Debug, Error)]
pub enum Error {
    #[error("enter at least one artist")]
    Validation,

    #[error("authentication with Spotify failed: {0}")]
    AuthExchange(String),

    #[error("could not fetch your top artists from Spotify, are you logged in? ({0})")]
    ProfileFetch(#[source] ProviderError),

    #[error(transparent)]
    ProviderRequest(#[from] ProviderError),

    #[error("not logged in, run `festiby login` first")]
    NotAuthenticated,

    #[error("a scoring run is already in progress")]
    ScoringInProgress,

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthorized_maps_to_auth_expired() {
        assert!(matches!(
            ProviderError::from_status(StatusCode::UNAUTHORIZED),
            ProviderError::AuthExpired(_)
        ));
        assert!(matches!(
            ProviderError::from_status(StatusCode::FORBIDDEN),
            ProviderError::Status(StatusCode::FORBIDDEN)
        ));
    }

    #[test]
    fn validation_message_is_human_readable() {
        assert_eq!(Error::Validation.to_string(), "enter at least one artist");
    }
}
