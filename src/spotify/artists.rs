use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

use crate::{
    ProviderError,
    types::{Artist, CurrentUser, SearchResponse, TopArtistsResponse},
};

/// Retrieves the profile of the user the token belongs to.
///
/// # Arguments
///
/// * `client` - HTTP client to send the request with
/// * `api_url` - Base URL of the Web API, e.g. `https://api.spotify.com/v1`
/// * `token` - Bearer token of the logged in user
///
/// # Errors
///
/// `401` yields [`ProviderError::AuthExpired`]; every other non-2xx status
/// yields [`ProviderError::Status`].
pub async fn get_current_user(
    client: &Client,
    api_url: &str,
    token: &str,
) -> Result<CurrentUser, ProviderError> {
    let response = client
        .get(format!("{api_url}/me"))
        .bearer_auth(token)
        .send()
        .await?;

    decode(response).await
}

/// Retrieves up to `limit` of the user's top artists, genres included.
///
/// Spotify caps `limit` at 50, which is what the taste profile asks for.
pub async fn get_top_artists(
    client: &Client,
    api_url: &str,
    token: &str,
    limit: u32,
) -> Result<Vec<Artist>, ProviderError> {
    let response = client
        .get(format!("{api_url}/me/top/artists"))
        .query(&[("limit", limit.to_string())])
        .bearer_auth(token)
        .send()
        .await?;

    let res: TopArtistsResponse = decode(response).await?;
    Ok(res.items.into_iter().map(Artist::from).collect())
}

/// Searches for an artist by name and returns the first hit.
///
/// An empty result set is not an error: it yields `Ok(None)`.
///
/// # Example
///
/// ```
/// let artist = search_artist(&client, api_url, token, "Rosalía").await?;
/// if let Some(a) = artist {
///     println!("{} ({})", a.name, a.genres.join(", "));
/// }
/// ```
pub async fn search_artist(
    client: &Client,
    api_url: &str,
    token: &str,
    name: &str,
) -> Result<Option<Artist>, ProviderError> {
    let response = client
        .get(format!("{api_url}/search"))
        .query(&[("q", name), ("type", "artist"), ("limit", "1")])
        .bearer_auth(token)
        .send()
        .await?;

    let res: SearchResponse = decode(response).await?;
    Ok(res.artists.items.into_iter().next().map(Artist::from))
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ProviderError> {
    let status = response.status();
    if !status.is_success() {
        return Err(ProviderError::from_status(status));
    }

    Ok(response.json::<T>().await?)
}
