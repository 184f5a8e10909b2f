use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tabled::Tabled;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    #[serde(default)]
    pub scope: String,
    pub obtained_at: u64,
}

#[derive(Debug, Clone)]
pub struct PkceSession {
    pub code_verifier: String,
    pub code_challenge: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    Unauthenticated,
    PendingCallback,
    Authenticated(Token),
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthState::Authenticated(_))
    }
}

/// Body of the token endpoint, successful or not.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: Option<String>,
    pub scope: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: String,
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExternalUrls {
    pub spotify: Option<String>,
}

/// Artist object as returned by the Web API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtistObject {
    pub name: String,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub external_urls: ExternalUrls,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artist {
    pub name: String,
    pub genres: Vec<String>,
    pub external_url: String,
}

impl From<ArtistObject> for Artist {
    fn from(obj: ArtistObject) -> Self {
        Artist {
            name: obj.name,
            genres: obj.genres,
            external_url: obj.external_urls.spotify.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopArtistsResponse {
    pub items: Vec<ArtistObject>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub artists: ArtistsPage,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtistsPage {
    #[serde(default)]
    pub items: Vec<ArtistObject>,
}

/// Favorite artist names (lower-cased) and genres of the user's top artists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TasteProfile {
    pub favorite_artist_names: HashSet<String>,
    pub genres: HashSet<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoredArtist {
    pub artist: Artist,
    pub score: u32,
    pub matched_genres: Vec<String>,
}

#[derive(Tabled)]
pub struct ScoredArtistTableRow {
    #[tabled(rename = "#")]
    pub rank: usize,
    pub name: String,
    pub score: u32,
    pub genres: String,
    #[tabled(rename = "genres in common")]
    pub matched_genres: String,
    pub link: String,
}
