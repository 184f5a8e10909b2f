//! Artist affinity scoring.
//!
//! A [`TasteProfile`] is built from the user's top artists. Each candidate
//! artist then scores [`FAVORITE_BONUS`] points when it is one of those top
//! artists, plus one point per genre it shares with the profile. Candidates
//! are ranked by score, highest first; equal scores keep their input order.

use std::collections::HashSet;

use crate::{
    ProviderError,
    spotify::SpotifyApi,
    types::{Artist, ScoredArtist, TasteProfile},
    utils,
};

/// Number of top artists the taste profile is built from.
pub const TOP_ARTISTS_LIMIT: u32 = 50;

/// Points for a candidate that is one of the user's own top artists.
pub const FAVORITE_BONUS: u32 = 2;

impl TasteProfile {
    pub fn from_artists(artists: &[Artist]) -> Self {
        Self {
            favorite_artist_names: artists.iter().map(|a| a.name.to_lowercase()).collect(),
            genres: artists
                .iter()
                .flat_map(|a| a.genres.iter().cloned())
                .collect::<HashSet<_>>(),
        }
    }

    pub fn is_favorite(&self, name: &str) -> bool {
        self.favorite_artist_names.contains(&name.to_lowercase())
    }
}

/// Fetches the current user and their top artists and derives the profile.
///
/// # Errors
///
/// Any failed request is returned unchanged; the caller decides how to
/// surface it. Nothing is retried.
pub async fn fetch_taste_profile<A: SpotifyApi + ?Sized>(
    api: &A,
    token: &str,
) -> Result<TasteProfile, ProviderError> {
    api.current_user(token).await?;
    let top_artists = api.top_artists(token, TOP_ARTISTS_LIMIT).await?;
    Ok(TasteProfile::from_artists(&top_artists))
}

/// Scores a single artist against the profile.
pub fn score_artist(artist: Artist, profile: &TasteProfile) -> ScoredArtist {
    let matched_genres: Vec<String> = artist
        .genres
        .iter()
        .filter(|g| profile.genres.contains(*g))
        .cloned()
        .collect();

    let bonus = if profile.is_favorite(&artist.name) {
        FAVORITE_BONUS
    } else {
        0
    };

    ScoredArtist {
        score: bonus + matched_genres.len() as u32,
        matched_genres,
        artist,
    }
}

/// Looks up every name and scores the first hit, in input order.
///
/// Names are trimmed and blank ones skipped. A name without search results is
/// dropped silently. The output is not ranked yet.
///
/// # Errors
///
/// The first failing search aborts the whole run.
pub async fn score_artists<A: SpotifyApi + ?Sized, S: AsRef<str>>(
    api: &A,
    names: &[S],
    profile: &TasteProfile,
    token: &str,
) -> Result<Vec<ScoredArtist>, ProviderError> {
    let mut scored = Vec::new();
    for name in utils::clean_artist_names(names) {
        let Some(artist) = api.search_artist(token, &name).await? else {
            continue;
        };
        scored.push(score_artist(artist, profile));
    }
    Ok(scored)
}

/// Orders scored artists by descending score.
///
/// The sort is stable, so artists with equal scores stay in input order.
pub fn rank(mut scored: Vec<ScoredArtist>) -> Vec<ScoredArtist> {
    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored
}

#[cfg(test)]
mod tests {
    use super::*;

    fn artist(name: &str, genres: &[&str]) -> Artist {
        Artist {
            name: name.to_string(),
            genres: genres.iter().map(|g| g.to_string()).collect(),
            external_url: String::new(),
        }
    }

    #[test]
    fn profile_lowercases_names_and_merges_genres() {
        let profile = TasteProfile::from_artists(&[
            artist("Bad Bunny", &["reggaeton", "trap latino"]),
            artist("C. Tangana", &["trap latino", "spanish pop"]),
        ]);
        assert!(profile.favorite_artist_names.contains("bad bunny"));
        assert!(profile.is_favorite("C. TANGANA"));
        assert_eq!(profile.genres.len(), 3);
    }

    #[test]
    fn matched_genres_follow_artist_order() {
        let profile = TasteProfile::from_artists(&[artist("x", &["b", "a"])]);
        let scored = score_artist(artist("y", &["a", "c", "b"]), &profile);
        assert_eq!(scored.matched_genres, vec!["a", "b"]);
        assert_eq!(scored.score, 2);
    }

    #[test]
    fn genre_match_is_case_sensitive() {
        let profile = TasteProfile::from_artists(&[artist("x", &["Flamenco"])]);
        assert_eq!(score_artist(artist("y", &["flamenco"]), &profile).score, 0);
    }
}
