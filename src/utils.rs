use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::{Rng, distr::Alphanumeric};
use sha2::{Digest, Sha256};

use crate::types::{PkceSession, ScoredArtist, ScoredArtistTableRow};

pub const CODE_VERIFIER_LEN: usize = 64;

pub fn generate_code_verifier() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(CODE_VERIFIER_LEN)
        .map(char::from)
        .collect()
}

pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

pub fn generate_pkce_session() -> PkceSession {
    let code_verifier = generate_code_verifier();
    let code_challenge = generate_code_challenge(&code_verifier);
    PkceSession {
        code_verifier,
        code_challenge,
    }
}

/// Splits pasted text into artist names, one per line.
///
/// Surrounding whitespace is trimmed and blank lines are dropped; the order
/// of the remaining names is kept.
pub fn parse_artist_names(input: &str) -> Vec<String> {
    input
        .lines()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// Applies the same trimming rules to names that are already split.
pub fn clean_artist_names<S: AsRef<str>>(names: &[S]) -> Vec<String> {
    names
        .iter()
        .flat_map(|name| parse_artist_names(name.as_ref()))
        .collect()
}

pub fn to_table_rows(ranked: &[ScoredArtist]) -> Vec<ScoredArtistTableRow> {
    ranked
        .iter()
        .enumerate()
        .map(|(i, s)| ScoredArtistTableRow {
            rank: i + 1,
            name: s.artist.name.clone(),
            score: s.score,
            genres: s.artist.genres.join(", "),
            matched_genres: s.matched_genres.join(", "),
            link: s.artist.external_url.clone(),
        })
        .collect()
}
