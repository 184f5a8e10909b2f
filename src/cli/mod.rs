//! # CLI Module
//!
//! User-facing commands of Festiby. Each command is one user action: it
//! drives the [`crate::session::Session`], renders the outcome and turns any
//! error into a single readable message.
//!
//! ## Commands
//!
//! - [`login`] - OAuth 2.0 PKCE login through the browser and a local callback server
//! - [`callback`] - Completes a login from a pasted redirect URL
//! - [`status`] - Shows whether a token is stored and who it belongs to
//! - [`rank`] - Ranks artist names by affinity to the user's top artists
//!
//! ## Usage Patterns
//!
//! ```bash
//! festiby login                              # Authenticate with Spotify
//! festiby rank "Rosalía" "C. Tangana"        # Rank names given as arguments
//! festiby rank --file lineup.txt --limit 10  # Rank a festival line-up
//! pbpaste | festiby rank --json              # Read names from stdin
//! ```

mod auth;
mod rank;

pub use auth::callback;
pub use auth::login;
pub use auth::status;
pub use rank::RankOptions;
pub use rank::rank;
