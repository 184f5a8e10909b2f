//! Festiby Artist Affinity Library
//!
//! This library logs a user in to Spotify with the OAuth 2.0 PKCE flow, builds
//! a taste profile from the user's top artists and ranks any list of artist
//! names by how well they match that profile.
//!
//! # Modules
//!
//! - `api` - HTTP endpoints for the local callback server
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration loaded from `.env` and environment variables
//! - `error` - Error types shared by the login flow and the scorer
//! - `management` - Local key/value store for the token and PKCE verifier
//! - `scorer` - Taste profile construction, artist scoring and ranking
//! - `server` - Local HTTP server for OAuth callbacks
//! - `session` - Explicit session context tying auth state and scoring together
//! - `spotify` - Spotify Web API client and login flow
//! - `types` - Data structures and type definitions
//! - `utils` - PKCE helpers and input parsing
//!
//! # Example
//!
//! ```
//! use festiby::{config, cli};
//!
//! #[tokio::main]
//! async fn main() -> festiby::Res<()> {
//!     config::load_env().await?;
//!     // Use CLI functions...
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod management;
pub mod scorer;
pub mod server;
pub mod session;
pub mod spotify;
pub mod types;
pub mod utils;

pub use error::{Error, ProviderError};

/// A convenient Result type alias for glue code that may fail in many ways.
///
/// Library operations return the typed [`Error`]; this alias is used where
/// errors of unrelated kinds are bubbled up together, such as while loading
/// the environment.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Opening browser for Spotify login...");
/// info!("Scoring {} artists", count);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// success!("Logged in as {}", name);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Each CLI command is one user action; when it fails the message is shown
/// and the process ends with exit code 1 so the user can correct the input
/// and run the command again.
///
/// # Example
///
/// ```
/// error!("Cannot load configuration: {}", e);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// # Example
///
/// ```
/// warning!("Failed to open browser, open this URL manually:\n{}", url);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
