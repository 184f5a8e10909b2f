//! # API Module
//!
//! HTTP endpoints served by the local callback server while `festiby login`
//! waits for Spotify to redirect back.
//!
//! ## Endpoints
//!
//! - [`callback`] - OAuth redirect target; completes the PKCE exchange and
//!   redirects to `/` so the code is no longer visible in the browser.
//! - [`landing`] - `/`, tells the user whether the login worked.
//! - [`health`] - `/health`, status, version and auth state.
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use festiby::server;
//!
//! let app = server::router(session);
//! ```

mod callback;
mod health;

pub use callback::callback;
pub use callback::landing;
pub use health::health;
