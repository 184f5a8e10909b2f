mod auth;
mod store;

pub use auth::TokenManager;
pub use auth::VerifierManager;
pub use store::KEY_ACCESS_TOKEN;
pub use store::KEY_CODE_VERIFIER;
pub use store::LocalStore;
pub use store::StoreError;
