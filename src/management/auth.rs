use chrono::Utc;

use crate::{
    management::store::{KEY_ACCESS_TOKEN, KEY_CODE_VERIFIER, LocalStore, StoreError},
    types::Token,
};

pub struct TokenManager {
    token: Token,
}

impl TokenManager {
    pub fn new(token: Token) -> Self {
        TokenManager { token }
    }

    /// Wraps a freshly exchanged access token, stamped with the current time.
    pub fn from_access_token(access_token: String, scope: Option<String>) -> Self {
        Self::new(Token {
            access_token,
            scope: scope.unwrap_or_default(),
            obtained_at: Utc::now().timestamp() as u64,
        })
    }

    pub async fn load(store: &LocalStore) -> Result<Option<Self>, StoreError> {
        let Some(content) = store.get(KEY_ACCESS_TOKEN).await? else {
            return Ok(None);
        };
        let token: Token = serde_json::from_str(&content)?;
        Ok(Some(Self { token }))
    }

    pub async fn persist(&self, store: &LocalStore) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(&self.token)?;
        store.set(KEY_ACCESS_TOKEN, &json).await
    }

    pub fn current_token(&self) -> &Token {
        &self.token
    }

    pub fn into_token(self) -> Token {
        self.token
    }
}

/// Keeps the PKCE code verifier between the redirect and the token exchange.
pub struct VerifierManager;

impl VerifierManager {
    pub async fn persist(store: &LocalStore, verifier: &str) -> Result<(), StoreError> {
        store.set(KEY_CODE_VERIFIER, verifier).await
    }

    pub async fn load(store: &LocalStore) -> Result<Option<String>, StoreError> {
        Ok(store
            .get(KEY_CODE_VERIFIER)
            .await?
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty()))
    }

    pub async fn discard(store: &LocalStore) -> Result<(), StoreError> {
        store.remove(KEY_CODE_VERIFIER).await
    }
}
