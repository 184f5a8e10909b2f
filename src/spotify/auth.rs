use reqwest::{Client, Url};

use crate::{
    Error, ProviderError,
    config::{Config, ConfigError},
    error::Result,
    management::{LocalStore, TokenManager, VerifierManager},
    spotify::SpotifyApi,
    types::{AuthState, TokenResponse},
    utils,
};

/// Authorization code and error parameters of a redirect back from Spotify.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub error: Option<String>,
}

/// Starts the OAuth 2.0 PKCE login.
///
/// Generates a fresh code verifier, derives its S256 challenge, persists the
/// verifier for [`complete_login`] and returns the authorization URL the user
/// has to visit. Any verifier left over from an earlier attempt is replaced.
///
/// # Errors
///
/// Fails when the verifier cannot be written to the local store or when the
/// configured authorization URL is not a valid URL.
pub async fn begin_login(config: &Config, store: &LocalStore) -> Result<String> {
    let pkce = utils::generate_pkce_session();
    let auth_url = authorize_url(config, &pkce.code_challenge)?;

    VerifierManager::persist(store, &pkce.code_verifier).await?;

    Ok(auth_url)
}

/// Builds the authorization URL for the given code challenge.
pub fn authorize_url(config: &Config, code_challenge: &str) -> Result<String> {
    let url = Url::parse_with_params(
        &config.auth_url,
        &[
            ("response_type", "code"),
            ("client_id", config.client_id.as_str()),
            ("scope", config.scope.as_str()),
            ("redirect_uri", config.redirect_uri.as_str()),
            ("code_challenge_method", "S256"),
            ("code_challenge", code_challenge),
        ],
    )
    .map_err(|e| ConfigError::Invalid("SPOTIFY_API_AUTH_URL", e.to_string()))?;

    Ok(url.into())
}

/// Extracts `code` and `error` from a redirect URL or a bare query string.
///
/// Empty values count as absent.
pub fn parse_callback(current: &str) -> CallbackParams {
    let current = current.trim();
    let query = match Url::parse(current) {
        Ok(url) => url.query().unwrap_or_default().to_string(),
        Err(_) => current.trim_start_matches('?').to_string(),
    };

    let mut params = CallbackParams::default();
    if query.is_empty() {
        return params;
    }

    let Ok(mut base) = Url::parse("http://localhost/") else {
        return params;
    };
    base.set_query(Some(&query));

    for (key, value) in base.query_pairs() {
        if value.is_empty() {
            continue;
        }
        match key.as_ref() {
            "code" => params.code = Some(value.into_owned()),
            "error" => params.error = Some(value.into_owned()),
            _ => {}
        }
    }
    params
}

/// Finishes the login after Spotify redirected back, or restores a previous one.
///
/// With a `code` in `current` the persisted verifier is exchanged for an
/// access token, which is persisted on success. Without a code the result
/// only depends on whether a token was persisted before.
///
/// The verifier is single-use: it is discarded as soon as Spotify answered
/// the exchange. Only a transport failure keeps it, so the same redirect URL
/// can be retried.
///
/// # Errors
///
/// Returns [`Error::AuthExchange`] when the verifier is missing, Spotify
/// denied access, the exchange failed on the network, or the response
/// carried no `access_token`. The message includes Spotify's
/// `error_description` when there is one.
pub async fn complete_login<A: SpotifyApi + ?Sized>(
    api: &A,
    store: &LocalStore,
    current: &str,
) -> Result<AuthState> {
    let params = parse_callback(current);

    let Some(code) = params.code else {
        if let Some(error) = params.error {
            return Err(Error::AuthExchange(error));
        }

        return Ok(match TokenManager::load(store).await? {
            Some(mgr) => AuthState::Authenticated(mgr.into_token()),
            None => AuthState::Unauthenticated,
        });
    };

    let Some(verifier) = VerifierManager::load(store).await? else {
        return Err(Error::AuthExchange(
            "missing PKCE code verifier, run `festiby login` again".to_string(),
        ));
    };

    let response = match api.exchange_code(&code, &verifier).await {
        Ok(response) => response,
        Err(ProviderError::Http(e)) => {
            return Err(Error::AuthExchange(format!(
                "network error while contacting Spotify: {e}"
            )));
        }
        Err(e) => {
            VerifierManager::discard(store).await?;
            return Err(Error::AuthExchange(e.to_string()));
        }
    };

    VerifierManager::discard(store).await?;

    match response {
        TokenResponse {
            access_token: Some(access_token),
            scope,
            ..
        } if !access_token.is_empty() => {
            let token_mgr = TokenManager::from_access_token(access_token, scope);
            token_mgr.persist(store).await?;
            Ok(AuthState::Authenticated(token_mgr.into_token()))
        }
        TokenResponse {
            error,
            error_description,
            ..
        } => Err(Error::AuthExchange(
            error_description
                .or(error)
                .unwrap_or_else(|| "unknown error".to_string()),
        )),
    }
}

/// Exchanges an authorization code for an access token using PKCE.
///
/// Posts the form-encoded `authorization_code` grant to the token endpoint.
/// The JSON body is returned as-is so the caller can read `error` and
/// `error_description` from a rejected exchange.
///
/// # Errors
///
/// Transport failures yield [`ProviderError::Http`]. A non-2xx answer whose
/// body is not JSON yields the matching status error.
pub async fn exchange_code_pkce(
    client: &Client,
    config: &Config,
    code: &str,
    verifier: &str,
) -> std::result::Result<TokenResponse, ProviderError> {
    let res = client
        .post(&config.token_url)
        .form(&[
            ("client_id", config.client_id.as_str()),
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", config.redirect_uri.as_str()),
            ("code_verifier", verifier),
        ])
        .send()
        .await?;

    let status = res.status();
    let body = res.bytes().await?;

    match serde_json::from_slice::<TokenResponse>(&body) {
        Ok(json) => Ok(json),
        Err(_) if !status.is_success() => Err(ProviderError::from_status(status)),
        Err(_) => Ok(TokenResponse::default()),
    }
}
