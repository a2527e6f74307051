//! Google OAuth2 provider for Calendar access.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::oneshot;
use warp::Filter;

use crate::storage::{TokenSet, TokenStore};

const GOOGLE_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";

// Only calendar event access is needed; changing this invalidates stored tokens.
const CALENDAR_EVENTS_SCOPE: &str = "https://www.googleapis.com/auth/calendar.events";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoogleTokenResponse {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_in: u64,
    pub token_type: String,
    pub scope: String,
}

impl GoogleTokenResponse {
    fn into_token_set(self, previous_refresh: Option<String>) -> TokenSet {
        // Google omits refresh_token on refresh responses; keep the old one.
        let refresh_token = self.refresh_token.or(previous_refresh);
        TokenSet {
            access_token: self.access_token,
            refresh_token,
            expires_at: chrono::Utc::now().timestamp() + self.expires_in as i64,
            scopes: self.scope.split_whitespace().map(String::from).collect(),
        }
    }
}

pub struct GoogleAuth {
    pub client_id: String,
    pub client_secret: String,
    client: reqwest::Client,
}

impl GoogleAuth {
    pub fn new(client_id: String, client_secret: String) -> Self {
        Self {
            client_id,
            client_secret,
            client: reqwest::Client::new(),
        }
    }

    /// Generate authorization URL for the OAuth flow.
    /// Returns (url, state) where state must match on callback.
    pub fn authorization_url(&self, port: u16) -> (String, String) {
        let state = uuid::Uuid::new_v4().to_string();
        let redirect_uri = format!("http://localhost:{}/callback", port);

        let url = format!(
            "{}?client_id={}&redirect_uri={}&response_type=code&scope={}&state={}&access_type=offline&prompt=consent",
            GOOGLE_AUTH_URL,
            urlencoding::encode(&self.client_id),
            urlencoding::encode(&redirect_uri),
            urlencoding::encode(CALENDAR_EVENTS_SCOPE),
            urlencoding::encode(&state),
        );

        (url, state)
    }

    /// Exchange authorization code for tokens.
    #[tracing::instrument(skip(self, code), level = "info")]
    pub async fn exchange_code(&self, code: &str, port: u16) -> Result<GoogleTokenResponse> {
        let redirect_uri = format!("http://localhost:{}/callback", port);

        let response = self
            .client
            .post(GOOGLE_TOKEN_URL)
            .form(&[
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("code", code),
                ("grant_type", "authorization_code"),
                ("redirect_uri", &redirect_uri),
            ])
            .send()
            .await
            .context("Failed to send token request")?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            anyhow::bail!("Token exchange failed: {}", error_text);
        }

        response
            .json::<GoogleTokenResponse>()
            .await
            .context("Failed to parse token response")
    }

    /// Refresh an expired access token.
    #[tracing::instrument(skip(self, refresh_token), level = "info")]
    pub async fn refresh(&self, refresh_token: &str) -> Result<GoogleTokenResponse> {
        let response = self
            .client
            .post(GOOGLE_TOKEN_URL)
            .form(&[
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("refresh_token", refresh_token),
                ("grant_type", "refresh_token"),
            ])
            .send()
            .await
            .context("Failed to send refresh request")?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            anyhow::bail!("Token refresh failed: {}", error_text);
        }

        response
            .json::<GoogleTokenResponse>()
            .await
            .context("Failed to parse refresh response")
    }

    /// Perform the full OAuth2 flow with browser and local callback server,
    /// storing the resulting token.
    pub async fn authenticate(&self, store: &TokenStore) -> Result<TokenSet> {
        // Local callback server; the sender fires once on the first callback.
        let (tx, rx) = oneshot::channel();
        let tx = Arc::new(tokio::sync::Mutex::new(Some(tx)));

        let routes = warp::get()
            .and(warp::path("callback"))
            .and(warp::query::<std::collections::HashMap<String, String>>())
            .and(warp::any().map(move || tx.clone()))
            .and_then(
                |params: std::collections::HashMap<String, String>,
                 tx: Arc<tokio::sync::Mutex<Option<oneshot::Sender<(String, String)>>>>| async move {
                    let code = params.get("code").cloned().unwrap_or_default();
                    let state = params.get("state").cloned().unwrap_or_default();

                    if let Some(sender) = tx.lock().await.take() {
                        let _ = sender.send((code, state));
                    }

                    Ok::<_, warp::Rejection>(warp::reply::html(
                        "<html><body><h1>Authorization successful!</h1>\
                         <p>You can close this window and return to wodsync.</p></body></html>",
                    ))
                },
            );

        // Port 0 lets the OS pick a free port; the redirect URI must carry
        // whatever port we actually got.
        let (addr, server) = warp::serve(routes)
            .try_bind_ephemeral(([127, 0, 0, 1], 0))
            .context("Failed to bind local OAuth callback server")?;
        tokio::spawn(server);

        let port = addr.port();
        let (auth_url, expected_state) = self.authorization_url(port);

        tracing::info!("Opening browser for Google authorization");
        tracing::debug!("Auth URL: {}", auth_url);

        webbrowser::open(&auth_url).context("Failed to open browser")?;

        let (code, state) = rx.await.context("Failed to receive OAuth callback")?;

        if state != expected_state {
            anyhow::bail!("OAuth state mismatch");
        }
        if code.is_empty() {
            anyhow::bail!("OAuth callback carried no authorization code");
        }

        let token_set = self.exchange_code(&code, port).await?.into_token_set(None);
        store.store(&token_set)?;

        tracing::info!("Google authorization complete");
        Ok(token_set)
    }

    /// Produce a usable access token: the stored one if still fresh, a
    /// refreshed one if possible, otherwise a full interactive flow.
    pub async fn access_token(&self, store: &TokenStore) -> Result<String> {
        match store.retrieve() {
            Ok(token) if !token.needs_refresh() => Ok(token.access_token),
            Ok(token) => {
                if let Some(refresh_token) = token.refresh_token.clone() {
                    match self.refresh(&refresh_token).await {
                        Ok(response) => {
                            let refreshed = response.into_token_set(Some(refresh_token));
                            store.store(&refreshed)?;
                            Ok(refreshed.access_token)
                        }
                        Err(e) => {
                            tracing::warn!("Token refresh failed, re-authorizing: {}", e);
                            Ok(self.authenticate(store).await?.access_token)
                        }
                    }
                } else {
                    Ok(self.authenticate(store).await?.access_token)
                }
            }
            Err(_) => Ok(self.authenticate(store).await?.access_token),
        }
    }
}
