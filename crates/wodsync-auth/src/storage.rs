use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Token set for OAuth2 authentication
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenSet {
    /// Access token for API requests
    pub access_token: String,

    /// Optional refresh token for token renewal
    pub refresh_token: Option<String>,

    /// Token expiration timestamp (Unix timestamp)
    pub expires_at: i64,

    /// Scopes granted to this token
    pub scopes: Vec<String>,
}

impl TokenSet {
    /// Check if the token needs refresh (within 5 minutes of expiry)
    pub fn needs_refresh(&self) -> bool {
        let now = chrono::Utc::now().timestamp();
        now >= self.expires_at - 300 // 5 minute buffer
    }

    /// Check if the token is expired
    pub fn is_expired(&self) -> bool {
        let now = chrono::Utc::now().timestamp();
        now >= self.expires_at
    }
}

/// File-backed storage for the Google OAuth token, kept in the user's
/// config directory.
pub struct TokenStore {
    root: PathBuf,
}

impl TokenStore {
    /// Store rooted at the platform config directory.
    pub fn new() -> Result<Self> {
        let root = dirs::config_dir()
            .context("Failed to get config directory")?
            .join("wodsync")
            .join("tokens");
        Ok(Self { root })
    }

    /// Store rooted at an explicit directory (used by tests).
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn token_path(&self) -> Result<PathBuf> {
        fs::create_dir_all(&self.root).context("Failed to create tokens directory")?;
        Ok(self.root.join("google.json"))
    }

    /// Store a token set
    pub fn store(&self, token_set: &TokenSet) -> Result<()> {
        let path = self.token_path()?;

        let json =
            serde_json::to_string_pretty(token_set).context("Failed to serialize token set")?;

        fs::write(&path, &json).context("Failed to write token file")?;

        tracing::info!("Stored Google token at {:?}", path);
        Ok(())
    }

    /// Retrieve the stored token set
    pub fn retrieve(&self) -> Result<TokenSet> {
        let path = self.token_path()?;

        let json = fs::read_to_string(&path).context("Failed to read token file")?;

        let token_set: TokenSet =
            serde_json::from_str(&json).context("Failed to deserialize token set")?;

        Ok(token_set)
    }

    /// Delete the stored token set
    pub fn delete(&self) -> Result<()> {
        let path = self.token_path()?;

        if path.exists() {
            fs::remove_file(&path).context("Failed to delete token file")?;
            tracing::info!("Deleted stored Google token");
        }

        Ok(())
    }

    /// Check if a token is stored
    pub fn has_token(&self) -> bool {
        self.retrieve().is_ok()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;

    #[test]
    fn token_expiry() {
        let now = chrono::Utc::now().timestamp();

        // Expired token
        let expired = TokenSet {
            access_token: "test".to_string(),
            refresh_token: None,
            expires_at: now - 3600, // 1 hour ago
            scopes: vec![],
        };
        assert!(expired.is_expired());
        assert!(expired.needs_refresh());

        // Valid token
        let valid = TokenSet {
            access_token: "test".to_string(),
            refresh_token: None,
            expires_at: now + 3600, // 1 hour from now
            scopes: vec![],
        };
        assert!(!valid.is_expired());
        assert!(!valid.needs_refresh());

        // Needs refresh soon
        let soon = TokenSet {
            access_token: "test".to_string(),
            refresh_token: None,
            expires_at: now + 200, // 3 minutes from now
            scopes: vec![],
        };
        assert!(!soon.is_expired());
        assert!(soon.needs_refresh());
    }

    #[test]
    fn store_retrieve_delete_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = TokenStore::with_root(dir.path());

        assert!(!store.has_token());

        let token = TokenSet {
            access_token: "abc".to_string(),
            refresh_token: Some("refresh".to_string()),
            expires_at: chrono::Utc::now().timestamp() + 3600,
            scopes: vec!["https://www.googleapis.com/auth/calendar.events".to_string()],
        };
        store.store(&token).unwrap();

        let loaded = store.retrieve().unwrap();
        assert_eq!(loaded.access_token, "abc");
        assert_eq!(loaded.refresh_token.as_deref(), Some("refresh"));

        store.delete().unwrap();
        assert!(!store.has_token());
    }
}
