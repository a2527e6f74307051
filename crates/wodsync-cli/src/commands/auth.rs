use anyhow::Result;
use clap::Subcommand;

use wodsync_auth::{GoogleAuth, TokenStore};
use wodsync_core::Config;

#[derive(Subcommand)]
pub enum AuthAction {
    /// Run the interactive Google authorization flow
    Login,
    /// Show whether a usable Google token is stored
    Status,
    /// Remove the stored Google token
    Logout,
}

pub async fn run(config: &Config, action: AuthAction) -> Result<()> {
    let store = TokenStore::new()?;

    match action {
        AuthAction::Login => {
            let auth = GoogleAuth::new(
                config.google.client_id.clone(),
                config.google.client_secret.clone(),
            );
            auth.authenticate(&store).await?;
            println!("Google authorization stored");
        }
        AuthAction::Status => match store.retrieve() {
            Ok(token) if !token.is_expired() => {
                let expires = chrono::DateTime::from_timestamp(token.expires_at, 0)
                    .map(|dt| dt.to_rfc3339())
                    .unwrap_or_else(|| token.expires_at.to_string());
                println!("Authorized; access token expires at {}", expires);
            }
            Ok(token) => {
                if token.refresh_token.is_some() {
                    println!("Access token expired; will refresh on next run");
                } else {
                    println!("Token expired; run `wodsync auth login`");
                }
            }
            Err(_) => println!("Not authorized; run `wodsync auth login`"),
        },
        AuthAction::Logout => {
            store.delete()?;
            println!("Removed stored Google token");
        }
    }

    Ok(())
}
