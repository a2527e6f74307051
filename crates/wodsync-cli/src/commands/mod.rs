pub mod auth;
pub mod clean;
pub mod purge;
pub mod sync;

use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Utc;
use chrono_tz::Tz;

use wodsync_auth::{GoogleAuth, TokenStore};
use wodsync_calendar::{CalendarClient, Event};
use wodsync_core::Config;
use wodsync_sync::Executor;

/// Everything a reconciliation pass needs: an authorized client, the current
/// upcoming events, and an executor bound to the target calendar.
pub(crate) struct CalendarSession {
    pub client: CalendarClient,
    pub events: Vec<Event>,
    pub executor: Executor,
}

pub(crate) async fn open_session(config: &Config, dry_run: bool) -> Result<CalendarSession> {
    let tz: Tz = config
        .sync
        .timezone
        .parse()
        .map_err(|e| anyhow::anyhow!("unrecognized timezone {:?}: {}", config.sync.timezone, e))?;

    let store = TokenStore::new()?;
    let auth = GoogleAuth::new(
        config.google.client_id.clone(),
        config.google.client_secret.clone(),
    );
    let token = auth
        .access_token(&store)
        .await
        .context("Google authorization failed")?;

    let client = CalendarClient::new(&token);
    let events = client
        .list_upcoming(&config.google.calendar_id, Utc::now(), config.sync.max_results)
        .await
        .context("Failed to list calendar events")?;

    let executor = Executor::new(
        config.google.calendar_id.clone(),
        config.sync.prefix.clone(),
        tz,
        dry_run,
        Duration::from_millis(config.sync.throttle_ms),
    );

    Ok(CalendarSession {
        client,
        events,
        executor,
    })
}
