use anyhow::{Context, Result};

use wodsync_core::Config;
use wodsync_sync::plan_sync;
use wodsync_wodify::WodifyClient;

/// One full reconciliation run: fetch classes, fetch events, plan, execute.
pub async fn run(config: &Config, dry_run: bool) -> Result<()> {
    let wodify = WodifyClient::new(&config.wodify.api_key);
    let classes = wodify
        .upcoming_classes(&config.wodify.coach)
        .await
        .context("Failed to fetch Wodify classes")?;

    let session = super::open_session(config, dry_run).await?;

    let actions = plan_sync(&classes, &session.events, &config.sync.prefix);
    if actions.is_empty() {
        println!(
            "Calendar already up to date ({} upcoming classes)",
            classes.len()
        );
        return Ok(());
    }

    let report = session.executor.run(&actions, &session.client).await?;
    if dry_run {
        println!("Dry run: {} actions planned, none applied", actions.len());
    } else {
        println!(
            "Created {} and deleted {} events",
            report.created, report.deleted
        );
    }

    Ok(())
}
