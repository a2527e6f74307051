use anyhow::Result;

use wodsync_core::Config;
use wodsync_sync::plan_purge;

/// Bulk delete: remove every managed event from the calendar.
pub async fn run(config: &Config, dry_run: bool) -> Result<()> {
    let session = super::open_session(config, dry_run).await?;

    let actions = plan_purge(&session.events, &config.sync.prefix);
    if actions.is_empty() {
        println!("No {:?} events on the calendar", config.sync.prefix);
        return Ok(());
    }

    let report = session.executor.run(&actions, &session.client).await?;
    if dry_run {
        println!(
            "Dry run: {} managed events would be deleted",
            actions.len()
        );
    } else {
        println!("Deleted {} events", report.deleted);
    }

    Ok(())
}
