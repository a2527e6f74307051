use anyhow::Result;

use wodsync_core::Config;
use wodsync_sync::plan_decline_cleanup;

/// Clear the calendar of every event the user has declined.
pub async fn run(config: &Config, dry_run: bool) -> Result<()> {
    let session = super::open_session(config, dry_run).await?;

    let actions = plan_decline_cleanup(&session.events);
    if actions.is_empty() {
        println!("No declined events to clean up");
        return Ok(());
    }

    let report = session.executor.run(&actions, &session.client).await?;
    if dry_run {
        println!(
            "Dry run: {} declined events would be deleted",
            actions.len()
        );
    } else {
        println!("Deleted {} declined events", report.deleted);
    }

    Ok(())
}
