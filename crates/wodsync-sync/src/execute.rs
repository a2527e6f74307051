//! Action executor: drains an action list through the calendar adapter.
//!
//! Strictly additive/subtractive; there is no update path. Each action is a
//! single atomic remote call, so an interrupted run leaves the calendar in a
//! valid state the next run reconciles.

use std::time::Duration;

use chrono_tz::Tz;
use wodsync_calendar::{CalendarClient, CalendarError, NewEvent};
use wodsync_wodify::ClassRecord;

use crate::reconcile::Action;

/// Counts of mutations actually performed. Zero in dry-run mode.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ExecutionReport {
    pub created: usize,
    pub deleted: usize,
}

pub struct Executor {
    calendar_id: String,
    prefix: String,
    tz: Tz,
    dry_run: bool,
    throttle: Duration,
}

impl Executor {
    pub fn new(
        calendar_id: impl Into<String>,
        prefix: impl Into<String>,
        tz: Tz,
        dry_run: bool,
        throttle: Duration,
    ) -> Self {
        Self {
            calendar_id: calendar_id.into(),
            prefix: prefix.into(),
            tz,
            dry_run,
            throttle,
        }
    }

    /// Apply the actions in order, failing fast on the first error.
    /// Already-applied actions stay applied; a re-run reconciles the rest.
    pub async fn run(
        &self,
        actions: &[Action],
        client: &CalendarClient,
    ) -> Result<ExecutionReport, CalendarError> {
        let mut report = ExecutionReport::default();

        for action in actions {
            match action {
                Action::Create(class) => {
                    let new_event = self.build_event(class);
                    tracing::info!(
                        "New event: {} {}",
                        new_event.start.to_rfc3339(),
                        new_event.summary
                    );
                    if self.dry_run {
                        continue;
                    }
                    client.insert_event(&self.calendar_id, &new_event).await?;
                    report.created += 1;
                    tokio::time::sleep(self.throttle).await;
                }
                Action::Delete(event) => {
                    tracing::info!("Deleting: {} {}", event.start, event.summary);
                    if self.dry_run {
                        continue;
                    }
                    client.delete_event(&self.calendar_id, &event.id).await?;
                    report.deleted += 1;
                    tokio::time::sleep(self.throttle).await;
                }
            }
        }

        tracing::info!(
            "Created {} and deleted {} events{}",
            report.created,
            report.deleted,
            if self.dry_run { " (dry run)" } else { "" }
        );
        Ok(report)
    }

    /// Render a class as a calendar payload: the summary is the same
    /// `prefix + name` label identity matching uses, and both instants carry
    /// the configured display timezone.
    fn build_event(&self, class: &ClassRecord) -> NewEvent {
        NewEvent {
            summary: format!("{}{}", self.prefix, class.name),
            location: class.location.clone(),
            start: class.start.with_timezone(&self.tz).fixed_offset(),
            end: class.end.with_timezone(&self.tz).fixed_offset(),
        }
    }
}
