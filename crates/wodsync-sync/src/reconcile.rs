//! The reconciliation algorithm: a pure three-way comparison between the
//! class list, the managed calendar events, and the declined events.
//!
//! Nothing here performs I/O; the output is an ordered action list for the
//! executor, which makes the algorithm deterministic and testable offline.

use std::collections::HashSet;

use wodsync_calendar::Event;
use wodsync_wodify::ClassRecord;

use crate::identity::{class_key, event_key, IdentityKey};

/// One calendar mutation to perform.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Create(ClassRecord),
    Delete(Event),
}

/// Is this event owned by wodsync? Exact prefix at the start of the summary.
pub fn is_managed(summary: &str, prefix: &str) -> bool {
    summary.starts_with(prefix)
}

/// Compute the create/delete actions that bring the managed slice of the
/// calendar in line with the current class list.
///
/// Creates come before deletes so an interrupted run never leaves a class
/// with zero representation. Unmanaged events (summary without the prefix)
/// are never touched. Managed events without a parseable start are skipped,
/// never auto-deleted.
pub fn plan_sync(classes: &[ClassRecord], events: &[Event], prefix: &str) -> Vec<Action> {
    let managed: Vec<&Event> = events
        .iter()
        .filter(|e| is_managed(&e.summary, prefix))
        .collect();

    let managed_keys: HashSet<IdentityKey> =
        managed.iter().filter_map(|e| event_key(e)).collect();

    let mut actions = Vec::new();
    let mut class_keys: HashSet<IdentityKey> = HashSet::new();

    for class in classes {
        let key = class_key(class, prefix);

        // A repeated key confirms the earlier occurrence; no duplicate create.
        if !class_keys.insert(key.clone()) {
            tracing::debug!("Duplicate class key {}, skipping", key);
            continue;
        }

        if managed_keys.contains(&key) {
            tracing::debug!("Found existing event for {}", key);
        } else {
            tracing::debug!("Class {} has no event yet", key);
            actions.push(Action::Create(class.clone()));
        }
    }

    for event in managed {
        if let Some(key) = event_key(event) {
            if !class_keys.contains(&key) {
                tracing::debug!("Event {} no longer matches any class", key);
                actions.push(Action::Delete(event.clone()));
            }
        }
    }

    actions
}

/// Delete every event the user has declined, regardless of prefix and
/// regardless of whether it matches a current class. May run standalone.
pub fn plan_decline_cleanup(events: &[Event]) -> Vec<Action> {
    events
        .iter()
        .filter(|e| e.is_self_declined())
        .map(|e| Action::Delete(e.clone()))
        .collect()
}

/// Delete every managed event: the bulk cleanup pass.
pub fn plan_purge(events: &[Event], prefix: &str) -> Vec<Action> {
    events
        .iter()
        .filter(|e| is_managed(&e.summary, prefix))
        .map(|e| Action::Delete(e.clone()))
        .collect()
}
