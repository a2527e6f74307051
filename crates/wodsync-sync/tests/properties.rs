//! Property tests for the reconciliation planner.
//!
//! Everything here is offline: random class lists and calendar states are
//! generated, plans computed, and the algebraic guarantees checked.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::collections::HashSet;

use chrono::{DateTime, Duration, FixedOffset, TimeZone, Utc};
use proptest::prelude::*;
use wodsync_calendar::{Attendee, Event, EventTime, ResponseStatus};
use wodsync_sync::{class_key, event_key, is_managed, plan_decline_cleanup, plan_sync, Action};
use wodsync_wodify::ClassRecord;

const PREFIX: &str = "[Wodify] ";

fn base() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 1, 6, 0, 0).unwrap()
}

fn make_class(name: &str, hour: u32) -> ClassRecord {
    let start = base() + Duration::hours(i64::from(hour));
    ClassRecord {
        name: name.to_string(),
        location: Some("Main Floor".to_string()),
        start,
        end: start + Duration::hours(1),
    }
}

/// Render an event at the given hour, optionally in a -05:00 offset so that
/// matching has to work across offsets, not just on identical strings.
fn make_event(id: usize, summary: &str, hour: u32, eastern: bool, declined: bool) -> Event {
    let start_utc = base() + Duration::hours(i64::from(hour));
    let start = if eastern {
        start_utc.with_timezone(&FixedOffset::west_opt(5 * 3600).unwrap())
    } else {
        start_utc.fixed_offset()
    };
    let attendees = if declined {
        vec![Attendee {
            email: "me@example.com".to_string(),
            response_status: ResponseStatus::Declined,
            is_self: true,
        }]
    } else {
        vec![]
    };
    Event {
        id: format!("evt{}", id),
        summary: summary.to_string(),
        location: None,
        start: EventTime::DateTime(start),
        end: EventTime::DateTime(start + Duration::hours(1)),
        attendees,
    }
}

fn class_name() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec!["CrossFit", "Yoga", "Barbell Club", "Open Gym"])
}

fn classes() -> impl Strategy<Value = Vec<ClassRecord>> {
    prop::collection::vec((class_name(), 0u32..48), 0..8)
        .prop_map(|specs| specs.into_iter().map(|(n, h)| make_class(n, h)).collect())
}

/// (managed?, name, hour, eastern?, declined?) tuples become calendar events.
fn events() -> impl Strategy<Value = Vec<Event>> {
    prop::collection::vec(
        (any::<bool>(), class_name(), 0u32..48, any::<bool>(), any::<bool>()),
        0..10,
    )
    .prop_map(|specs| {
        specs
            .into_iter()
            .enumerate()
            .map(|(i, (managed, name, hour, eastern, declined))| {
                let summary = if managed {
                    format!("{}{}", PREFIX, name)
                } else {
                    name.to_string()
                };
                make_event(i, &summary, hour, eastern, declined)
            })
            .collect()
    })
}

/// Apply a plan the way the executor would, returning the resulting calendar.
fn apply(plan: &[Action], events: &[Event]) -> Vec<Event> {
    let deleted: HashSet<&str> = plan
        .iter()
        .filter_map(|a| match a {
            Action::Delete(e) => Some(e.id.as_str()),
            Action::Create(_) => None,
        })
        .collect();

    let mut after: Vec<Event> = events
        .iter()
        .filter(|e| !deleted.contains(e.id.as_str()))
        .cloned()
        .collect();

    for (i, action) in plan.iter().enumerate() {
        if let Action::Create(class) = action {
            after.push(Event {
                id: format!("new{}", i),
                summary: format!("{}{}", PREFIX, class.name),
                location: class.location.clone(),
                start: EventTime::DateTime(class.start.fixed_offset()),
                end: EventTime::DateTime(class.end.fixed_offset()),
                attendees: vec![],
            });
        }
    }
    after
}

proptest! {
    /// Applying a plan and re-planning yields nothing left to do.
    #[test]
    fn sync_is_idempotent(classes in classes(), events in events()) {
        let plan = plan_sync(&classes, &events, PREFIX);
        let after = apply(&plan, &events);
        let second = plan_sync(&classes, &after, PREFIX);
        prop_assert!(second.is_empty(), "second plan was {:?}", second);
    }

    /// Every class without a matching managed event gets exactly one create.
    #[test]
    fn sync_is_complete(classes in classes(), events in events()) {
        let plan = plan_sync(&classes, &events, PREFIX);

        let managed_keys: HashSet<_> = events
            .iter()
            .filter(|e| is_managed(&e.summary, PREFIX))
            .filter_map(event_key)
            .collect();

        let unmatched: HashSet<_> = classes
            .iter()
            .map(|c| class_key(c, PREFIX))
            .filter(|k| !managed_keys.contains(k))
            .collect();

        let created: Vec<_> = plan
            .iter()
            .filter_map(|a| match a {
                Action::Create(c) => Some(class_key(c, PREFIX)),
                Action::Delete(_) => None,
            })
            .collect();

        // One create per distinct unmatched key, no more.
        let created_set: HashSet<_> = created.iter().cloned().collect();
        prop_assert_eq!(created.len(), created_set.len(), "duplicate creates");
        prop_assert_eq!(created_set, unmatched);
    }

    /// Deletes only hit managed events whose key matches no current class.
    #[test]
    fn deletes_are_sound(classes in classes(), events in events()) {
        let plan = plan_sync(&classes, &events, PREFIX);

        let class_keys: HashSet<_> = classes.iter().map(|c| class_key(c, PREFIX)).collect();

        for action in &plan {
            if let Action::Delete(e) = action {
                prop_assert!(is_managed(&e.summary, PREFIX), "deleted unmanaged {:?}", e.id);
                let key = event_key(e);
                prop_assert!(key.is_some(), "deleted event without a key");
                prop_assert!(!class_keys.contains(&key.unwrap()), "deleted a live class event");
            }
        }
    }

    /// Events without the prefix never show up in the sync plan at all.
    #[test]
    fn unmanaged_events_are_isolated(classes in classes(), events in events()) {
        let plan = plan_sync(&classes, &events, PREFIX);

        let unmanaged_ids: HashSet<&str> = events
            .iter()
            .filter(|e| !is_managed(&e.summary, PREFIX))
            .map(|e| e.id.as_str())
            .collect();

        for action in &plan {
            if let Action::Delete(e) = action {
                prop_assert!(!unmanaged_ids.contains(e.id.as_str()));
            }
        }
    }

    /// Creates always precede deletes in the plan.
    #[test]
    fn creates_precede_deletes(classes in classes(), events in events()) {
        let plan = plan_sync(&classes, &events, PREFIX);
        let first_delete = plan.iter().position(|a| matches!(a, Action::Delete(_)));
        let last_create = plan.iter().rposition(|a| matches!(a, Action::Create(_)));
        if let (Some(d), Some(c)) = (first_delete, last_create) {
            prop_assert!(c < d);
        }
    }

    /// Decline cleanup hits exactly the self-declined events, prefix or not.
    #[test]
    fn decline_cleanup_is_exact(events in events()) {
        let plan = plan_decline_cleanup(&events);

        let declined_ids: HashSet<&str> = events
            .iter()
            .filter(|e| e.is_self_declined())
            .map(|e| e.id.as_str())
            .collect();

        let planned_ids: HashSet<&str> = plan
            .iter()
            .filter_map(|a| match a {
                Action::Delete(e) => Some(e.id.as_str()),
                Action::Create(_) => None,
            })
            .collect();

        prop_assert_eq!(planned_ids, declined_ids);
    }
}
