//! Event identity: the join key deciding whether a class record and a
//! calendar event represent the same occurrence.

use chrono::{DateTime, SubsecRound, Utc};
use wodsync_calendar::Event;
use wodsync_wodify::ClassRecord;

/// (start instant to the second, full display label).
///
/// Two keys are equal iff both the absolute instant and the complete label
/// match exactly. Matching by instant means an event stored as
/// `10:00:00-05:00` equals a class at `15:00:00Z`; the display timezone never
/// influences identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IdentityKey {
    instant: DateTime<Utc>,
    label: String,
}

impl IdentityKey {
    pub fn new(instant: DateTime<Utc>, label: impl Into<String>) -> Self {
        Self {
            instant: instant.trunc_subsecs(0),
            label: label.into(),
        }
    }

    pub fn instant(&self) -> DateTime<Utc> {
        self.instant
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

impl std::fmt::Display for IdentityKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.instant.to_rfc3339(), self.label)
    }
}

/// Key for a class record: label is `prefix + name`.
pub fn class_key(class: &ClassRecord, prefix: &str) -> IdentityKey {
    IdentityKey::new(class.start, format!("{}{}", prefix, class.name))
}

/// Key for a calendar event: label is the stored summary.
///
/// All-day events carry no instant and therefore no key; they are excluded
/// from matching (never auto-created or auto-deleted) but remain eligible
/// for decline cleanup.
pub fn event_key(event: &Event) -> Option<IdentityKey> {
    event
        .start
        .instant()
        .map(|instant| IdentityKey::new(instant, event.summary.clone()))
}
