//! Calendar API types and data structures.

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Calendar event as seen by the reconciler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub summary: String,
    pub location: Option<String>,
    pub start: EventTime,
    pub end: EventTime,
    pub attendees: Vec<Attendee>,
}

/// Event time - a specific instant with its stored offset, or an all-day date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EventTime {
    DateTime(DateTime<FixedOffset>),
    Date(NaiveDate),
}

impl EventTime {
    /// The absolute instant, if this is a timed entry. All-day dates carry
    /// no instant and are excluded from identity matching.
    pub fn instant(&self) -> Option<DateTime<Utc>> {
        match self {
            EventTime::DateTime(dt) => Some(dt.with_timezone(&Utc)),
            EventTime::Date(_) => None,
        }
    }
}

impl std::fmt::Display for EventTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventTime::DateTime(dt) => write!(f, "{}", dt.to_rfc3339()),
            EventTime::Date(d) => write!(f, "{}", d),
        }
    }
}

/// Event attendee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attendee {
    pub email: String,
    pub response_status: ResponseStatus,
    pub is_self: bool,
}

/// Attendee response status.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub enum ResponseStatus {
    #[default]
    NeedsAction,
    Declined,
    Tentative,
    Accepted,
}

impl Event {
    /// True if the authenticated user's own attendee record is declined.
    pub fn is_self_declined(&self) -> bool {
        self.attendees
            .iter()
            .any(|a| a.is_self && a.response_status == ResponseStatus::Declined)
    }

    /// Convert an API event. Returns `None` when the event has no usable
    /// start (neither `dateTime` nor `date`); such events are outside this
    /// system's management entirely.
    pub fn from_api(api: ApiEvent) -> Option<Self> {
        let start = api.start.as_ref().and_then(parse_event_time)?;
        let end = api
            .end
            .as_ref()
            .and_then(parse_event_time)
            .unwrap_or_else(|| start.clone());

        let attendees = api
            .attendees
            .into_iter()
            .map(|a| {
                let response_status = match a.response_status.as_deref() {
                    Some("accepted") => ResponseStatus::Accepted,
                    Some("declined") => ResponseStatus::Declined,
                    Some("tentative") => ResponseStatus::Tentative,
                    _ => ResponseStatus::NeedsAction,
                };
                Attendee {
                    email: a.email,
                    response_status,
                    is_self: a.is_self,
                }
            })
            .collect();

        Some(Self {
            id: api.id,
            summary: api.summary.unwrap_or_default(),
            location: api.location,
            start,
            end,
            attendees,
        })
    }
}

/// Payload for a new event, built by the action executor.
#[derive(Debug, Clone)]
pub struct NewEvent {
    pub summary: String,
    pub location: Option<String>,
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
}

impl NewEvent {
    pub fn to_api_body(&self) -> serde_json::Value {
        let mut body = serde_json::json!({
            "summary": self.summary,
            "start": { "dateTime": self.start.to_rfc3339() },
            "end": { "dateTime": self.end.to_rfc3339() },
        });
        if let Some(location) = &self.location {
            body["location"] = serde_json::Value::String(location.clone());
        }
        body
    }
}

// API Response Types

/// Google Calendar API event resource.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiEvent {
    pub id: String,
    pub summary: Option<String>,
    pub location: Option<String>,
    pub start: Option<ApiEventTime>,
    pub end: Option<ApiEventTime>,
    #[serde(default)]
    pub attendees: Vec<ApiAttendee>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiEventTime {
    pub date_time: Option<String>,
    pub date: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiAttendee {
    pub email: String,
    pub response_status: Option<String>,
    #[serde(default, rename = "self")]
    pub is_self: bool,
}

/// API response for event list.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventListResponse {
    #[serde(default)]
    pub items: Vec<ApiEvent>,
    pub next_page_token: Option<String>,
}

fn parse_event_time(api: &ApiEventTime) -> Option<EventTime> {
    if let Some(dt_str) = &api.date_time {
        if let Ok(dt) = DateTime::parse_from_rfc3339(dt_str) {
            return Some(EventTime::DateTime(dt));
        }
    }
    if let Some(date_str) = &api.date {
        if let Ok(date) = NaiveDate::parse_from_str(date_str, "%Y-%m-%d") {
            return Some(EventTime::Date(date));
        }
    }
    None
}
