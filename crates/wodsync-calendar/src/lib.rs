//! Google Calendar adapter for wodsync.
//!
//! List, insert, and delete against a single target calendar. The reconciler
//! never talks to this crate directly; the action executor does.

pub mod client;
pub mod error;
pub mod types;

pub use client::CalendarClient;
pub use error::CalendarError;
pub use types::{Attendee, Event, EventTime, NewEvent, ResponseStatus};
