//! Wodify scheduling-service adapter for wodsync.
//!
//! Fetches the coach's upcoming classes as a flat list of [`ClassRecord`]s.

pub mod client;
pub mod error;
pub mod types;

pub use client::WodifyClient;
pub use error::WodifyError;
pub use types::{ApiClass, ClassRecord, ClassesResponse, InvalidClass};
