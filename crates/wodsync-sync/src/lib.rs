//! Reconciliation core for wodsync.
//!
//! Compares the coach's upcoming classes against the managed slice of the
//! calendar and produces an ordered action list; the executor applies it.
//! Planning is pure and runs entirely offline.

pub mod execute;
pub mod identity;
pub mod reconcile;

pub use execute::{ExecutionReport, Executor};
pub use identity::{class_key, event_key, IdentityKey};
pub use reconcile::{is_managed, plan_decline_cleanup, plan_purge, plan_sync, Action};
