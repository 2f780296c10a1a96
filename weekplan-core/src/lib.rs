//! Core calendar engine for weekplan.
//!
//! This crate provides the pieces the front-ends run on:
//! - `Event` / `EventOverride` and related types for the data model
//! - pure occurrence expansion and timeline merging (`occurrence`, `timeline`)
//! - the `EventStore` trait plus in-memory and JSON-file implementations
//! - `AppState`, the per-session cache with write-through mutations

pub mod config;
pub mod error;
pub mod event;
pub mod event_override;
pub mod occurrence;
pub mod state;
pub mod store;
pub mod time;
pub mod timeline;
pub mod user;

pub use error::{WeekplanError, WeekplanResult};
pub use event::{Color, Event, EventKind, EventPatch, NewEvent, ScheduleSlot};
pub use event_override::{EventOverride, OverrideData};
pub use occurrence::Occurrence;
