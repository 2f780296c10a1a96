//! Per-date exceptions to recurring events.
//!
//! An override either cancels one occurrence or shifts its times. At most
//! one override exists per `(event_id, original_date, owner_id)` triple,
//! enforced by the stores' upsert semantics rather than by storage itself.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::time::hhmm_opt;

/// A stored exception for one occurrence of a recurring event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventOverride {
    pub id: String,
    /// The recurring event this override belongs to.
    pub event_id: String,
    /// The calendar date the schedule would naturally produce.
    pub original_date: NaiveDate,
    #[serde(default, with = "hhmm_opt", skip_serializing_if = "Option::is_none")]
    pub new_start_time: Option<NaiveTime>,
    #[serde(default, with = "hhmm_opt", skip_serializing_if = "Option::is_none")]
    pub new_end_time: Option<NaiveTime>,
    /// When true the occurrence is suppressed entirely; time fields ignored.
    pub cancelled: bool,
    pub owner_id: String,
}

impl EventOverride {
    /// Upsert identity: at most one override per this triple.
    pub fn matches_key(&self, event_id: &str, original_date: NaiveDate, owner_id: &str) -> bool {
        self.event_id == event_id
            && self.original_date == original_date
            && self.owner_id == owner_id
    }
}

/// Payload for `upsert_override`. The store assigns or retains the record id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverrideData {
    pub event_id: String,
    pub original_date: NaiveDate,
    #[serde(default, with = "hhmm_opt", skip_serializing_if = "Option::is_none")]
    pub new_start_time: Option<NaiveTime>,
    #[serde(default, with = "hhmm_opt", skip_serializing_if = "Option::is_none")]
    pub new_end_time: Option<NaiveTime>,
    pub cancelled: bool,
    pub owner_id: String,
}

impl OverrideData {
    /// Suppress one occurrence.
    pub fn cancellation(
        event_id: impl Into<String>,
        original_date: NaiveDate,
        owner_id: impl Into<String>,
    ) -> Self {
        OverrideData {
            event_id: event_id.into(),
            original_date,
            new_start_time: None,
            new_end_time: None,
            cancelled: true,
            owner_id: owner_id.into(),
        }
    }

    /// Shift one occurrence's times. Either side may be left `None` to keep
    /// the scheduled value.
    pub fn reschedule(
        event_id: impl Into<String>,
        original_date: NaiveDate,
        owner_id: impl Into<String>,
        new_start_time: Option<NaiveTime>,
        new_end_time: Option<NaiveTime>,
    ) -> Self {
        OverrideData {
            event_id: event_id.into(),
            original_date,
            new_start_time,
            new_end_time,
            cancelled: false,
            owner_id: owner_id.into(),
        }
    }

    /// Assemble a persisted `EventOverride` with a store-assigned id.
    pub fn into_override(self, id: String) -> EventOverride {
        EventOverride {
            id,
            event_id: self.event_id,
            original_date: self.original_date,
            new_start_time: self.new_start_time,
            new_end_time: self.new_end_time,
            cancelled: self.cancelled,
            owner_id: self.owner_id,
        }
    }

    /// Upsert update path: the new payload replaces the existing record's
    /// payload fields wholesale (the id stays).
    pub fn apply_to(&self, existing: &mut EventOverride) {
        existing.event_id = self.event_id.clone();
        existing.original_date = self.original_date;
        existing.new_start_time = self.new_start_time;
        existing.new_end_time = self.new_end_time;
        existing.cancelled = self.cancelled;
        existing.owner_id = self.owner_id.clone();
    }
}
