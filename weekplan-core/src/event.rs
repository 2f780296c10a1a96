//! Calendar event types.
//!
//! An event is either single-dated or recurring on a weekly schedule. The
//! engine works exclusively with these types; front-ends render the derived
//! [`Occurrence`](crate::occurrence::Occurrence) projection instead.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::time::hhmm;

/// A calendar event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub color: Color,
    pub owner_id: String,
    pub kind: EventKind,
    /// Store-assigned creation timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Event {
    pub fn is_recurring(&self) -> bool {
        matches!(self.kind, EventKind::Recurring { .. })
    }

    /// The weekly schedule; empty for single-dated events.
    pub fn schedule(&self) -> &[ScheduleSlot] {
        match &self.kind {
            EventKind::Recurring { schedule } => schedule,
            EventKind::Single { .. } => &[],
        }
    }
}

/// Single-dated vs. weekly-recurring discriminator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Single {
        date: NaiveDate,
        #[serde(with = "hhmm")]
        start_time: NaiveTime,
        #[serde(with = "hhmm")]
        end_time: NaiveTime,
    },
    Recurring {
        /// Weekly slots; several may share a day (multiple sessions per day)
        /// and order is declaration order.
        schedule: Vec<ScheduleSlot>,
    },
}

/// One weekly session of a recurring event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleSlot {
    /// 0 = Sunday .. 6 = Saturday
    pub day_of_week: u8,
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
}

impl ScheduleSlot {
    /// Whether this slot fires on the given calendar day.
    pub fn matches(&self, date: NaiveDate) -> bool {
        date.weekday().num_days_from_sunday() as u8 == self.day_of_week
    }
}

/// Fixed palette for visual grouping of events. No semantic meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Red,
    Orange,
    Yellow,
    Green,
    Teal,
    Blue,
    Purple,
    Pink,
}

impl Color {
    pub const ALL: [Color; 8] = [
        Color::Red,
        Color::Orange,
        Color::Yellow,
        Color::Green,
        Color::Teal,
        Color::Blue,
        Color::Purple,
        Color::Pink,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Orange => "orange",
            Color::Yellow => "yellow",
            Color::Green => "green",
            Color::Teal => "teal",
            Color::Blue => "blue",
            Color::Purple => "purple",
            Color::Pink => "pink",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::ALL.into_iter().find(|c| c.name() == s).ok_or_else(|| {
            format!(
                "Unknown color '{s}'. Available: {}",
                Color::ALL.map(|c| c.name()).join(", ")
            )
        })
    }
}

/// Payload for creating an event. The store assigns `id` and `created_at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewEvent {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub color: Color,
    pub owner_id: String,
    pub kind: EventKind,
}

impl NewEvent {
    /// Assemble a persisted `Event` from this payload plus the store-assigned
    /// fields.
    pub fn into_event(self, id: String, created_at: Option<DateTime<Utc>>) -> Event {
        Event {
            id,
            name: self.name,
            description: self.description,
            color: self.color,
            owner_id: self.owner_id,
            kind: self.kind,
            created_at,
        }
    }
}

/// Partial update for an event: apply set fields, leave the rest unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// `Some(None)` clears the description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    /// Replaces the whole discriminated part (date/times or schedule).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<EventKind>,
}

impl EventPatch {
    pub fn apply(&self, event: &mut Event) {
        if let Some(name) = &self.name {
            event.name = name.clone();
        }
        if let Some(description) = &self.description {
            event.description = description.clone();
        }
        if let Some(color) = self.color {
            event.color = color;
        }
        if let Some(kind) = &self.kind {
            event.kind = kind.clone();
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.color.is_none()
            && self.kind.is_none()
    }
}
