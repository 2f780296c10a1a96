//! Merged event timeline for rendering.
//!
//! Combines expanded recurring occurrences with in-window single events into
//! one sequence, and derives the hour span the weekly grid needs. Everything
//! here recomputes from the (events, overrides) snapshot it is handed; nothing
//! is cached between queries.

use chrono::{NaiveDate, NaiveDateTime};

use crate::event::Event;
use crate::event_override::EventOverride;
use crate::occurrence::{Occurrence, expand, resolve};
use crate::time::time_to_minutes;

/// Default grid span (hours) when a window has nothing to show.
const DEFAULT_HOUR_RANGE: (u32, u32) = (8, 20);

/// Materialize every occurrence in `[window_start, window_end]`.
///
/// Recurring events are expanded and resolved against the overrides, dropping
/// cancelled occurrences; single events are included when in-window and
/// bypass override resolution. Nothing is deduplicated beyond the override
/// invariant: two distinct events at the same date and time legitimately
/// coexist.
///
/// Occurrences come out grouped by source event in input order, dates
/// ascending within each group; the grid positions them by date and time, and
/// [`daily_occurrences`] sorts where order matters.
pub fn build_timeline(
    events: &[Event],
    overrides: &[EventOverride],
    window_start: NaiveDate,
    window_end: NaiveDate,
) -> Vec<Occurrence> {
    let mut timeline = Vec::new();

    for event in events {
        for occurrence in expand(event, window_start, window_end) {
            if occurrence.is_recurring {
                if let Some(resolved) = resolve(occurrence, overrides) {
                    timeline.push(resolved);
                }
            } else {
                timeline.push(occurrence);
            }
        }
    }

    timeline
}

/// The day's occurrences sorted by start time, for the reminder view.
///
/// The sort is stable: occurrences with equal start times keep the original
/// event order.
pub fn daily_occurrences(
    events: &[Event],
    overrides: &[EventOverride],
    day: NaiveDate,
) -> Vec<Occurrence> {
    let mut occurrences = build_timeline(events, overrides, day, day);
    occurrences.sort_by_key(|o| time_to_minutes(o.start_time));
    occurrences
}

/// Whether `now` falls inside the occurrence, boundary minutes included: an
/// occurrence is "now" exactly at its start and end minutes, and never on a
/// different date.
pub fn is_occurring_now(occurrence: &Occurrence, now: NaiveDateTime) -> bool {
    if occurrence.date != now.date() {
        return false;
    }

    let now_minutes = time_to_minutes(now.time());
    let start = time_to_minutes(occurrence.start_time);
    let end = time_to_minutes(occurrence.end_time);

    start <= now_minutes && now_minutes <= end
}

/// The vertical hour span for the weekly grid: the occurrences' full extent
/// with one hour of padding, clamped to `[0, 24]`. Defaults to `(8, 20)` when
/// there is nothing to show.
pub fn visible_hour_range(occurrences: &[Occurrence]) -> (u32, u32) {
    if occurrences.is_empty() {
        return DEFAULT_HOUR_RANGE;
    }

    let (min_minutes, max_minutes) = occurrences.iter().fold((u32::MAX, 0), |(lo, hi), o| {
        let start = time_to_minutes(o.start_time);
        let end = time_to_minutes(o.end_time);
        (lo.min(start.min(end)), hi.max(start.max(end)))
    });

    let start_hour = (min_minutes / 60).saturating_sub(1);
    let end_hour = (max_minutes.div_ceil(60) + 1).min(24);

    (start_hour, end_hour)
}
