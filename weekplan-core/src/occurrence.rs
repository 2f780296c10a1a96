//! Occurrence expansion and override resolution.
//!
//! Expands a recurring event's weekly schedule into concrete dated
//! occurrences within a window, and applies the at-most-one override for a
//! given (event, date) pair. Both functions are pure; all the state they see
//! comes in as arguments.

use chrono::{Duration, NaiveDate, NaiveTime};

use crate::event::{Color, Event, EventKind};
use crate::event_override::EventOverride;

/// One concrete, dated, timed instance of an event.
///
/// A flattened, render-ready projection derived on demand from the current
/// (events, overrides) snapshot; it carries no identity beyond its
/// derivation. The source event is reachable through `event_id`, resolved
/// against the cache when an edit/delete action needs it.
#[derive(Debug, Clone, PartialEq)]
pub struct Occurrence {
    pub event_id: String,
    pub event_name: String,
    pub description: Option<String>,
    pub color: Color,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub is_recurring: bool,
}

/// Expand an event into occurrences within `[window_start, window_end]`
/// (inclusive on both ends).
///
/// A recurring event emits one occurrence per (day in window, matching slot)
/// pair: days ascending, slots in declaration order within a day. An empty
/// schedule emits nothing. A single-dated event emits at most one occurrence,
/// when its date falls inside the window; time-of-day plays no part in the
/// window check.
///
/// Degenerate slots (`start_time >= end_time`) pass through untouched; input
/// validation happens at the front-end.
pub fn expand(event: &Event, window_start: NaiveDate, window_end: NaiveDate) -> Vec<Occurrence> {
    match &event.kind {
        EventKind::Recurring { schedule } => {
            let mut occurrences = Vec::new();
            let mut day = window_start;
            while day <= window_end {
                for slot in schedule.iter().filter(|slot| slot.matches(day)) {
                    occurrences.push(Occurrence {
                        event_id: event.id.clone(),
                        event_name: event.name.clone(),
                        description: event.description.clone(),
                        color: event.color,
                        date: day,
                        start_time: slot.start_time,
                        end_time: slot.end_time,
                        is_recurring: true,
                    });
                }
                day += Duration::days(1);
            }
            occurrences
        }
        EventKind::Single {
            date,
            start_time,
            end_time,
        } => {
            if *date >= window_start && *date <= window_end {
                vec![Occurrence {
                    event_id: event.id.clone(),
                    event_name: event.name.clone(),
                    description: event.description.clone(),
                    color: event.color,
                    date: *date,
                    start_time: *start_time,
                    end_time: *end_time,
                    is_recurring: false,
                }]
            } else {
                Vec::new()
            }
        }
    }
}

/// Apply the override, if any, for an occurrence's `(event_id, date)` pair.
///
/// Returns `None` when the occurrence is cancelled for that date. A time
/// override replaces each side independently, falling back to the slot's
/// original value where the override leaves it unset. No matching override
/// returns the occurrence unchanged.
///
/// Callers filter `overrides` to one scope first. At most one override should
/// match; if the store holds duplicates the first found wins (the stores'
/// upsert keeps that from happening in the first place).
pub fn resolve(occurrence: Occurrence, overrides: &[EventOverride]) -> Option<Occurrence> {
    let matched = overrides
        .iter()
        .find(|o| o.event_id == occurrence.event_id && o.original_date == occurrence.date);

    match matched {
        Some(o) if o.cancelled => None,
        Some(o) => Some(Occurrence {
            start_time: o.new_start_time.unwrap_or(occurrence.start_time),
            end_time: o.new_end_time.unwrap_or(occurrence.end_time),
            ..occurrence
        }),
        None => Some(occurrence),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{NewEvent, ScheduleSlot};
    use crate::event_override::OverrideData;
    use crate::time::{parse_date, parse_time};

    fn slot(day_of_week: u8, start: &str, end: &str) -> ScheduleSlot {
        ScheduleSlot {
            day_of_week,
            start_time: parse_time(start).unwrap(),
            end_time: parse_time(end).unwrap(),
        }
    }

    fn recurring(id: &str, schedule: Vec<ScheduleSlot>) -> Event {
        NewEvent {
            name: format!("event {id}"),
            description: None,
            color: Color::Blue,
            owner_id: "u1".to_string(),
            kind: EventKind::Recurring { schedule },
        }
        .into_event(id.to_string(), None)
    }

    fn single(id: &str, date: &str, start: &str, end: &str) -> Event {
        NewEvent {
            name: format!("event {id}"),
            description: None,
            color: Color::Red,
            owner_id: "u1".to_string(),
            kind: EventKind::Single {
                date: parse_date(date).unwrap(),
                start_time: parse_time(start).unwrap(),
                end_time: parse_time(end).unwrap(),
            },
        }
        .into_event(id.to_string(), None)
    }

    #[test]
    fn test_expand_one_occurrence_per_day_slot_pair() {
        // Mondays and Thursdays over two full weeks: 2 + 2 occurrences
        let event = recurring("e1", vec![slot(1, "09:00", "10:00"), slot(4, "09:00", "10:00")]);
        let occurrences = expand(
            &event,
            parse_date("2025-03-10").unwrap(),
            parse_date("2025-03-23").unwrap(),
        );

        assert_eq!(occurrences.len(), 4);
        let dates: Vec<String> = occurrences
            .iter()
            .map(|o| crate::time::format_date(o.date))
            .collect();
        assert_eq!(
            dates,
            ["2025-03-10", "2025-03-13", "2025-03-17", "2025-03-20"]
        );
        assert!(occurrences.iter().all(|o| o.is_recurring));
    }

    #[test]
    fn test_expand_multiple_slots_same_day_in_declaration_order() {
        let event = recurring(
            "e1",
            vec![slot(2, "14:00", "15:00"), slot(2, "09:00", "10:00")],
        );
        // 2025-03-11 is a Tuesday
        let occurrences = expand(
            &event,
            parse_date("2025-03-11").unwrap(),
            parse_date("2025-03-11").unwrap(),
        );

        assert_eq!(occurrences.len(), 2);
        assert_eq!(occurrences[0].start_time, parse_time("14:00").unwrap());
        assert_eq!(occurrences[1].start_time, parse_time("09:00").unwrap());
    }

    #[test]
    fn test_expand_empty_schedule_is_not_an_error() {
        let event = recurring("e1", vec![]);
        let occurrences = expand(
            &event,
            parse_date("2025-03-10").unwrap(),
            parse_date("2025-04-10").unwrap(),
        );
        assert!(occurrences.is_empty());
    }

    #[test]
    fn test_expand_inverted_window_is_empty() {
        let event = recurring("e1", vec![slot(1, "09:00", "10:00")]);
        let occurrences = expand(
            &event,
            parse_date("2025-03-20").unwrap(),
            parse_date("2025-03-10").unwrap(),
        );
        assert!(occurrences.is_empty());
    }

    #[test]
    fn test_expand_single_event_window_boundaries_inclusive() {
        let event = single("e1", "2025-03-16", "14:00", "15:00");
        let start = parse_date("2025-03-10").unwrap();

        // dated exactly windowEnd: included
        assert_eq!(expand(&event, start, parse_date("2025-03-16").unwrap()).len(), 1);
        // one day after windowEnd: excluded
        assert!(expand(&event, start, parse_date("2025-03-15").unwrap()).is_empty());
        // dated exactly windowStart: included
        let event = single("e2", "2025-03-10", "00:00", "01:00");
        assert_eq!(expand(&event, start, parse_date("2025-03-16").unwrap()).len(), 1);
    }

    #[test]
    fn test_expand_passes_degenerate_times_through() {
        let event = recurring("e1", vec![slot(1, "10:00", "09:00")]);
        let occurrences = expand(
            &event,
            parse_date("2025-03-10").unwrap(),
            parse_date("2025-03-10").unwrap(),
        );
        assert_eq!(occurrences.len(), 1);
        assert_eq!(occurrences[0].start_time, parse_time("10:00").unwrap());
        assert_eq!(occurrences[0].end_time, parse_time("09:00").unwrap());
    }

    #[test]
    fn test_resolve_without_override_is_identity() {
        let event = recurring("e1", vec![slot(1, "09:00", "10:00")]);
        let occurrence = expand(
            &event,
            parse_date("2025-03-10").unwrap(),
            parse_date("2025-03-10").unwrap(),
        )
        .remove(0);

        let resolved = resolve(occurrence.clone(), &[]).unwrap();
        assert_eq!(resolved, occurrence);
    }

    #[test]
    fn test_resolve_cancellation_suppresses_occurrence() {
        let date = parse_date("2025-03-10").unwrap();
        let event = recurring("e1", vec![slot(1, "09:00", "10:00")]);
        let occurrence = expand(&event, date, date).remove(0);

        let overrides =
            vec![OverrideData::cancellation("e1", date, "u1").into_override("o1".to_string())];
        assert_eq!(resolve(occurrence, &overrides), None);
    }

    #[test]
    fn test_resolve_partial_time_override_falls_back_per_field() {
        let date = parse_date("2025-03-10").unwrap();
        let event = recurring("e1", vec![slot(1, "09:00", "10:00")]);
        let occurrence = expand(&event, date, date).remove(0);

        let overrides = vec![
            OverrideData::reschedule("e1", date, "u1", Some(parse_time("11:00").unwrap()), None)
                .into_override("o1".to_string()),
        ];
        let resolved = resolve(occurrence, &overrides).unwrap();

        assert_eq!(resolved.start_time, parse_time("11:00").unwrap());
        // end falls back to the schedule's original value
        assert_eq!(resolved.end_time, parse_time("10:00").unwrap());
    }

    #[test]
    fn test_resolve_ignores_overrides_for_other_dates() {
        let date = parse_date("2025-03-10").unwrap();
        let next_week = parse_date("2025-03-17").unwrap();
        let event = recurring("e1", vec![slot(1, "09:00", "10:00")]);
        let occurrence = expand(&event, date, date).remove(0);

        let overrides =
            vec![OverrideData::cancellation("e1", next_week, "u1").into_override("o1".to_string())];
        assert!(resolve(occurrence, &overrides).is_some());
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let date = parse_date("2025-03-10").unwrap();
        let event = recurring("e1", vec![slot(1, "09:00", "10:00")]);
        let occurrence = expand(&event, date, date).remove(0);

        let overrides = vec![
            OverrideData::reschedule(
                "e1",
                date,
                "u1",
                Some(parse_time("11:00").unwrap()),
                Some(parse_time("12:00").unwrap()),
            )
            .into_override("o1".to_string()),
        ];

        let first = resolve(occurrence.clone(), &overrides);
        let second = resolve(occurrence, &overrides);
        assert_eq!(first, second);
    }
}
