//! In-memory store.
//!
//! The reference implementation of [`EventStore`]: upsert and ordering
//! semantics are easiest to read here. Also the test double for everything
//! built on the trait.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::error::{WeekplanError, WeekplanResult};
use crate::event::{Event, EventPatch, NewEvent};
use crate::event_override::{EventOverride, OverrideData};
use crate::user::{NewProfile, ProfilePatch, UserProfile};

use super::{EventStore, Scope};

#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    events: Vec<Event>,
    overrides: Vec<EventOverride>,
    profiles: Vec<UserProfile>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // recover the guard even if a holder panicked; records stay usable
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl EventStore for MemoryStore {
    async fn list_events(&self, scope: &Scope) -> WeekplanResult<Vec<Event>> {
        let inner = self.lock();
        let mut events: Vec<Event> = inner
            .events
            .iter()
            .filter(|e| e.owner_id == scope.owner_id())
            .cloned()
            .collect();
        events.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(events)
    }

    async fn create_event(&self, data: NewEvent) -> WeekplanResult<String> {
        let id = Uuid::new_v4().to_string();
        let event = data.into_event(id.clone(), Some(Utc::now()));
        tracing::debug!(event_id = %id, "created event");
        self.lock().events.push(event);
        Ok(id)
    }

    async fn update_event(&self, id: &str, patch: EventPatch) -> WeekplanResult<()> {
        let mut inner = self.lock();
        let event = inner
            .events
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| WeekplanError::EventNotFound(id.to_string()))?;
        patch.apply(event);
        Ok(())
    }

    async fn delete_event(&self, id: &str) -> WeekplanResult<()> {
        self.lock().events.retain(|e| e.id != id);
        Ok(())
    }

    async fn list_overrides(&self, scope: &Scope) -> WeekplanResult<Vec<EventOverride>> {
        let inner = self.lock();
        Ok(inner
            .overrides
            .iter()
            .filter(|o| o.owner_id == scope.owner_id())
            .cloned()
            .collect())
    }

    async fn upsert_override(&self, data: OverrideData) -> WeekplanResult<String> {
        let mut inner = self.lock();
        match inner
            .overrides
            .iter_mut()
            .find(|o| o.matches_key(&data.event_id, data.original_date, &data.owner_id))
        {
            Some(existing) => {
                data.apply_to(existing);
                Ok(existing.id.clone())
            }
            None => {
                let id = Uuid::new_v4().to_string();
                inner.overrides.push(data.into_override(id.clone()));
                Ok(id)
            }
        }
    }

    async fn delete_override(&self, id: &str) -> WeekplanResult<()> {
        self.lock().overrides.retain(|o| o.id != id);
        Ok(())
    }

    async fn get_profile(&self, id: &str) -> WeekplanResult<Option<UserProfile>> {
        Ok(self.lock().profiles.iter().find(|p| p.id == id).cloned())
    }

    async fn create_profile(&self, profile: NewProfile) -> WeekplanResult<()> {
        let mut inner = self.lock();
        inner.profiles.retain(|p| p.id != profile.id);
        inner.profiles.push(profile.into_profile(Some(Utc::now())));
        Ok(())
    }

    async fn update_profile(&self, id: &str, patch: ProfilePatch) -> WeekplanResult<()> {
        let mut inner = self.lock();
        let profile = inner
            .profiles
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| WeekplanError::ProfileNotFound(id.to_string()))?;
        patch.apply(profile);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{Color, EventKind, ScheduleSlot};
    use crate::time::{parse_date, parse_time};

    fn new_event(name: &str, owner: &str) -> NewEvent {
        NewEvent {
            name: name.to_string(),
            description: None,
            color: Color::Blue,
            owner_id: owner.to_string(),
            kind: EventKind::Recurring {
                schedule: vec![ScheduleSlot {
                    day_of_week: 1,
                    start_time: parse_time("09:00").unwrap(),
                    end_time: parse_time("10:00").unwrap(),
                }],
            },
        }
    }

    #[tokio::test]
    async fn test_list_events_scoped_and_ordered_by_name() {
        let store = MemoryStore::new();
        store.create_event(new_event("Zumba", "u1")).await.unwrap();
        store.create_event(new_event("Aikido", "u1")).await.unwrap();
        store.create_event(new_event("Theirs", "u2")).await.unwrap();

        let events = store.list_events(&Scope::new("u1")).await.unwrap();
        let names: Vec<&str> = events.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["Aikido", "Zumba"]);
    }

    #[tokio::test]
    async fn test_update_event_merges_fields() {
        let store = MemoryStore::new();
        let id = store.create_event(new_event("Gym", "u1")).await.unwrap();

        let patch = EventPatch {
            color: Some(Color::Red),
            ..Default::default()
        };
        store.update_event(&id, patch).await.unwrap();

        let events = store.list_events(&Scope::new("u1")).await.unwrap();
        assert_eq!(events[0].color, Color::Red);
        assert_eq!(events[0].name, "Gym");
    }

    #[tokio::test]
    async fn test_update_missing_event_fails() {
        let store = MemoryStore::new();
        let result = store.update_event("nope", EventPatch::default()).await;
        assert!(matches!(result, Err(WeekplanError::EventNotFound(_))));
    }

    #[tokio::test]
    async fn test_upsert_override_twice_keeps_one_record() {
        let store = MemoryStore::new();
        let date = parse_date("2025-03-10").unwrap();

        let first = OverrideData::reschedule(
            "e1",
            date,
            "u1",
            Some(parse_time("10:00").unwrap()),
            Some(parse_time("11:00").unwrap()),
        );
        let second = OverrideData::reschedule(
            "e1",
            date,
            "u1",
            Some(parse_time("12:00").unwrap()),
            Some(parse_time("13:00").unwrap()),
        );

        let first_id = store.upsert_override(first).await.unwrap();
        let second_id = store.upsert_override(second).await.unwrap();
        assert_eq!(first_id, second_id);

        let overrides = store.list_overrides(&Scope::new("u1")).await.unwrap();
        assert_eq!(overrides.len(), 1);
        assert_eq!(
            overrides[0].new_start_time,
            Some(parse_time("12:00").unwrap())
        );
    }

    #[tokio::test]
    async fn test_upsert_different_dates_creates_separate_records() {
        let store = MemoryStore::new();
        let monday = parse_date("2025-03-10").unwrap();
        let next_monday = parse_date("2025-03-17").unwrap();

        store
            .upsert_override(OverrideData::cancellation("e1", monday, "u1"))
            .await
            .unwrap();
        store
            .upsert_override(OverrideData::cancellation("e1", next_monday, "u1"))
            .await
            .unwrap();

        let overrides = store.list_overrides(&Scope::new("u1")).await.unwrap();
        assert_eq!(overrides.len(), 2);
    }

    #[tokio::test]
    async fn test_profile_create_overwrites_and_updates_merge() {
        let store = MemoryStore::new();
        let profile = NewProfile {
            id: "u1".to_string(),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
        };
        store.create_profile(profile.clone()).await.unwrap();
        store.create_profile(profile).await.unwrap();

        store
            .update_profile(
                "u1",
                ProfilePatch {
                    name: Some("Ada L.".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let stored = store.get_profile("u1").await.unwrap().unwrap();
        assert_eq!(stored.name, "Ada L.");
        assert_eq!(stored.email, "ada@example.com");
        assert!(store.get_profile("nope").await.unwrap().is_none());
    }
}
