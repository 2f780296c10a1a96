//! Per-session application state over a store.
//!
//! `AppState` holds the loaded events and overrides and applies write-through
//! mutations: the store call happens first, the in-memory copy is patched
//! only after it succeeds. A failed mutation leaves memory untouched, which
//! matches the not-yet-attempted remote state.
//!
//! This is an explicit context object with the lifecycle
//! `empty -> loaded -> mutated* -> reset`, constructed and passed by the
//! front-end rather than living as a module-level singleton. There is one
//! mutator per session; two mutations overlapping in flight are not
//! serialized against each other, and the last local patch wins.

use chrono::NaiveDate;

use crate::error::WeekplanResult;
use crate::event::{Event, EventPatch, NewEvent};
use crate::event_override::{EventOverride, OverrideData};
use crate::store::{EventStore, Scope};

#[derive(Default)]
pub struct AppState {
    events: Vec<Event>,
    overrides: Vec<EventOverride>,
    loaded: bool,
}

impl AppState {
    pub fn new() -> Self {
        AppState::default()
    }

    /// Fetch both collections once per session.
    ///
    /// A store failure degrades to an empty-but-loaded state: the front-end
    /// shows "no data" instead of spinning forever.
    pub async fn load(&mut self, store: &dyn EventStore, scope: &Scope) {
        let loaded = async {
            let events = store.list_events(scope).await?;
            let overrides = store.list_overrides(scope).await?;
            WeekplanResult::Ok((events, overrides))
        }
        .await;

        match loaded {
            Ok((events, overrides)) => {
                self.events = events;
                self.overrides = overrides;
            }
            Err(e) => {
                tracing::error!("failed to load calendar data: {e}");
                self.events.clear();
                self.overrides.clear();
            }
        }
        self.loaded = true;
    }

    /// Create an event and append it locally under the assigned id.
    ///
    /// The local copy has no `created_at` until the next load; only the store
    /// knows the server timestamp.
    pub async fn add_event(
        &mut self,
        store: &dyn EventStore,
        data: NewEvent,
    ) -> WeekplanResult<String> {
        let id = store.create_event(data.clone()).await?;
        self.events.push(data.into_event(id.clone(), None));
        Ok(id)
    }

    /// Update an event remotely, then merge the patch into the local copy.
    pub async fn edit_event(
        &mut self,
        store: &dyn EventStore,
        id: &str,
        patch: EventPatch,
    ) -> WeekplanResult<()> {
        store.update_event(id, patch.clone()).await?;
        if let Some(event) = self.events.iter_mut().find(|e| e.id == id) {
            patch.apply(event);
        }
        Ok(())
    }

    /// Delete an event and its dependent overrides.
    ///
    /// The store does not cascade, so the overrides are deleted here, each by
    /// id, before memory is patched.
    pub async fn remove_event(&mut self, store: &dyn EventStore, id: &str) -> WeekplanResult<()> {
        store.delete_event(id).await?;

        let dependent: Vec<String> = self
            .overrides
            .iter()
            .filter(|o| o.event_id == id)
            .map(|o| o.id.clone())
            .collect();
        for override_id in &dependent {
            store.delete_override(override_id).await?;
        }

        self.events.retain(|e| e.id != id);
        self.overrides.retain(|o| o.event_id != id);
        tracing::debug!(event_id = %id, overrides = dependent.len(), "removed event");
        Ok(())
    }

    /// Upsert an override remotely, then mirror the upsert in memory under
    /// the returned id.
    pub async fn set_override(
        &mut self,
        store: &dyn EventStore,
        data: OverrideData,
    ) -> WeekplanResult<String> {
        let id = store.upsert_override(data.clone()).await?;

        match self
            .overrides
            .iter_mut()
            .find(|o| o.matches_key(&data.event_id, data.original_date, &data.owner_id))
        {
            Some(existing) => data.apply_to(existing),
            None => self.overrides.push(data.into_override(id.clone())),
        }
        Ok(id)
    }

    pub async fn remove_override(
        &mut self,
        store: &dyn EventStore,
        id: &str,
    ) -> WeekplanResult<()> {
        store.delete_override(id).await?;
        self.overrides.retain(|o| o.id != id);
        Ok(())
    }

    /// Back to the initial unloaded state (logout path).
    pub fn reset(&mut self) {
        *self = AppState::new();
    }

    pub fn loaded(&self) -> bool {
        self.loaded
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn overrides(&self) -> &[EventOverride] {
        &self.overrides
    }

    /// Resolve an occurrence's back-reference to its source event.
    pub fn event(&self, id: &str) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }

    /// The override currently stored for one occurrence, if any.
    pub fn override_for(&self, event_id: &str, date: NaiveDate) -> Option<&EventOverride> {
        self.overrides
            .iter()
            .find(|o| o.event_id == event_id && o.original_date == date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WeekplanError;
    use crate::event::{Color, EventKind, ScheduleSlot};
    use crate::store::MemoryStore;
    use crate::time::{parse_date, parse_time};
    use crate::user::{NewProfile, ProfilePatch, UserProfile};
    use async_trait::async_trait;

    /// A store whose every call fails, for the degraded paths.
    struct FailingStore;

    #[async_trait]
    impl EventStore for FailingStore {
        async fn list_events(&self, _scope: &Scope) -> WeekplanResult<Vec<Event>> {
            Err(WeekplanError::Store("unavailable".to_string()))
        }
        async fn create_event(&self, _data: NewEvent) -> WeekplanResult<String> {
            Err(WeekplanError::Store("unavailable".to_string()))
        }
        async fn update_event(&self, _id: &str, _patch: EventPatch) -> WeekplanResult<()> {
            Err(WeekplanError::Store("unavailable".to_string()))
        }
        async fn delete_event(&self, _id: &str) -> WeekplanResult<()> {
            Err(WeekplanError::Store("unavailable".to_string()))
        }
        async fn list_overrides(&self, _scope: &Scope) -> WeekplanResult<Vec<EventOverride>> {
            Err(WeekplanError::Store("unavailable".to_string()))
        }
        async fn upsert_override(&self, _data: OverrideData) -> WeekplanResult<String> {
            Err(WeekplanError::Store("unavailable".to_string()))
        }
        async fn delete_override(&self, _id: &str) -> WeekplanResult<()> {
            Err(WeekplanError::Store("unavailable".to_string()))
        }
        async fn get_profile(&self, _id: &str) -> WeekplanResult<Option<UserProfile>> {
            Err(WeekplanError::Store("unavailable".to_string()))
        }
        async fn create_profile(&self, _profile: NewProfile) -> WeekplanResult<()> {
            Err(WeekplanError::Store("unavailable".to_string()))
        }
        async fn update_profile(&self, _id: &str, _patch: ProfilePatch) -> WeekplanResult<()> {
            Err(WeekplanError::Store("unavailable".to_string()))
        }
    }

    fn new_event(name: &str) -> NewEvent {
        NewEvent {
            name: name.to_string(),
            description: None,
            color: Color::Purple,
            owner_id: "u1".to_string(),
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
    async fn test_load_populates_state() {
        let store = MemoryStore::new();
        let scope = Scope::new("u1");
        store.create_event(new_event("Gym")).await.unwrap();

        let mut state = AppState::new();
        assert!(!state.loaded());
        state.load(&store, &scope).await;

        assert!(state.loaded());
        assert_eq!(state.events().len(), 1);
    }

    #[tokio::test]
    async fn test_load_fails_open() {
        let mut state = AppState::new();
        state.load(&FailingStore, &Scope::new("u1")).await;

        assert!(state.loaded());
        assert!(state.events().is_empty());
        assert!(state.overrides().is_empty());
    }

    #[tokio::test]
    async fn test_failed_mutation_leaves_memory_untouched() {
        let store = MemoryStore::new();
        let scope = Scope::new("u1");
        let mut state = AppState::new();
        state.load(&store, &scope).await;

        let result = state.add_event(&FailingStore, new_event("Gym")).await;
        assert!(result.is_err());
        assert!(state.events().is_empty());

        let date = parse_date("2025-03-10").unwrap();
        let result = state
            .set_override(&FailingStore, OverrideData::cancellation("e1", date, "u1"))
            .await;
        assert!(result.is_err());
        assert!(state.overrides().is_empty());
    }

    #[tokio::test]
    async fn test_add_and_edit_patch_memory_after_store() {
        let store = MemoryStore::new();
        let scope = Scope::new("u1");
        let mut state = AppState::new();
        state.load(&store, &scope).await;

        let id = state.add_event(&store, new_event("Gym")).await.unwrap();
        assert_eq!(state.events().len(), 1);
        assert_eq!(state.event(&id).unwrap().name, "Gym");

        state
            .edit_event(
                &store,
                &id,
                EventPatch {
                    name: Some("Gym session".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(state.event(&id).unwrap().name, "Gym session");

        // the store saw the same patch
        let stored = store.list_events(&scope).await.unwrap();
        assert_eq!(stored[0].name, "Gym session");
    }

    #[tokio::test]
    async fn test_remove_event_cascades_overrides_to_store() {
        let store = MemoryStore::new();
        let scope = Scope::new("u1");
        let mut state = AppState::new();
        state.load(&store, &scope).await;

        let id = state.add_event(&store, new_event("Gym")).await.unwrap();
        let date = parse_date("2025-03-10").unwrap();
        state
            .set_override(&store, OverrideData::cancellation(id.clone(), date, "u1"))
            .await
            .unwrap();

        state.remove_event(&store, &id).await.unwrap();

        assert!(state.events().is_empty());
        assert!(state.overrides().is_empty());
        assert!(store.list_overrides(&scope).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_set_override_upserts_in_memory() {
        let store = MemoryStore::new();
        let scope = Scope::new("u1");
        let mut state = AppState::new();
        state.load(&store, &scope).await;

        let date = parse_date("2025-03-10").unwrap();
        let first_id = state
            .set_override(
                &store,
                OverrideData::reschedule("e1", date, "u1", Some(parse_time("10:00").unwrap()), None),
            )
            .await
            .unwrap();
        let second_id = state
            .set_override(
                &store,
                OverrideData::reschedule("e1", date, "u1", Some(parse_time("12:00").unwrap()), None),
            )
            .await
            .unwrap();

        assert_eq!(first_id, second_id);
        assert_eq!(state.overrides().len(), 1);
        assert_eq!(
            state.override_for("e1", date).unwrap().new_start_time,
            Some(parse_time("12:00").unwrap())
        );
    }

    #[tokio::test]
    async fn test_reset_returns_to_initial_state() {
        let store = MemoryStore::new();
        let scope = Scope::new("u1");
        let mut state = AppState::new();
        state.load(&store, &scope).await;
        state.add_event(&store, new_event("Gym")).await.unwrap();

        state.reset();

        assert!(!state.loaded());
        assert!(state.events().is_empty());
    }
}
