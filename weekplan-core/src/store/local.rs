//! JSON-file store.
//!
//! One file per record under `<root>/{events,overrides,users}/<id>.json`.
//! Writes go through a temp file + rename so a crash never leaves a
//! half-written record. Listing scans the collection directory; a record
//! that fails to parse is an error, not a skip, since malformed persisted
//! data is an integrity bug that must surface.

use std::path::PathBuf;

use async_trait::async_trait;
use chrono::Utc;
use serde::Serialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::error::{WeekplanError, WeekplanResult};
use crate::event::{Event, EventPatch, NewEvent};
use crate::event_override::{EventOverride, OverrideData};
use crate::user::{NewProfile, ProfilePatch, UserProfile};

use super::{EventStore, Scope};

const EVENTS_DIR: &str = "events";
const OVERRIDES_DIR: &str = "overrides";
const USERS_DIR: &str = "users";

pub struct LocalStore {
    root: PathBuf,
}

impl LocalStore {
    /// Open (and create if needed) a store rooted at `root`.
    pub fn open(root: impl Into<PathBuf>) -> WeekplanResult<Self> {
        let root = root.into();
        for dir in [EVENTS_DIR, OVERRIDES_DIR, USERS_DIR] {
            std::fs::create_dir_all(root.join(dir))?;
        }
        Ok(LocalStore { root })
    }

    fn record_path(&self, dir: &str, id: &str) -> PathBuf {
        self.root.join(dir).join(format!("{id}.json"))
    }

    fn write_record<T: Serialize>(&self, dir: &str, id: &str, record: &T) -> WeekplanResult<()> {
        let path = self.record_path(dir, id);
        let content = serde_json::to_string_pretty(record)
            .map_err(|e| WeekplanError::Serialization(e.to_string()))?;

        let temp = path.with_extension("json.tmp");
        std::fs::write(&temp, content)?;
        std::fs::rename(&temp, &path)?;
        Ok(())
    }

    fn read_record<T: DeserializeOwned>(&self, dir: &str, id: &str) -> WeekplanResult<Option<T>> {
        let path = self.record_path(dir, id);
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&path)?;
        let record = serde_json::from_str(&content)
            .map_err(|e| WeekplanError::Serialization(format!("{}: {e}", path.display())))?;
        Ok(Some(record))
    }

    fn list_records<T: DeserializeOwned>(&self, dir: &str) -> WeekplanResult<Vec<T>> {
        let mut records = Vec::new();

        for entry in std::fs::read_dir(self.root.join(dir))? {
            let path = entry?.path();
            if path.extension().is_some_and(|e| e == "json") {
                let content = std::fs::read_to_string(&path)?;
                let record = serde_json::from_str(&content).map_err(|e| {
                    WeekplanError::Serialization(format!("{}: {e}", path.display()))
                })?;
                records.push(record);
            }
        }

        Ok(records)
    }

    fn delete_record(&self, dir: &str, id: &str) -> WeekplanResult<()> {
        let path = self.record_path(dir, id);
        if path.exists() {
            std::fs::remove_file(&path)?;
        }
        Ok(())
    }
}

#[async_trait]
impl EventStore for LocalStore {
    async fn list_events(&self, scope: &Scope) -> WeekplanResult<Vec<Event>> {
        let mut events: Vec<Event> = self
            .list_records(EVENTS_DIR)?
            .into_iter()
            .filter(|e: &Event| e.owner_id == scope.owner_id())
            .collect();
        events.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(events)
    }

    async fn create_event(&self, data: NewEvent) -> WeekplanResult<String> {
        let id = Uuid::new_v4().to_string();
        let event = data.into_event(id.clone(), Some(Utc::now()));
        self.write_record(EVENTS_DIR, &id, &event)?;
        tracing::debug!(event_id = %id, "wrote event record");
        Ok(id)
    }

    async fn update_event(&self, id: &str, patch: EventPatch) -> WeekplanResult<()> {
        let mut event: Event = self
            .read_record(EVENTS_DIR, id)?
            .ok_or_else(|| WeekplanError::EventNotFound(id.to_string()))?;
        patch.apply(&mut event);
        self.write_record(EVENTS_DIR, id, &event)
    }

    async fn delete_event(&self, id: &str) -> WeekplanResult<()> {
        self.delete_record(EVENTS_DIR, id)
    }

    async fn list_overrides(&self, scope: &Scope) -> WeekplanResult<Vec<EventOverride>> {
        Ok(self
            .list_records(OVERRIDES_DIR)?
            .into_iter()
            .filter(|o: &EventOverride| o.owner_id == scope.owner_id())
            .collect())
    }

    async fn upsert_override(&self, data: OverrideData) -> WeekplanResult<String> {
        let existing = self
            .list_records::<EventOverride>(OVERRIDES_DIR)?
            .into_iter()
            .find(|o| o.matches_key(&data.event_id, data.original_date, &data.owner_id));

        match existing {
            Some(mut record) => {
                data.apply_to(&mut record);
                self.write_record(OVERRIDES_DIR, &record.id, &record)?;
                Ok(record.id)
            }
            None => {
                let id = Uuid::new_v4().to_string();
                let record = data.into_override(id.clone());
                self.write_record(OVERRIDES_DIR, &id, &record)?;
                Ok(id)
            }
        }
    }

    async fn delete_override(&self, id: &str) -> WeekplanResult<()> {
        self.delete_record(OVERRIDES_DIR, id)
    }

    async fn get_profile(&self, id: &str) -> WeekplanResult<Option<UserProfile>> {
        self.read_record(USERS_DIR, id)
    }

    async fn create_profile(&self, profile: NewProfile) -> WeekplanResult<()> {
        let id = profile.id.clone();
        let record = profile.into_profile(Some(Utc::now()));
        self.write_record(USERS_DIR, &id, &record)
    }

    async fn update_profile(&self, id: &str, patch: ProfilePatch) -> WeekplanResult<()> {
        let mut profile: UserProfile = self
            .read_record(USERS_DIR, id)?
            .ok_or_else(|| WeekplanError::ProfileNotFound(id.to_string()))?;
        patch.apply(&mut profile);
        self.write_record(USERS_DIR, id, &profile)
    }
}
