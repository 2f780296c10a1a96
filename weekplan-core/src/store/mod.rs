//! Store interface for events, overrides, and user profiles.
//!
//! The engine consumes this trait; implementations decide where records live.
//! Two ship with the crate: [`MemoryStore`] (reference implementation and
//! test double) and [`LocalStore`] (JSON files on disk). A remote document
//! store adapter implements the same trait.

mod local;
mod memory;

pub use local::LocalStore;
pub use memory::MemoryStore;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::WeekplanResult;
use crate::event::{Event, EventPatch, NewEvent};
use crate::event_override::{EventOverride, OverrideData};
use crate::user::{NewProfile, ProfilePatch, UserProfile};

/// Identity boundary under which events and overrides are queried.
///
/// Every list operation filters by scope and every write stamps the owner it
/// carries. A personal deployment uses the signed-in user's id; a shared
/// deployment uses one scope for everyone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scope(String);

impl Scope {
    pub fn new(owner_id: impl Into<String>) -> Self {
        Scope(owner_id.into())
    }

    pub fn owner_id(&self) -> &str {
        &self.0
    }
}

/// CRUD + query contract over the three persisted collections.
///
/// Read-after-write is expected to hold within a session. Nothing here
/// retries or times out; failures surface unchanged to the caller.
#[async_trait]
pub trait EventStore: Send + Sync {
    /// List events in scope, ordered by name (ties in no guaranteed order).
    async fn list_events(&self, scope: &Scope) -> WeekplanResult<Vec<Event>>;

    /// Create an event and return the assigned id. The store sets
    /// `created_at`.
    async fn create_event(&self, data: NewEvent) -> WeekplanResult<String>;

    /// Field-merge `patch` into an existing event. `EventNotFound` when the
    /// id is absent.
    async fn update_event(&self, id: &str, patch: EventPatch) -> WeekplanResult<()>;

    /// Delete an event. Deleting an absent id is a no-op. Dependent overrides
    /// are the caller's responsibility (see `AppState::remove_event`).
    async fn delete_event(&self, id: &str) -> WeekplanResult<()>;

    /// List overrides in scope.
    async fn list_overrides(&self, scope: &Scope) -> WeekplanResult<Vec<EventOverride>>;

    /// Update-if-exists-else-insert, keyed on
    /// `(event_id, original_date, owner_id)`. Returns the id of the stored
    /// record, existing or fresh.
    async fn upsert_override(&self, data: OverrideData) -> WeekplanResult<String>;

    /// Delete an override. Deleting an absent id is a no-op.
    async fn delete_override(&self, id: &str) -> WeekplanResult<()>;

    /// Fetch a user profile, `None` when absent.
    async fn get_profile(&self, id: &str) -> WeekplanResult<Option<UserProfile>>;

    /// Create a profile under the caller-chosen id, overwriting any existing
    /// record with that id. The store sets `created_at`.
    async fn create_profile(&self, profile: NewProfile) -> WeekplanResult<()>;

    /// Field-merge `patch` into an existing profile. `ProfileNotFound` when
    /// the id is absent.
    async fn update_profile(&self, id: &str, patch: ProfilePatch) -> WeekplanResult<()>;
}
