//! User profile records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored user profile. The id comes from the auth provider, not the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Payload for creating a profile; the store sets `created_at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProfile {
    pub id: String,
    pub name: String,
    pub email: String,
}

impl NewProfile {
    pub fn into_profile(self, created_at: Option<DateTime<Utc>>) -> UserProfile {
        UserProfile {
            id: self.id,
            name: self.name,
            email: self.email,
            created_at,
        }
    }
}

/// Partial update for a profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfilePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl ProfilePatch {
    pub fn apply(&self, profile: &mut UserProfile) {
        if let Some(name) = &self.name {
            profile.name = name.clone();
        }
        if let Some(email) = &self.email {
            profile.email = email.clone();
        }
    }
}
