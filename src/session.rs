use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("unknown role '{0}' (expected STUDENT, TEACHER or ADMIN)")]
    UnknownRole(String),
}

/// Role claim carried by the signed-in user's credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Student,
    Teacher,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "STUDENT",
            Role::Teacher => "TEACHER",
            Role::Admin => "ADMIN",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = SessionError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "STUDENT" => Ok(Role::Student),
            "TEACHER" => Ok(Role::Teacher),
            "ADMIN" => Ok(Role::Admin),
            _ => Err(SessionError::UnknownRole(value.to_string())),
        }
    }
}

/// Client-side cart snapshot: course id to quantity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: BTreeMap<i64, u32>,
}

impl Cart {
    pub fn add(&mut self, course_id: i64) -> u32 {
        let quantity = self.items.entry(course_id).or_insert(0);
        *quantity += 1;
        *quantity
    }

    /// Drops the course entirely; returns whether it was present.
    pub fn remove(&mut self, course_id: i64) -> bool {
        self.items.remove(&course_id).is_some()
    }

    pub fn quantity(&self, course_id: i64) -> u32 {
        self.items.get(&course_id).copied().unwrap_or(0)
    }

    pub fn total_items(&self) -> u32 {
        self.items.values().sum()
    }

    pub fn course_ids(&self) -> impl Iterator<Item = i64> + '_ {
        self.items.keys().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

/// Per-client state passed explicitly to whatever needs it, loaded and saved
/// through a [`SessionStore`](crate::persistence::SessionStore).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credential: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(default)]
    pub cart: Cart,
}

impl Session {
    pub fn sign_in(&mut self, credential: Option<String>, user_id: i64, role: Role) {
        self.credential = credential;
        self.user_id = Some(user_id);
        self.role = Some(role);
    }

    /// Forget everything, cart included.
    pub fn sign_out(&mut self) {
        *self = Session::default();
    }

    pub fn is_signed_in(&self) -> bool {
        self.user_id.is_some() && self.role.is_some()
    }

    pub fn bearer_header(&self) -> Option<String> {
        self.credential
            .as_deref()
            .map(|token| format!("Bearer {token}"))
    }
}
