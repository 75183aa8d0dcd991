use super::UserId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Partial user reference, as found in audit fields and user mentions.
///
/// Encodes as `{"object": "user", "id": "..."}`; the profile fields are only
/// present when the integration has user-read capabilities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartialUser {
    #[serde(default)]
    object: UserObject,
    pub id: UserId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
enum UserObject {
    #[default]
    #[serde(rename = "user")]
    User,
}

impl PartialUser {
    pub fn new(id: UserId) -> Self {
        Self {
            object: UserObject::User,
            id,
            name: None,
            avatar_url: None,
        }
    }
}

impl fmt::Display for PartialUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{}", name),
            None => write!(f, "User {}", self.id),
        }
    }
}
