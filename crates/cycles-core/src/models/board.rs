//! Board metadata and access policy.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::BoardId;

/// Flat metadata object stored alongside each room in the document store.
///
/// The store's update primitive replaces the whole object, so keys this
/// layer does not model are kept in `extra` and written back verbatim.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoomMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Creation time, RFC 3339.
    #[serde(rename = "createdOn", skip_serializing_if = "Option::is_none")]
    pub created_on: Option<DateTime<Utc>>,
    /// Identity reference of the creating user, resolved to a display
    /// profile only at listing time.
    #[serde(rename = "createdBy", skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    /// Archived boards stay in the store; archival is a flag, not removal.
    #[serde(default, skip_serializing_if = "is_false")]
    pub archived: bool,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// One listing row: identifier plus metadata.
#[derive(Debug, Clone)]
pub struct RoomRecord {
    pub id: BoardId,
    pub metadata: RoomMetadata,
}

/// Access level grantable on a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoomAccess {
    #[serde(rename = "room:write")]
    Write,
    #[serde(rename = "room:read")]
    Read,
}

/// Accesses granted to anyone who can address a room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessPolicy {
    #[serde(rename = "defaultAccesses")]
    pub default_accesses: Vec<RoomAccess>,
}

impl AccessPolicy {
    /// The policy applied to newly created boards: write at the room's
    /// default access level.
    pub fn write_by_default() -> Self {
        Self {
            default_accesses: vec![RoomAccess::Write],
        }
    }
}
