//! Seed document model.
//!
//! The nested document a board is seeded with exactly once at creation.
//! After the seed write the document belongs to the real-time protocol
//! and is never touched by this layer again.

use serde::{Deserialize, Serialize};

/// The fixed initial shape of a board's document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedDocument {
    /// Task list; empty at creation.
    pub tasks: Vec<serde_json::Value>,
    pub scopes: Vec<ScopeEntry>,
    pub pitches: Vec<PitchEntry>,
    pub info: BoardInfo,
}

/// A scope of work on the board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScopeEntry {
    /// Opaque generated identifier.
    pub id: String,
    /// The pitch this scope belongs to.
    #[serde(rename = "pitchId")]
    pub pitch_id: String,
    pub title: String,
    /// Display color token.
    pub color: String,
    /// Whether this is the board's core (default) scope.
    pub core: bool,
}

/// A pitch the board's scopes hang off.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PitchEntry {
    /// Opaque generated identifier.
    pub id: String,
    pub title: String,
}

/// Board-level info object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardInfo {
    pub name: String,
}
