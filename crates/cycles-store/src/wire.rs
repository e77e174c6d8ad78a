//! Storage envelope for seed documents.
//!
//! The document store's storage-initialization endpoint takes documents
//! as a typed node tree: container nodes are tagged `LiveObject` or
//! `LiveList` with their contents under `data`, while plain values are
//! embedded verbatim.

use cycles_core::models::document::{PitchEntry, ScopeEntry, SeedDocument};
use serde_json::{Value, json};

/// Wrap a seed document in the storage node envelope.
pub fn storage_payload(seed: &SeedDocument) -> Value {
    live_object(json!({
        "tasks": live_list(seed.tasks.clone()),
        "scopes": live_list(seed.scopes.iter().map(scope_node).collect()),
        "pitches": live_list(seed.pitches.iter().map(pitch_node).collect()),
        "info": live_object(json!({ "name": seed.info.name })),
    }))
}

fn scope_node(scope: &ScopeEntry) -> Value {
    live_object(json!({
        "id": scope.id,
        "pitchId": scope.pitch_id,
        "title": scope.title,
        "color": scope.color,
        "core": scope.core,
    }))
}

fn pitch_node(pitch: &PitchEntry) -> Value {
    live_object(json!({
        "id": pitch.id,
        "title": pitch.title,
    }))
}

fn live_object(data: Value) -> Value {
    json!({ "liveblocksType": "LiveObject", "data": data })
}

fn live_list(data: Vec<Value>) -> Value {
    json!({ "liveblocksType": "LiveList", "data": data })
}
