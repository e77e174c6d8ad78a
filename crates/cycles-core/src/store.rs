//! Store trait definitions for backend abstraction.
//!
//! All operations are async. The document store owns board state
//! exclusively; this layer only issues the commands that create, seed,
//! rename, and list boards. Implementations live in `cycles-store`.

use crate::error::CyclesResult;
use crate::id::BoardId;
use crate::models::board::{AccessPolicy, RoomMetadata, RoomRecord};
use crate::models::document::SeedDocument;
use crate::models::profile::UserProfile;

/// The external real-time document store, at its command surface.
pub trait RoomStore: Send + Sync {
    /// Fetch a room's metadata.
    fn get(&self, id: &BoardId) -> impl Future<Output = CyclesResult<RoomMetadata>> + Send;

    /// Create a room record with its metadata and default access policy.
    fn create(
        &self,
        id: &BoardId,
        metadata: RoomMetadata,
        access: AccessPolicy,
    ) -> impl Future<Output = CyclesResult<()>> + Send;

    /// Replace a room's whole metadata object.
    fn update_metadata(
        &self,
        id: &BoardId,
        metadata: RoomMetadata,
    ) -> impl Future<Output = CyclesResult<()>> + Send;

    /// Move a room from one identifier to another, preserving its
    /// document and history.
    fn migrate_id(
        &self,
        old: &BoardId,
        new: &BoardId,
    ) -> impl Future<Output = CyclesResult<()>> + Send;

    /// Write a room's initial document. Issued exactly once per board,
    /// directly after `create`.
    fn seed_document(
        &self,
        id: &BoardId,
        seed: &SeedDocument,
    ) -> impl Future<Output = CyclesResult<()>> + Send;

    /// All rooms whose identifier starts with `prefix`.
    fn list_by_prefix(
        &self,
        prefix: &str,
    ) -> impl Future<Output = CyclesResult<Vec<RoomRecord>>> + Send;
}

/// The identity provider's profile lookup surface.
pub trait ProfileDirectory: Send + Sync {
    /// Resolve an identity reference to a display profile.
    fn resolve_profile(
        &self,
        user_id: &str,
    ) -> impl Future<Output = CyclesResult<UserProfile>> + Send;
}
