//! In-memory implementations of the store traits.
//!
//! Service tests run against these the way they would against an
//! embedded engine: a real implementation of the store contract, held in
//! process. Every call is recorded so tests can assert exactly which
//! backend commands an operation issued, and individual commands can be
//! toggled to fail for exercising partial-failure paths.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use cycles_core::error::{CyclesError, CyclesResult};
use cycles_core::id::BoardId;
use cycles_core::models::board::{AccessPolicy, RoomMetadata, RoomRecord};
use cycles_core::models::document::SeedDocument;
use cycles_core::models::profile::UserProfile;
use cycles_core::store::{ProfileDirectory, RoomStore};

/// One recorded backend command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreOp {
    Get(String),
    Create(String),
    UpdateMetadata(String),
    MigrateId(String, String),
    SeedDocument(String),
    ListByPrefix(String),
}

/// A room as held by the memory store.
#[derive(Debug, Clone, Default)]
pub struct StoredRoom {
    pub metadata: RoomMetadata,
    pub access: Option<AccessPolicy>,
    pub document: Option<SeedDocument>,
}

#[derive(Debug, Default)]
struct MemoryInner {
    rooms: BTreeMap<String, StoredRoom>,
    ops: Vec<StoreOp>,
    fail_get: bool,
    fail_seed: bool,
}

/// In-memory [`RoomStore`].
#[derive(Debug, Clone, Default)]
pub struct MemoryRoomStore {
    inner: Arc<Mutex<MemoryInner>>,
}

impl MemoryRoomStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, MemoryInner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Insert a room directly, bypassing the command surface.
    pub fn insert(&self, id: &str, metadata: RoomMetadata) {
        self.lock().rooms.insert(
            id.to_owned(),
            StoredRoom {
                metadata,
                ..StoredRoom::default()
            },
        );
    }

    /// Snapshot of a stored room.
    pub fn room(&self, id: &str) -> Option<StoredRoom> {
        self.lock().rooms.get(id).cloned()
    }

    /// Every command issued so far, in order.
    pub fn ops(&self) -> Vec<StoreOp> {
        self.lock().ops.clone()
    }

    /// Make subsequent `get` calls fail with a transport error.
    pub fn fail_get(&self, fail: bool) {
        self.lock().fail_get = fail;
    }

    /// Make subsequent `seed_document` calls fail with a transport error.
    pub fn fail_seed(&self, fail: bool) {
        self.lock().fail_seed = fail;
    }

    fn not_found(id: &str) -> CyclesError {
        CyclesError::NotFound {
            entity: "board".into(),
            id: id.to_owned(),
        }
    }
}

impl RoomStore for MemoryRoomStore {
    async fn get(&self, id: &BoardId) -> CyclesResult<RoomMetadata> {
        let key = id.to_string();
        let mut inner = self.lock();
        inner.ops.push(StoreOp::Get(key.clone()));
        if inner.fail_get {
            return Err(CyclesError::Backend("injected get failure".into()));
        }
        inner
            .rooms
            .get(&key)
            .map(|room| room.metadata.clone())
            .ok_or_else(|| Self::not_found(&key))
    }

    async fn create(
        &self,
        id: &BoardId,
        metadata: RoomMetadata,
        access: AccessPolicy,
    ) -> CyclesResult<()> {
        let key = id.to_string();
        let mut inner = self.lock();
        inner.ops.push(StoreOp::Create(key.clone()));
        inner.rooms.insert(
            key,
            StoredRoom {
                metadata,
                access: Some(access),
                document: None,
            },
        );
        Ok(())
    }

    async fn update_metadata(&self, id: &BoardId, metadata: RoomMetadata) -> CyclesResult<()> {
        let key = id.to_string();
        let mut inner = self.lock();
        inner.ops.push(StoreOp::UpdateMetadata(key.clone()));
        let room = inner.rooms.get_mut(&key).ok_or_else(|| Self::not_found(&key))?;
        room.metadata = metadata;
        Ok(())
    }

    async fn migrate_id(&self, old: &BoardId, new: &BoardId) -> CyclesResult<()> {
        let old_key = old.to_string();
        let new_key = new.to_string();
        let mut inner = self.lock();
        inner
            .ops
            .push(StoreOp::MigrateId(old_key.clone(), new_key.clone()));
        let room = inner
            .rooms
            .remove(&old_key)
            .ok_or_else(|| Self::not_found(&old_key))?;
        inner.rooms.insert(new_key, room);
        Ok(())
    }

    async fn seed_document(&self, id: &BoardId, seed: &SeedDocument) -> CyclesResult<()> {
        let key = id.to_string();
        let mut inner = self.lock();
        inner.ops.push(StoreOp::SeedDocument(key.clone()));
        if inner.fail_seed {
            return Err(CyclesError::Backend("injected seed failure".into()));
        }
        let room = inner.rooms.get_mut(&key).ok_or_else(|| Self::not_found(&key))?;
        room.document = Some(seed.clone());
        Ok(())
    }

    async fn list_by_prefix(&self, prefix: &str) -> CyclesResult<Vec<RoomRecord>> {
        let mut inner = self.lock();
        inner.ops.push(StoreOp::ListByPrefix(prefix.to_owned()));
        let records = inner
            .rooms
            .iter()
            .filter(|(key, _)| key.starts_with(prefix))
            .filter_map(|(key, room)| {
                BoardId::parse(key).ok().map(|id| RoomRecord {
                    id,
                    metadata: room.metadata.clone(),
                })
            })
            .collect();
        Ok(records)
    }
}

#[derive(Debug, Default)]
struct DirectoryInner {
    profiles: BTreeMap<String, UserProfile>,
    lookups: Vec<String>,
}

/// In-memory [`ProfileDirectory`].
#[derive(Debug, Clone, Default)]
pub struct MemoryProfileDirectory {
    inner: Arc<Mutex<DirectoryInner>>,
}

impl MemoryProfileDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, DirectoryInner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Register a resolvable profile.
    pub fn insert(&self, profile: UserProfile) {
        self.lock().profiles.insert(profile.id.clone(), profile);
    }

    /// Every lookup issued so far, in order.
    pub fn lookups(&self) -> Vec<String> {
        self.lock().lookups.clone()
    }
}

impl ProfileDirectory for MemoryProfileDirectory {
    async fn resolve_profile(&self, user_id: &str) -> CyclesResult<UserProfile> {
        let mut inner = self.lock();
        inner.lookups.push(user_id.to_owned());
        inner
            .profiles
            .get(user_id)
            .cloned()
            .ok_or_else(|| CyclesError::NotFound {
                entity: "user".into(),
                id: user_id.to_owned(),
            })
    }
}
