//! Board service — creation, rename/relocation, listing, and lookup
//! orchestration.

use std::collections::{BTreeSet, HashMap};

use chrono::Utc;
use cycles_core::error::{CyclesError, CyclesResult};
use cycles_core::id::BoardId;
use cycles_core::models::board::{AccessPolicy, RoomMetadata, RoomRecord};
use cycles_core::models::profile::UserProfile;
use cycles_core::models::tenant::RequestClaims;
use cycles_core::path;
use cycles_core::store::{ProfileDirectory, RoomStore};
use futures::future;
use percent_encoding::percent_decode_str;
use tracing::warn;

use crate::error::BoardError;
use crate::seed;

/// Input for board creation.
#[derive(Debug, Clone)]
pub struct CreateBoardInput {
    /// Raw user-supplied slug; validated before anything else touches it.
    pub slug: String,
    /// Display title; defaults when absent.
    pub title: Option<String>,
}

/// Successful creation result.
#[derive(Debug)]
pub struct CreateBoardOutput {
    pub board_id: BoardId,
    /// False when the board already existed and creation was a no-op.
    pub created: bool,
    /// Tenant-relative path the caller should navigate to.
    pub redirect: String,
}

/// Input for renaming and/or relocating a board.
#[derive(Debug, Clone)]
pub struct UpdateBoardInput {
    /// Identifier of the board being updated, as round-tripped through
    /// the settings form. Absent means the request is rejected.
    pub board_id: Option<String>,
    pub title: String,
    /// New slug.
    pub slug: String,
    /// New scope component; unchanged relocations pass the current one.
    pub scope_id: String,
}

/// Successful rename/relocation result.
#[derive(Debug)]
pub struct UpdateBoardOutput {
    /// The board's identifier after the operation.
    pub board_id: BoardId,
    pub title_updated: bool,
    pub relocated: bool,
    /// Tenant-relative path the caller should navigate to.
    pub redirect: String,
}

/// The requester's boards, shaped for presentation.
#[derive(Debug)]
pub struct BoardListing {
    pub active: Vec<RoomRecord>,
    pub archived: Vec<RoomRecord>,
    /// One entry per distinct creator reference across both groups;
    /// `None` when the profile could not be resolved.
    pub creators: HashMap<String, Option<UserProfile>>,
}

/// A single board resolved for display.
#[derive(Debug)]
pub struct BoardPage {
    pub board_id: BoardId,
    pub title: Option<String>,
}

/// Board lifecycle service.
///
/// Generic over the store and directory implementations so that the
/// orchestration layer has no dependency on any backend crate.
pub struct BoardService<S: RoomStore, P: ProfileDirectory> {
    store: S,
    directory: P,
}

impl<S: RoomStore, P: ProfileDirectory> BoardService<S, P> {
    pub fn new(store: S, directory: P) -> Self {
        Self { store, directory }
    }

    /// Whether `id` already denotes a board.
    ///
    /// Any lookup failure — not-found or transport — gates creation as
    /// "does not exist"; a transient outage during this check can make
    /// creation run against an existing board.
    async fn exists(&self, id: &BoardId) -> bool {
        self.store.get(id).await.is_ok()
    }

    /// Create a board and seed its document, idempotently.
    ///
    /// # Errors
    ///
    /// [`CyclesError::NotAuthenticated`], [`CyclesError::InvalidSlug`],
    /// [`CyclesError::Backend`] from the record write, or
    /// [`BoardError::PartiallyCreated`] when the record was written but
    /// the seed was not.
    pub async fn create_board(
        &self,
        claims: RequestClaims,
        input: CreateBoardInput,
    ) -> Result<CreateBoardOutput, BoardError> {
        // 1. Reject unauthenticated requests before any backend call.
        let requester = claims.require_authenticated()?;

        // 2. Compose the identifier; this validates the raw slug.
        let board_id = BoardId::compose(&requester.scope, &input.slug)?;

        // 3. An existing board makes creation a successful no-op.
        if self.exists(&board_id).await {
            return Ok(CreateBoardOutput {
                redirect: path::board(&requester, &board_id),
                board_id,
                created: false,
            });
        }

        // 4. Record write: metadata plus the default access policy.
        let title = input
            .title
            .unwrap_or_else(|| seed::DEFAULT_BOARD_TITLE.to_owned());
        let metadata = RoomMetadata {
            title: Some(title),
            created_on: Some(Utc::now()),
            created_by: Some(requester.user_id.clone()),
            ..RoomMetadata::default()
        };
        self.store
            .create(&board_id, metadata, AccessPolicy::write_by_default())
            .await?;

        // 5. Seed write. The two writes share no transaction; on failure
        //    the record stays and the partial outcome is surfaced.
        if let Err(source) = self.store.seed_document(&board_id, &seed::initial_document()).await {
            warn!(board_id = %board_id, error = %source, "board created but seed write failed");
            return Err(BoardError::PartiallyCreated { board_id, source });
        }

        Ok(CreateBoardOutput {
            redirect: path::board(&requester, &board_id),
            board_id,
            created: true,
        })
    }

    /// Rename a board and/or migrate it to a new identifier.
    ///
    /// Both writes are independently skipped when the corresponding value
    /// is unchanged; metadata updates are not cheap no-ops on the backend.
    ///
    /// # Errors
    ///
    /// [`CyclesError::Unauthorized`] when the target identifier is
    /// missing or outside the requester's scope, plus the usual
    /// authentication, validation, and backend failures.
    pub async fn update_board(
        &self,
        claims: RequestClaims,
        input: UpdateBoardInput,
    ) -> Result<UpdateBoardOutput, BoardError> {
        // 1. Authenticate, then guard the target identifier. A missing
        //    identifier fails here, before any backend call.
        let requester = claims.require_authenticated()?;
        let current_id = requester.scope.authorize(input.board_id.as_deref())?;

        // 2. The backend's update primitive replaces the whole metadata
        //    object, so the current one is needed for the merge.
        let stored = self.store.get(&current_id).await?;

        // 3. Title change → exactly one metadata update. Stored fields
        //    win over the refreshed creator/timestamp fallbacks; only the
        //    title itself is overwritten.
        let title_updated = stored.title.as_deref() != Some(input.title.as_str());
        if title_updated {
            let mut metadata = stored;
            metadata.created_by.get_or_insert_with(|| requester.user_id.clone());
            metadata.created_on.get_or_insert_with(Utc::now);
            metadata.title = Some(input.title.clone());
            self.store.update_metadata(&current_id, metadata).await?;
        }

        // 4. Identifier change → exactly one migration.
        let new_id = BoardId::in_scope(&input.scope_id, &input.slug)?;
        let relocated = new_id != current_id;
        if relocated {
            self.store.migrate_id(&current_id, &new_id).await?;
        }

        // 5. Conclude at the tenant's listing.
        Ok(UpdateBoardOutput {
            board_id: new_id,
            title_updated,
            relocated,
            redirect: path::boards_index(&requester),
        })
    }

    /// List the requester's boards, partitioned by lifecycle state, with
    /// creator profiles batch-resolved.
    ///
    /// # Errors
    ///
    /// Authentication and listing-query failures. Individual profile
    /// lookups never fail the listing.
    pub async fn list_boards(&self, claims: RequestClaims) -> Result<BoardListing, BoardError> {
        // 1.
        let requester = claims.require_authenticated()?;

        // 2. Every room in the requester's scope.
        let rooms = self
            .store
            .list_by_prefix(&requester.scope.board_prefix())
            .await?;

        // 3. Partition by the archived flag; absent means active.
        let (archived, active): (Vec<_>, Vec<_>) =
            rooms.into_iter().partition(|room| room.metadata.archived);

        // 4. Resolve each distinct creator exactly once, concurrently.
        //    Resolving per board would cost one directory call per room;
        //    deduplication collapses repeat creators on top of that.
        let creator_ids: BTreeSet<String> = active
            .iter()
            .chain(archived.iter())
            .filter_map(|room| room.metadata.created_by.clone())
            .collect();
        let resolved = future::join_all(
            creator_ids
                .iter()
                .map(|id| self.directory.resolve_profile(id)),
        )
        .await;
        // Merged by identity key, not completion order: join_all yields
        // results in input order.
        let creators: HashMap<String, Option<UserProfile>> = creator_ids
            .into_iter()
            .zip(resolved.into_iter().map(Result::ok))
            .collect();

        Ok(BoardListing {
            active,
            archived,
            creators,
        })
    }

    /// Resolve a board for display from its URL slug.
    ///
    /// # Errors
    ///
    /// [`CyclesError::NotFound`] when the identifier denotes nothing; the
    /// rendering boundary maps this to a generic not-found response.
    pub async fn fetch_board(
        &self,
        claims: RequestClaims,
        url_slug: &str,
    ) -> Result<BoardPage, BoardError> {
        // 1.
        let requester = claims.require_authenticated()?;

        // 2. Decode the URL slug exactly once, here at the lookup site.
        let decoded = decode_url_slug(url_slug)?;
        let board_id = BoardId::lookup(&requester.scope, &decoded);

        // 3.
        let metadata = self.store.get(&board_id).await?;
        Ok(BoardPage {
            board_id,
            title: metadata.title,
        })
    }
}

/// Percent-decode a URL path segment.
fn decode_url_slug(url_slug: &str) -> CyclesResult<String> {
    let decoded = percent_decode_str(url_slug)
        .decode_utf8()
        .map_err(|_| CyclesError::InvalidSlug {
            reason: "slug is not valid UTF-8 after decoding".into(),
        })?;
    Ok(decoded.into_owned())
}
