//! Integration tests for the board service, run against the in-memory
//! store implementations.

use chrono::{DateTime, Utc};
use cycles_board::error::BoardError;
use cycles_board::service::{BoardService, CreateBoardInput, UpdateBoardInput};
use cycles_core::error::CyclesError;
use cycles_core::models::board::RoomMetadata;
use cycles_core::models::profile::UserProfile;
use cycles_core::models::tenant::RequestClaims;
use cycles_store::{MemoryProfileDirectory, MemoryRoomStore, StoreOp};

fn claims() -> RequestClaims {
    RequestClaims {
        user_id: Some("user_123".into()),
        org_id: Some("org_456".into()),
        org_slug: Some("my-org".into()),
    }
}

fn personal_claims() -> RequestClaims {
    RequestClaims {
        user_id: Some("user_123".into()),
        org_id: None,
        org_slug: None,
    }
}

fn anonymous() -> RequestClaims {
    RequestClaims::default()
}

fn setup() -> (
    BoardService<MemoryRoomStore, MemoryProfileDirectory>,
    MemoryRoomStore,
    MemoryProfileDirectory,
) {
    let store = MemoryRoomStore::new();
    let directory = MemoryProfileDirectory::new();
    let service = BoardService::new(store.clone(), directory.clone());
    (service, store, directory)
}

fn create_input(slug: &str, title: Option<&str>) -> CreateBoardInput {
    CreateBoardInput {
        slug: slug.into(),
        title: title.map(Into::into),
    }
}

fn update_input(board_id: Option<&str>, title: &str, slug: &str, scope_id: &str) -> UpdateBoardInput {
    UpdateBoardInput {
        board_id: board_id.map(Into::into),
        title: title.into(),
        slug: slug.into(),
        scope_id: scope_id.into(),
    }
}

fn stored_metadata(title: &str) -> RoomMetadata {
    RoomMetadata {
        title: Some(title.into()),
        created_on: Some(fixed_time()),
        created_by: Some("user_123".into()),
        ..RoomMetadata::default()
    }
}

fn fixed_time() -> DateTime<Utc> {
    "2025-01-01T00:00:00Z".parse().unwrap()
}

fn count(ops: &[StoreOp], matches: impl Fn(&StoreOp) -> bool) -> usize {
    ops.iter().filter(|op| matches(op)).count()
}

// -----------------------------------------------------------------------
// Creation
// -----------------------------------------------------------------------

#[tokio::test]
async fn create_rejects_unauthenticated_requests() {
    let (service, store, _) = setup();

    let err = service
        .create_board(anonymous(), create_input("ok", None))
        .await
        .unwrap_err();

    assert!(matches!(err, BoardError::Core(CyclesError::NotAuthenticated)));
    assert!(store.ops().is_empty());
}

#[tokio::test]
async fn create_accepts_a_valid_slug() {
    let (service, store, _) = setup();

    let output = service
        .create_board(claims(), create_input("my-board", Some("My Board")))
        .await
        .unwrap();

    assert!(output.created);
    assert_eq!(output.redirect, "/my-org/boards/my-board");

    let room = store.room("org_456:my-board").unwrap();
    assert_eq!(room.metadata.title.as_deref(), Some("My Board"));
    assert_eq!(room.metadata.created_by.as_deref(), Some("user_123"));
    assert!(room.metadata.created_on.is_some());
    assert!(!room.metadata.archived);
    assert!(room.access.is_some());
}

#[tokio::test]
async fn create_accepts_underscores_and_hyphens() {
    let (service, _, _) = setup();

    let output = service
        .create_board(claims(), create_input("board_1-test", None))
        .await
        .unwrap();

    assert_eq!(output.redirect, "/my-org/boards/board_1-test");
}

#[tokio::test]
async fn create_rejects_malicious_slugs_before_any_backend_call() {
    let (service, store, _) = setup();

    let cases = [
        "//evil.com",
        "foo/bar",
        "../../etc/passwd",
        "%2F%2Fevil.com",
        "",
        "my board",
    ];
    for slug in cases {
        let err = service
            .create_board(claims(), create_input(slug, None))
            .await
            .unwrap_err();
        assert!(
            matches!(err, BoardError::Core(CyclesError::InvalidSlug { .. })),
            "accepted {slug:?}"
        );
    }
    assert!(store.ops().is_empty());
}

#[tokio::test]
async fn create_redirects_stay_on_a_local_path() {
    let (service, _, _) = setup();

    let output = service
        .create_board(claims(), create_input("safe-slug", None))
        .await
        .unwrap();

    assert!(output.redirect.starts_with('/'));
    assert!(!output.redirect.starts_with("//"));
}

#[tokio::test]
async fn create_defaults_the_title() {
    let (service, store, _) = setup();

    service
        .create_board(claims(), create_input("untitled", None))
        .await
        .unwrap();

    let room = store.room("org_456:untitled").unwrap();
    assert_eq!(room.metadata.title.as_deref(), Some("New board"));
}

#[tokio::test]
async fn create_is_idempotent() {
    let (service, store, _) = setup();

    let first = service
        .create_board(claims(), create_input("my-board", Some("My Board")))
        .await
        .unwrap();
    let second = service
        .create_board(claims(), create_input("my-board", Some("My Board")))
        .await
        .unwrap();

    assert!(first.created);
    assert!(!second.created);
    assert_eq!(first.redirect, second.redirect);

    let ops = store.ops();
    assert_eq!(count(&ops, |op| matches!(op, StoreOp::Create(_))), 1);
    assert_eq!(count(&ops, |op| matches!(op, StoreOp::SeedDocument(_))), 1);
}

#[tokio::test]
async fn create_seeds_the_fixed_document_shape() {
    let (service, store, _) = setup();

    service
        .create_board(claims(), create_input("my-board", None))
        .await
        .unwrap();

    let document = store.room("org_456:my-board").unwrap().document.unwrap();
    assert!(document.tasks.is_empty());

    assert_eq!(document.scopes.len(), 1);
    let scope = &document.scopes[0];
    assert!(scope.core);
    assert_eq!(scope.color, "color-2");
    assert_eq!(scope.title, "First scope");

    assert_eq!(document.pitches.len(), 1);
    let pitch = &document.pitches[0];
    assert_eq!(pitch.title, "First pitch");
    assert_eq!(scope.pitch_id, pitch.id);
    assert!(!pitch.id.is_empty());
    assert_ne!(scope.id, pitch.id);

    assert_eq!(document.info.name, "New board");
}

#[tokio::test]
async fn create_treats_lookup_failure_as_absent() {
    let (service, store, _) = setup();
    store.insert("org_456:my-board", stored_metadata("Existing"));
    store.fail_get(true);

    // The existence check fails, so creation proceeds as if the board
    // were new: the accepted idempotency risk.
    let output = service
        .create_board(claims(), create_input("my-board", Some("Recreated")))
        .await
        .unwrap();

    assert!(output.created);
    assert_eq!(count(&store.ops(), |op| matches!(op, StoreOp::Create(_))), 1);
}

#[tokio::test]
async fn create_surfaces_the_partial_creation_window() {
    let (service, store, _) = setup();
    store.fail_seed(true);

    let err = service
        .create_board(claims(), create_input("my-board", None))
        .await
        .unwrap_err();

    let BoardError::PartiallyCreated { board_id, .. } = err else {
        panic!("expected PartiallyCreated, got {err:?}");
    };
    assert_eq!(board_id.to_string(), "org_456:my-board");

    // The record stays; no rollback is attempted.
    let room = store.room("org_456:my-board").unwrap();
    assert!(room.document.is_none());
}

// -----------------------------------------------------------------------
// Rename / relocation
// -----------------------------------------------------------------------

#[tokio::test]
async fn update_rejects_unauthenticated_requests() {
    let (service, store, _) = setup();

    let err = service
        .update_board(
            anonymous(),
            update_input(Some("org_456:my-board"), "New", "my-board", "org_456"),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, BoardError::Core(CyclesError::NotAuthenticated)));
    assert!(store.ops().is_empty());
}

#[tokio::test]
async fn update_rejects_a_board_outside_the_requester_scope() {
    let (service, store, _) = setup();
    store.insert("other_org:my-board", stored_metadata("Old Title"));

    let err = service
        .update_board(
            claims(),
            update_input(Some("other_org:my-board"), "New Title", "my-board", "other_org"),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, BoardError::Core(CyclesError::Unauthorized { .. })));
    assert!(store.ops().is_empty());
}

#[tokio::test]
async fn update_rejects_a_missing_board_id() {
    let (service, store, _) = setup();

    let err = service
        .update_board(claims(), update_input(None, "New Title", "my-board", "org_456"))
        .await
        .unwrap_err();

    assert!(matches!(err, BoardError::Core(CyclesError::Unauthorized { .. })));
    assert!(store.ops().is_empty());
}

#[tokio::test]
async fn update_changes_the_title_with_one_metadata_write() {
    let (service, store, _) = setup();
    let mut metadata = stored_metadata("Old Title");
    metadata
        .extra
        .insert("theme".into(), serde_json::Value::String("dark".into()));
    store.insert("org_456:my-board", metadata);

    let output = service
        .update_board(
            claims(),
            update_input(Some("org_456:my-board"), "New Title", "my-board", "org_456"),
        )
        .await
        .unwrap();

    assert!(output.title_updated);
    assert!(!output.relocated);

    let ops = store.ops();
    assert_eq!(count(&ops, |op| matches!(op, StoreOp::UpdateMetadata(_))), 1);
    assert_eq!(count(&ops, |op| matches!(op, StoreOp::MigrateId(..))), 0);

    // Full-object replacement preserves stored fields and unmodeled keys.
    let room = store.room("org_456:my-board").unwrap();
    assert_eq!(room.metadata.title.as_deref(), Some("New Title"));
    assert_eq!(room.metadata.created_by.as_deref(), Some("user_123"));
    assert_eq!(room.metadata.created_on, Some(fixed_time()));
    assert_eq!(
        room.metadata.extra.get("theme"),
        Some(&serde_json::Value::String("dark".into()))
    );
}

#[tokio::test]
async fn update_skips_the_metadata_write_when_title_is_unchanged() {
    let (service, store, _) = setup();
    store.insert("org_456:my-board", stored_metadata("Old Title"));

    let output = service
        .update_board(
            claims(),
            update_input(Some("org_456:my-board"), "Old Title", "my-board", "org_456"),
        )
        .await
        .unwrap();

    assert!(!output.title_updated);
    assert_eq!(
        count(&store.ops(), |op| matches!(op, StoreOp::UpdateMetadata(_))),
        0
    );
}

#[tokio::test]
async fn update_migrates_when_the_slug_changes() {
    let (service, store, _) = setup();
    store.insert("org_456:my-board", stored_metadata("Old Title"));

    let output = service
        .update_board(
            claims(),
            update_input(Some("org_456:my-board"), "Old Title", "new-slug", "org_456"),
        )
        .await
        .unwrap();

    assert!(output.relocated);
    assert_eq!(output.board_id.to_string(), "org_456:new-slug");

    let ops = store.ops();
    assert_eq!(count(&ops, |op| matches!(op, StoreOp::MigrateId(..))), 1);
    assert!(ops.contains(&StoreOp::MigrateId(
        "org_456:my-board".into(),
        "org_456:new-slug".into()
    )));
    assert!(store.room("org_456:my-board").is_none());
    assert!(store.room("org_456:new-slug").is_some());
}

#[tokio::test]
async fn update_skips_migration_when_the_id_is_unchanged() {
    let (service, store, _) = setup();
    store.insert("org_456:my-board", stored_metadata("Old Title"));

    let output = service
        .update_board(
            claims(),
            update_input(Some("org_456:my-board"), "Old Title", "my-board", "org_456"),
        )
        .await
        .unwrap();

    assert!(!output.relocated);
    assert_eq!(count(&store.ops(), |op| matches!(op, StoreOp::MigrateId(..))), 0);
}

#[tokio::test]
async fn update_with_changed_title_and_unchanged_slug_end_to_end() {
    let (service, store, _) = setup();
    store.insert("org_456:my-board", stored_metadata("Old Title"));

    let output = service
        .update_board(
            claims(),
            update_input(Some("org_456:my-board"), "New Title", "my-board", "org_456"),
        )
        .await
        .unwrap();

    let ops = store.ops();
    assert_eq!(count(&ops, |op| matches!(op, StoreOp::UpdateMetadata(_))), 1);
    assert_eq!(count(&ops, |op| matches!(op, StoreOp::MigrateId(..))), 0);
    assert_eq!(output.redirect, "/my-org/boards");
}

#[tokio::test]
async fn update_uses_me_for_personal_scopes() {
    let (service, store, _) = setup();
    store.insert("user_123:my-board", stored_metadata("Old Title"));

    let output = service
        .update_board(
            personal_claims(),
            update_input(Some("user_123:my-board"), "Old Title", "my-board", "user_123"),
        )
        .await
        .unwrap();

    assert_eq!(output.redirect, "/me/boards");
}

#[tokio::test]
async fn update_rejects_an_invalid_new_slug() {
    let (service, store, _) = setup();
    store.insert("org_456:my-board", stored_metadata("Old Title"));

    let err = service
        .update_board(
            claims(),
            update_input(Some("org_456:my-board"), "Old Title", "bad slug", "org_456"),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, BoardError::Core(CyclesError::InvalidSlug { .. })));
    assert_eq!(count(&store.ops(), |op| matches!(op, StoreOp::MigrateId(..))), 0);
}

#[tokio::test]
async fn update_backfills_missing_creator_fields() {
    let (service, store, _) = setup();
    store.insert(
        "org_456:my-board",
        RoomMetadata {
            title: Some("Old Title".into()),
            ..RoomMetadata::default()
        },
    );

    service
        .update_board(
            claims(),
            update_input(Some("org_456:my-board"), "New Title", "my-board", "org_456"),
        )
        .await
        .unwrap();

    let room = store.room("org_456:my-board").unwrap();
    assert_eq!(room.metadata.created_by.as_deref(), Some("user_123"));
    assert!(room.metadata.created_on.is_some());
}

// -----------------------------------------------------------------------
// Listing
// -----------------------------------------------------------------------

#[tokio::test]
async fn list_rejects_unauthenticated_requests() {
    let (service, _, _) = setup();

    let err = service.list_boards(anonymous()).await.unwrap_err();
    assert!(matches!(err, BoardError::Core(CyclesError::NotAuthenticated)));
}

#[tokio::test]
async fn list_partitions_by_the_archived_flag() {
    let (service, store, _) = setup();
    store.insert("org_456:alpha", stored_metadata("Alpha"));
    store.insert("org_456:beta", stored_metadata("Beta"));
    store.insert(
        "org_456:old",
        RoomMetadata {
            archived: true,
            ..stored_metadata("Old")
        },
    );

    let listing = service.list_boards(claims()).await.unwrap();

    assert_eq!(listing.active.len(), 2);
    assert_eq!(listing.archived.len(), 1);
    assert_eq!(listing.archived[0].id.slug(), "old");
}

#[tokio::test]
async fn list_is_scoped_to_the_requester_prefix() {
    let (service, store, _) = setup();
    store.insert("org_456:mine", stored_metadata("Mine"));
    store.insert("other_org:theirs", stored_metadata("Theirs"));
    store.insert("org_4567:neighbor", stored_metadata("Neighbor"));

    let listing = service.list_boards(claims()).await.unwrap();

    assert_eq!(listing.active.len(), 1);
    assert_eq!(listing.active[0].id.to_string(), "org_456:mine");
}

#[tokio::test]
async fn list_resolves_each_distinct_creator_once() {
    let (service, store, directory) = setup();
    for (slug, creator) in [("a", "user_ada"), ("b", "user_ada"), ("c", "user_bob")] {
        store.insert(
            &format!("org_456:{slug}"),
            RoomMetadata {
                created_by: Some(creator.into()),
                ..stored_metadata(slug)
            },
        );
    }
    directory.insert(UserProfile {
        id: "user_ada".into(),
        full_name: Some("Ada Lovelace".into()),
        image_url: None,
    });
    directory.insert(UserProfile {
        id: "user_bob".into(),
        full_name: Some("Bob".into()),
        image_url: None,
    });

    let listing = service.list_boards(claims()).await.unwrap();

    // Three boards, two distinct creators, two lookups.
    assert_eq!(directory.lookups().len(), 2);
    assert_eq!(listing.creators.len(), 2);
    assert_eq!(
        listing.creators["user_ada"].as_ref().unwrap().full_name.as_deref(),
        Some("Ada Lovelace")
    );
}

#[tokio::test]
async fn list_tolerates_unresolvable_creators() {
    let (service, store, _) = setup();
    store.insert(
        "org_456:ghost",
        RoomMetadata {
            created_by: Some("user_ghost".into()),
            ..stored_metadata("Ghost")
        },
    );

    let listing = service.list_boards(claims()).await.unwrap();

    assert_eq!(listing.active.len(), 1);
    assert_eq!(listing.creators.len(), 1);
    assert!(listing.creators["user_ghost"].is_none());
}

#[tokio::test]
async fn list_skips_rooms_without_a_creator_reference() {
    let (service, store, _) = setup();
    store.insert(
        "org_456:orphan",
        RoomMetadata {
            title: Some("Orphan".into()),
            ..RoomMetadata::default()
        },
    );

    let listing = service.list_boards(claims()).await.unwrap();

    assert_eq!(listing.active.len(), 1);
    assert!(listing.creators.is_empty());
}

// -----------------------------------------------------------------------
// Lookup
// -----------------------------------------------------------------------

#[tokio::test]
async fn fetch_rejects_unauthenticated_requests() {
    let (service, _, _) = setup();

    let err = service.fetch_board(anonymous(), "my-board").await.unwrap_err();
    assert!(matches!(err, BoardError::Core(CyclesError::NotAuthenticated)));
}

#[tokio::test]
async fn fetch_resolves_the_board_title() {
    let (service, store, _) = setup();
    store.insert("org_456:sprint-planning", stored_metadata("Sprint Planning"));

    let page = service.fetch_board(claims(), "sprint-planning").await.unwrap();

    assert_eq!(page.board_id.to_string(), "org_456:sprint-planning");
    assert_eq!(page.title.as_deref(), Some("Sprint Planning"));
}

#[tokio::test]
async fn fetch_decodes_the_url_slug_once() {
    let (service, store, _) = setup();
    store.insert("org_456:sprint planning", stored_metadata("Spaced Out"));

    let page = service
        .fetch_board(claims(), "sprint%20planning")
        .await
        .unwrap();

    assert_eq!(page.title.as_deref(), Some("Spaced Out"));
}

#[tokio::test]
async fn fetch_surfaces_not_found() {
    let (service, _, _) = setup();

    let err = service.fetch_board(claims(), "missing-board").await.unwrap_err();
    assert!(matches!(err, BoardError::Core(CyclesError::NotFound { .. })));
}
