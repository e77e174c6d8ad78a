//! Seed document builder.
//!
//! Builds the fixed value object every new board's document starts from,
//! so the seed shape can be tested independently of the creation
//! orchestration.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use cycles_core::models::document::{BoardInfo, PitchEntry, ScopeEntry, SeedDocument};

/// Title given to boards created without one.
pub const DEFAULT_BOARD_TITLE: &str = "New board";

/// Color token assigned to the generated core scope.
const CORE_SCOPE_COLOR: &str = "color-2";

/// Build the initial document: an empty task list, one core scope, one
/// pitch the scope points at, and the default board info.
///
/// Entry identifiers are freshly generated on every call; their only
/// meaning is the scope-to-pitch cross-reference within this seed.
pub fn initial_document() -> SeedDocument {
    let pitch_id = entry_id();
    let scope_id = entry_id();

    SeedDocument {
        tasks: Vec::new(),
        scopes: vec![ScopeEntry {
            id: scope_id,
            pitch_id: pitch_id.clone(),
            title: "First scope".into(),
            color: CORE_SCOPE_COLOR.into(),
            core: true,
        }],
        pitches: vec![PitchEntry {
            id: pitch_id,
            title: "First pitch".into(),
        }],
        info: BoardInfo {
            name: DEFAULT_BOARD_TITLE.into(),
        },
    }
}

/// Opaque, URL-safe entry identifier (128 bits of randomness).
fn entry_id() -> String {
    let mut rng = rand::rng();
    let bytes: [u8; 16] = rand::Rng::random(&mut rng);
    URL_SAFE_NO_PAD.encode(bytes)
}
