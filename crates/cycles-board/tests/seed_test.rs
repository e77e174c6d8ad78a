//! Tests for the seed document builder.

use cycles_board::seed;

#[test]
fn initial_document_has_the_fixed_shape() {
    let document = seed::initial_document();

    assert!(document.tasks.is_empty());

    assert_eq!(document.scopes.len(), 1);
    let scope = &document.scopes[0];
    assert_eq!(scope.title, "First scope");
    assert_eq!(scope.color, "color-2");
    assert!(scope.core);

    assert_eq!(document.pitches.len(), 1);
    let pitch = &document.pitches[0];
    assert_eq!(pitch.title, "First pitch");

    assert_eq!(document.info.name, "New board");
}

#[test]
fn scope_and_pitch_are_cross_linked() {
    let document = seed::initial_document();

    let scope = &document.scopes[0];
    let pitch = &document.pitches[0];
    assert_eq!(scope.pitch_id, pitch.id);
    assert_ne!(scope.id, pitch.id);
    assert!(!scope.id.is_empty());
}

#[test]
fn generated_identifiers_are_fresh_per_document() {
    let first = seed::initial_document();
    let second = seed::initial_document();

    assert_ne!(first.scopes[0].id, second.scopes[0].id);
    assert_ne!(first.pitches[0].id, second.pitches[0].id);
}
