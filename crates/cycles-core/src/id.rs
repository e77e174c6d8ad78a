//! Composite board identifiers.
//!
//! A board lives in the external document store under `<scope>:<slug>`,
//! where `scope` is the requester's tenant scope and `slug` is the
//! user-chosen token that also appears in board URLs. The slug character
//! class admits nothing that could read as a path separator, a dot
//! sequence, or a protocol-relative prefix, so a composed identifier can
//! never be turned into a navigable target outside the application's own
//! path space.

use std::fmt;

use crate::error::{CyclesError, CyclesResult};
use crate::models::tenant::TenantScope;

/// Composite identifier of a board resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BoardId {
    scope: String,
    slug: String,
}

impl BoardId {
    /// Compose an identifier from a tenant scope and a raw, not yet
    /// decoded slug.
    ///
    /// Validation runs against the raw value; decoding happens exactly
    /// once, at the single lookup site (see [`BoardId::lookup`]), never
    /// before validation.
    ///
    /// # Errors
    ///
    /// [`CyclesError::InvalidSlug`] if the slug is empty or contains any
    /// character outside `[A-Za-z0-9_-]`.
    pub fn compose(scope: &TenantScope, raw_slug: &str) -> CyclesResult<Self> {
        Self::in_scope(scope.id(), raw_slug)
    }

    /// Compose from a raw scope component.
    ///
    /// Used by relocation, where the target scope is supplied by the
    /// caller rather than derived from the requester. The slug is
    /// validated exactly as in [`BoardId::compose`].
    ///
    /// # Errors
    ///
    /// [`CyclesError::InvalidSlug`] for an empty scope component or an
    /// invalid slug.
    pub fn in_scope(scope_id: &str, raw_slug: &str) -> CyclesResult<Self> {
        if scope_id.is_empty() {
            return Err(CyclesError::InvalidSlug {
                reason: "scope component is empty".into(),
            });
        }
        validate_slug(raw_slug)?;
        Ok(Self {
            scope: scope_id.to_owned(),
            slug: raw_slug.to_owned(),
        })
    }

    /// Build the identifier used to look a board up from a URL slug that
    /// has already been percent-decoded.
    ///
    /// Lookup slugs are not re-validated: an identifier that denotes
    /// nothing simply fails the read, and the decoded value is never used
    /// to build a navigation target.
    pub fn lookup(scope: &TenantScope, decoded_slug: &str) -> Self {
        Self {
            scope: scope.id().to_owned(),
            slug: decoded_slug.to_owned(),
        }
    }

    /// Split a stored identifier back into scope and slug.
    ///
    /// Stored identifiers (listing rows, form round-trips) are trusted to
    /// have been composed by this layer; only the structural split is
    /// checked here.
    ///
    /// # Errors
    ///
    /// [`CyclesError::NotFound`] if the value has no `:` separator or an
    /// empty component.
    pub fn parse(raw: &str) -> CyclesResult<Self> {
        let malformed = || CyclesError::NotFound {
            entity: "board".into(),
            id: raw.to_owned(),
        };
        let (scope, slug) = raw.split_once(':').ok_or_else(malformed)?;
        if scope.is_empty() || slug.is_empty() {
            return Err(malformed());
        }
        Ok(Self {
            scope: scope.to_owned(),
            slug: slug.to_owned(),
        })
    }

    /// The tenant scope component.
    pub fn scope_id(&self) -> &str {
        &self.scope
    }

    /// The slug component.
    pub fn slug(&self) -> &str {
        &self.slug
    }
}

impl fmt::Display for BoardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.scope, self.slug)
    }
}

/// Check a raw slug against the allowed character class.
///
/// # Errors
///
/// [`CyclesError::InvalidSlug`] for empty slugs and for any character
/// outside `[A-Za-z0-9_-]`.
pub fn validate_slug(raw: &str) -> CyclesResult<()> {
    if raw.is_empty() {
        return Err(CyclesError::InvalidSlug {
            reason: "slug is empty".into(),
        });
    }
    let allowed = |b: u8| b.is_ascii_alphanumeric() || b == b'_' || b == b'-';
    if !raw.bytes().all(allowed) {
        return Err(CyclesError::InvalidSlug {
            reason: "slug may contain only letters, digits, underscores, and hyphens".into(),
        });
    }
    Ok(())
}
