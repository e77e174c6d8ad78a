//! Tenant-relative navigation paths.
//!
//! These are the only strings ever handed to the navigation boundary,
//! and they are always built from validated components: the tenant slug
//! comes from the identity provider's claims and the board slug from a
//! composed [`BoardId`].

use crate::id::BoardId;
use crate::models::tenant::Requester;

/// Path to the requester's board listing.
pub fn boards_index(requester: &Requester) -> String {
    format!("/{}/boards", requester.tenant_slug())
}

/// Path to a single board.
pub fn board(requester: &Requester, id: &BoardId) -> String {
    format!("/{}/boards/{}", requester.tenant_slug(), id.slug())
}
