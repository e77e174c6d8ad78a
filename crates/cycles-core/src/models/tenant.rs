//! Tenant scope and request identity.
//!
//! Every request operates inside exactly one tenant scope — the
//! organization the requester has active, or their personal workspace
//! when no organization is set. The scope is the namespace root for all
//! board identifiers the requester may address.

use serde::{Deserialize, Serialize};

use crate::error::{CyclesError, CyclesResult};
use crate::id::BoardId;

/// The namespace a requester is operating in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TenantScope {
    /// Organization workspace, keyed by the organization identifier.
    Organization(String),
    /// Personal workspace, keyed by the user's own identifier.
    Personal(String),
}

impl TenantScope {
    /// The identifier that prefixes every board id in this scope.
    pub fn id(&self) -> &str {
        match self {
            Self::Organization(id) | Self::Personal(id) => id,
        }
    }

    /// The prefix shared by every board identifier in this scope.
    pub fn board_prefix(&self) -> String {
        format!("{}:", self.id())
    }

    /// Authorize a mutation of the board addressed by `target`.
    ///
    /// Succeeds only when the target identifier carries this scope as its
    /// scope component. Missing and malformed identifiers are rejected
    /// here, before any backend call is attempted.
    ///
    /// # Errors
    ///
    /// [`CyclesError::Unauthorized`] in every failure case; the guard does
    /// not distinguish them to the caller.
    pub fn authorize(&self, target: Option<&str>) -> CyclesResult<BoardId> {
        let denied = || CyclesError::Unauthorized {
            reason: "board does not belong to the current tenant".into(),
        };
        let raw = target.ok_or_else(denied)?;
        if !raw.starts_with(&self.board_prefix()) {
            return Err(denied());
        }
        BoardId::parse(raw).map_err(|_| denied())
    }
}

/// Identity claims supplied by the identity provider for one request.
///
/// An absent `user_id` means the request is unauthenticated.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RequestClaims {
    pub user_id: Option<String>,
    /// Active organization, if the user has one selected.
    pub org_id: Option<String>,
    /// Display slug of the active organization, used in navigation paths.
    pub org_slug: Option<String>,
}

impl RequestClaims {
    /// Reject unauthenticated requests and resolve the tenant scope.
    ///
    /// The organization takes precedence; without one, the requester
    /// operates in their personal scope.
    ///
    /// # Errors
    ///
    /// [`CyclesError::NotAuthenticated`] when no user identity is present.
    pub fn require_authenticated(self) -> CyclesResult<Requester> {
        let user_id = self.user_id.ok_or(CyclesError::NotAuthenticated)?;
        let scope = match self.org_id {
            Some(org_id) => TenantScope::Organization(org_id),
            None => TenantScope::Personal(user_id.clone()),
        };
        Ok(Requester {
            user_id,
            scope,
            org_slug: self.org_slug,
        })
    }
}

/// An authenticated requester with a resolved tenant scope.
#[derive(Debug, Clone)]
pub struct Requester {
    pub user_id: String,
    pub scope: TenantScope,
    pub org_slug: Option<String>,
}

impl Requester {
    /// The slug used in tenant-relative paths; `me` for personal scopes.
    pub fn tenant_slug(&self) -> &str {
        self.org_slug.as_deref().unwrap_or("me")
    }
}
