//! Cycles Core — domain models, board identifiers, tenant authorization,
//! and the store traits shared across all crates.

pub mod error;
pub mod id;
pub mod models;
pub mod path;
pub mod store;

pub use error::{CyclesError, CyclesResult};
pub use id::BoardId;
pub use models::tenant::{RequestClaims, Requester, TenantScope};
