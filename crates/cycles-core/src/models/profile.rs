//! User profile model.

use serde::{Deserialize, Serialize};

/// Display profile resolved from the identity provider.
///
/// Used only to enrich listings; never consulted for authorization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub full_name: Option<String>,
    pub image_url: Option<String>,
}
