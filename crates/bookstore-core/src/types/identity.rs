//! The authenticated identity attached to a request.

use serde::{Deserialize, Serialize};

/// Identity derived from a validated access token.
///
/// Transient: reconstructed per request from token claims, attached to the
/// request extensions by the authentication middleware, and discarded when
/// the request ends. Never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Identity {
    /// The user's ID.
    pub user_id: i64,
    /// The user's login name.
    pub username: String,
    /// Role names held by the user at token issuance time.
    pub roles: Vec<String>,
}
