use serde::{Deserialize, Serialize};

/// Claims carried by a provider-issued session token.
///
/// `sub` is the identity provider's user id, not a local row id.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
}

#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);
