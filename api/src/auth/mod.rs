pub mod claims;
pub mod extractors;
pub mod guards;
pub mod middleware;

pub use claims::{AuthUser, Claims};

use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use util::config;

/// Mints a session token in the identity provider's signing scheme.
///
/// In production, tokens are issued by the provider itself; this exists for
/// the seeder, local development, and integration tests, which have no
/// provider to talk to.
pub fn generate_session_token(provider_id: &str) -> (String, String) {
    let secret = config::identity_jwt_secret();
    let duration_minutes = config::session_duration_minutes() as i64;

    let expiry = Utc::now() + Duration::minutes(duration_minutes);
    let exp_timestamp = expiry.timestamp() as usize;

    let claims = Claims {
        sub: provider_id.to_owned(),
        exp: exp_timestamp,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .expect("Token encoding failed");

    (token, expiry.to_rfc3339())
}
