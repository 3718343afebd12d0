//! The access token issued by the backend and the claims baked into it.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, errors::ErrorKind};
use serde::{Deserialize, Serialize};

use crate::Error;

/// The bearer token issued by the backend's log-in endpoint.
///
/// Sent back to the backend on every authenticated request and decoded
/// locally for the claims the UI needs (name, subscription flag).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Wrap a raw token string.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The raw token, for the `Authorization: Bearer` header.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Decode the claims carried by this token.
    ///
    /// # Errors
    /// Returns [Error::SessionExpired] when the token's `exp` claim has
    /// passed, and [Error::InvalidToken] when the payload cannot be
    /// decoded at all.
    pub fn claims(&self) -> Result<Claims, Error> {
        decode_claims(&self.0)
    }
}

/// The contents of the backend's JSON Web Token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// The user ID the token was issued for.
    pub sub: String,

    /// The user's display name.
    #[serde(default)]
    pub name: String,

    /// The user's email address.
    #[serde(default)]
    pub email: String,

    /// Whether the user has an active subscription.
    ///
    /// Decoded client-side without a server round-trip; the backend
    /// re-checks it on every gated endpoint, so a forged claim only
    /// changes what the UI offers, not what the backend allows.
    #[serde(default)]
    pub subscription: bool,

    /// The expiry time of the token as a unix timestamp.
    pub exp: u64,
}

/// Decode a token's claims without verifying its signature.
///
/// The signing key lives on the backend. Expiry is still validated so a
/// stale cookie sends the user back to the log-in page instead of
/// producing a 401 on the first data fetch.
fn decode_claims(token: &str) -> Result<Claims, Error> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.insecure_disable_signature_validation();
    validation.validate_aud = false;

    jsonwebtoken::decode::<Claims>(token, &DecodingKey::from_secret(&[]), &validation)
        .map(|data| data.claims)
        .map_err(|error| match error.kind() {
            ErrorKind::ExpiredSignature => Error::SessionExpired,
            _ => {
                tracing::debug!("could not decode access token: {error}");
                Error::InvalidToken
            }
        })
}

#[cfg(test)]
pub(crate) fn encode_test_token(claims: &Claims) -> AccessToken {
    use jsonwebtoken::{EncodingKey, Header};

    // Any key works since decoding does not check the signature.
    let token = jsonwebtoken::encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(b"test-secret"),
    )
    .expect("could not encode test token");

    AccessToken::new(token)
}

#[cfg(test)]
pub(crate) fn test_claims(subscription: bool) -> Claims {
    use time::OffsetDateTime;

    Claims {
        sub: "1".to_owned(),
        name: "Alice Example".to_owned(),
        email: "alice@example.com".to_owned(),
        subscription,
        exp: (OffsetDateTime::now_utc().unix_timestamp() + 3600) as u64,
    }
}

#[cfg(test)]
mod claims_tests {
    use time::OffsetDateTime;

    use crate::Error;

    use super::{Claims, encode_test_token, test_claims};

    #[test]
    fn decodes_subscription_claim() {
        let token = encode_test_token(&test_claims(true));

        let claims = token.claims().unwrap();

        assert!(claims.subscription);
        assert_eq!(claims.name, "Alice Example");
        assert_eq!(claims.email, "alice@example.com");
    }

    #[test]
    fn subscription_claim_defaults_to_false() {
        let token = encode_test_token(&Claims {
            subscription: false,
            ..test_claims(true)
        });

        assert!(!token.claims().unwrap().subscription);
    }

    #[test]
    fn expired_token_maps_to_session_expired() {
        // Past the 60 second leeway jsonwebtoken applies by default.
        let token = encode_test_token(&Claims {
            exp: (OffsetDateTime::now_utc().unix_timestamp() - 120) as u64,
            ..test_claims(false)
        });

        assert_eq!(token.claims(), Err(Error::SessionExpired));
    }

    #[test]
    fn garbage_token_maps_to_invalid_token() {
        let token = super::AccessToken::new("not-a-jwt");

        assert_eq!(token.claims(), Err(Error::InvalidToken));
    }
}
