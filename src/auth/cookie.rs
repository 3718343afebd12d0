//! Defines functions for storing the backend's access token in a cookie.

use axum_extra::extract::{
    PrivateCookieJar,
    cookie::{Cookie, SameSite},
};
use time::{Duration, OffsetDateTime};

use crate::{Error, auth::AccessToken};

/// The name of the cookie holding the backend access token.
pub(crate) const COOKIE_TOKEN: &str = "zentavo_token";

/// The default duration for which auth cookies are valid.
///
/// The token's own `exp` claim is the real session limit; this only
/// controls how long the browser keeps the cookie around.
pub(crate) const DEFAULT_COOKIE_DURATION: Duration = Duration::days(7);

/// Add an auth cookie to the cookie jar, indicating that a user is logged
/// in and authenticated.
///
/// Returns the cookie jar with the cookie added.
pub(crate) fn set_auth_cookie(
    jar: PrivateCookieJar,
    token: &AccessToken,
    duration: Duration,
) -> PrivateCookieJar {
    jar.add(
        Cookie::build((COOKIE_TOKEN, token.as_str().to_owned()))
            .expires(OffsetDateTime::now_utc() + duration)
            .path("/")
            .http_only(true)
            .same_site(SameSite::Strict)
            .secure(true),
    )
}

/// Set the auth cookie to an invalid value and set its max age to zero,
/// which should delete the cookie on the client side.
pub(crate) fn invalidate_auth_cookie(jar: PrivateCookieJar) -> PrivateCookieJar {
    jar.add(
        Cookie::build((COOKIE_TOKEN, "deleted"))
            .expires(OffsetDateTime::UNIX_EPOCH)
            .max_age(Duration::ZERO)
            .path("/")
            .http_only(true)
            .same_site(SameSite::Strict)
            .secure(true),
    )
}

/// Get the access token stored in the cookie jar.
///
/// # Errors
/// Returns [Error::SessionExpired] if the cookie is missing, since a
/// missing cookie and an expired session are handled the same way.
pub(crate) fn get_token_from_cookies(jar: &PrivateCookieJar) -> Result<AccessToken, Error> {
    jar.get(COOKIE_TOKEN)
        .map(|cookie| AccessToken::new(cookie.value_trimmed()))
        .ok_or(Error::SessionExpired)
}

#[cfg(test)]
mod cookie_tests {
    use axum_extra::extract::{PrivateCookieJar, cookie::Key};
    use sha2::{Digest, Sha512};
    use time::{Duration, OffsetDateTime};

    use crate::{Error, auth::AccessToken};

    use super::{
        COOKIE_TOKEN, DEFAULT_COOKIE_DURATION, get_token_from_cookies, invalidate_auth_cookie,
        set_auth_cookie,
    };

    fn get_jar() -> PrivateCookieJar {
        let hash = Sha512::digest(b"foobar");
        let key = Key::from(&hash);

        PrivateCookieJar::new(key)
    }

    #[test]
    fn can_set_and_read_token_cookie() {
        let token = AccessToken::new("abc123");

        let jar = set_auth_cookie(get_jar(), &token, DEFAULT_COOKIE_DURATION);

        assert_eq!(get_token_from_cookies(&jar), Ok(token));
    }

    #[test]
    fn cookie_is_scoped_and_locked_down() {
        let jar = set_auth_cookie(get_jar(), &AccessToken::new("abc123"), Duration::minutes(5));
        let cookie = jar.get(COOKIE_TOKEN).unwrap();

        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(true));
        assert!(
            cookie.expires_datetime().unwrap() > OffsetDateTime::now_utc(),
            "cookie should expire in the future"
        );
    }

    #[test]
    fn missing_cookie_reads_as_expired_session() {
        assert_eq!(
            get_token_from_cookies(&get_jar()),
            Err(Error::SessionExpired)
        );
    }

    #[test]
    fn invalidate_auth_cookie_succeeds() {
        let jar = set_auth_cookie(get_jar(), &AccessToken::new("abc123"), Duration::minutes(5));

        let jar = invalidate_auth_cookie(jar);
        let cookie = jar.get(COOKIE_TOKEN).unwrap();

        assert_eq!(cookie.value(), "deleted");
        assert_eq!(cookie.expires_datetime(), Some(OffsetDateTime::UNIX_EPOCH));
        assert_eq!(cookie.max_age(), Some(Duration::ZERO));
    }
}
