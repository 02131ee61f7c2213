//! # Session store accessor
//!
//! The bearer token issued by the backend lives in one HTTP-only cookie,
//! [`SESSION_COOKIE`]. Action wrappers only see it through [`TokenStore`]:
//!
//! - [`CookieSession`] (server only) reads and writes the request's cookie jar
//!   provided by `tower_cookies`, so the token never reaches browser script.
//! - [`MemoryTokenStore`] keeps the token in memory for tests and tools.
//!
//! An empty cookie value is treated the same as a missing cookie.

use std::sync::{Arc, Mutex};

/// Name of the cookie holding the backend access token.
pub const SESSION_COOKIE: &str = "access_token";

/// Default lifetime of the session cookie.
pub const DEFAULT_MAX_AGE_SECS: u64 = 60 * 60;

/// Read/write access to the current session token.
pub trait TokenStore {
    /// The current token, if any.
    fn get(&self) -> Option<String>;
    /// Store a token for `max_age_secs` seconds.
    fn set(&self, token: &str, max_age_secs: u64);
    /// Forget the token.
    fn clear(&self);
}

/// A token held in memory together with the max-age it was stored with.
#[derive(Clone, Debug, Default)]
pub struct MemoryTokenStore {
    inner: Arc<Mutex<Option<(String, u64)>>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a token already present.
    pub fn with_token(token: &str) -> Self {
        let store = Self::new();
        store.set(token, DEFAULT_MAX_AGE_SECS);
        store
    }

    /// Max-age of the stored token.
    pub fn max_age(&self) -> Option<u64> {
        self.slot().as_ref().map(|(_, age)| *age)
    }

    fn slot(&self) -> std::sync::MutexGuard<'_, Option<(String, u64)>> {
        self.inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self) -> Option<String> {
        self.slot()
            .as_ref()
            .map(|(token, _)| token.clone())
            .filter(|token| !token.is_empty())
    }

    fn set(&self, token: &str, max_age_secs: u64) {
        *self.slot() = Some((token.to_string(), max_age_secs));
    }

    fn clear(&self) {
        *self.slot() = None;
    }
}

#[cfg(feature = "server")]
mod cookie_session {
    use tower_cookies::cookie::time::Duration;
    use tower_cookies::cookie::SameSite;
    use tower_cookies::{Cookie, Cookies};

    use super::{TokenStore, SESSION_COOKIE};

    /// Session token stored in the `access_token` cookie of the current request.
    #[derive(Clone)]
    pub struct CookieSession {
        cookies: Cookies,
    }

    impl CookieSession {
        pub fn new(cookies: Cookies) -> Self {
            Self { cookies }
        }
    }

    /// Build the session cookie: `HttpOnly; Secure; SameSite=None; Path=/`.
    pub fn session_cookie(token: &str, max_age_secs: u64) -> Cookie<'static> {
        Cookie::build((SESSION_COOKIE, token.to_string()))
            .http_only(true)
            .secure(true)
            .same_site(SameSite::None)
            .path("/")
            .max_age(Duration::seconds(
                i64::try_from(max_age_secs).unwrap_or(i64::MAX),
            ))
            .build()
    }

    impl TokenStore for CookieSession {
        fn get(&self) -> Option<String> {
            self.cookies
                .get(SESSION_COOKIE)
                .map(|cookie| cookie.value().to_string())
                .filter(|token| !token.is_empty())
        }

        fn set(&self, token: &str, max_age_secs: u64) {
            self.cookies.add(session_cookie(token, max_age_secs));
        }

        fn clear(&self) {
            self.cookies
                .remove(Cookie::build(SESSION_COOKIE).path("/").build());
        }
    }

}

#[cfg(feature = "server")]
pub use cookie_session::{session_cookie, CookieSession};
