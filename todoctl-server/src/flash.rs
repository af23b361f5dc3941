//! Flash notifications carried across a redirect
//!
//! Notices are queued in a signed cookie as a JSON array and consumed by
//! the next page render. A cookie that fails signature checks or does not
//! parse is treated as an empty queue.

use axum_extra::extract::cookie::{Cookie, Key, SameSite, SignedCookieJar};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha512};

pub const FLASH_COOKIE: &str = "todoctl_flash";
/// Older notices are dropped once the queue holds this many.
pub const MAX_QUEUED_NOTICES: usize = 10;

/// Notice severity, also used as the CSS class on the page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Success,
    Error,
    Warning,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Warning => "warning",
        }
    }
}

/// A user-facing message shown once after a redirect
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub level: Level,
    pub message: String,
}

impl Notice {
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(Level::Success, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Level::Error, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Level::Warning, message)
    }
}

/// Derive the cookie signing key from the configured secret.
///
/// The signer needs 64 bytes of key material, so any secret length is
/// stretched through SHA-512.
pub fn signing_key(secret: &str) -> Key {
    let digest = Sha512::digest(secret.as_bytes());
    Key::from(digest.as_slice())
}

/// Append a notice to the queue, dropping the oldest past the cap.
pub fn push(jar: SignedCookieJar, notice: Notice) -> SignedCookieJar {
    let mut queue = read(&jar);
    queue.push(notice);
    if queue.len() > MAX_QUEUED_NOTICES {
        queue.drain(..queue.len() - MAX_QUEUED_NOTICES);
    }

    match serde_json::to_string(&queue) {
        Ok(value) => jar.add(flash_cookie(value)),
        Err(e) => {
            tracing::error!(error = %e, "cannot encode flash queue");
            jar
        }
    }
}

/// Take every queued notice, clearing the cookie.
///
/// The cookie is cleared even when its signature did not verify, so a
/// forged value does not stick around in the browser.
pub fn take(jar: SignedCookieJar) -> (SignedCookieJar, Vec<Notice>) {
    let queue = read(&jar);
    (jar.remove(flash_cookie(String::new())), queue)
}

fn read(jar: &SignedCookieJar) -> Vec<Notice> {
    jar.get(FLASH_COOKIE)
        .and_then(|cookie| serde_json::from_str(cookie.value()).ok())
        .unwrap_or_default()
}

fn flash_cookie(value: String) -> Cookie<'static> {
    Cookie::build((FLASH_COOKIE, value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}
