//! Session cookie contract.
//!
//! One cookie holds the opaque session credential. It is set at login and
//! removed on logout, on a failed gate verification, and when the backend
//! reports the credential as unauthorized.

use axum::http::{HeaderMap, HeaderValue, header};

pub const COOKIE_NAME: &str = "access_token";

/// Seven days.
pub const MAX_AGE_SECS: u64 = 7 * 24 * 60 * 60;

const CLEAR: &str = "access_token=; HttpOnly; Path=/; SameSite=Lax; Max-Age=0; Expires=Thu, 01 Jan 1970 00:00:00 GMT";
const CLEAR_SECURE: &str =
    "access_token=; HttpOnly; Path=/; SameSite=Lax; Secure; Max-Age=0; Expires=Thu, 01 Jan 1970 00:00:00 GMT";

/// Attributes of the session cookie; `secure` is on in production.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SessionCookie {
    secure: bool,
}

impl SessionCookie {
    pub fn new(secure: bool) -> Self {
        Self { secure }
    }

    pub fn is_secure(&self) -> bool {
        self.secure
    }

    /// `Set-Cookie` value storing `token`. `None` if the token contains bytes
    /// that cannot appear in a cookie value.
    pub fn issue(&self, token: &str) -> Option<HeaderValue> {
        if token.is_empty() || !token.bytes().all(is_cookie_octet) {
            return None;
        }
        let value = format!("{COOKIE_NAME}={token}; {}; Max-Age={MAX_AGE_SECS}", self.attributes());
        HeaderValue::from_str(&value).ok()
    }

    /// `Set-Cookie` value that removes the stored credential.
    pub fn clear(&self) -> HeaderValue {
        HeaderValue::from_static(if self.secure { CLEAR_SECURE } else { CLEAR })
    }

    fn attributes(&self) -> &'static str {
        if self.secure {
            "HttpOnly; Path=/; SameSite=Lax; Secure"
        } else {
            "HttpOnly; Path=/; SameSite=Lax"
        }
    }
}

/// RFC 6265 `cookie-octet`.
fn is_cookie_octet(b: u8) -> bool {
    matches!(b, 0x21 | 0x23..=0x2B | 0x2D..=0x3A | 0x3C..=0x5B | 0x5D..=0x7E)
}

/// Read the session credential from the request's `Cookie` header(s).
///
/// The first `access_token` pair wins. An empty value is returned as-is; the
/// gate treats it as no credential.
pub fn read_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == COOKIE_NAME)
        .map(|(_, value)| value.trim().trim_matches('"').to_string())
}
