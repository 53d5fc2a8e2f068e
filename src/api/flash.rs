//! One-shot flash messages
//!
//! A redirect sets a short-lived `flash` cookie holding base64 URL-safe JSON
//! `{kind, message}`. The next rendered page shows it and clears the cookie.

use actix_web::HttpRequest;
use actix_web::cookie::{Cookie, SameSite, time::Duration};
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const FLASH_COOKIE: &str = "flash";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashKind {
    Success,
    Error,
}

impl FlashKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlashKind::Success => "success",
            FlashKind::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub kind: FlashKind,
    pub message: String,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Error,
            message: message.into(),
        }
    }

    pub fn encode(&self) -> String {
        // Serializing two plain fields can't fail
        let json = serde_json::to_vec(self).unwrap_or_default();
        URL_SAFE_NO_PAD.encode(json)
    }

    pub fn decode(raw: &str) -> Option<Self> {
        let bytes = URL_SAFE_NO_PAD.decode(raw).ok()?;
        serde_json::from_slice(&bytes).ok()
    }

    pub fn to_cookie(&self) -> Cookie<'static> {
        Cookie::build(FLASH_COOKIE, self.encode())
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .max_age(Duration::minutes(5))
            .finish()
    }
}

/// Read the pending flash message, if any
pub fn take_flash(req: &HttpRequest) -> Option<Flash> {
    let cookie = req.cookie(FLASH_COOKIE)?;
    let flash = Flash::decode(cookie.value());
    if flash.is_none() {
        debug!("Discarding undecodable flash cookie");
    }
    flash
}

/// Cookie that deletes the flash cookie on the client
pub fn removal_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::build(FLASH_COOKIE, "").path("/").finish();
    cookie.make_removal();
    cookie
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_encode_decode() {
        let flash = Flash::error("This intake link is invalid or expired.");
        let encoded = flash.encode();
        assert!(!encoded.contains('='));
        assert_eq!(Flash::decode(&encoded), Some(flash));
        assert_eq!(Flash::decode("%%%"), None);
    }

    #[test]
    fn test_take_flash_from_request() {
        let flash = Flash::success("Client 'Acme' updated.");
        let req = TestRequest::default()
            .cookie(flash.to_cookie())
            .to_http_request();
        assert_eq!(take_flash(&req), Some(flash));

        let req = TestRequest::default().to_http_request();
        assert_eq!(take_flash(&req), None);
    }
}
