//! Flash Messages
//!
//! One-shot messages carried across a redirect in the `flash` cookie. The
//! payload is the JSON of a [`Flash`], base64url encoded so it stays a valid
//! cookie value.

use axum::response::Redirect;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};

use crate::application::dto::Flash;
use crate::shared::error::AppError;

pub const FLASH_COOKIE: &str = "flash";

/// Store a flash message for the next page view.
pub fn set_flash(jar: CookieJar, flash: &Flash) -> CookieJar {
    let value = match serde_json::to_vec(flash) {
        Ok(json) => URL_SAFE_NO_PAD.encode(json),
        Err(e) => {
            tracing::error!("failed to encode flash message: {}", e);
            return jar;
        }
    };

    jar.add(
        Cookie::build((FLASH_COOKIE, value))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax),
    )
}

/// Read and clear the pending flash message.
pub fn take_flash(jar: CookieJar) -> (CookieJar, Option<Flash>) {
    let Some(cookie) = jar.get(FLASH_COOKIE) else {
        return (jar, None);
    };

    let flash = decode(cookie.value());
    if flash.is_none() {
        tracing::debug!("discarding malformed flash cookie");
    }

    (jar.remove(Cookie::build(FLASH_COOKIE).path("/")), flash)
}

fn decode(value: &str) -> Option<Flash> {
    let bytes = URL_SAFE_NO_PAD.decode(value).ok()?;
    serde_json::from_slice(&bytes).ok()
}

/// Redirect to `to` with the outcome of a form submission as the flash message.
pub fn redirect_with(jar: CookieJar, to: &str, outcome: Result<String, AppError>) -> (CookieJar, Redirect) {
    let flash = match outcome {
        Ok(message) => Flash::success(message),
        Err(error) => {
            tracing::warn!(status = error.status_code().as_u16(), "form rejected: {}", error);
            Flash::error(error.public_message())
        }
    };

    (set_flash(jar, &flash), Redirect::to(to))
}
