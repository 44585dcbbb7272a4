/// One-shot flash messages
///
/// Messages survive exactly one redirect: they are written to the `_flash`
/// cookie as base64url-encoded JSON and cleared by the page that shows them.
use actix_web::cookie::{time::Duration as CookieDuration, Cookie, SameSite};
use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse, HttpResponseBuilder};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

pub const FLASH_COOKIE_NAME: &str = "_flash";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashKind {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashMessage {
    pub kind: FlashKind,
    pub message: String,
}

impl FlashMessage {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Info,
            message: message.into(),
        }
    }

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
}

fn encode(messages: &[FlashMessage]) -> Option<String> {
    serde_json::to_vec(messages)
        .ok()
        .map(|json| URL_SAFE_NO_PAD.encode(json))
}

fn decode(value: &str) -> Vec<FlashMessage> {
    URL_SAFE_NO_PAD
        .decode(value)
        .ok()
        .and_then(|bytes| serde_json::from_slice(&bytes).ok())
        .unwrap_or_default()
}

/// Messages waiting on this request (does not clear them)
pub fn peek(req: &HttpRequest) -> Vec<FlashMessage> {
    req.cookie(FLASH_COOKIE_NAME)
        .map(|cookie| decode(cookie.value()))
        .unwrap_or_default()
}

/// Cookie that deletes the flash cookie in the browser
pub fn removal_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::new(FLASH_COOKIE_NAME, "");
    cookie.set_path("/");
    cookie.make_removal();
    cookie
}

fn flash_cookie(messages: &[FlashMessage]) -> Option<Cookie<'static>> {
    let value = encode(messages)?;
    let mut cookie = Cookie::new(FLASH_COOKIE_NAME, value);
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Lax);
    cookie.set_max_age(CookieDuration::minutes(5));
    Some(cookie)
}

/// 303 See Other to `location`
pub fn redirect(location: &str) -> HttpResponse {
    see_other(location).finish()
}

/// 303 See Other to `location`, queueing `message` for the next page.
/// Messages already pending on `req` are kept.
pub fn redirect_with_flash(req: &HttpRequest, location: &str, message: FlashMessage) -> HttpResponse {
    let mut messages = peek(req);
    messages.push(message);
    redirect_with_messages(location, &messages)
}

/// 303 See Other to `location` with exactly `messages` queued
pub fn redirect_with_messages(location: &str, messages: &[FlashMessage]) -> HttpResponse {
    let mut builder = see_other(location);
    if let Some(cookie) = flash_cookie(messages) {
        builder.cookie(cookie);
    }
    builder.finish()
}

fn see_other(location: &str) -> HttpResponseBuilder {
    let mut builder = HttpResponse::SeeOther();
    builder.insert_header((header::LOCATION, location.to_string()));
    builder
}
