//! One-shot messages carried across a single redirect in a signed cookie.

use http::HeaderMap;
use std::fmt;
use user_auth::{SessionError, SessionManager};

pub(crate) const FLASH_COOKIE: &str = "flash";
const FLASH_MAX_AGE: i64 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashKind {
    Success,
    Info,
    Danger,
}

impl FlashKind {
    fn as_str(&self) -> &'static str {
        match self {
            FlashKind::Success => "success",
            FlashKind::Info => "info",
            FlashKind::Danger => "danger",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "success" => Some(FlashKind::Success),
            "info" => Some(FlashKind::Info),
            "danger" => Some(FlashKind::Danger),
            _ => None,
        }
    }
}

impl fmt::Display for FlashKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
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

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Info,
            message: message.into(),
        }
    }

    pub fn danger(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Danger,
            message: message.into(),
        }
    }

    fn encode(&self) -> String {
        format!("{}:{}", self.kind, self.message)
    }

    fn decode(value: &str) -> Option<Self> {
        let (kind, message) = value.split_once(':')?;
        Some(Self {
            kind: FlashKind::parse(kind)?,
            message: message.to_string(),
        })
    }
}

/// Queue `flash` for the next rendered page.
pub(crate) fn set_flash(
    sessions: &SessionManager,
    response: &mut HeaderMap,
    flash: &Flash,
) -> Result<(), SessionError> {
    sessions.set_signed_cookie(response, FLASH_COOKIE, &flash.encode(), FLASH_MAX_AGE)
}

/// Read the pending flash, expiring it in `response`.
pub(crate) fn take_flash(
    sessions: &SessionManager,
    request: &HeaderMap,
    response: &mut HeaderMap,
) -> Result<Option<Flash>, SessionError> {
    let Some(value) = sessions.read_signed_cookie(request, FLASH_COOKIE) else {
        return Ok(None);
    };
    sessions.clear_cookie(response, FLASH_COOKIE)?;
    Ok(Flash::decode(&value))
}
