//! Tamper-evident cookie values.
//!
//! A signed value is `base64url(value).base64url(mac)` where the MAC is
//! HMAC-SHA256 over the cookie name and the value, so a value signed for
//! one cookie does not verify under another name.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::session::errors::SessionError;
use crate::utils::{base64url_decode, base64url_encode};

type HmacSha256 = Hmac<Sha256>;

fn mac_for(secret: &[u8], name: &str, value: &[u8]) -> Result<HmacSha256, SessionError> {
    let mut mac = HmacSha256::new_from_slice(secret)
        .map_err(|e| SessionError::Crypto(format!("Invalid HMAC key: {e}")))?;
    mac.update(name.as_bytes());
    mac.update(b"|");
    mac.update(value);
    Ok(mac)
}

pub(super) fn sign(secret: &[u8], name: &str, value: &str) -> Result<String, SessionError> {
    let tag = mac_for(secret, name, value.as_bytes())?
        .finalize()
        .into_bytes();
    Ok(format!(
        "{}.{}",
        base64url_encode(value.as_bytes()),
        base64url_encode(&tag)
    ))
}

/// Returns the original value, or `None` for anything malformed or forged.
pub(super) fn verify(secret: &[u8], name: &str, signed: &str) -> Option<String> {
    let (encoded, tag) = signed.split_once('.')?;
    let value = base64url_decode(encoded).ok()?;
    let tag = base64url_decode(tag).ok()?;

    // verify_slice compares in constant time
    mac_for(secret, name, &value).ok()?.verify_slice(&tag).ok()?;

    String::from_utf8(value).ok()
}
