use base64::Engine as _;
use base64::engine::general_purpose::{STANDARD, URL_SAFE};

use crate::domain::Identifier;

/// Reads the `userId` claim from a JWT payload without verifying the
/// signature. Returns `None` when the token is malformed or has no such claim.
pub(crate) fn decode_user_id(token: &str) -> Option<Identifier> {
    let payload = token.split('.').nth(1)?;
    let bytes = decode_segment(payload)?;
    let claims: serde_json::Value = serde_json::from_slice(&bytes).ok()?;
    let claim = claims.get("userId")?;
    if let Some(number) = claim.as_i64() {
        return Some(Identifier::Number(number));
    }
    claim
        .as_str()
        .filter(|text| !text.is_empty())
        .map(|text| Identifier::Text(text.to_owned()))
}

fn decode_segment(segment: &str) -> Option<Vec<u8>> {
    let mut padded = segment.trim_end_matches('=').to_owned();
    let remainder = padded.len() % 4;
    if remainder != 0 {
        padded.extend(std::iter::repeat_n('=', 4_usize.saturating_sub(remainder)));
    }
    URL_SAFE
        .decode(&padded)
        .or_else(|_| STANDARD.decode(&padded))
        .ok()
}
