//! User and event identifier validation

use crate::error::{RewardError, Result};

/// Longest accepted user ID
pub const MAX_USER_ID_LEN: usize = 64;

/// Longest accepted event ID
pub const MAX_EVENT_ID_LEN: usize = 128;

/// Trim and validate a user ID
///
/// Accepts ASCII alphanumerics, `-` and `_`, up to [`MAX_USER_ID_LEN`]
/// characters. Messaging platform IDs are integers and always pass.
pub fn normalize_user_id(raw: &str) -> Result<String> {
    let id = raw.trim();

    if id.is_empty() {
        return Err(RewardError::invalid_user("user_id required"));
    }
    if id.len() > MAX_USER_ID_LEN {
        return Err(RewardError::invalid_user(format!(
            "user_id longer than {} characters",
            MAX_USER_ID_LEN
        )));
    }
    if !id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(RewardError::invalid_user(
            "user_id may only contain letters, digits, '-' and '_'",
        ));
    }

    Ok(id.to_string())
}

/// Trim an optional event ID; blank means absent
pub fn normalize_event_id(raw: Option<&str>) -> Result<Option<String>> {
    let Some(id) = raw.map(str::trim).filter(|id| !id.is_empty()) else {
        return Ok(None);
    };

    if id.len() > MAX_EVENT_ID_LEN {
        return Err(RewardError::InvalidEvent(format!(
            "event_id longer than {} characters",
            MAX_EVENT_ID_LEN
        )));
    }
    if id.chars().any(char::is_control) {
        return Err(RewardError::InvalidEvent(
            "event_id contains control characters".to_string(),
        ));
    }

    Ok(Some(id.to_string()))
}
