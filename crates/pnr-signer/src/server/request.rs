use serde_json::{Map, Value};

use crate::digest::SigningRequest;
use crate::error::SignerError;

/// Coerce a loosely typed JSON body into a [`SigningRequest`].
///
/// Browsers send numbers as strings often enough that `expiresInSec`,
/// `dayId` and `videoId` accept either form. An empty body reads as `{}`.
pub fn parse_signing_request(body: &[u8]) -> Result<SigningRequest, SignerError> {
    let value: Value = if body.iter().all(u8::is_ascii_whitespace) {
        Value::Object(Map::new())
    } else {
        serde_json::from_slice(body)
            .map_err(|e| SignerError::MalformedRequest(format!("invalid JSON: {e}")))?
    };
    let Value::Object(fields) = value else {
        return Err(SignerError::MalformedRequest("body must be a JSON object".to_string()));
    };

    Ok(SigningRequest {
        user: user_field(fields.get("user")),
        expires_in_sec: expires_in_field(fields.get("expiresInSec")),
        day_id: day_id_field(fields.get("dayId"))?,
        video_id: video_id_field(fields.get("videoId"))?,
    })
}

fn user_field(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(user)) => user.clone(),
        // anything else fails address validation downstream
        Some(other) => other.to_string(),
    }
}

/// Zero, missing and non-numeric values select the default lifetime.
fn expires_in_field(value: Option<&Value>) -> Option<u64> {
    let seconds = value.and_then(numeric)?;
    if !seconds.is_finite() || seconds == 0.0 {
        return None;
    }
    // saturating cast: negatives become 0 and are clamped up later
    Some(seconds as u64)
}

fn day_id_field(value: Option<&Value>) -> Result<Option<u64>, SignerError> {
    match value {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::String(s)) if s.trim().is_empty() => return Ok(None),
        Some(Value::Number(n)) if n.as_u64().is_some() => return Ok(n.as_u64()),
        _ => {}
    }

    let Some(day) = value.and_then(numeric).filter(|d| d.is_finite()) else {
        // unparseable overrides fall back to the server-computed day
        return Ok(None);
    };
    if day < 0.0 || day.fract() != 0.0 || day > f64::from(u32::MAX) {
        return Err(SignerError::InvalidDayId(format!(
            "day id must be a uint32, got {day}"
        )));
    }
    Ok(Some(day as u64))
}

fn video_id_field(value: Option<&Value>) -> Result<Option<String>, SignerError> {
    match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => Ok(None),
        Some(Value::String(id)) if id.is_empty() => Ok(None),
        Some(Value::String(id)) => Ok(Some(id.clone())),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(true)) => Ok(Some("true".to_string())),
        Some(_) => Err(SignerError::MalformedRequest(
            "videoId must be a string or number".to_string(),
        )),
    }
}

fn numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}
