//! Envelope handling for upstream responses.
//!
//! Both backends answer with either a bare JSON array or an object wrapping
//! the array under one of a few well-known keys, sometimes one level deeper
//! (`{"data": {"items": [...]}}`).

use crate::{Result, SyncError};
use serde_json::Value;

const ENVELOPE_KEYS: [&str; 6] = ["data", "leads", "requirements", "items", "results", "records"];

pub fn parse_payload(body: &str) -> Result<Vec<Value>> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }
    let value: Value = serde_json::from_str(trimmed)?;
    unwrap_envelope(value)
}

pub fn unwrap_envelope(value: Value) -> Result<Vec<Value>> {
    match value {
        Value::Array(items) => Ok(items),
        Value::Object(mut map) => {
            for key in ENVELOPE_KEYS {
                match map.remove(key) {
                    Some(Value::Array(items)) => return Ok(items),
                    Some(nested @ Value::Object(_)) => {
                        if let Ok(items) = unwrap_envelope(nested) {
                            return Ok(items);
                        }
                    }
                    _ => {}
                }
            }
            Err(SyncError::Parse(
                "expected a JSON array or an object wrapping one".to_string(),
            ))
        }
        Value::Null => Ok(Vec::new()),
        _ => Err(SyncError::Parse(
            "expected a JSON array or an object wrapping one".to_string(),
        )),
    }
}
