use serde_json::Value;

use crate::error::ParseError;

/// Parses an API response body and returns its `data` field.
///
/// An envelope without `data` yields `Value::Null`; only invalid JSON is an
/// error here.
pub fn normalize_response(body: &str) -> Result<Value, ParseError> {
    let mut envelope: Value =
        serde_json::from_str(body).map_err(|e| ParseError::InvalidJson(e.to_string()))?;
    Ok(envelope
        .get_mut("data")
        .map(Value::take)
        .unwrap_or(Value::Null))
}
