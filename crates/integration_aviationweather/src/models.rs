//! Response normalization
//!
//! The data API has returned bare arrays, `{"data": [...]}`, `{"results": [...]}`
//! and product-keyed wrappers such as `{"metar": [...]}` across revisions.
//! All of them are reduced to a list of JSON objects here.

use domain::{ReportKind, ReportRecord};
use serde_json::Value;

use crate::client::AviationWeatherError;

/// Longest slice of an error body kept for diagnostics
pub const MAX_ERROR_BODY_CHARS: usize = 200;

/// Generic wrapper keys, checked before the product-specific one
const WRAPPER_KEYS: [&str; 2] = ["data", "results"];

/// Parse a response body into report records
///
/// The declared content type is ignored. A blank body counts as an empty result.
///
/// # Errors
///
/// Returns [`AviationWeatherError::ParseError`] if the body is not JSON.
pub fn parse_records(body: &[u8], kind: ReportKind) -> Result<Vec<ReportRecord>, AviationWeatherError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }

    let payload: Value = serde_json::from_slice(body)
        .map_err(|e| AviationWeatherError::ParseError(format!("{} response: {e}", kind.endpoint())))?;

    Ok(normalize_payload(payload, kind))
}

/// Extract the record list from any of the known response shapes
///
/// Unknown shapes degrade to an empty list; non-object entries are dropped.
#[must_use]
pub fn normalize_payload(payload: Value, kind: ReportKind) -> Vec<ReportRecord> {
    let items = match payload {
        Value::Array(items) => items,
        Value::Object(mut wrapper) => {
            let key = WRAPPER_KEYS
                .into_iter()
                .chain(std::iter::once(kind.endpoint()))
                .find(|key| wrapper.get(*key).is_some_and(Value::is_array));

            match key.and_then(|key| wrapper.remove(key)) {
                Some(Value::Array(items)) => items,
                _ => Vec::new(),
            }
        },
        _ => Vec::new(),
    };

    items
        .into_iter()
        .filter_map(|item| match item {
            Value::Object(record) => Some(record),
            _ => None,
        })
        .collect()
}

/// Shorten an error body to [`MAX_ERROR_BODY_CHARS`] characters
#[must_use]
pub fn truncate_body(body: &str) -> String {
    let body = body.trim();
    match body.char_indices().nth(MAX_ERROR_BODY_CHARS) {
        Some((cut, _)) => format!("{}…", &body[..cut]),
        None => body.to_string(),
    }
}
