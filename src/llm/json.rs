//! Strict parsing of model responses into a commit message.
//!
//! The model is asked for `{"message": "..."}`. Models sometimes wrap that in a
//! Markdown code fence, so a single enclosing fence is removed. Beyond that the
//! payload must be exactly the one-field object: no brace scanning, no
//! salvaging of partial output.

use serde::Deserialize;
use serde_json::Value;

/// The only response shape accepted from the model.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct MessageResponse {
    pub message: String,
}

/// Why a response was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseFailure {
    /// Not valid JSON, or not the `{"message": ...}` shape.
    Schema(String),
    /// Valid shape but the message is blank.
    EmptyMessage,
}

impl std::fmt::Display for ParseFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseFailure::Schema(e) => write!(f, "response does not match {{\"message\": ...}}: {e}"),
            ParseFailure::EmptyMessage => f.write_str("response message is empty"),
        }
    }
}

/// Remove one Markdown code fence enclosing the whole response, if present.
///
/// Handles both ` ```json ` and bare ` ``` ` openers. Text that is not fully
/// enclosed by a fence is returned trimmed but otherwise untouched.
pub fn strip_code_fence(response: &str) -> &str {
    let trimmed = response.trim();

    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(body) = rest.strip_suffix("```") else {
        return trimmed;
    };

    // Drop the info string (e.g. "json") on the opening line.
    match body.split_once('\n') {
        Some((info, inner)) if is_info_string(info) => inner.trim(),
        _ => body.trim(),
    }
}

fn is_info_string(line: &str) -> bool {
    line.trim()
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Parse a raw model response into the trimmed commit message.
pub fn parse_message(response: &str) -> Result<String, ParseFailure> {
    let payload = strip_code_fence(response);
    let value: Value =
        serde_json::from_str(payload).map_err(|e| ParseFailure::Schema(e.to_string()))?;

    // Derived structs also accept a sequence, so the object shape is checked first.
    let Value::Object(fields) = value else {
        return Err(ParseFailure::Schema("expected a JSON object".to_string()));
    };
    let parsed: MessageResponse = serde_json::from_value(Value::Object(fields))
        .map_err(|e| ParseFailure::Schema(e.to_string()))?;

    let message = parsed.message.trim();
    if message.is_empty() {
        return Err(ParseFailure::EmptyMessage);
    }
    Ok(message.to_string())
}
