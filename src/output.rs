//! Extraction and validation of model output.
//!
//! Models frequently wrap the JSON object they were asked for in prose or a
//! Markdown fence, even when `responseMimeType` requests plain JSON. The
//! brace-scanning extraction here is a best-effort compatibility shim for
//! those replies: it isolates the span from the first `{` to the last `}` and
//! keeps it only if it parses. It assumes a single top-level object; two
//! sibling objects (or stray braces in prose) make the span unparseable and
//! the raw text is returned unchanged.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::Error;

/// Isolates the JSON object embedded in `text`, if any.
///
/// Returns the substring spanning the first `{` through the last `}` when that
/// span is valid JSON. In every other case (no braces, `{` after the last `}`,
/// span fails to parse) the input is returned unchanged, never an error.
/// Idempotent on its own successful output.
pub fn extract_embedded_json(text: &str) -> &str {
    let (Some(start), Some(end)) = (text.find('{'), text.rfind('}')) else {
        return text;
    };
    if start > end {
        return text;
    }
    let candidate = &text[start..=end];
    if serde_json::from_str::<Value>(candidate).is_ok() {
        candidate
    } else {
        text
    }
}

/// Parses raw model output into the shape `T` expected by an endpoint.
///
/// Distinguishes two failure kinds: output that isn't JSON at all even after
/// extraction (`OutputParsing`), and JSON that doesn't match the declared
/// shape (`OutputValidation`).
pub fn parse_model_output<T: DeserializeOwned>(raw: &str) -> Result<T, Error> {
    let candidate = extract_embedded_json(raw);
    let value: Value = serde_json::from_str(candidate).map_err(|e| Error::OutputParsing {
        message: e.to_string(),
        raw_output: raw.to_string(),
    })?;
    serde_path_to_error::deserialize(value).map_err(|e| Error::OutputValidation {
        message: e.to_string(),
    })
}
