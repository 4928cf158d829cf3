//! Coercion of raw model output into typed stage values.
//!
//! Models are told to emit bare JSON but routinely wrap it in markdown code
//! fences anyway. Coercion removes every ```` ```json ```` and ```` ``` ````
//! marker anywhere in the text, trims, and then parses the remainder
//! strictly. There is no best-effort fallback: output that does not parse as
//! the expected type fails the stage.

use serde::de::DeserializeOwned;
use thiserror::Error;

/// Max characters of model output quoted in a parse error.
const SNIPPET_LEN: usize = 160;

/// Failure to turn model output into a usable stage result. `Json` is
/// malformed output; `Contract` is well-formed output that violates what the
/// stage promised (wrong cardinality, required key empty).
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("{expected} response is not valid JSON ({source}); output began: {snippet}")]
    Json {
        expected: &'static str,
        snippet: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{stage} output violated its contract: {reason}")]
    Contract { stage: &'static str, reason: String },
}

/// Removes all code-fence markers, wherever they appear, and trims.
///
/// Removal is global on purpose: markers are dropped even when they occur
/// inside JSON string values, matching how downstream consumers have always
/// cleaned this output.
pub fn strip_code_fences(raw: &str) -> String {
    raw.replace("```json", "")
        .replace("```", "")
        .trim()
        .to_string()
}

/// Strips fences and parses the remainder as `T`. `expected` names the
/// target type in error messages.
pub fn coerce<T: DeserializeOwned>(raw: &str, expected: &'static str) -> Result<T, ParseError> {
    let cleaned = strip_code_fences(raw);
    serde_json::from_str(&cleaned).map_err(|source| ParseError::Json {
        expected,
        snippet: cleaned.chars().take(SNIPPET_LEN).collect(),
        source,
    })
}
