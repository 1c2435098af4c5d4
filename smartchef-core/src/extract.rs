//! Best-effort extraction of a JSON value from free-form model output.
//!
//! Models often wrap their JSON in prose or code fences. The extractor takes the
//! leftmost `{` or `[` that has a matching closing character somewhere after it
//! and parses everything up to the LAST such closing character. Only one
//! candidate is tried: text with several independent JSON fragments can
//! therefore fail to extract even though one of the fragments is valid.

use serde_json::Value;

/// Outcome of [`extract_json`].
#[derive(Debug, Clone, PartialEq)]
pub enum Extraction {
    Extracted(Value),
    NoMatch,
}

/// Locate and parse the single JSON object or array embedded in `text`.
pub fn extract_json(text: &str) -> Extraction {
    let Some(candidate) = candidate_span(text) else {
        return Extraction::NoMatch;
    };

    match serde_json::from_str::<Value>(candidate) {
        Ok(value) => Extraction::Extracted(value),
        Err(e) => {
            tracing::debug!(error = %e, "JSON candidate failed to parse");
            Extraction::NoMatch
        }
    }
}

fn candidate_span(text: &str) -> Option<&str> {
    let last_brace = text.rfind('}');
    let last_bracket = text.rfind(']');

    text.char_indices().find_map(|(start, c)| {
        let end = match c {
            '{' => last_brace?,
            '[' => last_bracket?,
            _ => return None,
        };
        (end > start).then(|| &text[start..=end])
    })
}
