//! Response cleanup and parsing for AI backend output
//!
//! The generation service is a free-text model with no structured-output
//! guarantee. Responses are often wrapped in a Markdown code fence and may
//! carry prose around the JSON payload, so cleanup happens in two explicit
//! steps: strip a known fence wrapper if present, then locate and parse the
//! JSON array.

use tracing::debug;

use crate::error::{Error, Result};
use crate::insight::Insight;

/// Strip a surrounding Markdown code fence, if present.
///
/// Handles the observed wrapper convention: a leading ```` ``` ```` or
/// ```` ```json ```` line and a trailing ```` ``` ````. The wrapper is an
/// external convention, not a contract, so anything that is not wrapped in
/// both markers passes through unchanged.
pub fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();

    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(rest) = rest.strip_suffix("```") else {
        return trimmed;
    };

    // Drop the language tag on the opening fence line ("json", "JSON", ...)
    let rest = match rest.find('\n') {
        Some(idx) if rest[..idx].trim().chars().all(|c| c.is_ascii_alphanumeric()) => &rest[idx..],
        _ => rest,
    };

    rest.trim()
}

/// Parse an AI response into insight cards.
///
/// Fences are stripped first, then the JSON array is located between the
/// outermost brackets (models sometimes add prose around the payload). An
/// empty array is rejected: callers are promised at least one card.
pub fn parse_insights(response: &str) -> Result<Vec<Insight>> {
    let cleaned = strip_code_fences(response);

    let start = cleaned.find('[');
    let end = cleaned.rfind(']');

    let json_str = match (start, end) {
        (Some(s), Some(e)) if s < e => &cleaned[s..=e],
        _ => {
            return Err(Error::InvalidData(format!(
                "No JSON array found in AI response | Raw: {}",
                truncate(cleaned)
            )))
        }
    };

    let insights: Vec<Insight> = serde_json::from_str(json_str).map_err(|e| {
        Error::InvalidData(format!(
            "Invalid insight JSON from AI: {} | Raw: {}",
            e,
            truncate(json_str)
        ))
    })?;

    if insights.is_empty() {
        return Err(Error::InvalidData("AI returned an empty insight array".into()));
    }

    debug!(count = insights.len(), "Parsed AI insights");
    Ok(insights)
}

/// Truncate long responses for error messages
fn truncate(s: &str) -> String {
    if s.len() > 200 {
        let mut end = 200;
        while !s.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &s[..end])
    } else {
        s.to_string()
    }
}
