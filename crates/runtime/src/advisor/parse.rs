//! Advisor reply parsing.
//!
//! Expected shape: `ACTION | REASONING [| CONFIDENCE]`. Models rarely follow
//! it exactly, so the parser is lenient:
//!
//! - only the first non-empty line is read
//! - the action is trimmed, upper-cased, and spaces/dashes become underscores
//! - missing or empty reasoning becomes [`NO_REASONING`]
//! - without a pipe, the first token is the action and the reasoning defaults
//! - a numeric third segment overrides the default confidence, clamped to `[0, 1]`
//!
//! An empty reply parses to a fallback.

use super::AdvisorResponse;

pub const NO_REASONING: &str = "No reasoning provided";

/// Parses `raw` into a response attributed to `provider`.
pub fn parse_reply(raw: &str, default_confidence: f64, provider: &str) -> AdvisorResponse {
    let Some(line) = raw.lines().map(str::trim).find(|line| !line.is_empty()) else {
        return AdvisorResponse::fallback("empty advisor reply");
    };

    let (action, reasoning, confidence) = if line.contains('|') {
        let mut segments = line.split('|').map(str::trim);
        let action = segments.next().unwrap_or_default();
        let reasoning = segments.next().unwrap_or_default();
        let confidence = segments.next().and_then(|s| s.parse::<f64>().ok());
        (action, reasoning, confidence)
    } else {
        let action = line.split_whitespace().next().unwrap_or_default();
        (action, "", None)
    };

    let decision = normalize_action(action);
    if decision.is_empty() {
        return AdvisorResponse::fallback("advisor reply has no action");
    }

    let reasoning = if reasoning.is_empty() {
        NO_REASONING.to_string()
    } else {
        reasoning.to_string()
    };

    let confidence = confidence
        .filter(|c| c.is_finite())
        .unwrap_or(default_confidence)
        .clamp(0.0, 1.0);

    AdvisorResponse {
        decision,
        reasoning,
        confidence,
        provider: provider.to_string(),
        latency_ms: 0,
    }
}

fn normalize_action(action: &str) -> String {
    action
        .trim_matches(|c: char| c == '*' || c == '`' || c == '"')
        .trim()
        .to_ascii_uppercase()
        .split(|c: char| c.is_whitespace() || c == '-')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}
