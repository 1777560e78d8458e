//! Critique Parser
//!
//! Best-effort conversion of free-form generator text into a `Critique`.
//! Parsing is total: every input yields either a parsed critique or a
//! low-confidence placeholder, never an error.
//!
//! Fields are read one at a time, so a single wrong-typed field (a `null`
//! list, a quoted number) degrades to its default instead of discarding the
//! whole critique. Both camelCase and snake_case keys are accepted.

use serde_json::{Map, Value};

use crate::models::{Critique, CritiqueOutcome, Problem, Severity};

/// Confidence assigned when the response contained no JSON object at all.
pub const TEXT_FALLBACK_CONFIDENCE: f64 = 0.3;
/// Confidence assigned when a JSON object was found but did not deserialize.
pub const INVALID_JSON_FALLBACK_CONFIDENCE: f64 = 0.1;

const SUMMARY_PREVIEW_CHARS: usize = 200;
const FALLBACK_HEURISTIC: &str = "Help and Documentation";

/// Result of parsing one generator response.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseOutcome {
    Parsed(Critique),
    Fallback(Critique),
}

impl ParseOutcome {
    pub fn critique(&self) -> &Critique {
        match self {
            ParseOutcome::Parsed(c) | ParseOutcome::Fallback(c) => c,
        }
    }
}

impl From<ParseOutcome> for CritiqueOutcome {
    fn from(outcome: ParseOutcome) -> Self {
        match outcome {
            ParseOutcome::Parsed(c) => CritiqueOutcome::Parsed(c),
            ParseOutcome::Fallback(c) => CritiqueOutcome::Fallback(c),
        }
    }
}

/// Parse a generator response into a critique.
pub fn parse_critique(response: &str) -> ParseOutcome {
    let Some(json_str) = extract_json_object(response) else {
        return ParseOutcome::Fallback(text_fallback(response));
    };

    match serde_json::from_str::<Value>(json_str) {
        Ok(Value::Object(map)) => ParseOutcome::Parsed(normalize(critique_from_map(&map))),
        Ok(_) => ParseOutcome::Fallback(invalid_json_fallback("expected a JSON object")),
        Err(e) => ParseOutcome::Fallback(invalid_json_fallback(&e.to_string())),
    }
}

/// Locate the JSON object inside a response.
///
/// Prefers the content of a markdown code fence, then the span from the
/// first `{` to the last `}`.
pub fn extract_json_object(response_text: &str) -> Option<&str> {
    let trimmed = response_text.trim();

    if let Some(start) = trimmed.find("```") {
        let after_fence = &trimmed[start + 3..];
        let content_start = after_fence.find('\n').map_or(0, |nl| nl + 1);
        let content = &after_fence[content_start..];
        if let Some(end) = content.find("```") {
            let fenced = content[..end].trim();
            if fenced.starts_with('{') && fenced.ends_with('}') {
                return Some(fenced);
            }
        }
    }

    match (trimmed.find('{'), trimmed.rfind('}')) {
        (Some(start), Some(end)) if start < end => Some(&trimmed[start..=end]),
        _ => None,
    }
}

// ============================================================================
// Lenient field readers
// ============================================================================

fn critique_from_map(map: &Map<String, Value>) -> Critique {
    Critique {
        summary: field(map, "summary", "summary").and_then(text).unwrap_or_default(),
        positives: field(map, "positives", "positives").map(text_list).unwrap_or_default(),
        problems: field(map, "problems", "problems")
            .map(problem_list)
            .unwrap_or_default(),
        confidence: field(map, "confidence", "confidence")
            .and_then(number)
            .unwrap_or_default(),
        user_intent_understanding: field(map, "userIntentUnderstanding", "user_intent_understanding")
            .and_then(text),
        accessibility_concerns: field(map, "accessibilityConcerns", "accessibility_concerns")
            .map(text_list)
            .unwrap_or_default(),
        mobile_considerations: field(map, "mobileConsiderations", "mobile_considerations")
            .map(text_list)
            .unwrap_or_default(),
    }
}

fn field<'a>(map: &'a Map<String, Value>, camel: &str, snake: &str) -> Option<&'a Value> {
    map.get(camel).or_else(|| map.get(snake))
}

fn text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// An array keeps its scalar entries; a lone string becomes one entry.
fn text_list(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items.iter().filter_map(text).collect(),
        Value::String(s) if !s.trim().is_empty() => vec![s.clone()],
        _ => Vec::new(),
    }
}

/// Accepts numbers and numeric strings.
fn number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    n.filter(|n| n.is_finite())
}

fn problem_list(value: &Value) -> Vec<Problem> {
    match value {
        Value::Array(items) => items.iter().filter_map(problem).collect(),
        _ => Vec::new(),
    }
}

fn problem(value: &Value) -> Option<Problem> {
    match value {
        Value::Object(map) => {
            let get = |key: &str| map.get(key).and_then(text).unwrap_or_default();
            Some(Problem {
                issue: get("issue"),
                evidence: get("evidence"),
                severity: map
                    .get("severity")
                    .and_then(text)
                    .map(|s| Severity::from_label(&s))
                    .unwrap_or_default(),
                heuristic: get("heuristic"),
                fix: get("fix"),
            })
        }
        Value::String(issue) if !issue.trim().is_empty() => {
            Some(Problem::new(issue.clone(), Severity::Unknown))
        }
        _ => None,
    }
}

fn normalize(mut critique: Critique) -> Critique {
    critique.confidence = critique.confidence.clamp(0.0, 1.0);
    critique.summary = critique.summary.trim().to_string();
    for problem in &mut critique.problems {
        problem.issue = problem.issue.trim().to_string();
    }
    critique
}

fn text_fallback(response: &str) -> Critique {
    let text = response.trim();
    let summary = if text.is_empty() {
        "Empty response".to_string()
    } else {
        let preview: String = text.chars().take(SUMMARY_PREVIEW_CHARS).collect();
        format!("{}...", preview)
    };

    Critique {
        summary,
        problems: vec![placeholder_problem(
            "Unable to parse structured feedback",
            "Response format error",
            "Improve response formatting",
        )],
        confidence: TEXT_FALLBACK_CONFIDENCE,
        user_intent_understanding: Some("Unable to assess".to_string()),
        ..Default::default()
    }
}

fn invalid_json_fallback(error: &str) -> Critique {
    Critique {
        summary: "Feedback parsing failed".to_string(),
        problems: vec![placeholder_problem(
            "Response parsing error",
            error,
            "Improve response format",
        )],
        confidence: INVALID_JSON_FALLBACK_CONFIDENCE,
        user_intent_understanding: Some("Unable to assess".to_string()),
        ..Default::default()
    }
}

fn placeholder_problem(issue: &str, evidence: &str, fix: &str) -> Problem {
    Problem::new(issue, Severity::Low)
        .with_evidence(evidence)
        .with_heuristic(FALLBACK_HEURISTIC)
        .with_fix(fix)
}
