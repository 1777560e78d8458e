//! Critique Models
//!
//! Data structures for design artifacts, single-agent critiques and the
//! per-agent result records produced by a panel run.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Severity rating of a reported problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[serde(alias = "Low", alias = "LOW")]
    Low,
    #[serde(alias = "Medium", alias = "MEDIUM")]
    Medium,
    #[serde(alias = "High", alias = "HIGH")]
    High,
    #[serde(alias = "Critical", alias = "CRITICAL")]
    Critical,
    /// Missing or unrecognized rating; counts as its own distinct severity
    #[default]
    #[serde(other)]
    Unknown,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
            Severity::Unknown => "unknown",
        }
    }

    /// Case-insensitive parse; anything unrecognized is `Unknown`.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "low" => Severity::Low,
            "medium" => Severity::Medium,
            "high" => Severity::High,
            "critical" => Severity::Critical,
            _ => Severity::Unknown,
        }
    }

    pub fn is_critical(&self) -> bool {
        matches!(self, Severity::Critical)
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The artifact under review.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DesignArtifact {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub figma_url: Option<String>,
    pub image_url: Option<String>,
}

impl DesignArtifact {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// One problem reported by one agent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Problem {
    pub issue: String,
    pub evidence: String,
    pub severity: Severity,
    pub heuristic: String,
    pub fix: String,
}

impl Problem {
    pub fn new(issue: impl Into<String>, severity: Severity) -> Self {
        Self {
            issue: issue.into(),
            severity,
            ..Default::default()
        }
    }

    pub fn with_evidence(mut self, evidence: impl Into<String>) -> Self {
        self.evidence = evidence.into();
        self
    }

    pub fn with_fix(mut self, fix: impl Into<String>) -> Self {
        self.fix = fix.into();
        self
    }

    pub fn with_heuristic(mut self, heuristic: impl Into<String>) -> Self {
        self.heuristic = heuristic.into();
        self
    }
}

/// One agent's structured assessment of an artifact.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Critique {
    pub summary: String,
    pub positives: Vec<String>,
    pub problems: Vec<Problem>,
    /// 0.0 to 1.0
    pub confidence: f64,
    #[serde(alias = "user_intent_understanding", skip_serializing_if = "Option::is_none")]
    pub user_intent_understanding: Option<String>,
    #[serde(alias = "accessibility_concerns")]
    pub accessibility_concerns: Vec<String>,
    #[serde(alias = "mobile_considerations")]
    pub mobile_considerations: Vec<String>,
}

/// What one agent contributed to a panel run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CritiqueOutcome {
    /// The generator returned a well-formed critique
    Parsed(Critique),
    /// The generator answered but the text could not be parsed; a
    /// low-confidence placeholder stands in for it
    Fallback(Critique),
    /// The generator call itself failed or timed out
    Failed { error: String },
}

impl CritiqueOutcome {
    pub fn critique(&self) -> Option<&Critique> {
        match self {
            CritiqueOutcome::Parsed(c) | CritiqueOutcome::Fallback(c) => Some(c),
            CritiqueOutcome::Failed { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            CritiqueOutcome::Failed { error } => Some(error),
            _ => None,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, CritiqueOutcome::Fallback(_))
    }
}

/// Per-agent result of a panel run. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentCritique {
    pub agent_id: String,
    pub agent_name: String,
    pub outcome: CritiqueOutcome,
    pub completed_at: DateTime<Utc>,
}

impl AgentCritique {
    pub fn new(
        agent_id: impl Into<String>,
        agent_name: impl Into<String>,
        outcome: CritiqueOutcome,
    ) -> Self {
        Self {
            agent_id: agent_id.into(),
            agent_name: agent_name.into(),
            outcome,
            completed_at: Utc::now(),
        }
    }

    /// Convenience constructor for a failed agent.
    pub fn failed(
        agent_id: impl Into<String>,
        agent_name: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        Self::new(
            agent_id,
            agent_name,
            CritiqueOutcome::Failed {
                error: error.into(),
            },
        )
    }

    /// Whether this result carries a critique (parsed or placeholder).
    pub fn is_valid(&self) -> bool {
        self.outcome.critique().is_some()
    }

    pub fn critique(&self) -> Option<&Critique> {
        self.outcome.critique()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_is_case_tolerant() {
        let s: Severity = serde_json::from_str("\"HIGH\"").unwrap();
        assert_eq!(s, Severity::High);
        let s: Severity = serde_json::from_str("\"catastrophic\"").unwrap();
        assert_eq!(s, Severity::Unknown);
    }

    #[test]
    fn test_critique_accepts_snake_case_keys() {
        let json = r#"{
            "summary": "Fine",
            "confidence": 0.8,
            "accessibility_concerns": ["contrast"],
            "mobile_considerations": ["tap targets"],
            "problems": [{"issue": "Tiny font", "severity": "medium"}]
        }"#;
        let critique: Critique = serde_json::from_str(json).unwrap();
        assert_eq!(critique.accessibility_concerns, vec!["contrast".to_string()]);
        assert_eq!(critique.mobile_considerations.len(), 1);
        assert_eq!(critique.problems[0].severity, Severity::Medium);
        assert!(critique.problems[0].fix.is_empty());
    }

    #[test]
    fn test_outcome_serialization_is_tagged() {
        let failed = AgentCritique::failed("a-1", "Asha", "rate limited");
        let json = serde_json::to_value(&failed).unwrap();
        assert_eq!(json["outcome"]["status"], "failed");
        assert_eq!(json["outcome"]["error"], "rate limited");
        assert!(!failed.is_valid());

        let parsed = AgentCritique::new(
            "a-2",
            "Ravi",
            CritiqueOutcome::Parsed(Critique {
                summary: "ok".to_string(),
                ..Default::default()
            }),
        );
        let json = serde_json::to_value(&parsed).unwrap();
        assert_eq!(json["outcome"]["status"], "parsed");
        assert_eq!(json["outcome"]["summary"], "ok");
        assert!(parsed.is_valid());
    }

    #[test]
    fn test_fallback_counts_as_valid() {
        let result = AgentCritique::new("a-3", "Meera", CritiqueOutcome::Fallback(Critique::default()));
        assert!(result.is_valid());
        assert!(result.outcome.is_fallback());
        assert!(result.outcome.error().is_none());
    }
}
