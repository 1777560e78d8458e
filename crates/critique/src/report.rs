//! Aggregated Report Types
//!
//! The merged, panel-level view over all per-agent critiques.

use serde::{Deserialize, Serialize};

use crate::models::{AgentCritique, Severity};

/// One agent's suggested fix for a grouped issue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentFix {
    pub agent_id: String,
    pub agent_name: String,
    pub fix: String,
}

/// A grouped issue that at least one agent rated critical.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CriticalIssue {
    /// Issue text of the group's seed problem
    pub issue: String,
    pub severity: Severity,
    /// One evidence string per group member
    pub evidence: Vec<String>,
    pub agents: Vec<AgentFix>,
    pub consensus: f64,
}

/// One agent's position inside a disputed group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentView {
    pub agent_id: String,
    pub agent_name: String,
    pub severity: Severity,
    pub fix: String,
}

/// A grouped issue whose members disagree on severity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Disagreement {
    pub issue: String,
    pub disagreement_level: f64,
    pub conflicting_views: Vec<AgentView>,
}

/// A grouped issue whose members largely agree on severity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsensusPoint {
    pub issue: String,
    pub consensus: f64,
    pub evidence: Vec<String>,
    /// De-duplicated, first-seen order
    pub suggested_fixes: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportStats {
    pub total_agents: usize,
    pub valid_responses: usize,
    pub total_problems: usize,
    pub critical_count: usize,
    pub disagreement_count: usize,
}

/// Consensus report over one panel run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedReport {
    pub summary: String,
    pub critical_issues: Vec<CriticalIssue>,
    pub disagreements: Vec<Disagreement>,
    pub consensus: Vec<ConsensusPoint>,
    /// In the order the agents were requested, not completion order
    pub per_agent_results: Vec<AgentCritique>,
    pub stats: ReportStats,
}

impl AggregatedReport {
    /// Whether some agents failed, so callers can show a partial-results notice.
    pub fn is_partial(&self) -> bool {
        self.stats.valid_responses < self.stats.total_agents
    }

    /// Agents whose generator call failed.
    pub fn failed_agents(&self) -> impl Iterator<Item = &AgentCritique> {
        self.per_agent_results.iter().filter(|r| !r.is_valid())
    }
}
