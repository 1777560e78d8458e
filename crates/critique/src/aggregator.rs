//! Critique Aggregator
//!
//! Merges per-agent critiques into one consensus report:
//! 1. Flatten every problem from non-failed results, tagged with its agent
//! 2. Greedy single-pass grouping by word-set Jaccard similarity of `issue`
//! 3. Per-group consensus and disagreement scores from severity ratings
//! 4. Critical issues, disagreements, consensus points and a summary line
//!
//! Aggregation is a pure function of its ordered input. Grouping is order
//! dependent and purely lexical: two phrasings of the same issue that share
//! few words stay in separate groups.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{AgentCritique, Problem, Severity};
use crate::report::{
    AgentFix, AgentView, AggregatedReport, ConsensusPoint, CriticalIssue, Disagreement,
    ReportStats,
};

/// A candidate joins a group when its similarity to the seed exceeds this.
pub const SIMILARITY_THRESHOLD: f64 = 0.6;
/// Groups above this disagreement score are reported as disagreements.
pub const DISAGREEMENT_THRESHOLD: f64 = 0.3;
/// Groups above this consensus score are reported as consensus points.
pub const CONSENSUS_THRESHOLD: f64 = 0.7;
/// Agents above this confidence count as confident in the summary.
pub const HIGH_CONFIDENCE_THRESHOLD: f64 = 0.7;

const NO_VALID_FEEDBACK_SUMMARY: &str = "No valid feedback received";

// ============================================================================
// Grouping
// ============================================================================

/// A problem tagged with the agent that reported it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupMember {
    #[serde(flatten)]
    pub problem: Problem,
    pub agent_id: String,
    pub agent_name: String,
}

/// Similar problems from one or more agents. Derived, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblemGroup {
    pub members: Vec<GroupMember>,
    /// Issue text of the seed (first) member
    pub consensus_issue: String,
    pub evidence: Vec<String>,
    pub consensus_score: f64,
    pub disagreement_score: f64,
}

impl ProblemGroup {
    fn from_members(members: Vec<GroupMember>) -> Self {
        let consensus_issue = members
            .first()
            .map(|m| m.problem.issue.clone())
            .unwrap_or_default();
        let evidence = members.iter().map(|m| m.problem.evidence.clone()).collect();
        let (consensus_score, disagreement_score) = if members.len() > 1 {
            (consensus_score(&members), disagreement_score(&members))
        } else {
            (1.0, 0.0)
        };

        Self {
            members,
            consensus_issue,
            evidence,
            consensus_score,
            disagreement_score,
        }
    }

    pub fn has_critical(&self) -> bool {
        self.members.iter().any(|m| m.problem.severity.is_critical())
    }
}

/// Jaccard similarity of the lower-cased, whitespace-tokenized word sets.
///
/// Two empty strings are considered dissimilar.
pub fn jaccard_similarity(a: &str, b: &str) -> f64 {
    let a_lower = a.to_lowercase();
    let b_lower = b.to_lowercase();
    let words_a: BTreeSet<&str> = a_lower.split_whitespace().collect();
    let words_b: BTreeSet<&str> = b_lower.split_whitespace().collect();

    let union = words_a.union(&words_b).count();
    if union == 0 {
        return 0.0;
    }
    let intersection = words_a.intersection(&words_b).count();
    intersection as f64 / union as f64
}

/// Flatten all problems of valid results into one ordered, agent-tagged list.
pub fn flatten_problems(results: &[AgentCritique]) -> Vec<GroupMember> {
    results
        .iter()
        .filter_map(|r| r.critique().map(|c| (r, c)))
        .flat_map(|(r, c)| {
            c.problems.iter().map(move |p| GroupMember {
                problem: p.clone(),
                agent_id: r.agent_id.clone(),
                agent_name: r.agent_name.clone(),
            })
        })
        .collect()
}

/// Greedy grouping in list order.
///
/// Each ungrouped problem seeds a new group; every later ungrouped problem
/// whose issue is similar enough to the seed joins it and can no longer seed.
pub fn group_problems(problems: Vec<GroupMember>) -> Vec<ProblemGroup> {
    let mut slots: Vec<Option<GroupMember>> = problems.into_iter().map(Some).collect();
    let mut groups = Vec::new();

    for seed_idx in 0..slots.len() {
        let Some(seed) = slots[seed_idx].take() else {
            continue;
        };

        let mut members = vec![seed];
        for candidate_idx in (seed_idx + 1)..slots.len() {
            let joins = slots[candidate_idx].as_ref().is_some_and(|candidate| {
                jaccard_similarity(&members[0].problem.issue, &candidate.problem.issue)
                    > SIMILARITY_THRESHOLD
            });
            if joins {
                if let Some(candidate) = slots[candidate_idx].take() {
                    members.push(candidate);
                }
            }
        }

        groups.push(ProblemGroup::from_members(members));
    }

    groups
}

fn severity_counts(members: &[GroupMember]) -> BTreeMap<Severity, usize> {
    let mut counts = BTreeMap::new();
    for member in members {
        *counts.entry(member.problem.severity).or_insert(0) += 1;
    }
    counts
}

/// Share of members holding the group's most frequent severity.
fn consensus_score(members: &[GroupMember]) -> f64 {
    if members.is_empty() {
        return 1.0;
    }
    let max_count = severity_counts(members).values().copied().max().unwrap_or(0);
    max_count as f64 / members.len() as f64
}

/// `(distinct severities - 1) / 3`, capped at 1.0.
fn disagreement_score(members: &[GroupMember]) -> f64 {
    let distinct = severity_counts(members).len();
    if distinct > 1 {
        ((distinct - 1) as f64 / 3.0).min(1.0)
    } else {
        0.0
    }
}

// ============================================================================
// Aggregation
// ============================================================================

/// Merge ordered per-agent results into an aggregated report.
///
/// Tolerates any subset of a panel (including zero valid results, which
/// yields empty sections and a "no valid feedback" summary).
pub fn aggregate(results: &[AgentCritique]) -> AggregatedReport {
    let valid: Vec<&AgentCritique> = results.iter().filter(|r| r.is_valid()).collect();

    if valid.is_empty() {
        return AggregatedReport {
            summary: NO_VALID_FEEDBACK_SUMMARY.to_string(),
            critical_issues: Vec::new(),
            disagreements: Vec::new(),
            consensus: Vec::new(),
            per_agent_results: results.to_vec(),
            stats: ReportStats {
                total_agents: results.len(),
                ..Default::default()
            },
        };
    }

    let problems = flatten_problems(results);
    let total_problems = problems.len();
    let groups = group_problems(problems);

    debug!(
        agents = results.len(),
        valid = valid.len(),
        problems = total_problems,
        groups = groups.len(),
        "aggregate: grouped problems"
    );

    let critical_issues: Vec<CriticalIssue> = groups
        .iter()
        .filter(|g| g.has_critical())
        .map(critical_issue)
        .collect();

    let disagreements: Vec<Disagreement> = groups
        .iter()
        .filter(|g| g.disagreement_score > DISAGREEMENT_THRESHOLD)
        .map(disagreement)
        .collect();

    let consensus: Vec<ConsensusPoint> = groups
        .iter()
        .filter(|g| g.consensus_score > CONSENSUS_THRESHOLD)
        .map(consensus_point)
        .collect();

    let summary = summarize(&valid, critical_issues.len(), disagreements.len());

    AggregatedReport {
        summary,
        stats: ReportStats {
            total_agents: results.len(),
            valid_responses: valid.len(),
            total_problems,
            critical_count: critical_issues.len(),
            disagreement_count: disagreements.len(),
        },
        critical_issues,
        disagreements,
        consensus,
        per_agent_results: results.to_vec(),
    }
}

fn critical_issue(group: &ProblemGroup) -> CriticalIssue {
    CriticalIssue {
        issue: group.consensus_issue.clone(),
        severity: Severity::Critical,
        evidence: group.evidence.clone(),
        agents: group
            .members
            .iter()
            .map(|m| AgentFix {
                agent_id: m.agent_id.clone(),
                agent_name: m.agent_name.clone(),
                fix: m.problem.fix.clone(),
            })
            .collect(),
        consensus: group.consensus_score,
    }
}

fn disagreement(group: &ProblemGroup) -> Disagreement {
    Disagreement {
        issue: group.consensus_issue.clone(),
        disagreement_level: group.disagreement_score,
        conflicting_views: group
            .members
            .iter()
            .map(|m| AgentView {
                agent_id: m.agent_id.clone(),
                agent_name: m.agent_name.clone(),
                severity: m.problem.severity,
                fix: m.problem.fix.clone(),
            })
            .collect(),
    }
}

fn consensus_point(group: &ProblemGroup) -> ConsensusPoint {
    let mut suggested_fixes: Vec<String> = Vec::new();
    for member in &group.members {
        let fix = member.problem.fix.trim();
        if !fix.is_empty() && !suggested_fixes.iter().any(|f| f == fix) {
            suggested_fixes.push(fix.to_string());
        }
    }

    ConsensusPoint {
        issue: group.consensus_issue.clone(),
        consensus: group.consensus_score,
        evidence: group.evidence.clone(),
        suggested_fixes,
    }
}

fn summarize(valid: &[&AgentCritique], critical_count: usize, disagreement_count: usize) -> String {
    let names: Vec<&str> = valid.iter().map(|r| r.agent_name.as_str()).collect();
    let confident = valid
        .iter()
        .filter_map(|r| r.critique())
        .filter(|c| c.confidence > HIGH_CONFIDENCE_THRESHOLD)
        .count();

    format!(
        "Design feedback from {} ({}): {} identified. {} among agents. {} expressed high confidence in their feedback.",
        plural(valid.len(), "agent", "agents"),
        names.join(", "),
        plural(critical_count, "critical issue", "critical issues"),
        plural(disagreement_count, "area of disagreement", "areas of disagreement"),
        plural(confident, "agent", "agents"),
    )
}

fn plural(count: usize, one: &str, many: &str) -> String {
    if count == 1 {
        format!("1 {}", one)
    } else {
        format!("{} {}", count, many)
    }
}
