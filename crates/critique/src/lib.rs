//! Persona Panel Critique
//!
//! Design-critique primitives shared by the panel service: prompt assembly,
//! lenient response parsing, and consensus aggregation across agents.

pub mod aggregator;
pub mod models;
pub mod parser;
pub mod prompt;
pub mod report;

pub use aggregator::{aggregate, group_problems, jaccard_similarity, GroupMember, ProblemGroup};
pub use models::{AgentCritique, Critique, CritiqueOutcome, DesignArtifact, Problem, Severity};
pub use parser::{parse_critique, ParseOutcome};
pub use prompt::{build_critique_system_prompt, build_critique_user_prompt, USABILITY_HEURISTICS};
pub use report::{
    AgentFix, AgentView, AggregatedReport, ConsensusPoint, CriticalIssue, Disagreement,
    ReportStats,
};
