//! Aggregation Integration Tests
//!
//! Aggregates panels collected through `FeedbackCollector` and checks the
//! report sections, the zero-valid case, and determinism.

use std::sync::Arc;

use persona_panel::{FeedbackCollector, PanelSettings, ReviewRequest};
use persona_panel_critique::{aggregate, DesignArtifact, Severity};
use persona_panel_llm::LlmError;
use serde_json::json;

use super::support::{critique_json, ids, store, Script, ScriptedGenerator};

fn request(agent_ids: &[&str]) -> ReviewRequest {
    ReviewRequest {
        artifact: DesignArtifact::new("design-2", "Checkout page"),
        agent_ids: ids(agent_ids),
        task_context: json!({}),
    }
}

fn collector(generator: ScriptedGenerator) -> FeedbackCollector {
    FeedbackCollector::new(Arc::new(generator), store(), PanelSettings::default())
}

#[tokio::test]
async fn test_conflicting_severities_produce_disagreement() {
    let generator = ScriptedGenerator::new()
        .with("Asha", Script::Reply(critique_json("Hidden delivery fee", "low", "Show fee early", 0.9)))
        .with("Ravi", Script::Reply(critique_json("Hidden delivery fee", "high", "Show fee early", 0.6)))
        .with("Chen", Script::Reply(critique_json("Hidden delivery fee", "critical", "List all fees", 0.5)));

    let report = collector(generator)
        .run_panel(&request(&["asha", "ravi", "chen"]))
        .await
        .unwrap();

    assert_eq!(report.stats.disagreement_count, 1);
    let disagreement = &report.disagreements[0];
    assert_eq!(disagreement.issue, "Hidden delivery fee");
    assert!((disagreement.disagreement_level - 2.0 / 3.0).abs() < 1e-9);
    let severities: Vec<Severity> = disagreement
        .conflicting_views
        .iter()
        .map(|v| v.severity)
        .collect();
    assert_eq!(severities, vec![Severity::Low, Severity::High, Severity::Critical]);

    // One critical vote makes the whole group critical, but there is no consensus
    assert_eq!(report.critical_issues.len(), 1);
    assert_eq!(report.critical_issues[0].agents.len(), 3);
    assert!(report.consensus.is_empty());

    assert_eq!(
        report.summary,
        "Design feedback from 3 agents (Asha, Ravi, Chen): 1 critical issue identified. \
         1 area of disagreement among agents. 1 agent expressed high confidence in their feedback."
    );
}

#[tokio::test]
async fn test_agreeing_agents_produce_consensus_with_deduplicated_fixes() {
    let generator = ScriptedGenerator::new()
        .with("Asha", Script::Reply(critique_json("Coupon field is easy to miss", "medium", "Move coupon up", 0.8)))
        .with("Ravi", Script::Reply(critique_json("Coupon field is easy to miss", "medium", "Move coupon up", 0.8)))
        .with("Chen", Script::Reply(critique_json("The coupon field is easy to miss", "medium", "Label it clearly", 0.8)));

    let report = collector(generator)
        .run_panel(&request(&["asha", "ravi", "chen"]))
        .await
        .unwrap();

    assert!(report.disagreements.is_empty());
    assert!(report.critical_issues.is_empty());
    assert_eq!(report.consensus.len(), 1);

    let point = &report.consensus[0];
    assert_eq!(point.consensus, 1.0);
    assert_eq!(point.evidence.len(), 3);
    assert_eq!(
        point.suggested_fixes,
        vec!["Move coupon up".to_string(), "Label it clearly".to_string()]
    );
}

#[tokio::test]
async fn test_all_agents_failing_yields_no_valid_feedback() {
    let generator = ScriptedGenerator::new().otherwise(Script::Fail(LlmError::NetworkError {
        message: "connection reset".to_string(),
    }));

    let report = collector(generator)
        .run_panel(&request(&["asha", "ravi"]))
        .await
        .unwrap();

    assert_eq!(report.summary, "No valid feedback received");
    assert_eq!(report.stats.total_agents, 2);
    assert_eq!(report.stats.valid_responses, 0);
    assert!(report.critical_issues.is_empty());
    assert!(report.disagreements.is_empty());
    assert!(report.consensus.is_empty());
    assert_eq!(report.per_agent_results.len(), 2);
}

#[tokio::test]
async fn test_reaggregating_collected_results_is_byte_identical() {
    let generator = ScriptedGenerator::new()
        .with("Asha", Script::Reply(critique_json("Tiny tap targets", "high", "44px minimum", 0.9)))
        .with("Ravi", Script::Reply(critique_json("Tiny tap targets on mobile", "medium", "Bigger buttons", 0.7)))
        .with("Chen", Script::Reply("not json at all".to_string()));

    let results = collector(generator)
        .collect(&request(&[]).artifact, &ids(&["asha", "ravi", "chen"]), &json!({}))
        .await
        .unwrap();

    let first = serde_json::to_string(&aggregate(&results)).unwrap();
    let second = serde_json::to_string(&aggregate(&results)).unwrap();
    assert_eq!(first, second);

    let value: serde_json::Value = serde_json::from_str(&first).unwrap();
    assert_eq!(value["stats"]["validResponses"], 3);
    assert!(value["perAgentResults"].as_array().is_some_and(|r| r.len() == 3));
}
