//! Review Panel Integration Tests
//!
//! Runs `FeedbackCollector` against scripted generators:
//! - partial failures become per-agent error entries
//! - results keep the requested order regardless of completion order
//! - per-agent timeouts are isolated
//! - unknown, inactive and duplicate ids are dropped

use std::sync::Arc;
use std::time::Duration;

use persona_panel::{AppError, FeedbackCollector, PanelSettings, ReviewRequest};
use persona_panel_critique::{CritiqueOutcome, DesignArtifact};
use persona_panel_llm::LlmError;
use serde_json::json;

use super::support::{critique_json, ids, store, Script, ScriptedGenerator};

fn request(agent_ids: &[&str]) -> ReviewRequest {
    ReviewRequest {
        artifact: DesignArtifact::new("design-1", "Loan application form")
            .with_description("Three-step form with document upload"),
        agent_ids: ids(agent_ids),
        task_context: json!({ "task": "Apply for a small business loan" }),
    }
}

fn collector(generator: Arc<ScriptedGenerator>) -> FeedbackCollector {
    FeedbackCollector::new(generator, store(), PanelSettings::default())
}

// ============================================================================
// Partial failure
// ============================================================================

#[tokio::test]
async fn test_one_failing_agent_is_reported_not_raised() {
    let generator = Arc::new(
        ScriptedGenerator::new()
            .with(
                "Asha",
                Script::Reply(critique_json("Low contrast on body text", "critical", "Darken text", 0.9)),
            )
            .with(
                "Ravi",
                Script::Reply(critique_json("Low contrast on the body text", "critical", "Use #333", 0.8)),
            )
            .with(
                "Chen",
                Script::Fail(LlmError::ServerError {
                    message: "upstream overloaded".to_string(),
                    status: Some(503),
                }),
            ),
    );

    let report = collector(generator.clone())
        .run_panel(&request(&["asha", "ravi", "chen"]))
        .await
        .unwrap();

    assert_eq!(report.stats.total_agents, 3);
    assert_eq!(report.stats.valid_responses, 2);
    assert_eq!(report.stats.total_problems, 2);
    assert_eq!(report.stats.critical_count, 1);
    assert!(report.is_partial());

    let chen = &report.per_agent_results[2];
    assert_eq!(chen.agent_id, "chen");
    assert!(chen
        .outcome
        .error()
        .is_some_and(|e| e.contains("upstream overloaded")));

    assert_eq!(
        report.summary,
        "Design feedback from 2 agents (Asha, Ravi): 1 critical issue identified. \
         0 areas of disagreement among agents. 2 agents expressed high confidence in their feedback."
    );
    assert_eq!(generator.calls().len(), 3);
}

#[tokio::test]
async fn test_results_follow_request_order() {
    // Asha stalls briefly so she finishes last
    let generator = Arc::new(
        ScriptedGenerator::new()
            .with("Asha", Script::Stall(Duration::from_millis(50)))
            .otherwise(Script::Reply(critique_json("Button too small", "medium", "Enlarge", 0.5))),
    );

    let results = collector(generator)
        .collect(
            &request(&[]).artifact,
            &ids(&["asha", "chen", "ravi"]),
            &json!({}),
        )
        .await
        .unwrap();

    let order: Vec<&str> = results.iter().map(|r| r.agent_id.as_str()).collect();
    assert_eq!(order, vec!["asha", "chen", "ravi"]);
    assert!(results.iter().all(|r| r.is_valid()));
}

// ============================================================================
// Timeouts
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_stalled_agent_times_out_without_blocking_others() {
    let generator = Arc::new(
        ScriptedGenerator::new()
            .with("Ravi", Script::Stall(Duration::from_secs(120)))
            .otherwise(Script::Reply(critique_json("Unclear labels", "high", "Rename", 0.75))),
    );
    let settings = PanelSettings {
        agent_timeout_secs: 5,
        ..PanelSettings::default()
    };
    let collector = FeedbackCollector::new(generator, store(), settings);

    let report = collector
        .run_panel(&request(&["asha", "ravi", "chen"]))
        .await
        .unwrap();

    assert_eq!(report.stats.valid_responses, 2);
    let ravi = &report.per_agent_results[1];
    assert_eq!(ravi.agent_id, "ravi");
    assert_eq!(
        ravi.outcome,
        CritiqueOutcome::Failed {
            error: "Generation timed out after 5s".to_string()
        }
    );
    assert_eq!(report.failed_agents().count(), 1);
}

// ============================================================================
// Panel resolution
// ============================================================================

#[tokio::test]
async fn test_unknown_inactive_and_duplicate_ids_are_dropped() {
    let generator = Arc::new(
        ScriptedGenerator::new().otherwise(Script::Reply(critique_json("Slow upload", "low", "", 0.4))),
    );
    let report = collector(generator.clone())
        .run_panel(&request(&["ravi", "ghost", "dana", "ravi", "asha"]))
        .await
        .unwrap();

    let agents: Vec<&str> = report
        .per_agent_results
        .iter()
        .map(|r| r.agent_id.as_str())
        .collect();
    assert_eq!(agents, vec!["ravi", "asha"]);
    assert_eq!(generator.calls().len(), 2);
}

#[tokio::test]
async fn test_empty_panel_is_an_error() {
    let generator = Arc::new(ScriptedGenerator::new());
    let err = collector(generator.clone())
        .run_panel(&request(&["ghost", "dana"]))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::EmptyPanel { requested: 2 }));
    assert!(generator.calls().is_empty());
}

#[tokio::test]
async fn test_every_agent_sees_the_same_user_prompt_and_its_own_persona() {
    let generator = Arc::new(
        ScriptedGenerator::new().otherwise(Script::Reply(critique_json("Dense copy", "medium", "Trim", 0.6))),
    );
    collector(generator.clone())
        .run_panel(&request(&["asha", "ravi"]))
        .await
        .unwrap();

    let calls = generator.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].user_prompt, calls[1].user_prompt);
    assert!(calls[0].user_prompt.contains("Loan application form"));
    assert!(calls[0].user_prompt.contains("Apply for a small business loan"));

    let prompts: Vec<&str> = calls.iter().map(|c| c.system_prompt.as_str()).collect();
    assert!(prompts.iter().any(|p| p.contains("You are Asha")));
    assert!(prompts.iter().any(|p| p.contains("You are Ravi")));
    assert!(calls.iter().all(|c| c.params.temperature == 0.3));
}

#[tokio::test]
async fn test_prose_answer_becomes_low_confidence_placeholder() {
    let generator = Arc::new(
        ScriptedGenerator::new().otherwise(Script::Reply("Honestly it looks fine to me.".to_string())),
    );
    let report = collector(generator)
        .run_panel(&request(&["chen"]))
        .await
        .unwrap();

    assert_eq!(report.stats.valid_responses, 1);
    assert!(report.per_agent_results[0].outcome.is_fallback());
    assert!(report.critical_issues.is_empty());
}
