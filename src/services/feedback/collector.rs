//! Feedback Collector
//!
//! Runs a design-review panel: resolves the requested personas, asks every
//! one of them for a critique concurrently, and aggregates the results.
//!
//! Each agent call is isolated. A generator error or timeout becomes a
//! `CritiqueOutcome::Failed` entry, an unparseable answer becomes a
//! low-confidence placeholder, and the panel waits for every call to settle
//! before returning.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use futures_util::future::join_all;
use persona_panel_core::PersonaProfile;
use persona_panel_critique::{
    aggregate, build_critique_user_prompt, parse_critique, AgentCritique, AggregatedReport,
    CritiqueOutcome, DesignArtifact, ParseOutcome,
};
use persona_panel_llm::{GenerationParams, Generator, LlmError};
use serde_json::Value;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::models::response::ReviewRequest;
use crate::models::settings::PanelSettings;
use crate::services::persona::{build_panel_system_prompt, AgentStore};
use crate::utils::error::{AppError, AppResult};

/// Orchestrates concurrent per-agent critiques.
pub struct FeedbackCollector {
    generator: Arc<dyn Generator>,
    store: Arc<dyn AgentStore>,
    settings: PanelSettings,
}

impl FeedbackCollector {
    pub fn new(
        generator: Arc<dyn Generator>,
        store: Arc<dyn AgentStore>,
        settings: PanelSettings,
    ) -> Self {
        Self {
            generator,
            store,
            settings,
        }
    }

    /// Run the full review path and aggregate the panel's critiques.
    ///
    /// Fails only with `AppError::EmptyPanel` (or a store error) when no
    /// requested agent resolves; partial failures are reported as data.
    pub async fn run_panel(&self, request: &ReviewRequest) -> AppResult<AggregatedReport> {
        let results = self
            .collect(&request.artifact, &request.agent_ids, &request.task_context)
            .await?;
        Ok(aggregate(&results))
    }

    /// Collect per-agent critiques without aggregating them.
    ///
    /// Results follow the order of `agent_ids` (after de-duplication and
    /// dropping unknown or inactive ids), not completion order.
    pub async fn collect(
        &self,
        artifact: &DesignArtifact,
        agent_ids: &[String],
        task_context: &Value,
    ) -> AppResult<Vec<AgentCritique>> {
        let run_id = Uuid::new_v4();
        let requested = dedupe_ids(agent_ids);
        let panel = self.resolve_panel(&requested).await?;

        if panel.is_empty() {
            warn!(run_id = %run_id, requested = requested.len(), "panel: no agents resolved");
            return Err(AppError::empty_panel(requested.len()));
        }

        info!(
            run_id = %run_id,
            artifact = %artifact.name,
            agents = panel.len(),
            dropped = requested.len() - panel.len(),
            generator = self.generator.name(),
            "panel: starting review"
        );

        let user_prompt = build_critique_user_prompt(artifact, task_context);
        let params = GenerationParams::new(self.settings.temperature, self.settings.max_tokens);

        let calls = panel
            .iter()
            .map(|persona| self.critique_one(run_id, persona, &user_prompt, &params));
        let results = join_all(calls).await;

        let valid = results.iter().filter(|r| r.is_valid()).count();
        info!(
            run_id = %run_id,
            agents = results.len(),
            valid = valid,
            "panel: all agents settled"
        );

        Ok(results)
    }

    /// Resolve ids to active personas, keeping the requested order.
    async fn resolve_panel(&self, ids: &[String]) -> AppResult<Vec<PersonaProfile>> {
        let mut by_id: HashMap<String, PersonaProfile> = self
            .store
            .get_profiles(ids)
            .await?
            .into_iter()
            .map(|p| (p.id.clone(), p))
            .collect();

        let mut panel = Vec::with_capacity(ids.len());
        for id in ids {
            match by_id.remove(id) {
                Some(persona) if persona.is_active() => panel.push(persona),
                Some(_) => debug!(agent_id = %id, "panel: skipping inactive agent"),
                None => debug!(agent_id = %id, "panel: skipping unknown agent"),
            }
        }
        Ok(panel)
    }

    async fn critique_one(
        &self,
        run_id: Uuid,
        persona: &PersonaProfile,
        user_prompt: &str,
        params: &GenerationParams,
    ) -> AgentCritique {
        let system_prompt = build_panel_system_prompt(persona);
        let timeout_secs = self.settings.agent_timeout_secs;

        let response = tokio::time::timeout(
            Duration::from_secs(timeout_secs),
            self.generator.generate(&system_prompt, user_prompt, params),
        )
        .await
        .unwrap_or(Err(LlmError::Timeout {
            seconds: timeout_secs,
        }));

        let outcome = match response {
            Ok(text) => {
                let parsed = parse_critique(&text);
                if let ParseOutcome::Fallback(ref placeholder) = parsed {
                    debug!(
                        run_id = %run_id,
                        agent_id = %persona.id,
                        confidence = placeholder.confidence,
                        "panel: unparseable critique, using placeholder"
                    );
                }
                CritiqueOutcome::from(parsed)
            }
            Err(e) => {
                warn!(
                    run_id = %run_id,
                    agent_id = %persona.id,
                    transient = e.is_transient(),
                    "panel: agent failed: {}",
                    e
                );
                CritiqueOutcome::Failed {
                    error: e.to_string(),
                }
            }
        };

        AgentCritique::new(persona.id.clone(), persona.name.clone(), outcome)
    }
}

/// Drop repeated ids, keeping the first occurrence.
fn dedupe_ids(ids: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    ids.iter()
        .filter(|id| seen.insert(id.as_str()))
        .cloned()
        .collect()
}
